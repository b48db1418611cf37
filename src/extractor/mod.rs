//! evaluate css selectors against a fetched page
mod builder;
mod container;

pub use self::builder::{ExtractionTarget, ExtractorBuilder};
pub use self::container::Extractor;

use crate::fragment::Fragment;
use crate::page::Page;
