use lazy_static::lazy_static;
use scraper::Selector;

use super::*;

/// css selector matching heading-level elements, the fixed "titles" target
pub(super) const TITLES_SELECTOR: &str = "h1, h2, h3, h4";

/// css selector matching anchor elements that carry a link target
pub(super) const LINKS_SELECTOR: &str = "a[href]";

lazy_static! {
    /// `TITLES_SELECTOR` precompiled
    pub(super) static ref TITLES: Selector = Selector::parse(TITLES_SELECTOR).unwrap();

    /// `LINKS_SELECTOR` precompiled
    pub(super) static ref LINKS: Selector = Selector::parse(LINKS_SELECTOR).unwrap();
}

/// Which elements the extractor should lift out of the page
#[derive(Debug, Clone)]
pub enum ExtractionTarget {
    /// heading-level elements (h1 through h4)
    Titles,

    /// anchor elements carrying an href
    Links,

    /// elements matching a caller-supplied css selector
    Selector(String),
}

/// responsible for building an `Extractor`
pub struct ExtractorBuilder<'a> {
    /// Page from which to extract fragments
    page: &'a Page,

    /// type of extraction to be performed
    target: ExtractionTarget,
}

/// ExtractorBuilder implementation
impl<'a> ExtractorBuilder<'a> {
    /// builder seeded with the page to extract from; target defaults to titles
    pub fn with_page(page: &'a Page) -> Self {
        Self {
            page,
            target: ExtractionTarget::Titles,
        }
    }

    /// builder call to set `target`
    pub fn target(mut self, target: ExtractionTarget) -> Self {
        self.target = target;
        self
    }

    /// finalize configuration of `ExtractorBuilder` and return an `Extractor`
    pub fn build(self) -> Extractor<'a> {
        Extractor {
            page: self.page,
            target: self.target,
        }
    }
}
