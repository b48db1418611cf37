pub mod client;
pub mod config;
pub mod connector;
pub mod error;
pub mod extractor;
pub mod fragment;
pub mod logger;
mod parser;
pub mod page;
pub mod sifter;
pub mod sink;
pub mod transport;
pub mod utils;

pub use self::error::SiftError;

/// Version pulled from Cargo.toml at compile time
pub(crate) const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default filename for config file settings
///
/// Expected location is the user's configuration directory or the current
/// working directory.
pub const DEFAULT_CONFIG_NAME: &str = "pagesift-config.toml";

/// Default file to which extracted elements are written when `-o|--output`
/// isn't specified
pub const DEFAULT_OUTPUT_NAME: &str = "target-element.txt";

/// Default User-Agent presented to the remote server when `-a|--user-agent`
/// isn't specified; a standard browser identification string
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/87.0.4280.88 Safari/537.36";

/// Default number of connection attempts made by a scrape operation before
/// giving up
pub const DEFAULT_SCRAPE_ATTEMPTS: usize = 3;

/// Default number of milliseconds to wait before the first retry of a failed
/// connection attempt; each subsequent wait doubles
pub const DEFAULT_BACKOFF_MILLIS: u64 = 2000;

/// Default growth factor applied to the backoff wait after each failed
/// connection attempt
pub const DEFAULT_BACKOFF_MULTIPLIER: f64 = 2.0;
