pub mod catalog;
#[cfg(feature = "fetch")]
pub mod client;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod locate;
pub mod parse;
pub mod table;
pub mod urls;

pub use catalog::{Catalog, Category, catalog};
#[cfg(feature = "fetch")]
pub use client::{Outcome, Vitis, VitisConfig, fetch_and_extract};
pub use error::{ErrorPayload, FailureKind, Result, VitisError};
pub use extract::{ExtractConfig, ExtractConfigBuilder, TableExtractor, extract};
pub use fetch::FetchConfig;
#[cfg(feature = "fetch")]
pub use fetch::fetch_url;
pub use fetch::{fetch_file, fetch_stdin};
#[doc(hidden)]
pub use locate::{FirstMatch, Locator, LocatorChain, WithinContainer};
pub use parse::Document;
pub use table::{ExtractionResult, Row};
pub use urls::{DEFAULT_BASE_URL, UrlBuilder, build_url};
