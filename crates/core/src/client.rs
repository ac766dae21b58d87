//! Fetch-and-extract API.
//!
//! [`Vitis`] ties the URL builder, the HTTP fetch and the table extractor
//! together. [`Vitis::fetch_and_extract`] never returns an error: every
//! failure is folded into an [`Outcome`] carrying an [`ErrorPayload`].
//!
//! # Example
//!
//! ```rust,no_run
//! use vitis_core::{Outcome, Vitis, VitisConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let vitis = Vitis::new(VitisConfig::default())?;
//! match vitis.fetch_and_extract("export", Some("2022"), Some("vinhos")).await {
//!     Outcome::Extracted(result) => println!("{} rows", result.rows.len()),
//!     Outcome::Failed(_, payload) => eprintln!("{}", payload.error),
//! }
//! # Ok(())
//! # }
//! ```

use serde::{Serialize, Serializer};

use crate::catalog::{Catalog, catalog};
use crate::error::{ErrorPayload, FailureKind};
use crate::extract::{ExtractConfig, TableExtractor};
use crate::fetch::{FetchConfig, fetch_url};
use crate::table::ExtractionResult;
use crate::urls::{DEFAULT_BASE_URL, UrlBuilder};
use crate::{Result, VitisError};

/// Settings for a [`Vitis`] client.
#[derive(Debug, Clone)]
pub struct VitisConfig {
    /// Data source endpoint.
    pub base_url: String,
    /// HTTP settings.
    pub fetch: FetchConfig,
    /// Extraction settings.
    pub extract: ExtractConfig,
}

impl Default for VitisConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_BASE_URL.to_string(), fetch: FetchConfig::default(), extract: ExtractConfig::default() }
    }
}

/// Result of one fetch-and-extract call.
///
/// Serializes as the bare [`ExtractionResult`] or the bare [`ErrorPayload`],
/// so callers tell them apart by the presence of the `error` key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Extracted(ExtractionResult),
    Failed(FailureKind, ErrorPayload),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Extracted(_))
    }

    /// Converts the outcome to a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl From<Result<ExtractionResult>> for Outcome {
    fn from(result: Result<ExtractionResult>) -> Self {
        match result {
            Ok(extracted) => Outcome::Extracted(extracted),
            Err(e) => Outcome::Failed(e.kind(), ErrorPayload::from(&e)),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Outcome::Extracted(result) => result.serialize(serializer),
            Outcome::Failed(_, payload) => payload.serialize(serializer),
        }
    }
}

/// Client for the viticulture data source.
///
/// Holds no per-request state, so one instance can serve concurrent calls.
#[derive(Debug)]
pub struct Vitis {
    urls: UrlBuilder,
    extractor: TableExtractor,
    fetch: FetchConfig,
}

impl Vitis {
    /// Creates a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`VitisError::InvalidUrl`] for a bad base URL, or
    /// [`VitisError::HtmlParseError`] for an invalid extraction selector.
    pub fn new(config: VitisConfig) -> Result<Self> {
        Ok(Self {
            urls: UrlBuilder::new(&config.base_url)?,
            extractor: TableExtractor::new(config.extract)?,
            fetch: config.fetch,
        })
    }

    pub fn url_builder(&self) -> &UrlBuilder {
        &self.urls
    }

    pub fn extractor(&self) -> &TableExtractor {
        &self.extractor
    }

    /// The category → subcategories discovery view.
    pub fn catalog(&self) -> Catalog {
        catalog()
    }

    /// Builds the URL, fetches the page and extracts its table.
    ///
    /// An unknown category fails before any network access.
    pub async fn try_fetch_and_extract(
        &self, category: &str, year: Option<&str>, subcategory: Option<&str>,
    ) -> Result<ExtractionResult> {
        let url = self.urls.build(category, year, subcategory)?;

        let html = fetch_url(&url, &self.fetch).await.inspect_err(|e| {
            tracing::warn!(url = %url, error = %e, "fetch failed");
        })?;

        Ok(self.extractor.extract(&html, url.as_str()))
    }

    /// Like [`Vitis::try_fetch_and_extract`], with errors folded into the outcome.
    pub async fn fetch_and_extract(&self, category: &str, year: Option<&str>, subcategory: Option<&str>) -> Outcome {
        self.try_fetch_and_extract(category, year, subcategory).await.into()
    }
}

/// Fetches and extracts a category using the default configuration.
pub async fn fetch_and_extract(category: &str, year: Option<&str>, subcategory: Option<&str>) -> Outcome {
    match Vitis::new(VitisConfig::default()) {
        Ok(vitis) => vitis.fetch_and_extract(category, year, subcategory).await,
        Err(e) => Outcome::from(Err::<ExtractionResult, VitisError>(e)),
    }
}
