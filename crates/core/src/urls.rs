//! Retrieval URL construction.
//!
//! [`UrlBuilder`] turns a (category, year, subcategory) selection into the
//! data source URL. Only the category is validated. The year is passed
//! through as-is and an unknown subcategory is dropped without error.
//!
//! # Example
//!
//! ```rust
//! use vitis_core::build_url;
//!
//! let url = build_url("processing", Some("2023"), Some("viniferas")).unwrap();
//! assert_eq!(
//!     url.as_str(),
//!     "http://vitibrasil.cnpuv.embrapa.br/index.php?opcao=opt_03&ano=2023&subopcao=10"
//! );
//! ```

use url::Url;

use crate::{Category, Result, VitisError};

/// Default data source endpoint.
pub const DEFAULT_BASE_URL: &str = "http://vitibrasil.cnpuv.embrapa.br/index.php";

/// Builds retrieval URLs against a base endpoint.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: Url,
}

impl UrlBuilder {
    /// Creates a builder for the given base endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`VitisError::InvalidUrl`] if `base` is not an absolute URL
    /// that can carry a query string.
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).map_err(|e| VitisError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(VitisError::InvalidUrl(format!("{} cannot carry a query", base)));
        }
        Ok(Self { base })
    }

    /// The base endpoint URLs are built against.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the retrieval URL for a selection.
    ///
    /// Empty `year` or `subcategory` strings count as absent.
    ///
    /// # Errors
    ///
    /// Returns [`VitisError::InvalidSelection`] if `category` is unknown.
    pub fn build(&self, category: &str, year: Option<&str>, subcategory: Option<&str>) -> Result<Url> {
        let category: Category = category.parse()?;
        Ok(self.build_for(category, year, subcategory))
    }

    /// Builds the retrieval URL for an already validated category.
    pub fn build_for(&self, category: Category, year: Option<&str>, subcategory: Option<&str>) -> Url {
        let mut url = self.base.clone();
        {
            let mut query = url.query_pairs_mut();
            query.clear();
            query.append_pair("opcao", category.code());

            if let Some(year) = year.filter(|y| !y.is_empty()) {
                query.append_pair("ano", year);
            }

            if let Some(code) = subcategory.and_then(|s| category.subcategory_code(s)) {
                query.append_pair("subopcao", code);
            }
        }

        tracing::debug!(%category, url = %url, "built retrieval url");
        url
    }
}

/// Builds a retrieval URL against [`DEFAULT_BASE_URL`].
pub fn build_url(category: &str, year: Option<&str>, subcategory: Option<&str>) -> Result<Url> {
    UrlBuilder::new(DEFAULT_BASE_URL)?.build(category, year, subcategory)
}
