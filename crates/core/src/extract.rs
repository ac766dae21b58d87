//! Table extraction.
//!
//! [`TableExtractor`] pulls a title and one data table out of a page and
//! turns the table into an [`ExtractionResult`]. Both the title and the
//! table are found through [`LocatorChain`]s, so a page that is missing the
//! specific markup still yields whatever the general fallback can find.
//!
//! # Example
//!
//! ```rust
//! use vitis_core::extract;
//!
//! let html = r#"
//!     <h3>Produção de vinhos</h3>
//!     <table class="tabela">
//!         <tr><th>Produto</th><th>Quantidade (L.)</th></tr>
//!         <tr><td>Vinho de mesa</td><td>169.762.429</td></tr>
//!     </table>
//! "#;
//!
//! let result = extract(html, "http://example.com/?opcao=opt_02");
//! assert_eq!(result.title, "Produção de vinhos");
//! assert_eq!(result.headers, vec!["Produto", "Quantidade (L.)"]);
//! assert_eq!(result.rows[0].get("Produto"), Some("Vinho de mesa"));
//! ```

use scraper::Selector;

use crate::locate::{FirstMatch, LocatorChain, WithinContainer};
use crate::parse::{Document, Element, compile_selector};
use crate::table::{ExtractionResult, Row};
use crate::Result;

/// Configuration for table extraction.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Selector for the heading used as title
    pub title_selector: String,
    /// Selector for the content container searched when no heading is found
    pub container_selector: String,
    /// Selector for the canonical data table
    pub table_selector: String,
    /// Title used when no heading exists
    pub fallback_title: String,
    /// Message set on the result when no table exists
    pub missing_table_message: String,
    /// Prefix for synthesized column names
    pub column_prefix: String,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            title_selector: "h3".to_string(),
            container_selector: "div.conteudo".to_string(),
            table_selector: "table.tabela".to_string(),
            fallback_title: "data not found".to_string(),
            missing_table_message: "table not found".to_string(),
            column_prefix: "Column".to_string(),
        }
    }
}

impl ExtractConfig {
    /// Creates a new builder for ExtractConfig.
    pub fn builder() -> ExtractConfigBuilder {
        ExtractConfigBuilder::new()
    }
}

/// Builder for ExtractConfig.
///
/// # Example
///
/// ```rust
/// use vitis_core::ExtractConfig;
///
/// let config = ExtractConfig::builder()
///     .fallback_title("Dados não encontrados")
///     .column_prefix("Coluna")
///     .build();
/// assert_eq!(config.column_prefix, "Coluna");
/// ```
pub struct ExtractConfigBuilder {
    config: ExtractConfig,
}

impl ExtractConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ExtractConfig::default() }
    }

    /// Sets the title heading selector.
    pub fn title_selector(mut self, value: impl Into<String>) -> Self {
        self.config.title_selector = value.into();
        self
    }

    /// Sets the content container selector.
    pub fn container_selector(mut self, value: impl Into<String>) -> Self {
        self.config.container_selector = value.into();
        self
    }

    /// Sets the canonical table selector.
    pub fn table_selector(mut self, value: impl Into<String>) -> Self {
        self.config.table_selector = value.into();
        self
    }

    /// Sets the fallback title.
    pub fn fallback_title(mut self, value: impl Into<String>) -> Self {
        self.config.fallback_title = value.into();
        self
    }

    /// Sets the message used when no table exists.
    pub fn missing_table_message(mut self, value: impl Into<String>) -> Self {
        self.config.missing_table_message = value.into();
        self
    }

    /// Sets the prefix for synthesized column names.
    pub fn column_prefix(mut self, value: impl Into<String>) -> Self {
        self.config.column_prefix = value.into();
        self
    }

    /// Builds the config.
    pub fn build(self) -> ExtractConfig {
        self.config
    }
}

impl Default for ExtractConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Where the header row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeaderSource {
    /// Read from the table's first row, which is not data.
    Markup,
    /// Generated; every row is data.
    Synthesized,
}

/// Extracts tables from pages with compiled selectors.
///
/// Build one per configuration and reuse it; extraction itself never fails.
#[derive(Debug)]
pub struct TableExtractor {
    config: ExtractConfig,
    titles: LocatorChain,
    tables: LocatorChain,
    row: Selector,
    header_cell: Selector,
    cell: Selector,
}

impl TableExtractor {
    /// Compiles the selectors in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::VitisError::HtmlParseError`] if a configured selector
    /// is invalid.
    pub fn new(config: ExtractConfig) -> Result<Self> {
        let titles = LocatorChain::new()
            .then(FirstMatch::new("heading", &config.title_selector)?)
            .then(WithinContainer::new(
                "content-heading",
                &config.container_selector,
                &config.title_selector,
            )?);

        let tables = LocatorChain::new()
            .then(FirstMatch::new("marked-table", &config.table_selector)?)
            .then(FirstMatch::new("first-table", "table")?);

        Ok(Self {
            config,
            titles,
            tables,
            row: compile_selector("tr")?,
            header_cell: compile_selector("th, td")?,
            cell: compile_selector("td")?,
        })
    }

    /// The configuration this extractor was built from.
    pub fn config(&self) -> &ExtractConfig {
        &self.config
    }

    /// Extracts the title and table from `html`.
    ///
    /// `source_url` is carried into the result untouched.
    pub fn extract(&self, html: &str, source_url: &str) -> ExtractionResult {
        let doc = Document::parse(html);
        let title = self.title(&doc);

        let Some((strategy, table)) = self.tables.locate(&doc) else {
            tracing::debug!(source_url, "no table found");
            return ExtractionResult {
                title,
                headers: Vec::new(),
                rows: Vec::new(),
                source_url: source_url.to_string(),
                message: Some(self.config.missing_table_message.clone()),
            };
        };

        let rows: Vec<Element<'_>> = table.select(&self.row).collect();
        let (headers, source) = self.headers(&rows);

        let skip = match source {
            HeaderSource::Markup => 1,
            HeaderSource::Synthesized => 0,
        };

        let data: Vec<Row> = rows
            .iter()
            .skip(skip)
            .filter_map(|row| {
                let values: Vec<String> = row.select(&self.cell).map(|cell| cell.text()).collect();
                if values.is_empty() { None } else { Some(Row::zip(&headers, values)) }
            })
            .collect();

        tracing::debug!(
            source_url,
            strategy,
            headers = headers.len(),
            rows = data.len(),
            synthesized = source == HeaderSource::Synthesized,
            "extracted table"
        );

        ExtractionResult { title, headers, rows: data, source_url: source_url.to_string(), message: None }
    }

    fn title(&self, doc: &Document) -> String {
        match self.titles.locate(doc) {
            Some((_, heading)) => heading.text(),
            None => self.config.fallback_title.clone(),
        }
    }

    /// Reads headers from the first row, or synthesizes one name per plain
    /// cell of the first row that has any.
    fn headers(&self, rows: &[Element<'_>]) -> (Vec<String>, HeaderSource) {
        let from_markup: Vec<String> = rows
            .first()
            .map(|row| row.select(&self.header_cell).map(|cell| cell.text()).collect())
            .unwrap_or_default();

        if !from_markup.is_empty() {
            return (from_markup, HeaderSource::Markup);
        }

        let width = rows
            .iter()
            .map(|row| row.select(&self.cell).count())
            .find(|&count| count > 0)
            .unwrap_or(0);

        let synthesized = (1..=width).map(|i| format!("{} {}", self.config.column_prefix, i)).collect();
        (synthesized, HeaderSource::Synthesized)
    }
}

/// Extracts a table from `html` with the default configuration.
///
/// This never fails: a page without a table yields an empty result with a
/// message, and a page without a heading gets the fallback title.
pub fn extract(html: &str, source_url: &str) -> ExtractionResult {
    match TableExtractor::new(ExtractConfig::default()) {
        Ok(extractor) => extractor.extract(html, source_url),
        Err(e) => {
            tracing::error!(error = %e, "default extractor configuration rejected");
            let config = ExtractConfig::default();
            ExtractionResult {
                title: config.fallback_title,
                headers: Vec::new(),
                rows: Vec::new(),
                source_url: source_url.to_string(),
                message: Some(config.missing_table_message),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const URL: &str = "http://vitibrasil.cnpuv.embrapa.br/index.php?opcao=opt_02";

    #[test]
    fn test_extract_config_default() {
        let config = ExtractConfig::default();
        assert_eq!(config.title_selector, "h3");
        assert_eq!(config.container_selector, "div.conteudo");
        assert_eq!(config.table_selector, "table.tabela");
        assert_eq!(config.fallback_title, "data not found");
        assert_eq!(config.missing_table_message, "table not found");
        assert_eq!(config.column_prefix, "Column");
    }

    #[test]
    fn test_marked_table_wins_over_earlier_table() {
        let html = r#"
            <table><tr><th>Menu</th></tr><tr><td>Home</td></tr></table>
            <h3>Produção de vinhos, sucos e derivados</h3>
            <table class="tabela">
                <thead><tr><th>Produto</th><th>Quantidade (L.)</th></tr></thead>
                <tbody>
                    <tr><td>VINHO DE MESA</td><td>169.762.429</td></tr>
                    <tr><td>Tinto</td><td>139.320.884</td></tr>
                </tbody>
            </table>
        "#;

        let result = extract(html, URL);
        assert_eq!(result.title, "Produção de vinhos, sucos e derivados");
        assert_eq!(result.headers, vec!["Produto", "Quantidade (L.)"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[1].get("Produto"), Some("Tinto"));
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_first_table_fallback() {
        let html = r#"
            <div>
                <table id="a"><tr><th>Ano</th></tr><tr><td>2023</td></tr></table>
                <table id="b"><tr><th>Other</th></tr></table>
            </div>
        "#;

        let result = extract(html, URL);
        assert_eq!(result.headers, vec!["Ano"]);
        assert_eq!(result.rows[0].get("Ano"), Some("2023"));
    }

    #[test]
    fn test_no_table() {
        let result = extract("<html><body><h3>Exportação</h3><p>Sem dados</p></body></html>", URL);

        assert_eq!(result.title, "Exportação");
        assert!(result.headers.is_empty());
        assert!(result.rows.is_empty());
        assert_eq!(result.message.as_deref(), Some("table not found"));
        assert_eq!(result.source_url, URL);
    }

    #[test]
    fn test_empty_input() {
        let result = extract("", URL);

        assert_eq!(result.title, "data not found");
        assert_eq!(result.source_url, URL);
        assert!(result.message.is_some());
    }

    #[test]
    fn test_custom_title_selector() {
        let extractor = TableExtractor::new(ExtractConfig::builder().title_selector("h3.titulo").build()).unwrap();
        let html = r#"
            <div class="conteudo"><h3 class="titulo"> Importação </h3></div>
            <table><tr><th>País</th></tr></table>
        "#;

        assert_eq!(extractor.extract(html, URL).title, "Importação");
    }

    #[test]
    fn test_synthesized_headers_keep_first_row_as_data() {
        let html = r#"
            <table>
                <tr></tr>
                <tr><td>Tinto</td><td>100</td><td>2023</td></tr>
                <tr><td>Branco</td><td>50</td><td>2023</td></tr>
            </table>
        "#;

        let result = extract(html, URL);
        assert_eq!(result.headers, vec!["Column 1", "Column 2", "Column 3"]);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].get("Column 1"), Some("Tinto"));
        assert_eq!(result.rows[1].get("Column 3"), Some("2023"));
    }

    #[test]
    fn test_row_width_mismatches() {
        let html = r#"
            <table class="tabela">
                <tr><th>Produto</th><th>Quantidade</th></tr>
                <tr><td>Tinto</td><td>100</td><td>overflow</td></tr>
                <tr><td>Rosado</td></tr>
                <tr><th>section heading only</th></tr>
            </table>
        "#;

        let result = extract(html, URL);
        assert_eq!(result.rows.len(), 2);
        assert_eq!(result.rows[0].len(), 2);
        assert!(!result.rows[0].iter().any(|(_, v)| v == "overflow"));
        assert_eq!(result.rows[1].len(), 1);
        assert!(!result.rows[1].contains("Quantidade"));
    }

    #[test]
    fn test_td_header_row_is_consumed() {
        let html = r#"<table><tr><td>Produto</td><td>Valor</td></tr><tr><td>Suco</td><td>9</td></tr></table>"#;

        let result = extract(html, URL);
        assert_eq!(result.headers, vec!["Produto", "Valor"]);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(result.rows[0].get("Valor"), Some("9"));
    }

    #[test]
    fn test_cell_text_trimmed_but_not_normalized() {
        let html = "<table><tr><th>\n  Produto  \n</th></tr><tr><td>  Vinho   <b>fino</b> </td></tr></table>";

        let result = extract(html, URL);
        assert_eq!(result.headers, vec!["Produto"]);
        assert_eq!(result.rows[0].get("Produto"), Some("Vinho   fino"));
    }

    #[test]
    fn test_table_without_rows() {
        let result = extract("<table></table>", URL);

        assert!(result.headers.is_empty());
        assert!(result.rows.is_empty());
        assert_eq!(result.message, None);
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let config = ExtractConfig::builder().table_selector("table[[").build();
        assert!(TableExtractor::new(config).is_err());
    }

    #[test]
    fn test_row_invariants() {
        let html = r#"
            <table>
                <tr><th>A</th><th>B</th></tr>
                <tr><td>1</td><td>2</td><td>3</td><td>4</td></tr>
                <tr><td>5</td></tr>
                <tr></tr>
            </table>
        "#;

        let result = extract(html, URL);
        for row in &result.rows {
            assert!(row.len() <= result.headers.len());
            assert!(row.headers().all(|h| result.headers.iter().any(|x| x == h)));
        }
    }
}
