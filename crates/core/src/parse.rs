//! HTML parsing and DOM querying.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! HTML and navigating the DOM tree using CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use vitis_core::parse::{Document, compile_selector};
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h3>  Produção de vinhos  </h3>
//!             <table class="tabela"><tr><td>Tinto</td></tr></table>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let heading = doc.select_first(&compile_selector("h3").unwrap()).unwrap();
//! assert_eq!(heading.text(), "Produção de vinhos");
//! ```

use scraper::{Html, Selector};

use crate::{Result, VitisError};

/// Compiles a CSS selector.
///
/// # Errors
///
/// Returns [`VitisError::HtmlParseError`] if the selector is invalid.
pub fn compile_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| VitisError::HtmlParseError(format!("Invalid selector: {}", e)))
}

/// Represents a parsed HTML document.
///
/// Parsing is lenient: malformed markup is repaired the way browsers do,
/// so any input string, including an empty one, yields a document.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Gets the raw HTML representation.
    ///
    /// Returns a reference to the underlying `scraper::Html` instance.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Selects every element matching `selector`, in document order.
    pub fn select<'a>(&'a self, selector: &'a Selector) -> impl Iterator<Item = Element<'a>> + 'a {
        self.html.select(selector).map(|element| Element { element })
    }

    /// Returns the first element matching `selector`, in document order.
    pub fn select_first(&self, selector: &Selector) -> Option<Element<'_>> {
        self.html.select(selector).next().map(|element| Element { element })
    }
}

/// A wrapper around scraper's ElementRef.
///
/// # Example
///
/// ```rust
/// use vitis_core::parse::{Document, compile_selector};
///
/// let doc = Document::parse(r#"<table class="tabela"><tr><th> Ano </th></tr></table>"#);
/// let table = doc.select_first(&compile_selector("table").unwrap()).unwrap();
///
/// assert_eq!(table.tag_name(), "table");
/// assert_eq!(table.attr("class"), Some("tabela"));
/// assert_eq!(table.text(), "Ano");
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the text content of this element, trimmed at both ends.
    ///
    /// Inner whitespace and the text of nested markup are kept as they are.
    pub fn text(&self) -> String {
        self.element.text().collect::<String>().trim().to_string()
    }

    /// Gets the value of an attribute.
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.element.value().attr(name)
    }

    /// Gets the lowercase tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements matching `selector`, in document order.
    pub fn select<'s>(&self, selector: &'s Selector) -> impl Iterator<Item = Element<'a>> + use<'a, 's> {
        self.element.select(selector).map(|element| Element { element })
    }

    /// Returns the first descendant matching `selector`.
    pub fn select_first(&self, selector: &Selector) -> Option<Element<'a>> {
        self.element.select(selector).next().map(|element| Element { element })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html lang="pt-BR">
        <body>
            <div class="conteudo">
                <h3>
                    Comercialização de vinhos   e derivados
                </h3>
                <p class="content">Paragraph 1</p>
                <p class="content">Paragraph <b>2</b></p>
            </div>
        </body>
        </html>
    "#;

    #[test]
    fn test_select_in_document_order() {
        let doc = Document::parse(SAMPLE_HTML);
        let sel = compile_selector("p.content").unwrap();
        let texts: Vec<String> = doc.select(&sel).map(|el| el.text()).collect();

        assert_eq!(texts, vec!["Paragraph 1", "Paragraph 2"]);
    }

    #[test]
    fn test_text_trims_only_the_ends() {
        let doc = Document::parse(SAMPLE_HTML);
        let heading = doc.select_first(&compile_selector("h3").unwrap()).unwrap();

        assert_eq!(heading.text(), "Comercialização de vinhos   e derivados");
    }

    #[test]
    fn test_nested_select() {
        let doc = Document::parse(SAMPLE_HTML);
        let container = doc.select_first(&compile_selector("div.conteudo").unwrap()).unwrap();
        let sel = compile_selector("p").unwrap();

        assert_eq!(container.select(&sel).count(), 2);
        assert_eq!(container.attr("class"), Some("conteudo"));
        assert_eq!(container.tag_name(), "div");
    }

    #[test]
    fn test_invalid_selector() {
        let result = compile_selector("[[invalid");
        assert!(matches!(result, Err(VitisError::HtmlParseError(_))));
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::parse("");
        assert!(doc.select_first(&compile_selector("table").unwrap()).is_none());
    }
}
