//! Fallback element lookup.
//!
//! Source pages are not consistently structured, so each element the
//! extractor needs is found by a [`LocatorChain`]: an ordered list of
//! [`Locator`] strategies where the first one that matches wins. The order
//! matters whenever a page satisfies several strategies at once.

use std::fmt;

use scraper::Selector;

use crate::Result;
use crate::parse::{Document, Element, compile_selector};

/// One lookup strategy.
pub trait Locator: fmt::Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Finds the element this strategy is after, if present.
    fn locate<'a>(&self, doc: &'a Document) -> Option<Element<'a>>;
}

/// Matches the first element for a selector anywhere in the document.
#[derive(Debug)]
pub struct FirstMatch {
    name: &'static str,
    selector: Selector,
}

impl FirstMatch {
    pub fn new(name: &'static str, selector: &str) -> Result<Self> {
        Ok(Self { name, selector: compile_selector(selector)? })
    }
}

impl Locator for FirstMatch {
    fn name(&self) -> &'static str {
        self.name
    }

    fn locate<'a>(&self, doc: &'a Document) -> Option<Element<'a>> {
        doc.select_first(&self.selector)
    }
}

/// Matches the first target element inside the first container element.
///
/// Only the first container is searched; later containers are ignored even
/// when the first one holds no target.
#[derive(Debug)]
pub struct WithinContainer {
    name: &'static str,
    container: Selector,
    target: Selector,
}

impl WithinContainer {
    pub fn new(name: &'static str, container: &str, target: &str) -> Result<Self> {
        Ok(Self { name, container: compile_selector(container)?, target: compile_selector(target)? })
    }
}

impl Locator for WithinContainer {
    fn name(&self) -> &'static str {
        self.name
    }

    fn locate<'a>(&self, doc: &'a Document) -> Option<Element<'a>> {
        doc.select_first(&self.container)?.select_first(&self.target)
    }
}

/// Strategies tried in priority order.
#[derive(Debug, Default)]
pub struct LocatorChain {
    locators: Vec<Box<dyn Locator>>,
}

impl LocatorChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a strategy with lower priority than every one already added.
    pub fn then(mut self, locator: impl Locator + 'static) -> Self {
        self.locators.push(Box::new(locator));
        self
    }

    /// Runs the strategies in order and returns the first match along with
    /// the name of the strategy that produced it.
    pub fn locate<'a>(&self, doc: &'a Document) -> Option<(&'static str, Element<'a>)> {
        self.locators
            .iter()
            .find_map(|locator| locator.locate(doc).map(|element| (locator.name(), element)))
    }

    pub fn len(&self) -> usize {
        self.locators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locators.is_empty()
    }
}
