//! Structural queries over fetched HTML
//!
//! Thin layer over `scraper` giving the extractors the handful of operations
//! they need: parse a document, select by CSS, read trimmed text and
//! attributes.

pub mod selectors;

use scraper::{ElementRef, Html, Selector};

/// A parsed HTML document
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses a full HTML document
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Returns true if at least one element matches `css`
    pub fn contains(&self, css: &str) -> bool {
        self.select_one(css).is_some()
    }

    /// First element matching `css`, in document order
    pub fn select_one(&self, css: &str) -> Option<ElementRef<'_>> {
        let selector = compile(css)?;
        self.html.select(&selector).next()
    }

    /// All elements matching `css`, in document order
    pub fn select_all(&self, css: &str) -> Vec<ElementRef<'_>> {
        match compile(css) {
            Some(selector) => self.html.select(&selector).collect(),
            None => Vec::new(),
        }
    }
}

/// First descendant of `element` matching `css`
pub fn find_within<'a>(element: ElementRef<'a>, css: &str) -> Option<ElementRef<'a>> {
    let selector = compile(css)?;
    element.select(&selector).next()
}

/// All descendants of `element` matching `css`, in document order
pub fn find_all_within<'a>(element: ElementRef<'a>, css: &str) -> Vec<ElementRef<'a>> {
    match compile(css) {
        Some(selector) => element.select(&selector).collect(),
        None => Vec::new(),
    }
}

/// Concatenated, trimmed text content of `element`
pub fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Value of attribute `name` on `element`
pub fn attr_of<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element.value().attr(name)
}

fn compile(css: &str) -> Option<Selector> {
    match Selector::parse(css) {
        Ok(selector) => Some(selector),
        Err(e) => {
            tracing::error!("Invalid selector `{}`: {:?}", css, e);
            None
        }
    }
}
