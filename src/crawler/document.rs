//! Document lookups for the crawler module
//!
//! Extraction code only talks to the [`Document`] trait and the owned
//! [`Element`] snapshots it returns. [`HtmlPage`] is the scraper-backed
//! implementation produced by the fetcher.

use std::collections::BTreeMap;

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};
use tracing::warn;

/// Owned copy of a matched element
///
/// The element remembers which node of its page it was copied from, so the
/// same page can answer scoped and "next after" queries for it later.
/// Passing it to a different page finds nothing meaningful.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    node: NodeId,
    name: String,
    text: String,
    attributes: BTreeMap<String, String>,
}

impl Element {
    fn snapshot(element: ElementRef<'_>) -> Self {
        Self {
            node: element.id(),
            name: element.value().name().to_string(),
            text: element.text().collect(),
            attributes: element
                .value()
                .attrs()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
        }
    }

    /// Tag name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Concatenated text of the element and all its descendants
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Attribute value, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

/// Read-only queries the extraction steps need from a page
pub trait Document {
    /// First element matching `selector` in document order
    fn find_single(&self, selector: &str) -> Option<Element>;

    /// Every element matching `selector`, in document order
    fn find_all(&self, selector: &str) -> Vec<Element>;

    /// First descendant of `scope` matching `selector`
    fn find_within(&self, scope: &Element, selector: &str) -> Option<Element>;

    /// First element after `anchor` in document order matching `selector`,
    /// including the anchor's own descendants
    fn find_after(&self, anchor: &Element, selector: &str) -> Option<Element>;

    /// Full text content of the page
    fn text(&self) -> String;

    /// Whether the page text contains `needle`
    fn contains_text(&self, needle: &str) -> bool {
        self.text().contains(needle)
    }
}

/// A parsed HTML page
#[derive(Debug)]
pub struct HtmlPage {
    html: Html,
}

impl HtmlPage {
    /// Parse a complete HTML document
    pub fn parse(body: &str) -> Self {
        Self {
            html: Html::parse_document(body),
        }
    }

    /// Compile a selector, logging and skipping the lookup if it is invalid
    fn compile(selector: &str) -> Option<Selector> {
        match Selector::parse(selector) {
            Ok(selector) => Some(selector),
            Err(e) => {
                warn!("Failed to parse selector '{}': {}", selector, e);
                None
            }
        }
    }

    fn node(&self, element: &Element) -> Option<NodeRef<'_, Node>> {
        self.html.tree.get(element.node)
    }

    fn first_match<'a>(
        nodes: impl Iterator<Item = NodeRef<'a, Node>>,
        selector: &Selector,
    ) -> Option<Element> {
        nodes
            .filter_map(ElementRef::wrap)
            .find(|element| selector.matches(element))
            .map(Element::snapshot)
    }
}

/// Nodes strictly after `node` in document order, starting with its own
/// descendants
fn following<'a>(node: NodeRef<'a, Node>) -> impl Iterator<Item = NodeRef<'a, Node>> {
    let inside = node.descendants().skip(1);
    let outside = std::iter::once(node)
        .chain(node.ancestors())
        .flat_map(|n| n.next_siblings())
        .flat_map(|sibling| sibling.descendants());
    inside.chain(outside)
}

impl Document for HtmlPage {
    fn find_single(&self, selector: &str) -> Option<Element> {
        let selector = Self::compile(selector)?;
        self.html.select(&selector).next().map(Element::snapshot)
    }

    fn find_all(&self, selector: &str) -> Vec<Element> {
        match Self::compile(selector) {
            Some(selector) => self.html.select(&selector).map(Element::snapshot).collect(),
            None => Vec::new(),
        }
    }

    fn find_within(&self, scope: &Element, selector: &str) -> Option<Element> {
        let selector = Self::compile(selector)?;
        let root = self.node(scope)?;
        Self::first_match(root.descendants().skip(1), &selector)
    }

    fn find_after(&self, anchor: &Element, selector: &str) -> Option<Element> {
        let selector = Self::compile(selector)?;
        let anchor = self.node(anchor)?;
        Self::first_match(following(anchor), &selector)
    }

    fn text(&self) -> String {
        self.html.root_element().text().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!doctype html>
<html>
<head><title>Listing</title></head>
<body>
  <ul>
    <li><a class="tile" href="/watch?v=one">One</a><span aria-label="4 minutes">4:00</span></li>
    <li><a class="tile" href="/watch?v=two">Two</a></li>
    <li><a class="tile" href="/watch?v=three">Three <span class="inner">x</span></a><span aria-label="1 minute">1:00</span></li>
  </ul>
  <button class="like"><span class="count">12</span></button>
</body>
</html>"#;

    #[test]
    fn test_find_all_in_document_order() {
        let page = HtmlPage::parse(PAGE);
        let tiles = page.find_all("a.tile");
        let hrefs: Vec<_> = tiles.iter().filter_map(|t| t.attr("href")).collect();
        assert_eq!(hrefs, vec!["/watch?v=one", "/watch?v=two", "/watch?v=three"]);
        assert_eq!(tiles[0].name(), "a");
    }

    #[test]
    fn test_find_single_and_text() {
        let page = HtmlPage::parse(PAGE);
        assert_eq!(page.find_single("title").unwrap().text(), "Listing");
        assert!(page.find_single("div.missing").is_none());
        assert!(page.contains_text("Three"));
        assert!(!page.contains_text("This channel does not exist."));
    }

    #[test]
    fn test_find_within_scopes_to_descendants() {
        let page = HtmlPage::parse(PAGE);
        let button = page.find_single("button.like").unwrap();
        let label = page.find_within(&button, "span.count").unwrap();
        assert_eq!(label.text(), "12");

        let first_tile = page.find_single("a.tile").unwrap();
        assert!(page.find_within(&first_tile, "span").is_none());
    }

    #[test]
    fn test_find_after_skips_to_next_match() {
        let page = HtmlPage::parse(PAGE);
        let tiles = page.find_all("a.tile");

        let first = page.find_after(&tiles[0], "span[aria-label]").unwrap();
        assert_eq!(first.text(), "4:00");

        // The second tile has no label of its own and picks up the next one.
        let second = page.find_after(&tiles[1], "span[aria-label]").unwrap();
        assert_eq!(second.text(), "1:00");

        // The anchor's own descendants come first.
        let inner = page.find_after(&tiles[2], "span").unwrap();
        assert_eq!(inner.text(), "x");

        let button = page.find_single("button.like").unwrap();
        assert!(page.find_after(&button, "span[aria-label]").is_none());
    }

    #[test]
    fn test_lookups_from_an_anchor_walk_forward_only() {
        let page = HtmlPage::parse(PAGE);
        let label = page.find_single("span.count").unwrap();

        assert!(page.find_after(&label, "a.tile").is_none());
        assert!(page.find_within(&label, "span").is_none());
    }

    #[test]
    fn test_invalid_selector_finds_nothing() {
        let page = HtmlPage::parse(PAGE);
        assert!(page.find_single("a[").is_none());
        assert!(page.find_all("a[").is_empty());
    }
}
