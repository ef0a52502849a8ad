// src/core/html.rs
//! Thin layer over `scraper` for the few questions the page readers ask:
//! "what comes next in the document?", "what text does this hold?",
//! "is this a heading?".

use scraper::{ElementRef, Html};

const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// html5ever never rejects input; broken markup just yields a smaller tree.
pub fn parse(markup: &str) -> Html {
    Html::parse_document(markup)
}

/// Full text under an element, as-is.
pub fn raw_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Full text under an element, trimmed.
pub fn text_of(el: ElementRef<'_>) -> String {
    raw_text(el).trim().to_string()
}

pub fn is_heading(el: ElementRef<'_>) -> bool {
    let name = el.value().name();
    HEADINGS.iter().any(|h| *h == name)
}

pub fn has_class(el: ElementRef<'_>, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

pub fn has_id(el: ElementRef<'_>, id: &str) -> bool {
    el.value().id() == Some(id)
}

/// Child elements with the given tag name, in order.
pub fn children_named<'a>(el: ElementRef<'a>, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + 'a {
    el.children()
        .filter_map(ElementRef::wrap)
        .filter(move |c| c.value().name() == tag)
}

/// First element with `tag` strictly inside `el`.
pub fn first_descendant<'a>(el: ElementRef<'a>, tag: &str) -> Option<ElementRef<'a>> {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|d| d.value().name() == tag)
}

/// Every element of a document, flattened in document order.
///
/// "The first table following this heading" means the first table that
/// opens after the heading opens, wherever it sits in the tree.
pub struct Outline<'a> {
    elements: Vec<ElementRef<'a>>,
}

impl<'a> Outline<'a> {
    pub fn new(doc: &'a Html) -> Self {
        let elements = doc
            .tree
            .root()
            .descendants()
            .filter_map(ElementRef::wrap)
            .collect();
        Self { elements }
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// `(position, element)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, ElementRef<'a>)> + '_ {
        self.elements.iter().copied().enumerate()
    }

    pub fn named(&self, tag: &'a str) -> impl Iterator<Item = ElementRef<'a>> + '_ {
        self.elements
            .iter()
            .copied()
            .filter(move |el| el.value().name() == tag)
    }

    pub fn headings(&self) -> impl Iterator<Item = (usize, ElementRef<'a>)> + '_ {
        self.iter().filter(|(_, el)| is_heading(*el))
    }

    /// First `tag` element after position `pos`.
    pub fn find_next(&self, pos: usize, tag: &str) -> Option<ElementRef<'a>> {
        self.elements
            .get(pos + 1..)?
            .iter()
            .copied()
            .find(|el| el.value().name() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outline_follows_document_order() {
        let doc = parse("<div><h3>A</h3><p>x</p></div><table id=t></table>");
        let outline = Outline::new(&doc);
        let names: Vec<_> = outline.iter().map(|(_, e)| e.value().name().to_string()).collect();
        let h = names.iter().position(|n| n == "h3").unwrap();
        let p = names.iter().position(|n| n == "p").unwrap();
        let t = names.iter().position(|n| n == "table").unwrap();
        assert!(h < p && p < t);
    }

    #[test]
    fn find_next_crosses_nesting() {
        let doc = parse("<div><h3>Hosts</h3></div><section><div><table id=deep></table></div></section>");
        let outline = Outline::new(&doc);
        let (pos, _) = outline.headings().next().unwrap();
        let next = outline.find_next(pos, "table").unwrap();
        assert!(has_id(next, "deep"));
    }

    #[test]
    fn find_next_at_end_is_none() {
        let doc = parse("<table></table><h3>Late</h3>");
        let outline = Outline::new(&doc);
        let (pos, _) = outline.headings().next().unwrap();
        assert!(outline.find_next(pos, "table").is_none());
        assert!(outline.find_next(outline.len() + 5, "table").is_none());
    }

    #[test]
    fn text_helpers_trim_and_decode() {
        let doc = parse("<h2>  VMs&nbsp;on <b>10.0.0.1</b>\n</h2>");
        let outline = Outline::new(&doc);
        let (_, h) = outline.headings().next().unwrap();
        assert_eq!(text_of(h), "VMs\u{a0}on 10.0.0.1");
        assert!(raw_text(h).starts_with("  "));
    }

    #[test]
    fn class_and_id_checks() {
        let doc = parse(r#"<table id="hosts" class="grid vms"></table>"#);
        let outline = Outline::new(&doc);
        let t = outline.named("table").next().unwrap();
        assert!(has_id(t, "hosts"));
        assert!(has_class(t, "vms"));
        assert!(!has_class(t, "vm"));
    }
}
