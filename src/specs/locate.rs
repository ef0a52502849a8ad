// src/specs/locate.rs
//! Finding the three kinds of tables on the scheduler page.
//!
//! The page is not a stable contract, so each table is looked up by
//! identifier first and by heading proximity last. Not finding a table is
//! a degraded page, not an error: callers get `None` / an empty list.

use scraper::ElementRef;

use crate::config::consts::*;
use crate::core::html::{self, Outline};

/// A VM table plus the host it belongs to (from its `VMs on <ip>` heading).
#[derive(Clone, Debug)]
pub struct VmTable<'a> {
    pub host_ip: String,
    pub table: ElementRef<'a>,
}

/// `table#hosts`, else the first table in `#hosts_wrapper`,
/// else the first table after a heading reading exactly `Hosts`.
pub fn hosts_table<'a>(outline: &Outline<'a>) -> Option<ElementRef<'a>> {
    if let Some(t) = outline.named("table").find(|t| html::has_id(*t, HOSTS_TABLE_ID)) {
        return Some(t);
    }

    let wrapper = outline
        .iter()
        .map(|(_, el)| el)
        .find(|el| html::has_id(*el, HOSTS_WRAPPER_ID));
    if let Some(t) = wrapper.and_then(|w| html::first_descendant(w, "table")) {
        logd!("Hosts: using table inside #{HOSTS_WRAPPER_ID}");
        return Some(t);
    }

    match table_after_heading(outline, |text| text == HOSTS_HEADING) {
        Some(t) => {
            logd!("Hosts: using table after '{HOSTS_HEADING}' heading");
            Some(t)
        }
        None => {
            logw!("Could not find hosts table");
            None
        }
    }
}

/// First table after the first heading reading exactly `Scheduler Internals`.
pub fn scheduler_internals_table<'a>(outline: &Outline<'a>) -> Option<ElementRef<'a>> {
    let Some((pos, _)) = outline
        .headings()
        .find(|(_, h)| html::raw_text(*h) == INTERNALS_HEADING)
    else {
        logw!("{INTERNALS_HEADING} heading not found");
        return None;
    };

    let table = outline.find_next(pos, "table");
    if table.is_none() {
        logw!("{INTERNALS_HEADING} table not found");
    }
    table
}

/// All `table.vms`; if there are none, the first table after every
/// heading containing `VMs on`.
pub fn vm_tables<'a>(outline: &Outline<'a>) -> Vec<VmTable<'a>> {
    // (heading text, table that follows it) for every "VMs on" heading
    let marked: Vec<(String, Option<ElementRef<'a>>)> = outline
        .headings()
        .filter_map(|(pos, h)| {
            let text = html::raw_text(h);
            text.contains(VM_HEADING_MARKER)
                .then(|| (text, outline.find_next(pos, "table")))
        })
        .collect();

    let mut tables: Vec<ElementRef<'a>> = outline
        .named("table")
        .filter(|t| html::has_class(*t, VM_TABLE_CLASS))
        .collect();

    if tables.is_empty() {
        tables = marked.iter().filter_map(|(_, next)| *next).collect();
    }
    if tables.is_empty() {
        logw!("No VM tables found");
    }

    tables
        .into_iter()
        .map(|table| {
            let host_ip = marked
                .iter()
                .find(|(_, next)| next.is_some_and(|n| n.id() == table.id()))
                .map(|(text, _)| host_ip_from_heading(text))
                .unwrap_or_else(|| s!(UNKNOWN));
            VmTable { host_ip, table }
        })
        .collect()
}

/// `"  VMs on 10.0.0.1 "` → `"10.0.0.1"`
pub fn host_ip_from_heading(text: &str) -> String {
    text.trim().replace(VM_HEADING_MARKER, "").trim().to_string()
}

fn table_after_heading<'a>(
    outline: &Outline<'a>,
    matches: impl Fn(&str) -> bool,
) -> Option<ElementRef<'a>> {
    let (pos, _) = outline.headings().find(|(_, h)| matches(&html::raw_text(*h)))?;
    outline.find_next(pos, "table")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::parse;

    fn marker(t: ElementRef<'_>) -> Option<String> {
        t.value().attr("data-m").map(|s| s.to_string())
    }

    #[test]
    fn hosts_prefers_id() {
        let doc = parse(r#"
            <h3>Hosts</h3><table data-m="heading"></table>
            <div id="hosts_wrapper"><table data-m="wrapped"></table></div>
            <table id="hosts" data-m="id"></table>
        "#);
        let outline = Outline::new(&doc);
        assert_eq!(hosts_table(&outline).and_then(marker).as_deref(), Some("id"));
    }

    #[test]
    fn hosts_falls_back_to_wrapper() {
        let doc = parse(r#"
            <h3>Hosts</h3><table data-m="heading"></table>
            <div id="hosts_wrapper"><div><table data-m="wrapped"></table></div></div>
        "#);
        let outline = Outline::new(&doc);
        assert_eq!(hosts_table(&outline).and_then(marker).as_deref(), Some("wrapped"));
    }

    #[test]
    fn hosts_falls_back_to_heading() {
        let doc = parse(r#"
            <div id="hosts_wrapper"><p>empty</p></div>
            <h3>Hosts overview</h3><table data-m="wrong"></table>
            <h3>Hosts</h3><p>intro</p><table data-m="heading"></table>
        "#);
        let outline = Outline::new(&doc);
        assert_eq!(hosts_table(&outline).and_then(marker).as_deref(), Some("heading"));
    }

    #[test]
    fn hosts_missing_everywhere() {
        let doc = parse("<h3>Hostess</h3><table></table>");
        let outline = Outline::new(&doc);
        assert!(hosts_table(&outline).is_none());
    }

    #[test]
    fn internals_needs_exact_heading() {
        let doc = parse(r#"<h3>Scheduler internals</h3><table></table>"#);
        assert!(scheduler_internals_table(&Outline::new(&doc)).is_none());

        let doc = parse(r#"<h3>Scheduler Internals</h3><div><table data-m="si"></table></div>"#);
        let found = scheduler_internals_table(&Outline::new(&doc));
        assert_eq!(found.and_then(marker).as_deref(), Some("si"));
    }

    #[test]
    fn internals_heading_without_table() {
        let doc = parse(r#"<table></table><h3>Scheduler Internals</h3><p>nothing yet</p>"#);
        assert!(scheduler_internals_table(&Outline::new(&doc)).is_none());
    }

    #[test]
    fn vms_by_class_take_ip_from_heading() {
        let doc = parse(r#"
            <h3>VMs on 10.0.0.1</h3><table class="vms" data-m="a"></table>
            <table class="vms" data-m="b"></table>
        "#);
        let outline = Outline::new(&doc);
        let vms = vm_tables(&outline);
        assert_eq!(vms.len(), 2);
        assert_eq!(vms[0].host_ip, "10.0.0.1");
        assert_eq!(marker(vms[0].table).as_deref(), Some("a"));
        // the heading's next table is "a", so "b" stays untagged
        assert_eq!(vms[1].host_ip, "unknown");
    }

    #[test]
    fn vms_by_heading_when_no_class() {
        let doc = parse(r#"
            <h3>VMs on 10.0.0.1</h3><table data-m="a"></table>
            <h4> VMs on 10.0.0.2 </h4><table data-m="b"></table>
            <h3>Other</h3><table data-m="c"></table>
        "#);
        let outline = Outline::new(&doc);
        let vms = vm_tables(&outline);
        let got: Vec<_> = vms.iter().map(|v| (v.host_ip.as_str(), marker(v.table))).collect();
        assert_eq!(
            got,
            vec![("10.0.0.1", Some(s!("a"))), ("10.0.0.2", Some(s!("b")))]
        );
    }

    #[test]
    fn no_vm_tables() {
        let doc = parse("<h3>Hosts</h3><table></table>");
        assert!(vm_tables(&Outline::new(&doc)).is_empty());
    }

    #[test]
    fn heading_ip_is_trimmed() {
        assert_eq!(host_ip_from_heading("  VMs on   10.1.2.3\n"), "10.1.2.3");
        assert_eq!(host_ip_from_heading("VMs on"), "");
    }
}
