// src/specs/rows.rs
//! Header/cell pairing for one located table.

use scraper::ElementRef;

use crate::core::html::{children_named, text_of};

/// One data row as an ordered `header → cell` mapping.
///
/// Header names are kept verbatim (case and inner spacing included).
/// A repeated header keeps its first position and its last value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn insert(&mut self, header: &str, value: String) {
        match self.cells.iter_mut().find(|(h, _)| h == header) {
            Some((_, v)) => *v = value,
            None => self.cells.push((s!(header), value)),
        }
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// Cell text, or `default` when the column is absent.
    pub fn get_or<'a>(&'a self, header: &str, default: &'a str) -> &'a str {
        self.get(header).unwrap_or(default)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

/// Headers plus accepted rows of one table.
#[derive(Clone, Debug, Default)]
pub struct TableRows {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Pair header cells with every data row of `table`.
///
/// A row is kept only when its `<td>` count equals the header count (and
/// is non-zero); anything else is dropped without a partial mapping.
pub fn extract(table: ElementRef<'_>) -> TableRows {
    let thead = children_named(table, "thead").next();
    let all_rows = table_rows(table);

    let (headers, header_rows) = match thead {
        Some(head) => {
            let head_rows: Vec<_> = children_named(head, "tr").collect();
            let headers = head_rows.first().map(|tr| header_cells(*tr)).unwrap_or_default();
            (headers, head_rows.len())
        }
        None => {
            let headers = all_rows.first().map(|tr| header_cells(*tr)).unwrap_or_default();
            (headers, 1)
        }
    };

    // html5ever wraps loose <tr>s in an implied <tbody>, so a body section
    // only counts as explicit next to an explicit <thead>.
    // Only the first body section is read.
    let body = children_named(table, "tbody").next();
    let data_rows: Vec<ElementRef<'_>> = match (thead, body) {
        (Some(_), Some(b)) => children_named(b, "tr").collect(),
        _ => all_rows.into_iter().skip(header_rows).collect(),
    };

    let mut rows = Vec::with_capacity(data_rows.len());
    let mut skipped = 0usize;
    for tr in data_rows {
        let cells: Vec<String> = children_named(tr, "td").map(text_of).collect();
        if cells.is_empty() || cells.len() != headers.len() {
            skipped += 1;
            continue;
        }
        let mut row = RawRow::default();
        for (h, v) in headers.iter().zip(cells) {
            row.insert(h, v);
        }
        rows.push(row);
    }
    if skipped > 0 {
        logd!("Skipped {skipped} row(s) not matching {} header(s)", headers.len());
    }

    TableRows { headers, rows }
}

/// Every row that belongs to `table` itself, in order. Rows of nested
/// tables stay with their own table.
fn table_rows<'a>(table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    let mut out = Vec::new();
    for child in table.children().filter_map(ElementRef::wrap) {
        match child.value().name() {
            "tr" => out.push(child),
            "thead" | "tbody" | "tfoot" => out.extend(children_named(child, "tr")),
            _ => {}
        }
    }
    out
}

/// `<th>` cells of a header row; a row without any falls back to `<td>`.
fn header_cells(tr: ElementRef<'_>) -> Vec<String> {
    let th: Vec<String> = children_named(tr, "th").map(text_of).collect();
    if !th.is_empty() {
        return th;
    }
    children_named(tr, "td").map(text_of).collect()
}
