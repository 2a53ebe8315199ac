//! Table extraction: log-page markup (or pre-extracted TSV) to raw rows.

use crate::errors::{AppError, AppResult};
use crate::models::raw_row::RawLogRow;
use regex::Regex;
use std::sync::LazyLock;

static TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<table\b[^>]*\bclass\s*=\s*["'][^"']*\btable-hover\b[^"']*["'][^>]*>(.*?)</table>"#)
        .expect("valid table regex")
});
static ROW_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<tr\b[^>]*>(.*?)</tr>").expect("valid row regex"));
static CELL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<td\b[^>]*>(.*?)</td>").expect("valid cell regex"));
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("valid tag regex"));

pub trait TableExtractor {
    fn extract(&self) -> AppResult<Vec<RawLogRow>>;
}

/// Which cells of a table row hold the action label and the detail text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnMap {
    pub label: usize,
    pub detail: usize,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            label: 1,
            detail: 2,
        }
    }
}

impl ColumnMap {
    /// Rows too short for either column are skipped.
    pub fn pick(&self, cells: &[String]) -> Option<RawLogRow> {
        let label = cells.get(self.label)?;
        let detail = cells.get(self.detail)?;
        Some(RawLogRow::new(label.clone(), detail.clone()))
    }
}

/// Reads the `table.table-hover` of a saved staff log page.
pub struct HtmlTableExtractor {
    markup: String,
    columns: ColumnMap,
}

impl HtmlTableExtractor {
    pub fn new(markup: impl Into<String>, columns: ColumnMap) -> Self {
        Self {
            markup: markup.into(),
            columns,
        }
    }

    /// Text of every `<td>` of every `<tr>`, in document order.
    pub fn cell_rows(&self) -> AppResult<Vec<Vec<String>>> {
        let body = TABLE_RE
            .captures(&self.markup)
            .and_then(|c| c.get(1))
            .ok_or_else(|| AppError::Extract("no table.table-hover in page".into()))?
            .as_str();

        Ok(ROW_RE
            .captures_iter(body)
            .map(|row| {
                CELL_RE
                    .captures_iter(&row[1])
                    .map(|cell| cell_text(&cell[1]))
                    .collect::<Vec<String>>()
            })
            .collect())
    }
}

impl TableExtractor for HtmlTableExtractor {
    fn extract(&self) -> AppResult<Vec<RawLogRow>> {
        Ok(self
            .cell_rows()?
            .iter()
            .filter_map(|cells| self.columns.pick(cells))
            .collect())
    }
}

/// Reads `label<TAB>detail` lines copied out of the browser. Lines with a
/// single field are skipped.
pub struct TsvExtractor {
    text: String,
}

impl TsvExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl TableExtractor for TsvExtractor {
    fn extract(&self) -> AppResult<Vec<RawLogRow>> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(self.text.as_bytes());

        let mut out = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            if let (Some(label), Some(detail)) = (rec.get(0), rec.get(1)) {
                out.push(RawLogRow::new(label.trim(), detail.trim()));
            }
        }
        Ok(out)
    }
}

/// Strip markup, decode the common entities and collapse whitespace.
pub fn cell_text(html: &str) -> String {
    let text = TAG_RE.replace_all(html, " ");
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
