//! Plain-text table output.
//!
//! Column widths depend on every cell, so this renderer buffers the rows it is
//! handed before writing anything.

use std::borrow::Borrow;
use std::fmt;

use tracing::debug;

use super::formatter::shows_error_token;
use super::TableRenderer;
use crate::binder::RowBinder;
use crate::cell::Cell;
use crate::column::{ColumnInfo, TextAlign};
use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::util::{display_width, pad_center, pad_left, pad_right};

/// Renders a binder as an aligned plain-text table.
///
/// Unlike [`HtmlRenderer`](crate::HtmlRenderer), every row is evaluated and
/// held in memory before the first line is written.
///
/// ```rust
/// use standout_report::{RowBinder, TableRenderer, TextRenderer};
///
/// let mut binder = RowBinder::<(String, f64)>::new();
/// binder.column("Name", |r: &(String, f64)| r.0.clone()).unwrap();
/// binder.column("Score", |r: &(String, f64)| r.1).unwrap();
///
/// let text = TextRenderer::new()
///     .render_to_string(&binder, [("A".to_string(), 12.5), ("B".to_string(), f64::NAN)])
///     .unwrap();
///
/// assert_eq!(text, "Name  Score\n----  -----\nA     12.50\nB         ~\n");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextRenderer {
    separator: String,
    null_token: String,
    error_token: String,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        TextRenderer {
            separator: "  ".to_string(),
            null_token: config.null_token.clone(),
            error_token: config.error_token.clone(),
        }
    }

    /// Text between columns (default two spaces).
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    fn cell_text(&self, cell: &Cell) -> String {
        if shows_error_token(cell) {
            self.error_token.clone()
        } else if cell.is_null() {
            self.null_token.clone()
        } else {
            cell.display().unwrap_or("").to_string()
        }
    }

    fn write_line(
        &self,
        out: &mut dyn fmt::Write,
        columns: &[&ColumnInfo],
        widths: &[usize],
        texts: &[String],
    ) -> fmt::Result {
        let line = columns
            .iter()
            .zip(widths)
            .zip(texts)
            .map(|((column, &width), text)| pad(column, text, width))
            .collect::<Vec<_>>()
            .join(self.separator.as_str());
        writeln!(out, "{}", line.trim_end())
    }
}

fn pad(column: &ColumnInfo, text: &str, width: usize) -> String {
    match column.align() {
        TextAlign::Right => pad_left(text, width),
        TextAlign::Center => pad_center(text, width),
        TextAlign::Left => pad_right(text, width),
        TextAlign::None if column.kind().is_numeric() => pad_left(text, width),
        TextAlign::None => pad_right(text, width),
    }
}

impl TableRenderer for TextRenderer {
    fn render<T, I>(
        &self,
        binder: &RowBinder<T>,
        records: I,
        out: &mut dyn fmt::Write,
    ) -> Result<(), RenderError>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let columns: Vec<&ColumnInfo> = binder.columns().iter().map(|c| c.info()).collect();
        let titles: Vec<String> = columns.iter().map(|c| c.title().to_string()).collect();

        let body: Vec<Vec<String>> = binder
            .rows(records)
            .map(|row| row.map(|cell| self.cell_text(&cell)).collect())
            .collect();
        debug!(columns = columns.len(), rows = body.len(), "rendering text table");

        let mut widths: Vec<usize> = titles.iter().map(|t| display_width(t)).collect();
        for row in &body {
            for (width, text) in widths.iter_mut().zip(row) {
                *width = (*width).max(display_width(text));
            }
        }

        // Titles use the column alignment as well.
        self.write_line(out, &columns, &widths, &titles)?;
        let rules: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        self.write_line(out, &columns, &widths, &rules)?;
        for row in &body {
            self.write_line(out, &columns, &widths, row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Rec {
        item: &'static str,
        qty: i64,
    }

    fn binder() -> RowBinder<Rec> {
        let mut b = RowBinder::new();
        b.column("Item", |r: &Rec| r.item).unwrap();
        b.column("Qty", |r: &Rec| r.qty).unwrap();
        b
    }

    #[test]
    fn numeric_columns_align_right() {
        let recs = vec![
            Rec { item: "bolts", qty: 1200 },
            Rec { item: "nut", qty: 7 },
        ];
        let text = TextRenderer::new().render_to_string(&binder(), &recs).unwrap();
        assert_eq!(text, "Item     Qty\n-----  -----\nbolts  1,200\nnut        7\n");
    }

    #[test]
    fn center_and_wide_characters() {
        let mut b = binder();
        b.column_mut("Item").unwrap().set_align(TextAlign::Center);
        let recs = vec![
            Rec { item: "日本", qty: 1 },
            Rec { item: "x", qty: 2 },
        ];
        let text = TextRenderer::new().render_to_string(&b, &recs).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Item  Qty");
        assert_eq!(lines[2], "日本    1");
        assert_eq!(lines[3], " x      2");
    }

    #[test]
    fn error_cells_use_error_token() {
        let mut b = binder();
        b.try_column("Check", |r: &Rec| {
            if r.qty > 5 {
                Err("too many")
            } else {
                Ok(r.qty)
            }
        })
        .unwrap();
        let recs = vec![Rec { item: "a", qty: 9 }];
        let text = TextRenderer::new()
            .separator(" | ")
            .render_to_string(&b, &recs)
            .unwrap();
        assert_eq!(text.lines().nth(2), Some("a    |   9 | #ERR#"));
    }

    #[test]
    fn header_only_for_no_records() {
        let text = TextRenderer::new()
            .render_to_string(&binder(), Vec::<Rec>::new())
            .unwrap();
        assert_eq!(text, "Item  Qty\n----  ---\n");
    }
}
