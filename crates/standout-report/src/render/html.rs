//! HTML table output.

use std::borrow::Borrow;
use std::fmt;

use html_escape::{encode_double_quoted_attribute, encode_text};
use tracing::{debug, trace};

use super::formatter::{CellFormatter, HtmlCellFormatter};
use super::TableRenderer;
use crate::binder::RowBinder;
use crate::cell::Cell;
use crate::config::RenderConfig;
use crate::error::RenderError;

/// Renders a binder as an HTML `<table>` fragment.
///
/// ```rust
/// use standout_report::{HtmlRenderer, RowBinder, TableRenderer};
///
/// struct Entry { name: &'static str, score: f64 }
///
/// let mut binder = RowBinder::<Entry>::new();
/// binder.column("Name", |e: &Entry| e.name).unwrap();
/// binder.column("Score", |e: &Entry| e.score).unwrap();
///
/// let entries = [
///     Entry { name: "A", score: 12.5 },
///     Entry { name: "B", score: f64::NAN },
/// ];
/// let html = HtmlRenderer::new().render_to_string(&binder, &entries).unwrap();
///
/// assert!(html.contains("<td class=\"num\">12.50</td>"));
/// assert!(html.contains("<td class=\"null num\">~</td>"));
/// ```
pub struct HtmlRenderer {
    table_class: String,
    formatter: Option<Box<dyn CellFormatter>>,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl HtmlRenderer {
    /// Styled renderer using the [`HtmlCellFormatter`].
    pub fn new() -> Self {
        Self::from_config(&RenderConfig::default())
    }

    /// Unstyled renderer: cells are plain `<td>display</td>`.
    pub fn plain() -> Self {
        HtmlRenderer {
            table_class: RenderConfig::default().table_class,
            formatter: None,
        }
    }

    pub fn from_config(config: &RenderConfig) -> Self {
        HtmlRenderer {
            table_class: config.table_class.clone(),
            formatter: Some(Box::new(HtmlCellFormatter::from_config(config))),
        }
    }

    /// CSS class of the `<table>` element. Empty omits the attribute.
    pub fn table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }

    /// Replaces the cell formatter.
    pub fn formatter(mut self, formatter: impl CellFormatter + 'static) -> Self {
        self.formatter = Some(Box::new(formatter));
        self
    }

    /// Drops the cell formatter, falling back to plain cells.
    pub fn without_formatter(mut self) -> Self {
        self.formatter = None;
        self
    }

    fn write_header<T>(&self, binder: &RowBinder<T>, out: &mut dyn fmt::Write) -> fmt::Result {
        if self.table_class.trim().is_empty() {
            writeln!(out, "<table>")?;
        } else {
            writeln!(
                out,
                "<table class=\"{}\">",
                encode_double_quoted_attribute(&self.table_class)
            )?;
        }
        writeln!(out, "<thead><tr>")?;
        for column in binder.columns() {
            match column.description() {
                Some(desc) => writeln!(
                    out,
                    "<th title=\"{}\">{}</th>",
                    encode_double_quoted_attribute(desc),
                    encode_text(column.title())
                )?,
                None => writeln!(out, "<th>{}</th>", encode_text(column.title()))?,
            }
        }
        writeln!(out, "</tr></thead>")?;
        writeln!(out, "<tbody>")
    }
}

/// Fallback cell: display text only, empty for null and error cells.
fn write_plain_cell(out: &mut dyn fmt::Write, cell: &Cell) -> fmt::Result {
    let text = if cell.is_null() || cell.error().is_some() {
        ""
    } else {
        cell.display().unwrap_or("")
    };
    write!(out, "<td>{}</td>", encode_text(text))
}

impl TableRenderer for HtmlRenderer {
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
        debug!(
            columns = binder.len(),
            styled = self.formatter.is_some(),
            "rendering html table"
        );
        self.write_header(binder, out)?;

        let columns = binder.columns();
        for row in binder.rows(records) {
            trace!(row = row.index(), "writing html row");
            writeln!(out, "<tr>")?;
            for cell in row {
                match &self.formatter {
                    Some(formatter) => {
                        formatter.write_cell(out, columns[cell.column()].info(), &cell)?
                    }
                    None => write_plain_cell(out, &cell)?,
                }
                writeln!(out)?;
            }
            writeln!(out, "</tr>")?;
        }

        writeln!(out, "</tbody>")?;
        writeln!(out, "</table>")?;
        Ok(())
    }
}

impl fmt::Debug for HtmlRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlRenderer")
            .field("table_class", &self.table_class)
            .field("styled", &self.formatter.is_some())
            .finish()
    }
}
