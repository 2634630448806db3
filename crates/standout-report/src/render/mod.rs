//! Renderers and cell formatters.
//!
//! A [`TableRenderer`] pulls header metadata and lazy rows from a
//! [`RowBinder`](crate::RowBinder) and writes them to a character sink. Two
//! renderers ship with the crate:
//!
//! - [`HtmlRenderer`]: a `<table>` fragment. Cells are styled by a
//!   [`CellFormatter`]; without one, a minimal unstyled table is written.
//! - [`TextRenderer`]: a plain-text table with aligned columns.
//!
//! The sink is any [`std::fmt::Write`], so output can go to a `String` or to a
//! caller-provided adapter around a file or socket.

mod formatter;
mod html;
mod text;

use std::borrow::Borrow;
use std::fmt;

use crate::binder::RowBinder;
use crate::error::RenderError;

pub use formatter::{CellContainer, CellFormatter, ClassList, HtmlCellFormatter, Hyperlink};
pub use html::HtmlRenderer;
pub use text::TextRenderer;

/// Writes a binder's columns and a record sequence to a sink.
///
/// Output is produced strictly in order: header, then each row, then each
/// cell of the row.
pub trait TableRenderer {
    fn render<T, I>(
        &self,
        binder: &RowBinder<T>,
        records: I,
        out: &mut dyn fmt::Write,
    ) -> Result<(), RenderError>
    where
        I: IntoIterator,
        I::Item: Borrow<T>;

    /// Renders into a new `String`.
    fn render_to_string<T, I>(&self, binder: &RowBinder<T>, records: I) -> Result<String, RenderError>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let mut out = String::new();
        self.render(binder, records, &mut out)?;
        Ok(out)
    }
}
