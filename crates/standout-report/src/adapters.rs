//! Post-resolution cell adapters.
//!
//! Adapters are attached to a column and run in registration order, after the
//! resolver has built the cell and before the formatter writes it. Each adapter
//! sees every change made by the adapters before it.
//!
//! Any `Fn(&mut Cell) -> Result<(), CellError>` closure is an adapter:
//!
//! ```rust
//! use standout_report::{Cell, CellError, RowBinder};
//!
//! struct Page { slug: String }
//!
//! let mut binder = RowBinder::<Page>::new();
//! binder
//!     .column("Slug", |p: &Page| p.slug.clone())
//!     .unwrap()
//!     .add_adapter(|cell: &mut Cell| -> Result<(), CellError> {
//!         let url = format!("/pages/{}", cell.display().unwrap_or_default());
//!         cell.set_link(url);
//!         Ok(())
//!     });
//! ```
//!
//! A failing adapter turns its cell into an error cell; the rest of the row is
//! unaffected.

use crate::cell::Cell;
use crate::error::CellError;

/// A mutation hook applied to every resolved cell of a column.
pub trait CellAdapter {
    /// Refines the cell in place.
    fn adapt(&self, cell: &mut Cell) -> Result<(), CellError>;
}

impl<F> CellAdapter for F
where
    F: Fn(&mut Cell) -> Result<(), CellError>,
{
    fn adapt(&self, cell: &mut Cell) -> Result<(), CellError> {
        self(cell)
    }
}

/// Adds a hyperlink built from the cell. Cells for which the URL function
/// returns `None` are left alone.
pub struct Link<F> {
    url: F,
    class: Option<String>,
}

impl<F> CellAdapter for Link<F>
where
    F: Fn(&Cell) -> Option<String>,
{
    fn adapt(&self, cell: &mut Cell) -> Result<(), CellError> {
        if let Some(target) = (self.url)(cell) {
            let info = cell.info_mut();
            info.url = Some(target);
            if let Some(class) = &self.class {
                info.url_class = Some(class.clone());
            }
        }
        Ok(())
    }
}

/// See [`Link`].
pub fn link<F>(url: F) -> Link<F>
where
    F: Fn(&Cell) -> Option<String>,
{
    Link { url, class: None }
}

/// See [`Link`]; the anchor gets `class`.
pub fn link_with_class<F>(url: F, class: impl Into<String>) -> Link<F>
where
    F: Fn(&Cell) -> Option<String>,
{
    Link {
        url,
        class: Some(class.into()),
    }
}

/// Sets the same tooltip on every cell.
pub struct Tooltip(String);

impl CellAdapter for Tooltip {
    fn adapt(&self, cell: &mut Cell) -> Result<(), CellError> {
        cell.set_tooltip(self.0.clone());
        Ok(())
    }
}

pub fn tooltip(text: impl Into<String>) -> Tooltip {
    Tooltip(text.into())
}

/// Flags cells matching a predicate as erroneous, which renders them with the
/// `err` class while keeping their value.
pub struct FlagErrorIf<F>(F);

impl<F> CellAdapter for FlagErrorIf<F>
where
    F: Fn(&Cell) -> bool,
{
    fn adapt(&self, cell: &mut Cell) -> Result<(), CellError> {
        if (self.0)(cell) {
            cell.flag_error();
        }
        Ok(())
    }
}

pub fn flag_error_if<F>(pred: F) -> FlagErrorIf<F>
where
    F: Fn(&Cell) -> bool,
{
    FlagErrorIf(pred)
}

/// Adds a CSS class to every non-null cell.
pub struct CssClass(String);

impl CellAdapter for CssClass {
    fn adapt(&self, cell: &mut Cell) -> Result<(), CellError> {
        if !cell.is_null() {
            cell.add_class(&self.0);
        }
        Ok(())
    }
}

pub fn css_class(class: impl Into<String>) -> CssClass {
    CssClass(class.into())
}
