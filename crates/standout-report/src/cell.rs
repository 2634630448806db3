//! Resolved cells and per-cell overrides.

use std::collections::BTreeMap;

use crate::column::NumberStyle;
use crate::util::truncate_message;
use crate::value::{ToValue, Value};

/// Per-cell overrides of the owning column's display hints.
///
/// Every field that is set wins over the column default for this one cell.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CellInfo {
    /// Container id.
    pub id: Option<String>,
    /// Extra CSS classes, whitespace separated. Seeds the class list.
    pub css_class: Option<String>,
    /// Numeric style override.
    pub number_style: Option<NumberStyle>,
    /// Flags the cell as erroneous without a captured failure.
    pub is_error: bool,
    /// The value is negative.
    pub is_negative: bool,
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub tooltip: Option<String>,
    /// Wraps the cell content in a hyperlink.
    pub url: Option<String>,
    /// CSS class of the hyperlink.
    pub url_class: Option<String>,
    /// Extra container attributes; merged over the column's attributes.
    pub attributes: BTreeMap<String, String>,
}

/// The resolved representation of one (record, column) pair.
///
/// Cells are built by a [`CellResolver`](crate::CellResolver) and then handed
/// to the column's adapters, which may refine them through the setters below.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    column: usize,
    row: usize,
    info: Option<CellInfo>,
    value: Value,
    display: Option<String>,
    error: Option<String>,
    is_null: bool,
}

impl Cell {
    /// Creates a cell for a raw value, displayed with its default string form.
    ///
    /// Useful for extraction functions that hand back pre-built cells; those
    /// bypass enrichment entirely.
    pub fn new(value: impl ToValue) -> Self {
        let value = value.to_value();
        let is_null = value.is_null();
        let display = (!is_null).then(|| value.to_string());
        Cell {
            column: 0,
            row: 0,
            info: None,
            value,
            display,
            error: None,
            is_null,
        }
    }

    /// Creates a cell that only carries display text.
    pub fn text(display: impl Into<String>) -> Self {
        let display = display.into();
        Cell {
            column: 0,
            row: 0,
            info: None,
            value: Value::Text(display.clone()),
            display: Some(display),
            error: None,
            is_null: false,
        }
    }

    /// Creates a null cell.
    pub fn null() -> Self {
        Cell {
            column: 0,
            row: 0,
            info: None,
            value: Value::Null,
            display: None,
            error: None,
            is_null: true,
        }
    }

    /// Creates an error cell. The message is truncated to a single short line.
    pub fn failed(message: impl AsRef<str>) -> Self {
        Cell {
            error: Some(truncate_message(message.as_ref())),
            ..Cell::null()
        }
    }

    /// Creates a cell for `value` with an explicit display string.
    pub fn with_display(value: Value, display: Option<String>) -> Self {
        let is_null = display.is_none();
        Cell {
            column: 0,
            row: 0,
            info: None,
            value,
            display,
            error: None,
            is_null,
        }
    }

    /// Attaches overrides, replacing any existing ones.
    pub fn with_info(mut self, info: CellInfo) -> Self {
        self.info = Some(info);
        self
    }

    /// Index of the owning column.
    pub fn column(&self) -> usize {
        self.column
    }

    /// Index of the source record in the rendered sequence.
    pub fn row(&self) -> usize {
        self.row
    }

    pub(crate) fn set_position(&mut self, row: usize, column: usize) {
        self.row = row;
        self.column = column;
    }

    /// The raw value the cell was resolved from.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Display text. `None` for null and error cells.
    ///
    /// Prefix and suffix are part of it once the binder has finished the cell;
    /// adapters see the text without them.
    pub fn display(&self) -> Option<&str> {
        self.display.as_deref()
    }

    /// Truncated failure message, if the cell failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn info(&self) -> Option<&CellInfo> {
        self.info.as_ref()
    }

    /// Returns the overrides, creating empty ones on first use.
    pub fn info_mut(&mut self) -> &mut CellInfo {
        self.info.get_or_insert_with(CellInfo::default)
    }

    /// `true` for null values and for failed cells.
    pub fn is_null(&self) -> bool {
        self.is_null
    }

    /// `true` if the cell captured a failure or was flagged erroneous.
    pub fn is_error(&self) -> bool {
        self.error.is_some() || self.info.as_ref().is_some_and(|i| i.is_error)
    }

    /// `true` if the negative flag is set.
    pub fn is_negative(&self) -> bool {
        self.info.as_ref().is_some_and(|i| i.is_negative)
    }

    /// Replaces the display text.
    pub fn set_display(&mut self, display: impl Into<String>) -> &mut Self {
        self.display = Some(display.into());
        self.is_null = false;
        self
    }

    pub fn set_null(&mut self) -> &mut Self {
        self.display = None;
        self.is_null = true;
        self
    }

    pub fn set_tooltip(&mut self, tooltip: impl Into<String>) -> &mut Self {
        self.info_mut().tooltip = Some(tooltip.into());
        self
    }

    pub fn set_link(&mut self, url: impl Into<String>) -> &mut Self {
        self.info_mut().url = Some(url.into());
        self
    }

    /// Appends a CSS class to the per-cell class override.
    pub fn add_class(&mut self, class: &str) -> &mut Self {
        let info = self.info_mut();
        info.css_class = Some(match info.css_class.take() {
            Some(existing) if !existing.trim().is_empty() => format!("{} {}", existing, class),
            _ => class.to_string(),
        });
        self
    }

    /// Wraps the display text, if any.
    pub(crate) fn wrap_display(&mut self, prefix: &str, suffix: &str) {
        if let Some(display) = self.display.as_mut() {
            display.insert_str(0, prefix);
            display.push_str(suffix);
        }
    }

    /// Flags the cell as erroneous without discarding its display value.
    pub fn flag_error(&mut self) -> &mut Self {
        self.info_mut().is_error = true;
        self
    }
}

/// Result of a column's extraction function.
///
/// Either a plain value that goes through enrichment, or a pre-built
/// [`Cell`] that is passed through untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum Extracted {
    Value(Value),
    Cell(Cell),
}

impl From<Value> for Extracted {
    fn from(value: Value) -> Self {
        Extracted::Value(value)
    }
}

impl From<Cell> for Extracted {
    fn from(cell: Cell) -> Self {
        Extracted::Cell(cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::MAX_MESSAGE_WIDTH;
    use crate::value::IntWidth;

    #[test]
    fn new_uses_default_string_form() {
        let cell = Cell::new(42i32);
        assert_eq!(cell.display(), Some("42"));
        assert_eq!(cell.value(), &Value::Int(42, IntWidth::W32));
        assert!(!cell.is_null());
    }

    #[test]
    fn none_is_null() {
        let cell = Cell::new(None::<String>);
        assert!(cell.is_null());
        assert_eq!(cell.display(), None);
    }

    #[test]
    fn failed_cells_are_null_and_error() {
        let cell = Cell::failed("x".repeat(300));
        assert!(cell.is_null());
        assert!(cell.is_error());
        let msg = cell.error().unwrap();
        assert_eq!(msg.chars().count(), MAX_MESSAGE_WIDTH);
        assert!(msg.ends_with('…'));
    }

    #[test]
    fn flag_error_keeps_display() {
        let mut cell = Cell::text("42");
        cell.flag_error();
        assert!(cell.is_error());
        assert_eq!(cell.display(), Some("42"));
        assert!(cell.error().is_none());
    }

    #[test]
    fn add_class_accumulates() {
        let mut cell = Cell::text("a");
        cell.add_class("hot").add_class("new");
        assert_eq!(cell.info().unwrap().css_class.as_deref(), Some("hot new"));
    }
}
