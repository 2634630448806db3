//! Column descriptors.
//!
//! A column is split in two parts:
//!
//! - [`ColumnInfo`]: identity and display hints. Not generic, so resolvers,
//!   adapters and formatters can work with any record type.
//! - [`Column<T>`]: a `ColumnInfo` plus the extraction function for records
//!   of type `T`.
//!
//! Columns are registered on a [`RowBinder`](crate::RowBinder), which fixes
//! their order and index. Display hints stay mutable through the `set_*`
//! methods, each returning `&mut Self` for chaining:
//!
//! ```rust
//! use standout_report::{RowBinder, TextAlign};
//!
//! struct Sale { region: String, share: f64 }
//!
//! let mut binder = RowBinder::<Sale>::new();
//! binder.column("Region", |s: &Sale| s.region.clone()).unwrap()
//!     .set_align(TextAlign::Center);
//! binder.column("Share", |s: &Sale| s.share).unwrap()
//!     .as_percentage()
//!     .set_description("Share of total revenue");
//! ```

use std::any::type_name;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Deref, DerefMut};

use serde::{Deserialize, Serialize};

use crate::adapters::CellAdapter;
use crate::cell::{Cell, Extracted};
use crate::error::CellError;
use crate::record::Field;
use crate::value::{ToValue, ValueKind};

/// Horizontal alignment of a column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// No explicit alignment; the output medium decides.
    #[default]
    None,
    Left,
    Center,
    Right,
}

impl TextAlign {
    /// Lowercase name used in CSS class names, `None` for [`TextAlign::None`].
    pub fn as_css(self) -> Option<&'static str> {
        match self {
            TextAlign::None => None,
            TextAlign::Left => Some("left"),
            TextAlign::Center => Some("center"),
            TextAlign::Right => Some("right"),
        }
    }
}

/// Numeric presentation of a column or cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberStyle {
    #[default]
    None,
    Number,
    /// The value already is a percentage (`12.5` shows as `12.50`).
    Percentage,
    /// The value is a ratio and is multiplied by 100 for display.
    PercentageMul100,
    Currency,
}

impl NumberStyle {
    /// Returns `true` for percentage styles.
    pub fn is_percentage(self) -> bool {
        matches!(self, NumberStyle::Percentage | NumberStyle::PercentageMul100)
    }
}

/// Identity and display hints of a registered column.
pub struct ColumnInfo {
    title: String,
    index: usize,
    source_type: &'static str,
    target_type: &'static str,
    kind: ValueKind,
    description: Option<String>,
    align: TextAlign,
    default_align: TextAlign,
    number_style: NumberStyle,
    prefix: Option<String>,
    suffix: Option<String>,
    attributes: BTreeMap<String, String>,
    adapters: Vec<Box<dyn CellAdapter>>,
}

impl ColumnInfo {
    /// Creates column info with no hints.
    pub fn new(
        title: impl Into<String>,
        source_type: &'static str,
        target_type: &'static str,
        kind: ValueKind,
    ) -> Self {
        ColumnInfo {
            title: title.into(),
            index: 0,
            source_type,
            target_type,
            kind,
            description: None,
            align: TextAlign::None,
            default_align: TextAlign::None,
            number_style: NumberStyle::None,
            prefix: None,
            suffix: None,
            attributes: BTreeMap::new(),
            adapters: Vec::new(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Position in the binder's column list.
    pub fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn set_index(&mut self, index: usize) {
        self.index = index;
    }

    /// Type name of the record the column reads from.
    pub fn source_type(&self) -> &'static str {
        self.source_type
    }

    /// Type name of the extracted value.
    pub fn target_type(&self) -> &'static str {
        self.target_type
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn align(&self) -> TextAlign {
        self.align
    }

    /// Returns `true` while the alignment is the one set at registration.
    pub fn has_default_align(&self) -> bool {
        self.align == self.default_align
    }

    pub fn number_style(&self) -> NumberStyle {
        self.number_style
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, String> {
        &self.attributes
    }

    /// Adapters in application order.
    pub fn adapters(&self) -> &[Box<dyn CellAdapter>] {
        &self.adapters
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = Some(description.into());
        self
    }

    pub fn set_align(&mut self, align: TextAlign) -> &mut Self {
        self.align = align;
        self
    }

    /// Sets the alignment and records it as the column's default, so it does
    /// not produce an `align-*` class. Used by resolvers at registration.
    pub fn set_default_align(&mut self, align: TextAlign) -> &mut Self {
        self.align = align;
        self.default_align = align;
        self
    }

    pub fn set_number_style(&mut self, style: NumberStyle) -> &mut Self {
        self.number_style = style;
        self
    }

    pub fn set_prefix(&mut self, prefix: impl Into<String>) -> &mut Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn set_suffix(&mut self, suffix: impl Into<String>) -> &mut Self {
        self.suffix = Some(suffix.into());
        self
    }

    /// Sets an extra attribute written on every cell container of the column.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Appends an adapter to the chain.
    pub fn add_adapter(&mut self, adapter: impl CellAdapter + 'static) -> &mut Self {
        self.adapters.push(Box::new(adapter));
        self
    }

    /// Shows values as percentages: suffix `" %"` and [`NumberStyle::Percentage`].
    pub fn as_percentage(&mut self) -> &mut Self {
        self.suffix = Some(" %".to_string());
        self.number_style = NumberStyle::Percentage;
        self
    }
}

impl fmt::Debug for ColumnInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnInfo")
            .field("title", &self.title)
            .field("index", &self.index)
            .field("kind", &self.kind)
            .field("target_type", &self.target_type)
            .field("align", &self.align)
            .field("number_style", &self.number_style)
            .field("prefix", &self.prefix)
            .field("suffix", &self.suffix)
            .field("adapters", &self.adapters.len())
            .finish()
    }
}

type Extractor<T> = Box<dyn Fn(&T) -> Result<Extracted, CellError>>;

/// A column for records of type `T`.
///
/// Dereferences to its [`ColumnInfo`].
pub struct Column<T> {
    info: ColumnInfo,
    extract: Extractor<T>,
}

impl<T: 'static> Column<T> {
    /// Column reading an infallible accessor.
    pub fn new<V, F>(title: impl Into<String>, accessor: F) -> Self
    where
        V: ToValue,
        F: Fn(&T) -> V + 'static,
    {
        Column {
            info: ColumnInfo::new(title, type_name::<T>(), type_name::<V>(), V::KIND),
            extract: Box::new(move |record| Ok(Extracted::Value(accessor(record).to_value()))),
        }
    }

    /// Column reading a fallible accessor. Errors become error cells.
    pub fn try_new<V, E, F>(title: impl Into<String>, accessor: F) -> Self
    where
        V: ToValue,
        E: fmt::Display,
        F: Fn(&T) -> Result<V, E> + 'static,
    {
        Column {
            info: ColumnInfo::new(title, type_name::<T>(), type_name::<V>(), V::KIND),
            extract: Box::new(move |record| {
                accessor(record)
                    .map(|v| Extracted::Value(v.to_value()))
                    .map_err(CellError::extract)
            }),
        }
    }

    /// Column whose accessor builds the cell itself, bypassing enrichment.
    pub fn from_cells<F>(title: impl Into<String>, accessor: F) -> Self
    where
        F: Fn(&T) -> Cell + 'static,
    {
        Column {
            info: ColumnInfo::new(title, type_name::<T>(), type_name::<Cell>(), ValueKind::Any),
            extract: Box::new(move |record| Ok(Extracted::Cell(accessor(record)))),
        }
    }

    /// Column reading a declared record field.
    pub fn from_field(field: Field<T>) -> Self {
        let get = field.get;
        let mut info = ColumnInfo::new(field.title, type_name::<T>(), field.target_type, field.kind);
        if let Some(description) = field.description {
            info.set_description(description);
        }
        Column {
            info,
            extract: Box::new(move |record| Ok(Extracted::Value(get(record)))),
        }
    }
}

impl<T> Column<T> {
    /// Extracts the raw value of this column from `record`.
    pub fn extract(&self, record: &T) -> Result<Extracted, CellError> {
        (self.extract)(record)
    }

    pub fn info(&self) -> &ColumnInfo {
        &self.info
    }

    pub fn info_mut(&mut self) -> &mut ColumnInfo {
        &mut self.info
    }
}

impl<T> Deref for Column<T> {
    type Target = ColumnInfo;

    fn deref(&self) -> &ColumnInfo {
        &self.info
    }
}

impl<T> DerefMut for Column<T> {
    fn deref_mut(&mut self) -> &mut ColumnInfo {
        &mut self.info
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Column").field(&self.info).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{IntWidth, Value};

    struct Item {
        name: String,
        qty: i32,
    }

    fn item() -> Item {
        Item {
            name: "bolt".into(),
            qty: 12,
        }
    }

    #[test]
    fn new_records_types_and_kind() {
        let col = Column::new("Qty", |i: &Item| i.qty);
        assert_eq!(col.title(), "Qty");
        assert_eq!(col.kind(), ValueKind::Int);
        assert_eq!(col.target_type(), "i32");
        assert!(col.source_type().ends_with("Item"));
        assert_eq!(
            col.extract(&item()).unwrap(),
            Extracted::Value(Value::Int(12, IntWidth::W32))
        );
    }

    #[test]
    fn try_new_propagates_failure() {
        let col = Column::try_new("Name", |i: &Item| -> Result<String, String> {
            Err(format!("no label for {}", i.name))
        });
        assert_eq!(
            col.extract(&item()).unwrap_err(),
            CellError::Extract("no label for bolt".into())
        );
    }

    #[test]
    fn from_cells_passes_cell() {
        let col = Column::from_cells("Name", |i: &Item| Cell::text(i.name.to_uppercase()));
        assert_eq!(col.kind(), ValueKind::Any);
        match col.extract(&item()).unwrap() {
            Extracted::Cell(cell) => assert_eq!(cell.display(), Some("BOLT")),
            other => panic!("expected cell, got {:?}", other),
        }
    }

    #[test]
    fn setters_chain() {
        let mut col = Column::new("Share", |i: &Item| i.qty as f64);
        col.set_align(TextAlign::Center)
            .set_prefix("~")
            .set_attribute("data-unit", "pct")
            .as_percentage();
        assert_eq!(col.align(), TextAlign::Center);
        assert_eq!(col.prefix(), Some("~"));
        assert_eq!(col.suffix(), Some(" %"));
        assert_eq!(col.number_style(), NumberStyle::Percentage);
        assert_eq!(col.attributes().get("data-unit").map(String::as_str), Some("pct"));
    }

    #[test]
    fn default_align_tracking() {
        let mut col = Column::new("Qty", |i: &Item| i.qty);
        col.set_default_align(TextAlign::Right);
        assert!(col.has_default_align());
        col.set_align(TextAlign::Left);
        assert!(!col.has_default_align());
    }

    #[test]
    fn align_css_names() {
        assert_eq!(TextAlign::None.as_css(), None);
        assert_eq!(TextAlign::Center.as_css(), Some("center"));
    }
}
