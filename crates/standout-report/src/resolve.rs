//! Raw value to cell resolution.
//!
//! A [`CellResolver`] turns what a column extracted into a [`Cell`]. The
//! [`DefaultResolver`] applies type-driven enrichment, dispatching on the
//! [`Value`] variant:
//!
//! | Family | Null | Error | Negative | Display |
//! |--------|------|-------|----------|---------|
//! | float | NaN | type MAX | `< 0` | `#,##0.00` |
//! | signed integer | type MIN | type MAX | `< 0`, except MIN | `#,##0` |
//! | unsigned integer | - | type MAX | - | `#,##0` |
//! | date / date-time | chrono MIN | chrono MAX | - | `YYYY-MM-DD` |
//! | other | `Null`, empty text | - | - | `Display` |
//!
//! Display text is unadorned; the binder adds prefix and suffix once the
//! column's adapters have run.
//!
//! Sentinels are a lossy convention: a genuine `i32::MIN` business value is
//! indistinguishable from "null" and renders as such.
//!
//! The resolver is a strategy injected into the binder, so enrichment can be
//! customized without touching the rest of the pipeline:
//!
//! ```rust
//! use standout_report::{Cell, CellResolver, ColumnInfo, DefaultResolver, Extracted, RowBinder};
//!
//! /// Shows booleans as check marks.
//! struct Checks;
//!
//! impl CellResolver for Checks {
//!     fn resolve(&self, column: &ColumnInfo, raw: Extracted) -> Cell {
//!         match raw {
//!             Extracted::Value(standout_report::Value::Bool(b)) => {
//!                 Cell::text(if b { "✔" } else { "✘" })
//!             }
//!             other => DefaultResolver.resolve(column, other),
//!         }
//!     }
//! }
//!
//! let binder = RowBinder::<(bool,)>::with_resolver(Checks);
//! ```

use chrono::{NaiveDate, NaiveDateTime};

use crate::cell::{Cell, Extracted};
use crate::column::{ColumnInfo, NumberStyle, TextAlign};
use crate::error::CellError;
use crate::util::{group_fixed2, group_int};
use crate::value::{FloatWidth, IntWidth, Value, ValueKind};

/// Strategy translating extracted values into cells.
pub trait CellResolver {
    /// Applies registration-time defaults to a new column.
    ///
    /// The default marks numeric columns with [`NumberStyle::Number`] and
    /// right alignment.
    fn prepare_column(&self, column: &mut ColumnInfo) {
        if column.kind().is_numeric() {
            column.set_number_style(NumberStyle::Number);
            column.set_default_align(TextAlign::Right);
        }
    }

    /// Resolves a successfully extracted value.
    fn resolve(&self, column: &ColumnInfo, raw: Extracted) -> Cell;

    /// Resolves a failure. Must not panic.
    fn resolve_error(&self, _column: &ColumnInfo, error: &CellError) -> Cell {
        Cell::failed(error.to_string())
    }
}

/// Sentinel-aware enrichment for numbers and dates, `Display` for the rest.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultResolver;

impl CellResolver for DefaultResolver {
    fn resolve(&self, column: &ColumnInfo, raw: Extracted) -> Cell {
        match raw {
            Extracted::Cell(cell) => cell,
            Extracted::Value(value) => match kind_mismatch(column, &value) {
                Some(err) => self.resolve_error(column, &err),
                None => self.enrich(column, value),
            },
        }
    }
}

/// A non-null value whose kind differs from the column's declared kind.
fn kind_mismatch(column: &ColumnInfo, value: &Value) -> Option<CellError> {
    let expected = column.kind();
    let actual = value.kind();
    if expected == ValueKind::Any || value.is_null() || actual == expected {
        return None;
    }
    Some(CellError::Unsupported(format!(
        "expected {:?} for column '{}', got {:?}",
        expected,
        column.title(),
        actual
    )))
}

/// Outcome of inspecting a raw value.
struct Enrichment {
    is_null: bool,
    is_error: bool,
    is_negative: bool,
    formatted: Option<String>,
}

impl Enrichment {
    fn plain(formatted: Option<String>) -> Self {
        Enrichment {
            is_null: formatted.is_none(),
            is_error: false,
            is_negative: false,
            formatted,
        }
    }
}

impl DefaultResolver {
    /// Builds the cell for a plain value.
    pub fn enrich(&self, column: &ColumnInfo, value: Value) -> Cell {
        let style = column.number_style();
        let e = match &value {
            Value::Float(v, width) => enrich_float(*v, *width, style),
            Value::Int(v, width) => enrich_int(*v, *width, style),
            Value::UInt(v, width) => enrich_uint(*v, *width, style),
            Value::Date(d) => enrich_date(*d),
            Value::DateTime(dt) => enrich_datetime(*dt),
            Value::Null => Enrichment::plain(None),
            Value::Text(s) if s.is_empty() => Enrichment::plain(None),
            other => Enrichment::plain(Some(other.to_string())),
        };

        let show = !e.is_null && !e.is_error;
        let display = e.formatted.filter(|_| show);

        let mut cell = Cell::with_display(value, display);
        if e.is_null {
            cell.set_null();
        }
        if e.is_error {
            cell.flag_error();
        }
        if e.is_negative {
            cell.info_mut().is_negative = true;
        }
        cell
    }
}

fn scale(v: f64, style: NumberStyle) -> f64 {
    if style == NumberStyle::PercentageMul100 {
        v * 100.0
    } else {
        v
    }
}

fn enrich_float(v: f64, width: FloatWidth, style: NumberStyle) -> Enrichment {
    Enrichment {
        is_null: v.is_nan(),
        is_error: v == width.max(),
        is_negative: v < 0.0,
        formatted: Some(group_fixed2(scale(v, style))),
    }
}

fn enrich_int(v: i64, width: IntWidth, style: NumberStyle) -> Enrichment {
    let formatted = if style == NumberStyle::PercentageMul100 {
        group_int(v as i128 * 100)
    } else {
        group_int(v as i128)
    };
    Enrichment {
        is_null: v == width.signed_min(),
        is_error: v == width.signed_max(),
        is_negative: v < 0 && v != width.signed_min(),
        formatted: Some(formatted),
    }
}

fn enrich_uint(v: u64, width: IntWidth, style: NumberStyle) -> Enrichment {
    let formatted = if style == NumberStyle::PercentageMul100 {
        group_int(v as i128 * 100)
    } else {
        group_int(v as i128)
    };
    Enrichment {
        is_null: false,
        is_error: v == width.unsigned_max(),
        is_negative: false,
        formatted: Some(formatted),
    }
}

fn enrich_date(d: NaiveDate) -> Enrichment {
    Enrichment {
        is_null: d == NaiveDate::MIN,
        is_error: d == NaiveDate::MAX,
        is_negative: false,
        formatted: Some(d.format("%Y-%m-%d").to_string()),
    }
}

fn enrich_datetime(dt: NaiveDateTime) -> Enrichment {
    Enrichment {
        is_null: dt == NaiveDateTime::MIN,
        is_error: dt == NaiveDateTime::MAX,
        is_negative: false,
        formatted: Some(dt.format("%Y-%m-%d").to_string()),
    }
}
