//! Binding records to rows of cells.
//!
//! A [`RowBinder`] owns the ordered columns for one record type. Handing it a
//! sequence of records yields [`Rows`], a lazy iterator of [`Row`]s, each of
//! which is a lazy iterator of [`Cell`]s evaluated in column order.
//!
//! Per-cell failures never escape: when extraction or an adapter fails (or
//! panics), that one cell becomes an error cell and evaluation carries on with
//! the next column.
//!
//! ```rust
//! use standout_report::RowBinder;
//!
//! struct Task { name: String, hours: f64 }
//!
//! let mut binder = RowBinder::<Task>::new();
//! binder.column("Task", |t: &Task| t.name.clone()).unwrap();
//! binder.column("Hours", |t: &Task| t.hours).unwrap();
//!
//! let tasks = vec![
//!     Task { name: "Design".into(), hours: 12.5 },
//!     Task { name: "Review".into(), hours: f64::NAN },
//! ];
//!
//! let rows: Vec<Vec<Option<String>>> = binder
//!     .rows(&tasks)
//!     .map(|row| row.map(|cell| cell.display().map(str::to_string)).collect())
//!     .collect();
//!
//! assert_eq!(rows[0], vec![Some("Design".into()), Some("12.50".into())]);
//! assert_eq!(rows[1], vec![Some("Review".into()), None]);
//! ```

use std::any::{type_name, Any};
use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use tracing::{debug, trace, warn};

use crate::cell::Cell;
use crate::column::{Column, ColumnInfo};
use crate::config::ColumnHints;
use crate::error::{CellError, ConfigError, RenderError, Result};
use crate::record::Record;
use crate::render::TableRenderer;
use crate::resolve::{CellResolver, DefaultResolver};
use crate::value::ToValue;

/// Ordered column list for records of type `T`.
pub struct RowBinder<T> {
    columns: Vec<Column<T>>,
    resolver: Box<dyn CellResolver>,
}

impl<T> RowBinder<T> {
    /// Creates an empty binder using the [`DefaultResolver`].
    pub fn new() -> Self {
        Self::with_resolver(DefaultResolver)
    }

    /// Creates an empty binder with a custom resolver.
    pub fn with_resolver(resolver: impl CellResolver + 'static) -> Self {
        RowBinder {
            columns: Vec::new(),
            resolver: Box::new(resolver),
        }
    }

    /// Registers a column and returns its info for further configuration.
    ///
    /// Fails if a column with the same title exists.
    pub fn push(&mut self, mut column: Column<T>) -> Result<&mut ColumnInfo> {
        if self.columns.iter().any(|c| c.title() == column.title()) {
            return Err(ConfigError::DuplicateColumn(column.title().to_string()));
        }
        column.info_mut().set_index(self.columns.len());
        self.resolver.prepare_column(column.info_mut());
        self.columns.push(column);

        let last = self.columns.len() - 1;
        Ok(self.columns[last].info_mut())
    }

    /// The registered columns, in order.
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    /// Column info by title.
    pub fn column_info(&self, title: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.title() == title).map(Column::info)
    }

    /// Mutable column info by title.
    pub fn column_mut(&mut self, title: &str) -> Option<&mut ColumnInfo> {
        self.columns
            .iter_mut()
            .find(|c| c.title() == title)
            .map(Column::info_mut)
    }

    /// Column titles, in order.
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.title())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Applies configured hints, keyed by column title.
    ///
    /// Every key must name a registered column.
    pub fn apply_hints(&mut self, hints: &BTreeMap<String, ColumnHints>) -> Result<()> {
        for (title, hint) in hints {
            let column = self
                .column_mut(title)
                .ok_or_else(|| ConfigError::UnknownColumn(title.clone()))?;
            hint.apply(column);
        }
        Ok(())
    }

    /// Maps records to lazily evaluated rows.
    pub fn rows<I>(&self, records: I) -> Rows<'_, T, I::IntoIter>
    where
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        Rows {
            binder: self,
            records: records.into_iter(),
            next_row: 0,
        }
    }

    /// Evaluates a single cell. `row` is informational.
    ///
    /// Returns `None` if `column` is out of bounds.
    pub fn cell(&self, record: &T, row: usize, column: usize) -> Option<Cell> {
        let column = self.columns.get(column)?;
        let info = column.info();

        let outcome = catch_unwind(AssertUnwindSafe(|| -> std::result::Result<Cell, CellError> {
            let raw = column.extract(record)?;
            let mut cell = self.resolver.resolve(info, raw);
            for adapter in info.adapters() {
                adapter.adapt(&mut cell)?;
            }
            apply_affixes(info, &mut cell);
            Ok(cell)
        }));

        let mut cell = match outcome {
            Ok(Ok(cell)) => cell,
            Ok(Err(err)) => {
                debug!(row, column = info.title(), error = %err, "cell failed");
                self.resolver.resolve_error(info, &err)
            }
            Err(payload) => {
                let err = CellError::Panic(panic_message(payload.as_ref()));
                warn!(row, column = info.title(), error = %err, "cell panicked");
                self.resolver.resolve_error(info, &err)
            }
        };
        cell.set_position(row, info.index());
        Some(cell)
    }

    /// Renders `records` with `renderer` into `out`.
    pub fn render_to<R, I>(
        &self,
        records: I,
        renderer: &R,
        out: &mut dyn fmt::Write,
    ) -> std::result::Result<&Self, RenderError>
    where
        R: TableRenderer,
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        renderer.render(self, records.into_iter(), out)?;
        Ok(self)
    }

    /// Renders `records` with `renderer` into a new string.
    pub fn render_to_string<R, I>(
        &self,
        records: I,
        renderer: &R,
    ) -> std::result::Result<String, RenderError>
    where
        R: TableRenderer,
        I: IntoIterator,
        I::Item: Borrow<T>,
    {
        let mut out = String::new();
        self.render_to(records, renderer, &mut out)?;
        Ok(out)
    }
}

impl<T: 'static> RowBinder<T> {
    /// Registers a column reading an infallible accessor.
    pub fn column<V, F>(&mut self, title: impl Into<String>, accessor: F) -> Result<&mut ColumnInfo>
    where
        V: ToValue,
        F: Fn(&T) -> V + 'static,
    {
        self.push(Column::new(title, accessor))
    }

    /// Registers a column reading a fallible accessor.
    pub fn try_column<V, E, F>(
        &mut self,
        title: impl Into<String>,
        accessor: F,
    ) -> Result<&mut ColumnInfo>
    where
        V: ToValue,
        E: fmt::Display,
        F: Fn(&T) -> std::result::Result<V, E> + 'static,
    {
        self.push(Column::try_new(title, accessor))
    }

    /// Registers a column whose accessor builds cells directly.
    pub fn cell_column<F>(&mut self, title: impl Into<String>, accessor: F) -> Result<&mut ColumnInfo>
    where
        F: Fn(&T) -> Cell + 'static,
    {
        self.push(Column::from_cells(title, accessor))
    }
}

impl<T: Record + 'static> RowBinder<T> {
    /// Registers a column for the named record field.
    ///
    /// Fails if `T` has no such field.
    pub fn field(&mut self, name: &str) -> Result<&mut ColumnInfo> {
        let field = T::field(name).ok_or_else(|| ConfigError::UnknownField {
            field: name.to_string(),
            record: type_name::<T>(),
        })?;
        self.push(Column::from_field(field))
    }

    /// Registers every field of `T`, in declaration order.
    pub fn all_fields(&mut self) -> Result<&mut Self> {
        for field in T::fields() {
            self.push(Column::from_field(field))?;
        }
        Ok(self)
    }

    /// A binder with every field of `T` registered.
    pub fn from_record() -> Result<Self> {
        let mut binder = Self::new();
        binder.all_fields()?;
        Ok(binder)
    }
}

impl<T> Default for RowBinder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for RowBinder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowBinder")
            .field("columns", &self.columns)
            .finish_non_exhaustive()
    }
}

/// The cell's own prefix and suffix win over the column's.
fn apply_affixes(column: &ColumnInfo, cell: &mut Cell) {
    let overrides = cell.info();
    let prefix = overrides
        .and_then(|i| i.prefix.clone())
        .or_else(|| column.prefix().map(str::to_string));
    let suffix = overrides
        .and_then(|i| i.suffix.clone())
        .or_else(|| column.suffix().map(str::to_string));
    cell.wrap_display(
        prefix.as_deref().unwrap_or(""),
        suffix.as_deref().unwrap_or(""),
    );
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Lazy sequence of rows, one per record.
pub struct Rows<'a, T, I> {
    binder: &'a RowBinder<T>,
    records: I,
    next_row: usize,
}

impl<'a, T, I> Iterator for Rows<'a, T, I>
where
    I: Iterator,
    I::Item: Borrow<T>,
{
    type Item = Row<'a, T, I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let record = self.records.next()?;
        let index = self.next_row;
        self.next_row += 1;
        trace!(row = index, "binding row");
        Some(Row {
            binder: self.binder,
            record,
            index,
            next_column: 0,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.records.size_hint()
    }
}

/// Lazy sequence of cells for one record, in column order.
pub struct Row<'a, T, R> {
    binder: &'a RowBinder<T>,
    record: R,
    index: usize,
    next_column: usize,
}

impl<'a, T, R: Borrow<T>> Row<'a, T, R> {
    /// Position of the record in the input sequence.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The source record.
    pub fn record(&self) -> &T {
        self.record.borrow()
    }
}

impl<'a, T, R: Borrow<T>> Iterator for Row<'a, T, R> {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.next_column >= self.binder.len() {
            return None;
        }
        let column = self.next_column;
        self.next_column += 1;
        self.binder.cell(self.record.borrow(), self.index, column)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.binder.len() - self.next_column;
        (remaining, Some(remaining))
    }
}

impl<'a, T, R: Borrow<T>> ExactSizeIterator for Row<'a, T, R> {}
