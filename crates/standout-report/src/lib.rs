//! Standout Report - typed records to formatted tables.
//!
//! Report maps a sequence of Rust values onto columns and renders them as an
//! HTML table fragment or an aligned plain-text table. It provides:
//!
//! - Columns registered from closures or, declaratively, by field name
//! - Type-driven enrichment: thousands grouping, fixed decimals, ISO dates
//! - Sentinel detection: `NaN`, `MIN` and `MAX` values become null or error cells
//! - Per-column adapter chains that refine cells after resolution
//! - Per-cell fault isolation: one failing cell never aborts the table
//!
//! # Quick Start
//!
//! ```rust
//! use standout_report::{HtmlRenderer, RowBinder, TableRenderer};
//!
//! struct Player {
//!     name: String,
//!     score: f64,
//! }
//!
//! let mut binder = RowBinder::<Player>::new();
//! binder.column("Name", |p: &Player| p.name.clone()).unwrap();
//! binder.column("Score", |p: &Player| p.score).unwrap();
//!
//! let players = vec![
//!     Player { name: "A".into(), score: 12.5 },
//!     Player { name: "B".into(), score: f64::NAN },
//! ];
//!
//! let html = HtmlRenderer::new().render_to_string(&binder, &players).unwrap();
//! assert!(html.contains("<td>A</td>"));
//! assert!(html.contains("<td class=\"num\">12.50</td>"));
//! assert!(html.contains("<td class=\"null num\">~</td>"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! record --extract--> Value --resolve--> Cell --adapters--> Cell --format--> output
//! ```
//!
//! - **Extraction**: each [`Column`] reads one [`Value`] (or a pre-built
//!   [`Cell`]) from a record.
//! - **Resolution**: a [`CellResolver`] enriches the value into a cell. The
//!   [`DefaultResolver`] handles numbers, dates and text.
//! - **Adapters**: the column's [`CellAdapter`]s run in order; see [`adapters`].
//! - **Formatting**: a [`CellFormatter`] turns the cell into a styled
//!   [`CellContainer`], which a [`TableRenderer`] writes out.
//!
//! Rows and cells are pulled lazily from [`RowBinder::rows`]; nothing is
//! evaluated until the renderer asks for it.
//!
//! # Errors
//!
//! Setup problems (unknown field names, duplicate titles, bad configuration)
//! are reported immediately as [`ConfigError`]. Data problems are confined to
//! the cell that caused them: the cell renders with the error token and its
//! message as tooltip.
//!
//! # Configuration
//!
//! [`ReportConfig`] loads renderer settings and per-column hints from YAML;
//! see the [`config`] module.

pub mod adapters;
mod binder;
mod cell;
mod column;
pub mod config;
mod error;
mod record;
mod render;
mod resolve;
pub mod util;
mod value;

// Re-export public API
pub use adapters::CellAdapter;
pub use binder::{Row, RowBinder, Rows};
pub use cell::{Cell, CellInfo, Extracted};
pub use column::{Column, ColumnInfo, NumberStyle, TextAlign};
pub use config::{ColumnHints, RenderConfig, ReportConfig};
pub use error::{CellError, ConfigError, RenderError, Result};
pub use record::{Field, Record};
pub use render::{
    CellContainer, CellFormatter, ClassList, HtmlCellFormatter, HtmlRenderer, Hyperlink,
    TableRenderer, TextRenderer,
};
pub use resolve::{CellResolver, DefaultResolver};
pub use value::{FloatWidth, IntWidth, ToValue, Value, ValueKind};

// Derive macro, shares its name with the trait like `serde::Serialize`
#[cfg(feature = "macros")]
pub use standout_report_macros::Record;
