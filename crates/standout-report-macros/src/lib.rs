//! Proc macros for Standout Report.
//!
//! # Available Macros
//!
//! - [`Record`] - Generate the field table used for declarative columns
//!
//! The generated code refers to `::standout_report`, so the macros are meant
//! to be used through the `standout-report` crate, which re-exports them.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for structs with named fields.
///
/// Every field becomes a `Field` entry, in declaration order, that a
/// `RowBinder` can register by name. Field types must implement `ToValue`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Exclude this field from the table |
/// | `rename = "..."` | Lookup name (default: the field name) |
/// | `title = "..."` | Column title (default: the lookup name) |
/// | `description = "..."` | Column description, shown as a header tooltip |
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Player::NAME`, `Player::SCORE`)
/// 2. Implementation of `Record::fields()`
///
/// # Example
///
/// ```ignore
/// use standout_report::{Record, RowBinder};
///
/// #[derive(Record)]
/// struct Player {
///     #[report(title = "Player")]
///     name: String,
///
///     #[report(description = "Points this season")]
///     score: f64,
///
///     #[report(skip)]
///     internal_id: u64,
/// }
///
/// let mut binder = RowBinder::<Player>::new();
/// binder.field(Player::NAME)?;
/// binder.field(Player::SCORE)?.as_percentage();
/// ```
#[proc_macro_derive(Record, attributes(report))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
