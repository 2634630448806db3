//! Declarative field references.
//!
//! A type implementing [`Record`] publishes a table of its fields, so columns
//! can be registered by name with [`RowBinder::field`](crate::RowBinder::field).
//! Unknown names are rejected when the column is registered, long before a
//! record is rendered.
//!
//! The table is usually generated with `#[derive(Record)]`:
//!
//! ```rust
//! use standout_report::{Record, RowBinder};
//!
//! #[derive(Record)]
//! struct Player {
//!     #[report(title = "Player")]
//!     name: String,
//!     score: f64,
//!     #[report(skip)]
//!     internal_id: u64,
//! }
//!
//! let mut binder = RowBinder::<Player>::new();
//! binder.field("name").unwrap();
//! binder.field("score").unwrap();
//! assert!(binder.field("internal_id").is_err());
//! ```
//!
//! Manual implementations list [`Field`] entries with plain function pointers:
//!
//! ```rust
//! use standout_report::{Field, Record, ToValue, Value};
//!
//! struct Point { x: i32, y: i32 }
//!
//! impl Record for Point {
//!     fn fields() -> Vec<Field<Self>> {
//!         vec![
//!             Field::new::<i32>("x", "X", |p: &Point| p.x.to_value()),
//!             Field::new::<i32>("y", "Y", |p| p.y.to_value()),
//!         ]
//!     }
//! }
//!
//! assert_eq!(Point::field("y").map(|f| f.title), Some("Y"));
//! ```

use std::any::type_name;
use std::fmt;

use crate::value::{ToValue, Value, ValueKind};

/// One declared field of a record type.
pub struct Field<T> {
    /// Lookup name.
    pub name: &'static str,
    /// Default column title.
    pub title: &'static str,
    /// Optional column description.
    pub description: Option<&'static str>,
    pub kind: ValueKind,
    /// Type name of the field.
    pub target_type: &'static str,
    /// Reads the field from a record.
    pub get: fn(&T) -> Value,
}

impl<T> Field<T> {
    /// Declares a field whose Rust type is `V`.
    pub fn new<V: ToValue + ?Sized>(
        name: &'static str,
        title: &'static str,
        get: fn(&T) -> Value,
    ) -> Self {
        Field {
            name,
            title,
            description: None,
            kind: V::KIND,
            target_type: type_name::<V>(),
            get,
        }
    }

    pub fn with_description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

impl<T> Clone for Field<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Field<T> {}

impl<T> fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("kind", &self.kind)
            .field("target_type", &self.target_type)
            .finish()
    }
}

/// Types that publish their fields for declarative column registration.
pub trait Record: Sized {
    /// All reportable fields, in declaration order.
    fn fields() -> Vec<Field<Self>>;

    /// Looks up a field by name.
    fn field(name: &str) -> Option<Field<Self>> {
        Self::fields().into_iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Point {
        x: i32,
        label: Option<String>,
    }

    impl Record for Point {
        fn fields() -> Vec<Field<Self>> {
            vec![
                Field::new::<i32>("x", "X", |p: &Point| p.x.to_value()),
                Field::new::<Option<String>>("label", "Label", |p: &Point| p.label.to_value())
                    .with_description("Free text"),
            ]
        }
    }

    #[test]
    fn lookup_by_name() {
        let field = Point::field("label").unwrap();
        assert_eq!(field.title, "Label");
        assert_eq!(field.kind, ValueKind::Text);
        assert_eq!(field.description, Some("Free text"));
        assert!(Point::field("y").is_none());
    }

    #[test]
    fn getter_reads_record() {
        let p = Point { x: 3, label: None };
        let x = Point::field("x").unwrap();
        assert_eq!((x.get)(&p), 3i32.to_value());
        let label = Point::field("label").unwrap();
        assert_eq!((label.get)(&p), Value::Null);
    }
}
