//! Raw value types produced by column extraction.
//!
//! Extraction functions return plain Rust values; the [`ToValue`] trait turns
//! them into the closed [`Value`] union the resolver understands. Because
//! `ToValue` carries the [`ValueKind`] as an associated constant, a column
//! knows its value family when it is registered, before any record is seen.
//!
//! | Rust type | Variant | Kind |
//! |-----------|---------|------|
//! | `i8`, `i16`, `i32`, `i64`, `isize` | [`Value::Int`] | [`ValueKind::Int`] |
//! | `u8`, `u16`, `u32`, `u64`, `usize` | [`Value::UInt`] | [`ValueKind::UInt`] |
//! | `f32`, `f64` | [`Value::Float`] | [`ValueKind::Float`] |
//! | `NaiveDate` | [`Value::Date`] | [`ValueKind::Date`] |
//! | `NaiveDateTime`, `DateTime<Tz>` | [`Value::DateTime`] | [`ValueKind::DateTime`] |
//! | `bool` | [`Value::Bool`] | [`ValueKind::Bool`] |
//! | `String`, `&str`, `char` | [`Value::Text`] | [`ValueKind::Text`] |
//! | `Option<T>` | `None` becomes [`Value::Null`] | kind of `T` |

use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};

/// Storage width of an integer value.
///
/// Integer sentinels are the minimum and maximum of the *original* type, so
/// the width travels with the widened value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IntWidth {
    W8,
    W16,
    W32,
    W64,
    Size,
}

impl IntWidth {
    /// Minimum value of the signed type with this width.
    pub fn signed_min(self) -> i64 {
        match self {
            IntWidth::W8 => i8::MIN as i64,
            IntWidth::W16 => i16::MIN as i64,
            IntWidth::W32 => i32::MIN as i64,
            IntWidth::W64 => i64::MIN,
            IntWidth::Size => isize::MIN as i64,
        }
    }

    /// Maximum value of the signed type with this width.
    pub fn signed_max(self) -> i64 {
        match self {
            IntWidth::W8 => i8::MAX as i64,
            IntWidth::W16 => i16::MAX as i64,
            IntWidth::W32 => i32::MAX as i64,
            IntWidth::W64 => i64::MAX,
            IntWidth::Size => isize::MAX as i64,
        }
    }

    /// Maximum value of the unsigned type with this width.
    pub fn unsigned_max(self) -> u64 {
        match self {
            IntWidth::W8 => u8::MAX as u64,
            IntWidth::W16 => u16::MAX as u64,
            IntWidth::W32 => u32::MAX as u64,
            IntWidth::W64 => u64::MAX,
            IntWidth::Size => usize::MAX as u64,
        }
    }
}

/// Storage width of a floating-point value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    F32,
    F64,
}

impl FloatWidth {
    /// Maximum finite value of the original type, widened to `f64`.
    pub fn max(self) -> f64 {
        match self {
            FloatWidth::F32 => f32::MAX as f64,
            FloatWidth::F64 => f64::MAX,
        }
    }
}

/// The value family of a column, fixed at registration time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Bool,
    Int,
    UInt,
    Float,
    Date,
    DateTime,
    Text,
    /// Unknown until a value is produced (dynamic values, pre-built cells).
    #[default]
    Any,
}

impl ValueKind {
    /// Returns `true` for integer and floating-point kinds.
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Int | ValueKind::UInt | ValueKind::Float)
    }

    /// Returns `true` for date and date-time kinds.
    pub fn is_temporal(self) -> bool {
        matches!(self, ValueKind::Date | ValueKind::DateTime)
    }
}

/// A raw value extracted from a record.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Absent value.
    Null,
    Bool(bool),
    /// Signed integer, widened to `i64`.
    Int(i64, IntWidth),
    /// Unsigned integer, widened to `u64`.
    UInt(u64, IntWidth),
    /// Floating-point number, widened to `f64`.
    Float(f64, FloatWidth),
    Date(NaiveDate),
    /// Date and time; zoned values are stored in UTC.
    DateTime(NaiveDateTime),
    Text(String),
}

impl Value {
    /// Returns the kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Any,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(..) => ValueKind::Int,
            Value::UInt(..) => ValueKind::UInt,
            Value::Float(..) => ValueKind::Float,
            Value::Date(_) => ValueKind::Date,
            Value::DateTime(_) => ValueKind::DateTime,
            Value::Text(_) => ValueKind::Text,
        }
    }

    /// Returns `true` if this is [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Numeric view of the value, if it is a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v, _) => Some(*v as f64),
            Value::UInt(v, _) => Some(*v as f64),
            Value::Float(v, _) => Some(*v),
            _ => None,
        }
    }

    /// Text view of the value, if it is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(v, _) => write!(f, "{}", v),
            Value::UInt(v, _) => write!(f, "{}", v),
            Value::Float(v, _) => write!(f, "{}", v),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Value::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
            Value::Text(s) => f.write_str(s),
        }
    }
}

/// Conversion of a field or accessor result into a [`Value`].
///
/// `KIND` is what lets the binder apply numeric defaults to a column at
/// registration time.
pub trait ToValue {
    /// The value family produced by this type.
    const KIND: ValueKind;

    /// Converts `self` into a raw value.
    fn to_value(&self) -> Value;
}

macro_rules! impl_signed {
    ($($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                const KIND: ValueKind = ValueKind::Int;

                fn to_value(&self) -> Value {
                    Value::Int(*self as i64, IntWidth::$width)
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty => $width:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                const KIND: ValueKind = ValueKind::UInt;

                fn to_value(&self) -> Value {
                    Value::UInt(*self as u64, IntWidth::$width)
                }
            }
        )*
    };
}

impl_signed!(i8 => W8, i16 => W16, i32 => W32, i64 => W64, isize => Size);
impl_unsigned!(u8 => W8, u16 => W16, u32 => W32, u64 => W64, usize => Size);

impl ToValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(*self as f64, FloatWidth::F32)
    }
}

impl ToValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(*self, FloatWidth::F64)
    }
}

impl ToValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }
}

impl ToValue for char {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for str {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }
}

impl ToValue for Cow<'_, str> {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }
}

impl ToValue for NaiveDate {
    const KIND: ValueKind = ValueKind::Date;

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }
}

impl ToValue for NaiveDateTime {
    const KIND: ValueKind = ValueKind::DateTime;

    fn to_value(&self) -> Value {
        Value::DateTime(*self)
    }
}

impl<Tz: TimeZone> ToValue for DateTime<Tz> {
    const KIND: ValueKind = ValueKind::DateTime;

    fn to_value(&self) -> Value {
        Value::DateTime(self.naive_utc())
    }
}

impl ToValue for Value {
    const KIND: ValueKind = ValueKind::Any;

    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl<T: ToValue> ToValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}
