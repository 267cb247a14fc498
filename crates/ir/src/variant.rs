// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # Variant
//!
//! A dynamically-typed SQL value, carrying one of the kinds in
//! [`VariantType`]. Arithmetic, comparison and serialization live on
//! [`Variant`] directly rather than on a trait object, since the set of
//! kinds is closed.
//!
//! ## Kinds
//!
//! `Null, Bool, Int8/16/32/64, UInt8/16/32/64, Float, Double, DateTime,
//! String, Binary, Clob, Blob`. `Clob`/`Blob` are non-owning handles into
//! externally-managed large-object storage; every other kind owns its
//! payload.
//!
//! ## Null semantics
//!
//! Arithmetic and bitwise operators propagate Null: if either operand is
//! Null, the result is Null. [`Variant::compatible_equal`] treats Null as
//! never equal to anything (including another Null); [`Variant::is`]
//! (the `IS` predicate) is the one place two Nulls compare equal.
//!
//! ## Numeric promotion
//!
//! Numeric comparisons and arithmetic promote both operands to the wider
//! kind before operating; string-to-numeric comparison is a type error.

use std::fmt;

use crate::column_type::ColumnDataType;

/// Discriminant for [`Variant`]'s active kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum VariantType {
    Null,
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float,
    Double,
    DateTime,
    String,
    Binary,
    Clob,
    Blob,
}

impl VariantType {
    pub fn is_numeric(self) -> bool {
        matches!(
            self,
            VariantType::Int8
                | VariantType::UInt8
                | VariantType::Int16
                | VariantType::UInt16
                | VariantType::Int32
                | VariantType::UInt32
                | VariantType::Int64
                | VariantType::UInt64
                | VariantType::Float
                | VariantType::Double
        )
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            VariantType::Int8
                | VariantType::UInt8
                | VariantType::Int16
                | VariantType::UInt16
                | VariantType::Int32
                | VariantType::UInt32
                | VariantType::Int64
                | VariantType::UInt64
        )
    }

    pub fn is_string(self) -> bool {
        matches!(self, VariantType::String)
    }
}

/// A handle to an externally-stored large object (CLOB/BLOB).
///
/// The storage engine owns the bytes; this crate only carries the handle
/// value, never the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LargeObjectHandle(pub u64);

/// Packed date and time, each sub-part independently zero-able.
///
/// A date-only value has `time_of_day = 0` and `has_time = false`; a
/// time-only value has `date = 0` and `has_date = false`. Cast-to-DateTime
/// only ever produces values with both parts set (see `spec.md` §6.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RawDateTime {
    /// Days since the epoch (1970-01-01), UTC.
    pub date: i32,
    /// Seconds since midnight, UTC.
    pub time_of_day: u32,
    pub has_date: bool,
    pub has_time: bool,
}

impl RawDateTime {
    pub const EPOCH: RawDateTime = RawDateTime {
        date: 0,
        time_of_day: 0,
        has_date: true,
        has_time: true,
    };

    pub fn date_only(date: i32) -> Self {
        Self {
            date,
            time_of_day: 0,
            has_date: true,
            has_time: false,
        }
    }

    pub fn time_only(time_of_day: u32) -> Self {
        Self {
            date: 0,
            time_of_day,
            has_date: false,
            has_time: true,
        }
    }

    /// Parses the canonical textual form (`spec.md` §6.3):
    /// `YYYY-MM-DD HH:MM:SS` or the date-only form `YYYY-MM-DD`.
    pub fn parse(text: &str) -> Result<Self, ValueError> {
        let bad = || ValueError::InvalidDateTimeFormat {
            text: text.to_string(),
        };
        if let Some((date_part, time_part)) = text.split_once(' ') {
            let date = parse_date(date_part).ok_or_else(bad)?;
            let time = parse_time(time_part).ok_or_else(bad)?;
            Ok(RawDateTime {
                date,
                time_of_day: time,
                has_date: true,
                has_time: true,
            })
        } else {
            let date = parse_date(text).ok_or_else(bad)?;
            Ok(RawDateTime::date_only(date))
        }
    }

    pub fn to_canonical_string(self) -> String {
        match (self.has_date, self.has_time) {
            (true, true) => format!(
                "{} {}",
                format_date(self.date),
                format_time(self.time_of_day)
            ),
            (true, false) => format_date(self.date),
            (false, true) => format_time(self.time_of_day),
            (false, false) => "0000-00-00".to_string(),
        }
    }
}

impl fmt::Display for RawDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_canonical_string())
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Days since 1970-01-01 for the given proleptic-Gregorian date.
fn days_from_civil(year: i32, month: u32, day: u32) -> i32 {
    // Howard Hinnant's civil_from_days / days_from_civil algorithm.
    let y = if month <= 2 { year - 1 } else { year };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as i64;
    let mp = ((month as i64 + 9) % 12) as i64;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    (era as i64 * 146097 + doe - 719468) as i32
}

fn civil_from_days(days: i32) -> (i32, u32, u32) {
    let z = days as i64 + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as i64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    let year = if m <= 2 { y + 1 } else { y } as i32;
    (year, m, d)
}

fn parse_date(s: &str) -> Option<i32> {
    let mut parts = s.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(1..=12).contains(&month) {
        return None;
    }
    let max_day = if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[(month - 1) as usize]
    };
    if day == 0 || day > max_day {
        return None;
    }
    Some(days_from_civil(year, month, day))
}

fn parse_time(s: &str) -> Option<u32> {
    let mut parts = s.split(':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    let second: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some(hour * 3600 + minute * 60 + second)
}

fn format_date(days: i32) -> String {
    let (y, m, d) = civil_from_days(days);
    format!("{:04}-{:02}-{:02}", y, m, d)
}

fn format_time(time_of_day: u32) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        time_of_day / 3600,
        (time_of_day / 60) % 60,
        time_of_day % 60
    )
}

/// A dynamically-typed SQL value.
#[derive(Debug, Clone)]
pub enum Variant {
    Null,
    Bool(bool),
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Float(f32),
    Double(f64),
    DateTime(RawDateTime),
    String(String),
    Binary(Vec<u8>),
    Clob(LargeObjectHandle),
    Blob(LargeObjectHandle),
}

/// Errors raised while operating on [`Variant`] values.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum ValueError {
    #[error("numeric domain error in operator '{operator}'")]
    NumericDomain { operator: &'static str },
    #[error("invalid date/time format: '{text}'")]
    InvalidDateTimeFormat { text: String },
    #[error("unsupported type conversion from {from:?} to {to:?}")]
    UnsupportedTypeConversion { from: VariantType, to: ColumnDataType },
    #[error("operator '{operator}' requires {expected} operands, found {found:?}")]
    TypeMismatch {
        operator: &'static str,
        expected: &'static str,
        found: VariantType,
    },
}

impl Variant {
    pub fn value_type(&self) -> VariantType {
        match self {
            Variant::Null => VariantType::Null,
            Variant::Bool(_) => VariantType::Bool,
            Variant::Int8(_) => VariantType::Int8,
            Variant::UInt8(_) => VariantType::UInt8,
            Variant::Int16(_) => VariantType::Int16,
            Variant::UInt16(_) => VariantType::UInt16,
            Variant::Int32(_) => VariantType::Int32,
            Variant::UInt32(_) => VariantType::UInt32,
            Variant::Int64(_) => VariantType::Int64,
            Variant::UInt64(_) => VariantType::UInt64,
            Variant::Float(_) => VariantType::Float,
            Variant::Double(_) => VariantType::Double,
            Variant::DateTime(_) => VariantType::DateTime,
            Variant::String(_) => VariantType::String,
            Variant::Binary(_) => VariantType::Binary,
            Variant::Clob(_) => VariantType::Clob,
            Variant::Blob(_) => VariantType::Blob,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Variant::Null)
    }

    /// Widest-numeric-kind view of this value, or `None` if not numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Variant::Int8(v) => Some(*v as f64),
            Variant::UInt8(v) => Some(*v as f64),
            Variant::Int16(v) => Some(*v as f64),
            Variant::UInt16(v) => Some(*v as f64),
            Variant::Int32(v) => Some(*v as f64),
            Variant::UInt32(v) => Some(*v as f64),
            Variant::Int64(v) => Some(*v as f64),
            Variant::UInt64(v) => Some(*v as f64),
            Variant::Float(v) => Some(*v as f64),
            Variant::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Variant::Int8(v) => Some(*v as i64),
            Variant::UInt8(v) => Some(*v as i64),
            Variant::Int16(v) => Some(*v as i64),
            Variant::UInt16(v) => Some(*v as i64),
            Variant::Int32(v) => Some(*v as i64),
            Variant::UInt32(v) => Some(*v as i64),
            Variant::Int64(v) => Some(*v),
            Variant::UInt64(v) => i64::try_from(*v).ok(),
            _ => None,
        }
    }

    /// Canonical string form, used by `concatenate` and textual dumps.
    pub fn to_canonical_string(&self) -> String {
        match self {
            Variant::Null => String::new(),
            Variant::Bool(b) => b.to_string(),
            Variant::Int8(v) => v.to_string(),
            Variant::UInt8(v) => v.to_string(),
            Variant::Int16(v) => v.to_string(),
            Variant::UInt16(v) => v.to_string(),
            Variant::Int32(v) => v.to_string(),
            Variant::UInt32(v) => v.to_string(),
            Variant::Int64(v) => v.to_string(),
            Variant::UInt64(v) => v.to_string(),
            Variant::Float(v) => v.to_string(),
            Variant::Double(v) => v.to_string(),
            Variant::DateTime(dt) => dt.to_canonical_string(),
            Variant::String(s) => s.clone(),
            Variant::Binary(b) => hex_encode(b),
            Variant::Clob(h) | Variant::Blob(h) => format!("#{}", h.0),
        }
    }

    fn require_numeric(&self, operator: &'static str) -> Result<(), ValueError> {
        if self.is_null() || self.value_type().is_numeric() {
            Ok(())
        } else {
            Err(ValueError::TypeMismatch {
                operator,
                expected: "numeric",
                found: self.value_type(),
            })
        }
    }

    fn require_integer(&self, operator: &'static str) -> Result<(), ValueError> {
        if self.is_null() || self.value_type().is_integer() {
            Ok(())
        } else {
            Err(ValueError::TypeMismatch {
                operator,
                expected: "integer",
                found: self.value_type(),
            })
        }
    }

    /// `a + b`. Two strings concatenate; string+numeric is a type error;
    /// otherwise numeric addition with Null propagation.
    pub fn add(&self, other: &Variant) -> Result<Variant, ValueError> {
        if matches!(self, Variant::String(_)) && matches!(other, Variant::String(_)) {
            return Ok(Variant::String(self.concatenate(other)));
        }
        self.numeric_binop("+", other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &Variant) -> Result<Variant, ValueError> {
        self.numeric_binop("-", other, |a, b| a - b)
    }

    pub fn multiply(&self, other: &Variant) -> Result<Variant, ValueError> {
        self.numeric_binop("*", other, |a, b| a * b)
    }

    pub fn divide(&self, other: &Variant) -> Result<Variant, ValueError> {
        self.require_numeric("/")?;
        other.require_numeric("/")?;
        if self.is_null() || other.is_null() {
            return Ok(Variant::Null);
        }
        if other.as_f64() == Some(0.0) {
            return Err(ValueError::NumericDomain { operator: "/" });
        }
        self.numeric_binop("/", other, |a, b| a / b)
    }

    pub fn modulo(&self, other: &Variant) -> Result<Variant, ValueError> {
        self.require_integer("%")?;
        other.require_integer("%")?;
        if self.is_null() || other.is_null() {
            return Ok(Variant::Null);
        }
        if other.as_i64() == Some(0) {
            return Err(ValueError::NumericDomain { operator: "%" });
        }
        self.integer_binop("%", other, |a, b| a % b)
    }

    fn numeric_binop(
        &self,
        operator: &'static str,
        other: &Variant,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<Variant, ValueError> {
        self.require_numeric(operator)?;
        other.require_numeric(operator)?;
        if self.is_null() || other.is_null() {
            return Ok(Variant::Null);
        }
        let result = f(self.as_f64().unwrap(), other.as_f64().unwrap());
        let result_type =
            crate::column_type::get_numeric_result_type(self.column_type(), other.column_type());
        Ok(narrow_to(result, result_type))
    }

    fn integer_binop(
        &self,
        operator: &'static str,
        other: &Variant,
        f: impl Fn(i64, i64) -> i64,
    ) -> Result<Variant, ValueError> {
        self.require_integer(operator)?;
        other.require_integer(operator)?;
        if self.is_null() || other.is_null() {
            return Ok(Variant::Null);
        }
        let result = f(self.as_i64().unwrap(), other.as_i64().unwrap());
        let result_type =
            crate::column_type::get_numeric_result_type(self.column_type(), other.column_type());
        Ok(narrow_to(result as f64, result_type))
    }

    pub fn bitwise_and(&self, other: &Variant) -> Result<Variant, ValueError> {
        self.integer_binop("&", other, |a, b| a & b)
    }

    pub fn bitwise_or(&self, other: &Variant) -> Result<Variant, ValueError> {
        self.integer_binop("|", other, |a, b| a | b)
    }

    pub fn bitwise_xor(&self, other: &Variant) -> Result<Variant, ValueError> {
        self.integer_binop("^", other, |a, b| a ^ b)
    }

    pub fn left_shift(&self, other: &Variant) -> Result<Variant, ValueError> {
        self.integer_binop("<<", other, |a, b| a << b)
    }

    pub fn right_shift(&self, other: &Variant) -> Result<Variant, ValueError> {
        self.integer_binop(">>", other, |a, b| a >> b)
    }

    pub fn bitwise_complement(&self) -> Result<Variant, ValueError> {
        self.require_integer("~")?;
        if self.is_null() {
            return Ok(Variant::Null);
        }
        let result_type = self.column_type();
        Ok(narrow_to(!self.as_i64().unwrap() as f64, result_type))
    }

    pub fn unary_minus(&self) -> Result<Variant, ValueError> {
        self.require_numeric("unary -")?;
        if self.is_null() {
            return Ok(Variant::Null);
        }
        Ok(narrow_to(-self.as_f64().unwrap(), self.column_type()))
    }

    pub fn unary_plus(&self) -> Result<Variant, ValueError> {
        self.require_numeric("unary +")?;
        Ok(self.clone())
    }

    pub fn logical_not(&self) -> Result<Variant, ValueError> {
        match self {
            Variant::Null => Ok(Variant::Null),
            Variant::Bool(b) => Ok(Variant::Bool(!b)),
            _ => Err(ValueError::TypeMismatch {
                operator: "NOT",
                expected: "boolean",
                found: self.value_type(),
            }),
        }
    }

    /// String concatenation via each operand's canonical string form.
    pub fn concatenate(&self, other: &Variant) -> String {
        format!(
            "{}{}",
            self.to_canonical_string(),
            other.to_canonical_string()
        )
    }

    fn column_type(&self) -> ColumnDataType {
        crate::column_type::convert_variant_type_to_column_data_type(self.value_type())
    }

    /// `compatibleEqual`: Null is never equal to anything (use [`Variant::is`]
    /// for `IS`/three-valued equality). Numeric kinds compare across widths;
    /// string-to-numeric comparison is a type error.
    pub fn compatible_equal(&self, other: &Variant) -> Result<bool, ValueError> {
        if self.is_null() || other.is_null() {
            return Ok(false);
        }
        self.compare(other, "=").map(|ord| ord == std::cmp::Ordering::Equal)
    }

    /// `IS`: Null equals Null; otherwise behaves like `compatible_equal`.
    pub fn is(&self, other: &Variant) -> Result<bool, ValueError> {
        if self.is_null() && other.is_null() {
            return Ok(true);
        }
        if self.is_null() || other.is_null() {
            return Ok(false);
        }
        self.compare(other, "IS").map(|ord| ord == std::cmp::Ordering::Equal)
    }

    pub fn compatible_less(&self, other: &Variant) -> Result<bool, ValueError> {
        if self.is_null() || other.is_null() {
            return Ok(false);
        }
        self.compare(other, "<").map(|ord| ord == std::cmp::Ordering::Less)
    }

    pub fn compatible_greater(&self, other: &Variant) -> Result<bool, ValueError> {
        if self.is_null() || other.is_null() {
            return Ok(false);
        }
        self.compare(other, ">").map(|ord| ord == std::cmp::Ordering::Greater)
    }

    /// Core three-way compare used by all comparison predicates. Strings
    /// compare lexicographically; DateTime by wall-clock ordering; numerics
    /// by widest-promotion; mixing string and numeric is a type error.
    fn compare(&self, other: &Variant, operator: &'static str) -> Result<std::cmp::Ordering, ValueError> {
        match (self, other) {
            (Variant::String(a), Variant::String(b)) => Ok(a.cmp(b)),
            (Variant::DateTime(a), Variant::DateTime(b)) => Ok((a.has_date, a.date, a.time_of_day)
                .cmp(&(b.has_date, b.date, b.time_of_day))),
            (Variant::Binary(a), Variant::Binary(b)) => Ok(a.cmp(b)),
            (Variant::Bool(a), Variant::Bool(b)) => Ok(a.cmp(b)),
            _ => {
                let a = self.as_f64().ok_or(ValueError::TypeMismatch {
                    operator,
                    expected: "comparable",
                    found: self.value_type(),
                })?;
                let b = other.as_f64().ok_or(ValueError::TypeMismatch {
                    operator,
                    expected: "comparable",
                    found: other.value_type(),
                })?;
                a.partial_cmp(&b).ok_or(ValueError::NumericDomain { operator })
            }
        }
    }

    /// Casts this value to the canonical textual DateTime form, or parses a
    /// string constant that holds one. Fails with
    /// [`ValueError::InvalidDateTimeFormat`] otherwise.
    pub fn cast_to_datetime(&self) -> Result<Variant, ValueError> {
        match self {
            Variant::DateTime(_) => Ok(self.clone()),
            Variant::String(s) => Ok(Variant::DateTime(RawDateTime::parse(s)?)),
            Variant::Null => Ok(Variant::Null),
            _ => Err(ValueError::InvalidDateTimeFormat {
                text: self.to_canonical_string(),
            }),
        }
    }

    /// True when this value is already DateTime, or is a string constant
    /// that parses as one (`canCastAsDateTime`, spec.md §4.3).
    pub fn can_cast_as_datetime(&self) -> bool {
        match self {
            Variant::DateTime(_) => true,
            Variant::String(s) => RawDateTime::parse(s).is_ok(),
            _ => false,
        }
    }

    /// Casts this value to `target`, dispatching over `target`'s class the
    /// way `CastOperator::evaluate` dispatches over the result
    /// `VariantType`: one `as*()`-style conversion per class, Null passing
    /// through unchanged, and a truly unrepresentable target (`Struct`,
    /// `Xml`, `Json`, the interval types, `Unknown`) raising
    /// `UnsupportedTypeConversion`.
    pub fn cast_to(&self, target: ColumnDataType) -> Result<Variant, ValueError> {
        if self.is_null() {
            return Ok(Variant::Null);
        }
        if target == ColumnDataType::Bool {
            return Ok(Variant::Bool(self.as_bool()?));
        }
        if target.is_numeric_type() {
            let n = self
                .as_f64()
                .ok_or_else(|| self.unsupported_conversion(target))?;
            return Ok(narrow_to(n, target));
        }
        if target.is_datetime_type() {
            return self.cast_to_datetime();
        }
        if target.is_string_type() {
            return Ok(Variant::String(self.to_canonical_string()));
        }
        if target.is_binary_type() {
            return match self {
                Variant::Binary(b) => Ok(Variant::Binary(b.clone())),
                _ => Err(self.unsupported_conversion(target)),
            };
        }
        Err(self.unsupported_conversion(target))
    }

    fn unsupported_conversion(&self, target: ColumnDataType) -> ValueError {
        ValueError::UnsupportedTypeConversion {
            from: self.value_type(),
            to: target,
        }
    }

    /// `asBool()`: an existing `Bool` passes through, a numeric value is
    /// non-zero-is-true, and a string is matched against the usual boolean
    /// literal spellings.
    fn as_bool(&self) -> Result<bool, ValueError> {
        match self {
            Variant::Bool(b) => Ok(*b),
            Variant::String(s) => match s.to_ascii_uppercase().as_str() {
                "TRUE" | "T" | "1" => Ok(true),
                "FALSE" | "F" | "0" => Ok(false),
                _ => Err(self.unsupported_conversion(ColumnDataType::Bool)),
            },
            _ => self
                .as_f64()
                .map(|n| n != 0.0)
                .ok_or_else(|| self.unsupported_conversion(ColumnDataType::Bool)),
        }
    }
}

fn narrow_to(value: f64, target: ColumnDataType) -> Variant {
    use ColumnDataType::*;
    match target {
        Int8 => Variant::Int8(value as i8),
        UInt8 => Variant::UInt8(value as u8),
        Int16 => Variant::Int16(value as i16),
        UInt16 => Variant::UInt16(value as u16),
        Int32 => Variant::Int32(value as i32),
        UInt32 => Variant::UInt32(value as u32),
        Int64 => Variant::Int64(value as i64),
        UInt64 => Variant::UInt64(value as u64),
        Float => Variant::Float(value as f32),
        Double => Variant::Double(value),
        _ => Variant::Double(value),
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        out.push_str(&format!("{:02x}", b));
    }
    out
}

impl PartialEq for Variant {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Variant::Null, Variant::Null) => true,
            (Variant::Bool(a), Variant::Bool(b)) => a == b,
            (Variant::Int8(a), Variant::Int8(b)) => a == b,
            (Variant::UInt8(a), Variant::UInt8(b)) => a == b,
            (Variant::Int16(a), Variant::Int16(b)) => a == b,
            (Variant::UInt16(a), Variant::UInt16(b)) => a == b,
            (Variant::Int32(a), Variant::Int32(b)) => a == b,
            (Variant::UInt32(a), Variant::UInt32(b)) => a == b,
            (Variant::Int64(a), Variant::Int64(b)) => a == b,
            (Variant::UInt64(a), Variant::UInt64(b)) => a == b,
            (Variant::Float(a), Variant::Float(b)) => a == b,
            (Variant::Double(a), Variant::Double(b)) => a == b,
            (Variant::DateTime(a), Variant::DateTime(b)) => a == b,
            (Variant::String(a), Variant::String(b)) => a == b,
            (Variant::Binary(a), Variant::Binary(b)) => a == b,
            (Variant::Clob(a), Variant::Clob(b)) => a == b,
            (Variant::Blob(a), Variant::Blob(b)) => a == b,
            _ => false,
        }
    }
}

// --- Binary serialization (spec.md §6.2) -----------------------------------
//
// `<var-int kind tag><payload>`. Integers use var-int, floats use
// IEEE-754 little-endian, strings/binary are var-int-length-prefixed.
// Clob/Blob cannot round-trip (their payload lives outside this process)
// and are rejected by `serialize`.

/// Writes an unsigned LEB128 var-int.
pub fn write_varint(buf: &mut Vec<u8>, mut value: u64) {
    loop {
        let byte = (value & 0x7f) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        }
        buf.push(byte | 0x80);
    }
}

/// Reads an unsigned LEB128 var-int, returning the value and bytes consumed.
pub fn read_varint(buf: &[u8]) -> Result<(u64, usize), VariantDecodeError> {
    let mut value: u64 = 0;
    let mut shift = 0u32;
    for (i, &byte) in buf.iter().enumerate() {
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
        shift += 7;
        if shift >= 64 {
            return Err(VariantDecodeError::CorruptVarint);
        }
    }
    Err(VariantDecodeError::UnexpectedEof)
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum VariantDecodeError {
    #[error("truncated variant buffer")]
    UnexpectedEof,
    #[error("corrupt var-int")]
    CorruptVarint,
    #[error("unknown variant kind tag {0}")]
    UnknownKind(u64),
    #[error("cannot serialize a Clob/Blob handle")]
    NonSerializableHandle,
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
}

fn kind_tag(t: VariantType) -> u64 {
    t as u64
}

fn tag_to_kind(tag: u64) -> Option<VariantType> {
    const KINDS: &[VariantType] = &[
        VariantType::Null,
        VariantType::Bool,
        VariantType::Int8,
        VariantType::UInt8,
        VariantType::Int16,
        VariantType::UInt16,
        VariantType::Int32,
        VariantType::UInt32,
        VariantType::Int64,
        VariantType::UInt64,
        VariantType::Float,
        VariantType::Double,
        VariantType::DateTime,
        VariantType::String,
        VariantType::Binary,
        VariantType::Clob,
        VariantType::Blob,
    ];
    KINDS.get(tag as usize).copied()
}

impl Variant {
    pub fn serialized_size(&self) -> usize {
        let mut buf = Vec::new();
        // Size is cheap to compute precisely rather than estimate, since the
        // format has no fixed-size fast path anyway.
        self.serialize(&mut buf).expect("serializable value");
        buf.len()
    }

    pub fn serialize(&self, buf: &mut Vec<u8>) -> Result<(), VariantDecodeError> {
        write_varint(buf, kind_tag(self.value_type()));
        match self {
            Variant::Null => {}
            Variant::Bool(b) => buf.push(*b as u8),
            Variant::Int8(v) => buf.push(*v as u8),
            Variant::UInt8(v) => buf.push(*v),
            Variant::Int16(v) => write_varint(buf, *v as u16 as u64),
            Variant::UInt16(v) => write_varint(buf, *v as u64),
            Variant::Int32(v) => write_varint(buf, *v as u32 as u64),
            Variant::UInt32(v) => write_varint(buf, *v as u64),
            Variant::Int64(v) => write_varint(buf, *v as u64),
            Variant::UInt64(v) => write_varint(buf, *v),
            Variant::Float(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Variant::Double(v) => buf.extend_from_slice(&v.to_le_bytes()),
            Variant::DateTime(dt) => {
                buf.push(dt.has_date as u8);
                buf.push(dt.has_time as u8);
                write_varint(buf, dt.date as u32 as u64);
                write_varint(buf, dt.time_of_day as u64);
            }
            Variant::String(s) => {
                write_varint(buf, s.len() as u64);
                buf.extend_from_slice(s.as_bytes());
            }
            Variant::Binary(b) => {
                write_varint(buf, b.len() as u64);
                buf.extend_from_slice(b);
            }
            Variant::Clob(_) | Variant::Blob(_) => {
                return Err(VariantDecodeError::NonSerializableHandle);
            }
        }
        Ok(())
    }

    pub fn deserialize(buf: &[u8]) -> Result<(Variant, usize), VariantDecodeError> {
        let (tag, mut offset) = read_varint(buf)?;
        let kind = tag_to_kind(tag).ok_or(VariantDecodeError::UnknownKind(tag))?;
        let rest = &buf[offset..];
        let value = match kind {
            VariantType::Null => Variant::Null,
            VariantType::Bool => {
                let b = *rest.first().ok_or(VariantDecodeError::UnexpectedEof)?;
                offset += 1;
                Variant::Bool(b != 0)
            }
            VariantType::Int8 => {
                let b = *rest.first().ok_or(VariantDecodeError::UnexpectedEof)?;
                offset += 1;
                Variant::Int8(b as i8)
            }
            VariantType::UInt8 => {
                let b = *rest.first().ok_or(VariantDecodeError::UnexpectedEof)?;
                offset += 1;
                Variant::UInt8(b)
            }
            VariantType::Int16 => {
                let (v, n) = read_varint(rest)?;
                offset += n;
                Variant::Int16(v as u16 as i16)
            }
            VariantType::UInt16 => {
                let (v, n) = read_varint(rest)?;
                offset += n;
                Variant::UInt16(v as u16)
            }
            VariantType::Int32 => {
                let (v, n) = read_varint(rest)?;
                offset += n;
                Variant::Int32(v as u32 as i32)
            }
            VariantType::UInt32 => {
                let (v, n) = read_varint(rest)?;
                offset += n;
                Variant::UInt32(v as u32)
            }
            VariantType::Int64 => {
                let (v, n) = read_varint(rest)?;
                offset += n;
                Variant::Int64(v as i64)
            }
            VariantType::UInt64 => {
                let (v, n) = read_varint(rest)?;
                offset += n;
                Variant::UInt64(v)
            }
            VariantType::Float => {
                let bytes: [u8; 4] = rest
                    .get(0..4)
                    .ok_or(VariantDecodeError::UnexpectedEof)?
                    .try_into()
                    .unwrap();
                offset += 4;
                Variant::Float(f32::from_le_bytes(bytes))
            }
            VariantType::Double => {
                let bytes: [u8; 8] = rest
                    .get(0..8)
                    .ok_or(VariantDecodeError::UnexpectedEof)?
                    .try_into()
                    .unwrap();
                offset += 8;
                Variant::Double(f64::from_le_bytes(bytes))
            }
            VariantType::DateTime => {
                let has_date = *rest.first().ok_or(VariantDecodeError::UnexpectedEof)? != 0;
                let has_time = *rest.get(1).ok_or(VariantDecodeError::UnexpectedEof)? != 0;
                let rest2 = &rest[2..];
                let (date, n1) = read_varint(rest2)?;
                let (time, n2) = read_varint(&rest2[n1..])?;
                offset += 2 + n1 + n2;
                Variant::DateTime(RawDateTime {
                    date: date as u32 as i32,
                    time_of_day: time as u32,
                    has_date,
                    has_time,
                })
            }
            VariantType::String => {
                let (len, n) = read_varint(rest)?;
                let len = len as usize;
                let bytes = rest
                    .get(n..n + len)
                    .ok_or(VariantDecodeError::UnexpectedEof)?;
                let s = std::str::from_utf8(bytes)
                    .map_err(|_| VariantDecodeError::InvalidUtf8)?
                    .to_string();
                offset += n + len;
                Variant::String(s)
            }
            VariantType::Binary => {
                let (len, n) = read_varint(rest)?;
                let len = len as usize;
                let bytes = rest
                    .get(n..n + len)
                    .ok_or(VariantDecodeError::UnexpectedEof)?;
                offset += n + len;
                Variant::Binary(bytes.to_vec())
            }
            VariantType::Clob | VariantType::Blob => {
                return Err(VariantDecodeError::NonSerializableHandle);
            }
        };
        Ok((value, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_numeric_promotes() {
        let a = Variant::UInt8(1);
        let b = Variant::Int32(2);
        let r = a.add(&b).unwrap();
        assert_eq!(r, Variant::Int32(3));
    }

    #[test]
    fn add_strings_concatenates() {
        let a = Variant::String("foo".into());
        let b = Variant::String("bar".into());
        assert_eq!(a.add(&b).unwrap(), Variant::String("foobar".into()));
    }

    #[test]
    fn add_string_and_numeric_is_type_error() {
        let a = Variant::String("foo".into());
        let b = Variant::Int32(2);
        assert!(a.add(&b).is_err());
    }

    #[test]
    fn divide_by_zero_is_numeric_domain_error() {
        let a = Variant::Int32(1);
        let b = Variant::Int32(0);
        assert_eq!(a.divide(&b), Err(ValueError::NumericDomain { operator: "/" }));
    }

    #[test]
    fn null_numerator_propagates_before_the_zero_check() {
        let a = Variant::Null;
        let b = Variant::Int32(0);
        assert_eq!(a.divide(&b).unwrap(), Variant::Null);
        assert_eq!(a.modulo(&b).unwrap(), Variant::Null);
    }

    #[test]
    fn null_propagates_through_arithmetic() {
        let a = Variant::Null;
        let b = Variant::Int32(2);
        assert_eq!(a.add(&b).unwrap(), Variant::Null);
    }

    #[test]
    fn compatible_equal_never_matches_null() {
        assert_eq!(Variant::Null.compatible_equal(&Variant::Null).unwrap(), false);
        assert_eq!(
            Variant::Null.compatible_equal(&Variant::Int32(0)).unwrap(),
            false
        );
    }

    #[test]
    fn is_matches_null_to_null() {
        assert!(Variant::Null.is(&Variant::Null).unwrap());
        assert!(!Variant::Null.is(&Variant::Int32(0)).unwrap());
    }

    #[test]
    fn string_to_numeric_comparison_is_type_error() {
        let a = Variant::String("1".into());
        let b = Variant::Int32(1);
        assert!(a.compatible_equal(&b).is_err());
    }

    #[test]
    fn datetime_parses_date_only_and_full_form() {
        let d = RawDateTime::parse("2021-01-01").unwrap();
        assert!(d.has_date && !d.has_time);
        let dt = RawDateTime::parse("2021-01-01 12:21:25").unwrap();
        assert!(dt.has_date && dt.has_time);
        assert_eq!(dt.to_canonical_string(), "2021-01-01 12:21:25");
    }

    #[test]
    fn datetime_rejects_bad_format() {
        assert!(RawDateTime::parse("01/01/2021").is_err());
        assert!(RawDateTime::parse("2021-13-01").is_err());
    }

    #[test]
    fn variant_serialization_round_trips() {
        for v in [
            Variant::Null,
            Variant::Bool(true),
            Variant::Int8(-5),
            Variant::UInt64(u64::MAX),
            Variant::Double(3.5),
            Variant::String("hello".into()),
            Variant::Binary(vec![1, 2, 3]),
            Variant::DateTime(RawDateTime::parse("2021-01-01 12:21:25").unwrap()),
        ] {
            let mut buf = Vec::new();
            v.serialize(&mut buf).unwrap();
            assert_eq!(buf.len(), v.serialized_size());
            let (decoded, used) = Variant::deserialize(&buf).unwrap();
            assert_eq!(used, buf.len());
            assert_eq!(decoded, v);
        }
    }

    #[test]
    fn clob_blob_cannot_serialize() {
        let v = Variant::Clob(LargeObjectHandle(7));
        let mut buf = Vec::new();
        assert!(v.serialize(&mut buf).is_err());
    }
}
