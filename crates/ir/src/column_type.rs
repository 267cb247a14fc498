// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Column data type registry: the closed set of storage types a column can
//! declare, their textual names/aliases, and the class predicates and
//! numeric-promotion rules used throughout `expr` and `request`.

use crate::variant::VariantType;

/// A column's declared storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[non_exhaustive]
pub enum ColumnDataType {
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
    Text,
    NText,
    Binary,
    Timestamp,
    Date,
    Time,
    DateTime,
    TimeWithTZ,
    TimestampWithTZ,
    DateInterval,
    TimeInterval,
    Struct,
    Xml,
    Json,
    Uuid,
    Unknown,
}

impl ColumnDataType {
    /// Canonical (reverse-lookup) name, as returned by `getColumnDataTypeName`.
    pub fn canonical_name(self) -> &'static str {
        use ColumnDataType::*;
        match self {
            Bool => "BOOLEAN",
            Int8 => "INT8",
            UInt8 => "UINT8",
            Int16 => "INT16",
            UInt16 => "UINT16",
            Int32 => "INT32",
            UInt32 => "UINT32",
            Int64 => "INT64",
            UInt64 => "UINT64",
            Float => "FLOAT",
            Double => "DOUBLE",
            Text => "TEXT",
            NText => "NTEXT",
            Binary => "BINARY",
            Timestamp => "TIMESTAMP",
            Date => "DATE",
            Time => "TIME",
            DateTime => "DATETIME",
            TimeWithTZ => "TIME WITH TIME ZONE",
            TimestampWithTZ => "TIMESTAMP WITH TIME ZONE",
            DateInterval => "DATE INTERVAL",
            TimeInterval => "TIME INTERVAL",
            Struct => "STRUCT",
            Xml => "XML",
            Json => "JSON",
            Uuid => "UUID",
            Unknown => "UNKNOWN",
        }
    }

    /// Looks up a type by name, accepting the alias table below
    /// (case-insensitive, matching the grammar's case-insensitive keywords).
    pub fn by_name(name: &str) -> Option<ColumnDataType> {
        use ColumnDataType::*;
        let upper = name.to_ascii_uppercase();
        Some(match upper.as_str() {
            "BOOLEAN" | "BOOL" => Bool,
            "INT8" | "TINYINT" => Int8,
            "UINT8" | "TINYUINT" | "TINYINT UNSIGNED" => UInt8,
            "INT16" | "SMALLINT" => Int16,
            "UINT16" | "SMALLUINT" | "SMALLINT UNSIGNED" => UInt16,
            "INT32" | "INT" | "INTEGER" => Int32,
            "UINT32" | "UINT" | "INT UNSIGNED" | "INTEGER UNSIGNED" => UInt32,
            "INT64" | "BIGINT" => Int64,
            "UINT64" | "BIGUINT" | "BIGINT UNSIGNED" => UInt64,
            "FLOAT" | "REAL" => Float,
            "DOUBLE" | "DOUBLE PRECISION" => Double,
            "TEXT" | "VARCHAR" | "CHAR" | "CHARACTER VARYING" => Text,
            "NTEXT" | "NVARCHAR" | "NCHAR" => NText,
            "BINARY" | "VARBINARY" | "BLOB" => Binary,
            "CLOB" => Text,
            "TIMESTAMP" => Timestamp,
            "DATE" => Date,
            "TIME" => Time,
            "DATETIME" => DateTime,
            "TIME WITH TIME ZONE" => TimeWithTZ,
            "TIMESTAMP WITH TIME ZONE" | "DATETIME WITH TIME ZONE" => TimestampWithTZ,
            "DATE INTERVAL" => DateInterval,
            "TIME INTERVAL" => TimeInterval,
            "STRUCT" => Struct,
            "XML" => Xml,
            "JSON" => Json,
            "UUID" | "GUID" => Uuid,
            "UNKNOWN" => Unknown,
            _ => return None,
        })
    }

    pub fn is_numeric_type(self) -> bool {
        self.is_integer_type() || self.is_floating_point_type()
    }

    pub fn is_integer_type(self) -> bool {
        use ColumnDataType::*;
        matches!(
            self,
            Int8 | UInt8 | Int16 | UInt16 | Int32 | UInt32 | Int64 | UInt64
        )
    }

    pub fn is_floating_point_type(self) -> bool {
        matches!(self, ColumnDataType::Float | ColumnDataType::Double)
    }

    pub fn is_signed_type(self) -> bool {
        use ColumnDataType::*;
        matches!(self, Int8 | Int16 | Int32 | Int64 | Float | Double)
    }

    pub fn is_unsigned_type(self) -> bool {
        use ColumnDataType::*;
        matches!(self, UInt8 | UInt16 | UInt32 | UInt64)
    }

    pub fn is_string_type(self) -> bool {
        matches!(self, ColumnDataType::Text | ColumnDataType::NText)
    }

    pub fn is_binary_type(self) -> bool {
        matches!(self, ColumnDataType::Binary)
    }

    pub fn is_datetime_type(self) -> bool {
        use ColumnDataType::*;
        matches!(self, Timestamp | Date | Time | DateTime | TimeWithTZ | TimestampWithTZ)
    }

    /// Signed counterpart of an unsigned integer type, preserving width.
    ///
    /// The original source (`ColumnDataType.h::getSignedType`) maps
    /// `UINT16`/`UINT32`/`UINT64` all down to `INT16`, which is not
    /// width-preserving. This is a documented source bug (see `DESIGN.md`);
    /// this implementation is corrected to preserve width.
    pub fn signed_counterpart(self) -> Option<ColumnDataType> {
        use ColumnDataType::*;
        Some(match self {
            UInt8 => Int8,
            UInt16 => Int16,
            UInt32 => Int32,
            UInt64 => Int64,
            other if other.is_signed_type() => other,
            _ => return None,
        })
    }

    /// Unsigned counterpart of a signed integer type, preserving width.
    ///
    /// Corrected the same way as [`Self::signed_counterpart`]; the source's
    /// `getUIntType` maps `INT16`/`INT32`/`INT64` all up to `UINT16`.
    pub fn unsigned_counterpart(self) -> Option<ColumnDataType> {
        use ColumnDataType::*;
        Some(match self {
            Int8 => UInt8,
            Int16 => UInt16,
            Int32 => UInt32,
            Int64 => UInt64,
            other if other.is_unsigned_type() => other,
            _ => return None,
        })
    }

    /// Integer width rank, used for numeric promotion (wider type wins).
    fn numeric_rank(self) -> u8 {
        use ColumnDataType::*;
        match self {
            Int8 | UInt8 => 1,
            Int16 | UInt16 => 2,
            Int32 | UInt32 => 3,
            Int64 | UInt64 => 4,
            Float => 5,
            Double => 6,
            _ => 0,
        }
    }
}

/// `getNumericResultType`: the result type of a binary numeric operator is
/// `max(max(left, right), Int32)` by rank, widening both operands up to at
/// least 32-bit. Ties on rank prefer the signed type (matching the source,
/// which never promotes a mixed signed/unsigned pair to the unsigned side).
pub fn get_numeric_result_type(left: ColumnDataType, right: ColumnDataType) -> ColumnDataType {
    let widest = if left.numeric_rank() >= right.numeric_rank() {
        left
    } else {
        right
    };
    let widest = if widest.numeric_rank() < ColumnDataType::Int32.numeric_rank() {
        ColumnDataType::Int32
    } else {
        widest
    };
    if widest.is_unsigned_type() && left.is_signed_type() != right.is_signed_type() {
        widest.signed_counterpart().unwrap_or(widest)
    } else {
        widest
    }
}

/// Maps a runtime [`VariantType`] to its natural column storage type, used
/// when a literal constant needs a `ColumnDataType` for promotion purposes.
pub fn convert_variant_type_to_column_data_type(vt: VariantType) -> ColumnDataType {
    use ColumnDataType as C;
    match vt {
        VariantType::Null => C::Int32,
        VariantType::Bool => C::Bool,
        VariantType::Int8 => C::Int8,
        VariantType::UInt8 => C::UInt8,
        VariantType::Int16 => C::Int16,
        VariantType::UInt16 => C::UInt16,
        VariantType::Int32 => C::Int32,
        VariantType::UInt32 => C::UInt32,
        VariantType::Int64 => C::Int64,
        VariantType::UInt64 => C::UInt64,
        VariantType::Float => C::Float,
        VariantType::Double => C::Double,
        VariantType::DateTime => C::DateTime,
        VariantType::String => C::Text,
        VariantType::Binary => C::Binary,
        // The original's `kVariantTypeToColumnDataTypeMapping` collapses
        // Clob/Blob into the same storage types as String/Binary — they
        // are only distinct at the `Variant`/`VariantType` level.
        VariantType::Clob => C::Text,
        VariantType::Blob => C::Binary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_name_is_case_insensitive_and_covers_aliases() {
        assert_eq!(ColumnDataType::by_name("int"), Some(ColumnDataType::Int32));
        assert_eq!(
            ColumnDataType::by_name("INTEGER"),
            Some(ColumnDataType::Int32)
        );
        assert_eq!(
            ColumnDataType::by_name("BigInt"),
            Some(ColumnDataType::Int64)
        );
        assert_eq!(ColumnDataType::by_name("nonsense"), None);
    }

    #[test]
    fn by_name_collapses_varchar_and_blob_aliases_per_spec() {
        assert_eq!(ColumnDataType::by_name("VARCHAR"), Some(ColumnDataType::Text));
        assert_eq!(ColumnDataType::by_name("CHAR"), Some(ColumnDataType::Text));
        assert_eq!(ColumnDataType::by_name("CLOB"), Some(ColumnDataType::Text));
        assert_eq!(ColumnDataType::by_name("BLOB"), Some(ColumnDataType::Binary));
        assert_eq!(ColumnDataType::by_name("VARBINARY"), Some(ColumnDataType::Binary));
        assert_eq!(ColumnDataType::by_name("NVARCHAR"), Some(ColumnDataType::NText));
    }

    #[test]
    fn by_name_covers_the_remaining_closed_enumeration_members() {
        assert_eq!(ColumnDataType::by_name("TIME WITH TIME ZONE"), Some(ColumnDataType::TimeWithTZ));
        assert_eq!(
            ColumnDataType::by_name("TIMESTAMP WITH TIME ZONE"),
            Some(ColumnDataType::TimestampWithTZ)
        );
        assert_eq!(ColumnDataType::by_name("DATE INTERVAL"), Some(ColumnDataType::DateInterval));
        assert_eq!(ColumnDataType::by_name("TIME INTERVAL"), Some(ColumnDataType::TimeInterval));
        assert_eq!(ColumnDataType::by_name("STRUCT"), Some(ColumnDataType::Struct));
        assert_eq!(ColumnDataType::by_name("XML"), Some(ColumnDataType::Xml));
        assert_eq!(ColumnDataType::by_name("JSON"), Some(ColumnDataType::Json));
        assert_eq!(ColumnDataType::by_name("UNKNOWN"), Some(ColumnDataType::Unknown));
    }

    #[test]
    fn clob_and_blob_variants_collapse_to_text_and_binary_column_types() {
        assert_eq!(
            convert_variant_type_to_column_data_type(VariantType::Clob),
            ColumnDataType::Text
        );
        assert_eq!(
            convert_variant_type_to_column_data_type(VariantType::Blob),
            ColumnDataType::Binary
        );
    }

    #[test]
    fn signed_counterpart_preserves_width() {
        assert_eq!(
            ColumnDataType::UInt64.signed_counterpart(),
            Some(ColumnDataType::Int64)
        );
        assert_eq!(
            ColumnDataType::UInt32.signed_counterpart(),
            Some(ColumnDataType::Int32)
        );
        assert_eq!(
            ColumnDataType::UInt16.signed_counterpart(),
            Some(ColumnDataType::Int16)
        );
    }

    #[test]
    fn unsigned_counterpart_preserves_width() {
        assert_eq!(
            ColumnDataType::Int64.unsigned_counterpart(),
            Some(ColumnDataType::UInt64)
        );
        assert_eq!(
            ColumnDataType::Int32.unsigned_counterpart(),
            Some(ColumnDataType::UInt32)
        );
        assert_eq!(
            ColumnDataType::Int16.unsigned_counterpart(),
            Some(ColumnDataType::UInt16)
        );
    }

    #[test]
    fn numeric_result_type_widens_to_at_least_int32() {
        assert_eq!(
            get_numeric_result_type(ColumnDataType::Int8, ColumnDataType::UInt8),
            ColumnDataType::Int32
        );
    }

    #[test]
    fn numeric_result_type_widens_to_widest_operand() {
        assert_eq!(
            get_numeric_result_type(ColumnDataType::Int64, ColumnDataType::Int32),
            ColumnDataType::Int64
        );
        assert_eq!(
            get_numeric_result_type(ColumnDataType::Double, ColumnDataType::Int64),
            ColumnDataType::Double
        );
    }
}
