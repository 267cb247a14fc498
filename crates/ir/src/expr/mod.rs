// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The expression tree: a closed family of scalar expression nodes with
//! value-type inference, validation, evaluation, cloning, structural
//! equality, binary (de)serialization and textual dump.
//!
//! The hierarchy is a sealed enum of shape families (`Constant`, column
//! references, `List`, `Unary`/`Binary`/`Between`/`In`, plus the
//! specially-shaped `Like`/`Is`/`Cast`) rather than a class hierarchy with
//! virtual dispatch — every operation below is one `match` over
//! [`Expression`].

mod context;
mod eval;
mod like;
mod serialize;

pub use context::{EvaluationContext, NullEvaluationContext};
pub use eval::ExprError;
pub use like::like_match;

use crate::column_type::ColumnDataType;
use crate::variant::Variant;

/// Depth limit enforced by `validate`/`evaluate`/`clone`/`serialize`/`dump`
/// before raising [`ExprError::ExpressionTooDeep`].
#[derive(Debug, Clone, Copy)]
pub struct ExpressionLimits {
    pub max_depth: u32,
    /// Off by default: reproduces documented source behavior where a Null
    /// bound in BETWEEN yields `false`. When enabled, a Null bound yields
    /// an indeterminate (Null) result instead, matching SQL's three-valued
    /// logic.
    pub three_valued_between: bool,
}

impl Default for ExpressionLimits {
    fn default() -> Self {
        ExpressionLimits {
            max_depth: 1024,
            three_valued_between: false,
        }
    }
}

/// Stable numeric discriminant for every expression node kind, in the exact
/// order of the original engine's `ExpressionType` enumerator list. New
/// kinds must be appended at the end; existing tags are never renumbered
/// (the binary wire format depends on tag stability).
///
/// Variants marked "reserved" have no corresponding [`Expression`]
/// constructor in this crate — they keep their numeric slot so the
/// deserializer can recognize the tag as a valid-but-unsupported kind
/// (raising [`ExprError::UnsupportedExpressionShape`]) rather than
/// [`ExprError::CorruptExpression`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
#[non_exhaustive]
pub enum ExpressionType {
    Constant = 0,
    SingleColumnReference = 1,
    AllColumnsReference = 2,
    List = 3,
    /// Reserved: subqueries are not supported.
    Subquery = 4,
    LogicalNotOperator = 5,
    LogicalAndOperator = 6,
    LogicalOrOperator = 7,
    UnaryMinusOperator = 8,
    UnaryPlusOperator = 9,
    AddOperator = 10,
    SubtractOperator = 11,
    MultiplyOperator = 12,
    DivideOperator = 13,
    ModuloOperator = 14,
    ConcatenateOperator = 15,
    BitwiseOrOperator = 16,
    BitwiseAndOperator = 17,
    BitwiseXorOperator = 18,
    BitwiseComplementOperator = 19,
    RightShiftOperator = 20,
    LeftShiftOperator = 21,
    /// Cast is supported only for the subset of target types `ColumnDataType`
    /// recognizes; the source marks this "NOT COMPLETE" and so does this.
    CastOperator = 22,
    /// Reserved: `CASE` is not supported.
    CaseOperator = 23,
    EqualPredicate = 24,
    NotEqualPredicate = 25,
    LessPredicate = 26,
    LessOrEqualPredicate = 27,
    GreaterOrEqualPredicate = 28,
    GreaterPredicate = 29,
    /// Reserved: `IS DISTINCT FROM` is not supported.
    DistinctFromPredicate = 30,
    /// Reserved: quantified comparison is not supported.
    AllPredicate = 31,
    /// Reserved: quantified comparison is not supported.
    AnyPredicate = 32,
    /// Reserved: quantified comparison is not supported.
    SomePredicate = 33,
    InPredicate = 34,
    IsPredicate = 35,
    BetweenPredicate = 36,
    LikePredicate = 37,
    /// Reserved: not supported.
    MatchPredicate = 38,
    /// Reserved: correlated subquery predicate, not supported.
    ExistsPredicate = 39,
    /// Reserved: not supported.
    UniquePredicate = 40,
    /// Reserved: not supported.
    OverlapsPredicate = 41,
    /// Reserved: not supported.
    SimilarToPredicate = 42,
    /// Reserved: not supported.
    IsOfTypePredicate = 43,
    /// Reserved: quantified predicate, not supported.
    ForAllPredicate = 44,
    /// Reserved: quantified predicate, not supported.
    ForAnyPredicate = 45,
    /// Reserved: quantified predicate, not supported.
    ForSomePredicate = 46,
    /// Reserved: aggregate evaluation is out of scope.
    MaxFunction = 47,
    /// Reserved: aggregate evaluation is out of scope.
    MinFunction = 48,
    /// Reserved: aggregate evaluation is out of scope.
    SumFunction = 49,
    /// Reserved: aggregate evaluation is out of scope.
    AvgFunction = 50,
    /// Reserved: aggregate evaluation is out of scope.
    CountFunction = 51,
    /// Reserved: aggregate evaluation is out of scope.
    DistinctFunction = 52,
    /// Reserved: text function, not supported.
    SubstringFunction = 53,
    /// Reserved: text function, not supported.
    RegexpSubstring = 54,
    /// Reserved: text function, not supported.
    OverlayFunction = 55,
    /// Reserved: text function, not supported.
    UpperFunction = 56,
    /// Reserved: text function, not supported.
    LowerFunction = 57,
    /// Reserved: text function, not supported.
    LeftTrimFunction = 58,
    /// Reserved: text function, not supported.
    RightTrimFunction = 59,
    /// Reserved: text function, not supported.
    TrimFunction = 60,
    /// Reserved: text function, not supported.
    CharPositionFunction = 61,
    /// Reserved: text function, not supported.
    BitLengthFunction = 62,
    /// Reserved: text function, not supported.
    CharLengthFunction = 63,
    /// Reserved: text function, not supported.
    OctetLengthFunction = 64,
    /// Reserved: not supported.
    NullIf = 65,
    /// Reserved: not supported.
    Coalesce = 66,
    /// Sentinel past the last assigned tag; never a valid wire value.
    Max = 67,
}

impl ExpressionType {
    pub fn from_tag(tag: u8) -> Option<ExpressionType> {
        use ExpressionType::*;
        const ALL: &[ExpressionType] = &[
            Constant,
            SingleColumnReference,
            AllColumnsReference,
            List,
            Subquery,
            LogicalNotOperator,
            LogicalAndOperator,
            LogicalOrOperator,
            UnaryMinusOperator,
            UnaryPlusOperator,
            AddOperator,
            SubtractOperator,
            MultiplyOperator,
            DivideOperator,
            ModuloOperator,
            ConcatenateOperator,
            BitwiseOrOperator,
            BitwiseAndOperator,
            BitwiseXorOperator,
            BitwiseComplementOperator,
            RightShiftOperator,
            LeftShiftOperator,
            CastOperator,
            CaseOperator,
            EqualPredicate,
            NotEqualPredicate,
            LessPredicate,
            LessOrEqualPredicate,
            GreaterOrEqualPredicate,
            GreaterPredicate,
            DistinctFromPredicate,
            AllPredicate,
            AnyPredicate,
            SomePredicate,
            InPredicate,
            IsPredicate,
            BetweenPredicate,
            LikePredicate,
            MatchPredicate,
            ExistsPredicate,
            UniquePredicate,
            OverlapsPredicate,
            SimilarToPredicate,
            IsOfTypePredicate,
            ForAllPredicate,
            ForAnyPredicate,
            ForSomePredicate,
            MaxFunction,
            MinFunction,
            SumFunction,
            AvgFunction,
            CountFunction,
            DistinctFunction,
            SubstringFunction,
            RegexpSubstring,
            OverlayFunction,
            UpperFunction,
            LowerFunction,
            LeftTrimFunction,
            RightTrimFunction,
            TrimFunction,
            CharPositionFunction,
            BitLengthFunction,
            CharLengthFunction,
            OctetLengthFunction,
            NullIf,
            Coalesce,
            Max,
        ];
        ALL.get(tag as usize).copied()
    }

    /// True for tags this crate actually constructs and evaluates.
    pub fn is_supported(self) -> bool {
        use ExpressionType::*;
        matches!(
            self,
            Constant
                | SingleColumnReference
                | AllColumnsReference
                | List
                | LogicalNotOperator
                | LogicalAndOperator
                | LogicalOrOperator
                | UnaryMinusOperator
                | UnaryPlusOperator
                | AddOperator
                | SubtractOperator
                | MultiplyOperator
                | DivideOperator
                | ModuloOperator
                | ConcatenateOperator
                | BitwiseOrOperator
                | BitwiseAndOperator
                | BitwiseXorOperator
                | BitwiseComplementOperator
                | RightShiftOperator
                | LeftShiftOperator
                | CastOperator
                | EqualPredicate
                | NotEqualPredicate
                | LessPredicate
                | LessOrEqualPredicate
                | GreaterOrEqualPredicate
                | GreaterPredicate
                | InPredicate
                | IsPredicate
                | BetweenPredicate
                | LikePredicate
        )
    }
}

/// A table/column name pair naming a `SingleColumnReference`, plus the
/// resolved indices a name-resolution pass (outside this crate) populates.
///
/// Resolution mutates `resolved` in place rather than producing a new tree,
/// matching the source's shared-mutable-indices shape (documented as
/// single-threaded: resolve before sharing the tree across threads).
#[derive(Debug, Clone)]
pub struct ColumnReference {
    pub table_name: String,
    pub column_name: String,
    pub resolved: std::cell::Cell<Option<(usize, usize)>>,
}

impl ColumnReference {
    pub fn new(table_name: impl Into<String>, column_name: impl Into<String>) -> Self {
        ColumnReference {
            table_name: table_name.into(),
            column_name: column_name.into(),
            resolved: std::cell::Cell::new(None),
        }
    }
}

impl PartialEq for ColumnReference {
    fn eq(&self, other: &Self) -> bool {
        self.table_name == other.table_name && self.column_name == other.column_name
    }
}

/// `table.*` or bare `*`, plus the resolved list of table indices it spans.
#[derive(Debug, Clone)]
pub struct AllColumnsReference {
    pub table_name: Option<String>,
    pub resolved_tables: std::cell::RefCell<Vec<usize>>,
}

impl AllColumnsReference {
    pub fn new(table_name: Option<String>) -> Self {
        AllColumnsReference {
            table_name,
            resolved_tables: std::cell::RefCell::new(Vec::new()),
        }
    }
}

impl PartialEq for AllColumnsReference {
    fn eq(&self, other: &Self) -> bool {
        self.table_name == other.table_name
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    LogicalNot,
    UnaryPlus,
    UnaryMinus,
    BitwiseComplement,
}

impl UnaryOperator {
    pub fn expression_type(self) -> ExpressionType {
        match self {
            UnaryOperator::LogicalNot => ExpressionType::LogicalNotOperator,
            UnaryOperator::UnaryPlus => ExpressionType::UnaryPlusOperator,
            UnaryOperator::UnaryMinus => ExpressionType::UnaryMinusOperator,
            UnaryOperator::BitwiseComplement => ExpressionType::BitwiseComplementOperator,
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            UnaryOperator::LogicalNot => "NOT",
            UnaryOperator::UnaryPlus => "+",
            UnaryOperator::UnaryMinus => "-",
            UnaryOperator::BitwiseComplement => "~",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    LogicalAnd,
    LogicalOr,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Concatenate,
    BitwiseOr,
    BitwiseAnd,
    BitwiseXor,
    LeftShift,
    RightShift,
    Equal,
    NotEqual,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
}

impl BinaryOperator {
    pub fn expression_type(self) -> ExpressionType {
        use BinaryOperator::*;
        match self {
            LogicalAnd => ExpressionType::LogicalAndOperator,
            LogicalOr => ExpressionType::LogicalOrOperator,
            Add => ExpressionType::AddOperator,
            Subtract => ExpressionType::SubtractOperator,
            Multiply => ExpressionType::MultiplyOperator,
            Divide => ExpressionType::DivideOperator,
            Modulo => ExpressionType::ModuloOperator,
            Concatenate => ExpressionType::ConcatenateOperator,
            BitwiseOr => ExpressionType::BitwiseOrOperator,
            BitwiseAnd => ExpressionType::BitwiseAndOperator,
            BitwiseXor => ExpressionType::BitwiseXorOperator,
            LeftShift => ExpressionType::LeftShiftOperator,
            RightShift => ExpressionType::RightShiftOperator,
            Equal => ExpressionType::EqualPredicate,
            NotEqual => ExpressionType::NotEqualPredicate,
            Less => ExpressionType::LessPredicate,
            LessOrEqual => ExpressionType::LessOrEqualPredicate,
            Greater => ExpressionType::GreaterPredicate,
            GreaterOrEqual => ExpressionType::GreaterOrEqualPredicate,
        }
    }

    pub fn text(self) -> &'static str {
        use BinaryOperator::*;
        match self {
            LogicalAnd => "AND",
            LogicalOr => "OR",
            Add => "+",
            Subtract => "-",
            Multiply => "*",
            Divide => "/",
            Modulo => "%",
            Concatenate => "||",
            BitwiseOr => "|",
            BitwiseAnd => "&",
            BitwiseXor => "^",
            LeftShift => "<<",
            RightShift => ">>",
            Equal => "=",
            NotEqual => "!=",
            Less => "<",
            LessOrEqual => "<=",
            Greater => ">",
            GreaterOrEqual => ">=",
        }
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOperator::LogicalAnd | BinaryOperator::LogicalOr)
    }

    pub fn is_comparison(self) -> bool {
        use BinaryOperator::*;
        matches!(
            self,
            Equal | NotEqual | Less | LessOrEqual | Greater | GreaterOrEqual
        )
    }

    pub fn is_bitwise_or_shift(self) -> bool {
        use BinaryOperator::*;
        matches!(self, BitwiseOr | BitwiseAnd | BitwiseXor | LeftShift | RightShift)
    }
}

/// The expression node. A sealed enum of shape families: [`Expression`]'s
/// own operations (validate/evaluate/clone/equality/serialize/dump) are
/// each a single match over this type.
#[derive(Debug, Clone)]
pub enum Expression {
    Constant(Variant),
    SingleColumnReference(ColumnReference),
    AllColumnsReference(AllColumnsReference),
    List(Vec<Expression>),
    Unary {
        op: UnaryOperator,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOperator,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// Shaped like a binary operator per the original design: `target` is
    /// expected to be a `Constant(Variant::String(..))` naming the target
    /// `ColumnDataType` (checked by `validate`, not by this shape).
    Cast {
        operand: Box<Expression>,
        target: Box<Expression>,
    },
    Like {
        not_like: bool,
        value: Box<Expression>,
        pattern: Box<Expression>,
    },
    Is {
        is_not: bool,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Between {
        not_between: bool,
        value: Box<Expression>,
        low: Box<Expression>,
        high: Box<Expression>,
    },
    In {
        not_in: bool,
        value: Box<Expression>,
        list: Vec<Expression>,
    },
}

impl Expression {
    pub fn expression_type(&self) -> ExpressionType {
        match self {
            Expression::Constant(_) => ExpressionType::Constant,
            Expression::SingleColumnReference(_) => ExpressionType::SingleColumnReference,
            Expression::AllColumnsReference(_) => ExpressionType::AllColumnsReference,
            Expression::List(_) => ExpressionType::List,
            Expression::Unary { op, .. } => op.expression_type(),
            Expression::Binary { op, .. } => op.expression_type(),
            Expression::Cast { .. } => ExpressionType::CastOperator,
            Expression::Like { .. } => ExpressionType::LikePredicate,
            Expression::Is { .. } => ExpressionType::IsPredicate,
            Expression::Between { .. } => ExpressionType::BetweenPredicate,
            Expression::In { .. } => ExpressionType::InPredicate,
        }
    }

    /// Human-readable rendering used in diagnostics, not a parser.
    pub fn expression_text(&self) -> String {
        match self {
            Expression::Constant(v) => v.to_canonical_string(),
            Expression::SingleColumnReference(c) => {
                if c.table_name.is_empty() {
                    c.column_name.clone()
                } else {
                    format!("{}.{}", c.table_name, c.column_name)
                }
            }
            Expression::AllColumnsReference(a) => match &a.table_name {
                Some(t) => format!("{t}.*"),
                None => "*".to_string(),
            },
            Expression::List(items) => {
                let parts: Vec<String> = items.iter().map(Expression::expression_text).collect();
                format!("({})", parts.join(", "))
            }
            Expression::Unary { op, operand } => {
                format!("{}{}", op.text(), operand.expression_text())
            }
            Expression::Binary { op, left, right } => format!(
                "{} {} {}",
                left.expression_text(),
                op.text(),
                right.expression_text()
            ),
            Expression::Cast { operand, target } => {
                format!("CAST({} AS {})", operand.expression_text(), target.expression_text())
            }
            Expression::Like {
                not_like,
                value,
                pattern,
            } => format!(
                "{} {}LIKE {}",
                value.expression_text(),
                if *not_like { "NOT " } else { "" },
                pattern.expression_text()
            ),
            Expression::Is { is_not, left, right } => format!(
                "{} IS {}{}",
                left.expression_text(),
                if *is_not { "NOT " } else { "" },
                right.expression_text()
            ),
            Expression::Between {
                not_between,
                value,
                low,
                high,
            } => format!(
                "{} {}BETWEEN {} AND {}",
                value.expression_text(),
                if *not_between { "NOT " } else { "" },
                low.expression_text(),
                high.expression_text()
            ),
            Expression::In {
                not_in,
                value,
                list,
            } => {
                let parts: Vec<String> = list.iter().map(Expression::expression_text).collect();
                format!(
                    "{} {}IN ({})",
                    value.expression_text(),
                    if *not_in { "NOT " } else { "" },
                    parts.join(", ")
                )
            }
        }
    }

    /// Textual dump of the tree shape, one line per node, indented by depth.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.dump_into(&mut out, 0);
        out
    }

    fn dump_into(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push_str(&format!("{:?}", self.expression_type()));
        out.push('\n');
        for child in self.children() {
            child.dump_into(out, depth + 1);
        }
    }

    /// Direct child expressions, in evaluation order.
    pub fn children(&self) -> Vec<&Expression> {
        match self {
            Expression::Constant(_)
            | Expression::SingleColumnReference(_)
            | Expression::AllColumnsReference(_) => Vec::new(),
            Expression::List(items) => items.iter().collect(),
            Expression::Unary { operand, .. } => vec![operand],
            Expression::Binary { left, right, .. } => vec![left, right],
            Expression::Cast { operand, target } => vec![operand, target],
            Expression::Like { value, pattern, .. } => vec![value, pattern],
            Expression::Is { left, right, .. } => vec![left, right],
            Expression::Between {
                value, low, high, ..
            } => vec![value, low, high],
            Expression::In { value, list, .. } => {
                let mut v = vec![value.as_ref()];
                v.extend(list.iter());
                v
            }
        }
    }

    /// Depth-bounded structural equality.
    pub fn depth(&self) -> u32 {
        1 + self
            .children()
            .iter()
            .map(|c| c.depth())
            .max()
            .unwrap_or(0)
    }
}

impl PartialEq for Expression {
    fn eq(&self, other: &Self) -> bool {
        use Expression::*;
        match (self, other) {
            (Constant(a), Constant(b)) => a == b,
            (SingleColumnReference(a), SingleColumnReference(b)) => a == b,
            (AllColumnsReference(a), AllColumnsReference(b)) => a == b,
            (List(a), List(b)) => a == b,
            (
                Unary { op: oa, operand: a },
                Unary { op: ob, operand: b },
            ) => oa == ob && a == b,
            (
                Binary {
                    op: oa,
                    left: la,
                    right: ra,
                },
                Binary {
                    op: ob,
                    left: lb,
                    right: rb,
                },
            ) => oa == ob && la == lb && ra == rb,
            (
                Cast {
                    operand: a,
                    target: ta,
                },
                Cast {
                    operand: b,
                    target: tb,
                },
            ) => a == b && ta == tb,
            (
                Like {
                    not_like: na,
                    value: va,
                    pattern: pa,
                },
                Like {
                    not_like: nb,
                    value: vb,
                    pattern: pb,
                },
            ) => na == nb && va == vb && pa == pb,
            (
                Is {
                    is_not: na,
                    left: la,
                    right: ra,
                },
                Is {
                    is_not: nb,
                    left: lb,
                    right: rb,
                },
            ) => na == nb && la == lb && ra == rb,
            (
                Between {
                    not_between: na,
                    value: va,
                    low: loa,
                    high: hia,
                },
                Between {
                    not_between: nb,
                    value: vb,
                    low: lob,
                    high: hib,
                },
            ) => na == nb && va == vb && loa == lob && hia == hib,
            (
                In {
                    not_in: na,
                    value: va,
                    list: la,
                },
                In {
                    not_in: nb,
                    value: vb,
                    list: lb,
                },
            ) => na == nb && va == vb && la == lb,
            _ => false,
        }
    }
}

pub use serialize::{read_expression, write_expression, ExpressionDecodeError};

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> Expression {
        Expression::SingleColumnReference(ColumnReference::new("", name))
    }

    #[test]
    fn clone_is_structurally_equal_and_disjoint() {
        let e = Expression::Binary {
            op: BinaryOperator::Add,
            left: Box::new(col("A")),
            right: Box::new(Expression::Constant(Variant::Int32(1))),
        };
        let cloned = e.clone();
        assert_eq!(e, cloned);
        // disjoint heap: mutating one Box doesn't alias the other. Rust's
        // ownership already guarantees this; the assertion documents intent.
        match (&e, &cloned) {
            (
                Expression::Binary { left: l1, .. },
                Expression::Binary { left: l2, .. },
            ) => assert!(!std::ptr::eq(l1.as_ref(), l2.as_ref())),
            _ => unreachable!(),
        }
    }

    #[test]
    fn equality_is_reflexive_symmetric_and_consistent_with_clone() {
        let e = Expression::Between {
            not_between: true,
            value: Box::new(col("A")),
            low: Box::new(Expression::Constant(Variant::UInt8(10))),
            high: Box::new(Expression::Constant(Variant::UInt8(100))),
        };
        assert_eq!(e, e.clone());
        assert_eq!(e.clone(), e);
    }

    #[test]
    fn expression_text_renders_between() {
        let e = Expression::Between {
            not_between: true,
            value: Box::new(col("A")),
            low: Box::new(Expression::Constant(Variant::UInt8(10))),
            high: Box::new(Expression::Constant(Variant::UInt8(100))),
        };
        assert_eq!(e.expression_text(), "A NOT BETWEEN 10 AND 100");
    }

    #[test]
    fn expression_type_tags_match_original_order() {
        assert_eq!(ExpressionType::Constant as u8, 0);
        assert_eq!(ExpressionType::List as u8, 3);
        assert_eq!(ExpressionType::CastOperator as u8, 22);
        assert_eq!(ExpressionType::InPredicate as u8, 34);
        assert_eq!(ExpressionType::LikePredicate as u8, 37);
    }

    #[test]
    fn reserved_tags_are_not_supported() {
        assert!(!ExpressionType::Subquery.is_supported());
        assert!(!ExpressionType::CaseOperator.is_supported());
        assert!(ExpressionType::LikePredicate.is_supported());
    }
}
