// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The closed set of rule (non-terminal) and token (terminal) identifiers
//! the parse-tree navigator and the factories in `sqlfront-lowering`
//! dispatch on. Numeric ids are stable for this crate's lifetime — no
//! renumbering, only appending — since the binary wire format and any
//! cached dispatch tables an embedder builds depend on it (mirrors the
//! expression tree's own discriminant-stability rule).
//!
//! No SQL grammar is vendored into this workspace (see `SPEC_FULL.md` §E);
//! a production embedder adapts their own LALR/ALL(*) parser's rule and
//! token ids to this enumeration, or extends it.

/// Non-terminal (rule) identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum RuleId {
    /// Sentinel: "this node is not a non-terminal" (mirrors the source's
    /// `kInvalidNodeType`).
    Invalid = 0,

    SqlStmt,

    // Expression grammar
    Expr,
    SimpleExpr,
    SignedNumber,
    LiteralValue,
    ColumnRef,
    AnyName,
    ExprList,
    InList,
    BetweenExpr,

    // Database DDL
    CreateDatabaseStmt,
    DropDatabaseStmt,
    RenameDatabaseStmt,
    SetDatabaseAttrStmt,
    UseDatabaseStmt,
    AttachDatabaseStmt,
    DetachDatabaseStmt,

    // Table DDL
    CreateTableStmt,
    ColumnDef,
    ColumnConstraint,
    DropTableStmt,
    AlterTableStmt,
    RenameTableClause,
    RenameColumnClause,
    AddColumnClause,
    DropColumnClause,
    SetTableAttrClause,

    // Index DDL
    CreateIndexStmt,
    DropIndexStmt,

    // User/access-key/token DDL
    CreateUserStmt,
    DropUserStmt,
    AlterUserStmt,
    AddAccessKeyClause,
    DropAccessKeyClause,
    AlterAccessKeyClause,
    AddTokenClause,
    DropTokenClause,
    AlterTokenClause,
    CheckTokenStmt,

    // Permissions
    GrantStmt,
    RevokeStmt,
    ShowPermissionsStmt,
    PermissionList,
    PermissionTarget,

    // Metadata introspection
    ShowDatabasesStmt,
    ShowTablesStmt,
    DescribeTableStmt,

    // DML
    SelectStmt,
    SelectCore,
    ResultColumn,
    FromClause,
    TableRef,
    WhereClause,
    LimitClause,
    InsertStmt,
    ColumnNameList,
    ValueGroupList,
    ValueGroup,
    UpdateStmt,
    AssignmentList,
    Assignment,
    DeleteStmt,

    // TCL
    BeginStmt,
    CommitStmt,
    RollbackStmt,
    SavepointStmt,
    ReleaseStmt,

    // Shared clause fragments
    AttributeList,
    Attribute,
    IfExistsClause,
    IfNotExistsClause,
    WithClause,

    /// `ALTER TABLE ... ALTER COLUMN ...`: the fifth `AlterTableStmt`
    /// sub-clause (`spec.md` §4.6's "ALTER(2nd occurrence)" slot), added
    /// after the rest of this enum was laid out — appended here rather
    /// than grouped with the other table-DDL clauses, per this enum's
    /// append-only discipline.
    RedefineColumnClause,

    /// `ALTER USER u SET key = value, ...`: the outer `SET` arm of
    /// `AlterUserStmt`'s four-level dispatch (`spec.md` §4.6), sibling to
    /// `AddAccessKeyClause`/`DropAccessKeyClause`/etc. but operating on the
    /// user itself rather than one of its access keys/tokens. Appended here
    /// rather than grouped with the other user clauses, per this enum's
    /// append-only discipline.
    SetUserAttrClause,
}

impl Default for RuleId {
    fn default() -> Self {
        RuleId::Invalid
    }
}

/// Terminal (token) identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
#[non_exhaustive]
pub enum TokenKind {
    /// Sentinel: "this node is not a terminal".
    Invalid = 0,

    Identifier,
    QuotedIdentifier,
    StringLiteral,
    NumberLiteral,
    HexLiteral,

    // Punctuation
    Dot,
    Comma,
    LeftParen,
    RightParen,
    Semicolon,
    Star,

    // Operators
    Plus,
    Minus,
    Slash,
    Percent,
    Concat,
    Pipe,
    Ampersand,
    Caret,
    Tilde,
    LeftShift,
    RightShift,
    Equal,
    EqualEqual,
    NotEqual,
    LtGt,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,

    // Keywords: DDL
    Create,
    Drop,
    Rename,
    Alter,
    Add,
    Set,
    Database,
    Table,
    Column,
    Index,
    User,
    AccessKey,
    Token,
    If,
    Exists,
    Not,
    To,
    With,
    Unique,
    Default,
    References,
    Check,
    Collate,
    PrimaryKey,
    Temporary,

    // Keywords: permissions
    Grant,
    Revoke,
    Show,
    GrantOption,
    Select,
    Insert,
    Update,
    Delete,
    All,
    ReadOnly,
    ReadWrite,

    // Keywords: metadata
    Databases,
    Tables,
    Describe,
    Use,
    Attach,
    Detach,

    // Keywords: DML
    Into,
    Values,
    From,
    Where,
    Limit,
    Offset,
    As,

    // Keywords: TCL
    Begin,
    Transaction,
    Commit,
    Rollback,
    Savepoint,
    Release,

    // Keywords: expression literals/operators
    Null,
    True,
    False,
    CurrentTime,
    CurrentDate,
    CurrentTimestamp,
    And,
    Or,
    Like,
    Between,
    In,
    Is,
    Cast,
}

impl Default for TokenKind {
    fn default() -> Self {
        TokenKind::Invalid
    }
}
