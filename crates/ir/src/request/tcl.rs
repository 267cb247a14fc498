// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! Transaction control records, plus the metadata-introspection statements
//! (`SHOW DATABASES`/`SHOW TABLES`/`DESCRIBE TABLE`) that share their
//! simplicity.

#[derive(Debug, Clone, PartialEq)]
pub struct ShowDatabases;

#[derive(Debug, Clone, PartialEq)]
pub struct ShowTables {
    pub database: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DescribeTable {
    pub database: Option<String>,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BeginTransaction {
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommitTransaction;

/// `ROLLBACK [TRANSACTION name] [TO SAVEPOINT savepoint]`.
///
/// The original engine's grammar handling reads the transaction name and
/// the savepoint name from the *same* slot: when only one identifier is
/// present it is impossible to tell, from the parse tree alone, which of
/// the two the author meant. This crate reproduces that behavior rather
/// than silently correcting it (`spec.md` §9 asks to reproduce-and-flag,
/// not fix): when the grammar yields a single identifier, it is mirrored
/// into both `transaction_name` and `savepoint_name`. See `DESIGN.md`.
#[derive(Debug, Clone, PartialEq)]
pub struct RollbackTransaction {
    pub transaction_name: Option<String>,
    pub savepoint_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Savepoint {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Release {
    pub name: String,
}
