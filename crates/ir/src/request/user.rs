// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! User, access key and token request records.

use super::Attribute;
use crate::expr::Expression;

#[derive(Debug, Clone, PartialEq)]
pub struct CreateUser {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

/// `DROP USER`. The original engine forces `if_exists = false` regardless
/// of the grammar; this request factory reads the `IF EXISTS` terminal
/// directly and sets the flag correctly (REDESIGN FLAG applied — see
/// `DESIGN.md`).
#[derive(Debug, Clone, PartialEq)]
pub struct DropUser {
    pub name: String,
    pub if_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetUserAttributes {
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddUserAccessKey {
    pub user: String,
    pub name: String,
    pub text: Expression,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropUserAccessKey {
    pub user: String,
    pub name: String,
    pub if_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenameUserAccessKey {
    pub user: String,
    pub name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetUserAccessKeyAttributes {
    pub user: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AddUserToken {
    pub user: String,
    pub name: String,
    /// The token value, when given explicitly (e.g. `x'0123...'`); absent
    /// when the engine is expected to generate one.
    pub value: Option<Expression>,
    pub expiration: Option<Expression>,
    pub description: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DropUserToken {
    pub user: String,
    pub name: String,
    pub if_exists: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenameUserToken {
    pub user: String,
    pub name: String,
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SetUserTokenAttributes {
    pub user: String,
    pub name: String,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CheckUserToken {
    pub user: String,
    pub name: String,
    pub value: Expression,
}
