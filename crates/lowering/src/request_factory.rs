// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The request factory: `create_request` turns a parse-tree statement node
//! into a [`Request`] record (`spec.md` §4.6). One builder per statement
//! kind; every builder reuses `create_expression` for any embedded
//! expression.
//!
//! Tree-shape conventions this factory relies on, since no real grammar is
//! vendored into this workspace (`SPEC_FULL.md` §E):
//!
//! - A qualified object name (`database.table`, or a bare `table`) is a run
//!   of consecutive `Identifier`/`QuotedIdentifier`/`AnyName` children,
//!   collected in source order; 1 name is bare, 2 is `database.name`.
//! - `IF EXISTS`/`IF NOT EXISTS` are detected as a wrapping
//!   `IfExistsClause`/`IfNotExistsClause` child, not by scanning for a bare
//!   `If` token (which could belong to either).
//! - A `WITH key = value, ...` attribute list is a `WithClause` child
//!   wrapping an `AttributeList` child, each of whose children is an
//!   `Attribute` node with exactly `[key, value]`.
//! - `AlterTableStmt`/`AlterUserStmt` wrap exactly one of their named
//!   second-level clause rules as a child (`RenameTableClause`, ...); the
//!   outer statement node carries the target's qualified name, the clause
//!   node carries whatever is specific to that operation.
//! - A `TableRef`'s 1/2/3 name children are `[table]`, `[database, table]`
//!   or `[table, alias]` (disambiguated by an `As` token child), or
//!   `[database, table, alias]`.
//! - `SelectStmt` wraps exactly one `SelectCore` child (no compound
//!   queries, `spec.md` §4.6 "Only single-SELECT-core queries").

use sqlfront_cst::{navigator, CstNode, RuleId, TokenKind};
use sqlfront_ir::request::{
    AddColumn, AddUserAccessKey, AddUserToken, Assignment, AttachDatabase, CheckUserToken,
    ColumnConstraint, ColumnDefinition, CreateDatabase, CreateIndex, CreateTable, CreateUser,
    Delete, DescribeTable, DetachDatabase, DropColumn, DropDatabase, DropIndex, DropTable,
    DropUser, DropUserAccessKey, DropUserToken, GrantPermissionsForTable, Insert, PermissionMask,
    PermissionTarget, RedefineColumn, Release, RenameColumn, RenameDatabase, RenameTable,
    RenameUserAccessKey, RenameUserToken, RevokePermissionsForTable, RollbackTransaction, Savepoint,
    Select, SelectItem, SetDatabaseAttributes, SetTableAttributes, SetUserAccessKeyAttributes,
    SetUserAttributes, SetUserTokenAttributes, ShowDatabases, ShowPermissions, ShowTables, TableRef,
    Update, UseDatabase,
};
use sqlfront_ir::{request::Attribute, request::BeginTransaction, request::CommitTransaction};
use sqlfront_ir::{ColumnDataType, Expression, Request};

use crate::error::{FactoryError, FactoryResult};
use crate::expr_factory::{create_expression, normalize_identifier};

/// Builds a request from a statement node directly (the single-statement
/// overload of `spec.md` §4.6's `create_request`).
pub fn create_request<N: CstNode>(node: &N) -> FactoryResult<Request> {
    match node.non_terminal_type() {
        RuleId::CreateDatabaseStmt => build_create_database(node).map(Request::CreateDatabase),
        RuleId::DropDatabaseStmt => build_drop_database(node).map(Request::DropDatabase),
        RuleId::RenameDatabaseStmt => build_rename_database(node).map(Request::RenameDatabase),
        RuleId::SetDatabaseAttrStmt => build_set_database_attrs(node).map(Request::SetDatabaseAttributes),
        RuleId::UseDatabaseStmt => build_use_database(node).map(Request::UseDatabase),
        RuleId::AttachDatabaseStmt => build_attach_database(node).map(Request::AttachDatabase),
        RuleId::DetachDatabaseStmt => build_detach_database(node).map(Request::DetachDatabase),

        RuleId::CreateTableStmt => build_create_table(node).map(Request::CreateTable),
        RuleId::DropTableStmt => build_drop_table(node).map(Request::DropTable),
        RuleId::AlterTableStmt => build_alter_table(node),

        RuleId::CreateIndexStmt => build_create_index(node).map(Request::CreateIndex),
        RuleId::DropIndexStmt => build_drop_index(node).map(Request::DropIndex),

        RuleId::CreateUserStmt => build_create_user(node).map(Request::CreateUser),
        RuleId::DropUserStmt => build_drop_user(node).map(Request::DropUser),
        RuleId::AlterUserStmt => build_alter_user(node),
        RuleId::CheckTokenStmt => build_check_token(node).map(Request::CheckUserToken),

        RuleId::GrantStmt => build_grant(node).map(Request::GrantPermissionsForTable),
        RuleId::RevokeStmt => build_revoke(node).map(Request::RevokePermissionsForTable),
        RuleId::ShowPermissionsStmt => build_show_permissions(node).map(Request::ShowPermissions),

        RuleId::ShowDatabasesStmt => Ok(Request::ShowDatabases(ShowDatabases)),
        RuleId::ShowTablesStmt => build_show_tables(node).map(Request::ShowTables),
        RuleId::DescribeTableStmt => build_describe_table(node).map(Request::DescribeTable),

        RuleId::SelectStmt => build_select(node).map(Request::Select),
        RuleId::InsertStmt => build_insert(node).map(Request::Insert),
        RuleId::UpdateStmt => build_update(node).map(Request::Update),
        RuleId::DeleteStmt => build_delete(node).map(Request::Delete),

        RuleId::BeginStmt => build_begin(node).map(Request::BeginTransaction),
        RuleId::CommitStmt => Ok(Request::CommitTransaction(CommitTransaction)),
        RuleId::RollbackStmt => build_rollback(node).map(Request::RollbackTransaction),
        RuleId::SavepointStmt => build_savepoint(node).map(Request::Savepoint),
        RuleId::ReleaseStmt => build_release(node).map(Request::Release),

        _ => Err(unsupported_stmt(node)),
    }
}

/// Builds a request from the `index`-th top-level statement under `root`
/// (`spec.md` §4.6's indexed overload).
pub fn create_request_at<N: CstNode>(root: &N, index: usize) -> FactoryResult<Request> {
    let stmt = navigator::find_statement(root, index)
        .ok_or_else(|| missing(root, "statement at requested index"))?;
    create_request(&stmt)
}

fn unsupported_stmt<N: CstNode>(node: &N) -> FactoryError {
    FactoryError::UnsupportedStatement {
        line: node.line(),
        column: node.column(),
    }
}

fn missing<N: CstNode>(node: &N, clause: &'static str) -> FactoryError {
    FactoryError::MissingRequiredClause {
        line: node.line(),
        column: node.column(),
        clause,
    }
}

fn collect_name_children<N: CstNode>(node: &N) -> Vec<N> {
    node.children()
        .into_iter()
        .filter(|c| {
            matches!(c.terminal_type(), TokenKind::Identifier | TokenKind::QuotedIdentifier)
                || c.non_terminal_type() == RuleId::AnyName
        })
        .collect()
}

fn normalize_name<N: CstNode>(node: &N) -> FactoryResult<String> {
    Ok(normalize_identifier(&navigator::extract_object_name(node)?))
}

/// `names` must hold 1 (bare name) or 2 (`database.name`) entries.
fn qualified_name<N: CstNode>(parent: &N, names: &[N]) -> FactoryResult<(Option<String>, String)> {
    match names.len() {
        1 => Ok((None, normalize_name(&names[0])?)),
        2 => Ok((Some(normalize_name(&names[0])?), normalize_name(&names[1])?)),
        _ => Err(unsupported_stmt(parent)),
    }
}

fn resolve_table_and_alias<N: CstNode>(
    parent: &N,
    names: &[N],
    has_as: bool,
) -> FactoryResult<(Option<String>, String, Option<String>)> {
    match names.len() {
        1 => Ok((None, normalize_name(&names[0])?, None)),
        2 if has_as => Ok((None, normalize_name(&names[0])?, Some(normalize_name(&names[1])?))),
        2 => Ok((Some(normalize_name(&names[0])?), normalize_name(&names[1])?, None)),
        3 => Ok((
            Some(normalize_name(&names[0])?),
            normalize_name(&names[1])?,
            Some(normalize_name(&names[2])?),
        )),
        _ => Err(unsupported_stmt(parent)),
    }
}

fn has_if_exists<N: CstNode>(node: &N) -> bool {
    navigator::find_non_terminal_child(node, RuleId::IfExistsClause).is_some()
}

fn has_if_not_exists<N: CstNode>(node: &N) -> bool {
    navigator::find_non_terminal_child(node, RuleId::IfNotExistsClause).is_some()
}

fn with_attributes<N: CstNode>(node: &N) -> FactoryResult<Vec<Attribute>> {
    let Some(with_node) = navigator::find_non_terminal_child(node, RuleId::WithClause) else {
        return Ok(Vec::new());
    };
    let Some(list_node) = navigator::find_non_terminal_child(&with_node, RuleId::AttributeList) else {
        return Ok(Vec::new());
    };
    list_node
        .children()
        .into_iter()
        .map(|attr| {
            let children = attr.children();
            if children.len() != 2 {
                return Err(unsupported_stmt(&attr));
            }
            let key = normalize_name(&children[0])?;
            let value = create_expression(&children[1], false)?;
            Ok(Attribute { key, value })
        })
        .collect()
}

fn extract_attr(attrs: &mut Vec<Attribute>, key: &str) -> Option<Expression> {
    attrs.iter().position(|a| a.key == key).map(|i| attrs.remove(i).value)
}

/// The first non-identifier literal/expression-shaped child, used to find
/// an optional bare value (e.g. a token's hex literal) among a clause's
/// children without mistaking it for a name or a `WITH` list.
fn find_expr_value_child<N: CstNode>(node: &N) -> Option<N> {
    node.children().into_iter().find(|c| match c.kind() {
        sqlfront_cst::NodeKind::Terminal(t) => {
            !matches!(t, TokenKind::Identifier | TokenKind::QuotedIdentifier)
        }
        sqlfront_cst::NodeKind::NonTerminal(r) => {
            matches!(r, RuleId::Expr | RuleId::SimpleExpr | RuleId::SignedNumber | RuleId::LiteralValue)
        }
    })
}

// ---------------------------------------------------------------- Database

fn build_create_database<N: CstNode>(node: &N) -> FactoryResult<CreateDatabase> {
    let names = collect_name_children(node);
    if names.len() != 1 {
        return Err(unsupported_stmt(node));
    }
    let name = normalize_name(&names[0])?;
    let temporary = navigator::has_terminal_child(node, TokenKind::Temporary);
    let mut attributes = with_attributes(node)?;
    let cipher_id = extract_attr(&mut attributes, "CIPHER_ID");
    let cipher_key_seed = extract_attr(&mut attributes, "CIPHER_KEY_SEED");
    Ok(CreateDatabase {
        name,
        temporary,
        cipher_id,
        cipher_key_seed,
        attributes,
    })
}

fn build_drop_database<N: CstNode>(node: &N) -> FactoryResult<DropDatabase> {
    let names = collect_name_children(node);
    if names.len() != 1 {
        return Err(unsupported_stmt(node));
    }
    Ok(DropDatabase {
        name: normalize_name(&names[0])?,
        if_exists: has_if_exists(node),
    })
}

fn build_rename_database<N: CstNode>(node: &N) -> FactoryResult<RenameDatabase> {
    let names = collect_name_children(node);
    if names.len() != 2 {
        return Err(unsupported_stmt(node));
    }
    Ok(RenameDatabase {
        name: normalize_name(&names[0])?,
        new_name: normalize_name(&names[1])?,
    })
}

fn build_set_database_attrs<N: CstNode>(node: &N) -> FactoryResult<SetDatabaseAttributes> {
    let names = collect_name_children(node);
    if names.len() != 1 {
        return Err(unsupported_stmt(node));
    }
    Ok(SetDatabaseAttributes {
        name: normalize_name(&names[0])?,
        attributes: with_attributes(node)?,
    })
}

fn build_use_database<N: CstNode>(node: &N) -> FactoryResult<UseDatabase> {
    let names = collect_name_children(node);
    if names.len() != 1 {
        return Err(unsupported_stmt(node));
    }
    Ok(UseDatabase {
        name: normalize_name(&names[0])?,
    })
}

fn build_attach_database<N: CstNode>(node: &N) -> FactoryResult<AttachDatabase> {
    let names = collect_name_children(node);
    if names.len() != 1 {
        return Err(unsupported_stmt(node));
    }
    Ok(AttachDatabase {
        name: normalize_name(&names[0])?,
        attributes: with_attributes(node)?,
    })
}

fn build_detach_database<N: CstNode>(node: &N) -> FactoryResult<DetachDatabase> {
    let names = collect_name_children(node);
    if names.len() != 1 {
        return Err(unsupported_stmt(node));
    }
    Ok(DetachDatabase {
        name: normalize_name(&names[0])?,
        if_exists: has_if_exists(node),
    })
}

// ------------------------------------------------------------------ Table

fn build_column_constraint<N: CstNode>(node: &N) -> FactoryResult<ColumnConstraint> {
    let children = node.children();
    let first = children.first().ok_or_else(|| unsupported_stmt(node))?;
    match first.terminal_type() {
        TokenKind::PrimaryKey => Err(FactoryError::UnsupportedConstraint {
            line: node.line(),
            column: node.column(),
        }),
        TokenKind::Unique => Ok(ColumnConstraint::Unique),
        TokenKind::Not => Ok(ColumnConstraint::NotNull),
        TokenKind::Default => {
            let value_node = children.get(1).ok_or_else(|| unsupported_stmt(node))?;
            Ok(ColumnConstraint::Default(create_expression(value_node, false)?))
        }
        TokenKind::References => {
            let table = children.get(1).ok_or_else(|| unsupported_stmt(node))?;
            let column = children.get(2).ok_or_else(|| unsupported_stmt(node))?;
            Ok(ColumnConstraint::References {
                table: normalize_name(table)?,
                column: normalize_name(column)?,
            })
        }
        TokenKind::Check => {
            let value_node = children.get(1).ok_or_else(|| unsupported_stmt(node))?;
            Ok(ColumnConstraint::Check(create_expression(value_node, true)?))
        }
        TokenKind::Collate => {
            let name_node = children.get(1).ok_or_else(|| unsupported_stmt(node))?;
            Ok(ColumnConstraint::Collate(navigator::extract_object_name(name_node)?))
        }
        _ => Err(FactoryError::UnsupportedConstraint {
            line: node.line(),
            column: node.column(),
        }),
    }
}

fn build_column_def<N: CstNode>(node: &N) -> FactoryResult<ColumnDefinition> {
    let children = node.children();
    if children.len() < 2 {
        return Err(unsupported_stmt(node));
    }
    let name = normalize_name(&children[0])?;
    let type_text = navigator::extract_object_name(&children[1])?;
    let data_type = ColumnDataType::by_name(&type_text).ok_or_else(|| FactoryError::UnknownDataType {
        line: children[1].line(),
        column: children[1].column(),
        name: type_text,
    })?;
    let constraints = children[2..]
        .iter()
        .filter(|c| c.non_terminal_type() == RuleId::ColumnConstraint)
        .map(build_column_constraint)
        .collect::<FactoryResult<Vec<_>>>()?;
    Ok(ColumnDefinition {
        name,
        data_type,
        constraints,
    })
}

fn build_create_table<N: CstNode>(node: &N) -> FactoryResult<CreateTable> {
    let names = collect_name_children(node);
    let (database, name) = qualified_name(node, &names)?;
    let columns = node
        .children()
        .into_iter()
        .filter(|c| c.non_terminal_type() == RuleId::ColumnDef)
        .map(|c| build_column_def(&c))
        .collect::<FactoryResult<Vec<_>>>()?;
    if columns.is_empty() {
        return Err(missing(node, "column definitions"));
    }
    Ok(CreateTable {
        database,
        name,
        if_not_exists: has_if_not_exists(node),
        columns,
    })
}

fn build_drop_table<N: CstNode>(node: &N) -> FactoryResult<DropTable> {
    let names = collect_name_children(node);
    let (database, name) = qualified_name(node, &names)?;
    Ok(DropTable {
        database,
        name,
        if_exists: has_if_exists(node),
    })
}

fn build_alter_table<N: CstNode>(node: &N) -> FactoryResult<Request> {
    let names = collect_name_children(node);
    let (database, table) = qualified_name(node, &names)?;
    let clause = node
        .children()
        .into_iter()
        .find(|c| {
            matches!(
                c.non_terminal_type(),
                RuleId::RenameTableClause
                    | RuleId::RenameColumnClause
                    | RuleId::AddColumnClause
                    | RuleId::DropColumnClause
                    | RuleId::SetTableAttrClause
                    | RuleId::RedefineColumnClause
            )
        })
        .ok_or_else(|| missing(node, "ALTER TABLE operation"))?;

    match clause.non_terminal_type() {
        RuleId::RenameTableClause => {
            let new_names = collect_name_children(&clause);
            let new_name = new_names.first().map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "new table name"))?;
            Ok(Request::RenameTable(RenameTable {
                database,
                name: table,
                new_name,
            }))
        }
        RuleId::RenameColumnClause => {
            let cn = collect_name_children(&clause);
            if cn.len() != 2 {
                return Err(unsupported_stmt(&clause));
            }
            Ok(Request::RenameColumn(RenameColumn {
                database,
                table,
                name: normalize_name(&cn[0])?,
                new_name: normalize_name(&cn[1])?,
            }))
        }
        RuleId::AddColumnClause => {
            let coldef = navigator::find_non_terminal_child(&clause, RuleId::ColumnDef)
                .ok_or_else(|| missing(&clause, "column definition"))?;
            Ok(Request::AddColumn(AddColumn {
                database,
                table,
                column: build_column_def(&coldef)?,
            }))
        }
        RuleId::DropColumnClause => {
            let cn = collect_name_children(&clause);
            let name = cn.first().map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "column name"))?;
            Ok(Request::DropColumn(DropColumn {
                database,
                table,
                column: name,
                if_exists: has_if_exists(&clause),
            }))
        }
        RuleId::SetTableAttrClause => Ok(Request::SetTableAttributes(SetTableAttributes {
            database,
            name: table,
            attributes: with_attributes(&clause)?,
        })),
        RuleId::RedefineColumnClause => {
            let coldef = navigator::find_non_terminal_child(&clause, RuleId::ColumnDef)
                .ok_or_else(|| missing(&clause, "column definition"))?;
            Ok(Request::RedefineColumn(RedefineColumn {
                database,
                table,
                column: build_column_def(&coldef)?,
            }))
        }
        _ => unreachable!("filtered to the five/six clause kinds above"),
    }
}

// ------------------------------------------------------------------ Index

fn build_create_index<N: CstNode>(node: &N) -> FactoryResult<CreateIndex> {
    let names = collect_name_children(node);
    if names.is_empty() {
        return Err(unsupported_stmt(node));
    }
    let index_name = normalize_name(&names[0])?;
    let (database, table) = qualified_name(node, &names[1..])?;
    let column_list = navigator::find_non_terminal_child(node, RuleId::ColumnNameList)
        .ok_or_else(|| missing(node, "index column list"))?;
    let columns = column_list
        .children()
        .iter()
        .map(normalize_name)
        .collect::<FactoryResult<Vec<_>>>()?;
    Ok(CreateIndex {
        database,
        table,
        name: index_name,
        columns,
        unique: navigator::has_terminal_child(node, TokenKind::Unique),
        if_not_exists: has_if_not_exists(node),
    })
}

fn build_drop_index<N: CstNode>(node: &N) -> FactoryResult<DropIndex> {
    let names = collect_name_children(node);
    let (database, name) = qualified_name(node, &names)?;
    Ok(DropIndex {
        database,
        name,
        if_exists: has_if_exists(node),
    })
}

// ------------------------------------------------------------------- User

fn build_create_user<N: CstNode>(node: &N) -> FactoryResult<CreateUser> {
    let names = collect_name_children(node);
    if names.len() != 1 {
        return Err(unsupported_stmt(node));
    }
    Ok(CreateUser {
        name: normalize_name(&names[0])?,
        attributes: with_attributes(node)?,
    })
}

/// Reads `IF EXISTS` directly rather than forcing `false` (REDESIGN FLAG
/// applied per `DESIGN.md`).
fn build_drop_user<N: CstNode>(node: &N) -> FactoryResult<DropUser> {
    let names = collect_name_children(node);
    if names.len() != 1 {
        return Err(unsupported_stmt(node));
    }
    Ok(DropUser {
        name: normalize_name(&names[0])?,
        if_exists: has_if_exists(node),
    })
}

fn build_alter_user<N: CstNode>(node: &N) -> FactoryResult<Request> {
    let names = collect_name_children(node);
    if names.len() != 1 {
        return Err(unsupported_stmt(node));
    }
    let user = normalize_name(&names[0])?;
    let clause = node
        .children()
        .into_iter()
        .find(|c| {
            matches!(
                c.non_terminal_type(),
                RuleId::AddAccessKeyClause
                    | RuleId::DropAccessKeyClause
                    | RuleId::AlterAccessKeyClause
                    | RuleId::AddTokenClause
                    | RuleId::DropTokenClause
                    | RuleId::AlterTokenClause
                    | RuleId::SetUserAttrClause
            )
        })
        .ok_or_else(|| missing(node, "ALTER USER operation"))?;

    match clause.non_terminal_type() {
        RuleId::SetUserAttrClause => Ok(Request::SetUserAttributes(SetUserAttributes {
            name: user,
            attributes: with_attributes(&clause)?,
        })),
        RuleId::AddAccessKeyClause => {
            let cn = collect_name_children(&clause);
            let name = cn.first().map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "access key name"))?;
            let text_node = find_expr_value_child(&clause).ok_or_else(|| missing(&clause, "access key text"))?;
            Ok(Request::AddUserAccessKey(AddUserAccessKey {
                user,
                name,
                text: create_expression(&text_node, false)?,
                attributes: with_attributes(&clause)?,
            }))
        }
        RuleId::DropAccessKeyClause => {
            let cn = collect_name_children(&clause);
            let name = cn.first().map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "access key name"))?;
            Ok(Request::DropUserAccessKey(DropUserAccessKey {
                user,
                name,
                if_exists: has_if_exists(&clause),
            }))
        }
        RuleId::AlterAccessKeyClause => {
            let cn = collect_name_children(&clause);
            let name = cn.first().map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "access key name"))?;
            if navigator::has_terminal_child(&clause, TokenKind::Rename) {
                let new_name = cn.get(1).map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "new access key name"))?;
                Ok(Request::RenameUserAccessKey(RenameUserAccessKey { user, name, new_name }))
            } else {
                Ok(Request::SetUserAccessKeyAttributes(SetUserAccessKeyAttributes {
                    user,
                    name,
                    attributes: with_attributes(&clause)?,
                }))
            }
        }
        RuleId::AddTokenClause => {
            let cn = collect_name_children(&clause);
            let name = cn.first().map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "token name"))?;
            let value = find_expr_value_child(&clause)
                .map(|v| create_expression(&v, false))
                .transpose()?;
            let mut attributes = with_attributes(&clause)?;
            let expiration = extract_attr(&mut attributes, "EXPIRATION_TIMESTAMP");
            let description = extract_attr(&mut attributes, "DESCRIPTION");
            Ok(Request::AddUserToken(AddUserToken {
                user,
                name,
                value,
                expiration,
                description,
            }))
        }
        RuleId::DropTokenClause => {
            let cn = collect_name_children(&clause);
            let name = cn.first().map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "token name"))?;
            Ok(Request::DropUserToken(DropUserToken {
                user,
                name,
                if_exists: has_if_exists(&clause),
            }))
        }
        RuleId::AlterTokenClause => {
            let cn = collect_name_children(&clause);
            let name = cn.first().map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "token name"))?;
            if navigator::has_terminal_child(&clause, TokenKind::Rename) {
                let new_name = cn.get(1).map(normalize_name).transpose()?.ok_or_else(|| missing(&clause, "new token name"))?;
                Ok(Request::RenameUserToken(RenameUserToken { user, name, new_name }))
            } else {
                Ok(Request::SetUserTokenAttributes(SetUserTokenAttributes {
                    user,
                    name,
                    attributes: with_attributes(&clause)?,
                }))
            }
        }
        _ => unreachable!("filtered to the seven clause kinds above"),
    }
}

fn build_check_token<N: CstNode>(node: &N) -> FactoryResult<CheckUserToken> {
    let names = collect_name_children(node);
    if names.len() != 2 {
        return Err(unsupported_stmt(node));
    }
    let value_node = find_expr_value_child(node).ok_or_else(|| missing(node, "token value"))?;
    Ok(CheckUserToken {
        user: normalize_name(&names[0])?,
        name: normalize_name(&names[1])?,
        value: create_expression(&value_node, false)?,
    })
}

// ----------------------------------------------------------- Permissions

fn permission_from_token(tok: TokenKind) -> Option<PermissionMask> {
    match tok {
        TokenKind::Select => Some(PermissionMask::SELECT),
        TokenKind::Insert => Some(PermissionMask::INSERT),
        TokenKind::Update => Some(PermissionMask::UPDATE),
        TokenKind::Delete => Some(PermissionMask::DELETE),
        TokenKind::Drop => Some(PermissionMask::DROP),
        TokenKind::Alter => Some(PermissionMask::ALTER),
        TokenKind::Show => Some(PermissionMask::SHOW),
        TokenKind::ReadOnly => Some(PermissionMask::READ_ONLY),
        TokenKind::ReadWrite => Some(PermissionMask::READ_WRITE),
        TokenKind::All => Some(PermissionMask::ALL),
        _ => None,
    }
}

fn build_permission_mask<N: CstNode>(list_node: &N) -> FactoryResult<PermissionMask> {
    let mut mask = PermissionMask::empty();
    for child in list_node.children() {
        let kw = permission_from_token(child.terminal_type()).ok_or_else(|| FactoryError::InvalidAttribute {
            line: child.line(),
            column: child.column(),
            key: child.text().to_string(),
        })?;
        mask = mask.union(kw);
    }
    Ok(mask)
}

fn build_permission_target<N: CstNode>(node: &N) -> FactoryResult<PermissionTarget> {
    let children = node.children();
    match children.len() {
        1 if children[0].terminal_type() == TokenKind::Star => Ok(PermissionTarget::AllDatabases),
        2 if children[0].terminal_type() == TokenKind::Star
            && children[1].terminal_type() == TokenKind::Star =>
        {
            Ok(PermissionTarget::AllDatabases)
        }
        2 => {
            let database = normalize_name(&children[0])?;
            if children[1].terminal_type() == TokenKind::Star {
                Ok(PermissionTarget::AllTablesInDatabase { database })
            } else {
                Ok(PermissionTarget::Table {
                    database,
                    table: normalize_name(&children[1])?,
                })
            }
        }
        _ => Err(unsupported_stmt(node)),
    }
}

fn build_grant<N: CstNode>(node: &N) -> FactoryResult<GrantPermissionsForTable> {
    let names = collect_name_children(node);
    let user = names.first().map(normalize_name).transpose()?.ok_or_else(|| missing(node, "user name"))?;
    let list_node = navigator::find_non_terminal_child(node, RuleId::PermissionList)
        .ok_or_else(|| missing(node, "permission list"))?;
    let target_node = navigator::find_non_terminal_child(node, RuleId::PermissionTarget)
        .ok_or_else(|| missing(node, "permission target"))?;
    Ok(GrantPermissionsForTable {
        user,
        target: build_permission_target(&target_node)?,
        permissions: build_permission_mask(&list_node)?,
        with_grant_option: navigator::has_terminal_child(node, TokenKind::GrantOption),
    })
}

fn build_revoke<N: CstNode>(node: &N) -> FactoryResult<RevokePermissionsForTable> {
    let names = collect_name_children(node);
    let user = names.first().map(normalize_name).transpose()?.ok_or_else(|| missing(node, "user name"))?;
    let list_node = navigator::find_non_terminal_child(node, RuleId::PermissionList)
        .ok_or_else(|| missing(node, "permission list"))?;
    let target_node = navigator::find_non_terminal_child(node, RuleId::PermissionTarget)
        .ok_or_else(|| missing(node, "permission target"))?;
    Ok(RevokePermissionsForTable {
        user,
        target: build_permission_target(&target_node)?,
        permissions: build_permission_mask(&list_node)?,
    })
}

fn build_show_permissions<N: CstNode>(node: &N) -> FactoryResult<ShowPermissions> {
    let names = collect_name_children(node);
    Ok(ShowPermissions {
        user: names.first().map(normalize_name).transpose()?,
    })
}

// --------------------------------------------------------------- Metadata

fn build_show_tables<N: CstNode>(node: &N) -> FactoryResult<ShowTables> {
    let names = collect_name_children(node);
    Ok(ShowTables {
        database: names.first().map(normalize_name).transpose()?,
    })
}

fn build_describe_table<N: CstNode>(node: &N) -> FactoryResult<DescribeTable> {
    let names = collect_name_children(node);
    let (database, table) = qualified_name(node, &names)?;
    Ok(DescribeTable { database, table })
}

// -------------------------------------------------------------------- DML

fn build_table_ref<N: CstNode>(node: &N) -> FactoryResult<TableRef> {
    let names = collect_name_children(node);
    let has_as = navigator::has_terminal_child(node, TokenKind::As);
    let (database, name, alias) = resolve_table_and_alias(node, &names, has_as)?;
    Ok(TableRef { database, name, alias })
}

fn build_result_column<N: CstNode>(node: &N) -> FactoryResult<SelectItem> {
    let children = node.children();
    let expr_node = children.first().ok_or_else(|| unsupported_stmt(node))?;
    let expr = create_expression(expr_node, true)?;
    if let Expression::AllColumnsReference(all) = &expr {
        return Ok(match &all.table_name {
            None => SelectItem::Wildcard,
            Some(table) => SelectItem::QualifiedWildcard { table: table.clone() },
        });
    }
    let alias = children.get(1).map(normalize_name).transpose()?;
    Ok(SelectItem::Expr { expr, alias })
}

fn build_select<N: CstNode>(node: &N) -> FactoryResult<Select> {
    let core = navigator::find_non_terminal_child(node, RuleId::SelectCore).ok_or_else(|| missing(node, "select core"))?;

    let from_clause = navigator::find_non_terminal_child(&core, RuleId::FromClause).ok_or_else(|| missing(&core, "FROM clause"))?;
    let tables = from_clause
        .children()
        .iter()
        .map(build_table_ref)
        .collect::<FactoryResult<Vec<_>>>()?;

    let columns = core
        .children()
        .into_iter()
        .filter(|c| c.non_terminal_type() == RuleId::ResultColumn)
        .map(|c| build_result_column(&c))
        .collect::<FactoryResult<Vec<_>>>()?;
    if columns.is_empty() {
        return Err(missing(&core, "result column list"));
    }

    let where_clause = match navigator::find_non_terminal_child(&core, RuleId::WhereClause) {
        Some(w) => {
            let expr_node = w.children().into_iter().next().ok_or_else(|| missing(&w, "WHERE predicate"))?;
            Some(create_expression(&expr_node, true)?)
        }
        None => None,
    };

    let (limit, offset) = match navigator::find_non_terminal_child(&core, RuleId::LimitClause) {
        Some(lc) => {
            let lc_children = lc.children();
            match lc_children.len() {
                1 => (Some(create_expression(&lc_children[0], false)?), None),
                2 if navigator::has_terminal_child(&lc, TokenKind::Offset) => (
                    Some(create_expression(&lc_children[0], false)?),
                    Some(create_expression(&lc_children[1], false)?),
                ),
                // "LIMIT offset, count": the comma form reverses the order.
                2 => (
                    Some(create_expression(&lc_children[1], false)?),
                    Some(create_expression(&lc_children[0], false)?),
                ),
                _ => return Err(unsupported_stmt(&lc)),
            }
        }
        None => (None, None),
    };

    Ok(Select {
        tables,
        columns,
        where_clause,
        limit,
        offset,
    })
}

fn build_insert<N: CstNode>(node: &N) -> FactoryResult<Insert> {
    let names = collect_name_children(node);
    let (database, table) = qualified_name(node, &names)?;

    let columns = match navigator::find_non_terminal_child(node, RuleId::ColumnNameList) {
        Some(cnl) => cnl.children().iter().map(normalize_name).collect::<FactoryResult<Vec<_>>>()?,
        None => Vec::new(),
    };

    let value_group_list =
        navigator::find_non_terminal_child(node, RuleId::ValueGroupList).ok_or_else(|| missing(node, "VALUES"))?;
    let groups = value_group_list
        .children()
        .into_iter()
        .map(|group| {
            let items = group
                .children()
                .iter()
                .map(|e| create_expression(e, false))
                .collect::<FactoryResult<Vec<_>>>()?;
            if !columns.is_empty() && items.len() != columns.len() {
                return Err(unsupported_stmt(&group));
            }
            Ok(items)
        })
        .collect::<FactoryResult<Vec<_>>>()?;
    if groups.is_empty() {
        return Err(missing(node, "VALUES"));
    }

    Ok(Insert {
        database,
        table,
        columns,
        values: groups,
    })
}

fn build_assignment<N: CstNode>(node: &N) -> FactoryResult<Assignment> {
    let children = node.children();
    if children.len() != 2 {
        return Err(unsupported_stmt(node));
    }
    Ok(Assignment {
        column: normalize_name(&children[0])?,
        value: create_expression(&children[1], true)?,
    })
}

fn build_update<N: CstNode>(node: &N) -> FactoryResult<Update> {
    let names = collect_name_children(node);
    let has_as = navigator::has_terminal_child(node, TokenKind::As);
    let (database, table, alias) = resolve_table_and_alias(node, &names, has_as)?;

    let assignment_list =
        navigator::find_non_terminal_child(node, RuleId::AssignmentList).ok_or_else(|| missing(node, "SET clause"))?;
    let assignments = assignment_list
        .children()
        .iter()
        .map(build_assignment)
        .collect::<FactoryResult<Vec<_>>>()?;
    if assignments.is_empty() {
        return Err(missing(&assignment_list, "assignment"));
    }

    let where_clause = match navigator::find_non_terminal_child(node, RuleId::WhereClause) {
        Some(w) => {
            let expr_node = w.children().into_iter().next().ok_or_else(|| missing(&w, "WHERE predicate"))?;
            Some(create_expression(&expr_node, true)?)
        }
        None => None,
    };

    Ok(Update {
        database,
        table,
        alias,
        assignments,
        where_clause,
    })
}

fn build_delete<N: CstNode>(node: &N) -> FactoryResult<Delete> {
    let names = collect_name_children(node);
    let has_as = navigator::has_terminal_child(node, TokenKind::As);
    let (database, table, alias) = resolve_table_and_alias(node, &names, has_as)?;

    let where_clause = match navigator::find_non_terminal_child(node, RuleId::WhereClause) {
        Some(w) => {
            let expr_node = w.children().into_iter().next().ok_or_else(|| missing(&w, "WHERE predicate"))?;
            Some(create_expression(&expr_node, true)?)
        }
        None => None,
    };

    Ok(Delete {
        database,
        table,
        alias,
        where_clause,
    })
}

// -------------------------------------------------------------------- TCL

fn build_begin<N: CstNode>(node: &N) -> FactoryResult<BeginTransaction> {
    let names = collect_name_children(node);
    Ok(BeginTransaction {
        name: names.first().map(normalize_name).transpose()?,
    })
}

/// The same-slot bug reproduction (`spec.md` §9, `DESIGN.md`): when exactly
/// one identifier is present there is no way to tell, from the parse tree
/// alone, whether it named the transaction or the savepoint, so both
/// fields receive it.
fn build_rollback<N: CstNode>(node: &N) -> FactoryResult<RollbackTransaction> {
    let names = collect_name_children(node);
    match names.len() {
        0 => Ok(RollbackTransaction {
            transaction_name: None,
            savepoint_name: None,
        }),
        1 => {
            let n = normalize_name(&names[0])?;
            Ok(RollbackTransaction {
                transaction_name: Some(n.clone()),
                savepoint_name: Some(n),
            })
        }
        2 => Ok(RollbackTransaction {
            transaction_name: Some(normalize_name(&names[0])?),
            savepoint_name: Some(normalize_name(&names[1])?),
        }),
        _ => Err(unsupported_stmt(node)),
    }
}

fn build_savepoint<N: CstNode>(node: &N) -> FactoryResult<Savepoint> {
    let names = collect_name_children(node);
    let name = names.first().map(normalize_name).transpose()?.ok_or_else(|| missing(node, "savepoint name"))?;
    Ok(Savepoint { name })
}

fn build_release<N: CstNode>(node: &N) -> FactoryResult<Release> {
    let names = collect_name_children(node);
    let name = names.first().map(normalize_name).transpose()?.ok_or_else(|| missing(node, "savepoint name"))?;
    Ok(Release { name })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlfront_cst::testing::MockNode;
    use sqlfront_cst::TokenKind as Tok;
    use sqlfront_ir::{ColumnReference, Variant};

    fn with_clause(attrs: Vec<(&str, MockNode)>) -> MockNode {
        let list = MockNode::rule(RuleId::AttributeList).with_children(
            attrs
                .into_iter()
                .map(|(k, v)| MockNode::rule(RuleId::Attribute).push(MockNode::identifier(k, 1, 1)).push(v)),
        );
        MockNode::rule(RuleId::WithClause).push(list)
    }

    #[test]
    fn create_database_with_cipher_attributes() {
        let node = MockNode::rule(RuleId::CreateDatabaseStmt)
            .push(MockNode::identifier("my_db", 1, 1))
            .push(with_clause(vec![
                ("CIPHER_ID", MockNode::string_literal("'aes128'", 1, 1)),
                ("CIPHER_KEY_SEED", MockNode::string_literal("'seed'", 1, 1)),
            ]));
        let req = create_request(&node).unwrap();
        assert_eq!(
            req,
            Request::CreateDatabase(CreateDatabase {
                name: "MY_DB".to_string(),
                temporary: false,
                cipher_id: Some(Expression::Constant(Variant::String("aes128".to_string()))),
                cipher_key_seed: Some(Expression::Constant(Variant::String("seed".to_string()))),
                attributes: Vec::new(),
            })
        );
    }

    #[test]
    fn insert_with_typed_values() {
        let values = MockNode::rule(RuleId::ValueGroup)
            .push(MockNode::number_literal("1", 1, 1))
            .push(MockNode::string_literal("'Bill'", 1, 1))
            .push(MockNode::terminal(Tok::True, "true", 1, 1))
            .push(MockNode::terminal(Tok::Null, "NULL", 1, 1));
        let node = MockNode::rule(RuleId::InsertStmt)
            .push(MockNode::identifier("my_db", 1, 1))
            .push(MockNode::identifier("my_table", 1, 1))
            .push(
                MockNode::rule(RuleId::ColumnNameList)
                    .push(MockNode::identifier("col0", 1, 1))
                    .push(MockNode::identifier("col1", 1, 1))
                    .push(MockNode::identifier("col2", 1, 1))
                    .push(MockNode::identifier("col3", 1, 1)),
            )
            .push(MockNode::rule(RuleId::ValueGroupList).push(values));
        let req = create_request(&node).unwrap();
        assert_eq!(
            req,
            Request::Insert(Insert {
                database: Some("MY_DB".to_string()),
                table: "MY_TABLE".to_string(),
                columns: vec!["COL0".into(), "COL1".into(), "COL2".into(), "COL3".into()],
                values: vec![vec![
                    Expression::Constant(Variant::UInt8(1)),
                    Expression::Constant(Variant::String("Bill".to_string())),
                    Expression::Constant(Variant::Bool(true)),
                    Expression::Constant(Variant::Null),
                ]],
            })
        );
    }

    #[test]
    fn select_where_is_not_null() {
        let where_clause = MockNode::rule(RuleId::WhereClause).push(
            MockNode::rule(RuleId::Expr)
                .push(MockNode::identifier("c1", 1, 1))
                .push(MockNode::terminal(Tok::Is, "IS", 1, 1))
                .push(MockNode::terminal(Tok::Not, "NOT", 1, 1))
                .push(MockNode::terminal(Tok::Null, "NULL", 1, 1)),
        );
        let core = MockNode::rule(RuleId::SelectCore)
            .push(MockNode::rule(RuleId::ResultColumn).push(MockNode::identifier("c1", 1, 1)))
            .push(MockNode::rule(RuleId::FromClause).push(MockNode::identifier("t1", 1, 1)))
            .push(where_clause);
        let node = MockNode::rule(RuleId::SelectStmt).push(core);
        let req = create_request(&node).unwrap();
        match req {
            Request::Select(s) => {
                assert_eq!(
                    s.where_clause,
                    Some(Expression::Is {
                        is_not: true,
                        left: Box::new(Expression::SingleColumnReference(ColumnReference::new("", "C1"))),
                        right: Box::new(Expression::Constant(Variant::Null)),
                    })
                );
            }
            other => panic!("expected Select, got {other:?}"),
        }
    }

    #[test]
    fn select_not_between() {
        let between = MockNode::rule(RuleId::BetweenExpr)
            .push(MockNode::identifier("a", 1, 1))
            .push(MockNode::terminal(Tok::Not, "NOT", 1, 1))
            .push(MockNode::number_literal("10", 1, 1))
            .push(MockNode::number_literal("100", 1, 1));
        let core = MockNode::rule(RuleId::SelectCore)
            .push(MockNode::rule(RuleId::ResultColumn).push(MockNode::identifier("a", 1, 1)))
            .push(MockNode::rule(RuleId::FromClause).push(MockNode::identifier("t", 1, 1)))
            .push(MockNode::rule(RuleId::WhereClause).push(between));
        let node = MockNode::rule(RuleId::SelectStmt).push(core);
        let req = create_request(&node).unwrap();
        match req {
            Request::Select(s) => assert_eq!(
                s.where_clause,
                Some(Expression::Between {
                    not_between: true,
                    value: Box::new(Expression::SingleColumnReference(ColumnReference::new("", "A"))),
                    low: Box::new(Expression::Constant(Variant::UInt8(10))),
                    high: Box::new(Expression::Constant(Variant::UInt8(100))),
                })
            ),
            other => panic!("expected Select, got {other:?}"),
        }
    }

    #[test]
    fn select_limit_comma_form_reverses_order() {
        let limit_expr = MockNode::rule(RuleId::Expr)
            .push(MockNode::number_literal("10", 1, 1))
            .push(MockNode::terminal(Tok::Plus, "+", 1, 1))
            .push(MockNode::number_literal("2", 1, 1));
        let core = MockNode::rule(RuleId::SelectCore)
            .push(MockNode::rule(RuleId::ResultColumn).push(MockNode::identifier("c1", 1, 1)))
            .push(MockNode::rule(RuleId::FromClause).push(MockNode::identifier("t1", 1, 1)))
            .push(
                MockNode::rule(RuleId::LimitClause)
                    .push(limit_expr)
                    .push(MockNode::number_literal("10", 1, 1)),
            );
        let node = MockNode::rule(RuleId::SelectStmt).push(core);
        let req = create_request(&node).unwrap();
        match req {
            Request::Select(s) => {
                assert_eq!(
                    s.offset,
                    Some(Expression::Binary {
                        op: sqlfront_ir::BinaryOperator::Add,
                        left: Box::new(Expression::Constant(Variant::UInt8(10))),
                        right: Box::new(Expression::Constant(Variant::UInt8(2))),
                    })
                );
                assert_eq!(s.limit, Some(Expression::Constant(Variant::UInt8(10))));
            }
            other => panic!("expected Select, got {other:?}"),
        }
    }

    #[test]
    fn add_user_token_with_hex_literal_and_attributes() {
        let add_token = MockNode::rule(RuleId::AddTokenClause)
            .push(MockNode::identifier("tk", 1, 1))
            .push(MockNode::terminal(Tok::HexLiteral, "x'0123456789'", 1, 1))
            .push(with_clause(vec![
                ("EXPIRATION_TIMESTAMP", MockNode::string_literal("'2021-01-01 12:21:25'", 1, 1)),
                ("DESCRIPTION", MockNode::string_literal("'my token'", 1, 1)),
            ]));
        let node = MockNode::rule(RuleId::AlterUserStmt)
            .push(MockNode::identifier("u", 1, 1))
            .push(add_token);
        let req = create_request(&node).unwrap();
        assert_eq!(
            req,
            Request::AddUserToken(AddUserToken {
                user: "U".to_string(),
                name: "TK".to_string(),
                value: Some(Expression::Constant(Variant::Binary(vec![0x01, 0x23, 0x45, 0x67, 0x89]))),
                expiration: Some(Expression::Constant(Variant::String("2021-01-01 12:21:25".to_string()))),
                description: Some(Expression::Constant(Variant::String("my token".to_string()))),
            })
        );
    }

    #[test]
    fn insert_with_column_reference_in_values_is_rejected() {
        let values = MockNode::rule(RuleId::ValueGroup).push(
            MockNode::rule(RuleId::ColumnRef)
                .push(MockNode::identifier("tableName", 1, 1))
                .push(MockNode::identifier("columnName", 1, 1)),
        );
        let node = MockNode::rule(RuleId::InsertStmt)
            .push(MockNode::identifier("t", 1, 1))
            .push(MockNode::rule(RuleId::ColumnNameList).push(MockNode::identifier("c", 1, 1)))
            .push(MockNode::rule(RuleId::ValueGroupList).push(values));
        let err = create_request(&node).unwrap_err();
        assert!(matches!(err, FactoryError::ColumnNotAllowedHere { .. }));
    }

    #[test]
    fn insert_odd_hex_literal_is_rejected() {
        let values = MockNode::rule(RuleId::ValueGroup).push(MockNode::terminal(Tok::HexLiteral, "x'abcdef1'", 1, 1));
        let node = MockNode::rule(RuleId::InsertStmt)
            .push(MockNode::identifier("t", 1, 1))
            .push(MockNode::rule(RuleId::ColumnNameList).push(MockNode::identifier("c", 1, 1)))
            .push(MockNode::rule(RuleId::ValueGroupList).push(values));
        let err = create_request(&node).unwrap_err();
        assert!(matches!(err, FactoryError::OddHexLiteral { .. }));
    }

    #[test]
    fn insert_invalid_hex_digit_is_rejected() {
        let values = MockNode::rule(RuleId::ValueGroup).push(MockNode::terminal(Tok::HexLiteral, "x'abcdefg'", 1, 1));
        let node = MockNode::rule(RuleId::InsertStmt)
            .push(MockNode::identifier("t", 1, 1))
            .push(MockNode::rule(RuleId::ColumnNameList).push(MockNode::identifier("c", 1, 1)))
            .push(MockNode::rule(RuleId::ValueGroupList).push(values));
        let err = create_request(&node).unwrap_err();
        assert!(matches!(err, FactoryError::InvalidHexDigit { .. }));
    }

    #[test]
    fn rollback_reproduces_same_slot_bug() {
        let node = MockNode::rule(RuleId::RollbackStmt).push(MockNode::identifier("foo", 1, 1));
        let req = create_request(&node).unwrap();
        assert_eq!(
            req,
            Request::RollbackTransaction(RollbackTransaction {
                transaction_name: Some("FOO".to_string()),
                savepoint_name: Some("FOO".to_string()),
            })
        );
    }

    #[test]
    fn drop_user_reads_if_exists_directly() {
        let node = MockNode::rule(RuleId::DropUserStmt)
            .push(MockNode::identifier("u", 1, 1))
            .push(MockNode::rule(RuleId::IfExistsClause));
        let req = create_request(&node).unwrap();
        assert_eq!(
            req,
            Request::DropUser(DropUser {
                name: "U".to_string(),
                if_exists: true,
            })
        );
    }

    #[test]
    fn grant_with_grant_option() {
        let target = MockNode::rule(RuleId::PermissionTarget)
            .push(MockNode::identifier("db", 1, 1))
            .push(MockNode::identifier("tbl", 1, 1));
        let list = MockNode::rule(RuleId::PermissionList)
            .push(MockNode::terminal(Tok::Select, "SELECT", 1, 1))
            .push(MockNode::terminal(Tok::Insert, "INSERT", 1, 1));
        let node = MockNode::rule(RuleId::GrantStmt)
            .push(list)
            .push(target)
            .push(MockNode::identifier("alice", 1, 1))
            .push(MockNode::terminal(Tok::GrantOption, "WITH GRANT OPTION", 1, 1));
        let req = create_request(&node).unwrap();
        assert_eq!(
            req,
            Request::GrantPermissionsForTable(GrantPermissionsForTable {
                user: "ALICE".to_string(),
                target: PermissionTarget::Table {
                    database: "DB".to_string(),
                    table: "TBL".to_string(),
                },
                permissions: PermissionMask::SELECT.union(PermissionMask::INSERT),
                with_grant_option: true,
            })
        );
    }

    #[test]
    fn show_databases_has_no_fields() {
        let node = MockNode::rule(RuleId::ShowDatabasesStmt);
        assert_eq!(create_request(&node).unwrap(), Request::ShowDatabases(ShowDatabases));
    }

    #[test]
    fn alter_user_set_attributes() {
        let set_clause = MockNode::rule(RuleId::SetUserAttrClause)
            .push(with_clause(vec![("DESCRIPTION", MockNode::string_literal("'updated'", 1, 1))]));
        let node = MockNode::rule(RuleId::AlterUserStmt)
            .push(MockNode::identifier("u", 1, 1))
            .push(set_clause);
        let req = create_request(&node).unwrap();
        assert_eq!(
            req,
            Request::SetUserAttributes(SetUserAttributes {
                name: "U".to_string(),
                attributes: vec![Attribute {
                    key: "DESCRIPTION".to_string(),
                    value: Expression::Constant(Variant::String("updated".to_string())),
                }],
            })
        );
    }
}
