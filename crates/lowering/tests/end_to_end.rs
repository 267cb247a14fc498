// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! End-to-end scenarios: SQL-shaped mock parse trees through
//! `create_request`/`create_expression`, asserting the exact request
//! fields a statement should produce. One test per numbered scenario.

use sqlfront_cst::testing::MockNode;
use sqlfront_cst::{RuleId, TokenKind as Tok};
use sqlfront_ir::request::{AddUserToken, CreateDatabase, Insert};
use sqlfront_ir::{ColumnReference, Expression, Request, Variant};
use sqlfront_lowering::create_request;

fn with_clause(attrs: Vec<(&str, MockNode)>) -> MockNode {
    let list = MockNode::rule(RuleId::AttributeList).with_children(
        attrs
            .into_iter()
            .map(|(k, v)| MockNode::rule(RuleId::Attribute).push(MockNode::identifier(k, 1, 1)).push(v)),
    );
    MockNode::rule(RuleId::WithClause).push(list)
}

#[test]
fn scenario_1_create_database_with_cipher_attributes() {
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
fn scenario_2_insert_with_typed_values() {
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
fn scenario_3_select_where_is_not_null() {
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
    let Request::Select(s) = req else { panic!("expected Select") };
    assert_eq!(
        s.where_clause,
        Some(Expression::Is {
            is_not: true,
            left: Box::new(Expression::SingleColumnReference(ColumnReference::new("", "C1"))),
            right: Box::new(Expression::Constant(Variant::Null)),
        })
    );
}

#[test]
fn scenario_4_select_not_between() {
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
    let Request::Select(s) = req else { panic!("expected Select") };
    assert_eq!(
        s.where_clause,
        Some(Expression::Between {
            not_between: true,
            value: Box::new(Expression::SingleColumnReference(ColumnReference::new("", "A"))),
            low: Box::new(Expression::Constant(Variant::UInt8(10))),
            high: Box::new(Expression::Constant(Variant::UInt8(100))),
        })
    );
}

#[test]
fn scenario_5_alter_user_add_token_with_hex_and_attributes() {
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
fn scenario_6_select_limit_comma_form_reverses_order() {
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
    let Request::Select(s) = req else { panic!("expected Select") };
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

#[test]
fn negative_odd_hex_literal_in_insert_values() {
    use sqlfront_lowering::FactoryError;
    let values = MockNode::rule(RuleId::ValueGroup).push(MockNode::terminal(Tok::HexLiteral, "x'abcdef1'", 1, 1));
    let node = MockNode::rule(RuleId::InsertStmt)
        .push(MockNode::identifier("t", 1, 1))
        .push(MockNode::rule(RuleId::ColumnNameList).push(MockNode::identifier("c", 1, 1)))
        .push(MockNode::rule(RuleId::ValueGroupList).push(values));
    let err = create_request(&node).unwrap_err();
    assert!(matches!(err, FactoryError::OddHexLiteral { .. }));
}

#[test]
fn negative_invalid_hex_digit_in_insert_values() {
    use sqlfront_lowering::FactoryError;
    let values = MockNode::rule(RuleId::ValueGroup).push(MockNode::terminal(Tok::HexLiteral, "x'abcdefg'", 1, 1));
    let node = MockNode::rule(RuleId::InsertStmt)
        .push(MockNode::identifier("t", 1, 1))
        .push(MockNode::rule(RuleId::ColumnNameList).push(MockNode::identifier("c", 1, 1)))
        .push(MockNode::rule(RuleId::ValueGroupList).push(values));
    let err = create_request(&node).unwrap_err();
    assert!(matches!(err, FactoryError::InvalidHexDigit { .. }));
}

#[test]
fn negative_column_reference_in_insert_values_is_rejected() {
    use sqlfront_lowering::FactoryError;
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
