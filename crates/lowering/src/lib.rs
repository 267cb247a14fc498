// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! # sqlfront-lowering
//!
//! The expression factory and the request factory: the two translators
//! from an external parse tree (`sqlfront-cst::CstNode`) to this front
//! end's typed, validated request records (`sqlfront-ir::Request`), with
//! embedded expression trees (`sqlfront-ir::Expression`) wherever a clause
//! admits one.
//!
//! ```text
//! SQL text --(external parser)--> parse tree --(this crate)--> Request
//! ```
//!
//! Every failure here is fatal to the enclosing `create_expression`/
//! `create_request` call (`spec.md` §7): there is no partial result and no
//! placeholder node, unlike the CST→IR lowering model this crate's
//! ancestor used for an LSP's graceful degradation. See `error.rs` and
//! `DESIGN.md`.

pub mod error;
pub mod expr_factory;
pub mod request_factory;

pub use error::{FactoryError, FactoryResult};
pub use expr_factory::create_expression;
pub use request_factory::{create_request, create_request_at};
