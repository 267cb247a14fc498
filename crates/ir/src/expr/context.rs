// Copyright (c) 2026 the sqlfront authors
//
// Licensed under the MIT License or Apache License 2.0
// See LICENSE files for details

//! The evaluation context: the single capability `validate`/`evaluate` need
//! from the outside world. Grounded in the shape of the original engine's
//! dataset resolver (`(table, column) -> index`, `index -> value`), but
//! synchronous and minimal since name resolution and catalog I/O are both
//! out of scope here.

use crate::column_type::ColumnDataType;
use crate::variant::Variant;

/// Supplies resolved values for column references during `validate` and
/// `evaluate`. A real executor resolves `(table_name, column_name)` to
/// `(table_index, column_index)` ahead of time (see
/// [`crate::expr::ColumnReference::resolved`]) and then answers
/// `value_at`/`column_type_at` for those indices.
pub trait EvaluationContext {
    fn value_at(&self, table_index: usize, column_index: usize) -> Option<Variant>;
    fn column_type_at(&self, table_index: usize, column_index: usize) -> Option<ColumnDataType>;
}

/// A context that resolves nothing. Used by factory tests and anywhere a
/// tree is built and validated/evaluated without a live dataset.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEvaluationContext;

impl EvaluationContext for NullEvaluationContext {
    fn value_at(&self, _table_index: usize, _column_index: usize) -> Option<Variant> {
        None
    }

    fn column_type_at(&self, _table_index: usize, _column_index: usize) -> Option<ColumnDataType> {
        None
    }
}
