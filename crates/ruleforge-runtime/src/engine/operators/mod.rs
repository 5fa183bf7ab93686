//! Operator execution modules
//!
//! This module contains the implementation of comparison evaluation for the
//! evaluator.

mod comparison;

pub(crate) use comparison::execute_compare;
