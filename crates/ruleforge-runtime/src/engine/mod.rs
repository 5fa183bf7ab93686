//! Evaluation engine module
//!
//! Provides the tree-walking evaluator for rule expressions.

mod evaluator;
mod operators;

#[cfg(test)]
mod tests;

// Re-export for convenience
pub use evaluator::Evaluator;
