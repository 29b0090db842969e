//! Access evaluation
//!
//! Allow/deny decisions for members and visitors, with the late-fine side
//! effect applied atomically.

pub mod evaluator;

pub use evaluator::evaluate;
