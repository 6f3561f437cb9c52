//! Rendering expressions as text.

pub mod expr;

pub use expr::pretty;
