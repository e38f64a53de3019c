//! Sandboxed condition expressions for choice visibility.
//!
//! The grammar is a small side-effect-free subset of script expressions: literals, dotted
//! variable paths, unary/binary operators and `?:`. There are no calls, no assignment and no
//! access to anything but the variable map handed to evaluation.

pub(crate) mod ast;
pub(crate) mod condition;
pub(crate) mod error;
pub(crate) mod eval;
pub(crate) mod lexer;
pub(crate) mod parser;
