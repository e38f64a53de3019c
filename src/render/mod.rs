//! Rendered layer tree: the visual output a host draws every tick.

pub(crate) mod tree;
