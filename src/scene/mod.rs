pub(crate) mod model;
pub(crate) mod validate;
pub(crate) mod variables;
