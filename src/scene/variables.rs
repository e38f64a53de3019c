use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Narrative variable map, keyed by variable name.
pub type Variables = BTreeMap<String, VarValue>;

/// One narrative variable value as authored in JSON.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VarValue {
    /// JSON `null`.
    Null,
    /// Boolean flag.
    Bool(bool),
    /// Number.
    Number(f64),
    /// String.
    Text(String),
    /// Arrays and objects, kept opaque.
    Other(serde_json::Value),
}

impl From<bool> for VarValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for VarValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for VarValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

/// Shallow-merge `updates` into `vars`; later keys overwrite earlier ones.
pub fn assign(vars: &mut Variables, updates: &Variables) {
    for (k, v) in updates {
        vars.insert(k.clone(), v.clone());
    }
}
