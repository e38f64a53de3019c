use crate::expression::ast::Expr;
use crate::expression::error::ExprError;
use crate::expression::eval::eval;
use crate::expression::parser::parse_expr;
use crate::scene::variables::Variables;

/// A parsed choice condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    src: String,
    expr: Expr,
}

impl Condition {
    /// Parse a condition source string.
    pub fn parse(src: &str) -> Result<Self, ExprError> {
        let expr = parse_expr(src)?;
        Ok(Self {
            src: src.to_owned(),
            expr,
        })
    }

    /// Original source text.
    pub fn source(&self) -> &str {
        &self.src
    }

    /// Evaluate against `vars` and coerce the result to a boolean.
    pub fn evaluate(&self, vars: &Variables) -> bool {
        eval(&self.expr, vars).truthy()
    }
}

/// Decide whether a choice with the given condition is shown.
///
/// Absent or blank conditions are always visible. A condition that fails to parse is also
/// treated as visible; the failure is logged and never surfaces to the caller.
pub fn is_visible(condition: Option<&str>, vars: &Variables) -> bool {
    let Some(src) = condition else {
        return true;
    };
    if src.trim().is_empty() {
        return true;
    }
    match Condition::parse(src) {
        Ok(cond) => cond.evaluate(vars),
        Err(e) => {
            tracing::warn!(condition = src, error = %e, "condition failed to parse; showing choice");
            true
        }
    }
}
