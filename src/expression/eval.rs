use crate::expression::ast::{BinaryOp, Expr, Lit, UnaryOp};
use crate::scene::variables::{VarValue, Variables};

/// Runtime value of a condition sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Value {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Arrays and objects. Only identity-free truthiness is observable.
    Opaque(serde_json::Value),
}

impl Value {
    pub(crate) fn truthy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Opaque(_) => true,
        }
    }

    fn to_number(&self) -> f64 {
        match self {
            Self::Undefined | Self::Opaque(_) => f64::NAN,
            Self::Null => 0.0,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    0.0
                } else {
                    s.parse().unwrap_or(f64::NAN)
                }
            }
        }
    }

    fn to_text(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_owned(),
            Self::Null => "null".to_owned(),
            Self::Bool(b) => b.to_string(),
            Self::Number(n) => number_to_text(*n),
            Self::Text(s) => s.clone(),
            Self::Opaque(v) => match v {
                serde_json::Value::Array(items) => items
                    .iter()
                    .map(|i| Value::from_json(i).to_text())
                    .collect::<Vec<_>>()
                    .join(","),
                _ => "[object Object]".to_owned(),
            },
        }
    }

    fn from_var(v: &VarValue) -> Self {
        match v {
            VarValue::Null => Self::Null,
            VarValue::Bool(b) => Self::Bool(*b),
            VarValue::Number(n) => Self::Number(*n),
            VarValue::Text(s) => Self::Text(s.clone()),
            VarValue::Other(j) => Self::from_json(j),
        }
    }

    fn from_json(v: &serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::Text(s.clone()),
            other => Self::Opaque(other.clone()),
        }
    }
}

fn number_to_text(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_owned()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned()
    } else if n == n.trunc() && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

pub(crate) fn eval(expr: &Expr, vars: &Variables) -> Value {
    match expr {
        Expr::Lit(l) => match l {
            Lit::Number(n) => Value::Number(*n),
            Lit::Bool(b) => Value::Bool(*b),
            Lit::Str(s) => Value::Text(s.clone()),
            Lit::Null => Value::Null,
            Lit::Undefined => Value::Undefined,
        },
        Expr::Path(segs) => lookup(segs, vars),
        Expr::Unary { op, expr } => {
            let v = eval(expr, vars);
            match op {
                UnaryOp::Neg => Value::Number(-v.to_number()),
                UnaryOp::Not => Value::Bool(!v.truthy()),
            }
        }
        Expr::Conditional {
            cond,
            then,
            otherwise,
        } => {
            if eval(cond, vars).truthy() {
                eval(then, vars)
            } else {
                eval(otherwise, vars)
            }
        }
        Expr::Binary { op, left, right } => match op {
            BinaryOp::And => {
                let l = eval(left, vars);
                if l.truthy() { eval(right, vars) } else { l }
            }
            BinaryOp::Or => {
                let l = eval(left, vars);
                if l.truthy() { l } else { eval(right, vars) }
            }
            _ => {
                let l = eval(left, vars);
                let r = eval(right, vars);
                binary(*op, &l, &r)
            }
        },
    }
}

fn binary(op: BinaryOp, l: &Value, r: &Value) -> Value {
    match op {
        BinaryOp::Add => match (l, r) {
            (Value::Text(_) | Value::Opaque(_), _) | (_, Value::Text(_) | Value::Opaque(_)) => {
                Value::Text(format!("{}{}", l.to_text(), r.to_text()))
            }
            _ => Value::Number(l.to_number() + r.to_number()),
        },
        BinaryOp::Sub => Value::Number(l.to_number() - r.to_number()),
        BinaryOp::Mul => Value::Number(l.to_number() * r.to_number()),
        BinaryOp::Div => Value::Number(l.to_number() / r.to_number()),
        BinaryOp::Mod => Value::Number(l.to_number() % r.to_number()),
        BinaryOp::StrictEq => Value::Bool(strict_eq(l, r)),
        BinaryOp::StrictNe => Value::Bool(!strict_eq(l, r)),
        BinaryOp::LooseEq => Value::Bool(loose_eq(l, r)),
        BinaryOp::LooseNe => Value::Bool(!loose_eq(l, r)),
        BinaryOp::Lt => Value::Bool(compare(l, r, |o| o.is_lt())),
        BinaryOp::Le => Value::Bool(compare(l, r, |o| o.is_le())),
        BinaryOp::Gt => Value::Bool(compare(l, r, |o| o.is_gt())),
        BinaryOp::Ge => Value::Bool(compare(l, r, |o| o.is_ge())),
        // Short-circuit operators never reach here.
        BinaryOp::And | BinaryOp::Or => Value::Undefined,
    }
}

fn strict_eq(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Text(a), Value::Text(b)) => a == b,
        // Objects are compared by identity; two separately evaluated lookups never share one.
        _ => false,
    }
}

fn loose_eq(l: &Value, r: &Value) -> bool {
    match (l, r) {
        (Value::Undefined | Value::Null, Value::Undefined | Value::Null) => true,
        (Value::Undefined | Value::Null, _) | (_, Value::Undefined | Value::Null) => false,
        (Value::Opaque(_), _) | (_, Value::Opaque(_)) => false,
        (Value::Text(a), Value::Text(b)) => a == b,
        _ => l.to_number() == r.to_number(),
    }
}

fn compare(l: &Value, r: &Value, pick: impl Fn(std::cmp::Ordering) -> bool) -> bool {
    if let (Value::Text(a), Value::Text(b)) = (l, r) {
        return pick(a.cmp(b));
    }
    l.to_number()
        .partial_cmp(&r.to_number())
        .is_some_and(pick)
}

fn lookup(segs: &[String], vars: &Variables) -> Value {
    let rest = match segs.split_first() {
        Some((head, rest)) if head == "variables" => {
            if rest.is_empty() {
                return Value::Opaque(serde_json::Value::Object(Default::default()));
            }
            rest
        }
        _ => segs,
    };
    let Some((name, tail)) = rest.split_first() else {
        return Value::Undefined;
    };
    let Some(var) = vars.get(name) else {
        return Value::Undefined;
    };
    if tail.is_empty() {
        return Value::from_var(var);
    }
    let VarValue::Other(mut cur) = var.clone() else {
        return Value::Undefined;
    };
    for seg in tail {
        let next = match &cur {
            serde_json::Value::Object(m) => m.get(seg).cloned(),
            serde_json::Value::Array(a) if seg == "length" => Some(a.len().into()),
            serde_json::Value::Array(a) => {
                seg.parse::<usize>().ok().and_then(|i| a.get(i).cloned())
            }
            _ => None,
        };
        let Some(next) = next else {
            return Value::Undefined;
        };
        cur = next;
    }
    Value::from_json(&cur)
}

#[cfg(test)]
#[path = "../../tests/unit/expression/eval.rs"]
mod tests;
