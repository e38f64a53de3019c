use super::*;
use crate::expression::parser::parse_expr;

fn vars() -> Variables {
    let mut v = Variables::new();
    v.insert("hasKey".to_owned(), true.into());
    v.insert("gold".to_owned(), 12.0.into());
    v.insert("name".to_owned(), "Ada".into());
    v.insert("count".to_owned(), "3".into());
    v.insert(
        "inventory".to_owned(),
        VarValue::Other(serde_json::json!({"sword": true, "gems": [1, 2, 3]})),
    );
    v
}

fn run(src: &str) -> Value {
    eval(&parse_expr(src).unwrap(), &vars())
}

#[test]
fn resolves_prefixed_and_bare_paths() {
    assert_eq!(run("variables.hasKey"), Value::Bool(true));
    assert_eq!(run("gold"), Value::Number(12.0));
    assert_eq!(run("variables.missing"), Value::Undefined);
    assert_eq!(run("variables.inventory.sword"), Value::Bool(true));
    assert_eq!(run("inventory.gems.length"), Value::Number(3.0));
    assert_eq!(run("gold.value"), Value::Undefined);
}

#[test]
fn strict_and_loose_equality_differ() {
    assert_eq!(run("variables.count === 3"), Value::Bool(false));
    assert_eq!(run("variables.count == 3"), Value::Bool(true));
    assert_eq!(run("variables.missing == null"), Value::Bool(true));
    assert_eq!(run("variables.missing === null"), Value::Bool(false));
    assert_eq!(run("hasKey !== false"), Value::Bool(true));
    assert_eq!(run("inventory == inventory"), Value::Bool(false));
}

#[test]
fn logical_operators_return_operands() {
    assert_eq!(run("name || 'nobody'"), Value::Text("Ada".to_owned()));
    assert_eq!(run("missing || 'nobody'"), Value::Text("nobody".to_owned()));
    assert_eq!(run("gold && name"), Value::Text("Ada".to_owned()));
    assert_eq!(run("0 && name"), Value::Number(0.0));
    assert_eq!(run("!missing"), Value::Bool(true));
}

#[test]
fn arithmetic_and_concatenation() {
    assert_eq!(run("gold * 2 - 4 >= 20"), Value::Bool(true));
    assert_eq!(run("gold % 5"), Value::Number(2.0));
    assert_eq!(run("name + ' has ' + gold"), Value::Text("Ada has 12".to_owned()));
    assert_eq!(run("'a' < 'b'"), Value::Bool(true));
    assert_eq!(run("missing < 1"), Value::Bool(false));
    assert_eq!(run("gold > 10 ? 'rich' : 'poor'"), Value::Text("rich".to_owned()));
}

#[test]
fn truthiness_follows_script_rules() {
    assert!(!Value::Number(f64::NAN).truthy());
    assert!(!Value::Text(String::new()).truthy());
    assert!(Value::Opaque(serde_json::json!([])).truthy());
    assert!(!Value::Null.truthy());
    assert!(run("variables").truthy());
}
