use super::*;

#[test]
fn parses_strict_comparison_over_path() {
    let e = parse_expr("variables.hasKey === true").unwrap();
    assert_eq!(
        e,
        Expr::Binary {
            op: BinaryOp::StrictEq,
            left: Box::new(Expr::Path(vec!["variables".to_owned(), "hasKey".to_owned()])),
            right: Box::new(Expr::Lit(Lit::Bool(true))),
        }
    );
}

#[test]
fn and_binds_tighter_than_or() {
    let e = parse_expr("a || b && c").unwrap();
    match e {
        Expr::Binary {
            op: BinaryOp::Or,
            right,
            ..
        } => assert!(matches!(
            *right,
            Expr::Binary {
                op: BinaryOp::And,
                ..
            }
        )),
        other => panic!("unexpected ast: {other:?}"),
    }
}

#[test]
fn parses_arithmetic_precedence() {
    let e = parse_expr("1 + 2 * 3 >= 7").unwrap();
    match e {
        Expr::Binary {
            op: BinaryOp::Ge,
            left,
            ..
        } => assert!(matches!(
            *left,
            Expr::Binary {
                op: BinaryOp::Add,
                ..
            }
        )),
        other => panic!("unexpected ast: {other:?}"),
    }
}

#[test]
fn parses_ternary_and_unary() {
    let e = parse_expr("!a ? -1 : 'x'").unwrap();
    assert!(matches!(e, Expr::Conditional { .. }));
}

#[test]
fn rejects_calls_and_trailing_tokens() {
    assert!(parse_expr("alert(1)").is_err());
    assert!(parse_expr("variables.open()").is_err());
    assert!(parse_expr("a b").is_err());
    assert!(parse_expr("(a").is_err());
    assert!(parse_expr("").is_err());
    assert!(parse_expr("1.x").is_err());
}

#[test]
fn rejects_runaway_nesting() {
    let deep = format!("{}1{}", "(".repeat(200), ")".repeat(200));
    let err = parse_expr(&deep).unwrap_err();
    assert!(err.message.contains("nests too deeply"));
    let bangs = format!("{}true", "!".repeat(200));
    assert!(parse_expr(&bangs).is_err());
}

#[test]
fn long_operator_chains_count_toward_depth() {
    let sum = vec!["a"; 10_000].join("+");
    let err = parse_expr(&sum).unwrap_err();
    assert!(err.message.contains("nests too deeply"));

    let all = vec!["x"; 10_000].join(" && ");
    assert!(parse_expr(&all).is_err());

    let mixed = (0..5_000).map(|_| "a * b").collect::<Vec<_>>().join(" - ");
    assert!(parse_expr(&mixed).is_err());
}

#[test]
fn realistic_chains_still_parse() {
    let flags = (0..20)
        .map(|i| format!("variables.flag{i}"))
        .collect::<Vec<_>>()
        .join(" && ");
    assert!(parse_expr(&flags).is_ok());
    assert!(parse_expr("(a + b) * (c - d) > 3 && !(e || f) ? 1 : 2").is_ok());
}
