use aspen_core::ast::{Expr, TokenKind};
use aspen_core::parser::{parse, parse_source};
use aspen_core::{scan_tokens, Scanner};
use proptest::prelude::*;

fn trivia() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just(" ".to_owned()),
            Just("\t".to_owned()),
            Just("\r".to_owned()),
            Just("\n".to_owned()),
            "//[^\n]*\n",
        ],
        0..16,
    )
    .prop_map(|parts| parts.concat())
}

fn literal() -> impl Strategy<Value = String> {
    prop_oneof![
        (0i64..100_000).prop_map(|n| n.to_string()),
        (0u32..1000, 0u32..100).prop_map(|(a, b)| format!("{}.{}", a, b)),
        "[a-z ]{0,6}".prop_map(|s| format!("\"{}\"", s)),
        Just("true".to_owned()),
        Just("false".to_owned()),
        Just("nil".to_owned()),
    ]
}

fn expression() -> impl Strategy<Value = String> {
    literal().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|e| format!("({})", e)),
            inner.clone().prop_map(|e| format!("!{}", e)),
            inner.clone().prop_map(|e| format!("-{}", e)),
            (
                inner.clone(),
                prop::sample::select(vec![
                    "||", "&&", "==", "!=", ">", ">=", "<", "<=", "|", "^", "&", "+", "-", "*",
                    "/",
                ]),
                inner,
            )
                .prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
        ]
    })
}

fn count_nodes(expr: &Expr) -> usize {
    match expr {
        Expr::Literal(_) => 1,
        Expr::Unary { operand, .. } => 1 + count_nodes(operand),
        Expr::Binary { left, right, .. } => 1 + count_nodes(left) + count_nodes(right),
        Expr::Grouping(inner) => 1 + count_nodes(inner),
    }
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        .. ProptestConfig::default()
    })]

    #[test]
    fn scanner_never_panics_and_ends_with_one_eof(s in ".*") {
        let output = Scanner::new(&s).scan_all();
        let tokens = output.tokens.tokens();

        prop_assert!(!tokens.is_empty());
        prop_assert_eq!(tokens[tokens.len() - 1].kind, TokenKind::Eof);
        prop_assert_eq!(tokens.iter().filter(|t| t.is_eof()).count(), 1);

        for token in tokens {
            prop_assert!(token.span.start <= token.span.end);
            prop_assert!(token.span.end <= s.len());
            prop_assert!(token.line >= 1 && token.column >= 1);
        }
        for error in &output.errors {
            prop_assert!(error.span.end <= s.len());
        }
    }

    #[test]
    fn whitespace_and_comments_scan_to_eof_only(s in trivia()) {
        let tokens = scan_tokens(&s).expect("trivia never fails to scan");

        prop_assert_eq!(tokens.kinds(), vec![TokenKind::Eof]);
    }

    #[test]
    fn two_character_operators_advance_two_columns(
        prefix in "[ ]{0,5}",
        op in prop::sample::select(vec!["!=", "==", ">=", "<=", "&&", "||"]),
    ) {
        let source = format!("{}{}1", prefix, op);
        let tokens = scan_tokens(&source).expect("operator input scans");
        let tokens = tokens.tokens();

        let start = prefix.len() as u32 + 1;
        prop_assert_eq!(tokens[0].column, start);
        prop_assert_eq!(tokens[1].column, start + 2);
        prop_assert_eq!(tokens[0].to_string(), op);
    }

    #[test]
    fn generated_expressions_parse(src in expression()) {
        let tokens = scan_tokens(&src).expect("generated source scans");
        let expr = parse(&tokens);

        prop_assert!(expr.is_ok(), "{:?} failed: {:?}", src, expr);
        let expr = expr.unwrap();
        prop_assert!(count_nodes(&expr) >= 1);
    }

    #[test]
    fn scan_and_parse_are_deterministic(s in ".{0,64}") {
        let first = parse_source(&s);
        let second = parse_source(&s);

        prop_assert_eq!(first, second);
    }
}
