use std::sync::Arc;

use super::*;
use crate::error::CompileErrorKind;
use crate::placeholder::PlaceholderRegistry;

fn builtin_compiler() -> Compiler {
    Compiler::new(Arc::new(PlaceholderRegistry::builtin()))
}

#[test]
fn test_blog_template_pattern() {
    let route = builtin_compiler().compile("/blog/(id:digit)").unwrap();
    assert_eq!(route.match_pattern(), "/blog/(?P<id>[0-9]+)");

    let token = &route.tokens()[0];
    assert_eq!(token.name(), &PlaceholderName::Named("id".to_string()));
    assert_eq!(token.key(), "id");
    assert_eq!(token.type_name(), "digit");
    assert_eq!(token.quantifier(), Quantifier::Implicit);
    assert_eq!(token.raw_quantifier(), "");
    assert_eq!(token.literal(), "(id:digit)");
}

#[test]
fn test_implicit_repetition_equals_plus() {
    let compiler = builtin_compiler();
    let implicit = compiler.compile("/a/(id:alpha)").unwrap();
    let explicit = compiler.compile("/a/(id:alpha:+)").unwrap();
    assert_eq!(implicit.match_pattern(), explicit.match_pattern());
    assert_eq!(implicit.match_pattern(), "/a/(?P<id>[a-zA-Z]+)");
}

#[test]
fn test_quantifier_forms() {
    let compiler = builtin_compiler();
    let cases = [
        ("(id:digit:3,5)", "(?P<id>[0-9]{3,5})"),
        ("(id:digit:,5)", "(?P<id>[0-9]{1,5})"),
        ("(id:digit:3,)", "(?P<id>[0-9]{3,})"),
        ("(id:digit:3)", "(?P<id>[0-9]{3})"),
        ("(id:digit:,)", "(?P<id>[0-9]{1,})"),
        ("(id:digit:*)", "(?P<id>[0-9]*)"),
        ("(id:digit:?)", "(?P<id>[0-9]?)"),
    ];
    for (template, expected) in cases {
        let route = compiler.compile(template).unwrap();
        assert_eq!(route.match_pattern(), expected, "template {template}");
    }
}

#[test]
fn test_fixed_shape_ignores_quantifier() {
    let compiler = builtin_compiler();
    let with = compiler.compile("/(y:year:5)").unwrap();
    let without = compiler.compile("/(y:year)").unwrap();
    assert_eq!(with.match_pattern(), without.match_pattern());
    assert_eq!(with.tokens()[0].quantifier(), Quantifier::Implicit);
    assert_eq!(with.tokens()[0].raw_quantifier(), "5");
}

#[test]
fn test_positional_names_count_unnamed_only() {
    let route = builtin_compiler()
        .compile("/(:digit)/(name:alpha)/(:alpha)")
        .unwrap();
    let names: Vec<&PlaceholderName> = route.tokens().iter().map(|t| t.name()).collect();
    assert_eq!(
        names,
        vec![
            &PlaceholderName::Position(1),
            &PlaceholderName::Named("name".to_string()),
            &PlaceholderName::Position(2),
        ]
    );
    assert_eq!(route.match_pattern(), "/([0-9]+)/(?P<name>[a-zA-Z]+)/([a-zA-Z]+)");
}

#[test]
fn test_type_names_case_insensitive() {
    let route = builtin_compiler().compile("/(id:DIGIT)").unwrap();
    let token = &route.tokens()[0];
    assert_eq!(token.type_name(), "DIGIT");
    assert_eq!(token.placeholder_type().name(), "digit");
}

#[test]
fn test_unknown_type_rejected() {
    let registry = Arc::new(PlaceholderRegistry::builtin());
    let compiler = Compiler::new(Arc::clone(&registry));
    let err = compiler.compile("/x/(x:notatype)").unwrap_err();
    assert_eq!(err.template, "/x/(x:notatype)");
    assert_eq!(err.token, "(x:notatype)");
    assert_eq!(
        err.kind,
        CompileErrorKind::UnknownType {
            type_name: "notatype".to_string()
        }
    );
    assert_eq!(registry.len(), 13);
    assert!(!registry.contains("notatype"));
}

#[test]
fn test_malformed_tokens_rejected() {
    let compiler = builtin_compiler();
    for template in ["/a/(id-x:digit)", "/a/(id:digit:abc)", "/a/(id:)", "/a/(id:digit:3:4)"] {
        let err = compiler.compile(template).unwrap_err();
        assert_eq!(err.kind, CompileErrorKind::MalformedToken, "template {template}");
    }
}

#[test]
fn test_inverted_range_rejected() {
    let err = builtin_compiler().compile("/a/(id:digit:5,3)").unwrap_err();
    assert_eq!(
        err.kind,
        CompileErrorKind::InvalidQuantifier {
            quantifier: "5,3".to_string()
        }
    );
}

#[test]
fn test_error_message_names_token_and_template() {
    let err = builtin_compiler().compile("/x/(x:notatype)").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("(x:notatype)"));
    assert!(message.contains("/x/(x:notatype)"));
}

#[test]
fn test_literal_parentheses_and_metacharacters() {
    let compiler = builtin_compiler();
    let route = compiler.compile("/docs/(v1)").unwrap();
    assert!(!route.has_placeholders());

    let route = compiler.compile("/file.json/(id:digit)").unwrap();
    assert!(route.match_path("/file.json/7").is_some());
    assert!(route.match_path("/fileXjson/7").is_none());
}

#[test]
fn test_duplicate_and_digit_led_names_use_plain_groups() {
    let compiler = builtin_compiler();
    let route = compiler.compile("/(id:digit)/(id:digit)").unwrap();
    assert_eq!(route.match_pattern(), "/(?P<id>[0-9]+)/([0-9]+)");

    let route = compiler.compile("/(1st:digit)").unwrap();
    assert_eq!(route.match_pattern(), "/([0-9]+)");
    assert_eq!(route.tokens()[0].key(), "1st");
}

#[test]
fn test_custom_type_with_inner_groups() {
    let mut registry = PlaceholderRegistry::builtin();
    registry.register("pair", "([a-z])([0-9])", false).unwrap();
    let compiler = Compiler::new(Arc::new(registry));

    let route = compiler.compile("/(p:pair)/(n:digit)").unwrap();
    assert_eq!(route.tokens()[0].group, 1);
    assert_eq!(route.tokens()[1].group, 4);

    let params = route.match_path("/a1/42").unwrap();
    assert_eq!(params.get("p"), Some("a1"));
    assert_eq!(params.get("n"), Some("42"));
}

#[test]
fn test_custom_type_alternation_is_grouped() {
    let mut registry = PlaceholderRegistry::builtin();
    registry.register("ab", "a|b", true).unwrap();
    let compiler = Compiler::new(Arc::new(registry));

    let route = compiler.compile("/(x:ab:2)").unwrap();
    assert_eq!(route.match_pattern(), "/(?P<x>(?:a|b){2})");
    assert!(route.match_path("/ab").is_some());
    assert!(route.match_path("/abc").is_none());
}

#[test]
fn test_type_not_in_compiler_registry() {
    let compiler = Compiler::new(Arc::new(PlaceholderRegistry::empty()));
    let err = compiler.compile("/(id:digit)").unwrap_err();
    assert!(matches!(err.kind, CompileErrorKind::UnknownType { .. }));
}

#[test]
fn test_empty_quantifier_is_implicit() {
    let compiler = builtin_compiler();
    let route = compiler.compile("/a/(id:digit:)").unwrap();
    assert_eq!(route.match_pattern(), "/a/(?P<id>[0-9]+)");
    assert_eq!(route.tokens()[0].quantifier(), Quantifier::Implicit);
    assert_eq!(route.tokens()[0].literal(), "(id:digit:)");

    let route = compiler.compile("/(y:year:)").unwrap();
    let plain = compiler.compile("/(y:year)").unwrap();
    assert_eq!(route.match_pattern(), plain.match_pattern());
    assert_eq!(route.tokens()[0].raw_quantifier(), "");
}
