//! Unit tests for the template and condition parsers

use persona_core::ast::*;
use persona_parser::*;

// =============================================================================
// Template Parser Tests
// =============================================================================

#[test]
fn test_parse_mixed_template() {
    let template = TemplateParser::parse("Hi {%name%}, {if(%vip%){VIP %name%}{Guest}} bye");
    assert_eq!(template.referenced_names(), vec!["name", "vip"]);
    assert_eq!(template.nodes.len(), 5);
    assert_eq!(template.nodes[4], TemplateNode::text(" bye"));
}

#[test]
fn test_parse_text_is_verbatim_after_malformed_block() {
    let source = "{if(%a%){x}";
    let template = TemplateParser::parse(source);
    assert_eq!(template.nodes, vec![TemplateNode::text(source)]);
}

#[test]
fn test_parse_adjacent_references() {
    let template = TemplateParser::parse("{%a%}{%b%}");
    assert_eq!(
        template.nodes,
        vec![TemplateNode::reference("a"), TemplateNode::reference("b")]
    );
}

#[test]
fn test_parse_unicode_text() {
    let template = TemplateParser::parse("Grüße {%name%} ✓");
    assert_eq!(
        template.nodes,
        vec![
            TemplateNode::text("Grüße "),
            TemplateNode::reference("name"),
            TemplateNode::text(" ✓"),
        ]
    );
}

#[test]
fn test_lexer_spans_cover_source() {
    let source = "a {%b%} {if(%c%){d}}";
    let rebuilt: String = TemplateLexer::new(source)
        .map(|token| &source[token.span.start..token.span.end])
        .collect();
    assert_eq!(rebuilt, source);
}

// =============================================================================
// Condition Parser Tests
// =============================================================================

#[test]
fn test_parse_condition_keywords_case_insensitive() {
    let expr = ConditionParser::parse("true and false Or true").unwrap();
    assert_eq!(expr.to_string(), "((true AND false) OR true)");
}

#[test]
fn test_parse_condition_with_quoted_spaces() {
    let expr = ConditionParser::parse(r#"city == "New York""#).unwrap();
    assert_eq!(
        expr,
        ConditionExpr::compare(Operand::Attribute("city".into()), CompareOp::Eq, "New York")
    );
}

#[test]
fn test_parse_condition_operators_without_spaces() {
    let expr = ConditionParser::parse(r#"("silver"=="silver") AND ("gold"=="platinum")"#).unwrap();
    assert_eq!(
        expr.to_string(),
        r#"("silver" == "silver" AND "gold" == "platinum")"#
    );
}

#[test]
fn test_parse_condition_errors() {
    assert!(matches!(ConditionParser::parse(""), Err(ParseError::EmptyCondition)));
    assert!(matches!(
        ConditionParser::parse("(true"),
        Err(ParseError::UnbalancedParentheses(_))
    ));
    assert!(matches!(
        ConditionParser::parse(r#"name == "open"#),
        Err(ParseError::UnterminatedLiteral(_))
    ));
    assert!(matches!(
        ConditionParser::parse("true XOR false"),
        Err(ParseError::UnexpectedToken { .. })
    ));
}

#[test]
fn test_tokenizer_output() {
    let tokens: Vec<ConditionToken> = ConditionTokenizer::tokenize(r#"(a!="b c")"#)
        .unwrap()
        .into_iter()
        .map(|s| s.token)
        .collect();
    assert_eq!(
        tokens,
        vec![
            ConditionToken::LParen,
            ConditionToken::Word("a".into()),
            ConditionToken::Ne,
            ConditionToken::Quoted("b c".into()),
            ConditionToken::RParen,
        ]
    );
}
