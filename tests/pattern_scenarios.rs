//! End-to-end scenarios for the format-pattern parsers.
//!
//! Each scenario parses a realistic pattern through the public entry
//! points and asserts the resulting tree shape explicitly: parent kinds,
//! child kind sequences, carried values and exact source text.

use rstest::rstest;

use sheetfmt::pattern::{
    parse_color, parse_condition, parse_date, parse_date_time, parse_expression, parse_fraction,
    parse_general, parse_number, parse_text, parse_time, LeafKind, ParentKind, PatternError,
    PatternParsers, Token,
};

fn child_leaf_kinds(token: &Token) -> Vec<LeafKind> {
    token
        .as_parent()
        .expect("expected a parent token")
        .children()
        .iter()
        .filter_map(Token::leaf_kind)
        .collect()
}

#[test]
fn test_full_currency_expression() {
    let pattern = "$#,##0.00;[RED]-$#,##0.00";
    let token = parse_expression(pattern).expect("currency expression parses");

    let expression = token.as_parent().expect("expression is a parent");
    assert_eq!(expression.kind(), ParentKind::Expression);
    assert_eq!(expression.text(), pattern, "source text is preserved");

    let kinds: Vec<Option<ParentKind>> = expression
        .children()
        .iter()
        .map(Token::parent_kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(ParentKind::Number),
            None, // the clause separator
            Some(ParentKind::Color),
            Some(ParentKind::Number),
        ]
    );

    let color = expression.children()[2].as_parent().expect("color parent");
    assert_eq!(color.name_or_number().map(Token::text), Some("RED"));
}

#[test]
fn test_expression_clause_collapse() {
    let token = parse_expression("#;-#").expect("two-clause pattern parses");
    let expression = token.as_parent().expect("expression is a parent");

    // First clause is a single placeholder and collapses to its leaf;
    // the second keeps a number parent around the sign and placeholder.
    assert_eq!(expression.children().len(), 3);
    assert_eq!(
        expression.children()[0].leaf_kind(),
        Some(LeafKind::Digit)
    );
    assert_eq!(
        expression.children()[1].leaf_kind(),
        Some(LeafKind::Separator)
    );
    let second = expression.children()[2]
        .as_parent()
        .expect("second clause is a number");
    assert_eq!(second.kind(), ParentKind::Number);
    assert_eq!(
        child_leaf_kinds(&expression.children()[2]),
        vec![LeafKind::TextLiteral, LeafKind::Digit]
    );
}

#[test]
fn test_expression_with_skipped_clauses() {
    let token = parse_expression("0;;0").expect("empty middle clause is legal");
    let kinds = child_leaf_kinds(&token);
    assert_eq!(
        kinds,
        vec![
            LeafKind::DigitZero,
            LeafKind::Separator,
            LeafKind::Separator,
            LeafKind::DigitZero,
        ]
    );

    let lone = parse_expression(";").expect("a lone separator is legal");
    assert_eq!(child_leaf_kinds(&lone), vec![LeafKind::Separator]);
}

#[test]
fn test_expression_with_condition_prefix() {
    let token = parse_expression("[>=100][GREEN]0.0;[<0]-0.0").expect("conditions parse");
    let expression = token.as_parent().expect("expression parent");
    assert_eq!(
        expression.children()[0].parent_kind(),
        Some(ParentKind::ConditionGreaterThanEquals)
    );
    assert_eq!(
        expression.children()[1].parent_kind(),
        Some(ParentKind::Color)
    );
    assert_eq!(
        expression.children()[2].parent_kind(),
        Some(ParentKind::Number)
    );
    assert_eq!(
        expression.children()[4].parent_kind(),
        Some(ParentKind::ConditionLessThan)
    );
}

#[rstest]
#[case("[RED]", LeafKind::ColorName)]
#[case("[cyan]", LeafKind::ColorName)]
#[case("[COLOR 5]", LeafKind::ColorNumber)]
#[case("[Color12]", LeafKind::ColorNumber)]
fn test_color_variants(#[case] pattern: &str, #[case] expected: LeafKind) {
    let token = parse_color(pattern).expect("color parses");
    let color = token.as_parent().expect("color is a parent");
    assert_eq!(color.kind(), ParentKind::Color);
    assert_eq!(color.text(), pattern);
    assert_eq!(
        color.name_or_number().and_then(Token::leaf_kind),
        Some(expected)
    );
}

#[test]
fn test_color_number_value() {
    let token = parse_color("[COLOR 5]").expect("palette color parses");
    let color = token.as_parent().expect("color parent");
    let number = color
        .name_or_number()
        .and_then(Token::as_leaf)
        .expect("number leaf");
    assert_eq!(number.value().as_integer(), Some(5));
    assert_eq!(number.text(), "5");
}

#[rstest]
#[case("[=5]", ParentKind::ConditionEquals)]
#[case("[>5]", ParentKind::ConditionGreaterThan)]
#[case("[>=5]", ParentKind::ConditionGreaterThanEquals)]
#[case("[<5]", ParentKind::ConditionLessThan)]
#[case("[<=5]", ParentKind::ConditionLessThanEquals)]
#[case("[<>5]", ParentKind::ConditionNotEquals)]
fn test_condition_comparators(#[case] pattern: &str, #[case] expected: ParentKind) {
    let token = parse_condition(pattern).expect("condition parses");
    assert_eq!(token.parent_kind(), Some(expected));
    assert_eq!(token.text(), pattern);
}

#[rstest]
#[case("[>-1.5]", -1.5)]
#[case("[<=.5]", 0.5)]
#[case("[=100]", 100.0)]
fn test_condition_number_values(#[case] pattern: &str, #[case] expected: f64) {
    let token = parse_condition(pattern).expect("condition parses");
    let parent = token.as_parent().expect("condition parent");
    let number = parent
        .children()
        .iter()
        .find(|c| c.leaf_kind() == Some(LeafKind::ConditionNumber))
        .and_then(Token::as_leaf)
        .expect("condition number leaf");
    assert_eq!(number.value().as_decimal(), Some(expected));
}

#[rstest]
#[case("YYYY", LeafKind::Year)]
#[case("#", LeafKind::Digit)]
#[case("@", LeafKind::TextPlaceholder)]
fn test_single_component_collapses_to_leaf(#[case] pattern: &str, #[case] expected: LeafKind) {
    let parsers = PatternParsers::new().expect("builtin grammar builds");
    let token = match expected {
        LeafKind::Year => parsers.date(pattern),
        LeafKind::TextPlaceholder => parsers.text(pattern),
        _ => parsers.number(pattern),
    }
    .expect("single component parses");
    assert_eq!(token.leaf_kind(), Some(expected));
    assert_eq!(token.text(), pattern);
}

#[test]
fn test_date_pattern() {
    let token = parse_date("dd/mm/yyyy").expect("date parses");
    assert_eq!(token.parent_kind(), Some(ParentKind::Date));
    assert_eq!(
        child_leaf_kinds(&token),
        vec![
            LeafKind::Day,
            LeafKind::TextLiteral,
            LeafKind::MonthOrMinute,
            LeafKind::TextLiteral,
            LeafKind::Year,
        ]
    );
    assert_eq!(token.text(), "dd/mm/yyyy");
}

#[test]
fn test_time_pattern_with_meridiem() {
    let token = parse_time("h:mm:ss AM/PM").expect("time parses");
    assert_eq!(token.parent_kind(), Some(ParentKind::Time));
    assert_eq!(
        child_leaf_kinds(&token),
        vec![
            LeafKind::Hour,
            LeafKind::TextLiteral,
            LeafKind::MonthOrMinute,
            LeafKind::TextLiteral,
            LeafKind::Second,
            LeafKind::Whitespace,
            LeafKind::AmPm,
        ]
    );
}

#[test]
fn test_date_time_pattern() {
    let token = parse_date_time("yyyy-mm-dd hh:mm").expect("date-time parses");
    assert_eq!(token.parent_kind(), Some(ParentKind::DateTime));
    assert_eq!(token.text(), "yyyy-mm-dd hh:mm");
}

#[test]
fn test_text_pattern_with_quoted_literal() {
    let token = parse_text("\"Total: \"@").expect("text pattern parses");
    assert_eq!(token.parent_kind(), Some(ParentKind::Text));
    let parent = token.as_parent().expect("text parent");
    let quoted = parent.children()[0].as_leaf().expect("quoted leaf");
    assert_eq!(quoted.kind(), LeafKind::QuotedText);
    assert_eq!(quoted.value().as_text(), Some("Total: "));
    assert_eq!(quoted.text(), "\"Total: \"");
}

#[test]
fn test_fraction_pattern() {
    let token = parse_fraction("# ?/?").expect("fraction parses");
    assert_eq!(token.parent_kind(), Some(ParentKind::Fraction));
    assert_eq!(
        child_leaf_kinds(&token),
        vec![
            LeafKind::Digit,
            LeafKind::Whitespace,
            LeafKind::DigitSpace,
            LeafKind::FractionSymbol,
            LeafKind::DigitSpace,
        ]
    );
}

#[test]
fn test_number_with_exponent() {
    let token = parse_number("0.00E+00").expect("scientific pattern parses");
    let parent = token.as_parent().expect("number parent");
    assert_eq!(parent.kind(), ParentKind::Number);
    let exponent = parent
        .children()
        .iter()
        .find(|c| c.parent_kind() == Some(ParentKind::Exponent))
        .and_then(Token::as_parent)
        .expect("exponent child");
    assert_eq!(exponent.text(), "E+00");
    let symbol = exponent.children()[0].as_leaf().expect("exponent symbol");
    assert_eq!(symbol.kind(), LeafKind::ExponentSymbol);
    assert_eq!(symbol.value().as_text(), Some("E+"));
}

#[test]
fn test_number_with_padding_tokens() {
    let token = parse_number("_($* #,##0_)").expect("accounting pattern parses");
    let kinds = child_leaf_kinds(&token);
    assert_eq!(kinds[0], LeafKind::Underscore);
    assert_eq!(kinds[1], LeafKind::Currency);
    assert_eq!(kinds[2], LeafKind::Star);
    assert_eq!(*kinds.last().expect("non-empty"), LeafKind::Underscore);
    assert_eq!(token.text(), "_($* #,##0_)");
}

#[test]
fn test_general_with_color() {
    let token = parse_general("[BLUE] General").expect("general with color parses");
    let parent = token.as_parent().expect("general parent");
    assert_eq!(parent.kind(), ParentKind::General);
    assert_eq!(parent.children()[0].parent_kind(), Some(ParentKind::Color));
    assert_eq!(parent.text(), "[BLUE] General");
}

#[rstest]
#[case("[COLOR]")]
#[case("[RED")]
#[case("[COLOR 5")]
fn test_color_required_failures(#[case] pattern: &str) {
    match parse_color(pattern) {
        Err(PatternError::Parse(error)) => {
            assert!(error.required(), "expected required failure for {pattern:?}");
        }
        other => panic!("expected a parse error for {pattern:?}, got {other:?}"),
    }
}

#[test]
fn test_fraction_denominator_is_mandatory() {
    match parse_fraction("# ?/") {
        Err(PatternError::Parse(error)) => {
            assert!(error.required());
            assert_eq!(error.position(), 4);
            assert!(error.message().contains("fraction denominator"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn test_exponent_digits_are_mandatory() {
    match parse_number("0E+") {
        Err(PatternError::Parse(error)) => {
            assert!(error.required());
            assert!(error.message().contains("exponent digits"));
        }
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[rstest]
#[case("")]
#[case("abc")]
#[case("0;0")] // clause separators only exist at the expression level
fn test_number_rejects_non_number_input(#[case] pattern: &str) {
    assert!(parse_number(pattern).is_err(), "{pattern:?} must not parse");
}
