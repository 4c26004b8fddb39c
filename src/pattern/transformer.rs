//! Compilation of [`PatternGrammar`] productions into chumsky parsers.
//!
//! The transformer walks the grammar AST once and produces one parser per
//! production. Three name-keyed tables drive the interpretation:
//!
//! 1. the terminal table: identifiers with no production of their own
//!    resolve to hand-written character-level parsers that emit leaf
//!    tokens (`DIGIT` matches `#`, `YEAR` matches a run of `y`/`Y`, ...),
//! 2. the transform table: productions such as `COLOR` or `NUMBER` wrap
//!    their flattened child tokens into a parent token after matching,
//! 3. the `_REQUIRED` naming convention: failures inside such a
//!    production are reported as a "missing required ..." syntax error at
//!    the failure position instead of an anonymous no-match, so a matched
//!    prefix with a missing mandatory tail produces a descriptive error.
//!
//! Intermediate results flow through [`ParseValue`]: structural
//! productions yield nested sequences that are flattened (dropping
//! absent optionals) before a transform builds its parent token. A raw
//! terminal string reaching a transform means the grammar and the tables
//! disagree; that surfaces as a [`TokenError`] through the error channel.

use std::collections::{HashMap, HashSet};
use std::ops::Range;

use chumsky::{prelude::*, BoxedParser};

use super::grammar::{GrammarError, GrammarNode, PatternGrammar};
use super::token::{LeafKind, LeafToken, ParentKind, ParentToken, Token, TokenError};

/// Output of every compiled parser.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ParseValue {
    /// A finished token, leaf or parent.
    Token(Token),
    /// Results of a sequence, in order, absent optionals already dropped.
    Sequence(Vec<ParseValue>),
    /// Results of a repetition, in order.
    Repeated(Vec<ParseValue>),
    /// Raw text matched by an inline grammar terminal.
    Str(String),
    /// An optional slot that did not match.
    Missing,
}

pub(crate) type PatternParser = BoxedParser<'static, char, ParseValue, Simple<char>>;

/// Message prefix marking a failed `_REQUIRED` production.
pub(crate) const REQUIRED_MESSAGE_PREFIX: &str = "missing required";

/// A fully compiled grammar: one parser per production, entry points
/// retrievable by name. Parsers handed out by [`CompiledGrammar::parser`]
/// reference the compiled productions and stay valid while this value
/// lives.
pub(crate) struct CompiledGrammar {
    productions: HashMap<String, Recursive<'static, char, ParseValue, Simple<char>>>,
}

impl CompiledGrammar {
    /// Compile every production of the grammar. Productions may reference
    /// each other in any order; references are resolved through
    /// pre-declared recursive slots. Fails on identifiers that name
    /// neither a production nor a terminal, on empty sequences or
    /// choices, and on range or exception constructs.
    pub(crate) fn compile(grammar: &PatternGrammar) -> Result<Self, GrammarError> {
        let mut declared: HashMap<String, Recursive<'static, char, ParseValue, Simple<char>>> =
            HashMap::new();
        for name in grammar.names() {
            declared
                .entry(name.to_string())
                .or_insert_with(Recursive::declare);
        }

        let mut defined: HashSet<&str> = HashSet::new();
        for (name, node) in grammar.productions() {
            if !defined.insert(name) {
                // First definition wins, matching production lookup.
                continue;
            }
            let body = compile_node(node, name, &declared)?;
            let parser = if let Some(transform) = transform_for(name) {
                body.try_map(move |value, span: Range<usize>| {
                    apply_transform(transform, value)
                        .map(ParseValue::Token)
                        .map_err(|error| Simple::custom(span, error.to_string()))
                })
                .boxed()
            } else if name.ends_with("_REQUIRED") {
                let message = required_message(name);
                body.map_err(move |error| {
                    let span = error.span();
                    Simple::custom(span, message.clone())
                })
                .boxed()
            } else {
                body
            };
            if let Some(slot) = declared.get_mut(name) {
                slot.define(parser);
            }
        }

        Ok(CompiledGrammar {
            productions: declared,
        })
    }

    pub(crate) fn parser(&self, name: &str) -> Option<PatternParser> {
        self.productions.get(name).map(|p| p.clone().boxed())
    }
}

fn required_message(name: &str) -> String {
    let label = name
        .trim_end_matches("_REQUIRED")
        .to_ascii_lowercase()
        .replace('_', " ");
    format!("{} {}", REQUIRED_MESSAGE_PREFIX, label)
}

fn compile_node(
    node: &GrammarNode,
    production: &str,
    declared: &HashMap<String, Recursive<'static, char, ParseValue, Simple<char>>>,
) -> Result<PatternParser, GrammarError> {
    match node {
        GrammarNode::Terminal {
            literal,
            case_insensitive,
        } => Ok(chars_matcher(literal, *case_insensitive)
            .map(ParseValue::Str)
            .boxed()),
        GrammarNode::Identifier(name) => {
            if let Some(parser) = declared.get(name) {
                Ok(parser.clone().boxed())
            } else if let Some(parser) = terminal_parser(name) {
                Ok(parser)
            } else {
                Err(GrammarError::UnknownProduction(name.clone()))
            }
        }
        GrammarNode::Sequence(items) => {
            let mut iter = items.iter();
            let first = iter
                .next()
                .ok_or_else(|| GrammarError::EmptySequence(production.to_string()))?;
            let mut parser = compile_node(first, production, declared)?
                .map(|value| vec![value])
                .boxed();
            for item in iter {
                let next = compile_node(item, production, declared)?;
                parser = parser
                    .then(next)
                    .map(|(mut values, value)| {
                        values.push(value);
                        values
                    })
                    .boxed();
            }
            Ok(parser
                .map(|values| {
                    ParseValue::Sequence(
                        values
                            .into_iter()
                            .filter(|v| !matches!(v, ParseValue::Missing))
                            .collect(),
                    )
                })
                .boxed())
        }
        GrammarNode::Choice(items) => {
            let mut iter = items.iter();
            let first = iter
                .next()
                .ok_or_else(|| GrammarError::EmptyChoice(production.to_string()))?;
            let mut parser = compile_node(first, production, declared)?;
            for item in iter {
                parser = parser.or(compile_node(item, production, declared)?).boxed();
            }
            Ok(parser)
        }
        GrammarNode::Optional(inner) => Ok(compile_node(inner, production, declared)?
            .or_not()
            .map(|value| value.unwrap_or(ParseValue::Missing))
            .boxed()),
        GrammarNode::Repeated { node, at_least } => Ok(compile_node(node, production, declared)?
            .repeated()
            .at_least(*at_least)
            .map(ParseValue::Repeated)
            .boxed()),
        GrammarNode::Group(inner) => compile_node(inner, production, declared),
        GrammarNode::Range { .. } => Err(GrammarError::Unsupported {
            production: production.to_string(),
            construct: "range",
        }),
        GrammarNode::Exception { .. } => Err(GrammarError::Unsupported {
            production: production.to_string(),
            construct: "exception",
        }),
    }
}

/// Flatten a structural parse value into a flat child-token list,
/// dropping absent optionals. A raw terminal string here means a grammar
/// terminal reached a transform without a token factory in between.
pub(crate) fn flatten(value: ParseValue, out: &mut Vec<Token>) -> Result<(), TokenError> {
    match value {
        ParseValue::Token(token) => out.push(token),
        ParseValue::Sequence(items) | ParseValue::Repeated(items) => {
            for item in items {
                flatten(item, out)?;
            }
        }
        ParseValue::Missing => {}
        ParseValue::Str(text) => return Err(TokenError::UnhandledTerminal(text)),
    }
    Ok(())
}

fn apply_transform(transform: Transform, value: ParseValue) -> Result<Token, TokenError> {
    let mut children = Vec::new();
    flatten(value, &mut children)?;
    transform(children)
}

pub(crate) type Transform = fn(Vec<Token>) -> Result<Token, TokenError>;

/// Parent-token factory for a production, if it has one. Dialect
/// productions collapse a single-child result to that child directly;
/// bracketed and top-level constructs always wrap because their parent
/// kind carries meaning of its own.
pub(crate) fn transform_for(name: &str) -> Option<Transform> {
    let transform: Transform = match name {
        "COLOR" => |children| wrap(ParentKind::Color, children),
        "CONDITION" => condition_parent,
        "DATE" => |children| collapse_or_wrap(ParentKind::Date, children),
        "DATETIME" => |children| collapse_or_wrap(ParentKind::DateTime, children),
        "EXPONENT" => |children| wrap(ParentKind::Exponent, children),
        "EXPRESSION" => |children| wrap(ParentKind::Expression, children),
        "FRACTION" => |children| wrap(ParentKind::Fraction, children),
        "GENERAL" => |children| wrap(ParentKind::General, children),
        "NUMBER" => |children| collapse_or_wrap(ParentKind::Number, children),
        "TEXT" => |children| collapse_or_wrap(ParentKind::Text, children),
        "TIME" => |children| collapse_or_wrap(ParentKind::Time, children),
        _ => return None,
    };
    Some(transform)
}

fn wrap(kind: ParentKind, children: Vec<Token>) -> Result<Token, TokenError> {
    ParentToken::new(kind, children).map(Token::from)
}

fn collapse_or_wrap(kind: ParentKind, mut children: Vec<Token>) -> Result<Token, TokenError> {
    if children.len() == 1 {
        Ok(children.remove(0))
    } else {
        wrap(kind, children)
    }
}

/// The comparison symbol among the children selects the condition kind.
fn condition_parent(children: Vec<Token>) -> Result<Token, TokenError> {
    let kind = children.iter().find_map(|child| match child.leaf_kind() {
        Some(LeafKind::Equals) => Some(ParentKind::ConditionEquals),
        Some(LeafKind::GreaterThan) => Some(ParentKind::ConditionGreaterThan),
        Some(LeafKind::GreaterThanEquals) => Some(ParentKind::ConditionGreaterThanEquals),
        Some(LeafKind::LessThan) => Some(ParentKind::ConditionLessThan),
        Some(LeafKind::LessThanEquals) => Some(ParentKind::ConditionLessThanEquals),
        Some(LeafKind::NotEquals) => Some(ParentKind::ConditionNotEquals),
        _ => None,
    });
    match kind {
        Some(kind) => wrap(kind, children),
        None => Err(TokenError::InvalidChildren {
            kind: "condition",
            reason: "no comparison symbol among the children".to_string(),
        }),
    }
}

/// Character-level parser for one terminal name, emitting a leaf token.
pub(crate) fn terminal_parser(name: &str) -> Option<PatternParser> {
    let parser = match name {
        "AMPM" => ampm(),
        "CLAUSE_BOUNDARY" => clause_boundary(),
        "CLOSE_SQUARE_BRACKET" => symbol("]", LeafKind::CloseBracket),
        "COLOR_LITERAL" => keyword("COLOR", LeafKind::ColorLiteral),
        "COLOR_NAME" => color_name(),
        "COLOR_NUMBER" => color_number(),
        "CONDITION_NUMBER" => condition_number(),
        "CURRENCY" => symbol("$", LeafKind::Currency),
        "DAY" => letter_run('d', LeafKind::Day),
        "DECIMAL_POINT" => symbol(".", LeafKind::DecimalPoint),
        "DIGIT" => symbol("#", LeafKind::Digit),
        "DIGIT_SPACE" => symbol("?", LeafKind::DigitSpace),
        "DIGIT_ZERO" => symbol("0", LeafKind::DigitZero),
        "EQUALS" => symbol("=", LeafKind::Equals),
        "ESCAPE" => prefixed('\\', LeafKind::Escape),
        "EXPONENT_SYMBOL" => exponent_symbol(),
        "FRACTION_SYMBOL" => symbol("/", LeafKind::FractionSymbol),
        "GENERAL_SYMBOL" => keyword("General", LeafKind::GeneralSymbol),
        "GREATER_THAN" => symbol(">", LeafKind::GreaterThan),
        "GREATER_THAN_EQUALS" => symbol(">=", LeafKind::GreaterThanEquals),
        "HOUR" => letter_run('h', LeafKind::Hour),
        "LESS_THAN" => symbol("<", LeafKind::LessThan),
        "LESS_THAN_EQUALS" => symbol("<=", LeafKind::LessThanEquals),
        "LITERAL" => literal_set("-+():"),
        "LITERAL2" => literal_set("-+():/.,!^&'~{}="),
        "MONTH_MINUTE" => letter_run('m', LeafKind::MonthOrMinute),
        "NOT_EQUALS" => symbol("<>", LeafKind::NotEquals),
        "OPEN_SQUARE_BRACKET" => symbol("[", LeafKind::OpenBracket),
        "PERCENT" => symbol("%", LeafKind::Percent),
        "QUOTED_TEXT" => quoted_text(),
        "SECOND" => letter_run('s', LeafKind::Second),
        "SEPARATOR" => symbol(";", LeafKind::Separator),
        "STAR" => prefixed('*', LeafKind::Star),
        "TEXT_PLACEHOLDER" => symbol("@", LeafKind::TextPlaceholder),
        "THOUSANDS" => symbol(",", LeafKind::Thousands),
        "UNDERSCORE" => prefixed('_', LeafKind::Underscore),
        "WHITESPACE" => whitespace(),
        "YEAR" => letter_run('y', LeafKind::Year),
        _ => return None,
    };
    Some(parser)
}

fn leaf(
    result: Result<LeafToken, TokenError>,
    span: Range<usize>,
) -> Result<ParseValue, Simple<char>> {
    result
        .map(|token| ParseValue::Token(token.into()))
        .map_err(|error| Simple::custom(span, error.to_string()))
}

/// Match a literal character by character, preserving the matched case.
fn chars_matcher(
    word: &str,
    case_insensitive: bool,
) -> BoxedParser<'static, char, String, Simple<char>> {
    let mut parser: BoxedParser<'static, char, String, Simple<char>> =
        empty().to(String::new()).boxed();
    for expected in word.chars() {
        let step = filter(move |c: &char| {
            if case_insensitive {
                c.eq_ignore_ascii_case(&expected)
            } else {
                *c == expected
            }
        });
        parser = parser
            .then(step)
            .map(|(mut text, c)| {
                text.push(c);
                text
            })
            .boxed();
    }
    parser
}

fn symbol(literal: &'static str, kind: LeafKind) -> PatternParser {
    just(literal)
        .try_map(move |text, span| leaf(LeafToken::symbol(kind, text), span))
        .boxed()
}

fn keyword(word: &'static str, kind: LeafKind) -> PatternParser {
    chars_matcher(word, true)
        .try_map(move |text, span| leaf(LeafToken::symbol(kind, text), span))
        .boxed()
}

fn letter_run(letter: char, kind: LeafKind) -> PatternParser {
    filter(move |c: &char| c.eq_ignore_ascii_case(&letter))
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(move |text, span| leaf(LeafToken::symbol(kind, text), span))
        .boxed()
}

fn prefixed(prefix: char, kind: LeafKind) -> PatternParser {
    just(prefix)
        .ignore_then(any())
        .try_map(move |ch, span| leaf(LeafToken::prefixed(kind, prefix, ch), span))
        .boxed()
}

fn literal_set(set: &'static str) -> PatternParser {
    one_of(set)
        .try_map(|ch, span| leaf(LeafToken::text_literal(ch), span))
        .boxed()
}

/// Zero-width lookahead: succeeds before a clause separator or at end of
/// input, consuming nothing and contributing no token.
fn clause_boundary() -> PatternParser {
    just(';')
        .rewind()
        .ignored()
        .or(end())
        .to(ParseValue::Missing)
        .boxed()
}

fn ampm() -> PatternParser {
    chars_matcher("AM/PM", true)
        .or(chars_matcher("A/P", true))
        .try_map(|text, span| leaf(LeafToken::symbol(LeafKind::AmPm, text), span))
        .boxed()
}

/// A run of letters that is not the `COLOR` keyword; the keyword keeps
/// its own terminal so `[COLOR]` fails instead of naming a color "COLOR".
fn color_name() -> PatternParser {
    filter(|c: &char| c.is_ascii_alphabetic())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|name: String, span: Range<usize>| {
            if name.eq_ignore_ascii_case("COLOR") {
                return Err(Simple::custom(
                    span,
                    "COLOR is a keyword, not a color name".to_string(),
                ));
            }
            leaf(LeafToken::color_name(name), span)
        })
        .boxed()
}

fn color_number() -> PatternParser {
    filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|text: String, span: Range<usize>| {
            let number: u32 = text.parse().map_err(|_| {
                Simple::custom(span.clone(), format!("color number {:?} out of range", text))
            })?;
            leaf(LeafToken::color_number(number, text), span)
        })
        .boxed()
}

fn condition_number() -> PatternParser {
    let digits = filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .collect::<String>();
    let fractional = just('.')
        .ignore_then(digits.clone().or_not())
        .map(|tail| format!(".{}", tail.unwrap_or_default()));
    let unsigned = digits
        .clone()
        .then(fractional.or_not())
        .map(|(whole, tail)| match tail {
            Some(tail) => whole + &tail,
            None => whole,
        })
        .or(just('.').ignore_then(digits).map(|tail| format!(".{}", tail)));
    one_of("+-")
        .or_not()
        .then(unsigned)
        .map(|(sign, body)| match sign {
            Some(sign) => format!("{}{}", sign, body),
            None => body,
        })
        .try_map(|text: String, span: Range<usize>| {
            let value: f64 = text.parse().map_err(|_| {
                Simple::custom(span.clone(), format!("invalid condition number {:?}", text))
            })?;
            leaf(LeafToken::condition_number(value, text), span)
        })
        .boxed()
}

fn exponent_symbol() -> PatternParser {
    one_of("eE")
        .then(one_of("+-").or_not())
        .try_map(|(head, sign): (char, Option<char>), span| {
            let mut text = String::from(head);
            if let Some(sign) = sign {
                text.push(sign);
            }
            leaf(LeafToken::symbol(LeafKind::ExponentSymbol, text), span)
        })
        .boxed()
}

fn quoted_text() -> PatternParser {
    just('"')
        .ignore_then(filter(|c: &char| *c != '"').repeated().collect::<String>())
        .then_ignore(just('"'))
        .try_map(|value: String, span| leaf(LeafToken::quoted_text(value), span))
        .boxed()
}

fn whitespace() -> PatternParser {
    filter(|c: &char| c.is_whitespace())
        .repeated()
        .at_least(1)
        .collect::<String>()
        .try_map(|text: String, span| leaf(LeafToken::whitespace(text), span))
        .boxed()
}
