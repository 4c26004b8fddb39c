//! EBNF grammar description for the spreadsheet format-pattern language.
//!
//! The grammar is data, not code: [`PatternGrammar`] holds an ordered map
//! of named productions over [`GrammarNode`] values, and the transformer
//! interprets that map into combinator parsers. Productions are referenced
//! by exact name; the names are the wire contract shared with the
//! transformer's terminal and transform tables.
//!
//! Conventions honored by the builtin grammar:
//! 1. Alternatives are ordered; the first match wins. Longer or more
//!    specific alternatives come first (`>=` before `>`, `COLOR 5` before
//!    a bare color name).
//! 2. A production whose name ends in `REQUIRED` marks a mandatory
//!    position: once its prefix has matched, failure is reported as a
//!    syntax error instead of silently backtracking.
//! 3. `Range` and `Exception` constructs exist in the node type for
//!    completeness but the format-pattern grammar never uses them; the
//!    transformer rejects them as a malformed grammar resource.

use once_cell::sync::Lazy;
use std::fmt;

/// Name of the bundled grammar resource.
pub const BUILTIN_GRAMMAR: &str = "spreadsheet-format";

/// One node of a parsed EBNF grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarNode {
    /// A literal string, matched with or without case sensitivity.
    Terminal {
        literal: String,
        case_insensitive: bool,
    },
    /// A reference to a terminal parser or another production.
    Identifier(String),
    /// Concatenation; absent optional slots are dropped from the result.
    Sequence(Vec<GrammarNode>),
    /// Ordered alternation; the first successful alternative wins.
    Choice(Vec<GrammarNode>),
    /// Zero-or-one occurrence.
    Optional(Box<GrammarNode>),
    /// Repetition with a minimum occurrence count.
    Repeated {
        node: Box<GrammarNode>,
        at_least: usize,
    },
    /// Grouping parentheses; semantically transparent.
    Group(Box<GrammarNode>),
    /// Character range. Unsupported by the format-pattern grammar.
    Range { from: char, to: char },
    /// Exception (`a - b`). Unsupported by the format-pattern grammar.
    Exception {
        node: Box<GrammarNode>,
        except: Box<GrammarNode>,
    },
}

/// Shorthand constructors used to author grammars.
pub fn terminal(literal: &str) -> GrammarNode {
    GrammarNode::Terminal {
        literal: literal.to_string(),
        case_insensitive: false,
    }
}

pub fn ident(name: &str) -> GrammarNode {
    GrammarNode::Identifier(name.to_string())
}

pub fn seq(items: Vec<GrammarNode>) -> GrammarNode {
    GrammarNode::Sequence(items)
}

pub fn alt(items: Vec<GrammarNode>) -> GrammarNode {
    GrammarNode::Choice(items)
}

pub fn opt(node: GrammarNode) -> GrammarNode {
    GrammarNode::Optional(Box::new(node))
}

pub fn many0(node: GrammarNode) -> GrammarNode {
    GrammarNode::Repeated {
        node: Box::new(node),
        at_least: 0,
    }
}

pub fn many1(node: GrammarNode) -> GrammarNode {
    GrammarNode::Repeated {
        node: Box::new(node),
        at_least: 1,
    }
}

/// Errors raised while loading a grammar resource or compiling it into
/// parsers. These are configuration failures: they indicate a packaging
/// defect, are reported once at factory-build time and are never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum GrammarError {
    UnknownResource(String),
    UnknownProduction(String),
    EmptySequence(String),
    EmptyChoice(String),
    Unsupported {
        production: String,
        construct: &'static str,
    },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::UnknownResource(name) => {
                write!(f, "unknown grammar resource {:?}", name)
            }
            GrammarError::UnknownProduction(name) => {
                write!(f, "grammar references unknown production {:?}", name)
            }
            GrammarError::EmptySequence(production) => {
                write!(f, "empty sequence in production {:?}", production)
            }
            GrammarError::EmptyChoice(production) => {
                write!(f, "empty choice in production {:?}", production)
            }
            GrammarError::Unsupported {
                production,
                construct,
            } => write!(
                f,
                "unsupported {} construct in production {:?}",
                construct, production
            ),
        }
    }
}

impl std::error::Error for GrammarError {}

/// An ordered, named set of grammar productions.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PatternGrammar {
    productions: Vec<(String, GrammarNode)>,
}

impl PatternGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a production. Later definitions never shadow earlier ones.
    pub fn define(&mut self, name: &str, node: GrammarNode) {
        self.productions.push((name.to_string(), node));
    }

    pub fn production(&self, name: &str) -> Option<&GrammarNode> {
        self.productions
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, node)| node)
    }

    pub fn productions(&self) -> impl Iterator<Item = (&str, &GrammarNode)> {
        self.productions
            .iter()
            .map(|(name, node)| (name.as_str(), node))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.productions.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.productions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Load a bundled grammar by name. Only [`BUILTIN_GRAMMAR`] exists;
    /// the parsed resource is shared process-wide.
    pub fn load(name: &str) -> Result<&'static PatternGrammar, GrammarError> {
        if name == BUILTIN_GRAMMAR {
            Ok(Self::builtin())
        } else {
            Err(GrammarError::UnknownResource(name.to_string()))
        }
    }

    /// The builtin spreadsheet-format grammar.
    pub fn builtin() -> &'static PatternGrammar {
        static BUILTIN: Lazy<PatternGrammar> = Lazy::new(build_builtin);
        &BUILTIN
    }
}

/// Entry-point production for each pattern dialect.
pub const COLOR: &str = "COLOR";
pub const CONDITION: &str = "CONDITION";
pub const DATE_GENERAL: &str = "DATE_GENERAL";
pub const DATETIME_GENERAL: &str = "DATETIME_GENERAL";
pub const EXPRESSION: &str = "EXPRESSION";
pub const FRACTION: &str = "FRACTION";
pub const GENERAL: &str = "GENERAL";
pub const NUMBER_GENERAL: &str = "NUMBER_GENERAL";
pub const TEXT: &str = "TEXT";
pub const TIME_GENERAL: &str = "TIME_GENERAL";

fn component_choice(names: &[&str]) -> GrammarNode {
    alt(names.iter().map(|n| ident(n)).collect())
}

fn build_builtin() -> PatternGrammar {
    let mut g = PatternGrammar::new();

    // Top-level expression: clauses joined by ';'. Clauses may be empty
    // ("0;;0" skips its second clause) but the pattern itself may not be.
    g.define(
        "EXPRESSION",
        alt(vec![
            seq(vec![
                ident("EXPRESSION_CLAUSE"),
                many0(seq(vec![
                    ident("SEPARATOR"),
                    opt(ident("EXPRESSION_CLAUSE")),
                ])),
            ]),
            many1(seq(vec![
                ident("SEPARATOR"),
                opt(ident("EXPRESSION_CLAUSE")),
            ])),
        ]),
    );
    // Each dialect alternative must reach a clause boundary (';' or end
    // of input); otherwise a clause like `"x"@` would commit to NUMBER
    // after the quoted literal and never try TEXT.
    let bounded = |name: &str| seq(vec![ident(name), ident("CLAUSE_BOUNDARY")]);
    g.define(
        "EXPRESSION_CLAUSE",
        seq(vec![
            many0(alt(vec![ident("CONDITION"), ident("COLOR")])),
            alt(vec![
                bounded("GENERAL"),
                bounded("FRACTION"),
                bounded("NUMBER"),
                bounded("DATETIME"),
                bounded("TEXT"),
            ]),
        ]),
    );

    // Colors: "[RED]" or "[COLOR 5]". Once "[COLOR" has matched, the name
    // or palette number is mandatory, as is the closing bracket.
    g.define(
        "COLOR",
        seq(vec![
            ident("OPEN_SQUARE_BRACKET"),
            opt(ident("WHITESPACE")),
            ident("COLOR_BODY"),
            opt(ident("WHITESPACE")),
            ident("CLOSE_SQUARE_BRACKET_REQUIRED"),
        ]),
    );
    // The keyword form is tried first, so a name that merely starts with
    // the COLOR keyword splits after it: "[COLORFUL]" yields the keyword
    // plus a color named "FUL", not a color named "COLORFUL".
    g.define(
        "COLOR_BODY",
        alt(vec![ident("COLOR_AND_NUMBER"), ident("COLOR_NAME")]),
    );
    g.define(
        "COLOR_AND_NUMBER",
        seq(vec![
            ident("COLOR_LITERAL"),
            opt(ident("WHITESPACE")),
            ident("COLOR_NAME_OR_NUMBER_REQUIRED"),
        ]),
    );
    g.define(
        "COLOR_NAME_OR_NUMBER_REQUIRED",
        alt(vec![ident("COLOR_NUMBER"), ident("COLOR_NAME")]),
    );
    g.define("CLOSE_SQUARE_BRACKET_REQUIRED", ident("CLOSE_SQUARE_BRACKET"));

    // Conditions: "[>=100]". Two-character comparisons precede their
    // one-character prefixes.
    g.define(
        "CONDITION",
        seq(vec![
            ident("OPEN_SQUARE_BRACKET"),
            ident("CONDITION_COMPARE"),
            ident("CONDITION_NUMBER_REQUIRED"),
            ident("CLOSE_SQUARE_BRACKET_REQUIRED"),
        ]),
    );
    g.define(
        "CONDITION_COMPARE",
        component_choice(&[
            "GREATER_THAN_EQUALS",
            "LESS_THAN_EQUALS",
            "NOT_EQUALS",
            "GREATER_THAN",
            "LESS_THAN",
            "EQUALS",
        ]),
    );
    g.define("CONDITION_NUMBER_REQUIRED", ident("CONDITION_NUMBER"));

    // General: the "General" keyword with optional colors and whitespace.
    g.define(
        "GENERAL",
        seq(vec![
            many0(alt(vec![ident("WHITESPACE"), ident("COLOR")])),
            ident("GENERAL_SYMBOL"),
            many0(alt(vec![ident("WHITESPACE"), ident("COLOR")])),
        ]),
    );

    // Numbers: "#,##0.00" with an optional "E+00" exponent suffix.
    g.define(
        "NUMBER",
        seq(vec![
            many1(ident("NUMBER_COMPONENT")),
            opt(ident("EXPONENT")),
        ]),
    );
    g.define(
        "NUMBER_COMPONENT",
        component_choice(&[
            "COLOR",
            "CURRENCY",
            "DIGIT",
            "DIGIT_ZERO",
            "DIGIT_SPACE",
            "DECIMAL_POINT",
            "PERCENT",
            "THOUSANDS",
            "ESCAPE",
            "QUOTED_TEXT",
            "STAR",
            "UNDERSCORE",
            "WHITESPACE",
            "LITERAL",
        ]),
    );
    g.define(
        "EXPONENT",
        seq(vec![
            ident("EXPONENT_SYMBOL"),
            ident("EXPONENT_DIGITS_REQUIRED"),
        ]),
    );
    g.define(
        "EXPONENT_DIGITS_REQUIRED",
        many1(component_choice(&["DIGIT", "DIGIT_ZERO", "DIGIT_SPACE"])),
    );

    // Fractions: "# ?/?". The denominator after '/' is mandatory.
    g.define(
        "FRACTION",
        seq(vec![
            many1(ident("FRACTION_COMPONENT")),
            ident("FRACTION_SYMBOL"),
            ident("FRACTION_DENOMINATOR_REQUIRED"),
        ]),
    );
    g.define(
        "FRACTION_COMPONENT",
        component_choice(&[
            "COLOR",
            "CURRENCY",
            "DIGIT",
            "DIGIT_ZERO",
            "DIGIT_SPACE",
            "PERCENT",
            "THOUSANDS",
            "ESCAPE",
            "QUOTED_TEXT",
            "STAR",
            "UNDERSCORE",
            "WHITESPACE",
            "LITERAL",
        ]),
    );
    g.define(
        "FRACTION_DENOMINATOR_REQUIRED",
        many1(ident("FRACTION_COMPONENT")),
    );

    // Dates, times and the combined dialect. `/`, `.` and `:` act as
    // plain literals here, unlike in number patterns.
    g.define("DATE", many1(ident("DATE_COMPONENT")));
    g.define(
        "DATE_COMPONENT",
        component_choice(&[
            "COLOR",
            "DAY",
            "MONTH_MINUTE",
            "YEAR",
            "ESCAPE",
            "QUOTED_TEXT",
            "STAR",
            "UNDERSCORE",
            "WHITESPACE",
            "LITERAL2",
        ]),
    );
    g.define("TIME", many1(ident("TIME_COMPONENT")));
    g.define(
        "TIME_COMPONENT",
        component_choice(&[
            "COLOR",
            "AMPM",
            "HOUR",
            "MONTH_MINUTE",
            "SECOND",
            "DIGIT_ZERO",
            "DECIMAL_POINT",
            "ESCAPE",
            "QUOTED_TEXT",
            "STAR",
            "UNDERSCORE",
            "WHITESPACE",
            "LITERAL2",
        ]),
    );
    g.define("DATETIME", many1(ident("DATETIME_COMPONENT")));
    g.define(
        "DATETIME_COMPONENT",
        component_choice(&[
            "COLOR",
            "AMPM",
            "DAY",
            "HOUR",
            "MONTH_MINUTE",
            "SECOND",
            "YEAR",
            "DIGIT_ZERO",
            "DECIMAL_POINT",
            "ESCAPE",
            "QUOTED_TEXT",
            "STAR",
            "UNDERSCORE",
            "WHITESPACE",
            "LITERAL2",
        ]),
    );

    // Text: "@" placeholders plus quoted and literal characters.
    g.define("TEXT", many1(ident("TEXT_COMPONENT")));
    g.define(
        "TEXT_COMPONENT",
        component_choice(&[
            "COLOR",
            "TEXT_PLACEHOLDER",
            "QUOTED_TEXT",
            "ESCAPE",
            "STAR",
            "UNDERSCORE",
            "WHITESPACE",
            "LITERAL2",
        ]),
    );

    // Dialect entry points also accepting a bare "General".
    g.define("DATE_GENERAL", alt(vec![ident("GENERAL"), ident("DATE")]));
    g.define("TIME_GENERAL", alt(vec![ident("GENERAL"), ident("TIME")]));
    g.define(
        "DATETIME_GENERAL",
        alt(vec![ident("GENERAL"), ident("DATETIME")]),
    );
    g.define(
        "NUMBER_GENERAL",
        alt(vec![ident("GENERAL"), ident("NUMBER")]),
    );

    g
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_by_name() {
        let grammar = PatternGrammar::load(BUILTIN_GRAMMAR).expect("builtin grammar loads");
        assert!(!grammar.is_empty());
    }

    #[test]
    fn test_load_unknown_resource_fails() {
        let result = PatternGrammar::load("no-such-grammar");
        assert_eq!(
            result,
            Err(GrammarError::UnknownResource("no-such-grammar".into()))
        );
    }

    #[test]
    fn test_builtin_defines_all_entry_points() {
        let grammar = PatternGrammar::builtin();
        for name in [
            COLOR,
            CONDITION,
            DATE_GENERAL,
            DATETIME_GENERAL,
            EXPRESSION,
            FRACTION,
            GENERAL,
            NUMBER_GENERAL,
            TEXT,
            TIME_GENERAL,
        ] {
            assert!(
                grammar.production(name).is_some(),
                "missing entry production {name}"
            );
        }
    }

    #[test]
    fn test_required_productions_follow_naming_convention() {
        let grammar = PatternGrammar::builtin();
        let required: Vec<&str> = grammar
            .names()
            .filter(|n| n.ends_with("REQUIRED"))
            .collect();
        assert_eq!(
            required,
            vec![
                "COLOR_NAME_OR_NUMBER_REQUIRED",
                "CLOSE_SQUARE_BRACKET_REQUIRED",
                "CONDITION_NUMBER_REQUIRED",
                "EXPONENT_DIGITS_REQUIRED",
                "FRACTION_DENOMINATOR_REQUIRED",
            ]
        );
    }

    #[test]
    fn test_builder_helpers() {
        assert_eq!(
            many1(ident("DIGIT")),
            GrammarNode::Repeated {
                node: Box::new(GrammarNode::Identifier("DIGIT".into())),
                at_least: 1,
            }
        );
        assert_eq!(
            terminal("General"),
            GrammarNode::Terminal {
                literal: "General".into(),
                case_insensitive: false,
            }
        );
        assert_eq!(
            alt(vec![ident("A"), ident("B")]),
            GrammarNode::Choice(vec![ident("A"), ident("B")])
        );
    }

    #[test]
    fn test_production_lookup_is_first_match() {
        let mut g = PatternGrammar::new();
        g.define("A", ident("X"));
        g.define("A", ident("Y"));
        assert_eq!(g.production("A"), Some(&ident("X")));
        assert_eq!(g.len(), 2);
    }
}
