//! Public parsing surface for spreadsheet format patterns.
//!
//! [`PatternParsers`] compiles the builtin grammar once and exposes one
//! entry point per pattern dialect. Each entry point is a pure function
//! from a pattern string to a token tree:
//!
//! 1. `expression` handles full multi-clause patterns such as
//!    `"$#,##0.00;[RED]-$#,##0.00"`,
//! 2. `number`, `date`, `time`, `date_time`, `text`, `fraction` and
//!    `general` parse a single clause of the matching dialect,
//! 3. `color` and `condition` parse one bracketed construct on its own.
//!
//! Building the parser set can only fail on a malformed grammar, which is
//! a packaging defect reported as [`GrammarError`]. Parsing failures are
//! ordinary [`ParseError`] values carrying the failure position and a
//! message; errors inside a mandatory continuation (an unclosed `[`, a
//! fraction without a denominator) are flagged as `required`.
//!
//! The module-level `parse_*` functions build one [`PatternParsers`] per
//! thread on first use and reuse it afterwards; independent instances
//! remain constructible for isolation.

use std::fmt;

use chumsky::error::SimpleReason;
use chumsky::{prelude::*, BoxedParser};

use super::grammar::{self, GrammarError, PatternGrammar, BUILTIN_GRAMMAR};
use super::token::Token;
use super::transformer::{CompiledGrammar, ParseValue, REQUIRED_MESSAGE_PREFIX};

type EntryParser = BoxedParser<'static, char, ParseValue, Simple<char>>;

/// A failed parse: where it failed and why.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    position: usize,
    message: String,
    required: bool,
}

impl ParseError {
    /// Character offset of the failure in the input pattern.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True when a matched prefix was missing a mandatory continuation,
    /// such as the closing bracket of a color or the denominator of a
    /// fraction.
    pub fn required(&self) -> bool {
        self.required
    }

    fn from_errors(errors: Vec<Simple<char>>) -> Self {
        let best = errors
            .iter()
            .max_by_key(|e| (e.span().start, is_required(e)));
        match best {
            Some(error) => ParseError {
                position: error.span().start,
                message: match error.reason() {
                    SimpleReason::Custom(message) => message.clone(),
                    _ => error.to_string(),
                },
                required: is_required(error),
            },
            None => ParseError {
                position: 0,
                message: "pattern did not match".to_string(),
                required: false,
            },
        }
    }
}

fn is_required(error: &Simple<char>) -> bool {
    matches!(
        error.reason(),
        SimpleReason::Custom(message) if message.starts_with(REQUIRED_MESSAGE_PREFIX)
    )
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "parse error at {}: {}", self.position, self.message)
    }
}

impl std::error::Error for ParseError {}

/// Any failure of the convenience functions: the one-time grammar build
/// or an individual parse.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternError {
    Grammar(GrammarError),
    Parse(ParseError),
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternError::Grammar(error) => write!(f, "grammar error: {}", error),
            PatternError::Parse(error) => error.fmt(f),
        }
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PatternError::Grammar(error) => Some(error),
            PatternError::Parse(error) => Some(error),
        }
    }
}

impl From<GrammarError> for PatternError {
    fn from(error: GrammarError) -> Self {
        PatternError::Grammar(error)
    }
}

impl From<ParseError> for PatternError {
    fn from(error: ParseError) -> Self {
        PatternError::Parse(error)
    }
}

/// The compiled parser set for the format-pattern grammar.
pub struct PatternParsers {
    color: EntryParser,
    condition: EntryParser,
    date: EntryParser,
    date_time: EntryParser,
    expression: EntryParser,
    fraction: EntryParser,
    general: EntryParser,
    number: EntryParser,
    text: EntryParser,
    time: EntryParser,
    // Owns the production cells the entry parsers reference.
    _grammar: CompiledGrammar,
}

impl PatternParsers {
    /// Compile the builtin grammar into a fresh parser set.
    pub fn new() -> Result<Self, GrammarError> {
        Self::from_grammar(PatternGrammar::load(BUILTIN_GRAMMAR)?)
    }

    /// Compile an explicit grammar. The grammar must define every entry
    /// production of the builtin one.
    pub fn from_grammar(grammar: &PatternGrammar) -> Result<Self, GrammarError> {
        let compiled = CompiledGrammar::compile(grammar)?;
        let entry = |name: &str| -> Result<EntryParser, GrammarError> {
            compiled
                .parser(name)
                .map(|parser| parser.then_ignore(end()).boxed())
                .ok_or_else(|| GrammarError::UnknownProduction(name.to_string()))
        };
        Ok(PatternParsers {
            color: entry(grammar::COLOR)?,
            condition: entry(grammar::CONDITION)?,
            date: entry(grammar::DATE_GENERAL)?,
            date_time: entry(grammar::DATETIME_GENERAL)?,
            expression: entry(grammar::EXPRESSION)?,
            fraction: entry(grammar::FRACTION)?,
            general: entry(grammar::GENERAL)?,
            number: entry(grammar::NUMBER_GENERAL)?,
            text: entry(grammar::TEXT)?,
            time: entry(grammar::TIME_GENERAL)?,
            _grammar: compiled,
        })
    }

    pub fn color(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.color, pattern)
    }

    pub fn condition(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.condition, pattern)
    }

    pub fn date(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.date, pattern)
    }

    pub fn date_time(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.date_time, pattern)
    }

    pub fn expression(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.expression, pattern)
    }

    pub fn fraction(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.fraction, pattern)
    }

    pub fn general(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.general, pattern)
    }

    pub fn number(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.number, pattern)
    }

    pub fn text(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.text, pattern)
    }

    pub fn time(&self, pattern: &str) -> Result<Token, ParseError> {
        run(&self.time, pattern)
    }
}

fn run(parser: &EntryParser, pattern: &str) -> Result<Token, ParseError> {
    match parser.parse(pattern) {
        Ok(ParseValue::Token(token)) => Ok(token),
        // Entry productions all carry a transform; a structural value
        // here means the grammar and the transform table disagree.
        Ok(other) => Err(ParseError {
            position: 0,
            message: format!("entry production produced no token: {:?}", other),
            required: false,
        }),
        Err(errors) => Err(ParseError::from_errors(errors)),
    }
}

fn with_parsers<T>(
    apply: impl FnOnce(&PatternParsers) -> Result<T, ParseError>,
) -> Result<T, PatternError> {
    thread_local! {
        static PARSERS: once_cell::unsync::OnceCell<PatternParsers> =
            once_cell::unsync::OnceCell::new();
    }
    PARSERS.with(|cell| {
        let parsers = cell
            .get_or_try_init(PatternParsers::new)
            .map_err(PatternError::Grammar)?;
        apply(parsers).map_err(PatternError::Parse)
    })
}

pub fn parse_color(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.color(pattern))
}

pub fn parse_condition(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.condition(pattern))
}

pub fn parse_date(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.date(pattern))
}

pub fn parse_date_time(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.date_time(pattern))
}

pub fn parse_expression(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.expression(pattern))
}

pub fn parse_fraction(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.fraction(pattern))
}

pub fn parse_general(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.general(pattern))
}

pub fn parse_number(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.number(pattern))
}

pub fn parse_text(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.text(pattern))
}

pub fn parse_time(pattern: &str) -> Result<Token, PatternError> {
    with_parsers(|parsers| parsers.time(pattern))
}
