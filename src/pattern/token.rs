//! Token tree data model for spreadsheet format patterns.
//!
//! A parsed pattern is an immutable tree of [`Token`] values. Leaf tokens
//! carry a typed value plus the exact source text they were parsed from;
//! parent tokens carry an ordered child list whose concatenated text is the
//! parent's text. Constructors validate every per-kind invariant up front,
//! so a `Token` that exists is a `Token` that is well formed:
//!
//! 1. Leaf values must agree with their kind (a `Currency` leaf backs the
//!    literal `$`, a `Day` leaf backs a run of `d`/`D`, and so on).
//! 2. Parent shapes are checked against their filtered ("without noise")
//!    child view (a `Color` holds exactly one color name or number, a
//!    `Fraction` holds at least one non-noise child).
//! 3. Text is never empty, and blank text is only legal for `Whitespace`.
//!
//! Tokens never mutate; `with_text`, `with_value` and `with_children`
//! return new, re-validated instances.

use std::fmt;

/// Leaf token kinds. One variant per atomic pattern construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    /// `AM/PM` or `A/P`, any case.
    AmPm,
    /// `]`
    CloseBracket,
    /// The `COLOR` keyword inside `[COLOR 5]`, any case.
    ColorLiteral,
    /// A color name such as `RED` inside `[RED]`.
    ColorName,
    /// A palette index inside `[COLOR 5]`.
    ColorNumber,
    /// The number of a bracket condition such as `[>100]`.
    ConditionNumber,
    /// `$`
    Currency,
    /// A run of `d`/`D` day placeholders.
    Day,
    /// `.`
    DecimalPoint,
    /// `#`
    Digit,
    /// `?` digit placeholder padded with a space.
    DigitSpace,
    /// `0` digit placeholder padded with a zero.
    DigitZero,
    /// `=`
    Equals,
    /// `\x` escape, value is the escaped character.
    Escape,
    /// `E`, `e`, optionally followed by a sign.
    ExponentSymbol,
    /// `/`
    FractionSymbol,
    /// The `General` keyword, any case.
    GeneralSymbol,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanEquals,
    /// A run of `h`/`H` hour placeholders.
    Hour,
    /// `<`
    LessThan,
    /// `<=`
    LessThanEquals,
    /// A run of `m`/`M`; month or minute depending on the dialect.
    MonthOrMinute,
    /// `<>`
    NotEquals,
    /// `[`
    OpenBracket,
    /// `%`
    Percent,
    /// A double-quoted literal, value is the text between the quotes.
    QuotedText,
    /// A run of `s`/`S` second placeholders.
    Second,
    /// `;` between expression clauses.
    Separator,
    /// `*x` fill, value is the fill character.
    Star,
    /// A single unquoted literal character such as `-` or `:`.
    TextLiteral,
    /// `@`
    TextPlaceholder,
    /// `,`
    Thousands,
    /// `_x` skip, value is the width-reference character.
    Underscore,
    /// A run of whitespace characters.
    Whitespace,
    /// A run of `y`/`Y` year placeholders.
    Year,
}

impl LeafKind {
    /// Human-readable kind name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            LeafKind::AmPm => "am-pm",
            LeafKind::CloseBracket => "close-bracket",
            LeafKind::ColorLiteral => "color-literal",
            LeafKind::ColorName => "color-name",
            LeafKind::ColorNumber => "color-number",
            LeafKind::ConditionNumber => "condition-number",
            LeafKind::Currency => "currency",
            LeafKind::Day => "day",
            LeafKind::DecimalPoint => "decimal-point",
            LeafKind::Digit => "digit",
            LeafKind::DigitSpace => "digit-space",
            LeafKind::DigitZero => "digit-zero",
            LeafKind::Equals => "equals",
            LeafKind::Escape => "escape",
            LeafKind::ExponentSymbol => "exponent-symbol",
            LeafKind::FractionSymbol => "fraction-symbol",
            LeafKind::GeneralSymbol => "general-symbol",
            LeafKind::GreaterThan => "greater-than",
            LeafKind::GreaterThanEquals => "greater-than-equals",
            LeafKind::Hour => "hour",
            LeafKind::LessThan => "less-than",
            LeafKind::LessThanEquals => "less-than-equals",
            LeafKind::MonthOrMinute => "month-or-minute",
            LeafKind::NotEquals => "not-equals",
            LeafKind::OpenBracket => "open-bracket",
            LeafKind::Percent => "percent",
            LeafKind::QuotedText => "quoted-text",
            LeafKind::Second => "second",
            LeafKind::Separator => "separator",
            LeafKind::Star => "star",
            LeafKind::TextLiteral => "text-literal",
            LeafKind::TextPlaceholder => "text-placeholder",
            LeafKind::Thousands => "thousands",
            LeafKind::Underscore => "underscore",
            LeafKind::Whitespace => "whitespace",
            LeafKind::Year => "year",
        }
    }

    /// Noise kinds are present in a parent's raw children but excluded
    /// from its meaningful ("without noise") view.
    pub fn is_noise(self) -> bool {
        matches!(self, LeafKind::Whitespace | LeafKind::Separator)
    }

    /// Fixed literal backing this kind, if it has one, together with the
    /// case sensitivity governing the match.
    fn literal(self) -> Option<(&'static str, bool)> {
        let (text, case_sensitive) = match self {
            LeafKind::CloseBracket => ("]", true),
            LeafKind::ColorLiteral => ("COLOR", false),
            LeafKind::Currency => ("$", true),
            LeafKind::DecimalPoint => (".", true),
            LeafKind::Digit => ("#", true),
            LeafKind::DigitSpace => ("?", true),
            LeafKind::DigitZero => ("0", true),
            LeafKind::Equals => ("=", true),
            LeafKind::FractionSymbol => ("/", true),
            LeafKind::GeneralSymbol => ("General", false),
            LeafKind::GreaterThan => (">", true),
            LeafKind::GreaterThanEquals => (">=", true),
            LeafKind::LessThan => ("<", true),
            LeafKind::LessThanEquals => ("<=", true),
            LeafKind::NotEquals => ("<>", true),
            LeafKind::OpenBracket => ("[", true),
            LeafKind::Percent => ("%", true),
            LeafKind::Separator => (";", true),
            LeafKind::TextPlaceholder => ("@", true),
            LeafKind::Thousands => (",", true),
            _ => return None,
        };
        Some((text, case_sensitive))
    }

    /// Repeating placeholder letter backing this kind, if any.
    fn repeating_letter(self) -> Option<char> {
        match self {
            LeafKind::Day => Some('d'),
            LeafKind::Hour => Some('h'),
            LeafKind::MonthOrMinute => Some('m'),
            LeafKind::Second => Some('s'),
            LeafKind::Year => Some('y'),
            _ => None,
        }
    }
}

/// Parent (composite) token kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentKind {
    /// `[RED]` or `[COLOR 5]`; exactly one name-or-number child.
    Color,
    ConditionEquals,
    ConditionGreaterThan,
    ConditionGreaterThanEquals,
    ConditionLessThan,
    ConditionLessThanEquals,
    ConditionNotEquals,
    Date,
    DateTime,
    /// `E+00` exponent suffix of a number pattern.
    Exponent,
    /// Top-level multi-clause pattern, clauses joined by `;`.
    Expression,
    Fraction,
    General,
    Number,
    Text,
    Time,
}

impl ParentKind {
    /// Human-readable kind name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            ParentKind::Color => "color",
            ParentKind::ConditionEquals => "condition-equals",
            ParentKind::ConditionGreaterThan => "condition-greater-than",
            ParentKind::ConditionGreaterThanEquals => "condition-greater-than-equals",
            ParentKind::ConditionLessThan => "condition-less-than",
            ParentKind::ConditionLessThanEquals => "condition-less-than-equals",
            ParentKind::ConditionNotEquals => "condition-not-equals",
            ParentKind::Date => "date",
            ParentKind::DateTime => "date-time",
            ParentKind::Exponent => "exponent",
            ParentKind::Expression => "expression",
            ParentKind::Fraction => "fraction",
            ParentKind::General => "general",
            ParentKind::Number => "number",
            ParentKind::Text => "text",
            ParentKind::Time => "time",
        }
    }

    /// True for the six bracket-condition kinds.
    pub fn is_condition(self) -> bool {
        matches!(
            self,
            ParentKind::ConditionEquals
                | ParentKind::ConditionGreaterThan
                | ParentKind::ConditionGreaterThanEquals
                | ParentKind::ConditionLessThan
                | ParentKind::ConditionLessThanEquals
                | ParentKind::ConditionNotEquals
        )
    }
}

/// Typed payload of a leaf token. Which variant is legal is fixed by the
/// leaf's [`LeafKind`].
#[derive(Debug, Clone, PartialEq)]
pub enum TokenValue {
    Text(String),
    Character(char),
    Integer(u32),
    Decimal(f64),
}

impl TokenValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            TokenValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_character(&self) -> Option<char> {
        match self {
            TokenValue::Character(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<u32> {
        match self {
            TokenValue::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            TokenValue::Decimal(n) => Some(*n),
            _ => None,
        }
    }

    fn shape(&self) -> &'static str {
        match self {
            TokenValue::Text(_) => "text",
            TokenValue::Character(_) => "character",
            TokenValue::Integer(_) => "integer",
            TokenValue::Decimal(_) => "decimal",
        }
    }
}

/// Errors raised when a token constructor rejects its arguments. These
/// indicate a caller bug (or, inside the parser, a grammar/transform
/// mismatch); they are never recovered from within this module.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenError {
    EmptyText(&'static str),
    BlankText(&'static str),
    ValueMismatch {
        kind: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    InvalidValue {
        kind: &'static str,
        reason: String,
    },
    EmptyChildren(&'static str),
    InvalidChildren {
        kind: &'static str,
        reason: String,
    },
    UnhandledTerminal(String),
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenError::EmptyText(kind) => write!(f, "{} token requires non-empty text", kind),
            TokenError::BlankText(kind) => write!(f, "{} token requires non-blank text", kind),
            TokenError::ValueMismatch {
                kind,
                expected,
                found,
            } => write!(
                f,
                "{} token requires a {} value, found {}",
                kind, expected, found
            ),
            TokenError::InvalidValue { kind, reason } => {
                write!(f, "invalid {} value: {}", kind, reason)
            }
            TokenError::EmptyChildren(kind) => {
                write!(f, "{} token requires at least one child", kind)
            }
            TokenError::InvalidChildren { kind, reason } => {
                write!(f, "invalid {} children: {}", kind, reason)
            }
            TokenError::UnhandledTerminal(text) => {
                write!(f, "grammar terminal {:?} reached a token transform", text)
            }
        }
    }
}

impl std::error::Error for TokenError {}

/// An atomic token: a kind, a typed value and the exact source text that
/// produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct LeafToken {
    kind: LeafKind,
    value: TokenValue,
    text: String,
}

impl LeafToken {
    /// Build a leaf, validating the value against the kind and the text
    /// against the blankness rules.
    pub fn new(
        kind: LeafKind,
        value: TokenValue,
        text: impl Into<String>,
    ) -> Result<Self, TokenError> {
        let text = text.into();
        validate_value(kind, &value)?;
        validate_text(kind, &text)?;
        Ok(LeafToken { kind, value, text })
    }

    /// Leaf whose value is its own text: fixed symbols, placeholder letter
    /// runs, keywords and whitespace.
    pub fn symbol(kind: LeafKind, text: impl Into<String>) -> Result<Self, TokenError> {
        let text = text.into();
        Self::new(kind, TokenValue::Text(text.clone()), text)
    }

    /// Two-character leaf of the form `<prefix><ch>`: escape, star and
    /// underscore tokens.
    pub fn prefixed(kind: LeafKind, prefix: char, ch: char) -> Result<Self, TokenError> {
        Self::new(kind, TokenValue::Character(ch), format!("{}{}", prefix, ch))
    }

    pub fn escape(ch: char) -> Result<Self, TokenError> {
        Self::prefixed(LeafKind::Escape, '\\', ch)
    }

    pub fn star(ch: char) -> Result<Self, TokenError> {
        Self::prefixed(LeafKind::Star, '*', ch)
    }

    pub fn underscore(ch: char) -> Result<Self, TokenError> {
        Self::prefixed(LeafKind::Underscore, '_', ch)
    }

    pub fn text_literal(ch: char) -> Result<Self, TokenError> {
        Self::new(
            LeafKind::TextLiteral,
            TokenValue::Character(ch),
            ch.to_string(),
        )
    }

    pub fn color_name(name: impl Into<String>) -> Result<Self, TokenError> {
        let name = name.into();
        Self::new(LeafKind::ColorName, TokenValue::Text(name.clone()), name)
    }

    pub fn color_number(number: u32, text: impl Into<String>) -> Result<Self, TokenError> {
        Self::new(LeafKind::ColorNumber, TokenValue::Integer(number), text)
    }

    pub fn condition_number(value: f64, text: impl Into<String>) -> Result<Self, TokenError> {
        Self::new(LeafKind::ConditionNumber, TokenValue::Decimal(value), text)
    }

    /// `value` is the text between the quotes; the token text includes them.
    pub fn quoted_text(value: impl Into<String>) -> Result<Self, TokenError> {
        let value = value.into();
        let text = format!("\"{}\"", value);
        Self::new(LeafKind::QuotedText, TokenValue::Text(value), text)
    }

    pub fn whitespace(text: impl Into<String>) -> Result<Self, TokenError> {
        Self::symbol(LeafKind::Whitespace, text)
    }

    pub fn kind(&self) -> LeafKind {
        self.kind
    }

    pub fn value(&self) -> &TokenValue {
        &self.value
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_noise(&self) -> bool {
        self.kind.is_noise()
    }

    /// New leaf with different source text but the same value. Text
    /// blankness rules are re-checked; passing the current text yields an
    /// equal instance.
    pub fn with_text(&self, text: impl Into<String>) -> Result<Self, TokenError> {
        let text = text.into();
        validate_text(self.kind, &text)?;
        Ok(LeafToken {
            kind: self.kind,
            value: self.value.clone(),
            text,
        })
    }

    /// New leaf with a different value, re-validated against the kind.
    pub fn with_value(&self, value: TokenValue) -> Result<Self, TokenError> {
        validate_value(self.kind, &value)?;
        Ok(LeafToken {
            kind: self.kind,
            value,
            text: self.text.clone(),
        })
    }
}

fn validate_text(kind: LeafKind, text: &str) -> Result<(), TokenError> {
    if text.is_empty() {
        return Err(TokenError::EmptyText(kind.name()));
    }
    if kind != LeafKind::Whitespace && text.trim().is_empty() {
        return Err(TokenError::BlankText(kind.name()));
    }
    Ok(())
}

fn validate_value(kind: LeafKind, value: &TokenValue) -> Result<(), TokenError> {
    let mismatch = |expected: &'static str| TokenError::ValueMismatch {
        kind: kind.name(),
        expected,
        found: value.shape(),
    };
    let invalid = |reason: String| TokenError::InvalidValue {
        kind: kind.name(),
        reason,
    };

    if let Some((literal, case_sensitive)) = kind.literal() {
        let text = value.as_text().ok_or_else(|| mismatch("text"))?;
        let matches = if case_sensitive {
            text == literal
        } else {
            text.eq_ignore_ascii_case(literal)
        };
        return if matches {
            Ok(())
        } else {
            Err(invalid(format!("expected {:?}, found {:?}", literal, text)))
        };
    }

    if let Some(letter) = kind.repeating_letter() {
        let text = value.as_text().ok_or_else(|| mismatch("text"))?;
        return if !text.is_empty() && text.chars().all(|c| c.eq_ignore_ascii_case(&letter)) {
            Ok(())
        } else {
            Err(invalid(format!(
                "expected a run of {:?}, found {:?}",
                letter, text
            )))
        };
    }

    match kind {
        LeafKind::AmPm => {
            let text = value.as_text().ok_or_else(|| mismatch("text"))?;
            if text.eq_ignore_ascii_case("AM/PM") || text.eq_ignore_ascii_case("A/P") {
                Ok(())
            } else {
                Err(invalid(format!("expected AM/PM or A/P, found {:?}", text)))
            }
        }
        LeafKind::ExponentSymbol => {
            let text = value.as_text().ok_or_else(|| mismatch("text"))?;
            let mut chars = text.chars();
            let head = chars.next();
            let sign = chars.next();
            let valid = matches!(head, Some('e') | Some('E'))
                && matches!(sign, None | Some('+') | Some('-'))
                && chars.next().is_none();
            if valid {
                Ok(())
            } else {
                Err(invalid(format!(
                    "expected E or e with an optional sign, found {:?}",
                    text
                )))
            }
        }
        LeafKind::ColorName => {
            let text = value.as_text().ok_or_else(|| mismatch("text"))?;
            if !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic()) {
                Ok(())
            } else {
                Err(invalid(format!(
                    "expected a non-empty run of letters, found {:?}",
                    text
                )))
            }
        }
        LeafKind::ColorNumber => value.as_integer().map(|_| ()).ok_or_else(|| mismatch("integer")),
        LeafKind::ConditionNumber => {
            let n = value.as_decimal().ok_or_else(|| mismatch("decimal"))?;
            if n.is_finite() {
                Ok(())
            } else {
                Err(invalid(format!("expected a finite number, found {}", n)))
            }
        }
        LeafKind::QuotedText => value.as_text().map(|_| ()).ok_or_else(|| mismatch("text")),
        LeafKind::Whitespace => {
            let text = value.as_text().ok_or_else(|| mismatch("text"))?;
            if !text.is_empty() && text.chars().all(char::is_whitespace) {
                Ok(())
            } else {
                Err(invalid(format!(
                    "expected a non-empty whitespace run, found {:?}",
                    text
                )))
            }
        }
        LeafKind::TextLiteral => {
            let ch = value.as_character().ok_or_else(|| mismatch("character"))?;
            if ch.is_ascii_alphanumeric() {
                Err(invalid(format!(
                    "letters and digits have dedicated kinds, found {:?}",
                    ch
                )))
            } else {
                Ok(())
            }
        }
        LeafKind::Escape | LeafKind::Star | LeafKind::Underscore => value
            .as_character()
            .map(|_| ())
            .ok_or_else(|| mismatch("character")),
        // Fixed literals and letter runs were handled above.
        _ => Err(mismatch("text")),
    }
}

/// A composite token: a kind plus an ordered child list. The token's text
/// is the concatenation of its children's text at construction time.
#[derive(Debug, Clone, PartialEq)]
pub struct ParentToken {
    kind: ParentKind,
    children: Vec<Token>,
    text: String,
}

impl ParentToken {
    /// Build a parent, validating the child list against the kind's shape
    /// rule. The raw list is kept as given; validation runs against the
    /// filtered without-noise view.
    pub fn new(kind: ParentKind, children: Vec<Token>) -> Result<Self, TokenError> {
        validate_children(kind, &children)?;
        let text = children.iter().map(Token::text).collect();
        Ok(ParentToken {
            kind,
            children,
            text,
        })
    }

    pub fn kind(&self) -> ParentKind {
        self.kind
    }

    /// Raw children, in source order, noise included.
    pub fn children(&self) -> &[Token] {
        &self.children
    }

    /// Children with noise (whitespace, separators) filtered out.
    pub fn without_noise(&self) -> Vec<&Token> {
        self.children.iter().filter(|c| !c.is_noise()).collect()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// The single color-name-or-number child of a `Color` token. `None`
    /// for other kinds.
    pub fn name_or_number(&self) -> Option<&Token> {
        if self.kind != ParentKind::Color {
            return None;
        }
        self.children.iter().find(|c| c.is_color_name_or_number())
    }

    /// New parent with different source text, same kind and children.
    pub fn with_text(&self, text: impl Into<String>) -> Result<Self, TokenError> {
        let text = text.into();
        if text.is_empty() {
            return Err(TokenError::EmptyText(self.kind.name()));
        }
        if text.trim().is_empty() {
            return Err(TokenError::BlankText(self.kind.name()));
        }
        Ok(ParentToken {
            kind: self.kind,
            children: self.children.clone(),
            text,
        })
    }

    /// New parent with a different child list, re-validated; the text is
    /// recomputed from the new children.
    pub fn with_children(&self, children: Vec<Token>) -> Result<Self, TokenError> {
        Self::new(self.kind, children)
    }
}

fn validate_children(kind: ParentKind, children: &[Token]) -> Result<(), TokenError> {
    if children.is_empty() {
        return Err(TokenError::EmptyChildren(kind.name()));
    }
    let invalid = |reason: String| TokenError::InvalidChildren {
        kind: kind.name(),
        reason,
    };
    let texts = || {
        children
            .iter()
            .map(|c| format!("{:?}", c.text()))
            .collect::<Vec<_>>()
            .join(", ")
    };

    match kind {
        ParentKind::Color => {
            let count = children
                .iter()
                .filter(|c| !c.is_noise() && c.is_color_name_or_number())
                .count();
            if count != 1 {
                return Err(invalid(format!(
                    "expected exactly one color name or number, found {} in [{}]",
                    count,
                    texts()
                )));
            }
        }
        ParentKind::Fraction => {
            if children.iter().all(Token::is_noise) {
                return Err(invalid(format!(
                    "expected at least one non-noise child, found only [{}]",
                    texts()
                )));
            }
        }
        kind if kind.is_condition() => {
            let count = children
                .iter()
                .filter(|c| c.leaf_kind() == Some(LeafKind::ConditionNumber))
                .count();
            if count != 1 {
                return Err(invalid(format!(
                    "expected exactly one condition number, found {} in [{}]",
                    count,
                    texts()
                )));
            }
        }
        ParentKind::General => {
            let count = children
                .iter()
                .filter(|c| c.leaf_kind() == Some(LeafKind::GeneralSymbol))
                .count();
            if count != 1 {
                return Err(invalid(format!(
                    "expected exactly one General symbol, found {} in [{}]",
                    count,
                    texts()
                )));
            }
        }
        ParentKind::Exponent => {
            let count = children
                .iter()
                .filter(|c| c.leaf_kind() == Some(LeafKind::ExponentSymbol))
                .count();
            if count != 1 {
                return Err(invalid(format!(
                    "expected exactly one exponent symbol, found {} in [{}]",
                    count,
                    texts()
                )));
            }
        }
        _ => {}
    }
    Ok(())
}

/// A node in the parsed pattern tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    Leaf(LeafToken),
    Parent(ParentToken),
}

impl Token {
    /// Exact source text this token was parsed from.
    pub fn text(&self) -> &str {
        match self {
            Token::Leaf(leaf) => leaf.text(),
            Token::Parent(parent) => parent.text(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Token::Leaf(_))
    }

    pub fn is_parent(&self) -> bool {
        matches!(self, Token::Parent(_))
    }

    /// Kind tag when this is a leaf.
    pub fn leaf_kind(&self) -> Option<LeafKind> {
        match self {
            Token::Leaf(leaf) => Some(leaf.kind()),
            Token::Parent(_) => None,
        }
    }

    /// Kind tag when this is a parent.
    pub fn parent_kind(&self) -> Option<ParentKind> {
        match self {
            Token::Leaf(_) => None,
            Token::Parent(parent) => Some(parent.kind()),
        }
    }

    pub fn as_leaf(&self) -> Option<&LeafToken> {
        match self {
            Token::Leaf(leaf) => Some(leaf),
            Token::Parent(_) => None,
        }
    }

    pub fn as_parent(&self) -> Option<&ParentToken> {
        match self {
            Token::Leaf(_) => None,
            Token::Parent(parent) => Some(parent),
        }
    }

    pub fn is_noise(&self) -> bool {
        match self {
            Token::Leaf(leaf) => leaf.is_noise(),
            Token::Parent(_) => false,
        }
    }

    pub fn is_color_name_or_number(&self) -> bool {
        matches!(
            self.leaf_kind(),
            Some(LeafKind::ColorName) | Some(LeafKind::ColorNumber)
        )
    }
}

impl From<LeafToken> for Token {
    fn from(leaf: LeafToken) -> Self {
        Token::Leaf(leaf)
    }
}

impl From<ParentToken> for Token {
    fn from(parent: ParentToken) -> Self {
        Token::Parent(parent)
    }
}
