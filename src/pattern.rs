//! Main module for format-pattern parsing functionality

pub mod grammar;
pub mod parsers;
pub mod token;
pub mod visitor;

pub(crate) mod transformer;

pub use parsers::{
    parse_color, parse_condition, parse_date, parse_date_time, parse_expression, parse_fraction,
    parse_general, parse_number, parse_text, parse_time, ParseError, PatternError, PatternParsers,
};
pub use token::{LeafKind, LeafToken, ParentKind, ParentToken, Token, TokenError, TokenValue};
pub use visitor::{TokenVisitor, VisitControl};
