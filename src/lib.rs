//! # sheetfmt
//!
//! A parser for spreadsheet number format patterns.
//!
//! A pattern such as `"$#,##0.00;[RED]-$#,##0.00"` is parsed into an
//! immutable tree of typed tokens: digit placeholders, literals, date and
//! time components, currency, color and condition markers, and clause
//! separators. Entry points per dialect live in [`pattern::parsers`], the
//! token data model in [`pattern::token`], tree traversal in
//! [`pattern::visitor`].
//!
//! ```
//! use sheetfmt::pattern::{parse_number, ParentKind};
//!
//! let token = parse_number("#,##0.00").unwrap();
//! assert_eq!(token.parent_kind(), Some(ParentKind::Number));
//! assert_eq!(token.text(), "#,##0.00");
//! ```

pub mod pattern;
