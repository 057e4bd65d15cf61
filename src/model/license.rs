//! License handling for manifest LICENSE fields.
//!
//! Buildroot LICENSE fields range from clean SPDX expressions ("Zlib",
//! "MIT OR Apache-2.0") to comma-joined grab bags ("GPL-2.0, BSD-3-Clause,
//! MIT") that no expression grammar accepts. The declared license of a
//! component is the whole field when it parses as one SPDX expression, and
//! nothing otherwise; [`split_outside_parens`] is the supporting utility for
//! breaking a composite field into its top-level pieces.

/// Split `text` on `separator`, ignoring separators inside parentheses.
///
/// A token may itself contain a well-formed parenthesized sub-expression,
/// e.g. a WITH-exception clause. An unmatched `)` at depth zero is not an
/// error; it is kept in the current token and does not affect nesting. The
/// final token is emitted even when empty, so an empty input yields one
/// empty token and rejoining the tokens with `separator` always reproduces
/// the input.
#[must_use]
pub fn split_outside_parens(text: &str, separator: char) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut depth: u32 = 0;

    for c in text.chars() {
        if c == separator && depth == 0 {
            fragments.push(std::mem::take(&mut current));
        } else {
            current.push(c);
            if c == ')' && depth > 0 {
                depth -= 1;
            }
            if c == '(' {
                depth += 1;
            }
        }
    }

    fragments.push(current);
    fragments
}

/// Validate a LICENSE field as a single SPDX expression.
///
/// Returns the field verbatim when it parses under the strict SPDX grammar,
/// `None` otherwise. Rejection is deliberately quiet; the caller decides
/// whether to surface it.
#[must_use]
pub fn parse_declared(raw: &str) -> Option<String> {
    if raw.is_empty() {
        return None;
    }
    spdx::Expression::parse(raw).ok()?;
    Some(raw.to_string())
}
