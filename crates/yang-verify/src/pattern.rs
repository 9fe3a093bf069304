//! # Pattern Refinement
//!
//! Applies a schema-declared `pattern` to a string value. The field holds
//! one expression or an ordered list of alternatives; with a list the value
//! must match at least one entry, and an empty list constrains nothing.
//!
//! Expressions are POSIX extended syntax as written in YANG modules and are
//! matched unanchored: a substring match suffices unless the expression
//! anchors itself with `^` / `$`. Each expression is compiled for the call
//! and dropped before returning.

use regex::RegexBuilder;
use serde_json::{Map, Value};

use crate::error::{Outcome, VerifyError};
use crate::schema::PATTERN;

/// Check `value` against the pattern declared in `refinements`.
///
/// # Errors
///
/// - `TypeMismatch` if the value matches no declared pattern, or the
///   `pattern` field is neither a string nor an array.
/// - `SchemaMalformed` if an expression does not compile or a list entry is
///   not a string.
pub fn check_pattern(refinements: &Map<String, Value>, value: &str) -> Outcome {
    match refinements.get(PATTERN) {
        None => Ok(()),
        Some(Value::String(pattern)) => {
            if matches(pattern, value)? {
                Ok(())
            } else {
                Err(VerifyError::mismatch(format!(
                    "{value:?} does not match pattern {pattern:?}"
                )))
            }
        }
        Some(Value::Array(patterns)) => {
            if patterns.is_empty() {
                return Ok(());
            }
            for entry in patterns {
                let pattern = entry.as_str().ok_or_else(|| {
                    VerifyError::malformed(format!("pattern list entry is not a string: {entry}"))
                })?;
                if matches(pattern, value)? {
                    return Ok(());
                }
            }
            Err(VerifyError::mismatch(format!(
                "{value:?} matches none of {} declared patterns",
                patterns.len()
            )))
        }
        Some(other) => Err(VerifyError::mismatch(format!(
            "pattern must be a string or a list of strings, found {other}"
        ))),
    }
}

fn matches(pattern: &str, value: &str) -> Result<bool, VerifyError> {
    // POSIX ERE without REG_NEWLINE: `.` also matches a newline.
    let re = RegexBuilder::new(pattern)
        .dot_matches_new_line(true)
        .build()
        .map_err(|e| VerifyError::malformed(format!("invalid pattern {pattern:?}: {e}")))?;
    Ok(re.is_match(value))
}
