//! # Range Refinement
//!
//! Applies a schema-declared `from`/`to` bound to an integer-family value.
//! The bound only applies when both ends are declared; a half-open
//! declaration leaves the type's implicit bound in force.
//!
//! Bounds are decimal strings (`"10"`), JSON integers (`10`), or the YANG
//! keywords `"min"` / `"max"`, which stand for the type's own bit-width
//! limits. A bound that is none of these makes the schema malformed.

use serde_json::{Map, Value};

use crate::error::{Outcome, VerifyError};
use crate::schema::{RANGE_FROM, RANGE_TO};
use crate::types::YangType;

/// Check `value` against the range declared in `refinements`.
///
/// # Errors
///
/// - `SchemaMalformed` if a declared bound cannot be parsed, or `from > to`.
/// - `TypeMismatch` if the value is not a base-10 integer or falls outside
///   `[from, to]`.
pub fn check_range(category: YangType, refinements: &Map<String, Value>, value: &str) -> Outcome {
    let (Some(from), Some(to)) = (refinements.get(RANGE_FROM), refinements.get(RANGE_TO)) else {
        return Ok(());
    };

    let from = parse_bound(category, RANGE_FROM, from)?;
    let to = parse_bound(category, RANGE_TO, to)?;
    if from > to {
        return Err(VerifyError::malformed(format!(
            "{category} range is empty: from {from} exceeds to {to}"
        )));
    }

    let n = parse_integer(value)
        .ok_or_else(|| VerifyError::mismatch(format!("{value:?} is not a {category} integer")))?;
    if n < from || n > to {
        return Err(VerifyError::mismatch(format!(
            "{n} outside declared range {from}..{to}"
        )));
    }
    Ok(())
}

/// Parse a value as a base-10 integer. Accepts an optional leading sign,
/// nothing else: no whitespace, no fraction, no exponent.
pub(crate) fn parse_integer(s: &str) -> Option<i128> {
    s.parse::<i128>().ok()
}

fn parse_bound(category: YangType, field: &str, bound: &Value) -> Result<i128, VerifyError> {
    let intrinsic = category.intrinsic_bounds();
    let parsed = match bound {
        Value::String(s) => match s.trim() {
            "min" => intrinsic.map(|(lo, _)| lo),
            "max" => intrinsic.map(|(_, hi)| hi),
            text => parse_integer(text),
        },
        Value::Number(n) => n
            .as_i64()
            .map(i128::from)
            .or_else(|| n.as_u64().map(i128::from)),
        _ => None,
    };
    parsed.ok_or_else(|| {
        VerifyError::malformed(format!("{category} range bound '{field}' is not an integer: {bound}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn refinements(v: Value) -> Map<String, Value> {
        match v {
            Value::Object(map) => map,
            _ => panic!("test refinements must be an object"),
        }
    }

    #[test]
    fn inside_and_outside_declared_range() {
        let r = refinements(json!({"from": "10", "to": "20"}));
        assert!(check_range(YangType::Int32, &r, "15").is_ok());
        assert!(check_range(YangType::Int32, &r, "10").is_ok());
        assert!(check_range(YangType::Int32, &r, "20").is_ok());
        assert!(matches!(
            check_range(YangType::Int32, &r, "25"),
            Err(VerifyError::TypeMismatch(_))
        ));
        assert!(matches!(
            check_range(YangType::Int32, &r, "9"),
            Err(VerifyError::TypeMismatch(_))
        ));
    }

    #[test]
    fn half_declared_range_is_ignored() {
        let r = refinements(json!({"from": "10"}));
        assert!(check_range(YangType::Int32, &r, "99999").is_ok());
        let r = refinements(json!({"to": "10"}));
        assert!(check_range(YangType::Int32, &r, "99999").is_ok());
    }

    #[test]
    fn numeric_bounds_accepted() {
        let r = refinements(json!({"from": -5, "to": 5}));
        assert!(check_range(YangType::Int8, &r, "-5").is_ok());
        assert!(check_range(YangType::Int8, &r, "6").is_err());
    }

    #[test]
    fn min_max_keywords_use_intrinsic_bounds() {
        let r = refinements(json!({"from": "min", "to": "100"}));
        assert!(check_range(YangType::Int64, &r, "-9223372036854775808").is_ok());
        assert!(check_range(YangType::Int64, &r, "-9223372036854775809").is_err());

        let r = refinements(json!({"from": "1", "to": "max"}));
        assert!(check_range(YangType::Uint64, &r, "18446744073709551615").is_ok());
        assert!(check_range(YangType::Uint64, &r, "18446744073709551616").is_err());
        assert!(check_range(YangType::Uint64, &r, "0").is_err());
    }

    #[test]
    fn malformed_bound_is_schema_error() {
        let r = refinements(json!({"from": "ten", "to": "20"}));
        assert!(matches!(
            check_range(YangType::Int32, &r, "15"),
            Err(VerifyError::SchemaMalformed(_))
        ));
        let r = refinements(json!({"from": "1", "to": 2.5}));
        assert!(matches!(
            check_range(YangType::Int32, &r, "1"),
            Err(VerifyError::SchemaMalformed(_))
        ));
        let r = refinements(json!({"from": "1", "to": ["2"]}));
        assert!(matches!(
            check_range(YangType::Int32, &r, "1"),
            Err(VerifyError::SchemaMalformed(_))
        ));
    }

    #[test]
    fn inverted_range_is_schema_error() {
        let r = refinements(json!({"from": "20", "to": "10"}));
        assert!(matches!(
            check_range(YangType::Int32, &r, "15"),
            Err(VerifyError::SchemaMalformed(_))
        ));
    }

    #[test]
    fn non_integer_value_is_mismatch() {
        let r = refinements(json!({"from": "0", "to": "10"}));
        for bad in ["", "abc", "1.5", " 3", "3 ", "0x5"] {
            assert!(
                matches!(check_range(YangType::Int32, &r, bad), Err(VerifyError::TypeMismatch(_))),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn parse_integer_accepts_signs() {
        assert_eq!(parse_integer("+7"), Some(7));
        assert_eq!(parse_integer("-7"), Some(-7));
        assert_eq!(parse_integer("007"), Some(7));
        assert_eq!(parse_integer("7e1"), None);
    }
}
