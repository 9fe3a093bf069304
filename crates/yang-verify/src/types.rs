//! # YANG Built-in Types: Classifier and Coarse Compatibility
//!
//! Defines the closed [`YangType`] category set. Every type name a schema
//! can declare maps to exactly one category; names outside the built-in
//! table map to [`YangType::Unrecognized`], which callers resolve as a
//! typedef rather than reject.
//!
//! [`is_compatible`] is the structural gate between a category and the
//! native kind of a JSON value (RFC 7951 encoding rules), applied before a
//! value is reduced to its string form.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Primitive type category of a YANG leaf type.
///
/// | Keyword | Category | JSON encoding |
/// |---------|----------|---------------|
/// | `boolean` | `Boolean` | boolean |
/// | `empty` | `Empty` | null |
/// | `identityref` | `IdentityRef` | any |
/// | `int8` .. `int32` | `Int8` .. `Int32` | number |
/// | `int64` | `Int64` | number or string |
/// | `uint8` .. `uint32` | `Uint8` .. `Uint32` | number |
/// | `uint64` | `Uint64` | number or string |
/// | `leafref` | `LeafRef` | any |
/// | `decimal64` | `Decimal64` | string |
/// | `enumeration` | `Enumeration` | string |
/// | `bits` | `Bits` | string |
/// | `binary` | `Binary` | string |
/// | `string` | `String` | string |
/// | `instance-identifier` | `InstanceIdentifier` | string |
/// | `union` | `Union` | any |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum YangType {
    Boolean,
    Empty,
    #[serde(rename = "identityref")]
    IdentityRef,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    #[serde(rename = "leafref")]
    LeafRef,
    Decimal64,
    Enumeration,
    Bits,
    Binary,
    String,
    InstanceIdentifier,
    Union,
    /// Not a built-in: the name refers to a typedef defined elsewhere.
    Unrecognized,
}

impl YangType {
    /// Every built-in category, in table order. `Unrecognized` is excluded.
    pub fn builtins() -> &'static [YangType] {
        &[
            Self::Boolean,
            Self::Empty,
            Self::IdentityRef,
            Self::Int8,
            Self::Int16,
            Self::Int32,
            Self::Int64,
            Self::Uint8,
            Self::Uint16,
            Self::Uint32,
            Self::Uint64,
            Self::LeafRef,
            Self::Decimal64,
            Self::Enumeration,
            Self::Bits,
            Self::Binary,
            Self::String,
            Self::InstanceIdentifier,
            Self::Union,
        ]
    }

    /// Map a schema type name to its category. Total: unknown names are
    /// `Unrecognized`, never an error. Matching is case-sensitive.
    pub fn classify(type_name: &str) -> Self {
        match type_name {
            "boolean" => Self::Boolean,
            "empty" => Self::Empty,
            "identityref" => Self::IdentityRef,
            "int8" => Self::Int8,
            "int16" => Self::Int16,
            "int32" => Self::Int32,
            "int64" => Self::Int64,
            "uint8" => Self::Uint8,
            "uint16" => Self::Uint16,
            "uint32" => Self::Uint32,
            "uint64" => Self::Uint64,
            "leafref" => Self::LeafRef,
            "decimal64" => Self::Decimal64,
            "enumeration" => Self::Enumeration,
            "bits" => Self::Bits,
            "binary" => Self::Binary,
            "string" => Self::String,
            "instance-identifier" => Self::InstanceIdentifier,
            "union" => Self::Union,
            _ => Self::Unrecognized,
        }
    }

    /// The YANG keyword for this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Empty => "empty",
            Self::IdentityRef => "identityref",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::LeafRef => "leafref",
            Self::Decimal64 => "decimal64",
            Self::Enumeration => "enumeration",
            Self::Bits => "bits",
            Self::Binary => "binary",
            Self::String => "string",
            Self::InstanceIdentifier => "instance-identifier",
            Self::Union => "union",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Whether this is a built-in category.
    pub fn is_builtin(&self) -> bool {
        !matches!(self, Self::Unrecognized)
    }

    /// Whether values of this category are integers subject to range checks.
    pub fn is_integer(&self) -> bool {
        self.intrinsic_bounds().is_some()
    }

    /// Inclusive bit-width bound of an integer category, `None` otherwise.
    ///
    /// This is the mathematical range of the type, used to resolve the
    /// `min` / `max` range keywords. It is not the same as the bound the
    /// value check enforces implicitly (int64 and uint32 defer their upper
    /// bound to a declared range).
    pub fn intrinsic_bounds(&self) -> Option<(i128, i128)> {
        match self {
            Self::Int8 => Some((i8::MIN.into(), i8::MAX.into())),
            Self::Int16 => Some((i16::MIN.into(), i16::MAX.into())),
            Self::Int32 => Some((i32::MIN.into(), i32::MAX.into())),
            Self::Int64 => Some((i64::MIN.into(), i64::MAX.into())),
            Self::Uint8 => Some((0, u8::MAX.into())),
            Self::Uint16 => Some((0, u16::MAX.into())),
            Self::Uint32 => Some((0, u32::MAX.into())),
            Self::Uint64 => Some((0, u64::MAX.into())),
            Self::Boolean
            | Self::Empty
            | Self::IdentityRef
            | Self::LeafRef
            | Self::Decimal64
            | Self::Enumeration
            | Self::Bits
            | Self::Binary
            | Self::String
            | Self::InstanceIdentifier
            | Self::Union
            | Self::Unrecognized => None,
        }
    }
}

impl std::fmt::Display for YangType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a schema type name to its category. See [`YangType::classify`].
pub fn classify(type_name: &str) -> YangType {
    YangType::classify(type_name)
}

/// Native kind of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonKind {
    Null,
    Boolean,
    /// A number with no fractional part.
    Integer,
    /// A number with a fractional part or exponent.
    Number,
    String,
    Array,
    Object,
}

impl JsonKind {
    /// Kind of the given value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_i64() || n.is_u64() => Self::Integer,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Whether the kind is a scalar (anything but array or object).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Self::Array | Self::Object)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }
}

impl std::fmt::Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse structural check of a JSON kind against a type category.
///
/// 64-bit integers may arrive as strings because their full range does not
/// survive a round trip through JSON numbers.
pub fn is_compatible(category: YangType, kind: JsonKind) -> bool {
    match category {
        YangType::Boolean => kind == JsonKind::Boolean,
        YangType::Empty => kind == JsonKind::Null,
        YangType::IdentityRef | YangType::LeafRef | YangType::Union => true,
        YangType::Int8
        | YangType::Int16
        | YangType::Int32
        | YangType::Uint8
        | YangType::Uint16
        | YangType::Uint32 => kind == JsonKind::Integer,
        YangType::Int64 | YangType::Uint64 => {
            matches!(kind, JsonKind::Integer | JsonKind::String)
        }
        YangType::Decimal64
        | YangType::Enumeration
        | YangType::Bits
        | YangType::Binary
        | YangType::String
        | YangType::InstanceIdentifier => kind == JsonKind::String,
        YangType::Unrecognized => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_roundtrips_every_builtin() {
        for t in YangType::builtins() {
            assert_eq!(YangType::classify(t.as_str()), *t);
            assert!(t.is_builtin());
        }
        assert_eq!(YangType::builtins().len(), 19);
    }

    #[test]
    fn classify_unknown_names() {
        assert_eq!(classify("ip-address"), YangType::Unrecognized);
        assert_eq!(classify("inet:port-number"), YangType::Unrecognized);
        assert_eq!(classify("String"), YangType::Unrecognized);
        assert_eq!(classify(""), YangType::Unrecognized);
    }

    #[test]
    fn serde_format_matches_as_str() {
        for t in YangType::builtins() {
            let json = serde_json::to_string(t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }

    #[test]
    fn serde_reads_reference_keywords() {
        let t: YangType = serde_json::from_str("\"identityref\"").unwrap();
        assert_eq!(t, YangType::IdentityRef);
        let t: YangType = serde_json::from_str("\"leafref\"").unwrap();
        assert_eq!(t, YangType::LeafRef);
    }

    #[test]
    fn intrinsic_bounds_only_for_integers() {
        assert_eq!(YangType::Int8.intrinsic_bounds(), Some((-128, 127)));
        assert_eq!(
            YangType::Uint64.intrinsic_bounds(),
            Some((0, 18_446_744_073_709_551_615))
        );
        assert!(YangType::Int64.is_integer());
        assert!(!YangType::Decimal64.is_integer());
        assert!(!YangType::Unrecognized.is_integer());
    }

    #[test]
    fn json_kind_of_values() {
        assert_eq!(JsonKind::of(&json!(null)), JsonKind::Null);
        assert_eq!(JsonKind::of(&json!(true)), JsonKind::Boolean);
        assert_eq!(JsonKind::of(&json!(-3)), JsonKind::Integer);
        assert_eq!(JsonKind::of(&json!(u64::MAX)), JsonKind::Integer);
        assert_eq!(JsonKind::of(&json!(1.5)), JsonKind::Number);
        assert_eq!(JsonKind::of(&json!("x")), JsonKind::String);
        assert_eq!(JsonKind::of(&json!([])), JsonKind::Array);
        assert_eq!(JsonKind::of(&json!({})), JsonKind::Object);
        assert!(!JsonKind::Array.is_scalar());
        assert!(JsonKind::Null.is_scalar());
    }

    #[test]
    fn compatibility_rules() {
        assert!(is_compatible(YangType::Boolean, JsonKind::Boolean));
        assert!(!is_compatible(YangType::Boolean, JsonKind::String));
        assert!(is_compatible(YangType::Empty, JsonKind::Null));
        assert!(!is_compatible(YangType::Empty, JsonKind::Boolean));

        assert!(is_compatible(YangType::Int32, JsonKind::Integer));
        assert!(!is_compatible(YangType::Int32, JsonKind::String));
        assert!(!is_compatible(YangType::Uint8, JsonKind::Number));

        assert!(is_compatible(YangType::Int64, JsonKind::String));
        assert!(is_compatible(YangType::Uint64, JsonKind::Integer));
        assert!(!is_compatible(YangType::Uint64, JsonKind::Boolean));

        assert!(is_compatible(YangType::Decimal64, JsonKind::String));
        assert!(!is_compatible(YangType::Decimal64, JsonKind::Number));
        assert!(!is_compatible(YangType::String, JsonKind::Integer));

        for kind in [JsonKind::Null, JsonKind::Object, JsonKind::Integer] {
            assert!(is_compatible(YangType::Union, kind));
            assert!(is_compatible(YangType::LeafRef, kind));
            assert!(is_compatible(YangType::IdentityRef, kind));
        }
    }
}
