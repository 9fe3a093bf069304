//! # Schema Node Access
//!
//! Read-only accessors over the JSON encoding of YANG schema nodes. A node
//! looks like:
//!
//! ```json
//! {
//!   "type": "leaf",
//!   "mandatory": true,
//!   "leaf-type": { "leaf-type": "string", "pattern": "^[a-z]+$" }
//! }
//! ```
//!
//! The declared type (`leaf-type`) is either a bare type name or a
//! structured descriptor carrying the name plus `from`/`to` and `pattern`
//! refinements. Typedef fragments returned by a [`TypeLookup`](crate::TypeLookup)
//! use the same descriptor shape.

use serde_json::{Map, Value};

use crate::error::VerifyError;

/// Field holding the declared type of a node, and the type name inside a
/// structured descriptor.
pub const LEAF_TYPE: &str = "leaf-type";
/// Field holding the node kind.
pub const NODE_KIND: &str = "type";
/// Field holding the mandatory flag.
pub const MANDATORY: &str = "mandatory";
/// Lower range bound inside a structured descriptor.
pub const RANGE_FROM: &str = "from";
/// Upper range bound inside a structured descriptor.
pub const RANGE_TO: &str = "to";
/// Pattern refinement inside a structured descriptor.
pub const PATTERN: &str = "pattern";

/// Kind of a schema node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf,
    LeafList,
    Container,
    List,
    /// Any other statement keyword (`choice`, `anydata`, ...).
    Other(String),
}

impl NodeKind {
    pub fn parse(s: &str) -> Self {
        match s {
            "leaf" => Self::Leaf,
            "leaf-list" => Self::LeafList,
            "container" => Self::Container,
            "list" => Self::List,
            other => Self::Other(other.to_string()),
        }
    }

    /// Leaf-kind nodes are the only ones `mandatory` applies to.
    pub fn is_leaf_kind(&self) -> bool {
        matches!(self, Self::Leaf | Self::LeafList)
    }
}

/// Borrowed view of a declared type.
#[derive(Debug, Clone, Copy)]
pub enum TypeDescriptor<'a> {
    /// A bare type name.
    Named(&'a str),
    /// A descriptor object with `leaf-type` and optional refinements.
    Structured(&'a Map<String, Value>),
}

impl<'a> TypeDescriptor<'a> {
    /// View a JSON value as a type descriptor.
    ///
    /// # Errors
    ///
    /// `SchemaMalformed` if the value is neither a string nor an object.
    pub fn from_value(value: &'a Value) -> Result<Self, VerifyError> {
        match value {
            Value::String(name) => Ok(Self::Named(name)),
            Value::Object(map) => Ok(Self::Structured(map)),
            other => Err(VerifyError::malformed(format!(
                "type descriptor must be a name or an object, found {other}"
            ))),
        }
    }

    /// The declared type name.
    ///
    /// # Errors
    ///
    /// `SchemaMalformed` if a structured descriptor lacks a string `leaf-type`.
    pub fn type_name(&self) -> Result<&'a str, VerifyError> {
        match *self {
            Self::Named(name) => Ok(name),
            Self::Structured(map) => map
                .get(LEAF_TYPE)
                .and_then(Value::as_str)
                .ok_or_else(|| {
                    VerifyError::malformed(format!("type descriptor has no string '{LEAF_TYPE}'"))
                }),
        }
    }

    /// Refinement fields, present only for structured descriptors.
    pub fn refinements(&self) -> Option<&'a Map<String, Value>> {
        match *self {
            Self::Named(_) => None,
            Self::Structured(map) => Some(map),
        }
    }
}

/// The declared type of a schema node.
///
/// # Errors
///
/// `SchemaMalformed` if the node has no `leaf-type` field.
pub fn leaf_type(node: &Value) -> Result<&Value, VerifyError> {
    node.get(LEAF_TYPE)
        .ok_or_else(|| VerifyError::malformed(format!("schema node has no '{LEAF_TYPE}'")))
}

/// The node's declared kind, if it has a string `type` field.
pub fn node_kind(node: &Value) -> Option<NodeKind> {
    node.get(NODE_KIND).and_then(Value::as_str).map(NodeKind::parse)
}

/// Whether YANG's `mandatory` constraint applies to the node.
///
/// Only leaf-kind nodes qualify; a node without a kind is treated as a
/// leaf. Returns true only for a boolean `mandatory: true`; anything else,
/// including a malformed flag, is false.
pub fn is_mandatory(node: &Value) -> bool {
    let applies = node_kind(node).map_or(true, |kind| kind.is_leaf_kind());
    applies && node.get(MANDATORY).and_then(Value::as_bool).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn node_kind_parses_known_keywords() {
        assert_eq!(NodeKind::parse("leaf"), NodeKind::Leaf);
        assert_eq!(NodeKind::parse("leaf-list"), NodeKind::LeafList);
        assert_eq!(NodeKind::parse("container"), NodeKind::Container);
        assert_eq!(NodeKind::parse("list"), NodeKind::List);
        assert_eq!(NodeKind::parse("choice"), NodeKind::Other("choice".into()));
    }

    #[test]
    fn descriptor_named_and_structured() {
        let named = json!("int8");
        let d = TypeDescriptor::from_value(&named).unwrap();
        assert_eq!(d.type_name().unwrap(), "int8");
        assert!(d.refinements().is_none());

        let structured = json!({"leaf-type": "int8", "from": "1", "to": "5"});
        let d = TypeDescriptor::from_value(&structured).unwrap();
        assert_eq!(d.type_name().unwrap(), "int8");
        assert_eq!(d.refinements().unwrap()["to"], "5");
    }

    #[test]
    fn descriptor_rejects_other_kinds() {
        for bad in [json!(5), json!(null), json!(["string"]), json!(true)] {
            let err = TypeDescriptor::from_value(&bad).unwrap_err();
            assert!(matches!(err, VerifyError::SchemaMalformed(_)), "{bad}");
        }
    }

    #[test]
    fn structured_descriptor_without_name_is_malformed() {
        let v = json!({"pattern": "x"});
        let d = TypeDescriptor::from_value(&v).unwrap();
        assert!(matches!(d.type_name(), Err(VerifyError::SchemaMalformed(_))));

        let v = json!({"leaf-type": 7});
        let d = TypeDescriptor::from_value(&v).unwrap();
        assert!(matches!(d.type_name(), Err(VerifyError::SchemaMalformed(_))));
    }

    #[test]
    fn leaf_type_missing() {
        assert!(leaf_type(&json!({"type": "leaf"})).is_err());
        assert_eq!(leaf_type(&json!({"leaf-type": "string"})).unwrap(), "string");
    }

    #[test]
    fn mandatory_leaf_kinds() {
        assert!(is_mandatory(&json!({"type": "leaf", "mandatory": true})));
        assert!(is_mandatory(&json!({"type": "leaf-list", "mandatory": true})));
        assert!(!is_mandatory(&json!({"type": "leaf", "mandatory": false})));
        assert!(!is_mandatory(&json!({"type": "leaf"})));
    }

    #[test]
    fn mandatory_never_applies_to_containers_or_lists() {
        assert!(!is_mandatory(&json!({"type": "container", "mandatory": true})));
        assert!(!is_mandatory(&json!({"type": "list", "mandatory": true})));
    }

    #[test]
    fn mandatory_without_kind_reads_flag() {
        assert!(is_mandatory(&json!({"mandatory": true})));
        assert!(!is_mandatory(&json!({})));
    }

    #[test]
    fn malformed_mandatory_flag_defaults_false() {
        assert!(!is_mandatory(&json!({"type": "leaf", "mandatory": "true"})));
        assert!(!is_mandatory(&json!({"type": "leaf", "mandatory": 1})));
    }
}
