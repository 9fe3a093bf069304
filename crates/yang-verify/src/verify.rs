//! # Leaf and Leaf-List Verification
//!
//! Decides whether a JSON value satisfies the type declared by a YANG
//! schema node. The flow for a scalar:
//!
//! 1. Reject non-scalar values (leafs never hold objects or arrays).
//! 2. Read the node's `leaf-type`.
//! 3. Reduce the value to its string form.
//! 4. Classify the type name and dispatch on the category: built-in
//!    checks, then range / pattern refinements, or typedef resolution for
//!    names outside the built-in table.
//!
//! Leaf-lists run the scalar check per element, then a uniqueness pass on
//! the string forms. Type errors always win over duplicates.
//!
//! ## Typedef Resolution
//!
//! A name the classifier does not recognize is fetched from the
//! [`TypeLookup`], parsed, and verified against recursively. The chain of
//! names in flight is tracked so that a cycle or an over-long chain fails
//! as `SchemaMalformed` instead of recursing without bound.
//!
//! ## Concurrency
//!
//! [`Verifier`] holds no mutable state. It is `Send + Sync` whenever its
//! lookup is, and every call is independent.

use std::borrow::Cow;
use std::collections::HashMap;

use serde_json::Value;

use crate::config::VerifierConfig;
use crate::error::{Outcome, VerifyError};
use crate::lookup::TypeLookup;
use crate::pattern::check_pattern;
use crate::range::{check_range, parse_integer};
use crate::schema::{leaf_type, TypeDescriptor};
use crate::types::{is_compatible, JsonKind, YangType};

/// Follow-up refinement a category is subject to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refinement {
    None,
    Range,
    Pattern,
}

/// Stateless verification service over a typedef lookup.
pub struct Verifier<'a, L: TypeLookup + ?Sized> {
    lookup: &'a L,
    config: VerifierConfig,
}

impl<L: TypeLookup + ?Sized> std::fmt::Debug for Verifier<'_, L> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Verifier")
            .field("lookup", &std::any::type_name::<L>())
            .field("config", &self.config)
            .finish()
    }
}

impl<'a, L: TypeLookup + ?Sized> Verifier<'a, L> {
    /// A verifier with default configuration.
    pub fn new(lookup: &'a L) -> Self {
        Self::with_config(lookup, VerifierConfig::default())
    }

    pub fn with_config(lookup: &'a L, config: VerifierConfig) -> Self {
        Self { lookup, config }
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Verify a scalar JSON value against a leaf schema node.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` for object/array values, values with no string
    ///   form (null), and values violating the declared type.
    /// - `SchemaMalformed` if the node has no `leaf-type` or its type
    ///   cannot be resolved.
    pub fn verify_leaf(&self, value: &Value, node: &Value) -> Outcome {
        let kind = JsonKind::of(value);
        if !kind.is_scalar() {
            return Err(VerifyError::mismatch(format!("leaf value must be scalar, found {kind}")));
        }
        let declared = leaf_type(node)?;
        self.check_encoding(declared, kind)?;
        let text = string_form(value)
            .ok_or_else(|| VerifyError::mismatch(format!("{kind} value has no string form")))?;
        self.check_value(declared, &text)
    }

    /// Verify a JSON array against a leaf-list schema node.
    ///
    /// Every element is type-checked in order; the first failure is
    /// returned. Only when all pass are the string forms checked for
    /// uniqueness, reporting the first later element repeating an earlier
    /// one.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if the value is not an array, or an element fails
    ///   its type check.
    /// - `SchemaMalformed` if the node has no `leaf-type` or its type
    ///   cannot be resolved.
    /// - `IdenticalKeys` if two elements share a string form.
    pub fn verify_leaf_list(&self, value: &Value, node: &Value) -> Outcome {
        let items = value.as_array().ok_or_else(|| {
            VerifyError::mismatch(format!("leaf-list value must be an array, found {}", JsonKind::of(value)))
        })?;
        let declared = leaf_type(node)?;

        let mut forms: Vec<Cow<'_, str>> = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let kind = JsonKind::of(item);
            if !kind.is_scalar() {
                return Err(VerifyError::mismatch(format!(
                    "leaf-list entry {index} must be scalar, found {kind}"
                )));
            }
            self.check_encoding(declared, kind)?;
            let text = string_form(item).ok_or_else(|| {
                VerifyError::mismatch(format!("leaf-list entry {index} ({kind}) has no string form"))
            })?;
            self.check_value(declared, &text)?;
            forms.push(text);
        }

        let mut seen: HashMap<&str, usize> = HashMap::with_capacity(forms.len());
        for (index, text) in forms.iter().enumerate() {
            if let Some(&first) = seen.get(text.as_ref()) {
                return Err(VerifyError::IdenticalKeys {
                    value: text.to_string(),
                    first,
                    duplicate: index,
                });
            }
            seen.insert(text.as_ref(), index);
        }
        Ok(())
    }

    /// Check a value's string form against a type descriptor.
    ///
    /// # Errors
    ///
    /// See [`verify_leaf`](Self::verify_leaf).
    pub fn check_value(&self, descriptor: &Value, value: &str) -> Outcome {
        let mut chain = Vec::new();
        self.check_value_in(descriptor, value, &mut chain)
    }

    /// Resolve `type_name` through the lookup and check `value` against
    /// its definition.
    ///
    /// # Errors
    ///
    /// `SchemaMalformed` if the type is undefined, its definition does not
    /// parse, or the typedef chain loops or runs too deep. Otherwise the
    /// outcome of checking against the definition.
    pub fn resolve_imported(&self, type_name: &str, value: &str) -> Outcome {
        let mut chain = Vec::new();
        self.resolve_in(type_name, value, &mut chain)
    }

    fn check_value_in(&self, descriptor: &Value, value: &str, chain: &mut Vec<String>) -> Outcome {
        let descriptor = TypeDescriptor::from_value(descriptor)?;
        let type_name = descriptor.type_name()?;
        let category = YangType::classify(type_name);
        tracing::trace!(type_name, %category, "dispatching value check");

        let refinement = match category {
            YangType::Boolean => {
                if !matches!(value, "true" | "false" | "1" | "0") {
                    return Err(VerifyError::mismatch(format!("{value:?} is not a boolean")));
                }
                Refinement::None
            }
            YangType::Empty | YangType::IdentityRef | YangType::LeafRef | YangType::Union => {
                Refinement::None
            }
            YangType::Int8
            | YangType::Int16
            | YangType::Int32
            | YangType::Uint8
            | YangType::Uint16 => {
                let n = integer(category, value)?;
                if let Some((lo, hi)) = category.intrinsic_bounds() {
                    if n < lo || n > hi {
                        return Err(VerifyError::mismatch(format!(
                            "{n} outside {category} range {lo}..{hi}"
                        )));
                    }
                }
                Refinement::Range
            }
            YangType::Uint32 => {
                // Upper bound left to a declared range.
                if integer(category, value)? < 0 {
                    return Err(VerifyError::mismatch(format!("{value} is negative for {category}")));
                }
                Refinement::Range
            }
            YangType::Uint64 => {
                let n = integer(category, value)?;
                if n < 0 || n > i128::from(u64::MAX) {
                    return Err(VerifyError::mismatch(format!(
                        "{n} outside {category} range 0..{}",
                        u64::MAX
                    )));
                }
                Refinement::Range
            }
            // No implicit bound; a declared range applies.
            YangType::Int64 => {
                integer(category, value)?;
                Refinement::Range
            }
            YangType::Decimal64
            | YangType::Enumeration
            | YangType::Bits
            | YangType::Binary
            | YangType::InstanceIdentifier => Refinement::None,
            YangType::String => Refinement::Pattern,
            YangType::Unrecognized => return self.resolve_in(type_name, value, chain),
        };

        match (refinement, descriptor.refinements()) {
            (Refinement::Range, Some(refinements)) => check_range(category, refinements, value),
            (Refinement::Pattern, Some(refinements)) => check_pattern(refinements, value),
            _ => Ok(()),
        }
    }

    fn resolve_in(&self, type_name: &str, value: &str, chain: &mut Vec<String>) -> Outcome {
        if chain.iter().any(|seen| seen == type_name) {
            return Err(VerifyError::malformed(format!(
                "typedef cycle: {} -> {type_name}",
                chain.join(" -> ")
            )));
        }
        if chain.len() >= self.config.max_resolution_depth {
            return Err(VerifyError::malformed(format!(
                "typedef chain exceeds {} levels at '{type_name}'",
                self.config.max_resolution_depth
            )));
        }

        let raw = self
            .lookup
            .lookup_type_definition(type_name)
            .ok_or_else(|| VerifyError::malformed(format!("unknown type '{type_name}'")))?;
        let definition: Value = serde_json::from_str(&raw).map_err(|e| {
            VerifyError::malformed(format!("definition of '{type_name}' does not parse: {e}"))
        })?;
        tracing::debug!(type_name, depth = chain.len() + 1, "resolved typedef");

        chain.push(type_name.to_string());
        let outcome = self.check_value_in(&definition, value, chain);
        chain.pop();
        outcome
    }

    /// Strict-mode gate: the value's JSON kind must suit a built-in
    /// top-level type. Typedef names are left to the deeper checks.
    fn check_encoding(&self, declared: &Value, kind: JsonKind) -> Outcome {
        if !self.config.strict_json_encoding {
            return Ok(());
        }
        let category = YangType::classify(TypeDescriptor::from_value(declared)?.type_name()?);
        if is_compatible(category, kind) {
            Ok(())
        } else {
            Err(VerifyError::mismatch(format!(
                "{kind} is not a valid JSON encoding of {category}"
            )))
        }
    }
}

fn integer(category: YangType, value: &str) -> Result<i128, VerifyError> {
    parse_integer(value)
        .ok_or_else(|| VerifyError::mismatch(format!("{value:?} is not a {category} integer")))
}

/// The canonical string form of a scalar JSON value.
///
/// Strings map to themselves, booleans to `true`/`false`, numbers to
/// their JSON rendering. Null, arrays and objects have no string form.
pub fn string_form(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Bool(b) => Some(Cow::Borrowed(if *b { "true" } else { "false" })),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Verify a leaf value with default configuration. See [`Verifier::verify_leaf`].
pub fn verify_leaf<L: TypeLookup + ?Sized>(lookup: &L, value: &Value, node: &Value) -> Outcome {
    Verifier::new(lookup).verify_leaf(value, node)
}

/// Verify a leaf-list value with default configuration. See
/// [`Verifier::verify_leaf_list`].
pub fn verify_leaf_list<L: TypeLookup + ?Sized>(lookup: &L, value: &Value, node: &Value) -> Outcome {
    Verifier::new(lookup).verify_leaf_list(value, node)
}
