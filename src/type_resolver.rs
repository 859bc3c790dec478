//! Pure mapping from declared type references to OpenAPI schema fragments.
//!
//! Resolution is stateless: dispatch happens on the [`TypeRef`] variant tag and
//! never on runtime type names. Unresolvable types fall back to a string schema
//! so document generation always succeeds for partially annotated code.

use crate::metadata::{ModelId, PrimitiveKind, TypeRef};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// OpenAPI schema fragment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Description of the value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The type of the schema (string, number, object, array, etc.)
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<String>,
    /// Format for primitive types (e.g., "date-time", "binary")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    /// Ordered literal values for enum types
    #[serde(rename = "enum", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<serde_json::Value>>,
    /// Example value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
    /// Properties for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<BTreeMap<String, Schema>>,
    /// Required property names for object types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required: Option<Vec<String>>,
    /// Items schema for array types
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// Reference to a component schema
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Subschema composition used for model inheritance
    #[serde(rename = "allOf", skip_serializing_if = "Option::is_none")]
    pub all_of: Option<Vec<Schema>>,
}

impl Schema {
    /// A bare `{type: <name>}` fragment
    pub fn of_type(name: &str) -> Self {
        Schema {
            schema_type: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn string() -> Self {
        Self::of_type("string")
    }

    pub fn object() -> Self {
        Self::of_type("object")
    }

    /// A bare `{$ref}` fragment pointing at a component schema
    pub fn reference(name: &str) -> Self {
        Schema {
            reference: Some(ref_path(name)),
            ..Default::default()
        }
    }
}

/// The `$ref` string for a component schema name
pub fn ref_path(name: &str) -> String {
    format!("#/components/schemas/{}", name)
}

/// Resolve a primitive kind to its fixed schema fragment
pub fn primitive_schema(kind: PrimitiveKind) -> Schema {
    match kind {
        PrimitiveKind::String => Schema::of_type("string"),
        PrimitiveKind::Number => Schema::of_type("number"),
        PrimitiveKind::Boolean => Schema::of_type("boolean"),
        PrimitiveKind::DateTime => Schema {
            schema_type: Some("string".to_string()),
            format: Some("date-time".to_string()),
            ..Default::default()
        },
        PrimitiveKind::Binary => Schema {
            schema_type: Some("string".to_string()),
            format: Some("binary".to_string()),
            ..Default::default()
        },
    }
}

/// Resolve a type reference to a schema fragment.
///
/// Model references are rendered with the identity's declared name; use
/// [`resolve_named`] to apply display-name bindings.
pub fn resolve(type_ref: &TypeRef) -> Schema {
    resolve_named(type_ref, &|id: &ModelId| id.as_str().to_string())
}

/// Resolve a type reference, naming model references through `ref_name`.
///
/// Model references always resolve to a one-hop `$ref`, never an inline
/// expansion, so self-referential and mutually referential models terminate.
pub fn resolve_named(type_ref: &TypeRef, ref_name: &dyn Fn(&ModelId) -> String) -> Schema {
    match type_ref {
        TypeRef::Primitive(kind) => primitive_schema(*kind),
        TypeRef::Array(item) => {
            let items = match item {
                Some(inner) => resolve_named(inner, ref_name),
                // No resolvable item type, fall back to string items
                None => Schema::string(),
            };
            Schema {
                schema_type: Some("array".to_string()),
                items: Some(Box::new(items)),
                ..Default::default()
            }
        }
        TypeRef::Model(id) => {
            debug!("Resolving model reference: {}", id);
            // The type key accompanies the $ref for consumers that read
            // type before following the reference
            Schema {
                schema_type: Some("object".to_string()),
                reference: Some(ref_path(&ref_name(id))),
                ..Default::default()
            }
        }
        TypeRef::InlineObject(fields) => {
            let properties: BTreeMap<String, Schema> = fields
                .iter()
                .map(|(name, ty)| (name.clone(), resolve_named(ty, ref_name)))
                .collect();
            Schema {
                schema_type: Some("object".to_string()),
                properties: Some(properties),
                ..Default::default()
            }
        }
    }
}

/// Resolve an optional type reference, falling back to a string schema
pub fn resolve_or_default(type_ref: Option<&TypeRef>) -> Schema {
    match type_ref {
        Some(ty) => resolve(ty),
        None => {
            debug!("Unresolvable type, using string fallback");
            Schema::string()
        }
    }
}
