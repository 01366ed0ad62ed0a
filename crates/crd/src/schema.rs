//! Normalized view of one OpenAPI v3 schema fragment

use anyhow::{anyhow, bail, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

/// The shape of a schema fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaKind {
    Object,
    Array,
    Map,
    String,
    Integer,
    Number,
    Boolean,
}

/// The `additionalProperties` policy of an object fragment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AdditionalProperties {
    /// No additional properties declared.
    None,
    /// `additionalProperties: true` — values of any shape.
    Any,
    /// `additionalProperties: {schema}` — values of one declared shape.
    Typed(Box<SchemaNode>),
}

impl Default for AdditionalProperties {
    fn default() -> Self {
        AdditionalProperties::None
    }
}

/// One normalized schema fragment.
///
/// Built once from the raw YAML document and never mutated afterwards.
/// `properties` keeps the YAML document order, which is the order every
/// downstream consumer observes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaNode {
    pub kind: SchemaKind,

    /// Primitive format hint (e.g. int32, int64, date-time).
    pub format: Option<String>,

    pub description: Option<String>,

    /// Object properties in document order.
    pub properties: Vec<(String, SchemaNode)>,

    /// Raw names of required properties.
    pub required: Vec<String>,

    /// Element schema for arrays.
    pub items: Option<Box<SchemaNode>>,

    /// Value schema for maps.
    pub value_schema: Option<Box<SchemaNode>>,

    /// Raw enum literals in document order.
    pub enum_values: Vec<Value>,

    /// Declared default value, kept opaque.
    pub default: Option<Value>,

    /// Tri-state nullability: absent means "not declared".
    pub nullable: Option<bool>,

    pub additional: AdditionalProperties,

    /// `x-kubernetes-preserve-unknown-fields`.
    pub preserve_unknown: bool,

    /// Numeric validation bounds, passed through untouched.
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,

    /// String validation pattern, passed through untouched.
    pub pattern: Option<String>,
}

impl Default for SchemaNode {
    fn default() -> Self {
        Self {
            kind: SchemaKind::Object,
            format: None,
            description: None,
            properties: Vec::new(),
            required: Vec::new(),
            items: None,
            value_schema: None,
            enum_values: Vec::new(),
            default: None,
            nullable: None,
            additional: AdditionalProperties::None,
            preserve_unknown: false,
            minimum: None,
            maximum: None,
            pattern: None,
        }
    }
}

impl SchemaNode {
    /// Normalize a raw YAML schema fragment.
    pub fn from_value(value: &Value) -> Result<Self> {
        let kind_str = value
            .get("type")
            .and_then(|t| t.as_str())
            .unwrap_or("object");

        let mut node = SchemaNode {
            kind: match kind_str {
                "object" => SchemaKind::Object,
                "array" => SchemaKind::Array,
                "string" => SchemaKind::String,
                "integer" => SchemaKind::Integer,
                "number" => SchemaKind::Number,
                "boolean" => SchemaKind::Boolean,
                other => bail!("unsupported schema type: {other}"),
            },
            format: value
                .get("format")
                .and_then(|f| f.as_str())
                .map(str::to_string),
            description: value
                .get("description")
                .and_then(|d| d.as_str())
                .map(str::to_string),
            default: value.get("default").cloned(),
            nullable: value.get("nullable").and_then(|n| n.as_bool()),
            preserve_unknown: value
                .get("x-kubernetes-preserve-unknown-fields")
                .and_then(|p| p.as_bool())
                .unwrap_or(false),
            minimum: value.get("minimum").and_then(|m| m.as_f64()),
            maximum: value.get("maximum").and_then(|m| m.as_f64()),
            pattern: value
                .get("pattern")
                .and_then(|p| p.as_str())
                .map(str::to_string),
            ..Default::default()
        };

        if let Some(enum_values) = value.get("enum").and_then(|e| e.as_sequence()) {
            node.enum_values = enum_values.to_vec();
        }

        match node.kind {
            SchemaKind::Object => {
                if let Some(properties) = value.get("properties").and_then(|p| p.as_mapping()) {
                    for (key, child) in properties {
                        let name = key
                            .as_str()
                            .ok_or_else(|| anyhow!("non-string property name: {key:?}"))?;
                        node.properties
                            .push((name.to_string(), SchemaNode::from_value(child)?));
                    }
                }

                if let Some(required) = value.get("required").and_then(|r| r.as_sequence()) {
                    node.required = required
                        .iter()
                        .filter_map(|v| v.as_str().map(str::to_string))
                        .collect();
                }

                node.additional = match value.get("additionalProperties") {
                    Some(Value::Bool(true)) => AdditionalProperties::Any,
                    Some(Value::Bool(false)) | None => AdditionalProperties::None,
                    Some(schema) => {
                        AdditionalProperties::Typed(Box::new(SchemaNode::from_value(schema)?))
                    }
                };

                // An object carrying only a typed additionalProperties schema
                // is a map, not a class.
                if node.properties.is_empty()
                    && matches!(node.additional, AdditionalProperties::Typed(_))
                {
                    if let AdditionalProperties::Typed(value_schema) =
                        std::mem::take(&mut node.additional)
                    {
                        node.kind = SchemaKind::Map;
                        node.value_schema = Some(value_schema);
                    }
                }
            }
            SchemaKind::Array => {
                let items = value
                    .get("items")
                    .ok_or_else(|| anyhow!("array schema missing items"))?;
                node.items = Some(Box::new(SchemaNode::from_value(items)?));
            }
            _ => {}
        }

        Ok(node)
    }

    /// Whether this fragment declares an enumeration.
    pub fn is_enum(&self) -> bool {
        !self.enum_values.is_empty()
    }

    /// Whether a raw property name is required.
    pub fn is_required(&self, raw_name: &str) -> bool {
        self.required.iter().any(|r| r == raw_name)
    }
}
