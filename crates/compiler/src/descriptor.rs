//! Resolved type and field descriptors

use serde_yaml::Value;
use std::fmt;

pub const JAVA_LANG_STRING: &str = "java.lang.String";
pub const JAVA_LANG_INTEGER: &str = "java.lang.Integer";
pub const JAVA_LANG_LONG: &str = "java.lang.Long";
pub const JAVA_LANG_FLOAT: &str = "java.lang.Float";
pub const JAVA_LANG_DOUBLE: &str = "java.lang.Double";
pub const JAVA_LANG_BOOLEAN: &str = "java.lang.Boolean";
pub const JAVA_LANG_OBJECT: &str = "java.lang.Object";
pub const JAVA_LANG_VOID: &str = "java.lang.Void";
pub const JAVA_MATH_BIG_INTEGER: &str = "java.math.BigInteger";
pub const JAVA_TIME_ZONED_DATE_TIME: &str = "java.time.ZonedDateTime";

/// A resolved schema fragment.
///
/// Object, Enum and CustomResource variants are emittable artifacts;
/// the rest only ever appear as type references. Array and Map store the
/// qualified name of their element type rather than the descriptor
/// itself — artifacts are owned exactly once, by the resolution that
/// discovered them, and referenced everywhere else by qualified name.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    Primitive(PrimitiveDescriptor),
    Array(SequenceDescriptor),
    Map(MapDescriptor),
    Object(ClassDescriptor),
    Enum(EnumDescriptor),
    CustomResource(ResourceDescriptor),
    ExistingType(ExistingTypeDescriptor),
}

impl TypeDescriptor {
    /// The fully-qualified name usable verbatim as a Java type reference.
    pub fn qualified_name(&self) -> String {
        match self {
            TypeDescriptor::Primitive(p) => p.qualified.clone(),
            TypeDescriptor::Array(a) => format!("java.util.List<{}>", a.item_type),
            TypeDescriptor::Map(m) => {
                format!("java.util.Map<java.lang.String, {}>", m.value_type)
            }
            TypeDescriptor::Object(c) => crate::names::qualify(&c.package, &c.simple_name),
            TypeDescriptor::Enum(e) => format!("{}.{}", e.owner, e.simple_name),
            TypeDescriptor::CustomResource(r) => crate::names::qualify(&r.package, &r.simple_name),
            TypeDescriptor::ExistingType(e) => e.qualified.clone(),
        }
    }

    /// The package path of the emitted type, empty for non-artifacts.
    pub fn package_path(&self) -> &[String] {
        match self {
            TypeDescriptor::Object(c) => &c.package,
            TypeDescriptor::CustomResource(r) => &r.package,
            TypeDescriptor::Primitive(_)
            | TypeDescriptor::Array(_)
            | TypeDescriptor::Map(_)
            | TypeDescriptor::Enum(_)
            | TypeDescriptor::ExistingType(_) => &[],
        }
    }

    /// Whether this descriptor becomes an emitted artifact.
    pub fn is_artifact(&self) -> bool {
        matches!(
            self,
            TypeDescriptor::Object(_)
                | TypeDescriptor::Enum(_)
                | TypeDescriptor::CustomResource(_)
        )
    }

    /// Inner artifacts are rendered nested inside their owning type
    /// rather than as standalone source units.
    pub fn is_inner(&self) -> bool {
        matches!(self, TypeDescriptor::Enum(_))
    }
}

/// A primitive type reference with validation metadata passed through
/// for the backend to render; the compiler never enforces the bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveDescriptor {
    pub qualified: String,
    pub bounds: ValidationBounds,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationBounds {
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub pattern: Option<String>,
}

impl ValidationBounds {
    pub fn is_empty(&self) -> bool {
        self.minimum.is_none() && self.maximum.is_none() && self.pattern.is_none()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceDescriptor {
    /// Qualified name of the element type.
    pub item_type: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapDescriptor {
    /// Qualified name of the value type; keys are always strings.
    pub value_type: String,
}

/// A generated class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDescriptor {
    pub simple_name: String,
    pub package: Vec<String>,
    pub description: Option<String>,
    pub fields: Vec<FieldDescriptor>,
    /// Whether the reserved `additionalProperties` catch-all field was added.
    pub preserve_unknown: bool,
}

/// A generated enum, nested inside its owning class.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumDescriptor {
    pub simple_name: String,
    /// Qualified name of the owning class.
    pub owner: String,
    pub description: Option<String>,
    /// Qualified name of the backing primitive type.
    pub backing: String,
    pub entries: Vec<EnumEntryDescriptor>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExistingTypeDescriptor {
    pub qualified: String,
}

/// A generated top-level custom resource class.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceDescriptor {
    pub simple_name: String,
    pub package: Vec<String>,
    pub group: String,
    pub version: String,
    pub scope: String,
    pub singular: Option<String>,
    pub plural: Option<String>,
    pub storage: bool,
    pub served: bool,
    /// Derived capability marker: true iff scope is exactly `Namespaced`.
    pub namespaced: bool,
    /// Qualified name of the spec class, `java.lang.Void` when absent.
    pub spec_type: String,
    /// Qualified name of the status class, `java.lang.Void` when absent.
    pub status_type: String,
    pub description: Option<String>,
}

/// One field of a generated class.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Sanitized, collision-resolved identifier.
    pub name: String,

    /// Original schema key, preserved for wire serialization.
    pub raw_name: String,

    /// Qualified name of the field type.
    pub type_name: String,

    pub required: bool,

    /// Tri-state nullability from the schema.
    pub nullable: Option<bool>,

    /// Declared default value, rendering is the backend's concern.
    pub default: Option<Value>,

    pub deprecated: bool,

    pub description: Option<String>,

    pub bounds: ValidationBounds,
}

/// One synthesized enum constant.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumEntryDescriptor {
    pub name: String,
    pub value: LiteralValue,
}

/// A typed enum constant value.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Str(String),
    Int(i32),
    Long(i64),
    Bool(bool),
}

impl fmt::Display for LiteralValue {
    /// Render as a Java literal; 64-bit values carry the `L` suffix.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Str(s) => {
                write!(f, "\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
            }
            LiteralValue::Int(i) => write!(f, "{i}"),
            LiteralValue::Long(l) => write!(f, "{l}L"),
            LiteralValue::Bool(b) => write!(f, "{b}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_composition() {
        let class = TypeDescriptor::Object(ClassDescriptor {
            simple_name: "T".to_string(),
            package: vec!["v1alpha1".to_string()],
            description: None,
            fields: Vec::new(),
            preserve_unknown: false,
        });
        assert_eq!(class.qualified_name(), "v1alpha1.T");

        let array = TypeDescriptor::Array(SequenceDescriptor {
            item_type: "v1alpha1.T".to_string(),
        });
        assert_eq!(array.qualified_name(), "java.util.List<v1alpha1.T>");

        let map = TypeDescriptor::Map(MapDescriptor {
            value_type: JAVA_LANG_OBJECT.to_string(),
        });
        assert_eq!(
            map.qualified_name(),
            "java.util.Map<java.lang.String, java.lang.Object>"
        );
    }

    #[test]
    fn test_class_without_package() {
        let class = TypeDescriptor::Object(ClassDescriptor {
            simple_name: "T".to_string(),
            package: Vec::new(),
            description: None,
            fields: Vec::new(),
            preserve_unknown: false,
        });
        assert_eq!(class.qualified_name(), "T");
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(LiteralValue::Str("foo".to_string()).to_string(), "\"foo\"");
        assert_eq!(LiteralValue::Int(1).to_string(), "1");
        assert_eq!(LiteralValue::Long(1).to_string(), "1L");
        assert_eq!(LiteralValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_enum_is_inner() {
        let en = TypeDescriptor::Enum(EnumDescriptor {
            simple_name: "E1".to_string(),
            owner: "v1alpha1.T".to_string(),
            description: None,
            backing: JAVA_LANG_STRING.to_string(),
            entries: vec![EnumEntryDescriptor {
                name: "FOO".to_string(),
                value: LiteralValue::Str("foo".to_string()),
            }],
        });
        assert!(en.is_inner());
        assert!(en.is_artifact());
        assert_eq!(en.qualified_name(), "v1alpha1.T.E1");
    }
}
