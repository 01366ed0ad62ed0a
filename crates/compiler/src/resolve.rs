//! Recursive schema resolution

use crate::config::Config;
use crate::descriptor::{
    ClassDescriptor, ExistingTypeDescriptor, FieldDescriptor, MapDescriptor, PrimitiveDescriptor,
    SequenceDescriptor, TypeDescriptor, ValidationBounds, JAVA_LANG_OBJECT,
};
use crate::enums;
use crate::error::{Error, Result};
use crate::names;
use crate::primitive;
use javagen_crd::{AdditionalProperties, SchemaKind, SchemaNode};
use tracing::debug;

/// Object nesting bound. Real CRDs nest far shallower; a cyclic schema
/// hits this immediately.
pub const MAX_DEPTH: usize = 64;

/// Reserved name of the unknown-fields catch-all.
const ADDITIONAL_PROPERTIES: &str = "additionalProperties";

/// The outcome of resolving one schema fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolved {
    /// Descriptor of the fragment itself.
    pub descriptor: TypeDescriptor,

    /// Artifacts discovered below the fragment, child before parent,
    /// excluding `descriptor` itself.
    pub artifacts: Vec<TypeDescriptor>,
}

impl Resolved {
    fn leaf(descriptor: TypeDescriptor) -> Self {
        Self {
            descriptor,
            artifacts: Vec::new(),
        }
    }
}

/// The schema-to-descriptor compiler.
///
/// A pure, synchronous tree transform: one schema in, one descriptor
/// tree out. The configuration is fixed at construction and never
/// mutated, so independent schemas can be compiled from separate
/// instances in parallel.
pub struct SchemaCompiler {
    config: Config,
}

impl SchemaCompiler {
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compile a standalone object schema into an ordered artifact set.
    pub fn compile_object(
        &self,
        schema: &SchemaNode,
        raw_name: &str,
        package: &[String],
    ) -> Result<crate::result::CompiledTypes> {
        let resolved = self.resolve_object(schema, raw_name, package, raw_name, 0)?;
        Ok(crate::result::CompiledTypes::from_resolution(resolved))
    }

    /// Resolve an object schema into a class descriptor plus every
    /// artifact discovered along the way.
    pub(crate) fn resolve_object(
        &self,
        schema: &SchemaNode,
        raw_name: &str,
        package: &[String],
        path: &str,
        depth: usize,
    ) -> Result<Resolved> {
        let simple_name = names::type_name(raw_name);
        let qualified = names::qualify(package, &simple_name);

        // A configured override short-circuits the whole resolution:
        // only a reference is returned, nothing is generated.
        if let Some(existing) = self.config.existing_java_types.get(&qualified) {
            debug!("Substituting existing type {} for {}", existing, qualified);
            return Ok(Resolved::leaf(TypeDescriptor::ExistingType(
                ExistingTypeDescriptor {
                    qualified: existing.clone(),
                },
            )));
        }

        if depth >= MAX_DEPTH {
            return Err(Error::RecursionLimit {
                path: path.to_string(),
                limit: MAX_DEPTH,
            });
        }

        let survivors = names::reduce_collisions(&schema.properties, path)?;

        // Types nested under this class live one package level deeper.
        let nested_package: Vec<String> = package
            .iter()
            .cloned()
            .chain(std::iter::once(names::package_segment(raw_name)))
            .collect();

        let mut fields = Vec::with_capacity(survivors.len());
        let mut artifacts = Vec::new();

        for (raw, child) in survivors {
            let child_path = format!("{path}/{raw}");
            let resolved =
                self.resolve_field_type(child, raw, &nested_package, &qualified, &child_path, depth + 1)?;

            fields.push(FieldDescriptor {
                name: names::field_identifier(raw),
                raw_name: raw.clone(),
                type_name: resolved.descriptor.qualified_name(),
                required: schema.is_required(raw),
                nullable: child.nullable,
                default: child.default.clone(),
                deprecated: names::is_deprecated(child.description.as_deref()),
                description: child.description.clone(),
                bounds: ValidationBounds {
                    minimum: child.minimum,
                    maximum: child.maximum,
                    pattern: child.pattern.clone(),
                },
            });

            artifacts.extend(resolved.artifacts);
            if resolved.descriptor.is_artifact() {
                artifacts.push(resolved.descriptor);
            }
        }

        // The catch-all field sits after the regular fields and is not
        // part of collision reduction.
        let mut preserve_unknown = false;
        if schema.preserve_unknown || self.config.preserve_unknown_fields {
            if !fields.iter().any(|f| f.name == ADDITIONAL_PROPERTIES) {
                fields.push(Self::catch_all_field(JAVA_LANG_OBJECT.to_string()));
                preserve_unknown = true;
            }
        } else if let AdditionalProperties::Typed(value_schema) = &schema.additional {
            let child_path = format!("{path}/{ADDITIONAL_PROPERTIES}");
            let resolved = self.resolve_field_type(
                value_schema,
                ADDITIONAL_PROPERTIES,
                &nested_package,
                &qualified,
                &child_path,
                depth + 1,
            )?;
            let value_type = resolved.descriptor.qualified_name();
            artifacts.extend(resolved.artifacts);
            if resolved.descriptor.is_artifact() {
                artifacts.push(resolved.descriptor);
            }
            fields.push(Self::catch_all_field(value_type));
        }

        let descriptor = TypeDescriptor::Object(ClassDescriptor {
            simple_name,
            package: package.to_vec(),
            description: schema.description.clone(),
            fields,
            preserve_unknown,
        });

        Ok(Resolved {
            descriptor,
            artifacts,
        })
    }

    fn catch_all_field(value_type: String) -> FieldDescriptor {
        FieldDescriptor {
            name: ADDITIONAL_PROPERTIES.to_string(),
            raw_name: ADDITIONAL_PROPERTIES.to_string(),
            type_name: TypeDescriptor::Map(MapDescriptor { value_type }).qualified_name(),
            required: false,
            nullable: None,
            default: None,
            deprecated: false,
            description: None,
            bounds: ValidationBounds::default(),
        }
    }

    /// Dispatch one schema fragment to its resolver.
    ///
    /// `nested_package` is where classes discovered below the owning
    /// object land; `owner` is the qualified name enums nest under.
    fn resolve_field_type(
        &self,
        schema: &SchemaNode,
        raw_name: &str,
        nested_package: &[String],
        owner: &str,
        path: &str,
        depth: usize,
    ) -> Result<Resolved> {
        if schema.is_enum() {
            let descriptor = enums::resolve_enum(
                schema,
                &names::type_name(raw_name),
                owner,
                &self.config,
                path,
            )?;
            return Ok(Resolved::leaf(TypeDescriptor::Enum(descriptor)));
        }

        match schema.kind {
            SchemaKind::Object => {
                // `additionalProperties: true` with nothing else declared
                // is an opaque value, not a class.
                if schema.properties.is_empty()
                    && matches!(schema.additional, AdditionalProperties::Any)
                {
                    return Ok(Resolved::leaf(TypeDescriptor::Primitive(
                        PrimitiveDescriptor {
                            qualified: JAVA_LANG_OBJECT.to_string(),
                            bounds: ValidationBounds::default(),
                        },
                    )));
                }
                self.resolve_object(schema, raw_name, nested_package, path, depth)
            }
            SchemaKind::Array => {
                let items = schema.items.as_deref().ok_or_else(|| Error::UnsupportedShape {
                    path: path.to_string(),
                    detail: "array schema without items".to_string(),
                })?;
                let resolved =
                    self.resolve_field_type(items, raw_name, nested_package, owner, path, depth + 1)?;

                // Arrays own nothing; element artifacts bubble up.
                let item_type = resolved.descriptor.qualified_name();
                let mut artifacts = resolved.artifacts;
                if resolved.descriptor.is_artifact() {
                    artifacts.push(resolved.descriptor);
                }
                Ok(Resolved {
                    descriptor: TypeDescriptor::Array(SequenceDescriptor { item_type }),
                    artifacts,
                })
            }
            SchemaKind::Map => {
                let value_schema =
                    schema
                        .value_schema
                        .as_deref()
                        .ok_or_else(|| Error::UnsupportedShape {
                            path: path.to_string(),
                            detail: "map schema without a value schema".to_string(),
                        })?;
                let resolved = self.resolve_field_type(
                    value_schema,
                    raw_name,
                    nested_package,
                    owner,
                    path,
                    depth + 1,
                )?;

                let value_type = resolved.descriptor.qualified_name();
                let mut artifacts = resolved.artifacts;
                if resolved.descriptor.is_artifact() {
                    artifacts.push(resolved.descriptor);
                }
                Ok(Resolved {
                    descriptor: TypeDescriptor::Map(MapDescriptor { value_type }),
                    artifacts,
                })
            }
            SchemaKind::String | SchemaKind::Integer | SchemaKind::Number | SchemaKind::Boolean => {
                primitive::resolve_primitive(schema, path)
                    .map(|p| Resolved::leaf(TypeDescriptor::Primitive(p)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn compiler() -> SchemaCompiler {
        SchemaCompiler::new(Config::default()).unwrap()
    }

    fn object(properties: Vec<(&str, SchemaNode)>) -> SchemaNode {
        SchemaNode {
            properties: properties
                .into_iter()
                .map(|(n, s)| (n.to_string(), s))
                .collect(),
            ..Default::default()
        }
    }

    fn boolean() -> SchemaNode {
        SchemaNode {
            kind: SchemaKind::Boolean,
            ..Default::default()
        }
    }

    fn pkg(segments: &[&str]) -> Vec<String> {
        segments.iter().map(|s| s.to_string()).collect()
    }

    fn class(descriptor: &TypeDescriptor) -> &ClassDescriptor {
        match descriptor {
            TypeDescriptor::Object(c) => c,
            other => panic!("expected a class, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_object() {
        let result = compiler()
            .compile_object(&object(vec![]), "t", &pkg(&["v1alpha1"]))
            .unwrap();

        assert_eq!(result.top_level.len(), 1);
        assert!(result.inner.is_empty());
        assert_eq!(result.top_level[0].qualified_name(), "v1alpha1.T");
    }

    #[test]
    fn test_object_of_primitives() {
        let schema = SchemaNode {
            required: vec!["o1".to_string()],
            ..object(vec![("o1", boolean()), ("o2", boolean())])
        };
        let result = compiler()
            .compile_object(&schema, "t", &pkg(&["v1alpha1"]))
            .unwrap();

        let t = class(&result.top_level[0]);
        assert_eq!(t.fields.len(), 2);
        assert_eq!(t.fields[0].name, "o1");
        assert_eq!(t.fields[0].type_name, "java.lang.Boolean");
        assert!(t.fields[0].required);
        assert!(!t.fields[1].required);
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let schema = object(vec![
            ("o1", object(vec![("x", boolean())])),
            ("o2", boolean()),
        ]);
        let compiler = compiler();

        let first = compiler
            .compile_object(&schema, "t", &pkg(&["v1alpha1"]))
            .unwrap();
        let second = compiler
            .compile_object(&schema, "t", &pkg(&["v1alpha1"]))
            .unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_nested_artifact_order_is_child_before_parent() {
        // T { o1: object{}, o2: object{ o1, o2, o3 } }
        let schema = object(vec![
            ("o1", object(vec![])),
            (
                "o2",
                object(vec![
                    ("o1", object(vec![])),
                    ("o2", object(vec![])),
                    ("o3", object(vec![])),
                ]),
            ),
        ]);
        let result = compiler()
            .compile_object(&schema, "t", &pkg(&["v1alpha1"]))
            .unwrap();

        let emitted: Vec<String> = result
            .top_level
            .iter()
            .map(|a| a.qualified_name())
            .collect();
        assert_eq!(
            emitted,
            vec![
                "v1alpha1.t.O1",
                "v1alpha1.t.o2.O1",
                "v1alpha1.t.o2.O2",
                "v1alpha1.t.o2.O3",
                "v1alpha1.t.O2",
                "v1alpha1.T",
            ]
        );

        // The root class references its children by qualified name.
        let t = class(result.top_level.last().unwrap());
        assert_eq!(t.fields[0].type_name, "v1alpha1.t.O1");
        assert_eq!(t.fields[1].type_name, "v1alpha1.t.O2");
    }

    #[test]
    fn test_array_and_map_bubble_artifacts() {
        let array_of_objects = SchemaNode {
            kind: SchemaKind::Array,
            items: Some(Box::new(object(vec![("x", boolean())]))),
            ..Default::default()
        };
        let map_of_objects = SchemaNode {
            kind: SchemaKind::Map,
            value_schema: Some(Box::new(object(vec![]))),
            ..Default::default()
        };
        let schema = object(vec![("list", array_of_objects), ("dict", map_of_objects)]);

        let result = compiler().compile_object(&schema, "t", &[]).unwrap();

        let emitted: Vec<String> = result
            .top_level
            .iter()
            .map(|a| a.qualified_name())
            .collect();
        assert_eq!(emitted, vec!["t.List", "t.Dict", "T"]);

        let t = class(result.top_level.last().unwrap());
        assert_eq!(t.fields[0].type_name, "java.util.List<t.List>");
        assert_eq!(
            t.fields[1].type_name,
            "java.util.Map<java.lang.String, t.Dict>"
        );
    }

    #[test]
    fn test_enum_field_becomes_inner_artifact() {
        let enum_schema = SchemaNode {
            kind: SchemaKind::String,
            enum_values: vec![
                Value::String("foo".to_string()),
                Value::String("bar".to_string()),
            ],
            ..Default::default()
        };
        let schema = object(vec![("e1", enum_schema)]);

        let result = compiler()
            .compile_object(&schema, "t", &pkg(&["v1alpha1"]))
            .unwrap();

        assert_eq!(result.top_level.len(), 1);
        assert_eq!(result.inner.len(), 1);
        assert_eq!(result.inner[0].qualified_name(), "v1alpha1.T.E1");

        let t = class(&result.top_level[0]);
        assert_eq!(t.fields[0].type_name, "v1alpha1.T.E1");

        let inner = result.inner_of("v1alpha1.T");
        assert_eq!(inner.len(), 1);
    }

    #[test]
    fn test_existing_type_short_circuits() {
        let mut config = Config::default();
        config.existing_java_types.insert(
            "v1alpha1.T".to_string(),
            "org.test.ExistingJavaType".to_string(),
        );
        let compiler = SchemaCompiler::new(config).unwrap();

        let schema = object(vec![("o1", object(vec![]))]);
        let result = compiler
            .compile_object(&schema, "t", &pkg(&["v1alpha1"]))
            .unwrap();

        // Only a reference comes back, nothing is generated.
        assert_eq!(result.top_level.len(), 0);
        assert_eq!(result.inner.len(), 0);
    }

    #[test]
    fn test_existing_type_as_field_reference() {
        let mut config = Config::default();
        config.existing_java_types.insert(
            "v1alpha1.t.O1".to_string(),
            "org.test.ExistingJavaType".to_string(),
        );
        let compiler = SchemaCompiler::new(config).unwrap();

        let schema = object(vec![("o1", object(vec![]))]);
        let result = compiler
            .compile_object(&schema, "t", &pkg(&["v1alpha1"]))
            .unwrap();

        assert_eq!(result.top_level.len(), 1);
        let t = class(&result.top_level[0]);
        assert_eq!(t.fields[0].type_name, "org.test.ExistingJavaType");
    }

    #[test]
    fn test_preserve_unknown_fields_adds_catch_all() {
        let schema = SchemaNode {
            preserve_unknown: true,
            ..object(vec![("o1", boolean())])
        };
        let result = compiler().compile_object(&schema, "t", &[]).unwrap();

        let t = class(&result.top_level[0]);
        assert!(t.preserve_unknown);
        assert_eq!(t.fields.len(), 2);
        let catch_all = t.fields.last().unwrap();
        assert_eq!(catch_all.name, "additionalProperties");
        assert_eq!(
            catch_all.type_name,
            "java.util.Map<java.lang.String, java.lang.Object>"
        );
    }

    #[test]
    fn test_config_preserve_unknown_fields() {
        let config = Config {
            preserve_unknown_fields: true,
            ..Default::default()
        };
        let compiler = SchemaCompiler::new(config).unwrap();

        let result = compiler.compile_object(&object(vec![]), "t", &[]).unwrap();
        let t = class(&result.top_level[0]);
        assert!(t.preserve_unknown);
        assert_eq!(t.fields.len(), 1);
    }

    #[test]
    fn test_typed_additional_properties_next_to_fields() {
        let schema = SchemaNode {
            additional: AdditionalProperties::Typed(Box::new(boolean())),
            ..object(vec![("o1", boolean())])
        };
        let result = compiler().compile_object(&schema, "t", &[]).unwrap();

        let t = class(&result.top_level[0]);
        assert!(!t.preserve_unknown);
        assert_eq!(t.fields.len(), 2);
        assert_eq!(
            t.fields[1].type_name,
            "java.util.Map<java.lang.String, java.lang.Boolean>"
        );
    }

    #[test]
    fn test_additional_properties_true_field_is_opaque() {
        let any_object = SchemaNode {
            additional: AdditionalProperties::Any,
            ..Default::default()
        };
        let schema = object(vec![("o1", any_object)]);
        let result = compiler().compile_object(&schema, "t", &[]).unwrap();

        assert_eq!(result.top_level.len(), 1);
        let t = class(&result.top_level[0]);
        assert_eq!(t.fields[0].type_name, "java.lang.Object");
    }

    #[test]
    fn test_duplicate_fields_abort_compilation() {
        let nested = object(vec![
            ("testDup", boolean()),
            ("test-Dup", boolean()),
        ]);
        let schema = object(vec![("inner", nested)]);

        let result = compiler().compile_object(&schema, "t", &[]);
        assert!(matches!(result, Err(Error::DuplicateField { .. })));
    }

    #[test]
    fn test_deprecated_duplicates_are_dropped() {
        let deprecated = SchemaNode {
            kind: SchemaKind::Boolean,
            description: Some("Deprecated: use testDup".to_string()),
            ..Default::default()
        };
        let survivor = SchemaNode {
            kind: SchemaKind::Boolean,
            description: Some("the one to keep".to_string()),
            ..Default::default()
        };
        let schema = object(vec![
            ("test_Dup", deprecated.clone()),
            ("testDup", survivor),
            ("test.Dup", deprecated),
        ]);

        let result = compiler().compile_object(&schema, "t", &[]).unwrap();
        let t = class(&result.top_level[0]);
        assert_eq!(t.fields.len(), 1);
        assert_eq!(t.fields[0].raw_name, "testDup");
        assert!(!t.fields[0].deprecated);
    }

    #[test]
    fn test_default_values_are_kept_opaque() {
        let with_default = SchemaNode {
            kind: SchemaKind::String,
            default: Some(Value::String("1024Mi".to_string())),
            ..Default::default()
        };
        let schema = object(vec![("o1", with_default), ("o2", boolean())]);

        let result = compiler().compile_object(&schema, "t", &[]).unwrap();
        let t = class(&result.top_level[0]);
        assert_eq!(
            t.fields[0].default,
            Some(Value::String("1024Mi".to_string()))
        );
        assert_eq!(t.fields[1].default, None);
    }

    #[test]
    fn test_nullable_is_tri_state() {
        let nullable = SchemaNode {
            kind: SchemaKind::Boolean,
            nullable: Some(true),
            ..Default::default()
        };
        let not_nullable = SchemaNode {
            kind: SchemaKind::Boolean,
            nullable: Some(false),
            ..Default::default()
        };
        let schema = object(vec![
            ("o1", nullable),
            ("o2", not_nullable),
            ("o3", boolean()),
        ]);

        let result = compiler().compile_object(&schema, "t", &[]).unwrap();
        let t = class(&result.top_level[0]);
        assert_eq!(t.fields[0].nullable, Some(true));
        assert_eq!(t.fields[1].nullable, Some(false));
        assert_eq!(t.fields[2].nullable, None);
    }

    #[test]
    fn test_recursion_limit_guards_cyclic_schemas() {
        let mut schema = object(vec![]);
        for _ in 0..(MAX_DEPTH + 10) {
            schema = object(vec![("child", schema)]);
        }

        let result = compiler().compile_object(&schema, "t", &[]);
        assert!(matches!(result, Err(Error::RecursionLimit { .. })));
    }
}
