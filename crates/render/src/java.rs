//! Java source emission

use crate::{Renderer, SourceUnit};
use anyhow::{anyhow, Result};
use javagen_compiler::{
    ClassDescriptor, CompiledTypes, EnumDescriptor, FieldDescriptor, ResourceDescriptor,
    TypeDescriptor,
};
use tracing::debug;

/// Renders each top-level artifact as one Java compilation unit, with
/// enum artifacts nested inside their owning class.
pub struct JavaRenderer {
    generated_annotations: bool,
}

impl JavaRenderer {
    pub fn new(generated_annotations: bool) -> Self {
        Self {
            generated_annotations,
        }
    }

    fn render_unit(
        &self,
        artifact: &TypeDescriptor,
        inner: &[&TypeDescriptor],
    ) -> Result<SourceUnit> {
        let content = match artifact {
            TypeDescriptor::Object(class) => self.render_class(class, inner),
            TypeDescriptor::CustomResource(resource) => self.render_resource(resource),
            other => {
                return Err(anyhow!(
                    "not a top-level artifact: {}",
                    other.qualified_name()
                ))
            }
        };

        let simple_name = match artifact {
            TypeDescriptor::Object(c) => &c.simple_name,
            TypeDescriptor::CustomResource(r) => &r.simple_name,
            _ => unreachable!(),
        };

        debug!("Rendered unit {}", artifact.qualified_name());

        Ok(SourceUnit {
            qualified_name: artifact.qualified_name(),
            package: artifact.package_path().to_vec(),
            file_name: format!("{simple_name}.java"),
            content,
        })
    }

    fn render_class(&self, class: &ClassDescriptor, inner: &[&TypeDescriptor]) -> String {
        let mut out = String::new();

        self.render_header(&mut out, &class.package, class.description.as_deref());
        out.push_str(&format!("public class {} {{\n", class.simple_name));

        for field in &class.fields {
            out.push('\n');
            self.render_field(&mut out, field);
        }

        for field in &class.fields {
            out.push('\n');
            render_accessors(&mut out, field);
        }

        for artifact in inner {
            if let TypeDescriptor::Enum(e) = artifact {
                out.push('\n');
                render_enum(&mut out, e, "    ");
            }
        }

        out.push_str("}\n");
        out
    }

    fn render_resource(&self, resource: &ResourceDescriptor) -> String {
        let mut out = String::new();

        self.render_header(&mut out, &resource.package, resource.description.as_deref());

        // Annotation block mirrors the resource metadata.
        out.push_str(&format!(
            "@io.fabric8.kubernetes.model.annotation.Version(value = \"{}\", storage = {}, served = {})\n",
            resource.version, resource.storage, resource.served
        ));
        out.push_str(&format!(
            "@io.fabric8.kubernetes.model.annotation.Group(\"{}\")\n",
            resource.group
        ));
        if let Some(singular) = &resource.singular {
            out.push_str(&format!(
                "@io.fabric8.kubernetes.model.annotation.Singular(\"{singular}\")\n"
            ));
        }
        if let Some(plural) = &resource.plural {
            out.push_str(&format!(
                "@io.fabric8.kubernetes.model.annotation.Plural(\"{plural}\")\n"
            ));
        }

        out.push_str(&format!(
            "public class {} extends io.fabric8.kubernetes.client.CustomResource<{}, {}>",
            resource.simple_name, resource.spec_type, resource.status_type
        ));
        if resource.namespaced {
            out.push_str(" implements io.fabric8.kubernetes.api.model.Namespaced");
        }
        out.push_str(" {\n}\n");
        out
    }

    fn render_header(&self, out: &mut String, package: &[String], description: Option<&str>) {
        if !package.is_empty() {
            out.push_str(&format!("package {};\n\n", package.join(".")));
        }
        if let Some(description) = description {
            render_javadoc(out, description, "");
        }
        if self.generated_annotations {
            out.push_str("@javax.annotation.processing.Generated(\"javagen\")\n");
        }
    }

    fn render_field(&self, out: &mut String, field: &FieldDescriptor) {
        if let Some(description) = &field.description {
            render_javadoc(out, description, "    ");
        }

        out.push_str(&format!(
            "    @com.fasterxml.jackson.annotation.JsonProperty(\"{}\")\n",
            field.raw_name
        ));
        if field.required {
            out.push_str("    @io.fabric8.generator.annotation.Required\n");
        }
        // SET keeps explicit nulls for nullable fields, SKIP drops them.
        if field.nullable == Some(true) {
            out.push_str("    @com.fasterxml.jackson.annotation.JsonSetter(nulls = com.fasterxml.jackson.annotation.Nulls.SET)\n");
            out.push_str("    @io.fabric8.generator.annotation.Nullable\n");
        } else {
            out.push_str("    @com.fasterxml.jackson.annotation.JsonSetter(nulls = com.fasterxml.jackson.annotation.Nulls.SKIP)\n");
        }
        if let Some(minimum) = field.bounds.minimum {
            out.push_str(&format!(
                "    @io.fabric8.generator.annotation.Min({minimum})\n"
            ));
        }
        if let Some(maximum) = field.bounds.maximum {
            out.push_str(&format!(
                "    @io.fabric8.generator.annotation.Max({maximum})\n"
            ));
        }
        if let Some(pattern) = &field.bounds.pattern {
            out.push_str(&format!(
                "    @io.fabric8.generator.annotation.Pattern(\"{}\")\n",
                escape(pattern)
            ));
        }
        if field.deprecated {
            out.push_str("    @java.lang.Deprecated\n");
        }

        out.push_str(&format!("    private {} {}", field.type_name, field.name));
        if let Some(default) = &field.default {
            out.push_str(&format!(" = {}", yaml_to_java_literal(default)));
        }
        out.push_str(";\n");
    }
}

impl Renderer for JavaRenderer {
    fn render(&self, types: &CompiledTypes) -> Result<Vec<SourceUnit>> {
        types
            .top_level
            .iter()
            .map(|artifact| {
                let inner = types.inner_of(&artifact.qualified_name());
                self.render_unit(artifact, &inner)
            })
            .collect()
    }
}

fn render_accessors(out: &mut String, field: &FieldDescriptor) {
    let property = capitalize(&field.name);
    out.push_str(&format!(
        "    public {} get{}() {{\n        return {};\n    }}\n\n",
        field.type_name, property, field.name
    ));
    out.push_str(&format!(
        "    public void set{}({} {}) {{\n        this.{} = {};\n    }}\n",
        property, field.type_name, field.name, field.name, field.name
    ));
}

fn render_enum(out: &mut String, descriptor: &EnumDescriptor, indent: &str) {
    if let Some(description) = &descriptor.description {
        render_javadoc(out, description, indent);
    }
    out.push_str(&format!(
        "{indent}public enum {} {{\n",
        descriptor.simple_name
    ));

    let constants: Vec<String> = descriptor
        .entries
        .iter()
        .map(|entry| format!("{indent}    {}({})", entry.name, entry.value))
        .collect();
    out.push_str(&constants.join(",\n"));
    out.push_str(";\n\n");

    out.push_str(&format!(
        "{indent}    private final {} value;\n\n",
        descriptor.backing
    ));
    out.push_str(&format!(
        "{indent}    {}({} value) {{\n{indent}        this.value = value;\n{indent}    }}\n\n",
        descriptor.simple_name, descriptor.backing
    ));
    out.push_str(&format!(
        "{indent}    public {} getValue() {{\n{indent}        return value;\n{indent}    }}\n",
        descriptor.backing
    ));
    out.push_str(&format!("{indent}}}\n"));
}

fn render_javadoc(out: &mut String, description: &str, indent: &str) {
    out.push_str(&format!("{indent}/**\n"));
    for line in description.lines() {
        out.push_str(&format!("{indent} * {}\n", line.replace("*/", "*\\/")));
    }
    out.push_str(&format!("{indent} */\n"));
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Serialize a schema default into a Java initializer expression.
fn yaml_to_java_literal(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::Null => "null".to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::String(s) => format!("\"{}\"", escape(s)),
        serde_yaml::Value::Sequence(seq) => {
            let items: Vec<String> = seq.iter().map(yaml_to_java_literal).collect();
            format!("java.util.List.of({})", items.join(", "))
        }
        serde_yaml::Value::Mapping(map) => {
            let entries: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    let key = k.as_str().unwrap_or_default();
                    format!(
                        "java.util.Map.entry(\"{}\", {})",
                        escape(key),
                        yaml_to_java_literal(v)
                    )
                })
                .collect();
            format!("java.util.Map.ofEntries({})", entries.join(", "))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_java_literal(&tagged.value),
    }
}
