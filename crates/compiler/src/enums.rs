//! Enum constant synthesis

use crate::config::Config;
use crate::descriptor::{
    EnumDescriptor, EnumEntryDescriptor, LiteralValue, JAVA_LANG_BOOLEAN, JAVA_LANG_INTEGER,
    JAVA_LANG_LONG, JAVA_LANG_STRING,
};
use crate::error::{Error, Result};
use javagen_crd::{SchemaKind, SchemaNode};
use std::collections::HashSet;

/// The primitive backing of an enum schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backing {
    Str,
    Int,
    Long,
    Bool,
}

/// Resolve an enum schema into a descriptor with one entry per raw
/// literal, in schema order.
pub fn resolve_enum(
    schema: &SchemaNode,
    simple_name: &str,
    owner: &str,
    config: &Config,
    path: &str,
) -> Result<EnumDescriptor> {
    let backing = match (schema.kind, schema.format.as_deref()) {
        (SchemaKind::String, _) => Backing::Str,
        (SchemaKind::Integer, Some("int32")) => Backing::Int,
        (SchemaKind::Integer, _) => Backing::Long,
        (SchemaKind::Boolean, _) => Backing::Bool,
        (kind, _) => {
            return Err(Error::UnsupportedShape {
                path: path.to_string(),
                detail: format!("enums cannot be backed by {kind:?}"),
            })
        }
    };

    if schema.enum_values.is_empty() {
        return Err(Error::UnsupportedShape {
            path: path.to_string(),
            detail: "enum with no values".to_string(),
        });
    }

    let mut entries = Vec::with_capacity(schema.enum_values.len());
    let mut seen = HashSet::new();

    for raw in &schema.enum_values {
        let token = match raw {
            serde_yaml::Value::String(s) => s.clone(),
            serde_yaml::Value::Number(n) => n.to_string(),
            serde_yaml::Value::Bool(b) => b.to_string(),
            other => {
                return Err(Error::UnsupportedShape {
                    path: path.to_string(),
                    detail: format!("enum literal is not a scalar: {other:?}"),
                })
            }
        };

        let entry = synthesize_entry(&token, backing, config, path)?;
        if !seen.insert(entry.name.clone()) {
            return Err(Error::DuplicateEnumConstant {
                path: path.to_string(),
                token,
            });
        }
        entries.push(entry);
    }

    Ok(EnumDescriptor {
        simple_name: simple_name.to_string(),
        owner: owner.to_string(),
        description: schema.description.clone(),
        backing: match backing {
            Backing::Str => JAVA_LANG_STRING,
            Backing::Int => JAVA_LANG_INTEGER,
            Backing::Long => JAVA_LANG_LONG,
            Backing::Bool => JAVA_LANG_BOOLEAN,
        }
        .to_string(),
        entries,
    })
}

fn synthesize_entry(
    token: &str,
    backing: Backing,
    config: &Config,
    path: &str,
) -> Result<EnumEntryDescriptor> {
    let parse_error = |detail: String| Error::UnsupportedShape {
        path: path.to_string(),
        detail,
    };

    Ok(match backing {
        Backing::Str => EnumEntryDescriptor {
            name: string_constant(token, config.enum_uppercase),
            value: LiteralValue::Str(token.to_string()),
        },
        // Bare numeric tokens are not valid identifiers, hence the prefix.
        Backing::Int => EnumEntryDescriptor {
            name: format!("V__{}", token.replace('-', "_")),
            value: LiteralValue::Int(
                token
                    .parse()
                    .map_err(|_| parse_error(format!("enum literal `{token}` is not an int32")))?,
            ),
        },
        Backing::Long => EnumEntryDescriptor {
            name: format!("V__{}", token.replace('-', "_")),
            value: LiteralValue::Long(
                token
                    .parse()
                    .map_err(|_| parse_error(format!("enum literal `{token}` is not an int64")))?,
            ),
        },
        Backing::Bool => {
            let value: bool = token
                .parse()
                .map_err(|_| parse_error(format!("enum literal `{token}` is not a boolean")))?;
            EnumEntryDescriptor {
                name: token.to_uppercase(),
                value: LiteralValue::Bool(value),
            }
        }
    })
}

/// Sanitize a string literal into a constant identifier.
fn string_constant(token: &str, uppercase: bool) -> String {
    let mut name: String = token
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if uppercase {
        name = name.to_uppercase();
    }
    if name.is_empty() || name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    name
}
