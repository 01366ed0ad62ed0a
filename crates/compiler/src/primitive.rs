//! Primitive schema resolution

use crate::descriptor::{
    PrimitiveDescriptor, ValidationBounds, JAVA_LANG_BOOLEAN, JAVA_LANG_DOUBLE, JAVA_LANG_FLOAT,
    JAVA_LANG_INTEGER, JAVA_LANG_LONG, JAVA_LANG_STRING, JAVA_MATH_BIG_INTEGER,
    JAVA_TIME_ZONED_DATE_TIME,
};
use crate::error::{Error, Result};
use javagen_crd::{SchemaKind, SchemaNode};

/// Map a primitive `{kind, format}` pair to a qualified Java type.
///
/// Validation bounds travel along as metadata for the backend; nothing
/// is enforced here, and no artifacts are produced.
pub fn resolve_primitive(schema: &SchemaNode, path: &str) -> Result<PrimitiveDescriptor> {
    let format = schema.format.as_deref();

    let qualified = match (schema.kind, format) {
        (SchemaKind::String, Some("date-time")) => JAVA_TIME_ZONED_DATE_TIME,
        (SchemaKind::String, _) => JAVA_LANG_STRING,
        (SchemaKind::Integer, Some("int32")) => JAVA_LANG_INTEGER,
        (SchemaKind::Integer, Some("int64")) => JAVA_LANG_LONG,
        (SchemaKind::Integer, None) => JAVA_MATH_BIG_INTEGER,
        (SchemaKind::Number, Some("float")) => JAVA_LANG_FLOAT,
        (SchemaKind::Number, Some("double") | None) => JAVA_LANG_DOUBLE,
        (SchemaKind::Boolean, _) => JAVA_LANG_BOOLEAN,
        (kind, format) => {
            return Err(Error::UnsupportedShape {
                path: path.to_string(),
                detail: format!("no primitive mapping for {kind:?} with format {format:?}"),
            })
        }
    };

    Ok(PrimitiveDescriptor {
        qualified: qualified.to_string(),
        bounds: ValidationBounds {
            minimum: schema.minimum,
            maximum: schema.maximum,
            pattern: schema.pattern.clone(),
        },
    })
}
