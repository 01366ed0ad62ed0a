//! Identifier normalization and field collision reduction

use crate::error::{Error, Result};
use javagen_crd::SchemaNode;

/// Java reserved words that cannot be used as identifiers.
const RESERVED: &[&str] = &[
    "abstract",
    "assert",
    "boolean",
    "break",
    "byte",
    "case",
    "catch",
    "char",
    "class",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extends",
    "false",
    "final",
    "finally",
    "float",
    "for",
    "goto",
    "if",
    "implements",
    "import",
    "instanceof",
    "int",
    "interface",
    "long",
    "native",
    "new",
    "null",
    "package",
    "private",
    "protected",
    "public",
    "return",
    "short",
    "static",
    "strictfp",
    "super",
    "switch",
    "synchronized",
    "this",
    "throw",
    "throws",
    "transient",
    "true",
    "try",
    "void",
    "volatile",
    "while",
];

fn is_reserved(word: &str) -> bool {
    RESERVED.contains(&word)
}

/// Normalize a raw schema key into a field identifier.
///
/// Characters that are invalid in an identifier act as separators: they
/// are dropped and the following letter is capitalized, so `test_Dup`,
/// `test Dup`, `test.Dup` and `test-Dup` all normalize to `testDup`.
/// This is deliberate — the same normalization is the basis of collision
/// detection.
pub fn field_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut capitalize_next = false;

    for c in raw.chars() {
        if c.is_ascii_alphanumeric() {
            if capitalize_next && !out.is_empty() {
                out.extend(c.to_uppercase());
            } else {
                out.push(c);
            }
            capitalize_next = false;
        } else {
            capitalize_next = true;
        }
    }

    if out.is_empty() {
        return "_".to_string();
    }
    if out.starts_with(|c: char| c.is_ascii_digit()) || is_reserved(&out) {
        out.insert(0, '_');
    }
    out
}

/// Normalize a raw schema key into a capitalized type name.
pub fn type_name(raw: &str) -> String {
    let identifier = field_identifier(raw);
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => identifier,
    }
}

/// Normalize a raw schema key into a package path segment.
pub fn package_segment(raw: &str) -> String {
    let mut segment = field_identifier(raw).to_lowercase();
    if is_reserved(&segment) {
        segment.insert(0, '_');
    }
    segment
}

/// Turn an API group into a package prefix by reversing its segments:
/// `test.org` becomes `org.test`.
pub fn group_to_package(group: &str) -> Vec<String> {
    group.split('.').rev().map(package_segment).collect()
}

/// Join a package path and a simple name into a qualified name.
pub fn qualify(package: &[String], simple_name: &str) -> String {
    if package.is_empty() {
        simple_name.to_string()
    } else {
        format!("{}.{}", package.join("."), simple_name)
    }
}

/// Whether a string is a syntactically valid dotted qualified name.
pub fn is_qualified_name(name: &str) -> bool {
    !name.is_empty()
        && name.split('.').all(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) if first.is_ascii_alphabetic() || first == '_' || first == '$' => {
                    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
                }
                _ => false,
            }
        })
}

/// Whether a description carries the `Deprecated` marker.
pub fn is_deprecated(description: Option<&str>) -> bool {
    description.is_some_and(|d| d.contains("Deprecated"))
}

/// Group raw property names by normalized identifier and reduce each
/// group to its surviving member.
///
/// A group of one passes through. A larger group is accepted only when
/// exactly one member lacks the `Deprecated` marker; that member survives
/// and the deprecated duplicates are dropped. Anything else is a
/// [`Error::DuplicateField`].
pub fn reduce_collisions<'a>(
    properties: &'a [(String, SchemaNode)],
    path: &str,
) -> Result<Vec<&'a (String, SchemaNode)>> {
    let mut groups: Vec<(String, Vec<usize>)> = Vec::new();
    for (index, (raw, _)) in properties.iter().enumerate() {
        let identifier = field_identifier(raw);
        match groups.iter_mut().find(|(id, _)| *id == identifier) {
            Some((_, members)) => members.push(index),
            None => groups.push((identifier, vec![index])),
        }
    }

    let mut survivors = Vec::new();
    for (identifier, members) in &groups {
        if members.len() == 1 {
            survivors.push(members[0]);
            continue;
        }

        let kept: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| !is_deprecated(properties[i].1.description.as_deref()))
            .collect();

        if kept.len() != 1 {
            return Err(Error::DuplicateField {
                path: path.to_string(),
                identifier: identifier.clone(),
                raw_names: members.iter().map(|&i| properties[i].0.clone()).collect(),
            });
        }
        survivors.push(kept[0]);
    }

    survivors.sort_unstable();
    Ok(survivors.iter().map(|&i| &properties[i]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(description: Option<&str>) -> SchemaNode {
        SchemaNode {
            description: description.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_separator_variants_normalize_identically() {
        for raw in ["testDup", "test_Dup", "test Dup", "test.Dup", "test-Dup"] {
            assert_eq!(field_identifier(raw), "testDup", "raw: {raw}");
        }
    }

    #[test]
    fn test_reserved_words_and_digits_are_escaped() {
        assert_eq!(field_identifier("class"), "_class");
        assert_eq!(field_identifier("3scale"), "_3scale");
        assert_eq!(field_identifier("description"), "description");
    }

    #[test]
    fn test_type_name_capitalizes() {
        assert_eq!(type_name("t"), "T");
        assert_eq!(type_name("o1"), "O1");
        assert_eq!(type_name("my-field"), "MyField");
    }

    #[test]
    fn test_package_segment_is_lowercased() {
        assert_eq!(package_segment("MySpec"), "myspec");
        assert_eq!(package_segment("Class"), "_class");
    }

    #[test]
    fn test_group_to_package_reverses_segments() {
        assert_eq!(group_to_package("test.org"), vec!["org", "test"]);
        assert_eq!(
            group_to_package("apps.example.com"),
            vec!["com", "example", "apps"]
        );
    }

    #[test]
    fn test_qualified_name_syntax() {
        assert!(is_qualified_name("org.example.Widget"));
        assert!(is_qualified_name("Widget"));
        assert!(!is_qualified_name("org..Widget"));
        assert!(!is_qualified_name("1org.Widget"));
        assert!(!is_qualified_name("not a type"));
        assert!(!is_qualified_name(""));
    }

    #[test]
    fn test_no_conflicts_pass_through_in_order() {
        let properties = vec![
            ("b".to_string(), node(None)),
            ("a".to_string(), node(None)),
        ];
        let survivors = reduce_collisions(&properties, "t").unwrap();
        let names: Vec<&str> = survivors.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_two_duplicates_without_deprecation_fail() {
        let properties = vec![
            ("testDup".to_string(), node(Some("a field"))),
            ("test-Dup".to_string(), node(Some("another field"))),
        ];
        assert!(matches!(
            reduce_collisions(&properties, "t"),
            Err(Error::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_all_members_deprecated_fail() {
        let properties = vec![
            ("test_Dup".to_string(), node(Some("Deprecated: old"))),
            ("test Dup".to_string(), node(Some("Deprecated: older"))),
            ("test.Dup".to_string(), node(Some("Deprecated: oldest"))),
        ];
        assert!(matches!(
            reduce_collisions(&properties, "t"),
            Err(Error::DuplicateField { .. })
        ));
    }

    #[test]
    fn test_single_survivor_wins() {
        let properties = vec![
            ("test_Dup".to_string(), node(Some("Deprecated: use testDup"))),
            ("testDup".to_string(), node(Some("the real one"))),
            ("test.Dup".to_string(), node(Some("Deprecated: use testDup"))),
        ];
        let survivors = reduce_collisions(&properties, "t").unwrap();
        assert_eq!(survivors.len(), 1);
        assert_eq!(survivors[0].0, "testDup");
    }
}
