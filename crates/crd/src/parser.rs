//! CRD manifest discovery and parsing

use crate::schema::SchemaNode;
use anyhow::{anyhow, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use walkdir::WalkDir;

/// One parsed CustomResourceDefinition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrdSchema {
    /// CRD name (metadata.name).
    pub name: String,

    /// API group.
    pub group: String,

    /// Resource kind (spec.names.kind).
    pub kind: String,

    /// Resource scope: `Namespaced` or `Cluster`.
    pub scope: String,

    /// Singular resource name, when declared.
    pub singular: Option<String>,

    /// Plural resource name, when declared.
    pub plural: Option<String>,

    /// Served versions of this CRD.
    pub versions: Vec<CrdVersion>,

    /// Source file path.
    pub source_path: PathBuf,
}

impl CrdSchema {
    /// The `group/version` pair for one version of this CRD.
    pub fn api_version(&self, version: &CrdVersion) -> String {
        format!("{}/{}", self.group, version.name)
    }
}

/// One served version of a CRD, with its spec/status schemas split out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrdVersion {
    pub name: String,
    pub served: bool,
    pub storage: bool,

    /// The `spec` property of the openAPIV3Schema root, when present.
    pub spec: Option<SchemaNode>,

    /// The `status` property of the openAPIV3Schema root, when present.
    pub status: Option<SchemaNode>,

    /// Root-level `x-kubernetes-preserve-unknown-fields`.
    pub preserve_unknown: bool,

    /// Root schema description.
    pub description: Option<String>,
}

pub struct CrdParser;

impl Default for CrdParser {
    fn default() -> Self {
        Self::new()
    }
}

impl CrdParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse CRDs from a directory, applying `group/version` filters
    pub fn parse_from_directory(
        &self,
        dir_path: &Path,
        filters: &[String],
    ) -> Result<Vec<CrdSchema>> {
        info!("Parsing CRDs from directory: {:?}", dir_path);

        let mut schemas = Vec::new();

        for entry in WalkDir::new(dir_path)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let path = entry.path();

            // Check if it's a YAML file
            if let Some(ext) = path.extension() {
                if ext != "yaml" && ext != "yml" {
                    continue;
                }
            } else {
                continue;
            }

            // Try to parse as CRD
            match self.parse_crd_file(path) {
                Ok(mut crd_schemas) => {
                    for schema in &mut crd_schemas {
                        let group = schema.group.clone();
                        schema
                            .versions
                            .retain(|version| matches_filters(&group, &version.name, filters));
                    }
                    crd_schemas.retain(|schema| !schema.versions.is_empty());
                    schemas.extend(crd_schemas);
                }
                Err(e) => {
                    debug!("Failed to parse {} as CRD: {}", path.display(), e);
                    // Continue with other files
                }
            }
        }

        info!("Found {} CRD schemas after filtering", schemas.len());
        Ok(schemas)
    }

    /// Parse a single manifest file, which may hold several YAML documents
    pub fn parse_crd_file(&self, path: &Path) -> Result<Vec<CrdSchema>> {
        let content = std::fs::read_to_string(path)?;

        let mut schemas = Vec::new();

        for document in serde_yaml::Deserializer::from_str(&content) {
            let doc = serde_yaml::Value::deserialize(document)?;
            if let Some(crd) = self.extract_crd_from_document(&doc, path)? {
                schemas.push(crd);
            }
        }

        Ok(schemas)
    }

    /// Extract CRD information from a YAML document
    fn extract_crd_from_document(
        &self,
        doc: &serde_yaml::Value,
        source_path: &Path,
    ) -> Result<Option<CrdSchema>> {
        // Check if this is a CRD
        if let Some(kind) = doc.get("kind").and_then(|k| k.as_str()) {
            if kind != "CustomResourceDefinition" {
                return Ok(None);
            }
        } else {
            return Ok(None);
        }

        // Extract metadata
        let metadata = doc
            .get("metadata")
            .ok_or_else(|| anyhow!("CRD missing metadata"))?;

        let name = metadata
            .get("name")
            .and_then(|n| n.as_str())
            .ok_or_else(|| anyhow!("CRD missing name"))?;

        // Extract spec
        let spec = doc.get("spec").ok_or_else(|| anyhow!("CRD missing spec"))?;

        let group = spec
            .get("group")
            .and_then(|g| g.as_str())
            .ok_or_else(|| anyhow!("CRD missing group"))?;

        let names = spec.get("names");

        // Fall back to the CRD name if kind is not specified
        let kind = names
            .and_then(|n| n.get("kind"))
            .and_then(|k| k.as_str())
            .unwrap_or(name);

        let singular = names
            .and_then(|n| n.get("singular"))
            .and_then(|s| s.as_str())
            .map(str::to_string);

        let plural = names
            .and_then(|n| n.get("plural"))
            .and_then(|p| p.as_str())
            .map(str::to_string);

        // Kubernetes defaults the scope to Namespaced
        let scope = spec
            .get("scope")
            .and_then(|s| s.as_str())
            .unwrap_or("Namespaced");

        let versions = spec
            .get("versions")
            .and_then(|v| v.as_sequence())
            .ok_or_else(|| anyhow!("CRD missing versions"))?;

        let mut crd_versions = Vec::new();

        for version_doc in versions {
            let version_name = version_doc
                .get("name")
                .and_then(|n| n.as_str())
                .ok_or_else(|| anyhow!("CRD version missing name"))?;

            let served = version_doc
                .get("served")
                .and_then(|s| s.as_bool())
                .unwrap_or(true);
            if !served {
                debug!("Skipping unserved version {}/{}", group, version_name);
                continue;
            }

            let storage = version_doc
                .get("storage")
                .and_then(|s| s.as_bool())
                .unwrap_or(false);

            let root = version_doc
                .get("schema")
                .and_then(|s| s.get("openAPIV3Schema"))
                .ok_or_else(|| anyhow!("CRD version missing openAPIV3Schema"))?;

            crd_versions.push(CrdVersion {
                name: version_name.to_string(),
                served,
                storage,
                spec: self.extract_root_property(root, "spec")?,
                status: self.extract_root_property(root, "status")?,
                preserve_unknown: root
                    .get("x-kubernetes-preserve-unknown-fields")
                    .and_then(|p| p.as_bool())
                    .unwrap_or(false),
                description: root
                    .get("description")
                    .and_then(|d| d.as_str())
                    .map(str::to_string),
            });
        }

        Ok(Some(CrdSchema {
            name: name.to_string(),
            group: group.to_string(),
            kind: kind.to_string(),
            scope: scope.to_string(),
            singular,
            plural,
            versions: crd_versions,
            source_path: source_path.to_path_buf(),
        }))
    }

    /// Pull one top-level property (spec or status) out of the schema root
    fn extract_root_property(
        &self,
        root: &serde_yaml::Value,
        name: &str,
    ) -> Result<Option<SchemaNode>> {
        match root.get("properties").and_then(|p| p.get(name)) {
            Some(value) => Ok(Some(SchemaNode::from_value(value)?)),
            None => Ok(None),
        }
    }
}

/// Check if a CRD version matches the given filters
fn matches_filters(group: &str, version: &str, filters: &[String]) -> bool {
    if filters.is_empty() {
        return true; // No filters means accept all
    }

    filters
        .iter()
        .any(|filter| matches_filter(group, version, filter))
}

/// Check if a CRD version matches a specific filter pattern
fn matches_filter(group: &str, version: &str, filter: &str) -> bool {
    // Convert filter to glob pattern
    let pattern = match Pattern::new(filter) {
        Ok(p) => p,
        Err(_) => return false, // Invalid pattern, skip
    };

    pattern.matches(&format!("{group}/{version}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaKind;

    const SAMPLE_CRD: &str = r#"
apiVersion: apiextensions.k8s.io/v1
kind: CustomResourceDefinition
metadata:
  name: widgets.test.example.com
spec:
  group: test.example.com
  scope: Namespaced
  names:
    kind: Widget
    singular: widget
    plural: widgets
  versions:
    - name: v1alpha1
      served: true
      storage: true
      schema:
        openAPIV3Schema:
          type: object
          properties:
            spec:
              type: object
              properties:
                size:
                  type: integer
                  format: int32
                color:
                  type: string
            status:
              type: object
              properties:
                ready:
                  type: boolean
    - name: v1beta1
      served: false
      storage: false
      schema:
        openAPIV3Schema:
          type: object
"#;

    fn parse_sample() -> CrdSchema {
        let value: serde_yaml::Value = serde_yaml::from_str(SAMPLE_CRD).unwrap();
        CrdParser::new()
            .extract_crd_from_document(&value, Path::new("widgets.yaml"))
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_crd_extraction() {
        let crd = parse_sample();

        assert_eq!(crd.name, "widgets.test.example.com");
        assert_eq!(crd.group, "test.example.com");
        assert_eq!(crd.kind, "Widget");
        assert_eq!(crd.scope, "Namespaced");
        assert_eq!(crd.singular.as_deref(), Some("widget"));
        assert_eq!(crd.plural.as_deref(), Some("widgets"));

        // Unserved versions are skipped
        assert_eq!(crd.versions.len(), 1);
        let version = &crd.versions[0];
        assert_eq!(version.name, "v1alpha1");
        assert!(version.storage);
        assert_eq!(crd.api_version(version), "test.example.com/v1alpha1");
    }

    #[test]
    fn test_spec_and_status_split() {
        let crd = parse_sample();
        let version = &crd.versions[0];

        let spec = version.spec.as_ref().unwrap();
        assert_eq!(spec.kind, SchemaKind::Object);
        assert_eq!(spec.properties.len(), 2);
        assert_eq!(spec.properties[0].0, "size");

        let status = version.status.as_ref().unwrap();
        assert_eq!(status.properties.len(), 1);
    }

    #[test]
    fn test_filter_matching() {
        // Exact match
        assert!(matches_filter(
            "test.example.com",
            "v1alpha1",
            "test.example.com/v1alpha1"
        ));

        // Wildcard match
        assert!(matches_filter(
            "test.example.com",
            "v1alpha1",
            "test.example.com/*"
        ));

        // No match
        assert!(!matches_filter(
            "test.example.com",
            "v1alpha1",
            "other.example.com/v1"
        ));
    }

    #[test]
    fn test_empty_filters() {
        assert!(matches_filters("test.example.com", "v1alpha1", &[]));
    }

    #[test]
    fn test_non_crd_document_is_skipped() {
        let value: serde_yaml::Value =
            serde_yaml::from_str("kind: ConfigMap\nmetadata:\n  name: x").unwrap();
        let result = CrdParser::new()
            .extract_crd_from_document(&value, Path::new("cm.yaml"))
            .unwrap();
        assert!(result.is_none());
    }
}
