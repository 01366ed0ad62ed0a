//! Top-level custom resource assembly

use crate::descriptor::{ResourceDescriptor, TypeDescriptor, JAVA_LANG_VOID};
use crate::error::Result;
use crate::names;
use crate::resolve::{Resolved, SchemaCompiler};
use crate::result::CompiledTypes;
use javagen_crd::{CrdSchema, CrdVersion, SchemaNode};
use tracing::debug;

impl SchemaCompiler {
    /// Compile one served CRD version into its custom-resource type plus
    /// everything the spec and status schemas produce.
    ///
    /// The resource class lives in the reversed-group package extended
    /// with the version segment; absent spec/status halves bind to
    /// `java.lang.Void`.
    pub fn compile_resource(&self, crd: &CrdSchema, version: &CrdVersion) -> Result<CompiledTypes> {
        debug!(
            "Compiling {}/{} kind {}",
            crd.group, version.name, crd.kind
        );

        let package: Vec<String> = names::group_to_package(&crd.group)
            .into_iter()
            .chain(std::iter::once(names::package_segment(&version.name)))
            .collect();

        let mut artifacts = Vec::new();

        let spec_type = self.resolve_half(
            version.spec.as_ref(),
            version.preserve_unknown,
            &format!("{}Spec", crd.kind),
            &format!("{}/spec", crd.kind),
            &package,
            &mut artifacts,
        )?;
        let status_type = self.resolve_half(
            version.status.as_ref(),
            version.preserve_unknown,
            &format!("{}Status", crd.kind),
            &format!("{}/status", crd.kind),
            &package,
            &mut artifacts,
        )?;

        let descriptor = TypeDescriptor::CustomResource(ResourceDescriptor {
            simple_name: names::type_name(&crd.kind),
            package,
            group: crd.group.clone(),
            version: version.name.clone(),
            scope: crd.scope.clone(),
            singular: crd.singular.clone(),
            plural: crd.plural.clone(),
            storage: version.storage,
            served: version.served,
            namespaced: crd.scope == "Namespaced",
            spec_type,
            status_type,
            description: version.description.clone(),
        });

        Ok(CompiledTypes::from_resolution(Resolved {
            descriptor,
            artifacts,
        }))
    }

    /// Resolve the spec or status schema of a resource, collecting its
    /// artifacts and returning the bound type name.
    fn resolve_half(
        &self,
        schema: Option<&SchemaNode>,
        preserve_unknown: bool,
        raw_name: &str,
        path: &str,
        package: &[String],
        artifacts: &mut Vec<TypeDescriptor>,
    ) -> Result<String> {
        let Some(schema) = schema else {
            return Ok(JAVA_LANG_VOID.to_string());
        };

        // A root-level preserve flag on the CRD version applies to the
        // generated halves as if declared on them.
        let mut schema = schema.clone();
        schema.preserve_unknown |= preserve_unknown;

        let resolved = self.resolve_object(&schema, raw_name, package, path, 0)?;
        let type_name = resolved.descriptor.qualified_name();
        artifacts.extend(resolved.artifacts);
        if resolved.descriptor.is_artifact() {
            artifacts.push(resolved.descriptor);
        }
        Ok(type_name)
    }
}
