use std::path::Path;

use prisma_joi_dmmf::ObjectDescription;

use super::{JOI_IMPORT, Module};
use crate::artifact::FileInfo;
use crate::context::GenerationContext;
use crate::mapper::{Dependency, Imports, ReferenceScope, TypeMapper, object_symbol};
use crate::paths::{IndexCategory, PathResolver};

/// Build the module of an input object or field-ref type.
pub fn build_object(
    ctx: &GenerationContext<'_>,
    scope: &ReferenceScope,
    desc: &ObjectDescription,
) -> Module {
    let file = ctx.object_file_info(&desc.name);
    let path = ctx.resolver.resolve_path(&file).file_path;

    let mut mapper = TypeMapper::new(&desc.name, scope);
    let entries: Vec<String> = desc
        .fields
        .iter()
        .filter_map(|field| {
            mapper
                .map_field(field)
                .map(|expr| format!("  {}: {},", field.name, expr.render()))
        })
        .collect();

    let export_name = object_symbol(&desc.name);
    let mut content = render_imports(ctx, &path, mapper.imports());
    content.push('\n');
    if entries.is_empty() {
        content.push_str(&format!("export const {export_name} = {{}};\n"));
    } else {
        content.push_str(&format!(
            "export const {export_name} = {{\n{}\n}};\n",
            entries.join("\n")
        ));
    }

    Module {
        file,
        export_name,
        content,
    }
}

/// The import block of a module at `from`: the Joi header and one line per dependency.
pub(super) fn render_imports(ctx: &GenerationContext<'_>, from: &Path, imports: &Imports) -> String {
    let mut out = String::from(JOI_IMPORT);
    out.push('\n');

    for dep in imports.iter() {
        let target = match dep {
            Dependency::Object(name) => ctx.resolver.resolve_path(&ctx.object_file_info(name)).file_path,
            // Without index files, enums are imported from their own modules.
            Dependency::Enum(_) if ctx.config.generate_index => {
                ctx.resolver.resolve_index_path(IndexCategory::Enums).file_path
            }
            Dependency::Enum(name) => {
                ctx.resolver
                    .resolve_path(&FileInfo::enumeration(name.clone()))
                    .file_path
            }
        };
        out.push_str(&format!(
            "import {{ {} }} from '{}';\n",
            dep.symbol(),
            PathResolver::import_between(from, &target)
        ));
    }

    out
}
