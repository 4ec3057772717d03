use prisma_joi_dmmf::EnumDescription;

use super::{JOI_IMPORT, Module, quote};
use crate::artifact::FileInfo;
use crate::mapper::enum_symbol;

/// Build the module of one enum: a string validator restricted to its values.
pub fn build_enum(desc: &EnumDescription) -> Module {
    let export_name = enum_symbol(&desc.name);
    let values = desc
        .values
        .iter()
        .map(|v| quote(v))
        .collect::<Vec<_>>()
        .join(", ");

    let content = format!(
        "{JOI_IMPORT}\n\nexport const {export_name} = Joi.string().valid({values});\n"
    );

    Module {
        file: FileInfo::enumeration(desc.name.clone()),
        export_name,
        content,
    }
}
