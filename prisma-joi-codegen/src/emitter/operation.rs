use prisma_joi_dmmf::{
    Candidate, Catalog, ModelDescription, OperationKind, ScalarKind, TypeShape,
};

use super::Module;
use super::object::render_imports;
use crate::artifact::FileInfo;
use crate::context::GenerationContext;
use crate::mapper::{ReferenceScope, TypeMapper};

/// One top-level key of an operation schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationKey {
    pub name: &'static str,
    pub candidates: Vec<Candidate>,
    pub required: bool,
}

impl OperationKey {
    fn new(name: &'static str, candidates: Vec<Candidate>) -> Self {
        Self {
            name,
            candidates,
            required: false,
        }
    }

    fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Looks up the model's derived input types in the catalog.
struct KeyBuilder<'a> {
    catalog: &'a Catalog,
    model: &'a str,
}

impl KeyBuilder<'_> {
    fn object(&self, suffix: &str) -> Option<Candidate> {
        let name = format!("{}{suffix}", self.model);
        self.catalog
            .get_object(&name)
            .map(|o| Candidate::new(TypeShape::ObjectRef(o.name.clone())))
    }

    fn objects(&self, suffixes: &[&str]) -> Vec<Candidate> {
        suffixes.iter().filter_map(|s| self.object(s)).collect()
    }

    /// A list and a single form of the same object.
    fn list_or_single(&self, suffix: &str) -> Vec<Candidate> {
        match self.object(suffix) {
            Some(c) => vec![c.clone().list(), c],
            None => Vec::new(),
        }
    }

    fn scalar_field_enum(&self) -> Vec<Candidate> {
        let name = format!("{}ScalarFieldEnum", self.model);
        self.catalog
            .enums
            .iter()
            .find(|e| e.name == name)
            .map(|e| vec![Candidate::new(TypeShape::EnumRef(e.name.clone())).list()])
            .unwrap_or_default()
    }

    fn where_input(&self) -> OperationKey {
        OperationKey::new("where", self.objects(&["WhereInput"]))
    }

    fn where_unique(&self) -> OperationKey {
        OperationKey::new("where", self.objects(&["WhereUniqueInput"])).required()
    }

    fn pagination(&self) -> [OperationKey; 3] {
        [
            OperationKey::new("cursor", self.objects(&["WhereUniqueInput"])),
            OperationKey::new("take", vec![int()]),
            OperationKey::new("skip", vec![int()]),
        ]
    }
}

fn int() -> Candidate {
    Candidate::new(TypeShape::Scalar(ScalarKind::Int))
}

fn boolean() -> Candidate {
    Candidate::new(TypeShape::Scalar(ScalarKind::Boolean))
}

/// The fixed key shape of an operation, before scope filtering.
///
/// Keys whose input types do not exist in the catalog come back with no
/// candidates.
pub fn operation_keys(catalog: &Catalog, model: &str, op: OperationKind) -> Vec<OperationKey> {
    let b = KeyBuilder { catalog, model };

    match op {
        OperationKind::FindUnique => vec![b.where_unique()],
        OperationKind::FindFirst | OperationKind::FindMany => {
            let mut keys = vec![
                b.where_input(),
                OperationKey::new("orderBy", b.list_or_single("OrderByWithRelationInput")),
            ];
            keys.extend(b.pagination());
            keys.push(OperationKey::new("distinct", b.scalar_field_enum()));
            keys
        }
        OperationKind::CreateOne => vec![
            OperationKey::new("data", b.objects(&["CreateInput", "UncheckedCreateInput"])).required(),
        ],
        OperationKind::CreateMany => vec![
            OperationKey::new("data", b.list_or_single("CreateManyInput")).required(),
            OperationKey::new("skipDuplicates", vec![boolean()]),
        ],
        OperationKind::DeleteOne => vec![b.where_unique()],
        OperationKind::DeleteMany => vec![b.where_input()],
        OperationKind::UpdateOne => vec![
            OperationKey::new("data", b.objects(&["UpdateInput", "UncheckedUpdateInput"])).required(),
            b.where_unique(),
        ],
        OperationKind::UpdateMany => vec![
            OperationKey::new(
                "data",
                b.objects(&["UpdateManyMutationInput", "UncheckedUpdateManyInput"]),
            )
            .required(),
            b.where_input(),
        ],
        OperationKind::UpsertOne => vec![
            b.where_unique(),
            OperationKey::new("data", b.objects(&["CreateInput", "UncheckedCreateInput"])).required(),
            OperationKey::new("update", b.objects(&["UpdateInput", "UncheckedUpdateInput"])).required(),
        ],
        OperationKind::Aggregate => {
            let mut keys = vec![
                b.where_input(),
                OperationKey::new("orderBy", b.list_or_single("OrderByWithRelationInput")),
            ];
            keys.extend(b.pagination());
            let count = b
                .object("CountAggregateInput")
                .map(|c| vec![boolean(), c])
                .unwrap_or_default();
            keys.push(OperationKey::new("_count", count));
            for (key, suffix) in [
                ("_min", "MinAggregateInput"),
                ("_max", "MaxAggregateInput"),
                ("_avg", "AvgAggregateInput"),
                ("_sum", "SumAggregateInput"),
            ] {
                keys.push(OperationKey::new(key, b.objects(&[suffix])));
            }
            keys
        }
        OperationKind::GroupBy => vec![
            b.where_input(),
            OperationKey::new("orderBy", b.list_or_single("OrderByWithAggregationInput")),
            OperationKey::new("having", b.objects(&["ScalarWhereWithAggregatesInput"])),
            OperationKey::new("take", vec![int()]),
            OperationKey::new("skip", vec![int()]),
            OperationKey::new("by", b.scalar_field_enum()).required(),
        ],
    }
}

/// Build the schema module of one model operation.
pub fn build_operation(
    ctx: &GenerationContext<'_>,
    scope: &ReferenceScope,
    model: &ModelDescription,
    op: OperationKind,
    op_name: &str,
) -> Module {
    let file = FileInfo::schema(op_name, Some(model.name.clone()));
    let path = ctx.resolver.resolve_path(&file).file_path;

    let mut mapper = TypeMapper::new(op_name, scope);
    let entries: Vec<String> = operation_keys(ctx.catalog, &model.name, op)
        .into_iter()
        .filter_map(|key| {
            let expr = mapper.map_candidates(&key.candidates, false, false)?;
            let marker = if key.required { ".required()" } else { "" };
            Some(format!("  {}: {}{marker},", key.name, expr.render()))
        })
        .collect();

    let export_name = format!("{}{}Schema", model.name, op.export_suffix());
    let mut content = render_imports(ctx, &path, mapper.imports());
    content.push('\n');
    if entries.is_empty() {
        content.push_str(&format!(
            "export const {export_name} = Joi.object().keys({{}}).required();\n"
        ));
    } else {
        content.push_str(&format!(
            "export const {export_name} = Joi.object().keys({{\n{}\n}}).required();\n",
            entries.join("\n")
        ));
    }

    Module {
        file,
        export_name,
        content,
    }
}
