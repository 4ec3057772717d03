//! Mapping of classified field shapes to Joi expressions.

use std::collections::HashSet;

use indexmap::IndexSet;
use prisma_joi_dmmf::{Candidate, FieldDescription, ScalarKind, TypeShape};
use smol_str::SmolStr;

/// Enums and objects that are emitted in the current run.
///
/// References to anything outside the scope would produce a dangling
/// import, so the mapper treats them as unusable candidates.
#[derive(Debug, Clone, Default)]
pub struct ReferenceScope {
    enums: HashSet<SmolStr>,
    objects: HashSet<SmolStr>,
}

impl ReferenceScope {
    /// Create a scope from the emitted enum and object names.
    pub fn new(
        enums: impl IntoIterator<Item = SmolStr>,
        objects: impl IntoIterator<Item = SmolStr>,
    ) -> Self {
        Self {
            enums: enums.into_iter().collect(),
            objects: objects.into_iter().collect(),
        }
    }

    pub fn has_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    pub fn has_object(&self, name: &str) -> bool {
        self.objects.contains(name)
    }
}

/// A symbol a module imports from another generated module.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Dependency {
    Enum(SmolStr),
    Object(SmolStr),
}

impl Dependency {
    /// The imported symbol.
    pub fn symbol(&self) -> String {
        match self {
            Self::Enum(name) => enum_symbol(name),
            Self::Object(name) => object_symbol(name),
        }
    }
}

/// Insertion-ordered, deduplicated imports of one module.
#[derive(Debug, Clone, Default)]
pub struct Imports {
    deps: IndexSet<Dependency>,
}

impl Imports {
    /// Register a dependency. Returns false if it was already registered.
    pub fn add(&mut self, dep: Dependency) -> bool {
        self.deps.insert(dep)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dependency> {
        self.deps.iter()
    }

    /// Names of imported enums, in registration order.
    pub fn enums(&self) -> impl Iterator<Item = &SmolStr> {
        self.deps.iter().filter_map(|d| match d {
            Dependency::Enum(name) => Some(name),
            Dependency::Object(_) => None,
        })
    }

    /// Names of imported objects, in registration order.
    pub fn objects(&self) -> impl Iterator<Item = &SmolStr> {
        self.deps.iter().filter_map(|d| match d {
            Dependency::Object(name) => Some(name),
            Dependency::Enum(_) => None,
        })
    }

    pub fn len(&self) -> usize {
        self.deps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deps.is_empty()
    }
}

/// Exported symbol of an enum module.
pub fn enum_symbol(name: &str) -> String {
    format!("{name}Schema")
}

/// Exported symbol of an object module.
pub fn object_symbol(name: &str) -> String {
    format!("{name}SchemaObject")
}

/// The validator expression of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldExpr {
    /// One expression, markers already applied.
    Single(String),
    /// Alternatives, tried in order.
    Alternation(Vec<String>),
}

impl FieldExpr {
    pub fn render(&self) -> String {
        match self {
            Self::Single(expr) => expr.clone(),
            Self::Alternation(options) => {
                format!("Joi.alternatives().try({})", options.join(", "))
            }
        }
    }
}

/// Maps the fields of one owning type, collecting its imports.
#[derive(Debug)]
pub struct TypeMapper<'a> {
    owner: &'a str,
    scope: &'a ReferenceScope,
    imports: Imports,
}

impl<'a> TypeMapper<'a> {
    /// Create a mapper for fields owned by `owner`.
    pub fn new(owner: &'a str, scope: &'a ReferenceScope) -> Self {
        Self {
            owner,
            scope,
            imports: Imports::default(),
        }
    }

    /// Map a field. `None` means no candidate was usable and the field is dropped.
    pub fn map_field(&mut self, field: &FieldDescription) -> Option<FieldExpr> {
        self.map_candidates(&field.candidates, field.is_required, field.is_nullable)
    }

    /// Map a candidate list with explicit markers.
    pub fn map_candidates(
        &mut self,
        candidates: &[Candidate],
        required: bool,
        nullable: bool,
    ) -> Option<FieldExpr> {
        match candidates {
            [] => None,
            [candidate] => {
                let mut expr = self.candidate_expr(candidate, false)?;
                if required {
                    expr.push_str(".required()");
                }
                if nullable {
                    expr.push_str(".allow(null)");
                }
                Some(FieldExpr::Single(expr))
            }
            _ => {
                let options: Vec<String> = candidates
                    .iter()
                    .filter_map(|c| self.candidate_expr(c, true))
                    .collect();
                (!options.is_empty()).then_some(FieldExpr::Alternation(options))
            }
        }
    }

    /// Imports collected so far.
    pub fn imports(&self) -> &Imports {
        &self.imports
    }

    /// Finish mapping and take the imports.
    pub fn into_imports(self) -> Imports {
        self.imports
    }

    fn candidate_expr(&mut self, candidate: &Candidate, in_alternation: bool) -> Option<String> {
        let base = match &candidate.shape {
            TypeShape::Scalar(ScalarKind::Json) if in_alternation => {
                return Some("Joi.any()".to_string());
            }
            TypeShape::Scalar(ScalarKind::Json) => return None,
            TypeShape::Scalar(kind) => scalar_expr(*kind).to_string(),
            TypeShape::SelfRef(name) => format!("Joi.link('#{name}')"),
            TypeShape::EnumRef(name) => {
                if !self.scope.has_enum(name) {
                    return None;
                }
                self.imports.add(Dependency::Enum(name.clone()));
                enum_symbol(name)
            }
            TypeShape::ObjectRef(name) if name == self.owner => format!("Joi.link('#{name}')"),
            TypeShape::ObjectRef(name) => {
                if !self.scope.has_object(name) {
                    return None;
                }
                self.imports.add(Dependency::Object(name.clone()));
                // The id gives `Joi.link('#Name')` inside the referenced keys a target.
                format!("Joi.object().keys({}).id('{name}')", object_symbol(name))
            }
            TypeShape::Unsupported(_) => return None,
        };

        Some(if candidate.is_list {
            format!("Joi.array().items({base})")
        } else {
            base
        })
    }
}

fn scalar_expr(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::String => "Joi.string()",
        ScalarKind::Int | ScalarKind::Float => "Joi.number()",
        ScalarKind::Boolean => "Joi.boolean()",
        ScalarKind::DateTime => "Joi.date()",
        ScalarKind::Json => "Joi.any()",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn scope() -> ReferenceScope {
        ReferenceScope::new(
            ["SortOrder".into(), "QueryMode".into()],
            ["StringFilter".into(), "PostWhereInput".into()],
        )
    }

    fn scalar(kind: ScalarKind) -> Candidate {
        Candidate::new(TypeShape::Scalar(kind))
    }

    #[test]
    fn test_required_scalar() {
        let scope = scope();
        let mut mapper = TypeMapper::new("UserCreateInput", &scope);
        let field = FieldDescription::new("email", vec![scalar(ScalarKind::String)]).required();
        let expr = mapper.map_field(&field).unwrap();
        assert_eq!(expr.render(), "Joi.string().required()");
    }

    #[test]
    fn test_scalar_kinds() {
        let scope = scope();
        let mut mapper = TypeMapper::new("X", &scope);
        let cases = [
            (ScalarKind::Int, "Joi.number()"),
            (ScalarKind::Float, "Joi.number()"),
            (ScalarKind::Boolean, "Joi.boolean()"),
            (ScalarKind::DateTime, "Joi.date()"),
        ];
        for (kind, expected) in cases {
            let field = FieldDescription::new("f", vec![scalar(kind)]);
            assert_eq!(mapper.map_field(&field).unwrap().render(), expected);
        }
    }

    #[test]
    fn test_nullable_list() {
        let scope = scope();
        let mut mapper = TypeMapper::new("X", &scope);
        let field =
            FieldDescription::new("tags", vec![scalar(ScalarKind::String).list()]).nullable();
        assert_eq!(
            mapper.map_field(&field).unwrap().render(),
            "Joi.array().items(Joi.string()).allow(null)"
        );
    }

    #[test]
    fn test_self_reference_is_linked_not_imported() {
        let scope = scope();
        let mut mapper = TypeMapper::new("UserWhereInput", &scope);
        let field = FieldDescription::new(
            "AND",
            vec![
                Candidate::new(TypeShape::SelfRef("UserWhereInput".into())),
                Candidate::new(TypeShape::SelfRef("UserWhereInput".into())).list(),
            ],
        );
        assert_eq!(
            mapper.map_field(&field).unwrap().render(),
            "Joi.alternatives().try(Joi.link('#UserWhereInput'), Joi.array().items(Joi.link('#UserWhereInput')))"
        );
        assert!(mapper.imports().is_empty());
    }

    #[test]
    fn test_alternation_has_no_markers() {
        let scope = scope();
        let mut mapper = TypeMapper::new("UserWhereInput", &scope);
        let field = FieldDescription::new(
            "email",
            vec![
                Candidate::new(TypeShape::ObjectRef("StringFilter".into())),
                scalar(ScalarKind::String),
            ],
        )
        .required()
        .nullable();
        let rendered = mapper.map_field(&field).unwrap().render();
        assert_eq!(
            rendered,
            "Joi.alternatives().try(Joi.object().keys(StringFilterSchemaObject).id('StringFilter'), Joi.string())"
        );
        assert!(!rendered.contains(".required()"));
        assert!(!rendered.contains(".allow(null)"));
    }

    #[test]
    fn test_imports_are_deduplicated_in_order() {
        let scope = scope();
        let mut mapper = TypeMapper::new("UserWhereInput", &scope);
        let filter = Candidate::new(TypeShape::ObjectRef("StringFilter".into()));
        let mode = Candidate::new(TypeShape::EnumRef("QueryMode".into()));

        mapper.map_field(&FieldDescription::new("email", vec![filter.clone()]));
        mapper.map_field(&FieldDescription::new("mode", vec![mode]));
        mapper.map_field(&FieldDescription::new("name", vec![filter]));

        let imports = mapper.into_imports();
        assert_eq!(
            imports.iter().cloned().collect::<Vec<_>>(),
            vec![
                Dependency::Object("StringFilter".into()),
                Dependency::Enum("QueryMode".into()),
            ]
        );
        assert_eq!(imports.enums().count(), 1);
        assert_eq!(imports.objects().count(), 1);
    }

    #[test]
    fn test_enum_reference() {
        let scope = scope();
        let mut mapper = TypeMapper::new("UserOrderByWithRelationInput", &scope);
        let field =
            FieldDescription::new("name", vec![Candidate::new(TypeShape::EnumRef("SortOrder".into()))]);
        assert_eq!(mapper.map_field(&field).unwrap().render(), "SortOrderSchema");
    }

    #[test]
    fn test_json_only_in_alternation() {
        let scope = scope();
        let mut mapper = TypeMapper::new("X", &scope);

        let single = FieldDescription::new("meta", vec![scalar(ScalarKind::Json)]);
        assert_eq!(mapper.map_field(&single), None);

        let multi = FieldDescription::new(
            "meta",
            vec![scalar(ScalarKind::Json).list(), scalar(ScalarKind::String)],
        );
        assert_eq!(
            mapper.map_field(&multi).unwrap().render(),
            "Joi.alternatives().try(Joi.any(), Joi.string())"
        );
    }

    #[test]
    fn test_unusable_candidates_drop_field() {
        let scope = scope();
        let mut mapper = TypeMapper::new("X", &scope);
        let field = FieldDescription::new(
            "amount",
            vec![
                Candidate::new(TypeShape::Unsupported("Decimal".into())),
                Candidate::new(TypeShape::ObjectRef("DecimalFilter".into())),
            ],
        );
        assert_eq!(mapper.map_field(&field), None);
        assert!(mapper.imports().is_empty());
    }

    #[test]
    fn test_out_of_scope_reference_is_skipped() {
        let scope = scope();
        let mut mapper = TypeMapper::new("PostWhereInput", &scope);
        let field = FieldDescription::new(
            "author",
            vec![
                Candidate::new(TypeShape::ObjectRef("UserRelationFilter".into())),
                Candidate::new(TypeShape::ObjectRef("PostWhereInput".into())),
            ],
        );
        assert_eq!(
            mapper.map_field(&field),
            Some(FieldExpr::Alternation(vec!["Joi.link('#PostWhereInput')".into()]))
        );
        assert!(mapper.imports().is_empty());
    }
}
