use crate::model::fields::FieldDescriptor;
use crate::schema::resolution::{Lookup, ParamExtractor, ScalarType, TableEntry, TypeRule, TypeTable};
use crate::schema::types::SchemaError;

/// Upper bound on relation chains. The source schema graph is expected to
/// be shallow and acyclic; hitting this limit means a cycle or a modeling
/// mistake, and resolution fails rather than recursing further.
pub const MAX_RELATION_DEPTH: usize = 8;

/// Outcome of resolving one field descriptor.
#[derive(Clone, Copy, Debug)]
pub enum Resolution {
    /// The field kind is intentionally omitted from synthesized schemas.
    Skip,
    /// The field maps to `scalar`; `params` is the unevaluated extractor
    /// for extra validation parameters, invoked only for retained fields.
    Type {
        scalar: ScalarType,
        params: Option<ParamExtractor>,
    },
}

/// Resolve one field descriptor against the table.
///
/// Single-valued relation entries recurse into the relation's target field
/// and adopt that field's resolved type, so a relation onto a UUID primary
/// key resolves to a UUID, not to a placeholder. The relation entry's own
/// parameter extractor is kept.
///
/// # Errors
/// Returns a `SchemaError` if the table has no entry for the kind, if a
/// relation descriptor has no target field, or if a relation chain exceeds
/// [`MAX_RELATION_DEPTH`].
pub fn resolve_field(table: &TypeTable, field: &FieldDescriptor) -> Result<Resolution, SchemaError> {
    resolve_at(table, field, 0)
}

fn resolve_at(
    table: &TypeTable,
    field: &FieldDescriptor,
    depth: usize,
) -> Result<Resolution, SchemaError> {
    if depth > MAX_RELATION_DEPTH {
        return Err(SchemaError::RelationDepthExceeded {
            field: field.name.clone(),
        });
    }
    match table.lookup(field) {
        Lookup::Unresolved => Err(SchemaError::UnresolvableField {
            field: field.name.clone(),
            kind: format!("{:?}", field.kind),
        }),
        Lookup::Entry(TableEntry::Skip) => Ok(Resolution::Skip),
        Lookup::Entry(TableEntry::Resolve { target, params }) => match target {
            TypeRule::Scalar(scalar) => Ok(Resolution::Type {
                scalar: *scalar,
                params: *params,
            }),
            TypeRule::RelatedField => {
                let related = field.related.as_ref().ok_or_else(|| {
                    SchemaError::MissingRelationTarget {
                        field: field.name.clone(),
                    }
                })?;
                match resolve_at(table, related, depth + 1)? {
                    Resolution::Type { scalar, .. } => Ok(Resolution::Type {
                        scalar,
                        params: *params,
                    }),
                    Resolution::Skip => Err(SchemaError::UnresolvableField {
                        field: field.name.clone(),
                        kind: format!("{:?}", field.kind),
                    }),
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fields::FieldKind;

    fn resolve(field: &FieldDescriptor) -> Result<Resolution, SchemaError> {
        resolve_field(&TypeTable::new(), field)
    }

    #[test]
    fn relation_adopts_the_target_fields_type() {
        let target = FieldDescriptor::new("id", FieldKind::Uuid);
        let field = FieldDescriptor::relation("owner", FieldKind::ForeignKey, target);
        match resolve(&field).unwrap() {
            Resolution::Type { scalar, .. } => assert_eq!(scalar, ScalarType::Uuid),
            Resolution::Skip => panic!("relation must not skip"),
        }
    }

    #[test]
    fn relation_chain_flattens_to_the_terminal_scalar() {
        let terminal = FieldDescriptor::new("id", FieldKind::BigAuto);
        let middle = FieldDescriptor::relation("account", FieldKind::OneToOne, terminal);
        let field = FieldDescriptor::relation("profile", FieldKind::ForeignKey, middle);
        match resolve(&field).unwrap() {
            Resolution::Type { scalar, .. } => assert_eq!(scalar, ScalarType::Int),
            Resolution::Skip => panic!("relation must not skip"),
        }
    }

    #[test]
    fn relation_without_target_is_an_error() {
        let field = FieldDescriptor::new("owner", FieldKind::ForeignKey);
        match resolve(&field) {
            Err(SchemaError::MissingRelationTarget { field }) => assert_eq!(field, "owner"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn overlong_relation_chain_hits_the_depth_guard() {
        let mut field = FieldDescriptor::new("id", FieldKind::Auto);
        for i in 0..=MAX_RELATION_DEPTH {
            field = FieldDescriptor::relation(format!("link{i}"), FieldKind::ForeignKey, field);
        }
        match resolve(&field) {
            Err(SchemaError::RelationDepthExceeded { .. }) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_kind_is_a_typed_resolution_failure() {
        let field = FieldDescriptor::new("location", FieldKind::Custom("point"));
        match resolve(&field) {
            Err(SchemaError::UnresolvableField { field, .. }) => assert_eq!(field, "location"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn skip_kinds_resolve_to_skip_without_error() {
        let field = FieldDescriptor::new("tags", FieldKind::ManyToMany);
        assert!(matches!(resolve(&field), Ok(Resolution::Skip)));
    }
}
