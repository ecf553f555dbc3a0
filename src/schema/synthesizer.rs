use crate::model::definition::ModelDefinition;
use crate::model::fields::FieldDefault;
use crate::schema::resolution::TypeTable;
use crate::schema::resolver::{resolve_field, Resolution};
use crate::schema::types::{FieldSpec, Schema, SchemaDefault, SchemaError};
use std::collections::HashSet;

/// Options controlling one synthesis call.
///
/// `include` retains only the named fields; `exclude` drops the named fields
/// and wins over `include` when both name the same field. Both match the
/// declared field name as well as the canonical schema key. `skip_unknown`
/// (on by default) silently drops fields whose kind has no table entry;
/// when off, such a field aborts the whole synthesis.
#[derive(Clone, Debug)]
pub struct SynthesizeOptions {
    pub include: Option<HashSet<String>>,
    pub exclude: Option<HashSet<String>>,
    pub skip_unknown: bool,
}

impl Default for SynthesizeOptions {
    fn default() -> Self {
        Self {
            include: None,
            exclude: None,
            skip_unknown: true,
        }
    }
}

impl SynthesizeOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_include<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude = Some(names.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_skip_unknown(mut self, skip_unknown: bool) -> Self {
        self.skip_unknown = skip_unknown;
        self
    }
}

/// Synthesize a validation schema from a source model definition.
///
/// Iterates the model's full field list in declaration order and, per
/// field: filters by name, resolves the target type through `table`,
/// classifies optionality from storage nullability and blankness, adopts
/// declared defaults (factories stay deferred and are re-evaluated per
/// validation), collects title/description/constraint metadata, and records
/// the declared name as an alias when it differs from the canonical key.
/// The resulting schema carries the model's documentation string and no
/// live reference to the model.
///
/// # Errors
/// Returns `SchemaError::UnresolvableField` when a field kind has no table
/// entry and `skip_unknown` is off, and propagates relation resolution
/// failures. No partial schema is returned on error.
pub fn synthesize(
    table: &TypeTable,
    model: &ModelDefinition,
    options: &SynthesizeOptions,
) -> Result<Schema, SchemaError> {
    let mut schema = Schema::new(model.name.clone(), model.doc.clone());

    for field in model.get_fields() {
        let key = field.schema_key();

        if let Some(exclude) = &options.exclude {
            if exclude.contains(&field.name) || exclude.contains(key) {
                continue;
            }
        }
        if let Some(include) = &options.include {
            if !include.contains(&field.name) && !include.contains(key) {
                continue;
            }
        }

        let (scalar, extractor) = match resolve_field(table, field) {
            Ok(Resolution::Skip) => {
                log::debug!(
                    "skipping field `{}` on model `{}`: kind {:?} is not representable",
                    field.name,
                    model.name,
                    field.kind
                );
                continue;
            }
            Ok(Resolution::Type { scalar, params }) => (scalar, params),
            Err(SchemaError::UnresolvableField { .. }) if options.skip_unknown => {
                log::debug!(
                    "skipping unresolvable field `{}` on model `{}` (kind {:?})",
                    field.name,
                    model.name,
                    field.kind
                );
                continue;
            }
            Err(err) => return Err(err),
        };

        let mut nullable = false;
        let mut default = SchemaDefault::Required;
        if field.null {
            nullable = true;
            if field.blank {
                // Null as the default is what makes the field optional in a
                // request contract, beyond being merely nullable.
                default = SchemaDefault::Null;
            }
        }
        if !matches!(default, SchemaDefault::Null) {
            match &field.default {
                FieldDefault::NotSet => {}
                FieldDefault::Value(value) => default = SchemaDefault::Value(value.clone()),
                FieldDefault::Factory(factory) => {
                    // A factory replaces any literal default outright.
                    default = SchemaDefault::Factory(factory.clone());
                }
            }
        }

        let params = extractor.map(|extract| extract(field)).unwrap_or_default();
        let title = field
            .verbose_name
            .clone()
            .unwrap_or_else(|| key.to_string());
        let description = field.help_text.clone().unwrap_or_default();

        let mut spec = FieldSpec::new(key, scalar)
            .with_nullable(nullable)
            .with_default(default)
            .with_title(title)
            .with_description(description)
            .with_params(params);
        if key != field.name {
            spec = spec.with_alias(field.name.clone());
        }
        schema.add_field(spec);
    }

    log::info!(
        "synthesized schema `{}` with {} field(s)",
        schema.name,
        schema.fields().len()
    );
    Ok(schema)
}

/// Synthesize against the process-wide default table with default options.
///
/// # Errors
/// Same failure modes as [`synthesize`].
pub fn synthesize_default(model: &ModelDefinition) -> Result<Schema, SchemaError> {
    synthesize(
        &crate::schema::resolution::DEFAULT_TABLE,
        model,
        &SynthesizeOptions::default(),
    )
}
