use super::errors::ValidationError;
use super::fields::FieldSpec;
use crate::model::definition::ModelDefinition;
use crate::model::flatten::instance_to_map;
use crate::model::instance::ModelInstance;
use crate::schema::validator::Record;

/// A synthesized validation schema.
///
/// One `Schema` is built per (model, include, exclude, skip_unknown)
/// combination, typically once at startup, and is immutable and reusable
/// afterwards. It carries the source model's documentation string but no
/// reference of any kind back to the model definition.
#[derive(Clone, Debug)]
pub struct Schema {
    pub name: String,
    pub doc: String,
    fields: Vec<FieldSpec>,
}

impl Schema {
    #[must_use]
    pub fn new(name: impl Into<String>, doc: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: doc.into(),
            fields: Vec::new(),
        }
    }

    pub fn add_field(&mut self, spec: FieldSpec) {
        self.fields.push(spec);
    }

    /// Field specs in synthesis order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Canonical schema keys in synthesis order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.key.as_str()).collect()
    }

    /// Look a field up by canonical key or serialization alias.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.matches(name))
    }

    /// Convert one live instance, or absence, into a validated record.
    ///
    /// Absence propagates: `None` returns `Ok(None)` immediately, without
    /// flattening or validation. Otherwise the instance is flattened into an
    /// attribute mapping and validated against this schema.
    ///
    /// # Errors
    /// Returns a `ValidationError` when the flattened mapping does not
    /// satisfy this schema's constraints.
    pub fn from_instance(
        &self,
        model: &ModelDefinition,
        instance: Option<&ModelInstance>,
    ) -> Result<Option<Record>, ValidationError> {
        let Some(instance) = instance else {
            return Ok(None);
        };
        let data = instance_to_map(model, instance, None, None);
        self.validate(&data).map(Some)
    }
}
