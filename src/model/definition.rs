use super::fields::FieldDescriptor;

/// Metadata for one source model: its name, documentation string, and the
/// full field list in declaration order. Schema synthesis iterates this
/// order, so it is significant.
#[derive(Clone, Debug, Default)]
pub struct ModelDefinition {
    pub name: String,
    pub doc: String,
    fields: Vec<FieldDescriptor>,
}

impl ModelDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: String::new(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = doc.into();
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn add_field(&mut self, field: FieldDescriptor) {
        self.fields.push(field);
    }

    /// Full field list in declaration order.
    #[must_use]
    pub fn get_fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look a field up by declared name or storage attribute name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields
            .iter()
            .find(|f| f.name == name || f.attname == name)
    }
}
