use serde_json::Value;
use std::collections::HashMap;

/// A file-backed attribute. The URL is only present when a file is actually
/// attached; an unset file value is not the same as a null value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FileValue {
    pub url: Option<String>,
}

impl FileValue {
    #[must_use]
    pub fn attached(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    #[must_use]
    pub const fn unset() -> Self {
        Self { url: None }
    }
}

/// One attribute value on a live model instance.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Value(Value),
    File(FileValue),
}

/// Stand-in for a live record of a source model. Attribute values are keyed
/// by the declared field name; single-valued relation attributes hold the
/// related record's storage identifier, not the related record itself.
#[derive(Clone, Debug, Default)]
pub struct ModelInstance {
    values: HashMap<String, AttrValue>,
}

impl ModelInstance {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_value(mut self, name: impl Into<String>, value: Value) -> Self {
        self.set(name, value);
        self
    }

    #[must_use]
    pub fn with_file(mut self, name: impl Into<String>, file: FileValue) -> Self {
        self.values.insert(name.into(), AttrValue::File(file));
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: Value) {
        self.values.insert(name.into(), AttrValue::Value(value));
    }

    pub fn set_file(&mut self, name: impl Into<String>, file: FileValue) {
        self.values.insert(name.into(), AttrValue::File(file));
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.values.get(name)
    }
}
