use crate::schema::resolution::ScalarType;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Extra validation parameters attached to one schema field.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldParams {
    pub max_length: Option<u32>,
}

/// Default of one synthesized schema field.
///
/// `Required` means construction fails when the field is omitted. `Null`
/// marks the field optional with an explicit absent default. A factory is
/// evaluated fresh on every validation that needs it; its results are never
/// shared between instances.
#[derive(Clone)]
pub enum SchemaDefault {
    Required,
    Null,
    Value(Value),
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl SchemaDefault {
    #[must_use]
    pub const fn is_required(&self) -> bool {
        matches!(self, Self::Required)
    }
}

impl fmt::Debug for SchemaDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "Required"),
            Self::Null => write!(f, "Null"),
            Self::Value(v) => write!(f, "Value({v})"),
            Self::Factory(_) => write!(f, "Factory(..)"),
        }
    }
}

/// Specification of one retained field on a synthesized schema.
///
/// `key` is the canonical schema key (the storage attribute name of the
/// source field). When that differs from the declared field name, the
/// declared name is kept as a serialization alias so payloads may use
/// either form.
#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub key: String,
    pub alias: Option<String>,
    pub scalar: ScalarType,
    pub nullable: bool,
    pub default: SchemaDefault,
    pub title: String,
    pub description: String,
    pub params: FieldParams,
}

impl FieldSpec {
    #[must_use]
    pub fn new(key: impl Into<String>, scalar: ScalarType) -> Self {
        let key = key.into();
        Self {
            title: key.clone(),
            key,
            alias: None,
            scalar,
            nullable: false,
            default: SchemaDefault::Required,
            description: String::new(),
            params: FieldParams::default(),
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    #[must_use]
    pub fn with_nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: SchemaDefault) -> Self {
        self.default = default;
        self
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn with_params(mut self, params: FieldParams) -> Self {
        self.params = params;
        self
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.default.is_required()
    }

    /// Whether `name` addresses this field, by canonical key or alias.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        self.key == name || self.alias.as_deref() == Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_addresses_the_field_like_the_key() {
        let spec = FieldSpec::new("author_id", ScalarType::Int).with_alias("author");
        assert!(spec.matches("author_id"));
        assert!(spec.matches("author"));
        assert!(!spec.matches("editor"));
    }

    #[test]
    fn title_falls_back_to_the_key() {
        let spec = FieldSpec::new("handle", ScalarType::Str);
        assert_eq!(spec.title, "handle");
        assert!(spec.is_required());
    }
}
