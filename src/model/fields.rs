use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Kind of one source-model field descriptor.
///
/// The variants mirror the field taxonomy of the source ORM. The `is_*`
/// category predicates replace the class-hierarchy checks the mapping would
/// otherwise need: a kind can belong to several categories at once, and the
/// resolution table decides ties by rule declaration order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum FieldKind {
    Auto,
    SmallAuto,
    BigAuto,
    Integer,
    SmallInteger,
    BigInteger,
    PositiveInteger,
    PositiveSmallInteger,
    PositiveBigInteger,
    Float,
    Char,
    Text,
    Slug,
    Email,
    Url,
    IpAddress,
    Json,
    Uuid,
    Date,
    Time,
    DateTime,
    Duration,
    Decimal,
    Boolean,
    Binary,
    File,
    Image,
    ForeignKey,
    OneToOne,
    ManyToMany,
    /// Reverse side of a foreign key.
    OneToManyRel,
    /// Reverse side of a many-to-many relation.
    ManyToManyRel,
    /// Reverse side of a one-to-one relation.
    OneToOneRel,
    GenericForeignKey,
    /// A kind the resolution table has never heard of.
    Custom(&'static str),
}

impl FieldKind {
    #[must_use]
    pub const fn is_auto_kind(self) -> bool {
        matches!(self, Self::Auto | Self::SmallAuto | Self::BigAuto)
    }

    #[must_use]
    pub const fn is_positive_integer_kind(self) -> bool {
        matches!(
            self,
            Self::PositiveInteger | Self::PositiveSmallInteger | Self::PositiveBigInteger
        )
    }

    /// Every integer-valued kind, positive and auto kinds included.
    #[must_use]
    pub const fn is_integer_kind(self) -> bool {
        self.is_auto_kind()
            || self.is_positive_integer_kind()
            || matches!(self, Self::Integer | Self::SmallInteger | Self::BigInteger)
    }

    #[must_use]
    pub const fn is_character_kind(self) -> bool {
        matches!(
            self,
            Self::Char | Self::Text | Self::Slug | Self::Email | Self::Url
        )
    }

    #[must_use]
    pub const fn is_file_kind(self) -> bool {
        matches!(self, Self::File | Self::Image)
    }

    /// Forward relations that store a single identifier.
    #[must_use]
    pub const fn is_single_relation(self) -> bool {
        matches!(self, Self::ForeignKey | Self::OneToOne)
    }

    /// Relations whose cardinality cannot be expressed as one scalar value.
    #[must_use]
    pub const fn is_multi_valued(self) -> bool {
        matches!(self, Self::ManyToMany | Self::OneToManyRel | Self::ManyToManyRel)
    }

    #[must_use]
    pub const fn is_reverse_relation(self) -> bool {
        matches!(self, Self::OneToManyRel | Self::ManyToManyRel | Self::OneToOneRel)
    }

    #[must_use]
    pub const fn is_generic_relation(self) -> bool {
        matches!(self, Self::GenericForeignKey)
    }
}

/// Declared default of a source-model field.
///
/// A factory default is a zero-argument value producer; it is evaluated
/// fresh every time a default is needed, never memoized.
#[derive(Clone, Default)]
pub enum FieldDefault {
    #[default]
    NotSet,
    Value(Value),
    Factory(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl fmt::Debug for FieldDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSet => write!(f, "NotSet"),
            Self::Value(v) => write!(f, "Value({v})"),
            Self::Factory(_) => write!(f, "Factory(..)"),
        }
    }
}

/// Read-only metadata for one attribute of a source model.
///
/// `name` is the declared field name; `attname` is the storage attribute
/// name and differs from `name` for single-valued relations, where it
/// carries the identifier suffix of the underlying column. The adapter only
/// reads descriptors, it never mutates them.
#[derive(Clone, Debug)]
pub struct FieldDescriptor {
    pub name: String,
    pub attname: String,
    pub kind: FieldKind,
    pub null: bool,
    pub blank: bool,
    pub default: FieldDefault,
    pub verbose_name: Option<String>,
    pub help_text: Option<String>,
    pub max_length: Option<u32>,
    /// Target field on the related model, for single-valued relations.
    pub related: Option<Arc<FieldDescriptor>>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            attname: name.clone(),
            name,
            kind,
            null: false,
            blank: false,
            default: FieldDefault::NotSet,
            verbose_name: None,
            help_text: None,
            max_length: None,
            related: None,
        }
    }

    /// Single-valued relation descriptor pointing at `target` on the related
    /// model. The storage attribute name carries the identifier suffix.
    #[must_use]
    pub fn relation(name: impl Into<String>, kind: FieldKind, target: FieldDescriptor) -> Self {
        let name = name.into();
        Self {
            attname: format!("{name}_id"),
            name,
            kind,
            null: false,
            blank: false,
            default: FieldDefault::NotSet,
            verbose_name: None,
            help_text: None,
            max_length: None,
            related: Some(Arc::new(target)),
        }
    }

    #[must_use]
    pub fn with_null(mut self, null: bool) -> Self {
        self.null = null;
        self
    }

    #[must_use]
    pub fn with_blank(mut self, blank: bool) -> Self {
        self.blank = blank;
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default = FieldDefault::Value(value);
        self
    }

    #[must_use]
    pub fn with_default_factory(
        mut self,
        factory: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.default = FieldDefault::Factory(Arc::new(factory));
        self
    }

    #[must_use]
    pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = Some(verbose_name.into());
        self
    }

    #[must_use]
    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    #[must_use]
    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Canonical key a synthesized schema uses for this field.
    #[must_use]
    pub fn schema_key(&self) -> &str {
        &self.attname
    }
}
