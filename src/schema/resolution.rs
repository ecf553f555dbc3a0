use crate::model::fields::{FieldDescriptor, FieldKind};
use crate::schema::types::fields::FieldParams;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// Target scalar type a source field kind maps to.
///
/// `Email`, `Url` and `IpAddr` are validated string subtypes; a table built
/// in plain format mode maps their source kinds to `Str` instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ScalarType {
    Int,
    PositiveInt,
    Float,
    Str,
    Bool,
    Bytes,
    Date,
    Time,
    DateTime,
    Duration,
    Decimal,
    Json,
    Uuid,
    Email,
    Url,
    IpAddr,
}

impl fmt::Display for ScalarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Int => "integer",
            Self::PositiveInt => "positive integer",
            Self::Float => "float",
            Self::Str => "string",
            Self::Bool => "boolean",
            Self::Bytes => "base64 bytes",
            Self::Date => "date",
            Self::Time => "time",
            Self::DateTime => "datetime",
            Self::Duration => "duration",
            Self::Decimal => "decimal",
            Self::Json => "json",
            Self::Uuid => "uuid",
            Self::Email => "email",
            Self::Url => "url",
            Self::IpAddr => "ip address",
        };
        write!(f, "{name}")
    }
}

/// Extracts extra validation parameters from a field descriptor. The
/// extractor is stored unevaluated and only invoked for retained fields.
pub type ParamExtractor = fn(&FieldDescriptor) -> FieldParams;

/// How a table entry determines the target type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeRule {
    Scalar(ScalarType),
    /// Deferred: resolve the relation's target field and adopt its type.
    /// The one recursive case; only single-valued relations use it.
    RelatedField,
}

/// One resolution table entry: either skip the field kind entirely, or
/// resolve it to a target type with an optional parameter extractor.
#[derive(Clone, Copy, Debug)]
pub enum TableEntry {
    Skip,
    Resolve {
        target: TypeRule,
        params: Option<ParamExtractor>,
    },
}

impl TableEntry {
    const fn scalar(scalar: ScalarType) -> Self {
        Self::Resolve {
            target: TypeRule::Scalar(scalar),
            params: None,
        }
    }

    const fn scalar_with(scalar: ScalarType, params: ParamExtractor) -> Self {
        Self::Resolve {
            target: TypeRule::Scalar(scalar),
            params: Some(params),
        }
    }

    const fn related() -> Self {
        Self::Resolve {
            target: TypeRule::RelatedField,
            params: None,
        }
    }
}

/// One ancestry fallback rule. Rules are consulted in declaration order and
/// the first whose predicate accepts the kind wins; ties between rules are
/// broken by that order alone, never by specificity. Reordering the rule
/// list is a behavioral change.
#[derive(Clone, Copy, Debug)]
pub struct AncestryRule {
    pub name: &'static str,
    applies: fn(FieldKind) -> bool,
    entry: TableEntry,
}

impl AncestryRule {
    #[must_use]
    pub const fn new(name: &'static str, applies: fn(FieldKind) -> bool, entry: TableEntry) -> Self {
        Self {
            name,
            applies,
            entry,
        }
    }
}

/// Outcome of one table lookup. `Unresolved` means no entry matched at all;
/// it is distinct from a `Skip` entry, which is a deliberate omission.
#[derive(Clone, Copy, Debug)]
pub enum Lookup<'a> {
    Entry(&'a TableEntry),
    Unresolved,
}

fn length_params(field: &FieldDescriptor) -> FieldParams {
    FieldParams {
        max_length: field.max_length,
    }
}

/// The Type Resolution Table: an immutable mapping from field kinds to
/// target types, built once and passed by reference into resolution and
/// synthesis. Exact-kind entries take priority; ancestry rules are the
/// ordered fallback.
#[derive(Clone, Debug)]
pub struct TypeTable {
    exact: HashMap<FieldKind, TableEntry>,
    ancestry: Vec<AncestryRule>,
    validated_formats: bool,
}

/// Process-wide default table, built once in validated format mode.
pub static DEFAULT_TABLE: Lazy<TypeTable> = Lazy::new(TypeTable::new);

impl Default for TypeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeTable {
    /// Table in validated format mode: email/URL/IP kinds map to checked
    /// string subtypes.
    #[must_use]
    pub fn new() -> Self {
        Self::with_format_mode(true)
    }

    /// Table in plain format mode: email/URL/IP kinds map to plain strings.
    #[must_use]
    pub fn plain_formats() -> Self {
        Self::with_format_mode(false)
    }

    #[must_use]
    pub fn with_format_mode(validated_formats: bool) -> Self {
        let format_scalar = |validated: ScalarType| {
            if validated_formats {
                validated
            } else {
                ScalarType::Str
            }
        };

        let mut exact = HashMap::new();
        exact.insert(FieldKind::Auto, TableEntry::scalar(ScalarType::Int));
        exact.insert(FieldKind::SmallAuto, TableEntry::scalar(ScalarType::Int));
        exact.insert(FieldKind::BigAuto, TableEntry::scalar(ScalarType::Int));
        exact.insert(
            FieldKind::Char,
            TableEntry::scalar_with(ScalarType::Str, length_params),
        );
        exact.insert(FieldKind::Integer, TableEntry::scalar(ScalarType::Int));
        exact.insert(
            FieldKind::PositiveInteger,
            TableEntry::scalar(ScalarType::PositiveInt),
        );
        exact.insert(FieldKind::SmallInteger, TableEntry::scalar(ScalarType::Int));
        exact.insert(
            FieldKind::PositiveSmallInteger,
            TableEntry::scalar(ScalarType::PositiveInt),
        );
        exact.insert(FieldKind::BigInteger, TableEntry::scalar(ScalarType::Int));
        // PositiveBigInteger is deliberately absent: it resolves through the
        // ancestry rules, which keeps the order-dependent fallback path live.
        exact.insert(FieldKind::Float, TableEntry::scalar(ScalarType::Float));
        exact.insert(
            FieldKind::Text,
            TableEntry::scalar_with(ScalarType::Str, length_params),
        );
        exact.insert(FieldKind::Binary, TableEntry::scalar(ScalarType::Bytes));
        exact.insert(FieldKind::Boolean, TableEntry::scalar(ScalarType::Bool));
        exact.insert(FieldKind::Date, TableEntry::scalar(ScalarType::Date));
        exact.insert(FieldKind::DateTime, TableEntry::scalar(ScalarType::DateTime));
        exact.insert(FieldKind::Time, TableEntry::scalar(ScalarType::Time));
        exact.insert(FieldKind::Duration, TableEntry::scalar(ScalarType::Duration));
        exact.insert(FieldKind::Decimal, TableEntry::scalar(ScalarType::Decimal));
        exact.insert(
            FieldKind::Email,
            TableEntry::scalar(format_scalar(ScalarType::Email)),
        );
        exact.insert(FieldKind::File, TableEntry::scalar(ScalarType::Str));
        exact.insert(
            FieldKind::IpAddress,
            TableEntry::scalar(format_scalar(ScalarType::IpAddr)),
        );
        exact.insert(FieldKind::Json, TableEntry::scalar(ScalarType::Json));
        exact.insert(FieldKind::Slug, TableEntry::scalar(ScalarType::Str));
        exact.insert(
            FieldKind::Url,
            TableEntry::scalar(format_scalar(ScalarType::Url)),
        );
        exact.insert(FieldKind::Uuid, TableEntry::scalar(ScalarType::Uuid));
        exact.insert(FieldKind::ForeignKey, TableEntry::related());
        exact.insert(FieldKind::OneToOne, TableEntry::related());
        exact.insert(FieldKind::ManyToMany, TableEntry::Skip);
        exact.insert(FieldKind::OneToManyRel, TableEntry::Skip);
        exact.insert(FieldKind::ManyToManyRel, TableEntry::Skip);

        let ancestry = vec![
            AncestryRule::new(
                "positive-integer",
                FieldKind::is_positive_integer_kind,
                TableEntry::scalar(ScalarType::PositiveInt),
            ),
            AncestryRule::new(
                "integer",
                FieldKind::is_integer_kind,
                TableEntry::scalar(ScalarType::Int),
            ),
            AncestryRule::new(
                "character",
                FieldKind::is_character_kind,
                TableEntry::scalar_with(ScalarType::Str, length_params),
            ),
            AncestryRule::new(
                "file",
                FieldKind::is_file_kind,
                TableEntry::scalar(ScalarType::Str),
            ),
            AncestryRule::new(
                "single-relation",
                FieldKind::is_single_relation,
                TableEntry::related(),
            ),
            AncestryRule::new(
                "multi-valued-relation",
                FieldKind::is_multi_valued,
                TableEntry::Skip,
            ),
            AncestryRule::new(
                "reverse-relation",
                FieldKind::is_reverse_relation,
                TableEntry::Skip,
            ),
            AncestryRule::new(
                "generic-relation",
                FieldKind::is_generic_relation,
                TableEntry::Skip,
            ),
        ];

        Self {
            exact,
            ancestry,
            validated_formats,
        }
    }

    /// Build a table from explicit parts. Rule order is preserved as given.
    #[must_use]
    pub fn from_parts(
        exact: HashMap<FieldKind, TableEntry>,
        ancestry: Vec<AncestryRule>,
        validated_formats: bool,
    ) -> Self {
        Self {
            exact,
            ancestry,
            validated_formats,
        }
    }

    /// Whether email/URL/IP kinds map to validated string subtypes.
    #[must_use]
    pub const fn validates_formats(&self) -> bool {
        self.validated_formats
    }

    /// Look a descriptor up: exact kind first, then the first ancestry rule
    /// that accepts the kind, in declaration order.
    #[must_use]
    pub fn lookup(&self, field: &FieldDescriptor) -> Lookup<'_> {
        if let Some(entry) = self.exact.get(&field.kind) {
            return Lookup::Entry(entry);
        }
        for rule in &self.ancestry {
            if (rule.applies)(field.kind) {
                return Lookup::Entry(&rule.entry);
            }
        }
        Lookup::Unresolved
    }
}
