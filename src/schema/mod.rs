pub mod resolution;
pub mod resolver;
pub mod synthesizer;
pub mod types;
pub mod validator;

// Re-export the working set at the schema module level
pub use resolution::{AncestryRule, Lookup, ScalarType, TableEntry, TypeRule, TypeTable, DEFAULT_TABLE};
pub use resolver::{resolve_field, Resolution, MAX_RELATION_DEPTH};
pub use synthesizer::{synthesize, synthesize_default, SynthesizeOptions};
pub use types::{FieldIssue, FieldParams, FieldSpec, Schema, SchemaDefault, SchemaError, ValidationError};
pub use validator::Record;
