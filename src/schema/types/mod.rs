pub mod errors;
pub mod fields;
pub mod schema;

pub use errors::{FieldIssue, SchemaError, ValidationError};
pub use fields::{FieldParams, FieldSpec, SchemaDefault};
pub use schema::Schema;
