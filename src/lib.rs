//! Reflects ORM-style model metadata into standalone validation schemas.
//!
//! Given a [`model::ModelDefinition`] — the field names, kinds, nullability,
//! defaults and metadata of a persisted data model — `modelmap` synthesizes
//! a parallel [`schema::Schema`] that validates plain attribute mappings
//! independently of the source model. Relationship fields resolve through
//! their target field's type, multi-valued and reverse relations are
//! omitted, and a flattening routine turns a live instance into the
//! attribute mapping the schema validates.
//!
//! The type resolution table is built once ([`schema::DEFAULT_TABLE`]) and
//! passed by reference; synthesis is synchronous, side-effect-free and
//! idempotent, so callers synthesize once at startup and reuse the schema.

pub mod model;
pub mod schema;

pub use model::{
    instance_to_map, AttrValue, FieldDefault, FieldDescriptor, FieldKind, FileValue,
    ModelDefinition, ModelInstance,
};
pub use schema::{
    resolve_field, synthesize, synthesize_default, FieldIssue, FieldParams, FieldSpec, Record,
    Resolution, ScalarType, Schema, SchemaDefault, SchemaError, SynthesizeOptions, TypeTable,
    ValidationError, DEFAULT_TABLE,
};
