pub mod definition;
pub mod fields;
pub mod flatten;
pub mod instance;

pub use definition::ModelDefinition;
pub use fields::{FieldDefault, FieldDescriptor, FieldKind};
pub use flatten::instance_to_map;
pub use instance::{AttrValue, FileValue, ModelInstance};
