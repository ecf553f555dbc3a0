use super::definition::ModelDefinition;
use super::instance::{AttrValue, ModelInstance};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Flatten a live instance into a plain attribute mapping.
///
/// Keys are the declared field names. File-backed fields contribute their
/// storage URL only when a file is attached; otherwise the key is omitted
/// entirely. Multi-valued, reverse and generic relation fields are omitted.
/// Single-valued relation fields contribute the related record's storage
/// identifier. All other fields contribute their direct value.
///
/// `include`, when given, restricts the output to the named fields;
/// `exclude` removes the named fields even if they are also included.
#[must_use]
pub fn instance_to_map(
    model: &ModelDefinition,
    instance: &ModelInstance,
    include: Option<&HashSet<String>>,
    exclude: Option<&HashSet<String>>,
) -> Map<String, Value> {
    let mut data = Map::new();
    for field in model.get_fields() {
        if let Some(include) = include {
            if !include.contains(&field.name) {
                continue;
            }
        }
        if let Some(exclude) = exclude {
            if exclude.contains(&field.name) {
                continue;
            }
        }
        if field.kind.is_file_kind() {
            // An unset file is still a file value, not a null. Only an
            // attached file contributes its URL.
            if let Some(AttrValue::File(file)) = instance.get(&field.name) {
                if let Some(url) = &file.url {
                    data.insert(field.name.clone(), Value::String(url.clone()));
                }
            }
            continue;
        }
        if field.kind.is_multi_valued()
            || field.kind.is_reverse_relation()
            || field.kind.is_generic_relation()
        {
            // These need relation-aware handling and never flatten to a
            // single value.
            continue;
        }
        if let Some(AttrValue::Value(value)) = instance.get(&field.name) {
            data.insert(field.name.clone(), value.clone());
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fields::{FieldDescriptor, FieldKind};
    use crate::model::instance::FileValue;
    use serde_json::json;

    fn profile_model() -> ModelDefinition {
        ModelDefinition::new("Profile")
            .with_field(FieldDescriptor::new("id", FieldKind::Auto))
            .with_field(FieldDescriptor::new("handle", FieldKind::Char).with_max_length(40))
            .with_field(FieldDescriptor::new("avatar", FieldKind::File))
            .with_field(FieldDescriptor::new("tags", FieldKind::ManyToMany))
            .with_field(FieldDescriptor::relation(
                "account",
                FieldKind::ForeignKey,
                FieldDescriptor::new("id", FieldKind::Auto),
            ))
    }

    fn profile_instance() -> ModelInstance {
        ModelInstance::new()
            .with_value("id", json!(7))
            .with_value("handle", json!("ada"))
            .with_file("avatar", FileValue::attached("/media/ada.png"))
            .with_value("tags", json!([1, 2]))
            .with_value("account", json!(99))
    }

    #[test]
    fn flattens_scalars_files_and_relation_ids() {
        let data = instance_to_map(&profile_model(), &profile_instance(), None, None);
        assert_eq!(data.get("id"), Some(&json!(7)));
        assert_eq!(data.get("handle"), Some(&json!("ada")));
        assert_eq!(data.get("avatar"), Some(&json!("/media/ada.png")));
        assert_eq!(data.get("account"), Some(&json!(99)));
        assert!(!data.contains_key("tags"));
    }

    #[test]
    fn unset_file_omits_the_key_entirely() {
        let instance = profile_instance().with_file("avatar", FileValue::unset());
        let data = instance_to_map(&profile_model(), &instance, None, None);
        assert!(!data.contains_key("avatar"));
    }

    #[test]
    fn include_and_exclude_filter_by_declared_name() {
        let include: HashSet<String> = ["id", "handle"].iter().map(|s| s.to_string()).collect();
        let data = instance_to_map(&profile_model(), &profile_instance(), Some(&include), None);
        assert_eq!(data.len(), 2);

        let exclude: HashSet<String> = ["handle"].iter().map(|s| s.to_string()).collect();
        let data = instance_to_map(
            &profile_model(),
            &profile_instance(),
            Some(&include),
            Some(&exclude),
        );
        assert_eq!(data.len(), 1);
        assert!(data.contains_key("id"));
    }
}
