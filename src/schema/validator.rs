use crate::schema::resolution::ScalarType;
use crate::schema::types::{FieldIssue, FieldSpec, Schema, SchemaDefault, ValidationError};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidateIp, ValidateUrl};

/// One validated record: the attribute mapping after defaults were applied
/// and every retained field passed its checks. Keys are canonical schema
/// keys, in schema field order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    #[must_use]
    pub fn into_map(self) -> Map<String, Value> {
        self.fields.into_iter().collect()
    }
}

impl Schema {
    /// Validate an attribute mapping against this schema.
    ///
    /// Values are looked up by canonical key first, then by serialization
    /// alias. Missing values fall back to the field's default; factory
    /// defaults are evaluated fresh on every call. Unknown keys in `data`
    /// are ignored. All problems are collected before failing, so the error
    /// names every offending field.
    ///
    /// # Errors
    /// Returns a `ValidationError` when any field is missing without a
    /// default, null without being nullable, of the wrong type, or in
    /// breach of a constraint such as `max_length`.
    pub fn validate(&self, data: &Map<String, Value>) -> Result<Record, ValidationError> {
        let mut fields = Vec::with_capacity(self.fields().len());
        let mut issues = Vec::new();

        for spec in self.fields() {
            let raw = data
                .get(&spec.key)
                .or_else(|| spec.alias.as_ref().and_then(|alias| data.get(alias)));
            let value = match raw {
                Some(value) => value.clone(),
                None => match &spec.default {
                    SchemaDefault::Required => {
                        issues.push(FieldIssue::new(&spec.key, "missing required value"));
                        continue;
                    }
                    SchemaDefault::Null => Value::Null,
                    SchemaDefault::Value(value) => value.clone(),
                    SchemaDefault::Factory(factory) => factory(),
                },
            };

            if value.is_null() {
                if spec.nullable {
                    fields.push((spec.key.clone(), Value::Null));
                } else {
                    issues.push(FieldIssue::new(&spec.key, "null is not allowed"));
                }
                continue;
            }

            if let Err(message) = check_value(spec, &value) {
                issues.push(FieldIssue::new(&spec.key, message));
                continue;
            }
            fields.push((spec.key.clone(), value));
        }

        if issues.is_empty() {
            Ok(Record { fields })
        } else {
            Err(ValidationError::new(issues))
        }
    }
}

fn check_value(spec: &FieldSpec, value: &Value) -> Result<(), String> {
    check_scalar(spec.scalar, value)?;
    if let (Some(max), Some(s)) = (spec.params.max_length, value.as_str()) {
        if s.chars().count() > max as usize {
            return Err(format!("exceeds maximum length of {max}"));
        }
    }
    Ok(())
}

fn check_scalar(scalar: ScalarType, value: &Value) -> Result<(), String> {
    match scalar {
        ScalarType::Int => match value.as_i64().or_else(|| value.as_u64().map(|v| v as i64)) {
            Some(_) => Ok(()),
            None => Err("expected an integer".into()),
        },
        ScalarType::PositiveInt => match value.as_i64().or_else(|| value.as_u64().map(|v| v as i64))
        {
            Some(n) if n > 0 => Ok(()),
            Some(_) => Err("expected a positive integer".into()),
            None => Err("expected a positive integer".into()),
        },
        ScalarType::Float => {
            if value.is_number() {
                Ok(())
            } else {
                Err("expected a number".into())
            }
        }
        ScalarType::Bool => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err("expected a boolean".into())
            }
        }
        ScalarType::Str => expect_str(value).map(|_| ()),
        ScalarType::Bytes => {
            let s = expect_str(value)?;
            BASE64
                .decode(s)
                .map(|_| ())
                .map_err(|_| "expected base64-encoded bytes".into())
        }
        ScalarType::Date => {
            let s = expect_str(value)?;
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map(|_| ())
                .map_err(|_| "expected a date in YYYY-MM-DD form".into())
        }
        ScalarType::Time => {
            let s = expect_str(value)?;
            NaiveTime::parse_from_str(s, "%H:%M:%S%.f")
                .map(|_| ())
                .map_err(|_| "expected a time in HH:MM:SS form".into())
        }
        ScalarType::DateTime => {
            let s = expect_str(value)?;
            if DateTime::parse_from_rfc3339(s).is_ok()
                || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
                || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").is_ok()
            {
                Ok(())
            } else {
                Err("expected an ISO 8601 datetime".into())
            }
        }
        ScalarType::Duration => {
            // Durations travel as seconds, numeric or stringified.
            if value.is_number() {
                Ok(())
            } else if let Some(s) = value.as_str() {
                s.trim()
                    .parse::<f64>()
                    .map(|_| ())
                    .map_err(|_| "expected a duration in seconds".into())
            } else {
                Err("expected a duration in seconds".into())
            }
        }
        ScalarType::Decimal => {
            if value.is_number() {
                Ok(())
            } else if let Some(s) = value.as_str() {
                s.trim()
                    .parse::<f64>()
                    .map(|_| ())
                    .map_err(|_| "expected a decimal number".into())
            } else {
                Err("expected a decimal number".into())
            }
        }
        ScalarType::Json => {
            if value.is_object() || value.is_array() {
                Ok(())
            } else {
                Err("expected a JSON object or array".into())
            }
        }
        ScalarType::Uuid => {
            let s = expect_str(value)?;
            uuid::Uuid::parse_str(s)
                .map(|_| ())
                .map_err(|_| "expected a UUID".into())
        }
        ScalarType::Email => {
            let s = expect_str(value)?;
            if s.validate_email() {
                Ok(())
            } else {
                Err("expected a valid email address".into())
            }
        }
        ScalarType::Url => {
            let s = expect_str(value)?;
            if s.validate_url() {
                Ok(())
            } else {
                Err("expected a valid URL".into())
            }
        }
        ScalarType::IpAddr => {
            let s = expect_str(value)?;
            if s.validate_ip() {
                Ok(())
            } else {
                Err("expected a valid IP address".into())
            }
        }
    }
}

fn expect_str(value: &Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| "expected a string".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::types::FieldParams;
    use serde_json::json;
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::sync::Arc;

    fn single_field_schema(spec: FieldSpec) -> Schema {
        let mut schema = Schema::new("Test", "");
        schema.add_field(spec);
        schema
    }

    fn map(entries: &[(&str, Value)]) -> Map<String, Value> {
        entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn integer_rejects_floats_and_strings() {
        let schema = single_field_schema(FieldSpec::new("id", ScalarType::Int));
        assert!(schema.validate(&map(&[("id", json!(3))])).is_ok());
        assert!(schema.validate(&map(&[("id", json!(3.5))])).is_err());
        assert!(schema.validate(&map(&[("id", json!("3"))])).is_err());
    }

    #[test]
    fn positive_integer_rejects_zero_and_negatives() {
        let schema = single_field_schema(FieldSpec::new("count", ScalarType::PositiveInt));
        assert!(schema.validate(&map(&[("count", json!(1))])).is_ok());
        assert!(schema.validate(&map(&[("count", json!(0))])).is_err());
        assert!(schema.validate(&map(&[("count", json!(-4))])).is_err());
    }

    #[test]
    fn max_length_is_enforced_on_strings() {
        let schema = single_field_schema(
            FieldSpec::new("name", ScalarType::Str).with_params(FieldParams {
                max_length: Some(3),
            }),
        );
        assert!(schema.validate(&map(&[("name", json!("abc"))])).is_ok());
        let err = schema
            .validate(&map(&[("name", json!("abcd"))]))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["name"]);
    }

    #[test]
    fn structured_scalars_parse_their_wire_forms() {
        let cases = [
            (ScalarType::Date, json!("2026-08-28"), json!("28/08/2026")),
            (ScalarType::Time, json!("13:30:00"), json!("13h30")),
            (
                ScalarType::DateTime,
                json!("2026-08-28T13:30:00Z"),
                json!("yesterday"),
            ),
            (
                ScalarType::Uuid,
                json!("67e55044-10b1-426f-9247-bb680e5fe0c8"),
                json!("not-a-uuid"),
            ),
            (ScalarType::Bytes, json!("aGVsbG8="), json!("###")),
            (ScalarType::Json, json!({"a": 1}), json!("plain")),
            (ScalarType::Duration, json!(90.5), json!("soon")),
            (ScalarType::Decimal, json!("12.50"), json!("12,50")),
        ];
        for (scalar, good, bad) in cases {
            let schema = single_field_schema(FieldSpec::new("v", scalar));
            assert!(schema.validate(&map(&[("v", good)])).is_ok(), "{scalar:?}");
            assert!(schema.validate(&map(&[("v", bad)])).is_err(), "{scalar:?}");
        }
    }

    #[test]
    fn validated_string_subtypes_check_their_format() {
        let cases = [
            (ScalarType::Email, json!("ada@example.com"), json!("ada@")),
            (
                ScalarType::Url,
                json!("https://example.com/a"),
                json!("example dot com"),
            ),
            (ScalarType::IpAddr, json!("192.168.0.1"), json!("999.0.0.1")),
        ];
        for (scalar, good, bad) in cases {
            let schema = single_field_schema(FieldSpec::new("v", scalar));
            assert!(schema.validate(&map(&[("v", good)])).is_ok(), "{scalar:?}");
            assert!(schema.validate(&map(&[("v", bad)])).is_err(), "{scalar:?}");
        }
    }

    #[test]
    fn null_needs_an_explicitly_nullable_field() {
        let strict = single_field_schema(FieldSpec::new("age", ScalarType::Int));
        assert!(strict.validate(&map(&[("age", Value::Null)])).is_err());

        let nullable =
            single_field_schema(FieldSpec::new("age", ScalarType::Int).with_nullable(true));
        let record = nullable.validate(&map(&[("age", Value::Null)])).unwrap();
        assert_eq!(record.get("age"), Some(&Value::Null));
    }

    #[test]
    fn missing_values_fall_back_to_defaults() {
        let schema = single_field_schema(
            FieldSpec::new("status", ScalarType::Str)
                .with_default(SchemaDefault::Value(json!("draft"))),
        );
        let record = schema.validate(&Map::new()).unwrap();
        assert_eq!(record.get("status"), Some(&json!("draft")));

        let required = single_field_schema(FieldSpec::new("status", ScalarType::Str));
        let err = required.validate(&Map::new()).unwrap_err();
        assert_eq!(err.fields(), vec!["status"]);
    }

    #[test]
    fn factory_defaults_produce_independent_values() {
        let counter = Arc::new(AtomicU64::new(0));
        let seq = Arc::clone(&counter);
        let schema = single_field_schema(
            FieldSpec::new("seq", ScalarType::Int).with_default(SchemaDefault::Factory(Arc::new(
                move || json!(seq.fetch_add(1, Ordering::SeqCst) + 1),
            ))),
        );
        let first = schema.validate(&Map::new()).unwrap();
        let second = schema.validate(&Map::new()).unwrap();
        assert_eq!(first.get("seq"), Some(&json!(1)));
        assert_eq!(second.get("seq"), Some(&json!(2)));
    }

    #[test]
    fn every_offending_field_is_reported_at_once() {
        let mut schema = Schema::new("Test", "");
        schema.add_field(FieldSpec::new("id", ScalarType::Int));
        schema.add_field(FieldSpec::new("name", ScalarType::Str));
        let err = schema
            .validate(&map(&[("id", json!("seven"))]))
            .unwrap_err();
        assert_eq!(err.fields(), vec!["id", "name"]);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let schema = single_field_schema(FieldSpec::new("id", ScalarType::Int));
        let record = schema
            .validate(&map(&[("id", json!(1)), ("extra", json!("x"))]))
            .unwrap();
        assert_eq!(record.len(), 1);
        assert!(record.get("extra").is_none());
    }

    #[test]
    fn alias_lookup_accepts_either_payload_form() {
        let schema =
            single_field_schema(FieldSpec::new("author_id", ScalarType::Int).with_alias("author"));
        let by_key = schema.validate(&map(&[("author_id", json!(5))])).unwrap();
        let by_alias = schema.validate(&map(&[("author", json!(5))])).unwrap();
        assert_eq!(by_key.get("author_id"), Some(&json!(5)));
        assert_eq!(by_alias.get("author_id"), Some(&json!(5)));
    }
}
