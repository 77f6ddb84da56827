//! Create-input validation
//!
//! `creator_name` is the only required field. Every other field may be
//! absent or null; when present it must have its declared JSON type.
//! Unknown keys (including a client-supplied `id`) are ignored. All field
//! problems are collected and reported together.

use catalog_common::db::ArtistCreate;
use serde_json::{Map, Value};

use crate::error::FieldError;

const STRING_TYPE: (&str, &str) = ("Input should be a valid string", "string_type");

/// Check a JSON payload against the Artist create schema
pub fn validate_artist_create(payload: &Value) -> Result<ArtistCreate, Vec<FieldError>> {
    let Some(object) = payload.as_object() else {
        return Err(vec![FieldError::new(
            &["body"],
            "Input should be a valid dictionary",
            "dict_type",
        )]);
    };

    let mut errors = Vec::new();
    let mut fields = Fields {
        object,
        errors: &mut errors,
    };

    let creator_name = fields.required_string("creator_name");
    let input = ArtistCreate {
        creator_name: creator_name.unwrap_or_default(),
        description: fields.optional_string("description"),
        profile_image_url: fields.optional_string("profile_image_url"),
        tags: fields.string_list("tags"),
        dna_visibility: fields.optional_string("dna_visibility"),
        price: fields.optional_number("price"),
        license_type: fields.optional_string("license_type"),
        tracks_visibility: fields.optional_string("tracks_visibility"),
        become_partner: fields.optional_bool("become_partner").unwrap_or(false),
        audio_preview_url: fields.optional_string("audio_preview_url"),
        sensitivity: fields.optional_integer("sensitivity"),
        status: fields.optional_string("status"),
    };

    if errors.is_empty() {
        Ok(input)
    } else {
        Err(errors)
    }
}

struct Fields<'a> {
    object: &'a Map<String, Value>,
    errors: &'a mut Vec<FieldError>,
}

impl<'a> Fields<'a> {
    /// Present and non-null value for `key`
    fn value(&self, key: &str) -> Option<&'a Value> {
        self.object.get(key).filter(|v| !v.is_null())
    }

    fn reject(&mut self, key: &str, (msg, kind): (&str, &str)) {
        self.errors.push(FieldError::new(&["body", key], msg, kind));
    }

    fn required_string(&mut self, key: &str) -> Option<String> {
        match self.value(key) {
            None => {
                self.errors.push(FieldError::missing(&["body", key]));
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.reject(key, STRING_TYPE);
                None
            }
        }
    }

    fn optional_string(&mut self, key: &str) -> Option<String> {
        match self.value(key) {
            None => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                self.reject(key, STRING_TYPE);
                None
            }
        }
    }

    fn optional_number(&mut self, key: &str) -> Option<f64> {
        let value = self.value(key)?;
        match value.as_f64() {
            Some(n) => Some(n),
            None => {
                self.reject(key, ("Input should be a valid number", "float_type"));
                None
            }
        }
    }

    /// Integers, or floats with no fractional part
    fn optional_integer(&mut self, key: &str) -> Option<i64> {
        let value = self.value(key)?;
        let parsed = value.as_i64().or_else(|| {
            value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                .map(|f| f as i64)
        });
        if parsed.is_none() {
            self.reject(key, ("Input should be a valid integer", "int_type"));
        }
        parsed
    }

    fn optional_bool(&mut self, key: &str) -> Option<bool> {
        match self.value(key) {
            None => None,
            Some(Value::Bool(b)) => Some(*b),
            Some(_) => {
                self.reject(key, ("Input should be a valid boolean", "bool_type"));
                None
            }
        }
    }

    fn string_list(&mut self, key: &str) -> Vec<String> {
        let items = match self.value(key) {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                self.reject(key, ("Input should be a valid list", "list_type"));
                return Vec::new();
            }
        };

        let mut tags = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            match item {
                Value::String(s) => tags.push(s.clone()),
                _ => {
                    let index = index.to_string();
                    self.errors.push(FieldError::new(
                        &["body", key, index.as_str()],
                        STRING_TYPE.0,
                        STRING_TYPE.1,
                    ));
                }
            }
        }
        tags
    }
}
