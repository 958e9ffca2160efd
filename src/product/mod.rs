//! Product Model
//!
//! The single record type held by the store, the caller-supplied field set,
//! required-field validation and the id generation policies.

pub mod id;
pub mod validation;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

pub use id::IdPolicy;
pub use validation::{missing_required_fields, validate_new_product, REQUIRED_FIELDS};

/// Field set supplied by callers on `add` and `update`.
///
/// Named fields are optional so that a stored record carries exactly the keys
/// the caller provided. Unknown keys are kept in `extra` and written back as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Number>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stock: Option<Number>,

    /// Additional caller fields preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ProductFields {
    /// Set an arbitrary field by key, routing the named keys to their typed slots.
    ///
    /// Fails when a named key receives a value of the wrong JSON type.
    pub fn set(&mut self, key: &str, value: Value) -> Result<(), String> {
        fn string(key: &str, value: Value) -> Result<String, String> {
            match value {
                Value::String(s) => Ok(s),
                other => Err(format!("field '{}' must be a string, got {}", key, other)),
            }
        }
        fn number(key: &str, value: Value) -> Result<Number, String> {
            match value {
                Value::Number(n) => Ok(n),
                other => Err(format!("field '{}' must be a number, got {}", key, other)),
            }
        }

        match key {
            "title" => self.title = Some(string(key, value)?),
            "description" => self.description = Some(string(key, value)?),
            "price" => self.price = Some(number(key, value)?),
            "thumbnail" => self.thumbnail = Some(string(key, value)?),
            "code" => self.code = Some(string(key, value)?),
            "stock" => self.stock = Some(number(key, value)?),
            _ => {
                self.extra.insert(key.to_string(), value);
            }
        }
        Ok(())
    }

    /// Whether a field is present, named or extra.
    pub fn has(&self, key: &str) -> bool {
        match key {
            "title" => self.title.is_some(),
            "description" => self.description.is_some(),
            "price" => self.price.is_some(),
            "thumbnail" => self.thumbnail.is_some(),
            "code" => self.code.is_some(),
            "stock" => self.stock.is_some(),
            _ => self.extra.contains_key(key),
        }
    }
}

/// A stored product record: a store-assigned id followed by the caller's fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,

    #[serde(flatten)]
    pub fields: ProductFields,
}

impl Product {
    /// Build a record from an id and a caller field set.
    ///
    /// Any `id` key the caller smuggled into `extra` is dropped; the store's id wins.
    pub fn new(id: impl Into<String>, mut fields: ProductFields) -> Self {
        fields.extra.remove("id");
        Self {
            id: id.into(),
            fields,
        }
    }
}
