//! Domain DTOs for the customers API.
//!
//! # Design
//! Field names on the wire follow the deployed API (`nome`, `cpf`,
//! `telefone`); the Rust side uses English names. Deserialization also
//! accepts `name`, `taxId` and `phone` so payloads from either spelling load.
//! These types are defined independently from the mock-server crate;
//! integration tests catch any schema drift between the two.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Opaque, server-assigned customer identifier.
///
/// The API may send ids as JSON numbers or strings. Both load into the same
/// textual form, so `42` and `"42"` compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CustomerId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for CustomerId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for CustomerId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(number) => Self(number.to_string()),
        })
    }
}

/// A customer record as returned by the API.
///
/// Rows are loaded leniently so one incomplete record does not hide the
/// rest of the list: a missing `id` loads as `None`, and a `null` or
/// missing name or tax id loads as empty text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    #[serde(rename = "nome", alias = "name", default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(rename = "cpf", alias = "taxId", default, deserialize_with = "null_as_empty")]
    pub tax_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "telefone", alias = "phone", default)]
    pub phone: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Request payload for both create (POST) and update (PUT).
///
/// Optional fields are sent as entered, so an untouched email goes out as
/// `""` rather than being omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CustomerInput {
    #[serde(rename = "nome", alias = "name")]
    pub name: String,
    #[serde(rename = "cpf", alias = "taxId")]
    pub tax_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefone", alias = "phone", default)]
    pub phone: String,
}
