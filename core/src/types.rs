//! Domain DTOs for the users API.
//!
//! # Design
//! `UserRecord` is built once from a raw JSON object and never mutated. The
//! remote API returns profile fields (`email`, `first_name`, ...) from its
//! read endpoints and `name`/`job`/`createdAt` from its create endpoint, so
//! every field except `id` is optional and omitted from output when absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user as returned by the API.
///
/// `id` is opaque: the API sends integers from its read endpoints and strings
/// from its create endpoint, so it is kept as the raw JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserRecord {
    #[serde(skip_serializing_if = "Value::is_null")]
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    job: Option<String>,
    #[serde(rename = "createdAt", skip_serializing_if = "Option::is_none")]
    created_at: Option<String>,
}

impl UserRecord {
    /// Build a record from a raw JSON object. Unknown keys are ignored and
    /// non-string values for the string fields count as absent.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let text = |key: &str| map.get(key).and_then(Value::as_str).map(str::to_owned);
        Self {
            id: map.get("id").cloned().unwrap_or(Value::Null),
            email: text("email"),
            first_name: text("first_name"),
            last_name: text("last_name"),
            avatar: text("avatar"),
            name: text("name"),
            job: text("job"),
            created_at: text("createdAt"),
        }
    }

    /// The populated fields keyed by their wire names. Null ids and absent
    /// optional fields are left out.
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        if !self.id.is_null() {
            map.insert("id".to_string(), self.id.clone());
        }
        let fields = [
            ("email", &self.email),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("avatar", &self.avatar),
            ("name", &self.name),
            ("job", &self.job),
            ("createdAt", &self.created_at),
        ];
        for (key, value) in fields {
            if let Some(value) = value {
                map.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        map
    }

    pub fn id(&self) -> &Value {
        &self.id
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn job(&self) -> Option<&str> {
        self.job.as_deref()
    }

    pub fn created_at(&self) -> Option<&str> {
        self.created_at.as_deref()
    }
}

impl From<&Map<String, Value>> for UserRecord {
    fn from(map: &Map<String, Value>) -> Self {
        Self::from_map(map)
    }
}

/// Request payload for creating a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateUser {
    pub name: String,
    pub job: String,
}

/// Pagination fields of a list response, copied verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Pagination {
    pub page: Value,
    pub per_page: Value,
    pub total: Value,
    pub total_pages: Value,
}

impl Pagination {
    pub fn from_body(body: &Map<String, Value>) -> Self {
        let field = |key: &str| body.get(key).cloned().unwrap_or(Value::Null);
        Self {
            page: field("page"),
            per_page: field("per_page"),
            total: field("total"),
            total_pages: field("total_pages"),
        }
    }
}

/// One page of users as parsed from a list response.
#[derive(Debug, Clone, PartialEq)]
pub struct UserListing {
    pub users: Vec<UserRecord>,
    pub pagination: Pagination,
}
