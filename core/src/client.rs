//! Stateless HTTP request builder and response parser for the users API.
//!
//! # Design
//! `UserClient` holds only a `base_url` and carries no mutable state between
//! calls. Each operation is split into a `build_*` method that produces an
//! `HttpRequest` and a `parse_*` method that consumes the matching
//! `HttpResponse`. The caller (usually `UserService`) executes the HTTP
//! round-trip in between.

use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateUser, Pagination, UserListing, UserRecord};

/// Synchronous, stateless request builder and response parser.
#[derive(Debug, Clone)]
pub struct UserClient {
    base_url: String,
}

impl UserClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_get_user(&self, id: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_list_users(&self, page: u64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/users?page={page}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_user(&self, input: &CreateUser) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/users", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Parse a fetch-by-id response into the record held under `data`.
    ///
    /// 404 is reported as `NotFound`. Any 2xx yields a record: a body that is
    /// not JSON or carries no `data` object gives an empty one.
    pub fn parse_get_user(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<UserRecord, ApiError> {
        if response.status == 404 {
            return Err(ApiError::NotFound);
        }
        check_status(request, &response)?;
        let body: Value = serde_json::from_str(&response.body).unwrap_or(Value::Null);
        match body.get("data") {
            Some(Value::Object(data)) => Ok(UserRecord::from_map(data)),
            _ => Ok(UserRecord::from_map(&Map::new())),
        }
    }

    /// Parse a list response. A body that is not a JSON object, or a missing
    /// or null `data` field, yields an empty listing.
    pub fn parse_list_users(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<UserListing, ApiError> {
        check_status(request, &response)?;
        let body = match serde_json::from_str(&response.body) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        };
        let users = match body.get("data") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::Object(map) => Ok(UserRecord::from_map(map)),
                    other => Err(ApiError::Deserialization(format!(
                        "expected user object in `data`, got {other}"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()?,
            Some(other) => {
                return Err(ApiError::Deserialization(format!(
                    "expected `data` array, got {other}"
                )))
            }
        };
        Ok(UserListing {
            users,
            pagination: Pagination::from_body(&body),
        })
    }

    /// Parse a create response into the raw decoded body.
    pub fn parse_create_user(
        &self,
        request: &HttpRequest,
        response: HttpResponse,
    ) -> Result<Map<String, Value>, ApiError> {
        decode_object(request, response)
    }
}

/// Map non-2xx status codes to the appropriate `ApiError` variant.
fn check_status(request: &HttpRequest, response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::Http {
        method: request.method,
        url: request.path.clone(),
        status: response.status,
        reason: reason_phrase(response.status).to_string(),
    })
}

fn decode_object(
    request: &HttpRequest,
    response: HttpResponse,
) -> Result<Map<String, Value>, ApiError> {
    check_status(request, &response)?;
    match serde_json::from_str(&response.body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(ApiError::Deserialization(format!(
            "expected JSON object, got {other}"
        ))),
        Err(e) => Err(ApiError::Deserialization(e.to_string())),
    }
}

fn reason_phrase(status: u16) -> &'static str {
    ureq::http::StatusCode::from_u16(status)
        .ok()
        .and_then(|code| code.canonical_reason())
        .unwrap_or("Unknown Status")
}
