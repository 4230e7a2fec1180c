//! User service: one HTTP call per operation, every outcome as an envelope.
//!
//! # Design
//! `UserService` composes the stateless `UserClient` with a `Transport`.
//! None of its operations return `Err`; validation failures, HTTP errors and
//! malformed responses all come back as `Envelope::Error` with the status
//! code and message the caller is expected to render.

use tracing::warn;

use crate::client::UserClient;
use crate::envelope::{
    CreateUserEnvelope, CreatedUser, Envelope, FetchUserEnvelope, ListUsersEnvelope, SingleUser,
    UserPage,
};
use crate::error::ApiError;
use crate::transport::{Transport, UreqTransport};
use crate::types::{CreateUser, UserRecord};

/// Base URL of the public reqres API.
pub const DEFAULT_BASE_URL: &str = "https://reqres.in/api";

/// Client for the remote users API.
///
/// Holds no per-call state; the client and transport are read-only after
/// construction.
#[derive(Debug, Clone)]
pub struct UserService<T = UreqTransport> {
    client: UserClient,
    transport: T,
}

impl UserService<UreqTransport> {
    /// Service bound to [`DEFAULT_BASE_URL`] over the default transport.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self::with_transport(UreqTransport::new(), base_url)
    }
}

impl Default for UserService<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> UserService<T> {
    pub fn with_transport(transport: T, base_url: &str) -> Self {
        Self {
            client: UserClient::new(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Fetch a single user by id.
    pub fn get_user_by_id(&self, id: u64) -> FetchUserEnvelope {
        let request = self.client.build_get_user(id);
        let result = self
            .transport
            .execute(&request)
            .and_then(|response| self.client.parse_get_user(&request, response));

        match result {
            Ok(user) => Envelope::Success(SingleUser {
                data: user,
                message: "Single user retrieved successfully".to_string(),
                status_code: 200,
            }),
            Err(ApiError::NotFound) => {
                warn!(id, "user not found");
                Envelope::error(404, "User not found.")
            }
            Err(e) => {
                warn!(id, error = %e, "fetching user failed");
                Envelope::error(e.code(), format!("Unable to retrieve user: {e}"))
            }
        }
    }

    /// Fetch one page of users.
    pub fn get_users(&self, page: u64) -> ListUsersEnvelope {
        let request = self.client.build_list_users(page);
        let result = self
            .transport
            .execute(&request)
            .and_then(|response| self.client.parse_list_users(&request, response));

        match result {
            Ok(listing) if listing.users.is_empty() => Envelope::Success(UserPage {
                data: Vec::new(),
                pagination: None,
                message: "No users found.".to_string(),
                status_code: 200,
            }),
            Ok(listing) => Envelope::Success(UserPage {
                data: listing.users,
                pagination: Some(listing.pagination),
                message: "User data retrieved successfully.".to_string(),
                status_code: 200,
            }),
            Err(e) => {
                warn!(page, error = %e, "listing users failed");
                Envelope::error(e.code(), format!("Unable to retrieve user: {e}"))
            }
        }
    }

    /// Fetch the first page of users.
    pub fn get_first_page(&self) -> ListUsersEnvelope {
        self.get_users(1)
    }

    /// Create a user. `name` and `job` must be non-empty; `name` is checked
    /// first and neither check touches the network.
    pub fn create_user(&self, name: &str, job: &str) -> CreateUserEnvelope {
        if name.is_empty() {
            return Envelope::error(422, "The 'name' field is required and must not be empty.");
        }
        if job.is_empty() {
            return Envelope::error(422, "The 'job' field is required and must not be empty.");
        }

        let input = CreateUser {
            name: name.to_string(),
            job: job.to_string(),
        };
        let result = self.client.build_create_user(&input).and_then(|request| {
            let response = self.transport.execute(&request)?;
            self.client.parse_create_user(&request, response)
        });

        match result {
            Ok(body) if body.get("id").is_some_and(|id| !id.is_null()) => {
                Envelope::Success(CreatedUser {
                    data: UserRecord::from_map(&body),
                    extras: body,
                    message: "User created successfully.".to_string(),
                    status_code: 201,
                })
            }
            Ok(_) | Err(ApiError::Deserialization(_)) => {
                warn!("create response carried no user id");
                Envelope::error(500, "Failed to create user.")
            }
            Err(e) => {
                warn!(error = %e, "creating user failed");
                Envelope::error(e.code(), format!("Unable to create user: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use serde_json::json;

    use super::*;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    fn respond(
        status: u16,
        body: &'static str,
    ) -> impl Fn(&HttpRequest) -> Result<HttpResponse, ApiError> {
        move |_: &HttpRequest| -> Result<HttpResponse, ApiError> {
            Ok(HttpResponse::new(status, body))
        }
    }

    fn service<T: Transport>(transport: T) -> UserService<T> {
        UserService::with_transport(transport, "http://localhost:3000/api")
    }

    #[test]
    fn default_service_targets_reqres() {
        assert_eq!(UserService::new().base_url(), "https://reqres.in/api");
    }

    #[test]
    fn get_user_by_id_success() {
        let svc = service(respond(
            200,
            r#"{"data":{"id":121,"email":"elon.musk@tesla.com","first_name":"Elon","last_name":"Musk","avatar":"https://reqres.in/img/faces/121-image.jpg"}}"#,
        ));
        let envelope = svc.get_user_by_id(12);
        assert!(envelope.is_success());
        assert_eq!(envelope.status_code(), 200);
        assert_eq!(envelope.message(), "Single user retrieved successfully");
        let user = &envelope.success().unwrap().data;
        assert_eq!(user.id(), &json!(121));
        assert_eq!(user.email(), Some("elon.musk@tesla.com"));
    }

    #[test]
    fn get_user_by_id_requests_user_path() {
        let seen = Cell::new(false);
        let svc = service(|request: &HttpRequest| -> Result<HttpResponse, ApiError> {
            assert_eq!(request.method, HttpMethod::Get);
            assert_eq!(request.path, "http://localhost:3000/api/users/7");
            seen.set(true);
            Ok(HttpResponse::new(200, r#"{"data":{"id":7}}"#))
        });
        svc.get_user_by_id(7);
        assert!(seen.get());
    }

    #[test]
    fn get_user_by_id_not_found() {
        let svc = service(respond(404, r#"{"error":"User Not Found"}"#));
        let json = serde_json::to_value(svc.get_user_by_id(1288989)).unwrap();
        assert_eq!(
            json,
            json!({ "status": "error", "statusCode": 404, "message": "User not found." })
        );
    }

    #[test]
    fn get_user_by_id_server_error_keeps_code() {
        let svc = service(respond(503, ""));
        let envelope = svc.get_user_by_id(1);
        assert_eq!(envelope.status_code(), 503);
        assert!(envelope
            .message()
            .starts_with("Unable to retrieve user: Server error: `GET http://localhost:3000/api/users/1`"));
    }

    #[test]
    fn get_user_by_id_transport_failure_reports_zero() {
        let svc = service(|_: &HttpRequest| -> Result<HttpResponse, ApiError> {
            Err(ApiError::Transport("connection refused".to_string()))
        });
        let envelope = svc.get_user_by_id(1);
        assert_eq!(envelope.status_code(), 0);
        assert_eq!(
            envelope.message(),
            "Unable to retrieve user: transport failed: connection refused"
        );
    }

    #[test]
    fn get_users_maps_each_item_in_order() {
        let svc = service(respond(
            200,
            r#"{"page":1,"per_page":6,"total":12,"total_pages":2,"data":[
                {"id":1,"email":"george.best@machester.com.uk","first_name":"George","last_name":"Best"},
                {"id":2,"email":"wright.joe@machester.com.uk","first_name":"Wright","last_name":"Joe"}
            ]}"#,
        ));
        let envelope = svc.get_first_page();
        let page = envelope.success().unwrap();
        assert_eq!(page.data.len(), 2);
        assert_eq!(page.data[0].first_name(), Some("George"));
        assert_eq!(page.data[1].first_name(), Some("Wright"));

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["page"], 1);
        assert_eq!(json["per_page"], 6);
        assert_eq!(json["total"], 12);
        assert_eq!(json["total_pages"], 2);
        assert_eq!(json["message"], "User data retrieved successfully.");
        assert_eq!(json["status"], "success");
        assert_eq!(json["statusCode"], 200);
    }

    #[test]
    fn get_users_empty_page() {
        let svc = service(respond(
            200,
            r#"{"page":5,"per_page":6,"total":12,"total_pages":2,"data":[]}"#,
        ));
        let json = serde_json::to_value(svc.get_users(5)).unwrap();
        assert_eq!(
            json,
            json!({ "data": [], "message": "No users found.", "status": "success", "statusCode": 200 })
        );
    }

    #[test]
    fn get_users_error_uses_retrieve_prefix() {
        let svc = service(respond(404, "{}"));
        let envelope = svc.get_users(1);
        assert!(!envelope.is_success());
        assert_eq!(envelope.status_code(), 404);
        assert_eq!(
            envelope.message(),
            "Unable to retrieve user: Client error: `GET http://localhost:3000/api/users?page=1` resulted in a `404 Not Found` response"
        );
    }

    #[test]
    fn get_user_by_id_without_data_is_empty_success() {
        let svc = service(respond(200, r#"{"support":{}}"#));
        let json = serde_json::to_value(svc.get_user_by_id(1)).unwrap();
        assert_eq!(
            json,
            json!({
                "data": {},
                "message": "Single user retrieved successfully",
                "status": "success",
                "statusCode": 200
            })
        );
    }

    #[test]
    fn get_user_by_id_with_unreadable_body_is_empty_success() {
        let svc = service(respond(200, "<html>"));
        let envelope = svc.get_user_by_id(1);
        assert!(envelope.is_success());
        assert_eq!(envelope.status_code(), 200);
        assert!(envelope.success().unwrap().data.to_map().is_empty());
    }

    #[test]
    fn create_user_validates_name_before_job() {
        let svc = service(|_: &HttpRequest| -> Result<HttpResponse, ApiError> {
            panic!("validation failures must not reach the network")
        });

        let envelope = svc.create_user("", "Police Chief");
        assert_eq!(envelope.status_code(), 422);
        assert_eq!(
            envelope.message(),
            "The 'name' field is required and must not be empty."
        );

        let envelope = svc.create_user("Luke Lammy ", "");
        assert_eq!(envelope.status_code(), 422);
        assert_eq!(
            envelope.message(),
            "The 'job' field is required and must not be empty."
        );

        let envelope = svc.create_user("", "");
        assert_eq!(
            envelope.message(),
            "The 'name' field is required and must not be empty."
        );
    }

    #[test]
    fn create_user_success() {
        let svc = service(|request: &HttpRequest| -> Result<HttpResponse, ApiError> {
            assert_eq!(request.method, HttpMethod::Post);
            let body: serde_json::Value =
                serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
            assert_eq!(body, json!({ "name": "Paige Jacob", "job": "Vice President" }));
            Ok(HttpResponse::new(
                201,
                r#"{"id":1,"name":"Paige Jacob","job":"Vice President","createdAt":"2023-04-01T00:00:00.000Z"}"#,
            ))
        });
        let envelope = svc.create_user("Paige Jacob", "Vice President");
        assert_eq!(envelope.status_code(), 201);
        assert_eq!(envelope.message(), "User created successfully.");

        let created = envelope.success().unwrap();
        assert_eq!(created.data.name(), Some("Paige Jacob"));
        assert_eq!(created.data.created_at(), Some("2023-04-01T00:00:00.000Z"));
        assert_eq!(created.extras["job"], "Vice President");

        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["data"], json["extras"]);
        assert_eq!(json["status"], "success");
    }

    #[test]
    fn create_user_without_id_fails() {
        let svc = service(respond(201, r#"{"name":"neo","job":"the one"}"#));
        let json = serde_json::to_value(svc.create_user("neo", "the one")).unwrap();
        assert_eq!(
            json,
            json!({ "message": "Failed to create user.", "status": "error", "statusCode": 500 })
        );
    }

    #[test]
    fn create_user_with_unreadable_body_fails() {
        let svc = service(respond(201, "<html>"));
        let envelope = svc.create_user("neo", "the one");
        assert_eq!(envelope.status_code(), 500);
        assert_eq!(envelope.message(), "Failed to create user.");
    }

    #[test]
    fn create_user_server_error() {
        let svc = service(respond(500, r#"{"error":"Internal Server Error"}"#));
        let envelope = svc.create_user("Ashely Marks", "Trader Worker");
        assert!(!envelope.is_success());
        assert_eq!(envelope.status_code(), 500);
        assert!(envelope.message().starts_with("Unable to create user: "));
    }

    #[test]
    fn create_user_not_found_uses_http_client_message() {
        let svc = service(respond(404, "{}"));
        let envelope = svc.create_user("neo", "the one");
        assert_eq!(envelope.status_code(), 404);
        assert_eq!(
            envelope.message(),
            "Unable to create user: Client error: `POST http://localhost:3000/api/users` resulted in a `404 Not Found` response"
        );
    }

    #[test]
    fn create_user_with_null_id_fails() {
        let svc = service(respond(201, r#"{"id":null,"name":"neo","job":"the one"}"#));
        let envelope = svc.create_user("neo", "the one");
        assert_eq!(envelope.status_code(), 500);
        assert_eq!(envelope.message(), "Failed to create user.");
    }
}
