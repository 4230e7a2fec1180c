//! Synchronous client core for the reqres-style users API.
//!
//! # Overview
//! `UserService` fetches a user, lists a page of users, or creates a user,
//! and reports every outcome as an `Envelope` that serializes to the JSON
//! shape callers print. Failures are data: none of the three operations
//! returns `Err` or panics.
//!
//! # Design
//! - `UserClient` is stateless and split into `build_*` (produces an
//!   `HttpRequest`) and `parse_*` (consumes an `HttpResponse`), so request
//!   construction and response mapping are testable without I/O.
//! - `Transport` is the only I/O seam. `UreqTransport` is the blocking
//!   default; closures work as stubs.
//! - `UserRecord` is immutable and serializes only its populated fields.

pub mod client;
pub mod envelope;
pub mod error;
pub mod http;
pub mod service;
pub mod transport;
pub mod types;

pub use client::UserClient;
pub use envelope::{
    CreateUserEnvelope, CreatedUser, Envelope, Failure, FetchUserEnvelope, ListUsersEnvelope,
    Outcome, SingleUser, UserPage,
};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use service::{UserService, DEFAULT_BASE_URL};
pub use transport::{Transport, UreqTransport};
pub use types::{CreateUser, Pagination, UserListing, UserRecord};
