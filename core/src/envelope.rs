//! Result envelopes returned by `UserService`.
//!
//! # Design
//! Every operation returns `Envelope<T>`, internally tagged on `status`. The
//! success body differs per operation (pagination only on lists, `extras`
//! only on creation) while all failures share `Failure`, so each outcome
//! serializes to exactly the keys it carries.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{Pagination, UserRecord};

/// Message and status code common to every envelope body.
pub trait Outcome {
    fn message(&self) -> &str;
    fn status_code(&self) -> u16;
}

/// Uniform result of a service operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success(T),
    Error(Failure),
}

pub type FetchUserEnvelope = Envelope<SingleUser>;
pub type ListUsersEnvelope = Envelope<UserPage>;
pub type CreateUserEnvelope = Envelope<CreatedUser>;

impl<T: Outcome> Envelope<T> {
    pub(crate) fn error(status_code: u16, message: impl Into<String>) -> Self {
        Envelope::Error(Failure {
            message: message.into(),
            status_code,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Envelope::Success(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Envelope::Success(body) => body.message(),
            Envelope::Error(failure) => failure.message(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Envelope::Success(body) => body.status_code(),
            Envelope::Error(failure) => failure.status_code(),
        }
    }

    pub fn success(&self) -> Option<&T> {
        match self {
            Envelope::Success(body) => Some(body),
            Envelope::Error(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Error(failure) => Some(failure),
        }
    }
}

/// Body of every error envelope. Carries no `data`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Successful fetch-by-id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleUser {
    pub data: UserRecord,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Successful list call. `pagination` is absent when the page had no users.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserPage {
    pub data: Vec<UserRecord>,
    #[serde(flatten)]
    pub pagination: Option<Pagination>,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

/// Successful creation. `extras` is the decoded response body as received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatedUser {
    pub data: UserRecord,
    pub extras: Map<String, Value>,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}

macro_rules! impl_outcome {
    ($($ty:ty),+) => {
        $(
            impl Outcome for $ty {
                fn message(&self) -> &str {
                    &self.message
                }

                fn status_code(&self) -> u16 {
                    self.status_code
                }
            }
        )+
    };
}

impl_outcome!(Failure, SingleUser, UserPage, CreatedUser);
