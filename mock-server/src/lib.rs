use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tracing::debug;
use uuid::Uuid;

pub const PER_PAGE: usize = 6;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

/// Body of `GET /api/users`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserPage {
    pub page: usize,
    pub per_page: usize,
    pub total: usize,
    pub total_pages: usize,
    pub data: Vec<User>,
}

#[derive(Deserialize)]
pub struct ListParams {
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

pub type Db = Arc<Vec<User>>;

const SEED: [(&str, &str); 12] = [
    ("George", "Bluth"),
    ("Janet", "Weaver"),
    ("Emma", "Wong"),
    ("Eve", "Holt"),
    ("Charles", "Morris"),
    ("Tracey", "Ramos"),
    ("Michael", "Lawson"),
    ("Lindsay", "Ferguson"),
    ("Tobias", "Funke"),
    ("Byron", "Fields"),
    ("George", "Edwards"),
    ("Rachel", "Howell"),
];

pub fn seed_users() -> Vec<User> {
    SEED.iter()
        .zip(1u64..)
        .map(|((first, last), id)| User {
            id,
            email: format!("{}.{}@reqres.in", first.to_lowercase(), last.to_lowercase()),
            first_name: first.to_string(),
            last_name: last.to_string(),
            avatar: format!("https://reqres.in/img/faces/{id}-image.jpg"),
        })
        .collect()
}

pub fn app() -> Router {
    let db: Db = Arc::new(seed_users());
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Pages are 1-based; page 0 is served as page 1 and pages past the end are
/// empty.
async fn list_users(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<UserPage> {
    let page = params.page.max(1);
    let total = db.len();
    let data = db
        .iter()
        .skip((page - 1).saturating_mul(PER_PAGE))
        .take(PER_PAGE)
        .cloned()
        .collect();
    debug!(page, "listing users");
    Json(UserPage {
        page,
        per_page: PER_PAGE,
        total,
        total_pages: total.div_ceil(PER_PAGE),
        data,
    })
}

async fn get_user(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    db.iter()
        .find(|user| user.id == id)
        .map(|user| Json(json!({ "data": user })))
        .ok_or((StatusCode::NOT_FOUND, Json(json!({}))))
}

/// Echoes the submitted object with a generated `id` and `createdAt`.
async fn create_user(Json(mut input): Json<Map<String, Value>>) -> (StatusCode, Json<Value>) {
    input.insert("id".to_string(), Value::String(Uuid::new_v4().simple().to_string()));
    input.insert(
        "createdAt".to_string(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    debug!(id = %input["id"], "created user");
    (StatusCode::CREATED, Json(Value::Object(input)))
}
