//! Walks the three users API operations and prints each envelope as pretty
//! JSON.
//!
//! `USERS_API_URL` overrides the base URL (default `https://reqres.in/api`);
//! `RUST_LOG` controls the request logging written to stderr.

use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;
use users_core::{UserService, DEFAULT_BASE_URL};

fn print_pretty<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let base_url = std::env::var("USERS_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
    info!(%base_url, "using users API");
    let service = UserService::with_base_url(&base_url);

    print_pretty(&service.get_user_by_id(1))?;
    print_pretty(&service.get_users(2))?;
    print_pretty(&service.create_user("kane james", "Cleaner"))?;
    Ok(())
}
