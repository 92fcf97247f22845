mod basic;
mod generate;

use crate::gemini;
use crate::logging::*;
use axum::Router;
use ocid_common::config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

pub struct AppState {
    gemini: gemini::Client,
}

pub async fn run() {
    let log = DEFAULT.new(o!("function" => "web::run"));

    let gemini = match gemini::Client::new_default() {
        Ok(client) => client,
        Err(err) => {
            crit!(log, "Failed to create Gemini client"; "error" => %err);
            return;
        }
    };
    let state = Arc::new(AppState { gemini });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = add_routes(Router::new(), &[basic::add_route, generate::add_route])
        .with_state(state)
        .layer(cors);

    let bind_address =
        config::get("WEB_BIND_ADDRESS").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    info!(log, "Listening"; "address" => %bind_address);

    let listener = tokio::net::TcpListener::bind(&bind_address).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

fn add_routes<T>(app: Router<T>, funcs: &[fn(Router<T>) -> Router<T>]) -> Router<T> {
    let mut app = app;
    for func in funcs {
        app = func(app);
    }
    app
}
