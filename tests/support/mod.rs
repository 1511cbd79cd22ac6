//! Mock films endpoint shared by the integration tests

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;

pub const TOKEN: &str = "test-token";

pub const NOLAN_FILMS: &str = r#"[
    {
        "name": "Batman Begins",
        "length": 140,
        "rating": 8.2,
        "releaseDate": "2006-06-16",
        "directorName": "Christopher Nolan"
    },
    {
        "name": "Interstellar",
        "length": 169,
        "rating": 8.6,
        "releaseDate": "2014-11-07",
        "directorName": "Christopher Nolan"
    },
    {
        "name": "Prestige",
        "length": 130,
        "rating": 8.5,
        "releaseDate": "2006-11-10",
        "directorName": "Christopher Nolan"
    }
]"#;

/// Number of requests the mock has served on `/films`
#[derive(Clone, Default)]
pub struct Hits(Arc<AtomicUsize>);

impl Hits {
    pub fn count(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }
}

async fn films(State(hits): State<Hits>, headers: HeaderMap) -> Response {
    hits.0.fetch_add(1, Ordering::SeqCst);

    let expected = format!("Bearer {}", TOKEN);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == expected);

    if !authorized {
        return StatusCode::UNAUTHORIZED.into_response();
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        NOLAN_FILMS,
    )
        .into_response()
}

async fn malformed() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html")],
        "<html>maintenance</html>",
    )
        .into_response()
}

async fn server_error() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// Starts the mock endpoint on an ephemeral port
pub async fn start_server() -> (SocketAddr, Hits) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/films", get(films))
        .route("/malformed", get(malformed))
        .route("/error", get(server_error))
        .with_state(hits.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (addr, hits)
}
