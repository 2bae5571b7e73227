//! Liveness endpoint for the hosting platform: `GET /` and `GET /health`.
//! Reads the bot status through a [`StatusReader`]; never writes it.

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use chrono::Utc;
use dbot_core::StatusReader;
use serde::Serialize;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::info;

#[derive(Clone)]
pub struct HealthState {
    status: StatusReader,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub bot_status: &'static str,
    pub detail: String,
    pub checked_at: String,
}

pub fn router(status: StatusReader) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .with_state(HealthState { status })
}

/// Binds the health listener. Called before any task is spawned so a taken port fails startup.
pub async fn bind(address: &str) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(address).await?;
    info!(bind_address = %address, "Health endpoint bound");
    Ok(listener)
}

/// Serves the health routes on `listener` until `shutdown` turns true.
pub async fn serve(
    listener: TcpListener,
    status: StatusReader,
    mut shutdown: watch::Receiver<bool>,
) -> std::io::Result<()> {
    axum::serve(listener, router(status))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await?;

    info!("Health endpoint stopped");
    Ok(())
}

pub async fn home(State(state): State<HealthState>) -> String {
    format!("OK\nStatus: {}\n", state.status.current())
}

/// Always 200 while the process is alive; the bot status is informational.
pub async fn health(State(state): State<HealthState>) -> (StatusCode, Json<HealthResponse>) {
    let current = state.status.current();
    let payload = HealthResponse {
        status: "ok",
        bot_status: current.label(),
        detail: current.to_string(),
        checked_at: Utc::now().to_rfc3339(),
    };
    (StatusCode::OK, Json(payload))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::extract::State;
    use axum::http::{Request, StatusCode};
    use axum::Json;
    use dbot_core::{BotStatus, StatusCell};
    use tower::ServiceExt;

    use super::{bind, health, home, router, serve, HealthState};

    #[tokio::test]
    async fn health_reports_current_bot_status() {
        let (cell, reader) = StatusCell::channel();
        cell.set(BotStatus::Monitoring);

        let (status, Json(payload)) = health(State(HealthState { status: reader })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.status, "ok");
        assert_eq!(payload.bot_status, "monitoring");
        assert_eq!(payload.detail, "Monitoring chat");
    }

    #[tokio::test]
    async fn health_stays_ok_when_bot_failed() {
        let (cell, reader) = StatusCell::channel();
        cell.set(BotStatus::Error("Unauthorized".to_string()));

        let (status, Json(payload)) = health(State(HealthState { status: reader })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload.bot_status, "error");
        assert_eq!(payload.detail, "Error: Unauthorized");
    }

    #[tokio::test]
    async fn home_returns_ok_with_status_line() {
        let (_cell, reader) = StatusCell::channel();

        let body = home(State(HealthState { status: reader })).await;

        assert_eq!(body, "OK\nStatus: Not started\n");
    }

    #[tokio::test]
    async fn router_serves_both_routes() {
        let (cell, reader) = StatusCell::channel();
        cell.set(BotStatus::Starting);
        let app = router(reader);

        for uri in ["/", "/health"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "uri {}", uri);
        }

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let bytes = axum::body::to_bytes(response.into_body(), 4096).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["bot_status"], "starting");
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let (_cell, reader) = StatusCell::channel();
        let response = router(reader)
            .oneshot(Request::builder().uri("/start_bot").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn bind_fails_when_port_is_taken() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let address = taken.local_addr().unwrap().to_string();

        assert!(bind(&address).await.is_err());
    }

    #[tokio::test]
    async fn serve_stops_on_shutdown() {
        let (_cell, reader) = StatusCell::channel();
        let (tx, rx) = tokio::sync::watch::channel(false);
        let listener = bind("127.0.0.1:0").await.unwrap();

        let server = tokio::spawn(serve(listener, reader, rx));
        tx.send(true).unwrap();

        let result = tokio::time::timeout(std::time::Duration::from_secs(5), server)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(result.is_ok());
    }
}
