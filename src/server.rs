//! HTTP surface: one `GET /` route serving the table of a lunar year.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use shuowang::chinese::ChineseCalendar;
//! use shuowang::server::{self, AppState, ServerConfig};
//!
//! # async fn run() -> std::io::Result<()> {
//! let state = Arc::new(AppState::new(ChineseCalendar::default()));
//! server::serve(&ServerConfig::default(), state).await
//! # }
//! ```

use std::sync::Arc;

use axum::Router;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use chrono::{Datelike, FixedOffset, Utc};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, error, info};

use crate::chinese::{ChineseCalendar, LunarCalendar};
use crate::table;

/// Application state shared across handlers
#[derive(Debug)]
pub struct AppState<C> {
    pub calendar: C,
    /// Offset used to tell the current year when a request names none.
    pub utc_offset_minutes: i32,
}

impl AppState<ChineseCalendar> {
    pub fn new(calendar: ChineseCalendar) -> Self {
        Self {
            utc_offset_minutes: calendar.utc_offset_minutes(),
            calendar,
        }
    }
}

/// Query string of `GET /`. `year` is kept as text so that malformed values
/// fall back to the current year instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

impl YearQuery {
    /// The requested year, if present and a valid integer.
    pub fn year(&self) -> Option<i32> {
        self.year.as_deref().and_then(|y| y.parse().ok())
    }
}

/// Create the application router
///
/// # Routes
///
/// - `GET /?year=<integer>` - 1st and 15th days of every month of the lunar
///   year, defaulting to the current year
pub fn router<C>(state: Arc<AppState<C>>) -> Router
where
    C: LunarCalendar + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(lunar_dates::<C>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn lunar_dates<C>(
    State(state): State<Arc<AppState<C>>>,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Response
where
    C: LunarCalendar + Send + Sync + 'static,
{
    let requested = query.ok().and_then(|Query(q)| q.year());
    let year = requested.unwrap_or_else(|| current_year(state.utc_offset_minutes));
    debug!(year, defaulted = requested.is_none(), "building lunar table");

    let entries = match table::build(&state.calendar, year) {
        Ok(entries) => entries,
        Err(e) => {
            error!(year, error = %e, "failed to build lunar table");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match serde_json::to_vec(&entries) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => {
            error!(year, error = %e, "failed to encode lunar table");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to encode JSON").into_response()
        }
    }
}

/// Gregorian year of the present moment, `utc_offset_minutes` east of UTC.
///
/// Offsets chrono cannot represent fall back to UTC.
pub fn current_year(utc_offset_minutes: i32) -> i32 {
    let now = Utc::now();
    match FixedOffset::east_opt(utc_offset_minutes * 60) {
        Some(tz) => now.with_timezone(&tz).year(),
        None => now.year(),
    }
}

/// Configuration for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    /// Get the bind address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Binds `config` and serves the router until Ctrl-C.
pub async fn serve<C>(config: &ServerConfig, state: Arc<AppState<C>>) -> std::io::Result<()>
where
    C: LunarCalendar + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind(config.bind_addr()).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
