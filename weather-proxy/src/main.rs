//! weather-proxy: thin HTTP proxy over the Visual Crossing timeline API
//! with a TTL cache in front, so repeated queries for the same location
//! cost one upstream call per cache window.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

mod cache;
mod client;
mod config;
mod error;

use cache::ResponseCache;
use client::{ForecastRange, WeatherClient};
use config::Config;
use error::ProxyError;

const CACHE_CAPACITY: usize = 256;

struct AppState {
    cache: Mutex<ResponseCache>,
    client: WeatherClient,
}

#[derive(Debug, Deserialize)]
struct WeatherQuery {
    location: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    let state = Arc::new(AppState {
        cache: Mutex::new(ResponseCache::new(
            CACHE_CAPACITY,
            Duration::from_secs(config.cache_ttl_secs),
        )),
        client: WeatherClient::new(config.api_token.clone()),
    });

    let app = Router::new()
        .route("/weather-today", get(weather_today))
        .route("/weather-tomorrow", get(weather_tomorrow))
        .route("/weather-week", get(weather_week))
        .route("/ping", get(ping))
        .with_state(state);

    tracing::info!("listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("bind {}", config.bind))?;
    axum::serve(listener, app).await.context("serve")?;

    Ok(())
}

async fn ping() -> &'static str {
    "pong"
}

async fn weather_today(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response, ProxyError> {
    forecast(state, query, ForecastRange::Today).await
}

async fn weather_tomorrow(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response, ProxyError> {
    forecast(state, query, ForecastRange::Tomorrow).await
}

async fn weather_week(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WeatherQuery>,
) -> Result<Response, ProxyError> {
    forecast(state, query, ForecastRange::Week).await
}

async fn forecast(
    state: Arc<AppState>,
    query: WeatherQuery,
    range: ForecastRange,
) -> Result<Response, ProxyError> {
    let location = query
        .location
        .filter(|l| !l.is_empty())
        .ok_or(ProxyError::MissingLocation)?;
    let key = range.cache_key(&location);

    let cached = state
        .cache
        .lock()
        .expect("cache mutex never poisoned")
        .get(&key);
    if let Some(body) = cached {
        tracing::debug!(%key, "cache hit");
        return Ok(json_body(body));
    }

    let body = state.client.fetch(&location, range).await?;
    state
        .cache
        .lock()
        .expect("cache mutex never poisoned")
        .put(key.clone(), body.clone());
    tracing::debug!(%key, "cache fill");

    Ok(json_body(body))
}

// The upstream body is already JSON; pass it through untouched.
fn json_body(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}
