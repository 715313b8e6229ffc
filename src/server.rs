//! HTTP surface for the broker: health + token endpoints behind a permissive CORS policy.
//!
//! - `GET /` answers `{"status":"ok","service":"<name>"}`.
//! - `GET /token` answers the provider's token JSON verbatim, `500` with a configuration detail
//!   when credentials are missing, or `502` when the provider cannot supply a token.
//!
//! Error bodies take the shape `{"detail":"<message>"}` and never include error internals.

// crates.io
use axum::{
	Json, Router,
	extract::State,
	http::{StatusCode, header},
	response::{IntoResponse, Response},
	routing::get,
};
use tokio::net::TcpListener;
use tower_http::{
	cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer},
	trace::TraceLayer,
};
// self
use crate::{_prelude::*, flows::Broker, http::TokenHttpClient};

/// Shared state handed to every handler.
pub struct AppState<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Broker serving token requests.
	pub broker: Arc<Broker<C>>,
	/// Name reported by the health endpoint.
	pub service_name: Arc<str>,
}
impl<C> AppState<C>
where
	C: ?Sized + TokenHttpClient,
{
	/// Wraps a broker and the service name reported by `GET /`.
	pub fn new(broker: impl Into<Arc<Broker<C>>>, service_name: impl Into<Arc<str>>) -> Self {
		Self { broker: broker.into(), service_name: service_name.into() }
	}
}
impl<C> Clone for AppState<C>
where
	C: ?Sized + TokenHttpClient,
{
	fn clone(&self) -> Self {
		Self { broker: self.broker.clone(), service_name: self.service_name.clone() }
	}
}

/// Error returned by handlers, rendered as `{"detail": ...}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiError {
	/// Response status.
	pub status: StatusCode,
	/// Caller-facing message.
	pub detail: String,
}
impl ApiError {
	/// Maps a broker error onto a status and a generic, secret-free detail message.
	pub fn from_broker(err: &Error, provider: &str) -> Self {
		match err {
			Error::Config(_) => Self {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				detail: format!("Server misconfigured: Missing {provider} credentials"),
			},
			Error::Upstream(_) => Self {
				status: StatusCode::BAD_GATEWAY,
				detail: format!("Failed to communicate with {provider}"),
			},
		}
	}
}
impl IntoResponse for ApiError {
	fn into_response(self) -> Response {
		(self.status, Json(Detail { detail: self.detail })).into_response()
	}
}

#[derive(Serialize)]
struct Detail {
	detail: String,
}

#[derive(Serialize)]
struct Health {
	status: &'static str,
	service: String,
}

/// Builds the application router with CORS and request tracing applied.
pub fn router<C>(state: AppState<C>) -> Router
where
	C: ?Sized + TokenHttpClient,
{
	Router::new()
		.route("/", get(health::<C>))
		.route("/token", get(token::<C>))
		.layer(cors_layer())
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

/// Serves `app` on `listener` until Ctrl-C (or SIGTERM on Unix) arrives.
pub async fn serve(listener: TcpListener, app: Router) -> std::io::Result<()> {
	axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await
}

/// Allows any origin, method, and header with credentials.
///
/// Wildcards cannot be combined with credentials, so the request's own values are mirrored.
fn cors_layer() -> CorsLayer {
	CorsLayer::new()
		.allow_origin(AllowOrigin::mirror_request())
		.allow_methods(AllowMethods::mirror_request())
		.allow_headers(AllowHeaders::mirror_request())
		.allow_credentials(true)
}

async fn health<C>(State(state): State<AppState<C>>) -> Json<Health>
where
	C: ?Sized + TokenHttpClient,
{
	Json(Health { status: "ok", service: state.service_name.to_string() })
}

async fn token<C>(State(state): State<AppState<C>>) -> Result<Response, ApiError>
where
	C: ?Sized + TokenHttpClient,
{
	let payload = state
		.broker
		.get_token()
		.await
		.map_err(|e| ApiError::from_broker(&e, &state.broker.descriptor.display_name))?;

	Ok(([(header::CONTENT_TYPE, "application/json")], payload.as_json().to_owned()).into_response())
}

async fn shutdown_signal() {
	let ctrl_c = async {
		if tokio::signal::ctrl_c().await.is_err() {
			std::future::pending::<()>().await;
		}
	};
	#[cfg(unix)]
	let terminate = async {
		match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
			Ok(mut signal) => {
				signal.recv().await;
			},
			Err(_) => std::future::pending::<()>().await,
		}
	};
	#[cfg(not(unix))]
	let terminate = std::future::pending::<()>();

	tokio::select! {
		_ = ctrl_c => {},
		_ = terminate => {},
	}

	#[cfg(feature = "tracing")]
	tracing::info!("shutdown signal received");
}

#[cfg(test)]
mod tests {
	// self
	use super::*;
	use crate::error::{ConfigError, UpstreamError};

	#[test]
	fn broker_errors_map_to_generic_details() {
		let config = Error::from(ConfigError::MissingCredentials { missing: "client secret" });
		let upstream = Error::from(UpstreamError::Status { status: 500, oauth_error: None });

		assert_eq!(
			ApiError::from_broker(&config, "Spotify"),
			ApiError {
				status: StatusCode::INTERNAL_SERVER_ERROR,
				detail: "Server misconfigured: Missing Spotify credentials".into(),
			}
		);
		assert_eq!(
			ApiError::from_broker(&upstream, "Spotify"),
			ApiError {
				status: StatusCode::BAD_GATEWAY,
				detail: "Failed to communicate with Spotify".into(),
			}
		);
	}
}
