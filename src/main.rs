//! Spotify token broker server binary.

// crates.io
use color_eyre::Result;
use tokio::net::TcpListener;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
// self
use spotify_token_broker::{
	config::BrokerConfig,
	flows::ReqwestBroker,
	server::{self, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	// A missing `.env` file is fine; the process environment still applies.
	let dotenv = dotenvy::dotenv();

	tracing_subscriber::registry()
		.with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.with(tracing_subscriber::fmt::layer())
		.init();

	if let Ok(path) = dotenv {
		tracing::debug!(path = %path.display(), "loaded environment file");
	}

	let config = BrokerConfig::from_env()?;

	if !config.credentials.is_complete() {
		tracing::warn!(
			"{} or {} is not set; /token will answer 500 until both are provided",
			BrokerConfig::CLIENT_ID_VAR,
			BrokerConfig::CLIENT_SECRET_VAR,
		);
	}

	let broker = ReqwestBroker::from_config(&config)?;
	let app = server::router(AppState::new(broker, config.service_name.as_str()));
	let listener = TcpListener::bind(config.bind).await?;
	let addr = listener.local_addr()?;

	tracing::info!(
		%addr,
		provider = %config.descriptor.id,
		"starting {} v{}",
		config.service_name,
		env!("CARGO_PKG_VERSION"),
	);

	server::serve(listener, app).await?;

	Ok(())
}
