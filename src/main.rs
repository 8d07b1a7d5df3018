//! The ABC Pharmacy web service.

use abc_pharmacy::{
    app,
    infra::{config, logging, state::AppState},
};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    dotenvy::dotenv().ok();
    let _guard = logging::init_logging();
    color_eyre::install()?;

    let config = config::load_config()?;
    let address = format!("{}:{}", config.server.http_address, config.server.http_port);
    let state = AppState::from_config(config).await?;

    let listener = TcpListener::bind(&address).await?;
    app::run_app(listener, state).await?;

    Ok(())
}
