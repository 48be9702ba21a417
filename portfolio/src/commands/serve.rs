use portfolio_config::Config;
use portfolio_email_contracts::Deliverer;
use tracing::{info, warn};

use crate::{email, environment};

pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!(environment = ?config.environment, "Setting up email delivery");
    let deliverer = email::connect(config.environment, &config.email)?;
    if let Err(err) = deliverer.ping().await {
        warn!("SMTP server is not reachable, contact messages will fail: {err:#}");
    }

    let server = environment::rest_server(&config, deliverer)?;
    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    server.serve().await
}
