use std::sync::Arc;

use mock_security_realm::cli::RealmCli;
use mock_security_realm::{init_logging, MockRealm, MockSecurityRealm, RealmConfig};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize configuration first (so logging picks up config)
    dotenvy::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    init_logging(&log_level);

    tracing::info!("Starting mock security realm v{}", MockRealm::version());

    // A JSON config file given on the command line wins over the environment
    let config = match std::env::args().nth(1) {
        Some(path) => {
            tracing::info!("Loading realm configuration from {}", path);
            RealmConfig::from_file(&path)
        }
        None => RealmConfig::from_env(),
    };
    let config = match config {
        Ok(config) => config,
        Err(err) => {
            tracing::error!("Failed to load realm configuration: {}", err);
            return Err(err.into());
        }
    };

    let realm = Arc::new(MockSecurityRealm::new(config));
    let cli = RealmCli::new(realm);
    cli.run(BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await?;

    Ok(())
}
