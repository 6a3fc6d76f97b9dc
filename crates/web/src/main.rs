use std::{error::Error, sync::Arc};

use database::{DatabaseConnectionInfo, PgDatabase};
use web::{config::WebConfig, start_web_server, WebState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    env_logger::init();

    // database
    let database_connection_info = DatabaseConnectionInfo::from_env()
        .ok_or("expected database connection info in env.")?;
    let database = PgDatabase::connect(database_connection_info).await?;

    // web server
    let config = WebConfig::from_env()?;
    let state = WebState::new(Arc::new(database), &config);
    start_web_server(state, &config).await?;

    Ok(())
}
