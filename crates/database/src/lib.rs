use std::{env, error::Error};

pub mod data_model;
pub mod queries;

pub struct DatabaseConnectionInfo {
    pub username: String,
    pub password: String,
    pub hostname: String,
    pub port: u16,
    pub database: String,
    /// Run the embedded migrations after connecting.
    pub migrate: bool,
}

impl DatabaseConnectionInfo {
    pub fn from_env() -> Option<Self> {
        let username = env::var("DATABASE_USER").ok()?;
        let password = env::var("DATABASE_PASSWORD").ok()?;
        let hostname = env::var("DATABASE_HOST").ok()?;
        let port: u16 = env::var("DATABASE_PORT").ok()?.parse().ok()?;
        let database = env::var("DATABASE_NAME").ok()?;
        let migrate = env::var("DATABASE_MIGRATE")
            .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);
        Some(Self {
            username,
            password,
            hostname,
            port,
            database,
            migrate,
        })
    }

    pub(self) fn postgres_url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.hostname, self.port, self.database
        )
    }
}

/// Process wide handle to the observations database. Cloning is cheap, all
/// clones share one connection pool.
#[derive(Clone)]
pub struct PgDatabase {
    pool: sqlx::PgPool,
}

impl PgDatabase {
    pub async fn connect(
        database_connection_info: DatabaseConnectionInfo,
    ) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let url = database_connection_info.postgres_url();
        let pool = sqlx::postgres::PgPool::connect(&url).await?;
        log::info!(
            "connected to database {} on {}:{}",
            database_connection_info.database,
            database_connection_info.hostname,
            database_connection_info.port
        );

        if database_connection_info.migrate {
            sqlx::migrate!("./migrations").run(&pool).await?;
            log::info!("database migrations applied");
        }

        Ok(Self { pool })
    }
}
