use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use crate::config::{AppConfig, StoreKind};
use crate::inference::ModelSlot;
use crate::users::{MemoryUserStore, PgUserStore, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub config: Arc<AppConfig>,
    pub generator: ModelSlot,
    pub summarizer: ModelSlot,
}

impl AppState {
    /// Connects the store and loads both models. Model failures degrade
    /// the slot; store failures abort startup.
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let config = Arc::new(config);

        let store: Arc<dyn UserStore> = match config.store {
            StoreKind::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .context("DATABASE_URL is required for the postgres store")?;
                let db = sqlx::postgres::PgPoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .connect(url)
                    .await
                    .context("connect to database")?;

                // Run migrations if present
                if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
                    tracing::warn!(error = %e, "migration failed; continuing");
                }
                Arc::new(PgUserStore::new(db))
            }
            StoreKind::Memory => {
                info!("using in-memory user store; data is lost on restart");
                Arc::new(MemoryUserStore::new())
            }
        };

        info!("loading models... this might take a moment");
        let (generator, summarizer) = tokio::join!(
            ModelSlot::load(&config.inference, &config.inference.generator_model),
            ModelSlot::load(&config.inference, &config.inference.summarizer_model),
        );

        Ok(Self {
            store,
            config,
            generator,
            summarizer,
        })
    }

    pub fn from_parts(
        store: Arc<dyn UserStore>,
        config: Arc<AppConfig>,
        generator: ModelSlot,
        summarizer: ModelSlot,
    ) -> Self {
        Self {
            store,
            config,
            generator,
            summarizer,
        }
    }

    /// Memory store, both models unavailable.
    #[cfg(test)]
    pub fn fake() -> Self {
        Self::from_parts(
            Arc::new(MemoryUserStore::new()),
            Arc::new(AppConfig::for_tests()),
            ModelSlot::unavailable("test"),
            ModelSlot::unavailable("test"),
        )
    }
}
