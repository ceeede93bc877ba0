use migration::{Migrator, MigratorTrait};

use crate::{config::Config, prelude::*, sv};

pub struct AppState {
  pub db: DatabaseConnection,
  pub config: Config,
  pub urls: sv::UrlVerifier,
}

/// Per-request view of the services, all borrowing the shared pool.
pub struct Services<'a> {
  pub user: sv::User<'a>,
  pub advertiser: sv::Advertiser<'a>,
  pub category: sv::Category<'a>,
  pub zone: sv::Zone<'a>,
  pub ad: sv::Ad<'a>,
  pub tracking: sv::Tracking<'a>,
}

impl AppState {
  pub async fn new(config: Config) -> anyhow::Result<Self> {
    let db = Database::connect(config.database_url.as_str())
      .await
      .with_context(|| format!("Failed to open {}", config.database_url))?;

    Migrator::up(&db, None).await.context("Failed to run migrations")?;

    Self::with_db(db, config)
  }

  pub fn with_db(
    db: DatabaseConnection,
    config: Config,
  ) -> anyhow::Result<Self> {
    let urls = sv::UrlVerifier::new(config.verify_urls, config.verify_timeout)?;

    if !urls.verify_exists() {
      warn!("URL verification disabled, ad URLs are only checked for syntax");
    }

    Ok(Self { db, config, urls })
  }

  pub fn sv(&self) -> Services<'_> {
    Services {
      user: sv::User::new(&self.db),
      advertiser: sv::Advertiser::new(&self.db, &self.urls),
      category: sv::Category::new(&self.db),
      zone: sv::Zone::new(&self.db),
      ad: sv::Ad::new(&self.db, &self.urls),
      tracking: sv::Tracking::new(&self.db),
    }
  }
}
