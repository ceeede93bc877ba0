pub use sea_orm_migration::prelude::*;

mod m20261017_000001_create_users;
mod m20261017_000002_create_lookups;
mod m20261017_000003_create_ads;
mod m20261017_000004_create_tracking;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20261017_000001_create_users::Migration),
      Box::new(m20261017_000002_create_lookups::Migration),
      Box::new(m20261017_000003_create_ads::Migration),
      Box::new(m20261017_000004_create_tracking::Migration),
    ]
  }
}

#[cfg(test)]
mod tests {
  use sea_orm_migration::sea_orm::Database;

  use super::*;

  const TABLES: [&str; 9] = [
    "users",
    "advertisers",
    "ad_categories",
    "ad_zones",
    "ads",
    "text_ads",
    "banner_ads",
    "ad_impressions",
    "ad_clicks",
  ];

  #[tokio::test]
  async fn test_up_creates_every_table() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();

    let manager = SchemaManager::new(&db);
    for table in TABLES {
      assert!(manager.has_table(table).await.unwrap(), "missing {table}");
    }
    assert!(manager.has_column("ads", "stop_showing").await.unwrap());
  }

  #[tokio::test]
  async fn test_down_drops_every_table() {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    Migrator::down(&db, None).await.unwrap();

    let manager = SchemaManager::new(&db);
    for table in TABLES {
      assert!(!manager.has_table(table).await.unwrap(), "left {table}");
    }
  }
}
