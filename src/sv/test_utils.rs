//! Shared test utilities for database setup

#[cfg(test)]
pub mod test_db {
  use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DbBackend, EntityTrait,
    Schema,
  };

  use crate::{entity::*, prelude::Duration, sv::UrlVerifier};

  async fn create<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
  ) {
    let stmt = schema.create_table_from_entity(entity);
    db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
  }

  /// Creates an in-memory SQLite database with all required tables
  pub async fn setup() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let schema = Schema::new(DbBackend::Sqlite);

    // parents before children so the foreign keys resolve
    create(&db, &schema, user::Entity).await;
    create(&db, &schema, advertiser::Entity).await;
    create(&db, &schema, ad_category::Entity).await;
    create(&db, &schema, ad_zone::Entity).await;
    create(&db, &schema, ad::Entity).await;
    create(&db, &schema, text_ad::Entity).await;
    create(&db, &schema, banner_ad::Entity).await;
    create(&db, &schema, impression::Entity).await;
    create(&db, &schema, click::Entity).await;

    db
  }

  /// Syntax-only URL checks; tests never touch the network.
  pub fn offline() -> UrlVerifier {
    UrlVerifier::new(false, Duration::from_secs(1)).unwrap()
  }

  pub struct Fixture {
    pub user: user::Model,
    pub advertiser: advertiser::Model,
    pub category: ad_category::Model,
    pub zone: ad_zone::Model,
  }

  /// One advertiser, the "general" category and the "sidebar" zone.
  pub async fn seed(db: &DatabaseConnection) -> Fixture {
    let urls = offline();
    let user = crate::sv::User::new(db).create("acme").await.unwrap();
    let advertiser = crate::sv::Advertiser::new(db, &urls)
      .create(user.id, "Acme Corp", "https://acme.example.com")
      .await
      .unwrap();
    let category = crate::sv::Category::new(db)
      .create("General", "general", "")
      .await
      .unwrap();
    let zone = crate::sv::Zone::new(db)
      .create("Sidebar", "sidebar", "Right column")
      .await
      .unwrap();

    Fixture { user, advertiser, category, zone }
  }
}
