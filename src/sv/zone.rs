use crate::{
  entity::ad_zone,
  prelude::*,
  utils::{self, MAX_TITLE},
};

pub struct Zone<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Zone<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    title: &str,
    slug: &str,
    description: &str,
  ) -> Result<ad_zone::Model> {
    let zone = ad_zone::ActiveModel {
      title: Set(utils::required("title", title, MAX_TITLE)?),
      slug: Set(utils::slug(slug)?),
      description: Set(description.trim().to_string()),
      ..Default::default()
    }
    .insert(self.db)
    .await?;

    info!("Zone `{}` created", zone.slug);
    Ok(zone)
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<ad_zone::Model>> {
    Ok(ad_zone::Entity::find_by_id(id).one(self.db).await?)
  }

  /// Zone slugs are not unique, so this may return several zones.
  pub async fn by_slug(&self, slug: &str) -> Result<Vec<ad_zone::Model>> {
    let zones = ad_zone::Entity::find()
      .filter(ad_zone::Column::Slug.eq(slug))
      .order_by_asc(ad_zone::Column::Title)
      .all(self.db)
      .await?;
    Ok(zones)
  }

  pub async fn all(&self) -> Result<Vec<ad_zone::Model>> {
    let zones = ad_zone::Entity::find()
      .order_by_asc(ad_zone::Column::Title)
      .all(self.db)
      .await?;
    Ok(zones)
  }

  pub async fn delete(&self, id: i32) -> Result<()> {
    let result = ad_zone::Entity::delete_by_id(id).exec(self.db).await?;
    if result.rows_affected == 0 {
      return Err(Error::ZoneNotFound);
    }

    info!("Zone #{id} deleted");
    Ok(())
  }
}
