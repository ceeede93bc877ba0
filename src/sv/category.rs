use crate::{
  entity::ad_category,
  prelude::*,
  utils::{self, MAX_TITLE},
};

pub struct Category<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Category<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn create(
    &self,
    title: &str,
    slug: &str,
    description: &str,
  ) -> Result<ad_category::Model> {
    let title = utils::required("title", title, MAX_TITLE)?;
    let slug = utils::slug(slug)?;

    if self.by_slug(&slug).await?.is_some() {
      return Err(Error::SlugTaken(slug));
    }

    let category = ad_category::ActiveModel {
      title: Set(title),
      slug: Set(slug.clone()),
      description: Set(description.trim().to_string()),
      ..Default::default()
    }
    .insert(self.db)
    .await
    .map_err(|err| Error::or_conflict(err, || Error::SlugTaken(slug)))?;

    info!("Category `{}` created", category.slug);
    Ok(category)
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<ad_category::Model>> {
    Ok(ad_category::Entity::find_by_id(id).one(self.db).await?)
  }

  pub async fn by_slug(
    &self,
    slug: &str,
  ) -> Result<Option<ad_category::Model>> {
    let category = ad_category::Entity::find()
      .filter(ad_category::Column::Slug.eq(slug))
      .one(self.db)
      .await?;
    Ok(category)
  }

  pub async fn all(&self) -> Result<Vec<ad_category::Model>> {
    let categories = ad_category::Entity::find()
      .order_by_asc(ad_category::Column::Title)
      .all(self.db)
      .await?;
    Ok(categories)
  }

  /// Deleting a category deletes the ads filed under it.
  pub async fn delete(&self, id: i32) -> Result<()> {
    let result = ad_category::Entity::delete_by_id(id).exec(self.db).await?;
    if result.rows_affected == 0 {
      return Err(Error::CategoryNotFound);
    }

    info!("Category #{id} deleted");
    Ok(())
  }
}
