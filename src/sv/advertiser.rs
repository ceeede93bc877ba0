use crate::{
  entity::{ad, advertiser, user},
  prelude::*,
  sv::UrlVerifier,
  utils::{self, MAX_TITLE},
};

pub struct Advertiser<'a> {
  db: &'a DatabaseConnection,
  urls: &'a UrlVerifier,
}

impl advertiser::Model {
  pub fn website_url(&self) -> &str {
    &self.website
  }
}

impl<'a> Advertiser<'a> {
  pub fn new(db: &'a DatabaseConnection, urls: &'a UrlVerifier) -> Self {
    Self { db, urls }
  }

  pub async fn create(
    &self,
    user_id: i32,
    company_name: &str,
    website: &str,
  ) -> Result<advertiser::Model> {
    let company_name =
      utils::required("company name", company_name, MAX_TITLE)?;
    let website = self.urls.check(website).await?;

    user::Entity::find_by_id(user_id)
      .one(self.db)
      .await?
      .ok_or(Error::UserNotFound)?;

    if self.by_user(user_id).await?.is_some() {
      return Err(Error::AccountTaken);
    }

    let advertiser = advertiser::ActiveModel {
      company_name: Set(company_name),
      website: Set(website.to_string()),
      user_id: Set(user_id),
      ..Default::default()
    }
    .insert(self.db)
    .await
    .map_err(|err| Error::or_conflict(err, || Error::AccountTaken))?;

    info!(
      "Advertiser #{} `{}` created for user #{}",
      advertiser.id, advertiser.company_name, user_id
    );
    Ok(advertiser)
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<advertiser::Model>> {
    Ok(advertiser::Entity::find_by_id(id).one(self.db).await?)
  }

  pub async fn by_user(
    &self,
    user_id: i32,
  ) -> Result<Option<advertiser::Model>> {
    let advertiser = advertiser::Entity::find()
      .filter(advertiser::Column::UserId.eq(user_id))
      .one(self.db)
      .await?;
    Ok(advertiser)
  }

  pub async fn all(&self) -> Result<Vec<advertiser::Model>> {
    let advertisers = advertiser::Entity::find()
      .order_by_asc(advertiser::Column::CompanyName)
      .all(self.db)
      .await?;
    Ok(advertisers)
  }

  pub async fn update(
    &self,
    id: i32,
    company_name: Option<&str>,
    website: Option<&str>,
  ) -> Result<advertiser::Model> {
    let advertiser = advertiser::Entity::find_by_id(id)
      .one(self.db)
      .await?
      .ok_or(Error::AdvertiserNotFound)?;

    let mut active: advertiser::ActiveModel = advertiser.into();
    if let Some(name) = company_name {
      active.company_name =
        Set(utils::required("company name", name, MAX_TITLE)?);
    }
    if let Some(website) = website {
      active.website = Set(self.urls.check(website).await?.to_string());
    }

    Ok(active.update(self.db).await?)
  }

  /// Deletes the advertiser along with every ad it owns.
  /// Returns how many ads went with it.
  pub async fn delete(&self, id: i32) -> Result<u64> {
    let txn = self.db.begin().await?;

    advertiser::Entity::find_by_id(id)
      .one(&txn)
      .await?
      .ok_or(Error::AdvertiserNotFound)?;

    let ads = ad::Entity::find()
      .filter(ad::Column::AdvertiserId.eq(id))
      .count(&txn)
      .await?;

    advertiser::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    info!("Advertiser #{id} deleted with {ads} ads");
    Ok(ads)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::{self, test_utils::test_db};

  #[tokio::test]
  async fn test_create_advertiser() {
    let db = test_db::setup().await;
    let urls = test_db::offline();
    let user = sv::User::new(&db).create("acme").await.unwrap();

    let advertiser = Advertiser::new(&db, &urls)
      .create(user.id, "  Acme Corp ", "https://acme.example.com")
      .await
      .unwrap();

    assert_eq!(advertiser.company_name, "Acme Corp");
    assert_eq!(advertiser.website_url(), "https://acme.example.com/");
    assert_eq!(advertiser.user_id, user.id);
  }

  #[tokio::test]
  async fn test_one_advertiser_per_account() {
    let db = test_db::setup().await;
    let urls = test_db::offline();
    let fx = test_db::seed(&db).await;

    let result = Advertiser::new(&db, &urls)
      .create(fx.user.id, "Acme Again", "https://acme.example.com")
      .await;

    assert!(matches!(result, Err(Error::AccountTaken)));
  }

  #[tokio::test]
  async fn test_concurrent_create_for_one_account() {
    let db = test_db::setup().await;
    let urls = test_db::offline();
    let user = sv::User::new(&db).create("globex").await.unwrap();
    let sv = Advertiser::new(&db, &urls);

    let (a, b) = tokio::join!(
      sv.create(user.id, "Globex", "https://globex.example.com"),
      sv.create(user.id, "Globex Corp", "https://globex.example.com")
    );

    assert!(a.is_ok() != b.is_ok());
    assert!(matches!(a.and(b), Err(Error::AccountTaken)));
  }

  #[tokio::test]
  async fn test_rejects_bad_input() {
    let db = test_db::setup().await;
    let urls = test_db::offline();
    let user = sv::User::new(&db).create("acme").await.unwrap();
    let sv = Advertiser::new(&db, &urls);

    assert!(matches!(
      sv.create(user.id, "Acme", "not a url").await,
      Err(Error::Validation(Invalid::Url(_)))
    ));
    assert!(matches!(
      sv.create(user.id, "", "https://acme.example.com").await,
      Err(Error::Validation(Invalid::Required(_)))
    ));
    assert!(matches!(
      sv.create(user.id + 1, "Acme", "https://acme.example.com").await,
      Err(Error::UserNotFound)
    ));
  }

  #[tokio::test]
  async fn test_all_ordered_by_company_name() {
    let db = test_db::setup().await;
    let urls = test_db::offline();
    let sv = Advertiser::new(&db, &urls);

    for (name, company) in [("z", "Zeta"), ("a", "Alpha"), ("m", "Mu")] {
      let user = sv::User::new(&db).create(name).await.unwrap();
      sv.create(user.id, company, "https://example.com").await.unwrap();
    }

    let names: Vec<_> =
      sv.all().await.unwrap().into_iter().map(|a| a.company_name).collect();
    assert_eq!(names, ["Alpha", "Mu", "Zeta"]);
  }

  #[tokio::test]
  async fn test_update_website() {
    let db = test_db::setup().await;
    let urls = test_db::offline();
    let fx = test_db::seed(&db).await;

    let updated = Advertiser::new(&db, &urls)
      .update(fx.advertiser.id, None, Some("https://acme.example.org/ads"))
      .await
      .unwrap();

    assert_eq!(updated.company_name, "Acme Corp");
    assert_eq!(updated.website, "https://acme.example.org/ads");
  }

  #[tokio::test]
  async fn test_deleting_account_removes_advertiser() {
    let db = test_db::setup().await;
    let fx = test_db::seed(&db).await;

    user::Entity::delete_by_id(fx.user.id).exec(&db).await.unwrap();

    let urls = test_db::offline();
    let found = Advertiser::new(&db, &urls).by_id(fx.advertiser.id).await;
    assert!(found.unwrap().is_none());
  }
}
