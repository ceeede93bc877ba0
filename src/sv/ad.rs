use rand::seq::IndexedRandom;
use sea_orm::ConnectionTrait;
use serde::{Deserialize, Serialize};

use crate::{
  entity::{AdKind, ad, ad_category, ad_zone, advertiser, banner_ad, text_ad},
  prelude::*,
  sv::UrlVerifier,
  utils::{self, MAX_TITLE},
};

/// Banner images are stored relative to the media root under this prefix.
pub const BANNER_UPLOAD_DIR: &str = "adzone/bannerads/";

/// Type-specific content of an ad.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "lowercase")]
pub enum Creative {
  Text(String),
  /// Image path relative to the media root.
  Banner(String),
}

impl Creative {
  pub fn kind(&self) -> AdKind {
    match self {
      Creative::Text(_) => AdKind::Text,
      Creative::Banner(_) => AdKind::Banner,
    }
  }

  fn validated(self) -> Result<Self> {
    match self {
      Creative::Text(body) => {
        let body = body.trim();
        if body.is_empty() {
          return Err(Invalid::Required("content").into());
        }
        Ok(Creative::Text(body.to_string()))
      }
      Creative::Banner(path) => banner_path(&path).map(Creative::Banner),
    }
  }
}

/// Accepts a bare file name or a path already under [`BANNER_UPLOAD_DIR`].
fn banner_path(raw: &str) -> Result<String> {
  let raw = raw.trim();
  let name = raw.strip_prefix(BANNER_UPLOAD_DIR).unwrap_or(raw);

  if name.is_empty() {
    return Err(Invalid::Required("banner image").into());
  }
  if name.contains(['/', '\\']) || name.starts_with('.') {
    return Err(Invalid::BannerPath(raw.to_string()).into());
  }

  Ok(format!("{BANNER_UPLOAD_DIR}{name}"))
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdWithCreative {
  pub ad: ad::Model,
  pub creative: Creative,
}

/// Base attributes shared by every ad type.
#[derive(Debug, Clone)]
pub struct NewAd {
  pub title: String,
  pub url: String,
  pub advertiser_id: i32,
  pub category_id: i32,
  pub zone_id: i32,
  pub enabled: bool,
  pub start_showing: Option<DateTime>,
  pub stop_showing: Option<DateTime>,
}

impl NewAd {
  pub fn new(
    title: impl Into<String>,
    url: impl Into<String>,
    advertiser_id: i32,
    category_id: i32,
    zone_id: i32,
  ) -> Self {
    Self {
      title: title.into(),
      url: url.into(),
      advertiser_id,
      category_id,
      zone_id,
      enabled: false,
      start_showing: None,
      stop_showing: None,
    }
  }

  pub fn enabled(mut self, enabled: bool) -> Self {
    self.enabled = enabled;
    self
  }

  pub fn showing(
    mut self,
    start: Option<DateTime>,
    stop: Option<DateTime>,
  ) -> Self {
    self.start_showing = start;
    self.stop_showing = stop;
    self
  }
}

impl ad::Model {
  /// Click-through path that records a click and redirects to `url`.
  pub fn absolute_url(&self) -> String {
    format!("/ads/{}", self.id)
  }
}

fn check_schedule(start: DateTime, stop: Option<DateTime>) -> Result<()> {
  match stop {
    Some(stop) if stop <= start => Err(Error::InvalidArgs(
      "Ad must stop showing after it starts".into(),
    )),
    _ => Ok(()),
  }
}

async fn load_creative<C: ConnectionTrait>(
  db: &C,
  ad: &ad::Model,
) -> Result<Creative> {
  let creative = match ad.kind {
    AdKind::Text => text_ad::Entity::find_by_id(ad.id)
      .one(db)
      .await?
      .map(|row| Creative::Text(row.content)),
    AdKind::Banner => banner_ad::Entity::find_by_id(ad.id)
      .one(db)
      .await?
      .map(|row| Creative::Banner(row.content)),
  };

  creative.ok_or_else(|| {
    Error::Internal(format!("ad #{} has no {:?} creative", ad.id, ad.kind))
  })
}

pub struct Ad<'a> {
  db: &'a DatabaseConnection,
  urls: &'a UrlVerifier,
}

impl<'a> Ad<'a> {
  pub fn new(db: &'a DatabaseConnection, urls: &'a UrlVerifier) -> Self {
    Self { db, urls }
  }

  /// Inserts the base row and its creative in one transaction.
  pub async fn create(
    &self,
    new: NewAd,
    creative: Creative,
  ) -> Result<AdWithCreative> {
    let title = utils::required("title", &new.title, MAX_TITLE)?;
    let creative = creative.validated()?;
    let url = self.urls.check(&new.url).await?;

    let now = now();
    let start_showing = new.start_showing.unwrap_or(now);
    check_schedule(start_showing, new.stop_showing)?;

    let txn = self.db.begin().await?;

    advertiser::Entity::find_by_id(new.advertiser_id)
      .one(&txn)
      .await?
      .ok_or(Error::AdvertiserNotFound)?;
    ad_category::Entity::find_by_id(new.category_id)
      .one(&txn)
      .await?
      .ok_or(Error::CategoryNotFound)?;
    ad_zone::Entity::find_by_id(new.zone_id)
      .one(&txn)
      .await?
      .ok_or(Error::ZoneNotFound)?;

    let ad = ad::ActiveModel {
      title: Set(title),
      url: Set(url.to_string()),
      kind: Set(creative.kind()),
      enabled: Set(new.enabled),
      since: Set(now),
      updated: Set(now),
      start_showing: Set(start_showing),
      stop_showing: Set(new.stop_showing),
      advertiser_id: Set(new.advertiser_id),
      category_id: Set(new.category_id),
      zone_id: Set(new.zone_id),
      ..Default::default()
    }
    .insert(&txn)
    .await?;

    match &creative {
      Creative::Text(body) => {
        text_ad::ActiveModel { ad_id: Set(ad.id), content: Set(body.clone()) }
          .insert(&txn)
          .await?;
      }
      Creative::Banner(path) => {
        banner_ad::ActiveModel {
          ad_id: Set(ad.id),
          content: Set(path.clone()),
        }
        .insert(&txn)
        .await?;
      }
    }

    txn.commit().await?;

    info!(
      "{:?} ad #{} `{}` created in zone #{}",
      ad.kind, ad.id, ad.title, ad.zone_id
    );
    Ok(AdWithCreative { ad, creative })
  }

  pub async fn create_text(
    &self,
    new: NewAd,
    content: &str,
  ) -> Result<AdWithCreative> {
    self.create(new, Creative::Text(content.to_string())).await
  }

  pub async fn create_banner(
    &self,
    new: NewAd,
    image: &str,
  ) -> Result<AdWithCreative> {
    self.create(new, Creative::Banner(image.to_string())).await
  }

  pub async fn by_id(&self, id: i32) -> Result<Option<AdWithCreative>> {
    let Some(ad) = ad::Entity::find_by_id(id).one(self.db).await? else {
      return Ok(None);
    };

    let creative = load_creative(self.db, &ad).await?;
    Ok(Some(AdWithCreative { ad, creative }))
  }

  /// The `ads` row alone, without touching the creative tables.
  pub async fn base(&self, id: i32) -> Result<ad::Model> {
    ad::Entity::find_by_id(id).one(self.db).await?.ok_or(Error::AdNotFound)
  }

  pub async fn by_zone(&self, zone_id: i32) -> Result<Vec<ad::Model>> {
    let ads = ad::Entity::find()
      .filter(ad::Column::ZoneId.eq(zone_id))
      .order_by_desc(ad::Column::Since)
      .all(self.db)
      .await?;
    Ok(ads)
  }

  pub async fn by_advertiser(
    &self,
    advertiser_id: i32,
  ) -> Result<Vec<ad::Model>> {
    let ads = ad::Entity::find()
      .filter(ad::Column::AdvertiserId.eq(advertiser_id))
      .order_by_desc(ad::Column::Since)
      .all(self.db)
      .await?;
    Ok(ads)
  }

  pub async fn set_enabled(&self, id: i32, enabled: bool) -> Result<ad::Model> {
    let ad = self.base(id).await?;

    let ad = ad::ActiveModel { enabled: Set(enabled), ..ad.into() }
      .update(self.db)
      .await?;

    info!("Ad #{id} {}", if enabled { "enabled" } else { "disabled" });
    Ok(ad)
  }

  pub async fn set_schedule(
    &self,
    id: i32,
    start: DateTime,
    stop: Option<DateTime>,
  ) -> Result<ad::Model> {
    check_schedule(start, stop)?;
    let ad = self.base(id).await?;

    Ok(
      ad::ActiveModel {
        start_showing: Set(start),
        stop_showing: Set(stop),
        ..ad.into()
      }
      .update(self.db)
      .await?,
    )
  }

  pub async fn update(
    &self,
    id: i32,
    title: Option<&str>,
    url: Option<&str>,
  ) -> Result<ad::Model> {
    let ad = self.base(id).await?;

    let mut active: ad::ActiveModel = ad.into();
    if let Some(title) = title {
      active.title = Set(utils::required("title", title, MAX_TITLE)?);
    }
    if let Some(url) = url {
      active.url = Set(self.urls.check(url).await?.to_string());
    }

    Ok(active.update(self.db).await?)
  }

  /// Replaces the creative content; the ad keeps its kind.
  pub async fn set_creative(
    &self,
    id: i32,
    creative: Creative,
  ) -> Result<AdWithCreative> {
    let ad = self.base(id).await?;
    if ad.kind != creative.kind() {
      return Err(Error::InvalidArgs(format!(
        "Ad #{id} is a {:?} ad",
        ad.kind
      )));
    }
    let creative = creative.validated()?;

    let txn = self.db.begin().await?;
    match &creative {
      Creative::Text(body) => {
        text_ad::ActiveModel { ad_id: Set(id), content: Set(body.clone()) }
          .update(&txn)
          .await?;
      }
      Creative::Banner(path) => {
        banner_ad::ActiveModel { ad_id: Set(id), content: Set(path.clone()) }
          .update(&txn)
          .await?;
      }
    }
    // bump `updated` on the base row
    let ad = ad::ActiveModel::from(ad).update(&txn).await?;
    txn.commit().await?;

    Ok(AdWithCreative { ad, creative })
  }

  /// Deletes the ad with its creative, impressions and clicks.
  pub async fn delete(&self, id: i32) -> Result<()> {
    let result = ad::Entity::delete_by_id(id).exec(self.db).await?;
    if result.rows_affected == 0 {
      return Err(Error::AdNotFound);
    }

    info!("Ad #{id} deleted");
    Ok(())
  }

  /// Picks a random live ad for the zone, optionally within a category.
  ///
  /// Unknown zone or category slugs are errors; a zone with nothing to
  /// show yields `None`.
  pub async fn random_ad(
    &self,
    zone: &str,
    category: Option<&str>,
  ) -> Result<Option<AdWithCreative>> {
    let zone_ids: Vec<i32> = ad_zone::Entity::find()
      .select_only()
      .column(ad_zone::Column::Id)
      .filter(ad_zone::Column::Slug.eq(zone))
      .into_tuple()
      .all(self.db)
      .await?;

    if zone_ids.is_empty() {
      return Err(Error::ZoneNotFound);
    }

    let category_id = match category {
      Some(slug) => Some(
        ad_category::Entity::find()
          .filter(ad_category::Column::Slug.eq(slug))
          .one(self.db)
          .await?
          .ok_or(Error::CategoryNotFound)?
          .id,
      ),
      None => None,
    };

    let now = now();
    let mut query = ad::Entity::find()
      .select_only()
      .column(ad::Column::Id)
      .filter(ad::Column::Enabled.eq(true))
      .filter(ad::Column::ZoneId.is_in(zone_ids))
      .filter(ad::Column::StartShowing.lte(now))
      .filter(
        Condition::any()
          .add(ad::Column::StopShowing.is_null())
          .add(ad::Column::StopShowing.gt(now)),
      );

    if let Some(category_id) = category_id {
      query = query.filter(ad::Column::CategoryId.eq(category_id));
    }

    let eligible: Vec<i32> = query.into_tuple().all(self.db).await?;

    let picked = {
      let mut rng = rand::rng();
      eligible.choose(&mut rng).copied()
    };

    let Some(id) = picked else {
      debug!("No live ads for zone `{zone}` (category {category:?})");
      return Ok(None);
    };

    debug!("Zone `{zone}` picked ad #{id} of {}", eligible.len());
    self.by_id(id).await
  }
}
