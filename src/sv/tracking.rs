use serde::Serialize;

use crate::{
  entity::{ad, click, impression},
  prelude::*,
  utils,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdStats {
  pub impressions: u64,
  pub clicks: u64,
  pub click_through_rate: f64,
}

impl AdStats {
  fn new(impressions: u64, clicks: u64) -> Self {
    Self {
      impressions,
      clicks,
      click_through_rate: utils::click_through_rate(impressions, clicks),
    }
  }
}

/// Append-only impression and click log.
pub struct Tracking<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Tracking<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  async fn ensure_ad(&self, ad_id: i32) -> Result<()> {
    ad::Entity::find_by_id(ad_id)
      .one(self.db)
      .await?
      .ok_or(Error::AdNotFound)?;
    Ok(())
  }

  pub async fn record_impression(
    &self,
    ad_id: i32,
    source_ip: Option<&str>,
  ) -> Result<impression::Model> {
    let source_ip = utils::source_ip(source_ip)?;
    self.ensure_ad(ad_id).await?;

    let row = impression::ActiveModel {
      impression_date: Set(now()),
      source_ip: Set(source_ip),
      ad_id: Set(ad_id),
      ..Default::default()
    }
    .insert(self.db)
    .await?;

    debug!("Impression #{} for ad #{ad_id}", row.id);
    Ok(row)
  }

  pub async fn record_click(
    &self,
    ad_id: i32,
    source_ip: Option<&str>,
  ) -> Result<click::Model> {
    let source_ip = utils::source_ip(source_ip)?;
    self.ensure_ad(ad_id).await?;

    let row = click::ActiveModel {
      click_date: Set(now()),
      source_ip: Set(source_ip),
      ad_id: Set(ad_id),
      ..Default::default()
    }
    .insert(self.db)
    .await?;

    debug!("Click #{} for ad #{ad_id}", row.id);
    Ok(row)
  }

  pub async fn impressions(
    &self,
    ad_id: i32,
    since: Option<DateTime>,
  ) -> Result<u64> {
    let mut query =
      impression::Entity::find().filter(impression::Column::AdId.eq(ad_id));
    if let Some(since) = since {
      query = query.filter(impression::Column::ImpressionDate.gte(since));
    }
    Ok(query.count(self.db).await?)
  }

  pub async fn clicks(
    &self,
    ad_id: i32,
    since: Option<DateTime>,
  ) -> Result<u64> {
    let mut query = click::Entity::find().filter(click::Column::AdId.eq(ad_id));
    if let Some(since) = since {
      query = query.filter(click::Column::ClickDate.gte(since));
    }
    Ok(query.count(self.db).await?)
  }

  pub async fn summary(&self, ad_id: i32) -> Result<AdStats> {
    self.ensure_ad(ad_id).await?;

    let impressions = self.impressions(ad_id, None).await?;
    let clicks = self.clicks(ad_id, None).await?;
    Ok(AdStats::new(impressions, clicks))
  }

  /// Totals across every ad the advertiser owns.
  pub async fn advertiser_summary(
    &self,
    advertiser_id: i32,
  ) -> Result<AdStats> {
    let impressions = impression::Entity::find()
      .inner_join(ad::Entity)
      .filter(ad::Column::AdvertiserId.eq(advertiser_id))
      .count(self.db)
      .await?;

    let clicks = click::Entity::find()
      .inner_join(ad::Entity)
      .filter(ad::Column::AdvertiserId.eq(advertiser_id))
      .count(self.db)
      .await?;

    Ok(AdStats::new(impressions, clicks))
  }
}
