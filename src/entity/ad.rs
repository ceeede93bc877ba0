use sea_orm::{ConnectionTrait, Set, entity::prelude::*};
use serde::{Deserialize, Serialize};

use super::{
  ad_category, ad_zone, advertiser, banner_ad, click, impression, text_ad,
};

/// Which creative table holds the content for an ad.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum AdKind {
  #[sea_orm(string_value = "text")]
  #[default]
  Text,
  #[sea_orm(string_value = "banner")]
  Banner,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ads")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub title: String,
  pub url: String,
  pub kind: AdKind,
  pub enabled: bool,
  pub since: DateTime,
  pub updated: DateTime,
  pub start_showing: DateTime,
  pub stop_showing: Option<DateTime>,
  pub advertiser_id: i32,
  pub category_id: i32,
  pub zone_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "advertiser::Entity",
    from = "Column::AdvertiserId",
    to = "advertiser::Column::Id",
    on_delete = "Cascade"
  )]
  Advertiser,
  #[sea_orm(
    belongs_to = "ad_category::Entity",
    from = "Column::CategoryId",
    to = "ad_category::Column::Id",
    on_delete = "Cascade"
  )]
  Category,
  #[sea_orm(
    belongs_to = "ad_zone::Entity",
    from = "Column::ZoneId",
    to = "ad_zone::Column::Id",
    on_delete = "Cascade"
  )]
  Zone,
  #[sea_orm(has_one = "text_ad::Entity")]
  TextAd,
  #[sea_orm(has_one = "banner_ad::Entity")]
  BannerAd,
  #[sea_orm(has_many = "impression::Entity")]
  Impressions,
  #[sea_orm(has_many = "click::Entity")]
  Clicks,
}

impl Related<advertiser::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Advertiser.def()
  }
}

impl Related<ad_category::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Category.def()
  }
}

impl Related<ad_zone::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Zone.def()
  }
}

impl Related<text_ad::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::TextAd.def()
  }
}

impl Related<banner_ad::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::BannerAd.def()
  }
}

impl Related<impression::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Impressions.def()
  }
}

impl Related<click::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Clicks.def()
  }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
  async fn before_save<C>(
    mut self,
    _db: &C,
    insert: bool,
  ) -> Result<Self, DbErr>
  where
    C: ConnectionTrait,
  {
    let now = crate::prelude::now();
    if insert && self.since.is_not_set() {
      self.since = Set(now);
    }
    if insert && self.start_showing.is_not_set() {
      self.start_showing = self.since.clone();
    }
    self.updated = Set(now);
    Ok(self)
  }
}
