use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::ad;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ad_categories")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub title: String,
  #[sea_orm(unique)]
  pub slug: String,
  #[sea_orm(column_type = "Text")]
  pub description: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "ad::Entity")]
  Ads,
}

impl Related<ad::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Ads.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
