use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::advertiser;

/// Account that owns an advertiser. Authentication lives elsewhere.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  #[sea_orm(unique)]
  pub username: String,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_one = "advertiser::Entity")]
  Advertiser,
}

impl Related<advertiser::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Advertiser.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
