use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::ad;

/// One rendering of an ad. Rows are append-only.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ad_impressions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub impression_date: DateTime,
  pub source_ip: Option<String>,
  pub ad_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "ad::Entity",
    from = "Column::AdId",
    to = "ad::Column::Id",
    on_delete = "Cascade"
  )]
  Ad,
}

impl Related<ad::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Ad.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
