use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::ad;

/// Plain text creative sharing its id with the base `ads` row.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "text_ads")]
pub struct Model {
  #[sea_orm(primary_key, auto_increment = false)]
  pub ad_id: i32,
  #[sea_orm(column_type = "Text")]
  pub content: String,
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
