use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{ad, user};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "advertisers")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i32,
  pub company_name: String,
  pub website: String,
  #[sea_orm(unique)]
  pub user_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "user::Entity",
    from = "Column::UserId",
    to = "user::Column::Id",
    on_delete = "Cascade"
  )]
  User,
  #[sea_orm(has_many = "ad::Entity")]
  Ads,
}

impl Related<user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<ad::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Ads.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
