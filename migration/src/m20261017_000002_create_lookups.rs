use sea_orm_migration::prelude::*;

use super::m20261017_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Advertisers::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Advertisers::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(Advertisers::CompanyName)
              .string_len(255)
              .not_null(),
          )
          .col(ColumnDef::new(Advertisers::Website).string().not_null())
          .col(
            ColumnDef::new(Advertisers::UserId)
              .integer()
              .not_null()
              .unique_key(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_advertisers_user")
              .from(Advertisers::Table, Advertisers::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_advertisers_company_name")
          .table(Advertisers::Table)
          .col(Advertisers::CompanyName)
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(AdCategories::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(AdCategories::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(AdCategories::Title).string_len(255).not_null())
          .col(
            ColumnDef::new(AdCategories::Slug)
              .string_len(50)
              .not_null()
              .unique_key(),
          )
          .col(
            ColumnDef::new(AdCategories::Description)
              .text()
              .not_null()
              .default(""),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(AdZones::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(AdZones::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(AdZones::Title).string_len(255).not_null())
          .col(ColumnDef::new(AdZones::Slug).string_len(50).not_null())
          .col(
            ColumnDef::new(AdZones::Description)
              .text()
              .not_null()
              .default(""),
          )
          .to_owned(),
      )
      .await?;

    // zone slugs are not unique, but every serve request looks them up
    manager
      .create_index(
        Index::create()
          .name("idx_ad_zones_slug")
          .table(AdZones::Table)
          .col(AdZones::Slug)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(AdZones::Table).to_owned()).await?;

    manager
      .drop_table(Table::drop().table(AdCategories::Table).to_owned())
      .await?;

    manager
      .drop_table(Table::drop().table(Advertisers::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum Advertisers {
  Table,
  Id,
  CompanyName,
  Website,
  UserId,
}

#[derive(DeriveIden)]
pub enum AdCategories {
  Table,
  Id,
  Title,
  Slug,
  Description,
}

#[derive(DeriveIden)]
pub enum AdZones {
  Table,
  Id,
  Title,
  Slug,
  Description,
}
