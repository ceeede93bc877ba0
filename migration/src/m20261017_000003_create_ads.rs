use sea_orm_migration::prelude::*;

use super::m20261017_000002_create_lookups::{
  AdCategories, AdZones, Advertisers,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Ads::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Ads::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Ads::Title).string_len(255).not_null())
          .col(ColumnDef::new(Ads::Url).string().not_null())
          .col(ColumnDef::new(Ads::Kind).string().not_null())
          .col(
            ColumnDef::new(Ads::Enabled).boolean().not_null().default(false),
          )
          .col(ColumnDef::new(Ads::Since).date_time().not_null())
          .col(ColumnDef::new(Ads::Updated).date_time().not_null())
          .col(ColumnDef::new(Ads::StartShowing).date_time().not_null())
          .col(ColumnDef::new(Ads::StopShowing).date_time().null())
          .col(ColumnDef::new(Ads::AdvertiserId).integer().not_null())
          .col(ColumnDef::new(Ads::CategoryId).integer().not_null())
          .col(ColumnDef::new(Ads::ZoneId).integer().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_ads_advertiser")
              .from(Ads::Table, Ads::AdvertiserId)
              .to(Advertisers::Table, Advertisers::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_ads_category")
              .from(Ads::Table, Ads::CategoryId)
              .to(AdCategories::Table, AdCategories::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_ads_zone")
              .from(Ads::Table, Ads::ZoneId)
              .to(AdZones::Table, AdZones::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    for (name, col) in [
      ("idx_ads_advertiser", Ads::AdvertiserId),
      ("idx_ads_category", Ads::CategoryId),
      ("idx_ads_zone", Ads::ZoneId),
    ] {
      manager
        .create_index(
          Index::create().name(name).table(Ads::Table).col(col).to_owned(),
        )
        .await?;
    }

    manager
      .create_table(
        Table::create()
          .table(TextAds::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(TextAds::AdId).integer().not_null().primary_key(),
          )
          .col(ColumnDef::new(TextAds::Content).text().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_text_ads_ad")
              .from(TextAds::Table, TextAds::AdId)
              .to(Ads::Table, Ads::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(BannerAds::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(BannerAds::AdId)
              .integer()
              .not_null()
              .primary_key(),
          )
          .col(ColumnDef::new(BannerAds::Content).string().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_banner_ads_ad")
              .from(BannerAds::Table, BannerAds::AdId)
              .to(Ads::Table, Ads::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(BannerAds::Table).to_owned())
      .await?;

    manager.drop_table(Table::drop().table(TextAds::Table).to_owned()).await?;

    manager.drop_table(Table::drop().table(Ads::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Ads {
  Table,
  Id,
  Title,
  Url,
  Kind,
  Enabled,
  Since,
  Updated,
  StartShowing,
  StopShowing,
  AdvertiserId,
  CategoryId,
  ZoneId,
}

#[derive(DeriveIden)]
pub enum TextAds {
  Table,
  AdId,
  Content,
}

#[derive(DeriveIden)]
pub enum BannerAds {
  Table,
  AdId,
  Content,
}
