use sea_orm_migration::prelude::*;

use super::m20261017_000003_create_ads::Ads;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(AdImpressions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(AdImpressions::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(AdImpressions::ImpressionDate)
              .date_time()
              .not_null(),
          )
          .col(ColumnDef::new(AdImpressions::SourceIp).string().null())
          .col(ColumnDef::new(AdImpressions::AdId).integer().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_ad_impressions_ad")
              .from(AdImpressions::Table, AdImpressions::AdId)
              .to(Ads::Table, Ads::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_ad_impressions_ad_date")
          .table(AdImpressions::Table)
          .col(AdImpressions::AdId)
          .col(AdImpressions::ImpressionDate)
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(AdClicks::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(AdClicks::Id)
              .integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(AdClicks::ClickDate).date_time().not_null())
          .col(ColumnDef::new(AdClicks::SourceIp).string().null())
          .col(ColumnDef::new(AdClicks::AdId).integer().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_ad_clicks_ad")
              .from(AdClicks::Table, AdClicks::AdId)
              .to(Ads::Table, Ads::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_ad_clicks_ad_date")
          .table(AdClicks::Table)
          .col(AdClicks::AdId)
          .col(AdClicks::ClickDate)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(AdClicks::Table).to_owned()).await?;

    manager
      .drop_table(Table::drop().table(AdImpressions::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum AdImpressions {
  Table,
  Id,
  ImpressionDate,
  SourceIp,
  AdId,
}

#[derive(DeriveIden)]
pub enum AdClicks {
  Table,
  Id,
  ClickDate,
  SourceIp,
  AdId,
}
