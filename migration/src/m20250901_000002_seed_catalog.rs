use chrono::Utc;
use sea_orm_migration::prelude::*;
use uuid::Uuid;

#[derive(DeriveIden)]
enum PricingTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Role,
    CreatedAt,
}

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Seeds the three stock rental tiers and the bootstrap accounts.
/// Identity is issued externally; these rows only give tokens a user
/// record to resolve against.
#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for tier in ["Daily", "Weekly", "Monthly"] {
            let insert = Query::insert()
                .into_table(PricingTypes::Table)
                .columns([PricingTypes::Id, PricingTypes::Name])
                .values_panic([Uuid::new_v4().into(), tier.into()])
                .to_owned();
            manager.exec_stmt(insert).await?;
        }

        let now = Utc::now();
        let admin = Query::insert()
            .into_table(Users::Table)
            .columns([
                Users::Id,
                Users::Name,
                Users::Email,
                Users::Role,
                Users::CreatedAt,
            ])
            .values_panic([
                Uuid::new_v4().into(),
                "Site Admin".into(),
                "admin@torent.dev".into(),
                "admin".into(),
                now.into(),
            ])
            .to_owned();
        manager.exec_stmt(admin).await?;

        let customer = Query::insert()
            .into_table(Users::Table)
            .columns([
                Users::Id,
                Users::Name,
                Users::Email,
                Users::Role,
                Users::CreatedAt,
            ])
            .values_panic([
                Uuid::new_v4().into(),
                "Demo Customer".into(),
                "customer@torent.dev".into(),
                "customer".into(),
                now.into(),
            ])
            .to_owned();
        manager.exec_stmt(customer).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete_users = Query::delete()
            .from_table(Users::Table)
            .and_where(
                Expr::col(Users::Email)
                    .is_in(["admin@torent.dev", "customer@torent.dev"]),
            )
            .to_owned();
        manager.exec_stmt(delete_users).await?;

        let delete_tiers = Query::delete()
            .from_table(PricingTypes::Table)
            .and_where(Expr::col(PricingTypes::Name).is_in(["Daily", "Weekly", "Monthly"]))
            .to_owned();
        manager.exec_stmt(delete_tiers).await?;

        Ok(())
    }
}
