//! Create reservations table
//!
//! Vehicle name and rate are snapshots, so there is no foreign key to
//! `vehicles`: the catalog may change or drop a vehicle without touching
//! placed bookings.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::VehicleId).string().not_null())
                    .col(ColumnDef::new(Reservations::VehicleName).string().not_null())
                    .col(ColumnDef::new(Reservations::PrincipalId).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::PrincipalContact)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::StartDate).date().not_null())
                    .col(ColumnDef::new(Reservations::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Reservations::DurationDays)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::DailyRate).string().not_null())
                    .col(ColumnDef::new(Reservations::TotalPrice).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::Insurance)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reservations::ExtraDriver)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reservations::ChildSeat)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reservations::Gps)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Reservations::PickupLocation).string())
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string_len(16)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_principal")
                    .table(Reservations::Table)
                    .col(Reservations::PrincipalId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_status")
                    .table(Reservations::Table)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_created_at")
                    .table(Reservations::Table)
                    .col(Reservations::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    VehicleId,
    VehicleName,
    PrincipalId,
    PrincipalContact,
    StartDate,
    EndDate,
    DurationDays,
    DailyRate,
    TotalPrice,
    Insurance,
    ExtraDriver,
    ChildSeat,
    Gps,
    PickupLocation,
    Status,
    CreatedAt,
}
