//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reservation status as stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Status {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub vehicle_id: String,
    pub vehicle_name: String,
    pub principal_id: String,
    pub principal_contact: String,

    pub start_date: Date,
    pub end_date: Date,
    pub duration_days: i32,

    /// Decimal amounts in canonical string form
    pub daily_rate: String,
    pub total_price: String,

    pub insurance: bool,
    pub extra_driver: bool,
    pub child_seat: bool,
    pub gps: bool,

    #[sea_orm(nullable)]
    pub pickup_location: Option<String>,

    pub status: Status,

    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
