//! SeaORM-backed vehicle catalog

use std::collections::BTreeSet;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::db_err;
use crate::domain::vehicle::{CatalogProvider, Vehicle};
use crate::infrastructure::database::entities::vehicle;
use crate::shared::errors::StoreError;

pub struct SeaOrmCatalog {
    db: DatabaseConnection,
}

impl SeaOrmCatalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert or replace a catalog entry. Used by operator tooling; the
    /// booking engine itself never writes to the catalog.
    pub async fn upsert(&self, v: &Vehicle) -> Result<(), StoreError> {
        let locations = serde_json::to_string(&v.pickup_locations)
            .map_err(|e| StoreError::Rejected(format!("pickup_locations: {e}")))?;
        let now = Utc::now();

        let existing = vehicle::Entity::find_by_id(v.id.clone())
            .one(&self.db)
            .await
            .map_err(db_err)?;

        match existing {
            Some(existing) => {
                let mut active: vehicle::ActiveModel = existing.into();
                active.name = Set(v.name.clone());
                active.daily_rate = Set(v.daily_rate.to_string());
                active.pickup_locations = Set(locations);
                active.updated_at = Set(now);
                active.update(&self.db).await.map_err(db_err)?;
                info!("Vehicle updated: {}", v.id);
            }
            None => {
                let model = vehicle::ActiveModel {
                    id: Set(v.id.clone()),
                    name: Set(v.name.clone()),
                    daily_rate: Set(v.daily_rate.to_string()),
                    pickup_locations: Set(locations),
                    created_at: Set(now),
                    updated_at: Set(now),
                };
                model.insert(&self.db).await.map_err(db_err)?;
                info!("Vehicle added: {}", v.id);
            }
        }
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<Vehicle>, StoreError> {
        let models = vehicle::Entity::find()
            .order_by_asc(vehicle::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}

fn model_to_domain(m: vehicle::Model) -> Result<Vehicle, StoreError> {
    let daily_rate = Decimal::from_str(&m.daily_rate).map_err(|e| StoreError::Corrupt {
        id: m.id.clone(),
        reason: format!("daily_rate: {e}"),
    })?;
    let pickup_locations: BTreeSet<String> =
        serde_json::from_str(&m.pickup_locations).map_err(|e| StoreError::Corrupt {
            id: m.id.clone(),
            reason: format!("pickup_locations: {e}"),
        })?;

    Ok(Vehicle {
        id: m.id,
        name: m.name,
        daily_rate,
        pickup_locations,
    })
}

#[async_trait]
impl CatalogProvider for SeaOrmCatalog {
    async fn resolve(&self, vehicle_id: &str) -> Result<Option<Vehicle>, StoreError> {
        vehicle::Entity::find_by_id(vehicle_id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?
            .map(model_to_domain)
            .transpose()
    }
}
