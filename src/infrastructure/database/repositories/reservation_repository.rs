//! SeaORM implementation of ReservationStore

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use rust_decimal::Decimal;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use uuid::Uuid;

use super::db_err;
use crate::domain::booking::DateRange;
use crate::domain::pricing::AddOnSelection;
use crate::domain::reservation::{
    NewReservation, Reservation, ReservationPatch, ReservationQuery, ReservationStatus,
    ReservationStore, SortDirection,
};
use crate::infrastructure::database::entities::reservation;
use crate::shared::errors::StoreError;

pub struct SeaOrmReservationStore {
    db: DatabaseConnection,
}

impl SeaOrmReservationStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn current_status(&self, id: &str) -> Result<Option<ReservationStatus>, StoreError> {
        let model = reservation::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(|m| status_to_domain(m.status)))
    }
}

fn not_found(id: &str) -> StoreError {
    StoreError::NotFound {
        entity: "Reservation",
        id: id.to_string(),
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_entity(s: ReservationStatus) -> reservation::Status {
    match s {
        ReservationStatus::Pending => reservation::Status::Pending,
        ReservationStatus::Confirmed => reservation::Status::Confirmed,
        ReservationStatus::Completed => reservation::Status::Completed,
        ReservationStatus::Cancelled => reservation::Status::Cancelled,
    }
}

fn status_to_domain(s: reservation::Status) -> ReservationStatus {
    match s {
        reservation::Status::Pending => ReservationStatus::Pending,
        reservation::Status::Confirmed => ReservationStatus::Confirmed,
        reservation::Status::Completed => ReservationStatus::Completed,
        reservation::Status::Cancelled => ReservationStatus::Cancelled,
    }
}

fn parse_amount(id: &str, field: &str, raw: &str) -> Result<Decimal, StoreError> {
    Decimal::from_str(raw).map_err(|e| StoreError::Corrupt {
        id: id.to_string(),
        reason: format!("{field}: {e}"),
    })
}

fn model_to_domain(m: reservation::Model) -> Result<Reservation, StoreError> {
    let daily_rate = parse_amount(&m.id, "daily_rate", &m.daily_rate)?;
    let total_price = parse_amount(&m.id, "total_price", &m.total_price)?;
    let duration_days = u32::try_from(m.duration_days).map_err(|_| StoreError::Corrupt {
        id: m.id.clone(),
        reason: format!("duration_days: {}", m.duration_days),
    })?;

    Ok(Reservation {
        id: m.id,
        vehicle_id: m.vehicle_id,
        vehicle_name: m.vehicle_name,
        principal_id: m.principal_id,
        principal_contact: m.principal_contact,
        range: DateRange::new(m.start_date, m.end_date),
        duration_days,
        daily_rate,
        add_ons: AddOnSelection {
            insurance: m.insurance,
            extra_driver: m.extra_driver,
            child_seat: m.child_seat,
            gps: m.gps,
        },
        total_price,
        status: status_to_domain(m.status),
        created_at: m.created_at,
        pickup_location: m.pickup_location,
    })
}

// ── ReservationStore impl ───────────────────────────────────────

#[async_trait]
impl ReservationStore for SeaOrmReservationStore {
    async fn create(&self, r: NewReservation) -> Result<Reservation, StoreError> {
        let id = Uuid::new_v4().to_string();
        debug!("Saving reservation: {}", id);

        let duration_days = i32::try_from(r.duration_days)
            .map_err(|_| StoreError::Rejected(format!("duration_days out of range: {}", r.duration_days)))?;

        let model = reservation::ActiveModel {
            id: Set(id),
            vehicle_id: Set(r.vehicle_id),
            vehicle_name: Set(r.vehicle_name),
            principal_id: Set(r.principal_id),
            principal_contact: Set(r.principal_contact),
            start_date: Set(r.range.start_date),
            end_date: Set(r.range.end_date),
            duration_days: Set(duration_days),
            daily_rate: Set(r.daily_rate.to_string()),
            total_price: Set(r.total_price.to_string()),
            insurance: Set(r.add_ons.insurance),
            extra_driver: Set(r.add_ons.extra_driver),
            child_seat: Set(r.add_ons.child_seat),
            gps: Set(r.add_ons.gps),
            pickup_location: Set(r.pickup_location),
            status: Set(status_to_entity(r.status)),
            created_at: Set(Utc::now()),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        model_to_domain(inserted)
    }

    async fn update(&self, id: &str, patch: ReservationPatch) -> Result<(), StoreError> {
        debug!("Updating reservation: {}", id);

        let Some(status) = patch.status else {
            // nothing to write; still report unknown ids
            return match self.current_status(id).await? {
                Some(_) => Ok(()),
                None => Err(not_found(id)),
            };
        };

        let mut update = reservation::Entity::update_many()
            .col_expr(reservation::Column::Status, Expr::value(status_to_entity(status)))
            .filter(reservation::Column::Id.eq(id));
        if let Some(expected) = patch.expected_status {
            update = update.filter(reservation::Column::Status.eq(status_to_entity(expected)));
        }

        let result = update.exec(&self.db).await.map_err(db_err)?;
        if result.rows_affected == 1 {
            return Ok(());
        }

        match (self.current_status(id).await?, patch.expected_status) {
            (None, _) => Err(not_found(id)),
            (Some(actual), Some(expected)) => Err(StoreError::StatusConflict {
                id: id.to_string(),
                expected,
                actual,
            }),
            (Some(_), None) => Err(StoreError::Rejected(format!(
                "Update of reservation {} affected {} rows",
                id, result.rows_affected
            ))),
        }
    }

    async fn query(&self, q: &ReservationQuery) -> Result<Vec<Reservation>, StoreError> {
        let mut select = reservation::Entity::find();

        if let Some(id) = &q.id {
            select = select.filter(reservation::Column::Id.eq(id.as_str()));
        }
        if let Some(principal_id) = &q.principal_id {
            select = select.filter(reservation::Column::PrincipalId.eq(principal_id.as_str()));
        }
        if let Some(vehicle_id) = &q.vehicle_id {
            select = select.filter(reservation::Column::VehicleId.eq(vehicle_id.as_str()));
        }
        if !q.statuses.is_empty() {
            select = select.filter(
                reservation::Column::Status.is_in(q.statuses.iter().copied().map(status_to_entity)),
            );
        }

        // id breaks created_at ties, same as the in-memory store
        select = match q.order {
            SortDirection::Ascending => select
                .order_by_asc(reservation::Column::CreatedAt)
                .order_by_asc(reservation::Column::Id),
            SortDirection::Descending => select
                .order_by_desc(reservation::Column::CreatedAt)
                .order_by_desc(reservation::Column::Id),
        };

        if let Some(limit) = q.limit {
            select = select.limit(limit);
        }

        let models = select.all(&self.db).await.map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::model::tests::sample_new;
    use crate::infrastructure::database::test_database;
    use std::time::Duration;

    #[tokio::test]
    async fn create_then_read_back() {
        let store = SeaOrmReservationStore::new(test_database().await);
        let mut new = sample_new();
        new.pickup_location = Some("Mumbai".into());

        let created = store.create(new.clone()).await.unwrap();
        let read = store.find_by_id(&created.id).await.unwrap().unwrap();

        assert_eq!(read, created);
        assert_eq!(read.range, new.range);
        assert_eq!(read.daily_rate, new.daily_rate);
        assert_eq!(read.total_price, new.total_price);
        assert_eq!(read.add_ons, new.add_ons);
        assert_eq!(read.pickup_location.as_deref(), Some("Mumbai"));
        assert_eq!(read.status, ReservationStatus::Pending);
        assert!(read.pricing_is_consistent());
    }

    #[tokio::test]
    async fn update_changes_only_status() {
        let store = SeaOrmReservationStore::new(test_database().await);
        let created = store.create(sample_new()).await.unwrap();

        store
            .update(&created.id, ReservationPatch::status(ReservationStatus::Confirmed))
            .await
            .unwrap();

        let read = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(read.status, ReservationStatus::Confirmed);
        assert_eq!(read.total_price, created.total_price);
        assert_eq!(read.created_at, created.created_at);
    }

    #[tokio::test]
    async fn conditional_update_rejects_moved_record() {
        let store = SeaOrmReservationStore::new(test_database().await);
        let created = store.create(sample_new()).await.unwrap();

        store
            .update(
                &created.id,
                ReservationPatch::transition(ReservationStatus::Pending, ReservationStatus::Completed),
            )
            .await
            .unwrap();

        let err = store
            .update(
                &created.id,
                ReservationPatch::transition(ReservationStatus::Pending, ReservationStatus::Cancelled),
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::StatusConflict {
                expected: ReservationStatus::Pending,
                actual: ReservationStatus::Completed,
                ..
            }
        ));

        let read = store.find_by_id(&created.id).await.unwrap().unwrap();
        assert_eq!(read.status, ReservationStatus::Completed);
    }

    #[tokio::test]
    async fn conditional_update_of_missing_record() {
        let store = SeaOrmReservationStore::new(test_database().await);
        let err = store
            .update(
                "missing",
                ReservationPatch::transition(ReservationStatus::Pending, ReservationStatus::Confirmed),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn created_at_ties_order_by_id() {
        let db = test_database().await;
        let at = Utc::now();
        for id in ["res-b", "res-a", "res-c"] {
            let r = sample_new();
            reservation::ActiveModel {
                id: Set(id.to_string()),
                vehicle_id: Set(r.vehicle_id),
                vehicle_name: Set(r.vehicle_name),
                principal_id: Set(r.principal_id),
                principal_contact: Set(r.principal_contact),
                start_date: Set(r.range.start_date),
                end_date: Set(r.range.end_date),
                duration_days: Set(r.duration_days as i32),
                daily_rate: Set(r.daily_rate.to_string()),
                total_price: Set(r.total_price.to_string()),
                insurance: Set(r.add_ons.insurance),
                extra_driver: Set(r.add_ons.extra_driver),
                child_seat: Set(r.add_ons.child_seat),
                gps: Set(r.add_ons.gps),
                pickup_location: Set(None),
                status: Set(reservation::Status::Pending),
                created_at: Set(at),
            }
            .insert(&db)
            .await
            .unwrap();
        }
        let store = SeaOrmReservationStore::new(db);

        let ids = |rs: Vec<Reservation>| rs.into_iter().map(|r| r.id).collect::<Vec<_>>();
        assert_eq!(
            ids(store.query(&ReservationQuery::default()).await.unwrap()),
            vec!["res-c", "res-b", "res-a"]
        );
        assert_eq!(
            ids(store
                .query(&ReservationQuery::default().order(SortDirection::Ascending))
                .await
                .unwrap()),
            vec!["res-a", "res-b", "res-c"]
        );
    }

    #[tokio::test]
    async fn update_missing_record() {
        let store = SeaOrmReservationStore::new(test_database().await);
        let err = store
            .update("missing", ReservationPatch::status(ReservationStatus::Cancelled))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn query_by_principal_and_status_newest_first() {
        let store = SeaOrmReservationStore::new(test_database().await);

        let first = store.create(sample_new()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = store.create(sample_new()).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let mut other = sample_new();
        other.principal_id = "user-b".into();
        store.create(other).await.unwrap();

        store
            .update(&first.id, ReservationPatch::status(ReservationStatus::Cancelled))
            .await
            .unwrap();

        let mine = store
            .query(&ReservationQuery::for_principal("user-a"))
            .await
            .unwrap();
        assert_eq!(
            mine.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(),
            vec![second.id.as_str(), first.id.as_str()]
        );

        let active = store
            .query(
                &ReservationQuery::for_principal("user-a")
                    .with_statuses(&[ReservationStatus::Pending, ReservationStatus::Confirmed]),
            )
            .await
            .unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);

        let oldest = store
            .query(&ReservationQuery::default().order(SortDirection::Ascending).limit(1))
            .await
            .unwrap();
        assert_eq!(oldest[0].id, first.id);
    }
}
