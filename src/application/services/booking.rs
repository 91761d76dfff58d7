//! Booking service: quotes, reservation creation and the customer's
//! booking list

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, Local};
use tracing::{info, warn};

use crate::domain::{
    AddOnSelection, CatalogProvider, DateRangeInput, DateRangeValidator, NewReservation,
    Principal, Quote, RateCalculator, Reservation, ReservationQuery, ReservationStatus,
    ReservationStore, SortDirection, Vehicle,
};
use crate::shared::errors::BookingError;

/// Customer-local time used for the "not in the past" check. The offset
/// decides which calendar day counts as today.
pub type Clock = Arc<dyn Fn() -> DateTime<FixedOffset> + Send + Sync>;

/// System clock in the host's local time zone
pub fn local_clock() -> Clock {
    Arc::new(|| {
        let now = Local::now();
        now.with_timezone(now.offset())
    })
}

/// What the customer asks for. Add-ons and pickup location are both
/// optional and independent of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingRequest {
    pub range: DateRangeInput,
    pub add_ons: AddOnSelection,
    pub pickup_location: Option<String>,
}

impl BookingRequest {
    pub fn new(range: DateRangeInput) -> Self {
        Self {
            range,
            ..Self::default()
        }
    }

    pub fn with_add_ons(mut self, add_ons: AddOnSelection) -> Self {
        self.add_ons = add_ons;
        self
    }

    pub fn with_pickup_location(mut self, location: impl Into<String>) -> Self {
        self.pickup_location = Some(location.into());
        self
    }
}

/// Dashboard tabs over a customer's bookings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BookingView {
    #[default]
    All,
    /// Pending or confirmed
    Active,
    Completed,
    Cancelled,
}

impl BookingView {
    pub fn statuses(&self) -> &'static [ReservationStatus] {
        match self {
            Self::All => &[],
            Self::Active => &[ReservationStatus::Pending, ReservationStatus::Confirmed],
            Self::Completed => &[ReservationStatus::Completed],
            Self::Cancelled => &[ReservationStatus::Cancelled],
        }
    }
}

/// Creates reservations. Any authenticated principal may book; there is no
/// role check and no availability locking between customers.
pub struct BookingService {
    store: Arc<dyn ReservationStore>,
    catalog: Arc<dyn CatalogProvider>,
    clock: Clock,
}

impl BookingService {
    pub fn new(store: Arc<dyn ReservationStore>, catalog: Arc<dyn CatalogProvider>) -> Self {
        Self {
            store,
            catalog,
            clock: local_clock(),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Validate and price a request without persisting anything
    pub fn quote(&self, vehicle: &Vehicle, request: &BookingRequest) -> Result<Quote, BookingError> {
        check_vehicle(vehicle, request)?;
        let range = DateRangeValidator::validate(&request.range, (self.clock)())?;
        Ok(RateCalculator::compute(&range, vehicle.daily_rate, &request.add_ons))
    }

    /// Place a reservation for an already resolved vehicle.
    ///
    /// Issues exactly one store `create` on success and none on failure.
    pub async fn create(
        &self,
        principal: Option<&Principal>,
        vehicle: &Vehicle,
        request: &BookingRequest,
    ) -> Result<Reservation, BookingError> {
        let principal = principal.ok_or(BookingError::Unauthenticated)?;
        check_vehicle(vehicle, request)?;

        let range = DateRangeValidator::validate(&request.range, (self.clock)())?;
        let quote = RateCalculator::compute(&range, vehicle.daily_rate, &request.add_ons);

        let new = NewReservation {
            vehicle_id: vehicle.id.clone(),
            vehicle_name: vehicle.name.clone(),
            principal_id: principal.id.clone(),
            principal_contact: principal.contact.clone(),
            range,
            duration_days: quote.duration_days,
            daily_rate: vehicle.daily_rate,
            add_ons: request.add_ons,
            total_price: quote.total_price,
            pickup_location: request.pickup_location.clone(),
            status: ReservationStatus::Pending,
        };

        let reservation = self.store.create(new).await.map_err(|e| {
            warn!(vehicle_id = %vehicle.id, principal_id = %principal.id, error = %e, "Booking could not be saved");
            BookingError::PersistenceFailure(e)
        })?;

        info!(
            reservation_id = %reservation.id,
            vehicle_id = %reservation.vehicle_id,
            principal_id = %reservation.principal_id,
            duration_days = reservation.duration_days,
            total_price = %reservation.total_price,
            "Reservation created"
        );

        Ok(reservation)
    }

    /// Resolve the vehicle through the catalog, then `create`
    pub async fn book(
        &self,
        principal: Option<&Principal>,
        vehicle_id: &str,
        request: &BookingRequest,
    ) -> Result<Reservation, BookingError> {
        if principal.is_none() {
            return Err(BookingError::Unauthenticated);
        }

        let vehicle = self
            .catalog
            .resolve(vehicle_id)
            .await?
            .ok_or_else(|| BookingError::VehicleNotFound(vehicle_id.to_string()))?;

        self.create(principal, &vehicle, request).await
    }

    /// The principal's own bookings, newest first
    pub async fn list_for(
        &self,
        principal: Option<&Principal>,
        view: BookingView,
    ) -> Result<Vec<Reservation>, BookingError> {
        let principal = principal.ok_or(BookingError::Unauthenticated)?;

        let query = ReservationQuery::for_principal(&principal.id)
            .with_statuses(view.statuses())
            .order(SortDirection::Descending);

        Ok(self.store.query(&query).await?)
    }
}

fn check_vehicle(vehicle: &Vehicle, request: &BookingRequest) -> Result<(), BookingError> {
    if vehicle.daily_rate.is_sign_negative() {
        return Err(BookingError::InvalidRate {
            vehicle_id: vehicle.id.clone(),
        });
    }

    if let Some(location) = request.pickup_location.as_deref() {
        if !vehicle.serves(location) {
            return Err(BookingError::InvalidLocation {
                vehicle_id: vehicle.id.clone(),
                location: location.to_string(),
            });
        }
    }

    Ok(())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{fixed_clock, offset_clock, today, FailingStore};
    use crate::domain::AddOn;
    use crate::infrastructure::storage::{InMemoryCatalog, InMemoryReservationStore};
    use crate::shared::errors::ValidationError;
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn swift() -> Vehicle {
        Vehicle::new("car1", "Swift Dzire", Decimal::from(1800))
            .with_pickup_locations(["Mumbai", "Delhi", "Bangalore"])
    }

    fn alice() -> Principal {
        Principal::new("user-a", "alice@example.com")
    }

    fn service(store: Arc<InMemoryReservationStore>) -> BookingService {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.insert(swift());
        BookingService::new(store, catalog).with_clock(fixed_clock())
    }

    fn three_days() -> BookingRequest {
        BookingRequest::new(DateRangeInput::between(
            today() + Duration::days(2),
            today() + Duration::days(5),
        ))
    }

    #[tokio::test]
    async fn creates_pending_reservation() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());

        let r = svc.create(Some(&alice()), &swift(), &three_days()).await.unwrap();

        assert_eq!(r.status, ReservationStatus::Pending);
        assert_eq!(r.duration_days, 3);
        assert_eq!(r.total_price, Decimal::from(5400));
        assert_eq!(r.vehicle_name, "Swift Dzire");
        assert_eq!(r.principal_id, "user-a");
        assert_eq!(r.principal_contact, "alice@example.com");
        assert!(!r.id.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn add_ons_are_priced() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store);
        let request = three_days()
            .with_add_ons(AddOnSelection::none().with(AddOn::Insurance).with(AddOn::Gps));

        let r = svc.create(Some(&alice()), &swift(), &request).await.unwrap();
        assert_eq!(r.total_price, Decimal::from(5466));
        assert!(r.add_ons.insurance && r.add_ons.gps);
    }

    #[tokio::test]
    async fn unauthenticated_writes_nothing() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());

        let err = svc.create(None, &swift(), &three_days()).await.unwrap_err();
        assert!(matches!(err, BookingError::Unauthenticated));
        assert!(store.is_empty());

        let err = svc.book(None, "car1", &three_days()).await.unwrap_err();
        assert!(matches!(err, BookingError::Unauthenticated));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn missing_dates_are_reported() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());
        let request = BookingRequest::new(DateRangeInput::new(Some(today()), None));

        let err = svc.create(Some(&alice()), &swift(), &request).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidRange(ValidationError::MissingDates)
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn past_start_is_rejected() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());
        let request = BookingRequest::new(DateRangeInput::between(
            today() - Duration::days(1),
            today() + Duration::days(2),
        ));

        let err = svc.create(Some(&alice()), &swift(), &request).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidRange(ValidationError::PastDate { .. })
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn past_check_uses_the_clock_offset() {
        let store = Arc::new(InMemoryReservationStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        // 09:15 UTC is already past midnight at +15:00
        let ahead = chrono::FixedOffset::east_opt(15 * 3600).unwrap();
        let svc = BookingService::new(store.clone(), catalog).with_clock(offset_clock(ahead));
        let request = BookingRequest::new(DateRangeInput::between(
            today(),
            today() + Duration::days(2),
        ));

        let err = svc.create(Some(&alice()), &swift(), &request).await.unwrap_err();
        assert!(matches!(
            err,
            BookingError::InvalidRange(ValidationError::PastDate { today: local, .. })
                if local == today() + Duration::days(1)
        ));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn same_day_rental_is_one_day() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store);
        let request = BookingRequest::new(DateRangeInput::between(today(), today()));

        let r = svc.create(Some(&alice()), &swift(), &request).await.unwrap();
        assert_eq!(r.duration_days, 1);
        assert_eq!(r.total_price, Decimal::from(1800));
    }

    #[tokio::test]
    async fn snapshot_survives_catalog_change() {
        let store = Arc::new(InMemoryReservationStore::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.insert(swift());
        let svc = BookingService::new(store.clone(), catalog.clone()).with_clock(fixed_clock());

        let r = svc.book(Some(&alice()), "car1", &three_days()).await.unwrap();

        let mut repriced = swift();
        repriced.name = "Swift Dzire 2026".into();
        repriced.daily_rate = Decimal::from(2400);
        catalog.insert(repriced);

        let stored = store.find_by_id(&r.id).await.unwrap().unwrap();
        assert_eq!(stored.daily_rate, Decimal::from(1800));
        assert_eq!(stored.vehicle_name, "Swift Dzire");
        assert_eq!(stored.total_price, Decimal::from(5400));
    }

    #[tokio::test]
    async fn unknown_vehicle() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());

        let err = svc.book(Some(&alice()), "car99", &three_days()).await.unwrap_err();
        assert!(matches!(err, BookingError::VehicleNotFound(id) if id == "car99"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn pickup_location_must_be_served() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());

        let ok = svc
            .create(Some(&alice()), &swift(), &three_days().with_pickup_location("Delhi"))
            .await
            .unwrap();
        assert_eq!(ok.pickup_location.as_deref(), Some("Delhi"));

        let err = svc
            .create(Some(&alice()), &swift(), &three_days().with_pickup_location("Chennai"))
            .await
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidLocation { .. }));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn negative_rate_is_rejected() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());
        let broken = Vehicle::new("car7", "Broken", Decimal::from(-1));

        let err = svc.create(Some(&alice()), &broken, &three_days()).await.unwrap_err();
        assert!(matches!(err, BookingError::InvalidRate { .. }));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn store_failure_is_persistence_failure() {
        let catalog = Arc::new(InMemoryCatalog::new());
        let svc = BookingService::new(Arc::new(FailingStore), catalog).with_clock(fixed_clock());

        let err = svc.create(Some(&alice()), &swift(), &three_days()).await.unwrap_err();
        match err {
            BookingError::PersistenceFailure(e) => assert!(e.is_transient()),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn stored_record_recomputes_to_same_price() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());
        let request = three_days().with_add_ons(AddOn::ALL.into_iter().collect());

        let r = svc.create(Some(&alice()), &swift(), &request).await.unwrap();
        let stored = store.find_by_id(&r.id).await.unwrap().unwrap();

        let recomputed = RateCalculator::compute(&stored.range, stored.daily_rate, &stored.add_ons);
        assert_eq!(recomputed.duration_days, stored.duration_days);
        assert_eq!(recomputed.total_price, stored.total_price);
        assert!(stored.pricing_is_consistent());
    }

    #[tokio::test]
    async fn quote_does_not_persist() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());

        let q = svc
            .quote(&swift(), &three_days().with_add_ons(AddOnSelection::none().with(AddOn::ChildSeat)))
            .unwrap();
        assert_eq!(q.total_price, Decimal::from(5415));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn list_is_scoped_and_filtered() {
        let store = Arc::new(InMemoryReservationStore::new());
        let svc = service(store.clone());
        let bob = Principal::new("user-b", "bob@example.com");

        let first = svc.create(Some(&alice()), &swift(), &three_days()).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        let second = svc.create(Some(&alice()), &swift(), &three_days()).await.unwrap();
        svc.create(Some(&bob), &swift(), &three_days()).await.unwrap();
        store
            .update(&first.id, crate::domain::ReservationPatch::status(ReservationStatus::Cancelled))
            .await
            .unwrap();

        let all = svc.list_for(Some(&alice()), BookingView::All).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);

        let active = svc.list_for(Some(&alice()), BookingView::Active).await.unwrap();
        assert_eq!(active.iter().map(|r| r.id.as_str()).collect::<Vec<_>>(), vec![second.id.as_str()]);

        let cancelled = svc.list_for(Some(&alice()), BookingView::Cancelled).await.unwrap();
        assert_eq!(cancelled.len(), 1);
        assert_eq!(cancelled[0].id, first.id);

        assert!(svc.list_for(Some(&alice()), BookingView::Completed).await.unwrap().is_empty());
        assert!(matches!(
            svc.list_for(None, BookingView::All).await,
            Err(BookingError::Unauthenticated)
        ));
    }
}
