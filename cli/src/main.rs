//! DriveEasy operator CLI
//!
//! Drives the booking engine against the configured database. Operators use
//! it to seed the catalog and to confirm or complete reservations; the
//! customer-side commands act as the principal given by `--principal`.
//!
//! ```sh
//! driveeasy seed-vehicle --id car1 --name "Swift Dzire" --rate 1800 -l Mumbai -l Delhi
//! driveeasy quote --vehicle car1 --from 2026-11-02 --to 2026-11-05 -a insurance -a gps
//! driveeasy --principal user-a --contact a@example.com book --vehicle car1 --from 2026-11-02 --to 2026-11-05
//! driveeasy --principal user-a list --view active
//! driveeasy confirm <reservation-id>
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use tracing::{error, info};

use driveeasy_booking::config::{default_config_path, init_tracing, AppConfig};
use driveeasy_booking::domain::pricing::{format_amount, PriceComponent};
use driveeasy_booking::domain::{
    AddOn, AddOnSelection, CatalogProvider, DateRangeInput, IdentityProvider, Principal, Quote,
    Reservation, StaticIdentity, Vehicle,
};
use driveeasy_booking::{
    init_and_migrate, BookingError, BookingRequest, BookingService, BookingView,
    ReservationLifecycle, SeaOrmCatalog, SeaOrmReservationStore,
};

/// DriveEasy booking engine: reservations and pricing for car rentals.
#[derive(Parser, Debug)]
#[command(name = "driveeasy", version, about)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "DRIVEEASY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,

    /// Act as this principal for customer commands.
    #[arg(long, env = "DRIVEEASY_PRINCIPAL")]
    principal: Option<String>,

    /// Contact stored on new bookings (defaults to the principal id).
    #[arg(long, env = "DRIVEEASY_CONTACT")]
    contact: Option<String>,

    /// Print results as JSON.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the configuration and exit.
    Check,
    /// Add or replace a vehicle in the catalog.
    SeedVehicle {
        #[arg(long)]
        id: String,
        #[arg(long)]
        name: String,
        /// Daily rate in the smallest currency unit.
        #[arg(long)]
        rate: Decimal,
        /// Pickup location (repeatable).
        #[arg(short, long = "location")]
        locations: Vec<String>,
    },
    /// List catalog vehicles.
    Vehicles,
    /// Price a rental without booking it.
    Quote(RentalArgs),
    /// Book a vehicle as the current principal.
    Book(RentalArgs),
    /// List the current principal's bookings, newest first.
    List {
        #[arg(long, value_enum, default_value_t = ViewArg::All)]
        view: ViewArg,
    },
    /// Cancel one of the current principal's bookings.
    Cancel { id: String },
    /// Confirm a pending booking (operator).
    Confirm { id: String },
    /// Complete a booking when the vehicle is returned (operator).
    Complete { id: String },
}

#[derive(clap::Args, Debug)]
struct RentalArgs {
    #[arg(long)]
    vehicle: String,
    /// Pickup date (YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Return date (YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
    /// Add-on service: insurance, extra-driver, child-seat, gps (repeatable).
    #[arg(short, long = "add-on", value_parser = parse_add_on)]
    add_ons: Vec<AddOn>,
    /// Pickup location; must be served by the vehicle.
    #[arg(short, long)]
    location: Option<String>,
}

impl RentalArgs {
    fn request(&self) -> BookingRequest {
        let request = BookingRequest::new(DateRangeInput::new(self.from, self.to))
            .with_add_ons(self.add_ons.iter().copied().collect::<AddOnSelection>());
        match &self.location {
            Some(location) => request.with_pickup_location(location),
            None => request,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ViewArg {
    All,
    Active,
    Completed,
    Cancelled,
}

impl From<ViewArg> for BookingView {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::All => BookingView::All,
            ViewArg::Active => BookingView::Active,
            ViewArg::Completed => BookingView::Completed,
            ViewArg::Cancelled => BookingView::Cancelled,
        }
    }
}

fn parse_add_on(s: &str) -> Result<AddOn, String> {
    AddOn::from_str(s).ok_or_else(|| {
        format!("unknown add-on '{s}' (expected insurance, extra-driver, child-seat or gps)")
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config.logging);
    info!("Configuration: {}", config_path.display());

    if let Command::Check = cli.command {
        println!("Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Database    : {}", config.database.url);
        println!("   Log level   : {}", config.logging.level);
        println!("   Currency    : {}", config.pricing.currency);
        return Ok(());
    }

    // ── Wire the engine ────────────────────────────────────────
    let db = init_and_migrate(&config.database).await?;
    let store = Arc::new(SeaOrmReservationStore::new(db.clone()));
    let catalog = Arc::new(SeaOrmCatalog::new(db.clone()));
    let booking = BookingService::new(store.clone(), catalog.clone());
    let lifecycle = ReservationLifecycle::new(store);

    let identity = match cli.principal.clone() {
        Some(id) => {
            let contact = cli.contact.clone().unwrap_or_else(|| id.clone());
            StaticIdentity::signed_in(Principal::new(id, contact))
        }
        None => StaticIdentity::anonymous(),
    };
    let principal = identity.current_principal();
    let currency = config.pricing.currency.as_str();

    let json = cli.json;
    let command = cli.command;
    let outcome = async move {
        match command {
            Command::Check => {}
            Command::SeedVehicle {
                id,
                name,
                rate,
                locations,
            } => {
                let vehicle = Vehicle::new(id, name, rate).with_pickup_locations(locations);
                catalog.upsert(&vehicle).await?;
                print_vehicle(&vehicle, currency, json)?;
            }
            Command::Vehicles => {
                for vehicle in catalog.list().await? {
                    print_vehicle(&vehicle, currency, json)?;
                }
            }
            Command::Quote(args) => {
                let vehicle = resolve(&catalog, &args.vehicle).await?;
                let quote = booking.quote(&vehicle, &args.request())?;
                print_quote(&quote, currency, json)?;
            }
            Command::Book(args) => {
                let reservation = booking
                    .book(principal.as_ref(), &args.vehicle, &args.request())
                    .await?;
                print_reservation(&reservation, currency, json)?;
            }
            Command::List { view } => {
                for reservation in booking.list_for(principal.as_ref(), view.into()).await? {
                    print_reservation(&reservation, currency, json)?;
                }
            }
            Command::Cancel { id } => {
                let reservation = lifecycle.cancel(&id, principal.as_ref()).await?;
                print_reservation(&reservation, currency, json)?;
            }
            Command::Confirm { id } => {
                let reservation = lifecycle.confirm(&id).await?;
                print_reservation(&reservation, currency, json)?;
            }
            Command::Complete { id } => {
                let reservation = lifecycle.complete(&id).await?;
                print_reservation(&reservation, currency, json)?;
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    }
    .await;

    if let Err(e) = db.close().await {
        error!("Error closing database connection: {}", e);
    }

    if let Err(e) = outcome {
        error!("{}", e);
        eprintln!("error: {e}");
        std::process::exit(1);
    }
    Ok(())
}

async fn resolve(
    catalog: &SeaOrmCatalog,
    vehicle_id: &str,
) -> Result<Vehicle, Box<dyn std::error::Error>> {
    catalog
        .resolve(vehicle_id)
        .await?
        .ok_or_else(|| BookingError::VehicleNotFound(vehicle_id.to_string()).into())
}

fn print_vehicle(v: &Vehicle, currency: &str, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(v)?);
    } else {
        let locations: Vec<&str> = v.pickup_locations.iter().map(String::as_str).collect();
        println!(
            "{:<10} {:<20} {:>14}/day  {}",
            v.id,
            v.name,
            format_amount(v.daily_rate, currency),
            locations.join(", ")
        );
    }
    Ok(())
}

fn print_quote(q: &Quote, currency: &str, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string_pretty(q)?);
        return Ok(());
    }
    for line in &q.lines {
        let label = match line.component {
            PriceComponent::Rental => "rental",
            PriceComponent::AddOn(a) => a.as_str(),
        };
        println!(
            "{:<12} {} x {} days = {}",
            label,
            format_amount(line.daily_amount, currency),
            line.days,
            format_amount(line.amount, currency)
        );
    }
    println!("Total ({} days): {}", q.duration_days, format_amount(q.total_price, currency));
    Ok(())
}

fn print_reservation(r: &Reservation, currency: &str, json: bool) -> Result<(), serde_json::Error> {
    if json {
        println!("{}", serde_json::to_string(r)?);
    } else {
        println!(
            "{}  {:<9}  {:<20} {} .. {} ({} days)  {}",
            r.id,
            r.status.as_str(),
            r.vehicle_name,
            r.range.start_date,
            r.range.end_date,
            r.duration_days,
            format_amount(r.total_price, currency)
        );
    }
    Ok(())
}
