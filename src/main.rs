use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use homestay_core::{
    confirm_reservation, format_amount, GuestCount, SelectionCandidate, SummaryView,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use homestay::{api, config::Settings, db};

#[derive(Parser)]
#[command(name = "homestay")]
#[command(about = "Booking service for the Ecopark homestay")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP API server
    Serve {
        /// Port for HTTP API (overrides HOMESTAY_PORT)
        #[arg(short, long)]
        port: Option<u16>,

        /// SQLite database path (overrides HOMESTAY_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Print the summary and total cost for a stay
    Quote {
        /// Check-in date (YYYY-MM-DD)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Check-out date (YYYY-MM-DD)
        #[arg(long)]
        end: Option<NaiveDate>,

        /// Number of guests (1-4)
        #[arg(short, long, default_value = "1")]
        guests: i64,
    },
    /// List free dates between two days, inclusive
    Availability {
        #[arg(long)]
        from: NaiveDate,

        #[arg(long)]
        to: NaiveDate,

        /// SQLite database path (overrides HOMESTAY_DB)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "homestay=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_database(settings: &Settings) -> anyhow::Result<db::Database> {
    let path = settings.database_path()?;
    tracing::debug!("Opening database at {}", path.display());
    let db = db::Database::open(path)?;
    db.migrate()?;
    Ok(db)
}

async fn serve(settings: Settings) -> anyhow::Result<()> {
    tracing::info!("Starting homestay server on port {}", settings.port);

    let db = open_database(&settings)?;
    let state = api::AppState::new(db, &settings);
    let app = api::create_router_with_cors(state, settings.cors_origins.as_deref());

    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", settings.port))
        .await
        .with_context(|| format!("Failed to bind port {}", settings.port))?;
    tracing::info!(
        "Homestay server listening on http://127.0.0.1:{}",
        settings.port
    );

    axum::serve(listener, app).await?;
    Ok(())
}

fn quote(
    settings: &Settings,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    guests: i64,
) -> anyhow::Result<()> {
    let candidate = SelectionCandidate {
        start_date: start,
        end_date: end,
        guests: GuestCount::try_from(guests)?,
    };
    let selection = confirm_reservation(candidate)?;

    match SummaryView::from_handoff(Some(selection), settings.policy.nightly_rate) {
        SummaryView::Details {
            start_date,
            end_date,
            guests,
            nights,
            total_cost,
            ..
        } => {
            println!("Start Date: {}", start_date.format("%a %b %e %Y"));
            println!("End Date: {}", end_date.format("%a %b %e %Y"));
            println!("Number of Guests: {}", guests.get());
            println!("Nights: {}", nights);
            println!("Total cost: {} VND", format_amount(total_cost));
        }
        SummaryView::Invalid { message } => println!("{}", message),
    }
    Ok(())
}

fn availability(settings: &Settings, from: NaiveDate, to: NaiveDate) -> anyhow::Result<()> {
    let db = open_database(settings)?;
    let dates = db.find_available_dates(from, to, &settings.policy)?;

    if dates.is_empty() {
        println!("No free dates between {} and {}", from, to);
    }
    for date in dates {
        println!("{}", date);
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    let mut settings = Settings::from_env();

    match cli.command {
        Some(Commands::Serve { port, db }) => {
            if let Some(port) = port {
                settings.port = port;
            }
            if db.is_some() {
                settings.database_path = db;
            }
            serve(settings).await?;
        }
        Some(Commands::Quote { start, end, guests }) => {
            quote(&settings, start, end, guests)?;
        }
        Some(Commands::Availability { from, to, db }) => {
            if db.is_some() {
                settings.database_path = db;
            }
            availability(&settings, from, to)?;
        }
        None => serve(settings).await?,
    }

    Ok(())
}
