mod model;
mod output;
mod service;

use chrono::Utc;
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::model::apperror::{ApplicationError, ErrorType};
use crate::model::config::ApplicationArguments;
use crate::output::render::render;
use crate::service::generator::GeneratorService;
use crate::service::report::ReportService;

/**
 * Runs the full pipeline: generate clients, generate their usage events,
 * aggregate the per-day report and print it to standard output.
 */
fn main() -> Result<(), ApplicationError> {
    let args = ApplicationArguments::parse();

    init_tracing()?;

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let generator_service = GeneratorService::new(Utc::now().naive_utc());
    let report_service = ReportService::new();

    let clients = generator_service.generate_clients(args.clients, &mut rng)?;
    info!("Generated {} clients", clients.len());
    let events = generator_service.generate_events(&clients, &mut rng)?;
    info!("Generated {} events", events.len());
    let report = report_service.build_report(&events);
    info!("Report contains {} rows", report.len());

    println!("{}", render(&report, args.format)?);
    Ok(())
}

/**
 * Initializes the tracing subscriber. Logs go to stderr so standard output
 * carries only the report.
 *
 * # Returns
 * A `Result` indicating success or failure.
 */
fn init_tracing() -> Result<(), ApplicationError> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|err| ApplicationError::new(ErrorType::Initialization, format!("Failed to initialize tracing subscriber: {err}")))
}
