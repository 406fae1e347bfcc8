//! SpaceRain command-line front end
//!
//! Picks a coordinate through the coordinate selector, submits the draft to
//! the analysis service and prints one card per condition.

use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spacerain_client::external::{AnalysisClient, IpGeolocation, NoGeolocation};
use spacerain_client::selector::HeadlessMapFactory;
use spacerain_client::{
    AnalysisSession, ClientError, Config, CoordinateSelector, RequestOrchestrator, SessionStatus,
};
use spacerain_shared::{
    find_preset, render_results, ConditionId, EventTime, SessionDraft, DEFAULT_COORDINATE,
    PRESET_CITIES,
};

/// Find the best day for your event
#[derive(Debug, Parser)]
#[command(name = "spacerain", version, about)]
struct Args {
    /// Event date (YYYY-MM-DD)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Event time (HH:MM, 24-hour clock)
    #[arg(long)]
    time: Option<EventTime>,

    /// Latitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, requires = "lon")]
    lat: Option<String>,

    /// Longitude in decimal degrees
    #[arg(long, allow_hyphen_values = true, requires = "lat")]
    lon: Option<String>,

    /// Use a preset city's coordinate
    #[arg(long)]
    preset: Option<String>,

    /// Use the device's approximate location
    #[arg(long)]
    locate: bool,

    /// Condition to analyze (repeatable): rain, temperature, extreme_rain,
    /// heat_wave, wind, cold
    #[arg(long = "condition", short = 'c')]
    conditions: Vec<ConditionId>,

    /// List preset cities and exit
    #[arg(long)]
    list_presets: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spacerain=info,spacerain_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    dotenvy::dotenv().ok();
    let args = Args::parse();

    if args.list_presets {
        for city in PRESET_CITIES {
            println!("{:<14} {:>9} {:>9}", city.name, city.lat, city.lon);
        }
        return Ok(());
    }

    // Load configuration
    let config = Config::load()?;
    tracing::debug!(environment = %config.environment, endpoint = %config.api.probability_url(), "configuration loaded");

    let mut selector = CoordinateSelector::new(DEFAULT_COORDINATE, HeadlessMapFactory, config.map);
    selector.open_confirmation();

    if let (Some(lat), Some(lon)) = (&args.lat, &args.lon) {
        if let Err(e) = selector.set_from_text(lat, lon) {
            eprintln!("{} (keeping {})", e, selector.coordinate());
        }
    }

    if let Some(name) = &args.preset {
        let city = find_preset(name)
            .ok_or_else(|| anyhow!("Unknown preset '{}' (see --list-presets)", name))?;
        selector.select_preset(city);
    }

    if args.locate {
        if config.geolocation.enabled {
            let provider = IpGeolocation::new(config.geolocation.service_url.clone());
            selector.request_device_location(&provider).await;
        } else {
            selector.request_device_location(&NoGeolocation).await;
        }
    }

    let coordinate = selector.close_confirmation();

    let time = match args.time {
        Some(time) => time,
        None => config.session.event_time()?,
    };
    let mut session = AnalysisSession::new(SessionDraft {
        date: args.date,
        time,
        coordinate,
        conditions: args.conditions.into_iter().collect(),
    });

    let orchestrator = RequestOrchestrator::new(AnalysisClient::new(config.api.probability_url()));
    if let Err(ClientError::Validation(e)) = orchestrator.submit(&mut session).await {
        bail!(e);
    }

    match (session.status(), session.result(), session.error_message()) {
        (SessionStatus::Success, Some(response), _) => {
            println!("Location: {}", response.location);
            println!("Date: {} {}", response.date, response.time);
            println!();
            for card in render_results(response) {
                println!("{}", card);
            }
            Ok(())
        }
        (_, _, Some(message)) => bail!("Analysis failed: {}", message),
        (status, _, _) => bail!("Analysis did not settle (status {:?})", status),
    }
}
