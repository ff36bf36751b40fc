use crate::{
    config::{PlannerConfig, API_KEY_VAR},
    GeminiClient, ItineraryPlanner, ItineraryRequest,
    MemoryItineraryStore, PersistenceNotifier,
};
use anyhow::{anyhow, Context};
use clap::{value_parser, Arg, ArgMatches, Command};
use std::{sync::Arc, time::Duration};
use tracing::{error, info};

/// CLI entry point for the tripwand tool
pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let matches = Command::new("tripwand")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Generate day-by-day travel itineraries with a generative text model")
        .subcommand_required(true)
        .subcommand(
            request_args(Command::new("generate"))
                .about("Generate an itinerary and print it as JSON")
                .arg(
                    Arg::new("temperature")
                        .long("temperature")
                        .value_name("FLOAT")
                        .help("Sampling temperature between 0 and 2 (or set TRIPWAND_TEMPERATURE)")
                        .value_parser(value_parser!(f32)),
                )
                .arg(
                    Arg::new("max-tokens")
                        .long("max-tokens")
                        .value_name("COUNT")
                        .help("Maximum output tokens (or set TRIPWAND_MAX_OUTPUT_TOKENS)")
                        .value_parser(value_parser!(u32)),
                )
                .arg(
                    Arg::new("model")
                        .short('m')
                        .long("model")
                        .value_name("MODEL")
                        .help("Model to use (or set TRIPWAND_MODEL)"),
                )
                .arg(
                    Arg::new("api-key")
                        .short('k')
                        .long("api-key")
                        .value_name("KEY")
                        .help("Google AI Studio API key (or set GOOGLE_AI_API_KEY)"),
                )
                .arg(
                    Arg::new("base-url")
                        .short('u')
                        .long("base-url")
                        .value_name("URL")
                        .help("Generation API base URL (or set TRIPWAND_BASE_URL)"),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECONDS")
                        .help("Request timeout in seconds (or set TRIPWAND_TIMEOUT_SECS)")
                        .value_parser(value_parser!(u64)),
                ),
        )
        .subcommand(
            request_args(Command::new("prompt"))
                .about("Print the rendered prompt without calling the model"),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("generate", sub)) => generate(sub).await,
        Some(("prompt", sub)) => {
            let request = request_from(sub)?;
            crate::validate_request(&request)?;
            println!("{}", crate::build_prompt(&request));
            Ok(())
        }
        _ => Err(anyhow!("unknown subcommand")),
    }
}

fn request_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("destination")
                .help("Where the trip goes")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("duration")
                .short('d')
                .long("duration")
                .value_name("DAYS")
                .help("Trip length in days (1-30)")
                .required(true)
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("age-group")
                .long("age-group")
                .value_name("LABEL")
                .help("Traveler age group, e.g. \"20s\""),
        )
        .arg(
            Arg::new("group-size")
                .short('g')
                .long("group-size")
                .value_name("COUNT")
                .help("Number of travelers (1-50)")
                .value_parser(value_parser!(u32)),
        )
        .arg(
            Arg::new("purpose")
                .long("purpose")
                .value_name("LABEL")
                .help("Purpose of the trip"),
        )
        .arg(
            Arg::new("travel-type")
                .long("travel-type")
                .value_name("LABEL")
                .help("Travel style, e.g. \"relaxed\""),
        )
}

fn request_from(matches: &ArgMatches) -> anyhow::Result<ItineraryRequest> {
    let destination = matches
        .get_one::<String>("destination")
        .context("destination is required")?;
    let duration = *matches
        .get_one::<u32>("duration")
        .context("duration is required")?;

    Ok(ItineraryRequest {
        destination: destination.clone(),
        duration,
        age_group: matches.get_one::<String>("age-group").cloned(),
        group_size: matches.get_one::<u32>("group-size").copied(),
        purpose: matches.get_one::<String>("purpose").cloned(),
        travel_type: matches.get_one::<String>("travel-type").cloned(),
    })
}

fn config_from(matches: &ArgMatches) -> anyhow::Result<PlannerConfig> {
    let mut config = match matches.get_one::<String>("api-key") {
        Some(api_key) => PlannerConfig::from_lookup(|key| {
            if key == API_KEY_VAR {
                Some(api_key.clone())
            } else {
                std::env::var(key).ok()
            }
        })?,
        None => PlannerConfig::from_env()?,
    };

    if let Some(model) = matches.get_one::<String>("model") {
        config.model = model.clone();
    }
    if let Some(base_url) = matches.get_one::<String>("base-url") {
        config.base_url = base_url.clone();
    }
    if let Some(temperature) = matches.get_one::<f32>("temperature") {
        config.temperature = *temperature;
    }
    if let Some(tokens) = matches.get_one::<u32>("max-tokens") {
        config.max_output_tokens = *tokens;
    }
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        config.timeout = Duration::from_secs(*secs);
    }

    config.validate()?;
    Ok(config)
}

async fn generate(matches: &ArgMatches) -> anyhow::Result<()> {
    let request = request_from(matches)?;
    let config = config_from(matches)?;

    let client = GeminiClient::with_timeout(config.api_key.clone(), config.timeout)?
        .with_base_url(config.base_url.clone())
        .with_model(config.model.clone())?;

    let (notifier, worker) = PersistenceNotifier::spawn(
        Arc::new(MemoryItineraryStore::new()),
        config.persist_queue_capacity,
    );
    let planner = ItineraryPlanner::from_config(Arc::new(client), &config).with_notifier(notifier);

    info!("Generating {}-day itinerary for {}", request.duration, request.destination);
    info!("Using model: {}", config.model);

    let outcome = planner.generate_response(&request).await;
    drop(planner);
    let report = worker.drain().await;
    info!(
        saved = report.saved,
        failed = report.failed,
        dropped = report.dropped,
        "persistence drained"
    );

    match outcome {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(err) => {
            error!("Itinerary generation failed: {}", err);
            eprintln!("{}", serde_json::to_string_pretty(&err.to_error_payload())?);
            Err(err.into())
        }
    }
}
