use chrono::Utc;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use iss_locator::config::{TrackerConfig, DEFAULT_HOST, DEFAULT_NOMINATIM_URL};
use iss_locator::dns::DnsLocSource;
use iss_locator::render::{LiveMap, OneShotText, Presentation};
use iss_locator::{Poller, RegionClassifier};
use std::io::{self, Write};
use std::thread;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Where is the ISS right now?
///
/// Reads the station's position from a DNS LOC record and names the country
/// or ocean below it.
///
/// Examples:
///   iss
///   iss --json
///   iss --offline --tz Europe/Stockholm
///   iss live
///   iss live 30
#[derive(Parser)]
#[command(name = "iss", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Host publishing the LOC record.
    #[arg(long, global = true, env = "ISS_LOC_HOST", default_value = DEFAULT_HOST)]
    host: String,

    /// Nominatim base URL for reverse geocoding.
    #[arg(long, global = true, env = "ISS_NOMINATIM_URL", default_value = DEFAULT_NOMINATIM_URL)]
    nominatim_url: String,

    /// Offline mode: only use the built-in gazetteer.
    #[arg(long, global = true)]
    offline: bool,

    /// Print the snapshot as JSON (one-shot mode only).
    #[arg(long)]
    json: bool,

    /// IANA timezone for displayed timestamps (e.g. Europe/Berlin).
    #[arg(long, global = true, default_value = "UTC", value_parser = parse_tz)]
    tz: Tz,

    /// Debug logging on stderr (RUST_LOG overrides).
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Track continuously on an ASCII world map.
    Live {
        /// Seconds between updates (default 10).
        interval: Option<String>,
    },
}

fn parse_tz(s: &str) -> Result<Tz, String> {
    s.parse::<Tz>()
        .map_err(|_| format!("Unknown timezone '{}'. Use IANA format (e.g. Europe/Oslo).", s))
}

fn init_logging(verbose: bool) {
    let default = if verbose { "iss_locator=debug,iss=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = TrackerConfig {
        host: cli.host.clone(),
        offline: cli.offline,
        ..TrackerConfig::default()
    }
    .with_nominatim_url(&cli.nominatim_url);
    if let Some(Command::Live { interval }) = &cli.command {
        if config.set_live_interval(interval.as_deref()) {
            tracing::warn!(
                default = config.live_interval.as_secs(),
                "invalid live interval; using the default"
            );
        }
    }
    tracing::debug!(?config, "configuration");

    let source = DnsLocSource::new(&config.host, config.dns_timeout).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    if !cli.json && cli.command.is_none() {
        eprintln!("Fetching ISS position from {} ...", source.host());
    }
    let poller = Poller::new(Box::new(source), RegionClassifier::from_config(&config));

    match &cli.command {
        None => run_once(&poller, &cli),
        Some(Command::Live { .. }) => {
            run_live(&poller, LiveMap { tz: cli.tz, interval: config.live_interval })
        }
    }
}

fn run_once(poller: &Poller, cli: &Cli) {

    let snapshot = poller.poll().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    if cli.json {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: could not serialize snapshot: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print!("{}", OneShotText { tz: cli.tz }.render(&snapshot));
    }
}

fn clear_screen(out: &mut impl Write) {
    if let Err(e) = execute!(out, Clear(ClearType::All), MoveTo(0, 0)) {
        tracing::debug!(error = %e, "could not clear terminal");
    }
}

/// Poll, draw, sleep; forever. Failed cycles are reported and retried on
/// the next tick.
fn run_live(poller: &Poller, map: LiveMap) -> ! {
    let interval: Duration = map.interval;
    let mut stdout = io::stdout();

    loop {
        let frame = match poller.poll() {
            Ok(snapshot) => map.render(&snapshot),
            Err(e) => {
                let retry_at = chrono::Duration::from_std(interval)
                    .ok()
                    .and_then(|d| Utc::now().checked_add_signed(d));
                match retry_at {
                    Some(at) => format!(
                        "Error: {}\nRetrying at {} ...\n",
                        e,
                        at.with_timezone(&map.tz).format("%H:%M:%S %Z")
                    ),
                    None => format!("Error: {}\nRetrying ...\n", e),
                }
            }
        };

        clear_screen(&mut stdout);
        print!("{}", frame);
        let _ = stdout.flush();

        thread::sleep(interval);
    }
}
