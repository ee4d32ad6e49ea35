use chrono::{NaiveDate, Utc};
use clap::Parser;
use skycast::render;
use skycast::{run_comparison, Geocoder, WeatherClient};

/// SkyCast Analytics — historical daily-max temperature comparison.
///
/// Geocodes two city names, pulls each city's daily maximum
/// temperatures from the Open-Meteo archive, and renders summary
/// metrics, a line chart, and a pivoted date × city table.
///
/// Examples:
///   skycast "New York" London
///   skycast Tokyo Paris --days 14
///   skycast Oslo Cairo --start 2026-06-01 --end 2026-06-30
///   skycast --serve --port 8080
#[derive(Parser)]
#[command(name = "skycast", version, about, long_about = None)]
struct Cli {
    /// First city name. Example: skycast "New York" London
    #[arg(index = 1)]
    city_a: Option<String>,

    /// Second city name.
    #[arg(index = 2)]
    city_b: Option<String>,

    /// Range start (YYYY-MM-DD). Defaults to `--days` before the end.
    #[arg(long)]
    start: Option<String>,

    /// Range end (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Range length when --start is omitted.
    #[arg(long, default_value_t = 30)]
    days: u32,

    /// Suppress the stderr rendering; only print JSON to stdout.
    #[arg(long)]
    json_only: bool,

    /// Offline mode: session memo only, no network calls.
    #[arg(long)]
    offline: bool,

    /// Run the web dashboard instead of a one-shot comparison.
    #[arg(long)]
    serve: bool,

    /// Bind host for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Bind port for --serve.
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() {
    let cli = Cli::parse();

    if cli.serve {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .unwrap_or_else(|e| {
                eprintln!("Error: Cannot start runtime: {}", e);
                std::process::exit(1);
            });
        runtime.block_on(skycast::server::start(&cli.host, cli.port));
        return;
    }

    let (Some(city_a), Some(city_b)) = (&cli.city_a, &cli.city_b) else {
        eprintln!("Error: Two city names are required.");
        eprintln!();
        eprintln!("Usage:");
        eprintln!("  skycast \"New York\" London");
        eprintln!("  skycast Tokyo Paris --days 14");
        eprintln!("  skycast Oslo Cairo --start 2026-06-01 --end 2026-06-30");
        eprintln!("  skycast --serve");
        std::process::exit(1);
    };

    let (start, end) = resolve_range(&cli);

    let mut geocoder = Geocoder::new();
    let mut weather = WeatherClient::new();
    if cli.offline {
        geocoder.set_offline(true);
        weather.set_offline(true);
    }

    let comparison = run_comparison(&mut geocoder, &mut weather, city_a, city_b, start, end)
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    // Human-readable views to stderr, machine JSON to stdout.
    if !cli.json_only {
        eprintln!();
        eprint!("{}", render::render_metrics(&comparison));
        eprintln!();
        eprint!("{}", render::render_chart(&comparison));
        eprintln!();
        eprint!("{}", render::render_table(&comparison.table));
    }

    match serde_json::to_string_pretty(&comparison) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: Cannot serialize output: {}", e);
            std::process::exit(1);
        }
    }
}

fn resolve_range(cli: &Cli) -> (NaiveDate, NaiveDate) {
    let today = Utc::now().naive_utc().date();

    let end = match &cli.end {
        Some(raw) => parse_date_or_exit(raw),
        None => today,
    };
    let start = match &cli.start {
        Some(raw) => parse_date_or_exit(raw),
        None => end - chrono::Duration::days(cli.days as i64),
    };

    (start, end)
}

fn parse_date_or_exit(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap_or_else(|e| {
        eprintln!("Error: Invalid date '{}': {}", raw, e);
        std::process::exit(1);
    })
}
