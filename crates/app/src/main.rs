use std::path::{Path, PathBuf};
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppServices, AppServicesError, Clock, QuizConfig};
use talents_core::gesture::DEFAULT_SWIPE_THRESHOLD;
use talents_core::model::{Catalog, CatalogError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

const DEFAULT_DB_URL: &str = "sqlite://talents.sqlite3";

#[derive(Debug, Error)]
enum ArgsError {
    #[error("{flag} requires a value")]
    MissingValue { flag: &'static str },
    #[error("unknown argument: {0}")]
    UnknownArg(String),
    #[error("invalid --db value: {raw}")]
    InvalidDbUrl { raw: String },
    #[error("invalid swipe threshold: {raw}")]
    InvalidThreshold { raw: String },
}

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Args(#[from] ArgsError),
    #[error("failed to load catalog {path}: {source}")]
    Catalog {
        path: PathBuf,
        #[source]
        source: CatalogError,
    },
    #[error("failed to prepare database file: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Services(#[from] AppServicesError),
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--db <sqlite_url>] [--catalog <json>] [--threshold <px>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --db {DEFAULT_DB_URL}");
    eprintln!("  --catalog <built-in KSA talents>");
    eprintln!("  --threshold {DEFAULT_SWIPE_THRESHOLD}");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  TALENTS_DB_URL, TALENTS_CATALOG, TALENTS_SWIPE_THRESHOLD, RUST_LOG");
}

#[derive(Debug, PartialEq)]
struct Args {
    db_url: String,
    catalog: Option<PathBuf>,
    threshold: f64,
    help: bool,
}

fn parse_threshold(raw: String) -> Result<f64, ArgsError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(ArgsError::InvalidThreshold { raw }),
    }
}

impl Args {
    /// Flags win over environment variables, which win over defaults.
    fn parse(
        args: &mut impl Iterator<Item = String>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ArgsError> {
        let mut db_url = env("TALENTS_DB_URL")
            .filter(|value| !value.trim().is_empty())
            .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url);
        let mut catalog = env("TALENTS_CATALOG")
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from);
        let mut threshold = match env("TALENTS_SWIPE_THRESHOLD") {
            Some(raw) => parse_threshold(raw)?,
            None => DEFAULT_SWIPE_THRESHOLD,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--catalog" => {
                    catalog = Some(PathBuf::from(require_value(args, "--catalog")?));
                }
                "--threshold" => {
                    threshold = parse_threshold(require_value(args, "--threshold")?)?;
                }
                "--help" | "-h" => {
                    return Ok(Self {
                        db_url,
                        catalog,
                        threshold,
                        help: true,
                    });
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            db_url,
            catalog,
            threshold,
            help: false,
        })
    }
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), AppError> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog, AppError> {
    let Some(path) = path else {
        return Ok(Catalog::builtin());
    };
    let catalog = Catalog::from_json_file(path).map_err(|source| AppError::Catalog {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        path = %path.display(),
        questions = catalog.question_count(),
        talents = catalog.talent_count(),
        "loaded catalog"
    );
    Ok(catalog)
}

fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
    if let Err(err) = result {
        eprintln!("logging disabled: {err}");
    }
}

async fn run() -> Result<(), AppError> {
    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv, |key| std::env::var(key).ok()).inspect_err(|_| {
        print_usage();
    })?;
    if parsed.help {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let catalog = load_catalog(parsed.catalog.as_deref())?;
    let config = QuizConfig::default().with_swipe_threshold(parsed.threshold);

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let services =
        AppServices::new_sqlite(&parsed.db_url, Clock::system(), catalog, config).await?;
    tracing::info!(db = %parsed.db_url, threshold = parsed.threshold, "starting talents app");

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("KSA Talenten")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
