use std::io::Write;
use std::time::Duration;

use clap::{error::ErrorKind, Parser};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tokio::time::Instant;
use tracing::{info, warn};

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::logging;
use crate::output::{self, OutputFormat};
use crate::source::{self, CsvDialect, DataSource, Loader};
use crate::view::{AppState, LoadStatus, Profile, UiEvent};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// Everything a run needs, after merging CLI flags over the config file.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub source: DataSource,
    pub dialect: CsvDialect,
    pub timeout: Duration,
    pub profile: Profile,
    pub fragment: Option<String>,
    pub events: Vec<UiEvent>,
    pub open: Option<usize>,
    pub output: Option<String>,
    pub format: OutputFormat,
    pub no_color: bool,
    pub verbose: u8,
    pub fail_on_error: bool,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn resolve_source(args: &CliArgs, cfg: &ConfigFile) -> Result<DataSource, String> {
    let sheet_name = || {
        non_empty(args.sheet_name.clone())
            .or_else(|| non_empty(cfg.sheet_name.clone()))
            .unwrap_or_else(|| source::DEFAULT_SHEET_NAME.to_string())
    };

    if let Some(url) = non_empty(args.url.clone()) {
        return Ok(DataSource::JsonEndpoint { url });
    }
    if let Some(spreadsheet_id) = non_empty(args.sheet_id.clone()) {
        return Ok(DataSource::Spreadsheet {
            spreadsheet_id,
            sheet_name: sheet_name(),
        });
    }
    if let Some(file) = non_empty(args.file.clone()) {
        return Ok(DataSource::from_path(config::expand_tilde(&file)));
    }

    let cfg_file = non_empty(cfg.file.clone()).map(|f| config::expand_tilde(&f));
    match cfg.source.as_deref().map(|s| s.trim().to_lowercase()) {
        Some(kind) if kind == "json" => Ok(DataSource::JsonEndpoint {
            url: non_empty(cfg.url.clone()).unwrap_or_else(|| source::DEFAULT_JSON_URL.to_string()),
        }),
        Some(kind) if kind == "sheet" => {
            let spreadsheet_id = non_empty(cfg.spreadsheet_id.clone())
                .ok_or_else(|| "config source 'sheet' requires spreadsheet_id".to_string())?;
            Ok(DataSource::Spreadsheet {
                spreadsheet_id,
                sheet_name: sheet_name(),
            })
        }
        Some(kind) if kind == "json-file" => cfg_file
            .map(DataSource::JsonFile)
            .ok_or_else(|| "config source 'json-file' requires file".to_string()),
        Some(kind) if kind == "csv-file" => cfg_file
            .map(DataSource::CsvFile)
            .ok_or_else(|| "config source 'csv-file' requires file".to_string()),
        Some(other) => Err(format!(
            "invalid config source '{other}', expected json, sheet, json-file or csv-file"
        )),
        None => {
            if let Some(spreadsheet_id) = non_empty(cfg.spreadsheet_id.clone()) {
                Ok(DataSource::Spreadsheet {
                    spreadsheet_id,
                    sheet_name: sheet_name(),
                })
            } else if let Some(path) = cfg_file {
                Ok(DataSource::from_path(path))
            } else {
                Ok(DataSource::JsonEndpoint {
                    url: non_empty(cfg.url.clone())
                        .unwrap_or_else(|| source::DEFAULT_JSON_URL.to_string()),
                })
            }
        }
    }
}

fn resolve_format(args: &CliArgs, cfg: &ConfigFile, output: Option<&str>) -> Result<OutputFormat, String> {
    if let Some(raw) = args.format.as_deref().or(cfg.output_format.as_deref()) {
        return OutputFormat::parse(raw).ok_or_else(|| format!("invalid output format '{raw}'"));
    }
    Ok(output
        .and_then(output::infer_format_from_path)
        .unwrap_or(OutputFormat::Html))
}

fn build_events(args: &CliArgs) -> Vec<UiEvent> {
    let mut events = Vec::new();
    if let Some(text) = args.hero.clone() {
        events.push(UiEvent::HeroSearch(text));
    }
    if let Some(text) = args.query.clone() {
        events.push(UiEvent::SearchInput(text));
    }
    if args.name.is_some() || args.city.is_some() {
        events.push(UiEvent::SearchSubmit {
            name: args.name.clone().unwrap_or_default(),
            city: args.city.clone().unwrap_or_default(),
        });
    }
    events
}

pub fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let source = resolve_source(&args, &cfg)?;
    let mut profile = source.profile();
    if let Some(limit) = args.limit.or(cfg.limit) {
        if limit == 0 {
            return Err("invalid limit, expected positive integer".to_string());
        }
        profile = profile.with_display_limit(limit);
    }

    let timeout_seconds = args.timeout.or(cfg.timeout).unwrap_or(DEFAULT_TIMEOUT_SECONDS);
    if timeout_seconds == 0 {
        return Err("invalid timeout, expected positive integer".to_string());
    }

    let dialect = if args.strict_csv || cfg.strict_csv.unwrap_or(false) {
        CsvDialect::Strict
    } else {
        CsvDialect::Naive
    };

    let output = non_empty(args.output.clone()).or_else(|| non_empty(cfg.output.clone()));
    let format = resolve_format(&args, &cfg, output.as_deref())?;

    Ok(RunConfig {
        source,
        dialect,
        timeout: Duration::from_secs(timeout_seconds),
        profile,
        fragment: args.section.clone(),
        events: build_events(&args),
        open: args.open,
        output,
        format,
        no_color: args.no_color || cfg.no_color.unwrap_or(false),
        verbose: args.verbose,
        fail_on_error: args.fail_on_error,
    })
}

fn format_kv_line(label: &str, value: &str) {
    eprintln!(":: {:<10}: {}", label.bold(), value);
}

fn loading_spinner(source: &DataSource) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());
    pb.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(format!("loading {source}"));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Builds the page state from one load plus the requested UI events.
pub async fn build_state(run: &RunConfig, loader: &Loader) -> AppState {
    let spinner = loading_spinner(&run.source);
    let result = loader.load(&run.source).await;
    spinner.finish_and_clear();

    let mut state = AppState::new(run.profile, run.fragment.as_deref());
    state.apply_load(result);
    for event in run.events.iter().cloned() {
        state.dispatch(event);
    }
    if let Some(position) = run.open {
        state.render_list();
        state.dispatch(UiEvent::CardClicked(position));
        if !state.modal().is_open() {
            warn!(position, "no card at that position");
        }
    }
    state
}

pub async fn run_async(run: RunConfig) -> Result<(), String> {
    let now = Instant::now();
    let loader = Loader::new(run.timeout, run.dialect).map_err(|e| e.to_string())?;
    let mut state = build_state(&run, &loader).await;

    let rendered = output::render(run.format, &mut state, Instant::now());
    match run.output.as_deref() {
        Some(path) => {
            let path = config::expand_tilde(path);
            tokio::fs::write(&path, &rendered)
                .await
                .map_err(|e| format!("failed to write output '{}': {e}", path.display()))?;
            info!(path = %path.display(), bytes = rendered.len(), "page written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(&rendered)
                .and_then(|_| stdout.flush())
                .map_err(|e| format!("failed to write output: {e}"))?;
        }
    }

    format_kv_line("Source", &run.source.to_string());
    format_kv_line("Records", &state.records().len().to_string());
    format_kv_line("Matches", &state.visible_count().to_string());
    format_kv_line("Section", state.section().slug());
    if run.profile.scored {
        let stats = state.stats();
        format_kv_line("Average", &stats.mean_display());
        format_kv_line("High", &stats.high_count.to_string());
    }

    if let LoadStatus::Failed(message) = state.status() {
        eprintln!("{} {}", "[ERR]".bold().red(), message);
        if run.fail_on_error {
            return Err(format!("failed to load records: {message}"));
        }
    }

    eprintln!(":: Completed :: took {}ms ::", now.elapsed().as_millis());
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    let cfg = match args.config.as_deref() {
        Some(path) => config::load_config(&config::expand_tilde(path))?,
        None => ConfigFile::default(),
    };

    let run = build_run_config(args, cfg)?;
    if run.no_color {
        colored::control::set_override(false);
    }
    logging::init_logging(run.verbose, !run.no_color);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
