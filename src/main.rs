use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use ratatui::DefaultTerminal;

use cms_autocomplete::api::ApiClient;
use cms_autocomplete::app::App;
use cms_autocomplete::config::{Config, load_config};
use cms_autocomplete::{AutocompleteState, Selection};

// How long to wait for input before checking for API responses again
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Search-and-select records from a CMS autocomplete API
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Base URL of the autocomplete API (e.g. http://localhost:8000/admin/autocomplete/)
    #[arg(long)]
    api_base: Option<String>,

    /// Record type to search, as `app_label.ModelName`
    #[arg(long = "type", value_name = "TYPE")]
    record_type: Option<String>,

    /// Form field name printed on exit
    #[arg(long)]
    name: Option<String>,

    /// Select at most one record
    #[arg(long)]
    single: bool,

    /// Offer to create a record from the search text
    #[arg(long)]
    can_create: bool,

    /// Act as the host of a controlled widget
    #[arg(long)]
    controlled: bool,

    /// Fetch full records for the initial value on start
    #[arg(long)]
    fetch_initial_values: bool,

    /// Initial value as JSON (a record, a list of records, or null)
    #[arg(long, value_name = "JSON")]
    value: Option<String>,

    /// Config file (default: <config dir>/cms-autocomplete/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

impl Args {
    /// Command-line flags win over the config file
    fn apply(&self, config: &mut Config) {
        let widget = &mut config.widget;
        if let Some(api_base) = &self.api_base {
            widget.api_base = api_base.clone();
        }
        if let Some(record_type) = &self.record_type {
            widget.record_type = record_type.clone();
        }
        if let Some(name) = &self.name {
            widget.name = name.clone();
        }
        widget.is_single |= self.single;
        widget.can_create |= self.can_create;
        widget.controlled |= self.controlled;
        widget.fetch_initial_values |= self.fetch_initial_values;
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if let Some(path) = &args.log_file {
        init_logging(path)?;
    }

    let loaded = load_config(args.config.as_deref());
    let mut config = loaded.config;
    args.apply(&mut config);

    // Reject a bad value before the terminal is taken over
    let value = match &args.value {
        Some(raw) => Selection::from_json(raw)?,
        None => Selection::default(),
    };

    let client = ApiClient::with_config(&config.widget.api_base, &config.http)?;
    let mut autocomplete = AutocompleteState::new(&config.widget, value);
    autocomplete.connect(client);

    let mut app = App::new(autocomplete, config.widget.controlled).with_warning(loaded.warning);
    app.autocomplete.mount();

    let terminal = ratatui::init();
    let result = run(terminal, &mut app);
    ratatui::restore();
    result?;

    let field = app.output();
    println!("{}={}", field.name, field.value);

    Ok(())
}

fn run(mut terminal: DefaultTerminal, app: &mut App) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| app.render(frame))?;

        app.handle_events(POLL_INTERVAL)?;

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

fn init_logging(path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .wrap_err_with(|| format!("Cannot open log file {}", path.display()))?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] {}: {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();

    Ok(())
}
