mod host;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use log::{info, warn};
use simplelog::{Config, LevelFilter, SimpleLogger, WriteLogger};
use tabsheet::prelude::*;

use host::{EventBus, LoggingRenderer, ManualWindow, StaticSurface};

const DATA: &str = include_str!("../fixtures/data.json");
const OPTIONS: &str = include_str!("../fixtures/options.json");
const THEME: &str = include_str!("../fixtures/theme.json");

#[derive(Parser)]
#[command(name = "tabsheet-demo")]
#[command(about = "Drive a tabular sheet through mount, updates, resizes and unmount", long_about = None)]
#[command(version)]
struct Cli {
    /// Data config JSON. Defaults to the bundled fixture.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Sheet options JSON. Defaults to the bundled fixture.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Theme applied after mount. Defaults to the bundled dark theme.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Write logs here instead of the terminal.
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[arg(long, value_parser = ["error", "warn", "info", "debug", "trace"], default_value = "debug")]
    log_level: String,

    /// Resize signals fired in one burst.
    #[arg(long, default_value = "5")]
    burst: u32,

    /// Do not follow window resizes.
    #[arg(long)]
    fixed: bool,
}

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid JSON in {what}: {source}")]
    Json {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Sheet(#[from] SheetError),
}

fn init_logging(cli: &Cli) -> Result<(), DemoError> {
    let level = cli.log_level.parse().unwrap_or(LevelFilter::Info);
    match &cli.log_file {
        Some(path) => {
            let file = File::create(path).map_err(|source| DemoError::Io {
                path: path.clone(),
                source,
            })?;
            WriteLogger::init(level, Config::default(), file)?;
        }
        None => SimpleLogger::init(level, Config::default())?,
    }
    Ok(())
}

/// Parse `path` if given, else the bundled fixture.
fn load<T: serde::de::DeserializeOwned>(path: Option<&Path>, fixture: &str) -> Result<T, DemoError> {
    let (what, text) = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            (path.display().to_string(), text)
        }
        None => ("bundled fixture".to_string(), fixture.to_string()),
    };
    serde_json::from_str(&text).map_err(|source| DemoError::Json { what, source })
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), DemoError> {
    init_logging(&cli)?;

    let data_cfg: DataConfig = load(cli.data.as_deref(), DATA)?;
    let options: SheetOptions = load(cli.options.as_deref(), OPTIONS)?;
    let theme = SheetTheme::new(load(cli.theme.as_deref(), THEME)?);

    info!(
        "derived cell height: {}",
        compute_cell_height(&data_cfg, &options, tabsheet::config::DEFAULT_LINE_HEIGHT)
    );

    let bus = EventBus::default();
    let renderer_bus = bus.clone();
    let default_factory = factory(move |surface: &dyn Surface, _data: &DataConfig, _options: &SheetOptions| {
        Box::new(LoggingRenderer::new(surface.measure(), renderer_bus.clone())) as Box<dyn SheetRenderer>
    });

    let props = SheetProps::new(data_cfg)
        .with_options(options)
        .adaptive(!cli.fixed)
        .with_header(HeaderProps::new("Orders").with_description("By province and city"))
        .on_ready(|_sheet| info!("sheet ready"))
        .on_row_cell_click(|cell| info!("row cell clicked: {:?}", cell.view_meta.map(|m| m.id)))
        .on_data_cell_mouse_up(|cell| info!("data cell mouse up at ({}, {})", cell.x, cell.y));

    let mut sheet = TabularSheet::new(default_factory, props.clone());
    let surface = StaticSurface::new(600.0, 480.0);
    let window = ManualWindow::new();
    sheet.mount(surface.clone(), window.clone())?;

    if let Some(header) = sheet.header() {
        info!(
            "header: {} / {}",
            header.title().unwrap_or_default(),
            header.description().unwrap_or_default()
        );
    }

    bus.emit(SheetEvent::RowCellClick, &host::click("root[&]Zhejiang[&]Hangzhou"));
    bus.emit(SheetEvent::DataCellMouseUp, &host::click("root[&]Zhejiang[&]Ningbo[&]number"));
    bus.emit(SheetEvent::ColCellClick, &host::click("root[&]Furniture"));

    for step in 0..cli.burst {
        surface.grow(40.0, 20.0);
        window.fire(u64::from(step) * 50);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    match tokio::time::timeout(Duration::from_secs(1), sheet.next_resize()).await {
        Ok(Some(sample)) => sheet.apply_resize(sample),
        Ok(None) => info!("not listening for resizes"),
        Err(_) => warn!("no resize settled"),
    }

    sheet.set_props(props.with_theme(theme))?;
    info!("loading: {}", sheet.loading());

    sheet.unmount();
    info!("remaining resize listeners: {}", window.listener_count());
    Ok(())
}
