//! TinyChart - Replay recorded system metrics into chart images
//!
//! Reads backend snapshots (one JSON object per line), routes them into the
//! dashboard's charts and writes the rendered charts out as PNG files.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tinychart::config::{DashboardConfig, DashboardSettings};
use tinychart::host::{self, ChartRegistry, MetricKind, ReplayClock};
use tinychart::logging;
use tinychart::surface::{BitmapSurface, FontSet, PointerEvent, RecordingSurface};
use tracing::{info, warn};

/// Tried in order when the dashboard file names no font.
const FALLBACK_FONTS: [(&str, &str); 2] = [
    (
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    ),
    (
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    ),
];

#[derive(Parser)]
#[command(
    name = "tinychart",
    about = "Render system metric charts from recorded snapshots",
    version
)]
struct Cli {
    /// Dashboard config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay snapshots and write one PNG per chart
    Render {
        /// Snapshot file, one JSON object per line
        #[arg(short, long)]
        snapshots: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "charts")]
        out: PathBuf,

        /// Also write each chart's samples as JSON
        #[arg(long)]
        export_json: bool,

        /// Open the output directory when done
        #[arg(long)]
        open: bool,
    },

    /// Print the tooltip a pointer at (x, y) would show on one chart
    Hover {
        /// Snapshot file, one JSON object per line
        #[arg(short, long)]
        snapshots: PathBuf,

        /// memory, threads, events or heap
        #[arg(long)]
        chart: MetricKind,

        /// Pointer x in chart display units
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// Pointer y in chart display units
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
    },

    /// List the configured panels
    Panels,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = DashboardConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load dashboard config {}", path.display()),
        None => "Failed to build default dashboard".to_string(),
    })?;

    match cli.command {
        Commands::Render {
            snapshots,
            out,
            export_json,
            open,
        } => render(&config, &snapshots, &out, export_json, open),
        Commands::Hover {
            snapshots,
            chart,
            x,
            y,
        } => hover(&config, &snapshots, chart, x, y),
        Commands::Panels => {
            list_panels(&config);
            Ok(())
        }
    }
}

fn render(
    config: &DashboardConfig,
    snapshots: &Path,
    out: &Path,
    export_json: bool,
    open: bool,
) -> Result<()> {
    let settings = &config.dashboard;
    let fonts = load_fonts(settings)?;

    let mut registry = ChartRegistry::from_config(config, |_| {
        let surface = BitmapSurface::new(settings.width, settings.height)
            .with_device_pixel_ratio(settings.device_pixel_ratio);
        match &fonts {
            Some(fonts) => surface.with_fonts(fonts.clone()),
            None => surface,
        }
    });

    let snapshots = host::load_snapshots(snapshots)
        .with_context(|| format!("Failed to read snapshots from {}", snapshots.display()))?;
    let clock = ReplayClock::ending_now(snapshots.len(), settings.poll_interval_ms);
    host::replay(&mut registry, &snapshots, clock);

    let images = host::export_pngs(&registry, out)
        .with_context(|| format!("Failed to write charts to {}", out.display()))?;
    for path in &images {
        info!(path = %path.display(), "chart written");
    }

    if export_json {
        let dumps = host::export_samples(&registry, out)
            .with_context(|| format!("Failed to write samples to {}", out.display()))?;
        for path in &dumps {
            info!(path = %path.display(), "samples written");
        }
    }

    registry.destroy_all();

    if open {
        open::that(out).with_context(|| format!("Failed to open {}", out.display()))?;
    }
    Ok(())
}

fn hover(
    config: &DashboardConfig,
    snapshots: &Path,
    metric: MetricKind,
    x: f64,
    y: f64,
) -> Result<()> {
    let settings = &config.dashboard;
    let mut registry = ChartRegistry::from_config(config, |_| {
        let surface = RecordingSurface::new(settings.width as f64, settings.height as f64);
        match settings.device_pixel_ratio {
            Some(ratio) => surface.with_device_pixel_ratio(ratio),
            None => surface,
        }
    });

    let snapshots = host::load_snapshots(snapshots)
        .with_context(|| format!("Failed to read snapshots from {}", snapshots.display()))?;
    let clock = ReplayClock::ending_now(snapshots.len(), settings.poll_interval_ms);
    host::replay(&mut registry, &snapshots, clock);

    let chart = registry
        .get_mut(metric)
        .with_context(|| format!("No {metric} chart on this dashboard"))?;
    let hit = chart.handle_pointer(PointerEvent::Move {
        client_x: x,
        client_y: y,
    });

    match (hit, chart.tooltip()) {
        (Some(hit), Some(tooltip)) => {
            println!("sample #{} ({:.1} units away)", hit.index, hit.distance);
            if let Some(content) = tooltip.content() {
                for line in content.lines() {
                    println!("  {line}");
                }
            }
            let pos = tooltip.position();
            println!("  at ({:.0}, {:.0})", pos.x, pos.y);
        }
        _ => println!("no sample within reach of ({x}, {y})"),
    }
    Ok(())
}

fn list_panels(config: &DashboardConfig) {
    let theme = config.dashboard.theme;
    for panel in config.panels() {
        let render = panel.render_config(theme);
        println!(
            "{:<8} {:<20} line={} points={} max_points={}{}",
            panel.metric.key(),
            render.title.as_deref().unwrap_or("-"),
            render.line_color,
            render.point_color,
            render.capacity(),
            if render.is_integer { " integer" } else { "" },
        );
    }
}

fn load_fonts(settings: &DashboardSettings) -> Result<Option<FontSet>> {
    if let Some(regular) = &settings.font {
        let fonts = FontSet::load(regular, settings.bold_font.as_deref())
            .with_context(|| format!("Failed to load font {}", regular.display()))?;
        return Ok(Some(fonts));
    }

    for (regular, bold) in FALLBACK_FONTS {
        let (regular, bold) = (Path::new(regular), Path::new(bold));
        if !regular.exists() {
            continue;
        }
        let bold = bold.exists().then_some(bold);
        match FontSet::load(regular, bold) {
            Ok(fonts) => return Ok(Some(fonts)),
            Err(err) => warn!(path = %regular.display(), %err, "skipping unusable font"),
        }
    }

    warn!("no font found, chart labels and titles will be left out");
    Ok(None)
}
