use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "unveil", version)]
struct Cli {
    /// Log filter, e.g. `debug` or `unveil=trace` (overrides `RUST_LOG`).
    #[arg(long, global = true)]
    log: Option<String>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a scene's scroll timeline and print every reveal/conceal.
    Simulate(SimulateArgs),
    /// Print the preset table.
    Presets,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Emit one JSON object per step instead of text.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log.as_deref());
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Presets => cmd_presets(),
    }
}

fn init_tracing(filter: Option<&str>) {
    let filter = match filter {
        Some(f) => EnvFilter::new(f),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let scene = unveil::SceneDef::from_path(&args.in_path)
        .with_context(|| format!("load scene '{}'", args.in_path.display()))?;
    let report = unveil::run_scene(&scene).with_context(|| "replay scene")?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if args.json {
        for step in &report.steps {
            serde_json::to_writer(&mut out, step).with_context(|| "write step JSON")?;
            writeln!(out)?;
        }
        return Ok(());
    }

    for step in &report.steps {
        writeln!(
            out,
            "t={:.3}s scroll=({}, {}) entries={}",
            step.time_secs,
            step.scroll.x,
            step.scroll.y,
            step.entries.len()
        )?;
        for ev in &step.events {
            let schedule = ev.event.schedule();
            let delays: Vec<String> = schedule
                .children
                .iter()
                .map(|c| format!("{:.3}", c.delay_secs))
                .collect();
            writeln!(
                out,
                "  {} region={} element={} children={} delays=[{}] settles={:.3}s",
                if ev.event.is_reveal() { "reveal " } else { "conceal" },
                ev.region.0,
                ev.element,
                schedule.children.len(),
                delays.join(", "),
                schedule.total_secs()
            )?;
        }
    }

    writeln!(out, "final:")?;
    for (region, schedule) in scene.regions.iter().zip(&report.final_schedules) {
        writeln!(
            out,
            "  element={} visible={}",
            region.element, schedule.region_visible
        )?;
    }
    Ok(())
}

fn cmd_presets() -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for kind in unveil::PresetKind::ALL {
        let s = kind.states();
        writeln!(
            out,
            "{:<10} hidden: opacity={} x={} y={} scale={}  visible: opacity={} x={} y={} scale={}",
            kind.name(),
            s.hidden.opacity,
            s.hidden.translate.x,
            s.hidden.translate.y,
            s.hidden.scale,
            s.visible.opacity,
            s.visible.translate.x,
            s.visible.translate.y,
            s.visible.scale,
        )?;
    }
    Ok(())
}
