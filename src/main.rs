use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use sheetsketch::{
    format_length_mm, init_logging, parse_number, Config, Point, PointerRelease,
    SettingsPersistence, SketchSession,
};

struct Args {
    stroke: PathBuf,
    config: Option<PathBuf>,
    scale: Option<f64>,
}

fn usage(program: &str) -> String {
    format!(
        "usage: {} <stroke.json> [--config <file>] [--scale <mm/px>]",
        program
    )
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "sheetsketch".to_string());

    let mut stroke = None;
    let mut config = None;
    let mut scale = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let value = args.next().with_context(|| usage(&program))?;
                config = Some(PathBuf::from(value));
            }
            "--scale" => {
                let value = args.next().with_context(|| usage(&program))?;
                let mm_per_px = parse_number(&value)
                    .with_context(|| format!("invalid scale '{}'", value))?;
                scale = Some(mm_per_px);
            }
            "-h" | "--help" => {
                println!("{}", usage(&program));
                std::process::exit(0);
            }
            _ if stroke.is_none() => stroke = Some(PathBuf::from(arg)),
            _ => bail!("unexpected argument '{}'\n{}", arg, usage(&program)),
        }
    }

    let stroke = stroke.with_context(|| usage(&program))?;
    Ok(Args {
        stroke,
        config,
        scale,
    })
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let persistence = match path {
        Some(path) => SettingsPersistence::load_from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => match SettingsPersistence::default_path() {
            Ok(default) => SettingsPersistence::load_or_default(&default)?,
            Err(err) => {
                tracing::warn!("{}; using default settings", err);
                SettingsPersistence::new()
            }
        },
    };
    Ok(persistence.config().clone())
}

fn read_stroke(path: &Path) -> anyhow::Result<Vec<Point>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading stroke {}", path.display()))?;
    let points: Vec<Point> = serde_json::from_str(&content)
        .with_context(|| format!("parsing stroke {}", path.display()))?;
    Ok(points)
}

fn main() -> anyhow::Result<()> {
    init_logging()?;
    tracing::debug!(
        "sheetsketch {} (built {})",
        sheetsketch::VERSION,
        sheetsketch::BUILD_DATE
    );

    let args = parse_args()?;
    let config = load_config(args.config.as_deref())?;
    let points = read_stroke(&args.stroke)?;

    let mut session = SketchSession::new(config.session_config());
    if let Some(mm_per_px) = args.scale {
        let applied = session.set_scale(mm_per_px);
        if applied != mm_per_px {
            tracing::warn!("Scale {} clamped to {}", mm_per_px, applied);
        }
    }

    let mut samples = points.into_iter();
    let Some(first) = samples.next() else {
        bail!("stroke {} has no points", args.stroke.display());
    };
    session.pointer_down(first);
    for p in samples {
        session.pointer_move(p);
    }

    match session.pointer_up() {
        PointerRelease::Committed {
            edge_count,
            total_length_mm,
        } => tracing::info!(
            "{} edges, {} developed length",
            edge_count,
            format_length_mm(total_length_mm as f64)
        ),
        other => bail!("stroke was not committed: {:?}", other),
    }

    let drawing = session.to_drawing()?;
    println!("{}", drawing.to_json()?);
    Ok(())
}
