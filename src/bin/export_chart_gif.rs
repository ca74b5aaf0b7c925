use std::fs;
use std::path::PathBuf;

use chart_motion::api::{BlobSink, ExportSettings, FileBlobSink, export_filename, export_gif};
use chart_motion::core::{Chart, Viewport};

const DEFAULT_OUTPUT_DIR: &str = "target/chart-exports";

#[derive(Debug)]
struct CliArgs {
    chart_path: PathBuf,
    output_dir: PathBuf,
    font_path: Option<PathBuf>,
    settings_path: Option<PathBuf>,
    viewport: Viewport,
}

fn main() {
    let _ = chart_motion::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;
    let raw = fs::read_to_string(&args.chart_path)
        .map_err(|err| format!("failed to read `{}`: {err}", args.chart_path.display()))?;
    let chart = Chart::from_json_str(&raw).map_err(|err| format!("invalid chart: {err}"))?;

    let settings = match &args.settings_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read `{}`: {err}", path.display()))?;
            serde_json::from_str::<ExportSettings>(&raw)
                .map_err(|err| format!("invalid export settings: {err}"))?
        }
        None => ExportSettings::default(),
    };

    let font = match &args.font_path {
        Some(path) => Some(
            fs::read(path).map_err(|err| format!("failed to read `{}`: {err}", path.display()))?,
        ),
        None => None,
    };

    let mut last_percent = 0;
    let blob = export_gif(&chart, args.viewport, settings, font, |progress| {
        let percent = (progress * 100.0).round() as u32;
        if percent >= last_percent + 10 || percent == 100 {
            println!("encoding {percent}%");
            last_percent = percent;
        }
    })
    .map_err(|err| format!("export failed: {err}"))?;

    let filename = export_filename(&chart.title);
    let mut sink = FileBlobSink::new(&args.output_dir);
    sink.deliver(&blob, &filename)
        .map_err(|err| format!("failed to write export: {err}"))?;

    println!(
        "wrote {} bytes to {}",
        blob.len(),
        args.output_dir.join(&filename).display()
    );
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut chart_path: Option<PathBuf> = None;
    let mut output_dir = PathBuf::from(DEFAULT_OUTPUT_DIR);
    let mut font_path: Option<PathBuf> = None;
    let mut settings_path: Option<PathBuf> = None;
    let mut viewport = Viewport::default_canvas();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        };
        match arg.as_str() {
            "--out" => output_dir = PathBuf::from(value("--out")?),
            "--font" => font_path = Some(PathBuf::from(value("--font")?)),
            "--settings" => settings_path = Some(PathBuf::from(value("--settings")?)),
            "--size" => viewport = parse_size(&value("--size")?)?,
            "-h" | "--help" => {
                println!(
                    "Usage: cargo run --bin export_chart_gif -- <chart.json> [--out <dir>] [--font <ttf>] [--settings <json>] [--size <W>x<H>]"
                );
                std::process::exit(0);
            }
            _ if arg.starts_with('-') => {
                return Err(format!("unknown argument `{arg}`"));
            }
            _ => {
                if chart_path.replace(PathBuf::from(&arg)).is_some() {
                    return Err(format!("unexpected extra argument `{arg}`"));
                }
            }
        }
    }

    Ok(CliArgs {
        chart_path: chart_path.ok_or_else(|| "missing chart json path".to_owned())?,
        output_dir,
        font_path,
        settings_path,
        viewport,
    })
}

fn parse_size(raw: &str) -> Result<Viewport, String> {
    let (width, height) = raw
        .split_once('x')
        .ok_or_else(|| format!("size must look like 600x400, got `{raw}`"))?;
    let width = width
        .parse::<u32>()
        .map_err(|err| format!("invalid width `{width}`: {err}"))?;
    let height = height
        .parse::<u32>()
        .map_err(|err| format!("invalid height `{height}`: {err}"))?;
    let viewport = Viewport::new(width, height);
    if !viewport.is_valid() {
        return Err(format!("size must be non-zero, got `{raw}`"));
    }
    Ok(viewport)
}
