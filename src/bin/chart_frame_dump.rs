use std::fs;
use std::path::PathBuf;

use table_chart_rs::api::{ApplyStatus, ChartConfig, ChartEngine};
use table_chart_rs::render::NullRenderer;

#[derive(Debug)]
struct CliArgs {
    data_path: PathBuf,
    config_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    png_path: Option<PathBuf>,
}

fn main() {
    let _ = table_chart_rs::telemetry::init_default_tracing();
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let args = parse_args()?;

    let config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            ChartConfig::from_json_str(&raw).map_err(|err| format!("invalid config: {err}"))?
        }
        None => ChartConfig::default(),
    };
    let data = fs::read_to_string(&args.data_path).map_err(|err| {
        format!(
            "failed to read data `{}`: {err}",
            args.data_path.display()
        )
    })?;

    let mut engine = ChartEngine::new(NullRenderer::default(), config)
        .map_err(|err| format!("engine init failed: {err}"))?;
    match engine
        .set_json_data(&data)
        .map_err(|err| format!("failed to apply data: {err}"))?
    {
        ApplyStatus::Rendered { .. } => {}
        status => return Err(format!("unexpected apply status: {status:?}")),
    }

    let contract = engine
        .last_frame_json_contract_v1_pretty()
        .map_err(|err| format!("failed to export frame: {err}"))?
        .ok_or_else(|| "no frame was rendered".to_owned())?;
    match &args.output_path {
        Some(path) => fs::write(path, &contract)
            .map_err(|err| format!("failed to write `{}`: {err}", path.display()))?,
        None => println!("{contract}"),
    }

    if let Some(png_path) = &args.png_path {
        write_png(&engine, png_path)?;
    }
    Ok(())
}

#[cfg(feature = "cairo-backend")]
fn write_png(engine: &ChartEngine<NullRenderer>, path: &std::path::Path) -> Result<(), String> {
    use std::fs::File;
    use table_chart_rs::render::{CairoRenderer, Renderer};

    const MARGIN_LEFT_PX: i32 = 60;
    const MARGIN_TOP_PX: i32 = 40;
    const MARGIN_RIGHT_PX: i32 = 160;
    const MARGIN_BOTTOM_PX: i32 = 40;

    let frame = engine
        .last_frame()
        .ok_or_else(|| "no frame was rendered".to_owned())?;
    let width = i32::try_from(frame.viewport.width)
        .map_err(|_| "viewport width overflows i32".to_owned())?;
    let height = i32::try_from(frame.viewport.height)
        .map_err(|_| "viewport height overflows i32".to_owned())?;

    let mut renderer = CairoRenderer::new(
        width + MARGIN_LEFT_PX + MARGIN_RIGHT_PX,
        height + MARGIN_TOP_PX + MARGIN_BOTTOM_PX,
    )
    .map_err(|err| format!("renderer init failed: {err}"))?
    .with_content_offset(f64::from(MARGIN_LEFT_PX), f64::from(MARGIN_TOP_PX));
    renderer
        .render(frame)
        .map_err(|err| format!("render failed: {err}"))?;

    let mut file = File::create(path)
        .map_err(|err| format!("failed to create png `{}`: {err}", path.display()))?;
    renderer
        .surface()
        .write_to_png(&mut file)
        .map_err(|err| format!("failed to write png `{}`: {err}", path.display()))
}

#[cfg(not(feature = "cairo-backend"))]
fn write_png(_engine: &ChartEngine<NullRenderer>, _path: &std::path::Path) -> Result<(), String> {
    Err("--png requires feature `cairo-backend`".to_owned())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut data_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut output_path: Option<PathBuf> = None;
    let mut png_path: Option<PathBuf> = None;

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--data" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --data".to_owned())?;
                data_path = Some(PathBuf::from(value));
            }
            "--config" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --config".to_owned())?;
                config_path = Some(PathBuf::from(value));
            }
            "--output" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --output".to_owned())?;
                output_path = Some(PathBuf::from(value));
            }
            "--png" => {
                let value = args
                    .next()
                    .ok_or_else(|| "missing value for --png".to_owned())?;
                png_path = Some(PathBuf::from(value));
            }
            "--help" | "-h" => {
                println!("{}", usage_message());
                std::process::exit(0);
            }
            _ => {
                return Err(format!("unknown argument `{arg}`\n\n{}", usage_message()));
            }
        }
    }

    let data_path =
        data_path.ok_or_else(|| format!("--data is required\n\n{}", usage_message()))?;
    Ok(CliArgs {
        data_path,
        config_path,
        output_path,
        png_path,
    })
}

fn usage_message() -> &'static str {
    "Usage: cargo run --bin chart_frame_dump -- --data <path> [options]\n\nOptions:\n  --data <path>     JSON dataset (title, categories, rows)\n  --config <path>   JSON chart config (defaults apply to missing fields)\n  --output <path>   Write the frame contract here instead of stdout\n  --png <path>      Also render a PNG (requires feature `cairo-backend`)\n  -h, --help        Show this message"
}
