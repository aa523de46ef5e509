use std::fs;
use std::path::PathBuf;

use circle_grid::api::{
    GridOverlayConfig, GridOverlayEngine, HostContext, HostWidget, MountPoint, PointerEvent,
    ShapeVariant,
};
use circle_grid::core::SurfaceSize;
use circle_grid::interaction::ManualTaskScheduler;
use circle_grid::render::CairoRenderer;

const DEFAULT_OUTPUT_PATH: &str = "grid_overlay.png";

struct CliArgs {
    width: u32,
    height: Option<u32>,
    limit_x: f64,
    limit_y: Option<f64>,
    circles_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
    static_variant: bool,
    click: Option<(f64, f64)>,
    output_path: PathBuf,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let _ = circle_grid::telemetry::init_default_tracing();
    let args = parse_args()?;

    let mut config = match &args.config_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read config `{}`: {err}", path.display()))?;
            GridOverlayConfig::from_json_str(&raw).map_err(|err| err.to_string())?
        }
        None => GridOverlayConfig::default(),
    };
    if args.static_variant {
        config = config.with_variant(ShapeVariant::Static);
    }

    let height = args.height.unwrap_or(args.width);
    let mut context = HostContext::default()
        .with_surface(args.width, height)
        .with_axis_limits(args.limit_x, args.limit_y.unwrap_or(args.limit_x));
    context = match &args.circles_path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|err| format!("failed to read circles `{}`: {err}", path.display()))?;
            context.with_circles_json(raw)
        }
        None if config.variant == ShapeVariant::Static => context.with_builtin_circles(),
        None => context,
    };

    let surface = SurfaceSize::new(args.width, height).clamped_to(config.min_surface_px);
    let width = i32::try_from(surface.width).map_err(|err| err.to_string())?;
    let height = i32::try_from(surface.height).map_err(|err| err.to_string())?;

    let renderer = CairoRenderer::new(width, height).map_err(|err| err.to_string())?;
    let mut engine = GridOverlayEngine::new(renderer, ManualTaskScheduler::new(), config)
        .map_err(|err| err.to_string())?;
    engine
        .initialize(&context, Box::new(|| {}), None, &MountPoint::new("png"))
        .map_err(|err| err.to_string())?;
    if let Some((x, y)) = args.click {
        engine
            .pointer_click(PointerEvent::new(x, y))
            .map_err(|err| err.to_string())?;
    }

    engine
        .renderer()
        .write_png(&args.output_path)
        .map_err(|err| err.to_string())?;
    println!(
        "wrote {} ({} circles, unit size {} px)",
        args.output_path.display(),
        engine.circles().len(),
        engine.metrics().map_or(0, |metrics| metrics.unit_size())
    );
    engine.teardown();
    Ok(())
}

fn parse_args() -> Result<CliArgs, String> {
    let mut parsed = CliArgs {
        width: 400,
        height: None,
        limit_x: 1.0,
        limit_y: None,
        circles_path: None,
        config_path: None,
        static_variant: false,
        click: None,
        output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| {
            args.next()
                .ok_or_else(|| format!("missing value for {name}"))
        };
        match arg.as_str() {
            "--width" => parsed.width = parse_number(&value("--width")?, "--width")?,
            "--height" => parsed.height = Some(parse_number(&value("--height")?, "--height")?),
            "--limit-x" => parsed.limit_x = parse_number(&value("--limit-x")?, "--limit-x")?,
            "--limit-y" => parsed.limit_y = Some(parse_number(&value("--limit-y")?, "--limit-y")?),
            "--circles" => parsed.circles_path = Some(PathBuf::from(value("--circles")?)),
            "--config" => parsed.config_path = Some(PathBuf::from(value("--config")?)),
            "--output" => parsed.output_path = PathBuf::from(value("--output")?),
            "--static" => parsed.static_variant = true,
            "--click" => {
                let raw = value("--click")?;
                let (x, y) = raw
                    .split_once(',')
                    .ok_or_else(|| format!("--click expects `x,y`, got `{raw}`"))?;
                parsed.click = Some((parse_number(x, "--click")?, parse_number(y, "--click")?));
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
    Ok(parsed)
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, String> {
    raw.trim()
        .parse()
        .map_err(|_| format!("invalid value `{raw}` for {flag}"))
}

fn usage_message() -> &'static str {
    "usage: render_grid_png [--width PX] [--height PX] [--limit-x L] [--limit-y L] \
     [--circles FILE.json] [--config FILE.json] [--static] [--click X,Y] [--output FILE.png]"
}
