//! # Hallways Main Entry Point
//!
//! Parses arguments, generates a layout and prints it, or opens a preview
//! window with `--window`.

use clap::Parser;
use hallways::config::{DEFAULT_FIELD_SIZE, DEFAULT_ZOOM};
use hallways::{
    render_ascii, run_preview, window_conf, GenerationConfig, Generator, HallwayGenerator,
    HallwaysResult, Position,
};
use log::{info, warn};
use std::io::Write;

/// Command line arguments for the layout generator.
#[derive(Parser, Debug)]
#[command(name = "hallways")]
#[command(about = "Procedural room-and-hallway dungeon layouts")]
#[command(version)]
struct Args {
    /// Random seed for generation; drawn at random when omitted
    #[arg(short, long)]
    seed: Option<u64>,

    /// Width and height of the square field
    #[arg(long, default_value_t = DEFAULT_FIELD_SIZE)]
    size: u32,

    /// Smallest room edge length
    #[arg(long, default_value_t = 3)]
    min_room: u32,

    /// Room edge lengths stay below this
    #[arg(long, default_value_t = 7)]
    max_room: u32,

    /// Palette name to assign rooms from (repeatable)
    #[arg(long = "palette", value_name = "NAME")]
    palettes: Vec<String>,

    /// Nominal entrance as X,Y
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    entrance: Option<Position>,

    /// Nominal exit as X,Y
    #[arg(long, value_name = "X,Y", value_parser = parse_point)]
    exit: Option<Position>,

    /// Open a preview window instead of printing the layout
    #[arg(long)]
    window: bool,

    /// Preview pixels per cell
    #[arg(long, default_value_t = DEFAULT_ZOOM, value_parser = clap::value_parser!(u32).range(1..=64))]
    zoom: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn parse_point(value: &str) -> Result<Position, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| "expected format X,Y".to_string())?;
    let x = x
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid X coordinate: {}", e))?;
    let y = y
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid Y coordinate: {}", e))?;
    Ok(Position::new(x, y))
}

fn main() -> HallwaysResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting Hallways v{}", hallways::VERSION);

    let config = build_config(&args);
    let generator = HallwayGenerator::new();
    let layout = generator.generate_from_config(&config)?;
    if let Err(e) = generator.validate(&layout, &config) {
        warn!("Generated layout failed validation: {}", e);
    }

    if args.window {
        let grid = layout.into_grid();
        let conf = window_conf(&grid, args.zoom, "Hallways");
        let zoom = args.zoom;
        macroquad::Window::from_config(conf, async move {
            run_preview(grid, zoom).await;
        });
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", render_ascii(&layout.grid))?;
    writeln!(
        stdout,
        "seed {} | {} rooms | {} halls | {} disconnected",
        config.seed,
        layout.rooms.len(),
        layout.halls.len(),
        layout.disconnected.len()
    )?;
    Ok(())
}

/// Initializes env_logger; `RUST_LOG` takes precedence over `--log-level`.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

fn build_config(args: &Args) -> GenerationConfig {
    let seed = args.seed.unwrap_or_else(|| {
        let seed = rand::random::<u64>();
        info!("No seed given, using {}", seed);
        seed
    });

    let mut config = GenerationConfig::new(seed)
        .with_field_size(args.size)
        .with_room_size(args.min_room, args.max_room)
        .with_palettes(args.palettes.iter().cloned());
    if let Some(entrance) = args.entrance {
        config = config.with_entrance(entrance.x, entrance.y);
    }
    if let Some(exit) = args.exit {
        config = config.with_exit(exit.x, exit.y);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!(parse_point("3,4"), Ok(Position::new(3, 4)));
        assert_eq!(parse_point(" -1 , 7 "), Ok(Position::new(-1, 7)));
        assert!(parse_point("3").is_err());
        assert!(parse_point("a,4").is_err());
    }

    #[test]
    fn test_args_build_config() {
        let args = Args::parse_from([
            "hallways",
            "--seed",
            "9",
            "--size",
            "128",
            "--max-room",
            "6",
            "--palette",
            "clean",
            "--palette",
            "rough",
            "--entrance",
            "0,4",
            "--exit",
            "63,59",
        ]);
        let config = build_config(&args);
        assert_eq!(config.seed, 9);
        assert_eq!(config.field_size, 128);
        assert_eq!((config.min_room_size, config.max_room_size), (3, 6));
        assert_eq!(config.palettes, vec!["clean".to_string(), "rough".to_string()]);
        assert_eq!(config.entrance, Position::new(0, 4));
        assert_eq!(config.exit, Position::new(63, 59));
        assert!(!args.window);
        assert_eq!(args.zoom, DEFAULT_ZOOM);
    }
}
