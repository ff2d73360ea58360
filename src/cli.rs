// Command-line front end for rasterdelta.
//
// Loads two raw frame dumps and a changed-range list, classifies and ranks
// the ranges, and prints the resulting order. Range detection itself is
// left to whatever produced the list.

use std::path::{Path, PathBuf};
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::{self, CodecConfig, PRESETS};
use crate::delta::{StartOrder, Verbosity};
use crate::frame::FramePair;
use crate::io::{self, FrameStats, IoError};

const DEFAULT_MODE: &str = "cga-hires";

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Frame-delta classifier and priority ranker.
#[derive(Parser, Debug)]
#[command(
    name = "rasterdelta",
    version,
    about = "Classify and rank frame deltas for constrained raster displays",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Quiet mode (suppress the delta listing).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Classify a frame's changed ranges and print them in replay order.
    Rank(RankArgs),
    /// List the built-in display-mode presets.
    Modes,
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct RankArgs {
    /// Previous frame (raw buffer dump).
    #[arg(long, value_name = "FILE")]
    prev: PathBuf,

    /// Next frame (raw buffer dump).
    #[arg(long, value_name = "FILE")]
    next: PathBuf,

    /// Changed-range list, one `start end` pair per line.
    #[arg(long, value_name = "FILE")]
    ranges: PathBuf,

    /// Display-mode preset.
    #[arg(short = 'm', long, default_value = DEFAULT_MODE)]
    mode: String,

    /// Override the minimum run length.
    #[arg(long, value_name = "BYTES")]
    min_run: Option<usize>,

    /// Override bits per pixel.
    #[arg(long, value_name = "BITS")]
    bits_per_pixel: Option<u8>,

    /// Disable interlace-compensated tie-breaking.
    #[arg(long)]
    no_interlace: bool,

    /// Run split recovery this many times before printing.
    #[arg(long, default_value_t = 0, value_name = "N")]
    split_passes: u32,

    /// Print in start-offset order instead of priority order.
    #[arg(long)]
    start_order: bool,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Rank {
        prev: PathBuf,
        next: PathBuf,
        ranges: PathBuf,
    },
    Modes,
    Config,
}

struct Options {
    command: Command,
    quiet: bool,
    verbose: u8,
    json_output: bool,
    mode: String,
    min_run: Option<usize>,
    bits_per_pixel: Option<u8>,
    no_interlace: bool,
    split_passes: u32,
    start_order: bool,
}

fn resolve_options(cli: Cli) -> Options {
    let mut opts = Options {
        command: Command::Config,
        quiet: cli.quiet,
        verbose: cli.verbose.min(2),
        json_output: cli.json_output,
        mode: DEFAULT_MODE.to_string(),
        min_run: None,
        bits_per_pixel: None,
        no_interlace: false,
        split_passes: 0,
        start_order: false,
    };

    match cli.command {
        Cmd::Rank(args) => {
            opts.command = Command::Rank {
                prev: args.prev,
                next: args.next,
                ranges: args.ranges,
            };
            opts.mode = args.mode;
            opts.min_run = args.min_run;
            opts.bits_per_pixel = args.bits_per_pixel;
            opts.no_interlace = args.no_interlace;
            opts.split_passes = args.split_passes;
            opts.start_order = args.start_order;
        }
        Cmd::Modes => opts.command = Command::Modes,
        Cmd::Config => opts.command = Command::Config,
    }
    opts
}

fn build_codec_config(opts: &Options) -> Result<CodecConfig, String> {
    let mut cfg = config::config_for_mode(&opts.mode)
        .ok_or_else(|| format!("unknown mode '{}' (see `rasterdelta modes`)", opts.mode))?;
    if let Some(min_run) = opts.min_run {
        cfg.min_run_length = min_run;
    }
    if let Some(bpp) = opts.bits_per_pixel {
        cfg.bits_per_pixel = bpp;
    }
    if opts.no_interlace {
        cfg.interlace_compensation = false;
    }
    cfg.validate().map_err(|e| e.to_string())?;
    Ok(cfg)
}

// ---------------------------------------------------------------------------
// Rank command
// ---------------------------------------------------------------------------

fn cmd_rank(opts: &Options, prev: &Path, next: &Path, ranges: &Path) -> i32 {
    let cfg = match build_codec_config(opts) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("rasterdelta: {e}");
            return 1;
        }
    };

    match rank(opts, &cfg, prev, next, ranges) {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("rasterdelta: {e}");
            1
        }
    }
}

fn rank(
    opts: &Options,
    cfg: &CodecConfig,
    prev_path: &Path,
    next_path: &Path,
    ranges_path: &Path,
) -> Result<(), IoError> {
    let prev = io::load_frame(prev_path, cfg.buffer_size)?;
    let next = io::load_frame(next_path, cfg.buffer_size)?;
    let frames = FramePair::new(&prev, &next, cfg.buffer_size)?;
    let ranges = io::read_ranges(ranges_path)?;
    log::info!(
        "mode {}: {} ranges from {}",
        cfg.name,
        ranges.len(),
        ranges_path.display()
    );

    let mut list = io::build_priority_list(&frames, &ranges, cfg)?;
    for pass in 0..opts.split_passes {
        let split = list.split_all(&frames, cfg)?;
        log::info!("split pass {}: {split} deltas bisected", pass + 1);
    }

    let verbosity = if opts.verbose > 0 {
        Verbosity::High
    } else {
        Verbosity::Normal
    };
    list.log_dump(verbosity);

    let stats = FrameStats::collect(&list);
    let lines = if opts.start_order {
        list.reorder(StartOrder).dump_lines(verbosity)
    } else {
        list.dump_lines(verbosity)
    };
    if !opts.quiet {
        for line in lines {
            println!("{line}");
        }
    }

    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "rasterdelta: {} deltas ({} runs, {} slices), {} bytes, {:.2} cycles",
            stats.deltas, stats.runs, stats.slices, stats.total_bytes, stats.total_cost
        );
    }

    if opts.json_output {
        let json = serde_json::json!({
            "command": "rank",
            "mode": cfg.name,
            "deltas": stats.deltas,
            "runs": stats.runs,
            "slices": stats.slices,
            "frozen": stats.frozen,
            "total_bytes": stats.total_bytes,
            "total_cost": stats.total_cost,
            "split_passes": opts.split_passes,
        });
        match serde_json::to_string_pretty(&json) {
            Ok(s) => eprintln!("{s}"),
            Err(e) => log::error!("failed to serialize stats: {e}"),
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Modes / config commands
// ---------------------------------------------------------------------------

fn cmd_modes() -> i32 {
    for p in PRESETS {
        let mask = p
            .interlace_mask()
            .map_or_else(|| "none".to_string(), |m| format!("{m:#06X}"));
        println!(
            "{:<14} buffer={:<6} bpp={} min_run={} interlace_mask={mask}",
            p.name, p.buffer_size, p.bits_per_pixel, p.min_run_length
        );
    }
    0
}

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("rasterdelta version {version}");
    eprintln!("DEFAULT_MODE={DEFAULT_MODE}");
    eprintln!("DEFAULT_MIN_RUN_LENGTH={}", config::DEFAULT_MIN_RUN_LENGTH);
    eprintln!("COPY_UNIT_COST={}", config::COPY_UNIT_COST);
    eprintln!("FILL_UNIT_COST={}", config::FILL_UNIT_COST);
    eprintln!("SUPPORTED_BIT_DEPTHS={:?}", config::SUPPORTED_BIT_DEPTHS);
    eprintln!("sizeof(usize)={}", std::mem::size_of::<usize>());
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point.
pub fn run() -> ! {
    let cli = Cli::parse();

    let default_filter = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = resolve_options(cli);
    let exit_code = match &opts.command {
        Command::Rank { prev, next, ranges } => cmd_rank(&opts, prev, next, ranges),
        Command::Modes => cmd_modes(),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("rasterdelta".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    #[test]
    fn rank_subcommand_maps_correctly() {
        let opts = parse_opts(&[
            "-v",
            "rank",
            "--prev",
            "a.bin",
            "--next",
            "b.bin",
            "--ranges",
            "r.txt",
            "--mode",
            "mcga",
            "--split-passes",
            "2",
            "--start-order",
        ]);
        assert_eq!(
            opts.command,
            Command::Rank {
                prev: PathBuf::from("a.bin"),
                next: PathBuf::from("b.bin"),
                ranges: PathBuf::from("r.txt"),
            }
        );
        assert_eq!(opts.verbose, 1);
        assert_eq!(opts.mode, "mcga");
        assert_eq!(opts.split_passes, 2);
        assert!(opts.start_order);
    }

    #[test]
    fn rank_requires_inputs() {
        let argv = ["rasterdelta", "rank", "--prev", "a.bin"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn verbose_is_capped() {
        let opts = parse_opts(&["-v", "-v", "-v", "modes"]);
        assert_eq!(opts.verbose, 2);
        assert_eq!(opts.command, Command::Modes);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let argv = ["rasterdelta", "-q", "-v", "config"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn codec_overrides_apply() {
        let opts = parse_opts(&[
            "rank",
            "--prev",
            "a",
            "--next",
            "b",
            "--ranges",
            "r",
            "--min-run",
            "4",
            "--bits-per-pixel",
            "4",
            "--no-interlace",
        ]);
        let cfg = build_codec_config(&opts).unwrap();
        assert_eq!(cfg.name, "cga-hires");
        assert_eq!(cfg.min_run_length, 4);
        assert_eq!(cfg.bits_per_pixel, 4);
        assert_eq!(cfg.interlace_mask(), None);
    }

    #[test]
    fn bad_mode_and_depth_are_rejected() {
        let opts = parse_opts(&[
            "rank", "--prev", "a", "--next", "b", "--ranges", "r", "--mode", "vga-x",
        ]);
        assert!(build_codec_config(&opts).unwrap_err().contains("unknown mode"));

        let opts = parse_opts(&[
            "rank",
            "--prev",
            "a",
            "--next",
            "b",
            "--ranges",
            "r",
            "--bits-per-pixel",
            "2",
        ]);
        assert!(build_codec_config(&opts).unwrap_err().contains("bit depth"));
    }
}
