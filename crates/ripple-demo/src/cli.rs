#![forbid(unsafe_code)]

//! Command-line argument parsing for the ripple demo.
//!
//! Parses args manually (no external dependencies) to keep the binary lean.
//! Supports environment variable overrides via `RIPPLE_DEMO_*` prefix.

use std::env;
use std::process;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP_TEXT: &str = "\
Ripple Demo — interactive water simulation in the terminal

USAGE:
    ripple-demo [OPTIONS]

OPTIONS:
    --fps=N              Target frames per second (default: 60)
    --seed=N             Background decoration seed (default: 1380536400)
    --no-mouse           Disable mouse event capture
    --exit-after-ms=N    Auto-quit after N milliseconds (for testing)
    --help, -h           Show this help message
    --version, -V        Show version

KEYBINDINGS:
    click / drag     Drop a ripple under the cursor
    Space            Drop a ripple at the center
    q / Esc / Ctrl+C Quit

ENVIRONMENT VARIABLES:
    RIPPLE_DEMO_FPS            Override --fps
    RIPPLE_DEMO_SEED           Override --seed
    RIPPLE_DEMO_EXIT_AFTER_MS  Override --exit-after-ms
    RIPPLE_DEMO_LOG            When set, a log filter; logs go to stderr";

/// Parsed command-line options.
pub struct Opts {
    /// Target frame rate.
    pub fps: u32,
    /// Seed for the background decoration scatter.
    pub seed: u32,
    /// Whether mouse events are enabled.
    pub mouse: bool,
    /// Auto-exit after this many milliseconds (0 = disabled).
    pub exit_after_ms: u64,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            fps: 60,
            seed: ripple::DEFAULT_SEED,
            mouse: true,
            exit_after_ms: 0,
        }
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables.
    ///
    /// Environment variables take precedence over defaults but are overridden
    /// by explicit command-line flags.
    pub fn parse() -> Self {
        let mut opts = Self::default();

        // Apply environment variable defaults first
        if let Ok(val) = env::var("RIPPLE_DEMO_FPS")
            && let Ok(n) = val.parse()
        {
            opts.fps = n;
        }
        if let Ok(val) = env::var("RIPPLE_DEMO_SEED")
            && let Ok(n) = val.parse()
        {
            opts.seed = n;
        }
        if let Ok(val) = env::var("RIPPLE_DEMO_EXIT_AFTER_MS")
            && let Ok(n) = val.parse()
        {
            opts.exit_after_ms = n;
        }

        // Parse command-line args (override env vars)
        let args: Vec<String> = env::args().skip(1).collect();
        for arg in &args {
            match arg.as_str() {
                "--help" | "-h" => {
                    println!("{HELP_TEXT}");
                    process::exit(0);
                }
                "--version" | "-V" => {
                    println!("ripple-demo {VERSION}");
                    process::exit(0);
                }
                "--no-mouse" => {
                    opts.mouse = false;
                }
                other => {
                    if let Some(val) = other.strip_prefix("--fps=") {
                        match val.parse() {
                            Ok(n) => opts.fps = n,
                            Err(_) => {
                                eprintln!("Invalid --fps value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--seed=") {
                        match val.parse() {
                            Ok(n) => opts.seed = n,
                            Err(_) => {
                                eprintln!("Invalid --seed value: {val}");
                                process::exit(1);
                            }
                        }
                    } else if let Some(val) = other.strip_prefix("--exit-after-ms=") {
                        match val.parse() {
                            Ok(n) => opts.exit_after_ms = n,
                            Err(_) => {
                                eprintln!("Invalid --exit-after-ms value: {val}");
                                process::exit(1);
                            }
                        }
                    } else {
                        eprintln!("Unknown argument: {other}");
                        eprintln!("Run with --help for usage information.");
                        process::exit(1);
                    }
                }
            }
        }

        opts
    }
}
