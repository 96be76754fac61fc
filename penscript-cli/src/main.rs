//! `PenScript` CLI: run drawing scripts and write the result as SVG.

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use penscript_core::config::{Config, DEFAULT_MAX_LOOP_COUNT};
use penscript_core::error::ScriptError;
use penscript_core::interpreter::Interpreter;
use penscript_svg::{RenderOptions, render_with_options};

#[derive(Parser)]
#[command(version, about = "PenScript: run line-oriented drawing scripts and output SVG")]
struct Cli {
    /// Script file to run
    file: Option<String>,

    /// Run the given script text instead of reading a file
    #[arg(short = 'e', long = "eval")]
    eval: Option<String>,

    /// Read commands from standard input one line at a time
    #[arg(short, long, conflicts_with_all = ["file", "eval"])]
    interactive: bool,

    /// Output directory for the SVG file
    #[arg(short, long, default_value = ".")]
    output: String,

    /// Canvas width; the drawing area hugs the picture when unset
    #[arg(long, requires = "height")]
    width: Option<f64>,

    /// Canvas height
    #[arg(long, requires = "width")]
    height: Option<f64>,

    /// Outline width for every shape
    #[arg(long)]
    stroke_width: Option<f64>,

    /// Largest iteration count accepted by `loop`
    #[arg(long, default_value_t = DEFAULT_MAX_LOOP_COUNT)]
    max_loop_count: u32,

    /// Stop at the first line that fails
    #[arg(long)]
    halt_on_error: bool,

    /// Log engine activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Install the stderr log subscriber. `RUST_LOG` takes precedence over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::default().with_max_loop_count(cli.max_loop_count);
    let mut interp = Interpreter::new().with_config(config);

    let failed = if cli.interactive {
        run_interactive(&mut interp, cli.halt_on_error)
    } else {
        let source = read_source(&cli);
        run_source(&mut interp, &source, cli.halt_on_error)
    };

    write_output(interp, &cli);

    if failed {
        process::exit(1);
    }
}

fn read_source(cli: &Cli) -> String {
    if let Some(ref text) = cli.eval {
        return text.clone();
    }
    if let Some(ref file) = cli.file {
        match fs::read_to_string(file) {
            Ok(s) => return s,
            Err(e) => {
                eprintln!("Error reading {file}: {e}");
                process::exit(1);
            }
        }
    }
    eprintln!("No input file or script specified");
    process::exit(1);
}

/// Run a whole script, printing diagnostics afterwards. Returns whether any
/// line failed.
fn run_source(interp: &mut Interpreter, source: &str, halt_on_error: bool) -> bool {
    if halt_on_error {
        for line in source.lines() {
            if interp.execute_line(line).is_err() {
                break;
            }
        }
        interp.finish();
    } else {
        // Every error is also kept in `errors()`.
        let _ = interp.run(source);
    }

    print_diagnostics(interp.errors());
    !interp.errors().is_empty()
}

/// Execute lines from stdin as they arrive, reporting errors immediately.
fn run_interactive(interp: &mut Interpreter, halt_on_error: bool) -> bool {
    let mut failed = false;
    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("Error reading standard input: {e}");
                failed = true;
                break;
            }
        };
        if let Err(e) = interp.execute_line(&line) {
            failed = true;
            print_diagnostics(&interp.take_errors());
            debug!(error = %e, "line failed");
            if halt_on_error {
                break;
            }
        }
    }

    interp.finish();
    let trailing = interp.take_errors();
    print_diagnostics(&trailing);
    failed || !trailing.is_empty()
}

fn print_diagnostics(errors: &[ScriptError]) {
    for err in errors {
        eprintln!("Error: {err}");
    }
}

fn write_output(interp: Interpreter, cli: &Cli) {
    let opts = RenderOptions {
        canvas: cli.width.zip(cli.height),
        stroke_width: cli.stroke_width,
        ..RenderOptions::default()
    };

    let filename = cli
        .file
        .as_deref()
        .and_then(|file| Path::new(file).file_stem())
        .and_then(|s| s.to_str())
        .map_or_else(|| "output.svg".to_owned(), |stem| format!("{stem}.svg"));

    let picture = interp.into_surface();
    let svg_str = render_with_options(&picture, &opts).to_string();
    write_svg(&cli.output, &filename, &svg_str);
}

fn write_svg(output_dir: &str, filename: &str, content: &str) {
    let path = Path::new(output_dir).join(filename);
    match fs::write(&path, content) {
        Ok(()) => {
            eprintln!("Wrote {}", path.display());
        }
        Err(e) => {
            eprintln!("Error writing {}: {e}", path.display());
            process::exit(1);
        }
    }
}
