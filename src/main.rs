//! Ortho Router CLI
//!
//! Usage:
//!   ortho-router [OPTIONS] [FILE]
//!
//! Options:
//!   -f, --format <FORMAT>    Output format: svg or json
//!   --rtl                    Resolve start/end sides right-to-left
//!   -r, --corner-radius <R>  Round connector corners
//!   -d, --debug              Print routing details to stderr
//!   -h, --help               Print help

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use ortho_router::{render_with_config, route_scene, RenderConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// SVG drawing of boxes and connectors
    Svg,
    /// Routed segments and flags per line
    Json,
}

#[derive(Parser)]
#[command(name = "ortho-router")]
#[command(about = "Route orthogonal connectors between boxes")]
struct Cli {
    /// Scene file in TOML (reads from stdin if not provided)
    input: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Svg)]
    format: OutputFormat,

    /// Resolve start/end sides right-to-left
    #[arg(long)]
    rtl: bool,

    /// Corner radius for connectors
    #[arg(short = 'r', long)]
    corner_radius: Option<f64>,

    /// Debug mode: print attempts and segments for every line
    #[arg(short, long)]
    debug: bool,
}

fn main() {
    let cli = Cli::parse();

    let (source, filename) = match &cli.input {
        Some(path) => match fs::read_to_string(path) {
            Ok(content) => (content, path.display().to_string()),
            Err(e) => {
                eprintln!("Error reading file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => {
            let mut buffer = String::new();
            match io::stdin().read_to_string(&mut buffer) {
                Ok(_) => (buffer, "<stdin>".to_string()),
                Err(e) => {
                    eprintln!("Error reading from stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
    };

    let mut config = RenderConfig::new().with_debug(cli.debug);
    if cli.rtl {
        config = config.with_rtl(true);
    }
    if let Some(radius) = cli.corner_radius {
        config = config.with_corner_radius(radius);
    }

    let output = match cli.format {
        OutputFormat::Svg => render_with_config(&source, config),
        OutputFormat::Json => route_scene(&source, &config).map(|lines| {
            serde_json::to_string_pretty(&lines).unwrap_or_else(|e| {
                eprintln!("Error writing JSON: {}", e);
                std::process::exit(1);
            })
        }),
    };

    match output {
        Ok(text) => println!("{}", text),
        Err(e) => {
            eprintln!("{}", e.format(&source, &filename));
            std::process::exit(1);
        }
    }
}
