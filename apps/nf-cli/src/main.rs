use clap::{Parser, Subcommand, ValueEnum};
use nf_area::{AreaConfig, Transform};
use nf_controls::ProgressControl;
use nf_core::ControlId;
use nf_render::View;
use nf_render::widgets::progress;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod demo;
mod error;

use demo::DemoOptions;
use error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "nf-cli")]
#[command(about = "nodeflow CLI - build and drive a node editor scene", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the demo scene, drive its controls and print the rendered node
    Demo {
        /// Set the input to this value programmatically
        #[arg(long)]
        set: Option<f64>,
        /// Type this text into the input
        #[arg(long)]
        edit: Option<String>,
        /// Click Randomize this many times
        #[arg(long, default_value_t = 0)]
        clicks: u32,
        /// Seed for Randomize
        #[arg(long, default_value_t = 42)]
        seed: u64,
        #[arg(long, value_enum, default_value_t = Format::Markup)]
        format: Format,
        /// Canvas config (YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render a standalone radial progress indicator
    Progress {
        /// Percent to show; omitted renders as unset
        #[arg(long)]
        percent: Option<f64>,
        #[arg(long, value_enum, default_value_t = Format::Markup)]
        format: Format,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Markup,
    Json,
}

#[derive(Serialize)]
struct SceneOutput<'a> {
    transform: Transform,
    node: &'a View,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Demo {
            set,
            edit,
            clicks,
            seed,
            format,
            config,
        } => cmd_demo(
            &DemoOptions {
                set,
                edit,
                clicks,
                seed,
            },
            format,
            config.as_deref(),
        ),
        Commands::Progress { percent, format } => cmd_progress(percent, format),
    };

    if let Err(err) = result {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> CliResult<AreaConfig> {
    let Some(path) = path else {
        return Ok(AreaConfig::default());
    };
    let text = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

fn cmd_demo(options: &DemoOptions, format: Format, config: Option<&Path>) -> CliResult<()> {
    let config = load_config(config)?;
    let mut scene = demo::build(config, options.seed)?;
    demo::run(&mut scene, options)?;

    let view = scene.area.node_view(scene.node).unwrap_or(View::Empty);
    match format {
        Format::Markup => println!("{}", view.to_markup()),
        Format::Json => {
            let output = SceneOutput {
                transform: scene.area.transform(),
                node: &view,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

fn cmd_progress(percent: Option<f64>, format: Format) -> CliResult<()> {
    let control = match percent {
        Some(p) => ProgressControl::new(p),
        None => ProgressControl::unset(),
    };
    let view = progress::render(ControlId::from_index(0), &control.into());
    match format {
        Format::Markup => println!("{}", view.to_markup()),
        Format::Json => println!("{}", serde_json::to_string_pretty(&view)?),
    }
    Ok(())
}
