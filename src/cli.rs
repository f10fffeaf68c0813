use crate::config::load_config;
use crate::ir::Graph;
use crate::layout_dump::write_layout_dump;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::session::Session;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "stackflow", version, about = "Render a JSON node/edge graph as a vertical flow diagram")]
pub struct Args {
    /// Input JSON file or '-' for stdin
    #[arg(short = 'i', long = "input", conflicts_with = "example")]
    pub input: Option<PathBuf>,

    /// Render the built-in example graph instead of reading input
    #[arg(long = "example")]
    pub example: bool,

    /// Print the built-in example graph as JSON and exit
    #[arg(long = "printExample")]
    pub print_example: bool,

    /// Output file (svg/png). Defaults to stdout for SVG if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme, themeVariables, layout, render)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Measured container width; omitted or 0 uses the layout fallback
    #[arg(short = 'w', long = "width")]
    pub width: Option<f32>,

    /// Measured container height; omitted or 0 uses the layout fallback
    #[arg(short = 'H', long = "height")]
    pub height: Option<f32>,

    /// Write the computed layout as JSON to this path
    #[arg(long = "dumpLayout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn run() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    if args.print_example {
        println!("{}", serde_json::to_string_pretty(&Graph::default_example())?);
        return Ok(());
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(width) = args.width {
        config.render.width = width;
    }
    if let Some(height) = args.height {
        config.render.height = height;
    }
    let render_config = config.render.clone();
    let mut session = Session::new(config, render_config.container());

    if !args.example {
        let input = read_input(args.input.as_deref())?;
        session.render_text(&input)?;
    }
    eprintln!("{}", session.status().message);

    let svg = render_svg(session.surface(), session.theme());
    match args.output_format {
        OutputFormat::Svg => {
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let output = ensure_output(&args.output, "png")?;
            write_output_png(&svg, &output, &render_config)?;
        }
    }

    if let Some(path) = args.dump_layout.as_deref()
        && let (Some(layout), Some(graph)) = (session.layout(), session.graph())
    {
        write_layout_dump(path, layout, graph)?;
        tracing::info!(path = %path.display(), "wrote layout dump");
    }

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path
        && path != Path::new("-")
    {
        return Ok(std::fs::read_to_string(path)?);
    }

    let mut buf = String::new();
    io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

fn ensure_output(output: &Option<PathBuf>, ext: &str) -> Result<PathBuf> {
    if let Some(path) = output {
        return Ok(path.clone());
    }
    Err(anyhow::anyhow!("Output path required for {} output", ext))
}
