use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use log::{error, info, warn};

use sierpinski_turtle::{
    BoundaryPolicy, ImageFormat, RandomColors, RenderConfig, Result, parse_depth, save, sierpinski,
};

/// Draw a Sierpinski gasket with a turtle and export it as an image
#[derive(Parser, Debug)]
#[command(name = "sierpinski_turtle", version)]
struct Args {
    /// Recursion depth, 0 draws a single triangle. Asked for when omitted.
    #[arg(short, long, allow_hyphen_values = true)]
    depth: Option<String>,

    /// JSON render configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format, inferred from the output extension by default
    #[arg(long, value_enum)]
    format: Option<ImageFormat>,

    /// Seed for the random edge colors
    #[arg(long)]
    seed: Option<u64>,

    /// Side of the square canvas in pixels
    #[arg(long)]
    size: Option<usize>,

    /// Outer side length of the gasket
    #[arg(long)]
    side: Option<u32>,

    /// Pen thickness in pixels
    #[arg(long)]
    thickness: Option<u32>,

    /// Fail instead of clipping when a stroke leaves the canvas
    #[arg(long)]
    strict: bool,

    /// Show the finished image in a window
    #[cfg(feature = "preview")]
    #[arg(long)]
    preview: bool,
}

impl Args {
    fn apply(&self, config: &mut RenderConfig) -> Result<()> {
        if let Some(depth) = &self.depth {
            config.depth = Some(parse_depth(depth)?);
        }
        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if self.format.is_some() {
            config.format = self.format;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        if let Some(size) = self.size {
            config.width = size;
            config.height = size;
        }
        if let Some(side) = self.side {
            config.side_length = side;
        }
        if let Some(thickness) = self.thickness {
            config.thickness = thickness;
        }
        if self.strict {
            config.boundary = BoundaryPolicy::Strict;
        }
        Ok(())
    }
}

fn prompt_depth() -> Result<u32> {
    print!("How many levels to be drawn? > ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    parse_depth(&input)
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => RenderConfig::load(path)?,
        None => RenderConfig::default(),
    };
    args.apply(&mut config)?;

    let depth = match config.depth {
        Some(depth) => depth,
        None => prompt_depth()?,
    };
    config.depth = Some(depth);
    config.validate()?;

    let mut turtle = config.to_turtle()?;
    let mut colors = match config.seed {
        Some(seed) => RandomColors::seeded(seed),
        None => RandomColors::from_entropy(),
    };

    let started = Instant::now();
    let stats = sierpinski(config.side_length, depth, &mut turtle, &mut colors)?;
    info!(
        "drew {} triangles at depth {} in {:.2?}",
        stats.triangles,
        stats.depth,
        started.elapsed()
    );
    if turtle.clipped_writes() > 0 {
        warn!(
            "{} pixel writes fell outside the canvas and were dropped",
            turtle.clipped_writes()
        );
    }

    save(turtle.canvas(), &config.output, config.image_format())?;

    #[cfg(feature = "preview")]
    {
        if args.preview {
            sierpinski_turtle::show_canvas(turtle.canvas(), "Sierpinski")?;
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
