use anyhow::{Context, Result};
use clap::Parser;
use dominant_color_wasm::{
    Error, MAX_SIDE, ResolverConfig, dominant_color_from_bytes_with_max_side,
    resolver::DEFAULT_SATURATION_FACTOR,
};
use std::fs;
use std::path::PathBuf;

/// Print the dominant colour of images as `rgb(r,g,b)` and `#rrggbb`.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Report the quantized colour as-is instead of desaturating it
    #[arg(long)]
    raw: bool,

    /// Factor applied to the HSL saturation when desaturating
    #[arg(short = 's', long, default_value_t = DEFAULT_SATURATION_FACTOR)]
    saturation_factor: f32,

    /// Images larger than this (longest side) are shrunk before sampling
    #[arg(short = 'm', long, default_value_t = MAX_SIDE)]
    max_side: u32,

    /// Emit one JSON object per input
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = ResolverConfig {
        desaturate: !args.raw,
        saturation_factor: args.saturation_factor,
    };

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        match dominant_color_from_bytes_with_max_side(&bytes, args.max_side, &config) {
            Ok(found) if args.json => {
                let mut value = serde_json::to_value(&found)?;
                value["path"] = serde_json::Value::from(input.display().to_string());
                println!("{value}");
            }
            Ok(found) => println!("{}: {} {}", input.display(), found.rgb, found.hex),
            Err(Error::NoDominantColor) if args.json => {
                println!("{}", serde_json::json!({ "path": input.display().to_string(), "color": null }));
            }
            Err(Error::NoDominantColor) => println!("{}: no dominant color found", input.display()),
            Err(e) => {
                return Err(e).with_context(|| format!("processing {}", input.display()));
            }
        }
    }

    Ok(())
}
