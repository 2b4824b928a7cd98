//! texbox demo entry point.
//!
//! Lays out a sample formula, draws it into a recording surface and prints
//! every draw call as one JSON object per line. An optional TOML render
//! config may be given as the first argument or through `TEXBOX_CONFIG`.

mod demo;

use std::path::Path;

use anyhow::{Context, Result};

use texbox_core::config::RenderConfig;
use texbox_core::graphics::Recorder;
use texbox_core::render::RenderBuilder;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TEXBOX_CONFIG").ok())
    {
        Some(path) => RenderConfig::load(Path::new(&path))
            .with_context(|| format!("loading render config from {path}"))?,
        None => RenderConfig {
            text_size: Some(24.0),
            math_version: Some("tex".to_string()),
            ..RenderConfig::default()
        },
    };
    log::info!("Render config: {config:?}");

    let formula = demo::sample_formula();
    let render = RenderBuilder::from_config(&config, formula.colors())?.build(&formula)?;
    log::info!(
        "Formula laid out: {}x{} px, depth {}, baseline {:.3}",
        render.width(),
        render.height(),
        render.depth(),
        render.baseline(),
    );

    let mut surface = Recorder::new();
    render.draw(&mut surface, 0, 0)?;
    log::info!("Recorded {} draw calls", surface.commands.len());

    for command in &surface.commands {
        println!("{}", serde_json::to_string(command)?);
    }
    Ok(())
}
