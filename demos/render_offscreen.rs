//! Example: Plot a sine sweep offscreen and save the last frame as PNG.
//!
//! Run with:
//!     cargo run --example render_offscreen --features tokio [config.json]

use anyhow::Context;
use phobz_scope::audio::SineSweep;
use phobz_scope::gpu::{GpuContext, PlotRenderer};
use phobz_scope::present::{DrawableSource, ManualDriver, OffscreenDrawables};
use phobz_scope::PlotConfig;
use std::path::Path;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => PlotConfig::load(&path).with_context(|| format!("loading {path}"))?,
        None => PlotConfig::default(),
    };
    let style = config.to_style()?;

    let width = 640;
    let height = 240;
    let frames = 60;

    let ctx = GpuContext::new().await?;
    println!("GPU: {}", ctx.adapter_info().name);

    let drawables = OffscreenDrawables::new(&ctx);
    let renderer = PlotRenderer::new(&ctx, drawables.format(), style);
    let mut driver = ManualDriver::new(renderer, drawables, SineSweep::new(220.0, 48000, 2048));
    driver.notify_size_changed(width, height);

    let mut presented = 0;
    for _ in 0..frames {
        if driver.render_frame().is_presented() {
            presented += 1;
        }
    }
    println!("Presented {presented}/{frames} frames at {width}x{height}");

    let output_path = Path::new("scope_snapshot.png");
    driver.drawables().save_png(output_path)?;
    println!("Saved snapshot to {}", output_path.display());

    Ok(())
}
