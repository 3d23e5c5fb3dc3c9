// SPDX-License-Identifier: MIT OR Apache-2.0
//! `OrdoPlay` tween preview - runs tweeners headless on a virtual clock.
//!
//! Usage: `ordoplay_tween_preview [preview.ron]`
//!
//! Without an argument the built-in preview scene is used. Set `RUST_LOG` to
//! `debug` to see every step boundary, or `trace` to see every frame.

mod preview;

use preview::{Preview, PreviewConfig, PreviewError, DEFAULT_PREVIEW};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting OrdoPlay tween preview v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(std::env::args().nth(1).map(PathBuf::from)) {
        tracing::error!("Preview failed: {e}");
        std::process::exit(1);
    }
}

fn run(path: Option<PathBuf>) -> Result<(), PreviewError> {
    let config = match &path {
        Some(path) => {
            tracing::info!("Loading preview from {:?}", path);
            PreviewConfig::load(path)?
        }
        None => PreviewConfig::parse(DEFAULT_PREVIEW)?,
    };

    let mut preview = Preview::from_config(&config)?;
    tracing::info!(
        "Running {} tweeners on {} entities for {} frames at {} fps",
        preview.runner().len(),
        preview.scene().len(),
        config.frame_count(),
        config.frame_rate
    );

    let summary = preview.run();
    tracing::info!(
        "Finished {} frames ({:.2}s): {} steps, {} loops",
        summary.frames,
        summary.elapsed,
        summary.steps_completed,
        summary.loops_completed
    );

    for (_, tweener) in preview.runner().iter() {
        let name = preview
            .scene()
            .get(tweener.target)
            .map_or("<removed>", |entity| entity.name.as_str());
        tracing::info!(
            "'{}' {}: {} loops completed",
            name,
            tweener.property(),
            tweener.tweener().loops_completed()
        );
    }

    Ok(())
}
