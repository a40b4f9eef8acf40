//! SnapBooth - Snapshot tooling for live camera feeds
//!
//! Command-line companion to the SnapBooth crates: checks that a camera's
//! streaming port is reachable and, optionally, dry-runs the letterbox crop
//! geometry for a given video/viewport pair.

use anyhow::Result;
use clap::Parser;
use snapbooth_core::{compute_crop, FrameGeometry};
use snapbooth_diagnostics::{probe, CameraEndpoint};
use std::time::Duration;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

/// SnapBooth - camera connectivity probe and crop geometry dry-run
#[derive(Parser, Debug)]
#[command(name = "snapbooth")]
#[command(version, about, long_about = None)]
struct Args {
    /// Camera stream URL (e.g. rtsp://192.168.1.20:554/stream1)
    url: String,

    /// TCP connect timeout in milliseconds
    #[arg(long, default_value = "5000")]
    connect_timeout_ms: u64,

    /// Intrinsic video size as WxH for a crop dry-run (requires --viewport)
    #[arg(long, value_parser = parse_size)]
    video_size: Option<(u32, u32)>,

    /// Viewport size as WxH for a crop dry-run (requires --video-size)
    #[arg(long, value_parser = parse_size)]
    viewport: Option<(u32, u32)>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    info!("SnapBooth v{}", env!("CARGO_PKG_VERSION"));

    if let (Some((video_w, video_h)), Some((view_w, view_h))) = (args.video_size, args.viewport) {
        let geometry = FrameGeometry {
            video_width: video_w,
            video_height: video_h,
            viewport_width: view_w,
            viewport_height: view_h,
            bitmap_width: view_w,
            bitmap_height: view_h,
        };
        let rect = compute_crop(geometry);
        info!(
            "Crop for {}x{} video in {}x{} viewport: x={} y={} {}x{}",
            video_w, video_h, view_w, view_h, rect.x, rect.y, rect.width, rect.height
        );
    }

    let endpoint = CameraEndpoint::parse(&args.url)?;
    let report = probe(
        &endpoint,
        Duration::from_millis(args.connect_timeout_ms),
    )
    .await;

    if report.is_reachable() {
        info!("Network test passed ({} ms)", report.elapsed.as_millis());
        Ok(())
    } else {
        warn!("Camera at {} is not reachable: {:?}", endpoint, report.outcome);
        std::process::exit(1);
    }
}

/// Parse a "WxH" size argument
fn parse_size(s: &str) -> std::result::Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let width = w
        .parse::<u32>()
        .map_err(|_| format!("invalid width '{}'", w))?;
    let height = h
        .parse::<u32>()
        .map_err(|_| format!("invalid height '{}'", h))?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_size_accepts_wxh() {
        assert_eq!(parse_size("1920x1080"), Ok((1920, 1080)));
        assert_eq!(parse_size("1080X1920"), Ok((1080, 1920)));
        assert!(parse_size("1920").is_err());
        assert!(parse_size("ax b").is_err());
    }
}
