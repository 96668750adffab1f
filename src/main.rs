#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::cargo)]
#![warn(clippy::perf)]
#![warn(clippy::complexity)]
#![warn(clippy::style)]
#![allow(clippy::multiple_crate_versions)]

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::info;

use crate::util::init_http_client;

pub mod epg;
pub mod error;
pub mod playlist;
pub mod refresh;
pub mod util;
pub mod youtube;

/// Resolves the current live HLS manifest URL of a YouTube live stream and
/// republishes it as a static playlist file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// YouTube live stream URL / video ID to refresh [env: STREAM_URL]
    stream: Option<String>,

    /// Destination playlist file
    #[arg(short, long, default_value = "streams.m3u8")]
    output: PathBuf,

    /// Destination program guide file
    #[arg(long, default_value = "epg.xml")]
    epg: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let reference = args
        .stream
        .or_else(|| std::env::var("STREAM_URL").ok())
        .context("No stream reference provided (argument or env STREAM_URL)")?;
    let Some(video_id) = youtube::parse_stream_reference(&reference) else {
        bail!("Unable to parse a video ID out of {reference:?}");
    };

    info!("Refreshing live manifest for video ID: {video_id}");
    let client = init_http_client();
    refresh::refresh(&client, &video_id, &args.output, &args.epg).await?;

    info!("All done successfully!");

    Ok(())
}
