use std::path::Path;

use tracing::{info, instrument};

use crate::{
    epg,
    error::RefreshError,
    playlist,
    youtube::{self, LiveManifest, PlayerResponse},
};

/// One full refresh run: resolve the current live manifest for `video_id`,
/// then republish the playlist and the program guide.
///
/// No retry and no partial state: any error aborts the run and leaves the
/// previously published files as they were. The external scheduler's fixed
/// interval is the only retry policy.
///
/// # Errors
/// See [`RefreshError`]
#[instrument(skip(client, playlist_path, epg_path))]
pub async fn refresh(
    client: &reqwest::Client,
    video_id: &str,
    playlist_path: &Path,
    epg_path: &Path,
) -> Result<(), RefreshError> {
    let manifest = youtube::resolve_live_manifest(client, video_id).await?;
    publish(&manifest, playlist_path, epg_path).await
}

/// The post-fetch half of a run: extract the manifest and write both outputs.
/// Extraction happens before any file is touched.
pub async fn apply(
    response: PlayerResponse,
    playlist_path: &Path,
    epg_path: &Path,
) -> Result<(), RefreshError> {
    let manifest = youtube::extract_live_manifest(response)?;
    publish(&manifest, playlist_path, epg_path).await
}

async fn publish(
    manifest: &LiveManifest,
    playlist_path: &Path,
    epg_path: &Path,
) -> Result<(), RefreshError> {
    info!("Resolved live manifest: {}", manifest.url);

    playlist::write(playlist_path, &manifest.url).await?;
    epg::write(epg_path, manifest).await?;

    Ok(())
}
