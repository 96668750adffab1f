use std::path::Path;

use tracing::info;

use crate::error::RefreshError;

/// M3U format declaration, always the first line of the output file
pub const PLAYLIST_HEADER: &str = "#EXTM3U";

/// Renders the playlist body: the header line, then the manifest URL
#[must_use]
pub fn render(manifest_url: &str) -> String {
    format!("{PLAYLIST_HEADER}\n{manifest_url}\n")
}

/// Overwrites the destination playlist with the freshly resolved manifest URL.
/// Callers only reach this after resolution succeeded, so a failed run never
/// touches the previously published file.
///
/// # Errors
/// Errors with [`RefreshError::Io`] when the destination cannot be written
pub async fn write(path: &Path, manifest_url: &str) -> Result<(), RefreshError> {
    tokio::fs::write(path, render(manifest_url)).await?;
    info!("Wrote playlist to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_header_then_url() {
        let body = render("https://example.com/live/abc123.m3u8");
        let lines: Vec<&str> = body.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], PLAYLIST_HEADER);
        assert_eq!(lines[1], "https://example.com/live/abc123.m3u8");
        assert!(body.ends_with('\n'));
    }

    #[test]
    fn rendering_is_deterministic() {
        let url = "https://example.com/live/abc123.m3u8";
        assert_eq!(render(url), render(url));
    }

    #[tokio::test]
    async fn write_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("streams.m3u8");

        write(&path, "https://example.com/live/old.m3u8")
            .await
            .unwrap();
        write(&path, "https://example.com/live/new.m3u8")
            .await
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "#EXTM3U\nhttps://example.com/live/new.m3u8\n");
    }

    #[tokio::test]
    async fn unwritable_destination_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing-subdir").join("streams.m3u8");

        let err = write(&path, "https://example.com/live/abc123.m3u8")
            .await
            .unwrap_err();
        assert!(matches!(err, RefreshError::Io(_)));
    }
}
