use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::{error::RefreshError, youtube::LiveManifest};

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S +0000";

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Renders a minimal XMLTV guide: one channel and one 24-hour programme slot
/// starting at `now`. Players only need it so the stream shows up with a name
/// instead of a blank guide row.
#[must_use]
pub fn render(manifest: &LiveManifest, now: DateTime<Utc>) -> String {
    let start = now.format(TIMESTAMP_FORMAT);
    let stop = (now + Duration::hours(24)).format(TIMESTAMP_FORMAT);
    let channel_id = escape_xml(&manifest.video_id);
    let name = escape_xml(&manifest.title);

    let parts = [
        r#"<?xml version="1.0" encoding="UTF-8"?>"#.to_string(),
        format!(
            r#"<tv generator-info-name="{}/{}">"#,
            env!("CARGO_PKG_NAME"),
            env!("CARGO_PKG_VERSION")
        ),
        format!(r#"  <channel id="{channel_id}">"#),
        format!("    <display-name>{name}</display-name>"),
        "  </channel>".to_string(),
        format!(r#"  <programme start="{start}" stop="{stop}" channel="{channel_id}">"#),
        format!("    <title>{name} (Live)</title>"),
        "    <desc>Auto-generated EPG slot for a continuous live stream.</desc>".to_string(),
        "  </programme>".to_string(),
        "</tv>".to_string(),
    ];

    parts.join("\n") + "\n"
}

/// Overwrites the companion program guide next to the playlist
///
/// # Errors
/// Errors with [`RefreshError::Io`] when the destination cannot be written
pub async fn write(path: &Path, manifest: &LiveManifest) -> Result<(), RefreshError> {
    tokio::fs::write(path, render(manifest, Utc::now())).await?;
    info!("Wrote program guide to {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn manifest() -> LiveManifest {
        LiveManifest {
            url: "https://example.com/live/abc123.m3u8".to_string(),
            video_id: "jfKfPfyJRdk".to_string(),
            title: "Radio <24/7> & Chill".to_string(),
            author: "Some Station".to_string(),
        }
    }

    #[test]
    fn renders_channel_and_24h_programme() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        let xml = render(&manifest(), now);

        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
        assert!(xml.contains(r#"<channel id="jfKfPfyJRdk">"#));
        assert!(xml.contains(r#"start="20260829120000 +0000""#));
        assert!(xml.contains(r#"stop="20260830120000 +0000""#));
        assert!(xml.ends_with("</tv>\n"));
    }

    #[test]
    fn escapes_channel_text() {
        let now = Utc.with_ymd_and_hms(2026, 8, 29, 12, 0, 0).unwrap();
        let xml = render(&manifest(), now);

        assert!(xml.contains("Radio &lt;24/7&gt; &amp; Chill"));
        assert!(!xml.contains("<24/7>"));
    }
}
