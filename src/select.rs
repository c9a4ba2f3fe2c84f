use crate::upstream::MediaFile;

const MP4_MEDIA_TYPE: &str = "MP4";
const HTTP_STREAMER: &str = "http";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedLink {
    pub url: String,
    pub height: u64,
    pub width: String,
}

/// Picks the tallest MP4 rendition served over plain HTTP.
///
/// Entries with another media type, a non-numeric height or no `http`
/// streamer are skipped. A strictly greater height replaces the current pick,
/// so the first rendition wins ties. The running best starts at zero, which
/// means a height of 0 is never selected.
pub fn select_best_link(media_files: &[MediaFile]) -> Option<SelectedLink> {
    let mut best: Option<SelectedLink> = None;
    let mut best_height = 0;

    for file in media_files {
        if file.media_type != MP4_MEDIA_TYPE {
            continue;
        }
        let Ok(height) = file.height.parse::<u64>() else {
            continue;
        };
        let Some(base) = file
            .streamers
            .get(HTTP_STREAMER)
            .filter(|value| !value.is_empty())
        else {
            continue;
        };

        if height > best_height {
            best_height = height;
            best = Some(SelectedLink {
                url: format!("{base}{}", file.filename),
                height,
                width: file.width.clone(),
            });
        }
    }

    best
}
