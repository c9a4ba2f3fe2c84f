use std::collections::HashMap;

use reqwest::StatusCode;
use serde::{Deserialize, Deserializer};
use tracing::debug;
use url::Url;

use crate::extract::RecordingId;

pub const DEFAULT_API_BASE: &str = "http://api.rtvslo.si";
pub const CLIENT_ID: &str = "19cc0556a5ee31d0d52a0e30b0696b26";

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("cannot build a recording URL from API base {0}")]
    Endpoint(Url),
    #[error("recording API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("recording API expected 200 got {0}")]
    Status(StatusCode),
    #[error("recording API returned invalid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
struct RecordingEnvelope {
    response: Recording,
}

/// Recording metadata as returned by `ava/getRecording`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recording {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_files: Vec<MediaFile>,
}

/// One rendition of a recording. `height` and `width` arrive as strings and
/// are not guaranteed to be numeric.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaFile {
    #[serde(default, deserialize_with = "null_as_default")]
    pub height: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub width: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub streamers: HashMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub filename: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub media_type: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

pub fn parse_recording(body: &[u8]) -> Result<Recording, serde_json::Error> {
    serde_json::from_slice::<RecordingEnvelope>(body).map(|envelope| envelope.response)
}

#[derive(Clone)]
pub struct RecordingClient {
    http: reqwest::Client,
    api_base: Url,
    client_id: String,
}

impl RecordingClient {
    pub fn new(http: reqwest::Client, api_base: Url) -> Self {
        Self {
            http,
            api_base,
            client_id: CLIENT_ID.to_string(),
        }
    }

    pub fn recording_url(&self, id: &RecordingId) -> Result<Url, UpstreamError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| UpstreamError::Endpoint(self.api_base.clone()))?
            .pop_if_empty()
            .extend(["ava", "getRecording", id.as_str()]);
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id);

        Ok(url)
    }

    /// Single GET against the recording API. No retries.
    pub async fn fetch_recording(&self, id: &RecordingId) -> Result<Recording, UpstreamError> {
        let url = self.recording_url(id)?;
        debug!("Fetching recording {id} from {}", url.path());

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(UpstreamError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(parse_recording(&body)?)
    }
}
