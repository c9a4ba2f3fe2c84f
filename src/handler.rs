use axum::{
    Router,
    extract::{RawForm, Request, State, rejection::RawFormRejection},
    http::Uri,
    response::Html,
    routing::get,
};
use tower_http::trace::TraceLayer;
use tracing::{debug, info, info_span, warn};
use url::form_urlencoded;
use uuid::Uuid;

use crate::{
    error::ApiError,
    extract::{EXPECTED_DOMAIN, contains_expected_domain, extract_recording_id},
    select::select_best_link,
    upstream::RecordingClient,
    views::{INDEX_HTML, render_result},
};

#[derive(Clone)]
pub struct AppState {
    pub recordings: RecordingClient,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(index)
                .head(method_not_allowed)
                .post(lookup)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                info_span!(
                    "request",
                    id = %Uuid::new_v4(),
                    method = %request.method(),
                    path = %request.uri().path()
                )
            }),
        )
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// First value of `key`, looking at the form body before the query string.
fn first_form_value(body: &[u8], query: Option<&str>, key: &str) -> Option<String> {
    first_value(form_urlencoded::parse(body), key)
        .or_else(|| query.and_then(|query| first_value(form_urlencoded::parse(query.as_bytes()), key)))
}

fn first_value(mut pairs: form_urlencoded::Parse<'_>, key: &str) -> Option<String> {
    pairs
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

async fn lookup(
    State(state): State<AppState>,
    uri: Uri,
    form: Result<RawForm, RawFormRejection>,
) -> Result<Html<String>, ApiError> {
    let body = match form {
        Ok(RawForm(body)) => body,
        Err(rejection) => {
            debug!("Unreadable lookup form body, using query only: {rejection}");
            Default::default()
        }
    };
    let url = first_form_value(&body, uri.query(), "url").unwrap_or_default();

    if !contains_expected_domain(&url) {
        debug!("Rejected URL outside {EXPECTED_DOMAIN}: {url:?}");
        return Err(ApiError::bad_request(format!(
            "Expected URL to contain {EXPECTED_DOMAIN}"
        )));
    }

    let id = extract_recording_id(&url).ok_or_else(|| {
        debug!("No recording id in {url:?}");
        ApiError::bad_request("Invalid URL")
    })?;

    let recording = state.recordings.fetch_recording(&id).await.map_err(|error| {
        warn!("Recording {id} could not be fetched: {error}");
        ApiError::internal("Internal error")
    })?;

    let link = select_best_link(&recording.media_files).ok_or_else(|| {
        warn!(
            "Recording {id} has no MP4 rendition with an http streamer ({} media files)",
            recording.media_files.len()
        );
        ApiError::internal("No HTTP URL found")
    })?;

    info!(
        "Recording {id} resolved to {}p rendition (width {:?})",
        link.height, link.width
    );

    Ok(Html(render_result(&recording.title, &link.url)))
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}
