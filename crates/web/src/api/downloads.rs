use axum::{
    body::Body,
    extract::{OriginalUri, Query, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use model::Pagination;
use observations::export::{self, ExportFile};
use serde_json::Value;
use tokio_util::io::ReaderStream;

use crate::{
    common::{failed, RouteErrorResponse, RouteResult},
    WebState,
};

use super::temperatures::{LocationQuery, TimeRangeQuery};

const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";
const ZIP_CONTENT_TYPE: &str = "application/zip";

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route(
            "/download_observation_time_temperature",
            get(download_time_temperature),
        )
        .route(
            "/download_observations_time_temperature",
            post(download_time_temperatures_zip),
        )
        .route(
            "/download_observation_temperature_height",
            get(download_temperature_height),
        )
}

/// Streams an export file from disk as an attachment. The file is unlinked
/// as soon as it is open, the open handle keeps its content readable.
async fn attachment(file: ExportFile, content_type: &'static str) -> RouteResult<Response> {
    let handle = tokio::fs::File::open(&file.path)
        .await
        .map_err(export::ExportError::from)?;
    if let Err(why) = tokio::fs::remove_file(&file.path).await {
        log::warn!("could not remove {}: {}", file.path.display(), why);
    }
    let disposition = format!("attachment; filename=\"{}\"", file.attachment_name);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_owned()),
            (header::CONTENT_DISPOSITION, disposition),
            (header::CACHE_CONTROL, "no-cache".to_owned()),
        ],
        Body::from_stream(ReaderStream::new(handle)),
    )
        .into_response())
}

/// The location names of a multi-location export request. Anything but a
/// non-empty list of strings is rejected, echoing the body.
fn location_names(body: Value) -> RouteResult<Vec<String>> {
    let items = match &body {
        Value::Array(items) if !items.is_empty() => items,
        Value::Array(_) | Value::Null => {
            return Err(RouteErrorResponse::new(StatusCode::NOT_FOUND)
                .with_message("no locations requested")
                .with_body(body))
        }
        _ => return Err(RouteErrorResponse::invalid_body(body)),
    };

    let names = items
        .iter()
        .map(|item| item.as_str().map(str::to_owned))
        .collect::<Option<Vec<_>>>();
    match names {
        Some(names) => Ok(names),
        None => Err(RouteErrorResponse::invalid_body(body)),
    }
}

async fn download_time_temperature(
    original_uri: OriginalUri,
    State(WebState {
        database, exports, ..
    }): State<WebState>,
    Query(params): Query<LocationQuery>,
    Query(pagination): Query<Pagination>,
) -> RouteResult<Response> {
    let location = params.location()?;
    let file = export::export_daily_temperatures(
        &*database,
        &exports.time_temperature,
        &location,
        &pagination,
    )
    .await
    .map_err(failed(&Method::GET, &original_uri))?;

    attachment(file, TEXT_CONTENT_TYPE)
        .await
        .map_err(|why| why.with_method(&Method::GET).with_uri(original_uri.path()))
}

async fn download_time_temperatures_zip(
    original_uri: OriginalUri,
    State(WebState {
        database, exports, ..
    }): State<WebState>,
    Query(pagination): Query<Pagination>,
    Json(body): Json<Value>,
) -> RouteResult<Response> {
    let locations = location_names(body)?;
    let file = export::export_daily_temperatures_zip(
        &*database,
        &exports.time_temperature,
        &locations,
        &pagination,
    )
    .await
    .map_err(failed(&Method::POST, &original_uri))?;

    attachment(file, ZIP_CONTENT_TYPE)
        .await
        .map_err(|why| why.with_method(&Method::POST).with_uri(original_uri.path()))
}

async fn download_temperature_height(
    original_uri: OriginalUri,
    State(WebState {
        database, exports, ..
    }): State<WebState>,
    Query(params): Query<TimeRangeQuery>,
    Query(pagination): Query<Pagination>,
) -> RouteResult<Response> {
    let (location, range) = params.location_and_range()?;
    let file = export::export_thermal_regime(
        &*database,
        &exports.temperature_height,
        &location,
        &range,
        &pagination,
    )
    .await
    .map_err(failed(&Method::GET, &original_uri))?;

    attachment(file, TEXT_CONTENT_TYPE)
        .await
        .map_err(|why| why.with_method(&Method::GET).with_uri(original_uri.path()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn accepts_list_of_names() {
        let names = location_names(json!(["A", "B"])).unwrap();
        assert_eq!(names, vec!["A".to_owned(), "B".to_owned()]);
    }

    #[test]
    fn rejects_non_string_element_with_echo() {
        let error = location_names(json!(["A", 123])).unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(error.body, Some(json!(["A", 123])));
    }

    #[test]
    fn rejects_object_body() {
        let error = location_names(json!({"location": "A"})).unwrap_err();
        assert_eq!(error.status_code, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn empty_list_is_not_found() {
        let error = location_names(json!([])).unwrap_err();
        assert_eq!(error.status_code, StatusCode::NOT_FOUND);
        assert_eq!(error.body, Some(json!([])));
    }
}
