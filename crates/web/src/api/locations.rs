use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::get,
    Json, Router,
};
use model::{
    location::{Location, LocationChange, LocationFilter, INTERNAL_PROVIDER},
    Pagination,
};
use observations::database::LocationRepo;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{serde_as, NoneAsEmptyString};

use crate::{
    common::{empty_list, failed, required, CountDto, JsonResult},
    WebState,
};

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/locations_of_observations", get(get_locations))
        .route("/locations_of_observations/count", get(count_locations))
        .route(
            "/locations_of_observations_as_markers",
            get(get_locations)
                .post(add_location)
                .put(update_location)
                .delete(delete_location),
        )
}

/// A location as consumed by the map frontend. `text` repeats `name` and
/// `lng` repeats `lon`, both spellings are read by marker libraries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationDto {
    pub name: String,
    pub text: String,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub lng: Option<f64>,
    pub elevation_in_metres: Option<f64>,
    pub comment: Option<String>,
    pub record_observations: Option<bool>,
    pub accuracy_in_metres: Option<f64>,
    pub provider: String,
}

impl From<Location> for LocationDto {
    fn from(location: Location) -> Self {
        Self {
            text: location.name.clone(),
            name: location.name,
            lat: location.latitude,
            lon: location.longitude,
            lng: location.longitude,
            elevation_in_metres: location.elevation_in_metres,
            comment: location.comment,
            record_observations: location.record_observations,
            accuracy_in_metres: location.accuracy_in_metres,
            provider: INTERNAL_PROVIDER.to_owned(),
        }
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct LocationsQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    name_pattern: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    geometry_type: Option<String>,
}

impl LocationsQuery {
    fn filter(&self) -> LocationFilter {
        LocationFilter::new(self.name_pattern.as_deref(), self.geometry_type.as_deref())
    }
}

/// Request body of the marker mutations. `text` names the location.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct LocationBody {
    text: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
    comment: Option<String>,
    accuracy_in_metres: Option<f64>,
    elevation_in_metres: Option<f64>,
    record_observations: Option<bool>,
}

impl LocationBody {
    fn into_change(self) -> Option<LocationChange> {
        let name = self.text.filter(|text| !text.is_empty())?;
        Some(LocationChange {
            name,
            longitude: self.lng,
            latitude: self.lat,
            comment: self.comment,
            accuracy_in_metres: self.accuracy_in_metres,
            elevation_in_metres: self.elevation_in_metres,
            record_observations: self.record_observations,
        })
    }
}

async fn get_locations(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Query(params): Query<LocationsQuery>,
    Query(pagination): Query<Pagination>,
) -> JsonResult<Vec<LocationDto>> {
    database
        .locations(&params.filter(), &pagination)
        .await
        .map(|locations| Json(locations.into_iter().map(LocationDto::from).collect()))
        .map_err(failed(&Method::GET, &original_uri))
}

async fn count_locations(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Query(params): Query<LocationsQuery>,
    Query(pagination): Query<Pagination>,
) -> JsonResult<Vec<CountDto>> {
    database
        .count_locations(&params.filter(), &pagination)
        .await
        .map(CountDto::list)
        .map_err(failed(&Method::GET, &original_uri))
}

async fn add_location(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Json(body): Json<LocationBody>,
) -> JsonResult<Value> {
    let location = required(body.into_change(), "text")?;
    database
        .insert_location(&location)
        .await
        .map_err(failed(&Method::POST, &original_uri))?;
    log::info!("added location {}", location.name);
    Ok(empty_list())
}

async fn update_location(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Json(body): Json<LocationBody>,
) -> JsonResult<Value> {
    let location = required(body.into_change(), "text")?;
    let updated = database
        .update_location(&location)
        .await
        .map_err(failed(&Method::PUT, &original_uri))?;
    log::info!("updated location {} ({} row(s))", location.name, updated);
    Ok(empty_list())
}

async fn delete_location(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Json(body): Json<LocationBody>,
) -> JsonResult<Value> {
    let name = required(body.text.filter(|text| !text.is_empty()), "text")?;
    let deleted = database
        .delete_location(&name)
        .await
        .map_err(failed(&Method::DELETE, &original_uri))?;
    log::info!("deleted location {} ({} row(s))", name, deleted);
    Ok(empty_list())
}
