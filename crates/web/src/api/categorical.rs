use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::get,
    Json, Router,
};
use model::{observation::CategoricalObservation, Pagination};
use observations::database::ObservationRepo;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use utility::serde::nan_as_empty;

use crate::{
    common::{failed, required, JsonResult},
    WebState,
};

use super::temperatures::LocationQuery;

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/observations/range", get(get_categorical_observations))
        .route("/observations/categories", get(get_observation_categories))
}

#[serde_as]
#[derive(Debug, Deserialize)]
struct RangeQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    location: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoricalObservationDto {
    pub name: String,
    pub label: String,
    #[serde(rename = "from")]
    pub height_from: Option<f64>,
    #[serde(rename = "to")]
    pub height_to: Option<f64>,
    #[serde(serialize_with = "nan_as_empty::serialize_option")]
    pub numeric_value: Option<f64>,
    pub text_value: Option<String>,
}

impl From<CategoricalObservation> for CategoricalObservationDto {
    fn from(observation: CategoricalObservation) -> Self {
        Self {
            name: observation.location_name,
            label: observation.label,
            height_from: observation.height_from,
            height_to: observation.height_to,
            numeric_value: observation.numeric_value,
            text_value: observation.text_value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDto {
    pub label: String,
}

async fn get_categorical_observations(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Query(params): Query<RangeQuery>,
    Query(pagination): Query<Pagination>,
) -> JsonResult<Vec<CategoricalObservationDto>> {
    let location = required(params.location, "location")?;
    database
        .categorical_observations(&location, params.category.as_deref(), &pagination)
        .await
        .map(|rows| {
            Json(
                rows.into_iter()
                    .map(CategoricalObservationDto::from)
                    .collect(),
            )
        })
        .map_err(failed(&Method::GET, &original_uri))
}

async fn get_observation_categories(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Query(params): Query<LocationQuery>,
    Query(pagination): Query<Pagination>,
) -> JsonResult<Vec<CategoryDto>> {
    let location = params.location()?;
    database
        .observation_categories(&location, &pagination)
        .await
        .map(|labels| Json(labels.into_iter().map(|label| CategoryDto { label }).collect()))
        .map_err(failed(&Method::GET, &original_uri))
}
