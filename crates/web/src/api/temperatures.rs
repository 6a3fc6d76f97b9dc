use axum::{
    extract::{OriginalUri, Query, State},
    http::Method,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use model::{
    temperature::{DailyTemperature, ThermalRegime, TimeRange},
    Pagination,
};
use observations::database::TemperatureRepo;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use utility::serde::{date_time, http_date, nan_as_empty};

use crate::{
    common::{failed, required, CountDto, JsonResult, RouteResult},
    WebState,
};

pub(crate) fn routes() -> Router<WebState> {
    Router::new()
        .route("/ground_temperatures", get(get_ground_temperatures))
        .route("/ground_temperatures/count", get(count_ground_temperatures))
        .route("/ground_temperatures/height", get(get_ground_temperature_heights))
        .route("/ground_thermal_regime", get(get_ground_thermal_regime))
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct LocationQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub location: Option<String>,
}

impl LocationQuery {
    pub fn location(self) -> RouteResult<String> {
        required(self.location, "location")
    }
}

#[serde_as]
#[derive(Debug, Deserialize)]
pub(crate) struct TimeRangeQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub location: Option<String>,

    #[serde(deserialize_with = "date_time::deserialize_utc_option", default)]
    pub start_date: Option<DateTime<Utc>>,

    #[serde(deserialize_with = "date_time::deserialize_utc_option", default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl TimeRangeQuery {
    pub fn location_and_range(self) -> RouteResult<(String, TimeRange)> {
        let location = required(self.location, "location")?;
        let start = required(self.start_date, "start_date")?;
        let end = required(self.end_date, "end_date")?;
        Ok((location, TimeRange::new(start, end)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroundTemperatureDto {
    pub loc_name: String,
    pub height: Option<f64>,
    #[serde(serialize_with = "nan_as_empty::serialize_option")]
    pub agg_avg: Option<f64>,
    #[serde(serialize_with = "http_date::serialize")]
    pub time: NaiveDateTime,
}

impl From<DailyTemperature> for GroundTemperatureDto {
    fn from(temperature: DailyTemperature) -> Self {
        Self {
            loc_name: temperature.location_name,
            height: temperature.height,
            agg_avg: temperature.average,
            time: temperature.day,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeightDto {
    pub height: Option<f64>,
}

/// Aggregates over observations that contain NaN are NaN themselves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalRegimeDto {
    pub loc_name: String,
    pub height: Option<f64>,
    #[serde(serialize_with = "nan_as_empty::serialize_option")]
    pub max: Option<f64>,
    #[serde(serialize_with = "nan_as_empty::serialize_option")]
    pub min: Option<f64>,
    #[serde(serialize_with = "nan_as_empty::serialize_option")]
    pub average_value: Option<f64>,
    pub cnt: f64,
}

impl From<ThermalRegime> for ThermalRegimeDto {
    fn from(regime: ThermalRegime) -> Self {
        Self {
            loc_name: regime.location_name,
            height: regime.height,
            max: regime.max,
            min: regime.min,
            average_value: regime.average,
            cnt: regime.count as f64,
        }
    }
}

async fn get_ground_temperatures(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Query(params): Query<LocationQuery>,
    Query(pagination): Query<Pagination>,
) -> JsonResult<Vec<GroundTemperatureDto>> {
    let location = params.location()?;
    database
        .daily_temperatures(&location, &pagination)
        .await
        .map(|rows| Json(rows.into_iter().map(GroundTemperatureDto::from).collect()))
        .map_err(failed(&Method::GET, &original_uri))
}

async fn count_ground_temperatures(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Query(params): Query<LocationQuery>,
    Query(pagination): Query<Pagination>,
) -> JsonResult<Vec<CountDto>> {
    let location = params.location()?;
    database
        .count_daily_temperatures(&location, &pagination)
        .await
        .map(CountDto::list)
        .map_err(failed(&Method::GET, &original_uri))
}

async fn get_ground_temperature_heights(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Query(params): Query<LocationQuery>,
    Query(pagination): Query<Pagination>,
) -> JsonResult<Vec<HeightDto>> {
    let location = params.location()?;
    database
        .temperature_heights(&location, &pagination)
        .await
        .map(|heights| {
            Json(
                heights
                    .into_iter()
                    .map(|height| HeightDto { height })
                    .collect(),
            )
        })
        .map_err(failed(&Method::GET, &original_uri))
}

async fn get_ground_thermal_regime(
    original_uri: OriginalUri,
    State(WebState { database, .. }): State<WebState>,
    Query(params): Query<TimeRangeQuery>,
    Query(pagination): Query<Pagination>,
) -> JsonResult<Vec<ThermalRegimeDto>> {
    let (location, range) = params.location_and_range()?;
    database
        .thermal_regime(&location, &range, &pagination)
        .await
        .map(|rows| Json(rows.into_iter().map(ThermalRegimeDto::from).collect()))
        .map_err(failed(&Method::GET, &original_uri))
}
