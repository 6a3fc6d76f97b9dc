use std::{path::Path, sync::Mutex};

use async_trait::async_trait;
use axum::Router;
use chrono::{DateTime, Utc};
use model::{
    location::{Location, LocationChange, LocationFilter},
    observation::{CategoricalObservation, CATEGORICAL_LABELS},
    temperature::{DailyTemperature, ThermalRegime, TimeRange},
    Pagination,
};
use observations::database::{LocationRepo, ObservationRepo, Result, TemperatureRepo};
use std::sync::Arc;
use web::{config::WebConfig, middleware::authorization::ApiTokens, WebState};

pub const TOKEN: &str = "test-token";

/// In memory stand-in for the Postgres database.
#[derive(Default)]
pub struct MemoryDatabase {
    pub locations: Mutex<Vec<Location>>,
    pub temperatures: Vec<DailyTemperature>,
    pub regimes: Vec<ThermalRegime>,
    pub categorical: Vec<CategoricalObservation>,
}

fn is_categorical(label: &str) -> bool {
    CATEGORICAL_LABELS.contains(&label)
}

fn in_range(range: &TimeRange, time: &DateTime<Utc>) -> bool {
    *time >= range.start && *time <= range.end
}

/// `LIKE` with `%` as the only wildcard.
fn like(pattern: &str, value: &str) -> bool {
    let parts = pattern.split('%').collect::<Vec<_>>();
    if parts.len() == 1 {
        return pattern == value;
    }

    let mut rest = value;
    for (index, part) in parts.iter().enumerate() {
        if index == 0 {
            match rest.strip_prefix(part) {
                Some(tail) => rest = tail,
                None => return false,
            }
        } else if index == parts.len() - 1 {
            return rest.ends_with(part);
        } else {
            match rest.find(part) {
                Some(position) => rest = &rest[position + part.len()..],
                None => return false,
            }
        }
    }
    true
}

fn to_location(change: &LocationChange) -> Location {
    Location {
        name: change.name.clone(),
        longitude: change.longitude,
        latitude: change.latitude,
        elevation_in_metres: change.elevation_in_metres,
        comment: change.comment.clone(),
        record_observations: change.record_observations,
        accuracy_in_metres: change.accuracy_in_metres,
    }
}

impl MemoryDatabase {
    fn matching_locations(&self, filter: &LocationFilter) -> Vec<Location> {
        let mut locations = self
            .locations
            .lock()
            .unwrap()
            .iter()
            .filter(|location| like(&filter.name_pattern, &location.name))
            .filter(|_| filter.geometry_type == "ST_Point")
            .cloned()
            .collect::<Vec<_>>();
        locations.sort_by(|a, b| a.name.cmp(&b.name));
        locations
    }

    fn categorical_of<'a>(
        &'a self,
        location: &'a str,
    ) -> impl Iterator<Item = &'a CategoricalObservation> + 'a {
        self.categorical
            .iter()
            .filter(move |row| row.location_name == location && is_categorical(&row.label))
    }

    fn daily_of(&self, location: &str) -> Vec<DailyTemperature> {
        self.temperatures
            .iter()
            .filter(|row| row.location_name == location)
            .filter(|row| in_range(&TimeRange::monitoring_period(), &row.day.and_utc()))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LocationRepo for MemoryDatabase {
    async fn locations(
        &self,
        filter: &LocationFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Location>> {
        Ok(pagination.page(self.matching_locations(filter)))
    }

    async fn count_locations(
        &self,
        filter: &LocationFilter,
        pagination: &Pagination,
    ) -> Result<i64> {
        Ok(pagination.page(self.matching_locations(filter)).len() as i64)
    }

    async fn insert_location(&self, location: &LocationChange) -> Result<u64> {
        self.locations.lock().unwrap().push(to_location(location));
        Ok(1)
    }

    async fn update_location(&self, location: &LocationChange) -> Result<u64> {
        let mut locations = self.locations.lock().unwrap();
        let mut updated = 0;
        for existing in locations.iter_mut().filter(|l| l.name == location.name) {
            *existing = to_location(location);
            updated += 1;
        }
        Ok(updated)
    }

    async fn delete_location(&self, name: &str) -> Result<u64> {
        let mut locations = self.locations.lock().unwrap();
        let before = locations.len();
        locations.retain(|location| location.name != name);
        Ok((before - locations.len()) as u64)
    }
}

#[async_trait]
impl TemperatureRepo for MemoryDatabase {
    async fn daily_temperatures(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<Vec<DailyTemperature>> {
        Ok(pagination.page(self.daily_of(location)))
    }

    async fn count_daily_temperatures(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<i64> {
        Ok(pagination.page(self.daily_of(location)).len() as i64)
    }

    async fn temperature_heights(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Option<f64>>> {
        let mut heights = vec![];
        for row in self.daily_of(location) {
            if !heights.contains(&row.height) {
                heights.push(row.height);
            }
        }
        Ok(pagination.page(heights))
    }

    async fn thermal_regime(
        &self,
        location: &str,
        _range: &TimeRange,
        pagination: &Pagination,
    ) -> Result<Vec<ThermalRegime>> {
        Ok(pagination.page(
            self.regimes
                .iter()
                .filter(|row| row.location_name == location)
                .cloned(),
        ))
    }
}

#[async_trait]
impl ObservationRepo for MemoryDatabase {
    async fn categorical_observations(
        &self,
        location: &str,
        category: Option<&str>,
        pagination: &Pagination,
    ) -> Result<Vec<CategoricalObservation>> {
        Ok(pagination.page(
            self.categorical_of(location)
                .filter(|row| category.map_or(true, |label| row.label == label))
                .cloned(),
        ))
    }

    async fn observation_categories(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<Vec<String>> {
        let mut labels = self
            .categorical_of(location)
            .map(|row| row.label.clone())
            .collect::<Vec<_>>();
        labels.sort();
        labels.dedup();
        Ok(pagination.page(labels))
    }
}

/// The application over `database`, accepting [`TOKEN`] and exporting below
/// `export_root`.
pub fn app(database: MemoryDatabase, export_root: &Path) -> Router {
    let config = WebConfig {
        address: web::config::DEFAULT_ADDRESS.parse().unwrap(),
        tokens: ApiTokens::new([TOKEN]),
        export_root: export_root.to_path_buf(),
    };
    web::app(WebState::new(Arc::new(database), &config))
}
