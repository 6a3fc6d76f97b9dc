use async_trait::async_trait;
use model::{
    location::{Location, LocationChange, LocationFilter},
    Pagination,
};
use observations::database::{LocationRepo, Result};
use sqlx::prelude::FromRow;

use super::DatabaseRow;
use crate::{queries::location, PgDatabase};

/// Table: `locations`, coordinates split into `lon`/`lat`.
#[derive(Debug, Clone, FromRow)]
pub struct LocationRow {
    pub name: String,
    pub lon: Option<f64>,
    pub lat: Option<f64>,
    pub elevation_in_metres: Option<f64>,
    pub comment: Option<String>,
    pub record_observations: Option<bool>,
    pub accuracy_in_metres: Option<f64>,
}

impl DatabaseRow for LocationRow {
    type Model = Location;

    fn to_model(self) -> Self::Model {
        Location {
            name: self.name,
            longitude: self.lon,
            latitude: self.lat,
            elevation_in_metres: self.elevation_in_metres,
            comment: self.comment,
            record_observations: self.record_observations,
            accuracy_in_metres: self.accuracy_in_metres,
        }
    }
}

#[async_trait]
impl LocationRepo for PgDatabase {
    async fn locations(
        &self,
        filter: &LocationFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Location>> {
        location::get_all(&self.pool, filter, pagination).await
    }

    async fn count_locations(
        &self,
        filter: &LocationFilter,
        pagination: &Pagination,
    ) -> Result<i64> {
        location::count(&self.pool, filter, pagination).await
    }

    async fn insert_location(&self, element: &LocationChange) -> Result<u64> {
        location::insert(&self.pool, element).await
    }

    async fn update_location(&self, element: &LocationChange) -> Result<u64> {
        location::update(&self.pool, element).await
    }

    async fn delete_location(&self, name: &str) -> Result<u64> {
        location::delete(&self.pool, name).await
    }
}
