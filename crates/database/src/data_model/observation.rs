use async_trait::async_trait;
use model::{observation::CategoricalObservation, Pagination};
use observations::database::{ObservationRepo, Result};
use sqlx::prelude::FromRow;

use super::DatabaseRow;
use crate::{queries::observation, PgDatabase};

/// `ffrom`/`tto` avoid the reserved words `from` and `to`.
#[derive(Debug, Clone, FromRow)]
pub struct CategoricalObservationRow {
    pub name: String,
    pub label: String,
    pub ffrom: Option<f64>,
    pub tto: Option<f64>,
    pub numeric_value: Option<f64>,
    pub text_value: Option<String>,
}

impl DatabaseRow for CategoricalObservationRow {
    type Model = CategoricalObservation;

    fn to_model(self) -> Self::Model {
        CategoricalObservation {
            location_name: self.name,
            label: self.label,
            height_from: self.ffrom,
            height_to: self.tto,
            numeric_value: self.numeric_value,
            text_value: self.text_value,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub label: String,
}

impl DatabaseRow for CategoryRow {
    type Model = String;

    fn to_model(self) -> Self::Model {
        self.label
    }
}

#[async_trait]
impl ObservationRepo for PgDatabase {
    async fn categorical_observations(
        &self,
        location: &str,
        category: Option<&str>,
        pagination: &Pagination,
    ) -> Result<Vec<CategoricalObservation>> {
        observation::categorical(&self.pool, location, category, pagination).await
    }

    async fn observation_categories(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<Vec<String>> {
        observation::categories(&self.pool, location, pagination).await
    }
}
