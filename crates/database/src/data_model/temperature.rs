use async_trait::async_trait;
use chrono::NaiveDateTime;
use model::{
    temperature::{DailyTemperature, ThermalRegime, TimeRange},
    Pagination,
};
use observations::database::{Result, TemperatureRepo};
use sqlx::prelude::FromRow;

use super::DatabaseRow;
use crate::{queries::temperature, PgDatabase};

#[derive(Debug, Clone, FromRow)]
pub struct DailyTemperatureRow {
    pub loc_name: String,
    pub height: Option<f64>,
    pub agg_avg: Option<f64>,
    pub agg_cnt: i64,
    pub time: NaiveDateTime,
}

impl DatabaseRow for DailyTemperatureRow {
    type Model = DailyTemperature;

    fn to_model(self) -> Self::Model {
        DailyTemperature {
            location_name: self.loc_name,
            height: self.height,
            average: self.agg_avg,
            count: self.agg_cnt,
            day: self.time,
        }
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct HeightRow {
    pub height: Option<f64>,
}

impl DatabaseRow for HeightRow {
    type Model = Option<f64>;

    fn to_model(self) -> Self::Model {
        self.height
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct ThermalRegimeRow {
    pub loc_name: String,
    pub height: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub average_value: Option<f64>,
    pub cnt: i64,
}

impl DatabaseRow for ThermalRegimeRow {
    type Model = ThermalRegime;

    fn to_model(self) -> Self::Model {
        ThermalRegime {
            location_name: self.loc_name,
            height: self.height,
            max: self.max,
            min: self.min,
            average: self.average_value,
            count: self.cnt,
        }
    }
}

#[async_trait]
impl TemperatureRepo for PgDatabase {
    async fn daily_temperatures(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<Vec<DailyTemperature>> {
        temperature::daily(&self.pool, location, pagination).await
    }

    async fn count_daily_temperatures(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<i64> {
        temperature::count_daily(&self.pool, location, pagination).await
    }

    async fn temperature_heights(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Option<f64>>> {
        temperature::heights(&self.pool, location, pagination).await
    }

    async fn thermal_regime(
        &self,
        location: &str,
        range: &TimeRange,
        pagination: &Pagination,
    ) -> Result<Vec<ThermalRegime>> {
        temperature::thermal_regime(&self.pool, location, range, pagination).await
    }
}
