use std::{error, fmt, result};

use async_trait::async_trait;
use model::{
    location::{Location, LocationChange, LocationFilter},
    observation::CategoricalObservation,
    temperature::{DailyTemperature, ThermalRegime, TimeRange},
    Pagination,
};

#[derive(Debug)]
pub enum DatabaseError {
    NotFound,
    Other(Box<dyn error::Error + Send + Sync>),
}

impl fmt::Display for DatabaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatabaseError::NotFound => write!(f, "no matching rows"),
            DatabaseError::Other(why) => write!(f, "database error: {}", why),
        }
    }
}

impl error::Error for DatabaseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            DatabaseError::NotFound => None,
            DatabaseError::Other(why) => Some(why.as_ref()),
        }
    }
}

pub type Result<T> = result::Result<T, DatabaseError>;

/// Every statement is committed on its own; there is no transaction spanning
/// two calls.
#[async_trait]
pub trait LocationRepo: Send + Sync {
    async fn locations(
        &self,
        filter: &LocationFilter,
        pagination: &Pagination,
    ) -> Result<Vec<Location>>;

    /// Counts the rows of the (paginated) location query.
    async fn count_locations(
        &self,
        filter: &LocationFilter,
        pagination: &Pagination,
    ) -> Result<i64>;

    /// Returns the number of inserted rows.
    async fn insert_location(&self, location: &LocationChange) -> Result<u64>;

    /// Updates the location with the same name. Returns the number of updated
    /// rows, 0 if the name is unknown.
    async fn update_location(&self, location: &LocationChange) -> Result<u64>;

    /// Returns the number of deleted rows, 0 if the name is unknown.
    async fn delete_location(&self, name: &str) -> Result<u64>;
}

#[async_trait]
pub trait TemperatureRepo: Send + Sync {
    /// Daily averages per height band within the monitoring period, ordered
    /// by height descending.
    async fn daily_temperatures(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<Vec<DailyTemperature>>;

    async fn count_daily_temperatures(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<i64>;

    /// Distinct height bands that carry temperature observations.
    async fn temperature_heights(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<Vec<Option<f64>>>;

    async fn thermal_regime(
        &self,
        location: &str,
        range: &TimeRange,
        pagination: &Pagination,
    ) -> Result<Vec<ThermalRegime>>;
}

#[async_trait]
pub trait ObservationRepo: Send + Sync {
    /// Geology and ground ice descriptors of a location, optionally only the
    /// ones of sensor label `category`.
    async fn categorical_observations(
        &self,
        location: &str,
        category: Option<&str>,
        pagination: &Pagination,
    ) -> Result<Vec<CategoricalObservation>>;

    async fn observation_categories(
        &self,
        location: &str,
        pagination: &Pagination,
    ) -> Result<Vec<String>>;
}

pub trait Database: LocationRepo + TemperatureRepo + ObservationRepo {}

impl<T> Database for T where T: LocationRepo + TemperatureRepo + ObservationRepo {}
