use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// Only observations in this unit are treated as ground temperatures.
pub const TEMPERATURE_UNIT: &str = "C";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The fixed window used by the time series routes, 1950 to 2050 inclusive.
    pub fn monitoring_period() -> Self {
        Self {
            start: Utc
                .with_ymd_and_hms(1950, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
            end: Utc
                .with_ymd_and_hms(2050, 1, 1, 0, 0, 0)
                .single()
                .unwrap_or_default(),
        }
    }
}

/// Average temperature of one height band of a location over one UTC day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTemperature {
    pub location_name: String,
    pub height: Option<f64>,
    pub average: Option<f64>,
    pub count: i64,
    /// Start of the day (UTC).
    pub day: NaiveDateTime,
}

/// Temperature statistics of one height band over a caller supplied range.
#[derive(Debug, Clone, PartialEq)]
pub struct ThermalRegime {
    pub location_name: String,
    pub height: Option<f64>,
    pub max: Option<f64>,
    pub min: Option<f64>,
    pub average: Option<f64>,
    pub count: i64,
}
