use model::{
    temperature::{DailyTemperature, ThermalRegime, TimeRange, TEMPERATURE_UNIT},
    Pagination,
};
use observations::database::Result;
use sqlx::{Executor, Postgres};
use utility::let_also::LetAlso;

use crate::data_model::{
    temperature::{DailyTemperatureRow, HeightRow, ThermalRegimeRow},
    to_models, CountRow,
};

use super::{apply_count, apply_limit_and_offset, bind_pagination, convert_error};

/// First placeholder after the parameters of the statements below.
const PAGINATION_PLACEHOLDER: usize = 5;

// $1 location name, $2..$3 time range, $4 unit
const SELECT_DAILY_TEMPERATURES: &str = "
    SELECT
        locations.name AS loc_name,
        observations.height_min_metres::DOUBLE PRECISION AS height,
        AVG(observations.numeric_value)::DOUBLE PRECISION AS agg_avg,
        COUNT(observations.numeric_value) AS agg_cnt,
        TO_TIMESTAMP(
            FLOOR(EXTRACT('epoch' FROM observations.corrected_utc_time) / 86400) * 86400
        ) AT TIME ZONE 'UTC' AS time
    FROM
        observations
        INNER JOIN locations ON observations.location = locations.coordinates
    WHERE observations.corrected_utc_time BETWEEN $2 AND $3
        AND locations.name = $1
        AND observations.unit_of_measure = $4
    GROUP BY observations.height_min_metres, locations.name, time
    ORDER BY loc_name ASC, height DESC, time ASC
";

const SELECT_HEIGHTS: &str = "
    SELECT DISTINCT
        observations.height_min_metres::DOUBLE PRECISION AS height
    FROM
        observations
        INNER JOIN locations ON observations.location = locations.coordinates
    WHERE observations.corrected_utc_time BETWEEN $2 AND $3
        AND locations.name = $1
        AND observations.unit_of_measure = $4
    ORDER BY height DESC
";

const SELECT_THERMAL_REGIME: &str = "
    SELECT
        locations.name AS loc_name,
        observations.height_min_metres::DOUBLE PRECISION AS height,
        MAX(observations.numeric_value)::DOUBLE PRECISION AS max,
        MIN(observations.numeric_value)::DOUBLE PRECISION AS min,
        AVG(observations.numeric_value)::DOUBLE PRECISION AS average_value,
        COUNT(observations.numeric_value) AS cnt
    FROM
        observations
        INNER JOIN locations ON observations.location = locations.coordinates
    WHERE observations.corrected_utc_time BETWEEN $2 AND $3
        AND locations.name = $1
        AND observations.unit_of_measure = $4
    GROUP BY observations.height_min_metres, locations.name
    ORDER BY loc_name ASC, height DESC
";

pub async fn daily<'c, E>(
    executor: E,
    location: &str,
    pagination: &Pagination,
) -> Result<Vec<DailyTemperature>>
where
    E: Executor<'c, Database = Postgres>,
{
    let range = TimeRange::monitoring_period();
    let sql = apply_limit_and_offset(SELECT_DAILY_TEMPERATURES, pagination, PAGINATION_PLACEHOLDER);
    sqlx::query_as::<_, DailyTemperatureRow>(&sql)
        .bind(location)
        .bind(range.start)
        .bind(range.end)
        .bind(TEMPERATURE_UNIT)
        .let_owned(|query| bind_pagination(query, pagination))
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows| Ok(to_models(rows)))
}

pub async fn count_daily<'c, E>(
    executor: E,
    location: &str,
    pagination: &Pagination,
) -> Result<i64>
where
    E: Executor<'c, Database = Postgres>,
{
    let range = TimeRange::monitoring_period();
    let sql = apply_count(&apply_limit_and_offset(
        SELECT_DAILY_TEMPERATURES,
        pagination,
        PAGINATION_PLACEHOLDER,
    ));
    sqlx::query_as::<_, CountRow>(&sql)
        .bind(location)
        .bind(range.start)
        .bind(range.end)
        .bind(TEMPERATURE_UNIT)
        .let_owned(|query| bind_pagination(query, pagination))
        .fetch_one(executor)
        .await
        .map(|row| row.count)
        .map_err(convert_error)
}

pub async fn heights<'c, E>(
    executor: E,
    location: &str,
    pagination: &Pagination,
) -> Result<Vec<Option<f64>>>
where
    E: Executor<'c, Database = Postgres>,
{
    let range = TimeRange::monitoring_period();
    let sql = apply_limit_and_offset(SELECT_HEIGHTS, pagination, PAGINATION_PLACEHOLDER);
    sqlx::query_as::<_, HeightRow>(&sql)
        .bind(location)
        .bind(range.start)
        .bind(range.end)
        .bind(TEMPERATURE_UNIT)
        .let_owned(|query| bind_pagination(query, pagination))
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows| Ok(to_models(rows)))
}

pub async fn thermal_regime<'c, E>(
    executor: E,
    location: &str,
    range: &TimeRange,
    pagination: &Pagination,
) -> Result<Vec<ThermalRegime>>
where
    E: Executor<'c, Database = Postgres>,
{
    let sql = apply_limit_and_offset(SELECT_THERMAL_REGIME, pagination, PAGINATION_PLACEHOLDER);
    sqlx::query_as::<_, ThermalRegimeRow>(&sql)
        .bind(location)
        .bind(range.start)
        .bind(range.end)
        .bind(TEMPERATURE_UNIT)
        .let_owned(|query| bind_pagination(query, pagination))
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows| Ok(to_models(rows)))
}
