use model::{
    location::{Location, LocationChange, LocationFilter},
    Pagination,
};
use observations::database::Result;
use sqlx::{Executor, Postgres};
use utility::let_also::LetAlso;

use crate::data_model::{location::LocationRow, to_models, CountRow};

use super::{apply_count, apply_limit_and_offset, bind_pagination, convert_error};

/// First placeholder after the parameters of the statements below.
const PAGINATION_PLACEHOLDER: usize = 3;

const SELECT_LOCATIONS: &str = "
    SELECT
        name,
        ST_X(coordinates) AS lon,
        ST_Y(coordinates) AS lat,
        elevation_in_metres::DOUBLE PRECISION AS elevation_in_metres,
        comment,
        record_observations,
        accuracy_in_metres::DOUBLE PRECISION AS accuracy_in_metres
    FROM
        locations
    WHERE name LIKE $1 AND ST_GeometryType(coordinates) = $2
    ORDER BY name ASC
";

const SELECT_LOCATION_NAMES: &str = "
    SELECT
        name
    FROM
        locations
    WHERE name LIKE $1 AND ST_GeometryType(coordinates) = $2
    ORDER BY name ASC
";

pub async fn get_all<'c, E>(
    executor: E,
    filter: &LocationFilter,
    pagination: &Pagination,
) -> Result<Vec<Location>>
where
    E: Executor<'c, Database = Postgres>,
{
    let sql = apply_limit_and_offset(SELECT_LOCATIONS, pagination, PAGINATION_PLACEHOLDER);
    sqlx::query_as::<_, LocationRow>(&sql)
        .bind(filter.name_pattern.as_str())
        .bind(filter.geometry_type.as_str())
        .let_owned(|query| bind_pagination(query, pagination))
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows| Ok(to_models(rows)))
}

pub async fn count<'c, E>(
    executor: E,
    filter: &LocationFilter,
    pagination: &Pagination,
) -> Result<i64>
where
    E: Executor<'c, Database = Postgres>,
{
    let sql = apply_count(&apply_limit_and_offset(
        SELECT_LOCATION_NAMES,
        pagination,
        PAGINATION_PLACEHOLDER,
    ));
    sqlx::query_as::<_, CountRow>(&sql)
        .bind(filter.name_pattern.as_str())
        .bind(filter.geometry_type.as_str())
        .let_owned(|query| bind_pagination(query, pagination))
        .fetch_one(executor)
        .await
        .map(|row: CountRow| row.count)
        .map_err(convert_error)
}

pub async fn insert<'c, E>(executor: E, location: &LocationChange) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        "
        INSERT INTO locations(
            name,
            coordinates,
            accuracy_in_metres,
            comment,
            record_observations,
            elevation_in_metres
        )
        VALUES ($1, ST_SetSRID(ST_MakePoint($2, $3), 4326), $4, $5, $6, $7);
        ",
    )
    .bind(location.name.as_str())
    .bind(location.longitude)
    .bind(location.latitude)
    .bind(location.accuracy_in_metres)
    .bind(location.comment.as_deref())
    .bind(location.record_observations)
    .bind(location.elevation_in_metres)
    .execute(executor)
    .await
    .map(|result| result.rows_affected())
    .map_err(convert_error)
}

pub async fn update<'c, E>(executor: E, location: &LocationChange) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query(
        "
        UPDATE locations
        SET coordinates = ST_SetSRID(ST_MakePoint($2, $3), 4326),
            accuracy_in_metres = $4,
            comment = $5,
            record_observations = $6,
            elevation_in_metres = $7
        WHERE name = $1;
        ",
    )
    .bind(location.name.as_str())
    .bind(location.longitude)
    .bind(location.latitude)
    .bind(location.accuracy_in_metres)
    .bind(location.comment.as_deref())
    .bind(location.record_observations)
    .bind(location.elevation_in_metres)
    .execute(executor)
    .await
    .map(|result| result.rows_affected())
    .map_err(convert_error)
}

pub async fn delete<'c, E>(executor: E, name: &str) -> Result<u64>
where
    E: Executor<'c, Database = Postgres>,
{
    sqlx::query("DELETE FROM locations WHERE name = $1;")
        .bind(name)
        .execute(executor)
        .await
        .map(|result| result.rows_affected())
        .map_err(convert_error)
}
