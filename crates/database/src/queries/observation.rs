use model::{
    observation::{CategoricalObservation, CATEGORICAL_LABELS},
    Pagination,
};
use observations::database::Result;
use sqlx::{Executor, Postgres};
use utility::let_also::LetAlso;

use crate::data_model::{
    observation::{CategoricalObservationRow, CategoryRow},
    to_models,
};

use super::{apply_limit_and_offset, bind_pagination, convert_error};

const CATEGORICAL_PAGINATION_PLACEHOLDER: usize = 4;
const CATEGORIES_PAGINATION_PLACEHOLDER: usize = 3;

// observations are attached to a location by geometry, not by key
const SELECT_CATEGORICAL: &str = "
    SELECT
        locations.name AS name,
        sensors.label AS label,
        observations.height_max_metres::DOUBLE PRECISION AS ffrom,
        observations.height_min_metres::DOUBLE PRECISION AS tto,
        observations.numeric_value::DOUBLE PRECISION AS numeric_value,
        observations.text_value AS text_value
    FROM
        observations
        JOIN locations ON ST_Intersects(observations.location, locations.coordinates)
        INNER JOIN sensors ON sensors.id = observations.sensor_id
    WHERE locations.name = $1
        AND ($2::TEXT IS NULL OR sensors.label = $2)
        AND sensors.label = ANY($3)
    ORDER BY label ASC, ffrom DESC
";

const SELECT_CATEGORIES: &str = "
    SELECT DISTINCT
        sensors.label AS label
    FROM
        observations
        JOIN locations ON ST_Intersects(observations.location, locations.coordinates)
        INNER JOIN sensors ON sensors.id = observations.sensor_id
    WHERE locations.name = $1
        AND sensors.label = ANY($2)
    ORDER BY label ASC
";

fn categorical_labels() -> Vec<String> {
    CATEGORICAL_LABELS
        .iter()
        .map(|label| label.to_string())
        .collect()
}

pub async fn categorical<'c, E>(
    executor: E,
    location: &str,
    category: Option<&str>,
    pagination: &Pagination,
) -> Result<Vec<CategoricalObservation>>
where
    E: Executor<'c, Database = Postgres>,
{
    let sql = apply_limit_and_offset(
        SELECT_CATEGORICAL,
        pagination,
        CATEGORICAL_PAGINATION_PLACEHOLDER,
    );
    sqlx::query_as::<_, CategoricalObservationRow>(&sql)
        .bind(location)
        .bind(category)
        .bind(categorical_labels())
        .let_owned(|query| bind_pagination(query, pagination))
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows| Ok(to_models(rows)))
}

pub async fn categories<'c, E>(
    executor: E,
    location: &str,
    pagination: &Pagination,
) -> Result<Vec<String>>
where
    E: Executor<'c, Database = Postgres>,
{
    let sql = apply_limit_and_offset(
        SELECT_CATEGORIES,
        pagination,
        CATEGORIES_PAGINATION_PLACEHOLDER,
    );
    sqlx::query_as::<_, CategoryRow>(&sql)
        .bind(location)
        .bind(categorical_labels())
        .let_owned(|query| bind_pagination(query, pagination))
        .fetch_all(executor)
        .await
        .map_err(convert_error)?
        .let_owned(|rows| Ok(to_models(rows)))
}
