use std::fmt::Write as _;

use model::Pagination;
use observations::database::DatabaseError;
use sqlx::{
    postgres::{PgArguments, PgRow},
    query::QueryAs,
    FromRow, Postgres,
};

pub mod location;
pub mod observation;
pub mod temperature;

pub(crate) fn convert_error(why: sqlx::Error) -> DatabaseError {
    match why {
        sqlx::Error::RowNotFound => DatabaseError::NotFound,
        _ => DatabaseError::Other(Box::new(why)),
    }
}

// query building

/// Appends `LIMIT`/`OFFSET` clauses (in that order) for the values present in
/// `pagination`, numbering their placeholders from `next_placeholder`.
///
/// The values themselves are bound with [`bind_pagination`].
pub fn apply_limit_and_offset(
    sql: &str,
    pagination: &Pagination,
    next_placeholder: usize,
) -> String {
    let mut sql = sql.trim_end().to_owned();
    let mut placeholder = next_placeholder;
    if pagination.limit.is_some() {
        let _ = write!(&mut sql, " LIMIT ${}", placeholder);
        placeholder += 1;
    }
    if pagination.offset.is_some() {
        let _ = write!(&mut sql, " OFFSET ${}", placeholder);
    }
    sql
}

/// Wraps `sql` so it returns the number of rows it would yield, in a single
/// `count` column.
pub fn apply_count(sql: &str) -> String {
    format!("SELECT COUNT(*) AS count FROM ({}) AS src", sql.trim_end())
}

/// Binds the values matching the placeholders of [`apply_limit_and_offset`].
/// Must be called after every other parameter of the statement is bound.
pub(crate) fn bind_pagination<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    pagination: &Pagination,
) -> QueryAs<'q, Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, PgRow>,
{
    let mut query = query;
    if let Some(limit) = pagination.limit {
        query = query.bind(bigint(limit));
    }
    if let Some(offset) = pagination.offset {
        query = query.bind(bigint(offset));
    }
    query
}

fn bigint(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Highest `$n` placeholder used by `sql`, 0 if there is none.
#[cfg(test)]
pub(crate) fn highest_placeholder(sql: &str) -> usize {
    sql.split('$')
        .skip(1)
        .filter_map(|rest| {
            let digits = rest
                .chars()
                .take_while(char::is_ascii_digit)
                .collect::<String>();
            digits.parse::<usize>().ok()
        })
        .max()
        .unwrap_or(0)
}
