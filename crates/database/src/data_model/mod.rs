use sqlx::FromRow;

pub mod location;
pub mod observation;
pub mod temperature;

pub trait DatabaseRow {
    type Model;

    fn to_model(self) -> Self::Model;
}

pub fn to_models<R: DatabaseRow>(rows: Vec<R>) -> Vec<R::Model> {
    rows.into_iter().map(DatabaseRow::to_model).collect::<Vec<_>>()
}

/// Result of a statement wrapped by `apply_count`.
#[derive(Debug, Clone, FromRow)]
pub struct CountRow {
    pub count: i64,
}
