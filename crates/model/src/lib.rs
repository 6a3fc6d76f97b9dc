use serde::Deserialize;
use serde_with::{serde_as, NoneAsEmptyString};

pub mod location;
pub mod observation;
pub mod temperature;

/// `LIMIT`/`OFFSET` taken from the query string. Empty values count as absent.
#[serde_as]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct Pagination {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub limit: Option<u64>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Self {
        Self { limit, offset }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// Applies the page to an already ordered sequence, the way the database
    /// would: skip `offset` rows, then keep at most `limit`.
    pub fn page<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skip = self.offset.map_or(0, saturating_usize);
        let take = self.limit.map_or(usize::MAX, saturating_usize);
        items.into_iter().skip(skip).take(take).collect()
    }
}

fn saturating_usize(value: u64) -> usize {
    usize::try_from(value).unwrap_or(usize::MAX)
}
