/// Literal reported as `provider` for every location served by this API.
pub const INTERNAL_PROVIDER: &str = "Carleton Internal";

/// Geometry type matched when the client does not ask for one.
pub const DEFAULT_GEOMETRY_TYPE: &str = "ST_Point";

/// A monitoring site. Table: `locations`
///
/// `name` is the natural key used by clients. Coordinates are only present
/// for point geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub elevation_in_metres: Option<f64>,
    pub comment: Option<String>,
    pub record_observations: Option<bool>,
    pub accuracy_in_metres: Option<f64>,
}

/// Values written by an insert or an update of the location called `name`.
/// The geometry is always a point built from `longitude`/`latitude`.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationChange {
    pub name: String,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub comment: Option<String>,
    pub accuracy_in_metres: Option<f64>,
    pub elevation_in_metres: Option<f64>,
    pub record_observations: Option<bool>,
}

/// Which locations to list: a SQL `LIKE` pattern on the name and an exact
/// geometry type as reported by `ST_GeometryType`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationFilter {
    pub name_pattern: String,
    pub geometry_type: String,
}

impl LocationFilter {
    /// `*` in the client pattern is the wildcard and becomes `%`. A missing
    /// or empty pattern matches every name.
    pub fn new(name_pattern: Option<&str>, geometry_type: Option<&str>) -> Self {
        let name_pattern = name_pattern
            .filter(|pattern| !pattern.is_empty())
            .map(|pattern| pattern.replace('*', "%"))
            .unwrap_or_else(|| "%".to_owned());
        let geometry_type = geometry_type
            .filter(|geometry_type| !geometry_type.is_empty())
            .unwrap_or(DEFAULT_GEOMETRY_TYPE)
            .to_owned();
        Self {
            name_pattern,
            geometry_type,
        }
    }
}

impl Default for LocationFilter {
    fn default() -> Self {
        Self::new(None, None)
    }
}
