/// Sensor labels of the categorical (geology and ground ice) observations.
pub const CATEGORICAL_LABELS: [&str; 4] = [
    "geo_class_1",
    "ice_visual_perc",
    "ice_description",
    "geo_description",
];

/// A descriptor recorded over the depth interval `height_from`..`height_to`.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalObservation {
    pub location_name: String,
    pub label: String,
    /// `height_max_metres` of the observation.
    pub height_from: Option<f64>,
    /// `height_min_metres` of the observation.
    pub height_to: Option<f64>,
    /// May be NaN.
    pub numeric_value: Option<f64>,
    pub text_value: Option<String>,
}

