/// Serializes floats that may carry NaN. NaN is not representable in JSON, so
/// it is written as an empty string; `None` stays `null`.
pub mod nan_as_empty {
    use serde::Serializer;

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if value.is_nan() {
            serializer.serialize_str("")
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn serialize_option<S>(
        value: &Option<f64>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Timestamps as HTTP dates, e.g. `Wed, 01 Jan 2020 00:00:00 GMT`.
pub mod http_date {
    use chrono::NaiveDateTime;
    use serde::Serializer;

    pub const FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

    pub fn serialize<S>(
        date_time: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&date_time.format(FORMAT))
    }
}

pub mod date_time {
    use core::fmt;

    use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
    use serde::{
        de::{self, Unexpected, Visitor},
        Deserializer,
    };

    const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

    /// Parses `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` (also with `T`) or RFC 3339.
    /// Values without an offset are taken as UTC.
    pub fn parse_utc(value: &str) -> Option<DateTime<Utc>> {
        let value = value.trim();
        if let Ok(date_time) = DateTime::parse_from_rfc3339(value) {
            return Some(date_time.with_timezone(&Utc));
        }
        for format in DATE_TIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
                return Some(naive.and_utc());
            }
        }
        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
    }

    /// Optional timestamp where an absent or empty value is `None`.
    /// Use together with `#[serde(default)]`.
    pub fn deserialize_utc_option<'de, D>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct UtcVisitor;

        impl<'de> Visitor<'de> for UtcVisitor {
            type Value = Option<DateTime<Utc>>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a date (YYYY-MM-DD) or a date time")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_str(self)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.trim().is_empty() {
                    return Ok(None);
                }
                parse_utc(value)
                    .map(Some)
                    .ok_or_else(|| de::Error::invalid_value(Unexpected::Str(value), &self))
            }
        }

        deserializer.deserialize_option(UtcVisitor)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};
    use serde::{Deserialize, Serialize};

    use super::date_time::parse_utc;

    #[derive(Serialize)]
    struct Reading {
        #[serde(serialize_with = "super::nan_as_empty::serialize_option")]
        value: Option<f64>,
    }

    #[derive(Deserialize)]
    struct Range {
        #[serde(deserialize_with = "super::date_time::deserialize_utc_option", default)]
        start: Option<chrono::DateTime<Utc>>,
    }

    #[test]
    fn nan_becomes_empty_string() {
        let json = serde_json::to_string(&Reading {
            value: Some(f64::NAN),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":""}"#);
    }

    #[test]
    fn regular_and_missing_values_are_kept() {
        let json = serde_json::to_string(&Reading { value: Some(-1.5) }).unwrap();
        assert_eq!(json, r#"{"value":-1.5}"#);
        let json = serde_json::to_string(&Reading { value: None }).unwrap();
        assert_eq!(json, r#"{"value":null}"#);
    }

    #[test]
    fn http_date_format() {
        let time = NaiveDate::from_ymd_opt(2020, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_eq!(
            time.format(super::http_date::FORMAT).to_string(),
            "Wed, 01 Jan 2020 00:00:00 GMT"
        );
    }

    #[test]
    fn parses_supported_date_formats() {
        let midnight = Utc.with_ymd_and_hms(2019, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_utc("2019-07-01"), Some(midnight));
        assert_eq!(parse_utc("2019-07-01 00:00:00"), Some(midnight));
        assert_eq!(parse_utc("2019-07-01T02:00:00+02:00"), Some(midnight));
        assert_eq!(parse_utc("July 1st"), None);
    }

    #[test]
    fn empty_date_is_none() {
        let range: Range = serde_json::from_str(r#"{"start":""}"#).unwrap();
        assert!(range.start.is_none());
        let range: Range = serde_json::from_str(r#"{}"#).unwrap();
        assert!(range.start.is_none());
        assert!(serde_json::from_str::<Range>(r#"{"start":"nope"}"#).is_err());
    }
}
