//! Raster source descriptors.

use crate::DhmError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date format used by source configuration (`DD.MM.YYYY`).
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// One cloud optimized GeoTIFF layer, typically a single survey year.
///
/// Sources are built once from static configuration and never
/// mutated; a viewer swaps between them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawSource", into = "RawSource")]
pub struct RasterSource {
    /// Display label, e.g. `DHM 2019`.
    pub name: String,

    /// Acquisition date.
    pub date: NaiveDate,

    /// Location of the raster data.
    pub url: String,

    /// Selected band numbers (1-based, GeoTIFF convention).
    pub bands: Vec<usize>,
}

impl RasterSource {
    /// Returns a source, parsing `date` as `DD.MM.YYYY`.
    pub fn new(
        name: impl Into<String>,
        date: &str,
        url: impl Into<String>,
        bands: Vec<usize>,
    ) -> Result<Self, DhmError> {
        Ok(Self {
            name: name.into(),
            date: parse_date(date)?,
            url: url.into(),
            bands,
        })
    }
}

/// Parses a configuration date.
pub fn parse_date(value: &str) -> Result<NaiveDate, DhmError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| DhmError::Date {
        value: value.to_owned(),
    })
}

/// On-disk representation of [`RasterSource`].
#[derive(Serialize, Deserialize)]
struct RawSource {
    name: String,
    date: String,
    url: String,
    #[serde(default = "default_bands")]
    bands: Vec<usize>,
}

fn default_bands() -> Vec<usize> {
    vec![1]
}

impl TryFrom<RawSource> for RasterSource {
    type Error = DhmError;

    fn try_from(raw: RawSource) -> Result<Self, Self::Error> {
        Self::new(raw.name, &raw.date, raw.url, raw.bands)
    }
}

impl From<RasterSource> for RawSource {
    fn from(source: RasterSource) -> Self {
        Self {
            name: source.name,
            date: source.date.format(DATE_FORMAT).to_string(),
            url: source.url,
            bands: source.bands,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_date, RasterSource};
    use crate::DhmError;
    use chrono::NaiveDate;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("15.06.2010").unwrap(),
            NaiveDate::from_ymd_opt(2010, 6, 15).unwrap()
        );
        assert!(matches!(
            parse_date("2010-06-15"),
            Err(DhmError::Date { .. })
        ));
        assert!(parse_date("31.02.2010").is_err());
    }

    #[test]
    fn test_deserialize() {
        let json = r#"[
            {"name": "DHM 2001", "date": "01.06.2001", "url": "data/dhm_2001.asc", "bands": [1]},
            {"name": "DHM 2010", "date": "15.06.2010", "url": "data/dhm_2010.asc"}
        ]"#;
        let sources: Vec<RasterSource> = serde_json::from_str(json).unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].date, NaiveDate::from_ymd_opt(2001, 6, 1).unwrap());
        assert_eq!(sources[1].bands, vec![1]);
    }

    #[test]
    fn test_malformed_date_fails_whole_load() {
        let json = r#"[
            {"name": "DHM 2001", "date": "01.06.2001", "url": "a.asc"},
            {"name": "DHM 2010", "date": "2010", "url": "b.asc"}
        ]"#;
        let err = serde_json::from_str::<Vec<RasterSource>>(json).unwrap_err();
        assert!(err.to_string().contains("invalid date"));
    }

    #[test]
    fn test_serialize_keeps_date_format() {
        let source = RasterSource::new("DHM 2023", "01.08.2023", "c.asc", vec![1]).unwrap();
        let json = serde_json::to_string(&source).unwrap();
        assert!(json.contains(r#""date":"01.08.2023""#));
    }
}
