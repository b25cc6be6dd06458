//! Vector features drawn on the map.

use crate::ViewerError;
use dhm::C;
use geo::{
    geometry::{Coord, LineString},
    Translate,
};
use geojson::{FeatureCollection, GeoJson, Geometry, JsonObject, JsonValue, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Feature {
    /// A drawn profile line.
    Line(LineString<C>),

    /// A marker, with an optional height.
    Point { coord: Coord<C>, z: Option<C> },
}

impl Feature {
    pub fn coordinates(&self) -> Vec<Coord<C>> {
        match self {
            Self::Line(line) => line.0.clone(),
            Self::Point { coord, .. } => vec![*coord],
        }
    }

    /// Replaces this feature's vertices. A point keeps only the first
    /// coordinate and ignores an empty list.
    pub fn set_coordinates(&mut self, coords: Vec<Coord<C>>) {
        match self {
            Self::Line(line) => *line = LineString::new(coords),
            Self::Point { coord, .. } => {
                if let Some(first) = coords.first() {
                    *coord = *first;
                }
            }
        }
    }

    pub fn translate(&mut self, dx: C, dy: C) {
        match self {
            Self::Line(line) => line.translate_mut(dx, dy),
            Self::Point { coord, .. } => {
                coord.x += dx;
                coord.y += dy;
            }
        }
    }

    pub fn as_line(&self) -> Option<&LineString<C>> {
        match self {
            Self::Line(line) => Some(line),
            Self::Point { .. } => None,
        }
    }
}

/// The map's editable vector layer.
pub trait FeatureStore {
    fn features(&self) -> &[Feature];

    fn clear(&mut self);

    fn add(&mut self, feature: Feature);

    /// Replaces the vertices of feature `index`. Out of range indices
    /// are ignored.
    fn set_coordinates(&mut self, index: usize, coords: Vec<Coord<C>>);

    /// Moves every feature by a map offset.
    fn translate(&mut self, dx: C, dy: C) {
        let moved: Vec<Vec<Coord<C>>> = self
            .features()
            .iter()
            .map(|feature| {
                feature
                    .coordinates()
                    .into_iter()
                    .map(|c| Coord {
                        x: c.x + dx,
                        y: c.y + dy,
                    })
                    .collect()
            })
            .collect();
        for (index, coords) in moved.into_iter().enumerate() {
            self.set_coordinates(index, coords);
        }
    }

    /// Returns the first line in the store, the one a profile follows.
    fn first_line(&self) -> Option<&LineString<C>> {
        self.features().iter().find_map(Feature::as_line)
    }
}

#[derive(Debug, Clone, Default)]
pub struct VecFeatureStore {
    features: Vec<Feature>,
}

impl VecFeatureStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeatureStore for VecFeatureStore {
    fn features(&self) -> &[Feature] {
        &self.features
    }

    fn clear(&mut self) {
        self.features.clear();
    }

    fn add(&mut self, feature: Feature) {
        self.features.push(feature);
    }

    fn set_coordinates(&mut self, index: usize, coords: Vec<Coord<C>>) {
        if let Some(feature) = self.features.get_mut(index) {
            feature.set_coordinates(coords);
        }
    }

    fn translate(&mut self, dx: C, dy: C) {
        for feature in &mut self.features {
            feature.translate(dx, dy);
        }
    }
}

/// Returns `features` as a GeoJSON collection, coordinates and
/// heights rounded to two decimals. Heights are stored in a `Z`
/// property.
pub fn to_feature_collection(features: &[Feature]) -> FeatureCollection {
    let features = features
        .iter()
        .map(|feature| {
            let position = |c: &Coord<C>| vec![round2(c.x), round2(c.y)];
            let (value, z) = match feature {
                Feature::Line(line) => (Value::LineString(line.coords().map(position).collect()), None),
                Feature::Point { coord, z } => (Value::Point(position(coord)), *z),
            };
            let mut properties = JsonObject::new();
            if let Some(z) = z {
                properties.insert("Z".to_owned(), JsonValue::from(round2(z)));
            }
            geojson::Feature {
                bbox: None,
                geometry: Some(Geometry::new(value)),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            }
        })
        .collect();
    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

/// Returns the first line string in a GeoJSON document.
pub fn line_from_geojson(text: &str) -> Result<LineString<C>, ViewerError> {
    let geometries: Vec<Geometry> = match text.parse::<GeoJson>()? {
        GeoJson::Geometry(geometry) => vec![geometry],
        GeoJson::Feature(feature) => feature.geometry.into_iter().collect(),
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .filter_map(|feature| feature.geometry)
            .collect(),
    };
    geometries
        .into_iter()
        .find_map(|geometry| match geometry.value {
            Value::LineString(positions) => Some(
                positions
                    .into_iter()
                    .filter(|p| p.len() >= 2)
                    .map(|p| Coord { x: p[0], y: p[1] })
                    .collect(),
            ),
            _ => None,
        })
        .ok_or(ViewerError::NoLine)
}

fn round2(v: C) -> C {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{line_from_geojson, to_feature_collection, Feature, FeatureStore, VecFeatureStore};
    use crate::ViewerError;
    use geo::{coord, geometry::LineString};
    use geojson::Value;

    fn line() -> LineString<f64> {
        LineString::new(vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 0.0 }])
    }

    #[test]
    fn test_feature_geometry() {
        let mut feature = Feature::Line(line());
        feature.translate(0.5, -0.5);
        assert_eq!(
            feature.coordinates(),
            vec![coord! { x: 0.5, y: -0.5 }, coord! { x: 10.5, y: -0.5 }]
        );

        let mut point = Feature::Point {
            coord: coord! { x: 1.0, y: 1.0 },
            z: None,
        };
        point.set_coordinates(Vec::new());
        assert_eq!(point.coordinates(), vec![coord! { x: 1.0, y: 1.0 }]);
    }

    #[test]
    fn test_store() {
        let mut store = VecFeatureStore::new();
        assert!(store.first_line().is_none());
        store.add(Feature::Point {
            coord: coord! { x: 1.0, y: 1.0 },
            z: Some(3.0),
        });
        store.add(Feature::Line(line()));
        assert_eq!(store.first_line(), Some(&line()));

        store.translate(0.0, 0.5);
        assert_eq!(store.features()[0].coordinates(), vec![coord! { x: 1.0, y: 1.5 }]);
        assert_eq!(store.first_line().unwrap()[1], coord! { x: 10.0, y: 0.5 });

        store.set_coordinates(1, vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 4.0 }]);
        assert_eq!(
            store.features()[1].coordinates(),
            vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 4.0 }]
        );
        store.set_coordinates(9, Vec::new());

        store.clear();
        assert!(store.features().is_empty());
    }

    #[test]
    fn test_markers_to_geojson() {
        let markers = [Feature::Point {
            coord: coord! { x: 2_600_123.4567, y: 1_200_000.001 },
            z: Some(412.3456),
        }];
        let collection = to_feature_collection(&markers);
        assert_eq!(collection.features.len(), 1);
        let feature = &collection.features[0];
        let geometry = feature.geometry.as_ref().unwrap();
        assert_eq!(geometry.value, Value::Point(vec![2_600_123.46, 1_200_000.0]));
        assert_eq!(feature.property("Z").and_then(|z| z.as_f64()), Some(412.35));

        let json = collection.to_string();
        assert!(json.contains("FeatureCollection"));
    }

    #[test]
    fn test_line_from_geojson() {
        let text = r#"{"type": "FeatureCollection", "features": [
            {"type": "Feature", "properties": {}, "geometry": {"type": "Point", "coordinates": [1.0, 2.0]}},
            {"type": "Feature", "properties": {}, "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [10.0, 0.0]]}}
        ]}"#;
        assert_eq!(line_from_geojson(text).unwrap(), line());

        let point = r#"{"type": "Point", "coordinates": [1.0, 2.0]}"#;
        assert!(matches!(line_from_geojson(point), Err(ViewerError::NoLine)));
        assert!(matches!(line_from_geojson("{"), Err(ViewerError::GeoJson(_))));
    }
}
