//! Feature statistics over a GeoJSON `FeatureCollection`.
use std::{collections::BTreeMap, fmt};

use keyfilter::Value;

/// The document does not have the shape the statistics need.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StatsError {
    #[error("document has no features array")]
    MissingFeatures,
    #[error("feature {0} is not an object")]
    FeatureNotObject(usize),
    #[error("feature {0} has no geometry")]
    MissingGeometry(usize),
    #[error("feature {0}: geometry is not an object")]
    GeometryNotObject(usize),
    #[error("feature {0}: geometry has no type")]
    MissingGeometryType(usize),
    #[error("feature {0}: geometry type is not a string")]
    GeometryTypeNotString(usize),
    #[error("feature {0}: properties is not an object")]
    PropertiesNotObject(usize),
}

/// Counts per geometry type and per property name, both ordered by name.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    pub features: usize,
    pub geometries: BTreeMap<String, usize>,
    pub properties: BTreeMap<String, usize>,
}

impl Report {
    /// Walks `document["features"]`.
    ///
    /// Every feature needs an object `geometry` with a string `type`.
    /// `properties` is optional; when present it must be an object or `null`.
    ///
    /// # Errors
    ///
    /// The first feature that breaks one of these rules.
    pub fn collect(document: &Value) -> Result<Self, StatsError> {
        let features = document
            .get("features")
            .and_then(Value::as_array)
            .ok_or(StatsError::MissingFeatures)?;

        let mut report = Report {
            features: features.len(),
            ..Default::default()
        };
        for (index, feature) in features.iter().enumerate() {
            let feature = feature
                .as_object()
                .ok_or(StatsError::FeatureNotObject(index))?;

            let geometry = feature
                .get("geometry")
                .ok_or(StatsError::MissingGeometry(index))?
                .as_object()
                .ok_or(StatsError::GeometryNotObject(index))?;
            let kind = geometry
                .get("type")
                .ok_or(StatsError::MissingGeometryType(index))?
                .as_str()
                .ok_or(StatsError::GeometryTypeNotString(index))?;
            *report.geometries.entry(kind.to_owned()).or_default() += 1;

            match feature.get("properties") {
                None | Some(Value::Null) => {}
                Some(Value::Object(props)) => {
                    for name in props.keys() {
                        *report.properties.entry(name.clone()).or_default() += 1;
                    }
                }
                Some(_) => return Err(StatsError::PropertiesNotObject(index)),
            }
        }
        Ok(report)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Features: {}", self.features)?;
        writeln!(f, "Geometries:")?;
        for (kind, count) in &self.geometries {
            writeln!(f, "  {count:5}: {kind}")?;
        }
        writeln!(f, "Properties:")?;
        for (name, count) in &self.properties {
            writeln!(f, "  {count:5}: {name}")?;
        }
        Ok(())
    }
}
