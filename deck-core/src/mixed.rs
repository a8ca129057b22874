//! Values the host may report as indeterminate.
//!
//! Text runs with non-uniform styling report the literal `"MIXED"` for the
//! affected property. Line height and letter spacing may additionally arrive
//! either as a bare number or as a `{ value, unit }` record. Both shapes are
//! modelled explicitly so every caller has to decide what an indeterminate
//! value means for it.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire marker for an indeterminate value.
pub const MIXED_MARKER: &str = "MIXED";

#[derive(Deserialize)]
enum Marker {
    #[serde(rename = "MIXED")]
    Mixed,
}

/// A property that is either uniform across the node or mixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mixed<T> {
    /// The same value applies to the whole node.
    Uniform(T),
    /// Different parts of the node disagree.
    Mixed,
}

impl<T> Mixed<T> {
    /// The uniform value, or `fallback` when mixed.
    pub fn unwrap_or(self, fallback: T) -> T {
        match self {
            Self::Uniform(value) => value,
            Self::Mixed => fallback,
        }
    }

    /// Borrow the uniform value if there is one.
    #[must_use]
    pub fn as_uniform(&self) -> Option<&T> {
        match self {
            Self::Uniform(value) => Some(value),
            Self::Mixed => None,
        }
    }

    /// Whether the host reported an indeterminate value.
    #[must_use]
    pub fn is_mixed(&self) -> bool {
        matches!(self, Self::Mixed)
    }
}

impl<T: Default> Default for Mixed<T> {
    fn default() -> Self {
        Self::Uniform(T::default())
    }
}

impl<T> From<T> for Mixed<T> {
    fn from(value: T) -> Self {
        Self::Uniform(value)
    }
}

impl<T: Serialize> Serialize for Mixed<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Uniform(value) => value.serialize(serializer),
            Self::Mixed => serializer.serialize_str(MIXED_MARKER),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Mixed<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr<U> {
            Marker(Marker),
            Value(U),
        }

        Ok(match Repr::<T>::deserialize(deserializer)? {
            Repr::Marker(Marker::Mixed) => Self::Mixed,
            Repr::Value(value) => Self::Uniform(value),
        })
    }
}

/// Unit attached to a typographic measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeasureUnit {
    /// Absolute pixels.
    #[default]
    Pixels,
    /// Percentage of the font size.
    Percent,
    /// Host-chosen automatic value.
    Auto,
}

/// A typographic measure such as line height or letter spacing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Measure {
    /// A bare number, in pixels.
    Uniform(f64),
    /// A number with an explicit unit.
    WithUnit {
        /// Magnitude.
        value: f64,
        /// Unit of `value`.
        unit: MeasureUnit,
    },
    /// Not uniform across the text.
    Mixed,
}

impl Default for Measure {
    fn default() -> Self {
        Self::WithUnit {
            value: 0.0,
            unit: MeasureUnit::Auto,
        }
    }
}

impl Measure {
    /// Resolve to a concrete spacing, using `fallback` when mixed.
    #[must_use]
    pub fn resolve(self, fallback: Spacing) -> Spacing {
        match self {
            Self::Uniform(value) => Spacing {
                value,
                unit: MeasureUnit::Pixels,
            },
            Self::WithUnit { value, unit } => Spacing { value, unit },
            Self::Mixed => fallback,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct UnitRepr {
    #[serde(default)]
    value: f64,
    unit: MeasureUnit,
}

impl Serialize for Measure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Self::Uniform(value) => serializer.serialize_f64(value),
            Self::WithUnit { value, unit } => UnitRepr { value, unit }.serialize(serializer),
            Self::Mixed => serializer.serialize_str(MIXED_MARKER),
        }
    }
}

impl<'de> Deserialize<'de> for Measure {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(f64),
            Unit(UnitRepr),
            Marker(Marker),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Number(value) => Self::Uniform(value),
            Repr::Unit(UnitRepr { value, unit }) => Self::WithUnit { value, unit },
            Repr::Marker(Marker::Mixed) => Self::Mixed,
        })
    }
}

/// A resolved typographic measure carried on text records.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spacing {
    /// Magnitude.
    pub value: f64,
    /// Unit of `value`.
    pub unit: MeasureUnit,
}

impl Spacing {
    /// A pixel-valued spacing.
    #[must_use]
    pub const fn pixels(value: f64) -> Self {
        Self {
            value,
            unit: MeasureUnit::Pixels,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_marker_and_values() {
        let uniform: Mixed<f64> = serde_json::from_str("24").expect("number");
        assert_eq!(uniform, Mixed::Uniform(24.0));

        let mixed: Mixed<f64> = serde_json::from_str("\"MIXED\"").expect("marker");
        assert!(mixed.is_mixed());
        assert!((mixed.unwrap_or(12.0) - 12.0).abs() < f64::EPSILON);

        let text: Mixed<String> = serde_json::from_str("\"Inter\"").expect("string");
        assert_eq!(text.as_uniform().map(String::as_str), Some("Inter"));
    }

    #[test]
    fn test_measure_accepts_all_three_shapes() {
        let bare: Measure = serde_json::from_str("18").expect("bare");
        assert_eq!(bare, Measure::Uniform(18.0));

        let unit: Measure =
            serde_json::from_str(r#"{ "value": 150, "unit": "PERCENT" }"#).expect("unit");
        assert_eq!(
            unit,
            Measure::WithUnit {
                value: 150.0,
                unit: MeasureUnit::Percent
            }
        );

        let auto: Measure = serde_json::from_str(r#"{ "unit": "AUTO" }"#).expect("auto");
        assert_eq!(
            auto,
            Measure::WithUnit {
                value: 0.0,
                unit: MeasureUnit::Auto
            }
        );

        let mixed: Measure = serde_json::from_str("\"MIXED\"").expect("mixed");
        assert_eq!(mixed, Measure::Mixed);
    }

    #[test]
    fn test_measure_resolution() {
        let fallback = Spacing::pixels(16.0);
        assert_eq!(Measure::Mixed.resolve(fallback), fallback);
        assert_eq!(Measure::Uniform(2.5).resolve(fallback), Spacing::pixels(2.5));
        assert_eq!(
            Measure::WithUnit {
                value: 120.0,
                unit: MeasureUnit::Percent
            }
            .resolve(fallback),
            Spacing {
                value: 120.0,
                unit: MeasureUnit::Percent
            }
        );
    }

    #[test]
    fn test_measure_serializes_back_to_wire_shape() {
        let json = serde_json::to_value(Measure::Mixed).expect("serialize");
        assert_eq!(json, serde_json::json!("MIXED"));

        let json = serde_json::to_value(Measure::WithUnit {
            value: 1.5,
            unit: MeasureUnit::Pixels,
        })
        .expect("serialize");
        assert_eq!(json, serde_json::json!({ "value": 1.5, "unit": "PIXELS" }));
    }
}
