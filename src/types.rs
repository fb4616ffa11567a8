use serde::{Deserialize, Serialize};

use crate::country::Country;
use crate::error::InputError;

// Column names the pipeline was trained on.
pub const COL_AQI: &str = "AQI Value";
pub const COL_CO_AQI: &str = "CO AQI Value";
pub const COL_OZONE_AQI: &str = "Ozone AQI Value";
pub const COL_NO2_AQI: &str = "NO2 AQI Value";
pub const COL_COUNTRY: &str = "Country";

/// Numeric columns in the order the pipeline expects them.
pub const NUMERIC_COLUMNS: [&str; 4] = [COL_AQI, COL_CO_AQI, COL_OZONE_AQI, COL_NO2_AQI];

macro_rules! bounded_measurement {
    ($(#[$meta:meta])* $name:ident, $field:literal, $min:literal, $max:literal, $default:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "i64", into = "u16")]
        pub struct $name(u16);

        impl $name {
            pub const FIELD: &'static str = $field;
            pub const MIN: u16 = $min;
            pub const MAX: u16 = $max;
            pub const DEFAULT: Self = Self($default);

            /// Accepts `value` only if it lies inside the declared domain.
            pub fn new(value: i64) -> Result<Self, InputError> {
                if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
                    return Err(InputError::OutOfRange {
                        field: Self::FIELD,
                        value,
                        min: Self::MIN,
                        max: Self::MAX,
                    });
                }
                Ok(Self(value as u16))
            }

            /// Slider semantics: the value is pinned to the nearest end of the range.
            pub fn clamped(value: i64) -> Self {
                Self(value.clamp(i64::from(Self::MIN), i64::from(Self::MAX)) as u16)
            }

            pub const fn get(self) -> u16 {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::DEFAULT
            }
        }

        impl TryFrom<i64> for $name {
            type Error = InputError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for u16 {
            fn from(v: $name) -> u16 {
                v.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

bounded_measurement!(
    /// Overall air quality index.
    AqiValue, "aqi_value", 6, 500, 50
);
bounded_measurement!(
    /// Carbon monoxide sub-index.
    CoAqiValue, "co_aqi_value", 0, 133, 10
);
bounded_measurement!(
    /// Ground-level ozone sub-index.
    OzoneAqiValue, "ozone_aqi_value", 0, 235, 20
);
bounded_measurement!(
    /// Nitrogen dioxide sub-index.
    No2AqiValue, "no2_aqi_value", 0, 91, 15
);

/// One complete set of model inputs. Every field is a bounded type, so an
/// out-of-domain request cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub aqi_value: AqiValue,
    pub co_aqi_value: CoAqiValue,
    pub ozone_aqi_value: OzoneAqiValue,
    pub no2_aqi_value: No2AqiValue,
    pub country: Country,
}

impl PredictionRequest {
    /// Single-row table with the pipeline's column names.
    pub fn to_record(&self) -> FeatureRecord {
        FeatureRecord::new()
            .with(COL_AQI, FeatureValue::Int(self.aqi_value.get().into()))
            .with(COL_CO_AQI, FeatureValue::Int(self.co_aqi_value.get().into()))
            .with(COL_OZONE_AQI, FeatureValue::Int(self.ozone_aqi_value.get().into()))
            .with(COL_NO2_AQI, FeatureValue::Int(self.no2_aqi_value.get().into()))
            .with(COL_COUNTRY, FeatureValue::Text(self.country.name().to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Int(i64),
    Text(String),
}

/// A named, ordered single-row record handed to a `Predictor`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureRecord {
    columns: Vec<(String, FeatureValue)>,
}

impl FeatureRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: FeatureValue) -> Self {
        self.columns.push((name.to_string(), value));
        self
    }

    pub fn get(&self, name: &str) -> Option<&FeatureValue> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(n, _)| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
