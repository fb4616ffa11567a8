use serde::Deserialize;

use crate::country::Country;
use crate::error::InputError;
use crate::types::{AqiValue, CoAqiValue, No2AqiValue, OzoneAqiValue, PredictionRequest};

/// Raw values as posted by the page form. Missing fields keep their
/// current value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormInput {
    pub aqi_value: Option<i64>,
    pub co_aqi_value: Option<i64>,
    pub ozone_aqi_value: Option<i64>,
    pub no2_aqi_value: Option<i64>,
    pub country: Option<String>,
}

/// Current value of each input control for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputCollector {
    aqi_value: AqiValue,
    co_aqi_value: CoAqiValue,
    ozone_aqi_value: OzoneAqiValue,
    no2_aqi_value: No2AqiValue,
    country: Country,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_aqi_value(&mut self, v: AqiValue) {
        self.aqi_value = v;
    }

    pub fn set_co_aqi_value(&mut self, v: CoAqiValue) {
        self.co_aqi_value = v;
    }

    pub fn set_ozone_aqi_value(&mut self, v: OzoneAqiValue) {
        self.ozone_aqi_value = v;
    }

    pub fn set_no2_aqi_value(&mut self, v: No2AqiValue) {
        self.no2_aqi_value = v;
    }

    pub fn set_country(&mut self, c: Country) {
        self.country = c;
    }

    pub fn aqi_value(&self) -> AqiValue {
        self.aqi_value
    }

    pub fn co_aqi_value(&self) -> CoAqiValue {
        self.co_aqi_value
    }

    pub fn ozone_aqi_value(&self) -> OzoneAqiValue {
        self.ozone_aqi_value
    }

    pub fn no2_aqi_value(&self) -> No2AqiValue {
        self.no2_aqi_value
    }

    pub fn country(&self) -> Country {
        self.country
    }

    /// Applies a form post the way the page controls would: sliders pin
    /// numbers to their range, the selector only offers known countries.
    /// Nothing is written if the country is not in the vocabulary.
    pub fn apply(&mut self, form: &FormInput) -> Result<(), InputError> {
        let country = form.country.as_deref().map(str::parse::<Country>).transpose()?;

        if let Some(v) = form.aqi_value {
            self.set_aqi_value(AqiValue::clamped(v));
        }
        if let Some(v) = form.co_aqi_value {
            self.set_co_aqi_value(CoAqiValue::clamped(v));
        }
        if let Some(v) = form.ozone_aqi_value {
            self.set_ozone_aqi_value(OzoneAqiValue::clamped(v));
        }
        if let Some(v) = form.no2_aqi_value {
            self.set_no2_aqi_value(No2AqiValue::clamped(v));
        }
        if let Some(c) = country {
            self.set_country(c);
        }
        Ok(())
    }

    /// Fresh request from the current values.
    pub fn request(&self) -> PredictionRequest {
        PredictionRequest {
            aqi_value: self.aqi_value,
            co_aqi_value: self.co_aqi_value,
            ozone_aqi_value: self.ozone_aqi_value,
            no2_aqi_value: self.no2_aqi_value,
            country: self.country,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_initial_controls() {
        let req = InputCollector::new().request();
        assert_eq!(req.aqi_value.get(), 50);
        assert_eq!(req.co_aqi_value.get(), 10);
        assert_eq!(req.ozone_aqi_value.get(), 20);
        assert_eq!(req.no2_aqi_value.get(), 15);
        assert_eq!(req.country.name(), "Pakistan");
    }

    #[test]
    fn setters_are_independent() {
        let mut c = InputCollector::new();
        c.set_ozone_aqi_value(OzoneAqiValue::new(235).unwrap());
        c.set_country("Japan".parse().unwrap());
        assert_eq!(c.ozone_aqi_value().get(), 235);
        assert_eq!(c.aqi_value(), AqiValue::DEFAULT);
        assert_eq!(c.country().name(), "Japan");
    }

    #[test]
    fn apply_clamps_like_a_slider() {
        let mut c = InputCollector::new();
        c.apply(&FormInput {
            aqi_value: Some(0),
            co_aqi_value: Some(500),
            ozone_aqi_value: None,
            no2_aqi_value: Some(91),
            country: Some("Chile".into()),
        })
        .unwrap();
        assert_eq!(c.aqi_value().get(), 6);
        assert_eq!(c.co_aqi_value().get(), 133);
        assert_eq!(c.ozone_aqi_value().get(), 20);
        assert_eq!(c.no2_aqi_value().get(), 91);
        assert_eq!(c.country().name(), "Chile");
    }

    #[test]
    fn apply_with_unknown_country_changes_nothing() {
        let mut c = InputCollector::new();
        let err = c
            .apply(&FormInput {
                aqi_value: Some(300),
                country: Some("Narnia".into()),
                ..FormInput::default()
            })
            .unwrap_err();
        assert_eq!(err, InputError::UnknownCountry("Narnia".into()));
        assert_eq!(c, InputCollector::new());
    }

    #[test]
    fn domain_edges_reach_the_request() {
        let mut c = InputCollector::new();
        c.set_aqi_value(AqiValue::new(6).unwrap());
        assert_eq!(c.request().aqi_value.get(), 6);
        c.set_aqi_value(AqiValue::new(500).unwrap());
        assert_eq!(c.request().aqi_value.get(), 500);
    }
}
