//! The six AQI categories and their fixed display metadata.
//!
//! The table is indexed by the enum discriminant, so every variant has
//! exactly one row and lookups cannot miss.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::EvaluateError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Good = 0,
    Moderate = 1,
    UnhealthyForSensitiveGroups = 2,
    Unhealthy = 3,
    VeryUnhealthy = 4,
    Hazardous = 5,
}

/// Display metadata for one category.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct CategoryInfo {
    pub label: &'static str,
    pub description: &'static str,
    pub color: &'static str,
    #[serde(skip)]
    pub css_class: &'static str,
    #[serde(skip)]
    pub reference_class: &'static str,
    pub health_advice: &'static str,
    #[serde(skip)]
    pub advice_icon: &'static str,
    #[serde(skip)]
    pub advice_background: &'static str,
    #[serde(skip)]
    pub advice_text_color: &'static str,
    pub band: &'static str,
    pub reference_note: &'static str,
}

static TABLE: [CategoryInfo; 6] = [
    CategoryInfo {
        label: "Good",
        description: "Air quality is satisfactory, and air pollution poses little or no risk.",
        color: "#22c55e",
        css_class: "prediction-good",
        reference_class: "category-good",
        health_advice: "Perfect for outdoor activities! No health concerns.",
        advice_icon: "🌟",
        advice_background: "#dcfce7",
        advice_text_color: "#166534",
        band: "0-50",
        reference_note: "No health risk",
    },
    CategoryInfo {
        label: "Moderate",
        description: "Air quality is acceptable. However, sensitive individuals may experience effects.",
        color: "#eab308",
        css_class: "prediction-moderate",
        reference_class: "category-moderate",
        health_advice: "Generally safe. Sensitive individuals should monitor symptoms.",
        advice_icon: "⚠️",
        advice_background: "#fef3c7",
        advice_text_color: "#a16207",
        band: "51-100",
        reference_note: "Sensitive groups monitor",
    },
    CategoryInfo {
        label: "Unhealthy for Sensitive Groups",
        description: "Members of sensitive groups may experience health effects. General public less likely affected.",
        color: "#f97316",
        css_class: "prediction-unhealthy-sensitive",
        reference_class: "category-unhealthy-sensitive",
        health_advice: "Sensitive groups should limit outdoor activities.",
        advice_icon: "🚨",
        advice_background: "#fed7aa",
        advice_text_color: "#9a3412",
        band: "101-150",
        reference_note: "Sensitive groups limit outdoor time",
    },
    CategoryInfo {
        label: "Unhealthy",
        description: "Some members of the general public may experience health effects; sensitive groups may experience more serious effects.",
        color: "#ef4444",
        css_class: "prediction-unhealthy",
        reference_class: "category-unhealthy",
        health_advice: "Everyone should limit outdoor activities.",
        advice_icon: "⛔",
        advice_background: "#fecaca",
        advice_text_color: "#991b1b",
        band: "151-200",
        reference_note: "Everyone limit outdoor time",
    },
    CategoryInfo {
        label: "Very Unhealthy",
        description: "Health alert: Risk of health effects is increased for everyone.",
        color: "#a855f7",
        css_class: "prediction-very-unhealthy",
        reference_class: "category-very-unhealthy",
        health_advice: "Avoid outdoor activities. Close windows and use air purifiers.",
        advice_icon: "☣️",
        advice_background: "#e9d5ff",
        advice_text_color: "#6b21a8",
        band: "201-300",
        reference_note: "Avoid outdoor activities",
    },
    CategoryInfo {
        label: "Hazardous",
        description: "Health warning of emergency conditions: everyone is more likely to be affected.",
        color: "#991b1b",
        css_class: "prediction-hazardous",
        reference_class: "category-hazardous",
        health_advice: "Emergency conditions! Stay indoors, avoid physical exertion.",
        advice_icon: "☢️",
        advice_background: "#fee2e2",
        advice_text_color: "#7f1d1d",
        band: "301+",
        reference_note: "Emergency conditions",
    },
];

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Good,
        Category::Moderate,
        Category::UnhealthyForSensitiveGroups,
        Category::Unhealthy,
        Category::VeryUnhealthy,
        Category::Hazardous,
    ];

    pub fn info(self) -> &'static CategoryInfo {
        &TABLE[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.info().label
    }

    /// "0-50: No health risk" style line shown in the reference panel.
    pub fn reference_line(self) -> String {
        let info = self.info();
        format!("{}: {}", info.band, info.reference_note)
    }
}

impl FromStr for Category {
    type Err = EvaluateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| EvaluateError::UnrecognizedCategory(s.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Category {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
