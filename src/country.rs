use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::InputError;

/// Countries present in the training data, in selector order.
pub const COUNTRIES: [&str; 175] = [
    "Russian Federation",
    "Brazil",
    "Italy",
    "Poland",
    "France",
    "United States of America",
    "Germany",
    "Belgium",
    "Egypt",
    "China",
    "Netherlands",
    "India",
    "Pakistan",
    "Republic of North Macedonia",
    "Colombia",
    "Romania",
    "Indonesia",
    "Finland",
    "South Africa",
    "United Kingdom of Great Britain and Northern Ireland",
    "United Republic of Tanzania",
    "Haiti",
    "Somalia",
    "Philippines",
    "Latvia",
    "Chad",
    "New Zealand",
    "Tunisia",
    "Viet Nam",
    "Iran (Islamic Republic of)",
    "Mexico",
    "Japan",
    "El Salvador",
    "Bulgaria",
    "Nigeria",
    "South Sudan",
    "Guatemala",
    "Ireland",
    "Turkey",
    "Peru",
    "Democratic Republic of the Congo",
    "Canada",
    "Switzerland",
    "Denmark",
    "Cameroon",
    "Australia",
    "Portugal",
    "Côte d'Ivoire",
    "Sweden",
    "Ethiopia",
    "Thailand",
    "Hungary",
    "Kazakhstan",
    "Israel",
    "Spain",
    "Myanmar",
    "Papua New Guinea",
    "Madagascar",
    "Lithuania",
    "Ghana",
    "Azerbaijan",
    "Armenia",
    "Ukraine",
    "Malaysia",
    "Serbia",
    "Slovakia",
    "Gambia",
    "Ecuador",
    "Bosnia and Herzegovina",
    "Czechia",
    "Argentina",
    "Dominican Republic",
    "Guinea",
    "Bolivia (Plurinational State of)",
    "Bangladesh",
    "Sudan",
    "Chile",
    "Panama",
    "Congo",
    "Kyrgyzstan",
    "Mauritius",
    "Greece",
    "Malawi",
    "Cuba",
    "Saudi Arabia",
    "Benin",
    "Sierra Leone",
    "Lebanon",
    "Uruguay",
    "Namibia",
    "Albania",
    "Guyana",
    "Senegal",
    "Lesotho",
    "Mongolia",
    "Venezuela (Bolivarian Republic of)",
    "Solomon Islands",
    "Paraguay",
    "Zimbabwe",
    "Austria",
    "Croatia",
    "Honduras",
    "Cambodia",
    "Uganda",
    "Republic of Moldova",
    "Angola",
    "Kingdom of Eswatini",
    "Afghanistan",
    "Uzbekistan",
    "Zambia",
    "Morocco",
    "Belarus",
    "Norway",
    "Malta",
    "Rwanda",
    "Sri Lanka",
    "Botswana",
    "Burundi",
    "Jamaica",
    "Central African Republic",
    "Kenya",
    "Niger",
    "Mali",
    "Slovenia",
    "Costa Rica",
    "Nicaragua",
    "Republic of Korea",
    "Burkina Faso",
    "Cabo Verde",
    "Mozambique",
    "Mauritania",
    "Guinea-Bissau",
    "United Arab Emirates",
    "Eritrea",
    "Tajikistan",
    "Barbados",
    "Algeria",
    "Iraq",
    "Syrian Arab Republic",
    "Gabon",
    "Liberia",
    "Lao People's Democratic Republic",
    "Bhutan",
    "Yemen",
    "Togo",
    "Turkmenistan",
    "Saint Lucia",
    "Kuwait",
    "Libya",
    "Georgia",
    "Nepal",
    "Estonia",
    "Trinidad and Tobago",
    "Jordan",
    "Cyprus",
    "Montenegro",
    "Comoros",
    "Iceland",
    "Andorra",
    "Oman",
    "Equatorial Guinea",
    "Luxembourg",
    "Vanuatu",
    "Aruba",
    "Belize",
    "Qatar",
    "Palau",
    "Suriname",
    "Singapore",
    "Maldives",
    "Bahrain",
    "Seychelles",
    "State of Palestine",
    "Saint Kitts and Nevis",
    "Monaco",
];

/// A member of the closed country vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub struct Country(usize);

impl Country {
    pub const DEFAULT_NAME: &'static str = "Pakistan";

    pub fn name(self) -> &'static str {
        COUNTRIES[self.0]
    }

    /// Position in `COUNTRIES`.
    pub fn index(self) -> usize {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Country> {
        (0..COUNTRIES.len()).map(Country)
    }
}

impl Default for Country {
    fn default() -> Self {
        COUNTRIES
            .iter()
            .position(|c| *c == Self::DEFAULT_NAME)
            .map(Country)
            .unwrap_or(Country(0))
    }
}

impl FromStr for Country {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        COUNTRIES
            .iter()
            .position(|c| *c == s)
            .map(Country)
            .ok_or_else(|| InputError::UnknownCountry(s.to_string()))
    }
}

impl TryFrom<String> for Country {
    type Error = InputError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Country {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn vocabulary_has_no_duplicates() {
        let unique: HashSet<&str> = COUNTRIES.iter().copied().collect();
        assert_eq!(unique.len(), COUNTRIES.len());
    }

    #[test]
    fn default_is_pakistan() {
        assert_eq!(Country::default().name(), "Pakistan");
    }

    #[test]
    fn parses_names_with_punctuation() {
        for name in ["Côte d'Ivoire", "Lao People's Democratic Republic", "Iran (Islamic Republic of)"] {
            let c: Country = name.parse().unwrap();
            assert_eq!(c.name(), name);
        }
    }

    #[test]
    fn rejects_names_outside_vocabulary() {
        assert_eq!(
            "pakistan".parse::<Country>(),
            Err(InputError::UnknownCountry("pakistan".into()))
        );
        assert!("United States".parse::<Country>().is_err());
    }

    #[test]
    fn all_iterates_in_selector_order() {
        let names: Vec<&str> = Country::all().map(Country::name).collect();
        assert_eq!(names.len(), 175);
        assert_eq!(names[0], "Russian Federation");
        assert_eq!(names[174], "Monaco");
    }
}
