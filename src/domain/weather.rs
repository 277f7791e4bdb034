use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::TypeConstraintError;

/// Store locations the customer screen can show the weather for.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    #[default]
    CollegeStation,
    Houston,
    Austin,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::CollegeStation, Location::Houston, Location::Austin];

    pub fn as_str(self) -> &'static str {
        match self {
            Location::CollegeStation => "college_station",
            Location::Houston => "houston",
            Location::Austin => "austin",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Location::CollegeStation => "College Station",
            Location::Houston => "Houston",
            Location::Austin => "Austin",
        }
    }

    /// Latitude and longitude.
    pub fn coordinates(self) -> (f64, f64) {
        match self {
            Location::CollegeStation => (30.621, -96.3255),
            Location::Houston => (29.7604, -95.3698),
            Location::Austin => (30.2672, -97.7431),
        }
    }
}

impl FromStr for Location {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Location::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| TypeConstraintError::InvalidValue(format!("unknown location '{s}'")))
    }
}

/// Current conditions shown in the customer header.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Weather {
    pub location: Location,
    /// Degrees Fahrenheit, rounded.
    pub temperature: i64,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locations_parse_from_their_keys() {
        for location in Location::ALL {
            assert_eq!(location.as_str().parse::<Location>(), Ok(location));
        }
        assert!("dallas".parse::<Location>().is_err());
    }
}
