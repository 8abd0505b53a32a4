use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::PredictionError;

/// Regions the model was trained on.
///
/// The integer codes are the ones the model was fit with and are not
/// sequential in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    Jabodetabek,
    NonJabodetabekJava,
    JavaCombined,
    Sumatera,
}

impl Region {
    pub const ALL: [Region; 4] = [
        Region::Jabodetabek,
        Region::NonJabodetabekJava,
        Region::JavaCombined,
        Region::Sumatera,
    ];

    pub fn code(self) -> i64 {
        match self {
            Region::Jabodetabek => 0,
            Region::NonJabodetabekJava => 2,
            Region::JavaCombined => 1,
            Region::Sumatera => 3,
        }
    }

    /// Label shown in the region selector.
    pub fn label(self) -> &'static str {
        match self {
            Region::Jabodetabek => "Jabodetabek",
            Region::NonJabodetabekJava => "Non Jabodetabek (Jawa)",
            Region::JavaCombined => "Jawa (Jabodetabek+Non Jabodetabek)",
            Region::Sumatera => "Sumatera",
        }
    }

    pub fn from_code(code: i64) -> Result<Self, PredictionError> {
        Region::ALL
            .into_iter()
            .find(|r| r.code() == code)
            .ok_or_else(|| PredictionError::invalid_input(format!("unknown region code {}", code)))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Region {
    type Err = PredictionError;

    // Accepts the selector labels and short kebab-case names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        if let Some(region) = Region::ALL
            .into_iter()
            .find(|r| r.label().eq_ignore_ascii_case(wanted))
        {
            return Ok(region);
        }
        match wanted.to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "jabodetabek" => Ok(Region::Jabodetabek),
            "non-jabodetabek" | "non-jabodetabek-java" | "non-jabodetabek-jawa" => {
                Ok(Region::NonJabodetabekJava)
            }
            "java" | "jawa" | "java-combined" | "jawa-combined" => Ok(Region::JavaCombined),
            "sumatera" | "sumatra" => Ok(Region::Sumatera),
            _ => Err(PredictionError::invalid_input(format!(
                "unknown region '{}'",
                wanted
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn codes_are_a_bijection_onto_0_to_3() {
        let codes: HashSet<i64> = Region::ALL.iter().map(|r| r.code()).collect();
        assert_eq!(codes, HashSet::from([0, 1, 2, 3]));
    }

    #[test]
    fn codes_match_training_encoding() {
        assert_eq!(Region::Jabodetabek.code(), 0);
        assert_eq!(Region::NonJabodetabekJava.code(), 2);
        assert_eq!(Region::JavaCombined.code(), 1);
        assert_eq!(Region::Sumatera.code(), 3);
    }

    #[test]
    fn code_lookup_is_stable() {
        for region in Region::ALL {
            assert_eq!(region.code(), region.code());
            assert_eq!(Region::from_code(region.code()).unwrap(), region);
        }
        assert!(Region::from_code(4).is_err());
    }

    #[test]
    fn parses_selector_labels() {
        for region in Region::ALL {
            assert_eq!(region.label().parse::<Region>().unwrap(), region);
        }
    }

    #[test]
    fn parses_short_names() {
        assert_eq!("sumatera".parse::<Region>().unwrap(), Region::Sumatera);
        assert_eq!(
            "Non-Jabodetabek".parse::<Region>().unwrap(),
            Region::NonJabodetabekJava
        );
        assert_eq!("java_combined".parse::<Region>().unwrap(), Region::JavaCombined);
    }

    #[test]
    fn rejects_unknown_region() {
        let err = "Bali".parse::<Region>().unwrap_err();
        assert!(err.is_client_error());
    }
}
