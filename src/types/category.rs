//! Air quality index categories and health advisories

use serde::{Deserialize, Serialize};
use std::fmt;

/// Air quality category derived from a predicted index value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirQualityCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

/// Inclusive upper bound of each bounded band, ascending.
/// Anything above the last bound is [`AirQualityCategory::Hazardous`].
const BAND_UPPER_BOUNDS: [(f64, AirQualityCategory); 5] = [
    (50.0, AirQualityCategory::Good),
    (100.0, AirQualityCategory::Moderate),
    (150.0, AirQualityCategory::UnhealthyForSensitiveGroups),
    (200.0, AirQualityCategory::Unhealthy),
    (300.0, AirQualityCategory::VeryUnhealthy),
];

impl AirQualityCategory {
    /// All categories from cleanest to worst.
    pub const ALL: [AirQualityCategory; 6] = [
        AirQualityCategory::Good,
        AirQualityCategory::Moderate,
        AirQualityCategory::UnhealthyForSensitiveGroups,
        AirQualityCategory::Unhealthy,
        AirQualityCategory::VeryUnhealthy,
        AirQualityCategory::Hazardous,
    ];

    /// Classify a predicted index value.
    ///
    /// Band boundaries belong to the lower band. Values below zero are `Good`;
    /// values above 300, and NaN, are `Hazardous`.
    pub fn classify(index: f64) -> Self {
        BAND_UPPER_BOUNDS
            .iter()
            .find(|(upper, _)| index <= *upper)
            .map(|(_, category)| *category)
            .unwrap_or(AirQualityCategory::Hazardous)
    }

    /// Inclusive upper bound of the band, `None` for the unbounded top band.
    pub fn upper_bound(&self) -> Option<f64> {
        BAND_UPPER_BOUNDS
            .iter()
            .find(|(_, category)| category == self)
            .map(|(upper, _)| *upper)
    }

    pub fn description(&self) -> &'static str {
        match self {
            AirQualityCategory::Good => "Good",
            AirQualityCategory::Moderate => "Moderate",
            AirQualityCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AirQualityCategory::Unhealthy => "Unhealthy",
            AirQualityCategory::VeryUnhealthy => "Very Unhealthy",
            AirQualityCategory::Hazardous => "Hazardous",
        }
    }

    pub fn advisory(&self) -> &'static str {
        match self {
            AirQualityCategory::Good => {
                "Air quality is considered satisfactory, and air pollution poses little or no risk."
            }
            AirQualityCategory::Moderate => {
                "Air quality is acceptable; however, for some pollutants, there may be a moderate health concern for a very small number of people."
            }
            AirQualityCategory::UnhealthyForSensitiveGroups => {
                "Members of sensitive groups may experience health effects. The general public is not likely to be affected."
            }
            AirQualityCategory::Unhealthy => {
                "Everyone may begin to experience health effects; members of sensitive groups may experience more serious health effects."
            }
            AirQualityCategory::VeryUnhealthy => {
                "Health alert: everyone may experience more serious health effects."
            }
            AirQualityCategory::Hazardous => {
                "Health warnings of emergency conditions. The entire population is more likely to be affected."
            }
        }
    }
}

impl fmt::Display for AirQualityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use AirQualityCategory::*;

    #[test]
    fn test_classify_band_interiors() {
        assert_eq!(AirQualityCategory::classify(25.0), Good);
        assert_eq!(AirQualityCategory::classify(75.0), Moderate);
        assert_eq!(AirQualityCategory::classify(125.0), UnhealthyForSensitiveGroups);
        assert_eq!(AirQualityCategory::classify(175.0), Unhealthy);
        assert_eq!(AirQualityCategory::classify(250.0), VeryUnhealthy);
        assert_eq!(AirQualityCategory::classify(400.0), Hazardous);
    }

    #[test]
    fn test_boundaries_belong_to_lower_band() {
        assert_eq!(AirQualityCategory::classify(50.0), Good);
        assert_eq!(AirQualityCategory::classify(50.0001), Moderate);
        assert_eq!(AirQualityCategory::classify(100.0), Moderate);
        assert_eq!(AirQualityCategory::classify(150.0), UnhealthyForSensitiveGroups);
        assert_eq!(AirQualityCategory::classify(200.0), Unhealthy);
        assert_eq!(AirQualityCategory::classify(300.0), VeryUnhealthy);
        assert_eq!(AirQualityCategory::classify(300.0001), Hazardous);
    }

    #[test]
    fn test_classify_is_total() {
        assert_eq!(AirQualityCategory::classify(-10.0), Good);
        assert_eq!(AirQualityCategory::classify(f64::NEG_INFINITY), Good);
        assert_eq!(AirQualityCategory::classify(f64::MAX), Hazardous);
        assert_eq!(AirQualityCategory::classify(f64::INFINITY), Hazardous);
        assert_eq!(AirQualityCategory::classify(f64::NAN), Hazardous);
    }

    #[test]
    fn test_bands_partition_without_gaps() {
        // Walking upward, the category never decreases and changes only at a bound.
        let mut previous = AirQualityCategory::classify(-100.0);
        let mut x = -100.0;
        while x <= 400.0 {
            let current = AirQualityCategory::classify(x);
            assert!(current >= previous, "category went backwards at {x}");
            if current != previous {
                let bound = previous.upper_bound().unwrap();
                assert!(x > bound && x - 0.25 <= bound, "unexpected switch at {x}");
            }
            previous = current;
            x += 0.25;
        }
        assert_eq!(previous, Hazardous);
    }

    #[test]
    fn test_upper_bounds() {
        assert_eq!(Good.upper_bound(), Some(50.0));
        assert_eq!(VeryUnhealthy.upper_bound(), Some(300.0));
        assert_eq!(Hazardous.upper_bound(), None);
    }

    #[test]
    fn test_descriptions_and_advisories() {
        assert_eq!(Good.description(), "Good");
        assert_eq!(
            UnhealthyForSensitiveGroups.to_string(),
            "Unhealthy for Sensitive Groups"
        );
        assert!(Good.advisory().contains("little or no risk"));
        assert!(Hazardous.advisory().starts_with("Health warnings of emergency conditions"));

        let advisories: HashSet<_> = AirQualityCategory::ALL.iter().map(|c| c.advisory()).collect();
        assert_eq!(advisories.len(), 6);
        let descriptions: HashSet<_> =
            AirQualityCategory::ALL.iter().map(|c| c.description()).collect();
        assert_eq!(descriptions.len(), 6);
    }
}
