use crate::model::IconCategory;

/// Ordered keyword table; the first row with a matching keyword wins.
const RULES: &[(&[&str], IconCategory)] = &[
    (&["sunny", "clear"], IconCategory::Clear),
    (&["cloudy"], IconCategory::Cloudy),
    (&["rain"], IconCategory::Rain),
    (&["snow"], IconCategory::Snow),
    (&["thunder"], IconCategory::Thunderstorm),
    (&["fog", "mist"], IconCategory::Fog),
];

/// Classify a free-text weather description by case-insensitive keyword match.
///
/// Descriptions matching nothing (including empty ones) are treated as partly cloudy.
pub fn classify(description: &str) -> IconCategory {
    let lower = description.to_lowercase();

    RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(IconCategory::PartlyCloudy)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_beats_everything_after_it() {
        assert_eq!(classify("Clear with light rain"), IconCategory::Clear);
        assert_eq!(classify("CLEAR, snow later"), IconCategory::Clear);
        assert_eq!(classify("Sunny"), IconCategory::Clear);
    }

    #[test]
    fn priority_order_is_respected() {
        // "Partly cloudy" contains "cloudy" and nothing earlier in the table.
        assert_eq!(classify("Partly cloudy"), IconCategory::Cloudy);
        assert_eq!(classify("Patchy rain nearby"), IconCategory::Rain);
        assert_eq!(classify("Light snow showers"), IconCategory::Snow);
        assert_eq!(classify("Thundery outbreaks possible"), IconCategory::Thunderstorm);
        assert_eq!(classify("Freezing fog"), IconCategory::Fog);
        assert_eq!(classify("Mist"), IconCategory::Fog);
        assert_eq!(classify("Heavy rain with thunder"), IconCategory::Rain);
    }

    #[test]
    fn unmatched_input_defaults_to_partly_cloudy() {
        assert_eq!(classify(""), IconCategory::PartlyCloudy);
        assert_eq!(classify("Overcast"), IconCategory::PartlyCloudy);
        assert_eq!(classify("Blizzard"), IconCategory::PartlyCloudy);
    }
}
