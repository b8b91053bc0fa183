use log::debug;

use super::catalog::{ResponseCatalog, ResponseRule};

/// Maps free text to exactly one catalog response.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordRouter {
    catalog: ResponseCatalog,
}

impl KeywordRouter {
    pub fn resolve(&self, input: &str) -> &'static str {
        self.matching_rule(input).response
    }

    /// Tag and response of the rule that answers `input`, in one pass.
    pub fn route(&self, input: &str) -> (&'static str, &'static str) {
        let rule = self.matching_rule(input);
        (rule.tag, rule.response)
    }

    fn matching_rule(&self, input: &str) -> &ResponseRule {
        let folded = input.to_lowercase();
        let rule = self
            .catalog
            .rules()
            .find(|rule| rule.predicate.matches(&folded))
            .unwrap_or_else(|| self.catalog.fallback());
        debug!("Routed input to rule '{}'", rule.tag);
        rule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::catalog::DEFAULT_RESPONSE;

    #[test]
    fn wheat_and_fertilizer_wins_regardless_of_case() {
        let router = KeywordRouter::default();
        let answer = router.resolve("What FERTILIZER should I use for Wheat?");
        assert!(answer.starts_with("For wheat crops, I recommend using NPK fertilizer"));
        assert_eq!(router.route("wheat fertilizer and pests").0, "wheat-fertilizer");
    }

    #[test]
    fn pest_or_cotton_goes_to_cotton_advice() {
        let router = KeywordRouter::default();
        assert_eq!(router.route("How to identify pest in cotton crop?").0, "cotton-pest");
        assert_eq!(router.route("my cotton looks bad").0, "cotton-pest");
        // Earlier rule shadows the later rice rule.
        assert_eq!(router.route("pests when I plant rice").0, "cotton-pest");
    }

    #[test]
    fn rice_planting_question() {
        let router = KeywordRouter::default();
        assert!(router
            .resolve("Best time to plant rice?")
            .starts_with("The best time to plant rice depends on your region."));
    }

    #[test]
    fn remaining_topics() {
        let router = KeywordRouter::default();
        assert_eq!(router.route("Weather impact on crop growth").0, "weather");
        assert_eq!(router.route("Soil preparation for tomatoes").0, "tomato-soil");
        assert_eq!(router.route("Organic farming techniques").0, "organic");
        // "fertilizer" alone is not enough for the wheat rule.
        assert_eq!(router.route("which fertilizer is best").0, "default");
    }

    #[test]
    fn blank_input_falls_back() {
        let router = KeywordRouter::default();
        assert_eq!(router.resolve(""), DEFAULT_RESPONSE);
        assert_eq!(router.resolve("   \t\n"), DEFAULT_RESPONSE);
    }

    #[test]
    fn route_pairs_tag_with_response() {
        let router = KeywordRouter::default();
        let (tag, response) = router.route("Weather impact on crop growth");
        assert_eq!(tag, "weather");
        assert_eq!(response, router.resolve("Weather impact on crop growth"));
    }

    #[test]
    fn resolution_is_deterministic() {
        let router = KeywordRouter::default();
        let input = "Is organic soil better?";
        assert_eq!(router.resolve(input), router.resolve(input));
    }
}
