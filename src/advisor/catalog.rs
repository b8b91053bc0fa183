// Fixed advice catalog backing the chatbot

/// Predicate evaluated against lower-cased user input.
#[derive(Debug, Clone, Copy)]
pub enum Predicate {
    AllOf(&'static [&'static str]),
    AnyOf(&'static [&'static str]),
    Always,
}

impl Predicate {
    pub fn matches(&self, folded: &str) -> bool {
        match self {
            Predicate::AllOf(words) => words.iter().all(|w| folded.contains(w)),
            Predicate::AnyOf(words) => words.iter().any(|w| folded.contains(w)),
            Predicate::Always => true,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ResponseRule {
    pub tag: &'static str,
    pub predicate: Predicate,
    pub response: &'static str,
}

pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI crop advisor. I can help you with farming questions, pest identification, weather advice, and more. How can I assist you today?";

pub const DEFAULT_RESPONSE: &str = "Thank you for your question! Based on your farming needs, I'd recommend consulting with local agricultural experts for region-specific advice. You can also upload photos of your crops for more detailed analysis. Is there anything specific about your crops, soil, or farming practices you'd like to discuss?";

// Order matters: the first matching rule wins.
const RULES: &[ResponseRule] = &[
    ResponseRule {
        tag: "wheat-fertilizer",
        predicate: Predicate::AllOf(&["wheat", "fertilizer"]),
        response: "For wheat crops, I recommend using NPK fertilizer (120:60:40 kg/ha) at the time of sowing. Apply nitrogen in 3 splits: 50% at sowing, 25% at crown root initiation, and 25% at jointing stage. Also consider adding organic compost to improve soil health.",
    },
    ResponseRule {
        tag: "cotton-pest",
        predicate: Predicate::AnyOf(&["pest", "cotton"]),
        response: "Common cotton pests include bollworm, aphids, and whitefly. Look for signs like holes in leaves, sticky honeydew, or small insects on plant undersides. For organic control, use neem oil spray. For severe infestations, consider targeted insecticides. Would you like me to help identify a specific pest from a photo?",
    },
    ResponseRule {
        tag: "rice-planting",
        predicate: Predicate::AllOf(&["rice", "plant"]),
        response: "The best time to plant rice depends on your region. For kharif season: June-July (monsoon). For rabi season: November-December. Ensure soil temperature is above 20°C and adequate water supply is available. Prepare nursery beds 25-30 days before transplanting.",
    },
    ResponseRule {
        tag: "weather",
        predicate: Predicate::AnyOf(&["weather"]),
        response: "Weather significantly impacts crop growth. Current conditions show good humidity for most crops. However, expected rainfall tomorrow means you should avoid spraying pesticides. High temperatures next week may require increased irrigation. Would you like specific weather-based recommendations for your crops?",
    },
    ResponseRule {
        tag: "tomato-soil",
        predicate: Predicate::AnyOf(&["soil", "tomato"]),
        response: "For tomatoes, prepare well-drained soil with pH 6.0-7.0. Add organic matter like compost or well-rotted manure (20-25 tons/ha). Ensure good drainage as tomatoes are sensitive to waterlogging. Consider raised beds in heavy clay soils.",
    },
    ResponseRule {
        tag: "organic",
        predicate: Predicate::AnyOf(&["organic"]),
        response: "Organic farming techniques include: 1) Crop rotation to maintain soil fertility, 2) Composting for natural fertilizers, 3) Beneficial insects for pest control, 4) Cover crops to prevent soil erosion, 5) Natural mulching to retain moisture. Start with soil testing to understand your current soil health.",
    },
];

const DEFAULT_RULE: ResponseRule = ResponseRule {
    tag: "default",
    predicate: Predicate::Always,
    response: DEFAULT_RESPONSE,
};

pub const QUICK_QUESTIONS: &[&str] = &[
    "What fertilizer should I use for wheat?",
    "How to identify pest in cotton crop?",
    "Best time to plant rice?",
    "Soil preparation for tomatoes",
    "Weather impact on crop growth",
    "Organic farming techniques",
];

/// Read-only, ordered set of topic rules plus the fallback.
#[derive(Debug, Clone, Copy)]
pub struct ResponseCatalog {
    rules: &'static [ResponseRule],
    fallback: ResponseRule,
}

impl Default for ResponseCatalog {
    fn default() -> Self {
        Self {
            rules: RULES,
            fallback: DEFAULT_RULE,
        }
    }
}

impl ResponseCatalog {
    /// Topic rules in evaluation order, followed by the fallback.
    pub fn rules(&self) -> impl Iterator<Item = &ResponseRule> {
        self.rules.iter().chain(std::iter::once(&self.fallback))
    }

    pub fn fallback(&self) -> &ResponseRule {
        &self.fallback
    }
}
