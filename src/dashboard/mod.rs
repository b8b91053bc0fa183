use log::info;
use serde::{Deserialize, Serialize};

pub const STATE_DISTRICTS: &[(&str, &[&str])] = &[
    ("Rajasthan", &["Jaipur", "Jodhpur", "Udaipur", "Kota", "Bikaner", "Ajmer", "Alwar"]),
    ("Punjab", &["Ludhiana", "Amritsar", "Jalandhar", "Patiala", "Bathinda", "Mohali"]),
    ("Haryana", &["Gurgaon", "Faridabad", "Hisar", "Panipat", "Karnal", "Ambala"]),
    ("Uttar Pradesh", &["Lucknow", "Kanpur", "Agra", "Varanasi", "Meerut", "Allahabad"]),
    ("Maharashtra", &["Mumbai", "Pune", "Nagpur", "Nashik", "Aurangabad", "Solapur"]),
    ("Gujarat", &["Ahmedabad", "Surat", "Vadodara", "Rajkot", "Bhavnagar", "Jamnagar"]),
    ("Madhya Pradesh", &["Bhopal", "Indore", "Gwalior", "Jabalpur", "Ujjain", "Sagar"]),
    ("Karnataka", &["Bangalore", "Mysore", "Hubli", "Mangalore", "Belgaum", "Gulbarga"]),
    ("Andhra Pradesh", &["Hyderabad", "Visakhapatnam", "Vijayawada", "Guntur", "Nellore", "Kurnool"]),
    ("Tamil Nadu", &["Chennai", "Coimbatore", "Madurai", "Tiruchirappalli", "Salem", "Tirunelveli"]),
];

pub const SOIL_TYPES: &[&str] = &[
    "Alluvial Soil",
    "Black Soil (Regur)",
    "Red Soil",
    "Laterite Soil",
    "Desert Soil",
    "Mountain Soil",
    "Saline Soil",
    "Peaty Soil",
    "Forest Soil",
    "Sandy Soil",
    "Clay Soil",
    "Loamy Soil",
];

pub const CROP_OPTIONS: &[&str] = &[
    "Wheat", "Rice", "Cotton", "Sugarcane", "Maize", "Barley", "Jowar", "Bajra", "Ragi", "Arhar",
    "Moong", "Urad", "Chana", "Masoor", "Groundnut", "Mustard", "Sunflower", "Soybean", "Sesame",
    "Potato", "Onion", "Tomato", "Brinjal", "Okra", "Cabbage", "Cauliflower", "Carrot", "Radish",
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WeatherDay {
    pub day: &'static str,
    pub temp: &'static str,
    pub icon: &'static str,
    pub desc: &'static str,
}

pub const WEATHER_FORECAST: &[WeatherDay] = &[
    WeatherDay { day: "Today", temp: "28°C", icon: "sun", desc: "Sunny" },
    WeatherDay { day: "Tomorrow", temp: "26°C", icon: "droplets", desc: "Light Rain" },
    WeatherDay { day: "Wed", temp: "24°C", icon: "wind", desc: "Cloudy" },
    WeatherDay { day: "Thu", temp: "27°C", icon: "sun", desc: "Sunny" },
    WeatherDay { day: "Fri", temp: "29°C", icon: "sun", desc: "Hot" },
];

#[derive(Debug, Clone, Copy, Serialize)]
pub struct PriceSnapshot {
    pub crop: &'static str,
    pub price: &'static str,
    pub change: &'static str,
    pub trend: &'static str,
}

pub const MARKET_SNAPSHOT: &[PriceSnapshot] = &[
    PriceSnapshot { crop: "Wheat", price: "₹2,150", change: "+12%", trend: "up" },
    PriceSnapshot { crop: "Rice", price: "₹3,200", change: "-3%", trend: "down" },
    PriceSnapshot { crop: "Cotton", price: "₹5,800", change: "+8%", trend: "up" },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Accent {
    Green,
    Blue,
    Orange,
    Purple,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub crop: String,
    pub advice: String,
    pub priority: String,
    pub color: Accent,
}

impl Recommendation {
    fn new(crop: impl Into<String>, advice: impl Into<String>, priority: &str, color: Accent) -> Self {
        Self {
            crop: crop.into(),
            advice: advice.into(),
            priority: priority.to_string(),
            color,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub location: String,
    pub crops: Vec<String>,
    pub recommendations: Vec<Recommendation>,
}

impl Default for DashboardData {
    fn default() -> Self {
        Self {
            location: "Rajasthan, India".to_string(),
            crops: vec!["Wheat".into(), "Rice".into(), "Cotton".into()],
            recommendations: vec![
                Recommendation::new(
                    "Wheat Field - Block A",
                    "Apply nitrogen fertilizer (20kg/acre). Soil moisture is optimal for nutrient absorption.",
                    "High Priority",
                    Accent::Green,
                ),
                Recommendation::new(
                    "Rice Field - Block B",
                    "Reduce irrigation by 30%. Expected rainfall in next 2 days will provide sufficient water.",
                    "Medium Priority",
                    Accent::Blue,
                ),
                Recommendation::new(
                    "Cotton Field - Block C",
                    "Monitor for bollworm activity. Consider preventive spray if temperature exceeds 30°C.",
                    "Watch",
                    Accent::Orange,
                ),
            ],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvisoryForm {
    pub state: String,
    pub district: String,
    pub soil_type: String,
    pub previous_crop: String,
}

impl AdvisoryForm {
    /// All four selectors filled and the district belongs to the state.
    pub fn is_complete(&self) -> bool {
        let filled = [&self.state, &self.district, &self.soil_type, &self.previous_crop]
            .iter()
            .all(|v| !v.trim().is_empty());
        filled && districts(&self.state).map_or(false, |d| d.contains(&self.district.as_str()))
    }
}

pub fn districts(state: &str) -> Option<&'static [&'static str]> {
    STATE_DISTRICTS
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, districts)| *districts)
}

/// Personalized dashboard for a submitted form. Incomplete forms yield `None`.
pub fn recommend(form: &AdvisoryForm) -> Option<DashboardData> {
    if !form.is_complete() {
        return None;
    }
    let soil = form.soil_type.to_lowercase();
    let previous = form.previous_crop.to_lowercase();
    info!(
        "Generating recommendations for {}, {} ({} after {})",
        form.district, form.state, form.soil_type, form.previous_crop
    );

    Some(DashboardData {
        location: format!("{}, {}", form.district, form.state),
        crops: vec![
            form.previous_crop.clone(),
            "Recommended Rotation".to_string(),
            "Soil Management".to_string(),
        ],
        recommendations: vec![
            Recommendation::new(
                format!("{} Field - Block A", form.previous_crop),
                format!(
                    "Based on {} and previous {} cultivation, apply organic compost (15kg/acre) for soil enrichment.",
                    soil, previous
                ),
                "High Priority",
                Accent::Green,
            ),
            Recommendation::new(
                "Recommended Next Crop - Block B",
                format!(
                    "Consider planting legumes after {} to improve soil nitrogen content in {}.",
                    previous, soil
                ),
                "Medium Priority",
                Accent::Blue,
            ),
            Recommendation::new(
                format!("Soil Management - {}", form.district),
                format!(
                    "{} requires specific pH management. Test soil pH and adjust accordingly for optimal crop yield.",
                    form.soil_type
                ),
                "Important",
                Accent::Purple,
            ),
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AdvisoryForm {
        AdvisoryForm {
            state: "Punjab".into(),
            district: "Ludhiana".into(),
            soil_type: "Alluvial Soil".into(),
            previous_crop: "Wheat".into(),
        }
    }

    #[test]
    fn incomplete_form_is_noop() {
        let mut f = form();
        f.soil_type.clear();
        assert!(recommend(&f).is_none());
        assert!(recommend(&AdvisoryForm::default()).is_none());
    }

    #[test]
    fn district_must_belong_to_state() {
        let mut f = form();
        f.district = "Jaipur".into();
        assert!(recommend(&f).is_none());
    }

    #[test]
    fn complete_form_builds_templated_dashboard() {
        let data = recommend(&form()).unwrap();
        assert_eq!(data.location, "Ludhiana, Punjab");
        assert_eq!(data.crops[0], "Wheat");
        assert_eq!(data.recommendations.len(), 3);
        assert_eq!(data.recommendations[0].crop, "Wheat Field - Block A");
        assert!(data.recommendations[0]
            .advice
            .starts_with("Based on alluvial soil and previous wheat cultivation"));
        assert_eq!(data.recommendations[2].crop, "Soil Management - Ludhiana");
        assert_eq!(data.recommendations[2].color, Accent::Purple);
    }

    #[test]
    fn district_lookup() {
        assert_eq!(districts("Gujarat").map(|d| d.len()), Some(6));
        assert!(districts("Atlantis").is_none());
    }
}
