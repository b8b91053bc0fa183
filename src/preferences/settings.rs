use serde::{Deserialize, Serialize};

pub const PROFILE_STATES: &[&str] = &[
    "Andhra Pradesh",
    "Bihar",
    "Gujarat",
    "Haryana",
    "Karnataka",
    "Madhya Pradesh",
    "Maharashtra",
    "Punjab",
    "Rajasthan",
    "Tamil Nadu",
    "Uttar Pradesh",
    "West Bengal",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub farm_size: String,
    pub primary_crops: String,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Rajesh Kumar".into(),
            email: "rajesh.kumar@example.com".into(),
            phone: "+91 98765 43210".into(),
            location: "Rajasthan".into(),
            farm_size: "5".into(),
            primary_crops: "Wheat, Cotton, Mustard".into(),
        }
    }
}

impl Profile {
    /// Initials shown when there is no avatar image.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notifications {
    pub weather: bool,
    pub pest: bool,
    pub market: bool,
    pub general: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceSpeed {
    Slow,
    Normal,
    Fast,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voice {
    pub enabled: bool,
    pub speed: VoiceSpeed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Privacy {
    pub share_data: bool,
    pub analytics: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    pub language: String,
    pub notifications: Notifications,
    pub voice: Voice,
    pub privacy: Privacy,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: "en".into(),
            notifications: Notifications {
                weather: true,
                pest: true,
                market: true,
                general: false,
            },
            voice: Voice {
                enabled: true,
                speed: VoiceSpeed::Normal,
            },
            privacy: Privacy {
                share_data: false,
                analytics: true,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub profile: Profile,
    pub preferences: Preferences,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_sample_farmer() {
        let settings = Settings::default();
        assert_eq!(settings.profile.initials(), "RK");
        assert!(settings.preferences.notifications.pest);
        assert!(!settings.preferences.privacy.share_data);
    }

    #[test]
    fn wire_format_is_camel_case() {
        let json = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(json["profile"]["farmSize"], "5");
        assert_eq!(json["preferences"]["privacy"]["shareData"], false);
        assert_eq!(json["preferences"]["voice"]["speed"], "normal");
    }
}
