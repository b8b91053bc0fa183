use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub locale: &'static str,
}

pub const DEFAULT_LANGUAGE: &str = "en";

pub const LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", locale: "en-US" },
    Language { code: "hi", name: "हिंदी", locale: "hi-IN" },
    Language { code: "bn", name: "বাংলা", locale: "bn-IN" },
    Language { code: "te", name: "తెలుగు", locale: "te-IN" },
    Language { code: "ta", name: "தமிழ்", locale: "ta-IN" },
    Language { code: "mr", name: "मराठी", locale: "mr-IN" },
    Language { code: "gu", name: "ગુજરાતી", locale: "gu-IN" },
    Language { code: "pa", name: "ਪੰਜਾਬੀ", locale: "pa-IN" },
];

pub fn find(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|lang| lang.code == code)
}

/// Speech locale for a language code, falling back to English.
pub fn locale_for(code: &str) -> &'static str {
    find(code).map(|lang| lang.locale).unwrap_or("en-US")
}
