// Simulated pest detection. No image content is ever inspected: a
// classification provider picks a record from a fixed catalog.

use std::sync::Mutex;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

mod catalog;

pub use catalog::{common_pests, sample_results};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct Treatment {
    pub organic: Vec<&'static str>,
    pub chemical: Vec<&'static str>,
    pub preventive: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub id: &'static str,
    pub pest_name: &'static str,
    pub confidence: u8,
    pub severity: Severity,
    pub crop_affected: &'static str,
    pub description: &'static str,
    pub symptoms: Vec<&'static str>,
    pub treatment: Treatment,
    pub time_to_act: &'static str,
    pub image: &'static str,
}

/// An accepted upload. Only the metadata is kept.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    pub content_type: String,
    pub size: usize,
}

impl UploadedImage {
    /// Returns `None` for anything that is not a non-empty `image/*` body.
    pub fn accept(content_type: Option<&str>, body: &[u8]) -> Option<Self> {
        let content_type = content_type?.trim();
        if !content_type.to_ascii_lowercase().starts_with("image/") || body.is_empty() {
            debug!("Ignoring upload with content type {:?}", content_type);
            return None;
        }
        Some(Self {
            content_type: content_type.to_string(),
            size: body.len(),
        })
    }
}

pub trait ClassificationProvider: Send + Sync {
    fn name(&self) -> &'static str;
    fn classify(&self, image: &UploadedImage) -> DetectionResult;
}

/// Always answers with the same catalog entry.
pub struct FixedCatalog {
    results: Vec<DetectionResult>,
    index: usize,
}

impl FixedCatalog {
    pub fn new(index: usize) -> Self {
        Self::with_results(sample_results(), index)
    }

    fn with_results(results: Vec<DetectionResult>, index: usize) -> Self {
        let index = index.min(results.len().saturating_sub(1));
        Self { results, index }
    }
}

impl Default for FixedCatalog {
    fn default() -> Self {
        Self::new(0)
    }
}

impl ClassificationProvider for FixedCatalog {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn classify(&self, _image: &UploadedImage) -> DetectionResult {
        self.results[self.index].clone()
    }
}

/// Picks uniformly from the catalog with a seedable RNG.
pub struct RandomFromCatalog {
    results: Vec<DetectionResult>,
    rng: Mutex<StdRng>,
}

impl RandomFromCatalog {
    pub fn seeded(seed: u64) -> Self {
        Self {
            results: sample_results(),
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            results: sample_results(),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl ClassificationProvider for RandomFromCatalog {
    fn name(&self) -> &'static str {
        "random"
    }

    fn classify(&self, _image: &UploadedImage) -> DetectionResult {
        let index = match self.rng.lock() {
            Ok(mut rng) => rng.gen_range(0..self.results.len()),
            // A poisoned RNG still holds valid state.
            Err(poisoned) => poisoned.into_inner().gen_range(0..self.results.len()),
        };
        self.results[index].clone()
    }
}

pub const PROGRESS_INCREMENT: u8 = 10;

const STAGES: [&str; 6] = [
    "Initializing AI analysis...",
    "Processing image...",
    "Identifying patterns...",
    "Analyzing pest characteristics...",
    "Generating recommendations...",
    "Analysis complete!",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    pub percent: u8,
    pub stage: &'static str,
}

/// Stepped progress from 0 to 100 inclusive.
pub fn progress_sequence() -> impl Iterator<Item = ProgressStep> {
    (0..=100u8)
        .step_by(PROGRESS_INCREMENT as usize)
        .map(|percent| ProgressStep {
            percent,
            stage: STAGES[(percent / 20) as usize],
        })
}

#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub provider: &'static str,
    pub progress: Vec<ProgressStep>,
    pub result: DetectionResult,
}

pub fn analyze(provider: &dyn ClassificationProvider, image: &UploadedImage) -> Analysis {
    let progress: Vec<ProgressStep> = progress_sequence().collect();
    let result = provider.classify(image);
    info!(
        "Analyzed {} byte {} upload with '{}' provider: {} ({}%)",
        image.size,
        image.content_type,
        provider.name(),
        result.pest_name,
        result.confidence
    );
    Analysis {
        provider: provider.name(),
        progress,
        result,
    }
}
