use serde::Serialize;

use super::{DetectionResult, Severity, Treatment};

pub fn sample_results() -> Vec<DetectionResult> {
    vec![
        DetectionResult {
            id: "1",
            pest_name: "Aphids",
            confidence: 94,
            severity: Severity::Medium,
            crop_affected: "Cotton",
            description: "Small, soft-bodied insects that feed on plant sap. They can cause yellowing of leaves, stunted growth, and transmit viral diseases.",
            symptoms: vec!["Yellowing leaves", "Sticky honeydew", "Curled leaves", "Stunted growth"],
            treatment: Treatment {
                organic: vec!["Neem oil spray", "Ladybug release", "Soap water solution", "Garlic spray"],
                chemical: vec!["Imidacloprid", "Thiamethoxam", "Acetamiprid"],
                preventive: vec!["Regular monitoring", "Remove weeds", "Balanced fertilization", "Proper spacing"],
            },
            time_to_act: "2-3 days",
            image: "/aphids-on-cotton-plant-leaves.jpg",
        },
        DetectionResult {
            id: "2",
            pest_name: "Whitefly",
            confidence: 87,
            severity: Severity::High,
            crop_affected: "Various",
            description: "Small white flying insects that feed on plant juices and transmit viral diseases.",
            symptoms: vec!["Yellowing leaves", "Sticky honeydew", "Sooty mold", "Leaf curl"],
            treatment: Treatment {
                organic: vec![
                    "Use yellow sticky traps",
                    "Spray neem oil regularly",
                    "Apply insecticidal soap",
                    "Encourage beneficial insects",
                ],
                chemical: vec![
                    "Apply Acetamiprid 20% SP @ 0.2g/liter",
                    "Use Spiromesifen 22.9% SC @ 1ml/liter",
                    "Rotate different chemical groups",
                    "Follow resistance management practices",
                ],
                preventive: vec![
                    "Use resistant varieties when available",
                    "Install fine mesh screens",
                    "Remove infected plant debris",
                    "Maintain field hygiene",
                ],
            },
            time_to_act: "1-2 days",
            image: "/whitefly-pest-on-plant.jpg",
        },
    ]
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct CommonPest {
    pub name: &'static str,
    pub crop: &'static str,
    pub severity: Severity,
    pub image: &'static str,
}

pub fn common_pests() -> &'static [CommonPest] {
    const PESTS: &[CommonPest] = &[
        CommonPest { name: "Bollworm", crop: "Cotton", severity: Severity::High, image: "/bollworm-pest-on-cotton.jpg" },
        CommonPest { name: "Stem Borer", crop: "Rice", severity: Severity::High, image: "/stem-borer-pest-on-rice.jpg" },
        CommonPest { name: "Leaf Miner", crop: "Tomato", severity: Severity::Medium, image: "/leaf-miner-pest-on-tomato.jpg" },
        CommonPest { name: "Whitefly", crop: "Various", severity: Severity::Medium, image: "/whitefly-pest-on-plant.jpg" },
    ];
    PESTS
}
