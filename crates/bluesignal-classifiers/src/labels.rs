//! Fixed candidate-label sets and the image label normalization table

/// Ordered urgency candidate labels
pub const URGENCY_LABELS: [&str; 3] = ["Severe Flooding", "Moderate Waterlogging", "Safe Normal"];

/// Urgency labels considered high-urgency for corroboration purposes.
/// The first two entries of [`URGENCY_LABELS`].
pub const HIGH_URGENCY_LABELS: [&str; 2] = ["Severe Flooding", "Moderate Waterlogging"];

/// Ordered incident sub-type candidate labels
pub const CATEGORY_LABELS: [&str; 11] = [
    "Urban Flooding",
    "River Overflow",
    "Flash Flood",
    "Drainage Failure",
    "Heavy Rain Accumulation",
    "Dam or Levee Breach",
    "Sewer Backup",
    "Groundwater Rise",
    "Landslide-Induced Flooding",
    "Coastal Storm Surge",
    "Other/Unknown Flood",
];

/// Ordered image candidate labels, phrased as descriptive sentences for the
/// zero-shot image model
pub const IMAGE_LABELS: [&str; 13] = [
    "severe urban flooding with shoulder-level stagnant water on streets",
    "severe urban flooding with streets and vehicles submerged",
    "moderate street flooding with pooled rainwater",
    "flash flood with rapid water flow in streets",
    "river overflow flooding nearby neighborhoods",
    "drainage failure causing waterlogging",
    "heavy rain accumulation on roads and low-lying areas",
    "dam or levee breach with downstream flooding",
    "sewer backup causing localized flooding",
    "groundwater rise flooding basements",
    "landslide-induced flooding with mud and water",
    "coastal storm surge flooding coastal roads",
    "normal street scene with no flooding",
];

/// Candidate labels used when classifying a reasoning backend's free-text
/// corroboration answer
pub const AGREEMENT_LABELS: [&str; 2] = ["positive agreement", "negative disagreement"];

/// Map a raw image model label to its normalized category name.
/// Unmapped labels normalize to "Unknown".
pub fn normalize_image_label(raw: &str) -> &'static str {
    match raw {
        "severe urban flooding with shoulder-level stagnant water on streets" => {
            "Urban Flooding (Severe, Stagnant)"
        }
        "severe urban flooding with streets and vehicles submerged" => "Urban Flooding (Severe)",
        "moderate street flooding with pooled rainwater" => "Urban Flooding (Moderate)",
        "flash flood with rapid water flow in streets" => "Flash Flood",
        "river overflow flooding nearby neighborhoods" => "River Overflow",
        "drainage failure causing waterlogging" => "Drainage Failure",
        "heavy rain accumulation on roads and low-lying areas" => "Heavy Rain Accumulation",
        "dam or levee breach with downstream flooding" => "Dam or Levee Breach",
        "sewer backup causing localized flooding" => "Sewer Backup",
        "groundwater rise flooding basements" => "Groundwater Rise",
        "landslide-induced flooding with mud and water" => "Landslide-Induced Flooding",
        "coastal storm surge flooding coastal roads" => "Coastal Storm Surge",
        "normal street scene with no flooding" => "No Flooding",
        _ => "Unknown",
    }
}

/// Whether an urgency label belongs to the high-urgency subset
pub fn is_high_urgency(label: &str) -> bool {
    HIGH_URGENCY_LABELS.contains(&label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_image_label_is_mapped() {
        for label in IMAGE_LABELS {
            assert_ne!(normalize_image_label(label), "Unknown", "unmapped: {label}");
        }
    }

    #[test]
    fn unmapped_image_label_is_unknown() {
        assert_eq!(normalize_image_label("a cat on a couch"), "Unknown");
    }

    #[test]
    fn high_urgency_subset() {
        assert!(is_high_urgency("Severe Flooding"));
        assert!(is_high_urgency("Moderate Waterlogging"));
        assert!(!is_high_urgency("Safe Normal"));
        assert!(!is_high_urgency("Pipeline Error"));
    }
}
