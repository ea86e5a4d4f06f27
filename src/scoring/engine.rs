use super::config::{Attribute, WeightProfile};
use super::factors::normalize;
use crate::catalog::types::Product;

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeContribution {
    pub attribute: Attribute,
    pub normalized: f64, // in [0, 1]
    pub weight: f64,
}

impl AttributeContribution {
    /// Points this attribute adds to the final score
    pub fn points(&self) -> f64 {
        self.normalized * self.weight * 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreBreakdown {
    pub contributions: Vec<AttributeContribution>,
}

impl ScoreBreakdown {
    pub fn get(&self, attribute: Attribute) -> Option<&AttributeContribution> {
        self.contributions.iter().find(|c| c.attribute == attribute)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreResult {
    /// Rounded score. Not capped at 100: a profile whose weights sum past 1.0
    /// can produce higher values.
    pub score: u32,
    /// Unrounded weighted sum, before the x100 scaling
    pub total: f64,
    pub breakdown: ScoreBreakdown,
}

/// Score a product under a weight profile.
///
/// Every attribute is normalized to [0, 1] and weighted; the sum is scaled to
/// points and rounded. Never fails, and negative weights count as 0.
pub fn calculate_score(product: &Product, profile: &WeightProfile) -> ScoreResult {
    let mut total = 0.0;
    let mut contributions = Vec::with_capacity(Attribute::ALL.len());

    for attribute in Attribute::ALL {
        let normalized = normalize(attribute, product, &profile.normalization);
        let weight = profile.weights.get(attribute).max(0.0);
        total += normalized * weight;
        contributions.push(AttributeContribution {
            attribute,
            normalized,
            weight,
        });
    }

    // NaN weights fall through to 0 in the saturating cast
    let score = (total * 100.0).round().max(0.0) as u32;

    ScoreResult {
        score,
        total,
        breakdown: ScoreBreakdown { contributions },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{Connectivity, Flag};
    use crate::scoring::config::{Preset, Weights};

    fn reference_product() -> Product {
        Product {
            id: "ref".to_string(),
            nom: Some("Reference".to_string()),
            resolution: Some("1280x720 (HD)".to_string()),
            luminosite: Some("500 ANSI Lumens".to_string()),
            contraste: Some("10000:1".to_string()),
            prix: Some(200.0),
            technologie_affichage: Some("DLP".to_string()),
            autofocus_auto: Some(Flag::Bool(true)),
            ..Product::default()
        }
    }

    fn flawless_product() -> Product {
        Product {
            id: "top".to_string(),
            nom: Some("Top".to_string()),
            resolution: Some("3840x2160 (4K UHD)".to_string()),
            luminosite: Some("2000 ANSI Lumens".to_string()),
            contraste: Some("30000:1".to_string()),
            prix: Some(0.0),
            technologie_affichage: Some("DLP".to_string()),
            bruit_db: Some("25 dB".to_string()),
            duree_vie_lampe: Some("80000 heures".to_string()),
            distance_projection: Some("0-10m".to_string()),
            taille_image_max: Some("200 pouces".to_string()),
            connectivite: Some(Connectivity {
                wifi: Some("Wi-Fi 6".to_string()),
                bluetooth: Some("5.2".to_string()),
                ports: vec!["HDMI x2".to_string(), "USB x2".to_string()],
            }),
            autofocus_auto: Some(Flag::Bool(true)),
            reglage_trapezoidal_auto: Some(Flag::Bool(true)),
            os_smart: Some(Flag::Bool(true)),
            android_tv: Some(Flag::Bool(true)),
            fonctionnalites_sup: vec!["a".to_string(), "b".to_string(), "c".to_string()],
            ..Product::default()
        }
    }

    #[test]
    fn test_reference_product_extended() {
        let result = calculate_score(&reference_product(), &Preset::Extended.profile());

        // brightness   500/1000    = 0.5  x 0.20 = 0.100
        // resolution   HD          = 0.5  x 0.20 = 0.100
        // contrast     10000/30000 = 1/3  x 0.15 = 0.050
        // price        1 - 200/400 = 0.5  x 0.15 = 0.075
        // autofocus                  1    x 0.08 = 0.080
        // noise        unspecified = 0.5  x 0.07 = 0.035
        // technology   DLP         = 1    x 0.10 = 0.100
        // total 0.540 -> 54
        assert!((result.total - 0.54).abs() < 1e-9);
        assert_eq!(result.score, 54);
    }

    #[test]
    fn test_reference_product_balanced() {
        let result = calculate_score(&reference_product(), &Preset::Balanced.profile());

        // brightness   500/2000    = 0.25 x 0.20 = 0.0500
        // resolution   HD          = 0.5  x 0.20 = 0.1000
        // contrast     10000/20000 = 0.5  x 0.10 = 0.0500
        // price        1 - 200/800 = 0.75 x 0.15 = 0.1125
        // autofocus                  1    x 0.05 = 0.0500
        // noise        unspecified = 0.5  x 0.05 = 0.0250
        // technology   DLP         = 1    x 0.05 = 0.0500
        // total 0.4375 -> 44
        assert!((result.total - 0.4375).abs() < 1e-9);
        assert_eq!(result.score, 44);
    }

    #[test]
    fn test_score_is_deterministic() {
        let product = reference_product();
        let profile = WeightProfile::extended();
        let first = calculate_score(&product, &profile);
        let second = calculate_score(&product, &profile);
        assert_eq!(first, second);
    }

    #[test]
    fn test_extended_profile_exceeds_100() {
        let result = calculate_score(&flawless_product(), &Preset::Extended.profile());
        assert_eq!(result.score, 128);
        assert!(result.score > 100);
    }

    #[test]
    fn test_balanced_profile_tops_out_at_100() {
        let result = calculate_score(&flawless_product(), &Preset::Balanced.profile());
        // Every attribute maxes out under the wider balanced ceilings too
        assert!(result
            .breakdown
            .contributions
            .iter()
            .filter(|c| c.weight > 0.0)
            .all(|c| c.normalized == 1.0));
        assert_eq!(result.score, 100);
        assert_eq!(result.score, Preset::Balanced.profile().max_score());
    }

    #[test]
    fn test_worst_product_scores_zero() {
        let product = Product {
            id: "worst".to_string(),
            prix: Some(10_000.0),
            bruit_db: Some("60 dB".to_string()),
            ..Product::default()
        };
        for preset in Preset::ALL {
            let result = calculate_score(&product, &preset.profile());
            assert_eq!(result.score, 0, "{}", preset);
        }
    }

    #[test]
    fn test_malformed_contrast_contributes_nothing() {
        let mut product = reference_product();
        product.contraste = Some("Non spécifié".to_string());
        let result = calculate_score(&product, &WeightProfile::extended());

        let contrast = result.breakdown.get(Attribute::Contrast).unwrap();
        assert_eq!(contrast.normalized, 0.0);
        assert_eq!(contrast.points(), 0.0);
        // 54 minus the 5 contrast points
        assert_eq!(result.score, 49);
    }

    #[test]
    fn test_breakdown_lists_every_attribute() {
        let result = calculate_score(&reference_product(), &WeightProfile::extended());
        assert_eq!(result.breakdown.contributions.len(), 17);

        let points: f64 = result.breakdown.contributions.iter().map(|c| c.points()).sum();
        assert!((points - result.total * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_weight_contributes_nothing() {
        let profile = WeightProfile {
            weights: Weights {
                luminosite: 1.0,
                ..Weights::default()
            },
            ..WeightProfile::extended()
        };
        let result = calculate_score(&reference_product(), &profile);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_negative_weight_is_ignored() {
        let profile = WeightProfile {
            weights: Weights {
                luminosite: 1.0,
                resolution: -5.0,
                ..Weights::default()
            },
            ..WeightProfile::extended()
        };
        let result = calculate_score(&reference_product(), &profile);
        assert_eq!(result.score, 50);
    }

    #[test]
    fn test_scores_never_negative_across_inputs() {
        let samples = [
            Product::default(),
            reference_product(),
            flawless_product(),
            Product {
                prix: Some(-100.0),
                luminosite: Some("-500 ANSI Lumens".to_string()),
                distance_projection: Some("9-1m".to_string()),
                ..Product::default()
            },
        ];
        for product in &samples {
            for preset in Preset::ALL {
                let result = calculate_score(product, &preset.profile());
                assert!(result.total >= 0.0);
                assert!(result.score <= preset.profile().max_score());
            }
        }
    }
}
