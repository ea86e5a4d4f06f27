use super::config::{Attribute, WeightProfile, WirelessTiers};

/// Validate a weight profile at startup.
/// Returns all validation errors at once (not just the first).
///
/// A weight sum above 1.0 is allowed; callers decide whether to warn about it.
pub fn validate_profile(profile: &WeightProfile) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for attribute in Attribute::ALL {
        let weight = profile.weights.get(attribute);
        if !weight.is_finite() || weight < 0.0 {
            errors.push(format!(
                "scoring.weights.{}: must be a non-negative finite number, got {}",
                attribute.key(),
                weight
            ));
        }
    }

    let n = &profile.normalization;
    let ceilings = [
        ("brightness.ansi_lumens", n.brightness.ansi_lumens),
        ("brightness.lm", n.brightness.lm),
        ("brightness.led_lumens", n.brightness.led_lumens),
        ("contrast_ceiling", n.contrast_ceiling),
        ("price_ceiling", n.price_ceiling),
        ("lamp_life_ceiling_hours", n.lamp_life_ceiling_hours),
        ("port_ceiling", n.port_ceiling),
        ("feature_ceiling", n.feature_ceiling),
        ("distance.range_ceiling", n.distance.range_ceiling),
        ("distance.max_deviation", n.distance.max_deviation),
        ("image_size_ceiling", n.image_size_ceiling),
    ];
    for (name, value) in ceilings {
        if !value.is_finite() || value <= 0.0 {
            errors.push(format!(
                "scoring.normalization.{}: must be positive, got {}",
                name, value
            ));
        }
    }

    if n.noise.ceiling_db <= n.noise.floor_db {
        errors.push(format!(
            "scoring.normalization.noise: ceiling_db ({}) must be above floor_db ({})",
            n.noise.ceiling_db, n.noise.floor_db
        ));
    }

    let mut unit_scores = vec![
        ("noise.unspecified".to_string(), n.noise.unspecified),
        ("technology.dlp".to_string(), n.technology.dlp),
        ("technology.lcd".to_string(), n.technology.lcd),
        ("technology.led".to_string(), n.technology.led),
        ("technology.other".to_string(), n.technology.other),
    ];
    for (i, entry) in n.resolutions.iter().enumerate() {
        unit_scores.push((format!("resolutions[{}].score", i), entry.score));
    }
    collect_tier_scores("wifi", &n.wifi, &mut unit_scores);
    collect_tier_scores("bluetooth", &n.bluetooth, &mut unit_scores);

    for (name, value) in unit_scores {
        if !(0.0..=1.0).contains(&value) {
            errors.push(format!(
                "scoring.normalization.{}: must be between 0 and 1, got {}",
                name, value
            ));
        }
    }

    for (i, entry) in n.resolutions.iter().enumerate() {
        if entry.label.trim().is_empty() {
            errors.push(format!(
                "scoring.normalization.resolutions[{}].label: must not be empty",
                i
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn collect_tier_scores(name: &str, tiers: &WirelessTiers, out: &mut Vec<(String, f64)>) {
    out.push((format!("{}.present", name), tiers.present));
    for (i, tier) in tiers.tiers.iter().enumerate() {
        out.push((format!("{}.tiers[{}].score", name, i), tier.score));
    }
}
