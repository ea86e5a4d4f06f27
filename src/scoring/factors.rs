//! Per-attribute normalizers. Each maps a raw record value to [0, 1] and
//! never fails: missing or unreadable input gets a fixed default.

use super::config::{
    Attribute, BrightnessCeilings, DistanceParams, Normalization, NoiseRange, ResolutionScore,
    TechnologyScores, WirelessTiers,
};
use crate::catalog::types::{flag_is_set, Flag, Product};
use crate::catalog::units::{
    is_available, parse_brightness, parse_leading_number, port_multiplicity, BrightnessUnit,
};

/// Normalize one attribute of a product
pub fn normalize(attribute: Attribute, product: &Product, params: &Normalization) -> f64 {
    match attribute {
        Attribute::Brightness => {
            normalize_brightness(product.luminosite.as_deref(), &params.brightness)
        }
        Attribute::Resolution => {
            normalize_resolution(product.resolution.as_deref(), &params.resolutions)
        }
        Attribute::Contrast => {
            normalize_contrast(product.contraste.as_deref(), params.contrast_ceiling)
        }
        Attribute::Price => normalize_price(product.prix, params.price_ceiling),
        Attribute::Autofocus => normalize_flag(product.autofocus_auto.as_ref()),
        Attribute::Keystone => normalize_flag(product.reglage_trapezoidal_auto.as_ref()),
        Attribute::Noise => normalize_noise(product.bruit_db.as_deref(), &params.noise),
        Attribute::LampLife => normalize_lamp_life(
            product.duree_vie_lampe.as_deref(),
            params.lamp_life_ceiling_hours,
        ),
        Attribute::Technology => {
            normalize_technology(product.technologie_affichage.as_deref(), &params.technology)
        }
        Attribute::Wifi => normalize_wireless(product.wifi(), &params.wifi),
        Attribute::Bluetooth => normalize_wireless(product.bluetooth(), &params.bluetooth),
        Attribute::Ports => normalize_ports(product.ports(), params.port_ceiling),
        Attribute::SmartOs => normalize_flag(product.os_smart.as_ref()),
        Attribute::AndroidTv => normalize_flag(product.android_tv.as_ref()),
        Attribute::ExtraFeatures => {
            normalize_feature_count(&product.fonctionnalites_sup, params.feature_ceiling)
        }
        Attribute::ProjectionDistance => normalize_projection_distance(
            product.distance_projection.as_deref(),
            &params.distance,
        ),
        Attribute::MaxImageSize => normalize_image_size(
            product.taille_image_max.as_deref(),
            params.image_size_ceiling,
        ),
    }
}

/// `value / ceiling` clamped to [0, 1]. A non-positive ceiling scores 0.
fn ratio(value: f64, ceiling: f64) -> f64 {
    if ceiling > 0.0 && value.is_finite() {
        (value / ceiling).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

pub fn normalize_brightness(raw: Option<&str>, ceilings: &BrightnessCeilings) -> f64 {
    if !is_available(raw) {
        return 0.0;
    }
    let Some(brightness) = raw.and_then(parse_brightness) else {
        return 0.0;
    };
    let ceiling = match brightness.unit {
        BrightnessUnit::AnsiLumens => ceilings.ansi_lumens,
        BrightnessUnit::Lm => ceilings.lm,
        BrightnessUnit::LedLumens => ceilings.led_lumens,
    };
    brightness.value.map_or(0.0, |v| ratio(v, ceiling))
}

pub fn normalize_resolution(raw: Option<&str>, table: &[ResolutionScore]) -> f64 {
    raw.and_then(|label| table.iter().find(|entry| entry.label == label))
        .map_or(0.0, |entry| entry.score.clamp(0.0, 1.0))
}

pub fn normalize_contrast(raw: Option<&str>, ceiling: f64) -> f64 {
    match raw {
        Some(s) if s != "Non spécifié" && s.contains(":1") => {
            let stripped = s.replacen(":1", "", 1);
            parse_leading_number(&stripped).map_or(0.0, |r| ratio(r, ceiling))
        }
        _ => 0.0,
    }
}

/// Cheaper is better. Unknown price scores 0.
pub fn normalize_price(price: Option<f64>, ceiling: f64) -> f64 {
    match price {
        Some(p) if p.is_finite() && ceiling > 0.0 => (1.0 - p / ceiling).clamp(0.0, 1.0),
        _ => 0.0,
    }
}

pub fn normalize_flag(flag: Option<&Flag>) -> f64 {
    if flag_is_set(flag) {
        1.0
    } else {
        0.0
    }
}

/// Quieter is better. Records without a noise figure get the neutral score.
pub fn normalize_noise(raw: Option<&str>, range: &NoiseRange) -> f64 {
    let neutral = range.unspecified.clamp(0.0, 1.0);
    let Some(s) = raw.filter(|s| !s.is_empty() && !s.contains("non spécifié")) else {
        return neutral;
    };
    let Some(db) = parse_leading_number(&s.replacen(" dB", "", 1)) else {
        return neutral;
    };
    let span = range.ceiling_db - range.floor_db;
    if span <= 0.0 {
        return neutral;
    }
    (1.0 - (db - range.floor_db) / span).clamp(0.0, 1.0)
}

pub fn normalize_lamp_life(raw: Option<&str>, ceiling_hours: f64) -> f64 {
    raw.and_then(parse_leading_number)
        .map_or(0.0, |hours| ratio(hours, ceiling_hours))
}

pub fn normalize_technology(raw: Option<&str>, scores: &TechnologyScores) -> f64 {
    if !is_available(raw) {
        return 0.0;
    }
    let score = match raw {
        Some("DLP") => scores.dlp,
        Some("LCD") => scores.lcd,
        Some("LED") => scores.led,
        _ => scores.other,
    };
    score.clamp(0.0, 1.0)
}

pub fn normalize_wireless(raw: Option<&str>, tiers: &WirelessTiers) -> f64 {
    let Some(value) = raw.filter(|_| is_available(raw)) else {
        return 0.0;
    };
    tiers
        .tiers
        .iter()
        .find(|tier| value.contains(tier.contains.as_str()))
        .map_or(tiers.present, |tier| tier.score)
        .clamp(0.0, 1.0)
}

/// Count HDMI and USB ports, honoring "xN" multiplicities. A descriptor that
/// mentions both counts for both.
pub fn normalize_ports(ports: &[String], ceiling: f64) -> f64 {
    let count = ports.iter().fold(0u64, |count, port| {
        let mut count = count;
        if port.contains("HDMI") {
            count = count.saturating_add(port_multiplicity(port));
        }
        if port.contains("USB") {
            count = count.saturating_add(port_multiplicity(port));
        }
        count
    });
    ratio(count as f64, ceiling)
}

pub fn normalize_feature_count(features: &[String], ceiling: f64) -> f64 {
    ratio(features.len() as f64, ceiling)
}

pub fn normalize_projection_distance(raw: Option<&str>, params: &DistanceParams) -> f64 {
    let Some(s) = raw.filter(|s| is_available(Some(*s)) && s.contains('m')) else {
        return 0.0;
    };
    let parts: Vec<Option<f64>> = s
        .replacen('m', "", 1)
        .split('-')
        .map(|part| parse_leading_number(part.trim()))
        .collect();

    match parts.as_slice() {
        [Some(low), Some(high)] => ratio(high - low, params.range_ceiling),
        [Some(fixed)] if params.max_deviation > 0.0 => {
            (1.0 - (fixed - params.ideal).abs() / params.max_deviation).max(0.0)
        }
        _ => 0.0,
    }
}

pub fn normalize_image_size(raw: Option<&str>, ceiling_inches: f64) -> f64 {
    match raw {
        Some(s) if s != "N/A" && s.contains("pouces") => {
            parse_leading_number(s.replacen(" pouces", "", 1).trim())
                .map_or(0.0, |inches| ratio(inches, ceiling_inches))
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::config::Tier;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_brightness_per_unit() {
        let c = BrightnessCeilings::default();
        assert!(close(normalize_brightness(Some("500 ANSI Lumens"), &c), 0.5));
        assert!(close(normalize_brightness(Some("15000LM"), &c), 0.5));
        assert!(close(normalize_brightness(Some("1000 Lumens (LED)"), &c), 0.2));
    }

    #[test]
    fn test_brightness_clamps_to_one() {
        let c = BrightnessCeilings::default();
        assert_eq!(normalize_brightness(Some("2500 ANSI Lumens"), &c), 1.0);
    }

    #[test]
    fn test_brightness_defaults_to_zero() {
        let c = BrightnessCeilings::default();
        assert_eq!(normalize_brightness(None, &c), 0.0);
        assert_eq!(normalize_brightness(Some("N/A"), &c), 0.0);
        assert_eq!(normalize_brightness(Some("3000 lux"), &c), 0.0);
        assert_eq!(normalize_brightness(Some("? ANSI Lumens"), &c), 0.0);
    }

    #[test]
    fn test_resolution_exact_lookup() {
        let table = Normalization::default().resolutions;
        assert_eq!(normalize_resolution(Some("1280x720 (HD)"), &table), 0.5);
        assert_eq!(normalize_resolution(Some("3840x2160 (4K UHD)"), &table), 1.0);
        // Substrings and near misses do not count
        assert_eq!(normalize_resolution(Some("1280x720"), &table), 0.0);
        assert_eq!(normalize_resolution(None, &table), 0.0);
    }

    #[test]
    fn test_contrast() {
        assert!(close(normalize_contrast(Some("10000:1"), 30000.0), 1.0 / 3.0));
        assert_eq!(normalize_contrast(Some("50000:1"), 30000.0), 1.0);
    }

    #[test]
    fn test_contrast_malformed_is_zero() {
        assert_eq!(normalize_contrast(Some("Non spécifié"), 30000.0), 0.0);
        assert_eq!(normalize_contrast(Some("10000"), 30000.0), 0.0);
        assert_eq!(normalize_contrast(Some("élevé:1"), 30000.0), 0.0);
        assert_eq!(normalize_contrast(None, 30000.0), 0.0);
    }

    #[test]
    fn test_price_cheaper_is_better() {
        assert_eq!(normalize_price(Some(200.0), 400.0), 0.5);
        assert_eq!(normalize_price(Some(0.0), 400.0), 1.0);
        assert_eq!(normalize_price(Some(400.0), 400.0), 0.0);
    }

    #[test]
    fn test_price_stays_in_unit_range() {
        assert_eq!(normalize_price(Some(1000.0), 400.0), 0.0);
        assert_eq!(normalize_price(Some(-50.0), 400.0), 1.0);
    }

    #[test]
    fn test_price_unknown_is_zero() {
        assert_eq!(normalize_price(None, 400.0), 0.0);
        assert_eq!(normalize_price(Some(f64::NAN), 400.0), 0.0);
    }

    #[test]
    fn test_noise() {
        let range = NoiseRange::default();
        assert_eq!(normalize_noise(Some("25 dB"), &range), 1.0);
        assert_eq!(normalize_noise(Some("40 dB"), &range), 0.0);
        assert!(close(normalize_noise(Some("31 dB"), &range), 0.6));
        assert_eq!(normalize_noise(Some("20 dB"), &range), 1.0);
        assert_eq!(normalize_noise(Some("55 dB"), &range), 0.0);
    }

    #[test]
    fn test_noise_unspecified_is_neutral() {
        let range = NoiseRange::default();
        assert_eq!(normalize_noise(None, &range), 0.5);
        assert_eq!(normalize_noise(Some("non spécifié"), &range), 0.5);
        assert_eq!(normalize_noise(Some("silencieux"), &range), 0.5);
    }

    #[test]
    fn test_lamp_life() {
        assert_eq!(normalize_lamp_life(Some("40000 heures (LED)"), 80000.0), 0.5);
        assert_eq!(normalize_lamp_life(Some("longue"), 80000.0), 0.0);
        assert_eq!(normalize_lamp_life(None, 80000.0), 0.0);
    }

    #[test]
    fn test_technology_ranking() {
        let scores = TechnologyScores::default();
        assert_eq!(normalize_technology(Some("DLP"), &scores), 1.0);
        assert_eq!(normalize_technology(Some("LCD"), &scores), 0.9);
        assert_eq!(normalize_technology(Some("LED"), &scores), 0.7);
        assert_eq!(normalize_technology(Some("LCoS"), &scores), 0.5);
        assert_eq!(normalize_technology(Some("N/A"), &scores), 0.0);
        assert_eq!(normalize_technology(None, &scores), 0.0);
    }

    #[test]
    fn test_table_scores_clamped_without_validation() {
        let scores = TechnologyScores {
            dlp: 3.0,
            lcd: -1.0,
            ..TechnologyScores::default()
        };
        assert_eq!(normalize_technology(Some("DLP"), &scores), 1.0);
        assert_eq!(normalize_technology(Some("LCD"), &scores), 0.0);

        let range = NoiseRange {
            unspecified: 2.5,
            ..NoiseRange::default()
        };
        assert_eq!(normalize_noise(None, &range), 1.0);
        let range = NoiseRange {
            unspecified: -0.5,
            ..NoiseRange::default()
        };
        assert_eq!(normalize_noise(Some("silencieux"), &range), 0.0);
    }

    #[test]
    fn test_wireless_presence_only() {
        let tiers = WirelessTiers::default();
        assert_eq!(normalize_wireless(Some("Wi-Fi 5"), &tiers), 1.0);
        assert_eq!(normalize_wireless(Some("N/A"), &tiers), 0.0);
        assert_eq!(normalize_wireless(None, &tiers), 0.0);
    }

    #[test]
    fn test_wireless_tiers() {
        let tiers = WirelessTiers {
            present: 0.5,
            tiers: vec![Tier::new("Wi-Fi 6", 1.0)],
        };
        assert_eq!(normalize_wireless(Some("Wi-Fi 6 bi-bande"), &tiers), 1.0);
        assert_eq!(normalize_wireless(Some("Wi-Fi 4"), &tiers), 0.5);
        assert_eq!(normalize_wireless(Some(""), &tiers), 0.0);
    }

    #[test]
    fn test_ports_count_multiplicity() {
        let ports = vec![
            "HDMI x2".to_string(),
            "USB".to_string(),
            "Jack 3.5mm".to_string(),
        ];
        assert_eq!(normalize_ports(&ports, 4.0), 0.75);
    }

    #[test]
    fn test_ports_clamp_and_empty() {
        let ports = vec!["HDMI x3".to_string(), "USB x2".to_string()];
        assert_eq!(normalize_ports(&ports, 4.0), 1.0);
        assert_eq!(normalize_ports(&[], 4.0), 0.0);
    }

    #[test]
    fn test_ports_huge_multiplicity_saturates() {
        let ports = vec!["HDMI x4294967295".to_string(), "USB x1".to_string()];
        assert_eq!(normalize_ports(&ports, 4.0), 1.0);

        let ports = vec!["HDMI x99999999999".to_string()];
        assert_eq!(normalize_ports(&ports, 4.0), 1.0);

        let ports = vec![
            "HDMI/USB x18446744073709551615".to_string(),
            "USB x18446744073709551615".to_string(),
        ];
        assert_eq!(normalize_ports(&ports, 4.0), 1.0);
    }

    #[test]
    fn test_ports_descriptor_with_both_counts_twice() {
        let ports = vec!["HDMI/USB combo".to_string()];
        assert_eq!(normalize_ports(&ports, 4.0), 0.5);
    }

    #[test]
    fn test_feature_count() {
        let features = vec!["Haut-parleur".to_string(), "Zoom".to_string()];
        assert!(close(normalize_feature_count(&features, 3.0), 2.0 / 3.0));
        assert_eq!(normalize_feature_count(&[], 3.0), 0.0);
    }

    #[test]
    fn test_projection_distance_range() {
        let params = DistanceParams::default();
        assert!(close(
            normalize_projection_distance(Some("1.5-4.5m"), &params),
            0.3
        ));
        assert_eq!(normalize_projection_distance(Some("0.5-12m"), &params), 1.0);
        // Reversed range cannot go negative
        assert_eq!(normalize_projection_distance(Some("5-2m"), &params), 0.0);
    }

    #[test]
    fn test_projection_distance_fixed() {
        let params = DistanceParams::default();
        assert_eq!(normalize_projection_distance(Some("2m"), &params), 1.0);
        assert!(close(
            normalize_projection_distance(Some("3.5 m"), &params),
            0.5
        ));
        assert_eq!(normalize_projection_distance(Some("8m"), &params), 0.0);
    }

    #[test]
    fn test_projection_distance_missing() {
        let params = DistanceParams::default();
        assert_eq!(normalize_projection_distance(None, &params), 0.0);
        assert_eq!(normalize_projection_distance(Some("N/A"), &params), 0.0);
        assert_eq!(normalize_projection_distance(Some("2 pieds"), &params), 0.0);
        assert_eq!(normalize_projection_distance(Some("m"), &params), 0.0);
    }

    #[test]
    fn test_image_size() {
        assert_eq!(normalize_image_size(Some("100 pouces"), 200.0), 0.5);
        assert_eq!(normalize_image_size(Some("300 pouces"), 200.0), 1.0);
        assert_eq!(normalize_image_size(Some("100 inches"), 200.0), 0.0);
        assert_eq!(normalize_image_size(None, 200.0), 0.0);
    }

    #[test]
    fn test_normalize_dispatch_on_empty_product() {
        let product = Product {
            id: "empty".to_string(),
            ..Product::default()
        };
        let params = Normalization::default();
        for attribute in Attribute::ALL {
            let value = normalize(attribute, &product, &params);
            let expected = if attribute == Attribute::Noise { 0.5 } else { 0.0 };
            assert_eq!(value, expected, "{}", attribute.key());
        }
    }
}
