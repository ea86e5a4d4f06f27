use crate::catalog::store::ScoredProduct;
use crate::catalog::types::{flag_is_set, Flag};
use crate::catalog::units::NOT_AVAILABLE;

/// Rows of the comparison table, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Characteristic {
    Score,
    Price,
    Description,
    Resolution,
    Brightness,
    Contrast,
    Technology,
    MinImageSize,
    MaxImageSize,
    ThrowRatio,
    ProjectionDistance,
    LampLife,
    Wifi,
    Bluetooth,
    Ports,
    Autofocus,
    Keystone,
    Noise,
    AndroidTv,
    SmartOs,
    ExtraFeatures,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    /// Rendered as a score bar
    Score(u32),
}

impl Cell {
    pub fn text(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Score(score) => format!("{}/100", score),
        }
    }
}

impl Characteristic {
    pub const ALL: [Characteristic; 21] = [
        Characteristic::Score,
        Characteristic::Price,
        Characteristic::Description,
        Characteristic::Resolution,
        Characteristic::Brightness,
        Characteristic::Contrast,
        Characteristic::Technology,
        Characteristic::MinImageSize,
        Characteristic::MaxImageSize,
        Characteristic::ThrowRatio,
        Characteristic::ProjectionDistance,
        Characteristic::LampLife,
        Characteristic::Wifi,
        Characteristic::Bluetooth,
        Characteristic::Ports,
        Characteristic::Autofocus,
        Characteristic::Keystone,
        Characteristic::Noise,
        Characteristic::AndroidTv,
        Characteristic::SmartOs,
        Characteristic::ExtraFeatures,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Characteristic::Score => "Note globale",
            Characteristic::Price => "Prix",
            Characteristic::Description => "Description",
            Characteristic::Resolution => "Résolution",
            Characteristic::Brightness => "Luminosité",
            Characteristic::Contrast => "Contraste",
            Characteristic::Technology => "Technologie d'affichage",
            Characteristic::MinImageSize => "Taille d'image min",
            Characteristic::MaxImageSize => "Taille d'image max",
            Characteristic::ThrowRatio => "Rapport de projection",
            Characteristic::ProjectionDistance => "Distance de projection",
            Characteristic::LampLife => "Durée de vie lampe/source",
            Characteristic::Wifi => "Wi-Fi",
            Characteristic::Bluetooth => "Bluetooth",
            Characteristic::Ports => "Ports",
            Characteristic::Autofocus => "Autofocus",
            Characteristic::Keystone => "Réglage trapézoïdal",
            Characteristic::Noise => "Bruit (dB)",
            Characteristic::AndroidTv => "Android TV",
            Characteristic::SmartOs => "OS intelligent",
            Characteristic::ExtraFeatures => "Fonctionnalités supplémentaires",
        }
    }

    /// Value of this characteristic for one product
    pub fn cell(&self, scored: &ScoredProduct) -> Cell {
        let p = &scored.product;
        let text = |value: Option<&str>| {
            Cell::Text(
                value
                    .filter(|v| !v.is_empty())
                    .unwrap_or(NOT_AVAILABLE)
                    .to_string(),
            )
        };
        let list = |values: &[String]| {
            if values.is_empty() {
                Cell::Text(NOT_AVAILABLE.to_string())
            } else {
                Cell::Text(values.join(", "))
            }
        };
        let auto_or_manual = |flag: Option<&Flag>| {
            Cell::Text(if flag_is_set(flag) { "Auto" } else { "Manuel" }.to_string())
        };

        match self {
            Characteristic::Score => Cell::Score(scored.score()),
            Characteristic::Price => Cell::Text(format_price(p.prix)),
            Characteristic::Description => text(p.description.as_deref()),
            Characteristic::Resolution => text(p.resolution.as_deref()),
            Characteristic::Brightness => text(p.luminosite.as_deref()),
            Characteristic::Contrast => text(p.contraste.as_deref()),
            Characteristic::Technology => text(p.technologie_affichage.as_deref()),
            Characteristic::MinImageSize => text(p.taille_image_min.as_deref()),
            Characteristic::MaxImageSize => text(p.taille_image_max.as_deref()),
            Characteristic::ThrowRatio => text(p.rapport_projection.as_deref()),
            Characteristic::ProjectionDistance => text(p.distance_projection.as_deref()),
            Characteristic::LampLife => text(p.duree_vie_lampe.as_deref()),
            Characteristic::Wifi => text(p.wifi()),
            Characteristic::Bluetooth => text(p.bluetooth()),
            Characteristic::Ports => list(p.ports()),
            Characteristic::Autofocus => auto_or_manual(p.autofocus_auto.as_ref()),
            Characteristic::Keystone => auto_or_manual(p.reglage_trapezoidal_auto.as_ref()),
            Characteristic::Noise => text(p.bruit_db.as_deref()),
            Characteristic::AndroidTv => Cell::Text(
                if flag_is_set(p.android_tv.as_ref()) { "Oui" } else { "Non" }.to_string(),
            ),
            Characteristic::SmartOs => Cell::Text(format_flag_text(p.os_smart.as_ref())),
            Characteristic::ExtraFeatures => list(&p.fonctionnalites_sup),
        }
    }
}

/// Price as shown to users: "199 €" or "N/A"
pub fn format_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p.is_finite() => format!("{} €", p),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Flags shown as text keep their wording ("Android 11"). An unset flag
/// (false, 0, empty) reads as N/A; a bare `true` reads as Oui.
fn format_flag_text(flag: Option<&Flag>) -> String {
    match flag {
        Some(Flag::Text(s)) if !s.is_empty() => s.clone(),
        Some(Flag::Bool(true)) => "Oui".to_string(),
        Some(Flag::Number(n)) if *n != 0.0 && !n.is_nan() => n.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub characteristic: Characteristic,
    pub cells: Vec<Cell>,
}

/// Build the comparison table: one row per characteristic, one cell per
/// product in the given order.
pub fn comparison_rows(products: &[&ScoredProduct]) -> Vec<ComparisonRow> {
    Characteristic::ALL
        .iter()
        .map(|characteristic| ComparisonRow {
            characteristic: *characteristic,
            cells: products.iter().map(|p| characteristic.cell(p)).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::{Connectivity, Product};
    use crate::scoring::WeightProfile;

    fn scored(product: Product) -> ScoredProduct {
        ScoredProduct::new(product, &WeightProfile::extended())
    }

    fn sample() -> ScoredProduct {
        scored(Product {
            id: "p1".to_string(),
            nom: Some("Beam One".to_string()),
            prix: Some(249.0),
            resolution: Some("1280x720 (HD)".to_string()),
            connectivite: Some(Connectivity {
                wifi: Some("Wi-Fi 5".to_string()),
                bluetooth: None,
                ports: vec!["HDMI x2".to_string(), "USB".to_string()],
            }),
            autofocus_auto: Some(Flag::Bool(true)),
            os_smart: Some(Flag::Text("Android 11".to_string())),
            fonctionnalites_sup: vec!["Zoom".to_string(), "Haut-parleur".to_string()],
            ..Product::default()
        })
    }

    fn cell_text(characteristic: Characteristic, product: &ScoredProduct) -> String {
        characteristic.cell(product).text()
    }

    #[test]
    fn test_text_cells() {
        let p = sample();
        assert_eq!(cell_text(Characteristic::Price, &p), "249 €");
        assert_eq!(cell_text(Characteristic::Resolution, &p), "1280x720 (HD)");
        assert_eq!(cell_text(Characteristic::Wifi, &p), "Wi-Fi 5");
        assert_eq!(cell_text(Characteristic::Ports, &p), "HDMI x2, USB");
        assert_eq!(
            cell_text(Characteristic::ExtraFeatures, &p),
            "Zoom, Haut-parleur"
        );
    }

    #[test]
    fn test_missing_values_are_na() {
        let p = sample();
        assert_eq!(cell_text(Characteristic::Bluetooth, &p), "N/A");
        assert_eq!(cell_text(Characteristic::Contrast, &p), "N/A");
        assert_eq!(cell_text(Characteristic::LampLife, &p), "N/A");

        let bare = scored(Product {
            id: "bare".to_string(),
            ..Product::default()
        });
        assert_eq!(cell_text(Characteristic::Price, &bare), "N/A");
        assert_eq!(cell_text(Characteristic::Ports, &bare), "N/A");
        assert_eq!(cell_text(Characteristic::SmartOs, &bare), "N/A");
    }

    #[test]
    fn test_flag_wording() {
        let p = sample();
        assert_eq!(cell_text(Characteristic::Autofocus, &p), "Auto");
        assert_eq!(cell_text(Characteristic::Keystone, &p), "Manuel");
        assert_eq!(cell_text(Characteristic::AndroidTv, &p), "Non");
        assert_eq!(cell_text(Characteristic::SmartOs, &p), "Android 11");
    }

    #[test]
    fn test_smart_os_unset_flag_is_na() {
        let with_os = |flag: Flag| {
            scored(Product {
                id: "os".to_string(),
                os_smart: Some(flag),
                ..Product::default()
            })
        };
        assert_eq!(
            cell_text(Characteristic::SmartOs, &with_os(Flag::Bool(false))),
            "N/A"
        );
        assert_eq!(
            cell_text(Characteristic::SmartOs, &with_os(Flag::Number(0.0))),
            "N/A"
        );
        assert_eq!(
            cell_text(Characteristic::SmartOs, &with_os(Flag::Text(String::new()))),
            "N/A"
        );
        assert_eq!(
            cell_text(Characteristic::SmartOs, &with_os(Flag::Bool(true))),
            "Oui"
        );
    }

    #[test]
    fn test_score_cell() {
        let p = sample();
        assert_eq!(Characteristic::Score.cell(&p), Cell::Score(p.score()));
    }

    #[test]
    fn test_comparison_rows_shape() {
        let a = sample();
        let b = scored(Product {
            id: "p2".to_string(),
            ..Product::default()
        });
        let rows = comparison_rows(&[&a, &b]);
        assert_eq!(rows.len(), Characteristic::ALL.len());
        assert!(rows.iter().all(|row| row.cells.len() == 2));
        assert_eq!(rows[0].characteristic, Characteristic::Score);
        assert_eq!(rows[1].cells[0].text(), "249 €");
        assert_eq!(rows[1].cells[1].text(), "N/A");
    }

    #[test]
    fn test_format_price_decimals() {
        assert_eq!(format_price(Some(199.99)), "199.99 €");
        assert_eq!(format_price(None), "N/A");
    }
}
