use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Attributes that take part in scoring, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Brightness,
    Resolution,
    Contrast,
    Price,
    Autofocus,
    Keystone,
    Noise,
    LampLife,
    Technology,
    Wifi,
    Bluetooth,
    Ports,
    SmartOs,
    AndroidTv,
    ExtraFeatures,
    ProjectionDistance,
    MaxImageSize,
}

impl Attribute {
    pub const ALL: [Attribute; 17] = [
        Attribute::Brightness,
        Attribute::Resolution,
        Attribute::Contrast,
        Attribute::Price,
        Attribute::Autofocus,
        Attribute::Keystone,
        Attribute::Noise,
        Attribute::LampLife,
        Attribute::Technology,
        Attribute::Wifi,
        Attribute::Bluetooth,
        Attribute::Ports,
        Attribute::SmartOs,
        Attribute::AndroidTv,
        Attribute::ExtraFeatures,
        Attribute::ProjectionDistance,
        Attribute::MaxImageSize,
    ];

    /// Key of the weight in the `weights` table of a profile
    pub fn key(&self) -> &'static str {
        match self {
            Attribute::Brightness => "luminosite",
            Attribute::Resolution => "resolution",
            Attribute::Contrast => "contraste",
            Attribute::Price => "prix",
            Attribute::Autofocus => "autofocus_auto",
            Attribute::Keystone => "reglage_trapezoidal_auto",
            Attribute::Noise => "bruit_db",
            Attribute::LampLife => "duree_vie_lampe",
            Attribute::Technology => "technologie_affichage",
            Attribute::Wifi => "wifi",
            Attribute::Bluetooth => "bluetooth",
            Attribute::Ports => "ports_hdmi_usb",
            Attribute::SmartOs => "os_smart",
            Attribute::AndroidTv => "android_tv",
            Attribute::ExtraFeatures => "fonctionnalites_sup",
            Attribute::ProjectionDistance => "distance_projection",
            Attribute::MaxImageSize => "taille_image_max",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Brightness => "Luminosité",
            Attribute::Resolution => "Résolution",
            Attribute::Contrast => "Contraste",
            Attribute::Price => "Prix",
            Attribute::Autofocus => "Autofocus",
            Attribute::Keystone => "Réglage trapézoïdal",
            Attribute::Noise => "Bruit",
            Attribute::LampLife => "Durée de vie lampe",
            Attribute::Technology => "Technologie",
            Attribute::Wifi => "Wi-Fi",
            Attribute::Bluetooth => "Bluetooth",
            Attribute::Ports => "Ports HDMI/USB",
            Attribute::SmartOs => "OS intelligent",
            Attribute::AndroidTv => "Android TV",
            Attribute::ExtraFeatures => "Fonctionnalités sup.",
            Attribute::ProjectionDistance => "Distance de projection",
            Attribute::MaxImageSize => "Taille d'image max",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named weight profiles shipped with the tool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Distance and image size weighted on top of everything else.
    /// Weights sum to 1.28, so scores can go past 100.
    #[default]
    Extended,
    /// Weights sum to 1.0 with tiered connectivity and wider ceilings.
    Balanced,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Extended, Preset::Balanced];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Extended => "extended",
            Preset::Balanced => "balanced",
        }
    }

    pub fn profile(&self) -> WeightProfile {
        match self {
            Preset::Extended => WeightProfile::extended(),
            Preset::Balanced => WeightProfile::balanced(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown profile '{}' (expected extended or balanced)", s))
    }
}

/// Weights plus normalization parameters: everything the scorer needs.
///
/// Example YAML:
/// ```yaml
/// scoring:
///   weights:
///     luminosite: 0.3
///     resolution: 0.3
///     prix: 0.4
///   normalization:
///     price_ceiling: 600
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeightProfile {
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub normalization: Normalization,
}

impl Default for WeightProfile {
    fn default() -> Self {
        Self::extended()
    }
}

impl WeightProfile {
    pub fn extended() -> Self {
        Self {
            weights: Weights {
                luminosite: 0.20,
                resolution: 0.20,
                contraste: 0.15,
                prix: 0.15,
                autofocus_auto: 0.08,
                reglage_trapezoidal_auto: 0.08,
                bruit_db: 0.07,
                duree_vie_lampe: 0.0,
                technologie_affichage: 0.10,
                wifi: 0.01,
                bluetooth: 0.01,
                ports_hdmi_usb: 0.05,
                os_smart: 0.01,
                android_tv: 0.01,
                fonctionnalites_sup: 0.01,
                distance_projection: 0.10,
                taille_image_max: 0.05,
            },
            normalization: Normalization::default(),
        }
    }

    pub fn balanced() -> Self {
        Self {
            weights: Weights {
                luminosite: 0.20,
                resolution: 0.20,
                contraste: 0.10,
                prix: 0.15,
                autofocus_auto: 0.05,
                reglage_trapezoidal_auto: 0.05,
                bruit_db: 0.05,
                duree_vie_lampe: 0.0,
                technologie_affichage: 0.05,
                wifi: 0.03,
                bluetooth: 0.02,
                ports_hdmi_usb: 0.04,
                os_smart: 0.02,
                android_tv: 0.02,
                fonctionnalites_sup: 0.02,
                distance_projection: 0.0,
                taille_image_max: 0.0,
            },
            normalization: Normalization {
                brightness: BrightnessCeilings {
                    ansi_lumens: 2000.0,
                    lm: 40000.0,
                    led_lumens: 8000.0,
                },
                contrast_ceiling: 20000.0,
                price_ceiling: 800.0,
                wifi: WirelessTiers {
                    present: 0.5,
                    tiers: vec![
                        Tier::new("Wi-Fi 6", 1.0),
                        Tier::new("5G", 1.0),
                        Tier::new("5 GHz", 1.0),
                    ],
                },
                bluetooth: WirelessTiers {
                    present: 0.5,
                    tiers: vec![Tier::new("5.", 1.0)],
                },
                ..Normalization::default()
            },
        }
    }

    /// Sum of all weights. Scores can reach `weight_sum * 100`.
    pub fn weight_sum(&self) -> f64 {
        self.weights.sum()
    }

    /// Highest score a record can get under this profile
    pub fn max_score(&self) -> u32 {
        (self.weight_sum() * 100.0).round().max(0.0) as u32
    }
}

/// Per-attribute weights. A missing weight is 0 and its attribute does not
/// count.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Weights {
    pub luminosite: f64,
    pub resolution: f64,
    pub contraste: f64,
    pub prix: f64,
    pub autofocus_auto: f64,
    pub reglage_trapezoidal_auto: f64,
    pub bruit_db: f64,
    pub duree_vie_lampe: f64,
    pub technologie_affichage: f64,
    pub wifi: f64,
    pub bluetooth: f64,
    pub ports_hdmi_usb: f64,
    pub os_smart: f64,
    pub android_tv: f64,
    pub fonctionnalites_sup: f64,
    pub distance_projection: f64,
    pub taille_image_max: f64,
}

impl Weights {
    pub fn get(&self, attribute: Attribute) -> f64 {
        match attribute {
            Attribute::Brightness => self.luminosite,
            Attribute::Resolution => self.resolution,
            Attribute::Contrast => self.contraste,
            Attribute::Price => self.prix,
            Attribute::Autofocus => self.autofocus_auto,
            Attribute::Keystone => self.reglage_trapezoidal_auto,
            Attribute::Noise => self.bruit_db,
            Attribute::LampLife => self.duree_vie_lampe,
            Attribute::Technology => self.technologie_affichage,
            Attribute::Wifi => self.wifi,
            Attribute::Bluetooth => self.bluetooth,
            Attribute::Ports => self.ports_hdmi_usb,
            Attribute::SmartOs => self.os_smart,
            Attribute::AndroidTv => self.android_tv,
            Attribute::ExtraFeatures => self.fonctionnalites_sup,
            Attribute::ProjectionDistance => self.distance_projection,
            Attribute::MaxImageSize => self.taille_image_max,
        }
    }

    pub fn sum(&self) -> f64 {
        Attribute::ALL.iter().map(|a| self.get(*a)).sum()
    }
}

/// Normalization parameters. Anything left out takes the `extended` value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Normalization {
    pub brightness: BrightnessCeilings,
    /// Exact resolution label -> score in [0, 1]
    pub resolutions: Vec<ResolutionScore>,
    pub contrast_ceiling: f64,
    /// Price at which the price score reaches 0
    pub price_ceiling: f64,
    pub noise: NoiseRange,
    pub lamp_life_ceiling_hours: f64,
    pub technology: TechnologyScores,
    pub wifi: WirelessTiers,
    pub bluetooth: WirelessTiers,
    /// HDMI + USB port count that earns the full score
    pub port_ceiling: f64,
    pub feature_ceiling: f64,
    pub distance: DistanceParams,
    /// Max image size in inches that earns the full score
    pub image_size_ceiling: f64,
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            brightness: BrightnessCeilings::default(),
            resolutions: vec![
                ResolutionScore::new("854x480 (FWVGA)", 0.2),
                ResolutionScore::new("1280x720 (HD)", 0.5),
                ResolutionScore::new("1920x1080 (Full HD natif, support 4K)", 1.0),
                ResolutionScore::new("1920x1080 (Full HD native, décodage 4K)", 1.0),
                ResolutionScore::new("1920x1080 (Full HD native, 60Hz)", 0.9),
                ResolutionScore::new("3840x2160 (4K UHD)", 1.0),
            ],
            contrast_ceiling: 30000.0,
            price_ceiling: 400.0,
            noise: NoiseRange::default(),
            lamp_life_ceiling_hours: 80000.0,
            technology: TechnologyScores::default(),
            wifi: WirelessTiers::default(),
            bluetooth: WirelessTiers::default(),
            port_ceiling: 4.0,
            feature_ceiling: 3.0,
            distance: DistanceParams::default(),
            image_size_ceiling: 200.0,
        }
    }
}

/// Lumen value that earns the full brightness score, per unit.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrightnessCeilings {
    pub ansi_lumens: f64,
    pub lm: f64,
    pub led_lumens: f64,
}

impl Default for BrightnessCeilings {
    fn default() -> Self {
        Self {
            ansi_lumens: 1000.0,
            lm: 30000.0,
            led_lumens: 5000.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ResolutionScore {
    pub label: String,
    pub score: f64,
}

impl ResolutionScore {
    pub fn new(label: &str, score: f64) -> Self {
        Self {
            label: label.to_string(),
            score,
        }
    }
}

/// Noise is scored 1 at or below `floor_db`, 0 at or above `ceiling_db`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct NoiseRange {
    pub floor_db: f64,
    pub ceiling_db: f64,
    /// Score for records that do not state their noise level
    pub unspecified: f64,
}

impl Default for NoiseRange {
    fn default() -> Self {
        Self {
            floor_db: 25.0,
            ceiling_db: 40.0,
            unspecified: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TechnologyScores {
    pub dlp: f64,
    pub lcd: f64,
    pub led: f64,
    /// Score for a stated technology that is none of the above
    pub other: f64,
}

impl Default for TechnologyScores {
    fn default() -> Self {
        Self {
            dlp: 1.0,
            lcd: 0.9,
            led: 0.7,
            other: 0.5,
        }
    }
}

/// Capability tiers for a wireless feature. The first tier whose marker is
/// contained in the value wins; otherwise a present value scores `present`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WirelessTiers {
    pub present: f64,
    pub tiers: Vec<Tier>,
}

impl Default for WirelessTiers {
    fn default() -> Self {
        Self {
            present: 1.0,
            tiers: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Tier {
    pub contains: String,
    pub score: f64,
}

impl Tier {
    pub fn new(contains: &str, score: f64) -> Self {
        Self {
            contains: contains.to_string(),
            score,
        }
    }
}

/// Projection distance scoring.
///
/// A range "A-B m" scores its width over `range_ceiling`. A single distance
/// scores by how close it is to `ideal`, reaching 0 at `max_deviation` away.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DistanceParams {
    pub range_ceiling: f64,
    pub ideal: f64,
    pub max_deviation: f64,
}

impl Default for DistanceParams {
    fn default() -> Self {
        Self {
            range_ceiling: 10.0,
            ideal: 2.0,
            max_deviation: 3.0,
        }
    }
}
