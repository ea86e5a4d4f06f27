use serde::{Deserialize, Serialize};

use super::de;

/// A yes/no attribute as it appears in catalog data.
///
/// Most flags are JSON booleans, but some records describe them in text
/// ("Android 9.0") or with numbers. Any non-empty text and any non-zero
/// number counts as set.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Flag {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Flag {
    pub fn is_set(&self) -> bool {
        match self {
            Flag::Bool(b) => *b,
            Flag::Number(n) => *n != 0.0 && !n.is_nan(),
            Flag::Text(s) => !s.is_empty(),
        }
    }
}

/// Check an optional flag, treating a missing flag as unset
pub fn flag_is_set(flag: Option<&Flag>) -> bool {
    flag.is_some_and(Flag::is_set)
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Connectivity {
    #[serde(default, deserialize_with = "de::loose_string")]
    pub wifi: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub bluetooth: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string_list")]
    pub ports: Vec<String>,
}

/// One projector record from the catalog.
///
/// Field names follow the catalog's JSON keys. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Product {
    #[serde(deserialize_with = "de::identifier")]
    pub id: String,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub nom: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "de::loose_price")]
    pub prix: Option<f64>,

    #[serde(default, deserialize_with = "de::loose_string")]
    pub resolution: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub luminosite: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub contraste: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub technologie_affichage: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub taille_image_min: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub taille_image_max: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub rapport_projection: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub distance_projection: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub duree_vie_lampe: Option<String>,
    #[serde(default, deserialize_with = "de::loose_string")]
    pub bruit_db: Option<String>,

    #[serde(default, deserialize_with = "de::loose_connectivity")]
    pub connectivite: Option<Connectivity>,

    #[serde(default, deserialize_with = "de::loose_flag")]
    pub autofocus_auto: Option<Flag>,
    #[serde(default, deserialize_with = "de::loose_flag")]
    pub reglage_trapezoidal_auto: Option<Flag>,
    #[serde(default, deserialize_with = "de::loose_flag")]
    pub os_smart: Option<Flag>,
    #[serde(default, deserialize_with = "de::loose_flag")]
    pub android_tv: Option<Flag>,

    #[serde(default, deserialize_with = "de::loose_string_list")]
    pub fonctionnalites_sup: Vec<String>,
}

impl Product {
    /// Display name, falling back to the id for unnamed records
    pub fn name(&self) -> &str {
        self.nom.as_deref().unwrap_or(&self.id)
    }

    pub fn wifi(&self) -> Option<&str> {
        self.connectivite.as_ref().and_then(|c| c.wifi.as_deref())
    }

    pub fn bluetooth(&self) -> Option<&str> {
        self.connectivite.as_ref().and_then(|c| c.bluetooth.as_deref())
    }

    pub fn ports(&self) -> &[String] {
        self.connectivite
            .as_ref()
            .map(|c| c.ports.as_slice())
            .unwrap_or(&[])
    }
}
