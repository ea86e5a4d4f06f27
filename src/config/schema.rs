use serde::{Deserialize, Serialize};

use crate::catalog::SortOrder;
use crate::filter::FilterCriteria;
use crate::scoring::{Preset, WeightProfile};

/// Dataset used when neither the config nor the command line names one
pub const DEFAULT_SOURCE: &str = "data.json";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Dataset URL or file path
    #[serde(default)]
    pub source: Option<String>,
    /// Named weight preset
    #[serde(default)]
    pub profile: Option<Preset>,
    /// Custom weight profile; takes precedence over `profile`
    #[serde(default)]
    pub scoring: Option<WeightProfile>,
    /// Filters applied to `list` unless overridden on the command line
    #[serde(default)]
    pub filters: Option<FilterCriteria>,
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

impl Config {
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(DEFAULT_SOURCE)
    }

    /// The weight profile scoring should use: the custom one if given,
    /// otherwise the named preset.
    pub fn effective_profile(&self) -> WeightProfile {
        match &self.scoring {
            Some(profile) => profile.clone(),
            None => self.profile.unwrap_or_default().profile(),
        }
    }

    pub fn filters(&self) -> FilterCriteria {
        self.filters.clone().unwrap_or_default()
    }

    pub fn sort(&self) -> SortOrder {
        self.sort.unwrap_or_default()
    }
}
