use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Numeric range expression used for brightness bands.
///
/// Format: "<N", "<=N", ">N", ">=N", "N-M" (inclusive) or "N". The catalog
/// UI offers three bands: "<1000", "1000-2000" and ">2000".
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        let op = if let Some(val) = s.strip_prefix(">=") {
            RangeOp::GreaterEqual(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix("<=") {
            RangeOp::LessEqual(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix('>') {
            RangeOp::GreaterThan(val.trim().parse()?)
        } else if let Some(val) = s.strip_prefix('<') {
            RangeOp::LessThan(val.trim().parse()?)
        } else if s.contains('-') && !s.starts_with('-') {
            match s.split_once('-') {
                Some((low, high)) if !high.contains('-') => {
                    RangeOp::Between(low.trim().parse()?, high.trim().parse()?)
                }
                _ => bail!("Invalid range format: {}", s),
            }
        } else {
            RangeOp::Equal(s.parse()?)
        };

        if op.bounds().iter().any(|b| !b.is_finite()) {
            bail!("Range bounds must be finite: {}", s);
        }
        Ok(op)
    }

    pub fn matches(&self, value: f64) -> bool {
        match self {
            RangeOp::LessThan(n) => value < *n,
            RangeOp::LessEqual(n) => value <= *n,
            RangeOp::GreaterThan(n) => value > *n,
            RangeOp::GreaterEqual(n) => value >= *n,
            RangeOp::Equal(n) => value == *n,
            RangeOp::Between(low, high) => value >= *low && value <= *high,
        }
    }

    fn bounds(&self) -> Vec<f64> {
        match self {
            RangeOp::LessThan(n)
            | RangeOp::LessEqual(n)
            | RangeOp::GreaterThan(n)
            | RangeOp::GreaterEqual(n)
            | RangeOp::Equal(n) => vec![*n],
            RangeOp::Between(low, high) => vec![*low, *high],
        }
    }
}

impl fmt::Display for RangeOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::LessEqual(n) => write!(f, "<={}", n),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
            RangeOp::GreaterEqual(n) => write!(f, ">={}", n),
            RangeOp::Equal(n) => write!(f, "{}", n),
            RangeOp::Between(low, high) => write!(f, "{}-{}", low, high),
        }
    }
}

impl FromStr for RangeOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RangeOp::parse(s).map_err(|e| format!("invalid brightness band '{}': {}", s, e))
    }
}

impl TryFrom<String> for RangeOp {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<RangeOp> for String {
    fn from(op: RangeOp) -> Self {
        op.to_string()
    }
}

/// What the user asked to see. Every field is optional; an unset field lets
/// every record through.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FilterCriteria {
    /// Case-insensitive text searched in name and description
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub min_price: Option<f64>,
    #[serde(default)]
    pub max_price: Option<f64>,
    /// Substring of the resolution label, e.g. "1920x1080"
    #[serde(default)]
    pub resolution: Option<String>,
    /// Band of ANSI-equivalent lumens
    #[serde(default)]
    pub brightness: Option<RangeOp>,
    /// Display technology, compared case-insensitively
    #[serde(default)]
    pub technology: Option<String>,
}

impl FilterCriteria {
    /// Overlay `other` on top of `self`: fields set in `other` win.
    pub fn merged_with(&self, other: &FilterCriteria) -> FilterCriteria {
        FilterCriteria {
            search: other.search.clone().or_else(|| self.search.clone()),
            min_price: other.min_price.or(self.min_price),
            max_price: other.max_price.or(self.max_price),
            resolution: other.resolution.clone().or_else(|| self.resolution.clone()),
            brightness: other.brightness.or(self.brightness),
            technology: other.technology.clone().or_else(|| self.technology.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FilterCriteria::default()
    }
}
