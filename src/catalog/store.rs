use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use super::types::Product;
use crate::compare::{ComparisonSelection, SelectionError};
use crate::filter::{filter_products, FilterCriteria};
use crate::scoring::{calculate_score, ScoreResult, WeightProfile};

/// A product with its score, computed once at load time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredProduct {
    pub product: Product,
    pub result: ScoreResult,
}

impl ScoredProduct {
    pub fn new(product: Product, profile: &WeightProfile) -> Self {
        let result = calculate_score(&product, profile);
        Self { product, result }
    }

    pub fn score(&self) -> u32 {
        self.result.score
    }

    pub fn id(&self) -> &str {
        &self.product.id
    }
}

/// Score class used to color score bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreClass {
    High,
    Medium,
    Low,
}

impl ScoreClass {
    pub fn of(score: u32) -> Self {
        if score >= 75 {
            ScoreClass::High
        } else if score >= 50 {
            ScoreClass::Medium
        } else {
            ScoreClass::Low
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Order of the source document
    Catalog,
    /// Highest score first, ties by name
    #[default]
    Score,
    /// Cheapest first, unknown prices last
    PriceAsc,
    /// Most expensive first, unknown prices last
    PriceDesc,
    Name,
}

impl SortOrder {
    pub const ALL: [SortOrder; 5] = [
        SortOrder::Catalog,
        SortOrder::Score,
        SortOrder::PriceAsc,
        SortOrder::PriceDesc,
        SortOrder::Name,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Catalog => "catalog",
            SortOrder::Score => "score",
            SortOrder::PriceAsc => "price-asc",
            SortOrder::PriceDesc => "price-desc",
            SortOrder::Name => "name",
        }
    }

    /// Sort in place. Stable, so equal items keep their catalog order.
    pub fn sort(&self, items: &mut [&ScoredProduct]) {
        let by_name = |a: &ScoredProduct, b: &ScoredProduct| {
            a.product
                .name()
                .to_lowercase()
                .cmp(&b.product.name().to_lowercase())
        };
        match self {
            SortOrder::Catalog => {}
            SortOrder::Score => {
                items.sort_by(|a, b| b.score().cmp(&a.score()).then_with(|| by_name(*a, *b)))
            }
            SortOrder::PriceAsc => items.sort_by(|a, b| compare_prices(*a, *b, false)),
            SortOrder::PriceDesc => items.sort_by(|a, b| compare_prices(*a, *b, true)),
            SortOrder::Name => items.sort_by(|a, b| by_name(*a, *b)),
        }
    }
}

fn compare_prices(a: &ScoredProduct, b: &ScoredProduct, descending: bool) -> Ordering {
    match (a.product.prix, b.product.prix) {
        (Some(x), Some(y)) => {
            let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
            if descending {
                ord.reverse()
            } else {
                ord
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SortOrder::ALL
            .into_iter()
            .find(|o| o.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "unknown sort order '{}' (expected catalog, score, price-asc, price-desc or name)",
                    s
                )
            })
    }
}

/// The loaded catalog: scored products plus the comparison selection.
///
/// Products never change after loading; only the selection does.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<ScoredProduct>,
    selection: ComparisonSelection,
}

impl Catalog {
    /// Score every product. Records repeating an earlier id are dropped.
    pub fn new(products: Vec<Product>, profile: &WeightProfile) -> Self {
        let mut seen_ids = HashSet::new();
        let products = products
            .into_iter()
            .filter(|p| {
                let fresh = seen_ids.insert(p.id.clone());
                if !fresh {
                    log::warn!("Skipping duplicate product id '{}'", p.id);
                }
                fresh
            })
            .map(|p| {
                let scored = ScoredProduct::new(p, profile);
                log::debug!(
                    "Scored '{}' ({}): {}",
                    scored.product.name(),
                    scored.id(),
                    scored.score()
                );
                scored
            })
            .collect();

        Self {
            products,
            selection: ComparisonSelection::new(),
        }
    }

    pub fn products(&self) -> &[ScoredProduct] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ScoredProduct> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Products matching `criteria`, in the requested order
    pub fn visible(&self, criteria: &FilterCriteria, order: SortOrder) -> Vec<&ScoredProduct> {
        let mut visible = filter_products(&self.products, criteria, |p| &p.product);
        order.sort(&mut visible);
        visible
    }

    /// Add a product to the comparison
    pub fn select(&mut self, id: &str) -> Result<(), SelectionError> {
        if self.get(id).is_none() {
            return Err(SelectionError::UnknownProduct(id.to_string()));
        }
        self.selection.add(id)
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        self.selection.remove(id)
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    pub fn selection(&self) -> &ComparisonSelection {
        &self.selection
    }

    /// Selected products, in catalog order
    pub fn compared(&self) -> Vec<&ScoredProduct> {
        self.products
            .iter()
            .filter(|p| self.selection.contains(p.id()))
            .collect()
    }
}
