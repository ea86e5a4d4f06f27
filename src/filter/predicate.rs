use super::criteria::{FilterCriteria, RangeOp};
use crate::catalog::types::Product;
use crate::catalog::units::parse_brightness;

/// Check a product against every criterion. All predicates must pass.
pub fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    matches_search(product, criteria.search.as_deref())
        && matches_price(product, criteria.min_price, criteria.max_price)
        && matches_resolution(product, criteria.resolution.as_deref())
        && matches_brightness(product, criteria.brightness.as_ref())
        && matches_technology(product, criteria.technology.as_deref())
}

/// Keep the products matching `criteria`, preserving their order
pub fn filter_products<'a, T, F>(items: &'a [T], criteria: &FilterCriteria, product: F) -> Vec<&'a T>
where
    F: Fn(&T) -> &Product,
{
    items
        .iter()
        .filter(|item| matches(product(*item), criteria))
        .collect()
}

fn matches_search(product: &Product, search: Option<&str>) -> bool {
    let term = match search.map(|s| s.trim().to_lowercase()) {
        Some(term) if !term.is_empty() => term,
        _ => return true,
    };
    let contains = |field: Option<&str>| field.is_some_and(|f| f.to_lowercase().contains(&term));
    contains(product.nom.as_deref()) || contains(product.description.as_deref())
}

/// Unknown prices always pass: a missing price cannot be ruled out.
fn matches_price(product: &Product, min: Option<f64>, max: Option<f64>) -> bool {
    let Some(price) = product.prix.filter(|p| !p.is_nan()) else {
        return true;
    };
    let above_min = min.filter(|m| !m.is_nan()).map_or(true, |m| price >= m);
    let below_max = max.filter(|m| !m.is_nan()).map_or(true, |m| price <= m);
    above_min && below_max
}

fn matches_resolution(product: &Product, resolution: Option<&str>) -> bool {
    match resolution.filter(|r| !r.is_empty()) {
        None => true,
        Some(wanted) => product
            .resolution
            .as_deref()
            .is_some_and(|r| r.contains(wanted)),
    }
}

/// Records without brightness pass. A brightness that is present but cannot
/// be read fails, unlike every other predicate.
fn matches_brightness(product: &Product, band: Option<&RangeOp>) -> bool {
    let Some(band) = band else {
        return true;
    };
    let Some(raw) = product.luminosite.as_deref().filter(|s| !s.is_empty()) else {
        return true;
    };
    parse_brightness(raw)
        .and_then(|b| b.ansi_equivalent())
        .is_some_and(|lumens| band.matches(lumens))
}

fn matches_technology(product: &Product, technology: Option<&str>) -> bool {
    match technology.filter(|t| !t.is_empty()) {
        None => true,
        Some(wanted) => product
            .technologie_affichage
            .as_deref()
            .is_some_and(|t| t.to_lowercase() == wanted.to_lowercase()),
    }
}
