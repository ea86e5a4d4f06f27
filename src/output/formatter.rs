use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use std::io::IsTerminal;
use terminal_size::{terminal_size, Width};

use crate::catalog::{Product, ScoreClass, ScoredProduct};
use crate::compare::{comparison_rows, format_price, Cell, Characteristic};
use crate::scoring::{Preset, WeightProfile};

pub const NO_RESULTS: &str = "Aucun vidéoprojecteur ne correspond à vos critères.";

/// Cells in a score bar
const BAR_WIDTH: usize = 10;

/// Widest a comparison column gets on a terminal
const MAX_COLUMN_WIDTH: usize = 32;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn paint_by_class(text: &str, score: u32, use_colors: bool) -> String {
    if !use_colors {
        return text.to_string();
    }
    match ScoreClass::of(score) {
        ScoreClass::High => text.green().to_string(),
        ScoreClass::Medium => text.yellow().to_string(),
        ScoreClass::Low => text.red().to_string(),
    }
}

/// Score as a bar plus "N/100". The bar fills at 100; scores above that
/// still print their real value.
pub fn format_score_bar(score: u32, use_colors: bool) -> String {
    let filled = (score.min(100) as usize * BAR_WIDTH + 50) / 100;
    let bar = format!(
        "{}{}",
        "█".repeat(filled),
        "░".repeat(BAR_WIDTH - filled)
    );
    format!(
        "{} {:>3}/100",
        paint_by_class(&bar, score, use_colors),
        score
    )
}

/// Format products as cards, one line each:
/// index, score bar, name, price
pub fn format_cards(products: &[&ScoredProduct], use_colors: bool) -> String {
    if products.is_empty() {
        return NO_RESULTS.to_string();
    }

    let term_width = get_terminal_width();
    // "99." + space + bar + " 128/100" + separators + price
    let index_width = 3;
    let bar_width = BAR_WIDTH + 8;
    let separator = "  ";

    products
        .iter()
        .enumerate()
        .map(|(idx, scored)| {
            let index_str = format!("{:>2}.", idx + 1);
            let bar = format_score_bar(scored.score(), use_colors);
            let price = format_price(scored.product.prix);

            let fixed_width =
                index_width + 1 + bar_width + separator.len() * 2 + price.chars().count();
            let name = match term_width {
                Some(width) if width > fixed_width + 10 => {
                    truncate(scored.product.name(), width - fixed_width)
                }
                Some(_) => truncate(scored.product.name(), 20),
                None => scored.product.name().to_string(),
            };

            if use_colors {
                format!(
                    "{} {}{}{}{}{}",
                    index_str.dimmed(),
                    bar,
                    separator,
                    name.bold(),
                    separator,
                    price.cyan()
                )
            } else {
                format!(
                    "{} {}{}{}{}{}",
                    index_str, bar, separator, name, separator, price
                )
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Full product sheet: every characteristic, then how the score was built.
/// Attributes with no weight are left out of the breakdown.
pub fn format_product_detail(scored: &ScoredProduct, use_colors: bool) -> String {
    let mut lines = Vec::new();

    let title = format!("{} ({})", scored.product.name(), scored.id());
    lines.push(if use_colors {
        title.bold().to_string()
    } else {
        title
    });

    let label_width = Characteristic::ALL
        .iter()
        .map(|c| c.label().chars().count())
        .max()
        .unwrap_or(0);

    for characteristic in Characteristic::ALL {
        let value = match characteristic.cell(scored) {
            Cell::Score(score) => format_score_bar(score, use_colors),
            cell => cell.text(),
        };
        lines.push(format!(
            "  {:<width$}  {}",
            characteristic.label(),
            value,
            width = label_width
        ));
    }
    if let Some(image) = scored.product.image.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("  {:<width$}  {}", "Image", image, width = label_width));
    }

    lines.push(String::new());
    lines.push("Détail de la note:".to_string());
    for contribution in scored
        .result
        .breakdown
        .contributions
        .iter()
        .filter(|c| c.weight > 0.0)
    {
        lines.push(format!(
            "  {:<24} {:.2} x {:.2} = {:>5.1} pts",
            contribution.attribute.label(),
            contribution.normalized,
            contribution.weight,
            contribution.points()
        ));
    }
    lines.push(format!(
        "  {:<24} {:>20}",
        "Total",
        format!("{} pts", scored.score())
    ));

    lines.join("\n")
}

/// Side-by-side table: one row per characteristic, one column per product.
pub fn format_comparison_table(products: &[&ScoredProduct], use_colors: bool) -> String {
    if products.is_empty() {
        return "Aucun vidéoprojecteur sélectionné pour la comparaison.".to_string();
    }

    let rows = comparison_rows(products);
    let label_width = rows
        .iter()
        .map(|row| row.characteristic.label().chars().count())
        .max()
        .unwrap_or(0);

    let headers: Vec<String> = products.iter().map(|p| p.product.name().to_string()).collect();

    // Widest content per column, capped to what the terminal can show
    let natural_widths: Vec<usize> = (0..products.len())
        .map(|col| {
            rows.iter()
                .map(|row| row.cells[col].text().chars().count())
                .chain(std::iter::once(headers[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();
    let column_cap = get_terminal_width().map(|width| {
        let available = width.saturating_sub(label_width + 2);
        (available / products.len()).saturating_sub(3).clamp(8, MAX_COLUMN_WIDTH)
    });
    let widths: Vec<usize> = natural_widths
        .iter()
        .map(|w| column_cap.map_or(*w, |cap| (*w).min(cap)))
        .collect();

    let render_line = |label: &str, cells: Vec<String>| {
        let mut line = format!("{:<width$}", label, width = label_width);
        for cell in cells {
            line.push_str(" | ");
            line.push_str(&cell);
        }
        line.trim_end().to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);

    let header_cells = headers
        .iter()
        .zip(&widths)
        .map(|(name, width)| {
            let padded = format!("{:<width$}", truncate(name, *width), width = *width);
            if use_colors {
                padded.bold().to_string()
            } else {
                padded
            }
        })
        .collect();
    lines.push(render_line("", header_cells));
    lines.push(format!(
        "{}-+-{}",
        "-".repeat(label_width),
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    ));

    for row in &rows {
        let cells = row
            .cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let padded = format!("{:<width$}", truncate(&cell.text(), *width), width = *width);
                match cell {
                    Cell::Score(score) => paint_by_class(&padded, *score, use_colors),
                    Cell::Text(_) => padded,
                }
            })
            .collect();
        lines.push(render_line(row.characteristic.label(), cells));
    }

    lines.join("\n")
}

/// Format products as tab-separated values for scripting
/// Columns: score, id, name, price (no headers, no colors)
pub fn format_tsv(products: &[&ScoredProduct]) -> String {
    products
        .iter()
        .map(|scored| {
            format!(
                "{}\t{}\t{}\t{}",
                scored.score(),
                scored.id(),
                scored.product.name(),
                scored
                    .product
                    .prix
                    .map(|p| p.to_string())
                    .unwrap_or_default()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct JsonProduct<'a> {
    #[serde(flatten)]
    product: &'a Product,
    score: u32,
}

/// Format products as a JSON array of records, each with its score
pub fn format_json(products: &[&ScoredProduct]) -> Result<String> {
    let records: Vec<JsonProduct> = products
        .iter()
        .map(|scored| JsonProduct {
            product: &scored.product,
            score: scored.score(),
        })
        .collect();
    serde_json::to_string_pretty(&records).context("Failed to serialize products as JSON")
}

/// List the built-in presets with their weight sum and best possible score.
/// `active` marks the preset in use; None means a custom profile is active.
pub fn format_profiles(active: Option<Preset>, custom: Option<&WeightProfile>) -> String {
    let mut lines: Vec<String> = Preset::ALL
        .iter()
        .map(|preset| {
            let profile = preset.profile();
            let marker = if active == Some(*preset) { "*" } else { " " };
            format!(
                "{} {:<10} weight sum {:.2}  max score {}",
                marker,
                preset.name(),
                profile.weight_sum(),
                profile.max_score()
            )
        })
        .collect();

    if let Some(profile) = custom {
        lines.push(format!(
            "* {:<10} weight sum {:.2}  max score {}",
            "custom",
            profile.weight_sum(),
            profile.max_score()
        ));
    }

    lines.join("\n")
}
