//! Rating histogram rendering. Buckets the collection's ratings and draws a
//! bar chart as a standalone SVG document, ready to be written to a file.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::models::MovieCollection;

const CHART_WIDTH: u32 = 640;
const CHART_HEIGHT: u32 = 400;
const MARGIN: u32 = 48;
const BAR_GAP: u32 = 12;

/// Count how many movies share each rating value. Keys are the rating times
/// ten so they order correctly as integers.
fn rating_buckets(movies: &MovieCollection) -> BTreeMap<i64, usize> {
    let mut buckets = BTreeMap::new();
    for record in movies.values() {
        *buckets.entry((record.rating * 10.0).round() as i64).or_insert(0) += 1;
    }
    buckets
}

/// Render the histogram for one collection. Empty collections have nothing
/// to draw and are rejected.
pub fn render_ratings_svg(movies: &MovieCollection) -> Result<String> {
    if movies.is_empty() {
        return Err(Error::EmptyCollection);
    }
    let buckets = rating_buckets(movies);
    let max_count = buckets.values().copied().max().unwrap_or(1);

    let plot_width = CHART_WIDTH - 2 * MARGIN;
    let plot_height = CHART_HEIGHT - 2 * MARGIN;
    let bar_width = (plot_width / buckets.len() as u32).saturating_sub(BAR_GAP).max(4);
    let step = plot_width / buckets.len() as u32;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{CHART_WIDTH}" height="{CHART_HEIGHT}" viewBox="0 0 {CHART_WIDTH} {CHART_HEIGHT}">
<rect width="{CHART_WIDTH}" height="{CHART_HEIGHT}" fill="white"/>
<text x="{}" y="24" text-anchor="middle" font-family="sans-serif" font-size="16">Ratings of current movies</text>
<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12">Rating (1-10)</text>
"#,
        CHART_WIDTH / 2,
        CHART_WIDTH / 2,
        CHART_HEIGHT - 8,
    ));

    for (index, (key, count)) in buckets.iter().enumerate() {
        let rating = *key as f64 / 10.0;
        let bar_height = (plot_height as f64 * *count as f64 / max_count as f64) as u32;
        let x = MARGIN + index as u32 * step + BAR_GAP / 2;
        let y = MARGIN + plot_height - bar_height;
        svg.push_str(&format!(
            r#"<rect x="{x}" y="{y}" width="{bar_width}" height="{bar_height}" fill="steelblue"/>
<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12">{rating}</text>
<text x="{}" y="{}" text-anchor="middle" font-family="sans-serif" font-size="12">{count}</text>
"#,
            x + bar_width / 2,
            CHART_HEIGHT - MARGIN + 16,
            x + bar_width / 2,
            y.saturating_sub(6).max(12),
        ));
    }
    svg.push_str("</svg>\n");
    Ok(svg)
}
