//! Terminal rendering of quote cards

use quotd_common::Quote;

/// Star row: filled up to the rating, hollow for the rest of the five
pub fn star_row(rating: i64) -> String {
    (0..5).map(|i| if i < rating { '★' } else { '☆' }).collect()
}

/// Render one quote as a small card
pub fn card(quote: &Quote) -> String {
    format!(
        "\"{}\"\n  - {} ({})\n  {} [{}]",
        quote.text,
        quote.author,
        quote.submitted_at.format("%a, %b %e, %Y"),
        star_row(quote.rating),
        quote.status.as_str(),
    )
}
