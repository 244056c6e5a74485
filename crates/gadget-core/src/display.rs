//! Display helpers shared by the catalog page and the terminal client.

use crate::filter::CategoryFilter;
use crate::gadget::{Category, GadgetRecord};

/// Heading shown when no record matches the filters.
pub const EMPTY_STATE_TITLE: &str = "該当する製品がありません";

/// Hint shown under the empty-state heading.
pub const EMPTY_STATE_HINT: &str = "フィルター条件を変更してみてください";

/// Selector label for a category filter.
pub fn category_label(filter: CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::All => "すべて",
        CategoryFilter::Only(category) => category.as_str(),
    }
}

/// Selector emoji for a category filter.
pub fn category_emoji(filter: CategoryFilter) -> &'static str {
    match filter {
        CategoryFilter::All => "📱",
        CategoryFilter::Only(Category::Mobile) => "📲",
        CategoryFilter::Only(Category::Pc) => "💻",
        CategoryFilter::Only(Category::Wearable) => "⌚",
        CategoryFilter::Only(Category::Audio) => "🎧",
        CategoryFilter::Only(Category::SmartHome) => "🏠",
    }
}

/// Format a yen amount the way the price selector shows it.
///
/// Amounts of 10,000 and above are shown in units of 万 with one decimal.
pub fn format_price(price: f64) -> String {
    if price >= 10_000.0 {
        format!("{:.1}万円", price / 10_000.0)
    } else {
        format!("{}円", group_thousands(price.max(0.0).round() as u64))
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Render a dataset timestamp for display.
///
/// RFC 3339 timestamps are shown as `YYYY/MM/DD HH:MM` in their own offset;
/// anything else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    match chrono::DateTime::parse_from_rfc3339(raw) {
        Ok(ts) => ts.format("%Y/%m/%d %H:%M").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// The "N items shown" line above the grid.
pub fn result_summary(count: usize, favorites_only: bool) -> String {
    let mut line = format!("{}件の製品を表示中", count);
    if favorites_only {
        line.push_str("（お気に入りのみ）");
    }
    line
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSize {
    Large,
    Normal,
}

/// Trending records among the first two visible positions get a large card.
pub fn card_size(record: &GadgetRecord, position: usize) -> CardSize {
    if record.is_trending && position < 2 {
        CardSize::Large
    } else {
        CardSize::Normal
    }
}
