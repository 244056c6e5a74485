use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};

use gadget_core::display::{
    card_size, category_emoji, category_label, format_price, format_timestamp, result_summary,
    CardSize, EMPTY_STATE_HINT, EMPTY_STATE_TITLE,
};
use gadget_core::{
    compute_visible, CategoryFilter, FavoriteSet, FilterState, GadgetDataset, GadgetRecord,
    PRICE_CEILING, PRICE_STEP,
};

use crate::query::CatalogQuery;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

async fn index(State(state): State<AppState>, Query(query): Query<CatalogQuery>) -> Response {
    let filter = match query.control_filter_state() {
        Ok(filter) => filter,
        Err(e) => return (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
    };
    let favorites = query.favorite_set();

    Html(render_index(&state.dataset, &filter, &favorites)).into_response()
}

/// Render the catalog page for one filter state.
pub fn render_index(dataset: &GadgetDataset, filter: &FilterState, favorites: &FavoriteSet) -> String {
    let visible = compute_visible(&dataset.gadgets, filter, favorites);
    let link = PageLink { filter, favorites };

    let tabs: String = CategoryFilter::VALUES
        .iter()
        .map(|&category| {
            let active = if category == filter.category { " active" } else { "" };
            let href = link.with_filter(&FilterState { category, ..*filter }).href();
            format!(
                r#"<a class="tab{active}" href="{}">{} {}</a>"#,
                escape_html(&href),
                category_emoji(category),
                category_label(category)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let favorites_toggle_href = link
        .with_filter(&FilterState {
            favorites_only: !filter.favorites_only,
            ..*filter
        })
        .href();
    let favorites_badge = if favorites.is_empty() {
        String::new()
    } else {
        format!(r#" <span class="count">({})</span>"#, favorites.len())
    };

    let body = if visible.is_empty() {
        format!(
            r#"<div class="empty-state">
                <div class="empty-icon">🔍</div>
                <h3>{EMPTY_STATE_TITLE}</h3>
                <p>{EMPTY_STATE_HINT}</p>
            </div>"#
        )
    } else {
        let cards: String = visible
            .iter()
            .enumerate()
            .map(|(position, record)| render_card(record, position, &link))
            .collect::<Vec<_>>()
            .join("\n");
        format!(r#"<div class="grid">{cards}</div>"#)
    };

    let favorites_only_marker = if filter.favorites_only { " on" } else { "" };
    let summary = result_summary(visible.len(), filter.favorites_only);
    let min = filter.price_range.min();
    let max = filter.price_range.max();
    let price_label = format!("{} 〜 {}", format_price(min), format_price(max));
    let category_value = escape_html(filter.category.as_str());
    let favorites_value = escape_html(&favorites.ids().join(","));
    let favorites_only_checked = if filter.favorites_only { " checked" } else { "" };
    let last_updated = escape_html(&format_timestamp(&dataset.last_updated));

    format!(
        r##"<!DOCTYPE html>
<html lang="ja">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Gadget Catalog</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <header>
        <h1>Gadget Catalog</h1>
    </header>

    <main>
        <section id="filters">
            <nav class="tabs">
                {tabs}
            </nav>

            <a class="favorites-toggle{favorites_only_marker}" href="{favorites_toggle_href}">♥ お気に入り{favorites_badge}</a>

            <form class="price-filter" method="get" action="/">
                <input type="hidden" name="category" value="{category_value}">
                <input type="hidden" name="favorites" value="{favorites_value}">
                <label>価格帯 <span class="price-label">{price_label}</span></label>
                <input type="number" name="min_price" min="0" max="{PRICE_CEILING}" step="{PRICE_STEP}" value="{min}">
                <input type="number" name="max_price" min="0" max="{PRICE_CEILING}" step="{PRICE_STEP}" value="{max}">
                <label><input type="checkbox" name="favorites_only" value="true"{favorites_only_checked}> お気に入りのみ</label>
                <button type="submit">適用</button>
            </form>

            <p id="result-count">{summary}</p>
        </section>

        {body}
    </main>

    <footer>
        <p>最終更新: {last_updated}</p>
    </footer>
</body>
</html>"##,
        favorites_toggle_href = escape_html(&favorites_toggle_href),
    )
}

fn render_card(record: &GadgetRecord, position: usize, link: &PageLink<'_>) -> String {
    let size_class = match card_size(record, position) {
        CardSize::Large => "card large",
        CardSize::Normal => "card",
    };

    let mut toggled = link.favorites.clone();
    let is_favorite = !toggled.toggle(&record.id);
    let heart = if is_favorite { "♥" } else { "♡" };
    let toggle_href = PageLink {
        filter: link.filter,
        favorites: &toggled,
    }
    .href();

    let placeholder = placeholder_image(&record.title);
    let trend_badge = if record.is_trending {
        r#"<span class="badge trend">🔥 Trend</span>"#
    } else {
        ""
    };
    // Unknown prices show no price line at all
    let price = match record.price {
        Some(_) => format!(r#"<p class="price">{}</p>"#, escape_html(&record.price_text)),
        None => String::new(),
    };

    format!(
        r#"<article class="{size_class}" data-id="{id}">
    <img src="{image}" alt="{title}" loading="lazy" onerror="this.onerror=null;this.src='{placeholder}'">
    <div class="card-body">
        {trend_badge}<span class="category">{category}</span>
        <h2>{title}</h2>
        <p class="summary">{summary}</p>
        {price}
        <a class="source" href="{source_url}" target="_blank" rel="noopener noreferrer">{source_name}</a>
        <a class="favorite" href="{toggle_href}" title="お気に入り">{heart}</a>
    </div>
</article>"#,
        id = escape_html(&record.id),
        image = escape_html(&record.image_url),
        title = escape_html(&record.title),
        category = escape_html(record.category.as_str()),
        summary = escape_html(&record.summary),
        source_url = escape_html(&record.source_url),
        source_name = escape_html(&record.source_name),
        toggle_href = escape_html(&toggle_href),
    )
}

/// Links back to the page with a given filter state and favorites list.
struct PageLink<'a> {
    filter: &'a FilterState,
    favorites: &'a FavoriteSet,
}

impl<'a> PageLink<'a> {
    fn with_filter<'b>(&'b self, filter: &'b FilterState) -> PageLink<'b> {
        PageLink {
            filter,
            favorites: self.favorites,
        }
    }

    fn href(&self) -> String {
        let mut params = Vec::new();
        if self.filter.category != CategoryFilter::All {
            params.push(format!(
                "category={}",
                encode_component(self.filter.category.as_str())
            ));
        }
        params.push(format!("min_price={}", self.filter.price_range.min()));
        params.push(format!("max_price={}", self.filter.price_range.max()));
        if self.filter.favorites_only {
            params.push("favorites_only=true".to_string());
        }
        if !self.favorites.is_empty() {
            let ids: Vec<String> = self.favorites.iter().map(encode_component).collect();
            params.push(format!("favorites={}", ids.join(",")));
        }
        format!("/?{}", params.join("&"))
    }
}

/// Inline SVG shown when a card image fails to load.
fn placeholder_image(title: &str) -> String {
    let initial: String = title
        .chars()
        .find(|c| !c.is_whitespace())
        .map(|c| c.to_string())
        .unwrap_or_else(|| "?".to_string());
    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="800" height="600"><rect width="100%" height="100%" fill="#27272a"/><text x="50%" y="50%" fill="#a1a1aa" font-size="160" text-anchor="middle" dominant-baseline="middle">{}</text></svg>"##,
        escape_html(&initial)
    );
    format!("data:image/svg+xml,{}", encode_component(&svg))
}

/// Percent-encode everything outside the URL unreserved set.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use gadget_core::{Category, PriceRange};

    fn gadget(id: &str, title: &str, trending: bool) -> GadgetRecord {
        GadgetRecord {
            id: id.to_string(),
            title: title.to_string(),
            summary: "summary".to_string(),
            price: Some(1000.0),
            price_text: "¥1,000".to_string(),
            category: Category::Audio,
            image_url: "https://example.com/a.jpg".to_string(),
            source_url: "https://example.com/a".to_string(),
            source_name: "Example".to_string(),
            published_at: String::new(),
            is_trending: trending,
        }
    }

    #[test]
    fn test_encode_component() {
        assert_eq!(encode_component("Smart Home"), "Smart%20Home");
        assert_eq!(encode_component("a,b&c"), "a%2Cb%26c");
        assert_eq!(encode_component("é"), "%C3%A9");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_page_link_href() {
        let filter = FilterState {
            category: CategoryFilter::Only(Category::SmartHome),
            price_range: PriceRange::new(0.0, 50000.0).unwrap(),
            favorites_only: true,
        };
        let favorites = FavoriteSet::from_ids(["a b", "c"]);
        let link = PageLink {
            filter: &filter,
            favorites: &favorites,
        };

        assert_eq!(
            link.href(),
            "/?category=Smart%20Home&min_price=0&max_price=50000&favorites_only=true&favorites=a%20b,c"
        );
    }

    #[test]
    fn test_render_escapes_record_text() {
        let dataset = GadgetDataset::new(
            vec![gadget("x", "<script>alert(1)</script>", false)],
            "2025-01-10T12:00:00Z",
        );
        let html = render_index(&dataset, &FilterState::default(), &FavoriteSet::new());

        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("2025/01/10 12:00"));
    }

    #[test]
    fn test_render_large_cards_for_leading_trending() {
        let dataset = GadgetDataset::new(
            vec![
                gadget("a", "A", true),
                gadget("b", "B", false),
                gadget("c", "C", true),
            ],
            "",
        );
        let html = render_index(&dataset, &FilterState::default(), &FavoriteSet::new());

        assert_eq!(html.matches(r#"class="card large""#).count(), 1);
        assert_eq!(html.matches("<article").count(), 3);
    }

    #[test]
    fn test_render_empty_state() {
        let dataset = GadgetDataset::new(vec![gadget("a", "A", false)], "");
        let filter = FilterState {
            favorites_only: true,
            ..FilterState::default()
        };
        let html = render_index(&dataset, &filter, &FavoriteSet::new());

        assert!(html.contains(EMPTY_STATE_TITLE));
        assert!(html.contains("0件の製品を表示中（お気に入りのみ）"));
        assert!(!html.contains("<article"));
    }

    #[test]
    fn test_trend_badge_on_every_trending_card() {
        let dataset = GadgetDataset::new(
            vec![
                gadget("a", "A", false),
                gadget("b", "B", false),
                gadget("c", "C", true),
            ],
            "",
        );
        let html = render_index(&dataset, &FilterState::default(), &FavoriteSet::new());

        // Third position: normal card, still badged.
        assert_eq!(html.matches("🔥 Trend").count(), 1);
        assert_eq!(html.matches(r#"class="card large""#).count(), 0);
    }

    #[test]
    fn test_unknown_price_hides_price_text() {
        let mut unpriced = gadget("b", "B", false);
        unpriced.price = None;
        unpriced.price_text = "価格未定".to_string();
        let dataset = GadgetDataset::new(vec![gadget("a", "A", false), unpriced], "");
        let html = render_index(&dataset, &FilterState::default(), &FavoriteSet::new());

        assert_eq!(html.matches(r#"<p class="price">"#).count(), 1);
        assert!(html.contains("¥1,000"));
        assert!(!html.contains("価格未定"));
    }

    #[test]
    fn test_placeholder_is_data_uri() {
        let uri = placeholder_image("Pixel");
        assert!(uri.starts_with("data:image/svg+xml,"));
        assert!(!uri.contains('\''));
    }
}
