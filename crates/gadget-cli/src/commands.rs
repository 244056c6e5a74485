use thiserror::Error;

use gadget_core::display::{
    category_emoji, format_price, format_timestamp, result_summary, EMPTY_STATE_HINT,
    EMPTY_STATE_TITLE,
};
use gadget_core::{
    CatalogSession, CategoryFilter, FilterError, GadgetRecord, LocalStorage, PriceRange,
    PRICE_CEILING,
};

use crate::cli::Command;

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Unknown gadget id: {0}")]
    UnknownGadget(String),

    #[error(transparent)]
    Filter(#[from] FilterError),
}

/// Run one command against the session and return the text to print.
pub fn run<S: LocalStorage>(
    session: &mut CatalogSession<S>,
    command: &Command,
) -> Result<String, CommandError> {
    match command {
        Command::List {
            category,
            min,
            max,
            favorites_only,
        } => {
            let price_range = PriceRange::new(min.unwrap_or(0.0), max.unwrap_or(PRICE_CEILING))?;
            session.set_category(category.unwrap_or_default());
            session.set_price_range(price_range);
            session.set_favorites_only(*favorites_only);
            Ok(render_listing(session))
        }
        Command::Favorite { id } => toggle_favorite(session, id),
        Command::Favorites => {
            session.set_category(CategoryFilter::All);
            session.set_price_range(PriceRange::unbounded());
            session.set_favorites_only(true);
            Ok(render_listing(session))
        }
    }
}

fn toggle_favorite<S: LocalStorage>(
    session: &mut CatalogSession<S>,
    id: &str,
) -> Result<String, CommandError> {
    let title = match session.dataset().find(id) {
        Some(record) => record.title.clone(),
        None => return Err(CommandError::UnknownGadget(id.to_string())),
    };

    let line = if session.toggle_favorite(id) {
        format!("♥ Added to favorites: {}", title)
    } else {
        format!("♡ Removed from favorites: {}", title)
    };
    Ok(format!("{}\n{} favorites\n", line, session.favorites_count()))
}

fn render_listing<S: LocalStorage>(session: &CatalogSession<S>) -> String {
    let filter = session.filter_state();
    let visible = session.visible();

    let mut out = String::new();
    out.push_str(&result_summary(visible.len(), filter.favorites_only));
    out.push('\n');

    if visible.is_empty() {
        out.push('\n');
        out.push_str(EMPTY_STATE_TITLE);
        out.push('\n');
        out.push_str(EMPTY_STATE_HINT);
        out.push('\n');
    } else {
        for record in &visible {
            out.push('\n');
            out.push_str(&render_card(record, session.is_favorite(&record.id)));
        }
    }

    let last_updated = &session.dataset().last_updated;
    if !last_updated.is_empty() {
        out.push_str(&format!("\nLast updated: {}\n", format_timestamp(last_updated)));
    }
    out
}

fn render_card(record: &GadgetRecord, is_favorite: bool) -> String {
    let heart = if is_favorite { "♥" } else { "♡" };
    let trending = if record.is_trending { " 🔥 Trend" } else { "" };
    let price = match record.price {
        Some(price) => format!(" {} ({})", record.price_text, format_price(price)),
        None => String::new(),
    };

    format!(
        "{heart} {emoji} {title}{trending}\n   [{category}]{price}\n   {summary}\n   {source}: {url}\n   id: {id}\n",
        emoji = category_emoji(CategoryFilter::Only(record.category)),
        title = record.title,
        category = record.category,
        summary = record.summary,
        source = record.source_name,
        url = record.source_url,
        id = record.id,
    )
}
