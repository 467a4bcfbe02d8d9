use crate::favorites::FavoriteSet;
use crate::listing::Listing;

/// Maximum number of cards drawn at once.
pub const DISPLAY_CAP: usize = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FavoriteMode {
    #[default]
    All,
    FavoritesOnly,
}

impl FavoriteMode {
    /// Maps the mode selector's value; anything unknown shows everything.
    pub fn from_selector(value: &str) -> Self {
        match value {
            "fav" => Self::FavoritesOnly,
            _ => Self::All,
        }
    }

    pub fn selector_value(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::FavoritesOnly => "fav",
        }
    }
}

/// Live inputs of the view besides the favorite set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    pub search: String,
    pub mode: FavoriteMode,
}

impl ViewQuery {
    /// Trimmed, lowercased search text.
    pub fn needle(&self) -> String {
        self.search.trim().to_lowercase()
    }
}

/// Visible subset of the collection, capped for display.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView<'a> {
    pub visible: Vec<&'a Listing>,
    /// Number of matches before the display cap.
    pub total: usize,
}

impl FilteredView<'_> {
    pub fn shown(&self) -> usize {
        self.visible.len()
    }
}

pub fn filter_listings<'a>(
    listings: &'a [Listing],
    query: &ViewQuery,
    favorites: &FavoriteSet,
) -> FilteredView<'a> {
    let needle = query.needle();
    let matches = listings.iter().filter(|listing| {
        listing.matches_text(&needle)
            && (query.mode == FavoriteMode::All || favorites.contains(&listing.identifier()))
    });

    let mut visible = Vec::with_capacity(DISPLAY_CAP.min(listings.len()));
    let mut total = 0;
    for listing in matches {
        if visible.len() < DISPLAY_CAP {
            visible.push(listing);
        }
        total += 1;
    }
    FilteredView { visible, total }
}

pub fn status_text(view: &FilteredView<'_>, favorites: &FavoriteSet) -> String {
    format!(
        "Showing {} / {} (max {DISPLAY_CAP} displayed) • Favorites: {}",
        view.shown(),
        view.total,
        favorites.len()
    )
}
