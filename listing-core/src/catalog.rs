use reqwest::Client;
use tracing::{debug, error};

use crate::config::SourceConfig;
use crate::error::LoadError;
use crate::events::{route, Action, EventOutcome, UiEvent};
use crate::favorites::FavoriteStore;
use crate::filter::{filter_listings, status_text, FavoriteMode, ViewQuery};
use crate::listing::Listing;
use crate::preview::PreviewModal;
use crate::render::CardView;
use crate::repository::ListingRepository;

pub const LOADING_STATUS: &str = "Loading data...";
pub const LOAD_FAILED_STATUS: &str = "Failed to load JSON. Use a local server (e.g., Live Server).";

/// Owns the listing collection, the favorites, the view query and the preview
/// modal. Every state change goes through [`Catalog::handle`].
#[derive(Debug)]
pub struct Catalog {
    repository: ListingRepository,
    favorites: FavoriteStore,
    query: ViewQuery,
    modal: PreviewModal,
    cards: Vec<CardView>,
    total: usize,
    status: String,
    ready: bool,
}

impl Catalog {
    /// `favorites` is expected to be hydrated already.
    pub fn new(favorites: FavoriteStore) -> Self {
        Self {
            repository: ListingRepository::new(),
            favorites,
            query: ViewQuery::default(),
            modal: PreviewModal::Closed,
            cards: Vec::new(),
            total: 0,
            status: LOADING_STATUS.to_owned(),
            ready: false,
        }
    }

    /// A catalog over an already loaded collection.
    pub fn with_listings(listings: Vec<Listing>, favorites: FavoriteStore) -> Self {
        let mut catalog = Self::new(favorites);
        catalog.repository = ListingRepository::from(listings);
        catalog.ready = true;
        catalog.redraw();
        catalog
    }

    /// Fetches the dataset once. On failure the status switches to the fixed
    /// failure message and no events are accepted.
    pub async fn load(&mut self, client: &Client, config: &SourceConfig) -> Result<usize, LoadError> {
        self.status = LOADING_STATUS.to_owned();
        match self.repository.load(client, config).await {
            Ok(count) => {
                self.ready = true;
                self.redraw();
                Ok(count)
            }
            Err(err) => {
                error!(%err, source = %config.location, "failed to load listings");
                self.status = LOAD_FAILED_STATUS.to_owned();
                Err(err)
            }
        }
    }

    pub async fn handle(&mut self, event: UiEvent) -> EventOutcome {
        if !self.ready {
            debug!(?event, "event ignored before listings are loaded");
            return EventOutcome::default();
        }
        let routed = route(event);
        let redrawn = match routed.action {
            Action::SetSearch(text) => {
                self.query.search = text;
                true
            }
            Action::SetMode(mode) => {
                self.query.mode = mode;
                true
            }
            Action::ToggleFavorite(id) => {
                let now = self.favorites.toggle(&id).await;
                debug!(%id, favorite = now, "favorite toggled");
                true
            }
            Action::OpenPreview(request) => {
                self.modal.open(request);
                false
            }
            Action::PreviewImageFailed => {
                self.modal.image_failed();
                false
            }
            Action::ClosePreview => {
                self.modal.close();
                false
            }
            Action::Ignore => false,
        };
        if redrawn {
            self.redraw();
        }
        EventOutcome {
            redrawn,
            prevent_default: routed.prevent_default,
        }
    }

    fn redraw(&mut self) {
        let view = filter_listings(
            self.repository.listings(),
            &self.query,
            self.favorites.favorites(),
        );
        self.cards = view
            .visible
            .iter()
            .map(|listing| CardView::new(listing, self.favorites.contains(&listing.identifier())))
            .collect();
        self.total = view.total;
        self.status = status_text(&view, self.favorites.favorites());
    }

    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    pub fn shown(&self) -> usize {
        self.cards.len()
    }

    /// Matches before the display cap.
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    pub fn mode(&self) -> FavoriteMode {
        self.query.mode
    }

    pub fn modal(&self) -> &PreviewModal {
        &self.modal
    }

    pub fn favorites(&self) -> &FavoriteStore {
        &self.favorites
    }

    pub fn repository(&self) -> &ListingRepository {
        &self.repository
    }

    /// Markup of every visible card.
    pub fn render_html(&self) -> String {
        self.cards
            .iter()
            .map(CardView::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
