pub mod catalog;
pub mod config;
pub mod error;
pub mod escape;
pub mod events;
pub mod favorites;
pub mod filter;
pub mod listing;
pub mod preview;
pub mod render;
pub mod repository;

pub use catalog::{Catalog, LOADING_STATUS, LOAD_FAILED_STATUS};
pub use config::{CatalogConfig, SourceConfig, StorageConfig, UiConfig};
pub use error::{ConfigError, LoadError, StorageError};
pub use escape::{escape_attr, escape_html};
pub use events::{route, Action, EventOutcome, EventTarget, Key, Routed, UiEvent};
pub use favorites::{read_slot, slot_path, FavoriteSet, FavoriteStore, FAVORITES_KEY};
pub use filter::{filter_listings, status_text, FavoriteMode, FilteredView, ViewQuery, DISPLAY_CAP};
pub use listing::Listing;
pub use preview::{Preview, PreviewModal, PreviewRequest};
pub use render::{render_card, short_description, CardView, FALLBACK_HOST_IMAGE, FALLBACK_IMAGE};
pub use repository::{fetch_listings, ListingRepository, ListingSource};
