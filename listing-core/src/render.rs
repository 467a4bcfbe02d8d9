use std::fmt::Write as _;

use crate::escape::{escape_attr, escape_html};
use crate::listing::{non_empty, Listing};
use crate::preview::PreviewRequest;

pub const FALLBACK_IMAGE: &str =
    "https://a0.muscache.com/pictures/b7c2a199-4c17-4ba6-b81d-751719d2dac6.jpg";
pub const FALLBACK_HOST_IMAGE: &str = "https://via.placeholder.com/64?text=Host";

pub const UNTITLED: &str = "Untitled";
pub const NO_PRICE: &str = "N/A";
pub const UNKNOWN_HOST_NAME: &str = "Unknown host";
pub const NO_DESCRIPTION: &str = "No description provided.";
pub const NO_LINK: &str = "No link available";
pub const OPEN_LINK: &str = "Open listing";

/// Characters of description kept in the collapsed summary.
pub const SUMMARY_CHARS: usize = 160;
pub const MAX_AMENITY_BADGES: usize = 6;

/// Everything a frontend needs to draw one listing card. Text is raw;
/// [`CardView::to_html`] does the escaping.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub is_favorite: bool,
    pub title: String,
    pub price: String,
    pub host_name: String,
    pub thumbnail: String,
    pub host_photo: String,
    /// Full description, empty when the listing has none.
    pub description: String,
    pub amenities: Vec<String>,
    /// Amenities beyond the displayed badges.
    pub more_amenities: usize,
    pub link: Option<String>,
}

impl CardView {
    pub fn new(listing: &Listing, is_favorite: bool) -> Self {
        let amenities = &listing.amenities;
        let shown = amenities.len().min(MAX_AMENITY_BADGES);
        Self {
            id: listing.identifier(),
            is_favorite,
            title: text_or(&listing.name, UNTITLED),
            price: text_or(&listing.price, NO_PRICE),
            host_name: text_or(&listing.host_name, UNKNOWN_HOST_NAME),
            thumbnail: first_image(&listing.thumbnail_url, &listing.picture_url, FALLBACK_IMAGE),
            host_photo: first_image(
                &listing.host_thumbnail_url,
                &listing.host_picture_url,
                FALLBACK_HOST_IMAGE,
            ),
            description: listing.description.clone().unwrap_or_default(),
            amenities: amenities[..shown].to_vec(),
            more_amenities: amenities.len() - shown,
            link: non_empty(&listing.listing_url).map(str::to_owned),
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }

    /// Collapsed description, or the placeholder when there is none.
    pub fn summary(&self) -> String {
        if self.has_description() {
            short_description(&self.description, SUMMARY_CHARS)
        } else {
            NO_DESCRIPTION.to_owned()
        }
    }

    pub fn preview_caption(&self) -> String {
        format!("{} • Host: {}", self.price, self.host_name)
    }

    /// Data attached to the thumbnail for the preview modal.
    pub fn preview(&self) -> PreviewRequest {
        PreviewRequest {
            src: Some(self.thumbnail.clone()),
            title: Some(self.title.clone()),
            caption: Some(self.preview_caption()),
        }
    }

    pub fn link_label(&self) -> &'static str {
        if self.link.is_some() {
            OPEN_LINK
        } else {
            NO_LINK
        }
    }

    pub fn to_html(&self) -> String {
        let id = escape_attr(&self.id);
        let img = escape_attr(&self.thumbnail);
        let title_attr = escape_attr(&self.title);
        let caption_attr = escape_attr(&self.preview_caption());
        let title = escape_html(&self.title);
        let price = escape_html(&self.price);
        let host_name = escape_html(&self.host_name);
        let (details_summary, details_body) = if self.has_description() {
            (
                escape_html(&self.summary()),
                escape_html(&self.description).replace('\n', "<br>"),
            )
        } else {
            (NO_DESCRIPTION.to_owned(), NO_DESCRIPTION.to_owned())
        };
        let (fav_class, fav_glyph) = if self.is_favorite {
            ("btn-danger", "♥")
        } else {
            ("btn-outline-danger", "♡")
        };

        let mut badges = String::new();
        for amenity in &self.amenities {
            let _ = write!(
                badges,
                r#"<span class="badge text-bg-light border">{}</span>"#,
                escape_html(amenity)
            );
        }
        if self.more_amenities > 0 {
            let _ = write!(
                badges,
                r#"<span class="badge text-bg-light border">+{} more</span>"#,
                self.more_amenities
            );
        }

        let action = match &self.link {
            Some(link) => format!(
                r#"<a href="{}" target="_blank" rel="noopener" class="btn btn-primary w-100">{OPEN_LINK}</a>"#,
                escape_attr(link)
            ),
            None => format!(
                r##"<a href="#" class="btn btn-primary w-100 disabled" aria-disabled="true" tabindex="-1">{NO_LINK}</a>"##
            ),
        };

        format!(
            r#"<div class="col-12 col-md-6 col-lg-4 mb-3">
  <div class="listing card h-100" data-id="{id}">
    <img src="{img}" class="card-img-top listingThumb" alt="Listing" role="button" tabindex="0" data-preview-src="{img}" data-preview-title="{title_attr}" data-preview-caption="{caption_attr}" onerror="this.onerror=null; this.src='{FALLBACK_IMAGE}';" />
    <div class="card-body d-flex flex-column">
      <div class="d-flex justify-content-between align-items-start gap-2">
        <h5 class="card-title" style="margin:0;">{title}</h5>
        <button class="btn btn-sm {fav_class} favBtn" type="button" data-id="{id}" aria-label="favorite" title="Toggle favorite">{fav_glyph}</button>
      </div>
      <div class="mt-2 d-flex justify-content-between">
        <div class="fw-bold">{price}</div>
        <div class="text-muted small">id: {id_text}</div>
      </div>
      <div class="mt-2 d-flex align-items-center gap-2">
        <img src="{host_img}" alt="Host" class="hostAvatar" onerror="this.onerror=null; this.src='{FALLBACK_HOST_IMAGE}';" />
        <div class="small">Host: <b>{host_name}</b></div>
      </div>
      <div class="mt-2">
        <details>
          <summary>{details_summary}</summary>
          <div class="small mt-2">{details_body}</div>
        </details>
      </div>
      <div class="mt-2 d-flex flex-wrap gap-1">{badges}</div>
      <div class="mt-auto pt-3">{action}</div>
    </div>
  </div>
</div>"#,
            id_text = escape_html(&self.id),
            host_img = escape_attr(&self.host_photo),
        )
    }
}

/// Markup fragment for one listing.
pub fn render_card(listing: &Listing, is_favorite: bool) -> String {
    CardView::new(listing, is_favorite).to_html()
}

/// Cuts `text` to `max_chars` characters, appending `...` when shortened.
pub fn short_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_owned(),
    }
}

fn text_or(field: &Option<String>, fallback: &str) -> String {
    field.clone().unwrap_or_else(|| fallback.to_owned())
}

fn first_image(primary: &Option<String>, secondary: &Option<String>, fallback: &str) -> String {
    non_empty(primary)
        .or_else(|| non_empty(secondary))
        .unwrap_or(fallback)
        .to_owned()
}
