use crate::filter::FavoriteMode;
use crate::preview::PreviewRequest;

/// What the user interacted with inside the listing container, classified
/// once by the host instead of per-card handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTarget {
    FavoriteButton { id: Option<String> },
    Thumbnail(PreviewRequest),
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Other,
}

impl Key {
    /// Maps a DOM-style `key` value.
    pub fn from_key_name(name: &str) -> Self {
        match name {
            "Enter" => Self::Enter,
            " " | "Space" | "Spacebar" => Self::Space,
            _ => Self::Other,
        }
    }

    pub fn activates(self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SearchInput(String),
    ModeChanged(FavoriteMode),
    Click(EventTarget),
    KeyDown { target: EventTarget, key: Key },
    PreviewImageFailed,
    PreviewDismissed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetSearch(String),
    SetMode(FavoriteMode),
    ToggleFavorite(String),
    OpenPreview(PreviewRequest),
    PreviewImageFailed,
    ClosePreview,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routed {
    pub action: Action,
    /// The host must suppress its default handling (scroll on space).
    pub prevent_default: bool,
}

impl From<Action> for Routed {
    fn from(action: Action) -> Self {
        Self {
            action,
            prevent_default: false,
        }
    }
}

/// Classifies an event into the action the controller performs.
pub fn route(event: UiEvent) -> Routed {
    match event {
        UiEvent::SearchInput(text) => Action::SetSearch(text).into(),
        UiEvent::ModeChanged(mode) => Action::SetMode(mode).into(),
        UiEvent::Click(EventTarget::FavoriteButton { id: Some(id) }) if !id.is_empty() => {
            Action::ToggleFavorite(id).into()
        }
        UiEvent::Click(EventTarget::Thumbnail(request)) => Action::OpenPreview(request).into(),
        UiEvent::Click(_) => Action::Ignore.into(),
        UiEvent::KeyDown {
            target: EventTarget::Thumbnail(request),
            key,
        } if key.activates() => Routed {
            action: Action::OpenPreview(request),
            prevent_default: true,
        },
        UiEvent::KeyDown { .. } => Action::Ignore.into(),
        UiEvent::PreviewImageFailed => Action::PreviewImageFailed.into(),
        UiEvent::PreviewDismissed => Action::ClosePreview.into(),
    }
}

/// What the host has to do after an event was handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub redrawn: bool,
    pub prevent_default: bool,
}
