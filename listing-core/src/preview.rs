use crate::render::FALLBACK_IMAGE;

pub const DEFAULT_PREVIEW_TITLE: &str = "Preview";

/// Data carried by a thumbnail; any part may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewRequest {
    pub src: Option<String>,
    pub title: Option<String>,
    pub caption: Option<String>,
}

/// Content of an open preview modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub src: String,
    pub title: String,
    pub caption: String,
    fell_back: bool,
}

impl Preview {
    fn from_request(request: PreviewRequest) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            src: present(request.src).unwrap_or_else(|| FALLBACK_IMAGE.to_owned()),
            title: present(request.title).unwrap_or_else(|| DEFAULT_PREVIEW_TITLE.to_owned()),
            caption: request.caption.unwrap_or_default(),
            fell_back: false,
        }
    }

    /// Whether the image was already swapped for the fallback.
    pub fn is_fallback(&self) -> bool {
        self.fell_back
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PreviewModal {
    #[default]
    Closed,
    Open(Preview),
}

impl PreviewModal {
    /// Opens the modal, replacing whatever it showed before.
    pub fn open(&mut self, request: PreviewRequest) {
        *self = Self::Open(Preview::from_request(request));
    }

    /// Dismissal comes from the host toolkit.
    pub fn close(&mut self) {
        *self = Self::Closed;
    }

    /// Swaps a broken image for the fallback, once. Returns whether anything
    /// changed.
    pub fn image_failed(&mut self) -> bool {
        match self {
            Self::Open(preview) if !preview.fell_back => {
                preview.src = FALLBACK_IMAGE.to_owned();
                preview.fell_back = true;
                true
            }
            _ => false,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn current(&self) -> Option<&Preview> {
        match self {
            Self::Open(preview) => Some(preview),
            Self::Closed => None,
        }
    }
}
