/// Scroll offset, in pixels, past which the header turns solid.
pub const SCROLL_THRESHOLD: f64 = 50.0;

/// Visual treatment of the page header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderVariant {
    /// Over the hero image, at the top of the page.
    Transparent,
    /// Once the page has scrolled.
    Solid,
}

impl HeaderVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderVariant::Transparent => "transparent",
            HeaderVariant::Solid => "solid",
        }
    }
}

/// Header flag owned by the page and handed to whoever renders the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HeaderState {
    scrolled: bool,
}

impl HeaderState {
    /// Scroll callback. Every event overwrites the flag; there is no debounce.
    pub fn on_scroll(&mut self, offset_y: f64) {
        self.scrolled = offset_y > SCROLL_THRESHOLD;
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    pub fn variant(&self) -> HeaderVariant {
        if self.scrolled {
            HeaderVariant::Solid
        } else {
            HeaderVariant::Transparent
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_scroll_event_wins() {
        let mut header = HeaderState::default();
        assert_eq!(header.variant(), HeaderVariant::Transparent);
        header.on_scroll(320.0);
        assert!(header.is_scrolled());
        header.on_scroll(12.0);
        assert_eq!(header.variant(), HeaderVariant::Transparent);
        header.on_scroll(SCROLL_THRESHOLD);
        assert!(!header.is_scrolled());
    }
}
