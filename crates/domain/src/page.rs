//! Pages: the content modes the display rotates through.

use std::fmt;

/// One selectable content mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Today,
    Tomorrow,
    Daylight,
    Countdown,
    Diagnostics,
    /// Readings of every sensor in the named area.
    Area(String),
}

impl Page {
    /// Pages present regardless of configuration, in rotation order.
    pub const FIXED: [Page; 5] = [
        Page::Today,
        Page::Tomorrow,
        Page::Daylight,
        Page::Countdown,
        Page::Diagnostics,
    ];
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Today => f.write_str("today"),
            Self::Tomorrow => f.write_str("tomorrow"),
            Self::Daylight => f.write_str("daylight"),
            Self::Countdown => f.write_str("countdown"),
            Self::Diagnostics => f.write_str("diagnostics"),
            Self::Area(name) => write!(f, "area:{name}"),
        }
    }
}

/// Ordered rotation set, fixed at construction and never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSet {
    pages: Vec<Page>,
}

impl PageSet {
    /// The fixed pages followed by one page per area.
    #[must_use]
    pub fn new(areas: impl IntoIterator<Item = String>) -> Self {
        let pages = Page::FIXED
            .into_iter()
            .chain(areas.into_iter().map(Page::Area))
            .collect();
        Self { pages }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page at `index`, wrapping around the set.
    #[must_use]
    pub fn get(&self, index: usize) -> &Page {
        &self.pages[index % self.pages.len()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Page> {
        self.pages.iter()
    }
}

impl Default for PageSet {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}
