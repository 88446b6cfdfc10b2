//! Page identity: which logical page the current URL points at.

use std::fmt;
use std::str::FromStr;

/// Logical page name, used as the second-level key of the translation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageId {
    #[default]
    Home,
    About,
    Products,
    Contact,
}

impl PageId {
    /// Every supported page, in navigation order.
    pub const ALL: [PageId; 4] = [PageId::Home, PageId::About, PageId::Products, PageId::Contact];

    pub fn as_str(&self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::About => "about",
            PageId::Products => "products",
            PageId::Contact => "contact",
        }
    }

    /// Derive the page from a URL path.
    ///
    /// Only the last non-empty segment is considered, and it must match the
    /// allow-list exactly. Anything else (no segments, a bare language prefix,
    /// `products.html`, unknown names) resolves to [`PageId::Home`].
    pub fn from_path(path: &str) -> PageId {
        path.split('/')
            .filter(|segment| !segment.is_empty())
            .last()
            .and_then(|segment| segment.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for PageId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| format!("Unknown page: '{}'", s))
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
