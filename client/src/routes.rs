//! Declarative description of the SPA route table.
//!
//! SYSTEM CONTEXT
//! ==============
//! `app::App` declares the live routes with `leptos_router`; this module keeps
//! the same table as plain data so navigation menus, page titles and the
//! server's route checks can read it without a reactive runtime. Matching of
//! the running app stays with the router; `resolve` only mirrors exact static
//! matches.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

/// URL prefix every client route lives under.
pub const BASE_PATH: &str = "/fauno";

/// The view a route renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteView {
    Auth,
    Layers,
    Uploader,
    History,
}

impl RouteView {
    /// Human-readable label used in navigation and document titles.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Auth => "Fauno",
            Self::Layers => "Layers",
            Self::Uploader => "Upload",
            Self::History => "History",
        }
    }
}

/// Enclosing guard route for an entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    Protected,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path relative to [`BASE_PATH`], always starting with `/`.
    pub path: &'static str,
    pub view: RouteView,
    pub guard: Option<Guard>,
}

impl RouteEntry {
    /// Base-prefixed link target, e.g. `/fauno/layers`. The root entry links
    /// to the bare base path, the form the server registers.
    #[must_use]
    pub fn href(&self) -> String {
        if self.path == "/" {
            BASE_PATH.to_owned()
        } else {
            format!("{BASE_PATH}{}", self.path)
        }
    }

    #[must_use]
    pub fn is_protected(&self) -> bool {
        self.guard.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteTableError {
    #[error("duplicate route path: {0}")]
    DuplicatePath(&'static str),
    #[error("route path must start with '/': {0}")]
    RelativePath(&'static str),
}

/// Ordered, immutable route table.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteTable {
    entries: Vec<RouteEntry>,
}

impl RouteTable {
    /// The table shipped by the application root.
    #[must_use]
    pub fn fauno() -> Self {
        Self {
            entries: vec![
                RouteEntry { path: "/", view: RouteView::Auth, guard: None },
                RouteEntry { path: "/layers", view: RouteView::Layers, guard: Some(Guard::Protected) },
                RouteEntry { path: "/upload", view: RouteView::Uploader, guard: Some(Guard::Protected) },
                RouteEntry { path: "/history", view: RouteView::History, guard: Some(Guard::Protected) },
            ],
        }
    }

    #[must_use]
    pub fn builder() -> RouteTableBuilder {
        RouteTableBuilder::default()
    }

    #[must_use]
    pub fn entries(&self) -> &[RouteEntry] {
        &self.entries
    }

    /// Entries rendered inside the protected layout, in declaration order.
    pub fn protected_entries(&self) -> impl Iterator<Item = &RouteEntry> {
        self.entries.iter().filter(|e| e.is_protected())
    }

    /// Resolve a full URL path (including the base prefix) to its entry.
    ///
    /// Paths outside [`BASE_PATH`] never match. Query strings and fragments
    /// are ignored, and a trailing slash is insignificant.
    #[must_use]
    pub fn resolve(&self, url_path: &str) -> Option<&RouteEntry> {
        let relative = strip_base(url_path)?;
        self.entries.iter().find(|e| e.path == relative)
    }
}

/// Strip [`BASE_PATH`] and normalize the remainder to `/segment[/segment]`.
fn strip_base(url_path: &str) -> Option<String> {
    let path = url_path.split(['?', '#']).next().unwrap_or_default();
    let rest = path.strip_prefix(BASE_PATH)?;
    if !rest.is_empty() && !rest.starts_with('/') {
        return None;
    }
    let trimmed = rest.trim_end_matches('/');
    if trimmed.is_empty() { Some("/".to_owned()) } else { Some(trimmed.to_owned()) }
}

/// Incremental construction of a [`RouteTable`].
#[derive(Debug, Default)]
pub struct RouteTableBuilder {
    entries: Vec<RouteEntry>,
    error: Option<RouteTableError>,
}

impl RouteTableBuilder {
    #[must_use]
    pub fn public(self, path: &'static str, view: RouteView) -> Self {
        self.push(RouteEntry { path, view, guard: None })
    }

    #[must_use]
    pub fn protected(self, path: &'static str, view: RouteView) -> Self {
        self.push(RouteEntry { path, view, guard: Some(Guard::Protected) })
    }

    fn push(mut self, entry: RouteEntry) -> Self {
        if self.error.is_some() {
            return self;
        }
        if !entry.path.starts_with('/') {
            self.error = Some(RouteTableError::RelativePath(entry.path));
        } else if self.entries.iter().any(|e| e.path == entry.path) {
            self.error = Some(RouteTableError::DuplicatePath(entry.path));
        } else {
            self.entries.push(entry);
        }
        self
    }

    /// Finish the table.
    ///
    /// # Errors
    ///
    /// Returns the first invalid entry encountered while building.
    pub fn build(self) -> Result<RouteTable, RouteTableError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(RouteTable { entries: self.entries }),
        }
    }
}
