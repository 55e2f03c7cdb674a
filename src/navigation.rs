use parking_lot::RwLock;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Characters escaped when a value is encoded as a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathEncoding {
    /// Append the value exactly as the control reports it.
    #[default]
    Raw,
    /// Percent-encode the value as one path segment.
    Percent,
}

impl fmt::Display for PathEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEncoding::Raw => write!(f, "raw"),
            PathEncoding::Percent => write!(f, "percent"),
        }
    }
}

pub fn navigation_path(prefix: &str, value: &str, encoding: PathEncoding) -> String {
    match encoding {
        PathEncoding::Raw => format!("{prefix}{value}"),
        PathEncoding::Percent => format!("{prefix}{}", utf8_percent_encode(value, PATH_SEGMENT)),
    }
}

/// Receives navigation requests. Assigning an href is terminal for the page
/// that issued it.
pub trait Navigator {
    fn assign(&mut self, href: &str);
}

impl<N: Navigator + ?Sized> Navigator for &mut N {
    fn assign(&mut self, href: &str) {
        (**self).assign(href);
    }
}

impl Navigator for Vec<String> {
    fn assign(&mut self, href: &str) {
        self.push(href.to_string());
    }
}

/// Shared browser location that records every assignment in order.
#[derive(Clone, Default)]
pub struct Location {
    shared: Arc<RwLock<LocationState>>,
}

#[derive(Default)]
struct LocationState {
    href: String,
    history: Vec<String>,
}

impl Location {
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            shared: Arc::new(RwLock::new(LocationState {
                href: initial.into(),
                history: Vec::new(),
            })),
        }
    }

    pub fn href(&self) -> String {
        self.shared.read().href.clone()
    }

    /// Every href assigned since creation, oldest first.
    pub fn history(&self) -> Vec<String> {
        self.shared.read().history.clone()
    }

    pub fn navigation_count(&self) -> usize {
        self.shared.read().history.len()
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.shared.read();
        f.debug_struct("Location")
            .field("href", &guard.href)
            .field("navigations", &guard.history.len())
            .finish()
    }
}

impl Navigator for Location {
    fn assign(&mut self, href: &str) {
        let mut guard = self.shared.write();
        guard.href = href.to_string();
        guard.history.push(href.to_string());
        let count = guard.history.len();
        drop(guard);
        info!(%href, count, "navigating");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_path_is_plain_concatenation() {
        assert_eq!(
            navigation_path("/pokemon/", "fire", PathEncoding::Raw),
            "/pokemon/fire"
        );
        assert_eq!(
            navigation_path("/pokemon/", "fire water", PathEncoding::Raw),
            "/pokemon/fire water"
        );
        assert_eq!(navigation_path("/pokemon/", "", PathEncoding::Raw), "/pokemon/");
        assert_eq!(
            navigation_path("/pokemon/", "../admin?x=1", PathEncoding::Raw),
            "/pokemon/../admin?x=1"
        );
    }

    #[test]
    fn percent_path_escapes_segment_delimiters() {
        assert_eq!(
            navigation_path("/pokemon/", "fire water", PathEncoding::Percent),
            "/pokemon/fire%20water"
        );
        assert_eq!(
            navigation_path("/pokemon/", "a/b?c#d", PathEncoding::Percent),
            "/pokemon/a%2Fb%3Fc%23d"
        );
        assert_eq!(
            navigation_path("/pokemon/", "Pokémon", PathEncoding::Percent),
            "/pokemon/Pok%C3%A9mon"
        );
    }

    #[test]
    fn location_clones_share_history() {
        let location = Location::new("/pokemon/");
        let mut handle = location.clone();
        handle.assign("/pokemon/Fire");
        handle.assign("/pokemon/Fire");
        assert_eq!(location.href(), "/pokemon/Fire");
        assert_eq!(location.navigation_count(), 2);
        assert_eq!(location.history(), vec!["/pokemon/Fire", "/pokemon/Fire"]);
    }

    #[test]
    fn vec_navigator_collects_hrefs() {
        let mut log: Vec<String> = Vec::new();
        log.assign("/pokemon/Bug");
        assert_eq!(log, vec!["/pokemon/Bug".to_string()]);
    }
}
