//! In-memory location with history.

use std::sync::Mutex;

use log::debug;

use super::Location;
use super::NavigateOptions;
use crate::query::split_href;

/// A recorded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub href: String,
    pub options: NavigateOptions,
}

#[derive(Debug)]
struct History {
    entries: Vec<String>,
    index: usize,
    log: Vec<Navigation>,
}

/// A [`Location`] backed by an in-memory history stack.
///
/// Pushing truncates any forward entries, like a browser. Every call to
/// [`navigate`](Location::navigate) is recorded.
///
/// # Example
///
/// ```
/// use tablesync_lib::location::{Location, MemoryLocation, NavigateOptions};
///
/// let location = MemoryLocation::new("/products?page=2");
/// location.navigate("/products?page=3", NavigateOptions::replace());
///
/// assert_eq!(location.search(), "page=3");
/// assert_eq!(location.history_len(), 1);
/// assert_eq!(location.navigations().len(), 1);
/// ```
#[derive(Debug)]
pub struct MemoryLocation {
    history: Mutex<History>,
}

impl MemoryLocation {
    /// Creates a location whose only history entry is `href`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(History {
                entries: vec![href.into()],
                index: 0,
                log: Vec::new(),
            }),
        }
    }

    /// Returns the current href.
    pub fn href(&self) -> String {
        self.with_history(|h| h.entries[h.index].clone())
    }

    /// Returns the number of history entries.
    pub fn history_len(&self) -> usize {
        self.with_history(|h| h.entries.len())
    }

    /// Returns every navigation made so far.
    pub fn navigations(&self) -> Vec<Navigation> {
        self.with_history(|h| h.log.clone())
    }

    /// Moves back one entry. Returns `false` at the start of history.
    pub fn back(&self) -> bool {
        self.with_history_mut(|h| {
            if h.index == 0 {
                return false;
            }
            h.index -= 1;
            true
        })
    }

    /// Moves forward one entry. Returns `false` at the end of history.
    pub fn forward(&self) -> bool {
        self.with_history_mut(|h| {
            if h.index + 1 >= h.entries.len() {
                return false;
            }
            h.index += 1;
            true
        })
    }

    fn with_history<R>(&self, f: impl FnOnce(&History) -> R) -> R {
        let guard = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&guard)
    }

    fn with_history_mut<R>(&self, f: impl FnOnce(&mut History) -> R) -> R {
        let mut guard = self
            .history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl Default for MemoryLocation {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Location for MemoryLocation {
    fn pathname(&self) -> String {
        let href = self.href();
        split_href(&href).0.to_string()
    }

    fn search(&self) -> String {
        let href = self.href();
        split_href(&href).1.to_string()
    }

    fn navigate(&self, href: &str, options: NavigateOptions) {
        debug!("navigate {} (replace: {})", href, options.replace);
        self.with_history_mut(|h| {
            if options.replace {
                h.entries[h.index] = href.to_string();
            } else {
                h.entries.truncate(h.index + 1);
                h.entries.push(href.to_string());
                h.index += 1;
            }
            h.log.push(Navigation {
                href: href.to_string(),
                options,
            });
        });
    }
}
