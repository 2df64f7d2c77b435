//! Navigable location providers.
//!
//! The coordinator reads the current path and query string through the
//! [`Location`] trait and writes back with [`Location::navigate`]. Browser
//! hosts implement it over their router; [`MemoryLocation`] keeps history in
//! memory.

mod memory;

pub use memory::MemoryLocation;
pub use memory::Navigation;

/// How a navigation is applied to the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Replace the current entry instead of pushing a new one.
    pub replace: bool,
    /// Scroll to the top of the page after navigating.
    pub scroll: bool,
}

impl NavigateOptions {
    /// Replace the current entry without scrolling. Used for all table state writes.
    pub const fn replace() -> Self {
        Self {
            replace: true,
            scroll: false,
        }
    }

    /// Push a new entry and scroll to top.
    pub const fn push() -> Self {
        Self {
            replace: false,
            scroll: true,
        }
    }
}

impl Default for NavigateOptions {
    fn default() -> Self {
        Self::push()
    }
}

/// A navigable location: current path, query string, and navigation.
///
/// Implementations must be shareable across the scheduler's tasks.
pub trait Location: Send + Sync {
    /// Returns the current path, without query string.
    fn pathname(&self) -> String;

    /// Returns the current query string, without the leading `?`.
    fn search(&self) -> String;

    /// Navigates to `href` (path plus optional query string).
    fn navigate(&self, href: &str, options: NavigateOptions);
}
