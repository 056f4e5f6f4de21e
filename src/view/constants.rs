//! Layout dimension constants for TUI rendering.
//!
//! Centralized location for layout-related numeric values.

use std::time::Duration;

/// Height of the example CURIEs line.
pub const EXAMPLES_HEIGHT: u16 = 1;

/// Height of the search box in lines (border + one line of text).
pub const SEARCH_BAR_HEIGHT: u16 = 3;

/// Height of the helper panel in lines.
///
/// Border, message, and up to four part rows (resource, prefix, local id, URI).
pub const HELPER_PANEL_HEIGHT: u16 = 8;

/// Height of the status bar in lines.
pub const STATUS_BAR_HEIGHT: u16 = 1;

/// Suggestions moved by Page Up / Page Down.
pub const PAGE_STEP: usize = 5;

/// Longest the event loop sleeps without checking timers and worker replies.
pub const TICK_INTERVAL: Duration = Duration::from_millis(100);
