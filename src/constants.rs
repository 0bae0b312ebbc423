//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name, reserved identifiers and storage keys.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Pagewright";

/// Section id of the booking table. Never listed in navigation.
pub const BOOKING_SECTION_ID: &str = "booking";

/// Maximum number of snapshots kept for undo.
pub const HISTORY_LIMIT: usize = 10;

/// Storage key of the current site configuration.
pub const CONFIG_KEY: &str = "site-config";

/// Storage key of the courts list.
pub const COURTS_KEY: &str = "courts";

/// Storage key of the events list.
pub const EVENTS_KEY: &str = "events";

/// Storage key of the undo history.
pub const HISTORY_KEY: &str = "config-history";
