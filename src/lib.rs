//! # Sajadah
//!
//! A terminal companion for daily prayers: bundled and community-maintained
//! supplications (doa), a hadith collection, prayer times, the Hijri calendar
//! and the qibla direction.
//!
//! ## Architecture
//!
//! ```text
//! Store ──(live subscriptions)──▶ Pipeline ──▶ CLI / TUI
//! Fetcher ──▶ Normalizer ──▶ Services ──▶ CLI
//! ```
//!
//! - [`store`]: SQLite document store with live change notifications
//! - [`pipeline`]: merge, category derivation and filtering of content lists
//! - [`fetcher`] and [`normalizer`]: reference API client and response decoding
//! - [`services`]: prayer schedule, Hijri calendar and qibla lookups
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse supplications
//! sajadah doa -q tidur
//!
//! # Prayer times for Jakarta
//! sajadah schedule --lat -6.2 --lon 106.8
//!
//! # Add a hadith (needs [admin] in config.toml)
//! SAJADAH_PASSWORD=... sajadah admin add-hadith --title ... --category Akhlak ...
//!
//! # Launch TUI
//! sajadah tui
//! ```

/// Content management behind an admin session.
pub mod admin;

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the store, the
/// bundled content, the API services and the identity provider.
pub mod app;

/// Admin credentials and sessions.
pub mod auth;

/// Supplications compiled into the binary.
pub mod bundle;

/// Command-line interface using clap.
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/sajadah/config.toml`, supporting:
/// - Custom colors (named or hex)
/// - Custom keybindings
/// - Admin credentials
/// - API settings (calculation method, calendar location, timeouts)
pub mod config;

/// Core domain models.
///
/// - [`Doa`](domain::Doa) and [`Hadith`](domain::Hadith): the content entries
/// - [`Category`](domain::Category): category labels
/// - Prayer schedule, calendar and qibla records
pub mod domain;

/// HTTP access to the reference APIs.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait returning raw response bodies
/// - [`HttpFetcher`](fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Decoding of reference API responses into domain records.
pub mod normalizer;

/// Pure derivation of what a content list shows.
pub mod pipeline;

/// Prayer schedule, calendar and qibla lookups.
pub mod services;

/// SQLite persistence layer.
///
/// - [`Store`](store::Store): trait defining storage operations
/// - [`SqliteStore`](store::SqliteStore): SQLite implementation
/// - [`Subscription`](store::Subscription): live query over one collection
pub mod store;

/// Terminal user interface.
///
/// Categories and items side by side above a preview pane. Keybindings:
/// j/k navigate, Tab cycles panes, / searches, c switches between doa and
/// hadith, q quits.
pub mod tui;
