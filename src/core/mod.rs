//! # Core Application Logic
//!
//! This module contains Drafter's drafting model and persistence.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (paragraphs)   │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • DraftSession         │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┼───────────────────┐
//!            ▼                   ▼                   ▼
//!     ┌────────────┐      ┌────────────┐      ┌────────────┐
//!     │    TUI     │      │ DraftStore │      │  Settings  │
//!     │  Adapter   │      │            │      │  Service   │
//!     │ (ratatui)  │      └─────┬──────┘      └─────┬──────┘
//!     └────────────┘            └───► KeyValueStore ◄┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct: paragraphs, draft id, theme flag
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`session`]: `DraftSession`, the controller that runs effects
//! - [`draft`]: Draft payload and the `currentDraft` slot
//! - [`settings`]: Theme flag persistence and `ThemeContext`
//! - [`storage`]: `KeyValueStore` trait, file and memory stores
//! - [`config`]: `~/.drafter/config.toml` loading and resolution

pub mod action;
pub mod config;
pub mod draft;
pub mod session;
pub mod settings;
pub mod state;
pub mod storage;
