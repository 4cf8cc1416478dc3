//! # Helpdesk Core
//!
//! Core state management and domain models for the Helpdesk ticket viewer.
//!
//! This crate provides the non-UI half of the application: the ticket domain
//! model, a mock data-access layer with simulated latency, and the stores the
//! views render from. Views subscribe to store snapshots and dispatch store
//! operations; they hold no business state of their own.

pub mod api;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod prefs;
pub mod store;

// Re-export commonly used types
pub use api::{mock::MockTicketApi, TicketApi};
pub use domain::{Priority, Ticket, TicketId, TicketStatus};
pub use error::{HelpdeskError, Result};
pub use i18n::{Locale, Translator, SUPPORTED_LOCALES};
pub use prefs::{FilePreferences, MemoryPreferences, PreferenceStorage};
pub use store::{DetailFetchPolicy, LocaleStore, TicketStore, TicketsState};
