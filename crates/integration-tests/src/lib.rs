//! Integration tests for the catalog manager.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p catalog-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `catalog_scenarios` - End-to-end flows through `Catalog`
//! - `store_properties` - Storage gateway guarantees
//! - `file_store` - File-backed databases across reopen
//!
//! Every test opens its own store; nothing needs to be running.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;

use catalog_admin::{Catalog, Interaction, Store};

/// An [`Interaction`] that records notifications and prompts and answers
/// every confirmation the same way.
#[derive(Debug, Default)]
pub struct RecordingUi {
    decline: bool,
    notifications: Mutex<Vec<String>>,
    prompts: Mutex<Vec<String>>,
}

impl RecordingUi {
    /// Confirms everything.
    #[must_use]
    pub fn accepting() -> Self {
        Self::default()
    }

    /// Declines everything.
    #[must_use]
    pub fn declining() -> Self {
        Self {
            decline: true,
            ..Self::default()
        }
    }

    /// Notifications shown so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous test thread panicked while recording.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }

    /// Confirmation prompts asked so far.
    ///
    /// # Panics
    ///
    /// Panics if a previous test thread panicked while recording.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl Interaction for RecordingUi {
    #[allow(clippy::unwrap_used)]
    fn notify(&self, message: &str) {
        self.notifications.lock().unwrap().push(message.to_owned());
    }

    #[allow(clippy::unwrap_used)]
    fn confirm(&self, message: &str) -> bool {
        self.prompts.lock().unwrap().push(message.to_owned());
        !self.decline
    }
}

/// A catalog over a fresh in-memory store.
///
/// # Panics
///
/// Panics if the store cannot be opened.
#[allow(clippy::unwrap_used)]
pub async fn memory_catalog(ui: RecordingUi) -> Catalog<RecordingUi> {
    let store = Store::in_memory().await.unwrap();
    Catalog::start(store, ui).await.unwrap()
}
