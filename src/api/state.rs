//! Application state for the Refund Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::lifecycle::RefundLifecycleManager;
use crate::store::{BookingStore, InMemoryBookingStore, InMemoryRefundStore, RefundStore};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    manager: RefundLifecycleManager,
}

impl AppState {
    /// Creates application state around an existing manager.
    pub fn new(manager: RefundLifecycleManager) -> Self {
        Self { manager }
    }

    /// Creates application state backed by the given policies and stores.
    pub fn with_stores(
        config: ConfigLoader,
        bookings: Arc<dyn BookingStore>,
        refunds: Arc<dyn RefundStore>,
    ) -> Self {
        Self::new(RefundLifecycleManager::new(
            Arc::new(config),
            bookings,
            refunds,
        ))
    }

    /// Creates application state with empty in-memory stores.
    pub fn in_memory(config: ConfigLoader) -> Self {
        Self::with_stores(
            config,
            Arc::new(InMemoryBookingStore::new()),
            Arc::new(InMemoryRefundStore::new()),
        )
    }

    /// Returns the lifecycle manager.
    pub fn manager(&self) -> &RefundLifecycleManager {
        &self.manager
    }
}
