//! Process-lifetime memory of the last order created and the last payment verified. This is a development aid only;
//! the record store is the source of truth.
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{db_types::VerifiedPayment, gateway_types::GatewayOrder};

#[derive(Debug, Default)]
struct DebugState {
    last_order: Option<GatewayOrder>,
    last_payment: Option<VerifiedPayment>,
}

/// Cheap to clone. All clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct DebugStore {
    state: Arc<RwLock<DebugState>>,
}

impl DebugStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_order(&self, order: GatewayOrder) {
        self.write().last_order = Some(order);
    }

    pub fn record_payment(&self, payment: VerifiedPayment) {
        self.write().last_payment = Some(payment);
    }

    pub fn last_order(&self) -> Option<GatewayOrder> {
        self.read().last_order.clone()
    }

    pub fn last_payment(&self) -> Option<VerifiedPayment> {
        self.read().last_payment.clone()
    }

    // Every write replaces a whole value, so the state is usable even if a writer panicked.
    fn read(&self) -> RwLockReadGuard<'_, DebugState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DebugState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}
