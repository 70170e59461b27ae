use std::{fmt::Debug, path::PathBuf};

use chrono::Utc;
use log::*;
use rpg_common::DEFAULT_CURRENCY_CODE;

use crate::{
    db_types::{NewPaymentRecord, OrderId, PaymentRecord, PaymentStatus, VerifiedPayment},
    events::{EventProducers, RecordChangedEvent},
    gateway_types::{GatewayPayment, NewGatewayOrder},
    helpers::PaymentSignatureVerifier,
    report::{read_report, ReportFile},
    rpg_api::{
        debug_store::DebugStore,
        errors::ReconciliationError,
        order_objects::{CreateOrderRequest, OrderDetails, OrderSummary, VerificationResult, VerifyPaymentRequest},
    },
    traits::{PaymentGateway, PaymentRecordStore, PaymentRecordStoreError},
};

/// `ReconciliationApi` keeps the gateway's view of an order, the local payment record and the exported report in
/// step.
///
/// Changes to records are announced through the [`EventProducers`] after they are committed. Callers never wait for
/// the subscribers (e.g. the report export) to finish.
pub struct ReconciliationApi<B, G> {
    store: B,
    gateway: G,
    verifier: PaymentSignatureVerifier,
    producers: EventProducers,
    debug_store: DebugStore,
    default_currency: String,
    report_path: PathBuf,
}

impl<B, G> Debug for ReconciliationApi<B, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ReconciliationApi")
    }
}

impl<B, G> ReconciliationApi<B, G> {
    pub fn new(store: B, gateway: G, verifier: PaymentSignatureVerifier, producers: EventProducers) -> Self {
        Self {
            store,
            gateway,
            verifier,
            producers,
            debug_store: DebugStore::default(),
            default_currency: DEFAULT_CURRENCY_CODE.to_string(),
            report_path: PathBuf::from(crate::report::REPORT_FILE_NAME),
        }
    }

    /// Shares an existing debug store, so that every server worker sees the same last order and payment.
    pub fn with_debug_store(mut self, debug_store: DebugStore) -> Self {
        self.debug_store = debug_store;
        self
    }

    pub fn with_default_currency<S: Into<String>>(mut self, currency: S) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn with_report_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.report_path = path.into();
        self
    }

    pub fn store(&self) -> &B {
        &self.store
    }

    pub fn last_order(&self) -> Option<crate::gateway_types::GatewayOrder> {
        self.debug_store.last_order()
    }

    pub fn last_payment(&self) -> Option<VerifiedPayment> {
        self.debug_store.last_payment()
    }

    /// Returns the last report that was written. Fails with `NotFoundError` if no report exists yet.
    pub async fn export_report(&self) -> Result<ReportFile, ReconciliationError> {
        let file = read_report(&self.report_path).await?;
        debug!("🔄️📊️ Serving report ({} bytes)", file.contents.len());
        Ok(file)
    }

    fn notify_record_changed(&self, order_id: OrderId, status: PaymentStatus) {
        trace!("🔄️ Notifying record changed hook subscribers");
        self.producers.record_changed(RecordChangedEvent::new(order_id, status));
    }
}

impl<B, G> ReconciliationApi<B, G>
where
    B: PaymentRecordStore,
    G: PaymentGateway,
{
    /// Opens an order at the gateway and records it locally with status `CREATED`.
    ///
    /// The currency and receipt fall back to the configured currency and a timestamped receipt when missing or blank.
    pub async fn create_order(&self, request: CreateOrderRequest) -> Result<OrderSummary, ReconciliationError> {
        let amount = request.minor_amount()?;
        let currency = non_blank(request.currency.as_deref()).unwrap_or(self.default_currency.as_str()).to_string();
        let receipt = non_blank(request.receipt.as_deref())
            .map(String::from)
            .unwrap_or_else(|| format!("rcpt_{}", Utc::now().timestamp_millis()));
        debug!("🔄️📦️ Creating order for {amount} {currency} (receipt {receipt})");
        let new_order = NewGatewayOrder { amount, currency, receipt };
        let order = self.gateway.create_order(new_order).await.map_err(|e| {
            warn!("🔄️📦️ The gateway could not create the order. {e}");
            ReconciliationError::from(e)
        })?;
        info!("🔄️📦️ Order {} created at the gateway for {} {}", order.id, order.amount, order.currency);
        self.debug_store.record_order(order.clone());
        let record = NewPaymentRecord::new(order.id.clone(), order.amount, order.currency.clone())
            .with_customer(request.customer());
        let (record, inserted) = self.store.insert_record(record).await.map_err(|e| {
            error!("🔄️📦️ Order {} was created at the gateway but could not be saved. {e}", order.id);
            ReconciliationError::from(e)
        })?;
        if inserted {
            self.notify_record_changed(record.order_id, record.status);
        }
        Ok(OrderSummary { order: OrderDetails::from(&order), key_id: self.gateway.key_id() })
    }

    /// Checks the client's payment confirmation and, if it is authentic, marks the order as paid.
    ///
    /// A signature mismatch is not an error. It results in [`VerificationResult::Rejected`] and nothing changes.
    pub async fn verify_payment(
        &self,
        request: VerifyPaymentRequest,
    ) -> Result<VerificationResult, ReconciliationError> {
        let (order_id, payment_id, signature) = request.fields()?;
        if !self.verifier.is_valid(order_id.as_str(), payment_id, signature)? {
            warn!("🔄️💰️ Rejected payment {payment_id} for order {order_id}: the signature does not match");
            return Ok(VerificationResult::Rejected);
        }
        let verified = VerifiedPayment {
            order_id: order_id.clone(),
            payment_id: payment_id.to_string(),
            signature: signature.to_string(),
            status: PaymentStatus::Paid,
        };
        let result = match self.store.mark_record_paid(&order_id, payment_id, signature).await {
            Ok(record) => {
                info!("🔄️💰️ Order {order_id} has been paid with payment {payment_id}");
                self.notify_record_changed(record.order_id, record.status);
                VerificationResult::Verified(verified.clone())
            },
            Err(PaymentRecordStoreError::AlreadyPaid(_)) => {
                info!("🔄️💰️ Order {order_id} was already paid. Nothing to do");
                VerificationResult::AlreadyPaid(verified.clone())
            },
            Err(e) => {
                warn!("🔄️💰️ Could not record payment {payment_id} for order {order_id}. {e}");
                return Err(e.into());
            },
        };
        self.debug_store.record_payment(verified);
        Ok(result)
    }

    /// Fetches a payment straight from the gateway. Nothing is stored.
    pub async fn get_payment_details(&self, payment_id: &str) -> Result<GatewayPayment, ReconciliationError> {
        let payment_id = payment_id.trim();
        if payment_id.is_empty() {
            return Err(ReconciliationError::ValidationError("A payment id is required".to_string()));
        }
        let payment = self.gateway.fetch_payment(payment_id).await?;
        trace!("🔄️💳️ Fetched payment {} ({})", payment.id, payment.status);
        Ok(payment)
    }

    /// Every payment record, most recent first.
    pub async fn list_payments(&self) -> Result<Vec<PaymentRecord>, ReconciliationError> {
        let records = self.store.fetch_all_records().await?;
        Ok(records)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
