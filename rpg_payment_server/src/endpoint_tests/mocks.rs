use mockall::mock;
use rpg_payment_engine::{
    db_types::{NewPaymentRecord, OrderId, PaymentRecord},
    gateway_types::{GatewayOrder, GatewayPayment, NewGatewayOrder},
    traits::{GatewayError, PaymentGateway, PaymentRecordStore, PaymentRecordStoreError},
};

mock! {
    pub RecordStore {}
    impl PaymentRecordStore for RecordStore {
        async fn insert_record(&self, record: NewPaymentRecord) -> Result<(PaymentRecord, bool), PaymentRecordStoreError>;
        async fn mark_record_paid(&self, order_id: &OrderId, payment_id: &str, signature: &str) -> Result<PaymentRecord, PaymentRecordStoreError>;
        async fn fetch_record_by_order_id(&self, order_id: &OrderId) -> Result<Option<PaymentRecord>, PaymentRecordStoreError>;
        async fn fetch_all_records(&self) -> Result<Vec<PaymentRecord>, PaymentRecordStoreError>;
    }
}

mock! {
    pub Gateway {}
    impl PaymentGateway for Gateway {
        fn key_id(&self) -> String;
        async fn create_order(&self, order: NewGatewayOrder) -> Result<GatewayOrder, GatewayError>;
        async fn fetch_payment(&self, payment_id: &str) -> Result<GatewayPayment, GatewayError>;
    }
}
