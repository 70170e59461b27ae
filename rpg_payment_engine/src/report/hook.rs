use std::{future::Future, pin::Pin, sync::Arc};

use log::*;

use crate::{
    events::RecordChangedEvent,
    report::ReportGenerator,
    SqliteDatabase,
};

/// A [`RecordChangedEvent`] handler that rebuilds the report. Failures are logged and never reach the request that
/// caused the change.
pub fn export_hook(
    generator: ReportGenerator<SqliteDatabase>,
) -> impl Fn(RecordChangedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync + 'static {
    let generator = Arc::new(generator);
    move |ev: RecordChangedEvent| {
        let generator = Arc::clone(&generator);
        Box::pin(async move {
            debug!("📊️ Order {} is now {}. Regenerating the payment report", ev.order_id, ev.status);
            if let Err(e) = generator.regenerate().await {
                error!("📊️ Could not regenerate the payment report. {e}");
            }
        }) as Pin<Box<dyn Future<Output = ()> + Send>>
    }
}
