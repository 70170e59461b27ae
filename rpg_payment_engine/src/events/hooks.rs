use std::{future::Future, pin::Pin, sync::Arc};

use log::*;

use crate::events::{EventHandler, EventProducer, Handler, RecordChangedEvent};

#[derive(Default, Clone)]
pub struct EventProducers {
    pub record_changed_producer: Vec<EventProducer<RecordChangedEvent>>,
}

impl EventProducers {
    /// Notifies every subscriber without waiting for queue space.
    pub fn record_changed(&self, event: RecordChangedEvent) {
        for producer in &self.record_changed_producer {
            producer.try_publish_event(event.clone());
        }
    }
}

pub struct EventHandlers {
    pub on_record_changed: Option<EventHandler<RecordChangedEvent>>,
}

impl EventHandlers {
    pub fn new(buffer_size: usize, hooks: EventHooks) -> Self {
        let on_record_changed = hooks.on_record_changed.map(|f| EventHandler::new(buffer_size, f));
        Self { on_record_changed }
    }

    pub fn producers(&self) -> EventProducers {
        let mut result = EventProducers::default();
        if let Some(handler) = &self.on_record_changed {
            result.record_changed_producer.push(handler.subscribe());
        }
        result
    }

    pub async fn start_handlers(self) {
        if let Some(handler) = self.on_record_changed {
            info!("📬️ Starting record-changed handler");
            tokio::spawn(async move {
                handler.start_handler().await;
            });
        }
    }
}

#[derive(Default, Clone)]
pub struct EventHooks {
    pub on_record_changed: Option<Handler<RecordChangedEvent>>,
}

impl EventHooks {
    pub fn on_record_changed<F>(&mut self, f: F) -> &mut Self
    where F: (Fn(RecordChangedEvent) -> Pin<Box<dyn Future<Output = ()> + Send>>) + Send + Sync + 'static {
        self.on_record_changed = Some(Arc::new(f));
        self
    }
}
