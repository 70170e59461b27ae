//! Simple stateless pub-sub event handler
//!
//! This module provides a small hook system that lets components of the system subscribe to payment engine events
//! and react to them. The handlers have no access to the internal state of the system. All that is received is the
//! event itself.
//!
//! Events are handled one at a time, in a single task. When the handler falls behind, the events that queued up in the
//! meantime are collapsed into the most recent one, so a burst of changes produces one handler call rather than many.
//! This suits handlers that rebuild derived state from scratch, such as the report export.
use std::{future::Future, pin::Pin, sync::Arc};

use log::*;
use tokio::sync::mpsc::{self, error::TrySendError};

pub type Handler<E> = Arc<dyn Fn(E) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

pub struct EventHandler<E: Send + Sync + 'static> {
    listener: mpsc::Receiver<E>,
    sender: mpsc::Sender<E>,
    handler: Handler<E>,
}

impl<E: Send + Sync + 'static> EventHandler<E> {
    pub fn new(buffer_size: usize, handler: Handler<E>) -> Self {
        let (sender, receiver) = mpsc::channel(buffer_size.max(1));
        Self { listener: receiver, sender, handler }
    }

    pub fn subscribe(&self) -> EventProducer<E> {
        EventProducer::new(self.sender.clone())
    }

    /// Runs until every producer has been dropped. Handler calls never overlap.
    pub async fn start_handler(mut self) {
        debug!("📬️ Starting event handler");
        // drop the internal sender so that when the last subscriber is dropped, we can automatically shut down the
        // handler
        drop(self.sender);
        while let Some(mut ev) = self.listener.recv().await {
            let mut skipped = 0usize;
            while let Ok(newer) = self.listener.try_recv() {
                ev = newer;
                skipped += 1;
            }
            if skipped > 0 {
                debug!("📬️ Coalesced {skipped} queued event(s) into one");
            }
            trace!("📬️ Handling event");
            (self.handler)(ev).await;
            trace!("📬️ Event handled");
        }
        debug!("📬️ Event handler has shut down");
    }
}

#[derive(Clone)]
pub struct EventProducer<E: Send + Sync> {
    sender: mpsc::Sender<E>,
}

impl<E: Send + Sync> EventProducer<E> {
    pub fn new(sender: mpsc::Sender<E>) -> Self {
        Self { sender }
    }

    /// Waits for room in the queue, then publishes the event.
    pub async fn publish_event(&self, event: E) {
        if let Err(e) = self.sender.send(event).await {
            error!("📬️ Failed to send event: {e}");
        }
    }

    /// Publishes the event without waiting. If the queue is full, the handler already has work pending that it will
    /// pick up, so the event is dropped.
    pub fn try_publish_event(&self, event: E) {
        match self.sender.try_send(event) {
            Ok(()) => {},
            Err(TrySendError::Full(_)) => debug!("📬️ Event queue is full. Dropping event, since work is pending"),
            Err(TrySendError::Closed(_)) => error!("📬️ Failed to send event: the handler has shut down"),
        }
    }
}
