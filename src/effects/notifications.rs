//! Passive notification socket.
//!
//! One listener task per authenticated identity. Text frames are pushed into
//! a bounded channel drained by the event loop; when the UI falls behind,
//! new frames are dropped rather than buffered without limit.

use std::time::Duration;

use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::config::NotificationSettings;
use crate::event::{AppEvent, ListenerStatus};
use crate::model::UserId;

pub fn socket_url(ws_base: &str, user_id: UserId) -> String {
    format!("{}/ws/{}", ws_base.trim_end_matches('/'), user_id)
}

/// Exponential reconnect delay, doubling up to a ceiling.
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
    attempt: u32,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max: max.max(initial),
            current: initial,
            attempt: 0,
        }
    }

    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = self.current.saturating_mul(2).min(self.max);
        self.attempt += 1;
        delay
    }

    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
        self.attempt = 0;
    }
}

/// Text frame tagged with the identity whose socket produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub user_id: UserId,
    pub text: String,
}

pub struct NotificationListener {
    ws_url: String,
    settings: NotificationSettings,
    deliveries: mpsc::Sender<Delivery>,
    active: Option<(UserId, JoinHandle<()>)>,
}

impl NotificationListener {
    /// Returns the listener and the receiving end of its bounded queue.
    pub fn new(ws_url: impl Into<String>, settings: NotificationSettings) -> (Self, mpsc::Receiver<Delivery>) {
        let (deliveries, rx) = mpsc::channel(settings.queue_capacity.max(1));
        let listener = Self {
            ws_url: ws_url.into(),
            settings,
            deliveries,
            active: None,
        };
        (listener, rx)
    }

    pub fn active_user(&self) -> Option<UserId> {
        self.active
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(user, _)| *user)
    }

    /// Start listening for `user_id`. Replaces a listener for another identity;
    /// a live listener for the same identity is kept.
    pub fn connect(&mut self, user_id: UserId, status: mpsc::UnboundedSender<AppEvent>) {
        if self.active_user() == Some(user_id) {
            return;
        }
        self.disconnect();

        let url = socket_url(&self.ws_url, user_id);
        tracing::info!(user_id = %user_id, "starting notification listener");
        let handle = tokio::spawn(listen(
            user_id,
            url,
            self.settings.clone(),
            self.deliveries.clone(),
            status,
        ));
        self.active = Some((user_id, handle));
    }

    pub fn disconnect(&mut self) {
        if let Some((user_id, handle)) = self.active.take() {
            tracing::info!(user_id = %user_id, "stopping notification listener");
            handle.abort();
        }
    }
}

impl Drop for NotificationListener {
    fn drop(&mut self) {
        self.disconnect();
    }
}

async fn listen(
    user_id: UserId,
    url: String,
    settings: NotificationSettings,
    deliveries: mpsc::Sender<Delivery>,
    status: mpsc::UnboundedSender<AppEvent>,
) {
    let mut backoff = Backoff::new(settings.reconnect_initial, settings.reconnect_max);
    let report = |status_change: ListenerStatus| {
        let _ = status.send(AppEvent::ListenerChanged {
            user_id,
            status: status_change,
        });
    };

    loop {
        report(ListenerStatus::Connecting);

        match connect_async(url.as_str()).await {
            Ok((mut stream, _response)) => {
                tracing::info!(%url, "notification socket connected");
                backoff.reset();
                report(ListenerStatus::Connected);

                while let Some(frame) = stream.next().await {
                    match frame {
                        Ok(Message::Text(text)) => {
                            let delivery = Delivery {
                                user_id,
                                text: text.as_str().to_owned(),
                            };
                            if !deliver(&deliveries, delivery) {
                                return;
                            }
                        }
                        Ok(Message::Close(_)) => break,
                        Ok(_) => {}
                        Err(e) => {
                            tracing::warn!(error = %e, "notification socket read failed");
                            break;
                        }
                    }
                }
                tracing::info!(%url, "notification socket closed");
            }
            Err(e) => {
                tracing::warn!(%url, error = %e, "notification socket connect failed");
            }
        }

        let delay = backoff.next_delay();
        report(ListenerStatus::Reconnecting {
            attempt: backoff.attempt(),
            delay,
        });
        tokio::time::sleep(delay).await;
    }
}

/// Returns false once the event loop has gone away.
fn deliver(deliveries: &mpsc::Sender<Delivery>, delivery: Delivery) -> bool {
    match deliveries.try_send(delivery) {
        Ok(()) => true,
        Err(mpsc::error::TrySendError::Full(dropped)) => {
            tracing::warn!(len = dropped.text.len(), "notification queue full, dropping frame");
            true
        }
        Err(mpsc::error::TrySendError::Closed(_)) => false,
    }
}
