//! Simulated real-time vitals feed over an echo WebSocket.
//!
//! The channel owns one bidirectional connection to an external echo
//! endpoint. On a fixed interval it sends a synthetic reading for a randomly
//! chosen subscribed patient; because the endpoint echoes, whatever comes
//! back is treated as the inbound "live" feed. The subscriber list is
//! captured at open: changing it means closing this channel and opening a
//! new one.
//!
//! Failure policy: connection-level errors are logged and the feed simply
//! stops producing readings. There is no retry, no backoff and no
//! reconnection; the consumer only observes that vitals stop updating.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use rand::Rng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tracing::{debug, error, info, trace, warn};
use tungstenite::Message;
use url::Url;
use uuid::Uuid;

use crate::error::Error;
use crate::models::VitalsReading;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(3000);

pub struct TelemetryChannel;

impl TelemetryChannel {
    /// Connect to `endpoint` and start the feed.
    ///
    /// Once the connection is established, a send task ticks every
    /// `interval` and emits one synthetic reading for a random name from
    /// `names` (no-op while the list is empty); a receive task forwards
    /// every parseable inbound frame to `readings`. Malformed frames are
    /// dropped without surfacing an error.
    pub async fn open(
        endpoint: &str,
        names: Vec<String>,
        interval: Duration,
        readings: mpsc::Sender<VitalsReading>,
    ) -> Result<TelemetrySubscription, Error> {
        let url = Url::parse(endpoint)?;
        let (stream, _) = connect_async(url).await?;
        let session = Uuid::new_v4();
        info!(%session, endpoint, subscribers = names.len(), "telemetry channel connected");

        let (mut sink, mut source) = stream.split();
        let closed = Arc::new(AtomicBool::new(false));

        let send_closed = Arc::clone(&closed);
        let send_task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first interval tick completes immediately; consume it so
            // the first reading goes out one full interval after connect.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if send_closed.load(Ordering::SeqCst) {
                    break;
                }
                let reading = {
                    let mut rng = rand::thread_rng();
                    synthetic_reading(&names, &mut rng)
                };
                let Some(reading) = reading else { continue };
                let payload = match serde_json::to_string(&reading) {
                    Ok(payload) => payload,
                    Err(err) => {
                        error!(%session, error = %err, "failed to encode reading");
                        continue;
                    }
                };
                trace!(%session, name = %reading.name, "sending synthetic reading");
                if let Err(err) = sink.send(Message::Text(payload)).await {
                    warn!(%session, error = %err, "send failed; synthetic feed stopped");
                    break;
                }
            }
            let _ = sink.send(Message::Close(None)).await;
            debug!(%session, "send task finished");
        });

        let recv_closed = Arc::clone(&closed);
        let recv_task = tokio::spawn(async move {
            while let Some(frame) = source.next().await {
                if recv_closed.load(Ordering::SeqCst) {
                    break;
                }
                match frame {
                    Ok(Message::Text(text)) => match parse_reading(&text) {
                        Some(reading) => {
                            if readings.send(reading).await.is_err() {
                                // Consumer went away; nothing left to feed.
                                break;
                            }
                        }
                        None => trace!(%session, "dropping malformed frame"),
                    },
                    Ok(Message::Close(_)) => {
                        info!(%session, "endpoint closed the connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        error!(%session, error = %err, "stream error; vitals will stop updating");
                        break;
                    }
                }
            }
            debug!(%session, "receive task finished");
        });

        Ok(TelemetrySubscription {
            session,
            closed,
            send_task,
            recv_task,
        })
    }
}

/// Handle for one open channel. Closing stops both tasks and drops the
/// connection; it is idempotent and also runs on drop, so the channel can
/// never outlive its consumer.
pub struct TelemetrySubscription {
    session: Uuid,
    closed: Arc<AtomicBool>,
    send_task: JoinHandle<()>,
    recv_task: JoinHandle<()>,
}

impl TelemetrySubscription {
    pub fn session(&self) -> Uuid {
        self.session
    }

    pub fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.send_task.abort();
        self.recv_task.abort();
        info!(session = %self.session, "telemetry channel closed");
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl Drop for TelemetrySubscription {
    fn drop(&mut self) {
        self.close();
    }
}

/// One synthetic reading for a random subscribed patient. `None` when the
/// subscriber list is empty.
pub fn synthetic_reading<R: Rng>(names: &[String], rng: &mut R) -> Option<VitalsReading> {
    if names.is_empty() {
        return None;
    }
    let name = names[rng.gen_range(0..names.len())].clone();
    let systolic = rng.gen_range(90..130);
    let diastolic = rng.gen_range(60..80);
    Some(VitalsReading {
        name,
        heart_rate: Some(rng.gen_range(60..130)),
        blood_pressure: Some(format!("{systolic}/{diastolic}")),
        oxygen_level: Some(rng.gen_range(85..100)),
    })
}

fn parse_reading(text: &str) -> Option<VitalsReading> {
    serde_json::from_str(text).ok()
}
