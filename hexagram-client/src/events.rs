//! Live room updates over server-sent events
//!
//! [`RoomEvents`] is the single subscription capability: open it for a
//! room/token pair, pull decoded [`RoomEvent`]s with [`RoomEvents::next`],
//! and close it when done. A background task reads the response body and
//! feeds an unbounded channel; there is no reconnection, buffering policy or
//! deduplication. When the server ends the stream, `next` returns `None`.

use futures::StreamExt;
use hexagram_core::RoomEvent;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Path of the push channel for a room
pub fn sse_path(room_id: &str, token: &str) -> String {
    format!("/sse/{}/{}", room_id, token)
}

/// Incremental decoder for a `text/event-stream` body
///
/// Yields the `data` payload of each complete event. Lines end with `\n`,
/// `\r\n` or a lone `\r`. Multiple `data` lines are joined with `\n`;
/// comment lines and other fields are skipped.
#[derive(Debug, Default)]
pub struct SseDecoder {
    pending: Vec<u8>,
    data: Vec<String>,
    after_cr: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and collect the payloads it completes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.pending.extend_from_slice(chunk);
        let mut payloads = Vec::new();

        loop {
            // A `\r\n` pair split across chunks is one terminator.
            if self.after_cr && !self.pending.is_empty() {
                if self.pending[0] == b'\n' {
                    self.pending.remove(0);
                }
                self.after_cr = false;
            }

            let Some(pos) = self.pending.iter().position(|&b| b == b'\n' || b == b'\r') else {
                break;
            };
            let raw: Vec<u8> = self.pending.drain(..=pos).collect();
            self.after_cr = raw[pos] == b'\r';
            let line = String::from_utf8_lossy(&raw[..pos]).into_owned();
            self.feed_line(&line, &mut payloads);
        }

        payloads
    }

    fn feed_line(&mut self, line: &str, payloads: &mut Vec<String>) {
        if line.is_empty() {
            if !self.data.is_empty() {
                payloads.push(self.data.join("\n"));
                self.data.clear();
            }
            return;
        }
        if line.starts_with(':') {
            return;
        }

        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        if field == "data" {
            self.data.push(value.to_string());
        }
    }
}

/// Live subscription to one room
pub struct RoomEvents {
    room_id: String,
    rx: mpsc::UnboundedReceiver<RoomEvent>,
    task: Option<JoinHandle<()>>,
}

impl RoomEvents {
    /// Connect to the room's push channel
    ///
    /// Fails if the connection cannot be made or the server refuses it.
    pub async fn open(
        http: &reqwest::Client,
        config: &ClientConfig,
        room_id: &str,
        token: &str,
    ) -> Result<Self> {
        let url = config.url(&sse_path(room_id, token));
        tracing::debug!("Opening push channel for room {}", room_id);

        let response = http
            .get(&url)
            .header(reqwest::header::ACCEPT, "text/event-stream")
            .send()
            .await?;
        let status = response.status();
        if status != reqwest::StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let task = tokio::spawn(read_events(room_id.to_string(), response, tx));

        Ok(Self {
            room_id: room_id.to_string(),
            rx,
            task: Some(task),
        })
    }

    pub fn room_id(&self) -> &str {
        &self.room_id
    }

    /// Next event, or `None` once the channel is closed
    pub async fn next(&mut self) -> Option<RoomEvent> {
        self.rx.recv().await
    }

    /// Stop listening
    pub fn close(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            tracing::debug!("Closed push channel for room {}", self.room_id);
        }
        self.rx.close();
    }
}

impl Drop for RoomEvents {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

async fn read_events(
    room_id: String,
    response: reqwest::Response,
    tx: mpsc::UnboundedSender<RoomEvent>,
) {
    let mut body = response.bytes_stream();
    let mut decoder = SseDecoder::new();

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::error!("Push channel for room {} failed: {}", room_id, e);
                break;
            }
        };

        for payload in decoder.push(&chunk) {
            match serde_json::from_str::<RoomEvent>(&payload) {
                Ok(event) => {
                    if tx.send(event).is_err() {
                        return;
                    }
                }
                Err(e) => tracing::warn!("Skipping undecodable event: {} ({})", payload, e),
            }
        }
    }

    tracing::debug!("Push channel for room {} ended", room_id);
}
