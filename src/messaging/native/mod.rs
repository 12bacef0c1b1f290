//! Browser native-messaging host.
//!
//! The extension's background shim forwards runtime messages and tab events
//! as frames on stdin. Each inbound frame is handled to completion; the
//! browser effects it produced are written first, then the response.

mod framing;
mod host;

pub use framing::{FrameError, MAX_INBOUND_FRAME, MAX_OUTBOUND_FRAME, read_frame, write_frame};
pub use host::{Effect, EffectQueue};

use super::dispatcher::Dispatcher;
use super::protocol::{BrowserEvent, Response, Sender};
use crate::store::KeySpace;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::{Read, Write};

/// An inbound frame.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Inbound {
    /// A runtime message; `id` is echoed on the response.
    Message {
        #[serde(default)]
        id: Value,
        #[serde(default)]
        sender: Sender,
        body: Value,
    },
    Event(BrowserEvent),
}

/// An outbound frame.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Outbound {
    Response { id: Value, body: Response },
    Effect(Effect),
}

/// Counters reported when the host stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ServeStats {
    pub messages: u64,
    pub events: u64,
    pub rejected: u64,
}

/// Runs the host until `reader` reaches end of input.
///
/// Undecodable frames get a failure response and the loop continues. A
/// truncated frame or a failed write ends the loop with an error.
pub fn serve<K, R, W>(
    dispatcher: &mut Dispatcher<K, EffectQueue>,
    reader: &mut R,
    writer: &mut W,
) -> Result<ServeStats, FrameError>
where
    K: KeySpace,
    R: Read,
    W: Write,
{
    let mut stats = ServeStats::default();
    tracing::info!("native messaging host started");

    loop {
        let frame = match read_frame(reader) {
            Ok(Some(frame)) => frame,
            Ok(None) => break,
            Err(err @ FrameError::TooLarge { .. }) => {
                tracing::warn!(error = %err, "skipped oversized frame");
                stats.rejected += 1;
                send_response(writer, Value::Null, Response::failure(err.to_string()))?;
                continue;
            }
            Err(err) => return Err(err),
        };

        let reply = match serde_json::from_slice::<Inbound>(&frame) {
            Ok(Inbound::Message { id, sender, body }) => {
                stats.messages += 1;
                Some((id, dispatcher.handle_value(body, sender)))
            }
            Ok(Inbound::Event(event)) => {
                stats.events += 1;
                dispatcher.handle_event(event);
                None
            }
            Err(err) => {
                tracing::warn!(error = %err, "undecodable frame");
                stats.rejected += 1;
                Some((Value::Null, Response::failure(format!("invalid frame: {err}"))))
            }
        };

        for effect in dispatcher.sync_mut().host_mut().drain() {
            send_effect(writer, effect)?;
        }
        if let Some((id, response)) = reply {
            send_response(writer, id, response)?;
        }
    }

    tracing::info!(
        messages = stats.messages,
        events = stats.events,
        rejected = stats.rejected,
        "native messaging host stopped"
    );
    Ok(stats)
}

fn send_response<W: Write>(
    writer: &mut W,
    id: Value,
    response: Response,
) -> Result<(), FrameError> {
    let payload = encode(&Outbound::Response {
        id: id.clone(),
        body: response,
    });
    if payload.len() <= MAX_OUTBOUND_FRAME {
        return write_frame(writer, &payload);
    }

    tracing::warn!(size = payload.len(), "response too large for the browser");
    let replacement = encode(&Outbound::Response {
        id,
        body: Response::failure(format!(
            "response of {} bytes exceeds the {MAX_OUTBOUND_FRAME} byte limit",
            payload.len()
        )),
    });
    write_frame(writer, &replacement)
}

fn send_effect<W: Write>(writer: &mut W, effect: Effect) -> Result<(), FrameError> {
    let payload = encode(&Outbound::Effect(effect));
    match write_frame(writer, &payload) {
        Err(err @ FrameError::TooLarge { .. }) => {
            tracing::warn!(error = %err, "dropped oversized effect");
            Ok(())
        }
        other => other,
    }
}

fn encode(frame: &Outbound) -> Vec<u8> {
    serde_json::to_vec(frame).unwrap_or_else(|err| {
        tracing::error!(error = %err, "failed to encode frame");
        br#"{"type":"response","id":null,"body":{"success":false,"error":"encoding failed"}}"#
            .to_vec()
    })
}
