//! Inbound routing: decode, validate, resolve, dispatch.
//!
//! A router owns a [`WireCodec`] and a handler. The transport feeds it raw
//! JSON; decode or validation failures come back as `ProtocolError`, which
//! [`status_for`] maps onto the wire status-code taxonomy for the error
//! reply. Core never does that mapping itself.

use std::sync::Arc;

use tracing::{debug, warn};

use pulselink_core::protocol::codec::WireCodec;
use pulselink_core::protocol::command::CommandKind;
use pulselink_core::protocol::envelope::{outer_type, Envelope, Payload};
use pulselink_core::protocol::msg::{
    Clear, Feedback, PowerCommand, Pulse, StrengthChange, StrengthInfo,
};
use pulselink_core::protocol::status::StatusCode;
use pulselink_core::{ProtocolError, Result};

use crate::handler::{ClientHandler, ServerHandler};

/// Default gap between an implicit clear and the pulse that follows it.
pub const DEFAULT_PULSE_DELAY_MS: u64 = 500;

/// Map a codec error onto the status code the transport replies with.
pub fn status_for(err: &ProtocolError) -> StatusCode {
    match err {
        ProtocolError::BadJson(_) => StatusCode::NonStandardJson,
        ProtocolError::UnknownOuterType(_) | ProtocolError::UnknownCommandKind(_) => {
            StatusCode::UnsupportedOperation
        }
        ProtocolError::ListTooLong { .. } => StatusCode::MessageTooLong,
        _ => StatusCode::InvalidRequest,
    }
}

/// Build the `error` envelope replying to a rejected inbound frame.
pub fn error_reply(err: &ProtocolError, client_id: &str) -> Payload {
    Payload::Plain(Envelope::new(
        outer_type::ERROR,
        client_id,
        "",
        status_for(err).as_code(),
    ))
}

/// Routes client traffic into a [`ServerHandler`].
pub struct ServerRouter {
    codec: WireCodec,
    handler: Arc<dyn ServerHandler>,
}

impl ServerRouter {
    pub fn new(codec: WireCodec, handler: Arc<dyn ServerHandler>) -> Self {
        Self { codec, handler }
    }

    pub fn codec(&self) -> &WireCodec {
        &self.codec
    }

    /// Decode, validate and dispatch one inbound frame. Returns the resolved
    /// command kind on success.
    pub async fn route_inbound(&self, raw: &str) -> Result<CommandKind> {
        let payload = match self.codec.decode_payload(raw) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "inbound frame rejected at decode");
                return Err(err);
            }
        };
        payload.is_valid()?;

        let kind = payload.command_kind(true);
        debug!(?kind, outer = %payload.envelope().msg_type, "dispatching inbound frame");
        match kind {
            CommandKind::Bind => {
                let envelope = payload.envelope();
                if envelope.message == "targetId" {
                    self.handler.on_bind_request(&payload).await?;
                } else if StatusCode::from_code(&envelope.message) == StatusCode::Success {
                    self.handler.on_bind_success(&payload).await?;
                } else {
                    self.handler.on_bind_failure(&payload).await?;
                }
            }
            CommandKind::Heartbeat => self.handler.on_heartbeat(&payload).await?,
            CommandKind::Error => self.handler.on_error(&payload).await?,
            CommandKind::Break => self.handler.on_break(&payload).await?,
            CommandKind::Clear => {
                let cmd = Clear::read(&payload)?;
                self.handler.on_clear(cmd, &payload).await?;
            }
            CommandKind::Feedback => {
                let cmd = Feedback::read(&payload)?;
                self.handler.on_feedback(cmd, &payload).await?;
            }
            CommandKind::Strength => {
                // arity picks the direction: 3 args change, 4 args info
                match StrengthChange::read(&payload) {
                    Ok(cmd) => self.handler.on_strength_change(cmd, &payload).await?,
                    Err(ProtocolError::ArgCountMismatch { .. }) => {
                        let cmd = StrengthInfo::read(&payload)?;
                        self.handler.on_strength_info(cmd, &payload).await?;
                    }
                    Err(err) => return Err(err),
                }
            }
            CommandKind::Pulse => {
                let cmd = Pulse::read(&payload)?;
                self.handler
                    .on_pulse(None, DEFAULT_PULSE_DELAY_MS, cmd, &payload)
                    .await?;
            }
            CommandKind::ClientMessage | CommandKind::Unknown => {
                self.handler.on_other(&payload).await?;
            }
        }
        Ok(kind)
    }
}

/// Routes relay traffic into a [`ClientHandler`].
pub struct ClientRouter {
    codec: WireCodec,
    handler: Arc<dyn ClientHandler>,
}

impl ClientRouter {
    pub fn new(codec: WireCodec, handler: Arc<dyn ClientHandler>) -> Self {
        Self { codec, handler }
    }

    pub fn codec(&self) -> &WireCodec {
        &self.codec
    }

    pub async fn route_inbound(&self, raw: &str) -> Result<CommandKind> {
        let payload = self.codec.decode_payload(raw)?;
        payload.is_valid()?;

        let kind = payload.command_kind(false);
        debug!(?kind, "dispatching relay frame");
        match kind {
            CommandKind::Break => self.handler.on_disconnect(&payload).await?,
            CommandKind::Error => self.handler.on_error(&payload).await?,
            CommandKind::Heartbeat => self.handler.on_heartbeat(&payload).await?,
            _ => self.handler.on_other(&payload).await?,
        }
        Ok(kind)
    }
}
