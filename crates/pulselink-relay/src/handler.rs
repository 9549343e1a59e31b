//! Handler hooks driven by the routers.
//!
//! The transport decodes nothing itself: it hands raw JSON to a router and
//! implements one of these traits. Server-side hooks see the relay's view of
//! client traffic; client-side hooks see what the relay sends back.

use async_trait::async_trait;

use pulselink_core::protocol::envelope::Payload;
use pulselink_core::protocol::msg::{Clear, Feedback, Pulse, StrengthChange, StrengthInfo};
use pulselink_core::Result;

/// Hooks for the relay (server) side of a session.
#[async_trait]
pub trait ServerHandler: Send + Sync {
    /// A client asked to be bound (`bind` with the `targetId` placeholder).
    async fn on_bind_request(&self, payload: &Payload) -> Result<()>;

    /// A bind completed with status 200.
    async fn on_bind_success(&self, payload: &Payload) -> Result<()>;

    /// A bind reply carried a non-success status.
    async fn on_bind_failure(&self, payload: &Payload) -> Result<()>;

    async fn on_heartbeat(&self, payload: &Payload) -> Result<()>;

    async fn on_error(&self, payload: &Payload) -> Result<()>;

    async fn on_break(&self, payload: &Payload) -> Result<()>;

    async fn on_clear(&self, cmd: Clear, payload: &Payload) -> Result<()>;

    async fn on_feedback(&self, cmd: Feedback, payload: &Payload) -> Result<()>;

    async fn on_strength_change(&self, cmd: StrengthChange, payload: &Payload) -> Result<()>;

    async fn on_strength_info(&self, cmd: StrengthInfo, payload: &Payload) -> Result<()>;

    /// A pulse command, optionally preceded by a clear on the same channel.
    /// `delay_ms` is the gap the transport should leave between the two.
    async fn on_pulse(
        &self,
        clear: Option<Clear>,
        delay_ms: u64,
        cmd: Pulse,
        payload: &Payload,
    ) -> Result<()>;

    /// Valid traffic with no dedicated hook (e.g. generic client messages).
    async fn on_other(&self, payload: &Payload) -> Result<()>;
}

/// Hooks for the client (device app) side of a session.
#[async_trait]
pub trait ClientHandler: Send + Sync {
    /// The relay broke the session (`break` envelope).
    async fn on_disconnect(&self, payload: &Payload) -> Result<()>;

    async fn on_error(&self, payload: &Payload) -> Result<()>;

    async fn on_heartbeat(&self, payload: &Payload) -> Result<()>;

    async fn on_other(&self, payload: &Payload) -> Result<()>;
}
