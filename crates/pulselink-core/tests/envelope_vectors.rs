//! Wire envelope vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use pulselink_core::protocol::codec::WireCodec;
use pulselink_core::protocol::command::CommandKind;
use pulselink_core::protocol::envelope::Payload;
use pulselink_core::protocol::msg::{PowerCommand, Pulse, StrengthChange};

fn load(name: &str) -> String {
    fs::read_to_string(format!("tests/vectors/{name}")).unwrap()
}

#[test]
fn decode_plain_msg_envelope() {
    let codec = WireCodec::new();
    let payload = codec.decode_payload(&load("envelope_plain.json")).unwrap();
    assert!(matches!(payload, Payload::Plain(_)));
    assert!(payload.is_valid().is_ok());
    assert_eq!(payload.command_kind(false), CommandKind::Strength);

    let cmd = StrengthChange::read(&payload).unwrap();
    assert_eq!(cmd.value, 50);
    assert_eq!(cmd.command_string(), "strength-1+0+50");
}

#[test]
fn decode_client_msg_with_timer() {
    let codec = WireCodec::new();
    let payload = codec
        .decode_payload(&load("envelope_client_msg.json"))
        .unwrap();
    assert_eq!(payload.timer(), Some(500));
    assert!(payload.is_valid().is_ok());
    // pulse resolution is opt-in
    assert_eq!(payload.command_kind(false), CommandKind::ClientMessage);
    assert_eq!(payload.command_kind(true), CommandKind::Pulse);

    let pulse = Pulse::read(&payload).unwrap();
    assert_eq!(pulse.timer, Some(500));
    assert_eq!(pulse.waves.len(), 1);
    assert_eq!(pulse.waves.waves()[0].to_hex(), "0A1E14805A4A6432");
}

#[test]
fn decode_legacy_dual_timer_but_never_encode_it() {
    let codec = WireCodec::new();
    let payload = codec
        .decode_payload(&load("envelope_legacy_dual.json"))
        .unwrap();
    assert!(payload.is_valid().is_ok());
    // single-timer accessor does not alias the legacy attachment
    assert_eq!(payload.timer(), None);
    // a pulse read out of a legacy payload re-encodes in the current form
    let pulse = Pulse::read(&payload).unwrap();
    let reencoded = pulse.to_payload("c-9f2e", "a-77b1");
    let json = codec.encode_payload(&reencoded).unwrap();
    assert!(json.contains("\"timer\""));
    assert!(!json.contains("timer_A"));
}

#[test]
fn decode_bind_request_placeholder() {
    let codec = WireCodec::new();
    let payload = codec
        .decode_payload(&load("envelope_bind_request.json"))
        .unwrap();
    assert!(payload.is_valid().is_ok());
    assert_eq!(payload.command_kind(false), CommandKind::Bind);
}

#[test]
fn full_message_round_trip() {
    let codec = WireCodec::new();
    let msg = codec.decode_message(&load("message_full.json")).unwrap();
    assert_eq!(msg.command_kind(false), CommandKind::Heartbeat);
    assert_eq!(msg.direction.sender.name, "c-9f2e");
    let json = msg.to_relay_json(&codec).unwrap();
    let back = codec.decode_message(&json).unwrap();
    assert_eq!(back, msg);
}
