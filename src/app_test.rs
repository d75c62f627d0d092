use super::*;

use crate::net::types::Envelope;

#[test]
fn default_sender_reports_send_failure() {
    let sender = SocketSender::default();
    let envelope = Envelope::request("canvas:subscribe", serde_json::json!({}));
    assert!(!sender.send(&envelope));
}

#[test]
fn default_sender_clones_cheaply() {
    let sender = SocketSender::default();
    let clone = sender.clone();
    let envelope = Envelope::request("canvas:subscribe", serde_json::json!({}));
    assert!(!clone.send(&envelope));
}
