//! Event-log paging: fetch up to `number` messages older than a sequence
//! number.
//!
//! The daemon only answers "every message after seqno X", so a page is
//! requested by computing a lower bound and filtering the reply.

use tracing::debug;

use crate::messages::{parse_messages, Message};

/// Access to the daemon's event log.
///
/// No transport lives in this crate; callers wrap their RPC connection.
pub trait MessageSource {
    /// Number of messages the daemon currently holds.
    fn message_count(&mut self) -> i32;

    /// Raw reply to a message request for every seqno above `lower_bound`.
    fn messages_reply(&mut self, lower_bound: i32) -> String;
}

/// Oldest seqno to request for a page of `number` messages older than
/// `seq_no`. A `seq_no <= 0` asks for the newest page, which needs the
/// message count; it is consulted only then.
pub fn lower_bound<F>(seq_no: i32, number: i32, message_count: F) -> i32
where
    F: FnOnce() -> i32,
{
    let bound = if seq_no > 0 {
        seq_no.saturating_sub(number).saturating_sub(2)
    } else {
        // may return more than `number` if the daemon logs in between
        message_count().saturating_sub(number).saturating_sub(1)
    };
    bound.max(0)
}

/// Fetch up to roughly `number` messages older than `seq_no`, in reply
/// order. With `seq_no <= 0` the newest messages are returned.
pub fn event_log_messages<S>(source: &mut S, seq_no: i32, number: i32) -> Vec<Message>
where
    S: MessageSource + ?Sized,
{
    let bound = lower_bound(seq_no, number, || source.message_count());
    let reply = source.messages_reply(bound);
    let mut messages = parse_messages(&reply);

    if seq_no > 0 {
        messages.retain(|m| m.sequence_number < seq_no);
    }

    if let (Some(first), Some(last)) = (messages.first(), messages.last()) {
        debug!(
            count = messages.len(),
            lower_bound = bound,
            first = first.sequence_number,
            last = last.sequence_number,
            "event log page"
        );
    }
    messages
}
