//! Event-log messages (`<msg>` blocks of a `get_messages` reply).
//!
//! ```text
//! <msgs>
//!   <msg>
//!     <project>p1</project>
//!     <pri>1</pri>
//!     <seqno>5</seqno>
//!     <body><![CDATA[hello]]></body>
//!     <time>1612345678.25</time>
//!   </msg>
//! </msgs>
//! ```
//!
//! A message is kept only if its sequence number was set; every other
//! field falls back to its default when missing or unparseable.

use phf::phf_map;

use crate::convert::{parse_int, parse_seconds, store};
use crate::scanner::ScanError;
use crate::tags;
use crate::tracker::{parse_records, try_parse_records, RecordShape};

/// One event-log message reported by the daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Position in the daemon's event log; [`Message::UNSET`] if never set.
    pub sequence_number: i32,
    /// Severity class; [`Message::UNSET`] if absent or unparseable.
    pub priority: i32,
    /// Project the message belongs to; empty for client messages.
    pub project_identifier: String,
    /// Seconds since the epoch, truncated.
    pub timestamp: i64,
    pub body: String,
}

impl Message {
    /// Sentinel for integer fields that were never successfully set.
    pub const UNSET: i32 = -1;

    /// Whether the message passes the validity gate.
    #[inline]
    pub fn has_sequence_number(&self) -> bool {
        self.sequence_number != Self::UNSET
    }
}

impl Default for Message {
    fn default() -> Self {
        Self {
            sequence_number: Self::UNSET,
            priority: Self::UNSET,
            project_identifier: String::new(),
            timestamp: 0,
            body: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Body,
    Priority,
    Project,
    Time,
    Seqno,
}

static FIELDS: phf::Map<&'static str, Field> = phf_map! {
    "body" => Field::Body,
    "pri" => Field::Priority,
    "priority" => Field::Priority,
    "project" => Field::Project,
    "time" => Field::Time,
    "timestamp" => Field::Time,
    "seqno" => Field::Seqno,
};

/// Record shape for `<msg>` blocks.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageShape;

impl RecordShape for MessageShape {
    type Record = Message;
    type Builder = Message;

    fn boundary(&self) -> &'static str {
        tags::MESSAGE
    }

    fn assign_field(&self, msg: &mut Message, name: &str, text: &str) {
        let Some(field) = tags::lookup(&FIELDS, name) else {
            return;
        };
        match field {
            Field::Body => msg.body = text.to_owned(),
            Field::Project => msg.project_identifier = text.to_owned(),
            Field::Priority => store(&mut msg.priority, parse_int(text), name, text),
            Field::Seqno => store(&mut msg.sequence_number, parse_int(text), name, text),
            Field::Time => store(&mut msg.timestamp, parse_seconds(text), name, text),
        }
    }

    fn finish(&self, msg: Message) -> Option<Message> {
        msg.has_sequence_number().then_some(msg)
    }
}

/// Parse a `get_messages` reply; broken markup yields no messages.
pub fn parse_messages(input: &str) -> Vec<Message> {
    parse_records(MessageShape, input)
}

/// Parse a `get_messages` reply, reporting broken markup.
pub fn try_parse_messages(input: &str) -> Result<Vec<Message>, ScanError> {
    try_parse_records(MessageShape, input)
}
