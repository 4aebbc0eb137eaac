//! Gridmon Core Parsers
//!
//! Tolerant, streaming parsers for the textual RPC replies of a background
//! computation daemon. Replies are scanned once, event by event; records are
//! built as their closing tags arrive, without building a document tree.
//!
//! # Architecture
//!
//! - **event.rs** - Markup events and the `ElementHandler` hooks
//! - **scanner.rs** - quick-xml adapter driving a handler, `ScanError`
//! - **tracker.rs** - Element tracker state machine, `RecordShape` strategy
//! - **convert.rs** - Swallow-and-log numeric and flag conversions
//! - **tags.rs** - Boundary tags and case-insensitive field lookup
//! - **messages.rs** - Event-log messages (`<msg>`)
//! - **app_versions.rs** / **transfers.rs** / **acct_mgr.rs** - Other record families
//! - **event_log.rs** - Paging through the daemon's event log
//! - **diagnostics.rs** - `tracing` subscriber setup from the legacy log level
//!
//! # Example
//!
//! ```
//! use gridmon_core::parse_messages;
//!
//! let reply = "<msgs><msg><seqno>5</seqno><body>hello</body></msg></msgs>\u{3}";
//! let messages = parse_messages(reply);
//! assert_eq!(messages[0].sequence_number, 5);
//! assert_eq!(messages[0].body, "hello");
//! ```

pub mod acct_mgr;
pub mod app_versions;
pub mod convert;
pub mod diagnostics;
pub mod event;
pub mod event_log;
pub mod messages;
pub mod scanner;
pub mod tags;
pub mod tracker;
pub mod transfers;

pub use acct_mgr::{parse_acct_mgr_info, try_parse_acct_mgr_info, AcctMgrInfo};
pub use app_versions::{parse_app_versions, try_parse_app_versions, AppVersion};
pub use diagnostics::{init_logging, Verbosity};
pub use event::{Attribute, ElementHandler, Event};
pub use event_log::{event_log_messages, MessageSource};
pub use messages::{parse_messages, try_parse_messages, Message};
pub use scanner::{scan, ScanError};
pub use tracker::{parse_records, try_parse_records, ElementTracker, RecordShape};
pub use transfers::{parse_transfers, try_parse_transfers, Transfer};
