//! File transfers (`<file_transfer>` blocks of a `get_file_transfers` reply).
//!
//! A transfer nests two optional containers whose leaves are flattened
//! into the record:
//!
//! ```text
//! <file_transfer>
//!   <project_url>..</project_url> <name>..</name> <nbytes>..</nbytes> <status>..</status>
//!   <persistent_file_xfer>
//!     <is_upload>..</is_upload> <time_so_far>..</time_so_far>
//!     <next_request_time>..</next_request_time> <last_bytes_xferred>..</last_bytes_xferred>
//!   </persistent_file_xfer>
//!   <file_xfer>                      (present only while bytes are moving)
//!     <bytes_xferred>..</bytes_xferred> <xfer_speed>..</xfer_speed>
//!   </file_xfer>
//!   <project_backoff>..</project_backoff>
//! </file_transfer>
//! ```

use phf::phf_map;

use crate::convert::{parse_flag, parse_int, parse_seconds, store};
use crate::scanner::ScanError;
use crate::tags;
use crate::tracker::{parse_records, try_parse_records, RecordShape};

/// One upload or download managed by the daemon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transfer {
    pub name: String,
    pub project_url: String,
    pub generated_locally: bool,
    pub is_upload: bool,
    /// File size in bytes.
    pub nbytes: i64,
    pub status: i32,
    /// Seconds spent transferring so far.
    pub time_so_far: i64,
    pub next_request_time: i64,
    pub project_backoff: i64,
    pub bytes_transferred: i64,
    /// Bytes per second.
    pub transfer_speed: i64,
    /// A `<file_xfer>` section was present.
    pub transfer_active: bool,
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    ProjectUrl,
    GeneratedLocally,
    IsUpload,
    Nbytes,
    Status,
    TimeSoFar,
    NextRequestTime,
    ProjectBackoff,
    BytesXferred,
    LastBytesXferred,
    XferSpeed,
}

static FIELDS: phf::Map<&'static str, Field> = phf_map! {
    "name" => Field::Name,
    "project_url" => Field::ProjectUrl,
    "generated_locally" => Field::GeneratedLocally,
    "is_upload" => Field::IsUpload,
    "nbytes" => Field::Nbytes,
    "status" => Field::Status,
    "time_so_far" => Field::TimeSoFar,
    "next_request_time" => Field::NextRequestTime,
    "project_backoff" => Field::ProjectBackoff,
    "bytes_xferred" => Field::BytesXferred,
    "last_bytes_xferred" => Field::LastBytesXferred,
    "xfer_speed" => Field::XferSpeed,
};

/// Record shape for `<file_transfer>` blocks; kept when both the file
/// name and the project URL are present.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransferShape;

impl RecordShape for TransferShape {
    type Record = Transfer;
    type Builder = Transfer;

    fn boundary(&self) -> &'static str {
        tags::FILE_TRANSFER
    }

    fn open_field(&self, transfer: &mut Transfer, name: &str) {
        if tags::is_tag(name, tags::FILE_XFER) {
            transfer.transfer_active = true;
        }
    }

    fn assign_field(&self, t: &mut Transfer, name: &str, text: &str) {
        let Some(field) = tags::lookup(&FIELDS, name) else {
            return;
        };
        match field {
            Field::Name => t.name = text.to_owned(),
            Field::ProjectUrl => t.project_url = text.to_owned(),
            Field::GeneratedLocally => store(&mut t.generated_locally, parse_flag(text), name, text),
            Field::IsUpload => store(&mut t.is_upload, parse_flag(text), name, text),
            Field::Nbytes => store(&mut t.nbytes, parse_seconds(text), name, text),
            Field::Status => store(&mut t.status, parse_int(text), name, text),
            Field::TimeSoFar => store(&mut t.time_so_far, parse_seconds(text), name, text),
            Field::NextRequestTime => store(&mut t.next_request_time, parse_seconds(text), name, text),
            Field::ProjectBackoff => store(&mut t.project_backoff, parse_seconds(text), name, text),
            Field::BytesXferred => store(&mut t.bytes_transferred, parse_seconds(text), name, text),
            Field::XferSpeed => store(&mut t.transfer_speed, parse_seconds(text), name, text),
            // the live counter in <file_xfer> wins over the persisted one
            Field::LastBytesXferred if t.bytes_transferred == 0 => {
                store(&mut t.bytes_transferred, parse_seconds(text), name, text)
            }
            Field::LastBytesXferred => {}
        }
    }

    fn finish(&self, t: Transfer) -> Option<Transfer> {
        (!t.name.is_empty() && !t.project_url.is_empty()).then_some(t)
    }
}

/// Parse a `get_file_transfers` reply; broken markup yields none.
pub fn parse_transfers(input: &str) -> Vec<Transfer> {
    parse_records(TransferShape, input)
}

/// Parse a `get_file_transfers` reply, reporting broken markup.
pub fn try_parse_transfers(input: &str) -> Result<Vec<Transfer>, ScanError> {
    try_parse_records(TransferShape, input)
}
