//! Tag-name vocabulary shared by the record parsers.
//!
//! The daemon's tag names are matched case-insensitively. Each record
//! family keeps its field names in a `phf` map with lowercase keys and
//! resolves closing tags through [`lookup`].

/// Boundary of one event-log message.
pub const MESSAGE: &str = "msg";

/// Boundary of one application version.
pub const APP_VERSION: &str = "app_version";

/// Boundary of one file transfer.
pub const FILE_TRANSFER: &str = "file_transfer";

/// Boundary of the account manager description.
pub const ACCT_MGR_INFO: &str = "acct_mgr_info";

/// Active-transfer container inside a file transfer.
pub const FILE_XFER: &str = "file_xfer";

/// Case-insensitive tag comparison.
#[inline]
pub fn is_tag(name: &str, tag: &str) -> bool {
    name.eq_ignore_ascii_case(tag)
}

/// Resolve a tag name against a lowercase-keyed field map.
///
/// The exact spelling is tried first; only names containing uppercase
/// letters pay for a lowercased copy.
pub fn lookup<T: Copy>(fields: &phf::Map<&'static str, T>, name: &str) -> Option<T> {
    if let Some(field) = fields.get(name) {
        return Some(*field);
    }
    if name.bytes().any(|b| b.is_ascii_uppercase()) {
        return fields.get(name.to_ascii_lowercase().as_str()).copied();
    }
    None
}
