//! Account manager description (`acct_mgr_info` reply).
//!
//! The reply carries at most one meaningful block. Flags are written as
//! bare elements (`<have_credentials/>`), so their presence alone sets them.

use phf::phf_map;
use tracing::warn;

use crate::convert::presence_flag;
use crate::scanner::ScanError;
use crate::tags;
use crate::tracker::{try_parse_records, RecordShape};

/// Account manager the daemon is attached to, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AcctMgrInfo {
    pub acct_mgr_name: String,
    pub acct_mgr_url: String,
    pub have_credentials: bool,
    pub cookie_required: bool,
    pub cookie_failure_url: String,
}

impl AcctMgrInfo {
    /// Whether the daemon reports an attached account manager.
    pub fn is_attached(&self) -> bool {
        !self.acct_mgr_url.is_empty()
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    Name,
    Url,
    HaveCredentials,
    CookieRequired,
    CookieFailureUrl,
}

static FIELDS: phf::Map<&'static str, Field> = phf_map! {
    "acct_mgr_name" => Field::Name,
    "acct_mgr_url" => Field::Url,
    "have_credentials" => Field::HaveCredentials,
    "cookie_required" => Field::CookieRequired,
    "cookie_failure_url" => Field::CookieFailureUrl,
};

/// Record shape for `<acct_mgr_info>`; every block is kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcctMgrInfoShape;

impl RecordShape for AcctMgrInfoShape {
    type Record = AcctMgrInfo;
    type Builder = AcctMgrInfo;

    fn boundary(&self) -> &'static str {
        tags::ACCT_MGR_INFO
    }

    fn assign_field(&self, info: &mut AcctMgrInfo, name: &str, text: &str) {
        match tags::lookup(&FIELDS, name) {
            Some(Field::Name) => info.acct_mgr_name = text.to_owned(),
            Some(Field::Url) => info.acct_mgr_url = text.to_owned(),
            Some(Field::HaveCredentials) => info.have_credentials = presence_flag(text),
            Some(Field::CookieRequired) => info.cookie_required = presence_flag(text),
            Some(Field::CookieFailureUrl) => info.cookie_failure_url = text.to_owned(),
            None => {}
        }
    }

    fn finish(&self, info: AcctMgrInfo) -> Option<AcctMgrInfo> {
        Some(info)
    }
}

/// Parse an `acct_mgr_info` reply, reporting broken markup.
///
/// `Ok(None)` means the reply was well-formed but held no block.
pub fn try_parse_acct_mgr_info(input: &str) -> Result<Option<AcctMgrInfo>, ScanError> {
    Ok(try_parse_records(AcctMgrInfoShape, input)?.pop())
}

/// Parse an `acct_mgr_info` reply. The last block wins; broken markup
/// or a reply without a block yields `None`.
pub fn parse_acct_mgr_info(input: &str) -> Option<AcctMgrInfo> {
    match try_parse_acct_mgr_info(input) {
        Ok(info) => info,
        Err(err) => {
            warn!(boundary = tags::ACCT_MGR_INFO, error = %err, "discarding unparseable rpc reply");
            None
        }
    }
}
