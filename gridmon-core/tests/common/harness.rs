//! Test harness for running fixture cases with stochastic variations

use std::collections::BTreeMap;

use crate::common::{Gen, TestCase};
use gridmon_core::{
    parse_acct_mgr_info, parse_app_versions, parse_messages, parse_transfers, tags, AcctMgrInfo,
    AppVersion, Message, Transfer,
};

/// One record flattened to `field -> display value`
pub type Fields = BTreeMap<String, String>;

/// Record family a fixture file exercises
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Messages,
    AppVersions,
    Transfers,
    AcctMgrInfo,
}

impl Family {
    /// Family for a fixture file name
    pub fn from_fixture(name: &str) -> Self {
        match name {
            "messages" => Family::Messages,
            "app_versions" => Family::AppVersions,
            "transfers" => Family::Transfers,
            "acct_mgr_info" => Family::AcctMgrInfo,
            other => panic!("no record family for fixture {:?}", other),
        }
    }

    pub fn boundary(self) -> &'static str {
        match self {
            Family::Messages => tags::MESSAGE,
            Family::AppVersions => tags::APP_VERSION,
            Family::Transfers => tags::FILE_TRANSFER,
            Family::AcctMgrInfo => tags::ACCT_MGR_INFO,
        }
    }

    /// Parse with the family's infallible entry point
    pub fn parse(self, input: &str) -> Vec<Fields> {
        match self {
            Family::Messages => parse_messages(input).iter().map(message_fields).collect(),
            Family::AppVersions => parse_app_versions(input).iter().map(app_version_fields).collect(),
            Family::Transfers => parse_transfers(input).iter().map(transfer_fields).collect(),
            Family::AcctMgrInfo => parse_acct_mgr_info(input).iter().map(acct_mgr_fields).collect(),
        }
    }

    /// Field values of an empty record
    pub fn defaults(self) -> Fields {
        match self {
            Family::Messages => message_fields(&Message::default()),
            Family::AppVersions => app_version_fields(&AppVersion::default()),
            Family::Transfers => transfer_fields(&Transfer::default()),
            Family::AcctMgrInfo => acct_mgr_fields(&AcctMgrInfo::default()),
        }
    }
}

fn fields<const N: usize>(pairs: [(&str, String); N]) -> Fields {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

fn message_fields(m: &Message) -> Fields {
    fields([
        ("seqno", m.sequence_number.to_string()),
        ("priority", m.priority.to_string()),
        ("project", m.project_identifier.clone()),
        ("timestamp", m.timestamp.to_string()),
        ("body", m.body.clone()),
    ])
}

fn app_version_fields(v: &AppVersion) -> Fields {
    fields([
        ("app_name", v.app_name.clone()),
        ("version_num", v.version_num.to_string()),
    ])
}

fn transfer_fields(t: &Transfer) -> Fields {
    fields([
        ("name", t.name.clone()),
        ("project_url", t.project_url.clone()),
        ("generated_locally", t.generated_locally.to_string()),
        ("is_upload", t.is_upload.to_string()),
        ("nbytes", t.nbytes.to_string()),
        ("status", t.status.to_string()),
        ("time_so_far", t.time_so_far.to_string()),
        ("next_request_time", t.next_request_time.to_string()),
        ("project_backoff", t.project_backoff.to_string()),
        ("bytes_transferred", t.bytes_transferred.to_string()),
        ("transfer_speed", t.transfer_speed.to_string()),
        ("transfer_active", t.transfer_active.to_string()),
    ])
}

fn acct_mgr_fields(i: &AcctMgrInfo) -> Fields {
    fields([
        ("acct_mgr_name", i.acct_mgr_name.clone()),
        ("acct_mgr_url", i.acct_mgr_url.clone()),
        ("have_credentials", i.have_credentials.to_string()),
        ("cookie_required", i.cookie_required.to_string()),
        ("cookie_failure_url", i.cookie_failure_url.clone()),
    ])
}

/// Result of running a test
#[derive(Debug)]
pub struct TestResult {
    pub passed: bool,
    pub input: String,
    pub expected: Vec<Fields>,
    pub actual: Vec<Fields>,
    pub seed: u64,
    pub errors: Vec<String>,
}

/// Expected records: defaults overlaid with the fixture's fields
fn expected_records(case: &TestCase, family: Family, errors: &mut Vec<String>) -> Vec<Fields> {
    let defaults = family.defaults();
    case.records
        .iter()
        .enumerate()
        .map(|(i, given)| {
            let mut record = defaults.clone();
            for (key, value) in given {
                if !defaults.contains_key(key) {
                    errors.push(format!("Record {}: unknown field '{}' in fixture", i, key));
                }
                record.insert(key.clone(), value.to_string());
            }
            record
        })
        .collect()
}

fn check(case: &TestCase, family: Family, input: String, seed: u64) -> TestResult {
    let mut errors = Vec::new();
    let expected = expected_records(case, family, &mut errors);
    let actual = family.parse(&input);

    if actual.len() != expected.len() {
        errors.push(format!(
            "Record count mismatch: expected {}, got {}",
            expected.len(),
            actual.len()
        ));
    }

    for (i, (act, exp)) in actual.iter().zip(expected.iter()).enumerate() {
        for (key, want) in exp {
            let got = act.get(key).map(String::as_str).unwrap_or("<missing>");
            if got != want {
                errors.push(format!("Record {} field '{}': expected {:?}, got {:?}", i, key, want, got));
            }
        }
    }

    TestResult {
        passed: errors.is_empty(),
        input,
        expected,
        actual,
        seed,
        errors,
    }
}

/// Run a single test case (canonical, no variations)
pub fn run_test(case: &TestCase, family: Family) -> TestResult {
    check(case, family, case.xml.clone(), 0)
}

/// Run test with stochastic variations
///
/// Every variation leaves the parsed records unchanged:
/// - whitespace after closing tags
/// - unknown elements right after a boundary open tag
/// - 30% chance of unknown elements before the payload
/// - 50% chance of an `<?xml?>` declaration
/// - 50% chance of a `<boinc_gui_rpc_reply>` wrapper
/// - 50% chance of a `0x03` terminator followed by garbage
pub fn run_with_variations(case: &TestCase, family: Family, gen: &mut Gen) -> TestResult {
    let (head, tail) = match case.xml.find('\u{3}') {
        Some(at) => case.xml.split_at(at),
        None => (case.xml.as_str(), ""),
    };

    let mut body = String::new();
    if !head.starts_with("<?") && gen.chance(0.3) {
        body.push_str(&gen.unknown_element());
    }
    body.push_str(&sprinkle(head, family.boundary(), gen));

    if !head.starts_with("<?") && gen.chance(0.5) {
        body = format!("<boinc_gui_rpc_reply>{}</boinc_gui_rpc_reply>", body);
    }
    if !head.contains("<?xml") && gen.chance(0.5) {
        body = format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{}", body);
    }

    body.push_str(tail);
    if tail.is_empty() && gen.chance(0.5) {
        body.push('\u{3}');
        body.push_str(&gen.trailing_garbage());
    }

    check(case, family, body, gen.seed)
}

/// Copy `xml`, adding whitespace after closing tags and unknown
/// elements after boundary open tags. Comments, CDATA sections and
/// processing instructions are copied untouched.
fn sprinkle(xml: &str, boundary: &str, gen: &mut Gen) -> String {
    let mut out = String::with_capacity(xml.len() * 2);
    let mut rest = xml;

    while let Some(lt) = rest.find('<') {
        out.push_str(&rest[..lt]);
        rest = &rest[lt..];

        let opaque = [("<!--", "-->"), ("<![CDATA[", "]]>"), ("<?", "?>")]
            .into_iter()
            .find(|(open, _)| rest.starts_with(open));
        if let Some((_, close)) = opaque {
            let end = rest.find(close).map_or(rest.len(), |i| i + close.len());
            out.push_str(&rest[..end]);
            rest = &rest[end..];
            continue;
        }

        let Some(gt) = rest.find('>') else {
            break;
        };
        let tag = &rest[..=gt];
        out.push_str(tag);
        rest = &rest[gt + 1..];

        if tag.starts_with("</") {
            out.push_str(&gen.whitespace());
        } else if tag[1..tag.len() - 1].eq_ignore_ascii_case(boundary) && gen.chance(0.5) {
            out.push_str(&gen.unknown_element());
        }
    }

    out.push_str(rest);
    out
}

impl TestResult {
    /// Print detailed failure info
    pub fn print_failure(&self, case_id: &str) {
        eprintln!("\n=== FAILED: {} ===", case_id);
        eprintln!("Seed: {} (set GRIDMON_TEST_SEED={} to reproduce)", self.seed, self.seed);
        eprintln!("\nInput:");
        eprintln!("{:?}", self.input);
        eprintln!("\nExpected records:");
        for (i, r) in self.expected.iter().enumerate() {
            eprintln!("  {}: {:?}", i, r);
        }
        eprintln!("\nActual records:");
        for (i, r) in self.actual.iter().enumerate() {
            eprintln!("  {}: {:?}", i, r);
        }
        eprintln!("\nErrors:");
        for e in &self.errors {
            eprintln!("  - {}", e);
        }
    }
}
