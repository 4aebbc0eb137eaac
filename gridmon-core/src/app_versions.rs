//! Application versions (`<app_version>` blocks of a state reply).

use phf::phf_map;

use crate::convert::{parse_int, store};
use crate::scanner::ScanError;
use crate::tags;
use crate::tracker::{parse_records, try_parse_records, RecordShape};

/// An application version known to the daemon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppVersion {
    pub app_name: String,
    pub version_num: i32,
}

impl AppVersion {
    pub fn new(app_name: impl Into<String>, version_num: i32) -> Self {
        Self {
            app_name: app_name.into(),
            version_num,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Field {
    AppName,
    VersionNum,
}

static FIELDS: phf::Map<&'static str, Field> = phf_map! {
    "app_name" => Field::AppName,
    "version_num" => Field::VersionNum,
};

/// Record shape for `<app_version>` blocks; kept when named.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppVersionShape;

impl RecordShape for AppVersionShape {
    type Record = AppVersion;
    type Builder = AppVersion;

    fn boundary(&self) -> &'static str {
        tags::APP_VERSION
    }

    fn assign_field(&self, version: &mut AppVersion, name: &str, text: &str) {
        match tags::lookup(&FIELDS, name) {
            Some(Field::AppName) => version.app_name = text.to_owned(),
            Some(Field::VersionNum) => store(&mut version.version_num, parse_int(text), name, text),
            None => {}
        }
    }

    fn finish(&self, version: AppVersion) -> Option<AppVersion> {
        (!version.app_name.is_empty()).then_some(version)
    }
}

/// Parse every `<app_version>` block; broken markup yields none.
pub fn parse_app_versions(input: &str) -> Vec<AppVersion> {
    parse_records(AppVersionShape, input)
}

/// Parse every `<app_version>` block, reporting broken markup.
pub fn try_parse_app_versions(input: &str) -> Result<Vec<AppVersion>, ScanError> {
    try_parse_records(AppVersionShape, input)
}
