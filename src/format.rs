use crate::diag::Diagnostics;
use crate::reader::{split_fields, strip_comment};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Raw data format revision assumed when none can be determined.
pub const DEFAULT_REVISION: Revision = Revision::V30;

/// Raw data format revisions that can be converted.
pub const SUPPORTED_REVISIONS: [Revision; 4] =
    [Revision::V29, Revision::V30, Revision::V31, Revision::V32];

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
pub enum Revision {
    V29 = 29,
    V30 = 30,
    V31 = 31,
    V32 = 32,
}

impl Revision {
    pub fn number(self) -> u32 {
        self as u32
    }

    /// Revisions 31 and later carry fixed shunt data and move the switched
    /// shunt section after the FACTS device data.
    pub fn is_v31_or_later(self) -> bool {
        matches!(self, Revision::V31 | Revision::V32)
    }

    /// Returns the revision for `number`, or the default revision with a
    /// warning if it is not supported.
    pub fn or_default(number: i64, diag: &mut Diagnostics) -> Revision {
        match Revision::try_from(number) {
            Ok(rev) => rev,
            Err(_) => {
                diag.warn("format", None, unsupported_message(number));
                DEFAULT_REVISION
            }
        }
    }
}

fn unsupported_message(number: i64) -> String {
    let supported: Vec<String> = SUPPORTED_REVISIONS
        .iter()
        .map(|r| r.number().to_string())
        .collect();
    format!(
        "Version {} data not currently supported. Supported versions are: [{}] \
         Attempting to parse file as version {} data.",
        number,
        supported.join(", "),
        DEFAULT_REVISION
    )
}

impl TryFrom<i64> for Revision {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            29 => Ok(Revision::V29),
            30 => Ok(Revision::V30),
            31 => Ok(Revision::V31),
            32 => Ok(Revision::V32),
            n => Err(n),
        }
    }
}

impl From<Revision> for i64 {
    fn from(rev: Revision) -> Self {
        rev.number() as i64
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// How data items are separated on each line.
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize)]
pub enum Delimiter {
    Comma,
    /// One or more blanks.
    Space,
}

impl Delimiter {
    pub fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Space => ' ',
        }
    }
}

impl FromStr for Delimiter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "comma" => Ok(Delimiter::Comma),
            "space" => Ok(Delimiter::Space),
            other => Err(format!("Invalid delimiter [{}].", other)),
        }
    }
}

/// Uses the first line to determine if data items are separated by a comma
/// or one or more blank spaces.
pub fn detect_delimiter(header: &str) -> Delimiter {
    // v29-30: IC, SBASE, REV / COMMENT
    // v31-32: IC, SBASE, REV, XFRRAT, NXFRAT, BASFRQ / COMMENT
    let data = header.split('/').next().unwrap_or("");

    if data.contains(',') {
        log::info!("Found comma delimited data items.");
        Delimiter::Comma
    } else {
        log::info!("Found data items separated by whitespace.");
        Delimiter::Space
    }
}

/// Uses the first line to determine the data format revision or returns the
/// default revision.
pub fn detect_revision(header: &str, delimiter: Delimiter, diag: &mut Diagnostics) -> Revision {
    let h0 = split_fields(header, delimiter);

    if h0.len() < 3 {
        log::info!(
            "No version info found, assuming version {}.",
            DEFAULT_REVISION
        );
        return DEFAULT_REVISION;
    }

    let rev = strip_comment(&h0[2]);
    match rev.parse::<i64>() {
        Ok(number) => {
            log::info!("Version {} data found.", number);
            Revision::or_default(number, diag)
        }
        Err(_) => {
            diag.warn(
                "format",
                Some(1),
                format!(
                    "Version [{}] is not a number. Attempting to parse file as version {} data.",
                    rev, DEFAULT_REVISION
                ),
            );
            DEFAULT_REVISION
        }
    }
}
