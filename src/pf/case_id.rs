use crate::error::{Error, Result};
use crate::reader::{split_fields, strip_comment, Row, SectionReader};
use std::io::{BufRead, Seek};

pub const CASE_IDENTIFICATION: &str = "case identification";

/// Case identification data.
#[derive(Debug, Clone, PartialEq)]
pub struct CaseIdentification {
    /// System base MVA.
    pub base_mva: f64,
    pub name: String,
    pub description: String,
}

/// Reads the first three lines of the file and returns the system base MVA
/// and the two title lines.
pub fn case_identification<R: BufRead + Seek>(
    reader: &mut SectionReader<R>,
) -> Result<CaseIdentification> {
    let mut lines = Vec::with_capacity(3);
    for _ in 0..3 {
        let line = reader.next_line()?.ok_or(Error::UnexpectedEof {
            section: CASE_IDENTIFICATION,
        })?;
        lines.push(line);
    }

    // v29-30: IC, SBASE, REV / COMMENT
    // v31-32: IC, SBASE, REV, XFRRAT, NXFRAT, BASFRQ / COMMENT
    let h0 = Row {
        line: 1,
        fields: split_fields(&lines[0], reader.delimiter()),
    };

    let ic = h0.text(0).map(strip_comment).unwrap_or("");
    if ic != "0" && ic != "1" {
        return Err(Error::CaseIdentification {
            line: h0.line,
            found: ic.to_string(),
        });
    }

    let base_mva = h0.f64_at(CASE_IDENTIFICATION, 1)?;
    log::info!("System base {} MVA.", base_mva);

    Ok(CaseIdentification {
        base_mva,
        name: lines[1].trim().to_string(),
        description: lines[2].trim().to_string(),
    })
}
