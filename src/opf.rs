use crate::diag::Diagnostics;
use crate::error::{Error, Result};
use crate::format::{detect_delimiter, Delimiter, Revision};
use crate::mpc::CaseData;
use crate::reader::SectionReader;
use crate::section::OPF_SECTIONS;
use std::io::{BufRead, Seek};

const DATA_MODIFICATION_CODE: &str = "data modification code";

/// Reads optimal power flow raw data.
///
/// None of the sections are converted yet: each is consumed to its
/// terminating record and the returned case data is empty. Converted cost
/// tables would be returned here under `gencost`.
pub fn opf2mpc<R: BufRead + Seek>(
    input: R,
    _revision: Option<Revision>,
    delimiter: Option<Delimiter>,
    diag: &mut Diagnostics,
) -> Result<CaseData> {
    let mut reader = SectionReader::new(input, delimiter.unwrap_or(Delimiter::Comma));

    let header = reader.next_line()?.ok_or(Error::UnexpectedEof {
        section: DATA_MODIFICATION_CODE,
    })?;
    if delimiter.is_none() {
        reader.set_delimiter(detect_delimiter(&header));
    }

    for section in OPF_SECTIONS {
        diag.stats.skipped_records += reader.skip_section(section)?;
    }

    Ok(CaseData::new())
}
