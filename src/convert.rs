use crate::diag::Diagnostics;
use crate::error::Result;
use crate::format::{Delimiter, Revision};
use crate::mpc::{CaseData, MPC};
use crate::opf::opf2mpc;
use crate::pf::pf2mpc;
use crate::savecase::save_case;
use crate::source::RawSource;
use derive_builder::Builder;
use std::path::Path;

/// Raw data format options. Values not given are determined from the first
/// line of each input.
#[derive(Debug, Clone, Default, Builder)]
#[builder(default)]
pub struct ConvertOptions {
    /// Format revision number. An unsupported number is reported and the
    /// default revision is used.
    #[builder(setter(into, strip_option))]
    pub revision: Option<i64>,

    #[builder(setter(strip_option))]
    pub delimiter: Option<Delimiter>,
}

/// Outcome of a conversion. Only the first failure is reported.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Status {
    Success = 0,
    /// The power flow raw data could not be opened.
    PfOpen = 1,
    /// The optimal power flow raw data could not be opened.
    OpfOpen = 2,
    /// The case could not be saved.
    Save = 3,
}

impl Status {
    pub fn code(self) -> i32 {
        self as i32
    }

    fn fail(&mut self, status: Status) {
        if *self == Status::Success {
            *self = status;
        }
    }
}

/// Result of converting raw data files.
#[derive(Debug)]
pub struct Conversion {
    /// Named case data: `baseMVA`, `bus`, `gen`, `branch` and any tables
    /// from optimal power flow data.
    pub data: CaseData,

    /// The power flow case, if the power flow raw data was read.
    pub mpc: Option<MPC>,

    pub status: Status,

    pub diagnostics: Diagnostics,
}

/// Raw data file to MATPOWER case converter.
///
/// Converts power flow raw data from `pf` into case data with `bus`, `gen`
/// and `branch` tables. Optimal power flow raw data from `opf` may add more
/// tables but never replaces existing ones. If `output` is given, the case
/// is saved there.
///
/// Sources that cannot be opened and failure to save are reported through
/// the returned status. Malformed raw data is an error.
pub fn raw2mpc(
    pf: &mut dyn RawSource,
    opf: Option<&mut dyn RawSource>,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<Conversion> {
    let mut data = CaseData::new();
    let mut status = Status::Success;
    let mut diag = Diagnostics::new();
    let revision = options
        .revision
        .map(|number| Revision::or_default(number, &mut diag));

    // Power Flow Raw Data //
    let fname = pf.name();
    log::info!("Loading Power Flow Raw file [{}].", fname);
    let mpc = match pf.open() {
        Ok(input) => Some(pf2mpc(input, revision, options.delimiter, &mut diag)?),
        Err(err) => {
            log::error!("Error opening {}.\n{}", fname, err);
            status.fail(Status::PfOpen);
            None
        }
    };
    if let Some(mpc) = &mpc {
        data.merge(CaseData::from(mpc));
    }

    // Optimal Power Flow Raw Data //
    if let Some(opf) = opf {
        let fname = opf.name();
        log::info!("Loading OPF Raw file [{}].", fname);
        match opf.open() {
            Ok(input) => {
                let mut opf_diag = Diagnostics::new();
                let opf_data = opf2mpc(input, revision, options.delimiter, &mut opf_diag)?;
                diag.merge(opf_diag);
                data.merge(opf_data);
            }
            Err(err) => {
                log::error!("Error opening {}.\n{}", fname, err);
                status.fail(Status::OpfOpen);
            }
        }
    }

    // Save Case //
    if let Some(path) = output {
        if !data.is_empty() {
            let title = mpc.as_ref().map(|m| m.name.as_str()).unwrap_or("");
            match save_case(path, &data, title) {
                Ok(()) => log::info!("Case saved to {}.", path.display()),
                Err(err) => {
                    log::error!("Error saving case file {}.\n{}", path.display(), err);
                    status.fail(Status::Save);
                }
            }
        }
    }

    Ok(Conversion {
        data,
        mpc,
        status,
        diagnostics: diag,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mpc::Value;
    use crate::source::{PathSource, ReaderSource};
    use std::io::Cursor;

    fn empty_case() -> String {
        let mut s = String::from("0, 100.0, 30\nA\nB\n");
        for _ in 0..16 {
            s.push_str("0\n");
        }
        s
    }

    #[test]
    fn test_options_builder() -> anyhow::Result<()> {
        let opts = ConvertOptionsBuilder::default()
            .revision(Revision::V32)
            .build()?;
        assert_eq!(opts.revision, Some(32));
        assert_eq!(opts.delimiter, None);
        Ok(())
    }

    #[test]
    fn test_unsupported_revision_option() -> anyhow::Result<()> {
        let mut pf = ReaderSource::new(Cursor::new(empty_case()), "case.raw");
        let options = ConvertOptionsBuilder::default().revision(99).build()?;

        let conv = raw2mpc(&mut pf, None, None, &options)?;
        assert_eq!(conv.status, Status::Success);
        assert_eq!(conv.diagnostics.warning_count(), 1);
        assert_eq!(conv.diagnostics.issues[0].section, "format");
        Ok(())
    }

    #[test]
    fn test_pf_open_failure() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut pf = PathSource::new(dir.path().join("missing.raw"));

        let conv = raw2mpc(&mut pf, None, None, &ConvertOptions::default())?;
        assert_eq!(conv.status, Status::PfOpen);
        assert!(conv.data.is_empty());
        assert!(conv.mpc.is_none());
        Ok(())
    }

    #[test]
    fn test_opf_open_failure() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut pf = ReaderSource::new(Cursor::new(empty_case()), "case.raw");
        let mut opf = PathSource::new(dir.path().join("missing.rawx"));

        let conv = raw2mpc(&mut pf, Some(&mut opf), None, &ConvertOptions::default())?;
        assert_eq!(conv.status, Status::OpfOpen);
        // The power flow data is still converted.
        assert_eq!(conv.data.get("baseMVA").and_then(Value::as_scalar), Some(100.0));
        Ok(())
    }

    #[test]
    fn test_first_failure_reported() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let mut pf = PathSource::new(dir.path().join("missing.raw"));
        let mut opf = PathSource::new(dir.path().join("missing.rawx"));

        let conv = raw2mpc(&mut pf, Some(&mut opf), None, &ConvertOptions::default())?;
        assert_eq!(conv.status.code(), 1);
        Ok(())
    }

    #[test]
    fn test_save_failure() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("no").join("such").join("case.m");
        let mut pf = ReaderSource::new(Cursor::new(empty_case()), "case.raw");

        let conv = raw2mpc(&mut pf, None, Some(&output), &ConvertOptions::default())?;
        assert_eq!(conv.status, Status::Save);
        Ok(())
    }

    #[test]
    fn test_save() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let output = dir.path().join("case.m");
        let mut pf = ReaderSource::new(Cursor::new(empty_case()), "case.raw");

        let conv = raw2mpc(&mut pf, None, Some(&output), &ConvertOptions::default())?;
        assert_eq!(conv.status, Status::Success);
        assert!(std::fs::read_to_string(&output)?.starts_with("function mpc = case\n%CASE  A\n"));
        Ok(())
    }

    #[test]
    fn test_malformed_input() {
        let mut pf = ReaderSource::new(Cursor::new("5, 100.0, 30\n\n\n"), "bad.raw");
        let res = raw2mpc(&mut pf, None, None, &ConvertOptions::default());
        assert!(res.is_err());
    }
}
