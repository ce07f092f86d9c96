//! Power flow raw data conversion.

mod branch;
mod bus;
mod case_id;
mod gen;
mod load;
mod shunt;

pub use branch::*;
pub use bus::*;
pub use case_id::*;
pub use gen::*;
pub use load::*;
pub use shunt::*;

use crate::busmap::BusIndex;
use crate::diag::Diagnostics;
use crate::error::{Error, Result};
use crate::format::{detect_delimiter, detect_revision, Delimiter, Revision};
use crate::layout::SwitchedShuntLayout;
use crate::mpc::MPC;
use crate::reader::{is_end_of_data, SectionReader};
use crate::section::Section;
use std::io::{BufRead, Seek};

/// Converts power flow raw data into a MATPOWER case.
///
/// The delimiter and revision are determined from the first line of the
/// input unless given.
pub fn pf2mpc<R: BufRead + Seek>(
    input: R,
    revision: Option<Revision>,
    delimiter: Option<Delimiter>,
    diag: &mut Diagnostics,
) -> Result<MPC> {
    let mut reader = SectionReader::new(input, delimiter.unwrap_or(Delimiter::Comma));

    let header = reader.next_line()?.ok_or(Error::UnexpectedEof {
        section: CASE_IDENTIFICATION,
    })?;
    let sep = delimiter.unwrap_or_else(|| detect_delimiter(&header));
    let rev = match revision {
        Some(rev) => rev,
        None => detect_revision(&header, sep, diag),
    };

    reader.set_delimiter(sep);
    reader.rewind()?;

    let case = case_identification(&mut reader)?;

    let mut mpc = MPC {
        name: case.name,
        description: case.description,
        base_mva: case.base_mva,
        ..Default::default()
    };
    let mut busmap = BusIndex::default();

    for section in Section::sequence(rev) {
        match section {
            Section::Bus => {
                (mpc.bus, busmap) = bus_data(&mut reader, rev, diag)?;
            }
            Section::Load => {
                load_data(&mut reader, &mut mpc.bus, &busmap, rev, diag)?;
            }
            Section::Generator => {
                mpc.gen = generator_data(&mut reader, &mpc.bus, &busmap, rev, mpc.base_mva, diag)?;
            }
            Section::Branch => {
                mpc.branch = nontransformer_branch_data(&mut reader, &mpc.bus, &busmap, rev, diag)?;
            }
            Section::SwitchedShunt => match SwitchedShuntLayout::new(rev) {
                Some(layout) => {
                    switched_shunt_data(&mut reader, &mut mpc.bus, &busmap, &layout, diag)?;
                }
                None => skip_section(&mut reader, section, diag)?,
            },
            _ => skip_section(&mut reader, section, diag)?,
        }
    }

    q_record(&mut reader)?;

    Ok(mpc)
}

/// Consumes a section that is not converted.
fn skip_section<R: BufRead + Seek>(
    reader: &mut SectionReader<R>,
    section: Section,
    diag: &mut Diagnostics,
) -> Result<()> {
    let n = reader.skip_section(section.name())?;
    diag.stats.skipped_records += n;
    Ok(())
}

/// Consumes the optional record that ends the raw data.
fn q_record<R: BufRead + Seek>(reader: &mut SectionReader<R>) -> Result<()> {
    if reader.is_end_of_data() {
        return Ok(());
    }
    if let Some(row) = reader.next_row()? {
        if !is_end_of_data(&row.fields) {
            log::debug!("Data following line {} ignored.", row.line - 1);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Case identification records followed by `n` empty sections.
    fn empty_case(header: &str, n: usize) -> String {
        let mut s = format!("{}\nTITLE ONE\nTITLE TWO\n", header);
        for _ in 0..n {
            s.push_str("0 / END OF DATA\n");
        }
        s
    }

    #[test]
    fn test_empty_sections() -> anyhow::Result<()> {
        for (rev, n) in [(29, 16), (30, 16), (31, 17), (32, 17)] {
            let data = empty_case(&format!("0, 100.0, {} / comment", rev), n);
            let mut diag = Diagnostics::new();

            let mpc = pf2mpc(Cursor::new(data), None, None, &mut diag)?;

            assert_eq!(mpc.base_mva, 100.0);
            assert_eq!(mpc.name, "TITLE ONE");
            assert!(mpc.bus.is_empty());
            assert!(mpc.gen.is_empty());
            assert!(mpc.branch.is_empty());
            assert!(!diag.has_issues());
        }
        Ok(())
    }

    #[test]
    fn test_missing_section() {
        // Revision 31 has one more section than revision 30.
        let data = empty_case("0 100.0 31", 16);
        let mut diag = Diagnostics::new();

        let res = pf2mpc(Cursor::new(data), None, None, &mut diag);
        assert!(matches!(
            res,
            Err(Error::UnexpectedEof {
                section: "switched shunt"
            })
        ));
    }

    #[test]
    fn test_unsupported_revision() -> anyhow::Result<()> {
        let data = empty_case("0, 100.0, 99", 16);
        let mut diag = Diagnostics::new();

        let mpc = pf2mpc(Cursor::new(data), None, None, &mut diag)?;
        assert_eq!(mpc.base_mva, 100.0);
        assert_eq!(diag.warning_count(), 1);
        Ok(())
    }

    #[test]
    fn test_revision_override() -> anyhow::Result<()> {
        // Header says 32, but the data is laid out as revision 30.
        let data = empty_case("0 100.0 32", 16);
        let mut diag = Diagnostics::new();

        let mpc = pf2mpc(
            Cursor::new(data),
            Some(Revision::V30),
            Some(Delimiter::Space),
            &mut diag,
        )?;
        assert_eq!(mpc.base_mva, 100.0);
        Ok(())
    }

    #[test]
    fn test_end_of_data_record() -> anyhow::Result<()> {
        let data = "0, 100.0, 30\n\n\n1, 'BUS1', 138.0, 3\n0 / END OF BUS DATA\nQ\n";
        let mut diag = Diagnostics::new();

        let mpc = pf2mpc(Cursor::new(data), None, None, &mut diag)?;
        assert_eq!(mpc.bus.len(), 1);
        assert_eq!(mpc.bus[0].bus_type, crate::mpc::BusType::REF);
        Ok(())
    }

    #[test]
    fn test_empty_input() {
        let mut diag = Diagnostics::new();
        let res = pf2mpc(Cursor::new(""), None, None, &mut diag);
        assert!(matches!(res, Err(Error::UnexpectedEof { .. })));
    }
}
