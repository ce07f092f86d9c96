use crate::busmap::BusIndex;
use crate::diag::Diagnostics;
use crate::error::Result;
use crate::format::Revision;
use crate::layout::BranchLayout;
use crate::mpc::{Branch, BranchStatus, Bus, ANGLE_LIMIT};
use crate::reader::SectionReader;
use crate::section::Section;
use std::io::{BufRead, Seek};

const SECTION: &str = Section::Branch.name();

/// Reads the non-transformer branch data section. Branches with an unknown
/// bus at either end are dropped.
///
/// Transformer data is not converted, so the tap ratio and phase shift of
/// every branch are left at zero.
pub fn nontransformer_branch_data<R: BufRead + Seek>(
    reader: &mut SectionReader<R>,
    bus: &[Bus],
    busmap: &BusIndex,
    rev: Revision,
    diag: &mut Diagnostics,
) -> Result<Vec<Branch>> {
    let layout = BranchLayout::new(rev);
    let mut branches = Vec::new();

    // 0 / END OF NON-TRANSFORMER BRANCH DATA, BEGIN TRANSFORMER DATA
    while let Some(row) = reader.section_row(SECTION)? {
        let i = row.require(SECTION, layout.from_bus)?;
        // A negative J marks the metered end.
        let j = row.require(SECTION, layout.to_bus)?.trim_start_matches('-');

        let fbus = busmap.resolve(i, SECTION, row.line, diag);
        let tbus = busmap.resolve(j, SECTION, row.line, diag);
        let (Some(fbus), Some(tbus)) = (fbus, tbus) else {
            continue;
        };

        branches.push(Branch {
            from_bus: bus[fbus].i,
            to_bus: bus[tbus].i,
            r: row.f64_or(SECTION, layout.r, 0.0)?,
            x: row.f64_at(SECTION, layout.x)?,
            b: row.f64_or(SECTION, layout.b, 0.0)?,
            rate_a: row.f64_or(SECTION, layout.rate_a, 0.0)?,
            rate_b: row.f64_or(SECTION, layout.rate_b, 0.0)?,
            rate_c: row.f64_or(SECTION, layout.rate_c, 0.0)?,
            tap: 0.0,
            shift: 0.0,
            status: BranchStatus::from_flag(row.flag_or(SECTION, layout.status, true)?),
            ang_min: -ANGLE_LIMIT,
            ang_max: ANGLE_LIMIT,
        });
    }

    log::info!("{} non-transformer branch records.", branches.len());
    diag.stats.branches = branches.len();

    Ok(branches)
}
