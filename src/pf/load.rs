use crate::busmap::BusIndex;
use crate::diag::Diagnostics;
use crate::error::Result;
use crate::format::Revision;
use crate::layout::LoadLayout;
use crate::mpc::Bus;
use crate::reader::SectionReader;
use crate::section::Section;
use std::io::{BufRead, Seek};

const SECTION: &str = Section::Load.name();

/// Reads the load data section and adds the constant power demand of each
/// in-service load to its bus.
///
/// Constant current and constant admittance components are not converted
/// and neither are v32 load scaling factors. A warning is recorded for each
/// value not applied.
pub fn load_data<R: BufRead + Seek>(
    reader: &mut SectionReader<R>,
    bus: &mut [Bus],
    busmap: &BusIndex,
    rev: Revision,
    diag: &mut Diagnostics,
) -> Result<()> {
    let layout = LoadLayout::new(rev);
    let mut c = 0;

    // 0 / END OF LOAD DATA, BEGIN GENERATOR DATA
    while let Some(row) = reader.section_row(SECTION)? {
        c += 1;

        let i = row.require(SECTION, layout.bus)?;
        let status = row.flag_or(SECTION, layout.status, true)?;
        if !status {
            continue;
        }
        let Some(idx) = busmap.resolve(i, SECTION, row.line, diag) else {
            continue;
        };

        bus[idx].pd += row.f64_or(SECTION, layout.pl, 0.0)?;
        bus[idx].qd += row.f64_or(SECTION, layout.ql, 0.0)?;

        let ip = row.f64_or(SECTION, layout.ip, 0.0)?;
        let iq = row.f64_or(SECTION, layout.iq, 0.0)?;
        if ip != 0.0 || iq != 0.0 {
            diag.warn(
                SECTION,
                Some(row.line),
                format!(
                    "Constant current load of {:.2}MW ({:.2}MVAr) at bus {} ({}) ignored.",
                    ip, iq, i, idx
                ),
            );
        }

        let yp = row.f64_or(SECTION, layout.yp, 0.0)?;
        let yq = row.f64_or(SECTION, layout.yq, 0.0)?;
        if yp != 0.0 || yq != 0.0 {
            diag.warn(
                SECTION,
                Some(row.line),
                format!(
                    "Constant admittance load of {:.2}MW ({:.2}MVAr) at bus {} ({}) ignored.",
                    yp, yq, i, idx
                ),
            );
        }

        if let Some(col) = layout.scale {
            let scale = row.f64_or(SECTION, col, 1.0)?;
            if scale != 1.0 {
                diag.warn(
                    SECTION,
                    Some(row.line),
                    format!("Load at bus {} ({}) not scaled by {:.2}.", i, idx, scale),
                );
            }
        }
    }

    log::info!("{} load data records.", c);
    diag.stats.loads = c;

    Ok(())
}
