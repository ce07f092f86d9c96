use crate::busmap::BusIndex;
use crate::diag::Diagnostics;
use crate::error::Result;
use crate::layout::SwitchedShuntLayout;
use crate::mpc::Bus;
use crate::reader::SectionReader;
use crate::section::Section;
use std::io::{BufRead, Seek};

const SECTION: &str = Section::SwitchedShunt.name();

/// Reads v29-30 switched shunt data and adds the initial susceptance of each
/// shunt to its bus.
pub fn switched_shunt_data<R: BufRead + Seek>(
    reader: &mut SectionReader<R>,
    bus: &mut [Bus],
    busmap: &BusIndex,
    layout: &SwitchedShuntLayout,
    diag: &mut Diagnostics,
) -> Result<()> {
    let mut c = 0;

    // 0 / END OF SWITCHED SHUNT DATA
    while let Some(row) = reader.section_row(SECTION)? {
        c += 1;

        let i = row.require(SECTION, layout.bus)?;
        if let Some(idx) = busmap.resolve(i, SECTION, row.line, diag) {
            bus[idx].bs += row.f64_or(SECTION, layout.binit, 0.0)?;
        }
    }

    log::info!("{} switched shunt data records.", c);
    diag.stats.switched_shunts = c;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{Delimiter, Revision};
    use crate::pf::bus_data;
    use std::io::Cursor;

    #[test]
    fn test_accumulate() -> anyhow::Result<()> {
        let data = "1 'ONE' 138.0 1 0.0 5.0 1 1 1.0 0.0 1\n\
                    2 'TWO' 138.0 1 0.0 0.0 1 1 1.0 0.0 1\n\
                    0 / END OF BUS DATA\n\
                    1 1 1.05 0.95 0 100.0 '' 20.0 1 20.0\n\
                    1 1 1.05 0.95 0 100.0 '' -7.5 1 -7.5\n\
                    3 1 1.05 0.95 0 100.0 '' 10.0 1 10.0\n\
                    0 / END OF SWITCHED SHUNT DATA\n";
        let mut reader = SectionReader::new(Cursor::new(data), Delimiter::Space);
        let mut diag = Diagnostics::new();

        let (mut bus, busmap) = bus_data(&mut reader, Revision::V30, &mut diag)?;
        let layout = SwitchedShuntLayout::new(Revision::V30).unwrap();
        switched_shunt_data(&mut reader, &mut bus, &busmap, &layout, &mut diag)?;

        // Bus BL plus both shunts.
        assert_eq!(bus[0].bs, 17.5);
        assert_eq!(bus[1].bs, 0.0);
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.stats.switched_shunts, 3);
        Ok(())
    }
}
