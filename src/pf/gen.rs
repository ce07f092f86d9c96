use crate::busmap::BusIndex;
use crate::diag::Diagnostics;
use crate::error::Result;
use crate::format::Revision;
use crate::layout::GenLayout;
use crate::mpc::{Bus, Gen, GenStatus};
use crate::reader::SectionReader;
use crate::section::Section;
use std::io::{BufRead, Seek};

const SECTION: &str = Section::Generator.name();

/// Reads the generator data section. Generators at unknown buses are
/// dropped.
///
/// `base_mva` is the machine base used when MBASE is omitted.
pub fn generator_data<R: BufRead + Seek>(
    reader: &mut SectionReader<R>,
    bus: &[Bus],
    busmap: &BusIndex,
    rev: Revision,
    base_mva: f64,
    diag: &mut Diagnostics,
) -> Result<Vec<Gen>> {
    let layout = GenLayout::new(rev);
    let mut generators = Vec::new();

    // 0 / END OF GENERATOR DATA, BEGIN NON-TRANSFORMER BRANCH DATA
    while let Some(row) = reader.section_row(SECTION)? {
        let i = row.require(SECTION, layout.bus)?;
        let Some(idx) = busmap.resolve(i, SECTION, row.line, diag) else {
            continue;
        };

        generators.push(Gen {
            bus: bus[idx].i,
            pg: row.f64_or(SECTION, layout.pg, 0.0)?,
            qg: row.f64_or(SECTION, layout.qg, 0.0)?,
            qmax: row.f64_or(SECTION, layout.qt, 9999.0)?,
            qmin: row.f64_or(SECTION, layout.qb, -9999.0)?,
            vg: row.f64_or(SECTION, layout.vs, 1.0)?,
            mbase: row.f64_or(SECTION, layout.mbase, base_mva)?,
            status: GenStatus::from_flag(row.flag_or(SECTION, layout.status, true)?),
            pmax: row.f64_or(SECTION, layout.pt, 9999.0)?,
            pmin: row.f64_or(SECTION, layout.pb, -9999.0)?,
        });
    }

    log::info!("{} generator records.", generators.len());
    diag.stats.generators = generators.len();

    Ok(generators)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Delimiter;
    use crate::pf::bus_data;
    use std::io::Cursor;

    const BUSES: &str = "1 'ONE' 138.0 3\n5 'FIVE' 138.0 2\n0 / END OF BUS DATA\n";

    #[test]
    fn test_generators() -> anyhow::Result<()> {
        let data = format!(
            "{}{}{}{}",
            BUSES,
            // I ID PG QG QT QB VS IREG MBASE ZR ZX RT XT GTAP STAT RMPCT PT PB O1 F1
            "5 '1' 40.0 10.0 30.0 -20.0 1.02 0 120.0 0.0 1.0 0.0 0.0 1.0 1 100.0 80.0 5.0 1 1.0\n",
            "7 '1' 40.0 10.0 30.0 -20.0 1.02 0 120.0 0.0 1.0 0.0 0.0 1.0 1 100.0 80.0 5.0 1 1.0\n",
            "1 '1' 0.0 0.0 99.0 -99.0 1.0 0 100.0 0.0 1.0 0.0 0.0 1.0 0 100.0 50.0 0.0\n0\n",
        );
        let mut reader = SectionReader::new(Cursor::new(data), Delimiter::Space);
        let mut diag = Diagnostics::new();

        let (bus, busmap) = bus_data(&mut reader, Revision::V30, &mut diag)?;
        let gen = generator_data(&mut reader, &bus, &busmap, Revision::V30, 100.0, &mut diag)?;

        // The generator at bus 7 is dropped.
        assert_eq!(gen.len(), 2);
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.stats.generators, 2);

        let g = &gen[0];
        assert_eq!(g.bus, 5);
        assert_eq!((g.pg, g.qg), (40.0, 10.0));
        assert_eq!((g.qmax, g.qmin), (30.0, -20.0));
        assert_eq!(g.vg, 1.02);
        assert_eq!(g.mbase, 120.0);
        assert_eq!(g.status, GenStatus::InService);
        assert_eq!((g.pmax, g.pmin), (80.0, 5.0));

        assert_eq!(gen[1].bus, 1);
        assert_eq!(gen[1].status, GenStatus::OutOfService);
        Ok(())
    }

    #[test]
    fn test_defaults() -> anyhow::Result<()> {
        let data = format!("{}1 '1' 25.0\n0\n", BUSES);
        let mut reader = SectionReader::new(Cursor::new(data), Delimiter::Space);
        let mut diag = Diagnostics::new();

        let (bus, busmap) = bus_data(&mut reader, Revision::V32, &mut diag)?;
        let gen = generator_data(&mut reader, &bus, &busmap, Revision::V32, 250.0, &mut diag)?;

        assert_eq!(gen[0].pg, 25.0);
        assert_eq!(gen[0].mbase, 250.0);
        assert_eq!((gen[0].pmax, gen[0].pmin), (9999.0, -9999.0));
        assert_eq!(gen[0].status, GenStatus::InService);
        Ok(())
    }
}
