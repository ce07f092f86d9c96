use crate::busmap::BusIndex;
use crate::debug::format_f64_vec;
use crate::diag::Diagnostics;
use crate::error::{Error, Result};
use crate::format::Revision;
use crate::layout::BusLayout;
use crate::mpc::{Bus, BusType, DEFAULT_VMAX, DEFAULT_VMIN};
use crate::reader::{Row, SectionReader};
use crate::section::Section;
use std::io::{BufRead, Seek};

const SECTION: &str = Section::Bus.name();

/// Reads the bus data section and returns the bus table with an index of
/// bus numbers and names into it.
///
/// Load and shunt values are set by the sections that follow. Revisions
/// 29 and 30 carry the bus shunt admittance in the bus record.
pub fn bus_data<R: BufRead + Seek>(
    reader: &mut SectionReader<R>,
    rev: Revision,
    diag: &mut Diagnostics,
) -> Result<(Vec<Bus>, BusIndex)> {
    let layout = BusLayout::new(rev);
    let mut buses = Vec::new();
    let mut busmap = BusIndex::default();
    let mut c = 0;

    // 0 / END OF BUS DATA, BEGIN LOAD DATA
    while let Some(row) = reader.section_row(SECTION)? {
        c += 1;
        let bus = make_bus(&row, &layout)?;

        if busmap.contains_number(bus.i) {
            diag.error(
                SECTION,
                Some(row.line),
                format!("Duplicate bus [{}] ignored.", bus.i),
            );
            continue;
        }

        // Map bus number and name to bus data index.
        let name = row.text(layout.name).unwrap_or("");
        busmap.insert(bus.i, name, buses.len());

        log::debug!("bus {}: {}", bus.i, format_f64_vec(&bus.to_row()));
        buses.push(bus);
    }

    log::info!("{} bus data records.", c);
    diag.stats.buses = buses.len();

    Ok((buses, busmap))
}

fn make_bus(row: &Row, layout: &BusLayout) -> Result<Bus> {
    let shunt = |col: Option<usize>| -> Result<f64> {
        match col {
            Some(col) => row.f64_or(SECTION, col, 0.0),
            None => Ok(0.0),
        }
    };

    let code = row.usize_or(SECTION, layout.bus_type, BusType::PQ.code())?;
    let bus_type = BusType::try_from(code).map_err(|value| Error::InvalidBusType {
        line: row.line,
        value,
    })?;

    Ok(Bus {
        i: row.usize_at(SECTION, layout.number)?,
        bus_type,
        pd: 0.0, // see load_data
        qd: 0.0, // see load_data
        gs: shunt(layout.gl)?,
        bs: shunt(layout.bl)?, // see switched_shunt_data
        area: row.usize_or(SECTION, layout.area, 1)?,
        vm: row.f64_or(SECTION, layout.vm, 1.0)?,
        va: row.f64_or(SECTION, layout.va, 0.0)?,
        base_kv: row.f64_or(SECTION, layout.base_kv, 0.0)?,
        zone: row.usize_or(SECTION, layout.zone, 1)?,
        vmax: DEFAULT_VMAX,
        vmin: DEFAULT_VMIN,
    })
}
