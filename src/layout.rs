//! Column positions of the converted data items in each raw data record,
//! selected once per format revision.

use crate::format::Revision;

/// Bus data record.
///
/// ```txt
/// v29-30: I, 'NAME', BASKV, IDE, GL, BL, AREA, ZONE, VM, VA, OWNER
/// v31-32: I, 'NAME', BASKV, IDE, AREA, ZONE, OWNER, VM, VA
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct BusLayout {
    pub number: usize,
    pub name: usize,
    pub base_kv: usize,
    pub bus_type: usize,
    /// Shunt conductance, moved to fixed shunt data in v31.
    pub gl: Option<usize>,
    /// Shunt susceptance, moved to fixed shunt data in v31.
    pub bl: Option<usize>,
    pub area: usize,
    pub zone: usize,
    pub vm: usize,
    pub va: usize,
}

impl BusLayout {
    pub fn new(rev: Revision) -> Self {
        match rev {
            Revision::V29 | Revision::V30 => Self {
                number: 0,
                name: 1,
                base_kv: 2,
                bus_type: 3,
                gl: Some(4),
                bl: Some(5),
                area: 6,
                zone: 7,
                vm: 8,
                va: 9,
            },
            Revision::V31 | Revision::V32 => Self {
                number: 0,
                name: 1,
                base_kv: 2,
                bus_type: 3,
                gl: None,
                bl: None,
                area: 4,
                zone: 5,
                vm: 7,
                va: 8,
            },
        }
    }
}

/// Load data record.
///
/// ```txt
/// v29-31: I, ID, STATUS, AREA, ZONE, PL, QL, IP, IQ, YP, YQ, OWNER
/// v32:    I, ID, STATUS, AREA, ZONE, PL, QL, IP, IQ, YP, YQ, OWNER, SCALE
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct LoadLayout {
    pub bus: usize,
    pub status: usize,
    pub pl: usize,
    pub ql: usize,
    pub ip: usize,
    pub iq: usize,
    pub yp: usize,
    pub yq: usize,
    pub scale: Option<usize>,
}

impl LoadLayout {
    pub fn new(rev: Revision) -> Self {
        Self {
            bus: 0,
            status: 2,
            pl: 5,
            ql: 6,
            ip: 7,
            iq: 8,
            yp: 9,
            yq: 10,
            scale: match rev {
                Revision::V32 => Some(12),
                _ => None,
            },
        }
    }
}

/// Generator data record. The converted items are at the same positions in
/// every supported revision.
///
/// ```txt
/// v29-30: I,ID,PG,QG,QT,QB,VS,IREG,MBASE,ZR,ZX,RT,XT,GTAP,STAT,RMPCT,PT,PB,
///         O1,F1,....O4,F4
/// v31-32: I,ID,PG,QG,QT,QB,VS,IREG,MBASE,ZR,ZX,RT,XT,GTAP,STAT,RMPCT,PT,PB,
///         O1,F1,...,O4,F4,WMOD,WPF
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct GenLayout {
    pub bus: usize,
    pub pg: usize,
    pub qg: usize,
    pub qt: usize,
    pub qb: usize,
    pub vs: usize,
    pub mbase: usize,
    pub status: usize,
    pub pt: usize,
    pub pb: usize,
}

impl GenLayout {
    pub fn new(_rev: Revision) -> Self {
        Self {
            bus: 0,
            pg: 2,
            qg: 3,
            qt: 4,
            qb: 5,
            vs: 6,
            mbase: 8,
            status: 14,
            pt: 16,
            pb: 17,
        }
    }
}

/// Non-transformer branch data record.
///
/// ```txt
/// v29-30: I,J,CKT,R,X,B,RATEA,RATEB,RATEC,GI,BI,GJ,BJ,ST,
///         LEN,O1,F1,...,O4,F4
/// v31-32: I,J,CKT,R,X,B,RATEA,RATEB,RATEC,GI,BI,GJ,BJ,ST,
///         MET,LEN,O1,F1,...,O4,F4
/// ```
#[derive(Debug, PartialEq, Clone)]
pub struct BranchLayout {
    pub from_bus: usize,
    pub to_bus: usize,
    pub r: usize,
    pub x: usize,
    pub b: usize,
    pub rate_a: usize,
    pub rate_b: usize,
    pub rate_c: usize,
    pub status: usize,
}

impl BranchLayout {
    pub fn new(_rev: Revision) -> Self {
        Self {
            from_bus: 0,
            to_bus: 1,
            r: 3,
            x: 4,
            b: 5,
            rate_a: 6,
            rate_b: 7,
            rate_c: 8,
            status: 13,
        }
    }
}

/// Switched shunt data record.
///
/// ```txt
/// v29-30: I,MODSW,VSWHI,VSWLO,SWREM,RMPCT,'RMIDNT',BINIT,
///         N1,B1,N2,B2,...N8,B8
/// ```
///
/// Switched shunt records of v31 and later are not converted.
#[derive(Debug, PartialEq, Clone)]
pub struct SwitchedShuntLayout {
    pub bus: usize,
    pub binit: usize,
}

impl SwitchedShuntLayout {
    pub fn new(rev: Revision) -> Option<Self> {
        match rev {
            Revision::V29 | Revision::V30 => Some(Self { bus: 0, binit: 7 }),
            Revision::V31 | Revision::V32 => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bus_layouts() {
        let v30 = BusLayout::new(Revision::V30);
        let v31 = BusLayout::new(Revision::V31);
        assert_eq!(v30, BusLayout::new(Revision::V29));
        assert_eq!(v31, BusLayout::new(Revision::V32));

        assert_eq!((v30.area, v30.zone, v30.vm, v30.va), (6, 7, 8, 9));
        assert_eq!((v31.area, v31.zone, v31.vm, v31.va), (4, 5, 7, 8));
        assert!(v31.gl.is_none() && v31.bl.is_none());
    }

    #[test]
    fn test_load_scale() {
        assert_eq!(LoadLayout::new(Revision::V31).scale, None);
        assert_eq!(LoadLayout::new(Revision::V32).scale, Some(12));
    }

    #[test]
    fn test_switched_shunt() {
        assert!(SwitchedShuntLayout::new(Revision::V29).is_some());
        assert!(SwitchedShuntLayout::new(Revision::V32).is_none());
    }
}
