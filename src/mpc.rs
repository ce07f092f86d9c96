use crate::idx::*;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Default maximum voltage magnitude (p.u.).
pub const DEFAULT_VMAX: f64 = 1.1;
/// Default minimum voltage magnitude (p.u.).
pub const DEFAULT_VMIN: f64 = 0.9;
/// Branch angle difference limit (degrees), i.e. unconstrained.
pub const ANGLE_LIMIT: f64 = 360.0;

/// MPC is a MATPOWER case converted from power flow raw data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MPC {
    /// First title line of the raw data file.
    pub name: String,

    /// Second title line of the raw data file.
    pub description: String,

    /// System MVA base used for converting power into per-unit quantities.
    pub base_mva: f64,

    /// Power system nodes, including aggregated static loads and shunts.
    pub bus: Vec<Bus>,

    /// Generators.
    pub gen: Vec<Gen>,

    /// Transmission lines/cables.
    pub branch: Vec<Branch>,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum BusType {
    /// Fixed active and reactive power.
    PQ,
    /// Fixed voltage magnitude and active power.
    PV,
    /// Reference voltage angle. Slack active and reactive power.
    REF,
    /// Isolated bus.
    NONE,
}

impl BusType {
    /// MATPOWER bus type code, the same as the PSS/E IDE code.
    pub fn code(self) -> usize {
        match self {
            BusType::PQ => 1,
            BusType::PV => 2,
            BusType::REF => 3,
            BusType::NONE => 4,
        }
    }
}

impl TryFrom<usize> for BusType {
    type Error = usize;

    fn try_from(code: usize) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(BusType::PQ),
            2 => Ok(BusType::PV),
            3 => Ok(BusType::REF),
            4 => Ok(BusType::NONE),
            n => Err(n),
        }
    }
}

/// Bus is a node in the power system graph structure.
/// Static loads and shunts are included in the Bus definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Bus {
    /// Bus number.
    pub i: usize,

    pub bus_type: BusType,

    /// Real power demand (MW).
    pub pd: f64,

    /// Reactive power demand (MVAr).
    pub qd: f64,

    /// Shunt conductance (MW at V = 1.0 p.u.).
    pub gs: f64,

    /// Shunt susceptance (MVAr at V = 1.0 p.u.).
    pub bs: f64,

    pub area: usize,

    /// Voltage magnitude (p.u.).
    pub vm: f64,

    /// Voltage angle (degrees).
    pub va: f64,

    /// Base voltage (kV).
    pub base_kv: f64,

    /// Loss zone.
    pub zone: usize,

    /// Maximum voltage magnitude (p.u.).
    pub vmax: f64,

    /// Minimum voltage magnitude (p.u.).
    pub vmin: f64,
}

impl Bus {
    pub fn to_row(&self) -> Vec<f64> {
        let mut row = vec![0.0; BUS_COLS];
        row[BUS_I] = self.i as f64;
        row[BUS_TYPE] = self.bus_type.code() as f64;
        row[PD] = self.pd;
        row[QD] = self.qd;
        row[GS] = self.gs;
        row[BS] = self.bs;
        row[BUS_AREA] = self.area as f64;
        row[VM] = self.vm;
        row[VA] = self.va;
        row[BASE_KV] = self.base_kv;
        row[ZONE] = self.zone as f64;
        row[VMAX] = self.vmax;
        row[VMIN] = self.vmin;
        row
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum GenStatus {
    InService,
    OutOfService,
}

impl GenStatus {
    pub fn from_flag(in_service: bool) -> Self {
        if in_service {
            GenStatus::InService
        } else {
            GenStatus::OutOfService
        }
    }
}

/// Gen is a generator connected to a bus.
#[derive(Debug, Clone, PartialEq)]
pub struct Gen {
    /// Bus number.
    pub bus: usize,

    /// Real power output (MW).
    pub pg: f64,

    /// Reactive power output (MVAr).
    pub qg: f64,

    /// Maximum reactive power output (MVAr).
    pub qmax: f64,

    /// Minimum reactive power output (MVAr).
    pub qmin: f64,

    /// Voltage magnitude setpoint (p.u.).
    pub vg: f64,

    /// Total MVA base of this machine.
    pub mbase: f64,

    pub status: GenStatus,

    /// Maximum real power output (MW).
    pub pmax: f64,

    /// Minimum real power output (MW).
    pub pmin: f64,
}

impl Gen {
    pub fn to_row(&self) -> Vec<f64> {
        let mut row = vec![0.0; GEN_COLS];
        row[GEN_BUS] = self.bus as f64;
        row[PG] = self.pg;
        row[QG] = self.qg;
        row[QMAX] = self.qmax;
        row[QMIN] = self.qmin;
        row[VG] = self.vg;
        row[MBASE] = self.mbase;
        row[GEN_STATUS] = match self.status {
            GenStatus::InService => 1.0,
            GenStatus::OutOfService => 0.0,
        };
        row[PMAX] = self.pmax;
        row[PMIN] = self.pmin;
        row
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum BranchStatus {
    InService,
    OutOfService,
}

impl BranchStatus {
    pub fn from_flag(in_service: bool) -> Self {
        if in_service {
            BranchStatus::InService
        } else {
            BranchStatus::OutOfService
        }
    }
}

/// Branch represents a transmission line or cable.
#[derive(Debug, Clone, PartialEq)]
pub struct Branch {
    /// From bus number.
    pub from_bus: usize,

    /// To bus number.
    pub to_bus: usize,

    /// Resistance (p.u.).
    pub r: f64,

    /// Reactance (p.u.).
    pub x: f64,

    /// Total line charging susceptance (p.u.).
    pub b: f64,

    /// MVA rating A (long term rating).
    pub rate_a: f64,

    /// MVA rating B (short term rating).
    pub rate_b: f64,

    /// MVA rating C (emergency rating).
    pub rate_c: f64,

    /// Transformer off nominal tap ratio. Always zero: transformer data is
    /// not converted.
    pub tap: f64,

    /// Transformer phase shift angle (degrees). Always zero.
    pub shift: f64,

    pub status: BranchStatus,

    /// Minimum angle difference, angle(Vf) - angle(Vt) (degrees).
    pub ang_min: f64,

    /// Maximum angle difference, angle(Vf) - angle(Vt) (degrees).
    pub ang_max: f64,
}

impl Branch {
    pub fn to_row(&self) -> Vec<f64> {
        let mut row = vec![0.0; BRANCH_COLS];
        row[F_BUS] = self.from_bus as f64;
        row[T_BUS] = self.to_bus as f64;
        row[BR_R] = self.r;
        row[BR_X] = self.x;
        row[BR_B] = self.b;
        row[RATE_A] = self.rate_a;
        row[RATE_B] = self.rate_b;
        row[RATE_C] = self.rate_c;
        row[TAP] = self.tap;
        row[SHIFT] = self.shift;
        row[BR_STATUS] = match self.status {
            BranchStatus::InService => 1.0,
            BranchStatus::OutOfService => 0.0,
        };
        row[ANGMIN] = self.ang_min;
        row[ANGMAX] = self.ang_max;
        row
    }
}

/// A 2-D numeric table, one row per record.
pub type Table = Vec<Vec<f64>>;

/// Value stored under a case data key.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Scalar(f64),
    Table(Table),
}

impl Value {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Value::Scalar(v) => Some(*v),
            Value::Table(_) => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Value::Table(t) => Some(t),
            Value::Scalar(_) => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Scalar(v) => serializer.serialize_f64(*v),
            Value::Table(t) => t.serialize(serializer),
        }
    }
}

/// Named case data (`baseMVA`, `bus`, `gen`, `branch`, ...) in insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseData {
    entries: Vec<(String, Value)>,
}

impl CaseData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Adds `value` under `key` unless the key is already present. Returns
    /// true if the value was added.
    pub fn insert_if_absent(&mut self, key: &str, value: Value) -> bool {
        if self.contains_key(key) {
            return false;
        }
        self.entries.push((key.to_string(), value));
        true
    }

    /// Adds the entries of `other` whose keys are not yet present.
    pub fn merge(&mut self, other: CaseData) {
        for (key, value) in other.entries {
            if !self.insert_if_absent(&key, value) {
                log::warn!("Duplicate case data [{}] ignored.", key);
            }
        }
    }
}

impl Serialize for CaseData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl From<&MPC> for CaseData {
    fn from(mpc: &MPC) -> Self {
        let mut data = CaseData::new();
        data.insert_if_absent("baseMVA", Value::Scalar(mpc.base_mva));
        data.insert_if_absent(
            "bus",
            Value::Table(mpc.bus.iter().map(Bus::to_row).collect()),
        );
        data.insert_if_absent(
            "gen",
            Value::Table(mpc.gen.iter().map(Gen::to_row).collect()),
        );
        data.insert_if_absent(
            "branch",
            Value::Table(mpc.branch.iter().map(Branch::to_row).collect()),
        );
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bus(i: usize) -> Bus {
        Bus {
            i,
            bus_type: BusType::PQ,
            pd: 50.0,
            qd: 20.0,
            gs: 0.0,
            bs: 0.0,
            area: 1,
            vm: 1.0,
            va: 0.0,
            base_kv: 138.0,
            zone: 2,
            vmax: DEFAULT_VMAX,
            vmin: DEFAULT_VMIN,
        }
    }

    #[test]
    fn test_bus_row() {
        let row = bus(7).to_row();
        assert_eq!(row.len(), BUS_COLS);
        assert_eq!(row[BUS_I], 7.0);
        assert_eq!(row[PD], 50.0);
        assert_eq!(row[ZONE], 2.0);
        assert_eq!(row[VMAX], 1.1);
        assert_eq!(row[VMIN], 0.9);
    }

    #[test]
    fn test_bus_type_codes() {
        for code in 1..=4 {
            assert_eq!(BusType::try_from(code).map(BusType::code), Ok(code));
        }
        assert_eq!(BusType::try_from(0), Err(0));
        assert_eq!(BusType::try_from(5), Err(5));

        let mut b = bus(1);
        b.bus_type = BusType::REF;
        assert_eq!(b.to_row()[BUS_TYPE], 3.0);
    }

    #[test]
    fn test_case_data() -> anyhow::Result<()> {
        let mpc = MPC {
            base_mva: 100.0,
            bus: vec![bus(1), bus(2)],
            ..Default::default()
        };
        let mut data = CaseData::from(&mpc);
        assert_eq!(
            data.keys().collect::<Vec<_>>(),
            vec!["baseMVA", "bus", "gen", "branch"]
        );
        assert_eq!(data.get("baseMVA").and_then(Value::as_scalar), Some(100.0));
        assert_eq!(data.get("bus").and_then(Value::as_table).map(|t| t.len()), Some(2));
        assert!(data.get("gen").and_then(Value::as_table).unwrap().is_empty());

        let mut other = CaseData::new();
        other.insert_if_absent("baseMVA", Value::Scalar(1.0));
        other.insert_if_absent("gencost", Value::Table(vec![vec![2.0, 0.0, 0.0, 3.0]]));
        data.merge(other);
        assert_eq!(data.len(), 5);
        assert_eq!(data.get("baseMVA").and_then(Value::as_scalar), Some(100.0));

        let json = serde_json::to_string(&data)?;
        assert!(json.starts_with("{\"baseMVA\":100.0,\"bus\":[["));
        Ok(())
    }
}
