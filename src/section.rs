use crate::format::Revision;
use std::fmt;

/// Data sections of a power flow raw data file.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum Section {
    Bus,
    Load,
    FixedShunt,
    Generator,
    Branch,
    Transformer,
    AreaInterchange,
    TwoTerminalDc,
    VscDc,
    SwitchedShunt,
    ImpedanceCorrection,
    MultiTerminalDc,
    MultiSectionLine,
    Zone,
    InterareaTransfer,
    Owner,
    Facts,
}

impl Section {
    pub const fn name(self) -> &'static str {
        match self {
            Section::Bus => "bus",
            Section::Load => "load",
            Section::FixedShunt => "fixed shunt",
            Section::Generator => "generator",
            Section::Branch => "non-transformer branch",
            Section::Transformer => "transformer",
            Section::AreaInterchange => "area interchange",
            Section::TwoTerminalDc => "two-terminal dc line",
            Section::VscDc => "vsc dc line",
            Section::SwitchedShunt => "switched shunt",
            Section::ImpedanceCorrection => "transformer impedance correction",
            Section::MultiTerminalDc => "multi-terminal dc line",
            Section::MultiSectionLine => "multi-section line grouping",
            Section::Zone => "zone",
            Section::InterareaTransfer => "interarea transfer",
            Section::Owner => "owner",
            Section::Facts => "facts device",
        }
    }

    /// Returns the order of the data sections following the case
    /// identification records.
    pub fn sequence(rev: Revision) -> Vec<Section> {
        use Section::*;

        let mut seq = vec![Bus, Load];
        if rev.is_v31_or_later() {
            seq.push(FixedShunt);
        }
        seq.extend([
            Generator,
            Branch,
            Transformer,
            AreaInterchange,
            TwoTerminalDc,
            VscDc,
        ]);
        if !rev.is_v31_or_later() {
            seq.push(SwitchedShunt);
        }
        seq.extend([
            ImpedanceCorrection,
            MultiTerminalDc,
            MultiSectionLine,
            Zone,
            InterareaTransfer,
            Owner,
            Facts,
        ]);
        if rev.is_v31_or_later() {
            seq.push(SwitchedShunt);
        }
        seq
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Data sections of an optimal power flow raw data file, following the data
/// modification code record.
pub const OPF_SECTIONS: [&str; 16] = [
    "bus voltage attribute",
    "adjustable bus shunt",
    "bus load",
    "adjustable bus load table",
    "generator dispatch",
    "active power dispatch table",
    "generation reserve",
    "generation reactive capability",
    "adjustable branch reactance",
    "piecewise linear cost table",
    "piecewise quadratic cost table",
    "polynomial and exponential cost table",
    "period reserve constraint",
    "branch flow constraint",
    "interface flow constraint",
    "linear constraint dependency",
];
