use crate::debug::format_f64;
use crate::idx::{BRANCH_COLS, BUS_COLS, GEN_COLS};
use crate::mpc::{CaseData, Value};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Persists named case data.
pub trait CaseWriter {
    fn write_case(&self, w: &mut dyn Write, data: &CaseData) -> io::Result<()>;
}

/// MATPOWER case file (`.m`), a function returning the `mpc` struct.
pub struct MFile {
    pub function: String,
    pub title: String,
}

impl MFile {
    pub fn new(function: &str, title: &str) -> Self {
        Self {
            function: function_name(function),
            title: title.to_string(),
        }
    }
}

impl CaseWriter for MFile {
    fn write_case(&self, w: &mut dyn Write, data: &CaseData) -> io::Result<()> {
        writeln!(w, "function mpc = {}", self.function)?;
        if self.title.is_empty() {
            writeln!(w, "%{}", self.function.to_uppercase())?;
        } else {
            writeln!(w, "%{}  {}", self.function.to_uppercase(), self.title)?;
        }
        writeln!(w)?;
        writeln!(w, "%% MATPOWER Case Format : Version 2")?;
        writeln!(w, "mpc.version = '2';")?;

        for (key, value) in data.iter() {
            writeln!(w)?;
            match value {
                Value::Scalar(v) => writeln!(w, "mpc.{} = {};", key, format_f64(*v))?,
                Value::Table(t) if t.is_empty() => match table_width(key) {
                    Some(n) => writeln!(w, "mpc.{} = zeros(0, {});", key, n)?,
                    None => writeln!(w, "mpc.{} = [];", key)?,
                },
                Value::Table(t) => {
                    writeln!(w, "mpc.{} = [", key)?;
                    for row in t {
                        let items: Vec<String> = row.iter().map(|v| format_f64(*v)).collect();
                        writeln!(w, "\t{};", items.join("\t"))?;
                    }
                    writeln!(w, "];")?;
                }
            }
        }
        Ok(())
    }
}

fn table_width(key: &str) -> Option<usize> {
    match key {
        "bus" => Some(BUS_COLS),
        "gen" => Some(GEN_COLS),
        "branch" => Some(BRANCH_COLS),
        _ => None,
    }
}

/// Returns a valid MATLAB function name for `s`.
fn function_name(s: &str) -> String {
    let name: String = s
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => name,
        _ => format!("case_{}", name),
    }
}

/// JSON document with the case data under an `mpc` key.
pub struct Json;

#[derive(Serialize)]
struct MpcDocument<'a> {
    mpc: &'a CaseData,
}

impl CaseWriter for Json {
    fn write_case(&self, w: &mut dyn Write, data: &CaseData) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *w, &MpcDocument { mpc: data })?;
        writeln!(w)
    }
}

/// Saves case data to `path`. The format is chosen by the file extension:
/// `.json` for JSON, otherwise a MATPOWER case file.
pub fn save_case(path: &Path, data: &CaseData, title: &str) -> io::Result<()> {
    let is_json = path
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

    let writer: Box<dyn CaseWriter> = if is_json {
        Box::new(Json)
    } else {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Box::new(MFile::new(&stem, title))
    };

    let mut w = BufWriter::new(File::create(path)?);
    writer.write_case(&mut w, data)?;
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn case() -> CaseData {
        let mut data = CaseData::new();
        data.insert_if_absent("baseMVA", Value::Scalar(100.0));
        data.insert_if_absent(
            "bus",
            Value::Table(vec![vec![1.0, 3.0, 50.0, 20.0, 0.0, 0.0, 1.0, 1.0, 0.0, 138.0, 1.0, 1.1, 0.9]]),
        );
        data.insert_if_absent("gen", Value::Table(vec![]));
        data
    }

    #[test]
    fn test_mfile() -> anyhow::Result<()> {
        let mut buf = Vec::new();
        MFile::new("ieee14", "IEEE 14 BUS").write_case(&mut buf, &case())?;
        let s = String::from_utf8(buf)?;

        assert!(s.starts_with("function mpc = ieee14\n%IEEE14  IEEE 14 BUS\n"));
        assert!(s.contains("mpc.baseMVA = 100;\n"));
        assert!(s.contains("mpc.bus = [\n\t1\t3\t50\t20\t0\t0\t1\t1\t0\t138\t1\t1.1\t0.9;\n];\n"));
        assert!(s.contains("mpc.gen = zeros(0, 21);\n"));
        Ok(())
    }

    #[test]
    fn test_function_name() {
        assert_eq!(function_name("case-30"), "case_30");
        assert_eq!(function_name("118bus"), "case_118bus");
    }

    #[test]
    fn test_save_json() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("case.json");

        save_case(&path, &case(), "")?;

        let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&path)?)?;
        assert_eq!(v["mpc"]["baseMVA"], 100.0);
        assert_eq!(v["mpc"]["bus"][0][2], 50.0);
        assert_eq!(v["mpc"]["gen"].as_array().map(|a| a.len()), Some(0));
        Ok(())
    }

    #[test]
    fn test_save_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("case.m");
        assert!(save_case(&path, &case(), "").is_err());
    }
}
