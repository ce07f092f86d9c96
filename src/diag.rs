use serde::Serialize;

/// Severity of a conversion issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Record imported, but part of its data was not applied.
    Warning,
    /// Record could not be imported and was dropped.
    Error,
}

/// A single issue recorded while converting a raw data file.
#[derive(Debug, Clone, Serialize)]
pub struct Issue {
    pub severity: Severity,
    /// Section the issue was found in, e.g. "load".
    pub section: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// Record counts per parsed section.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Stats {
    pub buses: usize,
    pub loads: usize,
    pub generators: usize,
    pub branches: usize,
    pub switched_shunts: usize,
    pub skipped_records: usize,
}

/// Diagnostics sink passed through the parser.
///
/// Every issue is also emitted through the `log` facade, so callers that
/// only configure a logger still see them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Diagnostics {
    pub stats: Stats,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<Issue>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warn(&mut self, section: &str, line: Option<usize>, message: String) {
        log::warn!("{}", message);
        self.push(Severity::Warning, section, line, message);
    }

    pub fn error(&mut self, section: &str, line: Option<usize>, message: String) {
        log::error!("{}", message);
        self.push(Severity::Error, section, line, message);
    }

    fn push(&mut self, severity: Severity, section: &str, line: Option<usize>, message: String) {
        self.issues.push(Issue {
            severity,
            section: section.to_string(),
            message,
            line,
        });
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }

    /// Appends the issues of another conversion step (e.g. the OPF file).
    pub fn merge(&mut self, other: Diagnostics) {
        self.stats.skipped_records += other.stats.skipped_records;
        self.issues.extend(other.issues);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let mut diag = Diagnostics::new();
        assert!(!diag.has_issues());

        diag.warn("load", Some(4), "constant current load ignored".to_string());
        diag.error("generator", Some(9), "bus [7] not found".to_string());
        diag.warn("load", None, "load not scaled".to_string());

        assert_eq!(diag.warning_count(), 2);
        assert_eq!(diag.error_count(), 1);
        assert_eq!(diag.errors().next().unwrap().line, Some(9));
    }

    #[test]
    fn test_serialize() -> anyhow::Result<()> {
        let mut diag = Diagnostics::new();
        diag.stats.buses = 3;
        diag.warn("load", Some(12), "load at bus 1 not scaled".to_string());

        let json = serde_json::to_string(&diag)?;
        assert!(json.contains("\"buses\":3"));
        assert!(json.contains("\"severity\":\"warning\""));
        assert!(json.contains("\"line\":12"));
        Ok(())
    }
}
