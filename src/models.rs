use serde::{Deserialize, Serialize};

/// One coverage reading: how many items of a kind were missed and covered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coverage {
    pub missed: u64,
    pub covered: u64,
}

impl Coverage {
    pub fn new(missed: u64, covered: u64) -> Self {
        Self { missed, covered }
    }

    /// Saturates at `u64::MAX`; counts come from user files.
    pub fn total(&self) -> u64 {
        self.missed.saturating_add(self.covered)
    }

    /// Covered share in percent. An empty reading counts as fully covered.
    pub fn percentage_float(&self) -> f32 {
        if self.missed == 0 && self.covered == 0 {
            return 100.0;
        }
        let covered = self.covered as f64;
        (100.0 * covered / (self.missed as f64 + covered)) as f32
    }
}

/// Anything that carries coverage readings (a build, a package, a source file).
/// Readings the coverage tool did not report stay `None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageObject {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instruction: Option<Coverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<Coverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub complexity: Option<Coverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<Coverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<Coverage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<Coverage>,
}

/// One point of a coverage trend (one row = one build).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildCoverage {
    pub build: String,
    #[serde(default)]
    pub coverage: CoverageObject,
}

impl BuildCoverage {
    pub fn new(build: impl Into<String>, coverage: CoverageObject) -> Self {
        Self {
            build: build.into(),
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_of_partial_reading() {
        let c = Coverage::new(1, 3);
        assert_eq!(c.total(), 4);
        assert!((c.percentage_float() - 75.0).abs() < 1e-6);
    }

    #[test]
    fn empty_reading_is_fully_covered() {
        assert_eq!(Coverage::default().percentage_float(), 100.0);
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        let c = Coverage::new(u64::MAX, 1);
        assert_eq!(c.total(), u64::MAX);
        assert!(c.percentage_float() < 1e-6);

        let all = Coverage::new(0, u64::MAX);
        assert_eq!(all.percentage_float(), 100.0);
        let half = Coverage::new(u64::MAX / 2, u64::MAX / 2);
        assert!((half.percentage_float() - 50.0).abs() < 1e-4);
    }

    #[test]
    fn absent_readings_deserialize_as_none() {
        let b: BuildCoverage =
            serde_json::from_str(r##"{"build":"#7","coverage":{"line":{"missed":2,"covered":8}}}"##)
                .unwrap();
        assert_eq!(b.coverage.line, Some(Coverage::new(2, 8)));
        assert!(b.coverage.branch.is_none());
    }
}
