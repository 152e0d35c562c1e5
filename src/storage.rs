//! Trend files: one row per build.
//!
//! CSV header:
//! `build,instruction_missed,instruction_covered,branch_missed,branch_covered,...,line_missed,line_covered`.
//! A metric whose two cells are empty has no reading for that build.

use crate::models::{BuildCoverage, Coverage, CoverageObject};
use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, WriterBuilder};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Flat CSV row.
#[derive(Debug, Default, Serialize, Deserialize)]
struct TrendRow {
    build: String,
    instruction_missed: Option<u64>,
    instruction_covered: Option<u64>,
    branch_missed: Option<u64>,
    branch_covered: Option<u64>,
    complexity_missed: Option<u64>,
    complexity_covered: Option<u64>,
    method_missed: Option<u64>,
    method_covered: Option<u64>,
    class_missed: Option<u64>,
    class_covered: Option<u64>,
    line_missed: Option<u64>,
    line_covered: Option<u64>,
}

fn pair(missed: Option<u64>, covered: Option<u64>) -> Option<Coverage> {
    match (missed, covered) {
        (None, None) => None,
        (m, c) => Some(Coverage::new(m.unwrap_or(0), c.unwrap_or(0))),
    }
}

fn split(c: Option<Coverage>) -> (Option<u64>, Option<u64>) {
    c.map_or((None, None), |c| (Some(c.missed), Some(c.covered)))
}

impl From<TrendRow> for BuildCoverage {
    fn from(r: TrendRow) -> Self {
        BuildCoverage::new(
            r.build,
            CoverageObject {
                instruction: pair(r.instruction_missed, r.instruction_covered),
                branch: pair(r.branch_missed, r.branch_covered),
                complexity: pair(r.complexity_missed, r.complexity_covered),
                method: pair(r.method_missed, r.method_covered),
                class: pair(r.class_missed, r.class_covered),
                line: pair(r.line_missed, r.line_covered),
            },
        )
    }
}

impl From<&BuildCoverage> for TrendRow {
    fn from(b: &BuildCoverage) -> Self {
        let c = &b.coverage;
        let (instruction_missed, instruction_covered) = split(c.instruction);
        let (branch_missed, branch_covered) = split(c.branch);
        let (complexity_missed, complexity_covered) = split(c.complexity);
        let (method_missed, method_covered) = split(c.method);
        let (class_missed, class_covered) = split(c.class);
        let (line_missed, line_covered) = split(c.line);
        TrendRow {
            build: b.build.clone(),
            instruction_missed,
            instruction_covered,
            branch_missed,
            branch_covered,
            complexity_missed,
            complexity_covered,
            method_missed,
            method_covered,
            class_missed,
            class_covered,
            line_missed,
            line_covered,
        }
    }
}

/// Load builds from CSV with header.
pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Vec<BuildCoverage>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    let mut out = Vec::new();
    for (i, row) in rdr.deserialize::<TrendRow>().enumerate() {
        let row = row.with_context(|| format!("{}: row {}", path.display(), i + 1))?;
        out.push(BuildCoverage::from(row));
    }
    debug!("loaded {} build(s) from {}", out.len(), path.display());
    Ok(out)
}

/// Load builds from a JSON array of `BuildCoverage`.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<BuildCoverage>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let builds: Vec<BuildCoverage> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    debug!("loaded {} build(s) from {}", builds.len(), path.display());
    Ok(builds)
}

/// Load by extension: `.json` as JSON, `.csv` as CSV.
pub fn load_trend<P: AsRef<Path>>(path: P) -> Result<Vec<BuildCoverage>> {
    let path = path.as_ref();
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        other => bail!(
            "unsupported trend file {} (extension {:?}, expected .csv or .json)",
            path.display(),
            other.unwrap_or("")
        ),
    }
}

/// Save builds as CSV with header.
pub fn save_csv<P: AsRef<Path>>(builds: &[BuildCoverage], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    for b in builds {
        wtr.serialize(TrendRow::from(b))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save builds as pretty JSON array.
pub fn save_json<P: AsRef<Path>>(builds: &[BuildCoverage], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(builds)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
