//! Fixture-based regression runner
//!
//! A fixture is a `.txt` file holding one sentence, possibly wrapped over several lines.
//! Fixtures live in two directories, one for sentences the grammar must accept and one
//! for sentences it must reject. The runner parses every fixture, compares the verdict
//! with the expectation and tallies the results.
//!
//! Reading a fixture is the only thing here that can fail; a rejected sentence is just a
//! case outcome.

use crate::svo::parsing::{ParseResult, Parser};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Errors that can occur while reading fixtures
#[derive(Debug, Clone, PartialEq)]
pub enum FixtureError {
    Io { path: PathBuf, message: String },
}

impl fmt::Display for FixtureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FixtureError::Io { path, message } => {
                write!(f, "Failed to read fixture {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for FixtureError {}

fn io_error(path: &Path, err: std::io::Error) -> FixtureError {
    FixtureError::Io {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

/// Read a fixture, joining its non-empty lines with single spaces
pub fn load_sentence(path: impl AsRef<Path>) -> Result<String, FixtureError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| io_error(path, e))?;
    Ok(join_lines(&text))
}

/// Join the non-empty trimmed lines of `text` with single spaces
pub fn join_lines(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// The `.txt` files of a directory, sorted by path
///
/// A missing directory has no fixtures.
pub fn files_in(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>, FixtureError> {
    let dir = dir.as_ref();
    if !dir.exists() {
        log::debug!("fixture directory {} does not exist", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| io_error(dir, e))? {
        let path = entry.map_err(|e| io_error(dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// What a fixture expects of the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expectation {
    Accept,
    Reject,
}

impl Expectation {
    pub fn is_met_by(self, accepted: bool) -> bool {
        match self {
            Expectation::Accept => accepted,
            Expectation::Reject => !accepted,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Expectation::Accept => "OK",
            Expectation::Reject => "FAIL",
        }
    }
}

/// Result of running one fixture
#[derive(Debug, Clone)]
pub struct CaseOutcome {
    pub path: PathBuf,
    pub sentence: String,
    pub expectation: Expectation,
    pub result: ParseResult,
}

impl CaseOutcome {
    pub fn passed(&self) -> bool {
        self.expectation.is_met_by(self.result.accepted)
    }

    /// File name of the fixture
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.passed() { "PASS" } else { "FAIL" };
        let actual = if self.result.accepted { "OK" } else { "FAIL" };
        write!(
            f,
            "[{}] expect={:4} actual={} :: {}",
            status,
            self.expectation.label(),
            actual,
            self.name()
        )
    }
}

/// Outcomes of one or more suites
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub cases: Vec<CaseOutcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|case| case.passed()).count()
    }

    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn all_passed(&self) -> bool {
        self.passed() == self.total()
    }

    pub fn failures(&self) -> impl Iterator<Item = &CaseOutcome> {
        self.cases.iter().filter(|case| !case.passed())
    }

    /// Append the cases of another report
    pub fn merge(&mut self, other: SuiteReport) {
        self.cases.extend(other.cases);
    }

    pub fn summary(&self) -> Summary {
        Summary {
            passed: self.passed(),
            total: self.total(),
        }
    }
}

/// Pass count over total, printed as the closing line of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub passed: usize,
    pub total: usize,
}

impl Summary {
    /// Whole percentage, ties rounded to even (1/8 is 12%, 3/8 is 38%)
    pub fn percent(&self) -> usize {
        if self.total == 0 {
            return 0;
        }
        let ratio = self.passed as f64 / self.total as f64;
        (ratio * 100.0).round_ties_even() as usize
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.total == 0 {
            return write!(f, "No test cases were executed (check directories).");
        }
        write!(
            f,
            "Summary: {}/{} cases passed ({}%).",
            self.passed,
            self.total,
            self.percent()
        )
    }
}

/// Parse every fixture in `paths` and check it against `expectation`
pub fn run_suite<P: AsRef<Path>>(
    parser: &Parser,
    paths: &[P],
    expectation: Expectation,
) -> Result<SuiteReport, FixtureError> {
    let mut report = SuiteReport::default();
    for path in paths {
        let path = path.as_ref();
        let sentence = load_sentence(path)?;
        let result = parser.parse(&sentence);
        let case = CaseOutcome {
            path: path.to_path_buf(),
            sentence,
            expectation,
            result,
        };
        log::debug!("{}", case);
        report.cases.push(case);
    }
    Ok(report)
}
