//! Line scanner for free-text streaming mutation reports.
//!
//! The report grammar is:
//!
//! ```text
//! Mutation points = <N>, ...
//! <kill characters>
//! <kill characters>M <diagnostic>
//! ...
//! Score: <P>%
//! ```
//!
//! Kill characters are `.` (killed) and `T` (timed out); `M` marks a mutant the
//! tests did not detect. The scanner is an explicit three-state machine whose
//! per-line transition is a pure function of the current state and the line's
//! kind, so every edge of the grammar can be tested on its own.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::{TargetError, Verdict};

pub const KILLED_CHAR: char = '.';
pub const TIMEOUT_CHAR: char = 'T';
pub const FAILURE_CHAR: char = 'M';

// Both are anchored so a failure diagnostic quoting them stays a kill run
static ANNOUNCEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*Mutation points = ([0-9]+),").unwrap());
static SCORE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:Jumble )?Score: ([0-9]+)%").unwrap());
static KILL_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[.T]+$").unwrap());
static KILL_RUN_WITH_FAILURE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([.T]*M)(?:\s+(.*))?$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Seeking,
    Collecting,
    Done,
}

/// What a single report line is, independent of scanner state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Announcement(usize),
    KillRun(&'a str),
    KillRunWithFailure { run: &'a str, diagnostic: &'a str },
    Score(u32),
    Other,
}

/// Effect of a transition on the accumulated scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action<'a> {
    SetTotal(usize),
    Append(&'a str),
    AppendFailure { run: &'a str, diagnostic: &'a str },
    SetScore(u32),
    Ignore,
}

pub fn classify_line(line: &str) -> LineKind<'_> {
    let line = line.trim_end();
    if let Some(caps) = ANNOUNCEMENT.captures(line) {
        if let Ok(n) = caps[1].parse() {
            return LineKind::Announcement(n);
        }
    }
    if let Some(caps) = SCORE.captures(line) {
        if let Ok(p) = caps[1].parse() {
            return LineKind::Score(p);
        }
    }
    if KILL_RUN.is_match(line) {
        return LineKind::KillRun(line);
    }
    if let Some(caps) = KILL_RUN_WITH_FAILURE.captures(line) {
        let run = caps.get(1).map_or("", |m| m.as_str());
        let diagnostic = caps.get(2).map_or("", |m| m.as_str());
        return LineKind::KillRunWithFailure { run, diagnostic };
    }
    LineKind::Other
}

pub fn transition<'a>(state: ScanState, line: &LineKind<'a>) -> (ScanState, Action<'a>) {
    match (state, line) {
        (ScanState::Seeking, LineKind::Announcement(n)) => {
            (ScanState::Collecting, Action::SetTotal(*n))
        }
        (ScanState::Seeking, _) => (ScanState::Seeking, Action::Ignore),
        (ScanState::Collecting, LineKind::KillRun(run)) => {
            (ScanState::Collecting, Action::Append(*run))
        }
        (ScanState::Collecting, LineKind::KillRunWithFailure { run, diagnostic }) => (
            ScanState::Collecting,
            Action::AppendFailure {
                run: *run,
                diagnostic: *diagnostic,
            },
        ),
        // The score line usually follows the data directly; it both ends
        // collection and is the one score reading.
        (ScanState::Collecting, LineKind::Score(p)) => {
            (ScanState::Done, Action::SetScore(*p))
        }
        (ScanState::Collecting, _) => (ScanState::Done, Action::Ignore),
        (ScanState::Done, LineKind::Score(p)) => (ScanState::Done, Action::SetScore(*p)),
        (ScanState::Done, _) => (ScanState::Done, Action::Ignore),
    }
}

/// Accepted result of scanning one report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamingReport {
    pub total: usize,
    /// The character run exactly as it appeared in the report
    pub raw_sequence: String,
    /// Failure diagnostics in emission order
    pub diagnostics: Vec<String>,
    /// The engine's own `Score: P%` figure
    pub reported_percent: u32,
}

impl StreamingReport {
    pub fn verdicts(&self) -> Vec<Verdict> {
        self.raw_sequence.chars().map(symbol_verdict).collect()
    }

    /// Killed count implied by the engine's own score line, rounded half up
    pub fn reported_killed(&self) -> usize {
        ((self.total as f64) * (self.reported_percent as f64) / 100.0 + 0.5).floor() as usize
    }
}

fn symbol_verdict(c: char) -> Verdict {
    match c {
        KILLED_CHAR => Verdict::Killed,
        TIMEOUT_CHAR => Verdict::TimedOut,
        FAILURE_CHAR => Verdict::Survived,
        _ => Verdict::Unparseable,
    }
}

#[derive(Debug, Clone)]
pub struct Scanner {
    state: ScanState,
    announced: Option<usize>,
    sequence: String,
    diagnostics: Vec<String>,
    reported_percent: Option<u32>,
}

impl Default for Scanner {
    fn default() -> Self {
        Self::new()
    }
}

impl Scanner {
    pub fn new() -> Self {
        Self {
            state: ScanState::Seeking,
            announced: None,
            sequence: String::new(),
            diagnostics: Vec::new(),
            reported_percent: None,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn feed(&mut self, line: &str) {
        let kind = classify_line(line);
        let (next, action) = transition(self.state, &kind);
        self.state = next;
        match action {
            Action::SetTotal(n) => self.announced = Some(n),
            Action::Append(run) => self.sequence.push_str(run),
            Action::AppendFailure { run, diagnostic } => {
                self.sequence.push_str(run);
                self.diagnostics.push(diagnostic.to_string());
            }
            Action::SetScore(p) => {
                if self.reported_percent.is_none() {
                    self.reported_percent = Some(p);
                }
            }
            Action::Ignore => {}
        }
    }

    /// Validate what was collected. The parse is only accepted when the
    /// number of result characters equals the announced count and the
    /// engine's score line was seen.
    pub fn finish(self) -> Result<StreamingReport, TargetError> {
        let Some(total) = self.announced else {
            return Err(TargetError::MalformedReport(
                "no `Mutation points = N` line found".to_string(),
            ));
        };
        let parsed = self.sequence.chars().count();
        if parsed != total {
            return Err(TargetError::MalformedReport(format!(
                "announced {total} mutation points but parsed {parsed} results ({:?})",
                self.sequence
            )));
        }
        let Some(percent) = self.reported_percent else {
            return Err(TargetError::MalformedReport(
                "no `Score: P%` line found".to_string(),
            ));
        };
        Ok(StreamingReport {
            total,
            raw_sequence: self.sequence,
            diagnostics: self.diagnostics,
            reported_percent: percent,
        })
    }
}

/// Scan a complete report text.
pub fn scan(text: &str) -> Result<StreamingReport, TargetError> {
    let mut scanner = Scanner::new();
    for line in text.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}
