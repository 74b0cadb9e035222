use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Canonical outcome of running a test suite against one mutant.
///
/// Every engine's raw output is mapped into this vocabulary before any
/// counting happens. Scores are derived exclusively from
/// [`Verdict::counts_as_killed`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Verdict {
    Killed,
    Survived,
    NoCoverage,
    TimedOut,
    MemoryError,
    RuntimeError,
    Unparseable,
}

impl Verdict {
    /// Whether this outcome means the suite detected the mutant.
    pub fn counts_as_killed(&self) -> bool {
        match self {
            Verdict::Killed | Verdict::TimedOut | Verdict::MemoryError | Verdict::RuntimeError => {
                true
            }
            Verdict::Survived | Verdict::NoCoverage | Verdict::Unparseable => false,
        }
    }

    /// One-character form used in verdict sequences on the console
    pub fn symbol(&self) -> char {
        match self {
            Verdict::Killed => '.',
            Verdict::Survived => 'S',
            Verdict::NoCoverage => 'N',
            Verdict::TimedOut => 'T',
            Verdict::MemoryError => 'O',
            Verdict::RuntimeError => 'X',
            Verdict::Unparseable => '?',
        }
    }

    /// Colored form of the status name for table output
    pub fn display(&self) -> String {
        let text = self.to_string();
        if self.counts_as_killed() {
            console::style(text).green().to_string()
        } else if *self == Verdict::Unparseable {
            console::style(text).yellow().to_string()
        } else {
            console::style(text).red().to_string()
        }
    }
}

/// Number of verdicts in `verdicts` that count as killed.
pub fn killed_count(verdicts: &[Verdict]) -> usize {
    verdicts.iter().filter(|v| v.counts_as_killed()).count()
}

/// Render a verdict sequence as its symbol string.
pub fn render_sequence(verdicts: &[Verdict]) -> String {
    verdicts.iter().map(Verdict::symbol).collect()
}
