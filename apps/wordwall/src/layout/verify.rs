//! Layout self-check: every input sentence must be traceable through the finished grid
//! with a contiguous search.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::layout::error::VerifyError;
use crate::layout::grid::Grid;
use crate::layout::search::{search, MatchMode, SearchStatus};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyMiss {
    pub sentence: String,
    pub word_index: usize,
    pub missing: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyReport {
    /// Number of sentences traced in full.
    pub traced: usize,
    pub misses: Vec<VerifyMiss>,
}

impl VerifyReport {
    pub fn is_clean(&self) -> bool {
        self.misses.is_empty()
    }

    /// Converts the first miss into a [`VerifyError`].
    pub fn into_result(self) -> Result<usize, VerifyError> {
        match self.misses.into_iter().next() {
            None => Ok(self.traced),
            Some(miss) => Err(VerifyError::Unreachable {
                sentence: miss.sentence,
                missing: miss.missing,
            }),
        }
    }
}

/// Searches each sentence against `grid` and collects the ones that cannot be traced.
pub fn verify_sentences<I, S>(grid: &Grid, sentences: I, case_insensitive: bool) -> VerifyReport
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut report = VerifyReport::default();

    for sentence in sentences {
        let sentence = sentence.as_ref();
        if sentence.trim().is_empty() {
            continue;
        }
        let outcome = search(grid, sentence, MatchMode::Contiguous, case_insensitive);
        match outcome.status {
            SearchStatus::Complete => report.traced += 1,
            SearchStatus::Incomplete {
                word_index,
                missing,
            } => {
                warn!(sentence, word_index, missing = %missing, "Sentence not traceable in grid");
                report.misses.push(VerifyMiss {
                    sentence: sentence.to_string(),
                    word_index,
                    missing,
                });
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_report_for_traceable_sentences() {
        let grid = Grid::from_lines(["JTlovesKira", "lovesJT"]);
        let report = verify_sentences(&grid, ["JT loves Kira", "Kira loves JT"], false);
        assert!(report.is_clean());
        assert_eq!(report.traced, 2);
        assert_eq!(report.into_result().unwrap(), 2);
    }

    #[test]
    fn test_miss_is_reported_with_the_token() {
        let grid = Grid::from_lines(["JTlovesKira"]);
        let report = verify_sentences(&grid, ["JT loves Kira", "Kira loves JT", ""], false);
        assert_eq!(report.traced, 1);
        assert_eq!(report.misses.len(), 1);
        assert_eq!(report.misses[0].missing, "loves");
        assert_eq!(report.misses[0].word_index, 1);

        let err = report.into_result().unwrap_err();
        assert!(err.to_string().contains("\"loves\""));
    }

    #[test]
    fn test_case_insensitive_verification() {
        let grid = Grid::from_lines(["JTLOVESKIRA"]);
        assert!(verify_sentences(&grid, ["jt loves kira"], true).is_clean());
        assert!(!verify_sentences(&grid, ["jt loves kira"], false).is_clean());
    }
}
