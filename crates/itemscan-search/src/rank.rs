//! Per-template counts and winner selection.

use serde::{Deserialize, Serialize};

/// De-duplicated match count of one template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCount {
    pub name: String,
    pub count: usize,
}

/// Per-template counts of one recognition pass, in catalog order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub counts: Vec<TemplateCount>,
}

/// The winning (template, count) pair of one recognition pass.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub name: String,
    pub count: usize,
}

impl MatchResult {
    /// Count for a template by name.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|tc| tc.name == name)
            .map(|tc| tc.count)
    }

    /// Largest count in the result; 0 when the result is empty.
    pub fn max_count(&self) -> usize {
        self.counts.iter().map(|tc| tc.count).max().unwrap_or(0)
    }

    /// Pick the winning template with a left-to-right strict-greater scan.
    ///
    /// The scan starts from index 0 with a baseline count of 0, so ties
    /// keep the earlier catalog entry and an all-zero pass returns the
    /// first entry with count 0. Callers needing different tie-break
    /// semantics should post-process `counts` instead.
    pub fn select_best(&self) -> Option<ClassificationResult> {
        if self.counts.is_empty() {
            return None;
        }
        let mut best_index = 0usize;
        let mut best_count = 0usize;
        for (index, tc) in self.counts.iter().enumerate() {
            if tc.count > best_count {
                best_count = tc.count;
                best_index = index;
            }
        }
        let winner = &self.counts[best_index];
        Some(ClassificationResult {
            name: winner.name.clone(),
            count: winner.count,
        })
    }
}
