use strum::EnumCount;

use crate::category::Category;
use crate::error::{Error, Result};

pub(crate) type Scores = [i64; Category::COUNT];

/// One student's row in the ledger.
///
/// Scores are only changed through the ledger, which keeps `total` equal to
/// the sum of all category scores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    id: String,
    name: String,
    scores: Scores,
    total: i64,
}

impl StudentRecord {
    pub(crate) fn new(id: String, name: String) -> Self {
        Self {
            id,
            name,
            scores: [0; Category::COUNT],
            total: 0,
        }
    }

    /// Build a record from stored scores, recomputing the total.
    pub(crate) fn from_scores(id: String, name: String, scores: Scores) -> Result<Self> {
        let total = sum_scores(&scores).ok_or_else(|| {
            Error::MalformedData(format!("total of student {} exceeds the integer range", id))
        })?;
        Ok(Self {
            id,
            name,
            scores,
            total,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self, category: Category) -> i64 {
        self.scores[category.index()]
    }

    /// Category scores in display order.
    pub fn scores(&self) -> impl Iterator<Item = (Category, i64)> + '_ {
        Category::all().map(|category| (category, self.score(category)))
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Add `delta` to one category and recompute the total.
    ///
    /// On overflow the record is left unchanged.
    pub(crate) fn add(&mut self, category: Category, delta: i64) -> Result<()> {
        let mut scores = self.scores;
        let overflow = || Error::ScoreOverflow {
            id: self.id.clone(),
            category,
        };

        let slot = &mut scores[category.index()];
        *slot = slot.checked_add(delta).ok_or_else(overflow)?;
        let total = sum_scores(&scores).ok_or_else(overflow)?;

        self.scores = scores;
        self.total = total;
        Ok(())
    }
}

fn sum_scores(scores: &Scores) -> Option<i64> {
    scores
        .iter()
        .try_fold(0i64, |acc, &score| acc.checked_add(score))
}
