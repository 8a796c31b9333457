use serde::Serialize;

use crate::model::{SchoolRecord, FACILITY_COUNT, STATUS_PROPER, STATUS_SIMPLE};

pub const WEIGHT_PROPER: u32 = 100;
pub const WEIGHT_SIMPLE: u32 = 70;

/// Scores at or above this count as highly accessible.
pub const HIGH_THRESHOLD: u8 = 70;
pub const MEDIUM_THRESHOLD: u8 = 50;

/// Integer division rounding half up, matching `Math.round` on non-negative
/// values.
fn round_div(numerator: u64, denominator: u64) -> u64 {
    (2 * numerator + denominator) / (2 * denominator)
}

/// `round((proper * 100 + simple * 70) / 11)`. Unknown statuses count as 0.
pub fn accessibility_score(statuses: &[&str; FACILITY_COUNT]) -> u8 {
    let points: u32 = statuses
        .iter()
        .map(|s| match s.trim() {
            STATUS_PROPER => WEIGHT_PROPER,
            STATUS_SIMPLE => WEIGHT_SIMPLE,
            _ => 0,
        })
        .sum();
    round_div(u64::from(points), FACILITY_COUNT as u64) as u8
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn of(score: u8) -> Self {
        if score >= HIGH_THRESHOLD {
            ScoreBand::High
        } else if score >= MEDIUM_THRESHOLD {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn css_class(self) -> &'static str {
        match self {
            ScoreBand::High => "score-high",
            ScoreBand::Medium => "score-medium",
            ScoreBand::Low => "score-low",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct DirectoryStats {
    pub total: usize,
    /// `None` when no record carries a score.
    pub mean_score: Option<u8>,
    pub high_count: usize,
}

impl DirectoryStats {
    pub fn compute(records: &[SchoolRecord]) -> Self {
        let scores: Vec<u8> = records.iter().filter_map(|r| r.score).collect();
        let mean_score = if scores.is_empty() {
            None
        } else {
            let sum: u64 = scores.iter().map(|&s| u64::from(s)).sum();
            Some(round_div(sum, scores.len() as u64) as u8)
        };
        Self {
            total: records.len(),
            mean_score,
            high_count: scores.iter().filter(|&&s| s >= HIGH_THRESHOLD).count(),
        }
    }

    pub fn mean_display(&self) -> String {
        match self.mean_score {
            Some(mean) => mean.to_string(),
            None => "N/A".to_string(),
        }
    }
}
