//! DQI breakdown into five fixed quality categories.
//!
//! Each category score is `max(0, base + offset + r)` where `base` is the
//! site DQI and `r` is drawn from `[0, range)` by a [`ScoreSource`]. With
//! [`RandomScoreSource::from_entropy`] two calls for the same site can return
//! different scores; seed the source or use [`FixedScoreSource`] to pin them.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use trialdqi_common::Site;

pub const MAX_SCORE: i32 = 100;

/// Supplier of the per-category random term.
pub trait ScoreSource: Send + Sync {
    /// Draw a value in `[0, range)`. `range == 0` yields 0.
    fn sample(&self, range: u32) -> i32;
}

// ── rand-backed source ─────────────────────────────────────────────────────

pub struct RandomScoreSource {
    rng: Mutex<StdRng>,
}

impl RandomScoreSource {
    pub fn from_entropy() -> Self {
        Self { rng: Mutex::new(StdRng::from_entropy()) }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: Mutex::new(StdRng::seed_from_u64(seed)) }
    }
}

impl Default for RandomScoreSource {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl ScoreSource for RandomScoreSource {
    fn sample(&self, range: u32) -> i32 {
        if range == 0 {
            return 0;
        }
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..range) as i32
    }
}

// ── Fixed source for tests and previews ────────────────────────────────────

/// Always returns the same draw, clamped into `[0, range)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedScoreSource {
    value: u32,
}

impl FixedScoreSource {
    pub fn new(value: u32) -> Self {
        Self { value }
    }

    /// Highest possible draw for every category.
    pub fn max() -> Self {
        Self { value: u32::MAX }
    }
}

impl ScoreSource for FixedScoreSource {
    fn sample(&self, range: u32) -> i32 {
        self.value.min(range.saturating_sub(1)) as i32
    }
}

// ── Categories ─────────────────────────────────────────────────────────────

/// Offset and random spread of one breakdown category.
#[derive(Debug, Clone, Copy)]
pub struct CategoryDef {
    pub label: &'static str,
    pub offset: i32,
    pub range: u32,
}

impl CategoryDef {
    /// Inclusive score envelope for a base DQI.
    pub fn envelope(&self, base: i32) -> (i32, i32) {
        let low = (base + self.offset).max(0);
        let high = (base + self.offset + self.range as i32 - 1).max(0);
        (low, high)
    }
}

pub const CATEGORIES: [CategoryDef; 5] = [
    CategoryDef { label: "Safety & SAE Issues",           offset: -10, range: 20 },
    CategoryDef { label: "Visit Compliance",              offset: -5,  range: 15 },
    CategoryDef { label: "Query & Data Completeness",     offset: 0,   range: 10 },
    CategoryDef { label: "Coding & Regulatory Readiness", offset: -8,  range: 18 },
    CategoryDef { label: "Verification & Signatures",     offset: -3,  range: 12 },
];

const CODING_ISSUE_BELOW: i32 = 60;
const VERIFICATION_ISSUE_BELOW: i32 = 70;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DqiBreakdown {
    pub category: String,
    pub score: i32,
    pub max_score: i32,
    pub issues: Vec<String>,
}

fn category_issues(index: usize, site: &Site) -> Vec<String> {
    let issue = match index {
        0 if site.pending_saes > 0 => Some(format!("{} pending SAE reviews", site.pending_saes)),
        1 if site.overdue_visits > 0 => Some(format!("{} overdue visits", site.overdue_visits)),
        2 if site.open_queries > 10 => {
            Some(format!("{} open queries require attention", site.open_queries))
        }
        3 if site.dqi < CODING_ISSUE_BELOW => Some("MedDRA coding incomplete".to_string()),
        4 if site.dqi < VERIFICATION_ISSUE_BELOW => Some("PI signatures pending".to_string()),
        _ => None,
    };
    issue.into_iter().collect()
}

/// Break a site's DQI down into the five categories, in fixed order.
pub fn dqi_breakdown(site: &Site, scores: &dyn ScoreSource) -> Vec<DqiBreakdown> {
    let base = site.dqi;
    CATEGORIES
        .iter()
        .enumerate()
        .map(|(i, def)| DqiBreakdown {
            category: def.label.to_string(),
            score: (base + def.offset + scores.sample(def.range)).max(0),
            max_score: MAX_SCORE,
            issues: category_issues(i, site),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use trialdqi_test_utils::fixtures;

    #[test]
    fn test_fixed_zero_source_applies_offsets() {
        let site = Site { dqi: 50, ..fixtures::site("S", "ST") };
        let out = dqi_breakdown(&site, &FixedScoreSource::new(0));
        let scores: Vec<i32> = out.iter().map(|b| b.score).collect();
        assert_eq!(scores, vec![40, 45, 50, 42, 47]);
        assert!(out.iter().all(|b| b.max_score == 100));
    }

    #[test]
    fn test_fixed_max_source_hits_upper_envelope() {
        let site = Site { dqi: 50, ..fixtures::site("S", "ST") };
        let out = dqi_breakdown(&site, &FixedScoreSource::max());
        let scores: Vec<i32> = out.iter().map(|b| b.score).collect();
        assert_eq!(scores, vec![59, 59, 59, 59, 58]);
    }

    #[test]
    fn test_score_clamped_at_zero() {
        let site = Site { dqi: 2, ..fixtures::site("S", "ST") };
        let out = dqi_breakdown(&site, &FixedScoreSource::new(0));
        assert_eq!(out[0].score, 0); // 2 - 10
        assert_eq!(out[1].score, 0); // 2 - 5
        assert_eq!(out[2].score, 2);
        assert!(out.iter().all(|b| b.score >= 0));
    }

    #[test]
    fn test_random_scores_stay_in_envelope() {
        let store = trialdqi_test_utils::seeded_store();
        let source = RandomScoreSource::from_entropy();
        for site in store.sites() {
            for _ in 0..25 {
                let out = dqi_breakdown(site, &source);
                assert_eq!(out.len(), 5);
                for (b, def) in out.iter().zip(CATEGORIES.iter()) {
                    let (low, high) = def.envelope(site.dqi);
                    assert!(b.score >= low && b.score <= high,
                        "{} score {} outside [{}, {}]", b.category, b.score, low, high);
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_scores() {
        let site = Site { dqi: 63, ..fixtures::site("S", "ST") };
        let a = dqi_breakdown(&site, &RandomScoreSource::seeded(7));
        let b = dqi_breakdown(&site, &RandomScoreSource::seeded(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_issue_rules() {
        let store = trialdqi_test_utils::seeded_store();
        let site_001 = store.sites().iter().find(|s| s.id == "SITE-001").unwrap();
        let out = dqi_breakdown(site_001, &FixedScoreSource::new(0));
        assert_eq!(out[0].issues, vec!["3 pending SAE reviews"]);
        assert_eq!(out[1].issues, vec!["8 overdue visits"]);
        assert_eq!(out[2].issues, vec!["28 open queries require attention"]);
        assert_eq!(out[3].issues, vec!["MedDRA coding incomplete"]);
        assert_eq!(out[4].issues, vec!["PI signatures pending"]);

        let site_005 = store.sites().iter().find(|s| s.id == "SITE-005").unwrap();
        let out = dqi_breakdown(site_005, &FixedScoreSource::new(0));
        assert!(out.iter().all(|b| b.issues.is_empty()));
    }

    #[test]
    fn test_issue_thresholds_are_strict() {
        let site = Site { dqi: 70, open_queries: 10, ..fixtures::site("S", "ST") };
        let out = dqi_breakdown(&site, &FixedScoreSource::new(0));
        assert!(out[2].issues.is_empty());
        assert!(out[3].issues.is_empty());
        assert!(out[4].issues.is_empty());

        let site = Site { dqi: 60, ..fixtures::site("S", "ST") };
        let out = dqi_breakdown(&site, &FixedScoreSource::new(0));
        assert!(out[3].issues.is_empty());
        assert_eq!(out[4].issues, vec!["PI signatures pending"]);
    }
}
