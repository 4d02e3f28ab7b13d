//! Scoring Engine: JD expectations vs resume profile, weighted to 0–100.
//!
//! Algorithm:
//! 1. Expected tech/role/scene sets are extracted from the JD text.
//! 2. hit = profile ∩ expected (profile order), missing = expected − profile (JD order)
//! 3. rate = |hit| / |expected|, or 0 when nothing is expected
//! 4. tech = round(rate × 60), role = round(rate × 12.5), scene = round(rate × 12.5)
//! 5. bonus (0–15) from JD wording alone, independent of the resume
//! 6. total = min(100, tech + role + scene + bonus)

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dictionary::DictionaryItem;
use crate::extract::skills::extract_skills;
use crate::extract::tags::{extract_role_tags, extract_scene_tags};

const TECH_WEIGHT: f64 = 60.0;
const ROLE_WEIGHT: f64 = 12.5;
const SCENE_WEIGHT: f64 = 12.5;
const MAX_BONUS: u32 = 15;
const MAX_TOTAL: u32 = 100;

const SCALE_WORDS: &[&str] = &[
    "大规模",
    "海量",
    "高并发",
    "千万级",
    "百万级",
    "十万级",
    "large scale",
    "high volume",
    "massive",
];

const PROJECT_SCALE_WORDS: &[&str] = &[
    "大型项目",
    "复杂系统",
    "多业务线",
    "跨部门",
    "enterprise",
    "complex system",
];

static YEARS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)\s*年").unwrap());
static TEAM_SIZE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]+)\s*人\s*团\s*队").unwrap());

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// What a resume offers, as extracted tags. Entries are treated as a set;
/// order only matters for picking "first" items in suggestions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeProfile {
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub role: Vec<String>,
    #[serde(default)]
    pub scene: Vec<String>,
}

impl ResumeProfile {
    /// Builds a profile by running the extractors over resume text.
    pub fn from_text(resume_text: &str, dictionaries: &[DictionaryItem]) -> Self {
        Self {
            tech: extract_skills(resume_text, dictionaries),
            role: extract_role_tags(resume_text),
            scene: extract_scene_tags(resume_text),
        }
    }
}

/// Per-category tag lists used for both `hit` and `missing`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagSets {
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub role: Vec<String>,
    #[serde(default)]
    pub scene: Vec<String>,
}

impl TagSets {
    /// What a JD asks for, in JD order.
    pub fn from_jd(jd_text: &str, dictionaries: &[DictionaryItem]) -> Self {
        Self {
            tech: extract_skills(jd_text, dictionaries),
            role: extract_role_tags(jd_text),
            scene: extract_scene_tags(jd_text),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tech.is_empty() && self.role.is_empty() && self.scene.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub tech: u32,  // 0 – 60
    pub role: u32,  // 0 – 13 (12.5 rounds up)
    pub scene: u32, // 0 – 13
    pub bonus: u32, // 0 – 15
}

impl ScoreBreakdown {
    pub fn sum(&self) -> u32 {
        self.tech + self.role + self.scene + self.bonus
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub total_score: u32, // 0 – 100
    pub breakdown: ScoreBreakdown,
    pub hit: TagSets,
    pub missing: TagSets,
    pub tech_hit_rate: f64,
    pub role_hit_rate: f64,
    pub scene_hit_rate: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores how well `profile` covers what `jd_text` asks for.
pub fn calculate_jd_score(
    jd_text: &str,
    profile: &ResumeProfile,
    dictionaries: &[DictionaryItem],
) -> ScoringResult {
    let expected = TagSets::from_jd(jd_text, dictionaries);
    score_against(jd_text, &expected, profile)
}

/// Scores `profile` against tags already extracted from `jd_text`.
/// `jd_text` only feeds the bonus.
pub fn score_against(jd_text: &str, expected: &TagSets, profile: &ResumeProfile) -> ScoringResult {
    let TagSets {
        tech: expected_tech,
        role: expected_role,
        scene: expected_scene,
    } = expected;

    let (tech_hit, tech_missing) = split_hits(expected_tech, &profile.tech);
    let (role_hit, role_missing) = split_hits(expected_role, &profile.role);
    let (scene_hit, scene_missing) = split_hits(expected_scene, &profile.scene);

    let tech_hit_rate = hit_rate(tech_hit.len(), expected_tech.len());
    let role_hit_rate = hit_rate(role_hit.len(), expected_role.len());
    let scene_hit_rate = hit_rate(scene_hit.len(), expected_scene.len());

    let breakdown = ScoreBreakdown {
        tech: weighted(tech_hit_rate, TECH_WEIGHT),
        role: weighted(role_hit_rate, ROLE_WEIGHT),
        scene: weighted(scene_hit_rate, SCENE_WEIGHT),
        bonus: calculate_bonus_score(jd_text),
    };
    let total_score = breakdown.sum().min(MAX_TOTAL);

    debug!(
        "JD score {total_score}: tech {}/{} role {}/{} scene {}/{} bonus {}",
        tech_hit.len(),
        expected_tech.len(),
        role_hit.len(),
        expected_role.len(),
        scene_hit.len(),
        expected_scene.len(),
        breakdown.bonus
    );

    ScoringResult {
        total_score,
        breakdown,
        hit: TagSets {
            tech: tech_hit,
            role: role_hit,
            scene: scene_hit,
        },
        missing: TagSets {
            tech: tech_missing,
            role: role_missing,
            scene: scene_missing,
        },
        tech_hit_rate,
        role_hit_rate,
        scene_hit_rate,
    }
}

/// JD-only bonus. Four independent triggers, summed and capped at 15:
/// years required (first "N年" only: ≥5 → 5, ≥3 → 3, ≥1 → 1), scale wording (+3),
/// a team of ten or more (+4), large-project wording (+3).
pub fn calculate_bonus_score(jd_text: &str) -> u32 {
    let lower = jd_text.to_lowercase();
    let mut bonus = 0;

    if let Some(years) = first_number(&YEARS_RE, &lower) {
        bonus += match years {
            y if y >= 5 => 5,
            y if y >= 3 => 3,
            y if y >= 1 => 1,
            _ => 0,
        };
    }

    if SCALE_WORDS.iter().any(|w| lower.contains(w)) {
        bonus += 3;
    }

    if first_number(&TEAM_SIZE_RE, &lower).is_some_and(|size| size >= 10) {
        bonus += 4;
    }

    if PROJECT_SCALE_WORDS.iter().any(|w| lower.contains(w)) {
        bonus += 3;
    }

    bonus.min(MAX_BONUS)
}

/// Parses the first capture of the first match. Digit runs too long for u64
/// saturate, since they are certainly above every threshold.
fn first_number(re: &Regex, text: &str) -> Option<u64> {
    re.captures(text)
        .map(|caps| caps[1].parse::<u64>().unwrap_or(u64::MAX))
}

fn split_hits(expected: &[String], offered: &[String]) -> (Vec<String>, Vec<String>) {
    let mut hit: Vec<String> = Vec::new();
    for item in offered {
        if expected.contains(item) && !hit.contains(item) {
            hit.push(item.clone());
        }
    }

    let missing = expected
        .iter()
        .filter(|item| !offered.contains(item))
        .cloned()
        .collect();

    (hit, missing)
}

fn hit_rate(hits: usize, expected: usize) -> f64 {
    if expected == 0 {
        0.0
    } else {
        hits as f64 / expected as f64
    }
}

fn weighted(rate: f64, weight: f64) -> u32 {
    (rate * weight).round() as u32
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn test_dictionary() -> Vec<DictionaryItem> {
        vec![
            DictionaryItem::new("react", &["React", "ReactJS"], "frontend"),
            DictionaryItem::new("typescript", &["TS", "TypeScript"], "frontend"),
            DictionaryItem::new("node.js", &["Node", "NodeJS"], "backend"),
            DictionaryItem::new("aws", &["Amazon Web Services"], "cloud"),
            DictionaryItem::new("docker", &["Docker"], "devops"),
            DictionaryItem::new("kubernetes", &["k8s"], "devops"),
        ]
    }

    fn profile(tech: &[&str], role: &[&str], scene: &[&str]) -> ResumeProfile {
        let owned = |xs: &[&str]| xs.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        ResumeProfile {
            tech: owned(tech),
            role: owned(role),
            scene: owned(scene),
        }
    }

    #[test]
    fn test_full_tech_match() {
        let result = calculate_jd_score(
            "需要熟练掌握React和TypeScript",
            &profile(&["react", "typescript"], &[], &[]),
            &test_dictionary(),
        );
        assert_eq!(result.breakdown.tech, 60);
        assert_eq!(result.hit.tech, vec!["react", "typescript"]);
        assert!(result.missing.tech.is_empty());
        assert_eq!(result.total_score, 60);
    }

    #[test]
    fn test_partial_match_hit_rate() {
        let result = calculate_jd_score(
            "需要熟练掌握React、TypeScript和Node.js",
            &profile(&["react", "typescript"], &[], &[]),
            &test_dictionary(),
        );
        assert_eq!(result.hit.tech.len(), 2);
        assert_eq!(result.missing.tech, vec!["node.js"]);
        assert_eq!(result.tech_hit_rate, 2.0 / 3.0);
        assert_eq!(result.breakdown.tech, 40);
    }

    #[test]
    fn test_no_overlap() {
        let result = calculate_jd_score(
            "需要熟练掌握React和TypeScript",
            &profile(&["vue", "javascript"], &[], &[]),
            &test_dictionary(),
        );
        assert!(result.hit.tech.is_empty());
        assert_eq!(result.missing.tech, vec!["react", "typescript"]);
        assert_eq!(result.breakdown.tech, 0);
    }

    #[test]
    fn test_empty_jd_scores_zero() {
        let result = calculate_jd_score("", &ResumeProfile::default(), &test_dictionary());
        assert_eq!(result.total_score, 0);
        assert_eq!(result.breakdown, ScoreBreakdown::default());
        assert_eq!(result.tech_hit_rate, 0.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_empty_expectation_never_rewards_resume() {
        let result = calculate_jd_score(
            "负责日常沟通",
            &profile(&["react", "docker"], &["architect"], &["fintech"]),
            &test_dictionary(),
        );
        assert_eq!(result.tech_hit_rate, 0.0);
        assert_eq!(result.role_hit_rate, 0.0);
        assert_eq!(result.scene_hit_rate, 0.0);
        assert_eq!(result.total_score, 0);
    }

    #[test]
    fn test_mixed_categories_and_bonus() {
        let jd = "招聘高级工程师，5年以上经验，负责高并发电商系统，20人团队，跨部门协作。熟悉 Kubernetes, Docker, AWS";
        let result = calculate_jd_score(
            jd,
            &profile(&["docker", "kubernetes"], &["senior-engineer"], &[]),
            &test_dictionary(),
        );
        assert_eq!(result.missing.tech, vec!["aws"]);
        assert_eq!(result.hit.role, vec!["senior-engineer"]);
        assert_eq!(result.missing.scene, vec!["ecommerce"]);
        assert_eq!(
            result.breakdown,
            ScoreBreakdown {
                tech: 40,
                role: 13,
                scene: 0,
                bonus: 15
            }
        );
        assert_eq!(result.total_score, 68);
    }

    #[test]
    fn test_total_is_capped_at_100() {
        let jd = "招聘高级工程师，5年以上经验，高并发电商系统，20人团队，跨部门。Docker";
        let result = calculate_jd_score(
            jd,
            &profile(&["docker"], &["senior-engineer"], &["ecommerce"]),
            &test_dictionary(),
        );
        assert_eq!(result.breakdown.sum(), 101);
        assert_eq!(result.total_score, 100);
    }

    #[test]
    fn test_duplicate_profile_entries_count_once() {
        let result = calculate_jd_score(
            "React and Docker",
            &profile(&["react", "react", "docker"], &[], &[]),
            &test_dictionary(),
        );
        assert_eq!(result.hit.tech, vec!["react", "docker"]);
        assert_eq!(result.tech_hit_rate, 1.0);
    }

    #[test]
    fn test_total_matches_breakdown_invariant() {
        let dict = test_dictionary();
        for jd in [
            "",
            "React",
            "3年经验，海量数据，enterprise",
            "高级工程师 电商 React Docker k8s 10人团队",
        ] {
            let result = calculate_jd_score(jd, &profile(&["react"], &[], &["ecommerce"]), &dict);
            assert!(result.total_score <= 100);
            assert_eq!(result.total_score, result.breakdown.sum().min(100));
        }
    }

    #[test]
    fn test_bonus_years_tiers() {
        assert_eq!(calculate_bonus_score("5年以上经验"), 5);
        assert_eq!(calculate_bonus_score("3年经验"), 3);
        assert_eq!(calculate_bonus_score("1年经验"), 1);
        assert_eq!(calculate_bonus_score("0年经验"), 0);
    }

    #[test]
    fn test_bonus_first_year_match_governs() {
        assert_eq!(calculate_bonus_score("2年经验，其中8年"), 1);
    }

    #[test]
    fn test_bonus_team_size() {
        assert_eq!(calculate_bonus_score("带领9人团队"), 0);
        assert_eq!(calculate_bonus_score("带领10 人 团 队"), 4);
    }

    #[test]
    fn test_bonus_keywords_are_case_insensitive() {
        assert_eq!(calculate_bonus_score("Large Scale systems"), 3);
        assert_eq!(calculate_bonus_score("Enterprise platform"), 3);
    }

    #[test]
    fn test_bonus_all_triggers_capped() {
        assert_eq!(
            calculate_bonus_score("8年经验 海量数据 12人团队 复杂系统"),
            15
        );
    }

    #[test]
    fn test_bonus_empty() {
        assert_eq!(calculate_bonus_score(""), 0);
    }

    #[test]
    fn test_profile_from_text() {
        let p = ResumeProfile::from_text("高级工程师，负责电商平台 Docker 和 k8s", &test_dictionary());
        assert_eq!(p.tech, vec!["docker", "kubernetes"]);
        assert_eq!(p.role, vec!["senior-engineer"]);
        assert_eq!(p.scene, vec!["ecommerce"]);
    }

    #[test]
    fn test_score_against_matches_full_pipeline() {
        let jd = "5年以上经验，高级工程师，熟悉 Kubernetes 和 Docker，负责电商平台";
        let expected = TagSets::from_jd(jd, &test_dictionary());
        assert_eq!(expected.tech, vec!["docker", "kubernetes"]);

        let p = profile(&["docker"], &["senior-engineer"], &[]);
        assert_eq!(
            score_against(jd, &expected, &p),
            calculate_jd_score(jd, &p, &test_dictionary())
        );
    }
}
