//! Experience Classifier: years of experience coarsened into ordinal buckets.
//!
//! Three strategies run in order and the first valid match wins:
//! 1. explicit duration ("3年工作经验", "5年以上")
//! 2. graduation year ("2019年毕业")
//! 3. date range ("2018-2022", "2020-今", "2019 - present")

use chrono::{Datelike, Local};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExperienceBucket {
    #[serde(rename = "0-1")]
    ZeroToOne,
    #[serde(rename = "1-3")]
    OneToThree,
    #[serde(rename = "3-5")]
    ThreeToFive,
    #[serde(rename = "5+")]
    FivePlus,
    #[default]
    #[serde(rename = "unknown")]
    Unknown,
}

impl ExperienceBucket {
    /// Upper bounds are inclusive: 1 → 0-1, 3 → 1-3, 5 → 3-5.
    pub fn from_years(years: f64) -> Self {
        if years <= 1.0 {
            ExperienceBucket::ZeroToOne
        } else if years <= 3.0 {
            ExperienceBucket::OneToThree
        } else if years <= 5.0 {
            ExperienceBucket::ThreeToFive
        } else {
            ExperienceBucket::FivePlus
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceBucket::ZeroToOne => "0-1",
            ExperienceBucket::OneToThree => "1-3",
            ExperienceBucket::ThreeToFive => "3-5",
            ExperienceBucket::FivePlus => "5+",
            ExperienceBucket::Unknown => "unknown",
        }
    }
}

static DURATION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*年\s*(?:经验|工作|从业|以上|以内|开发|软件|编程|项目)")
        .unwrap()
});

static GRADUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([0-9]{4})\s*年?\s*毕业").unwrap());

static PERIOD_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"([0-9]{4})\s*[-–—]\s*([0-9]{4}|今|现在|present|to date|to now)").unwrap()
});

/// Buckets the experience described in `text`, relative to the current year.
pub fn extract_exp_bucket(text: &str) -> ExperienceBucket {
    extract_exp_bucket_at(text, Local::now().year())
}

/// Same as [`extract_exp_bucket`] with an explicit reference year.
pub fn extract_exp_bucket_at(text: &str, current_year: i32) -> ExperienceBucket {
    let lower = text.to_lowercase();

    duration_years(&lower)
        .or_else(|| years_since_graduation(&lower, current_year))
        .or_else(|| period_years(&lower, current_year))
        .map(ExperienceBucket::from_years)
        .unwrap_or(ExperienceBucket::Unknown)
}

fn duration_years(text: &str) -> Option<f64> {
    DURATION_RE
        .captures(text)
        .and_then(|caps| caps[1].parse::<f64>().ok())
}

fn years_since_graduation(text: &str, current_year: i32) -> Option<f64> {
    GRADUATION_RE.captures_iter(text).find_map(|caps| {
        let year: i32 = caps[1].parse().ok()?;
        (year > 1900 && year <= current_year).then(|| f64::from(current_year - year))
    })
}

fn period_years(text: &str, current_year: i32) -> Option<f64> {
    PERIOD_RE.captures_iter(text).find_map(|caps| {
        let start: i32 = caps[1].parse().ok()?;
        let end_token = &caps[2];
        let end: i32 = if end_token.chars().all(|c| c.is_ascii_digit()) {
            end_token.parse().ok()?
        } else {
            current_year
        };

        let valid = start > 1900 && start <= current_year && end >= start && end <= current_year;
        valid.then(|| f64::from(end - start))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const YEAR: i32 = 2026;

    #[test]
    fn test_direct_duration() {
        assert_eq!(extract_exp_bucket_at("有3年工作经验", YEAR), ExperienceBucket::OneToThree);
        assert_eq!(extract_exp_bucket_at("3年工作经验", YEAR), ExperienceBucket::OneToThree);
        assert_eq!(extract_exp_bucket_at("1年以内经验", YEAR), ExperienceBucket::ZeroToOne);
        assert_eq!(extract_exp_bucket_at("5年以上开发经验", YEAR), ExperienceBucket::ThreeToFive);
        assert_eq!(extract_exp_bucket_at("8 年 项目经验", YEAR), ExperienceBucket::FivePlus);
    }

    #[test]
    fn test_decimal_duration() {
        assert_eq!(extract_exp_bucket_at("1.5年开发经验", YEAR), ExperienceBucket::OneToThree);
        assert_eq!(extract_exp_bucket_at("0.5年编程", YEAR), ExperienceBucket::ZeroToOne);
    }

    #[test]
    fn test_first_duration_match_wins_not_largest() {
        assert_eq!(
            extract_exp_bucket_at("2年开发经验，其中10年项目", YEAR),
            ExperienceBucket::OneToThree
        );
    }

    #[test]
    fn test_graduation_year() {
        assert_eq!(extract_exp_bucket_at("2025年毕业", YEAR), ExperienceBucket::ZeroToOne);
        assert_eq!(extract_exp_bucket_at("2024年毕业", YEAR), ExperienceBucket::OneToThree);
        assert_eq!(extract_exp_bucket_at("2022年毕业", YEAR), ExperienceBucket::ThreeToFive);
        assert_eq!(extract_exp_bucket_at("2020年毕业", YEAR), ExperienceBucket::FivePlus);
        assert_eq!(extract_exp_bucket_at("2021 毕业", YEAR), ExperienceBucket::ThreeToFive);
    }

    #[test]
    fn test_graduation_six_years_ago_against_real_clock() {
        let year = Local::now().year();
        assert_eq!(
            extract_exp_bucket(&format!("{}年毕业", year - 6)),
            ExperienceBucket::FivePlus
        );
    }

    #[test]
    fn test_future_graduation_is_skipped() {
        assert_eq!(extract_exp_bucket_at("2030年毕业", YEAR), ExperienceBucket::Unknown);
        assert_eq!(
            extract_exp_bucket_at("2030年毕业，2023年毕业", YEAR),
            ExperienceBucket::OneToThree
        );
    }

    #[test]
    fn test_period() {
        assert_eq!(extract_exp_bucket_at("2018-2020工作经历", YEAR), ExperienceBucket::OneToThree);
        assert_eq!(extract_exp_bucket_at("2019-2022项目经验", YEAR), ExperienceBucket::OneToThree);
        assert_eq!(extract_exp_bucket_at("2018-2026工作", YEAR), ExperienceBucket::FivePlus);
        assert_eq!(extract_exp_bucket_at("2021 – 2025", YEAR), ExperienceBucket::ThreeToFive);
    }

    #[test]
    fn test_period_to_now_tokens() {
        assert_eq!(extract_exp_bucket_at("2024-今", YEAR), ExperienceBucket::OneToThree);
        assert_eq!(extract_exp_bucket_at("2015—现在", YEAR), ExperienceBucket::FivePlus);
        assert_eq!(extract_exp_bucket_at("2022 - Present", YEAR), ExperienceBucket::ThreeToFive);
        assert_eq!(extract_exp_bucket_at("2026-to now", YEAR), ExperienceBucket::ZeroToOne);
    }

    #[test]
    fn test_invalid_periods_are_skipped() {
        assert_eq!(extract_exp_bucket_at("2022-2019", YEAR), ExperienceBucket::Unknown);
        assert_eq!(extract_exp_bucket_at("2020-2030", YEAR), ExperienceBucket::Unknown);
        assert_eq!(extract_exp_bucket_at("1800-1805", YEAR), ExperienceBucket::Unknown);
    }

    #[test]
    fn test_strategy_order() {
        // duration beats graduation and period even when it appears later
        assert_eq!(
            extract_exp_bucket_at("2010-2020 期间，2015年毕业，共2年工作经验", YEAR),
            ExperienceBucket::OneToThree
        );
        // graduation beats period
        assert_eq!(
            extract_exp_bucket_at("2010-2012 实习，2025年毕业", YEAR),
            ExperienceBucket::ZeroToOne
        );
    }

    #[test]
    fn test_unknown() {
        assert_eq!(extract_exp_bucket_at("无相关经验描述", YEAR), ExperienceBucket::Unknown);
        assert_eq!(extract_exp_bucket_at("", YEAR), ExperienceBucket::Unknown);
    }

    #[test]
    fn test_bucket_boundaries_inclusive() {
        assert_eq!(ExperienceBucket::from_years(0.0), ExperienceBucket::ZeroToOne);
        assert_eq!(ExperienceBucket::from_years(1.0), ExperienceBucket::ZeroToOne);
        assert_eq!(ExperienceBucket::from_years(1.01), ExperienceBucket::OneToThree);
        assert_eq!(ExperienceBucket::from_years(3.0), ExperienceBucket::OneToThree);
        assert_eq!(ExperienceBucket::from_years(5.0), ExperienceBucket::ThreeToFive);
        assert_eq!(ExperienceBucket::from_years(5.5), ExperienceBucket::FivePlus);
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(serde_json::to_string(&ExperienceBucket::FivePlus).unwrap(), r#""5+""#);
        let parsed: ExperienceBucket = serde_json::from_str(r#""1-3""#).unwrap();
        assert_eq!(parsed, ExperienceBucket::OneToThree);
    }

    #[test]
    fn test_same_input_same_bucket() {
        for text in ["3年工作经验", "2019年毕业", "2015-2020 某公司", "无相关信息"] {
            assert_eq!(
                extract_exp_bucket_at(text, YEAR),
                extract_exp_bucket_at(text, YEAR)
            );
        }
    }
}
