//! Education Classifier: keyword tiers checked in a fixed order.
//!
//! Tiers are tested dazhuan → benke → shuoshi_plus and the FIRST tier with a
//! hit wins. A text mentioning both 专科 and 硕士 is `dazhuan`. Downstream
//! statistics depend on this precedence; do not change it to "highest level".

use serde::{Deserialize, Serialize};

/// Education level. Variant order matches the ordinal order of the levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EducationLevel {
    #[default]
    Unknown,
    Dazhuan,
    Benke,
    ShuoshiPlus,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::Unknown => "unknown",
            EducationLevel::Dazhuan => "dazhuan",
            EducationLevel::Benke => "benke",
            EducationLevel::ShuoshiPlus => "shuoshi_plus",
        }
    }
}

const EDUCATION_TIERS: &[(EducationLevel, &[&str])] = &[
    (EducationLevel::Dazhuan, &["大专", "专科"]),
    (
        EducationLevel::Benke,
        &["本科", "学士", "undergraduate", "bachelor"],
    ),
    (
        EducationLevel::ShuoshiPlus,
        &["硕士", "研究生", "master", "博士", "phd", "doctor"],
    ),
];

/// Classifies the education level mentioned in `text`.
pub fn extract_edu(text: &str) -> EducationLevel {
    let lower = text.to_lowercase();

    EDUCATION_TIERS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(level, _)| *level)
        .unwrap_or(EducationLevel::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dazhuan() {
        assert_eq!(extract_edu("大专学历"), EducationLevel::Dazhuan);
        assert_eq!(extract_edu("专科毕业"), EducationLevel::Dazhuan);
    }

    #[test]
    fn test_benke() {
        assert_eq!(extract_edu("本科学历"), EducationLevel::Benke);
        assert_eq!(extract_edu("学士学位"), EducationLevel::Benke);
        assert_eq!(extract_edu("Bachelor of Science"), EducationLevel::Benke);
    }

    #[test]
    fn test_shuoshi_plus() {
        assert_eq!(extract_edu("硕士学位"), EducationLevel::ShuoshiPlus);
        assert_eq!(extract_edu("博士毕业"), EducationLevel::ShuoshiPlus);
        assert_eq!(extract_edu("研究生学历"), EducationLevel::ShuoshiPlus);
        assert_eq!(extract_edu("PhD in Computer Science"), EducationLevel::ShuoshiPlus);
    }

    #[test]
    fn test_unknown() {
        assert_eq!(extract_edu("高中学历"), EducationLevel::Unknown);
        assert_eq!(extract_edu("没有任何教育信息"), EducationLevel::Unknown);
        assert_eq!(extract_edu(""), EducationLevel::Unknown);
    }

    #[test]
    fn test_first_tier_wins_over_higher_degree() {
        assert_eq!(extract_edu("专科起点，后取得硕士学位"), EducationLevel::Dazhuan);
        assert_eq!(extract_edu("本科 + 硕士"), EducationLevel::Benke);
    }

    #[test]
    fn test_levels_are_ordered() {
        assert!(EducationLevel::Unknown < EducationLevel::Dazhuan);
        assert!(EducationLevel::Dazhuan < EducationLevel::Benke);
        assert!(EducationLevel::Benke < EducationLevel::ShuoshiPlus);
    }

    #[test]
    fn test_serializes_to_wire_names() {
        assert_eq!(
            serde_json::to_string(&EducationLevel::ShuoshiPlus).unwrap(),
            r#""shuoshi_plus""#
        );
        assert_eq!(EducationLevel::Dazhuan.as_str(), "dazhuan");
    }

    #[test]
    fn test_same_input_same_level() {
        for text in ["本科 计算机科学", "硕士研究生", "专科", "自学成才"] {
            assert_eq!(extract_edu(text), extract_edu(text));
        }
    }
}
