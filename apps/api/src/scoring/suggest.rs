//! Suggestion Generator: turns scoring gaps into prioritized advice.
//!
//! A static table of rule templates is filtered by condition, stably sorted by
//! descending priority and rendered with placeholder values taken from the
//! scoring result. Short lists are topped up from a fixed generic pool.

use serde::Serialize;
use tracing::debug;

use crate::scoring::score::ScoringResult;

pub const DEFAULT_MAX_SUGGESTIONS: usize = 5;

const FALLBACK_TECH: &str = "相关技术";
const FALLBACK_ROLE: &str = "相关角色";
const FALLBACK_SCENE: &str = "相关场景";
const SPECIFIC_CHALLENGE: &str = "性能优化或架构设计";
const IMPROVEMENT_PERCENTAGE: &str = "20-40";
const DATA_TYPE: &str = "用户行为数据或业务指标";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionCategory {
    Tech,
    Role,
    Scene,
    Experience,
}

#[derive(Debug, Clone, Copy)]
pub struct SuggestionTemplate {
    pub category: SuggestionCategory,
    /// 1 (lowest) – 5 (highest)
    pub priority: u8,
    pub template: &'static str,
    pub condition: fn(&ScoringResult) -> bool,
}

fn missing_tech(result: &ScoringResult) -> bool {
    !result.missing.tech.is_empty()
}

fn missing_role(result: &ScoringResult) -> bool {
    !result.missing.role.is_empty()
}

fn missing_scene(result: &ScoringResult) -> bool {
    !result.missing.scene.is_empty()
}

fn always(_: &ScoringResult) -> bool {
    true
}

pub const SUGGESTION_TEMPLATES: &[SuggestionTemplate] = &[
    SuggestionTemplate {
        category: SuggestionCategory::Tech,
        priority: 5,
        template: "在工作经历中突出使用 {tech} 的项目经验，特别是与 {related_tech} 相关的应用案例。",
        condition: missing_tech,
    },
    SuggestionTemplate {
        category: SuggestionCategory::Tech,
        priority: 4,
        template: "详细描述您在 {tech} 方面的实践经验，包括解决的具体技术难题和取得的成果。",
        condition: missing_tech,
    },
    SuggestionTemplate {
        category: SuggestionCategory::Tech,
        priority: 3,
        template: "补充关于 {tech} 技术栈的项目经验，展示您在该领域的深度理解和实际应用能力。",
        condition: missing_tech,
    },
    SuggestionTemplate {
        category: SuggestionCategory::Role,
        priority: 4,
        template: "强调您在 {role} 角色中的职责和成就，特别是领导力、项目管理和团队协作方面的表现。",
        condition: missing_role,
    },
    SuggestionTemplate {
        category: SuggestionCategory::Scene,
        priority: 4,
        template: "增加在 {scene} 领域的实际项目经验，展示您对该行业特定需求和技术挑战的理解。",
        condition: missing_scene,
    },
    SuggestionTemplate {
        category: SuggestionCategory::Experience,
        priority: 5,
        template: "补充在 {scene} 或类似场景下的项目经验，特别是处理 {specific_challenge} 的解决方案。",
        condition: missing_scene,
    },
    SuggestionTemplate {
        category: SuggestionCategory::Experience,
        priority: 3,
        template: "量化您的工作成果，例如：\"通过优化 {tech} 架构，使系统性能提升 {improvement_percentage}%\"",
        condition: always,
    },
    SuggestionTemplate {
        category: SuggestionCategory::Tech,
        priority: 4,
        template: "展示您在 {tech} 生态系统中的全面技能，包括相关工具、框架和最佳实践的应用。",
        condition: missing_tech,
    },
    SuggestionTemplate {
        category: SuggestionCategory::Role,
        priority: 3,
        template: "突出您在跨职能团队中的合作经验，特别是在担任 {role} 角色时推动项目进展的能力。",
        condition: missing_role,
    },
    SuggestionTemplate {
        category: SuggestionCategory::Experience,
        priority: 5,
        template: "增加在 {scene} 领域的数据驱动决策经验，例如通过分析 {data_type} 来优化业务流程。",
        condition: missing_scene,
    },
];

const CONGRATULATIONS: &[&str] = &[
    "恭喜！您的简历与职位要求高度匹配。建议进一步量化您的工作成果，例如性能提升百分比、项目规模等。",
    "考虑添加一些具体的项目细节，突出您在团队中的贡献和影响力。",
    "可以增加一些与目标岗位相关的关键词，让简历更贴合职位要求。",
    "在描述工作经验时，使用更具体的动词和量化的成果来展示您的能力。",
    "确保简历中的技能部分与职位要求完全对应，有助于通过ATS筛选。",
];

const GENERIC_SUGGESTIONS: &[&str] = &[
    "在描述工作经验时，使用更多量化数据来证明您的成就，例如提升效率、降低成本或增加收入等。",
    "考虑添加更多与目标职位相关的关键词，这有助于通过简历筛选系统。",
    "突出您在解决复杂技术问题方面的能力，特别是与职位要求相关的技术栈。",
    "强调您在团队合作和项目管理方面的经验，特别是跨部门协作的经验。",
    "在技能部分增加与职位最相关的核心技术，并在工作经历中体现实际应用。",
];

/// Values substituted into template placeholders for one scoring result.
struct Placeholders<'a> {
    tech: &'a str,
    related_tech: &'a str,
    role: &'a str,
    scene: &'a str,
}

impl<'a> Placeholders<'a> {
    fn from_result(result: &'a ScoringResult) -> Self {
        fn first(items: &[String]) -> Option<&str> {
            items.first().map(String::as_str)
        }
        Self {
            tech: first(&result.missing.tech)
                .or_else(|| first(&result.hit.tech))
                .unwrap_or(FALLBACK_TECH),
            related_tech: first(&result.hit.tech).unwrap_or(FALLBACK_TECH),
            role: first(&result.missing.role).unwrap_or(FALLBACK_ROLE),
            scene: first(&result.missing.scene).unwrap_or(FALLBACK_SCENE),
        }
    }

    fn render(&self, template: &str) -> String {
        template
            .replace("{tech}", self.tech)
            .replace("{related_tech}", self.related_tech)
            .replace("{role}", self.role)
            .replace("{scene}", self.scene)
            .replace("{specific_challenge}", SPECIFIC_CHALLENGE)
            .replace("{improvement_percentage}", IMPROVEMENT_PERCENTAGE)
            .replace("{data_type}", DATA_TYPE)
    }
}

/// Produces at most `max` distinct suggestions for `result`.
///
/// A result with nothing missing gets the fixed congratulatory list. Otherwise
/// applicable templates come first (priority 5 → 1, table order among equals),
/// then the generic pool in order until `max` is reached or the pool runs out.
pub fn generate_suggestions(result: &ScoringResult, max: usize) -> Vec<String> {
    if result.missing.is_empty() {
        return CONGRATULATIONS
            .iter()
            .take(max)
            .map(|s| s.to_string())
            .collect();
    }

    let mut applicable: Vec<&SuggestionTemplate> = SUGGESTION_TEMPLATES
        .iter()
        .filter(|t| (t.condition)(result))
        .collect();
    // sort_by is stable, so equal priorities keep table order
    applicable.sort_by(|a, b| b.priority.cmp(&a.priority));

    let placeholders = Placeholders::from_result(result);
    let mut suggestions: Vec<String> = Vec::with_capacity(max);

    for template in applicable {
        if suggestions.len() >= max {
            break;
        }
        let text = placeholders.render(template.template);
        if !suggestions.contains(&text) {
            suggestions.push(text);
        }
    }

    for generic in GENERIC_SUGGESTIONS {
        if suggestions.len() >= max {
            break;
        }
        if !suggestions.iter().any(|s| s == generic) {
            suggestions.push(generic.to_string());
        }
    }

    debug!("Generated {} suggestions (max {max})", suggestions.len());
    suggestions
}
