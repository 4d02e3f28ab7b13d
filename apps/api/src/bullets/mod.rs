//! Bullet Generator: fills per-style achievement templates with tech tags.
//!
//! Output is always three groups of 3–5 bullets. Templates are drawn with
//! replacement, so a group may repeat one. All randomness comes from the
//! caller's `Rng`, which makes a seeded `StdRng` fully reproducible.

pub mod handlers;
pub mod metrics;

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dictionary::Domain;
use metrics::{metric_suggestions, MetricSuggestion};

pub const GROUP_COUNT: usize = 3;
pub const MIN_BULLETS_PER_GROUP: usize = 3;
pub const MAX_BULLETS_PER_GROUP: usize = 5;

const TECH_SLOT: &str = "{tech}";
const FALLBACK_PRIMARY_TECH: &str = "相关技术";
const FALLBACK_SECONDARY_TECH: &str = "其他技术";

const CLOUD_TEMPLATES: &str = include_str!("../../data/templates/cloud.json");
const SRE_TEMPLATES: &str = include_str!("../../data/templates/sre.json");
const MLOPS_TEMPLATES: &str = include_str!("../../data/templates/mlops.json");

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One achievement sentence split into slots; `method` carries `{tech}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletTemplate {
    pub id: u32,
    pub verb: String,
    pub object: String,
    pub method: String,
    pub result: String,
}

impl BulletTemplate {
    fn render(&self, tech: &str) -> String {
        format!(
            "{}{}{}{}",
            self.verb,
            self.object,
            self.method.replacen(TECH_SLOT, tech, 1),
            self.result
        )
    }
}

/// Accepted for the request shape; template choice depends on style only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    Development,
    Optimization,
    Migration,
    Monitoring,
    Security,
    Scaling,
    Data,
    Ml,
    #[default]
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedBullet {
    /// group × 10 + position within the group
    pub id: usize,
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletGenerationResult {
    pub groups: Vec<Vec<GeneratedBullet>>,
    pub metrics: Vec<MetricSuggestion>,
}

// ────────────────────────────────────────────────────────────────────────────
// Template library
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct BulletLibrary {
    templates: HashMap<Domain, Vec<BulletTemplate>>,
}

impl BulletLibrary {
    /// Parses the embedded per-style template tables. Every style must have
    /// at least one template whose method carries the tech slot.
    pub fn builtin() -> Result<Self> {
        let mut templates = HashMap::new();
        for (style, raw) in [
            (Domain::Cloud, CLOUD_TEMPLATES),
            (Domain::Sre, SRE_TEMPLATES),
            (Domain::Mlops, MLOPS_TEMPLATES),
        ] {
            let table: Vec<BulletTemplate> = serde_json::from_str(raw)
                .with_context(|| format!("Failed to parse built-in {style} bullet templates"))?;
            templates.insert(style, table);
        }
        let library = Self::from_tables(templates)?;
        info!(
            "Loaded bullet templates: {}",
            Domain::ALL
                .iter()
                .map(|s| format!("{s}={}", library.templates(*s).len()))
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(library)
    }

    pub fn from_tables(templates: HashMap<Domain, Vec<BulletTemplate>>) -> Result<Self> {
        for style in Domain::ALL {
            let table = templates.get(&style).map(Vec::as_slice).unwrap_or(&[]);
            if table.is_empty() {
                bail!("No bullet templates for style {style}");
            }
            if let Some(bad) = table.iter().find(|t| !t.method.contains(TECH_SLOT)) {
                bail!("Bullet template {} ({style}) has no {TECH_SLOT} slot", bad.id);
            }
        }
        Ok(Self { templates })
    }

    pub fn templates(&self, style: Domain) -> &[BulletTemplate] {
        self.templates.get(&style).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Generates three groups of bullets for `style`, injecting `tech_tags`.
    ///
    /// With two or more distinct tags each bullet names two different ones;
    /// with one tag it is paired with "其他技术"; with none the slot reads
    /// "相关技术和其他技术".
    pub fn generate_bullets<R: Rng>(
        &self,
        description: &str,
        project_type: ProjectType,
        style: Domain,
        tech_tags: &[String],
        rng: &mut R,
    ) -> BulletGenerationResult {
        let templates = self.templates(style);
        let tags = distinct_tags(tech_tags);

        let mut groups = Vec::with_capacity(GROUP_COUNT);
        for group_index in 0..GROUP_COUNT {
            let size = rng.gen_range(MIN_BULLETS_PER_GROUP..=MAX_BULLETS_PER_GROUP);
            let mut group = Vec::with_capacity(size);
            for position in 0..size {
                let Some(template) = templates.choose(rng) else {
                    break;
                };
                let tech = tech_pair(&tags, rng);
                group.push(GeneratedBullet {
                    id: group_index * 10 + position,
                    text: template.render(&tech),
                });
            }
            groups.push(group);
        }

        debug!(
            "Generated bullets: style={style} project_type={project_type:?} tags={} description_chars={} sizes={:?}",
            tags.len(),
            description.chars().count(),
            groups.iter().map(Vec::len).collect::<Vec<_>>()
        );

        BulletGenerationResult {
            groups,
            metrics: metric_suggestions(style).to_vec(),
        }
    }
}

fn distinct_tags(tech_tags: &[String]) -> Vec<&str> {
    let mut tags: Vec<&str> = Vec::with_capacity(tech_tags.len());
    for tag in tech_tags {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn tech_pair<R: Rng>(tags: &[&str], rng: &mut R) -> String {
    match tags {
        [] => format!("{FALLBACK_PRIMARY_TECH}和{FALLBACK_SECONDARY_TECH}"),
        [only] => format!("{only}和{FALLBACK_SECONDARY_TECH}"),
        _ => {
            let picked: Vec<&&str> = tags.choose_multiple(rng, 2).collect();
            format!("{}和{}", picked[0], picked[1])
        }
    }
}
