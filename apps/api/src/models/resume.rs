use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

/// The five top-level sections every résumé document carries, in render order.
pub const RESUME_SECTIONS: [&str; 5] =
    ["personal_info", "education", "experience", "projects", "skills"];

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeBaseRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub personal_info: Value,
    pub education: Value,
    pub experience: Value,
    pub projects: Value,
    pub skills: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeBaseRow {
    /// The stored document without row metadata, as fed to the adaptation prompt.
    pub fn content(&self) -> ResumeContent {
        ResumeContent {
            personal_info: self.personal_info.clone(),
            education: self.education.clone(),
            experience: self.experience.clone(),
            projects: self.projects.clone(),
            skills: self.skills.clone(),
        }
    }
}

/// One AI-adapted snapshot. `personal_info` is joined from the owning base on reads.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeVersionRow {
    pub id: Uuid,
    pub resume_base_id: Uuid,
    pub user_id: Uuid,
    pub role: String,
    pub job_description: Option<String>,
    pub adapted_content: Value,
    pub created_at: DateTime<Utc>,
    #[sqlx(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_info: Option<Value>,
}

/// Résumé body as submitted by clients. Omitted sections take empty defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeContent {
    #[serde(default = "empty_object")]
    pub personal_info: Value,
    #[serde(default = "empty_array")]
    pub education: Value,
    #[serde(default = "empty_array")]
    pub experience: Value,
    #[serde(default = "empty_array")]
    pub projects: Value,
    #[serde(default = "empty_object")]
    pub skills: Value,
}

impl Default for ResumeContent {
    fn default() -> Self {
        Self {
            personal_info: empty_object(),
            education: empty_array(),
            experience: empty_array(),
            projects: empty_array(),
            skills: empty_object(),
        }
    }
}

impl ResumeContent {
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("personal_info".into(), self.personal_info.clone());
        map.insert("education".into(), self.education.clone());
        map.insert("experience".into(), self.experience.clone());
        map.insert("projects".into(), self.projects.clone());
        map.insert("skills".into(), self.skills.clone());
        Value::Object(map)
    }
}

fn empty_object() -> Value {
    json!({})
}

fn empty_array() -> Value {
    json!([])
}
