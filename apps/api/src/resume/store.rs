//! sqlx queries for base résumés and their adapted versions.
//! Every version query is scoped by `user_id`; another user's row reads as missing.

use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::resume::{ResumeBaseRow, ResumeContent, ResumeVersionRow};

const VERSION_COLUMNS: &str = r#"
    v.id, v.resume_base_id, v.user_id, v.role, v.job_description,
    v.adapted_content, v.created_at, b.personal_info
"#;

pub async fn find_base(pool: &PgPool, user_id: Uuid) -> Result<Option<ResumeBaseRow>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM resume_base WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

/// Creates the user's base or replaces every section of the existing one.
pub async fn upsert_base(
    pool: &PgPool,
    user_id: Uuid,
    content: &ResumeContent,
) -> Result<ResumeBaseRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO resume_base
            (id, user_id, personal_info, education, experience, projects, skills)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        ON CONFLICT (user_id) DO UPDATE SET
            personal_info = EXCLUDED.personal_info,
            education = EXCLUDED.education,
            experience = EXCLUDED.experience,
            projects = EXCLUDED.projects,
            skills = EXCLUDED.skills,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(&content.personal_info)
    .bind(&content.education)
    .bind(&content.experience)
    .bind(&content.projects)
    .bind(&content.skills)
    .fetch_one(pool)
    .await
}

/// Parameters for appending a new adapted version.
pub struct NewVersion<'a> {
    pub resume_base_id: Uuid,
    pub user_id: Uuid,
    pub role: &'a str,
    pub job_description: Option<&'a str>,
    pub adapted_content: &'a Value,
}

/// Append-only: versions are inserted and deleted, never updated.
pub async fn insert_version(
    pool: &PgPool,
    params: NewVersion<'_>,
) -> Result<ResumeVersionRow, sqlx::Error> {
    sqlx::query_as(
        r#"
        INSERT INTO resume_versions
            (id, resume_base_id, user_id, role, job_description, adapted_content)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING id, resume_base_id, user_id, role, job_description, adapted_content, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(params.resume_base_id)
    .bind(params.user_id)
    .bind(params.role)
    .bind(params.job_description)
    .bind(params.adapted_content)
    .fetch_one(pool)
    .await
}

/// Newest first.
pub async fn list_versions(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<ResumeVersionRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        SELECT {VERSION_COLUMNS}
        FROM resume_versions v
        LEFT JOIN resume_base b ON b.id = v.resume_base_id
        WHERE v.user_id = $1
        ORDER BY v.created_at DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn find_version(
    pool: &PgPool,
    id: Uuid,
    user_id: Uuid,
) -> Result<Option<ResumeVersionRow>, sqlx::Error> {
    sqlx::query_as(&format!(
        r#"
        SELECT {VERSION_COLUMNS}
        FROM resume_versions v
        LEFT JOIN resume_base b ON b.id = v.resume_base_id
        WHERE v.id = $1 AND v.user_id = $2
        "#
    ))
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Returns `false` when no row owned by `user_id` matched.
pub async fn delete_version(pool: &PgPool, id: Uuid, user_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resume_versions WHERE id = $1 AND user_id = $2")
        .bind(id)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn count_versions(pool: &PgPool, user_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM resume_versions WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
}
