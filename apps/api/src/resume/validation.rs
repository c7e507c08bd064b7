use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::extraction::validation::looks_like_email;
use crate::models::resume::ResumeContent;

const ARRAY_SECTIONS: [(&str, &str); 3] = [
    ("education", "Education must be an array"),
    ("experience", "Experience must be an array"),
    ("projects", "Projects must be an array"),
];

/// Checks a submitted résumé body and fills omitted (or null) sections with
/// their empty defaults. Keys outside the five sections are ignored.
pub fn parse_resume_body(body: Value) -> Result<ResumeContent, AppError> {
    let Value::Object(mut map) = body else {
        return Err(invalid("Resume data must be a JSON object"));
    };
    let mut content = ResumeContent::default();

    if let Some(personal_info) = take(&mut map, "personal_info") {
        let fields = personal_info
            .as_object()
            .ok_or_else(|| invalid("Personal info must be an object"))?;
        check_personal_info(fields)?;
        content.personal_info = personal_info;
    }

    for (key, message) in ARRAY_SECTIONS {
        if let Some(section) = take(&mut map, key) {
            if !section.is_array() {
                return Err(invalid(message));
            }
            match key {
                "education" => content.education = section,
                "experience" => content.experience = section,
                _ => content.projects = section,
            }
        }
    }

    if let Some(skills) = take(&mut map, "skills") {
        if !skills.is_object() {
            return Err(invalid("Skills must be an object"));
        }
        content.skills = skills;
    }

    Ok(content)
}

fn check_personal_info(fields: &Map<String, Value>) -> Result<(), AppError> {
    match fields.get("name") {
        None | Some(Value::Null) => {}
        Some(Value::String(name)) if !name.trim().is_empty() => {}
        Some(_) => return Err(invalid("Name cannot be empty")),
    }

    match fields.get("email") {
        None | Some(Value::Null) => {}
        Some(Value::String(email)) if email.trim().is_empty() => {}
        Some(Value::String(email)) if looks_like_email(email.trim()) => {}
        Some(_) => return Err(invalid("Invalid email in personal info")),
    }
    Ok(())
}

fn take(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.remove(key).filter(|v| !v.is_null())
}

fn invalid(message: &str) -> AppError {
    AppError::Validation(message.to_string())
}
