//! ATS-friendly single-column résumé layout.
//!
//! Section order: header, summary, skills, professional experience, projects,
//! education. Sections with no content are omitted entirely.

use serde_json::Value;

use super::canvas::PageCanvas;
use super::font_metrics::FontFace;

const NAME_SIZE: f32 = 24.0;
const HEADING_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;
const LINK_SIZE: f32 = 9.0;

const BODY_LEADING: f32 = BODY_SIZE * 1.3;
const HEADING_GAP_BEFORE: f32 = 7.0;
const HEADING_GAP_AFTER: f32 = 4.0;
const RULE_THICKNESS: f32 = 0.8;
const ENTRY_GAP: f32 = 6.0;
const BULLET_INDENT: f32 = 12.0;
const BULLET_TEXT_OFFSET: f32 = 8.0;
const BULLET_GAP: f32 = 2.0;
const COLUMN_GAP: f32 = 8.0;
const SEPARATOR: &str = " | ";

const SKILL_ROWS: [(&str, &str); 5] = [
    ("languages", "Programming Languages:"),
    ("frontend", "Frameworks & Libraries:"),
    ("backend", "Backend & APIs:"),
    ("databases", "Databases:"),
    ("tools", "DevOps & Tools:"),
];

pub fn layout_resume(resume: &Value, canvas: &mut PageCanvas) {
    let personal = &resume["personal_info"];

    draw_header(personal, canvas);

    if let Some(summary) = text_field(personal, "summary") {
        draw_heading("Summary", canvas);
        draw_paragraph(summary, FontFace::Regular, canvas.left(), canvas);
    }

    draw_skills(&resume["skills"], canvas);

    let experience = entries(&resume["experience"]);
    if !experience.is_empty() {
        draw_heading("Professional Experience", canvas);
        for exp in experience {
            let title = text_field(exp, "title").unwrap_or_default();
            let duration = text_field(exp, "duration").unwrap_or_default();
            draw_split_row(title, duration, FontFace::Bold, BODY_SIZE, canvas);

            let mut subtitle = text_field(exp, "company").unwrap_or_default().to_string();
            if let Some(location) = text_field(exp, "location") {
                subtitle.push_str(", ");
                subtitle.push_str(location);
            }
            if !subtitle.is_empty() {
                draw_paragraph(&subtitle, FontFace::Italic, canvas.left(), canvas);
            }
            draw_bullets(&exp["bullets"], canvas);
            canvas.advance(ENTRY_GAP);
        }
    }

    let projects = entries(&resume["projects"]);
    if !projects.is_empty() {
        draw_heading("Projects", canvas);
        for proj in projects {
            let mut title = text_field(proj, "name").unwrap_or_default().to_string();
            if let Some(tech) = text_field(proj, "technologies") {
                title.push_str(SEPARATOR);
                title.push_str(tech);
            }
            let link = text_field(proj, "link").map(display_url).unwrap_or_default();
            draw_split_row(&title, link, FontFace::Bold, LINK_SIZE, canvas);
            draw_bullets(&proj["bullets"], canvas);
            canvas.advance(ENTRY_GAP);
        }
    }

    let education = entries(&resume["education"]);
    if !education.is_empty() {
        draw_heading("Education", canvas);
        for edu in education {
            let mut degree = text_field(edu, "degree").unwrap_or_default().to_string();
            if let Some(field) = text_field(edu, "field") {
                degree.push_str(" in ");
                degree.push_str(field);
            }
            let duration = text_field(edu, "duration").unwrap_or_default();
            draw_split_row(&degree, duration, FontFace::Bold, BODY_SIZE, canvas);

            let mut subtitle = text_field(edu, "institution")
                .unwrap_or_default()
                .to_string();
            if let Some(gpa) = text_field(edu, "gpa") {
                subtitle.push_str(", CGPA: ");
                subtitle.push_str(gpa);
            }
            if !subtitle.is_empty() {
                draw_paragraph(&subtitle, FontFace::Italic, canvas.left(), canvas);
            }
            canvas.advance(ENTRY_GAP);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Blocks
// ────────────────────────────────────────────────────────────────────────────

fn draw_header(personal: &Value, canvas: &mut PageCanvas) {
    let name = text_field(personal, "name")
        .unwrap_or("YOUR NAME")
        .to_uppercase();
    let baseline = canvas.next_line(NAME_SIZE * 1.1);
    draw_centered(&name, FontFace::Bold, NAME_SIZE, baseline, canvas);
    canvas.advance(4.0);

    let contact: Vec<&str> = [
        text_field(personal, "phone"),
        text_field(personal, "email"),
        text_field(personal, "linkedin").map(display_url),
        text_field(personal, "github").map(display_url),
    ]
    .into_iter()
    .flatten()
    .collect();

    if !contact.is_empty() {
        let baseline = canvas.next_line(BODY_SIZE * 1.4);
        draw_centered(&contact.join(SEPARATOR), FontFace::Regular, BODY_SIZE, baseline, canvas);
    }
    canvas.advance(6.0);
}

/// Bold upper-case title with a full-width rule beneath it.
fn draw_heading(title: &str, canvas: &mut PageCanvas) {
    canvas.advance(HEADING_GAP_BEFORE);
    // Keep the heading with at least one body line.
    canvas.ensure_space(HEADING_SIZE * 1.2 + HEADING_GAP_AFTER + BODY_LEADING);
    let baseline = canvas.next_line(HEADING_SIZE * 1.2);
    let x = canvas.left();
    canvas.text(x, baseline, FontFace::Bold, HEADING_SIZE, &title.to_uppercase());
    canvas.rule(baseline - 3.0, RULE_THICKNESS);
    canvas.advance(HEADING_GAP_AFTER);
}

fn draw_skills(skills: &Value, canvas: &mut PageCanvas) {
    let rows: Vec<(&str, String)> = SKILL_ROWS
        .iter()
        .filter_map(|(key, label)| list_field(skills, key).map(|value| (*label, value)))
        .collect();
    if rows.is_empty() {
        return;
    }

    draw_heading("Skills", canvas);
    let bold = FontFace::Bold.metrics();
    let label_width = rows
        .iter()
        .map(|(label, _)| bold.width_pt(label, BODY_SIZE))
        .fold(0.0_f32, f32::max)
        + 6.0;

    for (label, value) in rows {
        let x = canvas.left() + label_width;
        let lines = FontFace::Regular
            .metrics()
            .wrap(&value, BODY_SIZE, canvas.right() - x);
        for (i, line) in lines.iter().enumerate() {
            let baseline = canvas.next_line(BODY_SIZE * 1.4);
            if i == 0 {
                let left = canvas.left();
                canvas.text(left, baseline, FontFace::Bold, BODY_SIZE, label);
            }
            canvas.text(x, baseline, FontFace::Regular, BODY_SIZE, line);
        }
    }
}

/// Left text wraps; right text stays on the first line, right-aligned.
fn draw_split_row(left: &str, right: &str, face: FontFace, right_size: f32, canvas: &mut PageCanvas) {
    let right_width = if right.is_empty() {
        0.0
    } else {
        face.metrics().width_pt(right, right_size) + COLUMN_GAP
    };
    let lines = face
        .metrics()
        .wrap(left, BODY_SIZE, canvas.content_width() - right_width);

    let baseline = canvas.next_line(BODY_LEADING);
    if let Some(first) = lines.first() {
        let x = canvas.left();
        canvas.text(x, baseline, face, BODY_SIZE, first);
    }
    if !right.is_empty() {
        let x = canvas.right() - face.metrics().width_pt(right, right_size);
        canvas.text(x, baseline, face, right_size, right);
    }
    for line in lines.iter().skip(1) {
        let baseline = canvas.next_line(BODY_LEADING);
        let x = canvas.left();
        canvas.text(x, baseline, face, BODY_SIZE, line);
    }
}

fn draw_paragraph(text: &str, face: FontFace, x: f32, canvas: &mut PageCanvas) {
    let lines = face.metrics().wrap(text, BODY_SIZE, canvas.right() - x);
    for line in lines {
        let baseline = canvas.next_line(BODY_LEADING);
        canvas.text(x, baseline, face, BODY_SIZE, &line);
    }
}

fn draw_bullets(bullets: &Value, canvas: &mut PageCanvas) {
    let Some(items) = bullets.as_array() else {
        return;
    };
    let items: Vec<&str> = items
        .iter()
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .collect();
    if items.is_empty() {
        return;
    }

    canvas.advance(BULLET_GAP);
    let bullet_x = canvas.left() + BULLET_INDENT;
    let text_x = bullet_x + BULLET_TEXT_OFFSET;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            canvas.advance(BULLET_GAP);
        }
        let lines = FontFace::Regular
            .metrics()
            .wrap(item, BODY_SIZE, canvas.right() - text_x);
        for (j, line) in lines.iter().enumerate() {
            let baseline = canvas.next_line(BODY_LEADING);
            if j == 0 {
                canvas.text(bullet_x, baseline, FontFace::Regular, BODY_SIZE, "\u{2022}");
            }
            canvas.text(text_x, baseline, FontFace::Regular, BODY_SIZE, line);
        }
    }
}

fn draw_centered(text: &str, face: FontFace, size: f32, baseline: f32, canvas: &mut PageCanvas) {
    let width = face.metrics().width_pt(text, size);
    let x = canvas.left() + ((canvas.content_width() - width) / 2.0).max(0.0);
    canvas.text(x, baseline, face, size, text);
}

// ────────────────────────────────────────────────────────────────────────────
// JSON access
// ────────────────────────────────────────────────────────────────────────────

/// Non-blank trimmed string at `key`.
fn text_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    value
        .get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Arrays are joined with ", "; strings are used verbatim. Empty yields `None`.
fn list_field(value: &Value, key: &str) -> Option<String> {
    match value.get(key)? {
        Value::Array(items) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    }
}

fn entries(value: &Value) -> Vec<&Value> {
    value
        .as_array()
        .map(|items| items.iter().filter(|v| v.is_object()).collect())
        .unwrap_or_default()
}

fn display_url(url: &str) -> &str {
    url.strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::super::render_resume_pdf;
    use super::*;
    use serde_json::json;

    fn sample_resume() -> Value {
        json!({
            "personal_info": {
                "name": "Ada Lovelace",
                "email": "ada@example.com",
                "phone": "+44 20 7946 0000",
                "linkedin": "https://linkedin.com/in/ada",
                "github": "http://github.com/ada",
                "summary": "Backend engineer focused on reliable distributed systems."
            },
            "skills": {
                "languages": ["Rust", "Python"],
                "frontend": [],
                "backend": "Axum, FastAPI",
                "databases": ["PostgreSQL"],
                "tools": ["Docker", "Kubernetes"]
            },
            "experience": [{
                "title": "Software Engineer",
                "company": "Analytical Engines Ltd",
                "location": "London",
                "duration": "2021 - Present",
                "bullets": ["Built a job queue handling 2M tasks/day", "Cut p99 latency by 40%"]
            }],
            "projects": [{
                "name": "cvmorph",
                "technologies": "Rust, Axum",
                "link": "https://github.com/ada/cvmorph",
                "bullets": ["Rendered PDFs without a browser"]
            }],
            "education": [{
                "institution": "University of London",
                "degree": "BSc",
                "field": "Mathematics",
                "duration": "2015 - 2019",
                "gpa": "3.9"
            }]
        })
    }

    #[test]
    fn test_display_url_strips_scheme() {
        assert_eq!(display_url("https://github.com/ada"), "github.com/ada");
        assert_eq!(display_url("http://ada.dev"), "ada.dev");
        assert_eq!(display_url("ada.dev"), "ada.dev");
    }

    #[test]
    fn test_list_field_joins_arrays_and_keeps_strings() {
        let skills = sample_resume()["skills"].clone();
        assert_eq!(list_field(&skills, "languages").as_deref(), Some("Rust, Python"));
        assert_eq!(list_field(&skills, "backend").as_deref(), Some("Axum, FastAPI"));
        assert_eq!(list_field(&skills, "frontend"), None);
        assert_eq!(list_field(&skills, "missing"), None);
    }

    #[test]
    fn test_full_resume_fits_one_page() {
        let mut canvas = PageCanvas::new();
        layout_resume(&sample_resume(), &mut canvas);
        assert_eq!(canvas.page_count(), 1);
    }

    #[test]
    fn test_long_experience_flows_onto_more_pages() {
        let mut resume = sample_resume();
        let bullets: Vec<String> = (0..15)
            .map(|i| format!("Delivered initiative number {i} which improved throughput, reliability and developer experience across several teams"))
            .collect();
        resume["experience"] = Value::Array(
            (0..8)
                .map(|i| json!({
                    "title": format!("Engineer {i}"),
                    "company": "Acme",
                    "duration": "2020",
                    "bullets": bullets,
                }))
                .collect(),
        );

        let bytes = render_resume_pdf(&resume).unwrap();
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert!(doc.get_pages().len() >= 2);
    }

    #[test]
    fn test_empty_document_still_renders_placeholder_header() {
        let bytes = render_resume_pdf(&json!({})).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
        let doc = lopdf::Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_mistyped_sections_are_skipped() {
        let resume = json!({
            "personal_info": "not an object",
            "skills": ["Rust"],
            "experience": {"title": "x"},
            "projects": [1, 2, 3],
            "education": null
        });
        let mut canvas = PageCanvas::new();
        layout_resume(&resume, &mut canvas);
        assert_eq!(canvas.page_count(), 1);
    }

    #[tokio::test]
    async fn test_render_on_blocking_pool() {
        let bytes = super::super::render_resume_pdf_blocking(sample_resume())
            .await
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
