// Prompt templates for résumé adaptation and upload parsing.
// Placeholders are replaced with `str::replace` before sending.

/// Role rewrite prompt. Replace `{role}`, `{keywords}`, then `{resume_json}` last.
pub const ADAPT_PROMPT_TEMPLATE: &str = r#"Rewrite this resume for {role} role. Keep all facts accurate. Return ONLY valid JSON.

TARGET: {role}
FOCUS: {keywords}

ORIGINAL:
{resume_json}

RULES:
1. NEVER invent experience
2. Only rewrite bullet points
3. Keep job titles, companies, dates exact
4. Reorder skills by relevance

Return this JSON (no markdown):
{
  "personal_info": {...same...},
  "education": [...same...],
  "experience": [...rewritten bullets...],
  "projects": [...reordered...],
  "skills": {...reordered...}
}"#;

/// Structured extraction prompt for uploaded résumés. Replace `{raw_text}`.
pub const PARSE_PROMPT_TEMPLATE: &str = r#"Extract resume data from this text and return ONLY valid JSON. No markdown, no explanations, ONLY the JSON object.

Resume Text:
{raw_text}

Return EXACTLY this structure:
{
  "personal_info": {
    "name": "Full Name",
    "phone": "+91-1234567890",
    "email": "email@example.com",
    "linkedin": "https://linkedin.com/in/username",
    "github": "https://github.com/username",
    "portfolio": "https://website.com",
    "title": "Job Title",
    "summary": "Professional summary if available"
  },
  "skills": {
    "languages": ["JavaScript", "Python"],
    "frontend": ["React", "Next.js"],
    "backend": ["Node.js", "Express"],
    "databases": ["PostgreSQL", "MongoDB"],
    "tools": ["Git", "Docker"]
  },
  "experience": [
    {
      "title": "Job Title",
      "company": "Company Name",
      "location": "City, State",
      "duration": "Start Date - End Date",
      "bullets": ["Achievement 1", "Achievement 2"]
    }
  ],
  "projects": [
    {
      "name": "Project Name",
      "technologies": "Tech Stack",
      "link": "https://github.com/user/project",
      "bullets": ["Feature 1", "Feature 2"]
    }
  ],
  "education": [
    {
      "institution": "University Name",
      "degree": "Degree Type",
      "field": "Field of Study",
      "duration": "Year Range",
      "gpa": "GPA if available"
    }
  ]
}

IMPORTANT: Return ONLY the JSON. No text before or after."#;
