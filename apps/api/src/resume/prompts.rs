// Prompt text for resume analysis and rewriting.

pub const RESUME_ANALYSIS_PROMPT: &str = r#"You are a FAANG hiring manager and expert resume strategist. Analyze this resume (file attached; text provided) and respond in strict JSON.
Focus on extracting quantifiable impact, separating hard/soft skills, and structuring project data.
JSON Schema:
{
  "atsScore": number 0-100,
  "strengths": [string],
  "weaknesses": [string],
  "techSkills": [string],
  "softSkills": [string],
  "keywords": [string],
  "projects": [{ "name": string, "tech": string, "description": string, "impact": string }],
  "workExperience": [{ "role": string, "company": string, "duration": string, "description": string }],
  "leadership": [{ "role": string, "organization": string, "duration": string, "description": string }],
  "education": [{ "degree": string, "school": string, "year": string }],
  "impactMetrics": [string],
  "domain": string,
  "bulletPoints": [string],
  "rewritten": string,
  "comparisonNote": string
}
techSkills are languages, frameworks and tools; softSkills are leadership, communication and similar.
impactMetrics are quantified results such as "Reduced latency by 50%".
bulletPoints are the 3 strongest bullet points found. rewritten is a 3-4 line professional summary.
comparisonNote is a one-sentence assessment of candidate level (Entry/Senior/Staff).
Be precise. Identify metrics even if hidden in text."#;

pub const PLAIN_REWRITE_PROMPT: &str = r#"You are a resume rewriting assistant. Rewrite the resume content to be concise, ATS-friendly, and quantified where possible.
Respond in strict JSON with:
{
  "rewritten": string,
  "bulletPoints": [string],
  "keywords": [string],
  "skills": [string],
  "rewrittenFull": string
}
rewritten is a concise top summary, rewrittenFull the full text rewrite.
Avoid markdown."#;

/// Replace `{sections}` with the JSON of the input sections.
pub const SECTIONS_REWRITE_PROMPT: &str = r#"You are a FAANG Resume Strategist. Rewrite each section of the candidate's resume for a side-by-side comparison with the original.

CRITICAL INSTRUCTION:
1. Keep EXACTLY the same number of items in workExperience, projects and leadership as the input, in the same order.
2. Keep EXACTLY the same number of bullets per item as the input item's "bullets", but make each one stronger (Action + Impact + Metric).
3. If there is a target job description, tailor every bullet to it.

Input Data:
{sections}

Respond in strict JSON:
{
  "rewritten": string,
  "workExperience": [{ "role": string, "company": string, "duration": string, "description": string, "bullets": [string] }],
  "projects": [{ "name": string, "tech": string, "description": string, "bullets": [string] }],
  "leadership": [{ "role": string, "organization": string, "bullets": [string] }]
}
rewritten is the professional summary.
Avoid markdown."#;

/// Appended when the rewrite targets a job description. Replace `{jd}`.
pub const TAILORING_BLOCK: &str = r#"

TARGET JOB DESCRIPTION:
{jd}

Tailoring Instructions:
1. Inject keywords from the JD into the bullet points.
2. Rephrase weak verbs into strong verbs matching the JD's level (e.g. "Helped" -> "Architected")."#;

/// Sent on the single retry after the model changed the number of items.
/// Replace `{expected}`.
pub const ITEM_COUNT_REMINDER: &str = r#"

Your previous answer did not keep the item counts. The output MUST contain exactly: {expected}."#;
