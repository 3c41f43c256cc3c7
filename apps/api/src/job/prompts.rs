// Prompt text for job-description analysis, resume matching and job intel.

pub const JD_ANALYSIS_PROMPT: &str = r#"You are an expert technical recruiter. Analyze this Job Description and extract critical hiring signals.
Respond in strict JSON:
{
  "title": string,
  "company": string,
  "requiredSkills": [string],
  "preferredSkills": [string],
  "roleFocus": string,
  "seniorityLevel": string,
  "hiddenSignals": [string]
}
company is the company name, or "Unknown" if it cannot be inferred.
requiredSkills are must-have technical skills, preferredSkills nice-to-haves.
roleFocus is one of "Backend", "AI/ML", "Frontend", "System Design", "Product".
seniorityLevel is one of "Junior", "Senior", "Staff", "Principal".
hiddenSignals are cultural or operational signals such as "Fast-paced", "Ownership", "On-call", "Legacy code".
Avoid markdown."#;

/// Replace `{resume}` and `{jd}` with JSON context.
pub const MATCH_PROMPT: &str = r#"You are a FAANG Hiring Manager. Evaluate this candidate against the job description.
Perform a deep semantic match (not just keywords).

Resume: {resume}
Job Description: {jd}

Respond in strict JSON:
{
  "score": number,
  "missingSkills": [string],
  "strongMatches": [string],
  "gapAnalysis": string,
  "recommendation": string,
  "reasoning": string
}
score is 0-100; be strict, 80+ is a strong hire signal.
gapAnalysis is 2-3 sentences on what is missing.
recommendation is one of "Apply Now", "Tailor Resume", "Not a Fit".
Avoid markdown."#;

/// Replace `{job_description}` and `{resume_block}`.
pub const JOB_INTEL_PROMPT: &str = r#"You are an interview and ATS expert. Given a job description and optionally a candidate resume, return concise JSON only.

Job Description:
"""
{job_description}
"""
{resume_block}
Return JSON with keys:
- summary: one-sentence overview of the role.
- jobData: object with title, company, location, level, employmentType, compensation, team/stack if present.
- requirements: array of the 5-8 most critical requirements.
- techStack: array of tools, languages, frameworks, clouds.
- exampleResume: a tailored resume snippet (concise sections with bullets) that fits this role.
- resumeSuggestions: (only if resume provided) 5-8 targeted changes the candidate should make for this job.
- tailoredBullets: (only if resume provided) 3-6 bullet rewrites aligned to the JD.
- gaps: (only if resume provided) 3-6 gaps or missing proof points.
"#;
