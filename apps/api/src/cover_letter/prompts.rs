/// Replace `{candidate}` and `{job}` with JSON context.
pub const COVER_LETTER_PROMPT: &str = r#"You are an expert career coach. Write a compelling, FAANG-level cover letter for this candidate targeting this specific job.

Candidate Profile:
{candidate}

Target Job:
{job}

Tone: Professional, confident, and enthusiastic.
Format: Markdown.
Structure:
1. Header (Placeholder info)
2. Hook (Aligning passion/domain with company mission)
3. The "Why Me" (Connecting 2-3 specific resume achievements to job requirements)
4. The "Why You" (Showing understanding of company culture/product)
5. Call to Action.

Respond in strict JSON:
{
  "coverLetter": string
}
coverLetter is the full markdown content."#;
