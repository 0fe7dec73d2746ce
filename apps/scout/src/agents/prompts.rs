// All LLM prompt constants for the agents.
// Reuses the two-section reply contract from llm_client::prompts.

/// Model for the YES/NO fit check. Cheap and fast is enough.
pub const VALIDATION_MODEL: &str = "google/gemini-2.5-flash";
/// Model for resume suggestions and cover letters.
pub const GENERATION_MODEL: &str = "google/gemini-2.5-pro";
/// Model for reviewing generated content.
pub const REVIEW_MODEL: &str = "google/gemini-2.5-pro";

pub const VALIDATION_SYSTEM: &str = "You are a strict job validation agent. \
    You decide whether a job posting fits a candidate's ideal job profile. \
    Answer with a single word: YES or NO. \
    Do NOT include explanations.";

/// Validation prompt template.
/// Replace: {title}, {company}, {location}, {ideal_profile}, {description}
pub const VALIDATION_PROMPT_TEMPLATE: &str = r#"Decide if this job posting is a good fit for the candidate.

IDEAL JOB PROFILE:
---
{ideal_profile}
---

JOB POSTING:
---
Title: {title}
Company: {company}
Location: {location}
Description:
{description}
---

CRITICAL INSTRUCTIONS:
1. Adhere strictly to exclusions: you MUST reject any job whose title contains a senior-level marker such as "Senior", "Lead", "Group", "Director" or "Head". The candidate is NOT looking for senior roles.
2. Verify experience level: if the description requires more than 5 years of experience, you MUST reject it.
3. No exceptions: do not make exceptions because some keywords match. Seniority and experience requirements come first.

Is this job a good fit? Answer with only "YES" or "NO"."#;

pub const GENERATION_SYSTEM: &str = "You are an expert career coach and resume writer. \
    You help a candidate tailor their resume and write a compelling cover letter \
    for one specific job posting. \
    Use ONLY facts present in the candidate's resume; never invent experience.";

/// Generation prompt template.
/// Replace: {title}, {company}, {location}, {feedback_section}, {format_instruction},
///          {resume_json}, {ideal_profile}, {writing_samples}, {description}
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"CANDIDATE RESUME (JSON):
---
{resume_json}
---

CANDIDATE IDEAL JOB PROFILE:
---
{ideal_profile}
---

CANDIDATE WRITING STYLE (emulate this voice in the cover letter):
---
{writing_samples}
---

THE JOB:
---
Title: {title}
Company: {company}
Location: {location}
Description:
{description}
---
{feedback_section}
YOUR TASK:
1. Resume Suggestions: 3-5 specific, actionable bullet points on how to tailor the resume to this job.
2. Cover Letter: a compelling, professional cover letter of 2-3 paragraphs.

{format_instruction}
The first section is the resume suggestions, the second section is the cover letter:

[Resume Suggestions]
---SPLIT---
[Cover Letter]"#;

/// Inserted when the previous attempt was rejected. Replace: {reason}
pub const FEEDBACK_TEMPLATE: &str = r#"
FEEDBACK FROM PREVIOUS ATTEMPT:
The previous version was rejected for this reason: "{reason}".
Address this feedback carefully in the new draft.
"#;

/// Inserted on the last allowed attempt.
pub const FINAL_ATTEMPT_NOTICE: &str = r#"
THIS IS THE FINAL ATTEMPT.
Produce the highest quality content you can: it will be sent to the candidate without further review.
"#;

/// Used when no writing samples are configured.
pub const NO_WRITING_SAMPLES: &str = "(no samples provided; use a warm, concise, professional voice)";

/// Joins writing samples inside the generation prompt.
pub const SAMPLE_DIVIDER: &str = "\n---\n";

pub const REVIEW_SYSTEM: &str = "You are a professional editor and career coach. \
    You review AI-generated job application content and decide whether it is \
    high quality, professional and tailored to the job.";

/// Review prompt template.
/// Replace: {title}, {company}, {format_instruction}, {description},
///          {resume_suggestions}, {cover_letter}
pub const REVIEW_PROMPT_TEMPLATE: &str = r#"THE JOB:
---
Title: {title}
Company: {company}
Description:
{description}
---

CONTENT TO REVIEW:
---
Resume Suggestions:
{resume_suggestions}

Cover Letter:
{cover_letter}
---

YOUR TASK:
1. Decide whether the content is high quality, professional and tailored to this job.
2. The first section contains ONLY "YES" or "NO".
3. The second section is a brief, one-sentence reason for the decision.

{format_instruction}
Example:

YES
---SPLIT---
The cover letter connects the candidate's experience directly to the job requirements."#;
