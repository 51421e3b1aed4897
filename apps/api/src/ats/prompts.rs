// LLM prompt constants for the ATS module.

/// Keyword extraction prompt. Replace `{job_description}` before sending.
pub const KEYWORD_PROMPT_TEMPLATE: &str = r#"Extract important keywords from this job description that would be
relevant for ATS (Applicant Tracking System) screening. Focus on hard skills,
technical abilities, tools, and domain knowledge.

JOB DESCRIPTION:
{job_description}

Return ONLY a JSON array of keywords, with no explanation.
For example: ["Python", "AWS", "Machine Learning"]"#;

/// Summary/skills rewrite prompt.
/// Replace: {no_fabrication}, {resume_summary}, {resume_skills}, {job_title}, {missing_keywords}
pub const PATCH_PROMPT_TEMPLATE: &str = r#"Optimize this resume summary and skills list for ATS systems.

{no_fabrication}

Current Summary: {resume_summary}

Current Skills: {resume_skills}

Job Title: {job_title}

Missing Keywords: {missing_keywords}

Return ONLY a JSON object with:
{
  "summary": "improved summary with keywords naturally incorporated",
  "skills": ["skill1", "skill2"]
}"#;
