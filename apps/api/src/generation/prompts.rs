// All LLM prompt constants for the Generation module.
// Reuses cross-cutting fragments from llm_client::prompts.

/// System prompt for job analysis. Enforces JSON-only output.
pub const JOB_ANALYSIS_SYSTEM: &str =
    "You are an expert job description analyst and resume strategist. \
    Parse a job description and extract structured information. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Job analysis prompt template. Replace `{job_text}` before sending.
pub const JOB_ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following job description and extract:
1. Job title
2. Company name (if mentioned)
3. Location (if mentioned)
4. Required skills and technologies
5. Preferred skills and qualifications
6. Key responsibilities
7. Company values and culture hints
8. Years of experience required
9. Education requirements

Job Description:
{job_text}

Return a JSON object with this EXACT schema:
{
  "title": "",
  "company": "",
  "location": "",
  "required_skills": [],
  "preferred_skills": [],
  "key_responsibilities": [],
  "company_values": [],
  "experience_years": "",
  "education": []
}

Every array must have at least one element if the information is present in the job description.
Return ONLY the JSON object."#;

/// System prompt for resume parsing. Enforces JSON-only output.
pub const RESUME_PARSE_SYSTEM: &str =
    "You are an expert resume analyst. \
    Extract structured information from resume text exactly as written. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Resume parsing prompt template. Replace `{resume_text}` before sending.
pub const RESUME_PARSE_PROMPT_TEMPLATE: &str = r#"Extract the following information from the resume text:
1. Contact information
2. Professional summary
3. Skills (technical and soft skills)
4. Work experience
5. Education
6. Certifications
7. Projects (if any)

Resume text:
{resume_text}

Return a JSON object with this EXACT schema:
{
  "contact": {"name": "", "email": "", "phone": "", "linkedin": ""},
  "summary": "",
  "skills": {"technical": [], "soft": []},
  "experience": [
    {"title": "", "company": "", "location": "", "duration": "", "responsibilities": []}
  ],
  "education": [
    {"degree": "", "institution": "", "location": "", "year": ""}
  ],
  "certifications": [],
  "projects": [
    {"name": "", "description": "", "technologies": []}
  ]
}

Copy facts verbatim. Leave a field empty rather than guessing.
Return ONLY the JSON object."#;

/// System prompt for tailored resume generation.
pub const GENERATION_SYSTEM: &str =
    "You are a professional resume writer and career coach. \
    You rewrite resumes to target a specific job. \
    You MUST respond with a single valid JSON object only. \
    Do NOT include markdown formatting or any text outside the JSON.";

/// Tailored resume prompt template.
/// Replace: `{no_fabrication}`, `{resume_json}`, `{job_json}`, `{keywords}`.
pub const GENERATION_PROMPT_TEMPLATE: &str = r#"Create a tailored resume based on the applicant's existing resume and the job they are applying for.

{no_fabrication}

Current Resume:
{resume_json}

Job Description:
{job_json}

User-Specified Keywords to Include (prioritize these):
{keywords}

Guidelines:
1. Highlight skills and experiences that match the job requirements
2. Quantify achievements where the resume already provides the numbers
3. Use relevant keywords from the job description
4. Prioritize recent and relevant experience
5. Focus on impact and results, not just responsibilities
6. Keep the resume concise and focused
7. Incorporate the user-specified keywords naturally

Return the result as a JSON object with the same structure as the current resume.
Return ONLY the JSON object."#;
