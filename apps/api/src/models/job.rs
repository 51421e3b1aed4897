use serde::{Deserialize, Serialize};

/// Structured job posting. Produced by the job analyzer or supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub key_responsibilities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_values: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education: Option<Vec<String>>,
}

impl JobDescription {
    /// Required skills followed by preferred skills.
    pub fn all_skills(&self) -> impl Iterator<Item = &String> {
        self.required_skills.iter().chain(&self.preferred_skills)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_default_to_empty() {
        let job: JobDescription = serde_json::from_str(r#"{"title": "Data Engineer"}"#).unwrap();
        assert_eq!(job.title, "Data Engineer");
        assert!(job.required_skills.is_empty());
        assert!(job.key_responsibilities.is_empty());
        assert!(job.company.is_none());
    }

    #[test]
    fn test_all_skills_keeps_required_first() {
        let job = JobDescription {
            title: "SRE".to_string(),
            required_skills: vec!["Linux".to_string()],
            preferred_skills: vec!["Go".to_string()],
            ..Default::default()
        };
        let skills: Vec<&String> = job.all_skills().collect();
        assert_eq!(skills, vec!["Linux", "Go"]);
    }
}
