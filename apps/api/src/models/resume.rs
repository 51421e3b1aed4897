use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub duration: String,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub achievements: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub highlights: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Skills {
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Option<Vec<String>>,
    #[serde(default)]
    pub languages: Option<Vec<String>>,
    #[serde(default)]
    pub certifications: Option<Vec<String>>,
}

/// A structured resume. The ATS code treats values of this type as immutable
/// inputs and always hands back a new `Resume`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Resume {
    pub contact: ContactInfo,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub skills: Skills,
    #[serde(default)]
    pub experience: Vec<Experience>,
    #[serde(default)]
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Option<Vec<Project>>,
    #[serde(default)]
    pub certifications: Option<Vec<String>>,
    #[serde(default)]
    pub publications: Option<Vec<String>>,
    #[serde(default)]
    pub awards: Option<Vec<String>>,
}

impl Resume {
    /// Technical skills followed by soft skills, as shown to the rewrite prompt.
    pub fn combined_skills(&self) -> Vec<&str> {
        self.skills
            .technical
            .iter()
            .chain(self.skills.soft.iter().flatten())
            .map(String::as_str)
            .collect()
    }
}
