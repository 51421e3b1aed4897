//! Shared test fixtures for resumes and job descriptions.

use super::job::JobDescription;
use super::resume::{ContactInfo, Education, Experience, Resume, Skills};

/// "Experienced engineer." with a single technical skill (Java).
pub fn sample_resume() -> Resume {
    Resume {
        contact: ContactInfo {
            name: "Sam Rivera".to_string(),
            email: "sam@example.com".to_string(),
            ..Default::default()
        },
        summary: "Experienced engineer.".to_string(),
        skills: Skills {
            technical: vec!["Java".to_string()],
            ..Default::default()
        },
        experience: vec![Experience {
            title: "Software Engineer".to_string(),
            company: "Initech".to_string(),
            duration: "2019 - 2024".to_string(),
            responsibilities: vec!["Maintained billing services".to_string()],
            ..Default::default()
        }],
        education: vec![Education {
            degree: "BSc Computer Science".to_string(),
            institution: "State University".to_string(),
            year: "2019".to_string(),
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// Python Developer posting requiring Python and AWS.
pub fn python_job() -> JobDescription {
    JobDescription {
        title: "Python Developer".to_string(),
        required_skills: vec!["Python".to_string(), "AWS".to_string()],
        ..Default::default()
    }
}

pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
