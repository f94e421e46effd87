use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// The candidate's profile. Skills are matched against job tags case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub resume_text: String,
    pub resume_file_name: Option<String>,
    pub skills: Vec<String>,
    pub experience_years: u32,
}

/// Partial update of the editable profile fields. Skills and the resume file
/// have their own commands.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub resume_text: Option<String>,
    pub experience_years: Option<u32>,
}

impl UserProfile {
    pub fn skill_set(&self) -> HashSet<String> {
        self.skills.iter().map(|s| s.to_lowercase()).collect()
    }

    /// Name shown in the agent log when attaching a resume.
    pub fn resume_attachment_name(&self) -> &str {
        self.resume_file_name
            .as_deref()
            .unwrap_or("Default_Resume.pdf")
    }

    pub fn apply(&mut self, update: ProfileUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(resume_text) = update.resume_text {
            self.resume_text = resume_text;
        }
        if let Some(years) = update.experience_years {
            self.experience_years = years;
        }
    }

    /// Adds a trimmed skill. Returns false when blank or already present.
    pub fn add_skill(&mut self, skill: &str) -> bool {
        let skill = skill.trim();
        if skill.is_empty() || self.skills.iter().any(|s| s == skill) {
            return false;
        }
        self.skills.push(skill.to_string());
        true
    }

    /// Removes an exact-match skill. Returns false when absent.
    pub fn remove_skill(&mut self, skill: &str) -> bool {
        let before = self.skills.len();
        self.skills.retain(|s| s != skill);
        self.skills.len() != before
    }
}
