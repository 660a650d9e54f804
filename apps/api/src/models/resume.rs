use serde::{Deserialize, Serialize};

/// End-month value meaning the education entry is still in progress.
pub const PRESENT_SENTINEL: &str = "Present";

/// Snapshot of the form data at the moment the user hits "generate".
///
/// Every string field uses `""` for "absent". Sequences may be empty.
/// Generation code only ever borrows this.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub personal_info: PersonalInfo,
    pub education: Vec<Education>,
    pub experience: Vec<Experience>,
    pub projects: Vec<Project>,
    pub skills: Skills,
    pub publications: Vec<Publication>,
    pub honors: Vec<Honor>,
    pub volunteer_experience: Vec<VolunteerExperience>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub github: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    /// Opaque list key from the form; never rendered.
    pub id: String,
    pub school: String,
    pub degree: String,
    pub major: String,
    pub cgpa: String,
    pub start_month: String,
    pub start_year: String,
    /// `"Present"` marks an ongoing programme; `end_year` is then ignored.
    pub end_month: String,
    pub end_year: String,
}

impl Education {
    pub fn is_ongoing(&self) -> bool {
        self.end_month.trim() == PRESENT_SENTINEL
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub id: String,
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    /// One bullet per line, optionally prefixed with `•`.
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub technologies: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Skills {
    pub languages: String,
    pub frameworks: String,
    pub tools: String,
}

impl Skills {
    /// True when none of the three groups has any visible text.
    pub fn is_empty(&self) -> bool {
        [&self.languages, &self.frameworks, &self.tools]
            .iter()
            .all(|group| group.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Publication {
    pub id: String,
    pub title: String,
    pub publisher: String,
    pub date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Honor {
    pub id: String,
    pub title: String,
    pub issuer: String,
    pub date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VolunteerExperience {
    pub id: String,
    pub organization: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}
