//! Record validation: the same rules the résumé form enforces before it
//! lets the user generate. Generation is never attempted on a failing record.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::models::ResumeRecord;

/// Message shown to the user when any field fails.
pub const VALIDATION_SUMMARY: &str = "Please go back and fill all required fields correctly.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldError {
    /// Path into the record, e.g. `education[0].school`.
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every failing field of a record, in record order.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{} field(s) failed validation", .fields.len())]
pub struct ValidationErrors {
    pub fields: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn summary(&self) -> &'static str {
        VALIDATION_SUMMARY
    }
}

/// Collects failures for one record. Kept as a small builder so every rule
/// reads as one line below.
#[derive(Default)]
struct Checker {
    fields: Vec<FieldError>,
}

impl Checker {
    fn required(&mut self, field: String, value: &str, message: &str) {
        if value.trim().is_empty() {
            self.fields.push(FieldError::new(field, message));
        }
    }

    fn optional_url(&mut self, field: &str, value: &str) {
        let value = value.trim();
        if !value.is_empty() && !is_absolute_url(value) {
            self.fields.push(FieldError::new(field, "Must be a valid URL"));
        }
    }

    fn email(&mut self, field: &str, value: &str) {
        if !is_plausible_email(value.trim()) {
            self.fields.push(FieldError::new(field, "Invalid email address"));
        }
    }
}

fn is_absolute_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| u.has_host() && !u.cannot_be_a_base())
        .unwrap_or(false)
}

/// `local@domain.tld` with no whitespace. Deliverability is not our concern.
fn is_plausible_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && tld.len() >= 2,
        None => false,
    }
}

/// Validates a record against the form schema.
///
/// Returns all failures at once so the caller can point at every field.
pub fn validate_record(record: &ResumeRecord) -> Result<(), ValidationErrors> {
    let mut check = Checker::default();
    let info = &record.personal_info;

    check.required("personalInfo.name".into(), &info.name, "Name is required");
    check.email("personalInfo.email", &info.email);
    check.required("personalInfo.phone".into(), &info.phone, "Phone number is required");
    check.optional_url("personalInfo.linkedin", &info.linkedin);
    check.optional_url("personalInfo.github", &info.github);
    check.optional_url("personalInfo.website", &info.website);

    for (i, edu) in record.education.iter().enumerate() {
        check.required(format!("education[{i}].school"), &edu.school, "School name is required");
        check.required(format!("education[{i}].degree"), &edu.degree, "Degree is required");
    }

    for (i, exp) in record.experience.iter().enumerate() {
        check.required(format!("experience[{i}].company"), &exp.company, "Company name is required");
        check.required(format!("experience[{i}].title"), &exp.title, "Job title is required");
        check.required(
            format!("experience[{i}].description"),
            &exp.description,
            "Description is required",
        );
    }

    for (i, proj) in record.projects.iter().enumerate() {
        check.required(format!("projects[{i}].name"), &proj.name, "Project name is required");
        check.required(
            format!("projects[{i}].description"),
            &proj.description,
            "Description is required",
        );
    }

    for (i, publication) in record.publications.iter().enumerate() {
        check.required(format!("publications[{i}].title"), &publication.title, "Title is required");
    }

    for (i, honor) in record.honors.iter().enumerate() {
        check.required(format!("honors[{i}].title"), &honor.title, "Title is required");
    }

    for (i, vol) in record.volunteer_experience.iter().enumerate() {
        check.required(
            format!("volunteerExperience[{i}].organization"),
            &vol.organization,
            "Organization is required",
        );
        check.required(format!("volunteerExperience[{i}].role"), &vol.role, "Role is required");
    }

    if check.fields.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors {
            fields: check.fields,
        })
    }
}
