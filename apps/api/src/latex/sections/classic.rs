//! Classic variant: `\resumeSubheading` rows inside sub-heading lists,
//! descriptions as itemized bullets (one `\item` per line).

use super::{bullet_lines, clause, date_range, education_range, section, Substitution};
use crate::latex::escape::esc;
use crate::latex::templates::{self, classic};
use crate::models::{PersonalInfo, ResumeRecord, Skills};

const LIST_OPEN: &str = "\\resumeSubHeadingListStart\n";
const LIST_CLOSE: &str = "\n\\resumeSubHeadingListEnd";
const ENTRY_SEP: &str = "\n";

pub fn compose(record: &ResumeRecord) -> Vec<Substitution> {
    let info = &record.personal_info;
    vec![
        (templates::NAME, esc(&info.name)),
        (templates::EMAIL, esc(&info.email)),
        (templates::PHONE, esc(&info.phone)),
        (classic::LINKEDIN_LINK, link(&info.linkedin, "LinkedIn")),
        (classic::GITHUB_LINK, link(&info.github, "GitHub")),
        (classic::WEBSITE_LINK, website(info)),
        (classic::EDUCATION, education(record)),
        (classic::SKILLS, skills(&record.skills)),
        (classic::EXPERIENCE, experience(record)),
        (classic::PROJECTS, projects(record)),
        (classic::PUBLICATIONS, publications(record)),
        (classic::HONORS, honors(record)),
        (classic::VOLUNTEER, volunteer(record)),
    ]
}

fn link(url: &str, label: &str) -> String {
    if url.trim().is_empty() {
        return String::new();
    }
    format!(" $|$ \\href{{{}}}{{{label}}}", esc(url.trim()))
}

fn website(info: &PersonalInfo) -> String {
    let url = info.website.trim();
    if url.is_empty() {
        return String::new();
    }
    let escaped = esc(url);
    format!(" $|$ \\href{{{escaped}}}{{{escaped}}}")
}

/// Itemized bullets, or nothing when the description has no visible lines.
fn item_list(description: &str) -> String {
    let lines = bullet_lines(description);
    if lines.is_empty() {
        return String::new();
    }
    let items: Vec<String> = lines.iter().map(|l| format!("    \\item {l}")).collect();
    format!(
        "\n  \\resumeItemListStart\n{}\n  \\resumeItemListEnd",
        items.join("\n")
    )
}

fn education(record: &ResumeRecord) -> String {
    let entries = record
        .education
        .iter()
        .map(|edu| {
            format!(
                "  \\resumeSubheading{{{}}}{{{}}}{{{}{}}}{{{}}}",
                esc(&edu.school),
                education_range(edu),
                esc(&edu.degree),
                clause(" in ", &edu.major),
                clause("GPA: ", &edu.cgpa),
            )
        })
        .collect();
    section("Education", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

fn skills(skills: &Skills) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let entries = [
        ("Languages", &skills.languages),
        ("Frameworks", &skills.frameworks),
        ("Tools", &skills.tools),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, value)| format!("  \\resumeSubItem{{{label}}}{{{}}}", esc(value.trim())))
    .collect();
    section("Skills", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

fn experience(record: &ResumeRecord) -> String {
    let entries = record
        .experience
        .iter()
        .map(|exp| {
            format!(
                "  \\resumeSubheading{{{}}}{{{}}}{{{}}}{{}}{}",
                esc(&exp.title),
                date_range(&exp.start_date, &exp.end_date),
                esc(&exp.company),
                item_list(&exp.description),
            )
        })
        .collect();
    section("Experience", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

fn projects(record: &ResumeRecord) -> String {
    let entries = record
        .projects
        .iter()
        .map(|proj| {
            format!(
                "  \\resumeSubheading{{{}}}{{}}{{{}}}{{}}{}",
                esc(&proj.name),
                clause("Technologies: ", &proj.technologies),
                item_list(&proj.description),
            )
        })
        .collect();
    section("Projects", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

fn publications(record: &ResumeRecord) -> String {
    let entries = record
        .publications
        .iter()
        .map(|publication| {
            format!(
                "  \\resumeSubheading{{{}}}{{{}}}{{{}}}{{}}{}",
                esc(&publication.title),
                esc(publication.date.trim()),
                esc(publication.publisher.trim()),
                item_list(&publication.description),
            )
        })
        .collect();
    section("Publications", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

fn honors(record: &ResumeRecord) -> String {
    let entries = record
        .honors
        .iter()
        .map(|honor| {
            let issuer = if honor.issuer.trim().is_empty() {
                String::new()
            } else {
                format!(", \\textit{{{}}}", esc(honor.issuer.trim()))
            };
            format!(
                "  \\item \\textbf{{{}}}{issuer}{}",
                esc(&honor.title),
                clause(" \\hfill ", &honor.date),
            )
        })
        .collect();
    section("Honors \\& Awards", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

fn volunteer(record: &ResumeRecord) -> String {
    let entries = record
        .volunteer_experience
        .iter()
        .map(|vol| {
            format!(
                "  \\resumeSubheading{{{}}}{{{}}}{{{}}}{{}}{}",
                esc(&vol.role),
                date_range(&vol.start_date, &vol.end_date),
                esc(&vol.organization),
                item_list(&vol.description),
            )
        })
        .collect();
    section("Volunteer Experience", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}
