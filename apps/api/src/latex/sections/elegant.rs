//! Elegant variant: `\resumeentry` blocks, bullets through the
//! `\resumeliststart` / `\resumeitem` macros, icon-prefixed contact links.

use super::{bullet_lines, date_range, education_range, join_present, Substitution};
use crate::latex::escape::esc;
use crate::latex::templates::{self, elegant};
use crate::latex::url::display_handle;
use crate::models::{PersonalInfo, ResumeRecord, Skills};

/// Paragraph break between entries.
const ENTRY_SEP: &str = "\n\n";

pub fn compose(record: &ResumeRecord) -> Vec<Substitution> {
    let info = &record.personal_info;
    vec![
        (templates::NAME, esc(&info.name)),
        (templates::EMAIL, esc(&info.email)),
        (templates::PHONE, esc(&info.phone)),
        (elegant::CONTACT_LINKS, contact_links(info)),
        (elegant::EDUCATION, education(record)),
        (elegant::EXPERIENCE, experience(record)),
        (elegant::PROJECTS, projects(record)),
        (elegant::SKILLS, skills(&record.skills)),
        (elegant::PUBLICATIONS, publications(record)),
        (elegant::HONORS, honors(record)),
        (elegant::VOLUNTEER, volunteer(record)),
    ]
}

fn contact_links(info: &PersonalInfo) -> String {
    [
        ("\\faLinkedin", info.linkedin.trim()),
        ("\\faGithub", info.github.trim()),
        ("\\faGlobe", info.website.trim()),
    ]
    .into_iter()
    .filter(|(_, url)| !url.is_empty())
    .map(|(icon, url)| {
        format!(
            " \\quad\n    {icon} \\ \\href{{{}}}{{{}}}",
            esc(url),
            esc(&display_handle(url))
        )
    })
    .collect()
}

fn part(header: &str, entries: Vec<String>) -> String {
    if entries.is_empty() {
        return String::new();
    }
    format!("\\section{{{header}}}\n{}", entries.join(ENTRY_SEP))
}

fn bullet_list(description: &str) -> String {
    let lines = bullet_lines(description);
    if lines.is_empty() {
        return String::new();
    }
    let items: Vec<String> = lines
        .iter()
        .map(|line| format!("    \\resumeitem{{{line}}}"))
        .collect();
    format!("\n\\resumeliststart\n{}\n\\resumelistend", items.join("\n"))
}

fn entry(title: &str, dates: String, subtitle: String, aside: String) -> String {
    format!("\\resumeentry{{{}}}{{{dates}}}{{{subtitle}}}{{{aside}}}", esc(title))
}

fn education(record: &ResumeRecord) -> String {
    let entries = record
        .education
        .iter()
        .map(|edu| {
            let cgpa = if edu.cgpa.trim().is_empty() {
                String::new()
            } else {
                format!("CGPA: {}", esc(edu.cgpa.trim()))
            };
            entry(
                &edu.school,
                education_range(edu),
                join_present(&[&edu.degree, &edu.major], ", "),
                cgpa,
            )
        })
        .collect();
    part("Education", entries)
}

fn experience(record: &ResumeRecord) -> String {
    let entries = record
        .experience
        .iter()
        .map(|exp| {
            entry(
                &exp.title,
                date_range(&exp.start_date, &exp.end_date),
                esc(&exp.company),
                String::new(),
            ) + &bullet_list(&exp.description)
        })
        .collect();
    part("Experience", entries)
}

fn projects(record: &ResumeRecord) -> String {
    let entries = record
        .projects
        .iter()
        .map(|proj| {
            let mut block = format!("\\vspace{{3pt}}\n\\textbf{{{}}}", esc(&proj.name));
            if !proj.technologies.trim().is_empty() {
                block.push_str(&format!(
                    " \\\\\n\\textit{{Technologies: {}}}",
                    esc(proj.technologies.trim())
                ));
            }
            block + &bullet_list(&proj.description)
        })
        .collect();
    part("Projects", entries)
}

fn skills(skills: &Skills) -> String {
    if skills.is_empty() {
        return String::new();
    }
    let lines: Vec<String> = [
        ("Languages", &skills.languages),
        ("Frameworks \\& Libraries", &skills.frameworks),
        ("Tools \\& Technologies", &skills.tools),
    ]
    .into_iter()
    .filter(|(_, value)| !value.trim().is_empty())
    .map(|(label, value)| format!("\\textbf{{{label}:}} {}", esc(value.trim())))
    .collect();
    format!("\\section{{Skills}}\n{}", lines.join(" \\\\\n"))
}

fn publications(record: &ResumeRecord) -> String {
    let entries = record
        .publications
        .iter()
        .map(|publication| {
            entry(
                &publication.title,
                esc(publication.date.trim()),
                esc(publication.publisher.trim()),
                String::new(),
            ) + &bullet_list(&publication.description)
        })
        .collect();
    part("Publications", entries)
}

fn honors(record: &ResumeRecord) -> String {
    if record.honors.is_empty() {
        return String::new();
    }
    let items: Vec<String> = record
        .honors
        .iter()
        .map(|honor| {
            let meta = join_present(&[&honor.issuer, &honor.date], ", ");
            if meta.is_empty() {
                format!("    \\resumeitem{{{}}}", esc(&honor.title))
            } else {
                format!("    \\resumeitem{{{} ({meta})}}", esc(&honor.title))
            }
        })
        .collect();
    format!(
        "\\section{{Honors \\& Awards}}\n\\resumeliststart\n{}\n\\resumelistend",
        items.join("\n")
    )
}

fn volunteer(record: &ResumeRecord) -> String {
    let entries = record
        .volunteer_experience
        .iter()
        .map(|vol| {
            entry(
                &vol.role,
                date_range(&vol.start_date, &vol.end_date),
                esc(&vol.organization),
                String::new(),
            ) + &bullet_list(&vol.description)
        })
        .collect();
    part("Volunteer Experience", entries)
}
