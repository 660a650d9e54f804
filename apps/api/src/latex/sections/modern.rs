//! Modern variant: descriptions collapse into a single `\resumeItem` whose
//! lines are separated by the LaTeX line-break sequence.

use super::{clause, date_range, education_range, inline_block, join_present, section, Substitution};
use crate::latex::escape::esc;
use crate::latex::templates::{self, modern};
use crate::models::{ResumeRecord, Skills};

const LIST_OPEN: &str = "\\resumeSubHeadingListStart\n";
const LIST_CLOSE: &str = "\n\\resumeSubHeadingListEnd";
const ENTRY_SEP: &str = "\n";

pub fn compose(record: &ResumeRecord) -> Vec<Substitution> {
    let info = &record.personal_info;
    vec![
        (templates::NAME, esc(&info.name)),
        (templates::EMAIL, esc(&info.email)),
        (templates::PHONE, esc(&info.phone)),
        (modern::LINKEDIN, header_link(&info.linkedin)),
        (modern::GITHUB, header_link(&info.github)),
        (modern::WEBSITE, header_link(&info.website)),
        (modern::EDUCATION, education(record)),
        (modern::EXPERIENCE, experience(record)),
        (modern::PROJECTS, projects(record)),
        (modern::SKILLS, skills(&record.skills)),
        (modern::PUBLICATIONS, publications(record)),
        (modern::HONORS, honors(record)),
        (modern::VOLUNTEER, volunteer(record)),
    ]
}

fn header_link(url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    let escaped = esc(url);
    format!(" \\quad\n    \\href{{{escaped}}}{{\\underline{{{escaped}}}}}")
}

/// The whole description as one inline item, or nothing.
fn inline_item(description: &str) -> String {
    let block = inline_block(description);
    if block.is_empty() {
        return String::new();
    }
    format!("\n    \\resumeItemListStart\n      \\resumeItem{{{block}}}\n    \\resumeItemListEnd")
}

fn education(record: &ResumeRecord) -> String {
    let entries = record
        .education
        .iter()
        .map(|edu| {
            format!(
                "  \\resumeSubheading\n    {{{}}}{{{}}}\n    {{{}}}{{{}}}",
                esc(&edu.school),
                education_range(edu),
                join_present(&[&edu.degree, &edu.major], ", "),
                clause("CGPA: ", &edu.cgpa),
            )
        })
        .collect();
    section("Education", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

fn experience(record: &ResumeRecord) -> String {
    let entries = record
        .experience
        .iter()
        .map(|exp| {
            format!(
                "  \\resumeSubheading\n    {{{}}}{{{}}}\n    {{{}}}{{}}{}",
                esc(&exp.title),
                date_range(&exp.start_date, &exp.end_date),
                esc(&exp.company),
                inline_item(&exp.description),
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
                "  \\resumeProjectHeading\n    {{{}{}}}{{}}{}",
                esc(&proj.name),
                technologies(&proj.technologies),
                inline_item(&proj.description),
            )
        })
        .collect();
    section("Projects", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

fn technologies(value: &str) -> String {
    if value.trim().is_empty() {
        return String::new();
    }
    format!(" $|$ \\emph{{{}}}", esc(value.trim()))
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
    .map(|(label, value)| {
        format!(
            "  \\resumeItem{{\\textbf{{{label}: }}{}}}",
            esc(value.trim())
        )
    })
    .collect();
    section("Skills", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

fn publications(record: &ResumeRecord) -> String {
    let entries = record
        .publications
        .iter()
        .map(|publication| {
            format!(
                "  \\resumeSubheading\n    {{{}}}{{{}}}\n    {{{}}}{{}}{}",
                esc(&publication.title),
                esc(publication.date.trim()),
                esc(publication.publisher.trim()),
                inline_item(&publication.description),
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
            let meta = join_present(&[&honor.issuer, &honor.date], ", ");
            let meta = if meta.is_empty() {
                meta
            } else {
                format!(" ({meta})")
            };
            format!("  \\resumeItem{{\\textbf{{{}}}{meta}}}", esc(&honor.title))
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
                "  \\resumeSubheading\n    {{{}}}{{{}}}\n    {{{}}}{{}}{}",
                esc(&vol.role),
                date_range(&vol.start_date, &vol.end_date),
                esc(&vol.organization),
                inline_item(&vol.description),
            )
        })
        .collect();
    section("Volunteer Experience", LIST_OPEN, entries, ENTRY_SEP, LIST_CLOSE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Education, Experience, Honor, PersonalInfo, Project};

    #[test]
    fn test_experience_description_is_single_inline_item() {
        let record = ResumeRecord {
            experience: vec![Experience {
                title: "Engineer".into(),
                company: "Acme".into(),
                description: "• Line one\n\nLine two".into(),
                ..Experience::default()
            }],
            ..ResumeRecord::default()
        };
        let out = experience(&record);
        assert_eq!(out.matches("\\resumeItem{").count(), 1);
        assert!(out.contains("\\resumeItem{Line one\\\\ Line two}"));
    }

    #[test]
    fn test_experience_without_visible_description_has_no_item_list() {
        let record = ResumeRecord {
            experience: vec![Experience {
                title: "Engineer".into(),
                description: "•\n\n".into(),
                ..Experience::default()
            }],
            ..ResumeRecord::default()
        };
        assert!(!experience(&record).contains("\\resumeItemListStart"));
    }

    #[test]
    fn test_education_degree_and_major() {
        let record = ResumeRecord {
            education: vec![Education {
                school: "ETH".into(),
                degree: "MSc".into(),
                major: "Robotics".into(),
                cgpa: "5.8".into(),
                start_year: "2021".into(),
                end_month: "Present".into(),
                ..Education::default()
            }],
            ..ResumeRecord::default()
        };
        let out = education(&record);
        assert!(out.contains("{ETH}{2021 -- Present}"));
        assert!(out.contains("{MSc, Robotics}{CGPA: 5.8}"));
    }

    #[test]
    fn test_project_technologies_clause() {
        let with = ResumeRecord {
            projects: vec![Project {
                name: "Crawler".into(),
                technologies: "Rust, Tokio".into(),
                ..Project::default()
            }],
            ..ResumeRecord::default()
        };
        assert!(projects(&with).contains("{Crawler $|$ \\emph{Rust, Tokio}}{}"));

        let without = ResumeRecord {
            projects: vec![Project {
                name: "Crawler".into(),
                ..Project::default()
            }],
            ..ResumeRecord::default()
        };
        let out = projects(&without);
        assert!(out.contains("{Crawler}{}"));
        assert!(!out.contains("\\emph"));
    }

    #[test]
    fn test_header_links_only_when_present() {
        let record = ResumeRecord {
            personal_info: PersonalInfo {
                github: "https://github.com/jane_doe".into(),
                ..PersonalInfo::default()
            },
            ..ResumeRecord::default()
        };
        let subs = compose(&record);
        let get = |token: &str| subs.iter().find(|(t, _)| *t == token).map(|(_, v)| v.clone());
        assert_eq!(get(modern::LINKEDIN).as_deref(), Some(""));
        assert_eq!(get(modern::WEBSITE).as_deref(), Some(""));
        let github = get(modern::GITHUB).unwrap();
        assert!(github.contains("\\href{https://github.com/jane\\_doe}"));
    }

    #[test]
    fn test_honor_meta_parenthetical() {
        let record = ResumeRecord {
            honors: vec![Honor {
                title: "Fellowship".into(),
                date: "2020".into(),
                ..Honor::default()
            }],
            ..ResumeRecord::default()
        };
        assert!(honors(&record).contains("\\resumeItem{\\textbf{Fellowship} (2020)}"));
    }
}
