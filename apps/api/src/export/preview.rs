//! Builds the on-screen preview tree for a record and template.
//!
//! The three layouts share one builder and differ in a [`Look`]: typeface,
//! heading treatment, how contact links are labelled, and the small wording
//! differences in the education line. Empty sections are left out entirely,
//! same as the generated LaTeX.

use crate::latex::sections::{education_end, education_start, raw_bullet_lines};
use crate::latex::templates::TemplateId;
use crate::latex::url::{display_handle, domain_of};
use crate::models::{PersonalInfo, ResumeRecord};

use super::font_metrics::FontFamily;
use super::geometry::a4_natural_px;
use super::visual::{
    Justify, NodeId, NodeKind, TextStyle, VisualTree, LINK_BLUE, MUTED, RULE_GRAY,
};

/// Page padding, 2rem.
pub const PAGE_PADDING_PX: f32 = 32.0;

const BASE: TextStyle = TextStyle::regular(14.0);
const SMALL: TextStyle = TextStyle::regular(12.0);

// ────────────────────────────────────────────────────────────────────────────
// Per-template look
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkLabel {
    /// Fixed words: "LinkedIn", "GitHub", "Website".
    Named,
    /// The URL exactly as typed.
    Raw,
    /// Username for social hosts, bare domain otherwise.
    Handle,
}

#[derive(Debug, Clone, Copy)]
struct Look {
    font: FontFamily,
    name: TextStyle,
    heading: TextStyle,
    contact: TextStyle,
    /// Separator drawn between contact items, if any.
    separator: Option<&'static str>,
    link_label: LinkLabel,
    gpa_label: &'static str,
    degree_joiner: &'static str,
    bullets: TextStyle,
}

fn look(id: TemplateId) -> Look {
    match id {
        TemplateId::Classic => Look {
            font: FontFamily::for_template(id),
            name: TextStyle::regular(30.0).bold(),
            heading: TextStyle::regular(20.0).bold(),
            contact: BASE,
            separator: Some("|"),
            link_label: LinkLabel::Named,
            gpa_label: "GPA",
            degree_joiner: " in ",
            bullets: BASE,
        },
        TemplateId::Modern => Look {
            font: FontFamily::for_template(id),
            name: TextStyle::regular(36.0).bold().uppercase(),
            heading: TextStyle::regular(18.0).bold().uppercase(),
            contact: SMALL,
            separator: Some("|"),
            link_label: LinkLabel::Raw,
            gpa_label: "CGPA",
            degree_joiner: ", ",
            bullets: SMALL,
        },
        TemplateId::Elegant => Look {
            font: FontFamily::for_template(id),
            name: TextStyle::regular(30.0).bold().uppercase(),
            heading: TextStyle::regular(18.0).bold().uppercase(),
            contact: SMALL,
            separator: None,
            link_label: LinkLabel::Handle,
            gpa_label: "CGPA",
            degree_joiner: ", ",
            bullets: BASE,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Entry point
// ────────────────────────────────────────────────────────────────────────────

/// Preview tree for `record` in template `id`.
///
/// The page block (A4 at CSS resolution, padded) is the render root. It sits
/// inside an outer wrapper the way the on-screen preview sits inside its
/// scaled frame.
pub fn build_preview(record: &ResumeRecord, id: TemplateId) -> VisualTree {
    let look = look(id);
    let natural = a4_natural_px();
    let mut builder = PreviewBuilder::new(look, VisualTree::new(look.font, natural));

    builder.header(&record.personal_info);
    builder.education(record);
    builder.experience(record);
    builder.projects(record);
    builder.skills(record);
    builder.publications(record);
    builder.honors(record);
    builder.volunteer(record);

    builder.tree
}

struct PreviewBuilder {
    look: Look,
    tree: VisualTree,
    page: NodeId,
}

impl PreviewBuilder {
    fn new(look: Look, mut tree: VisualTree) -> Self {
        let natural = tree.natural_size();
        let page = tree.push(
            VisualTree::ROOT,
            NodeKind::Block {
                padding_px: PAGE_PADDING_PX,
                gap_px: 0.0,
                min_height_px: natural.height,
            },
        );
        tree.mark_render_root(page);
        Self { look, tree, page }
    }

    // ── primitives ──────────────────────────────────────────────────────────

    fn block(&mut self, parent: NodeId, gap_px: f32, margin_bottom_px: f32) -> NodeId {
        let id = self.tree.push(
            parent,
            NodeKind::Block {
                padding_px: 0.0,
                gap_px,
                min_height_px: 0.0,
            },
        );
        self.tree.set_margin_bottom(id, margin_bottom_px);
        id
    }

    fn row(&mut self, parent: NodeId, justify: Justify, gap_px: f32) -> NodeId {
        self.tree.push(parent, NodeKind::Row { justify, gap_px })
    }

    fn text(&mut self, parent: NodeId, content: impl Into<String>, style: TextStyle) -> NodeId {
        self.tree.push(
            parent,
            NodeKind::Text {
                content: content.into(),
                style,
            },
        )
    }

    fn link(&mut self, parent: NodeId, href: impl Into<String>, label: impl Into<String>) {
        self.tree.push(
            parent,
            NodeKind::Link {
                href: href.into(),
                content: label.into(),
                style: self.look.contact.color(LINK_BLUE),
            },
        );
    }

    /// Left/right pair on one line, e.g. school and dates.
    fn split(&mut self, parent: NodeId, left: &str, left_style: TextStyle, right: &str, right_style: TextStyle) {
        let row = self.row(parent, Justify::Between, 8.0);
        self.text(row, left.trim(), left_style);
        if !right.trim().is_empty() {
            self.text(row, right.trim(), right_style);
        }
    }

    fn bullets(&mut self, parent: NodeId, description: &str) {
        let style = self.look.bullets;
        for line in raw_bullet_lines(description) {
            self.tree.push(
                parent,
                NodeKind::ListItem {
                    content: line.to_string(),
                    style,
                },
            );
        }
    }

    /// Section wrapper with its heading, or `None` when there is nothing to show.
    fn section(&mut self, title: &str, has_entries: bool) -> Option<NodeId> {
        if !has_entries {
            return None;
        }
        let section = self.block(self.page, 4.0, 16.0);
        self.tree.push(
            section,
            NodeKind::Heading {
                content: title.to_string(),
                style: self.look.heading,
            },
        );
        Some(section)
    }

    fn entry(&mut self, section: NodeId) -> NodeId {
        self.block(section, 2.0, 8.0)
    }

    // ── header ──────────────────────────────────────────────────────────────

    fn header(&mut self, info: &PersonalInfo) {
        let header = self.block(self.page, 8.0, 16.0);
        let name_row = self.row(header, Justify::Center, 0.0);
        self.text(name_row, info.name.trim(), self.look.name);

        let contact = self.row(header, Justify::Center, 8.0);
        let mut first = true;
        if !info.phone.trim().is_empty() {
            self.text(contact, info.phone.trim(), self.look.contact);
            first = false;
        }
        if !info.email.trim().is_empty() {
            self.separator(contact, &mut first);
            let email = info.email.trim();
            self.link(contact, format!("mailto:{email}"), email);
        }

        let socials = [
            (&info.linkedin, "LinkedIn"),
            (&info.github, "GitHub"),
            (&info.website, "Website"),
        ];
        for (url, name) in socials {
            let url = url.trim();
            if url.is_empty() {
                continue;
            }
            let label = match self.look.link_label {
                LinkLabel::Named => name.to_string(),
                LinkLabel::Raw => url.to_string(),
                LinkLabel::Handle if name == "Website" => domain_of(url),
                LinkLabel::Handle => display_handle(url),
            };
            self.separator(contact, &mut first);
            self.link(contact, url, label);
        }
    }

    fn separator(&mut self, row: NodeId, first: &mut bool) {
        if !*first {
            if let Some(sep) = self.look.separator {
                self.text(row, sep, self.look.contact.color(RULE_GRAY));
            }
        }
        *first = false;
    }

    // ── sections ────────────────────────────────────────────────────────────

    fn education(&mut self, record: &ResumeRecord) {
        let Some(section) = self.section("Education", !record.education.is_empty()) else {
            return;
        };
        for edu in &record.education {
            let entry = self.entry(section);
            let dates = plain_range(&education_start(edu), &education_end(edu));
            self.split(entry, &edu.school, BASE.bold(), &dates, SMALL);

            let degree = [edu.degree.trim(), edu.major.trim()]
                .into_iter()
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(self.look.degree_joiner);
            let gpa = if edu.cgpa.trim().is_empty() {
                String::new()
            } else {
                format!("{}: {}", self.look.gpa_label, edu.cgpa.trim())
            };
            self.split(entry, &degree, SMALL.italic(), &gpa, SMALL);
        }
    }

    fn experience(&mut self, record: &ResumeRecord) {
        let Some(section) = self.section("Experience", !record.experience.is_empty()) else {
            return;
        };
        for exp in &record.experience {
            let entry = self.entry(section);
            let dates = plain_range(&exp.start_date, &exp.end_date);
            self.split(entry, &exp.title, BASE.bold(), &dates, SMALL);
            if !exp.company.trim().is_empty() {
                self.text(entry, exp.company.trim(), SMALL.italic().color(MUTED));
            }
            self.bullets(entry, &exp.description);
        }
    }

    fn projects(&mut self, record: &ResumeRecord) {
        let Some(section) = self.section("Projects", !record.projects.is_empty()) else {
            return;
        };
        for project in &record.projects {
            let entry = self.entry(section);
            self.split(entry, &project.name, BASE.bold(), &project.technologies, SMALL.italic());
            self.bullets(entry, &project.description);
        }
    }

    fn skills(&mut self, record: &ResumeRecord) {
        let Some(section) = self.section("Skills", !record.skills.is_empty()) else {
            return;
        };
        let groups = [
            ("Languages", &record.skills.languages),
            ("Frameworks", &record.skills.frameworks),
            ("Tools", &record.skills.tools),
        ];
        for (label, value) in groups {
            if value.trim().is_empty() {
                continue;
            }
            let row = self.row(section, Justify::Start, 4.0);
            self.text(row, format!("{label}:"), SMALL.bold());
            self.text(row, value.trim(), SMALL);
        }
    }

    fn publications(&mut self, record: &ResumeRecord) {
        let Some(section) = self.section("Publications", !record.publications.is_empty()) else {
            return;
        };
        for publication in &record.publications {
            let entry = self.entry(section);
            self.split(entry, &publication.title, BASE.bold(), &publication.date, SMALL);
            if !publication.publisher.trim().is_empty() {
                self.text(entry, publication.publisher.trim(), SMALL.italic().color(MUTED));
            }
            self.bullets(entry, &publication.description);
        }
    }

    fn honors(&mut self, record: &ResumeRecord) {
        let Some(section) = self.section("Honors & Awards", !record.honors.is_empty()) else {
            return;
        };
        for honor in &record.honors {
            let entry = self.entry(section);
            let title = if honor.issuer.trim().is_empty() {
                honor.title.trim().to_string()
            } else {
                format!("{}, {}", honor.title.trim(), honor.issuer.trim())
            };
            self.split(entry, &title, BASE, &honor.date, SMALL);
        }
    }

    fn volunteer(&mut self, record: &ResumeRecord) {
        let has_entries = !record.volunteer_experience.is_empty();
        let Some(section) = self.section("Volunteer Experience", has_entries) else {
            return;
        };
        for vol in &record.volunteer_experience {
            let entry = self.entry(section);
            let dates = plain_range(&vol.start_date, &vol.end_date);
            self.split(entry, &vol.role, BASE.bold(), &dates, SMALL);
            if !vol.organization.trim().is_empty() {
                self.text(entry, vol.organization.trim(), SMALL.italic().color(MUTED));
            }
            self.bullets(entry, &vol.description);
        }
    }
}

/// `"start - end"` for display; a blank side drops the dash.
fn plain_range(start: &str, end: &str) -> String {
    match (start.trim(), end.trim()) {
        ("", "") => String::new(),
        (s, "") => s.to_string(),
        ("", e) => e.to_string(),
        (s, e) => format!("{s} - {e}"),
    }
}
