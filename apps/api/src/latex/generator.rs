//! Document assembler. Fills a template skeleton with composed fragments.
//!
//! Flow: pick skeleton → compose substitutions for that variant →
//!       globally replace each placeholder → return LaTeX source.
//!
//! Pure and synchronous: no I/O, no shared state beyond the static registry.

use tracing::{debug, warn};

use crate::latex::sections::{classic, elegant, modern, Substitution};
use crate::latex::templates::{find_template, placeholders, template, TemplateId};
use crate::models::ResumeRecord;

/// Returned by [`generate_by_id`] when the id names no registered template.
pub const TEMPLATE_NOT_FOUND: &str = "Template not found";

/// Download metadata for the LaTeX artifact.
pub const LATEX_FILENAME: &str = "resume.tex";
pub const LATEX_MIME: &str = "application/x-tex";

/// Generates LaTeX source for `record` using the given template.
pub fn generate(record: &ResumeRecord, id: TemplateId) -> String {
    let substitutions = match id {
        TemplateId::Classic => classic::compose(record),
        TemplateId::Modern => modern::compose(record),
        TemplateId::Elegant => elegant::compose(record),
    };

    let missing = unfilled(id, &substitutions);
    if !missing.is_empty() {
        warn!(template = %id, ?missing, "Placeholders without a substitution");
    }

    let output = fill(template(id).skeleton, &substitutions);
    debug!(template = %id, bytes = output.len(), "Generated LaTeX source");
    output
}

/// String-keyed entry point. Unknown ids yield [`TEMPLATE_NOT_FOUND`]
/// instead of an error; callers check for the sentinel.
pub fn generate_by_id(record: &ResumeRecord, template_id: &str) -> String {
    match find_template(template_id) {
        Some(found) => generate(record, found.id),
        None => TEMPLATE_NOT_FOUND.to_string(),
    }
}

/// Placeholders of `id` that no substitution covers.
fn unfilled(id: TemplateId, substitutions: &[Substitution]) -> Vec<&'static str> {
    placeholders(id)
        .iter()
        .copied()
        .filter(|token| !substitutions.iter().any(|(t, _)| t == token))
        .collect()
}

/// One global replace per placeholder. Tokens never overlap and escaped
/// values cannot contain `%%`, so the order of substitution is irrelevant.
fn fill(skeleton: &str, substitutions: &[Substitution]) -> String {
    substitutions
        .iter()
        .fold(skeleton.to_string(), |text, (token, value)| text.replace(token, value))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
