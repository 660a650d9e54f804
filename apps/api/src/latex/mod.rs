//! LaTeX source generation: escaping, URL display helpers, the template
//! registry, per-template section composers, and the assembler.

pub mod escape;
pub mod generator;
pub mod handlers;
pub mod sections;
pub mod templates;
pub mod url;
