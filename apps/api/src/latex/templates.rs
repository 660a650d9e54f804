//! Template registry: the fixed set of LaTeX skeletons.
//!
//! Each skeleton owns its placeholder vocabulary (`%%...%%` tokens) and its
//! own entry macros, so the section composer is template-aware.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Closed set of template variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateId {
    /// Serif, tabular subheadings, itemized bullets.
    Classic,
    /// Jake's-resume style; descriptions render as one inline block.
    Modern,
    /// Helvetica with colored rules and icon header.
    Elegant,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [TemplateId::Classic, TemplateId::Modern, TemplateId::Elegant];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Classic => "classic",
            TemplateId::Modern => "modern",
            TemplateId::Elegant => "elegant",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown template '{0}'")]
pub struct UnknownTemplate(pub String);

impl FromStr for TemplateId {
    type Err = UnknownTemplate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateId::ALL
            .into_iter()
            .find(|id| id.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownTemplate(s.to_string()))
    }
}

/// A registered template: id, human label, and LaTeX skeleton.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    pub id: TemplateId,
    pub label: &'static str,
    pub skeleton: &'static str,
}

static TEMPLATES: [Template; 3] = [
    Template {
        id: TemplateId::Classic,
        label: "Classic",
        skeleton: CLASSIC_SKELETON,
    },
    Template {
        id: TemplateId::Modern,
        label: "Modern",
        skeleton: MODERN_SKELETON,
    },
    Template {
        id: TemplateId::Elegant,
        label: "Elegant",
        skeleton: ELEGANT_SKELETON,
    },
];

/// All templates in display order.
pub fn templates() -> &'static [Template] {
    &TEMPLATES
}

pub fn template(id: TemplateId) -> &'static Template {
    match id {
        TemplateId::Classic => &TEMPLATES[0],
        TemplateId::Modern => &TEMPLATES[1],
        TemplateId::Elegant => &TEMPLATES[2],
    }
}

/// Looks a template up by its string id. Unknown ids yield `None`.
pub fn find_template(id: &str) -> Option<&'static Template> {
    id.parse::<TemplateId>().ok().map(template)
}

// ────────────────────────────────────────────────────────────────────────────
// Placeholder vocabularies
// ────────────────────────────────────────────────────────────────────────────

pub const NAME: &str = "%%NAME%%";
pub const EMAIL: &str = "%%EMAIL%%";
pub const PHONE: &str = "%%PHONE%%";

pub mod classic {
    pub const LINKEDIN_LINK: &str = "%%LINKEDIN_LINK%%";
    pub const GITHUB_LINK: &str = "%%GITHUB_LINK%%";
    pub const WEBSITE_LINK: &str = "%%WEBSITE_LINK%%";
    pub const EDUCATION: &str = "%%EDUCATION_BLOCK%%";
    pub const SKILLS: &str = "%%SKILLS_BLOCK%%";
    pub const EXPERIENCE: &str = "%%EXPERIENCE_BLOCK%%";
    pub const PROJECTS: &str = "%%PROJECTS_BLOCK%%";
    pub const PUBLICATIONS: &str = "%%PUBLICATIONS_BLOCK%%";
    pub const HONORS: &str = "%%HONORS_BLOCK%%";
    pub const VOLUNTEER: &str = "%%VOLUNTEER_BLOCK%%";
}

pub mod modern {
    pub const LINKEDIN: &str = "%%LINKEDIN_SECTION%%";
    pub const GITHUB: &str = "%%GITHUB_SECTION%%";
    pub const WEBSITE: &str = "%%WEBSITE_SECTION%%";
    pub const EDUCATION: &str = "%%EDUCATION_SECTION%%";
    pub const EXPERIENCE: &str = "%%EXPERIENCE_SECTION%%";
    pub const PROJECTS: &str = "%%PROJECTS_SECTION%%";
    pub const SKILLS: &str = "%%SKILLS_SECTION%%";
    pub const PUBLICATIONS: &str = "%%PUBLICATIONS_SECTION%%";
    pub const HONORS: &str = "%%HONORS_SECTION%%";
    pub const VOLUNTEER: &str = "%%VOLUNTEER_SECTION%%";
}

pub mod elegant {
    pub const CONTACT_LINKS: &str = "%%CONTACT_LINKS%%";
    pub const EDUCATION: &str = "%%EDUCATION_PART%%";
    pub const EXPERIENCE: &str = "%%EXPERIENCE_PART%%";
    pub const PROJECTS: &str = "%%PROJECTS_PART%%";
    pub const SKILLS: &str = "%%SKILLS_PART%%";
    pub const PUBLICATIONS: &str = "%%PUBLICATIONS_PART%%";
    pub const HONORS: &str = "%%HONORS_PART%%";
    pub const VOLUNTEER: &str = "%%VOLUNTEER_PART%%";
}

/// Every placeholder a template's skeleton is expected to contain.
pub fn placeholders(id: TemplateId) -> &'static [&'static str] {
    match id {
        TemplateId::Classic => &[
            NAME,
            EMAIL,
            PHONE,
            classic::LINKEDIN_LINK,
            classic::GITHUB_LINK,
            classic::WEBSITE_LINK,
            classic::EDUCATION,
            classic::SKILLS,
            classic::EXPERIENCE,
            classic::PROJECTS,
            classic::PUBLICATIONS,
            classic::HONORS,
            classic::VOLUNTEER,
        ],
        TemplateId::Modern => &[
            NAME,
            EMAIL,
            PHONE,
            modern::LINKEDIN,
            modern::GITHUB,
            modern::WEBSITE,
            modern::EDUCATION,
            modern::EXPERIENCE,
            modern::PROJECTS,
            modern::SKILLS,
            modern::PUBLICATIONS,
            modern::HONORS,
            modern::VOLUNTEER,
        ],
        TemplateId::Elegant => &[
            NAME,
            EMAIL,
            PHONE,
            elegant::CONTACT_LINKS,
            elegant::EDUCATION,
            elegant::EXPERIENCE,
            elegant::PROJECTS,
            elegant::SKILLS,
            elegant::PUBLICATIONS,
            elegant::HONORS,
            elegant::VOLUNTEER,
        ],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Skeletons
// ────────────────────────────────────────────────────────────────────────────

const CLASSIC_SKELETON: &str = r##"\documentclass[a4paper,10pt]{article}

\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage{marvosym}
\usepackage[usenames,dvipsnames]{color}
\usepackage{verbatim}
\usepackage{enumitem}
\usepackage[pdftex]{hyperref}
\usepackage{fancyhdr}

\pagestyle{fancy}
\fancyhf{}
\fancyfoot{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

\addtolength{\oddsidemargin}{-0.530in}
\addtolength{\evensidemargin}{-0.375in}
\addtolength{\textwidth}{1in}
\addtolength{\topmargin}{-.45in}
\addtolength{\textheight}{1in}

\urlstyle{rm}

\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

\titleformat{\section}{
  \vspace{-10pt}\scshape\raggedright\large
}{}{0em}{}[\color{black}\titlerule \vspace{-6pt}]

\newcommand{\resumeItem}[2]{
  \item\small{
    \textbf{#1}{: #2 \vspace{-2pt}}
  }
}

\newcommand{\resumeSubheading}[4]{
  \vspace{-1pt}\item
    \begin{tabular*}{0.97\textwidth}{l@{\extracolsep{\fill}}r}
      \textbf{#1} & #2 \\
      \textit{\small#3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-5pt}
}

\newcommand{\resumeSubItem}[2]{\resumeItem{#1}{#2}\vspace{-3pt}}

\renewcommand{\labelitemii}{$\circ$}

\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=*]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}[label=\textbullet, leftmargin=*]}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-5pt}}

\begin{document}

\begin{center}
  {\LARGE \textbf{%%NAME%%}} \\ \vspace{2pt}
  \small %%PHONE%% $|$ \href{mailto:%%EMAIL%%}{%%EMAIL%%}%%LINKEDIN_LINK%%%%GITHUB_LINK%%%%WEBSITE_LINK%%
\end{center}

%%EDUCATION_BLOCK%%

%%SKILLS_BLOCK%%

%%EXPERIENCE_BLOCK%%

%%PROJECTS_BLOCK%%

%%PUBLICATIONS_BLOCK%%

%%HONORS_BLOCK%%

%%VOLUNTEER_BLOCK%%

\end{document}
"##;

const MODERN_SKELETON: &str = r##"\documentclass[letterpaper,11pt]{article}

\usepackage{latexsym}
\usepackage[empty]{fullpage}
\usepackage{titlesec}
\usepackage{marvosym}
\usepackage[usenames,dvipsnames]{color}
\usepackage{verbatim}
\usepackage{enumitem}
\usepackage[hidelinks]{hyperref}
\usepackage{fancyhdr}
\usepackage[english]{babel}
\usepackage{tabularx}
\usepackage{fontawesome5}
\usepackage{multicol}
\setlength{\multicolsep}{-3.0pt}
\setlength{\columnsep}{-1pt}
\input{glyphtounicode}

\pagestyle{fancy}
\fancyhf{}
\fancyfoot{}
\renewcommand{\headrulewidth}{0pt}
\renewcommand{\footrulewidth}{0pt}

\addtolength{\oddsidemargin}{-0.6in}
\addtolength{\evensidemargin}{-0.5in}
\addtolength{\textwidth}{1.2in}
\addtolength{\topmargin}{-.8in}
\addtolength{\textheight}{1.6in}

\urlstyle{same}

\raggedbottom
\raggedright
\setlength{\tabcolsep}{0in}

\titleformat{\section}{
  \vspace{-4pt}\scshape\raggedright\large\bfseries
}{}{0em}{}[\color{black}\titlerule\vspace{-7pt}]

\pdfgentounicode=1

\newcommand{\resumeItem}[1]{
  \item\small{
    {#1 \vspace{-2pt}}
  }
}

\newcommand{\resumeSubheading}[4]{
  \vspace{-2pt}\item
    \begin{tabular*}{0.97\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & #2 \\
      \textit{\small#3} & \textit{\small #4} \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeProjectHeading}[2]{
    \vspace{-2pt}\item
    \begin{tabular*}{0.97\textwidth}[t]{l@{\extracolsep{\fill}}r}
      \textbf{#1} & #2 \\
    \end{tabular*}\vspace{-7pt}
}

\newcommand{\resumeSubItem}[1]{\resumeItem{#1}\vspace{-4pt}}

\renewcommand\labelitemii{\textbullet}

\newcommand{\resumeSubHeadingListStart}{\begin{itemize}[leftmargin=0.15in, label={}]}
\newcommand{\resumeSubHeadingListEnd}{\end{itemize}}
\newcommand{\resumeItemListStart}{\begin{itemize}}
\newcommand{\resumeItemListEnd}{\end{itemize}\vspace{-5pt}}

\begin{document}

\begin{center}
    {\Huge \scshape %%NAME%%} \\ \vspace{1pt}
    \small %%PHONE%% \quad \href{mailto:%%EMAIL%%}{\underline{%%EMAIL%%}}%%LINKEDIN_SECTION%%%%GITHUB_SECTION%%%%WEBSITE_SECTION%%
\end{center}

%%EDUCATION_SECTION%%

%%EXPERIENCE_SECTION%%

%%PROJECTS_SECTION%%

%%SKILLS_SECTION%%

%%PUBLICATIONS_SECTION%%

%%HONORS_SECTION%%

%%VOLUNTEER_SECTION%%

\end{document}
"##;

const ELEGANT_SKELETON: &str = r##"\documentclass[letterpaper,10pt]{article}
\usepackage[left=0.75in,right=0.75in,top=0.5in,bottom=0.5in]{geometry}
\usepackage{fontawesome5}
\usepackage{titlesec}
\usepackage[hidelinks]{hyperref}
\usepackage{xcolor}
\usepackage{enumitem}

\definecolor{primary}{HTML}{2F3D4F}
\definecolor{text}{HTML}{262626}

\hypersetup{
    colorlinks=true,
    urlcolor=primary,
    linkcolor=primary
}

\pagestyle{empty}
\setlength{\parindent}{0pt}
\color{text}
\fontfamily{phv}\selectfont

\titleformat{\section}{\Large\scshape\color{primary}}{}{0em}{}[\titlerule]
\titlespacing*{\section}{0pt}{8pt}{4pt}

\newcommand{\resumeentry}[4]{
    \vspace{3pt}
    \textbf{#1} \hfill #2 \\
    \textit{#3} \hfill \textit{#4}
}

\newcommand{\resumeliststart}{\begin{itemize}[leftmargin=0.2in, label=\textbullet, itemsep=0pt, parsep=0pt]}
\newcommand{\resumelistend}{\end{itemize}}
\newcommand{\resumeitem}[1]{\item #1}

\begin{document}

\begin{center}
    {\Huge \scshape %%NAME%%}
    \vspace{5pt}

    \small
    \faPhone* \ %%PHONE%% \quad
    \faEnvelope \ \href{mailto:%%EMAIL%%}{%%EMAIL%%}%%CONTACT_LINKS%%
\end{center}

%%EDUCATION_PART%%

%%EXPERIENCE_PART%%

%%PROJECTS_PART%%

%%SKILLS_PART%%

%%PUBLICATIONS_PART%%

%%HONORS_PART%%

%%VOLUNTEER_PART%%

\end{document}
"##;
