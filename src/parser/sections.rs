use std::ops::Range;
use std::sync::LazyLock;

use super::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::error::ExtractError;

const MAX_HEADING_CHARS: usize = 80;
const MAX_HEADING_WORDS: usize = 12;
const MIN_HEADING_LETTERS: usize = 4;
const BULLETS: &[char] = &['•', '-', '*', '·'];

/// A named region of the document. Empty when its heading never appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section<'t> {
    pub name: &'static str,
    /// Heading phrase through the end of the section.
    pub text: &'t str,
    /// Same span without the heading phrase.
    pub body: &'t str,
}

impl<'t> Section<'t> {
    fn empty(name: &'static str) -> Self {
        Section { name, text: "", body: "" }
    }

    fn span(name: &'static str, text: &'t str, heading: Range<usize>, end: usize) -> Self {
        Section {
            name,
            text: &text[heading.start..end],
            body: &text[heading.end..end],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Heading phrases in priority order, plus keywords that mark upper-case
/// lines as belonging to the section instead of ending it.
pub struct SectionSpec {
    pub name: &'static str,
    headings: CompiledTable,
    subheadings: &'static [&'static str],
}

impl SectionSpec {
    fn is_subheading(&self, line: &str) -> bool {
        self.subheadings.iter().any(|kw| line.contains(kw))
    }
}

pub static ELIGIBILITY: SectionSpec = SectionSpec {
    name: "eligibility",
    headings: LazyLock::new(|| {
        RuleTable::compile("eligibility_heading", &[RuleSpec::whole(r"(?i)ELIGIBILITY")])
    }),
    subheadings: &[],
};

pub static MERIT_REVIEW: SectionSpec = SectionSpec {
    name: "merit_review",
    headings: LazyLock::new(|| {
        RuleTable::compile(
            "merit_review_heading",
            &[
                RuleSpec::whole(r"(?i)MERIT REVIEW"),
                RuleSpec::whole(r"(?i)EVALUATION CRITERIA"),
                RuleSpec::whole(r"(?i)REVIEW CRITERIA"),
            ],
        )
    }),
    subheadings: &["STATEMENT", "TECHNICAL", "APPROACH", "BENEFIT", "QUALIFICATIONS", "PERFORMANCE"],
};

pub static APPLICATION: SectionSpec = SectionSpec {
    name: "application",
    headings: LazyLock::new(|| {
        RuleTable::compile(
            "application_heading",
            &[
                RuleSpec::whole(r"(?i)PREPARE YOUR APPLICATION"),
                RuleSpec::whole(r"(?i)APPLICATION"),
            ],
        )
    }),
    subheadings: &[],
};

pub static PROGRAM_OVERVIEW: SectionSpec = SectionSpec {
    name: "program_overview",
    headings: LazyLock::new(|| {
        RuleTable::compile(
            "program_overview_heading",
            &[
                RuleSpec::whole(r"(?i)PROGRAM OVERVIEW"),
                RuleSpec::whole(r"(?i)PROGRAM DESCRIPTION"),
                RuleSpec::whole(r"(?i)PROGRAM PRIORITIES"),
            ],
        )
    }),
    subheadings: &[],
};

pub static DESCRIPTION: SectionSpec = SectionSpec {
    name: "description",
    headings: LazyLock::new(|| {
        RuleTable::compile(
            "description_heading",
            &[
                RuleSpec::whole(r"(?i)PROGRAM DESCRIPTION"),
                RuleSpec::whole(r"(?i)DESCRIPTION"),
                RuleSpec::whole(r"(?i)OVERVIEW"),
            ],
        )
    }),
    subheadings: &[],
};

/// Cut `spec`'s section out of `text`.
///
/// Starts at the first heading phrase (in priority order) found anywhere,
/// then walks forward one line at a time from the line after it and stops
/// right before the first line that `looks_like_heading`.
pub fn segment<'t>(text: &'t str, spec: &'static SectionSpec) -> Result<Section<'t>, ExtractError> {
    let headings = RuleTable::get(&spec.headings)?;
    let Some(heading) = headings.first_span(text) else {
        return Ok(Section::empty(spec.name));
    };

    let mut cursor = text[heading.end..]
        .find('\n')
        .map_or(text.len(), |i| heading.end + i + 1);

    while cursor < text.len() {
        let line_end = text[cursor..].find('\n').map_or(text.len(), |i| cursor + i);
        let line = &text[cursor..line_end];
        if looks_like_heading(line) && !spec.is_subheading(line) {
            return Ok(Section::span(spec.name, text, heading, cursor));
        }
        cursor = line_end + 1;
    }

    Ok(Section::span(spec.name, text, heading, text.len()))
}

/// Short line made mostly of upper-case words, e.g. `MERIT REVIEW`.
pub fn looks_like_heading(line: &str) -> bool {
    let line = line.trim();
    if line.is_empty() || line.chars().count() > MAX_HEADING_CHARS || line.starts_with(BULLETS) {
        return false;
    }

    let words: Vec<&str> = line
        .split_whitespace()
        .filter(|w| w.chars().any(char::is_alphabetic))
        .collect();
    if words.is_empty() || words.len() > MAX_HEADING_WORDS {
        return false;
    }

    let letters = line.chars().filter(|c| c.is_alphabetic()).count();
    if letters < MIN_HEADING_LETTERS {
        return false;
    }

    let upper = words
        .iter()
        .filter(|w| !w.chars().any(char::is_lowercase))
        .count();
    upper * 2 > words.len()
}
