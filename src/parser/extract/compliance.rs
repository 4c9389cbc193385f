use std::ops::Range;
use std::sync::LazyLock;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::record::{ComplianceItem, ComplianceRequirements};

/// Characters of context kept on each side of a keyword.
const CONTEXT_CHARS: usize = 100;

static KEYWORDS: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "compliance_requirements",
        &[
            RuleSpec::keyword("environmental compliance", r"(?i)environmental compliance"),
            RuleSpec::keyword("NEPA", r"(?i)\bNEPA\b"),
            RuleSpec::keyword("civil rights", r"(?i)civil rights"),
            RuleSpec::keyword("equal opportunity", r"(?i)equal opportunity"),
            RuleSpec::keyword("accessibility", r"(?i)accessibility"),
            RuleSpec::keyword("reporting requirements", r"(?i)reporting requirements"),
            RuleSpec::keyword("audit", r"(?i)\baudit"),
            RuleSpec::keyword("federal regulations", r"(?i)federal regulations"),
        ],
    )
});

pub fn extract(doc: &RawDocument) -> Result<ComplianceRequirements, ExtractError> {
    let text = doc.text();
    let compliance_requirements = RuleTable::get(&KEYWORDS)?
        .first_hits(text)
        .into_iter()
        .map(|(requirement, hit)| ComplianceItem {
            requirement,
            context: context(text, hit),
        })
        .collect();

    Ok(ComplianceRequirements { compliance_requirements })
}

/// The hit plus up to `CONTEXT_CHARS` on either side, clipped to its line.
fn context(text: &str, hit: Range<usize>) -> String {
    let line_start = text[..hit.start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = text[hit.end..].find('\n').map_or(text.len(), |i| hit.end + i);

    let start = text[line_start..hit.start]
        .char_indices()
        .rev()
        .nth(CONTEXT_CHARS - 1)
        .map_or(line_start, |(i, _)| line_start + i);
    let end = text[hit.end..line_end]
        .char_indices()
        .nth(CONTEXT_CHARS)
        .map_or(line_end, |(i, _)| hit.end + i);

    text[start..end].trim().to_string()
}
