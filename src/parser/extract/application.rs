use std::sync::LazyLock;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::parser::sections::{self, APPLICATION};
use crate::record::ApplicationRequirements;

static DOCUMENTS: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "required_documents",
        &[
            RuleSpec::keyword("SF-424", r"(?i)SF-?424"),
            RuleSpec::keyword("Budget Information", r"(?i)Budget Information"),
            RuleSpec::keyword("Project Narrative", r"(?i)Project Narrative"),
            RuleSpec::keyword("Budget Narrative", r"(?i)Budget Narrative"),
            RuleSpec::keyword("Budget Justification", r"(?i)Budget.*Justification"),
            RuleSpec::keyword("Biographical Sketch", r"(?i)Biographical Sketch"),
            RuleSpec::keyword("Current and Pending Support", r"(?i)Current and Pending Support"),
            RuleSpec::keyword("Letters of Support", r"(?i)Letters? of Support"),
            RuleSpec::keyword("Curriculum Vitae", r"(?i)Curriculum Vitae"),
            RuleSpec::keyword("Project Abstract", r"(?i)Project Abstract"),
            RuleSpec::keyword("Organizational Chart", r"(?i)Organizational Chart"),
        ],
    )
});

static PAGE_LIMITS: CompiledTable = LazyLock::new(|| {
    RuleTable::compile("page_limits", &[RuleSpec::group(r"(?i)(\d+)\s*pages?\b", 1)])
});

static FORMAT: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "format_requirements",
        &[
            RuleSpec::keyword("Double-spaced", r"(?i)double.?spaced"),
            RuleSpec::keyword("Single-spaced", r"(?i)single.?spaced"),
            RuleSpec::keyword("12-point font", r"(?i)12.?point font"),
            RuleSpec::keyword("Times New Roman", r"(?i)Times New Roman"),
            RuleSpec::keyword("Arial", r"(?i)\bArial\b"),
            RuleSpec::keyword("PDF format", r"(?i)PDF format"),
        ],
    )
});

pub fn extract(doc: &RawDocument) -> Result<ApplicationRequirements, ExtractError> {
    let section = sections::segment(doc.text(), &APPLICATION)?;
    let text = section.text;

    let page_limits = RuleTable::get(&PAGE_LIMITS)?
        .collect(text)
        .into_iter()
        .map(|n| format!("{} pages", n))
        .collect();

    Ok(ApplicationRequirements {
        required_documents: RuleTable::get(&DOCUMENTS)?.collect(text),
        page_limits,
        format_requirements: RuleTable::get(&FORMAT)?.collect(text),
    })
}
