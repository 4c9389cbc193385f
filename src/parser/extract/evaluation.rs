use std::sync::LazyLock;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::parser::sections::{self, MERIT_REVIEW};
use crate::record::{Criterion, EvaluationCriteria, FieldValue};

const MAX_CRITERIA: usize = 6;
const MAX_SCALES: usize = 3;
const MIN_CATEGORY_CHARS: usize = 11;
const CRITERION_SOURCE: &str = "Extracted from merit review section";

// Case-sensitive: only upper-case runs on a single line are criterion headings.
static CRITERIA: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "evaluation_criteria",
        &[
            RuleSpec::group(r"([A-Z ]*STATEMENT[A-Z ]*)", 1),
            RuleSpec::group(r"([A-Z ]*TECHNICAL[A-Z ]*)", 1),
            RuleSpec::group(r"([A-Z ]*APPROACH[A-Z ]*)", 1),
            RuleSpec::group(r"([A-Z ]*BENEFIT[A-Z ]*)", 1),
            RuleSpec::group(r"([A-Z ]*QUALIFICATIONS[A-Z ]*)", 1),
            RuleSpec::group(r"([A-Z ]*PERFORMANCE[A-Z ]*)", 1),
        ],
    )
});

static RATING_SCALE: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "rating_scale",
        &[
            RuleSpec::keyword("Exceeds - meets - does not meet", r"(?i)Exceeds.*meets.*does not meet"),
            RuleSpec::keyword("Excellent - Good - Fair - Poor", r"(?i)Excellent.*Good.*Fair.*Poor"),
            RuleSpec::keyword(
                "Outstanding - Satisfactory - Unsatisfactory",
                r"(?i)Outstanding.*Satisfactory.*Unsatisfactory",
            ),
            RuleSpec::keyword(
                "Superior - Acceptable - Unacceptable",
                r"(?i)Superior.*Acceptable.*Unacceptable",
            ),
        ],
    )
});

pub fn extract(doc: &RawDocument) -> Result<EvaluationCriteria, ExtractError> {
    let section = sections::segment(doc.text(), &MERIT_REVIEW)?;
    let text = section.text;

    let evaluation_criteria = RuleTable::get(&CRITERIA)?
        .collect(text)
        .into_iter()
        .filter(|name| name.chars().count() >= MIN_CATEGORY_CHARS)
        .take(MAX_CRITERIA)
        .map(|category| Criterion {
            category,
            weight: FieldValue::NOT_SPECIFIED.to_string(),
            description: CRITERION_SOURCE.to_string(),
        })
        .collect();

    Ok(EvaluationCriteria {
        evaluation_criteria,
        rating_scale: RuleTable::get(&RATING_SCALE)?.collect_capped(text, MAX_SCALES),
    })
}
