use std::sync::LazyLock;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::parser::sections::{self, ELIGIBILITY};
use crate::record::EligibilityRequirements;

const MAX_ELIGIBLE: usize = 10;
const MAX_INELIGIBLE: usize = 5;
const MAX_ADDITIONAL: usize = 10;

static ELIGIBLE: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "eligible_applicants",
        &[
            RuleSpec::keyword("State governments", r"(?i)State governments"),
            RuleSpec::keyword("Local governments", r"(?i)Local governments"),
            RuleSpec::keyword("County governments", r"(?i)County governments"),
            RuleSpec::keyword("City or township governments", r"(?i)City[^\n]*governments"),
            RuleSpec::keyword("Township governments", r"(?i)Township governments"),
            RuleSpec::keyword("Tribal governments", r"(?i)Tribal governments"),
            RuleSpec::keyword("Native American tribal governments", r"(?i)Native American[^\n]*governments"),
            RuleSpec::keyword("Public institutions of higher education", r"(?i)Public[^\n]*institutions"),
            RuleSpec::keyword("Private institutions of higher education", r"(?i)Private[^\n]*institutions"),
            RuleSpec::keyword("Higher education", r"(?i)Higher education"),
            RuleSpec::keyword("Nonprofits", r"(?i)Nonprofits"),
            RuleSpec::keyword("501(c)(3) organizations", r"(?i)501\(c\)\(3\)"),
            RuleSpec::keyword("For-profit organizations", r"(?i)For-profit[^\n]*organizations"),
            RuleSpec::keyword("Small businesses", r"(?i)Small businesses"),
        ],
    )
});

static INELIGIBLE: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "ineligible_applicants",
        &[
            RuleSpec::keyword("Individuals", r"(?i)Individuals[^\n]*ineligible"),
            RuleSpec::keyword("For-profit organizations", r"(?i)For-profit[^\n]*ineligible"),
            RuleSpec::keyword("Foreign entities", r"(?i)Foreign[^\n]*entities[^\n]*ineligible"),
        ],
    )
});

static ADDITIONAL: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "additional_requirements",
        &[
            RuleSpec::sentence(r"(?i)\bmust have", 5),
            RuleSpec::sentence(r"(?i)\brequired to", 5),
            RuleSpec::sentence(r"(?i)\bshall\b", 5),
        ],
    )
});

/// Everything here reads the eligibility section only.
pub fn extract(doc: &RawDocument) -> Result<EligibilityRequirements, ExtractError> {
    let section = sections::segment(doc.text(), &ELIGIBILITY)?;
    let text = section.text;

    Ok(EligibilityRequirements {
        eligible_applicants: RuleTable::get(&ELIGIBLE)?.collect_capped(text, MAX_ELIGIBLE),
        ineligible_applicants: RuleTable::get(&INELIGIBLE)?.collect_capped(text, MAX_INELIGIBLE),
        additional_requirements: RuleTable::get(&ADDITIONAL)?.collect_capped(text, MAX_ADDITIONAL),
    })
}
