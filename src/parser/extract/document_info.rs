use std::sync::LazyLock;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::record::DocumentInfo;

static OPPORTUNITY_NUMBER: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "funding_opportunity_number",
        &[
            RuleSpec::group(r"(?i)Funding Opportunity Number:\s*([A-Z0-9][A-Z0-9-]*)", 1),
            RuleSpec::group(r"(?i)FONUM:\s*([A-Z0-9][A-Z0-9-]*)", 1),
            RuleSpec::group(r"(?i)Opportunity Number:\s*([A-Z0-9][A-Z0-9-]*)", 1),
            RuleSpec::group(r"(?i)NOFO Number:\s*([A-Z0-9][A-Z0-9-]*)", 1),
        ],
    )
});

static PROGRAM_TITLE: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "program_title",
        &[
            RuleSpec::group(r"(?i)Program Title:\s*([^\n]+)", 1),
            RuleSpec::group(r"(?i)Funding Opportunity Title:\s*([^\n]+)", 1),
            RuleSpec::group(r"(?i)TITLE:\s*([^\n]+)", 1),
            RuleSpec::group(r"(?i)Notice of Funding Opportunity\s*([^\n]+)", 1),
        ],
    )
});

// Whole match: the agency name includes its "Bureau of"/"Department of" prefix.
static ISSUING_AGENCY: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "issuing_agency",
        &[
            RuleSpec::whole(r"(?i)Bureau of [^\n]+"),
            RuleSpec::whole(r"(?i)Department of [^\n]+"),
            RuleSpec::whole(r"(?i)Agency:\s*[^\n]+"),
        ],
    )
});

pub fn extract(doc: &RawDocument) -> Result<DocumentInfo, ExtractError> {
    let text = doc.text();
    Ok(DocumentInfo {
        funding_opportunity_number: RuleTable::get(&OPPORTUNITY_NUMBER)?.first_match(text).into(),
        program_title: RuleTable::get(&PROGRAM_TITLE)?.first_match(text).into(),
        issuing_agency: RuleTable::get(&ISSUING_AGENCY)?.first_match(text).into(),
        ..DocumentInfo::bare(doc)
    })
}
