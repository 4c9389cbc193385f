use std::sync::LazyLock;

use itertools::Itertools;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::parser::sections::{self, DESCRIPTION};
use crate::record::{BasicInformation, FieldValue};

const MIN_DESCRIPTION_CHARS: usize = 100;
const MAX_DESCRIPTION_CHARS: usize = 500;

static ASSISTANCE_LISTING: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "assistance_listing_number",
        &[
            RuleSpec::group(r"(?i)Assistance Listing Number[:\s]+([0-9][0-9.]*)", 1),
            RuleSpec::group(r"(?i)CFDA Number[:\s]+([0-9][0-9.]*)", 1),
        ],
    )
});

static ANNOUNCEMENT_TYPE: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "announcement_type",
        &[RuleSpec::group(r"(?i)Announcement Type[:\s]+(\w+)", 1)],
    )
});

pub fn extract(doc: &RawDocument) -> Result<BasicInformation, ExtractError> {
    let text = doc.text();
    let section = sections::segment(text, &DESCRIPTION)?;

    Ok(BasicInformation {
        program_description: description(section.body),
        assistance_listing_number: RuleTable::get(&ASSISTANCE_LISTING)?.first_match(text).into(),
        announcement_type: RuleTable::get(&ANNOUNCEMENT_TYPE)?.first_match(text).into(),
    })
}

/// Collapse the section body to one line; too-short bodies are treated as
/// a stray heading mention rather than a description.
fn description(body: &str) -> FieldValue {
    let flat = body
        .trim_start_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
        .split_whitespace()
        .join(" ");
    if flat.chars().count() < MIN_DESCRIPTION_CHARS {
        return FieldValue::NotSpecified;
    }
    FieldValue::Found(flat.chars().take(MAX_DESCRIPTION_CHARS).collect())
}
