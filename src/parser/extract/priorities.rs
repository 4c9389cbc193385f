use std::sync::LazyLock;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::parser::sections::{self, PROGRAM_OVERVIEW};
use crate::record::ProgramPriorities;

const MAX_PRIORITIES: usize = 8;
const MAX_GOALS: usize = 8;

static PRIORITIES: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "program_priorities",
        &[
            RuleSpec::sentence(r"(?i)\bpriorit(?:y|ies)", 2),
            RuleSpec::sentence(r"(?i)\bfocus", 2),
            RuleSpec::sentence(r"(?i)\bemphasis", 2),
            RuleSpec::sentence(r"(?i)\bimportant", 2),
            RuleSpec::sentence(r"(?i)\bcritical", 2),
            RuleSpec::sentence(r"(?i)\bessential", 2),
            RuleSpec::sentence(r"(?i)\bkey\b", 2),
            RuleSpec::sentence(r"(?i)\bprimary", 2),
            RuleSpec::sentence(r"(?i)\bmain\b", 2),
            RuleSpec::sentence(r"(?i)\bprincipal", 2),
        ],
    )
});

static GOALS: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "program_goals",
        &[
            RuleSpec::sentence(r"(?i)\bgoals?\b", 3),
            RuleSpec::sentence(r"(?i)\bobjectives?\b", 3),
            RuleSpec::sentence(r"(?i)\bpurposes?\b", 3),
        ],
    )
});

pub fn extract(doc: &RawDocument) -> Result<ProgramPriorities, ExtractError> {
    let section = sections::segment(doc.text(), &PROGRAM_OVERVIEW)?;
    let text = section.text;

    Ok(ProgramPriorities {
        program_priorities: RuleTable::get(&PRIORITIES)?.collect_capped(text, MAX_PRIORITIES),
        program_goals: RuleTable::get(&GOALS)?.collect_capped(text, MAX_GOALS),
    })
}
