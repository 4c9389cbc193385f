use std::sync::LazyLock;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::record::DeadlinesAndDates;

const MAX_DATES: usize = 10;

macro_rules! long_date {
    () => {
        r"(?:January|February|March|April|May|June|July|August|September|October|November|December)\s+\d{1,2},?\s+\d{4}"
    };
}

macro_rules! numeric_date {
    () => {
        r"\d{1,2}/\d{1,2}/\d{4}"
    };
}

macro_rules! any_date {
    () => {
        concat!("(", long_date!(), "|", numeric_date!(), ")")
    };
}

static DEADLINE: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "submission_deadline",
        &[
            RuleSpec::group(concat!(r"(?i)Closing Date[^\n]*?", any_date!()), 1),
            RuleSpec::group(concat!(r"(?i)deadline[^\n]*?", any_date!()), 1),
            RuleSpec::group(concat!(r"(?i)\bdue\b[^\n]*?", any_date!()), 1),
            RuleSpec::group(concat!(r"\b(", long_date!(), r")\b"), 1),
            RuleSpec::group(concat!(r"\b(", numeric_date!(), r")\b"), 1),
        ],
    )
});

static DATES: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "important_dates",
        &[
            RuleSpec::whole(concat!(r"\b", long_date!(), r"\b")),
            RuleSpec::whole(concat!(r"\b", numeric_date!(), r"\b")),
            RuleSpec::whole(r"\b\d{4}-\d{2}-\d{2}\b"),
        ],
    )
});

pub fn extract(doc: &RawDocument) -> Result<DeadlinesAndDates, ExtractError> {
    let text = doc.text();
    Ok(DeadlinesAndDates {
        submission_deadline: RuleTable::get(&DEADLINE)?.first_match(text).into(),
        important_dates: RuleTable::get(&DATES)?.collect_capped(text, MAX_DATES),
    })
}
