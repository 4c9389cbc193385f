use std::sync::LazyLock;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::record::FundingDetails;

const MAX_AMOUNTS: usize = 5;

static AMOUNTS: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "funding_amounts",
        &[
            RuleSpec::labelled(r"(?i)Award Ceiling:\s*\$([0-9,]+)"),
            RuleSpec::labelled(r"(?i)Award Floor:\s*\$([0-9,]+)"),
            RuleSpec::labelled(r"(?i)Total.*Funding:\s*\$([0-9,]+)"),
            RuleSpec::labelled(r"(?i)Maximum.*Award:\s*\$([0-9,]+)"),
            RuleSpec::labelled(r"(?i)Minimum.*Award:\s*\$([0-9,]+)"),
        ],
    )
});

// "No" is checked first so a document stating both reads as no cost share.
static COST_SHARING: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "cost_sharing_requirement",
        &[
            RuleSpec::keyword("No", r"(?i)Cost Sharing.*Required:\s*No\b"),
            RuleSpec::keyword("Yes", r"(?i)Cost Sharing.*Required:\s*Yes\b"),
        ],
    )
});

static AWARD_COUNT: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "expected_number_of_awards",
        &[RuleSpec::group(r"(?i)Expected Number of Awards:\s*([0-9,]+)", 1)],
    )
});

static PROJECT_PERIOD: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "project_period",
        &[
            RuleSpec::sentence(r"(?i)\bproject period", 1),
            RuleSpec::sentence(r"(?i)\bperformance period", 1),
            RuleSpec::sentence(r"(?i)\bperiod of performance", 1),
            RuleSpec::sentence(r"(?i)\baward period", 1),
        ],
    )
});

pub fn extract(doc: &RawDocument) -> Result<FundingDetails, ExtractError> {
    let text = doc.text();
    Ok(FundingDetails {
        funding_amounts: RuleTable::get(&AMOUNTS)?.collect_capped(text, MAX_AMOUNTS),
        cost_sharing_requirement: RuleTable::get(&COST_SHARING)?.first_match(text).into(),
        expected_number_of_awards: RuleTable::get(&AWARD_COUNT)?.first_match(text).into(),
        project_period: RuleTable::get(&PROJECT_PERIOD)?.first_match(text).into(),
    })
}
