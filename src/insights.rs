//! Heuristic signals over the full text. Each signal is a keyword group that
//! either fires or not; nothing here looks at sections.

use std::sync::LazyLock;

use tracing::debug;

use crate::document::RawDocument;
use crate::error::ExtractError;
use crate::parser::rules::{CompiledTable, RuleSpec, RuleTable};
use crate::record::{CompetitiveAnalysis, CompetitivenessLevel, StrategicInsights};

const MAX_SUCCESS_FACTORS: usize = 6;
const MAX_POSITIONING: usize = 4;

static STRATEGIC: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "strategic_insights",
        &[
            RuleSpec::keyword(
                "Partnership/collaboration emphasis - consider forming strategic partnerships",
                r"(?i)partnership|collaboration|cooperative",
            ),
            RuleSpec::keyword(
                "Innovation focus - highlight unique/innovative approaches in proposal",
                r"(?i)innovation|innovative|novel",
            ),
            RuleSpec::keyword(
                "Community engagement important - emphasize stakeholder involvement",
                r"(?i)community|public benefit|stakeholder",
            ),
            RuleSpec::keyword(
                "Data-driven approach valued - include robust monitoring and evaluation plan",
                r"(?i)data|monitoring|evaluation|assessment",
            ),
            RuleSpec::keyword(
                "Sustainability focus - develop strong continuation plan beyond grant period",
                r"(?i)sustainability|long.?term|ongoing",
            ),
        ],
    )
});

/// One point per rule that matches anywhere.
static COMPETITION_SIGNALS: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "competitiveness_signals",
        &[
            RuleSpec::whole(r"(?i)limited funding|competitive"),
            RuleSpec::whole(r"(?i)merit review|peer review"),
            RuleSpec::whole(r"(?i)exceeds.*meets.*does not meet"),
        ],
    )
});

static SUCCESS_FACTORS: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "key_success_factors",
        &[
            RuleSpec::sentence(r"(?i)must demonstrate", 2),
            RuleSpec::sentence(r"(?i)should include", 2),
            RuleSpec::sentence(r"(?i)required to", 2),
            RuleSpec::sentence(r"(?i)essential", 2),
            RuleSpec::sentence(r"(?i)critical", 2),
        ],
    )
});

static VOLUME: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "competitive_volume_indicators",
        &[
            RuleSpec::keyword(
                "Highly competitive funding process",
                r"(?i)limited.*fund|competitive.*process",
            ),
            RuleSpec::keyword("Merit-based review process", r"(?i)merit.*review|peer.*review"),
        ],
    )
});

static DIFFERENTIATION: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "differentiation_opportunities",
        &[
            RuleSpec::keyword("Innovation and uniqueness valued", r"(?i)innovation|novel|unique"),
            RuleSpec::keyword(
                "Strategic partnerships can provide advantage",
                r"(?i)partnership|collaboration",
            ),
            RuleSpec::keyword(
                "Demonstrated experience is important",
                r"(?i)experience|track record|past performance",
            ),
        ],
    )
});

static POSITIONING: CompiledTable = LazyLock::new(|| {
    RuleTable::compile(
        "recommended_positioning",
        &[
            RuleSpec::keyword(
                "Position project as high-impact community benefit initiative",
                r"(?i)public benefit|community",
            ),
            RuleSpec::keyword(
                "Emphasize evidence-based approach and data-driven methodology",
                r"(?i)data|evidence|research",
            ),
            RuleSpec::keyword(
                "Highlight strategic partnerships and collaborative approach",
                r"(?i)partnership|collaboration",
            ),
            RuleSpec::keyword(
                "Showcase innovative methods and cutting-edge approaches",
                r"(?i)innovation|cutting.edge",
            ),
            RuleSpec::keyword(
                "Develop strong sustainability and long-term impact narrative",
                r"(?i)sustainability|long.term",
            ),
        ],
    )
});

pub fn strategic(doc: &RawDocument) -> Result<StrategicInsights, ExtractError> {
    let text = doc.text();
    let score = RuleTable::get(&COMPETITION_SIGNALS)?.count_matching(text);
    debug!(score, "competitiveness signals");

    Ok(StrategicInsights {
        strategic_insights: RuleTable::get(&STRATEGIC)?.collect(text),
        competitiveness_level: CompetitivenessLevel::from_score(score),
        key_success_factors: RuleTable::get(&SUCCESS_FACTORS)?.collect_capped(text, MAX_SUCCESS_FACTORS),
    })
}

pub fn competitive(doc: &RawDocument) -> Result<CompetitiveAnalysis, ExtractError> {
    let text = doc.text();
    Ok(CompetitiveAnalysis {
        competitive_volume_indicators: RuleTable::get(&VOLUME)?.collect(text),
        differentiation_opportunities: RuleTable::get(&DIFFERENTIATION)?.collect(text),
        recommended_positioning: RuleTable::get(&POSITIONING)?.collect_capped(text, MAX_POSITIONING),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(text: &str) -> CompetitivenessLevel {
        strategic(&RawDocument::new(text, "doc")).unwrap().competitiveness_level
    }

    #[test]
    fn competitiveness_counts_signals() {
        assert_eq!(level("Plain text about birds."), CompetitivenessLevel::Low);
        assert_eq!(level("This is a competitive program."), CompetitivenessLevel::Medium);
        assert_eq!(
            level("A competitive program with merit review."),
            CompetitivenessLevel::High
        );
        assert_eq!(
            level("Limited funding. Peer review. Exceeds, meets, or does not meet."),
            CompetitivenessLevel::High
        );
    }

    #[test]
    fn rating_scale_alone_scores_one_point() {
        assert_eq!(
            level("Each factor is rated exceeds, meets, or does not meet expectations."),
            CompetitivenessLevel::Medium
        );
    }

    #[test]
    fn repeated_signal_counts_once() {
        assert_eq!(level("competitive competitive competitive"), CompetitivenessLevel::Medium);
    }

    #[test]
    fn insights_in_catalog_order() {
        let s = strategic(&RawDocument::new(
            "Long-term monitoring with community partners through a partnership.",
            "doc",
        ))
        .unwrap();
        assert_eq!(
            s.strategic_insights,
            vec![
                "Partnership/collaboration emphasis - consider forming strategic partnerships",
                "Community engagement important - emphasize stakeholder involvement",
                "Data-driven approach valued - include robust monitoring and evaluation plan",
                "Sustainability focus - develop strong continuation plan beyond grant period",
            ]
        );
    }

    #[test]
    fn success_factor_sentences() {
        let s = strategic(&RawDocument::new(
            "Applicants must demonstrate capacity. Budgets should include match. It is critical to report.",
            "doc",
        ))
        .unwrap();
        assert_eq!(
            s.key_success_factors,
            vec![
                "must demonstrate capacity.",
                "should include match.",
                "critical to report.",
            ]
        );
    }

    #[test]
    fn positioning_capped_at_four() {
        let c = competitive(&RawDocument::new(
            "community data partnership innovation sustainability",
            "doc",
        ))
        .unwrap();
        assert_eq!(c.recommended_positioning.len(), MAX_POSITIONING);
        assert_eq!(
            c.recommended_positioning[3],
            "Showcase innovative methods and cutting-edge approaches"
        );
    }

    #[test]
    fn competitive_analysis_signals() {
        let c = competitive(&RawDocument::new(
            "Proposals undergo merit review. Past performance and a track record matter.",
            "doc",
        ))
        .unwrap();
        assert_eq!(c.competitive_volume_indicators, vec!["Merit-based review process"]);
        assert_eq!(
            c.differentiation_opportunities,
            vec!["Demonstrated experience is important"]
        );
    }

    #[test]
    fn empty_text() {
        let doc = RawDocument::new("", "doc");
        assert_eq!(strategic(&doc).unwrap(), StrategicInsights::default());
        assert_eq!(competitive(&doc).unwrap(), CompetitiveAnalysis::default());
    }
}
