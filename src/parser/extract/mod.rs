pub mod application;
pub mod basic;
pub mod compliance;
pub mod dates;
pub mod document_info;
pub mod eligibility;
pub mod evaluation;
pub mod funding;
pub mod priorities;

use tracing::debug;

use crate::document::RawDocument;
use crate::insights;
use crate::record::GroupOutputs;

/// Run every field group against one document. Groups are independent: a
/// failure in one is carried as its own `Err` and never stops the others.
pub fn extract_all(doc: &RawDocument) -> GroupOutputs {
    debug!(
        document = doc.name(),
        words = doc.word_count(),
        "extracting field groups"
    );

    GroupOutputs {
        document_info: document_info::extract(doc),
        basic_information: basic::extract(doc),
        eligibility_requirements: eligibility::extract(doc),
        funding_details: funding::extract(doc),
        evaluation_criteria: evaluation::extract(doc),
        application_requirements: application::extract(doc),
        deadlines_and_dates: dates::extract(doc),
        program_priorities: priorities::extract(doc),
        compliance_requirements: compliance::extract(doc),
        strategic_insights: insights::strategic(doc),
        competitive_analysis: insights::competitive(doc),
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CompetitivenessLevel, FieldValue};

    fn fixture(name: &str) -> String {
        std::fs::read_to_string(format!("tests/fixtures/{}.txt", name)).unwrap()
    }

    #[test]
    fn blm_identity_and_funding() {
        let text = fixture("blm_wildlife");
        let out = extract_all(&RawDocument::new(&text, "BLM Wildlife Grant Demo"));

        let info = out.document_info.unwrap();
        assert_eq!(info.funding_opportunity_number, "L25AS00308");
        assert_eq!(
            info.program_title,
            "FY25 Bureau of Land Management Wildlife Resource Management Program- Bureau wide"
        );
        assert_eq!(info.issuing_agency, "Bureau of Land Management");

        let funding = out.funding_details.unwrap();
        assert_eq!(
            funding.funding_amounts,
            vec![
                "Award Ceiling: $1,500,000",
                "Award Floor: $10,000",
                "Total Program Funding: $10,000,000",
            ]
        );
        assert_eq!(funding.cost_sharing_requirement, "No");
        assert_eq!(funding.expected_number_of_awards, "90");
        assert_eq!(funding.project_period, FieldValue::NotSpecified);

        let dates = out.deadlines_and_dates.unwrap();
        assert_eq!(dates.submission_deadline, "July 23, 2025");
        assert_eq!(dates.important_dates, vec!["July 23, 2025"]);
    }

    #[test]
    fn blm_eligibility() {
        let text = fixture("blm_wildlife");
        let e = extract_all(&RawDocument::new(&text, "doc")).eligibility_requirements.unwrap();
        assert_eq!(e.eligible_applicants.len(), 10);
        assert!(e.eligible_applicants.iter().any(|a| a == "State governments"));
        assert!(e.eligible_applicants.iter().any(|a| a == "Native American tribal governments"));
        assert_eq!(e.ineligible_applicants, vec!["Individuals", "For-profit organizations"]);
    }

    #[test]
    fn blm_merit_review() {
        let text = fixture("blm_wildlife");
        let out = extract_all(&RawDocument::new(&text, "doc"));
        let eval = out.evaluation_criteria.unwrap();
        let names: Vec<_> = eval.evaluation_criteria.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names[0], "APPLICANT STATEMENT OF NEED");
        assert!(names.contains(&"PUBLIC BENEFIT AND PROGRAM INTEREST OF THE BLM"));
        assert!(eval.rating_scale.is_empty());

        let s = out.strategic_insights.unwrap();
        assert_eq!(s.competitiveness_level, CompetitivenessLevel::Medium);
    }

    #[test]
    fn blm_unterminated_priority_bullets() {
        let text = fixture("blm_wildlife");
        let p = extract_all(&RawDocument::new(&text, "doc")).program_priorities.unwrap();
        assert!(p.program_priorities.is_empty());
        assert!(p.program_goals.is_empty());
    }

    #[test]
    fn coastal_sections() {
        let text = fixture("coastal_resilience");
        let out = extract_all(&RawDocument::new(&text, "coastal"));

        let basic = out.basic_information.unwrap();
        assert!(basic
            .program_description
            .as_str()
            .starts_with("The Coastal Habitat Resilience Grants program funds"));
        assert_eq!(basic.assistance_listing_number, "11.473");
        assert_eq!(basic.announcement_type, "Initial");

        let e = out.eligibility_requirements.unwrap();
        assert_eq!(
            e.eligible_applicants,
            vec![
                "Local governments",
                "Tribal governments",
                "Private institutions of higher education",
                "Higher education",
                "Nonprofits",
            ]
        );
        assert_eq!(e.ineligible_applicants, vec!["Individuals", "Foreign entities"]);
        assert_eq!(e.additional_requirements, vec!["must have an active registration in SAM."]);

        let app = out.application_requirements.unwrap();
        assert_eq!(
            app.required_documents,
            vec![
                "SF-424",
                "Budget Information",
                "Project Narrative",
                "Budget Justification",
                "Letters of Support",
            ]
        );
        assert_eq!(app.page_limits, vec!["15 pages", "2 pages"]);
        assert_eq!(app.format_requirements, vec!["Single-spaced", "12-point font", "PDF format"]);

        let eval = out.evaluation_criteria.unwrap();
        let names: Vec<_> = eval.evaluation_criteria.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["TECHNICAL MERIT AND APPROACH", "OVERALL QUALIFICATIONS OF APPLICANTS"]);
        assert_eq!(eval.rating_scale, vec!["Excellent - Good - Fair - Poor"]);
    }

    #[test]
    fn coastal_full_text_groups() {
        let text = fixture("coastal_resilience");
        let out = extract_all(&RawDocument::new(&text, "coastal"));

        let info = out.document_info.unwrap();
        assert_eq!(info.funding_opportunity_number, "NOAA-NOS-OCM-2026-0042");
        assert_eq!(info.program_title, "FY26 Coastal Habitat Resilience Grants");
        assert_eq!(info.issuing_agency, "Department of Commerce");

        let funding = out.funding_details.unwrap();
        assert_eq!(funding.cost_sharing_requirement, "Yes");
        assert_eq!(funding.expected_number_of_awards, "12");
        assert_eq!(funding.project_period, "project period is 24 to 36 months.");

        let dates = out.deadlines_and_dates.unwrap();
        assert_eq!(dates.submission_deadline, "04/15/2026");
        assert_eq!(dates.important_dates, vec!["March 2, 2026", "04/15/2026", "2026-10-01"]);

        let p = out.program_priorities.unwrap();
        assert_eq!(
            p.program_priorities,
            vec![
                "priority is nature-based infrastructure that delivers public benefit.",
                "key priority is nature-based infrastructure that delivers public benefit.",
                "primary goal of the program is durable habitat restoration.",
            ]
        );
        assert_eq!(
            p.program_goals,
            vec![
                "goal of the program is durable habitat restoration.",
                "objective is long-term monitoring of restored sites.",
            ]
        );

        let compliance: Vec<_> = out
            .compliance_requirements
            .unwrap()
            .compliance_requirements
            .into_iter()
            .map(|c| c.requirement)
            .collect();
        assert_eq!(
            compliance,
            vec![
                "NEPA",
                "civil rights",
                "equal opportunity",
                "reporting requirements",
                "audit",
                "federal regulations",
            ]
        );

        let s = out.strategic_insights.unwrap();
        assert_eq!(s.competitiveness_level, CompetitivenessLevel::High);
        assert_eq!(s.key_success_factors, vec!["must demonstrate partnerships with local stakeholders."]);

        let c = out.competitive_analysis.unwrap();
        assert_eq!(
            c.competitive_volume_indicators,
            vec!["Highly competitive funding process", "Merit-based review process"]
        );
        assert_eq!(c.recommended_positioning.len(), 4);
    }
}
