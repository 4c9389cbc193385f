use chrono::{TimeZone, Utc};
use grant_analyzer::record::{CompetitivenessLevel, FieldValue};
use grant_analyzer::{load, Analyzer, FailurePolicy, FixedClock};
use serde_json::Value;

const GROUPS: [&str; 12] = [
    "document_info",
    "basic_information",
    "eligibility_requirements",
    "funding_details",
    "evaluation_criteria",
    "application_requirements",
    "deadlines_and_dates",
    "program_priorities",
    "compliance_requirements",
    "strategic_insights",
    "competitive_analysis",
    "analysis_metadata",
];

fn analyzer() -> Analyzer<FixedClock> {
    let ts = Utc.with_ymd_and_hms(2025, 7, 14, 12, 0, 0).unwrap();
    Analyzer::with_clock(FixedClock(ts), FailurePolicy::Isolate)
}

fn analyze_json(text: &str, name: Option<&str>) -> Value {
    serde_json::to_value(analyzer().analyze(text, name)).unwrap()
}

#[test]
fn empty_input_is_a_complete_record() {
    let json = analyze_json("", None);
    let obj = json.as_object().unwrap();
    assert_eq!(obj.len(), GROUPS.len());
    for group in GROUPS {
        assert!(obj.contains_key(group), "missing {}", group);
    }

    assert_eq!(json["document_info"]["funding_opportunity_number"], "Not specified");
    assert_eq!(json["document_info"]["word_count"], 0);
    assert_eq!(json["document_info"]["document_name"], "Grant Document");
    assert_eq!(json["basic_information"]["program_description"], "Not specified");
    assert_eq!(json["funding_details"]["funding_amounts"], Value::Array(vec![]));
    assert_eq!(json["deadlines_and_dates"]["submission_deadline"], "Not specified");
    assert_eq!(json["strategic_insights"]["competitiveness_level"], "Low");
    assert_eq!(json["analysis_metadata"]["analyzer_version"], "2.0");
    assert_eq!(json["analysis_metadata"]["field_errors"], Value::Array(vec![]));
}

#[test]
fn idempotent_apart_from_timestamp() {
    let text = std::fs::read_to_string("tests/fixtures/coastal_resilience.txt").unwrap();
    let a = Analyzer::new(FailurePolicy::Isolate);
    let mut first = serde_json::to_value(a.analyze(&text, Some("coastal"))).unwrap();
    let mut second = serde_json::to_value(a.analyze(&text, Some("coastal"))).unwrap();
    first["analysis_metadata"]["timestamp"] = Value::Null;
    second["analysis_metadata"]["timestamp"] = Value::Null;
    assert_eq!(first, second);
}

#[test]
fn blm_scenario() {
    let doc = load("tests/fixtures/blm_wildlife.txt".as_ref()).unwrap();
    let outcome = analyzer().analyze(&doc.text, Some("BLM Wildlife Grant Demo"));
    let r = outcome.record().unwrap();

    assert_eq!(r.document_info.funding_opportunity_number, "L25AS00308");
    assert_eq!(r.funding_details.cost_sharing_requirement, "No");
    assert!(r
        .funding_details
        .funding_amounts
        .contains(&"Award Ceiling: $1,500,000".to_string()));
    let eligible = &r.eligibility_requirements.eligible_applicants;
    assert!(eligible.contains(&"State governments".to_string()));
    assert!(eligible.contains(&"Native American tribal governments".to_string()));
    assert_eq!(r.analysis_metadata.document_name, "BLM Wildlife Grant Demo");
    assert!(r.analysis_metadata.field_errors.is_empty());
}

#[test]
fn minimal_scenario() {
    let text = "Funding Opportunity Number: L25AS00308\n\
                Award Ceiling: $1,500,000\n\
                Cost Sharing Required: No\n\
                ELIGIBILITY\n\
                State governments\n\
                Native American tribal governments\n";
    let outcome = analyzer().analyze(text, None);
    let r = outcome.record().unwrap();
    assert_eq!(r.document_info.funding_opportunity_number, "L25AS00308");
    assert_eq!(r.funding_details.cost_sharing_requirement, "No");
    assert_eq!(
        r.eligibility_requirements.eligible_applicants,
        vec![
            "State governments",
            "Tribal governments",
            "Native American tribal governments",
        ]
    );
}

#[test]
fn caps_hold() {
    let mut text = String::new();
    for i in 1..=9 {
        text.push_str(&format!("Award Ceiling: ${},000\n", i));
        text.push_str(&format!("Award Floor: ${}00\n", i));
    }
    for day in 1..=28 {
        text.push_str(&format!("Milestone {}/{}/2025 and again {}/{}/2025\n", 3, day, 3, day));
    }
    text.push_str("MERIT REVIEW\n");
    for label in ["ALPHA", "BRAVO", "CHARLIE", "DELTA", "ECHO", "FOXTROT", "GOLF", "HOTEL"] {
        text.push_str(&format!("{} PROJECT STATEMENT\n• scored item\n", label));
    }

    let outcome = analyzer().analyze(&text, None);
    let r = outcome.record().unwrap();
    assert_eq!(r.funding_details.funding_amounts.len(), 5);
    assert_eq!(r.deadlines_and_dates.important_dates.len(), 10);
    let mut dates = r.deadlines_and_dates.important_dates.clone();
    dates.sort();
    dates.dedup();
    assert_eq!(dates.len(), 10);
    assert_eq!(r.evaluation_criteria.evaluation_criteria.len(), 6);
}

#[test]
fn keyword_under_application_does_not_reach_eligibility() {
    let text = "ELIGIBILITY\nState governments\n\nAPPLICATION\nSmall businesses may partner.\n";
    let outcome = analyzer().analyze(text, None);
    let eligible = &outcome.record().unwrap().eligibility_requirements.eligible_applicants;
    assert_eq!(eligible, &vec!["State governments".to_string()]);
}

#[test]
fn competitiveness_levels() {
    let level = |text: &str| {
        analyzer()
            .analyze(text, None)
            .record()
            .unwrap()
            .strategic_insights
            .competitiveness_level
    };
    assert_eq!(level("A competitive program under merit review."), CompetitivenessLevel::High);
    assert_eq!(level("A competitive program."), CompetitivenessLevel::Medium);
    assert_eq!(level("Open to all."), CompetitivenessLevel::Low);
}

#[test]
fn independent_documents_in_parallel() {
    let a = analyzer();
    let texts = [
        "Funding Opportunity Number: AAA111",
        "Funding Opportunity Number: BBB222",
        "no number here",
    ];
    let numbers: Vec<FieldValue> = std::thread::scope(|s| {
        let handles: Vec<_> = texts
            .iter()
            .map(|t| {
                let a = &a;
                s.spawn(move || {
                    a.analyze(t, None).record().unwrap().document_info.funding_opportunity_number.clone()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(numbers[0], "AAA111");
    assert_eq!(numbers[1], "BBB222");
    assert_eq!(numbers[2], FieldValue::NotSpecified);
}

#[test]
fn strict_mode_on_clean_input_still_returns_record() {
    let ts = Utc.with_ymd_and_hms(2025, 7, 14, 12, 0, 0).unwrap();
    let a = Analyzer::with_clock(FixedClock(ts), FailurePolicy::Strict);
    let json = serde_json::to_value(a.analyze("ELIGIBILITY\nNonprofits", Some("x"))).unwrap();
    assert!(json.get("error").is_none());
    assert_eq!(json["analysis_metadata"]["timestamp"], "2025-07-14T12:00:00Z");
}
