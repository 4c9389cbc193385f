use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::document::RawDocument;
use crate::error::ExtractError;

pub const ANALYZER_VERSION: &str = "2.0";

/// A single-valued field, or the "Not specified" sentinel when no rule hit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldValue {
    Found(String),
    #[default]
    NotSpecified,
}

impl FieldValue {
    pub const NOT_SPECIFIED: &'static str = "Not specified";

    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Found(v) => v,
            FieldValue::NotSpecified => Self::NOT_SPECIFIED,
        }
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.is_empty() => FieldValue::Found(v),
            _ => FieldValue::NotSpecified,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Some(value.to_string()).into()
    }
}

impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl PartialEq<&str> for FieldValue {
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == *other
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum CompetitivenessLevel {
    High,
    Medium,
    #[default]
    Low,
}

impl CompetitivenessLevel {
    /// Strict signal count: two or more is High, one is Medium.
    pub fn from_score(score: usize) -> Self {
        match score {
            0 => CompetitivenessLevel::Low,
            1 => CompetitivenessLevel::Medium,
            _ => CompetitivenessLevel::High,
        }
    }
}

// ── Field groups ──

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocumentInfo {
    pub funding_opportunity_number: FieldValue,
    pub program_title: FieldValue,
    pub issuing_agency: FieldValue,
    pub document_name: String,
    pub word_count: usize,
    pub character_count: usize,
}

impl DocumentInfo {
    /// Identity fields only; used when the pattern fields could not run.
    pub fn bare(doc: &RawDocument) -> Self {
        DocumentInfo {
            document_name: doc.name().to_string(),
            word_count: doc.word_count(),
            character_count: doc.character_count(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BasicInformation {
    pub program_description: FieldValue,
    pub assistance_listing_number: FieldValue,
    pub announcement_type: FieldValue,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EligibilityRequirements {
    pub eligible_applicants: Vec<String>,
    pub ineligible_applicants: Vec<String>,
    pub additional_requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FundingDetails {
    pub funding_amounts: Vec<String>,
    pub cost_sharing_requirement: FieldValue,
    pub expected_number_of_awards: FieldValue,
    pub project_period: FieldValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    pub category: String,
    pub weight: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EvaluationCriteria {
    pub evaluation_criteria: Vec<Criterion>,
    pub rating_scale: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicationRequirements {
    pub required_documents: Vec<String>,
    pub page_limits: Vec<String>,
    pub format_requirements: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeadlinesAndDates {
    pub submission_deadline: FieldValue,
    pub important_dates: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProgramPriorities {
    pub program_priorities: Vec<String>,
    pub program_goals: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceItem {
    pub requirement: String,
    pub context: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplianceRequirements {
    pub compliance_requirements: Vec<ComplianceItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StrategicInsights {
    pub strategic_insights: Vec<String>,
    pub competitiveness_level: CompetitivenessLevel,
    pub key_success_factors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CompetitiveAnalysis {
    pub competitive_volume_indicators: Vec<String>,
    pub differentiation_opportunities: Vec<String>,
    pub recommended_positioning: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    pub group: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisMetadata {
    pub timestamp: DateTime<Utc>,
    pub document_name: String,
    pub analyzer_version: String,
    pub field_errors: Vec<FieldError>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    pub document_info: DocumentInfo,
    pub basic_information: BasicInformation,
    pub eligibility_requirements: EligibilityRequirements,
    pub funding_details: FundingDetails,
    pub evaluation_criteria: EvaluationCriteria,
    pub application_requirements: ApplicationRequirements,
    pub deadlines_and_dates: DeadlinesAndDates,
    pub program_priorities: ProgramPriorities,
    pub compliance_requirements: ComplianceRequirements,
    pub strategic_insights: StrategicInsights,
    pub competitive_analysis: CompetitiveAnalysis,
    pub analysis_metadata: AnalysisMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub document_name: String,
    pub timestamp: DateTime<Utc>,
}

/// What crosses the boundary: a full record or an error envelope, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AnalysisOutcome {
    Record(Box<AnalysisRecord>),
    Failed(ErrorEnvelope),
}

impl AnalysisOutcome {
    pub fn record(&self) -> Option<&AnalysisRecord> {
        match self {
            AnalysisOutcome::Record(r) => Some(&**r),
            AnalysisOutcome::Failed(_) => None,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, AnalysisOutcome::Failed(_))
    }
}

// ── Assembly ──

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// A failed group falls back to its empty default and is reported in
    /// `analysis_metadata.field_errors`.
    #[default]
    Isolate,
    /// Any failed group discards the whole record for an error envelope.
    Strict,
}

/// Raw per-group extractor results, before the failure policy is applied.
#[derive(Debug)]
pub struct GroupOutputs {
    pub document_info: Result<DocumentInfo, ExtractError>,
    pub basic_information: Result<BasicInformation, ExtractError>,
    pub eligibility_requirements: Result<EligibilityRequirements, ExtractError>,
    pub funding_details: Result<FundingDetails, ExtractError>,
    pub evaluation_criteria: Result<EvaluationCriteria, ExtractError>,
    pub application_requirements: Result<ApplicationRequirements, ExtractError>,
    pub deadlines_and_dates: Result<DeadlinesAndDates, ExtractError>,
    pub program_priorities: Result<ProgramPriorities, ExtractError>,
    pub compliance_requirements: Result<ComplianceRequirements, ExtractError>,
    pub strategic_insights: Result<StrategicInsights, ExtractError>,
    pub competitive_analysis: Result<CompetitiveAnalysis, ExtractError>,
}

struct Resolver {
    errors: Vec<FieldError>,
}

impl Resolver {
    fn take<T>(&mut self, group: &str, result: Result<T, ExtractError>, fallback: impl FnOnce() -> T) -> T {
        result.unwrap_or_else(|err| {
            warn!(group, error = %err, "field group failed");
            self.errors.push(FieldError {
                group: group.to_string(),
                error: err.to_string(),
            });
            fallback()
        })
    }
}

pub fn assemble(
    doc: &RawDocument,
    outputs: GroupOutputs,
    timestamp: DateTime<Utc>,
    policy: FailurePolicy,
) -> AnalysisOutcome {
    let mut r = Resolver { errors: Vec::new() };

    let mut record = AnalysisRecord {
        document_info: r.take("document_info", outputs.document_info, || DocumentInfo::bare(doc)),
        basic_information: r.take("basic_information", outputs.basic_information, Default::default),
        eligibility_requirements: r.take(
            "eligibility_requirements",
            outputs.eligibility_requirements,
            Default::default,
        ),
        funding_details: r.take("funding_details", outputs.funding_details, Default::default),
        evaluation_criteria: r.take("evaluation_criteria", outputs.evaluation_criteria, Default::default),
        application_requirements: r.take(
            "application_requirements",
            outputs.application_requirements,
            Default::default,
        ),
        deadlines_and_dates: r.take("deadlines_and_dates", outputs.deadlines_and_dates, Default::default),
        program_priorities: r.take("program_priorities", outputs.program_priorities, Default::default),
        compliance_requirements: r.take(
            "compliance_requirements",
            outputs.compliance_requirements,
            Default::default,
        ),
        strategic_insights: r.take("strategic_insights", outputs.strategic_insights, Default::default),
        competitive_analysis: r.take("competitive_analysis", outputs.competitive_analysis, Default::default),
        analysis_metadata: AnalysisMetadata {
            timestamp,
            document_name: doc.name().to_string(),
            analyzer_version: ANALYZER_VERSION.to_string(),
            field_errors: Vec::new(),
        },
    };

    if policy == FailurePolicy::Strict {
        if let Some(first) = r.errors.first() {
            return AnalysisOutcome::Failed(ErrorEnvelope {
                error: format!("Analysis failed: {}: {}", first.group, first.error),
                document_name: doc.name().to_string(),
                timestamp,
            });
        }
    }

    record.analysis_metadata.field_errors = r.errors;
    AnalysisOutcome::Record(Box::new(record))
}
