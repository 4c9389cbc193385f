use std::ops::Range;
use std::sync::LazyLock;

use itertools::Itertools;
use regex::{Captures, Regex};

use crate::error::ExtractError;

/// Appended to sentence rules: run to the next terminator on the same line
/// (kept). A line with no terminator only matches when it ends the text.
const SENTENCE_TAIL: &str = r"[^.!?\n]*(?:[.!?]|\n?\z)";

/// A rule table compiled on first use. The compile result is cached as-is, so
/// a broken table fails the same field group on every call and nothing else.
pub type CompiledTable = LazyLock<Result<RuleTable, ExtractError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Numbered capture group, trimmed.
    Group(usize),
    /// Entire match, trimmed.
    Whole,
    /// `"<text before ':'>: $<group 1>"`, for labelled currency amounts.
    Labelled,
    /// Trigger match extended to the end of its sentence.
    Sentence,
    /// Fixed output string; the pattern only tests presence.
    Constant(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub pattern: &'static str,
    pub capture: Capture,
    pub limit: Option<usize>,
}

impl RuleSpec {
    pub const fn group(pattern: &'static str, group: usize) -> Self {
        Self { pattern, capture: Capture::Group(group), limit: None }
    }

    pub const fn whole(pattern: &'static str) -> Self {
        Self { pattern, capture: Capture::Whole, limit: None }
    }

    pub const fn labelled(pattern: &'static str) -> Self {
        Self { pattern, capture: Capture::Labelled, limit: None }
    }

    pub const fn sentence(pattern: &'static str, limit: usize) -> Self {
        Self { pattern, capture: Capture::Sentence, limit: Some(limit) }
    }

    /// Vocabulary entry: contributes `label` once if `pattern` occurs at all.
    pub const fn keyword(label: &'static str, pattern: &'static str) -> Self {
        Self { pattern, capture: Capture::Constant(label), limit: Some(1) }
    }
}

#[derive(Debug)]
struct Rule {
    spec: RuleSpec,
    regex: Regex,
}

impl Rule {
    fn compile(table: &'static str, spec: RuleSpec) -> Result<Self, ExtractError> {
        let regex = if spec.capture == Capture::Sentence {
            Regex::new(&format!("{}{}", spec.pattern, SENTENCE_TAIL))
        } else {
            Regex::new(spec.pattern)
        }
        .map_err(|source| ExtractError::Pattern { table, source })?;

        let needed = match spec.capture {
            Capture::Group(n) => n,
            Capture::Labelled => 1,
            _ => 0,
        };
        if needed >= regex.captures_len() {
            return Err(ExtractError::MissingGroup {
                table,
                pattern: spec.pattern,
                group: needed,
                available: regex.captures_len() - 1,
            });
        }

        Ok(Rule { spec, regex })
    }

    fn render(&self, caps: &Captures) -> String {
        match self.spec.capture {
            Capture::Group(n) => caps.get(n).map_or("", |m| m.as_str()).trim().to_string(),
            Capture::Whole | Capture::Sentence => caps[0].trim().to_string(),
            Capture::Labelled => {
                let whole = &caps[0];
                let label = whole.split(':').next().unwrap_or(whole).trim();
                let amount = caps.get(1).map_or("", |m| m.as_str());
                format!("{}: ${}", label, amount)
            }
            Capture::Constant(label) => label.to_string(),
        }
    }

    fn values<'a>(&'a self, text: &'a str) -> impl Iterator<Item = String> + 'a {
        self.regex
            .captures_iter(text)
            .take(self.spec.limit.unwrap_or(usize::MAX))
            .map(move |caps| self.render(&caps))
    }
}

/// An ordered list of extraction rules for one field. The same table can be
/// read two ways: `first_match` (precision, stop at the first rule that hits)
/// or `collect` (recall, union every rule, dedup, cap).
#[derive(Debug)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn compile(name: &'static str, specs: &[RuleSpec]) -> Result<Self, ExtractError> {
        let rules = specs
            .iter()
            .map(|spec| Rule::compile(name, *spec))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(RuleTable { rules })
    }

    /// Borrow a cached table, surfacing its compile error if it has one.
    pub fn get(cell: &'static CompiledTable) -> Result<&'static RuleTable, ExtractError> {
        LazyLock::force(cell).as_ref().map_err(Clone::clone)
    }

    /// Value of the first rule (in table order) that matches anywhere.
    pub fn first_match(&self, text: &str) -> Option<String> {
        self.rules
            .iter()
            .find_map(|rule| rule.regex.captures(text).map(|caps| rule.render(&caps)))
    }

    /// Byte range of the first rule's first match, in table order.
    pub fn first_span(&self, text: &str) -> Option<Range<usize>> {
        self.rules
            .iter()
            .find_map(|rule| rule.regex.find(text).map(|m| m.range()))
    }

    /// Every rule's values in table order, deduplicated by value.
    pub fn collect(&self, text: &str) -> Vec<String> {
        self.rules
            .iter()
            .flat_map(|rule| rule.values(text))
            .unique()
            .collect()
    }

    pub fn collect_capped(&self, text: &str, cap: usize) -> Vec<String> {
        self.rules
            .iter()
            .flat_map(|rule| rule.values(text))
            .unique()
            .take(cap)
            .collect()
    }

    /// First hit of each rule, as (rendered value, match range).
    pub fn first_hits(&self, text: &str) -> Vec<(String, Range<usize>)> {
        self.rules
            .iter()
            .filter_map(|rule| {
                rule.regex
                    .captures(text)
                    .map(|caps| (rule.render(&caps), caps.get(0).map_or(0..0, |m| m.range())))
            })
            .collect()
    }

    /// How many rules match at least once. Each rule counts one point.
    pub fn count_matching(&self, text: &str) -> usize {
        self.rules.iter().filter(|rule| rule.regex.is_match(text)).count()
    }
}
