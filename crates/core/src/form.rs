//! Research configuration form.
//!
//! Holds the raw field values the user typed, turns them into a
//! [`ResearchConfig`] and hands it off exactly once per valid submission.

use cp_protocol::research_models::{ResearchConfig, ResearchDepth};
use std::fmt;
use thiserror::Error;

/// The editable fields of the form, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Topic,
    TargetAudience,
    CompetitorDomains,
    ResearchDepth,
}

impl FormField {
    pub const ALL: [FormField; 4] = [
        FormField::Topic,
        FormField::TargetAudience,
        FormField::CompetitorDomains,
        FormField::ResearchDepth,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Topic => "Research Topic",
            FormField::TargetAudience => "Target Audience",
            FormField::CompetitorDomains => "Competitor Domains",
            FormField::ResearchDepth => "Research Depth",
        }
    }

    pub fn next(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(&self) -> Self {
        let idx = Self::ALL.iter().position(|f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FormField,
    pub message: String,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.message)
    }
}

/// A submission that did not pass validation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid research configuration: {}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

fn summarize(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationError {
    /// The message for `field`, if it was rejected.
    pub fn message_for(&self, field: FormField) -> Option<&str> {
        self.issues
            .iter()
            .find(|issue| issue.field == field)
            .map(|issue| issue.message.as_str())
    }
}

/// Raw form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchForm {
    pub topic: String,
    pub target_audience: String,
    /// Comma separated.
    pub competitor_domains: String,
    pub research_depth: ResearchDepth,
}

impl Default for ResearchForm {
    fn default() -> Self {
        Self {
            topic: String::new(),
            target_audience: String::new(),
            competitor_domains: String::new(),
            research_depth: ResearchDepth::Standard,
        }
    }
}

impl ResearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to a text field. `ResearchDepth` has no text.
    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Topic => Some(&mut self.topic),
            FormField::TargetAudience => Some(&mut self.target_audience),
            FormField::CompetitorDomains => Some(&mut self.competitor_domains),
            FormField::ResearchDepth => None,
        }
    }

    pub fn text(&self, field: FormField) -> String {
        match field {
            FormField::Topic => self.topic.clone(),
            FormField::TargetAudience => self.target_audience.clone(),
            FormField::CompetitorDomains => self.competitor_domains.clone(),
            FormField::ResearchDepth => self.research_depth.to_string(),
        }
    }

    /// Check the fields and build the configuration.
    ///
    /// Topic and audience are required; whitespace alone does not count.
    /// Both are sent trimmed.
    pub fn validate(&self) -> Result<ResearchConfig, ValidationError> {
        let topic = self.topic.trim();
        let target_audience = self.target_audience.trim();

        let mut issues = Vec::new();
        if topic.is_empty() {
            issues.push(FieldIssue {
                field: FormField::Topic,
                message: "Research topic is required".to_string(),
            });
        }
        if target_audience.is_empty() {
            issues.push(FieldIssue {
                field: FormField::TargetAudience,
                message: "Target audience is required".to_string(),
            });
        }
        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        Ok(ResearchConfig {
            topic: topic.to_string(),
            target_audience: target_audience.to_string(),
            competitor_domains: parse_competitor_domains(&self.competitor_domains),
            research_depth: self.research_depth,
        })
    }

    /// Validate and hand the configuration to `on_submit`.
    ///
    /// On success the callback runs exactly once and the form is cleared.
    /// On failure nothing is called and the fields stay as they were.
    pub fn submit<F>(&mut self, on_submit: F) -> Result<(), ValidationError>
    where
        F: FnOnce(ResearchConfig),
    {
        let config = self.validate()?;
        on_submit(config);
        self.reset();
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Split a comma separated domain list.
///
/// Entries are trimmed, empty ones dropped, and repeats removed keeping the
/// first occurrence.
pub fn parse_competitor_domains(raw: &str) -> Vec<String> {
    let mut domains: Vec<String> = Vec::new();
    for domain in raw.split(',').map(str::trim).filter(|d| !d.is_empty()) {
        if !domains.iter().any(|d| d == domain) {
            domains.push(domain.to_string());
        }
    }
    domains
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ResearchForm {
        ResearchForm {
            topic: "AI_in_Healthcare".to_string(),
            target_audience: "Doctors".to_string(),
            competitor_domains: String::new(),
            research_depth: ResearchDepth::Standard,
        }
    }

    #[test]
    fn test_valid_form_builds_config() {
        let config = filled().validate().unwrap();
        assert_eq!(config.topic, "AI_in_Healthcare");
        assert_eq!(config.target_audience, "Doctors");
        assert!(config.competitor_domains.is_empty());
        assert_eq!(config.research_depth, ResearchDepth::Standard);
    }

    #[test]
    fn test_missing_topic_is_rejected() {
        let mut form = filled();
        form.topic = String::new();

        let err = form.validate().unwrap_err();
        assert_eq!(
            err.message_for(FormField::Topic),
            Some("Research topic is required")
        );
        assert_eq!(err.message_for(FormField::TargetAudience), None);
    }

    #[test]
    fn test_whitespace_only_fields_are_rejected() {
        let mut form = filled();
        form.topic = "   ".to_string();
        form.target_audience = "\t".to_string();

        let err = form.validate().unwrap_err();
        assert_eq!(err.issues.len(), 2);
        assert_eq!(
            err.message_for(FormField::TargetAudience),
            Some("Target audience is required")
        );
    }

    #[test]
    fn test_submit_calls_back_once_and_resets() {
        let mut form = filled();
        form.competitor_domains = "a.com, b.com".to_string();
        let mut submitted = Vec::new();

        form.submit(|config| submitted.push(config)).unwrap();

        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].competitor_domains, vec!["a.com", "b.com"]);
        assert_eq!(form, ResearchForm::default());
    }

    #[test]
    fn test_failed_submit_keeps_fields() {
        let mut form = filled();
        form.target_audience = String::new();
        let mut calls = 0;

        let result = form.submit(|_| calls += 1);

        assert!(result.is_err());
        assert_eq!(calls, 0);
        assert_eq!(form.topic, "AI_in_Healthcare");
    }

    #[test]
    fn test_parse_competitor_domains() {
        assert_eq!(
            parse_competitor_domains(" a.com ,, b.com,a.com , "),
            vec!["a.com", "b.com"]
        );
        assert!(parse_competitor_domains("").is_empty());
        assert!(parse_competitor_domains(" , ").is_empty());
    }

    #[test]
    fn test_field_cycling() {
        assert_eq!(FormField::Topic.next(), FormField::TargetAudience);
        assert_eq!(FormField::ResearchDepth.next(), FormField::Topic);
        assert_eq!(FormField::Topic.previous(), FormField::ResearchDepth);
    }

    #[test]
    fn test_depth_has_no_text_field() {
        let mut form = ResearchForm::new();
        assert!(form.text_mut(FormField::ResearchDepth).is_none());
        form.text_mut(FormField::Topic).unwrap().push('x');
        assert_eq!(form.text(FormField::Topic), "x");
        assert_eq!(form.text(FormField::ResearchDepth), "standard");
    }
}
