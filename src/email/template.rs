//! Placeholder substitution for the notice template.
//!
//! A template is parsed once into literal and placeholder segments. Rendering
//! walks that segment list, so substituted values are never scanned again and
//! braces inside a value cannot introduce new placeholders.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeMap;

use super::error::RenderError;

lazy_static! {
    /// Matches `{name}` tokens; only recognized names become placeholders
    static ref PLACEHOLDER_REGEX: Regex = Regex::new(r"\{([a-z_]+)\}").unwrap();
}

/// Fields the notice template can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Placeholder {
    Title,
    StatusClass,
    StatusIcon,
    StatusText,
    Description,
    StartTime,
    EndLabel,
    EndTime,
    ComponentsAffected,
}

impl Placeholder {
    pub const ALL: [Placeholder; 9] = [
        Placeholder::Title,
        Placeholder::StatusClass,
        Placeholder::StatusIcon,
        Placeholder::StatusText,
        Placeholder::Description,
        Placeholder::StartTime,
        Placeholder::EndLabel,
        Placeholder::EndTime,
        Placeholder::ComponentsAffected,
    ];

    /// Name as written between the braces
    pub fn name(&self) -> &'static str {
        match self {
            Placeholder::Title => "title",
            Placeholder::StatusClass => "status_class",
            Placeholder::StatusIcon => "status_icon",
            Placeholder::StatusText => "status_text",
            Placeholder::Description => "description",
            Placeholder::StartTime => "start_time",
            Placeholder::EndLabel => "end_label",
            Placeholder::EndTime => "end_time",
            Placeholder::ComponentsAffected => "components_affected",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// The token as it appears in a template, e.g. `{title}`
    pub fn token(&self) -> String {
        format!("{{{}}}", self.name())
    }
}

/// Values to substitute, keyed by placeholder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateFields {
    values: BTreeMap<Placeholder, String>,
}

impl TemplateFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, replacing any previous one
    pub fn set(&mut self, placeholder: Placeholder, value: impl Into<String>) -> &mut Self {
        self.values.insert(placeholder, value.into());
        self
    }

    pub fn with(mut self, placeholder: Placeholder, value: impl Into<String>) -> Self {
        self.set(placeholder, value);
        self
    }

    pub fn get(&self, placeholder: Placeholder) -> Option<&str> {
        self.values.get(&placeholder).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// A parsed notice template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplate {
    segments: Vec<Segment>,
}

impl EmailTemplate {
    /// Split template text into literal and placeholder segments.
    ///
    /// Brace sequences that do not name a known placeholder stay literal, so
    /// CSS blocks and unrelated `{tokens}` pass through unchanged.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in PLACEHOLDER_REGEX.captures_iter(source) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let Some(placeholder) = Placeholder::from_name(name.as_str()) else {
                continue;
            };

            literal.push_str(&source[last..whole.start()]);
            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field(placeholder));
            last = whole.end();
        }

        literal.push_str(&source[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Self { segments }
    }

    /// Placeholders referenced by this template, deduplicated, in first-use order
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut seen = Vec::new();
        for segment in &self.segments {
            if let Segment::Field(p) = segment {
                if !seen.contains(p) {
                    seen.push(*p);
                }
            }
        }
        seen
    }

    /// Recognized placeholders this template never references
    pub fn missing_placeholders(&self) -> Vec<Placeholder> {
        let used = self.placeholders();
        Placeholder::ALL
            .into_iter()
            .filter(|p| !used.contains(p))
            .collect()
    }

    /// Substitute every placeholder occurrence in one pass.
    ///
    /// Fails with [`RenderError::MissingField`] if the template references a
    /// placeholder that `fields` has no value for; no partial output is returned.
    pub fn render(&self, fields: &TemplateFields) -> Result<String, RenderError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(p) => {
                    let value = fields.get(*p).ok_or(RenderError::MissingField(p.name()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

/// Parse `template` and substitute `fields` into it
pub fn render(template: &str, fields: &TemplateFields) -> Result<String, RenderError> {
    EmailTemplate::parse(template).render(fields)
}
