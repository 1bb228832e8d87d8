use thiserror::Error;

/// Errors that abort a single render pass
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("Invalid datetime for {field}: '{value}' is not an ISO-8601 local datetime")]
    InvalidDateTime { field: &'static str, value: String },

    #[error("Template placeholder {{{0}}} has no value")]
    MissingField(&'static str),
}

impl RenderError {
    /// Form field the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RenderError::InvalidDateTime { field, .. } => Some(field),
            RenderError::MissingField(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RenderError::InvalidDateTime {
            field: "start_time",
            value: "tomorrow".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid datetime for start_time: 'tomorrow' is not an ISO-8601 local datetime"
        );
        assert_eq!(err.field(), Some("start_time"));

        let err = RenderError::MissingField("end_label");
        assert_eq!(err.to_string(), "Template placeholder {end_label} has no value");
        assert_eq!(err.field(), None);
    }
}
