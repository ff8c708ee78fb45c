use crate::error::{Error, Result};

/// Hard cap the checks API puts on annotations per request.
pub const MAX_ANNOTATIONS: i64 = 50;

/// Validated run settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub threshold: u32,
    pub max_annotations: usize,
    pub fail_workflow: bool,
}

impl Settings {
    pub fn new(threshold: i64, max_annotations: i64, fail_workflow: bool) -> Result<Self> {
        if !(0..=100).contains(&threshold) {
            return Err(Error::Config(format!(
                "Threshold must be a number between 0 and 100. Invalid value: {}",
                threshold
            )));
        }
        if !(0..=MAX_ANNOTATIONS).contains(&max_annotations) {
            return Err(Error::Config(format!(
                "GitHub API does not allow to create more than {} annotations. Invalid value: {}",
                MAX_ANNOTATIONS, max_annotations
            )));
        }
        Ok(Self {
            threshold: threshold as u32,
            max_annotations: max_annotations as usize,
            fail_workflow,
        })
    }

    /// Validate raw action inputs. Text that is not an integer is reported
    /// with the same message as an out-of-range value.
    pub fn from_inputs(
        threshold: &str,
        max_annotations: &str,
        fail_workflow: bool,
    ) -> Result<Self> {
        let threshold = threshold.trim().parse::<i64>().map_err(|_| {
            Error::Config(format!(
                "Threshold must be a number between 0 and 100. Invalid value: {}",
                threshold
            ))
        })?;
        let max_annotations = max_annotations.trim().parse::<i64>().map_err(|_| {
            Error::Config(format!(
                "GitHub API does not allow to create more than {} annotations. Invalid value: {}",
                MAX_ANNOTATIONS, max_annotations
            ))
        })?;
        Self::new(threshold, max_annotations, fail_workflow)
    }
}

/// Action inputs arrive as free text; anything mentioning "true" turns the flag on.
pub fn parse_flag(raw: &str) -> std::result::Result<bool, String> {
    Ok(raw.to_ascii_lowercase().contains("true"))
}
