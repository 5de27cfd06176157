//! Regex filter that funnels every matching line to a single key

use crate::error::{Result, StageError};
use crate::record::{KeyedFact, Record};
use crate::stage::{Emitter, LineOutcome, Stage};
use regex::Regex;

pub const DEFAULT_PATTERN: &str = "Al";

/// Key shared by every tagged line
pub const TAG_KEY: &str = "1";

#[derive(Debug, Clone)]
pub struct PatternTagger {
    pattern: Regex,
    field: Option<usize>,
}

impl PatternTagger {
    /// Match `pattern` against whole lines, or against one comma-separated
    /// field when `field` is set.
    pub fn new(pattern: &str, field: Option<usize>) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| {
            StageError::Configuration(format!("invalid pattern '{pattern}': {e}"))
        })?;
        Ok(Self { pattern, field })
    }
}

impl Stage for PatternTagger {
    fn name(&self) -> &'static str {
        "pattern-tag"
    }

    fn process_line(&mut self, line: &str, out: &mut Emitter<'_>) -> Result<LineOutcome> {
        let haystack = match self.field {
            Some(index) => Record::parse(line).field(index)?,
            None => line,
        };

        if self.pattern.is_match(haystack) {
            out.emit(&KeyedFact::new(TAG_KEY, line))?;
        }
        Ok(LineOutcome::Consumed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::run;

    fn tag(stage: &mut PatternTagger, input: &str) -> Result<String> {
        let mut out = Vec::new();
        run(stage, input.as_bytes(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_default_pattern_tags_matching_lines() {
        let output = tag(
            &mut PatternTagger::new(DEFAULT_PATTERN, None).unwrap(),
            "  Alpha,1  \nbeta,2\ngamma,Al\nALL\n",
        )
        .unwrap();
        assert_eq!(output, "1\tAlpha,1\n1\tgamma,Al\n");
    }

    #[test]
    fn test_field_restricted_match() {
        let mut stage = PatternTagger::new("^Al", Some(1)).unwrap();
        let output = tag(&mut stage, "Alpha,beta\nx,Alder\n").unwrap();
        assert_eq!(output, "1\tx,Alder\n");
    }

    #[test]
    fn test_field_restricted_short_record_is_fatal() {
        let mut stage = PatternTagger::new("Al", Some(3)).unwrap();
        let err = tag(&mut stage, "Al,b\n").unwrap_err();
        assert!(matches!(
            err.root(),
            StageError::MalformedRecord { index: 3, .. }
        ));
    }

    #[test]
    fn test_invalid_pattern_is_configuration_error() {
        assert!(matches!(
            PatternTagger::new("(unclosed", None),
            Err(StageError::Configuration(_))
        ));
    }
}
