//! Path template compilation.
//!
//! # Responsibilities
//! - Split a template like `/users/:id` into segments
//! - Turn `:name` segments into single-segment captures
//! - Keep literal segments verbatim (escaped, never interpreted)
//! - Anchor the result so only whole paths match
//!
//! # Design Decisions
//! - Empty segments are dropped, so `//a/` and `/a` compile identically
//! - A parameter matches one or more characters other than `/`
//! - Malformed templates fail at registration, never at request time
//! - Request paths are percent-decoded before matching; a decoded `%2F`
//!   becomes a real `/` and splits the segment

use std::borrow::Cow;

use percent_encoding::percent_decode_str;
use regex::Regex;

use crate::routing::error::PatternError;
use crate::routing::params::PathParams;

/// Marks a segment as a named parameter.
pub const PARAM_MARKER: char = ':';

const PARAM_CAPTURE: &str = "([^/]+)";

/// A compiled path template.
#[derive(Debug, Clone)]
pub struct PathPattern {
    template: String,
    regex: Regex,
    param_names: Vec<String>,
}

impl PathPattern {
    /// Compile a template into an anchored matcher.
    pub fn compile(template: &str) -> Result<Self, PatternError> {
        let mut param_names: Vec<String> = Vec::new();
        let mut pieces: Vec<String> = Vec::new();

        for segment in template.split('/').filter(|s| !s.is_empty()) {
            match segment.strip_prefix(PARAM_MARKER) {
                Some("") => {
                    return Err(PatternError::EmptyParamName {
                        template: template.to_string(),
                    });
                }
                Some(name) => {
                    if param_names.iter().any(|existing| existing == name) {
                        return Err(PatternError::DuplicateParam {
                            template: template.to_string(),
                            name: name.to_string(),
                        });
                    }
                    param_names.push(name.to_string());
                    pieces.push(PARAM_CAPTURE.to_string());
                }
                None => pieces.push(regex::escape(segment)),
            }
        }

        let source = format!("^/{}$", pieces.join("/"));
        let regex = Regex::new(&source)?;

        Ok(Self {
            template: template.to_string(),
            regex,
            param_names,
        })
    }

    /// The template this pattern was compiled from.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Source of the compiled matcher.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// Parameter names in capture order.
    pub fn param_names(&self) -> &[String] {
        &self.param_names
    }

    pub fn is_match(&self, path: &str) -> bool {
        self.regex.is_match(path)
    }

    /// Match `path` and zip the captured values with the parameter names.
    pub fn match_path(&self, path: &str) -> Option<PathParams> {
        let captures = self.regex.captures(path)?;
        Some(
            self.param_names
                .iter()
                .zip(captures.iter().skip(1))
                .map(|(name, value)| {
                    (name.as_str(), value.map(|m| m.as_str()).unwrap_or_default())
                })
                .collect(),
        )
    }
}

/// Percent-decode a request path for matching.
///
/// Falls back to the raw path when the decoded bytes are not valid UTF-8.
pub fn decode_path(raw: &str) -> Cow<'_, str> {
    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded,
        Err(_) => Cow::Borrowed(raw),
    }
}
