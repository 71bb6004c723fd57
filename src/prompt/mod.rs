//! Prompt registry: versioned templates and placeholder substitution.

pub mod templates;

use std::fmt;
use std::str::FromStr;

use crate::error::PipelineError;

/// Placeholder replaced by the diff text.
pub const DIFF_PLACEHOLDER: &str = "{{diff}}";

/// Placeholder replaced by the target language tag.
pub const LANGUAGE_PLACEHOLDER: &str = "{{language}}";

/// The fixed set of registered prompt versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptVersion {
    A,
    B,
    C,
}

impl PromptVersion {
    pub const ALL: [PromptVersion; 3] = [PromptVersion::A, PromptVersion::B, PromptVersion::C];

    pub fn as_str(&self) -> &'static str {
        match self {
            PromptVersion::A => "prompt_A",
            PromptVersion::B => "prompt_B",
            PromptVersion::C => "prompt_C",
        }
    }

    fn text(&self) -> &'static str {
        match self {
            PromptVersion::A => templates::PROMPT_A,
            PromptVersion::B => templates::PROMPT_B,
            PromptVersion::C => templates::PROMPT_C,
        }
    }
}

impl fmt::Display for PromptVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PromptVersion {
    type Err = PipelineError;

    /// Accepts `prompt_A`..`prompt_C` and the bare letters `A`..`C`,
    /// with the letter in either case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let letter = trimmed.strip_prefix("prompt_").unwrap_or(trimmed);
        match letter {
            "A" | "a" => Ok(PromptVersion::A),
            "B" | "b" => Ok(PromptVersion::B),
            "C" | "c" => Ok(PromptVersion::C),
            _ => Err(PipelineError::UnsupportedPromptVersion(s.to_string())),
        }
    }
}

/// An immutable registered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub version: PromptVersion,
    pub text: &'static str,
}

/// Look up the template registered under `version`.
pub fn resolve(version: &str) -> Result<PromptTemplate, PipelineError> {
    let version: PromptVersion = version.parse()?;
    Ok(PromptTemplate {
        version,
        text: version.text(),
    })
}

/// Substitute the diff and language into a template.
///
/// The diff is inserted verbatim at the first `{{diff}}`; placeholder-like
/// sequences inside the diff or the language tag are never expanded.
pub fn render(template: &PromptTemplate, diff: &str, language: &str) -> String {
    let (before, after) = template
        .text
        .split_once(DIFF_PLACEHOLDER)
        .unwrap_or((template.text, ""));

    let before = before.replace(LANGUAGE_PLACEHOLDER, language);
    let after = after.replace(LANGUAGE_PLACEHOLDER, language);

    let mut rendered = String::with_capacity(before.len() + diff.len() + after.len());
    rendered.push_str(&before);
    rendered.push_str(diff);
    rendered.push_str(&after);
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all_registered_versions() {
        for version in PromptVersion::ALL {
            let template = resolve(version.as_str()).unwrap();
            assert_eq!(template.version, version);
        }
    }

    #[test]
    fn test_resolve_accepts_short_names() {
        assert_eq!(resolve("A").unwrap().version, PromptVersion::A);
        assert_eq!(resolve("b").unwrap().version, PromptVersion::B);
        assert_eq!(resolve("prompt_c").unwrap().version, PromptVersion::C);
    }

    #[test]
    fn test_resolve_unknown_version_fails() {
        let err = resolve("prompt_Z").unwrap_err();
        assert!(matches!(err, PipelineError::UnsupportedPromptVersion(ref v) if v == "prompt_Z"));
    }

    #[test]
    fn test_resolve_empty_version_fails() {
        assert!(matches!(
            resolve(""),
            Err(PipelineError::UnsupportedPromptVersion(_))
        ));
    }

    #[test]
    fn test_every_template_has_one_diff_placeholder() {
        for version in PromptVersion::ALL {
            let text = resolve(version.as_str()).unwrap().text;
            assert_eq!(text.matches(DIFF_PLACEHOLDER).count(), 1, "{version}");
            assert_eq!(text.matches(LANGUAGE_PLACEHOLDER).count(), 1, "{version}");
        }
    }

    #[test]
    fn test_render_leaves_no_placeholders() {
        let diff = "diff --git a/src/lib.rs b/src/lib.rs\n+pub fn login() {}\n";
        for version in PromptVersion::ALL {
            let template = resolve(version.as_str()).unwrap();
            let rendered = render(&template, diff, "en");
            assert!(!rendered.contains(DIFF_PLACEHOLDER));
            assert!(!rendered.contains(LANGUAGE_PLACEHOLDER));
            assert!(rendered.contains("+pub fn login() {}"));
            assert!(rendered.contains("en"));
        }
    }

    #[test]
    fn test_render_inserts_diff_verbatim() {
        let template = resolve("prompt_A").unwrap();
        let diff = "+let s = \"{{language}} and {{diff}} stay literal\";";
        let rendered = render(&template, diff, "zh");
        assert!(rendered.contains(diff));
        assert!(rendered.contains("Write the subject and body in zh"));
    }

    #[test]
    fn test_render_does_not_expand_placeholders_in_language() {
        let template = resolve("prompt_C").unwrap();
        let rendered = render(&template, "+x", "{{diff}}");
        assert!(rendered.contains("language: {{diff}}"));
        assert!(rendered.ends_with("+x"));
    }

    #[test]
    fn test_prompt_version_display() {
        assert_eq!(PromptVersion::A.to_string(), "prompt_A");
        assert_eq!(PromptVersion::C.to_string(), "prompt_C");
    }
}
