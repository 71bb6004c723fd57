//! Prompt template texts, one per [`super::PromptVersion`].
//!
//! Each template carries exactly one `{{diff}}` placeholder and one
//! `{{language}}` placeholder.

/// Scored variant: asks for a self-assessed quality score and rationale.
pub const PROMPT_A: &str = r#"You are a commit message generator. Analyze the Git diff below and write a commit message that follows the Conventional Commits specification.

Rules:
1. Use imperative mood ("add" not "added", "fix" not "fixed")
2. Keep the subject line within 50 characters
3. Start with a type: feat, fix, docs, style, refactor, test, chore
4. Avoid filler verbs such as "updated", "modified", "changed"
5. Be specific about what changed
6. Write the subject and body in {{language}}

Output ONLY valid JSON in exactly this shape:
{"subject":"commit subject, at most 50 characters","body":"optional details, at most 72 characters per line","breaking":false,"score":85,"reason":"short rationale for your choices"}

Diff to analyze:
{{diff}}"#;

/// Expert variant: emphasizes breaking-change detection.
pub const PROMPT_B: &str = r#"You are an expert software engineer writing the commit message for changes that are about to be committed.

Review the diff carefully and produce a JSON object with these fields:

- subject: a one-line message in conventional commit format `<type>: <description>`
  - type is one of fix, feat, build, chore, ci, docs, style, refactor, perf, test
  - imperative mood, no trailing period, at most 50 characters
- body: optional explanation of why the change was made, wrapped at 72 characters
- breaking: true only if the change breaks backward compatibility (removed public APIs, changed signatures, incompatible CLI flags)

Write the description and body in {{language}}.

Respond with valid JSON only, no markdown and no extra text:
{"subject":"feat: add user authentication","body":"","breaking":false}

Git diff:
{{diff}}
"#;

/// Scoped variant: asks for `type(scope): description` subjects.
pub const PROMPT_C: &str = r#"Generate a Git commit message following the Conventional Commits specification.

Format:
- type: feat, fix, docs, style, refactor, test, chore
- scope: optional, in parentheses, e.g. feat(api)
- description: imperative mood, at most 50 characters
- body: optional, at most 72 characters per line
- breaking: set to true for BREAKING CHANGE commits
- language: {{language}}

Examples:
feat(auth): add OAuth2 login support
fix(ui): prevent button double-click on submit

Output JSON:
{"subject":"full subject line","body":"optional body","breaking":false}

Git diff:
{{diff}}"#;
