//! Pattern-based detection of secrets and personal data in generated text.

use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;

static API_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sk-[a-zA-Z0-9]{20,}").expect("valid api key regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("valid email regex")
});

static PRIVATE_IP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:10|172\.(?:1[6-9]|2[0-9]|3[01])|192\.168)\.\d{1,3}\.\d{1,3}\b")
        .expect("valid private ip regex")
});

static PASSWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)password\s*[:=]\s*['"]?[^\s'"]+"#).expect("valid password regex")
});

/// A category of sensitive content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensitiveIssue {
    ApiKey,
    Email,
    PrivateIp,
    Password,
}

impl SensitiveIssue {
    /// Detection order; also the order issues appear in a report.
    pub const ALL: [SensitiveIssue; 4] = [
        SensitiveIssue::ApiKey,
        SensitiveIssue::Email,
        SensitiveIssue::PrivateIp,
        SensitiveIssue::Password,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SensitiveIssue::ApiKey => "possible API key",
            SensitiveIssue::Email => "email address",
            SensitiveIssue::PrivateIp => "private IP address",
            SensitiveIssue::Password => "possible password",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            SensitiveIssue::ApiKey => &API_KEY_RE,
            SensitiveIssue::Email => &EMAIL_RE,
            SensitiveIssue::PrivateIp => &PRIVATE_IP_RE,
            SensitiveIssue::Password => &PASSWORD_RE,
        }
    }
}

impl fmt::Display for SensitiveIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of scanning a piece of text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SensitiveInfoReport {
    pub has_secrets: bool,
    pub issues: Vec<SensitiveIssue>,
}

/// Run every check against `text` and report the ones that match.
pub fn scan(text: &str) -> SensitiveInfoReport {
    let issues: Vec<SensitiveIssue> = SensitiveIssue::ALL
        .into_iter()
        .filter(|issue| issue.pattern().is_match(text))
        .collect();

    SensitiveInfoReport {
        has_secrets: !issues.is_empty(),
        issues,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_api_key() {
        let report = scan("const API_KEY=sk-1234567890abcdef123456");
        assert!(report.has_secrets);
        assert_eq!(report.issues, vec![SensitiveIssue::ApiKey]);
    }

    #[test]
    fn test_short_sk_token_is_not_api_key() {
        let report = scan("see sk-short for details");
        assert!(!report.has_secrets);
    }

    #[test]
    fn test_detects_email() {
        let report = scan("contact user@example.com");
        assert_eq!(report.issues, vec![SensitiveIssue::Email]);
    }

    #[test]
    fn test_detects_private_ips() {
        for ip in ["192.168.1.1", "10.0.0.1", "172.16.5.4", "172.31.255.1"] {
            let report = scan(&format!("Server: {ip}"));
            assert_eq!(report.issues, vec![SensitiveIssue::PrivateIp], "{ip}");
        }
    }

    #[test]
    fn test_public_ip_is_not_flagged() {
        assert!(!scan("Server: 172.32.0.1").has_secrets);
        assert!(!scan("DNS 8.8.8.8").has_secrets);
    }

    #[test]
    fn test_detects_password_assignment_any_case() {
        assert_eq!(scan("password: secret123").issues, vec![SensitiveIssue::Password]);
        assert_eq!(scan("PASSWORD=hunter2").issues, vec![SensitiveIssue::Password]);
        assert_eq!(scan("Password = 'abc'").issues, vec![SensitiveIssue::Password]);
    }

    #[test]
    fn test_password_word_alone_is_safe() {
        assert!(!scan("fix: reset password flow").has_secrets);
    }

    #[test]
    fn test_safe_text() {
        let report = scan("This is safe content");
        assert!(!report.has_secrets);
        assert!(report.issues.is_empty());
    }

    #[test]
    fn test_multiple_issues_keep_detection_order() {
        let text = "password: secret and IP 10.0.0.1 and email test@test.com and sk-1234567890abcdef123456";
        let report = scan(text);
        assert!(report.has_secrets);
        assert_eq!(
            report.issues,
            vec![
                SensitiveIssue::ApiKey,
                SensitiveIssue::Email,
                SensitiveIssue::PrivateIp,
                SensitiveIssue::Password,
            ]
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(SensitiveIssue::ApiKey.to_string(), "possible API key");
        assert_eq!(SensitiveIssue::PrivateIp.label(), "private IP address");
    }
}
