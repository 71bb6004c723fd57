//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::Duration;

use ai_commit::generate::{GenerationRequest, GenerationSettings, Generator};
use ai_commit::llm::{OpenAiProvider, RetryPolicy};
use git2::{Oid, Repository, Signature};
use secrecy::SecretString;
use serde_json::json;
use wiremock::MockServer;

/// Get the path to test fixtures directory.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Build a chat completion response body whose message content is `content`.
pub fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

/// A generator talking to a mock server, with millisecond retry delays.
pub fn mock_generator(server: &MockServer, max_attempts: u32) -> Generator<OpenAiProvider> {
    let provider = OpenAiProvider::new(
        server.uri(),
        SecretString::from("test-key".to_string()),
        Duration::from_secs(5),
    )
    .expect("Failed to build provider");

    let settings = GenerationSettings {
        retry: RetryPolicy::new(max_attempts, Duration::from_millis(5)),
        ..GenerationSettings::default()
    };

    Generator::new(provider, settings)
}

/// A request for a small diff with the given prompt version.
pub fn request(prompt_version: &str) -> GenerationRequest {
    GenerationRequest {
        diff: "diff --git a/src/auth.rs b/src/auth.rs\n+pub fn login() {}\n".to_string(),
        model: "gpt-3.5-turbo".to_string(),
        prompt_version: prompt_version.to_string(),
        language: "en".to_string(),
    }
}

/// A test git repository builder for integration tests.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    /// Create a new empty git repository with a configured identity.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let repo = Repository::init(dir.path()).expect("Failed to init git repo");

        let mut config = repo.config().expect("Failed to get config");
        config.set_str("user.name", "Test User").expect("Failed to set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Failed to set user.email");

        Self { dir, repo }
    }

    fn signature(&self) -> Signature<'_> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Write a file and add it to the index.
    pub fn stage(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write file");
        let mut index = self.repo.index().expect("Failed to get index");
        index.add_path(Path::new(name)).expect("Failed to add file");
        index.write().expect("Failed to write index");
    }

    /// Write a file without staging it.
    pub fn write(&self, name: &str, content: &str) {
        std::fs::write(self.dir.path().join(name), content).expect("Failed to write file");
    }

    /// Commit the current index with the given message. Returns the commit OID.
    pub fn commit(&self, message: &str) -> Oid {
        let sig = self.signature();
        let mut index = self.repo.index().expect("Failed to get index");
        let tree_id = index.write_tree().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent = self.repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();

        self.repo
            .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .expect("Failed to create commit")
    }

    /// Message of the HEAD commit.
    pub fn head_message(&self) -> String {
        self.repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .expect("Failed to read HEAD")
            .message()
            .unwrap_or_default()
            .to_string()
    }
}
