//! Login flow description for boards behind a sign-in page.
//!
//! The flow is two-step: an email form with a continue button, then a
//! password form. A session is logged in once the marker element shows up.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default login page
pub const DEFAULT_LOGIN_URL: &str = "https://app.asana.com/-/login";

/// Default wait for the password field after continuing (10 seconds)
pub const DEFAULT_PASSWORD_STEP_TIMEOUT_MS: u64 = 10_000;

/// Default wait for the logged-in marker after submitting (60 seconds)
pub const DEFAULT_LOGIN_TIMEOUT_MS: u64 = 60_000;

/// Default directory for failure screenshots and page dumps
pub const DEFAULT_ARTIFACTS_DIR: &str = "TestArtifacts";

/// Username and password for the sign-in page
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    /// Create credentials
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Username
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A page element: CSS selector plus optional text it must contain
///
/// Text matching is case-insensitive and ignores surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementTarget {
    /// CSS selector passed to `querySelectorAll`
    pub css: String,
    /// Text the element must contain, if any
    pub text: Option<String>,
}

impl ElementTarget {
    /// Match by selector alone
    #[must_use]
    pub fn css(css: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            text: None,
        }
    }

    /// Also require the element text to contain `text`
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }
}

/// Selectors and waits for the sign-in page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginFlow {
    /// Sign-in page URL
    pub url: String,
    /// Email input
    pub username_input: ElementTarget,
    /// Button leading from the email step to the password step
    pub continue_button: ElementTarget,
    /// Password input
    pub password_input: ElementTarget,
    /// Submit button
    pub login_button: ElementTarget,
    /// Element only shown to a logged-in user
    pub logged_in_marker: ElementTarget,
    /// Wait for the password field to appear
    pub password_step_timeout: Duration,
    /// Wait for the logged-in marker after submitting
    pub login_timeout: Duration,
}

impl Default for LoginFlow {
    fn default() -> Self {
        Self {
            url: DEFAULT_LOGIN_URL.to_string(),
            username_input: ElementTarget::css(r#"input[type="email"][name="e"]"#),
            continue_button: ElementTarget::css(
                r#"div.LoginEmailForm-continueButton[role="button"]"#,
            )
            .with_text("Continue"),
            password_input: ElementTarget::css(r#"input[type="password"][name="p"]"#),
            login_button: ElementTarget::css(r#"div.LoginPasswordForm-loginButton[role="button"]"#)
                .with_text("Log in"),
            logged_in_marker: ElementTarget::css("span.OmnibuttonButtonCard-label")
                .with_text("Create"),
            password_step_timeout: Duration::from_millis(DEFAULT_PASSWORD_STEP_TIMEOUT_MS),
            login_timeout: Duration::from_millis(DEFAULT_LOGIN_TIMEOUT_MS),
        }
    }
}

impl LoginFlow {
    /// Set the sign-in page URL
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Set the logged-in marker
    #[must_use]
    pub fn with_logged_in_marker(mut self, marker: ElementTarget) -> Self {
        self.logged_in_marker = marker;
        self
    }
}

/// Paths of the screenshot and HTML dump written for a failed wait
#[must_use]
pub fn artifact_paths(dir: &std::path::Path, name: &str) -> (PathBuf, PathBuf) {
    (dir.join(format!("{name}.png")), dir.join(format!("{name}.html")))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_debug_hides_password() {
        let creds = Credentials::new("me@example.com", "hunter2");
        let shown = format!("{creds:?}");
        assert!(shown.contains("me@example.com"));
        assert!(!shown.contains("hunter2"));
        assert_eq!(creds.password(), "hunter2");
    }

    #[test]
    fn test_default_flow() {
        let flow = LoginFlow::default();
        assert_eq!(flow.url, DEFAULT_LOGIN_URL);
        assert_eq!(flow.continue_button.text.as_deref(), Some("Continue"));
        assert_eq!(flow.login_button.text.as_deref(), Some("Log in"));
        assert_eq!(flow.logged_in_marker.text.as_deref(), Some("Create"));
        assert_eq!(flow.password_step_timeout, Duration::from_secs(10));
        assert_eq!(flow.login_timeout, Duration::from_secs(60));
    }

    #[test]
    fn test_flow_builders() {
        let flow = LoginFlow::default()
            .with_url("https://boards.example/login")
            .with_logged_in_marker(ElementTarget::css("#avatar"));
        assert_eq!(flow.url, "https://boards.example/login");
        assert_eq!(flow.logged_in_marker, ElementTarget::css("#avatar"));
    }

    #[test]
    fn test_artifact_paths() {
        let (png, html) = artifact_paths(Path::new("out"), "login-timeout");
        assert_eq!(png, Path::new("out/login-timeout.png"));
        assert_eq!(html, Path::new("out/login-timeout.html"));
    }
}
