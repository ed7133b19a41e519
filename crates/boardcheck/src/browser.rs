//! Live board sessions over the Chrome DevTools Protocol.
//!
//! The page-side scripts only serialize DOM structure; card detection, title
//! and tag heuristics all run in Rust against the returned snapshots, so a
//! live run and an offline replay of a captured snapshot behave the same.

use crate::login::{artifact_paths, Credentials, ElementTarget, LoginFlow, DEFAULT_ARTIFACTS_DIR};
use crate::result::{BoardError, BoardResult};
use crate::selector::CardSelector;
use crate::session::{AnchoredNode, BoardSession};
use crate::snapshot::{DomNode, NodeSnapshot};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::{Page as CdpPage, ScreenshotParams};
use futures::StreamExt;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Default timeout for project navigation (15 seconds)
pub const DEFAULT_NAVIGATION_TIMEOUT_MS: u64 = 15_000;

/// Default polling interval while waiting on the page (100ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 100;

/// Column header that marks a rendered project board
pub const DEFAULT_READY_TEXT: &str = "To Do";

/// Browser configuration
#[derive(Debug, Clone)]
pub struct BrowserConfig {
    /// Run in headless mode
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to chromium binary (None = auto-detect)
    pub chromium_path: Option<PathBuf>,
    /// Persistent profile directory, carrying an existing login
    pub user_data_dir: Option<PathBuf>,
    /// Sandbox mode (disable for containers)
    pub sandbox: bool,
    /// How long to wait for a project board to render
    pub navigation_timeout: Duration,
    /// Polling interval for page-side waits
    pub poll_interval: Duration,
    /// Visible text that marks the opened board as ready (None = cards only)
    pub ready_text: Option<String>,
    /// Where screenshots and page dumps go when a wait times out
    pub artifacts_dir: PathBuf,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 900,
            chromium_path: None,
            user_data_dir: None,
            sandbox: true,
            navigation_timeout: Duration::from_millis(DEFAULT_NAVIGATION_TIMEOUT_MS),
            poll_interval: Duration::from_millis(DEFAULT_POLL_INTERVAL_MS),
            ready_text: Some(DEFAULT_READY_TEXT.to_string()),
            artifacts_dir: PathBuf::from(DEFAULT_ARTIFACTS_DIR),
        }
    }
}

impl BrowserConfig {
    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set chromium path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Set the persistent profile directory
    #[must_use]
    pub fn with_user_data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(path.into());
        self
    }

    /// Disable sandbox (for containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }

    /// Set the project navigation timeout
    #[must_use]
    pub const fn with_navigation_timeout(mut self, timeout: Duration) -> Self {
        self.navigation_timeout = timeout;
        self
    }

    /// Set the board-ready text; blank waits for cards only
    #[must_use]
    pub fn with_ready_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        self.ready_text = if text.trim().is_empty() {
            None
        } else {
            Some(text)
        };
        self
    }

    /// Set the failure artifacts directory
    #[must_use]
    pub fn with_artifacts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = dir.into();
        self
    }
}

/// Serializes `roots` and all their descendants in document order.
const SERIALIZE_JS: &str = r"
const __serialize = (roots) => {
    const all = new Set();
    for (const root of roots) {
        all.add(root);
        for (const el of root.querySelectorAll('*')) all.add(el);
    }
    const ordered = Array.from(all).sort((a, b) =>
        a === b ? 0 : (a.compareDocumentPosition(b) & Node.DOCUMENT_POSITION_FOLLOWING ? -1 : 1));
    const index = new Map(ordered.map((el, i) => [el, i]));
    return ordered.map((el) => {
        const attributes = {};
        for (const a of el.attributes) attributes[a.name.toLowerCase()] = a.value;
        const parent = el.parentElement && index.has(el.parentElement)
            ? index.get(el.parentElement) : null;
        return {
            parent,
            tag: el.tagName.toLowerCase(),
            classes: Array.from(el.classList),
            attributes,
            text: el.textContent || '',
        };
    });
};
";

/// Finds the first visible element matching `css` whose text contains `text`.
const FIND_JS: &str = r"
const __norm = (s) => (s || '').replace(/\s+/g, ' ').trim();
const __visible = (el) => {
    const r = el.getBoundingClientRect();
    const st = getComputedStyle(el);
    return r.width > 0 && r.height > 0 && st.visibility !== 'hidden' && st.display !== 'none';
};
const __find = (css, text) => {
    const want = text === null ? null : __norm(text).toLowerCase();
    return Array.from(document.querySelectorAll(css)).find((el) => __visible(el)
        && (want === null || __norm(el.textContent).toLowerCase().includes(want))) || null;
};
";

#[derive(Debug, Deserialize)]
struct AnchorPayload {
    nodes: Vec<DomNode>,
    anchor: Option<usize>,
}

fn snapshot_script(selectors: &[CardSelector]) -> BoardResult<String> {
    let css: Vec<&str> = selectors.iter().map(CardSelector::as_css).collect();
    let css = serde_json::to_string(&css)?;
    Ok(format!(
        "(() => {{ {SERIALIZE_JS}
        const roots = [];
        for (const s of {css}) roots.push(...document.querySelectorAll(s));
        return __serialize(roots);
        }})()"
    ))
}

fn probe_script(text: &str, selectors: &[CardSelector]) -> BoardResult<String> {
    let css: Vec<&str> = selectors.iter().map(CardSelector::as_css).collect();
    let css = serde_json::to_string(&css)?;
    let wanted = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let text = serde_json::to_string(&wanted)?;
    Ok(format!(
        "(() => {{ {SERIALIZE_JS}
        const wanted = {text};
        const norm = (s) => (s || '').replace(/\\s+/g, ' ').trim();
        const visible = (el) => {{
            const r = el.getBoundingClientRect();
            const st = getComputedStyle(el);
            return r.width > 0 && r.height > 0 && st.visibility !== 'hidden' && st.display !== 'none';
        }};
        const hits = Array.from(document.querySelectorAll('body *')).filter((el) =>
            norm(el.textContent) === wanted
            && !Array.from(el.children).some((c) => norm(c.textContent) === wanted));
        const anchor = hits.find(visible);
        if (!anchor) return {{ nodes: [], anchor: null }};
        let root = null;
        for (let el = anchor; el; el = el.parentElement) {{
            if ({css}.some((s) => el.matches(s))) root = el;
        }}
        root = root || anchor.closest('div') || anchor;
        const nodes = __serialize([root]);
        const ordered = [root, ...root.querySelectorAll('*')];
        return {{ nodes, anchor: ordered.indexOf(anchor) }};
        }})()"
    ))
}

fn open_project_script(project: &str) -> BoardResult<String> {
    let name = serde_json::to_string(project)?;
    let aria = serde_json::to_string(&format!("{project}, Project"))?;
    Ok(format!(
        "(() => {{
        const name = {name}.toLowerCase();
        const bySpan = Array.from(document.querySelectorAll('a')).find((a) =>
            Array.from(a.querySelectorAll('span')).some((s) =>
                (s.textContent || '').toLowerCase().includes(name)));
        const byAria = Array.from(document.querySelectorAll('a[aria-label]')).find((a) =>
            a.getAttribute('aria-label') === {aria});
        const link = bySpan || byAria;
        if (!link) return {{ clicked: false, before: null }};
        const before = link.href && link.href === location.href ? null : location.href;
        link.click();
        return {{ clicked: true, before }};
        }})()"
    ))
}

#[derive(Debug, Deserialize)]
struct OpenPayload {
    clicked: bool,
    /// Location before the click, or None when the link points at the current page
    before: Option<String>,
}

/// True once the location moved away from `before`, the ready text is
/// visible and at least one card selector matches.
fn board_ready_script(
    before: Option<&str>,
    ready_text: Option<&str>,
    selectors: &[CardSelector],
) -> BoardResult<String> {
    let css: Vec<&str> = selectors.iter().map(CardSelector::as_css).collect();
    let css = serde_json::to_string(&css)?;
    let before = serde_json::to_string(&before)?;
    let ready = serde_json::to_string(&ready_text.map(str::trim))?;
    Ok(format!(
        "(() => {{ {FIND_JS}
        const before = {before};
        const ready = {ready};
        if (before !== null && location.href === before) return false;
        if (ready !== null) {{
            const want = __norm(ready).toLowerCase();
            const shown = Array.from(document.querySelectorAll('body *')).some((el) =>
                __norm(el.textContent).toLowerCase() === want && __visible(el));
            if (!shown) return false;
        }}
        return {css}.some((s) => document.querySelector(s) !== null);
        }})()"
    ))
}

fn target_args(target: &ElementTarget) -> BoardResult<(String, String)> {
    Ok((
        serde_json::to_string(&target.css)?,
        serde_json::to_string(&target.text)?,
    ))
}

fn visible_script(target: &ElementTarget) -> BoardResult<String> {
    let (css, text) = target_args(target)?;
    Ok(format!("(() => {{ {FIND_JS} return __find({css}, {text}) !== null; }})()"))
}

fn click_script(target: &ElementTarget) -> BoardResult<String> {
    let (css, text) = target_args(target)?;
    Ok(format!(
        "(() => {{ {FIND_JS}
        const el = __find({css}, {text});
        if (!el) return false;
        el.click();
        return true;
        }})()"
    ))
}

/// Sets an input value through the native setter so framework listeners see it.
fn fill_script(target: &ElementTarget, value: &str) -> BoardResult<String> {
    let (css, text) = target_args(target)?;
    let value = serde_json::to_string(value)?;
    Ok(format!(
        "(() => {{ {FIND_JS}
        const el = __find({css}, {text});
        if (!el) return false;
        el.focus();
        const proto = Object.getPrototypeOf(el);
        const setter = Object.getOwnPropertyDescriptor(proto, 'value');
        if (setter && setter.set) setter.set.call(el, {value}); else el.value = {value};
        el.dispatchEvent(new Event('input', {{ bubbles: true }}));
        el.dispatchEvent(new Event('change', {{ bubbles: true }}));
        return true;
        }})()"
    ))
}

fn scroll_script(fraction: f64) -> String {
    format!("(() => {{ window.scrollBy(0, window.innerHeight * {fraction}); return true; }})()")
}

/// A board session backed by a real Chromium page
#[derive(Debug)]
pub struct ChromeBoardSession {
    config: BrowserConfig,
    browser: CdpBrowser,
    page: CdpPage,
    handle: tokio::task::JoinHandle<()>,
}

impl ChromeBoardSession {
    /// Launch a browser and open a blank page
    pub async fn launch(config: BrowserConfig) -> BoardResult<Self> {
        let mut builder = CdpConfig::builder().window_size(config.viewport_width, config.viewport_height);
        if !config.headless {
            builder = builder.with_head();
        }
        if !config.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = config.chromium_path {
            builder = builder.chrome_executable(path);
        }
        if let Some(ref dir) = config.user_data_dir {
            builder = builder.user_data_dir(dir);
        }
        let cdp_config = builder.build().map_err(BoardError::browser)?;

        let (browser, mut handler) = CdpBrowser::launch(cdp_config)
            .await
            .map_err(|e| BoardError::browser(e.to_string()))?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BoardError::browser(e.to_string()))?;

        tracing::info!(headless = config.headless, "browser launched");
        Ok(Self {
            config,
            browser,
            page,
            handle,
        })
    }

    /// Browser configuration
    #[must_use]
    pub const fn config(&self) -> &BrowserConfig {
        &self.config
    }

    /// Navigate to a URL and wait for the load
    pub async fn goto(&mut self, url: &str) -> BoardResult<()> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BoardError::Navigation {
                target: url.to_string(),
                message: e.to_string(),
            })?;
        tracing::info!(url, "navigated");
        Ok(())
    }

    /// Sign in through the two-step login page
    ///
    /// Times out with [`BoardError::Timeout`] when the logged-in marker never
    /// shows, typically because of MFA or a changed page. A screenshot and an
    /// HTML dump named `login-timeout` go to the artifacts directory first.
    pub async fn login(&mut self, credentials: &Credentials, flow: &LoginFlow) -> BoardResult<()> {
        self.goto(&flow.url).await?;
        if self.is_logged_in(flow, Duration::ZERO).await? {
            tracing::info!("session already logged in");
            return Ok(());
        }
        let step = self.config.navigation_timeout;

        self.await_visible(&flow.username_input, step, "login-timeout").await?;
        self.fill(&flow.username_input, credentials.username()).await?;
        self.await_visible(&flow.continue_button, step, "login-timeout").await?;
        self.click(&flow.continue_button).await?;

        self.await_visible(&flow.password_input, flow.password_step_timeout, "login-timeout")
            .await?;
        self.fill(&flow.password_input, credentials.password()).await?;
        self.await_visible(&flow.login_button, step, "login-timeout").await?;
        self.click(&flow.login_button).await?;

        if let Err(e) = self
            .await_visible(&flow.logged_in_marker, flow.login_timeout, "login-timeout")
            .await
        {
            tracing::warn!(
                "logged-in marker never appeared; the account may need MFA or the login page changed"
            );
            return Err(e);
        }
        tracing::info!(user = credentials.username(), "logged in");
        Ok(())
    }

    /// Whether the logged-in marker shows within `timeout`
    pub async fn is_logged_in(&self, flow: &LoginFlow, timeout: Duration) -> BoardResult<bool> {
        self.wait_for(&visible_script(&flow.logged_in_marker)?, timeout).await
    }

    /// Open a project from the sidebar and wait for its board to be ready
    ///
    /// Ready means the page left the previous location, the configured ready
    /// text is visible and at least one card selector matches.
    pub async fn open_project(
        &mut self,
        project: &str,
        selectors: &[CardSelector],
    ) -> BoardResult<()> {
        let timeout = self.config.navigation_timeout;
        let script = open_project_script(project)?;
        let start = Instant::now();
        let opened = loop {
            let payload: OpenPayload = self.eval(&script).await?;
            if payload.clicked {
                break payload;
            }
            if start.elapsed() >= timeout {
                self.save_failure_artifacts("open-project-timeout").await;
                return Err(BoardError::Navigation {
                    target: project.to_string(),
                    message: "project not found in the sidebar".to_string(),
                });
            }
            tokio::time::sleep(self.config.poll_interval).await;
        };

        let ready = board_ready_script(
            opened.before.as_deref(),
            self.config.ready_text.as_deref(),
            selectors,
        )?;
        if self.wait_for(&ready, timeout).await? {
            tracing::info!(project, "project board ready");
            return Ok(());
        }
        self.save_failure_artifacts("open-project-timeout").await;
        Err(BoardError::Navigation {
            target: project.to_string(),
            message: format!("board not ready within {}ms", timeout.as_millis()),
        })
    }

    /// Write a full-page screenshot and the page HTML as `<name>.png` / `<name>.html`
    pub async fn save_artifacts(&self, name: &str) -> BoardResult<(PathBuf, PathBuf)> {
        let dir: &Path = &self.config.artifacts_dir;
        tokio::fs::create_dir_all(dir).await?;
        let (png, html) = artifact_paths(dir, name);

        let shot = self
            .page
            .screenshot(ScreenshotParams::builder().full_page(true).build())
            .await
            .map_err(|e| BoardError::browser(e.to_string()))?;
        tokio::fs::write(&png, shot).await?;

        let content = self
            .page
            .content()
            .await
            .map_err(|e| BoardError::browser(e.to_string()))?;
        tokio::fs::write(&html, content).await?;
        Ok((png, html))
    }

    /// Artifacts are best effort; a failure here must not mask the timeout.
    async fn save_failure_artifacts(&self, name: &str) {
        match self.save_artifacts(name).await {
            Ok((png, html)) => tracing::warn!(
                screenshot = %png.display(),
                html = %html.display(),
                "failure artifacts saved"
            ),
            Err(e) => tracing::warn!(error = %e, "could not save failure artifacts"),
        }
    }

    async fn wait_for(&self, script: &str, timeout: Duration) -> BoardResult<bool> {
        let start = Instant::now();
        loop {
            let done: bool = self.eval(script).await?;
            if done {
                return Ok(true);
            }
            if start.elapsed() >= timeout {
                return Ok(false);
            }
            tokio::time::sleep(self.config.poll_interval.min(timeout)).await;
        }
    }

    async fn await_visible(
        &self,
        target: &ElementTarget,
        timeout: Duration,
        artifact: &str,
    ) -> BoardResult<()> {
        if self.wait_for(&visible_script(target)?, timeout).await? {
            return Ok(());
        }
        tracing::debug!(css = %target.css, "element never became visible");
        self.save_failure_artifacts(artifact).await;
        Err(BoardError::Timeout {
            ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    async fn click(&self, target: &ElementTarget) -> BoardResult<()> {
        let clicked: bool = self.eval(&click_script(target)?).await?;
        if clicked {
            Ok(())
        } else {
            Err(BoardError::browser(format!("nothing to click at {}", target.css)))
        }
    }

    async fn fill(&self, target: &ElementTarget, value: &str) -> BoardResult<()> {
        let filled: bool = self.eval(&fill_script(target, value)?).await?;
        if filled {
            Ok(())
        } else {
            Err(BoardError::browser(format!("no input at {}", target.css)))
        }
    }

    /// Close the browser
    pub async fn close(mut self) -> BoardResult<()> {
        self.browser
            .close()
            .await
            .map_err(|e| BoardError::browser(e.to_string()))?;
        self.handle.abort();
        Ok(())
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> BoardResult<T> {
        self.page
            .evaluate(expr)
            .await
            .map_err(|e| BoardError::browser(e.to_string()))?
            .into_value()
            .map_err(|e| BoardError::browser(e.to_string()))
    }
}

#[async_trait]
impl BoardSession for ChromeBoardSession {
    async fn snapshot(&mut self, selectors: &[CardSelector]) -> BoardResult<NodeSnapshot> {
        let nodes: Vec<DomNode> = self.eval(&snapshot_script(selectors)?).await?;
        let snapshot = NodeSnapshot::new(nodes)?;
        tracing::debug!(nodes = snapshot.len(), "snapshot captured");
        Ok(snapshot)
    }

    async fn probe_exact_text(
        &mut self,
        text: &str,
        selectors: &[CardSelector],
        timeout: Duration,
    ) -> BoardResult<Option<AnchoredNode>> {
        let script = probe_script(text, selectors)?;
        let start = Instant::now();
        loop {
            let payload: AnchorPayload = self.eval(&script).await?;
            if let Some(anchor) = payload.anchor {
                let snapshot = NodeSnapshot::new(payload.nodes)?;
                if snapshot.get(anchor).is_none() {
                    return Err(BoardError::invalid_snapshot("anchor outside captured nodes"));
                }
                return Ok(Some(AnchoredNode { snapshot, anchor }));
            }
            if start.elapsed() >= timeout {
                return Ok(None);
            }
            tokio::time::sleep(self.config.poll_interval.min(timeout)).await;
        }
    }

    async fn scroll_viewport(&mut self, fraction: f64) -> BoardResult<()> {
        let _: bool = self.eval(&scroll_script(fraction)).await?;
        Ok(())
    }

    async fn pause(&mut self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = BrowserConfig::default();
        assert!(config.headless);
        assert!(config.sandbox);
        assert_eq!(config.navigation_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_config_builders() {
        let config = BrowserConfig::default()
            .with_headless(false)
            .with_no_sandbox()
            .with_viewport(800, 600)
            .with_user_data_dir("/tmp/profile");
        assert!(!config.headless);
        assert!(!config.sandbox);
        assert_eq!(config.viewport_width, 800);
        assert_eq!(config.user_data_dir, Some(PathBuf::from("/tmp/profile")));
    }

    #[test]
    fn test_ready_text_builder() {
        let config = BrowserConfig::default();
        assert_eq!(config.ready_text.as_deref(), Some("To Do"));
        assert_eq!(config.artifacts_dir, PathBuf::from("TestArtifacts"));
        let config = config
            .with_ready_text("Backlog")
            .with_artifacts_dir("/tmp/artifacts")
            .with_navigation_timeout(Duration::from_secs(30));
        assert_eq!(config.ready_text.as_deref(), Some("Backlog"));
        assert_eq!(config.artifacts_dir, PathBuf::from("/tmp/artifacts"));
        assert_eq!(config.navigation_timeout, Duration::from_secs(30));
        assert_eq!(config.with_ready_text("  ").ready_text, None);
    }

    #[test]
    fn test_exact_text_whitespace_is_collapsed() {
        let script = probe_script("  Fix \n  login\tbug ", &CardSelector::defaults()).unwrap();
        assert!(script.contains(r#"const wanted = "Fix login bug";"#));
    }

    #[test]
    fn test_board_ready_waits_for_location_change() {
        let selectors = CardSelector::defaults();
        let script =
            board_ready_script(Some("https://boards.example/home"), Some("To Do"), &selectors)
                .unwrap();
        assert!(script.contains(r#"const before = "https://boards.example/home";"#));
        assert!(script.contains("location.href === before"));
        assert!(script.contains(r#"const ready = "To Do";"#));
        assert!(script.contains(".BoardCard"));
    }

    #[test]
    fn test_board_ready_without_marker_or_location() {
        let script = board_ready_script(None, None, &CardSelector::defaults()).unwrap();
        assert!(script.contains("const before = null;"));
        assert!(script.contains("const ready = null;"));
    }

    #[test]
    fn test_login_scripts_escape_input() {
        let flow = LoginFlow::default();
        let fill = fill_script(&flow.password_input, "p\"ss'</script>").unwrap();
        assert!(fill.contains(r#""p\"ss'</script>""#));
        assert!(fill.contains(r#""input[type=\"password\"][name=\"p\"]""#));
        assert!(fill.contains("dispatchEvent(new Event('input'"));

        let click = click_script(&flow.continue_button).unwrap();
        assert!(click.contains(r#""Continue""#));
        assert!(click.contains("el.click()"));

        let visible = visible_script(&ElementTarget::css("#avatar")).unwrap();
        assert!(visible.contains(r#"__find("#avatar", null) !== null"#));
    }

    #[test]
    fn test_open_project_reports_previous_location() {
        let open = open_project_script("Launch").unwrap();
        assert!(open.contains("clicked: true, before"));
        assert!(open.contains("link.href === location.href"));
    }

    #[test]
    fn test_scripts_escape_input() {
        let selectors = CardSelector::defaults();
        let script = probe_script("say \"hi\"", &selectors).unwrap();
        assert!(script.contains(r#""say \"hi\"""#));
        assert!(script.contains(r#"[role=\"listitem\"]"#));
        let open = open_project_script("Launch").unwrap();
        assert!(open.contains(r#""Launch, Project""#));
    }

    #[test]
    fn test_snapshot_script_lists_selectors() {
        let script = snapshot_script(&CardSelector::defaults()).unwrap();
        assert!(script.contains(".BoardCard"));
        assert!(script.contains("__serialize(roots)"));
    }
}
