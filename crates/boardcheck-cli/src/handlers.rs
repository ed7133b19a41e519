//! Subcommand handlers

use crate::commands::{CheckArgs, CompareArgs, ExtractArgs, ValidateArgs};
use crate::error::{CliError, CliResult};
use crate::output::{render_result, StatusReporter};
use boardcheck::{
    compare_exact, resolve_manifest_path, BulkExtractor, CardSelector, ComparisonResult,
    Credentials, Manifest, NodeSnapshot,
};
use std::path::Path;

/// Resolve and load the manifest, explicit path first
pub fn load_manifest(explicit: Option<&Path>) -> CliResult<Manifest> {
    let cwd = std::env::current_dir()?;
    let path = resolve_manifest_path(explicit, &cwd)?;
    Ok(Manifest::load(&path)?)
}

/// Default card selectors followed by any extra ones
pub fn card_selectors(extra: &[String]) -> CliResult<Vec<CardSelector>> {
    let mut selectors = CardSelector::defaults();
    selectors.extend(CardSelector::parse_all(extra)?);
    Ok(selectors)
}

/// Login credentials from `--username` / `--password`, both or neither
pub fn credentials(args: &CheckArgs) -> CliResult<Option<Credentials>> {
    match (&args.username, &args.password) {
        (Some(user), Some(pass)) => Ok(Some(Credentials::new(user, pass))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(CliError::invalid_argument(
            "--username needs --password (or BOARDCHECK_PASSWORD)",
        )),
        (None, Some(_)) => Err(CliError::invalid_argument(
            "--password needs --username (or BOARDCHECK_USERNAME)",
        )),
    }
}

/// Offline comparison against a captured snapshot
pub fn run_compare(reporter: &StatusReporter, args: &CompareArgs) -> CliResult<ComparisonResult> {
    let manifest = load_manifest(args.manifest.as_deref())?;
    let snapshot = NodeSnapshot::load(&args.snapshot)?;
    reporter.info(&format!(
        "Comparing {} tickets of {} against {}",
        manifest.tickets().len(),
        manifest.project(),
        args.snapshot.display()
    ));

    let extractor = BulkExtractor::new().with_selectors(card_selectors(&args.selectors)?);
    let actual = extractor.extract_mapping(&snapshot);
    tracing::debug!(
        snapshot = %args.snapshot.display(),
        nodes = snapshot.len(),
        board_tickets = actual.len(),
        "board read from snapshot"
    );
    let result = compare_exact(manifest.tickets(), &actual);

    println!("{}", render_result(&result, args.format)?);
    reporter.verdict(&result, manifest.tickets().len());
    Ok(result)
}

/// Print extracted records as JSON
pub fn run_extract(reporter: &StatusReporter, args: &ExtractArgs) -> CliResult<()> {
    let snapshot = NodeSnapshot::load(&args.snapshot)?;
    let extractor = BulkExtractor::new().with_selectors(card_selectors(&args.selectors)?);
    let records = extractor.extract(&snapshot);
    tracing::debug!(
        snapshot = %args.snapshot.display(),
        nodes = snapshot.len(),
        extra_selectors = args.selectors.len(),
        "tickets extracted"
    );
    println!("{}", serde_json::to_string_pretty(&records)?);
    reporter.info(&format!("Extracted {} tickets", records.len()));
    Ok(())
}

/// Load and validate a manifest
pub fn run_validate(reporter: &StatusReporter, args: &ValidateArgs) -> CliResult<()> {
    let manifest = load_manifest(args.manifest.as_deref())?;
    println!("Project: {}", manifest.project());
    println!("Tickets: {}", manifest.tickets().len());
    reporter.success("Manifest is valid");
    Ok(())
}

/// Live check against a board
#[cfg(feature = "browser")]
pub fn run_check(reporter: &StatusReporter, args: &CheckArgs) -> CliResult<ComparisonResult> {
    let manifest = load_manifest(args.manifest.as_deref())?;
    let credentials = credentials(args)?;
    reporter.info(&format!(
        "Checking {} tickets of {} on {}",
        manifest.tickets().len(),
        manifest.project(),
        args.url
    ));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(live::check(&manifest, args, credentials.as_ref()))?;

    println!("{}", render_result(&result, args.format)?);
    reporter.verdict(&result, manifest.tickets().len());
    Ok(result)
}

/// Live check against a board
#[cfg(not(feature = "browser"))]
pub fn run_check(_reporter: &StatusReporter, _args: &CheckArgs) -> CliResult<ComparisonResult> {
    Err(crate::error::CliError::FeatureDisabled { feature: "browser" })
}

#[cfg(feature = "browser")]
mod live {
    use super::{compare_exact, BulkExtractor, CardSelector, ComparisonResult, Credentials, Manifest};
    use crate::commands::CheckArgs;
    use crate::error::CliResult;
    use boardcheck::{
        extract_tags_for, BoardSession, BrowserConfig, ChromeBoardSession, LoginFlow, RetryPolicy,
    };
    use std::time::Duration;

    pub(super) async fn check(
        manifest: &Manifest,
        args: &CheckArgs,
        credentials: Option<&Credentials>,
    ) -> CliResult<ComparisonResult> {
        let mut config = BrowserConfig::default()
            .with_headless(args.headless)
            .with_navigation_timeout(Duration::from_millis(args.navigation_timeout))
            .with_ready_text(args.ready_text.as_str())
            .with_artifacts_dir(&args.artifacts_dir);
        if args.no_sandbox {
            config = config.with_no_sandbox();
        }
        if let Some(ref path) = args.chromium_path {
            config = config.with_chromium_path(path);
        }
        if let Some(ref dir) = args.user_data_dir {
            config = config.with_user_data_dir(dir);
        }

        let mut session = ChromeBoardSession::launch(config).await?;
        let outcome = drive(&mut session, manifest, args, credentials).await;
        if let Err(e) = session.close().await {
            tracing::warn!(error = %e, "browser did not close cleanly");
        }
        outcome
    }

    async fn drive(
        session: &mut ChromeBoardSession,
        manifest: &Manifest,
        args: &CheckArgs,
        credentials: Option<&Credentials>,
    ) -> CliResult<ComparisonResult> {
        if let Some(credentials) = credentials {
            let mut flow = LoginFlow::default();
            if let Some(ref url) = args.login_url {
                flow = flow.with_url(url);
            }
            session.login(credentials, &flow).await?;
        }
        let selectors = CardSelector::defaults();
        session.goto(&args.url).await?;
        session.open_project(manifest.project(), &selectors).await?;

        let bulk = if args.capture.is_some() || !args.targeted {
            Some(session.snapshot(&selectors).await?)
        } else {
            None
        };
        if let (Some(path), Some(snapshot)) = (&args.capture, &bulk) {
            snapshot.save(path)?;
            tracing::info!(path = %path.display(), nodes = snapshot.len(), "snapshot captured");
        }

        let actual = match bulk {
            Some(snapshot) if !args.targeted => BulkExtractor::new().extract_mapping(&snapshot),
            _ => extract_tags_for(session, manifest.tickets(), RetryPolicy::default()).await?,
        };
        Ok(compare_exact(manifest.tickets(), &actual))
    }
}
