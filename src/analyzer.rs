//! Credential analyzer - main pipeline orchestration.

use std::time::Instant;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use zeroize::Zeroize;

#[cfg(feature = "async")]
use tokio::sync::mpsc;

use crate::config::{AnalyzerConfig, ConfigError};
use crate::detectors::{
    check_context, check_dictionary, check_patterns, check_rules, recognize_passphrase,
};
use crate::entropy;
use crate::feedback;
use crate::scoring;
use crate::types::{Analysis, Category, Finding, FindingSet, PassphraseInfo, Severity, Verdict};

/// Outcome of a breach-database lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreachReport {
    pub breached: bool,
    /// Times the credential appeared in known breaches.
    pub count: u64,
}

/// Breach-database lookup failure.
#[derive(Error, Debug)]
pub enum BreachError {
    #[error("breach lookup failed: {0}")]
    Lookup(String),
}

/// External breach-database collaborator.
///
/// The k-anonymity client itself lives outside this crate; the analyzer
/// only consumes its verdict, and treats any error as "not breached" so
/// analysis never fails on collaborator availability.
pub trait BreachCheck {
    fn check(&self, password: &str) -> Result<BreachReport, BreachError>;
}

/// Analyzes credential strength and returns the complete [`Analysis`].
///
/// # Arguments
/// * `password` - The credential to analyze
/// * `config` - Analyzer settings, validated before any detector runs
///
/// # Errors
/// Returns [`ConfigError`] when the configuration is invalid; analysis is
/// not attempted in that case.
pub fn analyze(password: &SecretString, config: &AnalyzerConfig) -> Result<Analysis, ConfigError> {
    analyze_inner(password.expose_secret(), config, None)
}

/// Like [`analyze`], additionally consulting a breach-database collaborator.
pub fn analyze_with_breach(
    password: &SecretString,
    config: &AnalyzerConfig,
    breach: &dyn BreachCheck,
) -> Result<Analysis, ConfigError> {
    analyze_inner(password.expose_secret(), config, Some(breach))
}

/// Analyzes a credential held in a caller-owned mutable buffer and zeroes
/// the buffer once analysis completes.
///
/// The clear uses a compiler-opaque write; copies the allocator, swap or a
/// core dump may have made outside this buffer are not addressed.
pub fn analyze_buffer(
    buf: &mut [u8],
    config: &AnalyzerConfig,
    breach: Option<&dyn BreachCheck>,
) -> Result<Analysis, ConfigError> {
    let mut password = String::from_utf8_lossy(buf).into_owned();
    let result = analyze_inner(&password, config, breach);
    password.zeroize();
    buf.zeroize();
    result
}

fn analyze_inner(
    password: &str,
    config: &AnalyzerConfig,
    breach: Option<&dyn BreachCheck>,
) -> Result<Analysis, ConfigError> {
    config.validate()?;
    let started = Instant::now();

    // silent truncation bounds worst-case detector work
    let capped: String;
    let pwd = if password.chars().count() > config.max_runes {
        capped = password.chars().take(config.max_runes).collect();
        &capped
    } else {
        password
    };
    let lower = pwd.to_lowercase();

    // detectors run in fixed order; none of them can fail
    let mut findings = FindingSet::default();
    let (rule_findings, profile) = check_rules(pwd, &config.rule_options());
    findings.extend(rule_findings);
    findings.extend(check_patterns(pwd, &config.pattern_options()));
    findings.extend(check_dictionary(&lower, &config.dictionary_options()));
    findings.extend(check_context(&lower, &config.context_options()));

    let passphrase = if config.passphrase {
        recognize_passphrase(pwd, &config.passphrase_options())
    } else {
        PassphraseInfo::default()
    };

    if let Some(breach) = breach {
        match breach.check(pwd) {
            Ok(report) if report.breached => {
                findings.push(Finding::new(
                    "breach.compromised",
                    format!("Found in {} known data breaches", report.count),
                    Category::Breach,
                    Severity::Critical,
                ));
            }
            Ok(_) => {}
            Err(_e) => {
                // degraded, not failed: a missing collaborator never
                // blocks analysis
                #[cfg(feature = "tracing")]
                tracing::warn!("breach lookup failed, treating as not breached: {}", _e);
            }
        }
    }

    let entropy_bits = entropy::estimate(
        config.entropy_mode,
        pwd,
        &lower,
        &profile,
        findings.in_category(Category::Pattern),
        config.passphrase.then_some(&passphrase),
        config.passphrase_dictionary_size,
    );

    let score = scoring::compute_score(
        entropy_bits,
        &profile,
        &findings,
        &passphrase,
        config.min_length,
        &config.weights,
    );
    let verdict = Verdict::from_score(score);

    let issues = feedback::refine(&findings, config.max_issues);
    let suggestions = feedback::praise(&profile, &findings, entropy_bits);

    // latency padding happens after all work completes
    if let Some(min) = config.min_execution_time {
        let elapsed = started.elapsed();
        if elapsed < min {
            std::thread::sleep(min - elapsed);
        }
    }

    Ok(Analysis {
        score,
        verdict,
        issues,
        suggestions,
        entropy: entropy_bits,
    })
}

/// Async variant that sends the analysis result via channel.
///
/// The pipeline itself stays synchronous; only the minimum-execution-time
/// padding moves to the async clock so the task never blocks a worker.
#[cfg(feature = "async")]
pub async fn analyze_tx(
    password: &SecretString,
    config: &AnalyzerConfig,
    tx: mpsc::Sender<Result<Analysis, ConfigError>>,
) {
    #[cfg(feature = "tracing")]
    tracing::info!("analysis is about to start...");

    let started = Instant::now();
    let mut config = config.clone();
    let min = config.min_execution_time.take();

    let result = analyze(password, &config);

    if let Some(min) = min {
        let elapsed = started.elapsed();
        if elapsed < min {
            tokio::time::sleep(min - elapsed).await;
        }
    }

    if let Err(e) = tx.send(result).await {
        #[cfg(feature = "tracing")]
        tracing::error!("Failed to send analysis result: {}", e);
        let _ = e;
    }
}
