//! Startup self-checks module
//!
//! Verifies the notice assets before the server starts accepting requests:
//! - Template and stylesheet can be loaded
//! - Template references every known placeholder
//! - A render pass with the default form succeeds

use tracing::{error, info, warn};

use crate::config::Config;
use crate::email::{EmailTemplate, Placeholder};
use crate::templates::{
    describe, read_asset, Assets, DEFAULT_STYLESHEET, DEFAULT_TEMPLATE,
};

/// Outcome of one self-check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    /// A failed critical check aborts startup
    pub critical: bool,
    pub message: String,
    pub details: Option<String>,
}

impl CheckResult {
    fn pass(name: &'static str, message: impl Into<String>) -> Self {
        Self {
            name,
            passed: true,
            critical: false,
            message: message.into(),
            details: None,
        }
    }

    fn fail(
        name: &'static str,
        message: impl Into<String>,
        critical: bool,
        details: impl ToString,
    ) -> Self {
        Self {
            name,
            passed: false,
            critical,
            message: message.into(),
            details: Some(details.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StartupCheckReport {
    pub checks: Vec<CheckResult>,
    pub all_critical_passed: bool,
    pub all_passed: bool,
    pub summary: String,
}

impl StartupCheckReport {
    fn new(checks: Vec<CheckResult>) -> Self {
        let (critical, warnings) = checks
            .iter()
            .filter(|c| !c.passed)
            .fold((0, 0), |(critical, warnings), c| {
                if c.critical {
                    (critical + 1, warnings)
                } else {
                    (critical, warnings + 1)
                }
            });

        let summary = match (critical, warnings) {
            (0, 0) => format!("All {} startup checks passed", checks.len()),
            (0, n) => format!("{} of {} checks raised warnings", n, checks.len()),
            (n, _) => format!("{} critical check(s) failed", n),
        };

        Self {
            all_critical_passed: critical == 0,
            all_passed: critical + warnings == 0,
            checks,
            summary,
        }
    }
}

/// Run all startup self-checks
pub fn run_startup_checks(config: &Config) -> StartupCheckReport {
    info!("Running startup self-checks...");

    let mut checks = Vec::new();

    let template = check_template(config, &mut checks);
    checks.push(check_stylesheet(config));
    if let Some(template) = &template {
        checks.push(check_placeholders(template));
    }
    checks.push(check_sample_render(config));

    let report = StartupCheckReport::new(checks);

    for check in &report.checks {
        if check.passed {
            info!(
                check = check.name,
                message = %check.message,
                "Startup check PASSED"
            );
        } else if check.critical {
            error!(
                check = check.name,
                message = %check.message,
                details = ?check.details,
                "Startup check FAILED (CRITICAL)"
            );
        } else {
            warn!(
                check = check.name,
                message = %check.message,
                details = ?check.details,
                "Startup check FAILED (non-critical)"
            );
        }
    }

    info!(
        summary = %report.summary,
        all_passed = report.all_passed,
        all_critical_passed = report.all_critical_passed,
        "Startup checks completed"
    );

    report
}

/// Check the notice template can be read
fn check_template(config: &Config, checks: &mut Vec<CheckResult>) -> Option<EmailTemplate> {
    let path = config.templates.template_path.as_deref();
    let source = describe(path, DEFAULT_TEMPLATE);

    match read_asset(path, DEFAULT_TEMPLATE) {
        Ok(text) => {
            checks.push(CheckResult::pass(
                "template",
                format!("Loaded template from {}", source),
            ));
            Some(EmailTemplate::parse(&text))
        }
        Err(e) => {
            checks.push(CheckResult::fail(
                "template",
                format!("Cannot load template from {}", source),
                true,
                e,
            ));
            None
        }
    }
}

/// Check the stylesheet can be read
fn check_stylesheet(config: &Config) -> CheckResult {
    let path = config.templates.stylesheet_path.as_deref();
    let source = describe(path, DEFAULT_STYLESHEET);

    match read_asset(path, DEFAULT_STYLESHEET) {
        Ok(_) => CheckResult::pass("stylesheet", format!("Loaded stylesheet from {}", source)),
        Err(e) => CheckResult::fail(
            "stylesheet",
            format!("Cannot load stylesheet from {}", source),
            true,
            e,
        ),
    }
}

/// Warn about placeholders the template never uses
fn check_placeholders(template: &EmailTemplate) -> CheckResult {
    let missing = template.missing_placeholders();
    if missing.is_empty() {
        return CheckResult::pass(
            "template_placeholders",
            format!("Template uses all {} placeholders", Placeholder::ALL.len()),
        );
    }

    let names: Vec<String> = missing.iter().map(Placeholder::token).collect();
    CheckResult::fail(
        "template_placeholders",
        format!("Template does not use {} placeholder(s)", missing.len()),
        false,
        names.join(", "),
    )
}

/// Render the default form end to end
fn check_sample_render(config: &Config) -> CheckResult {
    let assets = match Assets::load(&config.templates) {
        Ok(assets) => assets,
        Err(e) => {
            return CheckResult::fail(
                "sample_render",
                "Assets unavailable for sample render",
                true,
                e,
            )
        }
    };

    match assets.render(&config.form.initial_form()) {
        Ok(preview) => CheckResult::pass(
            "sample_render",
            format!("Sample notice rendered ({} bytes)", preview.html.len()),
        ),
        Err(e) => CheckResult::fail("sample_render", "Sample render failed", true, e),
    }
}
