//! `emreg validate` command - Validate business information drafts

use console::style;
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::path::PathBuf;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::business::BusinessInformationRecord;
use crate::schema::validator::{ValidationEngine, ValidationErrors, ValidationReport};

#[derive(clap::Args, Debug)]
pub struct ValidateArgs {
    /// Draft files to validate
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Show summary only, don't show individual errors
    #[arg(long)]
    pub summary: bool,
}

/// Outcome for one file, as emitted in JSON/YAML output
#[derive(Debug, Serialize)]
struct FileResult {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    load_error: Option<String>,
    errors: ValidationErrors,
}

pub fn run(args: ValidateArgs, global: &GlobalOpts) -> Result<()> {
    let engine = ValidationEngine::new();
    let human = matches!(global.format, OutputFormat::Auto | OutputFormat::Tsv);

    let mut results = Vec::new();
    let mut reports = Vec::new();

    for path in &args.paths {
        let file = path.display().to_string();
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|content| {
                BusinessInformationRecord::from_yaml(&content)
                    .map(|record| (content, record))
                    .map_err(|e| e.to_string())
            });

        let (content, record) = match loaded {
            Ok(loaded) => loaded,
            Err(e) => {
                if human {
                    println!("{} {} - {}", style("✗").red(), file, e);
                }
                results.push(FileResult {
                    file,
                    valid: false,
                    load_error: Some(e),
                    errors: ValidationErrors::default(),
                });
                continue;
            }
        };

        let errors = engine.validate(&record);
        tracing::debug!(file = %file, errors = errors.len(), "validated draft");

        if human {
            if errors.is_empty() {
                if !global.quiet {
                    println!("{} {}", style("✓").green(), file);
                }
            } else {
                println!(
                    "{} {} - {} error(s)",
                    style("✗").red(),
                    file,
                    errors.len()
                );
                if !args.summary {
                    for line in errors.render().lines() {
                        println!("    {}", line);
                    }
                }
            }
        }

        if !errors.is_empty() {
            reports.push(ValidationReport::new(&file, &content, &errors));
        }
        results.push(FileResult {
            valid: errors.is_empty(),
            file,
            load_error: None,
            errors,
        });
    }

    match global.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results).into_diagnostic()?)
        }
        OutputFormat::Yaml => print!("{}", serde_yml::to_string(&results).into_diagnostic()?),
        OutputFormat::Auto | OutputFormat::Tsv => {}
    }

    let checked = results.len();
    let failed = results.iter().filter(|r| !r.valid).count();

    if human && !global.quiet {
        println!();
        println!(
            "{} {} of {} file(s) valid",
            style("→").blue(),
            checked - failed,
            checked
        );
    }

    if failed == 0 {
        return Ok(());
    }
    // A single invalid draft gets the full source-annotated report
    if failed == 1 && reports.len() == 1 {
        if let Some(report) = reports.pop() {
            return Err(report.into());
        }
    }
    Err(miette::miette!("{} of {} file(s) failed validation", failed, checked))
}
