//! `emreg new` command - Fill in the business information step

use console::style;
use miette::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::core::business::BusinessInformationRecord;
use crate::core::config::Config;
use crate::core::controller::StepController;
use crate::core::navigation::{RecordingNavigator, StepId};
use crate::schema::wizard::StepWizard;

/// File name used for drafts written on save-and-quit
pub const DRAFT_FILE_NAME: &str = "business-information.draft.yaml";

#[derive(clap::Args, Debug)]
pub struct NewArgs {
    /// Resume from an existing draft file
    #[arg(long)]
    pub from: Option<PathBuf>,

    /// Where to write the completed record
    #[arg(long, short = 'o', default_value = "business-information.yaml")]
    pub out: PathBuf,
}

pub fn run(args: NewArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();

    let record = match &args.from {
        Some(path) => BusinessInformationRecord::load(path)
            .map_err(|e| miette::miette!("Failed to load {}: {}", path.display(), e))?,
        None => BusinessInformationRecord::with_country(config.default_country()),
    };

    let mut step = StepController::with_record(record, RecordingNavigator::new());
    let destination = StepWizard::new().run(&mut step)?;
    let (record, navigator) = step.into_parts();
    tracing::debug!(history = ?navigator.history(), "wizard finished");

    let saved_to = match destination {
        StepId::AddressCorrection => Some(args.out.clone()),
        StepId::Dashboard => Some(config.draft_dir().join(DRAFT_FILE_NAME)),
        StepId::Ownership => None,
    };

    if let Some(path) = &saved_to {
        record
            .save(path)
            .map_err(|e| miette::miette!("Failed to write {}: {}", path.display(), e))?;
    }

    if !global.quiet {
        println!();
        match saved_to {
            Some(path) => println!(
                "{} Saved {}",
                style("✓").green(),
                style(path.display()).cyan()
            ),
            None => println!("{} Nothing saved", style("·").dim()),
        }
        println!(
            "{} Continue at step {}",
            style("→").blue(),
            style(destination).yellow()
        );
    }

    Ok(())
}
