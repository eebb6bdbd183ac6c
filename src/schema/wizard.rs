//! Interactive terminal wizard for the business information step
//!
//! A thin host around [`StepController`]: it turns prompts into field
//! changes and menu choices into navigation intents. All rules live in the
//! controller and the validation engine.

use console::style;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use miette::{IntoDiagnostic, Result};

use crate::core::controller::{NextOutcome, StepController, StepState};
use crate::core::field::{AddressField, BusinessField, FieldPath};
use crate::core::navigation::{Navigator, StepId};
use crate::core::options::{self, SelectOption};
use crate::schema::rules::{is_required_address, is_required_business};

/// Menu entries offered after the first pass through the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Next,
    Edit,
    AddLocation,
    RemoveLocation,
    Back,
    SaveAndQuit,
}

impl Action {
    fn label(&self) -> &'static str {
        match self {
            Action::Next => "Next",
            Action::Edit => "Edit a field",
            Action::AddLocation => "Add physical location",
            Action::RemoveLocation => "Remove physical location",
            Action::Back => "Back",
            Action::SaveAndQuit => "Save & quit",
        }
    }
}

/// Prompt-driven wizard for one step session
pub struct StepWizard {
    theme: ColorfulTheme,
}

impl StepWizard {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    /// Run until the user leaves the step, returning where they went
    pub fn run<N: Navigator>(&self, step: &mut StepController<N>) -> Result<StepId> {
        println!();
        println!(
            "{} {}",
            style("◆").cyan(),
            style("Business Information").bold()
        );
        println!("{}", style("─".repeat(50)).dim());

        self.fill_business(step)?;
        self.fill_section(step, "Mailing Address", FieldPath::Mailing)?;
        for index in 0..step.record().physical_locations().len() {
            self.fill_location(step, index)?;
        }

        loop {
            self.print_errors(step);

            let actions = self.available_actions(step);
            let labels: Vec<&str> = actions.iter().map(|a| a.label()).collect();
            let choice = Select::with_theme(&self.theme)
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()
                .into_diagnostic()?;

            match actions[choice] {
                Action::Next => match step.go_next() {
                    NextOutcome::Proceeded => return Ok(StepId::AddressCorrection),
                    NextOutcome::Blocked { error_count } => {
                        println!(
                            "{} Please correct {} field(s) before continuing",
                            style("!").yellow(),
                            error_count
                        );
                    }
                },
                Action::Edit => {
                    if let Some(path) = self.pick_field(step)? {
                        self.prompt_field(step, path)?;
                    }
                }
                Action::AddLocation => match step.add_physical_location() {
                    Ok(index) => self.fill_location(step, index)?,
                    Err(e) => println!("{}", style(e).dim()),
                },
                Action::RemoveLocation => {
                    let index = self.pick_location(step)?;
                    match step.remove_physical_location(index) {
                        Ok(_) => println!(
                            "{} Removed physical location {}",
                            style("✓").green(),
                            index + 1
                        ),
                        Err(e) => println!("{}", style(e).dim()),
                    }
                }
                Action::Back => {
                    step.go_back();
                    return Ok(StepId::Ownership);
                }
                Action::SaveAndQuit => {
                    step.save_and_quit();
                    return Ok(StepId::Dashboard);
                }
            }
        }
    }

    fn available_actions<N: Navigator>(&self, step: &StepController<N>) -> Vec<Action> {
        let mut actions = vec![Action::Next, Action::Edit];
        if step.record().can_add_physical_location() {
            actions.push(Action::AddLocation);
        }
        if step.record().can_remove_physical_location() {
            actions.push(Action::RemoveLocation);
        }
        actions.push(Action::Back);
        actions.push(Action::SaveAndQuit);
        actions
    }

    fn fill_business<N: Navigator>(&self, step: &mut StepController<N>) -> Result<()> {
        self.print_section("Business Details");
        for field in BusinessField::all() {
            self.prompt_field(step, FieldPath::Business(*field))?;
        }
        Ok(())
    }

    fn fill_location<N: Navigator>(&self, step: &mut StepController<N>, index: usize) -> Result<()> {
        self.fill_section(
            step,
            &format!("Physical Location {}", index + 1),
            |field| FieldPath::Physical(index, field),
        )
    }

    fn fill_section<N: Navigator>(
        &self,
        step: &mut StepController<N>,
        title: &str,
        section: impl Fn(AddressField) -> FieldPath,
    ) -> Result<()> {
        self.print_section(title);
        for field in AddressField::all() {
            self.prompt_field(step, section(*field))?;
        }
        Ok(())
    }

    /// Prompt for one field and hand the answer to the controller
    fn prompt_field<N: Navigator>(&self, step: &mut StepController<N>, path: FieldPath) -> Result<()> {
        let current = step.record().get(path).unwrap_or_default().to_string();
        let prompt = self.format_prompt(path);

        let value = match path {
            FieldPath::Mailing(AddressField::Country)
            | FieldPath::Physical(_, AddressField::Country) => {
                self.select_option(&prompt, options::countries(), &current)?
            }
            FieldPath::Mailing(AddressField::State)
            | FieldPath::Physical(_, AddressField::State) => {
                self.select_option(&prompt, options::us_states(), &current)?
            }
            _ => {
                let input = Input::<String>::with_theme(&self.theme)
                    .with_prompt(&prompt)
                    .allow_empty(true);
                let input = if current.is_empty() {
                    input
                } else {
                    input.default(current)
                };
                input.interact_text().into_diagnostic()?
            }
        };

        step.set_field(path, value).into_diagnostic()?;

        // Once errors are visible, flag a bad answer straight away
        if step.state() == StepState::SubmissionAttempted {
            if let Some(message) = step.errors().message(&path) {
                println!("  {} {}", style("✗").red(), style(message).red());
            }
        }
        Ok(())
    }

    fn select_option(&self, prompt: &str, items: &[SelectOption], current: &str) -> Result<String> {
        let labels: Vec<&str> = items.iter().map(|o| o.text).collect();
        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(options::position_of(items, current).unwrap_or(0))
            .interact()
            .into_diagnostic()?;
        Ok(items[selection].value.to_string())
    }

    fn pick_field<N: Navigator>(&self, step: &StepController<N>) -> Result<Option<FieldPath>> {
        let record = step.record();
        let mut paths: Vec<FieldPath> = BusinessField::all()
            .iter()
            .map(|f| FieldPath::Business(*f))
            .collect();
        paths.extend(AddressField::all().iter().map(|f| FieldPath::Mailing(*f)));
        for index in 0..record.physical_locations().len() {
            paths.extend(AddressField::all().iter().map(|f| FieldPath::Physical(index, *f)));
        }

        let visible = step.visible_errors();
        let mut labels: Vec<String> = paths
            .iter()
            .map(|path| {
                let value = record.get(*path).unwrap_or_default();
                let marker = match visible {
                    Some(errors) if errors.contains(path) => format!(" {}", style("✗").red()),
                    _ => String::new(),
                };
                format!("{} [{}]{}", path.label(), value, marker)
            })
            .collect();
        labels.push("(cancel)".to_string());

        let selection = Select::with_theme(&self.theme)
            .with_prompt("Field to edit")
            .items(&labels)
            .default(0)
            .interact()
            .into_diagnostic()?;
        Ok(paths.get(selection).copied())
    }

    fn pick_location<N: Navigator>(&self, step: &StepController<N>) -> Result<usize> {
        let labels: Vec<String> = step
            .record()
            .physical_locations()
            .iter()
            .enumerate()
            .map(|(i, a)| format!("{}. {}", i + 1, a.summary()))
            .collect();
        Select::with_theme(&self.theme)
            .with_prompt("Location to remove")
            .items(&labels)
            .default(labels.len().saturating_sub(1))
            .interact()
            .into_diagnostic()
    }

    fn print_section(&self, title: &str) {
        println!();
        println!("{}", style(title).bold().underlined());
    }

    fn print_errors<N: Navigator>(&self, step: &StepController<N>) {
        let Some(errors) = step.visible_errors() else {
            return;
        };
        if errors.is_empty() {
            return;
        }
        println!();
        for (path, error) in errors.iter() {
            println!(
                "  {} {}: {}",
                style("✗").red(),
                path.label(),
                style(&error.message).red()
            );
        }
        println!();
    }

    /// Label plus a required marker, e.g. "FEIN *"
    fn format_prompt(&self, path: FieldPath) -> String {
        let required = match path {
            FieldPath::Business(field) => is_required_business(field),
            FieldPath::Mailing(field) | FieldPath::Physical(_, field) => is_required_address(field),
        };
        if required {
            format!("{} {}", path.label(), style("*").red())
        } else {
            format!("{} {}", path.label(), style("(optional)").dim())
        }
    }
}

impl Default for StepWizard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::navigation::RecordingNavigator;

    #[test]
    fn test_actions_follow_location_bounds() {
        let wizard = StepWizard::new();
        let mut step = StepController::new(RecordingNavigator::new());

        let actions = wizard.available_actions(&step);
        assert!(actions.contains(&Action::AddLocation));
        assert!(!actions.contains(&Action::RemoveLocation));

        step.add_physical_location().unwrap();
        step.add_physical_location().unwrap();
        let actions = wizard.available_actions(&step);
        assert!(!actions.contains(&Action::AddLocation));
        assert!(actions.contains(&Action::RemoveLocation));
        assert_eq!(actions[0], Action::Next);
    }

    #[test]
    fn test_prompt_marks_required_fields() {
        let wizard = StepWizard::new();
        let required = wizard.format_prompt(FieldPath::Business(BusinessField::Fein));
        let optional = wizard.format_prompt(FieldPath::Mailing(AddressField::Extension));
        assert!(required.starts_with("FEIN"));
        assert!(required.contains('*'));
        assert!(optional.contains("(optional)"));
    }
}
