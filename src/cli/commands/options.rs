//! `emreg options` command - List dropdown options for address fields

use miette::{IntoDiagnostic, Result};
use tabled::{builder::Builder, settings::Style};

use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::options::{self, SelectOption};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionList {
    /// Countries offered for an address
    Countries,
    /// US states (code and name)
    States,
}

#[derive(clap::Args, Debug)]
pub struct OptionsArgs {
    /// Which list to print
    #[arg(value_enum)]
    pub list: OptionList,
}

pub fn run(args: OptionsArgs, global: &GlobalOpts) -> Result<()> {
    let items = match args.list {
        OptionList::Countries => options::countries(),
        OptionList::States => options::us_states(),
    };
    print!("{}", render(items, global.format)?);
    Ok(())
}

fn render(items: &[SelectOption], format: OutputFormat) -> Result<String> {
    let output = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(items).into_diagnostic()?;
            json.push('\n');
            json
        }
        OutputFormat::Yaml => serde_yml::to_string(items).into_diagnostic()?,
        OutputFormat::Tsv => items
            .iter()
            .map(|o| format!("{}\t{}\n", o.value, o.text))
            .collect(),
        OutputFormat::Auto => {
            let mut builder = Builder::default();
            builder.push_record(["VALUE", "TEXT"]);
            for item in items {
                builder.push_record([item.value, item.text]);
            }
            format!("{}\n", builder.build().with(Style::sharp()))
        }
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tsv_lines() {
        let out = render(options::countries(), OutputFormat::Tsv).unwrap();
        assert_eq!(out, "United States\tUnited States\nCanada\tCanada\nMexico\tMexico\n");
    }

    #[test]
    fn test_json_is_parseable() {
        let out = render(options::us_states(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["value"], "AL");
        assert_eq!(value.as_array().unwrap().len(), 50);
    }

    #[test]
    fn test_table_has_header() {
        let out = render(options::countries(), OutputFormat::Auto).unwrap();
        assert!(out.contains("VALUE"));
        assert!(out.contains("Mexico"));
    }
}
