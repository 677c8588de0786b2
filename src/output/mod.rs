mod cli;
mod json;

pub use cli::print_cli_table;
pub use json::{generate_json_string, print_json};

use crate::model::VersionReport;
use anyhow::Result;

/// Output format for version reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Indented JSON object
    Json,
    /// Human-readable table format
    Table,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "table" => Ok(OutputFormat::Table),
            _ => Err(format!("Unknown format: {}. Use 'json' or 'table'", s)),
        }
    }
}

pub fn print_result(report: &VersionReport, format: OutputFormat, indent: usize) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(report, indent),
        OutputFormat::Table => print_cli_table(report),
    }
}

/// Format report to string for file output
pub fn format_result_to_string(report: &VersionReport, format: OutputFormat, indent: usize) -> Result<String> {
    match format {
        OutputFormat::Json => generate_json_string(report, indent),
        OutputFormat::Table => Ok(cli::generate_table_string(report)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("json"), Ok(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("TABLE"), Ok(OutputFormat::Table));
        assert!(OutputFormat::from_str("sarif").is_err());
    }
}
