use crate::model::VersionReport;
use anyhow::Result;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Serializes the report as JSON indented by `indent` spaces per level.
pub fn generate_json_string(report: &VersionReport, indent: usize) -> Result<String> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(indent.as_bytes()));
    report.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}

pub fn print_json(report: &VersionReport, indent: usize) -> Result<()> {
    let json = generate_json_string(report, indent)?;
    println!("{}", json);
    Ok(())
}
