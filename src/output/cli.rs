use crate::model::{VersionReport, PLUGINS_KEY, SECURITY_KEY};
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct VersionRow {
    #[tabled(rename = "Group")]
    group: String,
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Version")]
    version: String,
}

pub fn print_cli_table(report: &VersionReport) -> Result<()> {
    println!("{}", generate_table_string(report));
    println!();

    let unknown = report.unknown_count();
    if unknown > 0 {
        println!("{} package(s) could not be resolved.", unknown);
    }

    Ok(())
}

pub(crate) fn generate_table_string(report: &VersionReport) -> String {
    let mut rows = Vec::new();
    if let Some(version) = &report.root.version {
        rows.push(row("root", &report.root.name, version));
    }
    rows.push(row("core", &report.server.name, &report.server.version));
    rows.push(row("core", &report.client.name, &report.client.version));

    for (name, version) in &report.security {
        rows.push(row(SECURITY_KEY, name, version));
    }
    for (name, version) in &report.plugins {
        rows.push(row(PLUGINS_KEY, name, version));
    }

    Table::new(rows).with(Style::rounded()).to_string()
}

fn row(group: &str, package: &str, version: &str) -> VersionRow {
    VersionRow {
        group: group.to_string(),
        package: package.to_string(),
        version: version.to_string(),
    }
}
