use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;

#[derive(Args, Debug)]
pub struct CatalogArgs {
    /// Print the definitions as JSON
    #[arg(long)]
    pub json: bool,

    /// Show every prop with its kind and default
    #[arg(short, long)]
    pub props: bool,
}

pub fn catalog(args: CatalogArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = config.registry(cwd)?;

    if args.json {
        let definitions: Vec<_> = registry.definitions().collect();
        println!("{}", serde_json::to_string_pretty(&definitions)?);
        return Ok(());
    }

    for (category, definitions) in registry.by_category() {
        println!("{}", category.bright_blue().bold());
        for definition in definitions {
            let container = if definition.accepts_children { " [container]" } else { "" };
            println!(
                "  {} {}{}",
                format!("{:<12}", definition.type_id).bright_white(),
                definition.name,
                container.dimmed()
            );
            if !args.props {
                continue;
            }
            for (name, schema) in &definition.prop_schema {
                let default = schema
                    .default
                    .as_ref()
                    .map(|value| format!(" = {}", value))
                    .unwrap_or_default();
                println!(
                    "      {}: {:?}{}{}",
                    name,
                    schema.kind,
                    if schema.required { " (required)" } else { "" },
                    default.dimmed()
                );
            }
        }
        println!();
    }
    println!("{} component types", registry.len());
    Ok(())
}
