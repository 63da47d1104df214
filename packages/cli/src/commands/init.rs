use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use pagesmith_editor::Element;
use pagesmith_export::ExportOptions;
use pagesmith_registry::Target;
use serde_json::json;
use std::fs;
use std::path::Path;

const EXAMPLE_DOCUMENT: &str = "page.json";

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Default export target (react, vue, angular, html)
    #[arg(short, long, default_value = "react")]
    pub target: Target,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config_path = cwd.join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!(
        "{}",
        "📝 Initializing Pagesmith project...".bright_blue().bold()
    );

    let example = cwd.join(EXAMPLE_DOCUMENT);
    if !example.exists() {
        fs::write(&example, serde_json::to_string_pretty(&example_document())?)?;
        println!("  {} Created {}", "✓".green(), EXAMPLE_DOCUMENT);
    }

    let config = Config {
        export: ExportOptions::for_target(args.target),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;
    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);

    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}", EXAMPLE_DOCUMENT);
    println!("  2. Run: pagesmith export {}", EXAMPLE_DOCUMENT);
    println!("  3. Check output in dist/");

    Ok(())
}

fn example_document() -> Vec<Element> {
    vec![Element::new("el-1", "card")
        .with_prop("title", json!("Welcome"))
        .at(40.0, 40.0)
        .with_child(
            Element::new("el-2", "text")
                .with_prop("content", json!("Built with Pagesmith."))
                .at(20.0, 60.0),
        )
        .with_child(
            Element::new("el-3", "button")
                .with_prop("text", json!("Click me"))
                .at(20.0, 120.0),
        )]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagesmith_editor::Tree;

    #[test]
    fn test_init_writes_config_and_document() {
        let dir = std::env::temp_dir().join("pagesmith_cli_init");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();

        init(
            InitArgs {
                target: Target::Vue,
                force: false,
            },
            &dir,
        )
        .unwrap();

        let config = Config::load(&dir).unwrap();
        assert_eq!(config.export.target, Target::Vue);

        let json = fs::read_to_string(dir.join(EXAMPLE_DOCUMENT)).unwrap();
        let elements: Vec<Element> = serde_json::from_str(&json).unwrap();
        assert_eq!(Tree::from_elements(&elements).unwrap().len(), 3);
    }
}
