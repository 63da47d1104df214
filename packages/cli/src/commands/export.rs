use super::open_document;
use crate::config::Config;
use crate::watcher::FileWatcher;
use anyhow::{anyhow, bail, Result};
use clap::Args;
use colored::Colorize;
use pagesmith_export::{export_project, ExportOptions, ExportResult, PackageScope};
use pagesmith_registry::{Registry, Target};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Document JSON file (array of elements)
    pub document: PathBuf,

    /// Target framework (react, vue, angular, html); overrides config
    #[arg(short, long)]
    pub target: Option<Target>,

    /// Output directory
    #[arg(short, long, default_value = "dist")]
    pub out_dir: PathBuf,

    /// Output to stdout instead of files
    #[arg(long)]
    pub stdout: bool,

    /// Emit TypeScript where the target supports it
    #[arg(long)]
    pub typed: bool,

    /// Packaging (single, component, project); overrides config
    #[arg(short, long)]
    pub scope: Option<String>,

    /// Generate test files
    #[arg(long)]
    pub tests: bool,

    /// Generate story files
    #[arg(long)]
    pub stories: bool,

    /// Re-export whenever the document changes
    #[arg(short, long)]
    pub watch: bool,
}

pub fn export(args: ExportArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let registry = Arc::new(config.registry(cwd)?);
    let options = resolve_options(&config.export, &args)?;
    let document = cwd.join(&args.document);
    let out_dir = cwd.join(&args.out_dir);

    println!(
        "{}",
        format!("🔨 Exporting {} as {}...", args.document.display(), options.target)
            .bright_blue()
            .bold()
    );
    let first = run(&registry, &config, &options, &document, &out_dir, args.stdout);

    if !args.watch {
        return first;
    }
    if let Err(err) = first {
        eprintln!("  {} {:#}", "✗".red(), err);
    }

    let watcher = FileWatcher::new(&document)?;
    println!("\n{}", "👀 Watching for changes...".bright_blue());
    while watcher.next_change().is_some() {
        println!();
        println!("{} {}", "↻".bright_blue(), document.display());
        if let Err(err) = run(&registry, &config, &options, &document, &out_dir, args.stdout) {
            eprintln!("  {} {:#}", "✗".red(), err);
        }
    }
    Ok(())
}

/// Config values with command-line flags applied on top
fn resolve_options(base: &ExportOptions, args: &ExportArgs) -> Result<ExportOptions> {
    let mut options = base.clone();
    if let Some(target) = args.target {
        options.target = target;
    }
    if let Some(scope) = &args.scope {
        options.package_scope = parse_scope(scope)?;
    }
    options.typed_output |= args.typed;
    options.include_tests |= args.tests;
    options.include_story_files |= args.stories;
    Ok(options)
}

fn parse_scope(scope: &str) -> Result<PackageScope> {
    match scope {
        "single" | "single-file" => Ok(PackageScope::SingleFile),
        "component" | "per-component" => Ok(PackageScope::PerComponent),
        "project" | "full-project" => Ok(PackageScope::FullProject),
        other => Err(anyhow!(
            "Unknown scope: {}. Use: single, component, or project",
            other
        )),
    }
}

fn run(
    registry: &Arc<Registry>,
    config: &Config,
    options: &ExportOptions,
    document: &Path,
    out_dir: &Path,
    stdout: bool,
) -> Result<()> {
    let store = open_document(registry.clone(), config.editor.clone(), document)?;
    let result = export_project(&store.roots(), registry, options);
    debug!(files = result.files.len(), "Export result ready");

    if stdout {
        for file in &result.files {
            println!("{}", format!("// {}", file.path).dimmed());
            println!("{}", file.content);
        }
    } else {
        for file in &result.files {
            let path = out_dir.join(&file.path);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, &file.content)?;
            println!("  {} {}", "✓".green(), path.display());
        }
    }

    report(&result);
    if !result.success {
        bail!("{} element(s) could not be exported", result.errors.len());
    }
    Ok(())
}

fn report(result: &ExportResult) {
    for warning in &result.warnings {
        eprintln!(
            "  {} {} ({}): {}",
            "⚠".yellow(),
            warning.element_id,
            warning.element_type,
            warning.message
        );
    }
    for error in &result.errors {
        let element = match (&error.element_id, &error.element_type) {
            (Some(id), Some(type_id)) => format!("{} ({}): ", id, type_id),
            (Some(id), None) => format!("{}: ", id),
            _ => String::new(),
        };
        eprintln!("  {} {}{}", "✗".red(), element, error.message.red());
    }

    let metrics = &result.metrics;
    println!();
    println!(
        "{} {} files, {} lines, {} bytes, {} elements (score {})",
        if result.success { "✅".green() } else { "⚠️".yellow() },
        metrics.file_count,
        metrics.line_count,
        metrics.byte_size,
        metrics.element_count,
        metrics.score
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ExportArgs,
    }

    fn parse(argv: &[&str]) -> ExportArgs {
        Harness::parse_from(std::iter::once("export").chain(argv.iter().copied())).args
    }

    #[test]
    fn test_flags_override_config() {
        let base = ExportOptions::for_target(Target::React);
        let args = parse(&["page.json", "--target", "vue", "--scope", "project", "--typed"]);
        let options = resolve_options(&base, &args).unwrap();

        assert_eq!(options.target, Target::Vue);
        assert_eq!(options.package_scope, PackageScope::FullProject);
        assert!(options.typed_output);
        assert!(!options.include_tests);
    }

    #[test]
    fn test_config_kept_without_flags() {
        let base = ExportOptions::for_target(Target::Angular).with_tests();
        let options = resolve_options(&base, &parse(&["page.json"])).unwrap();
        assert_eq!(options, base);
    }

    #[test]
    fn test_unknown_scope() {
        let args = parse(&["page.json", "--scope", "everything"]);
        assert!(resolve_options(&ExportOptions::default(), &args).is_err());
    }

    #[test]
    fn test_writes_files() {
        let dir = std::env::temp_dir().join("pagesmith_cli_export");
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        let document = dir.join("page.json");
        fs::write(
            &document,
            r#"[{ "id": "el-1", "type": "button", "position": { "x": 80, "y": 40 }, "props": { "text": "Click me" } }]"#,
        )
        .unwrap();

        let registry = Arc::new(Registry::builtin());
        let options = ExportOptions::for_target(Target::Html);
        run(&registry, &Config::default(), &options, &document, &dir.join("dist"), false).unwrap();

        let html = fs::read_to_string(dir.join("dist/src/components/button-el-1.html")).unwrap();
        assert!(html.contains("Click me"));
        assert!(html.contains("left: 80px"));
    }
}
