//! siterev - content-hashed asset resolution for static sites.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use siterev::{
    AssetResolver, SiteConfig,
    check::check_site,
    cli::{Cli, Commands},
    context::{render_context, write_context},
    log,
    revision::revise,
};
use std::io::{Write, stdout};

fn main() {
    if let Err(err) = run() {
        log!("error"; "{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let resolver = AssetResolver::from_config(&config);

    match &cli.command {
        Commands::Resolve { category, name } => {
            let url = resolver.resolve(category, name)?;
            print_line(&url)
        }
        Commands::List { category } => {
            for (logical, url) in resolver.resolve_all(category)? {
                print_line(&format!("{logical}\t{url}"))?;
            }
            Ok(())
        }
        Commands::Check => check(&config, &resolver),
        Commands::Rev { category, .. } => rev(&config, &resolver, category),
        Commands::Context { stdout: true } => {
            let json = render_context(&config, &resolver)?;
            stdout().lock().write_all(json.as_bytes())?;
            Ok(())
        }
        Commands::Context { stdout: false } => {
            let path = write_context(&config, &resolver)?;
            log!("context"; "wrote {}", path.display());
            Ok(())
        }
    }
}

/// Load and validate configuration from CLI arguments and the environment.
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let mut config = SiteConfig::load(cli).context("Failed to load config")?;
    config.update_with_env(std::env::vars());
    config.validate()?;

    Ok(config)
}

fn check(config: &SiteConfig, resolver: &AssetResolver) -> Result<()> {
    if config.assets.is_empty() {
        log!("warn"; "no [assets.<category>] configured in {}", config.config_path.display());
    }

    let report = check_site(config, resolver);
    if !report.is_ok() {
        bail!(
            "{} asset problem(s) found:\n{}",
            report.problems.len(),
            report.summary()
        );
    }

    log!("check"; "{} references resolved, {} files present", report.resolved, report.files);
    Ok(())
}

fn rev(config: &SiteConfig, resolver: &AssetResolver, category: &str) -> Result<()> {
    let source = config
        .assets
        .get(category)
        .and_then(|asset| asset.source.as_deref())
        .ok_or_else(|| {
            anyhow!("no source for `{category}`: set [assets.{category}].source or pass --source")
        })?;
    let dest = resolver.category_dir(category)?;

    let report = revise(source, &dest, &config.build.manifest)
        .with_context(|| format!("Failed to revision category `{category}`"))?;

    for (logical, deployed) in report.manifest.iter() {
        log!("rev"; "{logical} -> {deployed}");
    }
    for stale in &report.removed {
        log!("rev"; "removed {stale}");
    }
    log!("rev"; "wrote {}", report.manifest_path.display());

    Ok(())
}

fn print_line(line: &str) -> Result<()> {
    writeln!(stdout().lock(), "{line}")?;
    Ok(())
}
