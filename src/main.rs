use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use docker_versions::ci::{RefTrigger, TagTarget, Variant, derive_tags, plan, should_push};
use docker_versions::config::{Config, resolve_repo_root};
use docker_versions::logging;
use docker_versions::repo::{Layout, VersionManager};

#[derive(Parser)]
#[command(name = "docker-versions")]
#[command(version, about = "Build matrix, tags and version maintenance for Docker image repositories")]
struct Cli {
    /// Repository root (default: nearest ancestor containing .github)
    #[arg(long, global = true, env = "DOCKER_VERSIONS_ROOT")]
    repo_root: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true, env = "DOCKER_VERSIONS_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Output build matrix as JSON
    Matrix {
        /// Git ref (e.g., refs/tags/v30.2, refs/heads/master)
        #[arg(long = "ref", env = "GITHUB_REF")]
        git_ref: String,
        /// Override: build only this version (e.g., 30.2)
        #[arg(long)]
        version: Option<String>,
    },
    /// Output Docker tags for a version
    Tags {
        /// Version (e.g., 30.2, master)
        #[arg(long)]
        version: String,
        /// Generate alpine tags
        #[arg(long)]
        alpine: bool,
    },
    /// Check if images should be pushed (true/false)
    ShouldPush {
        /// Git ref (e.g., refs/tags/v30.2, refs/heads/master)
        #[arg(long = "ref", env = "GITHUB_REF")]
        git_ref: String,
        /// Override: if set, will push this version (e.g., 30.2)
        #[arg(long)]
        version: Option<String>,
    },
    /// Add a new version
    Add {
        /// Version to add (e.g., 29.3, 31.0)
        version: String,
        /// Source version to copy from (default: same major or latest)
        from_version: Option<String>,
    },
    /// Deprecate an existing version
    Deprecate {
        /// Version to deprecate
        version: String,
    },
    /// List active versions
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose);

    let load_config = || Config::load(cli.config.as_deref());
    let open_layout = || -> anyhow::Result<Layout> {
        let config = load_config()?;
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        let root = resolve_repo_root(cli.repo_root.clone(), &cwd)?;
        Ok(Layout::new(root, config))
    };

    match cli.command {
        Command::Matrix { git_ref, version } => {
            let layout = open_layout()?;
            let dirs = layout.scan()?;
            let matrix = plan(
                &RefTrigger::parse(&git_ref),
                version.as_deref(),
                &dirs,
                &layout.config().build_excluded(),
            )?;
            println!("{}", matrix.to_json()?);
        }
        Command::Tags { version, alpine } => {
            let layout = open_layout()?;
            let target = TagTarget::parse(&version, &layout.config().master_dir)?;
            let known = layout.buildable_versions()?;
            let tags = derive_tags(
                target,
                Variant::from_alpine_flag(alpine),
                &known,
                &layout.config().image_repository,
            );
            println!("{}", tags.join(" "));
        }
        Command::ShouldPush { git_ref, version } => {
            let config = load_config()?;
            let push = should_push(
                &RefTrigger::parse(&git_ref),
                version.as_deref(),
                &config.master_dir,
            );
            println!("{}", push);
        }
        Command::Add {
            version,
            from_version,
        } => {
            let manager = VersionManager::new(open_layout()?);
            let outcome = manager.add(&version, from_version.as_deref())?;

            println!("Successfully added version {}", outcome.version);
            if outcome.auto_deprecated {
                println!("  (auto-deprecated {})", outcome.source);
            }
            println!("\nNext steps:");
            println!("  1. Review changes: git diff");
            println!("  2. Test build: docker build {}", outcome.target_dir.display());
            println!(
                "  3. Commit: git add -A && git commit -m 'Add v{}'",
                outcome.version
            );
        }
        Command::Deprecate { version } => {
            let manager = VersionManager::new(open_layout()?);
            let outcome = manager.deprecate(&version)?;

            println!("Successfully deprecated version {}", outcome.version);
            println!("\nNext steps:");
            println!("  1. Review changes: git diff");
            println!(
                "  2. Commit: git add -A && git commit -m 'Deprecate v{}'",
                outcome.version
            );
        }
        Command::List => {
            let manager = VersionManager::new(open_layout()?);
            println!("Active versions:");
            for listed in manager.list()? {
                let mut suffix = String::new();
                if listed.is_latest {
                    suffix.push_str(" (latest)");
                }
                if listed.is_release_candidate {
                    suffix.push_str(" (rc)");
                }
                println!("  {}{}", listed.name, suffix);
            }
        }
    }

    Ok(())
}
