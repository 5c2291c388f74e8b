use clap::{Parser, Subcommand};
use press::config::{self, ConfigOverrides};
use press::{output, pipeline};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "press")]
#[command(about = "Static site builder for a personal website")]
#[command(long_about = "\
Static site builder for a personal website

Markdown pages with YAML front matter become HTML pages. The `format` key
decides what happens to each page:

  standard      rendered in the site layout
  blog_entry    rendered with a table of contents, listed in blog.html
  resume_part   assembled into resume.html by its `id`
                (skills, work_experience, side_projects)
  anything else skipped

Source structure:

  pages/
  ├── about.md                 # → build/about.html
  ├── blog/
  │   └── hello.md             # → build/blog/hello.html, listed in build/blog.html
  └── resume/
      └── skills.md            # → a section of build/resume.html
  assets/
  ├── style.css                # → build/assets/style.<version>.css
  └── resume.pdf               # → build/assets/resume.pdf

Run 'press gen-config' to generate a documented press.toml.")]
#[command(version)]
struct Cli {
    /// Config file [default: press.toml, if present]
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Markdown pages directory
    #[arg(long, global = true)]
    pages_directory: Option<PathBuf>,

    /// Static assets directory
    #[arg(long, global = true)]
    assets_directory: Option<PathBuf>,

    /// Output directory
    #[arg(long, global = true)]
    build_directory: Option<PathBuf>,

    /// Keep asset file names as they are
    #[arg(long, global = true)]
    no_asset_versioning: bool,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            pages_dir: self.pages_directory.clone(),
            assets_dir: self.assets_directory.clone(),
            build_dir: self.build_directory.clone(),
            no_asset_versioning: self.no_asset_versioning,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Build the site: assets, pages, blog index and resume
    Generate,
    /// Validate every page without writing anything
    Check,
    /// Print a stock press.toml with all options documented
    GenConfig,
}

/// `RUST_LOG` wins when it parses; otherwise `info`, or `debug` with `--verbose`.
fn log_filter(rust_log: Option<&str>, verbose: bool) -> EnvFilter {
    let level = if verbose { "debug" } else { "info" };
    rust_log
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(level))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(log_filter(rust_log.as_deref(), cli.verbose))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Command::Generate => {
            let config = config::load_config(cli.config.as_deref(), &cli.overrides())?;
            println!("==> Building {}", config.build_dir.display());
            let report = pipeline::build(&config)?;
            output::print_build_report(&report);
            println!("==> Build complete: {}", config.build_dir.display());
        }
        Command::Check => {
            let config = config::load_config(cli.config.as_deref(), &cli.overrides())?;
            println!("==> Checking {}", config.pages_dir.display());
            let documents = pipeline::check(&config)?;
            output::print_check(&documents);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::level_filters::LevelFilter;

    #[test]
    fn rust_log_level_is_honoured() {
        let filter = log_filter(Some("warn"), false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));

        let filter = log_filter(Some("warn"), true);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }

    #[test]
    fn default_level_follows_verbose() {
        assert_eq!(log_filter(None, false).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(log_filter(None, true).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn unparseable_rust_log_falls_back() {
        let filter = log_filter(Some("press=loud"), false);
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
