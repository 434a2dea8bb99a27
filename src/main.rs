use clap::{Parser, Subcommand};
use personal_site::{config, content, output, render};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "personal-site")]
#[command(about = "Static generator for a personal website and blog")]
#[command(long_about = "\
Static generator for a personal website and blog

Markdown files become pages. Articles under writing/ carry TOML front matter;
only articles with published = \"true\" appear on the site.

Content structure:

  content/
  ├── config.toml                     # Site config (optional)
  ├── index.md                        # Home page introduction (optional)
  ├── about.md                        # About page (optional)
  └── writing/                        # Articles, searched recursively
      ├── 2019-01-15-first-post.md    # Date prefix = fallback date
      └── docker-for-rails.md

Front matter:

  +++
  title = \"Docker for Rails Development\"
  published = \"true\"
  updated_at = 2019-03-02
  +++

The home page shows the three most recent published articles; /writing/
lists all of them, newest first.

Run 'personal-site gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Directory for intermediate files (content.json)
    #[arg(long, default_value = ".personal-site-temp", global = true)]
    temp_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load the content directory and write content.json
    Scan,
    /// Load content and config, then write the HTML site
    Build,
    /// Validate content directory and config without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let site = content::load(&cli.source)?;
            std::fs::create_dir_all(&cli.temp_dir)?;
            let content_path = cli.temp_dir.join("content.json");
            let json = serde_json::to_string_pretty(&site)?;
            std::fs::write(&content_path, json)?;
            output::print_content_output(&site, has_config(&cli.source));
        }
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site_config = config::load_config(&cli.source)?;
            let site = content::load(&cli.source)?;
            output::print_content_output(&site, has_config(&cli.source));

            println!("==> Generating HTML \u{2192} {}", cli.output.display());
            let report = render::generate(&site, &site_config, &cli.output)?;
            output::print_generate_output(&report);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            config::load_config(&cli.source)?;
            let site = content::load(&cli.source)?;
            output::print_content_output(&site, has_config(&cli.source));
            println!("==> Content is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Whether the source directory carries a `config.toml`.
fn has_config(source: &Path) -> bool {
    source.join(config::CONFIG_FILE).is_file()
}
