use clap::{Parser, Subcommand};
use magic_docs::index::{ContentIndex, PageRange, check_content};
use magic_docs::logging::{LogFormat, init_logging};
use magic_docs::types::SortType;
use magic_docs::{changelog, config, headings, output, roadmap, seo};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "magic-docs")]
#[command(about = "Inspect the content tree of an MDX documentation site")]
#[command(long_about = "\
Inspect the content tree of an MDX documentation site

The filesystem is the data source. Every .mdx file is a page, its first
directory is its section, and optional meta.json files pin the order.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── meta.json                    # {\"pages\": {\"introduction\": 1}, \"sections\": {\"get-started\": 1}}
  ├── changelog.json               # Changelog entries (optional)
  ├── roadmap.json                 # Roadmap boards (optional)
  ├── introduction.mdx             # Top-level page
  └── get-started/                 # Section
      ├── meta.json                # {\"pages\": {\"installation\": 1}}
      ├── installation.mdx         # slug get-started/installation
      └── theming.mdx

Front matter (YAML between --- fences):
  title, summary, image, publishedAt, updatedAt, order,
  tag / navTag, tagLabel / navLabel, navIcon, navTagVariant

Set MAGIC_DOCS_LOG (e.g. magic_docs=debug) to override -v.
Run 'magic-docs gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Human, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

/// Shared ordering flag.
#[derive(clap::Args, Clone, Copy)]
struct SortArgs {
    /// Page ordering
    #[arg(long, value_enum, default_value_t = SortType::Order)]
    sort: SortType,
}

#[derive(Subcommand)]
enum Command {
    /// List every page
    Pages(SortArgs),
    /// List pages grouped by section
    Sections(SortArgs),
    /// Show the previous and next page of a page
    Adjacent {
        slug: String,
        #[command(flatten)]
        sort: SortArgs,
    },
    /// Print the sidebar navigation tree
    Nav,
    /// Newest pages under a path, optionally windowed (1-based, inclusive)
    List {
        /// Slug prefix, e.g. "components"; all pages when omitted
        #[arg(default_value = "")]
        prefix: String,
        /// First position to show
        #[arg(long)]
        from: Option<usize>,
        /// Last position to show
        #[arg(long, requires = "from")]
        to: Option<usize>,
    },
    /// Print the on-page table of contents of a page
    Toc { slug: String },
    /// Show title, URL, image and JSON-LD for a page, or home/roadmap/changelog
    Meta {
        target: String,
        /// Print the JSON-LD object
        #[arg(long)]
        json_ld: bool,
    },
    /// Show the roadmap boards
    Roadmap {
        /// Read boards from this JSON file instead of the configured source
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Show the changelog
    Changelog,
    /// Dump every page as JSON
    Index,
    /// Validate the content directory and config
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.verbose);

    let index = ContentIndex::new(&cli.source);

    match cli.command {
        Command::Pages(args) => {
            output::print_pages(&index.sorted_pages(args.sort));
        }
        Command::Sections(args) => {
            output::print_sections(&index.sections(args.sort));
        }
        Command::Adjacent { slug, sort } => {
            let adjacent = index.try_adjacent_pages(&slug, sort.sort)?;
            output::print_adjacent(&slug, &adjacent);
        }
        Command::Nav => {
            output::print_navigation(&index.navigation());
        }
        Command::List { prefix, from, to } => {
            let range = match (from, to) {
                (Some(from), Some(to)) => PageRange::Between(from, to),
                (Some(from), None) => PageRange::From(from),
                _ => PageRange::All,
            };
            output::print_pages(&index.page_list(&prefix, range));
        }
        Command::Toc { slug } => {
            let page = index
                .find_page(&slug)
                .ok_or_else(|| format!("no page with slug '{slug}'"))?;
            output::print_headings(&headings::extract_headings(&page.content));
        }
        Command::Meta { target, json_ld } => {
            let site = config::load_config(&cli.source)?;
            let meta = match target.as_str() {
                "home" | "/" => seo::home_meta(&site),
                "roadmap" => seo::roadmap_meta(&site).ok_or("the roadmap route is disabled")?,
                "changelog" => {
                    seo::changelog_meta(&site).ok_or("the changelog route is disabled")?
                }
                slug => {
                    let page = index
                        .find_page(slug)
                        .ok_or_else(|| format!("no page with slug '{slug}'"))?;
                    seo::page_meta(&site, &page)
                }
            };
            if json_ld {
                println!("{}", serde_json::to_string_pretty(&meta.json_ld(&site))?);
            } else {
                output::print_page_meta(&meta);
            }
        }
        Command::Roadmap { file } => {
            let site = config::load_config(&cli.source)?;
            let boards = match file {
                Some(path) => roadmap::fetch_with_fallback(
                    &roadmap::FileRoadmap::new(path),
                    &roadmap::StaticRoadmap,
                )?,
                None => roadmap::load_roadmap(&cli.source, &site.roadmap)?,
            };
            output::print_roadmap(&boards);
        }
        Command::Changelog => {
            output::print_changelog(&changelog::load_changelog(&cli.source)?);
        }
        Command::Index => {
            let pages = index.sorted_pages(SortType::Order);
            println!("{}", serde_json::to_string_pretty(&pages)?);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = config::load_config(&cli.source)?;
            info!(base_url = %site.base_url, "config ok");

            let problems = check_content(&cli.source);
            for problem in &problems {
                println!("    {}", problem);
            }
            changelog::load_changelog(&cli.source)?;
            roadmap::configured_source(&cli.source, &site.roadmap).fetch_roadmap()?;

            if !problems.is_empty() {
                return Err(format!("{} problem(s) found", problems.len()).into());
            }
            let pages = index.list_pages();
            println!("==> {} pages, content is valid", pages.len());
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
