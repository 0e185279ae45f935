use clap::{Parser, Subcommand};
use sitemake::{build, frontmatter, output, render, rules, scaffold};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sitemake")]
#[command(about = "Minimal static site builder driven by a dependency graph")]
#[command(long_about = "\
Minimal static site builder driven by a dependency graph

Every build derives a make-style plan from the site root and executes it:
page sources compile into _build/, final pages and copied files land in
_install/, and `deps` shows the exact plan `make` would run.

Site structure:

  <root>/
  ├── pages/                       # Page sources (`source/` works too)
  │   ├── index.md                 # Front matter between `--` lines
  │   └── notes/one.md             # Installs at _install/notes/one.html
  ├── templates/
  │   └── current/                 # Active theme
  │       ├── default.tpl          # Frames every page, (( )) variables
  │       └── assets/              # Installed under _install/theme/
  ├── css/                         # Any other directory is copied as-is
  ├── posts/                       # Reserved, not yet built
  ├── _build/                      # Intermediate fragments (generated)
  └── _install/                    # The finished site (generated)

Templates receive `content` (the page fragment), `site.root_dir` (relative
prefix back to the install root), and `page` (the front-matter mapping).

Run 'sitemake init' to scaffold this structure with a working example.")]
#[command(version)]
struct Cli {
    /// Site root directory
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scaffold a site root with a sample page and theme
    Init,
    /// Print the dependency graph `make` would execute
    Deps {
        /// Emit the graph as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Build the whole site into _install/
    Make,
    /// Convert one markdown file to an HTML fragment, outside the graph
    Preprocess {
        /// Markdown input file
        #[arg(short, long)]
        input: PathBuf,
        /// Fragment output file
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Init => {
            let report = scaffold::init_site(&cli.root)?;
            output::print_init(&report);
        }
        Command::Deps { json } => {
            let graph = rules::plan(&cli.root)?;
            if json {
                println!("{}", output::format_deps_json(&graph)?);
            } else {
                output::print_deps(&graph);
            }
        }
        Command::Make => {
            let graph = rules::plan(&cli.root)?;
            let report = build::build(&graph, &cli.root)?;
            output::print_build_summary(&report);
        }
        Command::Preprocess {
            input,
            output: destination,
        } => {
            preprocess(&input, &destination)?;
        }
    }

    Ok(())
}

/// Convert a single markdown file, stripping front matter the way the
/// page pipeline does, so the fragment matches what `make` would place in
/// `_build/`.
fn preprocess(input: &Path, destination: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(input)?;
    let (_front, body) = frontmatter::extract(&text)?;
    let fragment = render::markdown_to_html(body);
    if let Some(parent) = destination.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(destination, fragment)?;
    Ok(())
}
