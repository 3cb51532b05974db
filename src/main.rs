use clap::{Parser as ClapParser, Subcommand};
use olap_mdx::cli::{self, CliError, RegionOptions, RenderOptions};
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(ClapParser)]
#[command(name = "mdx")]
#[command(about = "Render MDX queries and resolve cache regions for OLAP engines")]
#[command(version)]
struct Cli {
    /// Log debug output (overridden by MDX_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a JSON query document as MDX
    Render {
        /// Query document file
        #[arg(short, long, conflicts_with = "input")]
        file: Option<PathBuf>,

        /// Query document text (reads from stdin if neither is given)
        #[arg(short, long)]
        input: Option<String>,
    },

    /// Resolve a cache region and print the flush scope
    Region {
        /// Cube the flush targets
        #[arg(short, long)]
        cube: String,

        /// Hierarchy then path segments, comma-separated (repeatable)
        #[arg(short, long = "segments")]
        segments: Vec<String>,

        /// Fully-qualified member names (repeatable)
        #[arg(short, long = "names")]
        names: Vec<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'mdx docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Render { file, input } => run_render(file, input),
        Commands::Region {
            cube,
            segments,
            names,
            pretty,
        } => run_region(cube, segments, names, pretty),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("MDX_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run_render(file: Option<PathBuf>, input: Option<String>) -> Result<(), CliError> {
    let input = match (file, input) {
        (Some(path), _) => Some(std::fs::read_to_string(path)?),
        (None, Some(s)) => Some(s),
        (None, None) if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Some(buffer)
        }
        (None, None) => None,
    };

    let mdx = cli::execute_render(&RenderOptions { input })?;
    println!("{}", mdx);
    Ok(())
}

fn run_region(
    cube: String,
    segments: Vec<String>,
    names: Vec<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let options = RegionOptions {
        cube,
        segments,
        names,
    };

    let scope = cli::execute_region(&options)?;
    let json = if pretty {
        serde_json::to_string_pretty(&scope)
    } else {
        serde_json::to_string(&scope)
    }?;
    println!("{}", json);
    Ok(())
}
