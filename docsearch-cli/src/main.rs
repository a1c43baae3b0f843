//! docsearch CLI - symbol lookup for generated documentation sites
//!
//! Hosts the search widget outside a browser:
//! - One-shot queries printed as text, JSON, or the HTML results table (`query`)
//! - A live, search-as-you-type terminal UI (`interactive`)
//! - Configuration management (`config`)
//! - Shell completions (`completions`)

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use docsearch_core::{
    DocsearchConfig, HtmlTable, IndexFormat, KeyCode, MatchMode, ResultRow, SearchWidget,
    SymbolIndex, Visibility,
};
use tracing::debug;

mod config;
mod tracing_setup;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "docsearch",
    author,
    version,
    about = "Search the symbol index of a generated documentation site",
    long_about = "Look up functions, types, fields and modules in a documentation site's \
                  prebuilt search index. Queries are case-insensitive regular expressions."
)]
struct Cli {
    /// Symbol index (generated search.js or JSON item list)
    #[arg(long, short = 'i', global = true, env = "DOCSEARCH_INDEX", value_name = "PATH")]
    index: Option<PathBuf>,

    /// Index format (detected from content when omitted)
    #[arg(long, global = true, value_enum)]
    index_format: Option<IndexFormatArg>,

    /// Config file (default: ~/.docsearch/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single query and print what the results container would show
    Query(QueryArgs),
    /// Search-as-you-type terminal interface
    Interactive(InteractiveArgs),
    /// Manage docsearch configuration (init, show, path)
    Config(config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct QueryArgs {
    /// Query text, interpreted as a regular expression
    #[arg(value_name = "QUERY", allow_hyphen_values = true)]
    query: String,

    /// Key code of the triggering key event (27 = escape)
    #[arg(long, value_name = "CODE")]
    key: Option<u32>,

    /// Match the query as plain text instead of a pattern
    #[arg(long)]
    literal: bool,

    /// Output format
    #[arg(long, short = 'o', value_enum, default_value = "text")]
    output: OutputFormat,
}

#[derive(Parser, Debug)]
struct InteractiveArgs {
    /// Match the query as plain text instead of a pattern
    #[arg(long)]
    literal: bool,

    /// Start with this query already typed
    #[arg(long, value_name = "QUERY")]
    initial: Option<String>,
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum IndexFormatArg {
    Json,
    Script,
}

impl From<IndexFormatArg> for IndexFormat {
    fn from(arg: IndexFormatArg) -> Self {
        match arg {
            IndexFormatArg::Json => IndexFormat::Json,
            IndexFormatArg::Script => IndexFormat::Script,
        }
    }
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
enum OutputFormat {
    /// One tab-separated line per row
    #[default]
    Text,
    /// Container state as JSON
    Json,
    /// The rendered results table
    Html,
}

/// Where the index comes from, after flags, env and config are merged
struct IndexSource {
    path: PathBuf,
    format: Option<IndexFormat>,
}

fn resolve_index(
    cli_index: Option<PathBuf>,
    cli_format: Option<IndexFormatArg>,
    config: &DocsearchConfig,
) -> Result<IndexSource> {
    let path = match cli_index.or_else(|| config.index.path.clone()) {
        Some(path) => path,
        None => bail!(
            "No symbol index given.\n\nPass --index <PATH>, set DOCSEARCH_INDEX, or set index.path in {:?}",
            DocsearchConfig::config_path()
        ),
    };
    let format = cli_format.map(IndexFormat::from).or(config.index.format);
    Ok(IndexSource { path, format })
}

fn load_index(source: &IndexSource) -> Result<SymbolIndex> {
    SymbolIndex::load(&source.path, source.format)
        .with_context(|| format!("Failed to load symbol index {:?}", source.path))
}

fn load_config(path: Option<&PathBuf>) -> Result<DocsearchConfig> {
    match path {
        Some(path) => DocsearchConfig::load_from(path),
        None => DocsearchConfig::load(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let tracing_config = tracing_setup::TracingConfig {
        debug: cli.debug,
        silent: matches!(cli.command, Commands::Interactive(_)),
    };
    tracing_setup::init(&tracing_config).ok();

    match cli.command {
        Commands::Query(args) => {
            let config = load_config(cli.config.as_ref())?;
            let source = resolve_index(cli.index, cli.index_format, &config)?;
            run_query(args, &source, &config)?
        }
        Commands::Interactive(args) => {
            let config = load_config(cli.config.as_ref())?;
            let source = resolve_index(cli.index, cli.index_format, &config)?;
            run_interactive(args, &source, &config)?
        }
        Commands::Config(args) => config::run_config(args, cli.config, cli.index)?,
        Commands::Completions(args) => run_completions(args)?,
    }
    Ok(())
}

fn build_matcher(config: &DocsearchConfig, literal: bool) -> docsearch_core::Matcher {
    let mut config = config.clone();
    if literal {
        config.search.mode = MatchMode::Literal;
    }
    config.matcher()
}

fn run_query(args: QueryArgs, source: &IndexSource, config: &DocsearchConfig) -> Result<()> {
    let index = load_index(source)?;
    let matcher = build_matcher(config, args.literal);
    let table = HtmlTable::new(config.render.container_id.clone());
    let mut widget = SearchWidget::with_matcher(index, matcher, table);

    widget.update(&args.query, args.key.map(KeyCode))?;

    let table = widget.into_presenter();
    let container = table.container();
    debug!(
        visibility = ?container.visibility(),
        rows = container.row_count(),
        "query finished"
    );

    match args.output {
        OutputFormat::Text => {
            if container.visibility() == Visibility::Hidden {
                return Ok(());
            }
            for row in container.rows() {
                match row {
                    ResultRow::Link(link) => println!("{}\t{}\t{}", link.id, link.text, link.href),
                    ResultRow::Placeholder { text } => println!("{}", text),
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(container)?);
        }
        OutputFormat::Html => {
            println!("{}", table.render());
        }
    }
    Ok(())
}

fn run_interactive(
    args: InteractiveArgs,
    source: &IndexSource,
    config: &DocsearchConfig,
) -> Result<()> {
    let index = load_index(source)?;
    let matcher = build_matcher(config, args.literal);
    let widget = SearchWidget::with_matcher(index, matcher, Default::default());

    let mut app = tui::App::new(widget);
    if let Some(initial) = args.initial {
        app.set_input(&initial);
    }

    if let Some(link) = tui::run(app)? {
        println!("{}", link.href);
    }
    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
