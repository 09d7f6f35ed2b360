use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Builder;
use log::LevelFilter;
use quickpick::command::Command;
use quickpick::output::print_ranked;
use quickpick::picker::PickList;
use quickpick::rank::StrategyKind;
use quickpick::source::{load_entries_from, Entry, InputFormat, LoadOptions};
use quickpick::utils::{get_config_path, AppConfig, MAX_WIDTH};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use termcolor::ColorChoice;

#[derive(Parser)]
#[command(name = "quickpick")]
#[command(version, about = "Incremental fuzzy quick pick for lines of text")]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    pick: PickArgs,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Pick one line interactively and print it (default)
    Pick(PickArgs),
    /// Rank the input against a query and print the result
    Rank(RankArgs),
    /// Show or initialize the configuration file
    Config {
        /// Write the current configuration to disk
        #[arg(long)]
        init: bool,

        /// Config file to use instead of the default location
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Args)]
struct InputArgs {
    /// Input file; reads stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Comma separated column ids (JSON keys for --format json-lines)
    #[arg(short, long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Column ids shown but excluded from matching
    #[arg(long, value_delimiter = ',')]
    no_search: Vec<String>,

    /// Field delimiter for delimited input
    #[arg(short, long, default_value_t = '\t')]
    delimiter: char,

    /// Input line format
    #[arg(long, value_enum, default_value_t = InputFormat::Delimited)]
    format: InputFormat,

    /// Ranking strategy (overrides the config file)
    #[arg(short, long, value_enum)]
    strategy: Option<StrategyKind>,

    /// Minimum fast-select code width (overrides the config file)
    #[arg(long)]
    min_code_width: Option<usize>,

    /// Config file to use instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct PickArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Initial query
    #[arg(short, long)]
    query: Option<String>,
}

#[derive(Args)]
struct RankArgs {
    /// Query in the pick input grammar (`a | b`, `text/CODE`)
    query: String,

    #[command(flatten)]
    input: InputArgs,

    /// When to use colors
    #[arg(long, value_enum, default_value_t = ColorWhen::Auto)]
    color: ColorWhen,

    /// Print rows as JSON
    #[arg(long)]
    json: bool,

    /// Print at most this many rows
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorWhen {
    Auto,
    Always,
    Never,
}

impl ColorWhen {
    fn choice(self) -> ColorChoice {
        match self {
            ColorWhen::Auto if io::stdout().is_terminal() => ColorChoice::Auto,
            ColorWhen::Auto | ColorWhen::Never => ColorChoice::Never,
            ColorWhen::Always => ColorChoice::Always,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    let result = match cli.command {
        Some(Commands::Pick(args)) => run_pick(args),
        Some(Commands::Rank(args)) => run_rank(args),
        Some(Commands::Config { init, config }) => run_config(init, config.as_deref()),
        None => run_pick(cli.pick),
    };

    match result {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(2);
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

/// Load the input and wire it into a pick list
fn build_list(args: &InputArgs) -> Result<PickList<Arc<Entry>>> {
    let config = load_config(args.config.as_deref())?;

    let min_code_width = args.min_code_width.unwrap_or(config.min_codec_width);
    if min_code_width > MAX_WIDTH {
        bail!("--min-code-width must be at most {}, got {}", MAX_WIDTH, min_code_width);
    }

    if args.format == InputFormat::JsonLines && args.columns.is_empty() {
        bail!("--columns is required for json-lines input");
    }

    let options = LoadOptions {
        format: args.format,
        delimiter: args.delimiter,
        column_ids: args.columns.clone(),
    };
    let entries: Vec<Arc<Entry>> = load_entries_from(args.file.as_deref(), &options)?
        .into_iter()
        .map(Arc::new)
        .collect();

    let column_ids = if args.columns.is_empty() {
        let count = entries.iter().map(|e| e.fields.len()).max().unwrap_or(1).max(1);
        (1..=count).map(|n| format!("col{}", n)).collect()
    } else {
        args.columns.clone()
    };

    let strategy = args.strategy.unwrap_or(config.strategy).build(&config.weights);
    let mut list = PickList::new(
        move |_: &Command| Ok(entries.clone()),
        strategy,
        |entry: &Arc<Entry>| entry.line.clone(),
    )
    .with_options(config.rank_options())
    .with_min_codec_width(min_code_width);

    for (field, id) in column_ids.iter().enumerate() {
        let searchable = !args.no_search.contains(id);
        list.add_column(id.clone(), move |entry: &Arc<Entry>| entry.field(field).to_string())?
            .searchable(searchable);
    }

    for id in &args.no_search {
        list.column_index_for_id(id)
            .context("--no-search names a column that does not exist")?;
    }

    log::info!("columns: {}", column_ids.join(", "));
    Ok(list)
}

/// Returns false when the session ended without a selection
#[cfg(feature = "interactive")]
fn run_pick(args: PickArgs) -> Result<bool> {
    let list = build_list(&args.input)?;

    match quickpick::tui::run(list, args.query)? {
        Some(entry) => {
            println!("{}", entry.line);
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(not(feature = "interactive"))]
fn run_pick(_args: PickArgs) -> Result<bool> {
    bail!("built without the `interactive` feature; use `quickpick rank` instead")
}

fn run_rank(args: RankArgs) -> Result<bool> {
    let mut list = build_list(&args.input)?;
    let outcome = list.refresh(&args.query)?;

    // A complete fast-select code picks a single row
    if let Some(row) = outcome.selected_row {
        let entry = list.get(row - 1).context("selected row vanished")?;
        println!("{}", entry.item().line);
        return Ok(true);
    }

    let items = list.items();
    print_ranked(
        &items,
        list.columns(),
        list.codec(),
        args.color.choice(),
        args.json,
        args.limit,
    )
    .context("Failed to write results")?;

    Ok(!items.is_empty())
}

fn run_config(init: bool, path: Option<&Path>) -> Result<bool> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path()?,
    };
    let config = AppConfig::load_from(&path)?;

    if init {
        config.save_to(&path)?;
        println!("Wrote {}", path.display());
    } else {
        println!("# {}", path.display());
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(true)
}
