use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use erp_core::VERSION;

/// ERP - local records, finance ledger and dashboards for a small business
#[derive(Parser)]
#[command(name = "erp")]
#[command(author, version = VERSION, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Storage backend (file, sqlite or memory)
    #[arg(long, global = true, env = "ERP_ADAPTER", value_name = "ADAPTER")]
    pub adapter: Option<String>,

    /// Data directory (file adapter) or database file (sqlite adapter)
    #[arg(long, global = true, env = "ERP_DATA", value_name = "PATH")]
    pub data: Option<String>,

    /// Reference date for month windows and summaries (YYYY-MM-DD)
    #[arg(long, global = true, value_name = "DATE")]
    pub today: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Quiet mode (minimal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log storage activity to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Use ASCII symbols only
    #[arg(long, global = true)]
    pub ascii: bool,
}

/// Arguments for the `init` command
#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing config file
    #[arg(long)]
    pub force: bool,

    /// Config path override
    #[arg(long, value_name = "PATH")]
    pub config_path: Option<String>,
}

/// Arguments for the `list` command
#[derive(Args)]
pub struct ListArgs {
    /// Entity kind (sales, purchases, contacts, products, users, finance)
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Only records dated in this month (YYYY-MM)
    #[arg(long, value_name = "MONTH")]
    pub month: Option<String>,

    /// Only records in this tab (e.g. vendas, servicos, recebimentos)
    #[arg(long)]
    pub tab: Option<String>,

    /// Case-insensitive text search
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Finance settlement filter (todos, pendente, quitado)
    #[arg(long)]
    pub status: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Output format (table, plain)
    #[arg(long, value_name = "FORMAT")]
    pub format: Option<String>,
}

/// Arguments for the `show` command
#[derive(Args)]
pub struct ShowArgs {
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Record contents given on the command line.
#[derive(Args)]
pub struct RecordInput {
    /// Whole record (or patch) as a JSON object
    #[arg(long, value_name = "JSON", conflicts_with = "field")]
    pub json: Option<String>,

    /// Single field: `name=text` sets a string, `name:=json` sets a raw JSON value
    #[arg(long, short = 'f', value_name = "FIELD")]
    pub field: Vec<String>,
}

/// Arguments for the `add` command
#[derive(Args)]
pub struct AddArgs {
    #[arg(value_name = "KIND")]
    pub kind: String,

    #[command(flatten)]
    pub input: RecordInput,
}

/// Arguments for the `update` command
#[derive(Args)]
pub struct UpdateArgs {
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Record ID
    #[arg(value_name = "ID")]
    pub id: String,

    #[command(flatten)]
    pub input: RecordInput,
}

/// Arguments for the `remove` command
#[derive(Args)]
pub struct RemoveArgs {
    #[arg(value_name = "KIND")]
    pub kind: String,

    /// Record IDs
    #[arg(value_name = "ID", required = true)]
    pub ids: Vec<String>,
}

/// Arguments for the `reset` command
#[derive(Args)]
pub struct ResetArgs {
    #[arg(value_name = "KIND")]
    pub kind: String,
}

/// Arguments for the `summary` command
#[derive(Args)]
pub struct SummaryArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `dashboard` command
#[derive(Args)]
pub struct DashboardArgs {
    /// Month to report (YYYY-MM, defaults to the month of --today)
    #[arg(long, value_name = "MONTH")]
    pub month: Option<String>,

    /// Length of the daily net series
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `favorites` command
#[derive(Args)]
pub struct FavoritesArgs {
    #[command(subcommand)]
    pub command: FavoritesSubcommand,
}

#[derive(Subcommand)]
pub enum FavoritesSubcommand {
    /// List starred reports
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Star or unstar a report
    Toggle {
        #[arg(value_name = "REPORT")]
        report: String,
    },
}

/// Arguments for the `doctor` command
#[derive(Args)]
pub struct DoctorArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `completions` command
#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write a config file selecting the storage backend
    Init(InitArgs),

    /// List records of one kind
    List(ListArgs),

    /// Show one record
    Show(ShowArgs),

    /// Add a record
    Add(AddArgs),

    /// Change fields of a record
    Update(UpdateArgs),

    /// Remove records
    Remove(RemoveArgs),

    /// Drop the stored collection so the next run starts from the defaults
    Reset(ResetArgs),

    /// Receivables and payables due today and this week
    Summary(SummaryArgs),

    /// Month result, KPIs, chart data and alerts
    Dashboard(DashboardArgs),

    /// Manage starred reports
    Favorites(FavoritesArgs),

    /// Check configuration and stored data
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}
