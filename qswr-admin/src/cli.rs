//! Command line interface.

use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;
use simplelog::LevelFilter;

pub const DEFAULT_URL: &str = "https://qswr.sa";

/// Work order administration for the QSWR backend.
#[derive(Debug, Parser)]
#[command(name = "qswr-admin", version, about)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "FRAPPE_URL", default_value = DEFAULT_URL, global = true)]
    pub url: String,

    /// Request timeout in seconds
    #[arg(long, env = "QSWR_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "debug", value_parser = parse_level, global = true)]
    pub log_level: LevelFilter,

    /// Keep the session, settings and logs under this directory
    #[arg(long, env = "QSWR_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

fn parse_level(value: &str) -> Result<LevelFilter, String> {
    value
        .parse::<LevelFilter>()
        .map_err(|_| format!("unknown log level {:?}", value))
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and remember the session
    Login {
        #[arg(short, long, env = "QSWR_USERNAME")]
        username: String,
        #[arg(short, long, env = "QSWR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the session (and end it on the backend when possible)
    Logout,
    /// Work order totals per status and the latest changes
    Dashboard,
    /// List, create, update, delete and export work orders
    Projects {
        #[command(subcommand)]
        command: ProjectsCommand,
    },
    /// Show the logged in user and check the session is still valid
    Profile,
}

#[derive(Debug, Subcommand)]
pub enum ProjectsCommand {
    /// Show one page of the projects table
    List(ListArgs),
    /// Show one work order with its line items
    Show {
        /// Document name
        name: String,
    },
    /// Create a work order
    Create(CreateArgs),
    /// Change fields of a work order
    Update(UpdateArgs),
    /// Delete one or more work orders
    Delete {
        /// Document names
        #[arg(required = true)]
        names: Vec<String>,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Export the filtered work orders
    Export(ExportArgs),
}

/// Table view options shared by `list` and `export`.
#[derive(Debug, Clone, Default, Args)]
pub struct ViewArgs {
    /// Search across all text columns. `list` remembers it for the next
    /// run; pass an empty value to forget it
    #[arg(short, long)]
    pub search: Option<String>,

    /// Column filter as KEY=VALUE; repeat for several values or columns
    #[arg(short, long = "filter", value_parser = parse_filter)]
    pub filters: Vec<(String, String)>,

    /// Sort by this column
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    /// Page number, starting at 1
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Rows per page (10, 25, 50 or 100); remembered for next time
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Mark these document names as selected
    #[arg(long = "select")]
    pub select: Vec<String>,

    /// Select every row of the shown page
    #[arg(long, conflicts_with = "select")]
    pub select_page: bool,

    /// Render only the rows of a virtual window
    #[arg(long = "virtual")]
    pub virtual_window: bool,

    /// Virtual window scroll offset
    #[arg(long, default_value_t = 0, requires = "virtual_window")]
    pub scroll: u32,

    /// Virtual window height
    #[arg(long, default_value_t = 400, requires = "virtual_window")]
    pub height: u32,

    /// Delete the selected rows after showing them
    #[arg(long, requires = "select")]
    pub delete_selected: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CreateArgs {
    /// Work order number
    #[arg(long)]
    pub wo_num: String,

    /// Customer name
    #[arg(long)]
    pub customer: String,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub job_type: Option<String>,

    #[arg(long)]
    pub district: Option<String>,

    /// Creation date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub create_date: Option<String>,

    #[arg(long)]
    pub team: Option<String>,

    /// Index date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub index_date: Option<String>,

    /// Line item as NAME:QTY:UNIT:PRICE[:DESCRIPTION]; repeatable
    #[arg(long = "item")]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Args)]
pub struct UpdateArgs {
    /// Document name
    pub name: String,

    #[arg(long)]
    pub status: Option<String>,

    #[arg(long)]
    pub customer: Option<String>,

    #[arg(long)]
    pub company: Option<String>,

    #[arg(long)]
    pub job_type: Option<String>,

    #[arg(long)]
    pub district: Option<String>,

    #[arg(long)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ExportArgs {
    #[command(flatten)]
    pub view: ViewArgs,

    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Output directory; remembered for next time
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    /// Export only these document names
    #[arg(long = "select")]
    pub select: Vec<String>,
}

fn parse_filter(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((key, val)) if !key.trim().is_empty() => Ok((key.trim().to_string(), val.trim().to_string())),
        _ => Err(format!("expected KEY=VALUE, got {:?}", value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults_to_dashboard() {
        let cli = Cli::try_parse_from(["qswr-admin"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_list_arguments() {
        let cli = Cli::try_parse_from([
            "qswr-admin",
            "projects",
            "list",
            "--search",
            "محمد",
            "-f",
            "status=مكتمل",
            "--sort",
            "modified",
            "--desc",
            "--page",
            "2",
        ])
        .unwrap();
        let Some(Command::Projects {
            command: ProjectsCommand::List(args),
        }) = cli.command
        else {
            panic!("expected projects list");
        };
        assert_eq!(args.view.search.as_deref(), Some("محمد"));
        assert_eq!(args.view.filters, vec![("status".to_string(), "مكتمل".to_string())]);
        assert!(args.view.desc);
        assert_eq!(args.page, 2);
    }

    #[test]
    fn test_bad_filter_is_rejected() {
        assert!(Cli::try_parse_from(["qswr-admin", "projects", "list", "-f", "status"]).is_err());
        assert_eq!(parse_filter(" job_type1 = بناء"), Ok(("job_type1".into(), "بناء".into())));
    }
}
