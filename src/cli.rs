//! Command-line interface.
//!
//! Argument types for the `pos-db` binary and the command runner. Kept in the
//! library so parsing can be tested directly.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use crate::config::{
    DbSettings, LogFormat, LogLevel, DEFAULT_POSITION_COLUMN, DEFAULT_PRIMARY_KEY,
    ENV_DATABASE_URL,
};
use crate::storage::{Database, Direction, Filter, OrderBy, PositionScope, SortOrder, Value};

/// Position maintenance for reorderable database records.
#[derive(Debug, Parser)]
#[command(name = "pos-db", version, about)]
pub struct Cli {
    /// Connection URL; falls back to DB_TYPE/DB_HOST/DB_USER/DB_NAME/DB_PASSWORD
    #[arg(long, env = ENV_DATABASE_URL)]
    pub database_url: Option<String>,

    /// Log level
    #[arg(long, value_enum, default_value = "info")]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value = "plain")]
    pub log_format: LogFormat,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// `pos-db` subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print rows as JSON lines
    List(ListArgs),
    /// Print the highest position in a scope
    MaxPos(ScopeArgs),
    /// Renumber a scope to 1..N
    Rebuild(RebuildArgs),
    /// Renumber a whole table to 1..N
    Reset(ResetArgs),
    /// Move the row at one position to another
    Move(MoveArgs),
    /// Reorder one row: dup, ddown, up or down
    Shift(ShiftArgs),
}

/// One `--where col=value` equality condition.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    /// Column name
    pub column: String,
    /// Value, integer when it parses as one
    pub value: Value,
}

/// Table plus optional scope conditions and column names.
#[derive(Debug, Args)]
pub struct ScopeArgs {
    /// Table name
    pub table: String,

    /// Scope condition, repeatable (AND)
    #[arg(long = "where", value_name = "COL=VALUE", value_parser = parse_condition)]
    pub conditions: Vec<Condition>,

    /// Position column
    #[arg(long, default_value = DEFAULT_POSITION_COLUMN)]
    pub column: String,

    /// Primary key column
    #[arg(long, default_value = DEFAULT_PRIMARY_KEY)]
    pub primary: String,
}

impl ScopeArgs {
    /// Conjunction of all conditions, `None` when there are none.
    pub fn filter(&self) -> Option<Filter> {
        conditions_filter(&self.conditions)
    }

    /// Position scope described by these arguments.
    pub fn scope(&self) -> PositionScope {
        let scope = PositionScope::new(self.table.as_str())
            .with_column(self.column.as_str())
            .with_primary(self.primary.as_str());
        match self.filter() {
            Some(filter) => scope.with_filter(filter),
            None => scope,
        }
    }
}

/// Arguments of `list`.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Table name
    pub table: String,

    /// Row condition, repeatable (AND)
    #[arg(long = "where", value_name = "COL=VALUE", value_parser = parse_condition)]
    pub conditions: Vec<Condition>,

    /// Ordering term, repeatable
    #[arg(long, value_name = "COL[:desc]", value_parser = parse_order_term)]
    pub order: Vec<(String, SortOrder)>,

    /// Maximum number of rows
    #[arg(long)]
    pub limit: Option<u64>,
}

/// Arguments of `rebuild`.
#[derive(Debug, Args)]
pub struct RebuildArgs {
    /// Scope to renumber
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Ordering term, repeatable; default is position then primary key
    #[arg(long, value_name = "COL[:desc]", value_parser = parse_order_term)]
    pub order: Vec<(String, SortOrder)>,
}

/// Arguments of `reset`.
#[derive(Debug, Args)]
pub struct ResetArgs {
    /// Table name
    pub table: String,

    /// Ordering term, repeatable; default is primary key
    #[arg(long, value_name = "COL[:desc]", value_parser = parse_order_term)]
    pub order: Vec<(String, SortOrder)>,

    /// Position column
    #[arg(long, default_value = DEFAULT_POSITION_COLUMN)]
    pub column: String,

    /// Primary key column
    #[arg(long, default_value = DEFAULT_PRIMARY_KEY)]
    pub primary: String,
}

/// Arguments of `move`.
#[derive(Debug, Args)]
pub struct MoveArgs {
    /// Scope the move happens in
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Current position
    pub from: i64,

    /// Target position
    pub to: i64,
}

/// Arguments of `shift`.
#[derive(Debug, Args)]
pub struct ShiftArgs {
    /// Scope the row is reordered in
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Primary key of the row to move
    #[arg(value_parser = parse_value)]
    pub id: Value,

    /// Direction
    #[arg(value_enum)]
    pub direction: Direction,

    /// Ordering term for the initial rebuild, repeatable
    #[arg(long, value_name = "COL[:desc]", value_parser = parse_order_term)]
    pub order: Vec<(String, SortOrder)>,
}

/// Parses `column=value`.
pub fn parse_condition(input: &str) -> Result<Condition, String> {
    let (column, value) = input
        .split_once('=')
        .ok_or_else(|| format!("expected COL=VALUE, got {input:?}"))?;
    let column = column.trim();
    if column.is_empty() {
        return Err(format!("missing column name in {input:?}"));
    }
    Ok(Condition {
        column: column.to_string(),
        value: Value::parse_loose(value),
    })
}

/// Parses `column` or `column:asc` / `column:desc`.
pub fn parse_order_term(input: &str) -> Result<(String, SortOrder), String> {
    let (column, direction) = match input.rsplit_once(':') {
        Some((column, direction)) => {
            let direction = match direction.to_ascii_lowercase().as_str() {
                "asc" => SortOrder::Asc,
                "desc" => SortOrder::Desc,
                other => return Err(format!("unknown sort direction {other:?}")),
            };
            (column, direction)
        }
        None => (input, SortOrder::Asc),
    };
    if column.is_empty() {
        return Err(format!("missing column name in {input:?}"));
    }
    Ok((column.to_string(), direction))
}

fn parse_value(input: &str) -> Result<Value, String> {
    Ok(Value::parse_loose(input))
}

fn conditions_filter(conditions: &[Condition]) -> Option<Filter> {
    match conditions {
        [] => None,
        [only] => Some(Filter::eq(only.column.as_str(), only.value.clone())),
        _ => Some(Filter::all(conditions.iter().map(|condition| {
            Filter::eq(condition.column.as_str(), condition.value.clone())
        }))),
    }
}

fn order_from(terms: &[(String, SortOrder)]) -> Option<OrderBy> {
    if terms.is_empty() {
        return None;
    }
    Some(terms.iter().cloned().collect())
}

/// Opens the database named by the CLI, or by the `DB_*` environment settings.
pub async fn open_database(cli: &Cli) -> Result<Database> {
    match &cli.database_url {
        Some(url) => Database::connect(url)
            .await
            .with_context(|| format!("Failed to connect to {url}")),
        None => {
            let settings = DbSettings::from_env().context("Invalid DB_* settings")?;
            Database::from_settings(settings)
                .await
                .context("Failed to connect using DB_* settings")
        }
    }
}

/// Runs the parsed command.
pub async fn run(cli: Cli) -> Result<()> {
    let db = open_database(&cli).await?;

    match &cli.command {
        Command::List(args) => {
            let filter = conditions_filter(&args.conditions);
            let order = order_from(&args.order);
            let rows = db
                .table_list(&args.table, filter.as_ref(), order.as_ref(), args.limit)
                .await
                .context("Failed to list rows")?;
            for row in &rows {
                println!("{}", serde_json::to_string(row)?);
            }
        }
        Command::MaxPos(args) => {
            let max = db
                .positions()
                .max_pos(&args.scope())
                .await
                .context("Failed to read max position")?;
            println!("{max}");
        }
        Command::Rebuild(args) => {
            let order = order_from(&args.order);
            db.positions()
                .rebuild_pos(&args.scope.scope(), order.as_ref())
                .await
                .context("Failed to rebuild positions")?;
        }
        Command::Reset(args) => {
            let scope = PositionScope::new(args.table.as_str())
                .with_column(args.column.as_str())
                .with_primary(args.primary.as_str());
            let order = order_from(&args.order);
            db.positions()
                .reset_pos(&scope, order.as_ref())
                .await
                .context("Failed to reset positions")?;
        }
        Command::Move(args) => {
            let moved = db
                .positions()
                .change_pos_from_to(&args.scope.scope(), args.from, args.to)
                .await
                .context("Failed to move row")?;
            if !moved {
                info!("Nothing moved: {} -> {}", args.from, args.to);
            }
            println!("{moved}");
        }
        Command::Shift(args) => {
            let order = order_from(&args.order);
            let changed = db
                .positions()
                .change_pos(
                    &args.scope.scope(),
                    args.id.clone(),
                    args.direction,
                    order.as_ref(),
                )
                .await
                .context("Failed to reorder row")?;
            println!("{changed}");
        }
    }

    db.close().await;
    Ok(())
}
