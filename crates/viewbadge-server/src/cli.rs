//! Command-line interface for the `viewbadge-server` binary.

use std::io::Write;

use clap::{Parser, Subcommand};

use viewbadge_core::error::{Result, ViewBadgeError};

use crate::config::{ServerConfig, StoreSettings};
use crate::store::increment_function_sql;

/// Profile-view badge server.
#[derive(Parser, Debug)]
#[command(name = "viewbadge-server", disable_help_subcommand = true)]
pub struct Cli {
    /// YAML config path (overrides `VIEWBADGE_CONFIG`).
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,
    /// Subcommand; serves the badge endpoint when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Print the DDL for the atomic increment function and exit.
    PrintSql,
}

/// Write the increment function DDL for the configured table to `out`.
/// Nothing but the SQL is written.
pub fn write_increment_sql(
    cfg: &ServerConfig,
    settings: &StoreSettings,
    out: &mut impl Write,
) -> Result<()> {
    let valid = settings.validate()?;
    let sql = increment_function_sql(
        &valid.table,
        &cfg.counter.rpc_function,
        cfg.store.id_type,
    );
    out.write_all(sql.as_bytes())
        .and_then(|()| out.flush())
        .map_err(|e| ViewBadgeError::Internal(format!("write sql failed: {e}")))
}
