// src/cli/mod.rs
// Headless commands that run one core operation and exit

pub mod configure;
pub mod table_ops;
pub mod token;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::{default, App};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::settings::{AppSettings, BackendKind, SettingsOverrides};
use crate::sheets::{remote, SheetResult, SheetSession};

#[derive(Parser)]
#[command(name = "sheetbridge", version)]
#[command(about = "SheetBridge - view and edit one remote spreadsheet as a table", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    /// Log core activity at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Runs the editor window when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Debug, Default)]
pub struct StoreArgs {
    /// Title of the sheet to open; created with a default header when missing
    #[arg(long, global = true)]
    pub sheet: Option<String>,

    /// Stable key of an existing sheet (wins over --sheet)
    #[arg(long = "sheet-key", global = true)]
    pub sheet_key: Option<String>,

    /// Where the sheet lives
    #[arg(long, value_enum, global = true)]
    pub backend: Option<BackendKind>,

    /// Database file for the sqlite backend
    #[arg(long = "sqlite-path", global = true)]
    pub sqlite_path: Option<PathBuf>,
}

impl StoreArgs {
    pub fn to_overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            sheet_name: self.sheet.clone(),
            sheet_key: self.sheet_key.clone(),
            backend: self.backend,
            sqlite_path: self.sqlite_path.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the sheet as a table
    Show {
        /// Print only this row, one column per line
        #[arg(long)]
        row: Option<usize>,
    },

    /// Print the sheet's title, key, URL and shape
    Info,

    /// Append a row; values follow the column order
    AddRow {
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
    },

    /// Replace one cell
    EditCell {
        /// Zero-based row index
        row: usize,
        /// Column name, as shown in the header
        column: String,
        value: String,
    },

    /// Write the default header into a sheet that has no rows at all
    InitHeader,

    /// Manage the Google access token kept in the OS keyring
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Save the effective sheet and backend selection as the defaults
    Configure,
}

#[derive(Subcommand)]
pub enum TokenAction {
    /// Store a bearer token
    Set { token: String },
    /// Remove the stored token
    Clear,
    /// Report where the token would be read from
    Status,
}

/// Installs the same log subscriber the editor uses, on a throwaway app.
pub fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    App::new().add_plugins(LogPlugin {
        level,
        filter: "hyper=warn,reqwest=warn".to_string(),
        ..default()
    });
}

pub fn run(command: Commands, overrides: &SettingsOverrides) -> SheetResult<()> {
    match command {
        Commands::Show { row } => table_ops::show(&mut open_session(overrides)?, row),
        Commands::Info => table_ops::info(&mut open_session(overrides)?),
        Commands::AddRow { values } => table_ops::add_row(&mut open_session(overrides)?, values),
        Commands::EditCell { row, column, value } => {
            table_ops::edit_cell(&mut open_session(overrides)?, row, &column, value)
        }
        Commands::InitHeader => table_ops::init_header(&mut open_session(overrides)?),
        Commands::Token { action } => token::run(action),
        Commands::Configure => configure::run(overrides),
    }
}

fn open_session(overrides: &SettingsOverrides) -> SheetResult<SheetSession> {
    let settings = AppSettings::resolve(overrides)?;
    let store = remote::connect(&settings)?;
    SheetSession::open(store, &settings.store)
}
