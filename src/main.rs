// src/main.rs

use bevy::{
    log::LogPlugin,
    prelude::*,
    window::WindowPlugin,
    winit::{UpdateMode, WinitSettings},
};
use bevy_egui::EguiPlugin;
use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

mod cli;
mod credentials;
mod settings;
mod sheets;
mod ui;

use cli::Cli;
use settings::{AppSettings, SettingsOverrides};
use sheets::SheetsPlugin;
use ui::EditorUiPlugin;

fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let overrides = cli.store.to_overrides();

    match cli.command {
        Some(command) => {
            cli::init_logging(cli.verbose);
            match cli::run(command, &overrides) {
                Ok(()) => ExitCode::SUCCESS,
                Err(e) => {
                    eprintln!("Error: {}", e);
                    ExitCode::FAILURE
                }
            }
        }
        None => run_editor(&overrides, cli.verbose),
    }
}

fn run_editor(overrides: &SettingsOverrides, verbose: bool) -> ExitCode {
    let settings = match AppSettings::resolve(overrides) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let level = if verbose { bevy::log::Level::DEBUG } else { bevy::log::Level::INFO };

    let exit = App::new()
        .insert_resource(WinitSettings {
            focused_mode: UpdateMode::Continuous,
            unfocused_mode: UpdateMode::reactive_low_power(Duration::from_secs_f32(1.0 / 5.0)),
        })
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "SheetBridge".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level,
                    filter: "wgpu=error,naga=warn,hyper=warn,reqwest=warn".to_string(),
                    ..default()
                }),
        )
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(SheetsPlugin::new(settings))
        .add_plugins(EditorUiPlugin)
        .run();

    match exit {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    }
}
