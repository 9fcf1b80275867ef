use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCameraPlugin;
use clap::Parser;
use newtonlab::cli::{Args, load_and_apply_config, log_filter};
use newtonlab::{
    CameraPlugin, ControlsPlugin, HudPlugin, LearningMode, ScenePlugin, SimulationPlugin,
};

fn main() -> AppExit {
    let args = Args::parse();

    let config = match load_and_apply_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return AppExit::error();
        }
    };

    if args.print_config {
        return match config.to_toml() {
            Ok(toml_string) => {
                println!("{toml_string}");
                AppExit::Success
            }
            Err(e) => {
                eprintln!("Error: {e}");
                AppExit::error()
            }
        };
    }

    let mut learning = LearningMode::default();
    if args.learning {
        learning.toggle();
    }

    let mut app = App::new();
    app.insert_resource(config);
    app.insert_resource(learning);

    app.add_plugins((
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "NewtonLab 3D".to_string(),
                    ..default()
                }),
                ..default()
            })
            .set(LogPlugin {
                filter: log_filter(&args),
                level: if args.verbose {
                    Level::DEBUG
                } else {
                    Level::INFO
                },
                ..default()
            }),
        PanOrbitCameraPlugin,
        SimulationPlugin,
        ScenePlugin,
        CameraPlugin,
        ControlsPlugin,
        HudPlugin,
    ));

    app.run()
}
