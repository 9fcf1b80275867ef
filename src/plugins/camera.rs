//! Camera plugin - Self-contained plugin pattern
//!
//! This plugin handles camera and light setup. The camera starts above and
//! behind the orbital plane, looking at the primary, and is driven by
//! pan/orbit controls from there.

use crate::prelude::*;
use bevy::core_pipeline::bloom::Bloom;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy_panorbit_camera::PanOrbitCamera;
use bevy_panorbit_camera::TouchControls;
use bevy_panorbit_camera::TrackpadBehavior;

const CAMERA_START: Vec3 = Vec3::new(0.0, 70.0, 110.0);
const BACKGROUND_COLOR: Color = Color::srgb(0.004, 0.008, 0.031);

/// Plugin that handles camera setup and control
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(AmbientLight {
            color: Color::WHITE,
            brightness: 300.0,
            ..default()
        });
        app.add_systems(Startup, (spawn_camera, spawn_lights));
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((
        Name::new("Main Camera"),
        Camera {
            clear_color: ClearColorConfig::Custom(BACKGROUND_COLOR),
            hdr: true,
            ..default()
        },
        Camera3d::default(),
        Tonemapping::AcesFitted,
        Bloom::NATURAL,
        Msaa::Sample4,
        Transform::from_translation(CAMERA_START).looking_at(Vec3::ZERO, Vec3::Y),
        PanOrbitCamera {
            focus: Vec3::ZERO,
            pan_smoothness: 0.0,
            zoom_lower_limit: 10.0,
            zoom_upper_limit: Some(200.0),
            touch_enabled: true,
            touch_controls: TouchControls::OneFingerOrbit,
            trackpad_behavior: TrackpadBehavior::blender_default(),
            trackpad_pinch_to_zoom_enabled: true,
            ..default()
        },
    ));
}

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        Name::new("Key Light"),
        DirectionalLight {
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(100.0, 100.0, 100.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        Name::new("Fill Light"),
        PointLight {
            intensity: 2_000_000.0,
            range: 200.0,
            ..default()
        },
        Transform::from_xyz(-50.0, 0.0, -50.0),
    ));
}
