//! Scene plugin - Self-contained plugin pattern
//!
//! Spawns the two bodies and the pair of force arrows, and keeps their
//! transforms and materials in step with the latest simulation [`Frame`].

use crate::physics::math::Scalar;
use crate::prelude::*;
use crate::visuals::{ArrowGeometry, ArrowPlacement, arrow_pulse};
use core::f32::consts::FRAC_PI_2;

const PRIMARY_COLOR: Color = Color::srgb(0.118, 0.251, 0.686);
const SECONDARY_COLOR: Color = Color::srgb(0.580, 0.639, 0.722);
const ARROW_ON_PRIMARY_COLOR: Color = Color::srgb(0.133, 0.773, 0.369);
const ARROW_ON_SECONDARY_COLOR: Color = Color::srgb(0.937, 0.267, 0.267);
const ARROW_OPACITY: f32 = 0.8;
const ORBIT_RING_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSettings {
    pub show_orbit_ring: bool,
}

/// Rotation about the body's own Y axis, in radians per second
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Spin {
    pub rate: f32,
}

/// Force arrow rooted at the surface of `rooted_at`, pointing at the other body
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForceArrow {
    pub rooted_at: BodyRole,
}

impl ForceArrow {
    pub fn label(&self) -> &'static str {
        match self.rooted_at {
            BodyRole::Primary => "Force on Earth",
            BodyRole::Secondary => "Force on Moon",
        }
    }

    pub fn color(&self) -> Color {
        match self.rooted_at {
            BodyRole::Primary => ARROW_ON_PRIMARY_COLOR,
            BodyRole::Secondary => ARROW_ON_SECONDARY_COLOR,
        }
    }
}

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ArrowShaft;

#[derive(Component, Debug, Clone, Copy, Default)]
pub struct ArrowHead;

#[derive(Resource, Debug, Clone)]
struct ArrowMaterials {
    on_primary: Handle<StandardMaterial>,
    on_secondary: Handle<StandardMaterial>,
    /// Glow currently written into both materials
    glow: Option<Scalar>,
}

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        let show_orbit_ring = app
            .world()
            .get_resource::<NewtonLabConfig>()
            .is_none_or(|config| config.ui.show_orbit_ring);
        app.insert_resource(SceneSettings { show_orbit_ring });

        app.add_systems(Startup, spawn_scene);
        app.add_systems(
            Update,
            (
                toggle_orbit_ring.in_set(SimulationSet::Input),
                (sync_bodies, spin_bodies, sync_arrows, update_arrow_glow, draw_orbit_ring)
                    .chain()
                    .in_set(SimulationSet::Publish),
            ),
        );
    }
}

fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<NewtonLabConfig>,
) {
    spawn_bodies(&mut commands, &mut meshes, &mut materials, &config);
    spawn_arrows(&mut commands, &mut meshes, &mut materials);
}

/// Unit sphere meshes, scaled to the visual radius every frame
pub fn spawn_bodies(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    config: &NewtonLabConfig,
) {
    let sphere = meshes.add(Sphere::new(1.0).mesh().ico(5).unwrap_or_else(|e| {
        warn!("Falling back to UV sphere mesh: {}", e);
        Sphere::new(1.0).mesh().uv(64, 32)
    }));

    let bodies = [
        (
            BodyRole::Primary,
            PRIMARY_COLOR,
            0.7,
            0.1,
            config.visuals.primary_spin_rate,
        ),
        (
            BodyRole::Secondary,
            SECONDARY_COLOR,
            0.9,
            0.0,
            config.visuals.secondary_spin_rate,
        ),
    ];

    for (role, color, perceptual_roughness, metallic, spin_rate) in bodies {
        let material = materials.add(StandardMaterial {
            base_color: color,
            perceptual_roughness,
            metallic,
            ..default()
        });

        commands.spawn((
            Name::new(role.name()),
            role,
            Spin { rate: spin_rate },
            Mesh3d(sphere.clone()),
            MeshMaterial3d(material),
            Transform::default(),
        ));
    }
}

fn arrow_material(color: Color) -> StandardMaterial {
    StandardMaterial {
        base_color: color.with_alpha(ARROW_OPACITY),
        emissive: color.to_linear(),
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

pub fn spawn_arrows(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
) {
    let shaft_mesh = meshes.add(Cylinder::new(1.0, 1.0));
    let head_mesh = meshes.add(Cone {
        radius: 1.0,
        height: 1.0,
    });

    let on_primary = materials.add(arrow_material(ARROW_ON_PRIMARY_COLOR));
    let on_secondary = materials.add(arrow_material(ARROW_ON_SECONDARY_COLOR));

    for (rooted_at, material) in [
        (BodyRole::Primary, on_primary.clone()),
        (BodyRole::Secondary, on_secondary.clone()),
    ] {
        let arrow = ForceArrow { rooted_at };
        commands.spawn((
            Name::new(arrow.label()),
            arrow,
            Transform::default(),
            Visibility::default(),
            children![
                (
                    ArrowShaft,
                    Mesh3d(shaft_mesh.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::default(),
                ),
                (
                    ArrowHead,
                    Mesh3d(head_mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::default(),
                ),
            ],
        ));
    }

    commands.insert_resource(ArrowMaterials {
        on_primary,
        on_secondary,
        glow: None,
    });
}

fn to_vec3(vector: Vector) -> Vec3 {
    vector.as_vec3()
}

pub fn sync_bodies(latest_frame: Res<LatestFrame>, mut bodies: Query<(&BodyRole, &mut Transform)>) {
    let Some(frame) = &latest_frame.0 else {
        return;
    };

    for (role, mut transform) in &mut bodies {
        let snapshot = match role {
            BodyRole::Primary => &frame.primary,
            BodyRole::Secondary => &frame.secondary,
        };

        transform.translation = to_vec3(snapshot.position);
        transform.scale = Vec3::splat(snapshot.visual_radius as f32);
    }
}

pub fn spin_bodies(time: Res<Time>, mut bodies: Query<(&Spin, &mut Transform)>) {
    for (spin, mut transform) in &mut bodies {
        transform.rotate_y(spin.rate * time.delta_secs());
    }
}

/// Transform of an arrow root: placed on the body surface, +Y along the force
pub fn arrow_root_transform(placement: &ArrowPlacement, pulse: Scalar) -> Transform {
    let pulse = pulse as f32;
    Transform {
        translation: to_vec3(placement.origin),
        rotation: Quat::from_rotation_arc(Vec3::Y, to_vec3(placement.direction)),
        scale: Vec3::new(pulse, 1.0, pulse),
    }
}

/// Unit cylinder stretched to the shaft, base at the arrow root
pub fn shaft_transform(geometry: &ArrowGeometry) -> Transform {
    let shaft = geometry.shaft_length as f32;
    let thickness = geometry.thickness as f32;
    Transform::from_xyz(0.0, shaft / 2.0, 0.0).with_scale(Vec3::new(thickness, shaft, thickness))
}

/// Unit cone sitting on top of the shaft
pub fn head_transform(geometry: &ArrowGeometry) -> Transform {
    let shaft = geometry.shaft_length as f32;
    let head = geometry.head_length as f32;
    let radius = geometry.head_radius() as f32;
    Transform::from_xyz(0.0, shaft + head / 2.0, 0.0).with_scale(Vec3::new(radius, head, radius))
}

#[allow(clippy::type_complexity)]
pub fn sync_arrows(
    latest_frame: Res<LatestFrame>,
    mut arrows: Query<(&ForceArrow, &Children, &mut Transform)>,
    mut parts: Query<
        (&mut Transform, Has<ArrowShaft>, Has<ArrowHead>),
        (Without<ForceArrow>, Or<(With<ArrowShaft>, With<ArrowHead>)>),
    >,
) {
    let Some(frame) = &latest_frame.0 else {
        return;
    };

    let geometry = frame.visuals.arrow;
    let pulse = arrow_pulse(frame.elapsed);

    for (arrow, children, mut transform) in &mut arrows {
        let placement = match arrow.rooted_at {
            BodyRole::Primary => &frame.visuals.on_primary,
            BodyRole::Secondary => &frame.visuals.on_secondary,
        };
        *transform = arrow_root_transform(placement, pulse);

        for &child in &**children {
            if let Ok((mut part_transform, is_shaft, is_head)) = parts.get_mut(child) {
                if is_shaft {
                    *part_transform = shaft_transform(&geometry);
                } else if is_head {
                    *part_transform = head_transform(&geometry);
                }
            }
        }
    }
}

fn update_arrow_glow(
    latest_frame: Res<LatestFrame>,
    arrow_materials: Option<ResMut<ArrowMaterials>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let (Some(frame), Some(mut arrow_materials)) = (&latest_frame.0, arrow_materials) else {
        return;
    };

    let glow = frame.visuals.arrow.glow_intensity;
    if arrow_materials.glow == Some(glow) {
        return;
    }
    arrow_materials.glow = Some(glow);

    for (handle, color) in [
        (&arrow_materials.on_primary, ARROW_ON_PRIMARY_COLOR),
        (&arrow_materials.on_secondary, ARROW_ON_SECONDARY_COLOR),
    ] {
        if let Some(material) = materials.get_mut(handle) {
            material.emissive = color.to_linear() * glow as f32;
        }
    }
}

fn draw_orbit_ring(
    settings: Res<SceneSettings>,
    latest_frame: Res<LatestFrame>,
    mut gizmos: Gizmos,
) {
    if !settings.show_orbit_ring {
        return;
    }
    let Some(frame) = &latest_frame.0 else {
        return;
    };

    gizmos
        .circle(
            Isometry3d::new(
                to_vec3(frame.primary.position),
                Quat::from_rotation_x(FRAC_PI_2),
            ),
            frame.orbit_radius as f32,
            ORBIT_RING_COLOR,
        )
        .resolution(128);
}

fn toggle_orbit_ring(
    mut commands_reader: EventReader<SimulationCommand>,
    mut settings: ResMut<SceneSettings>,
) {
    for command in commands_reader.read() {
        if matches!(command, SimulationCommand::ToggleOrbitRing) {
            settings.show_orbit_ring = !settings.show_orbit_ring;
            info!(
                "Orbit ring {}",
                if settings.show_orbit_ring { "shown" } else { "hidden" }
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugins::simulation::SimulationPlugin;
    use crate::test_utils::{create_test_app, send_command};

    fn scene_app() -> App {
        let mut app = create_test_app();
        app.insert_resource(NewtonLabConfig::default());
        app.add_plugins(SimulationPlugin);
        app.insert_resource(SceneSettings {
            show_orbit_ring: true,
        });
        app.add_systems(Startup, spawn_scene);
        app.add_systems(
            Update,
            (
                toggle_orbit_ring.in_set(SimulationSet::Input),
                (sync_bodies, sync_arrows, update_arrow_glow)
                    .chain()
                    .in_set(SimulationSet::Publish),
            ),
        );
        app
    }

    #[test]
    fn test_bodies_follow_the_frame() {
        let mut app = scene_app();
        app.update();

        let world = app.world_mut();
        let mut query = world.query::<(&BodyRole, &Transform)>();
        let transforms: Vec<_> = query.iter(world).map(|(r, t)| (*r, *t)).collect();
        assert_eq!(transforms.len(), 2);

        for (role, transform) in transforms {
            match role {
                BodyRole::Primary => {
                    assert_eq!(transform.translation, Vec3::ZERO);
                    assert!((transform.scale.x - 3.5).abs() < 1e-5);
                }
                BodyRole::Secondary => {
                    assert!((transform.translation.length() - 15.0).abs() < 1e-4);
                    assert!((transform.scale.x - 1.5).abs() < 1e-5);
                }
            }
        }
    }

    #[test]
    fn test_arrows_point_at_each_other() {
        let mut app = scene_app();
        app.update();

        let world = app.world_mut();
        let mut query = world.query::<(&ForceArrow, &Transform)>();
        let arrows: Vec<_> = query.iter(world).map(|(a, t)| (*a, *t)).collect();
        assert_eq!(arrows.len(), 2);

        let up = |t: &Transform| t.rotation * Vec3::Y;
        let on_primary = arrows
            .iter()
            .find(|(a, _)| a.rooted_at == BodyRole::Primary)
            .map(|(_, t)| *t)
            .unwrap();
        let on_secondary = arrows
            .iter()
            .find(|(a, _)| a.rooted_at == BodyRole::Secondary)
            .map(|(_, t)| *t)
            .unwrap();

        assert!((up(&on_primary) + up(&on_secondary)).length() < 1e-4);
        // Rooted just outside the primary's surface
        assert!((on_primary.translation.length() - 3.7).abs() < 1e-4);
    }

    #[test]
    fn test_arrow_parts_match_geometry() {
        let mut app = scene_app();
        app.update();

        let world = app.world_mut();
        let mut shafts = world.query_filtered::<&Transform, With<ArrowShaft>>();
        let shaft = *shafts.iter(world).next().unwrap();
        let mut heads = world.query_filtered::<&Transform, With<ArrowHead>>();
        let head = *heads.iter(world).next().unwrap();

        // 7.11 N gives the minimum arrow length of 5
        assert!((shaft.scale.y - 3.5).abs() < 1e-5);
        assert!((head.translation.y - (3.5 + 0.75)).abs() < 1e-5);
        assert!((head.scale.x - shaft.scale.x * 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_arrow_glow_written_to_materials() {
        let mut app = scene_app();
        app.update();

        let glow = app.world().resource::<ArrowMaterials>().glow;
        assert!(glow.is_some());
        let handle = app.world().resource::<ArrowMaterials>().on_primary.clone();
        let materials = app.world().resource::<Assets<StandardMaterial>>();
        let material = materials.get(&handle).unwrap();
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
        assert!(material.emissive.red > 0.0 || material.emissive.green > 0.0);
    }

    #[test]
    fn test_orbit_ring_toggle() {
        let mut app = scene_app();

        send_command(&mut app, SimulationCommand::ToggleOrbitRing);
        app.update();
        assert!(!app.world().resource::<SceneSettings>().show_orbit_ring);

        send_command(&mut app, SimulationCommand::ToggleOrbitRing);
        app.update();
        assert!(app.world().resource::<SceneSettings>().show_orbit_ring);
    }

    #[test]
    fn test_arrow_root_transform_pulses_sideways_only() {
        let placement = ArrowPlacement {
            origin: Vector::new(1.0, 0.0, 0.0),
            direction: Vector::X,
        };
        let transform = arrow_root_transform(&placement, 1.03);

        assert_eq!(transform.scale, Vec3::new(1.03, 1.0, 1.03));
        assert!((transform.rotation * Vec3::Y - Vec3::X).length() < 1e-6);
    }
}
