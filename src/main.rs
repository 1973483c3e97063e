// Particle viewer: draws the fluid as dots and pushes it around with the cursor.
use std::time::Duration;

use bevy::prelude::*;
use mpm2d_fluid::{MpmPlugin, MpmState, SolverParams};

/// World units spanned by the unit simulation domain.
const VIEW_SCALE: f32 = 640.0;
const PARTICLE_RADIUS: f32 = 1.5;

#[derive(Component)]
struct ParticleVisual {
    index: usize,
}

fn sim_to_world(position: Vec2) -> Vec3 {
    ((position - 0.5) * VIEW_SCALE).extend(0.0)
}

fn world_to_sim(position: Vec2) -> Vec2 {
    position / VIEW_SCALE + 0.5
}

fn init(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    state: Res<MpmState>,
) {
    commands.spawn(Camera2d);

    let wall = state.solver_params().wall_min();
    let inner = (1.0 - 2.0 * wall) * VIEW_SCALE;
    commands.spawn((
        Mesh2d(meshes.add(Rectangle::new(inner, inner))),
        MeshMaterial2d(materials.add(Color::srgb(0.08, 0.08, 0.1))),
        Transform::from_xyz(0.0, 0.0, -1.0),
    ));

    let mesh = meshes.add(Circle::new(PARTICLE_RADIUS));
    let material = materials.add(Color::hsl(205.0, 0.8, 0.55));
    for (index, &position) in state.positions().iter().enumerate() {
        commands.spawn((
            ParticleVisual { index },
            Mesh2d(mesh.clone()),
            MeshMaterial2d(material.clone()),
            Transform::from_translation(sim_to_world(position)),
        ));
    }
}

fn apply_cursor_interaction(
    mut state: ResMut<MpmState>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mouse: Res<ButtonInput<MouseButton>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let target = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(camera_transform, cursor).ok());

    match target {
        Some(world_pos) if mouse.pressed(MouseButton::Left) => {
            state.set_interaction_target(world_to_sim(world_pos));
            state.set_interaction_active(true);
        }
        _ => state.clear_interaction(),
    }
}

fn update_particle_transforms(
    state: Res<MpmState>,
    mut query: Query<(&ParticleVisual, &mut Transform)>,
) {
    let positions = state.positions();
    for (visual, mut transform) in query.iter_mut() {
        if let Some(&position) = positions.get(visual.index) {
            transform.translation = sim_to_world(position);
        }
    }
}

/// Viewer systems only run once [`MpmPlugin`] has built a solver; with invalid
/// params the plugin has already logged why and the window stays empty.
fn add_viewer_systems(app: &mut App) {
    app.add_systems(Startup, init.run_if(resource_exists::<MpmState>))
        .add_systems(
            Update,
            (apply_cursor_interaction, update_particle_transforms)
                .run_if(resource_exists::<MpmState>),
        );
}

fn main() {
    let mut app = App::new();
    app.add_plugins(DefaultPlugins)
        .insert_resource(SolverParams::default())
        .insert_resource(Time::<Fixed>::from_duration(Duration::from_secs_f64(
            1.0 / 60.0,
        )))
        .add_plugins(MpmPlugin);
    add_viewer_systems(&mut app);
    app.run();
}
