use bevy::prelude::*;

use crate::config::SolverParams;
use crate::core::MpmState;

/// Inserts an [`MpmState`] built from the app's [`SolverParams`] resource
/// (or the defaults) and advances it `substeps_per_frame` steps per fixed tick.
pub struct MpmPlugin;

impl Plugin for MpmPlugin {
    fn build(&self, app: &mut App) {
        let params = app
            .world()
            .get_resource::<SolverParams>()
            .cloned()
            .unwrap_or_default();

        let state = match MpmState::new(params.clone()) {
            Ok(state) => state,
            Err(err) => {
                error!("MPM fluid disabled: {err}");
                return;
            }
        };

        app.insert_resource(params)
            .insert_resource(state)
            .add_systems(FixedUpdate, (step_simulation, report_health).chain());
    }
}

pub fn step_simulation(mut state: ResMut<MpmState>) {
    let substeps = state.solver_params().substeps_per_frame;
    state.step_n(substeps);
}

fn report_health(state: Res<MpmState>, mut frame: Local<u32>, mut reported: Local<bool>) {
    const SAMPLE_PERIOD: u32 = 60;

    if *frame % SAMPLE_PERIOD == 0 {
        if let Some(stats) = state.volume_ratio_stats() {
            debug!(
                "[tick {:05}] J min={:.4} max={:.4} mean={:.4}",
                *frame, stats.min, stats.max, stats.mean
            );
        }
    }
    *frame = frame.wrapping_add(1);

    if !*reported {
        if let Err(err) = state.check_health() {
            error!("MPM fluid invariant violated: {err}");
            *reported = true;
        }
    }
}
