/// Simple custom benchmarking without criterion
use std::time::Instant;

use mpm2d_fluid::{MpmState, SolverParams};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn time_it<F: FnMut()>(name: &str, iterations: usize, mut f: F) {
    // Warmup
    for _ in 0..5 {
        f();
    }

    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();

    let avg_ms = elapsed.as_secs_f64() * 1000.0 / iterations as f64;
    println!("{}: {:.3}ms avg ({} iterations)", name, avg_ms, iterations);
}

fn state_with(count: usize) -> MpmState {
    let params = SolverParams::default().with_particle_count(count);
    MpmState::with_rng(params, &mut StdRng::seed_from_u64(0)).expect("valid benchmark params")
}

fn main() {
    println!("\n=== MPM2D Fluid Benchmarks ===\n");

    println!("--- Stages ---");
    for &count in &[1000, 5000, 12000, 20000] {
        let mut state = state_with(count);

        time_it(&format!("zero_grid (n={})", count), 50, || {
            state.zero_grid();
        });
        time_it(&format!("particle_to_grid (n={})", count), 50, || {
            state.zero_grid();
            state.particle_to_grid();
        });
        time_it(&format!("particle_to_grid + update_grid (n={})", count), 50, || {
            state.zero_grid();
            state.particle_to_grid();
            state.update_grid();
        });
        time_it(&format!("grid_to_particle (n={})", count), 50, || {
            state.grid_to_particle();
        });
    }

    println!("\n--- Full step ---");
    for &count in &[1000, 5000, 12000, 20000] {
        let mut state = state_with(count);
        time_it(&format!("step (n={})", count), 50, || state.step());
    }

    println!("\n--- Rendered frame (25 substeps) ---");
    let mut state = state_with(12000);
    let substeps = state.solver_params().substeps_per_frame;
    time_it("frame (n=12000)", 10, || state.step_n(substeps));

    println!("\n=== Benchmark Complete ===\n");
}
