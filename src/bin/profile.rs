use std::time::Instant;

use mazeviz::{generator, solvers::Solver};

/// Headless generate-and-solve timing loop, to confirm that a full solve
/// stays far below the animation frame budget.
fn main() {
    let mut args = std::env::args();
    args.next(); // Skip executable name
    let num_iters = args
        .next()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(100);

    for solver in [Solver::Bfs, Solver::Dfs, Solver::AStar] {
        let started = Instant::now();
        let mut total_steps = 0usize;
        let mut solved = 0usize;
        for i in 0..num_iters {
            let maze = generator::generate(31, Some(i as u64))
                .expect("generation stays within its retry budget");
            let mut run = solver
                .start_run(maze.grid(), maze.start(), maze.goal())
                .expect("generated endpoints are in bounds");
            while let Some(event) = run.advance() {
                total_steps += 1;
                if matches!(event, mazeviz::solvers::StepEvent::Done { .. }) {
                    solved += 1;
                }
            }
        }
        println!(
            "{}: {} mazes, {} solved, {} steps, {:?} total",
            solver,
            num_iters,
            solved,
            total_steps,
            started.elapsed()
        );
    }
}
