/// Counter Animation Example
///
/// Drives the KPI counters from 0 to their targets with a cubic ease-out,
/// then restarts them mid-flight after a filter change.

use fundscope::{kpi_counters, CounterAnimator, DashboardState, FilterControl};
use std::thread;
use std::time::{Duration, Instant};

fn run(animator: &mut CounterAnimator) {
    while !animator.is_empty() {
        let frames = animator.tick(Instant::now());
        let line: Vec<String> = frames
            .iter()
            .map(|f| format!("{}={}", f.id.element_id(), f.text))
            .collect();
        println!("   {}", line.join("  "));
        thread::sleep(Duration::from_millis(100));
    }
}

fn main() {
    println!("=== FundScope Counter Animation Example ===\n");

    let mut dashboard = DashboardState::load("data/dashboard_data.json").unwrap();
    let mut animator = CounterAnimator::new();

    println!("1. Full view:");
    animator.start_all(&kpi_counters(&dashboard.summary()), Instant::now());
    run(&mut animator);

    println!("\n2. Debt funds, restarted halfway through:");
    animator.start_all(&kpi_counters(&dashboard.summary()), Instant::now());
    thread::sleep(Duration::from_millis(300));
    dashboard.set_filter(FilterControl::FundType, "Debt");
    animator.start_all(&kpi_counters(&dashboard.summary()), Instant::now());
    run(&mut animator);

    println!("\n=== Example completed successfully! ===");
}
