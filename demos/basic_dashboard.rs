/// Basic Dashboard Example
///
/// This example demonstrates:
/// - Loading the dashboard document
/// - Reading the KPI counters, chart series and insights of the full view
/// - Printing the top of the results table

use fundscope::{DashboardState, InsightPanel};

fn main() {
    println!("=== FundScope Basic Dashboard Example ===\n");

    // 1. Load the document
    println!("1. Loading dashboard data...");
    let dashboard = DashboardState::load("data/dashboard_data.json").unwrap();
    println!("   {}\n", dashboard.header_badge());

    let frame = dashboard.frame();

    // 2. KPI strip
    println!("2. KPIs:");
    for kpi in &frame.kpis {
        println!("   {:<24} {}", kpi.id.label(), kpi.final_text());
    }
    println!();

    // 3. Chart series
    println!("3. Charts:");
    for chart in &frame.charts {
        println!("   {:?} ({} points)", chart.id, chart.points.len());
        for point in chart.points.iter().take(3) {
            println!("     {:<40} {}", point.label, point.value);
        }
    }
    println!();

    // 4. Insights
    println!("4. Insights:");
    match &frame.insights {
        InsightPanel::Empty => println!("   No Data"),
        InsightPanel::Insights { cards } => {
            for card in cards {
                println!("   {} {}: {}", card.icon, card.title, card.text);
            }
        }
    }
    println!();

    // 5. Results table
    println!("5. Top funds by score:");
    for row in frame.table.iter().take(5) {
        println!(
            "   #{:<2} {:<45} {:<18} {:>7} {}",
            row.rank, row.scheme_name, row.amc, row.return_text, row.stars
        );
    }

    println!("\n=== Example completed successfully! ===");
}
