/// Interactions Example
///
/// This example demonstrates:
/// - Changing filter controls and watching the active view shrink
/// - Sorting by column headers, including the descending/ascending toggle
/// - An empty result set and the reset action

use fundscope::{DashboardState, FilterControl, FundField, InteractionEvent};

fn print_view(dashboard: &DashboardState) {
    for fund in dashboard.active_view().iter().take(5) {
        println!(
            "     {:<45} {:<30} {:>6.1}% {:>5.1}",
            fund.scheme_name, fund.amc_name, fund.return_3y, fund.score
        );
    }
    println!("     ({} funds)\n", dashboard.active_view().len());
}

fn main() {
    println!("=== FundScope Interactions Example ===\n");

    let mut dashboard = DashboardState::load("data/dashboard_data.json").unwrap();

    // 1. Default view: score, descending
    println!("1. Default view:");
    print_view(&dashboard);

    // 2. Filter by fund type
    println!("2. Fund type = Equity:");
    dashboard.set_filter(FilterControl::FundType, "Equity");
    print_view(&dashboard);

    // 3. Sort by AMC name, twice
    let state = dashboard.activate_header(FundField::AmcName);
    println!("3. Sorted by {} {:?}:", state.key, state.order);
    print_view(&dashboard);
    let state = dashboard.activate_header(FundField::AmcName);
    println!("   Sorted by {} {:?}:", state.key, state.order);
    print_view(&dashboard);

    // 4. Events arrive as JSON
    println!("4. Applying JSON events...");
    let events = [
        r#"{"type": "SetFilter", "control": "risk_level", "value": "Low"}"#,
        r#"{"type": "SortBy", "field": "Return 3Y (%)"}"#,
    ];
    for json in events {
        dashboard.handle(InteractionEvent::parse(json).unwrap());
    }
    let frame = dashboard.frame();
    println!("   Equity + Low risk: {} rows", frame.table.len());
    println!("   Insights empty: {}\n", frame.insights.is_empty());

    // 5. Reset
    println!("5. Reset:");
    dashboard.reset();
    print_view(&dashboard);

    println!("=== Example completed successfully! ===");
}
