use ddmrp_buffer_positioning::engine::{evaluate, score};
use ddmrp_buffer_positioning::io::{demand, reporting};
use ddmrp_buffer_positioning::scenario::demo::{
    kettle_scenario, DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS,
};
use ddmrp_buffer_positioning::scenario::Scenario;
use ddmrp_buffer_positioning::strategy::optimize;
use ddmrp_buffer_positioning::study::{
    carbon_cap_sweep, carbon_tax_sweep, demand_sensitivity, hybrid_sweep, service_target_sweep,
};
use ddmrp_buffer_positioning::{logging, Result, Totals};
use std::env;

fn main() {
    logging::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    println!("=== DDMRP Buffer Positioning & Supplier Selection ===");

    // 1. LOAD SCENARIO
    // A path argument loads a JSON scenario; otherwise use the kettle demo.
    let scenario = match env::args().nth(1) {
        Some(path) => Scenario::from_path(&path)?,
        None => kettle_scenario()?,
    };
    println!(
        "Scenario '{}': {} nodes, {} suppliers",
        scenario.name(),
        scenario.bom().len(),
        scenario.suppliers().len()
    );

    // 2. SESSION DEFAULT
    // Nothing buffered, every purchased node on its default supplier.
    let config = scenario.default_configuration(DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS);
    let baseline = evaluate(&scenario, &config);
    let baseline_score = score(&baseline, scenario.params());
    println!("\n--- Baseline ---");
    print_kpis(&baseline, baseline_score);

    // 3. OPTIMIZE
    let result = optimize(&scenario, &config);
    println!(
        "\n--- Optimized ({} iterations, {:?}) ---",
        result.iterations, result.termination
    );
    print_kpis(&result.totals, result.score);

    println!("\nBuffers:");
    for node in result.totals.nodes.iter().filter(|n| n.buffered) {
        println!(
            "  {:<14} DLT {:>5.1}  TOG {:>8.1}  {}",
            node.id, node.dlt, node.zones.top_of_green, node.zones.status
        );
    }
    println!("Suppliers:");
    for (node, suppliers) in &result.configuration.supplier_assignments {
        let names: Vec<&str> = suppliers
            .iter()
            .filter_map(|s| scenario.suppliers().get(*s))
            .map(|s| s.id.as_str())
            .collect();
        println!("  {:<14} {}", scenario.bom().node(*node).id, names.join(", "));
    }

    // 4. STUDIES
    let demands = demand::generate_normal_demand(10, DEMO_FINAL_DEMAND, 80.0, 2024)?;
    let mut rows = demand_sensitivity(&scenario, &result.configuration, &demands);
    rows.extend(service_target_sweep(&scenario, &config, &[4.0, 8.0, 12.0, 16.0]));
    rows.extend(carbon_tax_sweep(&scenario, &config, &[0.0, 0.5, 1.0, 2.0]));
    rows.extend(carbon_cap_sweep(&scenario, &config, &[100.0, 90.0, 80.0, 70.0]));
    rows.extend(hybrid_sweep(&scenario, &config, &[0.25, 1.0], &[90.0, 70.0]));

    // 5. EXPORT RESULTS
    let node_file = "node_report.csv";
    let sweep_file = "sweep_results.csv";
    match reporting::write_node_report(node_file, &result.totals)
        .and_then(|_| reporting::write_sweep_results(sweep_file, &rows))
    {
        Ok(_) => println!("\nSuccess! Data written to ./{} and ./{}", node_file, sweep_file),
        Err(e) => eprintln!("Error writing CSV: {}", e),
    }

    println!("\nDone.");
    Ok(())
}

fn print_kpis(totals: &Totals, score: u32) {
    println!("Score:            {}", score);
    println!("Total cost:       ${:.2}", totals.total_cost);
    println!("  purchased:      ${:.2}", totals.purchased_cost);
    println!("  inventory:      ${:.2}", totals.inventory_cost);
    println!("  penalties:      ${:.2}", totals.penalty_cost);
    println!("Total emissions:  {:.1} kg CO2e", totals.total_emissions);
    println!("Reliability:      {:.1}%", totals.reliability);
    println!(
        "Service lead:     {:.1} days (unbuffered {:.1}, responsiveness {:.0}%)",
        totals.service_lead, totals.raw_lead, totals.flow_responsiveness
    );
    println!("Buffers:          {}", totals.buffer_count);
}
