// src/io/reporting.rs

use crate::engine::{BufferStatus, NodeStats, Totals};
use crate::error::Result;
use crate::model::NodeKind;
use crate::study::sweeps::SweepRow;
use serde::Serialize;
use std::path::Path;
use tracing::info;

/// One flat CSV line per node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReportRow {
    pub node: String,
    pub kind: NodeKind,
    pub required_qty: f64,
    pub effective_lead_time: f64,
    pub raw_dlt: f64,
    pub dlt: f64,
    pub buffered: bool,
    pub adu: f64,
    pub red: f64,
    pub yellow: f64,
    pub green: f64,
    pub top_of_green: f64,
    pub avg_inventory: f64,
    pub net_flow_position: f64,
    pub status: BufferStatus,
    pub suppliers: Option<usize>,
    pub sourcing_valid: Option<bool>,
    pub eff_cost: Option<f64>,
    pub eff_emissions: Option<f64>,
    pub eff_reliability: Option<f64>,
}

impl From<&NodeStats> for NodeReportRow {
    fn from(stats: &NodeStats) -> Self {
        let zones = &stats.zones;
        let sourcing = stats.sourcing.as_ref();
        Self {
            node: stats.id.clone(),
            kind: stats.kind,
            required_qty: stats.required_qty,
            effective_lead_time: stats.effective_lead_time,
            raw_dlt: stats.raw_dlt,
            dlt: stats.dlt,
            buffered: stats.buffered,
            adu: zones.adu,
            red: zones.red,
            yellow: zones.yellow,
            green: zones.green,
            top_of_green: zones.top_of_green,
            avg_inventory: zones.avg_inventory,
            net_flow_position: zones.net_flow_position,
            status: zones.status,
            suppliers: sourcing.map(|s| s.selected_count),
            sourcing_valid: sourcing.map(|s| s.valid),
            eff_cost: sourcing.map(|s| s.eff_cost),
            eff_emissions: sourcing.map(|s| s.eff_emissions),
            eff_reliability: sourcing.map(|s| s.eff_reliability),
        }
    }
}

/// Writes any serializable rows to a CSV file with a header line.
pub fn write_records<T: Serialize>(file_path: impl AsRef<Path>, records: &[T]) -> Result<()> {
    let path = file_path.as_ref();
    let mut wtr = csv::Writer::from_path(path)?;

    for record in records {
        wtr.serialize(record)?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush()?;

    info!(rows = records.len(), path = %path.display(), "exported csv");
    Ok(())
}

/// Writes the per-node breakdown (zones, status, sourcing) of one evaluation.
pub fn write_node_report(file_path: impl AsRef<Path>, totals: &Totals) -> Result<()> {
    let rows: Vec<NodeReportRow> = totals.nodes.iter().map(NodeReportRow::from).collect();
    write_records(file_path, &rows)
}

pub fn write_sweep_results(file_path: impl AsRef<Path>, rows: &[SweepRow]) -> Result<()> {
    write_records(file_path, rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::evaluate;
    use crate::scenario::demo::{kettle_scenario, DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS};

    #[test]
    fn test_node_report_has_one_row_per_node() {
        let scenario = kettle_scenario().unwrap();
        let mut config = scenario.default_configuration(DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS);
        config.set_buffered(scenario.bom().node_id("BODY").unwrap(), true);
        let totals = evaluate(&scenario, &config);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nodes.csv");
        write_node_report(&path, &totals).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        assert_eq!(&headers[0], "node");
        assert!(headers.iter().any(|h| h == "status"));

        let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 7);

        let status_col = headers.iter().position(|h| h == "status").unwrap();
        let body = rows.iter().find(|r| &r[0] == "BODY").unwrap();
        assert_ne!(&body[status_col], "Pass-through");
        let kettle = rows.iter().find(|r| &r[0] == "KETTLE").unwrap();
        assert_eq!(&kettle[status_col], "Pass-through");
    }

    #[test]
    fn test_sweep_results_carry_policy_and_cap() {
        let scenario = kettle_scenario().unwrap();
        let config = scenario.default_configuration(DEMO_FINAL_DEMAND, DEMO_PERIOD_DAYS);
        let mut rows = crate::study::carbon_tax_sweep(&scenario, &config, &[0.5]);
        rows.extend(crate::study::carbon_cap_sweep(&scenario, &config, &[80.0]));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sweeps.csv");
        write_sweep_results(&path, &rows).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let headers = reader.headers().unwrap().clone();
        let strategy_col = headers.iter().position(|h| h == "strategy").unwrap();
        let cap_col = headers.iter().position(|h| h == "emission_cap").unwrap();

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(&records[0][strategy_col], "tax");
        assert_eq!(&records[0][cap_col], "");
        assert_eq!(&records[1][strategy_col], "cap");
        assert!(records[1][cap_col].parse::<f64>().unwrap() > 0.0);
    }
}
