// src/engine/zones.rs

use crate::model::NetFlowInput;
use serde::Serialize;
use std::fmt;

/// Net-flow classification against the zones. Recomputed on every evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BufferStatus {
    Red,
    Yellow,
    Green,
    #[serde(rename = "Above Green")]
    AboveGreen,
    #[serde(rename = "Pass-through")]
    PassThrough,
}

impl fmt::Display for BufferStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BufferStatus::Red => "Red",
            BufferStatus::Yellow => "Yellow",
            BufferStatus::Green => "Green",
            BufferStatus::AboveGreen => "Above Green",
            BufferStatus::PassThrough => "Pass-through",
        };
        f.write_str(label)
    }
}

/// Zone sizing inputs shared by every buffer of a scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneFactors {
    pub lead_time_factor: f64,
    pub variability_factor: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BufferZones {
    pub adu: f64,
    pub dlt: f64,
    pub red_base: f64,
    pub red_safety: f64,
    pub red: f64,
    pub yellow: f64,
    pub green: f64,
    pub top_of_green: f64,
    pub avg_inventory: f64,
    pub on_hand: f64,
    pub open_supply: f64,
    pub qualified_demand: f64,
    pub net_flow_position: f64,
    pub status: BufferStatus,
}

impl BufferZones {
    /// Unbuffered nodes hold nothing.
    pub fn pass_through() -> Self {
        Self {
            adu: 0.0,
            dlt: 0.0,
            red_base: 0.0,
            red_safety: 0.0,
            red: 0.0,
            yellow: 0.0,
            green: 0.0,
            top_of_green: 0.0,
            avg_inventory: 0.0,
            on_hand: 0.0,
            open_supply: 0.0,
            qualified_demand: 0.0,
            net_flow_position: 0.0,
            status: BufferStatus::PassThrough,
        }
    }
}

/// Average daily usage; the period is clamped to at least one day.
pub fn average_daily_usage(required_qty: f64, period_days: u32) -> f64 {
    required_qty / f64::from(period_days.max(1))
}

/// Sizes the zones of one buffered node and classifies its net-flow position.
pub fn size_buffer(
    required_qty: f64,
    period_days: u32,
    dlt: f64,
    factors: ZoneFactors,
    net_flow: NetFlowInput,
) -> BufferZones {
    let period = f64::from(period_days.max(1));
    let adu = average_daily_usage(required_qty, period_days);
    let dlt = dlt.max(0.0);

    let usage_over_dlt = adu * dlt;
    let red_base = usage_over_dlt * factors.lead_time_factor;
    let red_safety = red_base * factors.variability_factor;
    let red = red_base + red_safety;
    let yellow = usage_over_dlt;
    let green = usage_over_dlt;
    let top_of_green = red + yellow + green;

    let on_hand = net_flow.on_hand_pct / 100.0 * top_of_green;
    let open_supply = net_flow.open_supply_pct / 100.0 * top_of_green;
    let qualified_demand = adu * period.min(dlt);
    let net_flow_position = on_hand + open_supply - qualified_demand;

    BufferZones {
        adu,
        dlt,
        red_base,
        red_safety,
        red,
        yellow,
        green,
        top_of_green,
        avg_inventory: top_of_green / 2.0,
        on_hand,
        open_supply,
        qualified_demand,
        net_flow_position,
        status: classify(net_flow_position, red, yellow, top_of_green),
    }
}

fn classify(position: f64, red: f64, yellow: f64, top_of_green: f64) -> BufferStatus {
    if position < red {
        BufferStatus::Red
    } else if position < red + yellow {
        BufferStatus::Yellow
    } else if position < top_of_green {
        BufferStatus::Green
    } else {
        BufferStatus::AboveGreen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FACTORS: ZoneFactors = ZoneFactors {
        lead_time_factor: 0.5,
        variability_factor: 0.5,
    };

    #[test]
    fn test_zone_sizes() {
        // ADU 10, DLT 4 -> usage over DLT 40
        let zones = size_buffer(300.0, 30, 4.0, FACTORS, NetFlowInput::new(50.0, 0.0));
        assert_eq!(zones.adu, 10.0);
        assert_eq!(zones.red_base, 20.0);
        assert_eq!(zones.red_safety, 10.0);
        assert_eq!(zones.red, 30.0);
        assert_eq!(zones.yellow, 40.0);
        assert_eq!(zones.green, 40.0);
        assert_eq!(zones.top_of_green, 110.0);
        assert_eq!(zones.avg_inventory, 55.0);
        // 55 on hand - 10 * min(30, 4)
        assert_eq!(zones.qualified_demand, 40.0);
        assert_eq!(zones.net_flow_position, 15.0);
        assert_eq!(zones.status, BufferStatus::Red);
    }

    #[test]
    fn test_status_thresholds() {
        let status = |on_hand: f64, open: f64| {
            size_buffer(300.0, 30, 4.0, FACTORS, NetFlowInput::new(on_hand, open)).status
        };
        // top of green 110, qualified demand 40: position = 1.1 * pct - 40
        assert_eq!(status(60.0, 0.0), BufferStatus::Red); // 26
        assert_eq!(status(70.0, 0.0), BufferStatus::Yellow); // 37
        assert_eq!(status(80.0, 30.0), BufferStatus::Green); // 81
        assert_eq!(status(100.0, 100.0), BufferStatus::AboveGreen); // 180
    }

    #[test]
    fn test_period_is_clamped_and_short_periods_cap_qualified_demand() {
        let zones = size_buffer(20.0, 0, 5.0, FACTORS, NetFlowInput::default());
        assert_eq!(zones.adu, 20.0);
        // min(period 1, dlt 5) = 1 day of demand
        assert_eq!(zones.qualified_demand, 20.0);
    }

    #[test]
    fn test_negative_dlt_is_clamped() {
        let zones = size_buffer(300.0, 30, -3.0, FACTORS, NetFlowInput::default());
        assert_eq!(zones.dlt, 0.0);
        assert_eq!(zones.top_of_green, 0.0);
        assert_eq!(zones.status, BufferStatus::AboveGreen);
    }
}
