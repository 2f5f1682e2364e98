// src/error.rs

use thiserror::Error;

/// Errors raised while building a scenario or moving data in and out of the crate.
///
/// Evaluation and optimization never fail; only construction and I/O do.
#[derive(Error, Debug)]
pub enum DdmrpError {
    // Graph structure
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    #[error("Duplicate node id: {0}")]
    DuplicateNode(String),

    #[error("BOM has no finished-good node")]
    MissingRoot,

    #[error("BOM has more than one finished-good node: {first} and {second}")]
    MultipleRoots { first: String, second: String },

    #[error("Finished good {root} cannot be a component of {parent}")]
    RootHasParent { parent: String, root: String },

    #[error("BOM contains a cycle through node {0}")]
    Cycle(String),

    #[error("Edge {parent} -> {child} has non-positive quantity {quantity}")]
    InvalidQuantity {
        parent: String,
        child: String,
        quantity: f64,
    },

    #[error("Node {node} has invalid lead time {lead_time}")]
    NegativeLeadTime { node: String, lead_time: f64 },

    // Suppliers
    #[error("Unknown supplier: {0}")]
    UnknownSupplier(String),

    #[error("Duplicate supplier id: {0}")]
    DuplicateSupplier(String),

    #[error("Supplier {supplier} has reliability {reliability} outside [0, 100]")]
    InvalidReliability { supplier: String, reliability: f64 },

    #[error("Supplier {supplier} has a negative or undefined {field}")]
    NegativeSupplierValue { supplier: String, field: String },

    // Studies
    #[error("Invalid demand distribution: mean={mean}, std_dev={std_dev}")]
    InvalidDemandDistribution { mean: f64, std_dev: f64 },

    // I/O
    #[error("Scenario file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DdmrpError>;
