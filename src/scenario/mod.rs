// src/scenario/mod.rs

pub mod config;
pub mod demo;

pub use config::{ScenarioParams, ScoreWeights};

use crate::error::{DdmrpError, Result};
use crate::model::{Bom, Configuration, Edge, Node, NodeId, Supplier, SupplierId, SupplierRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk form of a scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub params: ScenarioParams,
}

/// Static scenario data: the BOM, the supplier registry and the constants.
#[derive(Debug, Clone)]
pub struct Scenario {
    name: String,
    bom: Bom,
    suppliers: SupplierRegistry,
    params: ScenarioParams,
    /// Per node; `Some` only for purchased nodes with a usable default.
    fallback: Vec<Option<SupplierId>>,
}

impl Scenario {
    pub fn new(
        name: impl Into<String>,
        nodes: Vec<Node>,
        edges: Vec<Edge>,
        suppliers: Vec<Supplier>,
        params: ScenarioParams,
    ) -> Result<Self> {
        let bom = Bom::new(nodes, &edges)?;
        let suppliers = SupplierRegistry::new(suppliers)?;

        let mut fallback = vec![None; bom.len()];
        for (id, node) in bom.purchased() {
            fallback[id.index()] = match &node.default_supplier {
                Some(name) => Some(
                    suppliers
                        .id_of(name)
                        .ok_or_else(|| DdmrpError::UnknownSupplier(name.clone()))?,
                ),
                None => suppliers.first_by_name(),
            };
        }

        Ok(Self {
            name: name.into(),
            bom,
            suppliers,
            params,
            fallback,
        })
    }

    pub fn from_file(file: ScenarioFile) -> Result<Self> {
        Self::new(file.name, file.nodes, file.edges, file.suppliers, file.params)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: ScenarioFile = serde_json::from_str(json)?;
        Self::from_file(file)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Rebuilds the file form, edges listed parent by parent.
    pub fn to_file(&self) -> ScenarioFile {
        let edges = self
            .bom
            .ids()
            .flat_map(|parent| {
                self.bom.children(parent).iter().map(move |(child, qty)| {
                    Edge::new(
                        self.bom.node(parent).id.clone(),
                        self.bom.node(*child).id.clone(),
                        *qty,
                    )
                })
            })
            .collect();

        ScenarioFile {
            name: self.name.clone(),
            nodes: self.bom.nodes().map(|(_, n)| n.clone()).collect(),
            edges,
            suppliers: self.suppliers.iter().map(|(_, s)| s.clone()).collect(),
            params: self.params.clone(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bom(&self) -> &Bom {
        &self.bom
    }

    pub fn suppliers(&self) -> &SupplierRegistry {
        &self.suppliers
    }

    pub fn params(&self) -> &ScenarioParams {
        &self.params
    }

    /// Same scenario under different constants (used by the sweeps).
    pub fn with_params(&self, params: ScenarioParams) -> Self {
        Self {
            params,
            ..self.clone()
        }
    }

    pub fn fallback_supplier(&self, node: NodeId) -> Option<SupplierId> {
        self.fallback.get(node.index()).copied().flatten()
    }

    /// Session default: nothing buffered, each purchased node on its default supplier.
    pub fn default_configuration(&self, final_demand: f64, period_days: u32) -> Configuration {
        let mut config = Configuration::unbuffered(self.bom.len(), final_demand, period_days);
        for (id, _) in self.bom.purchased() {
            if let Some(supplier) = self.fallback_supplier(id) {
                config.select_supplier(id, supplier);
            }
        }
        config
    }
}
