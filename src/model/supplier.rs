// src/model/supplier.rs

use crate::error::{DdmrpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SupplierId(pub(crate) usize);

impl SupplierId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A sourcing option for purchased nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub unit_cost: f64,
    pub unit_emissions: f64,
    pub lead_time: f64,
    /// On-time reliability in percent, 0..=100.
    pub reliability: f64,
    /// Advisory only; never enforced by the evaluation.
    #[serde(default)]
    pub capacity: Option<f64>,
}

impl Supplier {
    pub fn new(
        id: impl Into<String>,
        unit_cost: f64,
        unit_emissions: f64,
        lead_time: f64,
        reliability: f64,
    ) -> Self {
        Self {
            id: id.into(),
            unit_cost,
            unit_emissions,
            lead_time,
            reliability,
            capacity: None,
        }
    }

    fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("unit cost", self.unit_cost),
            ("unit emissions", self.unit_emissions),
            ("lead time", self.lead_time),
        ] {
            if !(value >= 0.0) {
                return Err(DdmrpError::NegativeSupplierValue {
                    supplier: self.id.clone(),
                    field: field.to_string(),
                });
            }
        }
        if !(0.0..=100.0).contains(&self.reliability) {
            return Err(DdmrpError::InvalidReliability {
                supplier: self.id.clone(),
                reliability: self.reliability,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SupplierRegistry {
    suppliers: Vec<Supplier>,
    index: HashMap<String, SupplierId>,
}

impl SupplierRegistry {
    pub fn new(suppliers: Vec<Supplier>) -> Result<Self> {
        let mut index = HashMap::with_capacity(suppliers.len());
        for (i, supplier) in suppliers.iter().enumerate() {
            supplier.validate()?;
            if index.insert(supplier.id.clone(), SupplierId(i)).is_some() {
                return Err(DdmrpError::DuplicateSupplier(supplier.id.clone()));
            }
        }
        Ok(Self { suppliers, index })
    }

    pub fn len(&self) -> usize {
        self.suppliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suppliers.is_empty()
    }

    /// `None` for an id minted by a different registry.
    pub fn get(&self, id: SupplierId) -> Option<&Supplier> {
        self.suppliers.get(id.0)
    }

    pub fn id_of(&self, name: &str) -> Option<SupplierId> {
        self.index.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SupplierId, &Supplier)> {
        self.suppliers
            .iter()
            .enumerate()
            .map(|(i, s)| (SupplierId(i), s))
    }

    /// Supplier with the lexicographically smallest id.
    pub fn first_by_name(&self) -> Option<SupplierId> {
        self.iter()
            .min_by(|(_, a), (_, b)| a.id.cmp(&b.id))
            .map(|(id, _)| id)
    }
}
