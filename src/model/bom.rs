// src/model/bom.rs

use crate::error::{DdmrpError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;

/// Dense index of a node inside its `Bom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    FinishedGood,
    SubAssembly,
    Purchased,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeKind::FinishedGood => "FinishedGood",
            NodeKind::SubAssembly => "SubAssembly",
            NodeKind::Purchased => "Purchased",
        };
        f.write_str(label)
    }
}

/// A single item of the bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    /// Intrinsic lead time in days (manufacturing or handling), excluding supplier lead time.
    pub lead_time: f64,
    /// Holding cost per unit of average inventory.
    pub holding_rate: f64,
    /// Emissions per unit produced. Ignored for purchased nodes.
    #[serde(default)]
    pub internal_emission_factor: f64,
    /// Emissions per unit of average inventory. Derived from the holding rate when absent.
    #[serde(default)]
    pub inventory_emission_factor: Option<f64>,
    /// Supplier assigned by default and used to repair empty assignments.
    #[serde(default)]
    pub default_supplier: Option<String>,
}

impl Node {
    pub fn new(id: impl Into<String>, kind: NodeKind, lead_time: f64, holding_rate: f64) -> Self {
        Self {
            id: id.into(),
            kind,
            lead_time,
            holding_rate,
            internal_emission_factor: 0.0,
            inventory_emission_factor: None,
            default_supplier: None,
        }
    }

    pub fn with_internal_emissions(mut self, factor: f64) -> Self {
        self.internal_emission_factor = factor;
        self
    }

    pub fn with_inventory_emissions(mut self, factor: f64) -> Self {
        self.inventory_emission_factor = Some(factor);
        self
    }

    pub fn with_default_supplier(mut self, supplier: impl Into<String>) -> Self {
        self.default_supplier = Some(supplier.into());
        self
    }

    pub fn is_purchased(&self) -> bool {
        self.kind == NodeKind::Purchased
    }
}

/// Parent consumes `quantity` units of child per unit produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub parent: String,
    pub child: String,
    pub quantity: f64,
}

impl Edge {
    pub fn new(parent: impl Into<String>, child: impl Into<String>, quantity: f64) -> Self {
        Self {
            parent: parent.into(),
            child: child.into(),
            quantity,
        }
    }
}

/// Validated BOM graph: a DAG rooted at exactly one finished-good node.
///
/// Adjacency is stored by `NodeId`, and a topological order (parents before
/// children) is computed once at construction so every traversal is iterative.
#[derive(Debug, Clone)]
pub struct Bom {
    nodes: Vec<Node>,
    index: HashMap<String, NodeId>,
    children: Vec<Vec<(NodeId, f64)>>,
    parents: Vec<Vec<NodeId>>,
    root: NodeId,
    topo_order: Vec<NodeId>,
}

impl Bom {
    pub fn new(nodes: Vec<Node>, edges: &[Edge]) -> Result<Self> {
        let mut index = HashMap::with_capacity(nodes.len());
        let mut root: Option<NodeId> = None;

        for (i, node) in nodes.iter().enumerate() {
            if index.insert(node.id.clone(), NodeId(i)).is_some() {
                return Err(DdmrpError::DuplicateNode(node.id.clone()));
            }
            if !(node.lead_time >= 0.0) {
                return Err(DdmrpError::NegativeLeadTime {
                    node: node.id.clone(),
                    lead_time: node.lead_time,
                });
            }
            if node.kind == NodeKind::FinishedGood {
                if let Some(existing) = root {
                    return Err(DdmrpError::MultipleRoots {
                        first: nodes[existing.0].id.clone(),
                        second: node.id.clone(),
                    });
                }
                root = Some(NodeId(i));
            }
        }
        let root = root.ok_or(DdmrpError::MissingRoot)?;

        let mut children = vec![Vec::new(); nodes.len()];
        let mut parents = vec![Vec::new(); nodes.len()];
        for edge in edges {
            let parent = *index
                .get(&edge.parent)
                .ok_or_else(|| DdmrpError::UnknownNode(edge.parent.clone()))?;
            let child = *index
                .get(&edge.child)
                .ok_or_else(|| DdmrpError::UnknownNode(edge.child.clone()))?;
            if !(edge.quantity > 0.0) {
                return Err(DdmrpError::InvalidQuantity {
                    parent: edge.parent.clone(),
                    child: edge.child.clone(),
                    quantity: edge.quantity,
                });
            }
            if child == root {
                return Err(DdmrpError::RootHasParent {
                    parent: edge.parent.clone(),
                    root: edge.child.clone(),
                });
            }
            children[parent.0].push((child, edge.quantity));
            parents[child.0].push(parent);
        }

        let topo_order = topological_order(&nodes, &children, &parents)?;

        Ok(Self {
            nodes,
            index,
            children,
            parents,
            root,
            topo_order,
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.index.get(name).copied()
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn purchased(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes().filter(|(_, n)| n.is_purchased())
    }

    pub fn children(&self, id: NodeId) -> &[(NodeId, f64)] {
        &self.children[id.0]
    }

    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        &self.parents[id.0]
    }

    /// Every parent appears before all of its children.
    pub fn topological_order(&self) -> &[NodeId] {
        &self.topo_order
    }
}

/// Kahn's algorithm over the whole graph; leftover indegree means a cycle.
fn topological_order(
    nodes: &[Node],
    children: &[Vec<(NodeId, f64)>],
    parents: &[Vec<NodeId>],
) -> Result<Vec<NodeId>> {
    let mut indegree: Vec<usize> = parents.iter().map(Vec::len).collect();
    let mut queue: VecDeque<NodeId> = indegree
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(i, _)| NodeId(i))
        .collect();

    let mut order = Vec::with_capacity(nodes.len());
    while let Some(id) = queue.pop_front() {
        order.push(id);
        for &(child, _) in &children[id.0] {
            indegree[child.0] -= 1;
            if indegree[child.0] == 0 {
                queue.push_back(child);
            }
        }
    }

    if order.len() < nodes.len() {
        let stuck = indegree
            .iter()
            .position(|d| *d > 0)
            .map(|i| nodes[i].id.clone())
            .unwrap_or_default();
        return Err(DdmrpError::Cycle(stuck));
    }
    Ok(order)
}
