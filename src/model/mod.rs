pub mod bom;
pub mod configuration;
pub mod supplier;

pub use bom::{Bom, Edge, Node, NodeId, NodeKind};
pub use configuration::{Configuration, NetFlowInput};
pub use supplier::{Supplier, SupplierId, SupplierRegistry};
