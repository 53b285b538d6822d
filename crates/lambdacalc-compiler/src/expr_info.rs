//! Result of compiling one expression node.

use lambdacalc_core::value::DataType;

use crate::node::Node;

/// An executable node together with its frozen static type.
#[derive(Debug, Clone)]
pub struct ExprInfo {
    pub node: Node,
    pub data_type: DataType,
}

impl ExprInfo {
    pub fn new(node: Node, data_type: DataType) -> Self {
        Self { node, data_type }
    }
}
