//! IR optimizer module: line-by-line constant folding over lowered TAC.
use serde::{Deserialize, Serialize};

use crate::ir::op::TacOp;

pub mod const_fold;

/// Why an instruction was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FoldNote {
    ConstantFolded,
}

impl std::fmt::Display for FoldNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FoldNote::ConstantFolded => write!(f, "Constant folded"),
        }
    }
}

/// One output line of the TAC optimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedOp {
    pub op: TacOp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<FoldNote>,
}

impl OptimizedOp {
    pub fn unchanged(op: TacOp) -> Self {
        OptimizedOp { op, note: None }
    }

    pub fn folded(op: TacOp) -> Self {
        OptimizedOp { op, note: Some(FoldNote::ConstantFolded) }
    }

    pub fn is_folded(&self) -> bool {
        self.note.is_some()
    }
}

/// Run the peephole passes over a lowered instruction list.
///
/// Never fails: a line that cannot be folded is passed through verbatim.
pub fn optimize_tac(ops: &[TacOp]) -> Vec<OptimizedOp> {
    const_fold::constant_fold(ops)
}
