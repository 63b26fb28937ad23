pub mod ast;
pub mod error;
pub mod ir;
pub mod location;
pub mod options;

pub use ast::{AstNode, AstNodeKind, BinaryOperator, optimize_tree, render_source};
pub use error::{Level, PassError, TacoptErrorExt};
pub use ir::op::{Operand, TacOp};
pub use ir::value::Value;
pub use ir::{FoldNote, OptimizedOp, lower_ast_to_tac, optimize_tac};
pub use location::{Location, Span};
pub use options::PassOptions;

pub fn generate_error_report<E: TacoptErrorExt + ?Sized>(error: &E) -> String {
    let level = error.level();
    let location = match error.location() {
        Some(loc) => loc.to_string(),
        None => "unknown location".to_string(),
    };
    let message = error.message();

    format!("TACOPT | {} | {} | {}", level, location, message)
}

/// Everything one request produces, stage by stage.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineOutput {
    /// The tree that was lowered: the input, or its optimized form when
    /// `options.fold_tree` is set.
    pub tree: AstNode,
    pub tac: Vec<TacOp>,
    pub optimized: Vec<OptimizedOp>,
}

/// Tree -> (optional tree optimization) -> TAC -> TAC optimization.
pub fn run_pipeline(ast: AstNode, options: &PassOptions) -> Result<PipelineOutput, PassError> {
    let tree = if options.fold_tree { optimize_tree(ast, options)? } else { ast };
    let tac = lower_ast_to_tac(&tree, options)?;
    let optimized = optimize_tac(&tac);
    Ok(PipelineOutput { tree, tac, optimized })
}
