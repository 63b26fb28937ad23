pub mod eval;
pub mod lower;
pub mod op;
pub mod opt;
pub mod value;

pub use self::lower::lower_ast_to_tac;
pub use self::opt::{optimize_tac, FoldNote, OptimizedOp};
