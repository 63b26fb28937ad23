pub mod err;
pub mod kind;
pub mod node;
pub mod optimize;
pub mod render;

pub use kind::{AstNodeKind, BinaryOperator};
pub use node::AstNode;
pub use optimize::optimize_tree;
pub use render::{render_expr, render_source};
