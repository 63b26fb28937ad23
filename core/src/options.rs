use crate::ast::AstNode;
use crate::ast::err::ResourceLimitError;

/// Nesting bound applied when no other is configured.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Per-invocation settings for lowering and the optimizers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassOptions {
    /// Deepest node nesting a pass will walk before failing with a
    /// resource-limit error.
    pub max_depth: usize,
    /// Run the tree-level optimizer before lowering in `run_pipeline`.
    pub fold_tree: bool,
}

impl PassOptions {
    pub fn new() -> Self {
        PassOptions { max_depth: DEFAULT_MAX_DEPTH, fold_tree: false }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_fold_tree(mut self, fold_tree: bool) -> Self {
        self.fold_tree = fold_tree;
        self
    }
}

impl Default for PassOptions {
    fn default() -> Self {
        PassOptions::new()
    }
}

impl PassOptions {
    /// Fail once `depth` passes `max_depth`, blaming `node`.
    pub fn check_depth(&self, node: &AstNode, depth: usize, issuer: &str) -> Result<(), ResourceLimitError> {
        if depth > self.max_depth {
            return Err(ResourceLimitError::new(
                issuer.to_string(),
                self.max_depth,
                node.location.clone(),
                node.span.clone(),
            ));
        }
        Ok(())
    }

    /// Like `check_depth`, but for a whole subtree rooted at `depth`. Used
    /// where a subtree is consumed in one piece instead of walked by a pass.
    pub fn check_tree_depth(&self, node: &AstNode, depth: usize, issuer: &str) -> Result<(), ResourceLimitError> {
        self.check_depth(node, depth, issuer)?;
        for child in node.children() {
            self.check_tree_depth(child, depth + 1, issuer)?;
        }
        Ok(())
    }
}
