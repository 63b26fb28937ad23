use crate::ir::op::{Operand, TacOp};

/// Invocation-scoped lowering state: the fresh-name counter and the
/// instruction buffer.
///
/// Temporaries (`t<n>`) and labels (`L<n>`) draw from the same counter, so
/// every name handed out by one builder is unique. Each lowering call owns
/// its own builder; nothing is shared between calls.
#[derive(Debug, Default)]
pub struct TacBuilder {
    next_id: usize,
    pub ops: Vec<TacOp>,
}

impl TacBuilder {
    pub fn new() -> Self {
        TacBuilder { next_id: 0, ops: Vec::new() }
    }

    fn alloc_id(&mut self) -> usize {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn alloc_temp(&mut self) -> String {
        format!("t{}", self.alloc_id())
    }

    pub fn alloc_label(&mut self) -> String {
        format!("L{}", self.alloc_id())
    }

    /// Allocate a temporary and return it as an operand as well.
    pub fn alloc_temp_operand(&mut self) -> (String, Operand) {
        let name = self.alloc_temp();
        let operand = Operand::Temp(name.clone());
        (name, operand)
    }

    pub fn emit_op(&mut self, op: TacOp) {
        self.ops.push(op);
    }

    pub fn emit_label(&mut self, name: &str) {
        self.emit_op(TacOp::Label { name: name.to_string() });
    }

    pub fn emit_goto(&mut self, label: &str) {
        self.emit_op(TacOp::Goto { label: label.to_string() });
    }

    pub fn emit_comment(&mut self, text: String) {
        self.emit_op(TacOp::Comment { text });
    }

    pub fn current_len(&self) -> usize {
        self.ops.len()
    }

    pub fn finish(self) -> Vec<TacOp> {
        self.ops
    }
}
