//! file: cli/src/output.rs
//! description: terminal rendering of TAC listings and fold annotations.
//! Colors are dropped automatically when stdout is not a tty.

use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use console::Style;
use tacopt_core::{OptimizedOp, TacOp};

/// Styles for the different output elements
pub struct FormatStyle {
    pub title: Style,
    pub label: Style,
    pub error: Style,
    pub success: Style,
}

impl Default for FormatStyle {
    fn default() -> Self {
        FormatStyle {
            title: Style::new().bold().underlined(),
            label: Style::new().cyan(),
            error: Style::new().red().bold(),
            success: Style::new().green().bold(),
        }
    }
}

/// Labels sit flush left, everything else is indented under them.
fn instruction_text(op: &TacOp) -> String {
    match op {
        TacOp::Label { .. } => op.to_string(),
        _ => format!("    {}", op),
    }
}

/// Plain listing of a TAC sequence, one instruction per line.
pub fn tac_listing(ops: &[TacOp], style: &FormatStyle) -> String {
    let mut out = String::new();
    for op in ops {
        let text = instruction_text(op);
        match op {
            TacOp::Label { .. } => out.push_str(&style.label.apply_to(text).to_string()),
            _ => out.push_str(&text),
        }
        out.push('\n');
    }
    out
}

/// Table of optimized instructions with their fold annotations.
/// # Example
/// ```text
/// ┌───┬─────────────┬─────────────────┐
/// │ # ┆ Instruction ┆ Note            │
/// ╞═══╪═════════════╪═════════════════╡
/// │ 0 ┆     t0 = 3  ┆ Constant folded │
/// └───┴─────────────┴─────────────────┘
/// ```
pub fn optimized_table(ops: &[OptimizedOp]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Disabled)
        .set_header(vec!["#", "Instruction", "Note"]);

    for (index, entry) in ops.iter().enumerate() {
        let note = match &entry.note {
            Some(note) => Cell::new(note).fg(Color::Green),
            None => Cell::new(""),
        };
        table.add_row(vec![Cell::new(index), Cell::new(instruction_text(&entry.op)), note]);
    }
    table
}

pub fn title(text: &str, style: &FormatStyle) -> String {
    style.title.apply_to(text).to_string()
}

/// Footer line summarizing how many instructions were folded.
pub fn fold_summary(ops: &[OptimizedOp], style: &FormatStyle) -> String {
    let folded = ops.iter().filter(|o| o.is_folded()).count();
    let text = format!("{} of {} instruction(s) folded", folded, ops.len());
    if folded > 0 { style.success.apply_to(text).to_string() } else { text }
}
