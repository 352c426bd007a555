//! Graphviz rendering of expression trees.

use crate::ast::Expr;
use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

/// Render `expr` as a `digraph`. Nodes are numbered in pre-order starting
/// at 1; siblings get an invisible same-rank edge to keep them ordered.
pub fn render(expr: &Expr) -> String {
    let mut out = String::new();
    out.push_str("digraph G {\n");
    out.push_str("\tnode [shape=circle]\n");
    out.push('\n');

    let mut next_id = 1;
    render_node(expr, &mut out, &mut next_id);

    out.push_str("}\n");
    out
}

fn render_node(expr: &Expr, out: &mut String, next_id: &mut usize) {
    let id = *next_id;
    // Writing to a String cannot fail
    let _ = writeln!(out, "\tnode_{} [label=\" {} \"]", id, expr.label());

    let mut child_ids = Vec::new();
    for child in expr.children() {
        *next_id += 1;
        let child_id = *next_id;
        child_ids.push(child_id);
        let _ = writeln!(out, "\tnode_{} -> node_{}", id, child_id);
        render_node(child, out, next_id);
    }

    if let [left, right] = child_ids[..] {
        let _ = writeln!(
            out,
            "\t{{ rank=same; node_{} -> node_{} [style=invis] }}",
            left, right
        );
    }
}

/// Write the rendered tree to `path`, replacing any existing file.
pub fn write_file(expr: &Expr, path: &Path) -> io::Result<()> {
    log::debug!("writing AST graph to {}", path.display());
    fs::write(path, render(expr))
}
