//! Interactive walk over a proof-number tree
//!
//! Commands: a coordinate descends into that child, `..` goes back up,
//! `x` or `exit` leaves.

use std::io::{self, BufRead, Write};

use crate::board::Pos;
use crate::search::{NodeId, PnNode, PnTree, INFINITY};

fn number(n: u32) -> String {
    if n == INFINITY {
        "inf".to_string()
    } else {
        n.to_string()
    }
}

fn describe(node: &PnNode) -> String {
    format!(
        "{} {:?} pn={} dn={} size={}",
        node.pos,
        node.kind,
        number(node.proof),
        number(node.disproof),
        node.subtree_size
    )
}

fn show<W: Write>(tree: &PnTree, id: NodeId, output: &mut W) -> io::Result<()> {
    let path: Vec<String> = tree.path(id).iter().map(Pos::to_string).collect();
    writeln!(output, "path: {}", path.join(" "))?;
    writeln!(output, "node: {}", describe(tree.get(id)))?;
    for &child in tree.children(id) {
        writeln!(output, "  {}", describe(tree.get(child)))?;
    }
    Ok(())
}

/// Browse `tree` from its root until `exit` or end of input.
pub fn inspect<R: BufRead, W: Write>(tree: &PnTree, input: &mut R, output: &mut W) -> io::Result<()> {
    let Some(mut current) = tree.root() else {
        return writeln!(output, "tree is empty");
    };

    let mut line = String::new();
    loop {
        show(tree, current, output)?;
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Ok(());
        }
        match line.trim() {
            "x" | "exit" => return Ok(()),
            ".." => match tree.get(current).parent {
                Some(parent) => current = parent,
                None => writeln!(output, "already at the root")?,
            },
            "" => {}
            text => match text.parse::<Pos>() {
                Ok(pos) => {
                    let child = tree
                        .children(current)
                        .iter()
                        .copied()
                        .find(|&c| tree.get(c).pos == pos);
                    match child {
                        Some(child) => current = child,
                        None => writeln!(output, "no child at {pos}")?,
                    }
                }
                Err(e) => writeln!(output, "unknown command \"{text}\": {e}")?,
            },
        }
    }
}
