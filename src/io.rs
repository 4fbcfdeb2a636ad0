//! Edge-list tree files
//!
//! ```text
//! # star with a long arm
//! 4
//! 1 2 1
//! 1 3 3
//! 1 4 1
//! ```
//!
//! The first data line is the vertex count n; every following data line is
//! an edge `u v w`. Blank lines and `#` comments are ignored.

use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};

use crate::tree::{Tree, Weight};

/// Read a tree from an edge-list file
pub fn read_tree<W, P>(path: P) -> Result<Tree<W>>
where
    W: Weight + FromStr,
    W::Err: std::error::Error + Send + Sync + 'static,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read tree file {}", path.display()))?;
    parse_tree(&contents).with_context(|| format!("malformed tree file {}", path.display()))
}

/// Parse a tree from edge-list text
pub fn parse_tree<W>(text: &str) -> Result<Tree<W>>
where
    W: Weight + FromStr,
    W::Err: std::error::Error + Send + Sync + 'static,
{
    let mut lines = text
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, strip_comment(line).trim()))
        .filter(|(_, line)| !line.is_empty());

    let (line_no, header) = lines.next().ok_or_else(|| anyhow!("missing vertex count"))?;
    let vertices: usize = header
        .parse()
        .with_context(|| format!("invalid vertex count '{}' on line {}", header, line_no))?;

    let mut tree = Tree::new(vertices);
    for (line_no, line) in lines {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [u, v, w] = fields.as_slice() else {
            bail!("expected 'u v w' on line {}, found '{}'", line_no, line);
        };

        let u: usize = u
            .parse()
            .with_context(|| format!("invalid vertex '{}' on line {}", u, line_no))?;
        let v: usize = v
            .parse()
            .with_context(|| format!("invalid vertex '{}' on line {}", v, line_no))?;
        let w: W = w
            .parse()
            .with_context(|| format!("invalid weight '{}' on line {}", w, line_no))?;

        tree.add_edge(u, v, w)
            .with_context(|| format!("rejected edge on line {}", line_no))?;
    }

    Ok(tree)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}
