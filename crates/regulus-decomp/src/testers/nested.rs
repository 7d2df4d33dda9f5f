//! Nested minor sequence phases.
//!
//! The dense core left by series-parallel reduction is seeded with a W3
//! wheel minor; the canonically permuted core is then walked as a chain
//! of nested prefixes growing one element at a time. Graphicness and
//! cographicness are decided along the chain: both properties are
//! minor-closed, so the first failing prefix settles every later one.

use rustc_hash::FxHashSet;
use tracing::debug;

use regulus_matrix::{Matrix, PermutedMatroid};

use crate::driver::{DriverCtx, Task, TaskQueue};
use crate::error::DecompError;
use crate::node::{DecompNode, NodeType, TriState};
use crate::split::split_by_separation;
use crate::testers::graphic::is_graphic;
use crate::wheel::{find_wheel_minor, WheelOutcome};

/// Seeds the nested minor sequence: runs the wheel search on the dense
/// core. A separation splits the node into k-sum children; a wheel
/// produces the canonically permuted core and its prefix chain.
pub(crate) fn extend_nested_minor_sequence(
    ctx: &mut DriverCtx<'_>,
    node: &mut DecompNode,
    queue: &mut TaskQueue,
    task: &Task,
) -> Result<(), DecompError> {
    ctx.check_deadline()?;
    let mut work = node
        .dense_matrix
        .take()
        .ok_or_else(|| DecompError::InvalidInput("nested minor phase without a dense core".into()))?;

    let mut extra_elements = FxHashSet::default();
    let (outcome, permuted) = {
        let mut matroid = PermutedMatroid::new(&mut work);
        let outcome = find_wheel_minor(&mut matroid, &mut extra_elements)?;
        (outcome, Matrix::from_view(&matroid))
    };

    match outcome {
        WheelOutcome::Separated(sep) => {
            debug!(rank = sep.rank().value(), "core splits along a separation");
            let (first, second, node_type) = split_by_separation(&permuted, &sep)?;
            node.node_type = node_type;
            node.children.push(DecompNode::child(first, node.is_ternary));
            node.children.push(DecompNode::child(second, node.is_ternary));
            queue.push(task.child(0));
            queue.push(task.child(1));
        }
        WheelOutcome::Found => {
            debug!(
                pivots = extra_elements.len() / 2,
                "wheel minor seeded the nested sequence"
            );
            node.nested_minors_sequence =
                prefix_sequence(permuted.num_rows(), permuted.num_cols());
            node.nested_minors_matrix = Some(permuted);
            queue.push(task.clone());
        }
    }
    Ok(())
}

/// The chain of prefix sizes from the 3×3 wheel up to the full matrix,
/// growing one element per step and keeping rows and columns balanced.
fn prefix_sequence(num_rows: usize, num_cols: usize) -> Vec<(usize, usize)> {
    let mut seq = vec![(3, 3)];
    let (mut r, mut c) = (3, 3);
    while r < num_rows || c < num_cols {
        if c < num_cols && (c <= r || r == num_rows) {
            c += 1;
        } else {
            r += 1;
        }
        seq.push((r, c));
    }
    seq
}

fn prefix(matrix: &Matrix, rows: usize, cols: usize) -> Matrix {
    let row_idx: Vec<usize> = (0..rows).collect();
    let col_idx: Vec<usize> = (0..cols).collect();
    matrix.submatrix(&row_idx, &col_idx)
}

/// Walks the prefix chain for graphicness; a fully graphic chain makes
/// the node a graphic leaf.
pub(crate) fn nested_minor_sequence_graphicness(
    ctx: &mut DriverCtx<'_>,
    node: &mut DecompNode,
    queue: &mut TaskQueue,
    task: &Task,
) -> Result<(), DecompError> {
    let matrix = node
        .nested_minors_matrix
        .clone()
        .ok_or_else(|| DecompError::InvalidInput("sequence phase without a nested core".into()))?;
    let mut last = 0;
    for (index, &(rows, cols)) in node.nested_minors_sequence.iter().enumerate() {
        ctx.check_deadline()?;
        if !is_graphic(&prefix(&matrix, rows, cols)) {
            break;
        }
        last = index;
    }
    node.nested_minors_last_graphic = Some(last);
    if last + 1 == node.nested_minors_sequence.len() {
        node.graphicness = TriState::Yes;
        node.node_type = NodeType::LeafGraphic;
    } else {
        queue.push(task.clone());
    }
    Ok(())
}

/// Walks the prefix chain for cographicness; mirror of the graphic walk.
pub(crate) fn nested_minor_sequence_cographicness(
    ctx: &mut DriverCtx<'_>,
    node: &mut DecompNode,
    queue: &mut TaskQueue,
    task: &Task,
) -> Result<(), DecompError> {
    let matrix = node
        .nested_minors_matrix
        .clone()
        .ok_or_else(|| DecompError::InvalidInput("sequence phase without a nested core".into()))?;
    let mut last = 0;
    for (index, &(rows, cols)) in node.nested_minors_sequence.iter().enumerate() {
        ctx.check_deadline()?;
        if !is_graphic(&prefix(&matrix, rows, cols).transpose()) {
            break;
        }
        last = index;
    }
    node.nested_minors_last_cographic = Some(last);
    if last + 1 == node.nested_minors_sequence.len() {
        node.cographicness = TriState::Yes;
        node.node_type = NodeType::LeafCographic;
    } else {
        queue.push(task.clone());
    }
    Ok(())
}
