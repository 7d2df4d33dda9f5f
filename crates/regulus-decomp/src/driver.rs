//! The decomposition task driver.
//!
//! A LIFO queue of tasks drives each decomposition node through the
//! ordered test pipeline. Exactly one task runs at a time; a task owns
//! its node for the duration of a step, and the depth-first order comes
//! from the queue being a stack. The loop stops when the queue drains or
//! when irregularity is found and the caller did not ask for the full
//! tree.

use std::time::{Duration, Instant};

use smallvec::SmallVec;
use tracing::debug;

use regulus_matrix::Matrix;

use crate::camion;
use crate::error::DecompError;
use crate::minor::{Minor, MinorKind};
use crate::node::{DecompNode, NodeType, Regularity};
use crate::params::{RegularParams, RegularStats};
use crate::testers;

/// A work item: the path from the driven root to the task's node.
///
/// Children are only ever appended while a run is in flight, so paths
/// stay valid for the lifetime of the queue.
#[derive(Clone, Debug)]
pub(crate) struct Task {
    path: SmallVec<[usize; 8]>,
}

impl Task {
    pub(crate) fn root() -> Self {
        Self {
            path: SmallVec::new(),
        }
    }

    /// The task for the `index`-th child of this task's node.
    pub(crate) fn child(&self, index: usize) -> Self {
        let mut path = self.path.clone();
        path.push(index);
        Self { path }
    }
}

/// LIFO task queue plus the shared irregularity flag.
pub(crate) struct TaskQueue {
    stack: Vec<Task>,
    pub(crate) found_irregularity: bool,
    pub(crate) minor: Option<Minor>,
}

impl TaskQueue {
    pub(crate) fn new() -> Self {
        Self {
            stack: Vec::new(),
            found_irregularity: false,
            minor: None,
        }
    }

    pub(crate) fn push(&mut self, task: Task) {
        self.stack.push(task);
    }

    pub(crate) fn pop(&mut self) -> Option<Task> {
        self.stack.pop()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.stack.len()
    }

    /// Records a definite irregularity; the first certificate wins.
    pub(crate) fn mark_irregular(&mut self, minor: Minor) {
        self.found_irregularity = true;
        if self.minor.is_none() {
            self.minor = Some(minor);
        }
    }
}

/// Shared driver state passed down to every tester.
pub(crate) struct DriverCtx<'a> {
    pub(crate) params: &'a RegularParams,
    pub(crate) stats: &'a mut RegularStats,
    pub(crate) deadline: Option<Instant>,
}

impl DriverCtx<'_> {
    /// Polls the deadline; testers call this before expensive steps.
    pub(crate) fn check_deadline(&self) -> Result<(), DecompError> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(DecompError::Timeout),
            _ => Ok(()),
        }
    }
}

/// The pipeline phases, in dispatch order.
#[derive(Clone, Copy, Debug)]
enum Phase {
    OneSum,
    Graphicness,
    Cographicness,
    R10,
    SeriesParallel,
    NestedSequence,
    ThreeSeparation,
}

impl RegularStats {
    fn phase_mut(&mut self, phase: Phase) -> &mut crate::params::PhaseStats {
        match phase {
            Phase::OneSum => &mut self.one_sum,
            Phase::Graphicness => &mut self.graphicness,
            Phase::Cographicness => &mut self.cographicness,
            Phase::R10 => &mut self.r10,
            Phase::SeriesParallel => &mut self.series_parallel,
            Phase::NestedSequence => &mut self.nested_sequence,
            Phase::ThreeSeparation => &mut self.three_separation,
        }
    }
}

fn resolve_node<'t>(root: &'t mut DecompNode, path: &[usize]) -> &'t mut DecompNode {
    let mut node = root;
    for &index in path {
        node = &mut node.children[index];
    }
    node
}

/// Runs one task: picks the first pipeline branch whose progress flag is
/// unmet and delegates to the tester.
fn run_task(
    ctx: &mut DriverCtx<'_>,
    root: &mut DecompNode,
    task: &Task,
    queue: &mut TaskQueue,
) -> Result<(), DecompError> {
    ctx.check_deadline()?;
    let node = resolve_node(root, &task.path);
    let rows = node.matrix.num_rows();
    let cols = node.matrix.num_cols();
    let direct = ctx.params.direct_graphicness || rows <= 3 || cols <= 3;

    let phase = if !node.tested_two_connected {
        Phase::OneSum
    } else if node.graphicness == crate::node::TriState::Unknown && direct {
        Phase::Graphicness
    } else if node.cographicness == crate::node::TriState::Unknown && direct {
        Phase::Cographicness
    } else if !node.tested_r10 {
        Phase::R10
    } else if !node.tested_series_parallel {
        Phase::SeriesParallel
    } else if node.dense_matrix.is_some() {
        Phase::NestedSequence
    } else if node.nested_minors_matrix.is_some() && node.nested_minors_last_graphic.is_none() {
        Phase::NestedSequence
    } else if node.nested_minors_matrix.is_some() && node.nested_minors_last_cographic.is_none() {
        Phase::NestedSequence
    } else {
        Phase::ThreeSeparation
    };
    debug!(?phase, rows, cols, depth = task.path.len(), "processing task");

    let started = Instant::now();
    let result = match phase {
        Phase::OneSum => testers::one_sum::search_one_sum(ctx, node, queue, task),
        Phase::Graphicness => testers::graphic::test_graphicness(ctx, node, queue, task),
        Phase::Cographicness => testers::graphic::test_cographicness(ctx, node, queue, task),
        Phase::R10 => testers::r10::test_r10(ctx, node, queue, task),
        Phase::SeriesParallel => {
            testers::series_parallel::decompose_series_parallel(ctx, node, queue, task)
        }
        Phase::NestedSequence => {
            if node.dense_matrix.is_some() {
                testers::nested::extend_nested_minor_sequence(ctx, node, queue, task)
            } else if node.nested_minors_last_graphic.is_none() {
                testers::nested::nested_minor_sequence_graphicness(ctx, node, queue, task)
            } else {
                testers::nested::nested_minor_sequence_cographicness(ctx, node, queue, task)
            }
        }
        Phase::ThreeSeparation => testers::three_sep::search_three_separation(ctx, node, queue, task),
    };
    ctx.stats.phase_mut(phase).record(started.elapsed());
    result
}

fn drive(
    root: &mut DecompNode,
    queue: &mut TaskQueue,
    params: &RegularParams,
    stats: &mut RegularStats,
    deadline: Option<Instant>,
) -> Result<(), DecompError> {
    let mut ctx = DriverCtx {
        params,
        stats,
        deadline,
    };
    while !(queue.is_empty() || (queue.found_irregularity && !params.complete_tree)) {
        let task = queue.pop().expect("queue checked non-empty");
        run_task(&mut ctx, root, &task, queue)?;
    }
    Ok(())
}

/// Outcome of a regularity run.
#[derive(Debug)]
pub struct RegularityOutcome {
    /// Whether the input matroid is regular (totally unimodular in the
    /// ternary case).
    pub is_regular: bool,
    /// The decomposition tree.
    pub root: DecompNode,
    /// A minor certifying irregularity, when one was recorded.
    pub minor: Option<Minor>,
    /// Statistics of the run.
    pub stats: RegularStats,
}

/// Tests a binary or ternary matrix for regularity.
///
/// Builds a root node, drives the task queue through the pipeline, and
/// returns the root's verdict together with the decomposition tree.
///
/// # Errors
///
/// - [`DecompError::InvalidInput`] if entries fall outside the declared
///   domain ({0, 1} binary, {−1, 0, 1} ternary);
/// - [`DecompError::Timeout`] if `time_limit` expires; unlike
///   [`complete_decomposition`], the partially built tree is dropped.
pub fn test_regularity(
    matrix: &Matrix,
    is_ternary: bool,
    params: &RegularParams,
    time_limit: Option<Duration>,
) -> Result<RegularityOutcome, DecompError> {
    if is_ternary {
        if !matrix.is_ternary() {
            return Err(DecompError::InvalidInput(
                "ternary matrix entries must lie in {-1, 0, 1}".into(),
            ));
        }
    } else if !matrix.is_binary() {
        return Err(DecompError::InvalidInput(
            "binary matrix entries must lie in {0, 1}".into(),
        ));
    }

    let started = Instant::now();
    let deadline = time_limit.map(|limit| started + limit);
    let mut stats = RegularStats {
        total_count: 1,
        ..RegularStats::default()
    };

    if is_ternary && !camion::signs_valid(matrix) {
        debug!("ternary signs violate the Camion pattern");
        let mut root = DecompNode::from_matrix_root(matrix.binary_support(), true);
        root.node_type = NodeType::Irregular;
        root.set_attributes();
        stats.total_time = started.elapsed();
        return Ok(RegularityOutcome {
            is_regular: false,
            root,
            minor: Some(Minor {
                matrix: matrix.clone(),
                kind: MinorKind::BadSigning,
            }),
            stats,
        });
    }

    let support = if is_ternary {
        matrix.binary_support()
    } else {
        matrix.clone()
    };
    let mut root = DecompNode::from_matrix_root(support, is_ternary);
    let mut queue = TaskQueue::new();
    queue.push(Task::root());
    drive(&mut root, &mut queue, params, &mut stats, deadline)?;

    root.set_attributes();
    debug_assert_ne!(root.regularity, Regularity::Unknown);
    stats.total_time = started.elapsed();
    Ok(RegularityOutcome {
        is_regular: root.regularity == Regularity::Regular,
        minor: queue.minor.take(),
        root,
        stats,
    })
}

/// Re-runs the driver on an existing node: its children are freed and
/// its type reset, then the subtree is decomposed again.
///
/// On [`DecompError::Timeout`] the node keeps its partial state and
/// remains valid for inspection.
///
/// # Errors
///
/// Returns [`DecompError::Timeout`] if `time_limit` expires.
pub fn complete_decomposition(
    node: &mut DecompNode,
    params: &RegularParams,
    time_limit: Option<Duration>,
) -> Result<RegularStats, DecompError> {
    let started = Instant::now();
    let deadline = time_limit.map(|limit| started + limit);
    let mut stats = RegularStats {
        total_count: 1,
        ..RegularStats::default()
    };

    node.reset_for_completion();
    let mut queue = TaskQueue::new();
    queue.push(Task::root());
    drive(node, &mut queue, params, &mut stats, deadline)?;

    node.set_attributes();
    stats.total_time = started.elapsed();
    Ok(stats)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds default params/stats, hands a context and queue to `body`,
    /// and returns the queue and stats afterwards.
    pub(crate) fn fresh_ctx<F>(body: F) -> (TaskQueue, RegularStats)
    where
        F: FnOnce(&mut DriverCtx<'_>, &mut TaskQueue) -> Result<(), DecompError>,
    {
        let params = RegularParams::default();
        let mut stats = RegularStats::default();
        let mut queue = TaskQueue::new();
        {
            let mut ctx = DriverCtx {
                params: &params,
                stats: &mut stats,
                deadline: None,
            };
            body(&mut ctx, &mut queue).unwrap();
        }
        (queue, stats)
    }

    /// Runs a tester once against a root task.
    pub(crate) fn run_tester<F>(
        ctx: &mut DriverCtx<'_>,
        node: &mut DecompNode,
        queue: &mut TaskQueue,
        tester: F,
    ) -> Result<(), DecompError>
    where
        F: Fn(
            &mut DriverCtx<'_>,
            &mut DecompNode,
            &mut TaskQueue,
            &Task,
        ) -> Result<(), DecompError>,
    {
        let task = Task::root();
        tester(ctx, node, queue, &task)
    }

    #[test]
    fn test_expired_deadline_reports_timeout() {
        let matrix = Matrix::from_rows(vec![vec![1, 1], vec![1, 1]]);
        let params = RegularParams::default();
        let result = test_regularity(&matrix, false, &params, Some(Duration::ZERO));
        assert!(matches!(result, Err(DecompError::Timeout)));
    }

    #[test]
    fn test_task_paths() {
        let root = Task::root();
        let child = root.child(1);
        let grandchild = child.child(0);
        assert_eq!(grandchild.path.as_slice(), &[1, 0]);
    }
}
