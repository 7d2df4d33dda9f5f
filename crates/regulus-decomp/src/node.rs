//! Nodes of the decomposition tree.

use regulus_matrix::Matrix;

/// Three-valued answer of a test that may not have run yet.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TriState {
    /// The test has not produced an answer.
    #[default]
    Unknown,
    /// Definite yes.
    Yes,
    /// Definite no.
    No,
}

/// Regularity verdict of a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Regularity {
    /// Not yet determined.
    #[default]
    Unknown,
    /// The node's matroid is regular.
    Regular,
    /// The node's matroid is irregular.
    Irregular,
}

/// How a node combines with its children.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum NodeType {
    /// Still being decomposed.
    #[default]
    Unknown,
    /// Disconnected; children are the connected components.
    OneSum,
    /// 2-sum of its two children.
    TwoSum,
    /// 3-sum of its two children.
    ThreeSum,
    /// Leaf: the matroid is graphic.
    LeafGraphic,
    /// Leaf: the matroid is cographic.
    LeafCographic,
    /// Leaf: the matroid is R10.
    LeafR10,
    /// Leaf: series-parallel reductions empty the matrix.
    LeafSeriesParallel,
    /// Leaf: the node's matroid is irregular.
    Irregular,
}

/// One node of the decomposition tree.
///
/// A node owns its children; the tree is reached from its root. Progress
/// flags are monotone: once a test has run, its flag never reverts.
#[derive(Clone, Debug)]
pub struct DecompNode {
    /// The (sub)matrix decomposed at this node. For ternary inputs this
    /// is the binary support; signs are verified once at the root.
    pub matrix: Matrix,
    /// Whether the original input was ternary.
    pub is_ternary: bool,
    /// Whether 1-separations have been ruled out.
    pub tested_two_connected: bool,
    /// Result of the graphicness test, if any.
    pub graphicness: TriState,
    /// Result of the cographicness test, if any.
    pub cographicness: TriState,
    /// Whether R10 recognition has run.
    pub tested_r10: bool,
    /// Whether series-parallel reduction has run.
    pub tested_series_parallel: bool,
    /// Irreducible core awaiting the nested minor search.
    pub dense_matrix: Option<Matrix>,
    /// Canonically permuted core with the wheel minor at the top left.
    pub nested_minors_matrix: Option<Matrix>,
    /// Prefix sizes of the nested minor sequence, starting at (3, 3).
    pub nested_minors_sequence: Vec<(usize, usize)>,
    /// Index of the last graphic prefix, once determined.
    pub nested_minors_last_graphic: Option<usize>,
    /// Index of the last cographic prefix, once determined.
    pub nested_minors_last_cographic: Option<usize>,
    /// How this node combines with its children.
    pub node_type: NodeType,
    /// Regularity verdict, filled in by [`DecompNode::set_attributes`].
    pub regularity: Regularity,
    /// Child nodes, owned inline.
    pub children: Vec<DecompNode>,
}

impl DecompNode {
    /// Creates a root node for the given matrix.
    #[must_use]
    pub fn from_matrix_root(matrix: Matrix, is_ternary: bool) -> Self {
        Self::child(matrix, is_ternary)
    }

    pub(crate) fn child(matrix: Matrix, is_ternary: bool) -> Self {
        Self {
            matrix,
            is_ternary,
            tested_two_connected: false,
            graphicness: TriState::Unknown,
            cographicness: TriState::Unknown,
            tested_r10: false,
            tested_series_parallel: false,
            dense_matrix: None,
            nested_minors_matrix: None,
            nested_minors_sequence: Vec::new(),
            nested_minors_last_graphic: None,
            nested_minors_last_cographic: None,
            node_type: NodeType::Unknown,
            regularity: Regularity::Unknown,
            children: Vec::new(),
        }
    }

    /// Resets the node for re-decomposition: drops the children and the
    /// type, keeping the monotone progress flags.
    pub fn reset_for_completion(&mut self) {
        self.children.clear();
        self.node_type = NodeType::Unknown;
        self.regularity = Regularity::Unknown;
    }

    /// Fills in `regularity` bottom-up from the node types.
    ///
    /// Leaves are regular, irregular nodes irregular; a sum node is
    /// regular iff all children are regular and irregular as soon as one
    /// child is.
    pub fn set_attributes(&mut self) {
        for child in &mut self.children {
            child.set_attributes();
        }
        self.regularity = match self.node_type {
            NodeType::LeafGraphic
            | NodeType::LeafCographic
            | NodeType::LeafR10
            | NodeType::LeafSeriesParallel => Regularity::Regular,
            NodeType::Irregular => Regularity::Irregular,
            NodeType::OneSum | NodeType::TwoSum | NodeType::ThreeSum => {
                if self
                    .children
                    .iter()
                    .any(|c| c.regularity == Regularity::Irregular)
                {
                    Regularity::Irregular
                } else if self
                    .children
                    .iter()
                    .all(|c| c.regularity == Regularity::Regular)
                {
                    Regularity::Regular
                } else {
                    Regularity::Unknown
                }
            }
            NodeType::Unknown => Regularity::Unknown,
        };
    }

    /// Iterates over the subtree in preorder.
    pub fn iter(&self) -> impl Iterator<Item = &DecompNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter());
            Some(node)
        })
    }
}
