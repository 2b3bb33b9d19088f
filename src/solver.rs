//! Lockstep A* over a puzzle and its twin.
//!
//! Exactly one of a state and its [`PuzzleState::twin`] can reach the goal, so
//! both are searched one expansion at a time. Whichever track dequeues a goal
//! first settles solvability; when it is the primary track, its node chain is
//! an optimal solution.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use log::{debug, info, trace, warn};

use crate::board::PuzzleState;
use crate::error::SolveError;

const TRACE_INTERVAL: usize = 10_000;

/// A state reached after `moves` moves, linked to the node it was expanded from.
#[derive(Debug, Clone)]
struct SearchNode {
    state: PuzzleState,
    moves: usize,
    priority: usize,
    /// Arena index of the parent, `None` for the root.
    parent: Option<usize>,
}

impl SearchNode {
    fn new(state: PuzzleState, moves: usize, parent: Option<usize>) -> Self {
        let priority = moves + state.manhattan();
        Self {
            state,
            moves,
            priority,
            parent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierEntry {
    priority: usize,
    moves: usize,
    node: usize,
}

/// Reversed so `BinaryHeap` pops the lowest priority first; among equal
/// priorities the deeper node wins.
impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .cmp(&self.priority)
            .then_with(|| self.moves.cmp(&other.moves))
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

enum TrackStep {
    Goal(usize),
    Expanded,
    Exhausted,
}

/// One best-first search: the node arena plus its frontier.
struct Track {
    nodes: Vec<SearchNode>,
    frontier: BinaryHeap<FrontierEntry>,
    expanded: usize,
}

impl Track {
    fn new(root: PuzzleState) -> Self {
        let mut track = Self {
            nodes: Vec::new(),
            frontier: BinaryHeap::new(),
            expanded: 0,
        };
        track.push(SearchNode::new(root, 0, None));
        track
    }

    fn push(&mut self, node: SearchNode) {
        let entry = FrontierEntry {
            priority: node.priority,
            moves: node.moves,
            node: self.nodes.len(),
        };
        self.nodes.push(node);
        self.frontier.push(entry);
    }

    /// Dequeues the best node and, unless it is the goal, queues its successors.
    ///
    /// A successor equal to the expanded node's parent is dropped. On this move
    /// graph that is the only way a freshly generated state can repeat; it is
    /// not general cycle detection.
    fn step(&mut self) -> TrackStep {
        let Some(entry) = self.frontier.pop() else {
            return TrackStep::Exhausted;
        };
        self.expanded += 1;

        let current = &self.nodes[entry.node];
        if current.state.is_goal() {
            return TrackStep::Goal(entry.node);
        }

        let moves = current.moves + 1;
        let previous = current.parent.map(|index| &self.nodes[index].state);
        let successors: Vec<PuzzleState> = current
            .state
            .neighbors()
            .filter(|next| previous != Some(next))
            .collect();

        for state in successors {
            self.push(SearchNode::new(state, moves, Some(entry.node)));
        }

        TrackStep::Expanded
    }

    /// States from the root to `end`.
    fn path(&self, end: usize) -> Vec<PuzzleState> {
        let mut path = Vec::with_capacity(self.nodes[end].moves + 1);
        let mut cursor = Some(end);
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            path.push(node.state.clone());
            cursor = node.parent;
        }
        path.reverse();
        path
    }
}

/// Both tracks and the number of lockstep rounds run so far.
struct Search {
    primary: Track,
    companion: Option<Track>,
    iterations: usize,
}

impl Search {
    fn new(initial: &PuzzleState) -> Self {
        debug!(
            "solving {0}x{0} puzzle, manhattan {1}, hamming {2}",
            initial.dimension(),
            initial.manhattan(),
            initial.hamming()
        );

        Self {
            primary: Track::new(initial.clone()),
            companion: initial.twin().map(Track::new),
            iterations: 0,
        }
    }

    /// Runs one lockstep round. Returns `None` while undecided, otherwise the
    /// primary track's goal node, or `Some(None)` when the puzzle is unsolvable.
    ///
    /// The companion is only stepped when the primary track expanded a node.
    fn round(&mut self) -> Option<Option<usize>> {
        self.iterations += 1;

        if self.iterations % TRACE_INTERVAL == 0 {
            trace!(
                "iteration {}: frontier {} / twin frontier {}",
                self.iterations,
                self.primary.frontier.len(),
                self.companion.as_ref().map_or(0, |track| track.frontier.len())
            );
        }

        match self.primary.step() {
            TrackStep::Goal(node) => return Some(Some(node)),
            TrackStep::Exhausted => return Some(None),
            TrackStep::Expanded => {}
        }

        match self.companion.as_mut().map(Track::step) {
            Some(TrackStep::Goal(_)) => Some(None),
            _ => None,
        }
    }

    fn finish(self, initial: PuzzleState, goal: Option<usize>) -> Solver {
        let expanded = self.primary.expanded
            + self.companion.as_ref().map_or(0, |track| track.expanded);
        let solution = goal.map(|node| self.primary.path(node));

        match &solution {
            Some(path) => info!(
                "solved in {} moves after {} iterations ({} nodes expanded)",
                path.len() - 1,
                self.iterations,
                expanded
            ),
            None => info!(
                "unsolvable, twin reached the goal after {} iterations ({} nodes expanded)",
                self.iterations, expanded
            ),
        }

        Solver {
            initial,
            solution,
            iterations: self.iterations,
            expanded,
        }
    }
}

/// Solves a puzzle on construction; the accessors only read the result.
#[derive(Debug, Clone)]
pub struct Solver {
    initial: PuzzleState,
    solution: Option<Vec<PuzzleState>>,
    iterations: usize,
    expanded: usize,
}

impl Solver {
    pub fn new(initial: PuzzleState) -> Self {
        let mut search = Search::new(&initial);
        let goal = loop {
            if let Some(goal) = search.round() {
                break goal;
            }
        };
        search.finish(initial, goal)
    }

    /// Like [`Solver::new`], rejecting a missing state.
    pub fn from_option(initial: Option<PuzzleState>) -> Result<Self, SolveError> {
        let initial = initial.ok_or(SolveError::MissingInitialState)?;
        Ok(Self::new(initial))
    }

    /// Gives up once `limit` lockstep rounds have run without a verdict.
    pub fn with_iteration_limit(initial: PuzzleState, limit: usize) -> Result<Self, SolveError> {
        let mut search = Search::new(&initial);
        let goal = loop {
            if search.iterations >= limit {
                warn!("iteration limit of {} reached without a verdict", limit);
                return Err(SolveError::IterationLimitExceeded { limit });
            }
            if let Some(goal) = search.round() {
                break goal;
            }
        };
        Ok(search.finish(initial, goal))
    }

    pub fn initial(&self) -> &PuzzleState {
        &self.initial
    }

    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Length of the shortest solution, `None` when unsolvable.
    pub fn moves(&self) -> Option<usize> {
        self.solution.as_ref().map(|path| path.len() - 1)
    }

    /// States from the initial board to the goal, `None` when unsolvable.
    pub fn solution(&self) -> Option<&[PuzzleState]> {
        self.solution.as_deref()
    }

    /// Lockstep rounds run before the verdict.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Nodes removed from either frontier.
    pub fn expanded(&self) -> usize {
        self.expanded
    }
}
