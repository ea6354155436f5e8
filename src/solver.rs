use log::{debug, trace};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::rc::Rc;

use crate::board::Board;
use crate::error::{Error, Result};

/// Heuristic added to the move count to order the frontier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Priority {
    #[default]
    Manhattan,
    Hamming,
}

impl Priority {
    pub fn score(&self, board: &Board) -> usize {
        match self {
            Priority::Manhattan => board.manhattan(),
            Priority::Hamming => board.hamming(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SolverConfig {
    pub priority: Priority,
}

struct SearchNode {
    board: Board,
    moves: usize,
    priority: usize,
    predecessor: Option<Rc<SearchNode>>,
}

impl SearchNode {
    fn new(
        board: Board,
        moves: usize,
        predecessor: Option<Rc<SearchNode>>,
        priority: Priority,
    ) -> Self {
        let priority = priority.score(&board) + moves;
        Self {
            board,
            moves,
            priority,
            predecessor,
        }
    }

    /// Boards from the root to this node, inclusive.
    fn path(&self) -> Vec<Board> {
        let mut path = vec![self.board.clone()];
        let mut tracer = self.predecessor.as_deref();
        while let Some(node) = tracer {
            path.push(node.board.clone());
            tracer = node.predecessor.as_deref();
        }
        path.reverse();
        path
    }
}

// BinaryHeap is a max-heap, so the ordering is reversed to pop the lowest priority first.
struct Queued(Rc<SearchNode>);

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.0.priority == other.0.priority
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other.0.priority.cmp(&self.0.priority)
    }
}

enum Step {
    Running,
    Found(Rc<SearchNode>),
    Exhausted,
}

/// One A* search over the boards reachable from a seed.
struct Search {
    frontier: BinaryHeap<Queued>,
    priority: Priority,
    expanded: usize,
}

impl Search {
    fn new(seed: Board, priority: Priority) -> Self {
        let mut frontier = BinaryHeap::new();
        frontier.push(Queued(Rc::new(SearchNode::new(seed, 0, None, priority))));
        Self {
            frontier,
            priority,
            expanded: 0,
        }
    }

    /// Finishes if the best frontier node is the goal, otherwise expands it.
    fn step(&mut self) -> Step {
        let Some(Queued(best)) = self.frontier.peek() else {
            return Step::Exhausted;
        };
        if best.board.is_goal() {
            return Step::Found(Rc::clone(best));
        }

        let Some(Queued(node)) = self.frontier.pop() else {
            return Step::Exhausted;
        };
        self.expanded += 1;
        trace!(
            "expanding node with priority {} at {} moves",
            node.priority,
            node.moves
        );

        for neighbor in node.board.neighbors() {
            // Only the board we just came from is skipped; other cycles stay possible.
            if node
                .predecessor
                .as_ref()
                .is_some_and(|previous| previous.board == neighbor)
            {
                continue;
            }
            let child = SearchNode::new(
                neighbor,
                node.moves + 1,
                Some(Rc::clone(&node)),
                self.priority,
            );
            self.frontier.push(Queued(Rc::new(child)));
        }

        Step::Running
    }
}

/// Finds a minimum-move solution for a board, or proves it has none by
/// solving its twin first.
///
/// The whole search runs inside the constructor.
#[derive(Debug, Clone)]
pub struct Solver {
    initial: Board,
    solution: Option<Vec<Board>>,
    expanded: (usize, usize),
}

impl Solver {
    pub fn new(initial: Board) -> Self {
        Self::with_config(initial, SolverConfig::default())
    }

    pub fn with_config(initial: Board, config: SolverConfig) -> Self {
        debug!(
            "solving {}x{} board with {:?} priority",
            initial.dimension(),
            initial.dimension(),
            config.priority
        );

        let mut primary = Search::new(initial.clone(), config.priority);
        let mut shadow = Search::new(initial.twin(), config.priority);

        // Primary steps first each round, so it wins ties with the shadow.
        let goal = loop {
            match primary.step() {
                Step::Found(node) => break Some(node),
                Step::Exhausted => break None,
                Step::Running => {}
            }
            if let Step::Found(_) = shadow.step() {
                break None;
            }
        };

        let solution = goal.map(|node| node.path());
        let expanded = (primary.expanded, shadow.expanded);
        debug!(
            "search finished: solvable={}, moves={}, expanded primary={} shadow={}",
            solution.is_some(),
            solution.as_ref().map_or(-1, |path| path.len() as isize - 1),
            expanded.0,
            expanded.1
        );

        Self {
            initial,
            solution,
            expanded,
        }
    }

    pub fn initial(&self) -> &Board {
        &self.initial
    }

    pub fn is_solvable(&self) -> bool {
        self.solution.is_some()
    }

    /// Minimum number of slides to the goal, or `-1` when unsolvable.
    pub fn moves(&self) -> isize {
        match &self.solution {
            Some(path) => path.len() as isize - 1,
            None => -1,
        }
    }

    /// Boards from the initial one to the goal, inclusive; `None` when unsolvable.
    pub fn solution(&self) -> Option<&[Board]> {
        self.solution.as_deref()
    }

    /// Nodes expanded by the primary and shadow searches.
    pub fn expanded(&self) -> (usize, usize) {
        self.expanded
    }
}

impl TryFrom<Option<Board>> for Solver {
    type Error = Error;

    fn try_from(initial: Option<Board>) -> Result<Self> {
        initial.map(Solver::new).ok_or(Error::MissingBoard)
    }
}
