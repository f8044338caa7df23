//! Explicit-stack search over an arena of search nodes.
//!
//! Nodes live in a flat `Vec` and refer to each other by `NodeId`, so the
//! whole exploration is owned by one `SearchTree` and dropped when the
//! search returns.
//!
//! The traversal pops a node and then:
//!
//! 1. resolves it directly if its queue is over;
//! 2. otherwise, if it has no children yet, expands one child per legal
//!    action and pushes the parent back followed by the children;
//! 3. otherwise resolves it from its (already resolved) children.
//!
//! The terminal check always comes first, so a finished root is scored
//! without expansion exactly as in the recursive form.

use std::marker::PhantomData;

use smallvec::SmallVec;
use tracing::trace;

use crate::combat::Combatant;
use crate::core::{BattleError, PartyId, Result};
use crate::queue::TurnQueue;

use super::stats::SearchStats;
use super::{signed_score, successor, terminal_score};

/// Index into the `SearchTree` node arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// One explored queue state.
#[derive(Debug)]
pub struct SearchNode<Q> {
    /// The state. Dropped once the node is resolved.
    queue: Option<Q>,

    /// The party that moved to produce this state (`None` at the root).
    pub parent_peek: Option<PartyId>,

    /// `None` until expanded.
    pub children: Option<SmallVec<[NodeId; 2]>>,

    /// `None` until resolved.
    pub score: Option<i64>,

    /// Front party of the state, recorded when the node is resolved.
    pub front: Option<PartyId>,

    /// Plies from the root.
    pub depth: u16,
}

impl<Q> SearchNode<Q> {
    fn new(queue: Q, parent_peek: Option<PartyId>, depth: u16) -> Self {
        Self {
            queue: Some(queue),
            parent_peek,
            children: None,
            score: None,
            front: None,
            depth,
        }
    }

    fn resolve(&mut self, score: i64, front: PartyId) {
        self.score = Some(score);
        self.front = Some(front);
        self.queue = None;
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.score.is_some()
    }

    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.children.is_some()
    }

    /// Score from the perspective of the party that produced this node.
    fn score_for_parent(&self) -> Option<i64> {
        let score = self.score?;
        match (self.front, self.parent_peek) {
            (Some(front), Some(mover)) => Some(signed_score(score, front, mover)),
            _ => Some(score),
        }
    }
}

/// Arena owning every node of one search invocation.
#[derive(Debug)]
pub struct SearchTree<C, Q> {
    nodes: Vec<SearchNode<Q>>,
    root: NodeId,
    stats: SearchStats,
    _combatant: PhantomData<fn() -> C>,
}

impl<C, Q> SearchTree<C, Q>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    /// Create a tree whose root is a copy of `queue`.
    pub fn new(queue: &Q) -> Self {
        let mut tree = Self {
            nodes: Vec::with_capacity(64),
            root: NodeId::new(0),
            stats: SearchStats::new(),
            _combatant: PhantomData,
        };
        tree.alloc(SearchNode::new(queue.copy(), None, 0));
        tree
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, id: NodeId) -> &SearchNode<Q> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn get_mut(&mut self, id: NodeId) -> &mut SearchNode<Q> {
        &mut self.nodes[id.index()]
    }

    fn alloc(&mut self, node: SearchNode<Q>) -> NodeId {
        let id = NodeId::new(self.nodes.len() as u32);
        self.stats.max_depth = self.stats.max_depth.max(node.depth);
        self.stats.nodes_allocated += 1;
        self.nodes.push(node);
        id
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Run the traversal to completion and return the root's score.
    pub fn solve(&mut self) -> Result<i64> {
        let mut stack = vec![self.root];

        while let Some(id) = stack.pop() {
            self.stats.peak_frontier = self.stats.peak_frontier.max(stack.len() + 1);

            let node = self.get_mut(id);
            let Some(mut queue) = node.queue.take() else {
                continue;
            };
            let depth = node.depth;
            let expanded = node.children.clone();

            if queue.is_over() {
                let score = terminal_score::<C, Q>(&mut queue)?;
                let front = queue.peek()?;
                self.get_mut(id).resolve(score, front);
                self.stats.terminal_nodes += 1;
                continue;
            }

            match expanded {
                None => {
                    let mover = queue.peek()?;
                    let actions = queue.party(mover).available_actions();
                    let mut children: SmallVec<[NodeId; 2]> = SmallVec::new();
                    for action in actions.iter() {
                        let (child, _) = successor::<C, Q>(&queue, action)?;
                        children.push(self.alloc(SearchNode::new(child, Some(mover), depth + 1)));
                    }
                    trace!(%id, children = children.len(), depth, "expanded");
                    self.stats.nodes_expanded += 1;

                    let node = self.get_mut(id);
                    node.queue = Some(queue);
                    node.children = Some(children.clone());
                    stack.push(id);
                    stack.extend(children);
                }
                Some(children) => {
                    let mover = queue.peek()?;
                    let best = children
                        .iter()
                        .filter_map(|child| self.get(*child).score_for_parent())
                        .max()
                        .ok_or(BattleError::NoLegalAction(mover))?;
                    self.get_mut(id).resolve(best, mover);
                }
            }
        }

        // The root is pushed first, so it is always the last node resolved.
        self.get(self.root).score.ok_or(BattleError::EmptyQueue)
    }
}

/// Score of `queue` for its mover.
pub fn score<C, Q>(queue: &Q) -> Result<i64>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    SearchTree::<C, Q>::new(queue).solve()
}

/// Score of `queue` for its mover, plus traversal statistics.
pub fn score_with_stats<C, Q>(queue: &Q) -> Result<(i64, SearchStats)>
where
    C: Combatant,
    Q: TurnQueue<C>,
{
    let mut tree = SearchTree::<C, Q>::new(queue);
    let score = tree.solve()?;
    Ok((score, tree.stats().clone()))
}
