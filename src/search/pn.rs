//! Proof-number search engine
//!
//! One top-level decision per `compute_response` call:
//!
//! 1. The very first move of a game is always the centre; nothing is searched.
//! 2. A fresh OR root is created at the move that was just played.
//! 3. Repeatedly: undo the previous walk, descend along the most-proving path
//!    while playing its moves, expand the leaf and propagate the new numbers
//!    back to the root. Stops when the root is proved, disproved, or the node
//!    budget runs out.
//! 4. A move is picked from the root's children (see [`PnSearch::select_next_move`]).
//!
//! The board, hash and selector are one scratch workspace. Every walk plays
//! moves on top of the committed position, and every restart takes them off
//! again in reverse order.

use std::time::{Duration, Instant};

use log::{debug, info, trace};

use crate::board::{PackedBoard, Pos, Stone};
use crate::engine::Engine;
use crate::eval::{classify_move, PatternScore, Selector, ATTACKS, FOUR_ATTACK, THREE_ATTACK};

use super::config::SearchConfig;
use super::node::{NodeId, NodeKind, PnNode, PnTree, INFINITY};
use super::threat::ForcedWinFinder;
use super::tt::TranspositionTable;
use super::zobrist::ZobristHash;

/// Counters for one top-level search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Leaves expanded (including transposition hits)
    pub expansions: usize,
    /// Expansions answered by sharing another node's children
    pub transpositions: usize,
    /// Expansions answered by the forced-win finder
    pub forced_wins: usize,
    /// Expansions that scored and listed candidates
    pub evaluations: usize,
    /// Threat moves tried by the forced-win finder
    pub finder_nodes: u64,
    /// Nodes in the tree when the search stopped
    pub tree_size: usize,
    pub elapsed: Duration,
}

/// Gomoku engine driven by proof-number search.
///
/// # Example
///
/// ```
/// use gomoku::{Engine, PnSearch, Pos, SearchConfig};
///
/// let mut engine = PnSearch::new(SearchConfig::default().with_node_budget(500));
/// assert_eq!(engine.compute_response(), Some(Pos::CENTER));
///
/// engine.notify_move(Pos::CENTER);
/// let reply = engine.compute_response();
/// assert!(reply.is_some());
/// assert_ne!(reply, Some(Pos::CENTER));
/// ```
pub struct PnSearch {
    config: SearchConfig,

    /// Committed stones plus whatever the current walk has played
    board: PackedBoard,
    hash: ZobristHash,
    selector: Selector,
    /// Selector state of the committed position
    base_selector: Selector,
    tt: TranspositionTable,
    tree: PnTree,
    /// Moves played by the current walk, in order
    history: Vec<Pos>,
    /// Nodes visited by the current walk, root first
    walk: Vec<NodeId>,
    /// Side to play the next move of the current walk
    player: Stone,

    /// Move announced by `notify_move` but not committed yet
    last_move: Option<Pos>,
    /// Side that played `last_move`
    last_mover: Stone,
    move_number: u32,

    stats: SearchStats,
}

impl PnSearch {
    #[must_use]
    pub fn new(config: SearchConfig) -> Self {
        Self {
            config,
            board: PackedBoard::new(),
            hash: ZobristHash::new(),
            selector: Selector::new(),
            base_selector: Selector::new(),
            tt: TranspositionTable::new(),
            tree: PnTree::new(),
            history: Vec::new(),
            walk: Vec::new(),
            player: Stone::Black,
            last_move: None,
            // black opens, so the "previous" mover is white
            last_mover: Stone::White,
            move_number: 0,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Tree left behind by the last search (empty before the first one).
    #[must_use]
    pub fn tree(&self) -> &PnTree {
        &self.tree
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Side the next `compute_response` plays for.
    #[must_use]
    pub fn side_to_move(&self) -> Stone {
        self.last_mover.opponent()
    }

    /// Number of moves announced so far.
    #[must_use]
    pub fn move_number(&self) -> u32 {
        self.move_number
    }

    /// Committed position. The pending last move is not on it yet.
    #[must_use]
    pub fn board(&self) -> &PackedBoard {
        &self.board
    }

    /// Pick the answer from the root's children.
    ///
    /// - proved root: the first proved child
    /// - disproved root: the child with the largest subtree, first on ties
    /// - otherwise: the child with the smallest proof/disproof ratio, first on ties
    ///
    /// `None` when there is no tree or the root has no children.
    #[must_use]
    pub fn select_next_move(&self) -> Option<Pos> {
        let root = self.tree.root()?;
        let children = self.tree.children(root);
        let &first = children.first()?;
        let node = self.tree.get(root);

        let best = if node.is_proved() {
            children
                .iter()
                .copied()
                .find(|&c| self.tree.get(c).is_proved())
                .unwrap_or(first)
        } else if node.is_disproved() {
            let mut best = first;
            for &child in &children[1..] {
                if self.tree.get(child).subtree_size > self.tree.get(best).subtree_size {
                    best = child;
                }
            }
            best
        } else {
            let mut best = first;
            let mut best_ratio = self.tree.get(first).ratio();
            for &child in &children[1..] {
                let ratio = self.tree.get(child).ratio();
                if best_ratio > ratio {
                    best = child;
                    best_ratio = ratio;
                }
            }
            best
        };
        Some(self.tree.get(best).pos)
    }

    fn search(&mut self, root: NodeId) {
        self.tt.clear();

        self.iterate(root);
        // a single reply is forced, nothing to gain from searching it
        if self.tree.children(root).len() == 1 {
            self.restart_state();
            return;
        }

        // walks can end on an already expanded leaf, so iterations are capped too
        let budget = self.config.node_budget;
        let mut iterations = 1;
        while !self.is_resolved(root) && self.tree.len() < budget && iterations < budget {
            self.iterate(root);
            iterations += 1;
        }
        self.restart_state();
    }

    /// One restart, walk, expand and propagate round.
    fn iterate(&mut self, root: NodeId) {
        self.restart_state();
        let leaf = self.select_most_proving(root);
        self.develop(leaf);
        self.tree.update_ancestors(leaf);
        // a walk through a shared child list left the parent chain of the
        // node it entered, so the walked path is recomputed as well
        for &id in self.walk.iter().rev() {
            self.tree.update_node(id);
        }
    }

    fn is_resolved(&self, id: NodeId) -> bool {
        let node = self.tree.get(id);
        node.is_proved() || node.is_disproved()
    }

    /// Descend from `root` to a leaf, playing every move on the way.
    fn select_most_proving(&mut self, root: NodeId) -> NodeId {
        self.walk.clear();
        let mut current = root;
        loop {
            let pos = self.tree.get(current).pos;
            self.apply(pos);
            self.walk.push(current);
            if self.tree.children(current).is_empty() {
                return current;
            }
            current = self.most_proving_child(current);
        }
    }

    /// First child carrying the node's own number, or the first child with
    /// the smallest number when the cached value is stale.
    fn most_proving_child(&self, id: NodeId) -> NodeId {
        let node = self.tree.get(id);
        let number = |c: NodeId| {
            let child = self.tree.get(c);
            match node.kind {
                NodeKind::Or => child.proof,
                NodeKind::And => child.disproof,
            }
        };
        let target = match node.kind {
            NodeKind::Or => node.proof,
            NodeKind::And => node.disproof,
        };

        let children = self.tree.children(id);
        let mut fallback = children[0];
        for &child in children {
            let value = number(child);
            if value == target {
                return child;
            }
            if value < number(fallback) {
                fallback = child;
            }
        }
        fallback
    }

    /// Generate the children of a leaf.
    fn develop(&mut self, id: NodeId) {
        // decided leaves (forced wins) are final
        if self.tree.get(id).expanded || self.is_resolved(id) {
            return;
        }
        self.tree.get_mut(id).expanded = true;
        self.stats.expansions += 1;

        if let Some(owner) = self.tt.lookup_or_register(self.hash.current(), id) {
            trace!("{} transposes to {}", id, owner);
            self.tree.share_children(id, owner);
            self.stats.transpositions += 1;
            return;
        }

        let player = self.player;
        let threat = self.tree.get(id).threat;

        // after a four the reply is forced; the selector already knows it
        if threat & FOUR_ATTACK == 0 {
            let max_threes = if threat & THREE_ATTACK != 0 { 1 } else { 2 };
            let mut finder = ForcedWinFinder::new(&mut self.board, self.config.forced_win_depth);
            let win = finder.winning_move(player, max_threes);
            self.stats.finder_nodes += finder.nodes();

            if let Some(win) = win {
                trace!("{} has a forced win starting at {}", id, win);
                self.stats.forced_wins += 1;
                self.add_winning_child(id, win);
                return;
            }
        }

        self.stats.evaluations += 1;
        self.selector.assign_scores(&self.board, player);
        let cut = (f32::from(self.selector.best_score()) * self.config.selector_cut) as u16;
        let candidates: Vec<_> = self
            .selector
            .iter()
            .enumerate()
            .take_while(|(i, c)| *i == 0 || c.score_for(player) >= cut)
            .map(|(_, c)| *c)
            .collect();

        let kind = self.tree.get(id).kind.flip();
        for candidate in candidates {
            if candidate.score_for(player) == PatternScore::FIVE {
                self.add_winning_child(id, candidate.pos);
                return;
            }
            let threats = candidate.threats_for(player) & ATTACKS;
            self.tree.add_child(id, PnNode::new(candidate.pos, kind, 1, 1, threats));
        }
        trace!("{} expanded into {} children", id, self.tree.children(id).len());
    }

    /// Add the only child of `id`: a move that wins for the side to play it.
    fn add_winning_child(&mut self, id: NodeId, pos: Pos) {
        let kind = self.tree.get(id).kind;
        let (proof, disproof) = match kind {
            NodeKind::Or => (0, INFINITY),
            NodeKind::And => (INFINITY, 0),
        };
        self.tree.add_child(id, PnNode::new(pos, kind.flip(), proof, disproof, u8::MAX));
    }

    /// Play `pos` for the side to move of the current walk.
    fn apply(&mut self, pos: Pos) {
        self.board.place(pos, self.player);
        self.history.push(pos);
        self.hash.toggle(pos, self.player);
        self.selector.shallow_update(&self.board, pos);
        self.player = self.player.opponent();
    }

    /// Take back every move of the current walk.
    fn restart_state(&mut self) {
        while let Some(pos) = self.history.pop() {
            self.board.remove(pos);
        }
        self.selector.clone_from(&self.base_selector);
        self.hash.restart();
        self.player = self.last_mover;
    }
}

impl Default for PnSearch {
    fn default() -> Self {
        Self::new(SearchConfig::default())
    }
}

impl Engine for PnSearch {
    fn notify_move(&mut self, pos: Pos) {
        if let Some(previous) = self.last_move {
            self.board.place(previous, self.last_mover);
            self.hash.commit(previous, self.last_mover);
            self.base_selector.full_update(&self.board, previous);
        }
        self.last_move = Some(pos);
        self.last_mover = self.last_mover.opponent();
        self.move_number += 1;
        debug!("move {}: {:?} plays {}", self.move_number, self.last_mover, pos);
    }

    fn compute_response(&mut self) -> Option<Pos> {
        let start = Instant::now();
        self.stats = SearchStats::default();

        let Some(last_move) = self.last_move else {
            self.tree.clear();
            info!("opening move {}", Pos::CENTER);
            return Some(Pos::CENTER);
        };

        let threat = classify_move(&self.board, last_move, self.last_mover) & ATTACKS;
        let root = self
            .tree
            .reset(PnNode::new(last_move, NodeKind::Or, 1, 1, threat));
        self.search(root);

        let best = self.select_next_move();
        self.stats.tree_size = self.tree.len();
        self.stats.elapsed = start.elapsed();

        let node = self.tree.get(root);
        info!(
            "{:?} to move: {} (proof {}, disproof {}, {} nodes, {:.1?})",
            self.side_to_move(),
            best.map_or_else(|| "no move".to_string(), |p| p.to_string()),
            node.proof,
            node.disproof,
            self.stats.tree_size,
            self.stats.elapsed,
        );
        debug!("{:?}", self.stats);
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::completes_five;

    fn play(engine: &mut PnSearch, moves: &[(u8, u8)]) {
        for &(r, c) in moves {
            engine.notify_move(Pos::new(r, c));
        }
    }

    /// Play the path from the root down to `id`, as a walk would.
    fn descend(engine: &mut PnSearch, id: NodeId) {
        engine.restart_state();
        for pos in engine.tree.path(id) {
            engine.apply(pos);
        }
    }

    fn engine_with_budget(budget: usize) -> PnSearch {
        PnSearch::new(SearchConfig::default().with_node_budget(budget))
    }

    #[test]
    fn test_first_move_is_center() {
        let mut engine = PnSearch::default();
        assert_eq!(engine.compute_response(), Some(Pos::CENTER));
        assert!(engine.tree().is_empty());
        assert_eq!(engine.stats().expansions, 0);
        assert_eq!(engine.select_next_move(), None);
    }

    #[test]
    fn test_notify_commits_previous_move() {
        let mut engine = PnSearch::default();
        assert_eq!(engine.side_to_move(), Stone::Black);

        play(&mut engine, &[(7, 7), (8, 8), (6, 6)]);
        assert_eq!(engine.move_number(), 3);
        assert_eq!(engine.side_to_move(), Stone::White);
        assert_eq!(engine.board().get(Pos::new(7, 7)).stone(), Some(Stone::Black));
        assert_eq!(engine.board().get(Pos::new(8, 8)).stone(), Some(Stone::White));
        // pending until the next notification
        assert!(engine.board().is_empty(Pos::new(6, 6)));
        assert_eq!(engine.board().stone_count(), 2);
    }

    #[test]
    fn test_search_leaves_committed_state_untouched() {
        let mut engine = engine_with_budget(200);
        play(&mut engine, &[(7, 7), (8, 8), (6, 7)]);
        let board = engine.board().clone();
        let hash = engine.hash.current();

        let reply = engine.compute_response();
        assert!(reply.is_some());
        assert_eq!(engine.board(), &board);
        assert_eq!(engine.hash.current(), hash);
        assert!(engine.history.is_empty());
        assert_eq!(engine.player, engine.last_mover);
    }

    #[test]
    fn test_takes_immediate_win() {
        let mut engine = engine_with_budget(1_000);
        play(
            &mut engine,
            &[(7, 3), (0, 0), (7, 4), (0, 2), (7, 5), (0, 4), (7, 6), (0, 6)],
        );
        assert_eq!(engine.side_to_move(), Stone::Black);

        let reply = engine.compute_response().unwrap();
        let mut board = engine.board().clone();
        board.place(Pos::new(0, 6), Stone::White);
        assert!(completes_five(&board, reply, Stone::Black));

        let root = engine.tree().root().unwrap();
        assert!(engine.tree().get(root).is_proved());
        assert_eq!(engine.tree().children(root).len(), 1);
    }

    #[test]
    fn test_blocks_opponent_four() {
        let mut engine = engine_with_budget(1_000);
        play(
            &mut engine,
            &[(3, 2), (3, 3), (7, 7), (3, 4), (11, 11), (3, 5), (7, 11), (3, 6)],
        );
        assert_eq!(engine.compute_response(), Some(Pos::new(3, 7)));
        let root = engine.tree().root().unwrap();
        assert_eq!(engine.tree().children(root).len(), 1);
    }

    #[test]
    fn test_budget_limits_expansions() {
        let mut engine = engine_with_budget(5);
        play(&mut engine, &[(7, 7), (8, 8), (6, 8), (8, 6)]);

        assert!(engine.compute_response().is_some());
        assert!(engine.stats().expansions <= 5);
        assert!(engine.stats().tree_size >= 1);
    }

    #[test]
    fn test_transposition_shares_children() {
        let mut engine = engine_with_budget(100);
        play(&mut engine, &[(7, 7), (8, 8)]);

        let (p1, q1, p2) = (Pos::new(6, 7), Pos::new(9, 9), Pos::new(7, 6));
        let root = engine.tree.reset(PnNode::new(Pos::new(8, 8), NodeKind::Or, 1, 1, 0));
        let a = engine.tree.add_child(root, PnNode::new(p1, NodeKind::And, 1, 1, 0));
        let b = engine.tree.add_child(a, PnNode::new(q1, NodeKind::Or, 1, 1, 0));
        let first = engine.tree.add_child(b, PnNode::new(p2, NodeKind::And, 1, 1, 0));
        let d = engine.tree.add_child(root, PnNode::new(p2, NodeKind::And, 1, 1, 0));
        let e = engine.tree.add_child(d, PnNode::new(q1, NodeKind::Or, 1, 1, 0));
        let second = engine.tree.add_child(e, PnNode::new(p1, NodeKind::And, 1, 1, 0));

        descend(&mut engine, first);
        engine.develop(first);
        assert!(!engine.tree.children(first).is_empty());
        let evaluations = engine.stats.evaluations;

        descend(&mut engine, second);
        engine.develop(second);
        engine.restart_state();

        assert_eq!(engine.tree.children(second), engine.tree.children(first));
        assert_eq!(engine.stats.transpositions, 1);
        assert_eq!(engine.stats.evaluations, evaluations);
    }

    #[test]
    fn test_shared_node_numbers_follow_owner() {
        let mut engine = engine_with_budget(100);
        play(&mut engine, &[(7, 7), (8, 8)]);

        // both transpositions arrive through a four, so no forced win is tried
        let (p1, q1, p2) = (Pos::new(6, 7), Pos::new(9, 9), Pos::new(7, 6));
        let root = engine.tree.reset(PnNode::new(Pos::new(8, 8), NodeKind::Or, 1, 1, 0));
        let a = engine.tree.add_child(root, PnNode::new(p1, NodeKind::And, 1, 1, 0));
        let b = engine.tree.add_child(a, PnNode::new(q1, NodeKind::Or, 1, 1, 0));
        let first = engine.tree.add_child(b, PnNode::new(p2, NodeKind::And, 1, 1, FOUR_ATTACK));
        let d = engine.tree.add_child(root, PnNode::new(p2, NodeKind::And, 1, 1, 0));
        let e = engine.tree.add_child(d, PnNode::new(q1, NodeKind::Or, 1, 1, 0));
        let second = engine.tree.add_child(e, PnNode::new(p1, NodeKind::And, 1, 1, FOUR_ATTACK));

        for node in [first, second] {
            descend(&mut engine, node);
            engine.develop(node);
            engine.tree.update_ancestors(node);
        }
        engine.restart_state();
        assert_eq!(engine.stats.transpositions, 1);

        // refute every reply below the owner
        let replies = engine.tree.children(first).to_vec();
        assert!(!replies.is_empty());
        for &reply in &replies {
            let node = engine.tree.get_mut(reply);
            node.proof = INFINITY;
            node.disproof = 0;
            engine.tree.update_ancestors(reply);
        }
        assert!(engine.tree.get(first).is_disproved());
        assert!(!engine.tree.get(second).is_disproved());
        assert!(!engine.is_resolved(root));
        let before = (engine.tree.get(root).proof, engine.tree.get(root).disproof);

        engine.iterate(root);
        engine.restart_state();

        assert!(engine.tree.get(second).is_disproved());
        assert!(engine.tree.get(d).is_disproved());
        assert!(engine.tree.get(root).is_disproved());
        let after = (engine.tree.get(root).proof, engine.tree.get(root).disproof);
        assert_ne!(before, after);
    }

    #[test]
    fn test_never_expands_twice() {
        let mut engine = engine_with_budget(100);
        play(&mut engine, &[(7, 7), (8, 8)]);
        let root = engine.tree.reset(PnNode::new(Pos::new(8, 8), NodeKind::Or, 1, 1, 0));

        descend(&mut engine, root);
        engine.develop(root);
        let children = engine.tree.children(root).to_vec();
        engine.develop(root);
        engine.restart_state();

        assert_eq!(engine.tree.children(root), children.as_slice());
        assert_eq!(engine.stats.expansions, 1);
    }

    fn tree_for_selection(root: (u32, u32), children: &[(u32, u32, u32)]) -> PnSearch {
        let mut engine = PnSearch::default();
        let (proof, disproof) = root;
        let id = engine.tree.reset(PnNode::new(Pos::CENTER, NodeKind::Or, proof, disproof, 0));
        for (i, &(proof, disproof, size)) in children.iter().enumerate() {
            let mut node = PnNode::new(Pos::new(0, i as u8), NodeKind::And, proof, disproof, 0);
            node.subtree_size = size;
            engine.tree.add_child(id, node);
        }
        engine
    }

    #[test]
    fn test_select_proved_child() {
        let engine = tree_for_selection((0, 7), &[(2, 3, 1), (0, INFINITY, 1)]);
        assert_eq!(engine.select_next_move(), Some(Pos::new(0, 1)));
    }

    #[test]
    fn test_select_largest_subtree_when_disproved() {
        let engine = tree_for_selection((INFINITY, 0), &[(INFINITY, 0, 3), (INFINITY, 0, 9), (INFINITY, 0, 9)]);
        assert_eq!(engine.select_next_move(), Some(Pos::new(0, 1)));
    }

    #[test]
    fn test_select_smallest_ratio() {
        let engine = tree_for_selection((1, 9), &[(4, 2, 1), (1, 4, 1), (2, 2, 1)]);
        assert_eq!(engine.select_next_move(), Some(Pos::new(0, 1)));
    }

    #[test]
    fn test_ratio_ties_keep_first() {
        let engine = tree_for_selection((2, 8), &[(2, 4, 1), (1, 2, 1), (3, 6, 1)]);
        assert_eq!(engine.select_next_move(), Some(Pos::new(0, 0)));
    }

    #[test]
    fn test_most_proving_child_falls_back_to_minimum() {
        let mut engine = tree_for_selection((1, 9), &[(4, 2, 1), (2, 4, 1), (2, 2, 1)]);
        let root = NodeId(0);
        // stale cached proof that matches no child
        assert_eq!(engine.most_proving_child(root), NodeId(2));

        engine.tree.get_mut(root).proof = 4;
        assert_eq!(engine.most_proving_child(root), NodeId(1));
    }
}
