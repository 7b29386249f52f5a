//! Search nodes ("options").
//!
//! A [`Node`] is a state reached via an action with its accumulated cost g.
//! Nodes are immutable: expanding one creates children that share the parent
//! through an [`Arc`], so a path can be rebuilt from any terminal node without
//! keeping a separate search graph.
//!
//! Releasing the last handle on a deep node frees its ancestors in a loop,
//! so chains of any length can be dropped without exhausting the stack.

use std::fmt;
use std::sync::Arc;

/// A state reached via an action, with the accumulated path cost.
pub struct Node<S, A> {
    state: S,
    action: Option<A>,
    cost: f64,
    depth: usize,
    parent: Link<S, A>,
}

/// Parent pointer that unlinks its ancestors iteratively on drop.
struct Link<S, A>(Option<Arc<Node<S, A>>>);

impl<S, A> Clone for Link<S, A> {
    fn clone(&self) -> Self {
        Link(self.0.clone())
    }
}

impl<S, A> Drop for Link<S, A> {
    fn drop(&mut self) {
        let mut next = self.0.take();
        while let Some(parent) = next {
            // Stop at the first ancestor still shared with another node.
            match Arc::into_inner(parent) {
                Some(mut node) => next = node.parent.0.take(),
                None => break,
            }
        }
    }
}

impl<S, A> Node<S, A> {
    /// The root node for `state`: no action, g = 0.
    pub fn root(state: S) -> Self {
        Self {
            state,
            action: None,
            cost: 0.0,
            depth: 0,
            parent: Link(None),
        }
    }

    /// Creates the child reached from `parent` by `action` at `step_cost`.
    ///
    /// The child's g is the parent's g plus `step_cost`.
    pub fn child(parent: Arc<Node<S, A>>, action: A, state: S, step_cost: f64) -> Self {
        Self {
            state,
            action: Some(action),
            cost: parent.cost + step_cost,
            depth: parent.depth + 1,
            parent: Link(Some(parent)),
        }
    }

    /// The state this node stands for.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The action that produced this node, `None` for the root.
    pub fn action(&self) -> Option<&A> {
        self.action.as_ref()
    }

    /// Accumulated cost g from the initial state.
    pub fn cost(&self) -> f64 {
        self.cost
    }

    /// Number of actions between the initial state and this node.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The parent node, `None` for the root.
    pub fn parent(&self) -> Option<&Node<S, A>> {
        self.parent.0.as_deref()
    }

    /// Drops the parent link, keeping state, action, cost and depth.
    ///
    /// The node no longer holds its ancestors alive, so
    /// [`path`](Node::path) only returns its own state afterwards.
    pub fn into_detached(mut self) -> Self {
        self.parent = Link(None);
        self
    }

    /// Consumes the node and returns its state.
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S: Clone, A: Clone> Node<S, A> {
    /// States from the initial state to this node, inclusive.
    pub fn path(&self) -> Vec<S> {
        let mut states = vec![self.state.clone()];
        let mut cursor = self.parent();
        while let Some(node) = cursor {
            states.push(node.state.clone());
            cursor = node.parent();
        }
        states.reverse();
        states
    }

    /// Actions taken from the initial state to reach this node.
    pub fn actions(&self) -> Vec<A> {
        let mut actions = Vec::with_capacity(self.depth);
        let mut cursor = Some(self);
        while let Some(node) = cursor {
            if let Some(action) = &node.action {
                actions.push(action.clone());
            }
            cursor = node.parent();
        }
        actions.reverse();
        actions
    }
}

impl<S: Clone, A: Clone> Clone for Node<S, A> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
            action: self.action.clone(),
            cost: self.cost,
            depth: self.depth,
            parent: self.parent.clone(),
        }
    }
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Debug for Node<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("state", &self.state)
            .field("action", &self.action)
            .field("cost", &self.cost)
            .field("depth", &self.depth)
            .finish()
    }
}
