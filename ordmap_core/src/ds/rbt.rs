//! A persistent left-leaning Red-Black Tree
//! https://www.cs.princeton.edu/~rs/talks/LLRB/LLRB.pdf
use std::{
    borrow::Borrow,
    cmp::Ordering::{self, *},
    sync::Arc,
};

use tracing::debug;

use crate::{err::InvariantViolation, util::arc_take};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Color {
    Red,
    Black,
}

#[derive(Clone)]
pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    color: Color,
    left: SubTree<K, V>,
    right: SubTree<K, V>,
}

/// Requirements:
/// 1. Keys on the left are smaller, keys on the right are greater
/// 2. A red node does not have a red child
/// 3. Every path from root to leaf has the same number of black nodes
/// 4. The root of a whole tree is black (enforced by the caller through `blacken`)
pub(crate) struct SubTree<K, V> {
    root: Option<Arc<Node<K, V>>>,
}

pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<K, V> Clone for SubTree<K, V> {
    fn clone(&self) -> Self {
        SubTree {
            root: self.root.clone(),
        }
    }
}

impl<K, V> From<Node<K, V>> for SubTree<K, V> {
    fn from(value: Node<K, V>) -> Self {
        SubTree {
            root: Some(Arc::new(value)),
        }
    }
}

impl<K, V> Node<K, V> {
    fn is_red(&self) -> bool {
        self.color == Color::Red
    }
    fn painted(mut self, color: Color) -> SubTree<K, V> {
        self.color = color;
        self.into()
    }
}

impl<K, V> SubTree<K, V> {
    pub(crate) const fn new() -> Self {
        SubTree { root: None }
    }
    pub(crate) fn node(&self) -> Option<&Node<K, V>> {
        self.root.as_deref()
    }
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }
    fn is_red(&self) -> bool {
        self.node().is_some_and(Node::is_red)
    }
    fn red(&self) -> Option<&Node<K, V>> {
        self.node().filter(|x| x.is_red())
    }
    fn black(&self) -> Option<&Node<K, V>> {
        self.node().filter(|x| !x.is_red())
    }
    pub(crate) fn len(&self) -> usize {
        self.node().map_or(0, |x| x.left.len() + 1 + x.right.len())
    }
    pub(crate) fn min_node(&self) -> Option<&Node<K, V>> {
        let mut node = self.node()?;
        while let Some(left) = node.left.node() {
            node = left;
        }
        Some(node)
    }
    pub(crate) fn max_node(&self) -> Option<&Node<K, V>> {
        let mut node = self.node()?;
        while let Some(right) = node.right.node() {
            node = right;
        }
        Some(node)
    }
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&Node<K, V>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cur = self;
        while let Some(node) = cur.node() {
            cur = match key.cmp(node.key.borrow()) {
                Equal => return Some(node),
                Less => &node.left,
                Greater => &node.right,
            };
        }
        None
    }
    /// Lowest-keyed node satisfying `pred`; the left subtree is searched first.
    pub(crate) fn find_first<F>(&self, pred: &mut F) -> Option<&Node<K, V>>
    where
        F: FnMut(&K, &V) -> bool,
    {
        let node = self.node()?;
        if let Some(found) = node.left.find_first(pred) {
            return Some(found);
        }
        if pred(&node.key, &node.value) {
            return Some(node);
        }
        node.right.find_first(pred)
    }
    pub(crate) fn find_last<F>(&self, pred: &mut F) -> Option<&Node<K, V>>
    where
        F: FnMut(&K, &V) -> bool,
    {
        let node = self.node()?;
        if let Some(found) = node.right.find_last(pred) {
            return Some(found);
        }
        if pred(&node.key, &node.value) {
            return Some(node);
        }
        node.left.find_last(pred)
    }
    pub(crate) fn foldl<A, F>(&self, f: &mut F, acc: A) -> A
    where
        F: FnMut(&K, &V, A) -> A,
    {
        match self.node() {
            None => acc,
            Some(node) => {
                let acc = node.left.foldl(f, acc);
                let acc = f(&node.key, &node.value, acc);
                node.right.foldl(f, acc)
            }
        }
    }
    pub(crate) fn foldr<A, F>(&self, f: &mut F, acc: A) -> A
    where
        F: FnMut(&K, &V, A) -> A,
    {
        match self.node() {
            None => acc,
            Some(node) => {
                let acc = node.right.foldr(f, acc);
                let acc = f(&node.key, &node.value, acc);
                node.left.foldr(f, acc)
            }
        }
    }
    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_all_left(self);
        iter
    }
    fn into_node(self) -> Option<Node<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.root.map(arc_take)
    }
    fn take_if(self, pred: impl FnOnce(&Node<K, V>) -> bool) -> Result<Node<K, V>, Self>
    where
        K: Clone,
        V: Clone,
    {
        let hit = self.node().is_some_and(pred);
        match self.root {
            Some(node) if hit => Ok(arc_take(node)),
            root => Err(SubTree { root }),
        }
    }
}

impl<K: Clone, V> SubTree<K, V> {
    /// Same shape and colors, every value replaced by `f`, visited in key order.
    pub(crate) fn map<W, F>(&self, f: &mut F) -> SubTree<K, W>
    where
        F: FnMut(&K, &V) -> W,
    {
        match self.node() {
            None => SubTree::new(),
            Some(node) => {
                let left = node.left.map(f);
                let value = f(&node.key, &node.value);
                let right = node.right.map(f);
                Node {
                    key: node.key.clone(),
                    value,
                    color: node.color,
                    left,
                    right,
                }
                .into()
            }
        }
    }
}

impl<K: Clone, V: Clone> SubTree<K, V> {
    fn branch(color: Color, key: K, value: V, left: Self, right: Self) -> Self {
        Node {
            key,
            value,
            color,
            left,
            right,
        }
        .into()
    }
    fn paint(&self, color: Color) -> Self {
        match self.node() {
            Some(node) if node.color != color => Self::branch(
                color,
                node.key.clone(),
                node.value.clone(),
                node.left.clone(),
                node.right.clone(),
            ),
            _ => self.clone(),
        }
    }
    pub(crate) fn blacken(self) -> Self {
        if self.is_red() {
            self.paint(Color::Black)
        } else {
            self
        }
    }
    fn balance(color: Color, key: K, value: V, left: Self, right: Self) -> Self {
        use Color::*;
        match right.take_if(Node::is_red) {
            Ok(right) => match left.take_if(Node::is_red) {
                // both children red: split the pair upward
                Ok(left) => Self::branch(
                    Red,
                    key,
                    value,
                    left.painted(Black),
                    right.painted(Black),
                ),
                Err(left) => Self::branch(
                    color,
                    right.key,
                    right.value,
                    Self::branch(Red, key, value, left, right.left),
                    right.right,
                ),
            },
            Err(right) => match left.take_if(|x| x.is_red() && x.left.is_red()) {
                Ok(left) => Self::branch(
                    Red,
                    left.key,
                    left.value,
                    left.left.paint(Black),
                    Self::branch(Black, key, value, left.right, right),
                ),
                Err(left) => Self::branch(color, key, value, left, right),
            },
        }
    }
    fn move_red_left(&self) -> Self {
        use Color::*;
        let Some(node) = self.node() else {
            return self.clone();
        };
        let (Some(_), Some(right)) = (node.left.node(), node.right.node()) else {
            return self.clone();
        };
        match right.left.red() {
            Some(right_left) => Self::branch(
                Red,
                right_left.key.clone(),
                right_left.value.clone(),
                Self::branch(
                    Black,
                    node.key.clone(),
                    node.value.clone(),
                    node.left.paint(Red),
                    right_left.left.clone(),
                ),
                Self::branch(
                    Black,
                    right.key.clone(),
                    right.value.clone(),
                    right_left.right.clone(),
                    right.right.clone(),
                ),
            ),
            None => Self::branch(
                Black,
                node.key.clone(),
                node.value.clone(),
                node.left.paint(Red),
                node.right.paint(Red),
            ),
        }
    }
    fn move_red_right(&self) -> Self {
        use Color::*;
        let Some(node) = self.node() else {
            return self.clone();
        };
        let (Some(left), Some(_)) = (node.left.node(), node.right.node()) else {
            return self.clone();
        };
        if left.left.is_red() {
            Self::branch(
                Red,
                left.key.clone(),
                left.value.clone(),
                left.left.paint(Black),
                Self::branch(
                    Black,
                    node.key.clone(),
                    node.value.clone(),
                    left.right.clone(),
                    node.right.paint(Red),
                ),
            )
        } else {
            Self::branch(
                Black,
                node.key.clone(),
                node.value.clone(),
                node.left.paint(Red),
                node.right.paint(Red),
            )
        }
    }
    /// Rotate a red left child to the right, or push red into the right
    /// child, so the descent to the right always enters a red node.
    fn lean_right(&self) -> Self {
        let Some(node) = self.node() else {
            return self.clone();
        };
        if let Some(left) = node.left.red() {
            Self::branch(
                node.color,
                left.key.clone(),
                left.value.clone(),
                left.left.clone(),
                Self::branch(
                    Color::Red,
                    node.key.clone(),
                    node.value.clone(),
                    left.right.clone(),
                    node.right.clone(),
                ),
            )
        } else if node.right.black().is_some_and(|x| !x.left.is_red()) {
            self.move_red_right()
        } else {
            self.clone()
        }
    }
    fn remove_min(&self) -> Self {
        let Some(node) = self.node() else {
            return Self::new();
        };
        let Some(left) = node.left.node() else {
            return Self::new();
        };
        if !left.is_red() && !left.left.is_red() {
            match self.move_red_left().into_node() {
                Some(x) => {
                    Self::balance(x.color, x.key, x.value, x.left.remove_min(), x.right)
                }
                None => Self::new(),
            }
        } else {
            Self::branch(
                node.color,
                node.key.clone(),
                node.value.clone(),
                node.left.remove_min(),
                node.right.clone(),
            )
        }
    }
}

impl<K: Ord + Clone, V: Clone> SubTree<K, V> {
    /// New nodes enter red; the root may come back red.
    pub(crate) fn insert(&self, key: K, value: V) -> Self {
        let Some(node) = self.node() else {
            return Self::branch(Color::Red, key, value, Self::new(), Self::new());
        };
        match key.cmp(&node.key) {
            Less => Self::balance(
                node.color,
                node.key.clone(),
                node.value.clone(),
                node.left.insert(key, value),
                node.right.clone(),
            ),
            Greater => Self::balance(
                node.color,
                node.key.clone(),
                node.value.clone(),
                node.left.clone(),
                node.right.insert(key, value),
            ),
            Equal => Self::branch(
                node.color,
                node.key.clone(),
                value,
                node.left.clone(),
                node.right.clone(),
            ),
        }
    }
    /// Pushes red down ahead of the descent so the node finally dropped is red.
    pub(crate) fn remove<Q>(&self, target: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(node) = self.node() else {
            return Self::new();
        };
        if target.cmp(node.key.borrow()) == Less {
            if node.left.black().is_some_and(|x| !x.left.is_red()) {
                match self.move_red_left().into_node() {
                    Some(x) => {
                        Self::balance(x.color, x.key, x.value, x.left.remove(target), x.right)
                    }
                    None => Self::new(),
                }
            } else {
                Self::branch(
                    node.color,
                    node.key.clone(),
                    node.value.clone(),
                    node.left.remove(target),
                    node.right.clone(),
                )
            }
        } else {
            self.lean_right().remove_here_or_right(target)
        }
    }
    fn remove_here_or_right<Q>(self, target: &Q) -> Self
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(node) = self.into_node() else {
            return Self::new();
        };
        if target.cmp(node.key.borrow()) == Equal {
            let Some(min) = node.right.min_node() else {
                return Self::new();
            };
            let (key, value) = (min.key.clone(), min.value.clone());
            let right = node.right.remove_min();
            Self::balance(node.color, key, value, node.left, right)
        } else {
            let right = node.right.remove(target);
            Self::balance(node.color, node.key, node.value, node.left, right)
        }
    }
}

impl<K: Ord, V> SubTree<K, V> {
    /// Walks the whole tree and returns its black height.
    pub(crate) fn check(&self) -> crate::err::Result<usize> {
        let result = if self.is_red() {
            Err(InvariantViolation::RedRoot)
        } else {
            self.check_below(0, None, None)
        };
        if let Err(e) = &result {
            debug!(error = %e, "red-black invariant violated");
        }
        result
    }
    fn check_below(
        &self,
        depth: usize,
        lower: Option<&K>,
        upper: Option<&K>,
    ) -> crate::err::Result<usize> {
        let Some(node) = self.node() else {
            return Ok(0);
        };
        let out_of_order = |bound: Option<&K>, expected: Ordering| {
            bound.is_some_and(|b| node.key.cmp(b) != expected)
        };
        if out_of_order(lower, Greater) || out_of_order(upper, Less) {
            return Err(InvariantViolation::OutOfOrder { depth });
        }
        if node.is_red() && (node.left.is_red() || node.right.is_red()) {
            return Err(InvariantViolation::RedRedEdge { depth });
        }
        let left = node.left.check_below(depth + 1, lower, Some(&node.key))?;
        let right = node.right.check_below(depth + 1, Some(&node.key), upper)?;
        if left != right {
            return Err(InvariantViolation::BlackHeightMismatch { depth, left, right });
        }
        Ok(left + usize::from(!node.is_red()))
    }
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_all_left(&mut self, mut x: &'a SubTree<K, V>) {
        while let Some(v) = x.node() {
            self.stack.push(v);
            x = &v.left;
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);
    fn next(&mut self) -> Option<Self::Item> {
        let cur = self.stack.pop()?;
        self.push_all_left(&cur.right);
        Some((&cur.key, &cur.value))
    }
}
