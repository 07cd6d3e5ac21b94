//! Arena-backed prerequisite tree
//!
//! Every node lives in a slot of the arena and is addressed by a [`NodeId`].
//! A node records its parent by id; lists record their children by id. The
//! mutation API keeps both directions consistent:
//! - a node has at most one parent, and that parent lists it exactly once
//! - a detached node keeps its slot but has no parent
//! - attaching never creates a cycle
//!
//! Evaluation only needs `&self`, so any number of evaluations can run
//! concurrently while the borrow checker keeps mutation out.

use std::collections::{BTreeSet, HashMap};

use derive_more::Display;
use rayon::prelude::*;

use super::record::{ListRecord, PrereqRecord};
use super::{
    evaluate_leaf, AdvantagePrereq, AttributePrereq, ContainedWeightPrereq, Outcome, Prereq,
    PrereqList, Request, SkillPrereq, SpellPrereq,
};
use crate::character::CharacterView;
use crate::core::config::config;
use crate::core::error::{PrereqError, Result};
use crate::criteria::{IntegerCriteria, StringCriteria};
use crate::nameable;

/// Handle to a node in a [`PrereqTree`]
///
/// A slot freed by `remove` is reused with a bumped generation, so a handle
/// kept past removal no longer resolves instead of aliasing the new node.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display(fmt = "#{}.{}", index, generation)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    prereq: Prereq,
}

#[derive(Debug, Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// Mutable view of a leaf payload
///
/// The variant is fixed, so editing criteria can never turn a node into
/// something else. Use [`PrereqTree::replace`] to change a node's kind.
#[derive(Debug)]
pub enum LeafMut<'a> {
    Advantage(&'a mut AdvantagePrereq),
    Skill(&'a mut SkillPrereq),
    Spell(&'a mut SpellPrereq),
    Attribute(&'a mut AttributePrereq),
    ContainedWeight(&'a mut ContainedWeightPrereq),
}

/// A prerequisite tree rooted at a single node, usually a list
#[derive(Debug, Clone)]
pub struct PrereqTree {
    nodes: Vec<Slot>,
    free: Vec<u32>,
    root: NodeId,
}

impl Default for PrereqTree {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PrereqTree {
    /// Tree with an empty root list
    pub fn new(requires_all: bool) -> Self {
        Self::rooted(Prereq::List(PrereqList::new(requires_all)))
    }

    /// Tree rooted at `prereq`
    pub fn with_root(prereq: Prereq) -> Result<Self> {
        if prereq.as_list().map_or(false, |list| !list.is_empty()) {
            return Err(PrereqError::ListNotEmpty);
        }
        Ok(Self::rooted(prereq))
    }

    fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        }
    }

    fn rooted(prereq: Prereq) -> Self {
        let mut tree = Self::empty();
        tree.root = tree.alloc(Node {
            parent: None,
            prereq,
        });
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, detached ones included
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// True when the root is a list without children
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn get(&self, id: NodeId) -> Option<&Prereq> {
        self.node(id).map(|node| &node.prereq)
    }

    /// Mutable access to a leaf's criteria; `None` for lists and unknown ids
    pub fn leaf_mut(&mut self, id: NodeId) -> Option<LeafMut<'_>> {
        match self.prereq_mut(id)? {
            Prereq::List(_) => None,
            Prereq::Advantage(p) => Some(LeafMut::Advantage(p)),
            Prereq::Skill(p) => Some(LeafMut::Skill(p)),
            Prereq::Spell(p) => Some(LeafMut::Spell(p)),
            Prereq::Attribute(p) => Some(LeafMut::Attribute(p)),
            Prereq::ContainedWeight(p) => Some(LeafMut::ContainedWeight(p)),
        }
    }

    // List settings are edited through the tree so that membership, which
    // the tree owns, is never reachable mutably from outside.

    pub fn set_requires_all(&mut self, id: NodeId, requires_all: bool) -> Result<()> {
        self.list_mut(id)?.set_requires_all(requires_all);
        Ok(())
    }

    pub fn set_when_tl(&mut self, id: NodeId, when_tl: IntegerCriteria) -> Result<()> {
        self.list_mut(id)?.set_when_tl(when_tl);
        Ok(())
    }

    pub fn set_when_tl_enabled(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.list_mut(id)?.set_when_tl_enabled(enabled);
        Ok(())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Ordered children of a list; empty for leaves and unknown ids
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id)
            .and_then(Prereq::as_list)
            .map(PrereqList::children)
            .unwrap_or(&[])
    }

    /// Number of ancestors between `id` and the top of its subtree
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// `id` and everything below it, in pre-order
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Index of `id` within its parent's children
    pub fn index_of(&self, id: NodeId) -> Option<usize> {
        let parent = self.parent(id)?;
        self.children(parent).iter().position(|&child| child == id)
    }

    // === MUTATION ===

    /// Insert a new node as child `index` of `parent`
    pub fn insert(&mut self, parent: NodeId, index: usize, prereq: Prereq) -> Result<NodeId> {
        if prereq.as_list().map_or(false, |list| !list.is_empty()) {
            return Err(PrereqError::ListNotEmpty);
        }
        let len = self.list(parent)?.len();
        if index > len {
            return Err(PrereqError::IndexOutOfBounds {
                list: parent,
                index,
                len,
            });
        }
        let id = self.alloc(Node {
            parent: Some(parent),
            prereq,
        });
        self.list_mut(parent)?.children.insert(index, id);
        Ok(id)
    }

    /// Append a new node to `parent`
    pub fn push(&mut self, parent: NodeId, prereq: Prereq) -> Result<NodeId> {
        let len = self.list(parent)?.len();
        self.insert(parent, len, prereq)
    }

    /// Unlink `id` from its parent, keeping its subtree in the arena
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(PrereqError::RootImmutable);
        }
        let parent = self
            .node(id)
            .ok_or(PrereqError::NodeNotFound(id))?
            .parent;
        if let Some(parent) = parent {
            self.list_mut(parent)?.children.retain(|&child| child != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
        Ok(())
    }

    /// Link a detached node as child `index` of `parent`
    pub fn attach(&mut self, parent: NodeId, index: usize, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(PrereqError::RootImmutable);
        }
        let node = self.node(id).ok_or(PrereqError::NodeNotFound(id))?;
        if node.parent.is_some() {
            return Err(PrereqError::AlreadyAttached(id));
        }
        let len = self.list(parent)?.len();
        if index > len {
            return Err(PrereqError::IndexOutOfBounds {
                list: parent,
                index,
                len,
            });
        }
        if parent == id || self.depth_chain(parent).contains(&id) {
            return Err(PrereqError::WouldCreateCycle { parent, child: id });
        }
        self.list_mut(parent)?.children.insert(index, id);
        if let Some(node) = self.node_mut(id) {
            node.parent = Some(parent);
        }
        Ok(())
    }

    /// Move an attached node to a new position
    pub fn move_to(&mut self, id: NodeId, parent: NodeId, index: usize) -> Result<()> {
        if parent == id || self.depth_chain(parent).contains(&id) {
            return Err(PrereqError::WouldCreateCycle { parent, child: id });
        }
        let len = self.list(parent)?.len();
        if index > len {
            return Err(PrereqError::IndexOutOfBounds {
                list: parent,
                index,
                len,
            });
        }
        let previous_parent = self.parent(id);
        let previous_index = self.index_of(id);
        self.detach(id)?;
        let index = match (previous_parent, previous_index) {
            (Some(previous), Some(at)) if previous == parent && at < index => index - 1,
            _ => index,
        };
        self.attach(parent, index, id)
    }

    /// Remove `id` and its whole subtree, returning the removed payload
    pub fn remove(&mut self, id: NodeId) -> Result<Prereq> {
        self.detach(id)?;
        let doomed = self.descendants(id);
        let mut removed = None;
        for node_id in doomed {
            if let Some(node) = self.release(node_id) {
                if node_id == id {
                    removed = Some(node.prereq);
                }
            }
        }
        let mut removed = removed.ok_or(PrereqError::NodeNotFound(id))?;
        if let Some(list) = removed.as_list_mut() {
            list.children.clear();
        }
        tracing::debug!(node = %id, "removed prerequisite subtree");
        Ok(removed)
    }

    /// Swap the payload of `id`, keeping its position
    ///
    /// A list payload can only replace a list without children, and a list
    /// node with children can only be given another list payload, which
    /// inherits those children.
    pub fn replace(&mut self, id: NodeId, prereq: Prereq) -> Result<Prereq> {
        if prereq.as_list().map_or(false, |list| !list.is_empty()) {
            return Err(PrereqError::ListNotEmpty);
        }
        let node = self.node_mut(id).ok_or(PrereqError::NodeNotFound(id))?;
        let children = node
            .prereq
            .as_list()
            .map(|list| list.children.clone())
            .unwrap_or_default();
        if !children.is_empty() && !prereq.is_list() {
            return Err(PrereqError::ListNotEmpty);
        }
        let mut previous = std::mem::replace(&mut node.prereq, prereq);
        if let Some(list) = node.prereq.as_list_mut() {
            list.children = children;
        }
        if let Some(list) = previous.as_list_mut() {
            list.children.clear();
        }
        Ok(previous)
    }

    /// Deep copy of `id` placed at the end of `new_parent`, or left detached
    /// when `new_parent` is `None`
    pub fn clone_subtree(&mut self, id: NodeId, new_parent: Option<NodeId>) -> Result<NodeId> {
        if let Some(parent) = new_parent {
            self.list(parent)?;
        }
        let snapshot = self.extract(id)?;
        let copy = self.copy_from(&snapshot, snapshot.root, new_parent);
        if let Some(parent) = new_parent {
            self.list_mut(parent)?.children.push(copy);
        }
        Ok(copy)
    }

    /// Independent tree holding a deep copy of `id` and its subtree
    pub fn extract(&self, id: NodeId) -> Result<PrereqTree> {
        if !self.contains(id) {
            return Err(PrereqError::NodeNotFound(id));
        }
        let mut tree = PrereqTree::empty();
        tree.root = tree.copy_from(self, id, None);
        Ok(tree)
    }

    // === EVALUATION ===

    /// Evaluate the whole tree
    pub fn satisfied(&self, request: &Request<'_>) -> Outcome {
        self.evaluate(self.root, request)
    }

    /// Evaluate the subtree rooted at `id`
    pub fn evaluate(&self, id: NodeId, request: &Request<'_>) -> Outcome {
        let Some(prereq) = self.get(id) else {
            tracing::warn!(node = %id, "evaluated a missing prerequisite node");
            return Outcome::pass();
        };
        match prereq {
            Prereq::List(list) => self.evaluate_list(id, list, request),
            Prereq::Advantage(leaf) => evaluate_leaf(leaf, request),
            Prereq::Skill(leaf) => evaluate_leaf(leaf, request),
            Prereq::Spell(leaf) => evaluate_leaf(leaf, request),
            Prereq::Attribute(leaf) => evaluate_leaf(leaf, request),
            Prereq::ContainedWeight(leaf) => evaluate_leaf(leaf, request),
        }
    }

    /// Each child's own outcome, before the list aggregates them
    ///
    /// Failing children of a satisfied OR list keep their explanation lines
    /// here even though the aggregate drops them.
    pub fn evaluate_children(&self, id: NodeId, request: &Request<'_>) -> Result<Vec<Outcome>> {
        let list = self.list(id)?;
        Ok(list
            .children()
            .iter()
            .map(|&child| self.evaluate(child, request))
            .collect())
    }

    /// Evaluate the whole tree against many characters
    pub fn evaluate_batch<C>(&self, characters: &[C], explain: Option<&str>) -> Vec<Outcome>
    where
        C: CharacterView + Sync,
    {
        let run = |character: &C| {
            let mut request = Request::new(character);
            request.explain = explain;
            self.satisfied(&request)
        };
        if characters.len() >= config().parallel_threshold {
            characters.par_iter().map(run).collect()
        } else {
            characters.iter().map(run).collect()
        }
    }

    fn evaluate_list(&self, id: NodeId, list: &PrereqList, request: &Request<'_>) -> Outcome {
        if !list.applies_to(request.character) {
            tracing::debug!(node = %id, when_tl = %list.when_tl(), "tech level gate skipped list");
            return Outcome::pass();
        }

        let outcomes: Vec<Outcome> = list
            .children()
            .iter()
            .map(|&child| self.evaluate(child, request))
            .collect();
        let satisfied_count = outcomes.iter().filter(|outcome| outcome.satisfied).count();
        let satisfied = list.combine(satisfied_count, outcomes.len());

        let lines = match request.explain {
            Some(prefix) if !satisfied => {
                let indent = &config().explanation_indent;
                std::iter::once(list.header(prefix))
                    .chain(
                        outcomes
                            .into_iter()
                            .flat_map(|outcome| outcome.lines)
                            .map(|line| format!("{}{}", indent, line)),
                    )
                    .collect()
            }
            _ => Vec::new(),
        };
        Outcome { satisfied, lines }
    }

    // === NAMEABLE KEYS ===

    /// Visit every string criteria in the subtree rooted at `id`
    pub fn for_each_string_criteria(&self, id: NodeId, mut f: impl FnMut(&StringCriteria)) {
        for node_id in self.descendants(id) {
            if let Some(prereq) = self.get(node_id) {
                prereq.for_each_string(&mut f);
            }
        }
    }

    pub fn for_each_string_criteria_mut(
        &mut self,
        id: NodeId,
        mut f: impl FnMut(&mut StringCriteria),
    ) {
        for node_id in self.descendants(id) {
            if let Some(prereq) = self.prereq_mut(node_id) {
                prereq.for_each_string_mut(&mut f);
            }
        }
    }

    /// Collect `@key@` placeholders used by the subtree
    pub fn collect_nameable_keys(&self, id: NodeId, keys: &mut BTreeSet<String>) {
        self.for_each_string_criteria(id, |criteria| {
            nameable::extract(keys, criteria.qualifier())
        });
    }

    /// Substitute `@key@` placeholders throughout the subtree
    pub fn apply_nameable_keys(&mut self, id: NodeId, map: &HashMap<String, String>) {
        self.for_each_string_criteria_mut(id, |criteria| {
            let replaced = nameable::apply(map, criteria.qualifier());
            criteria.set_qualifier(replaced);
        });
    }

    // === RECORDS ===

    /// Build a tree from its persisted shape
    pub fn from_record(record: &PrereqRecord) -> Self {
        let mut tree = PrereqTree::empty();
        tree.root = tree.build(record, None);
        tree
    }

    /// Persisted shape of the whole tree
    pub fn to_record(&self) -> PrereqRecord {
        self.record_of(self.root)
            .unwrap_or_else(|| PrereqRecord::List(ListRecord::default()))
    }

    /// Persisted shape of the subtree rooted at `id`
    pub fn record_of(&self, id: NodeId) -> Option<PrereqRecord> {
        let record = match self.get(id)? {
            Prereq::List(list) => PrereqRecord::List(ListRecord {
                all: list.requires_all(),
                when_tl: list.is_when_tl_enabled().then(|| *list.when_tl()),
                prereqs: list
                    .children()
                    .iter()
                    .filter_map(|&child| self.record_of(child))
                    .collect(),
            }),
            Prereq::Advantage(p) => PrereqRecord::Advantage(p.clone()),
            Prereq::Skill(p) => PrereqRecord::Skill(p.clone()),
            Prereq::Spell(p) => PrereqRecord::Spell(p.clone()),
            Prereq::Attribute(p) => PrereqRecord::Attribute(p.clone()),
            Prereq::ContainedWeight(p) => PrereqRecord::ContainedWeight(p.clone()),
        };
        Some(record)
    }

    fn build(&mut self, record: &PrereqRecord, parent: Option<NodeId>) -> NodeId {
        let prereq = match record {
            PrereqRecord::List(list) => {
                let mut payload = PrereqList::new(list.all);
                if let Some(when_tl) = list.when_tl {
                    payload.set_when_tl(when_tl);
                }
                let id = self.alloc(Node {
                    parent,
                    prereq: Prereq::List(payload),
                });
                for child in &list.prereqs {
                    let child_id = self.build(child, Some(id));
                    self.push_child_unchecked(id, child_id);
                }
                return id;
            }
            PrereqRecord::Advantage(p) => Prereq::Advantage(p.clone()),
            PrereqRecord::Skill(p) => Prereq::Skill(p.clone()),
            PrereqRecord::Spell(p) => Prereq::Spell(p.clone()),
            PrereqRecord::Attribute(p) => Prereq::Attribute(p.clone()),
            PrereqRecord::ContainedWeight(p) => Prereq::ContainedWeight(p.clone()),
        };
        self.alloc(Node { parent, prereq })
    }

    // === INTERNALS ===

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    fn prereq_mut(&mut self, id: NodeId) -> Option<&mut Prereq> {
        self.node_mut(id).map(|node| &mut node.prereq)
    }

    fn list(&self, id: NodeId) -> Result<&PrereqList> {
        self.get(id)
            .ok_or(PrereqError::NodeNotFound(id))?
            .as_list()
            .ok_or(PrereqError::NotAList(id))
    }

    fn list_mut(&mut self, id: NodeId) -> Result<&mut PrereqList> {
        self.prereq_mut(id)
            .ok_or(PrereqError::NodeNotFound(id))?
            .as_list_mut()
            .ok_or(PrereqError::NotAList(id))
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            if let Some(slot) = self.nodes.get_mut(index as usize) {
                slot.node = Some(node);
                return NodeId {
                    index,
                    generation: slot.generation,
                };
            }
        }
        let index = self.nodes.len() as u32;
        self.nodes.push(Slot {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Empty the slot of `id` and retire its generation
    fn release(&mut self, id: NodeId) -> Option<Node> {
        let slot = self
            .nodes
            .get_mut(id.index as usize)
            .filter(|slot| slot.generation == id.generation)?;
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        Some(node)
    }

    fn push_child_unchecked(&mut self, parent: NodeId, child: NodeId) {
        if let Some(list) = self.prereq_mut(parent).and_then(Prereq::as_list_mut) {
            list.children.push(child);
        }
    }

    /// `id` followed by each of its ancestors
    fn depth_chain(&self, id: NodeId) -> Vec<NodeId> {
        let mut chain = vec![id];
        let mut current = self.parent(id);
        while let Some(parent) = current {
            chain.push(parent);
            current = self.parent(parent);
        }
        chain
    }

    /// Copy `id` from `source` into this arena under `parent`, without
    /// registering it in the parent's child list
    fn copy_from(&mut self, source: &PrereqTree, id: NodeId, parent: Option<NodeId>) -> NodeId {
        let mut prereq = source
            .get(id)
            .cloned()
            .unwrap_or_default();
        let children = match prereq.as_list_mut() {
            Some(list) => std::mem::take(&mut list.children),
            None => Vec::new(),
        };
        let copy = self.alloc(Node {
            parent,
            prereq,
        });
        for child in children {
            if source.contains(child) {
                let child_copy = self.copy_from(source, child, Some(copy));
                self.push_child_unchecked(copy, child_copy);
            }
        }
        copy
    }

    fn subtree_eq(&self, id: NodeId, other: &PrereqTree, other_id: NodeId) -> bool {
        match (self.get(id), other.get(other_id)) {
            (Some(a), Some(b)) => {
                let (left, right) = (self.children(id), other.children(other_id));
                a.same_payload(b)
                    && left.len() == right.len()
                    && left
                        .iter()
                        .zip(right)
                        .all(|(&l, &r)| self.subtree_eq(l, other, r))
            }
            (None, None) => true,
            _ => false,
        }
    }
}

/// Structural equality: same shapes and payloads, regardless of node ids
impl PartialEq for PrereqTree {
    fn eq(&self, other: &Self) -> bool {
        self.subtree_eq(self.root, other, other.root)
    }
}
