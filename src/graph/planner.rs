// src/graph/planner.rs

//! Execution plan construction.
//!
//! The planner is a pure function over a [`TaskSet`]: it validates
//! referential integrity, rejects cycles (including cycles through
//! `finalized_by` ordering edges), and produces a deterministic topological
//! order in which every finalizer lands after all of its triggers, as close
//! behind the last one as its own dependencies allow.

use std::collections::{BTreeSet, HashMap, HashSet};

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::debug;

use crate::graph::graph::TaskGraph;
use crate::graph::GraphError;
use crate::task::{TaskId, TaskSet};

/// Derived, read-only execution order.
///
/// `finalizers` records which ids are reached purely via a `finalized_by`
/// edge; the executor exempts those from upstream short-circuiting. An id
/// that is both a finalizer and some task's dependency is deliberately not
/// in the set: it behaves like an ordinary task at execution time.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    order: Vec<TaskId>,
    finalizers: HashSet<TaskId>,
}

impl ExecutionPlan {
    /// Task ids in execution order.
    pub fn order(&self) -> &[TaskId] {
        &self.order
    }

    /// Whether the given id participates in the plan purely as a finalizer.
    pub fn is_finalizer(&self, id: &str) -> bool {
        self.finalizers.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Build a plan covering every task in the set.
pub fn build_plan(set: &TaskSet) -> Result<ExecutionPlan, GraphError> {
    validate_references(set)?;
    let graph = TaskGraph::from_set(set);
    detect_cycles(set, &graph)?;

    let selected: BTreeSet<TaskId> = set.ids().map(|s| s.to_string()).collect();
    schedule(&graph, &selected)
}

/// Build a plan restricted to `target`: its transitive `depends_on` closure
/// plus the finalizer closure of everything selected.
pub fn build_plan_for_target(set: &TaskSet, target: &str) -> Result<ExecutionPlan, GraphError> {
    if !set.contains(target) {
        return Err(GraphError::UnknownTask(target.to_string()));
    }

    validate_references(set)?;
    let graph = TaskGraph::from_set(set);
    detect_cycles(set, &graph)?;

    let mut selected: BTreeSet<TaskId> = BTreeSet::new();
    let mut stack: Vec<TaskId> = vec![target.to_string()];
    while let Some(id) = stack.pop() {
        if !selected.insert(id.clone()) {
            continue;
        }
        stack.extend(graph.dependencies_of(&id).iter().cloned());
        stack.extend(graph.finalizers_of(&id).iter().cloned());
    }

    debug!(target = %target, tasks = selected.len(), "restricted plan to target closure");
    schedule(&graph, &selected)
}

/// Every id in every `depends_on` / `finalized_by` must exist in the set,
/// and no task may reference itself (a self-reference is the smallest cycle).
fn validate_references(set: &TaskSet) -> Result<(), GraphError> {
    for task in set.iter() {
        for id in task.depends_on.iter().chain(task.finalized_by.iter()) {
            if !set.contains(id) {
                return Err(GraphError::DanglingReference {
                    task: task.id.clone(),
                    missing: id.clone(),
                });
            }
            if id == &task.id {
                return Err(GraphError::CycleDetected {
                    path: vec![task.id.clone(), task.id.clone()],
                });
            }
        }
    }
    Ok(())
}

/// Reject cycles over the combined "must run before" relation.
///
/// Edge direction: `dep -> task` for every `depends_on` entry, and
/// `trigger -> finalizer` for every `finalized_by` entry. A topological sort
/// over this graph fails iff the task set is unschedulable; when it fails we
/// re-walk the relation depth-first with an in-progress marker to recover
/// the offending id path for diagnostics.
fn detect_cycles(set: &TaskSet, graph: &TaskGraph) -> Result<(), GraphError> {
    let mut g: DiGraphMap<&str, ()> = DiGraphMap::new();

    for id in set.ids() {
        g.add_node(id);
    }
    for task in set.iter() {
        for dep in &task.depends_on {
            g.add_edge(dep.as_str(), task.id.as_str(), ());
        }
        for fin in &task.finalized_by {
            g.add_edge(task.id.as_str(), fin.as_str(), ());
        }
    }

    if toposort(&g, None).is_ok() {
        return Ok(());
    }

    match find_cycle_path(set, graph) {
        Some(path) => Err(GraphError::CycleDetected { path }),
        // toposort said there is a cycle; the DFS must agree, but never
        // silently accept the set if it somehow does not.
        None => Err(GraphError::CycleDetected { path: Vec::new() }),
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

/// Depth-first walk of the "must run before" relation, tracking the current
/// path; revisiting an in-progress node yields the cycle as an id path.
fn find_cycle_path(set: &TaskSet, graph: &TaskGraph) -> Option<Vec<TaskId>> {
    let mut marks: HashMap<TaskId, Mark> = HashMap::new();

    // Roots in ascending id order so the reported path is deterministic.
    for id in set.ids() {
        let mut stack: Vec<TaskId> = Vec::new();
        if let Some(path) = visit(id, graph, &mut marks, &mut stack) {
            return Some(path);
        }
    }
    None
}

fn visit(
    id: &str,
    graph: &TaskGraph,
    marks: &mut HashMap<TaskId, Mark>,
    stack: &mut Vec<TaskId>,
) -> Option<Vec<TaskId>> {
    match marks.get(id) {
        Some(Mark::Done) => return None,
        Some(Mark::InProgress) => {
            let start = stack.iter().position(|s| s.as_str() == id).unwrap_or(0);
            let mut path: Vec<TaskId> = stack[start..].to_vec();
            path.push(id.to_string());
            return Some(path);
        }
        None => {}
    }

    marks.insert(id.to_string(), Mark::InProgress);
    stack.push(id.to_string());

    let successors = graph
        .dependents_of(id)
        .iter()
        .chain(graph.finalizers_of(id).iter());
    for next in successors {
        if let Some(path) = visit(next, graph, marks, stack) {
            return Some(path);
        }
    }

    stack.pop();
    marks.insert(id.to_string(), Mark::Done);
    None
}

/// Produce the ordered plan for a validated, acyclic selection.
///
/// The `trigger -> finalizer` relation is an ordering edge like any
/// dependency: a finalizer may not be placed until every selected task
/// naming it in `finalized_by` is placed, even when the finalizer is also
/// reachable as some task's dependency. Each round first scans for a
/// finalizer whose triggers and dependencies are all placed, then falls
/// back to the smallest-id ordinary task whose dependencies are placed;
/// scanning finalizers first keeps them right behind their last trigger.
fn schedule(graph: &TaskGraph, selected: &BTreeSet<TaskId>) -> Result<ExecutionPlan, GraphError> {
    // Invert `finalized_by` within the selection: finalizer -> its triggers.
    let mut triggers_of: HashMap<TaskId, Vec<TaskId>> = HashMap::new();
    for id in selected {
        for fin in graph.finalizers_of(id) {
            if selected.contains(fin) {
                triggers_of.entry(fin.clone()).or_default().push(id.clone());
            }
        }
    }

    // Only ids reached purely via `finalized_by` are exempt from upstream
    // short-circuiting; a finalizer that is also some task's dependency
    // behaves like an ordinary task at execution time.
    let depended_on: HashSet<&TaskId> = selected
        .iter()
        .flat_map(|id| graph.dependencies_of(id).iter())
        .collect();
    let pure_finalizers: HashSet<TaskId> = triggers_of
        .keys()
        .filter(|f| !depended_on.contains(f))
        .cloned()
        .collect();

    let mut order: Vec<TaskId> = Vec::with_capacity(selected.len());
    let mut placed: HashSet<TaskId> = HashSet::new();

    while placed.len() < selected.len() {
        let deps_placed = |id: &str| {
            graph
                .dependencies_of(id)
                .iter()
                .filter(|d| selected.contains(*d))
                .all(|d| placed.contains(d))
        };

        // BTreeSet iteration is ascending by id, so the first ready
        // candidate in each scan is the deterministic tie-break winner.
        let next = selected
            .iter()
            .find(|&id| {
                !placed.contains(id)
                    && match triggers_of.get(id) {
                        Some(triggers) => {
                            triggers.iter().all(|t| placed.contains(t)) && deps_placed(id)
                        }
                        None => false,
                    }
            })
            .or_else(|| {
                selected.iter().find(|&id| {
                    !placed.contains(id) && !triggers_of.contains_key(id) && deps_placed(id)
                })
            })
            .cloned();

        // With the cycle pass already done a stall is impossible; refuse to
        // return a partial plan if that invariant is ever broken.
        let Some(id) = next else {
            let remaining: Vec<TaskId> = selected
                .iter()
                .filter(|id| !placed.contains(*id))
                .cloned()
                .collect();
            return Err(GraphError::CycleDetected { path: remaining });
        };

        debug!(task = %id, position = order.len(), "placed task in plan");
        placed.insert(id.clone());
        order.push(id);
    }

    Ok(ExecutionPlan {
        order,
        finalizers: pure_finalizers,
    })
}
