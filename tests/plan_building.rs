// tests/plan_building.rs
mod common;
use crate::common::builders::{TaskBuilder, TaskSetBuilder};
use crate::common::init_tracing;

use taskdag::graph::{build_plan, build_plan_for_target, GraphError};

fn position(order: &[String], id: &str) -> usize {
    order
        .iter()
        .position(|t| t == id)
        .unwrap_or_else(|| panic!("task '{id}' missing from plan {order:?}"))
}

#[test]
fn chain_is_ordered_dependency_first() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("c").depends_on("b").build())
        .with_task(TaskBuilder::new("b").depends_on("a").build())
        .with_task(TaskBuilder::new("a").build())
        .build();

    let plan = build_plan(&set).unwrap();
    assert_eq!(plan.order(), ["a", "b", "c"]);
}

#[test]
fn independent_tasks_order_ascending_by_id() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("zeta").build())
        .with_task(TaskBuilder::new("alpha").build())
        .with_task(TaskBuilder::new("mid").build())
        .build();

    let plan = build_plan(&set).unwrap();
    assert_eq!(plan.order(), ["alpha", "mid", "zeta"]);
}

#[test]
fn plan_is_deterministic_across_invocations() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("d").depends_on("b").depends_on("c").build())
        .with_task(TaskBuilder::new("c").depends_on("a").build())
        .with_task(TaskBuilder::new("b").depends_on("a").build())
        .with_task(TaskBuilder::new("a").build())
        .build();

    let first = build_plan(&set).unwrap();
    let second = build_plan(&set).unwrap();
    assert_eq!(first.order(), second.order());
    assert_eq!(first.order(), ["a", "b", "c", "d"]);
}

#[test]
fn finalizer_is_placed_immediately_after_trigger() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("assemble").finalized_by("clean_temp").build())
        .with_task(TaskBuilder::new("clean_temp").build())
        .with_task(TaskBuilder::new("zz_later").build())
        .build();

    let plan = build_plan(&set).unwrap();
    let order = plan.order();

    assert_eq!(
        position(order, "clean_temp"),
        position(order, "assemble") + 1
    );
    assert!(plan.is_finalizer("clean_temp"));
    assert!(!plan.is_finalizer("assemble"));
}

#[test]
fn finalizer_dependencies_are_placed_immediately_before_it() {
    init_tracing();

    // "f" finalizes "a" but depends on "g"; "g" must slot in between.
    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").finalized_by("f").build())
        .with_task(TaskBuilder::new("f").depends_on("g").build())
        .with_task(TaskBuilder::new("g").build())
        .build();

    let plan = build_plan(&set).unwrap();
    assert_eq!(plan.order(), ["a", "g", "f"]);
}

#[test]
fn finalizer_used_as_dependency_is_not_short_circuit_exempt() {
    init_tracing();

    // "b" depends on "f" which finalizes "a": ordering must still hold, but
    // "f" is reachable as an ordinary dependency and so loses its exemption.
    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").finalized_by("f").build())
        .with_task(TaskBuilder::new("b").depends_on("f").build())
        .with_task(TaskBuilder::new("f").build())
        .build();

    let plan = build_plan(&set).unwrap();
    let order = plan.order();

    assert!(position(order, "f") > position(order, "a"));
    assert!(position(order, "b") > position(order, "f"));
    assert!(!plan.is_finalizer("f"));
}

#[test]
fn finalizer_reached_as_dependency_still_waits_for_its_own_trigger() {
    init_tracing();

    // "g" finalizes "h" but is also a dependency of "f", which in turn
    // finalizes "a". Placing "f" must not drag "g" in front of "h".
    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").finalized_by("f").build())
        .with_task(TaskBuilder::new("f").depends_on("g").build())
        .with_task(TaskBuilder::new("g").build())
        .with_task(TaskBuilder::new("h").finalized_by("g").build())
        .build();

    let plan = build_plan(&set).unwrap();
    assert_eq!(plan.order(), ["a", "h", "g", "f"]);

    assert!(plan.is_finalizer("f"));
    assert!(!plan.is_finalizer("g"));
}

#[test]
fn dependency_cycle_is_rejected_with_path() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").depends_on("b").build())
        .with_task(TaskBuilder::new("b").depends_on("a").build())
        .build();

    match build_plan(&set) {
        Err(GraphError::CycleDetected { path }) => {
            assert!(path.contains(&"a".to_string()));
            assert!(path.contains(&"b".to_string()));
            // The path closes on the node it re-entered.
            assert_eq!(path.first(), path.last());
        }
        other => panic!("expected CycleDetected, got {other:?}"),
    }
}

#[test]
fn self_dependency_is_a_cycle() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").depends_on("a").build())
        .build();

    assert!(matches!(
        build_plan(&set),
        Err(GraphError::CycleDetected { .. })
    ));
}

#[test]
fn mutual_finalizers_are_a_cycle() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").finalized_by("b").build())
        .with_task(TaskBuilder::new("b").finalized_by("a").build())
        .build();

    assert!(matches!(
        build_plan(&set),
        Err(GraphError::CycleDetected { .. })
    ));
}

#[test]
fn cycle_through_finalizer_ordering_edge_is_rejected() {
    init_tracing();

    // a depends_on b, b depends_on f, a finalized_by f:
    // the ordering edges a -> f -> b -> a close a loop.
    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").depends_on("b").finalized_by("f").build())
        .with_task(TaskBuilder::new("b").depends_on("f").build())
        .with_task(TaskBuilder::new("f").build())
        .build();

    assert!(matches!(
        build_plan(&set),
        Err(GraphError::CycleDetected { .. })
    ));
}

#[test]
fn dangling_dependency_reference_is_rejected() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").depends_on("nope").build())
        .build();

    assert_eq!(
        build_plan(&set).unwrap_err(),
        GraphError::DanglingReference {
            task: "a".to_string(),
            missing: "nope".to_string(),
        }
    );
}

#[test]
fn dangling_finalizer_reference_is_rejected() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").finalized_by("ghost").build())
        .build();

    assert_eq!(
        build_plan(&set).unwrap_err(),
        GraphError::DanglingReference {
            task: "a".to_string(),
            missing: "ghost".to_string(),
        }
    );
}

#[test]
fn duplicate_ids_are_rejected_at_set_construction() {
    init_tracing();

    let err = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").build())
        .with_task(TaskBuilder::new("a").build())
        .try_build()
        .unwrap_err();

    assert_eq!(err, GraphError::DuplicateId("a".to_string()));
}

#[test]
fn target_selection_restricts_to_dependency_closure() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("compile").build())
        .with_task(TaskBuilder::new("copy").build())
        .with_task(
            TaskBuilder::new("assemble")
                .depends_on("compile")
                .depends_on("copy")
                .build(),
        )
        .with_task(TaskBuilder::new("unrelated").build())
        .build();

    let plan = build_plan_for_target(&set, "assemble").unwrap();
    assert_eq!(plan.order(), ["compile", "copy", "assemble"]);
}

#[test]
fn target_selection_pulls_in_finalizers_of_selected_tasks() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("compile").finalized_by("clean_temp").build())
        .with_task(TaskBuilder::new("assemble").depends_on("compile").build())
        .with_task(TaskBuilder::new("clean_temp").build())
        .with_task(TaskBuilder::new("unrelated").build())
        .build();

    let plan = build_plan_for_target(&set, "assemble").unwrap();
    assert_eq!(plan.order(), ["compile", "clean_temp", "assemble"]);
}

#[test]
fn unknown_target_is_rejected() {
    init_tracing();

    let set = TaskSetBuilder::new()
        .with_task(TaskBuilder::new("a").build())
        .build();

    assert_eq!(
        build_plan_for_target(&set, "missing").unwrap_err(),
        GraphError::UnknownTask("missing".to_string())
    );
}
