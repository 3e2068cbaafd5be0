// tests/plan_properties.rs

use std::collections::HashSet;

use proptest::prelude::*;
use taskdag::graph::build_plan;
use taskdag::task::TaskSet;
use taskdag_test_utils::builders::{TaskBuilder, TaskSetBuilder};

// Strategy to generate a valid task set.
//
// Acyclicity is ensured by only allowing task N to depend on tasks below N
// and to be finalized by a task above N, so every ordering edge points
// "upward" in index order. Finalizers may be shared between triggers and
// may also show up as ordinary dependencies; the ordering properties below
// must hold regardless.
fn task_set_strategy(max_tasks: usize) -> impl Strategy<Value = TaskSet> {
    (2..=max_tasks).prop_flat_map(|num_tasks| {
        let deps_strat = proptest::collection::vec(
            proptest::collection::vec(any::<usize>(), 0..num_tasks),
            num_tasks,
        );
        let fins_strat = proptest::collection::vec(any::<usize>(), num_tasks);

        (deps_strat, fins_strat).prop_map(move |(raw_deps, raw_fins)| {
            let mut builder = TaskSetBuilder::new();
            for (i, potential_deps) in raw_deps.into_iter().enumerate() {
                let name = format!("task_{i:03}");
                let mut task = TaskBuilder::new(&name);

                // Sanitize dependencies: only indices below i.
                let mut valid_deps = HashSet::new();
                for dep_idx in potential_deps {
                    if i > 0 {
                        valid_deps.insert(dep_idx % i);
                    }
                }
                for dep_idx in valid_deps {
                    task = task.depends_on(&format!("task_{dep_idx:03}"));
                }

                // Finalizer: any index above i, possibly shared with other
                // triggers or depended upon by later tasks.
                let above = num_tasks - i - 1;
                if above > 0 {
                    let fin_idx = i + 1 + raw_fins[i] % above;
                    task = task.finalized_by(&format!("task_{fin_idx:03}"));
                }

                builder = builder.with_task(task.build());
            }

            builder.build()
        })
    })
}

proptest! {
    #[test]
    fn plan_contains_every_task_exactly_once(set in task_set_strategy(12)) {
        let plan = build_plan(&set).expect("generated sets are acyclic");

        let mut seen = HashSet::new();
        for id in plan.order() {
            prop_assert!(seen.insert(id.clone()), "task {} appears twice", id);
            prop_assert!(set.contains(id), "plan invented task {}", id);
        }
        prop_assert_eq!(seen.len(), set.len());
    }

    #[test]
    fn plan_is_topologically_sound(set in task_set_strategy(12)) {
        let plan = build_plan(&set).expect("generated sets are acyclic");
        let order = plan.order();

        let index_of = |id: &str| order.iter().position(|t| t == id).unwrap();

        for task in set.iter() {
            let own = index_of(&task.id);
            for dep in &task.depends_on {
                prop_assert!(
                    index_of(dep) < own,
                    "task {} placed before its dependency {}",
                    task.id,
                    dep
                );
            }
            for fin in &task.finalized_by {
                prop_assert!(
                    index_of(fin) > own,
                    "finalizer {} placed before its trigger {}",
                    fin,
                    task.id
                );
            }
        }
    }
}
