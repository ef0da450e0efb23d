use super::{GroupBy, GroupCondition, GroupingConfig, GroupingError, SolutionSource};
use crate::{
    group::{AssignmentError, Group, SolutionId},
    obs::{MetricsEvent, MetricsSink, metrics_report, metrics_reset_all, with_metrics_sink},
    value::Term,
};
use proptest::prelude::*;
use std::{cell::RefCell, collections::BTreeMap, sync::LazyLock};

type Table = BTreeMap<SolutionId, BTreeMap<String, Term>>;

fn ex(local: &str) -> Term {
    Term::iri(format!("http://example.org/{local}"))
}

fn id(n: u64) -> SolutionId {
    SolutionId::new(n)
}

fn table(rows: Vec<(u64, Vec<(&str, Term)>)>) -> Table {
    rows.into_iter()
        .map(|(n, bindings)| {
            let row = bindings
                .into_iter()
                .map(|(name, value)| (name.to_string(), value))
                .collect();
            (id(n), row)
        })
        .collect()
}

fn members(group: &Group) -> Vec<u64> {
    group.members().map(SolutionId::get).collect()
}

fn people() -> Table {
    table(vec![
        (0, vec![("s", ex("alice")), ("p", ex("knows"))]),
        (1, vec![("s", ex("bob")), ("p", ex("knows"))]),
        (2, vec![("s", ex("alice")), ("p", ex("name"))]),
        (3, vec![("s", ex("carol")), ("p", ex("knows"))]),
        (4, vec![("s", ex("alice")), ("p", ex("knows"))]),
        (5, vec![("p", ex("name"))]),
    ])
}

fn all_ids(source: &Table) -> Vec<SolutionId> {
    source.keys().copied().collect()
}

#[derive(Default)]
struct CapturingSink {
    events: RefCell<Vec<MetricsEvent>>,
}

impl MetricsSink for CapturingSink {
    fn record(&self, event: MetricsEvent) {
        self.events.borrow_mut().push(event);
    }
}

#[test]
fn no_conditions_yield_one_implicit_group() {
    let source = people();

    let groups = GroupBy::default()
        .apply(all_ids(&source), &source)
        .expect("grouping");

    assert_eq!(groups.len(), 1);
    assert_eq!(members(&groups[0]), vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn no_conditions_over_no_solutions_still_yield_one_group() {
    let source = Table::new();

    let groups = GroupBy::default().apply([], &source).expect("grouping");

    assert_eq!(groups.len(), 1);
    assert!(groups[0].is_empty());
}

#[test]
fn grouping_an_empty_input_by_a_key_yields_no_groups() {
    let source = Table::new();

    let groups = GroupBy::new([GroupCondition::variable("s")])
        .apply([], &source)
        .expect("grouping");

    assert!(groups.is_empty());
}

#[test]
fn groups_follow_first_occurrence_and_keep_member_order() {
    let source = people();

    let groups = GroupBy::new([GroupCondition::variable("?s")])
        .apply(all_ids(&source), &source)
        .expect("grouping");

    let partition = groups.iter().map(members).collect::<Vec<_>>();
    assert_eq!(partition, vec![vec![0, 2, 4], vec![1], vec![3], vec![5]]);
}

#[test]
fn unbound_keys_share_one_group() {
    let source = table(vec![
        (0, vec![]),
        (1, vec![("s", ex("a"))]),
        (2, vec![]),
    ]);

    let groups = GroupBy::new([GroupCondition::variable("s")])
        .apply(all_ids(&source), &source)
        .expect("grouping");

    assert_eq!(
        groups.iter().map(members).collect::<Vec<_>>(),
        vec![vec![1], vec![0, 2]]
    );
}

#[test]
fn unbound_key_group_follows_bound_groups_at_every_level() {
    let source = table(vec![
        (0, vec![("p", ex("knows"))]),
        (1, vec![("s", ex("a"))]),
        (2, vec![("s", ex("b")), ("p", ex("knows"))]),
        (3, vec![("s", ex("a")), ("p", ex("name"))]),
        (4, vec![]),
    ]);

    let groups = GroupBy::new([
        GroupCondition::variable("s"),
        GroupCondition::variable("p"),
    ])
    .apply(all_ids(&source), &source)
    .expect("grouping");

    assert_eq!(
        groups.iter().map(members).collect::<Vec<_>>(),
        vec![vec![3], vec![1], vec![2], vec![0], vec![4]]
    );
}

#[test]
fn unbound_key_assigns_alias_as_unbound() {
    let source = table(vec![(0, vec![]), (1, vec![("s", ex("a"))])]);

    let mut groups = GroupBy::new([GroupCondition::variable("s").with_alias("x")])
        .apply(all_ids(&source), &source)
        .expect("grouping");

    let unbound = &mut groups[1];
    assert_eq!(members(unbound), vec![0]);
    assert!(unbound.is_assigned("x"));
    assert_eq!(unbound.assignment("x"), None);
    assert_eq!(
        unbound.assign("?x", ex("late")),
        Err(AssignmentError::AlreadyAssigned {
            variable: "x".to_string()
        })
    );
}

#[test]
fn marked_alias_name_cannot_be_assigned_again() {
    let source = people();

    let mut groups = GroupBy::new([GroupCondition::variable("s").with_alias("?x")])
        .apply(all_ids(&source), &source)
        .expect("grouping");

    assert!(groups[0].assign("?x", ex("zzz")).is_err());
    assert_eq!(
        groups[0].assignments().collect::<Vec<_>>(),
        vec![("x", Some(&ex("alice")))]
    );
}

#[test]
fn second_condition_refines_each_parent_group() {
    let source = people();

    let groups = GroupBy::new([
        GroupCondition::variable("s"),
        GroupCondition::variable("p"),
    ])
    .apply(all_ids(&source), &source)
    .expect("grouping");

    let partition = groups.iter().map(members).collect::<Vec<_>>();
    assert_eq!(
        partition,
        vec![vec![0, 4], vec![2], vec![1], vec![3], vec![5]]
    );
}

#[test]
fn alias_assigns_key_to_each_group() {
    let source = people();

    let groups = GroupBy::new([GroupCondition::variable("s").with_alias("?x")])
        .apply(all_ids(&source), &source)
        .expect("grouping");

    assert_eq!(groups[0].assignment("x"), Some(&ex("alice")));
    assert_eq!(groups[1].assignment("x"), Some(&ex("bob")));
    assert_eq!(groups[2].assignment("x"), Some(&ex("carol")));
    assert!(groups[3].is_assigned("x"), "unbound key assigns the alias as unbound");
    assert_eq!(groups[3].assignment("x"), None);
}

#[test]
fn refined_groups_inherit_parent_aliases() {
    let source = people();

    let groups = GroupBy::new([
        GroupCondition::variable("s").with_alias("subject"),
        GroupCondition::variable("p").with_alias("predicate"),
    ])
    .apply(all_ids(&source), &source)
    .expect("grouping");

    let first = &groups[0];
    assert_eq!(first.assignment("subject"), Some(&ex("alice")));
    assert_eq!(first.assignment("predicate"), Some(&ex("knows")));
    assert_eq!(groups[1].assignment("subject"), Some(&ex("alice")));
    assert_eq!(groups[1].assignment("predicate"), Some(&ex("name")));
}

#[test]
fn reusing_an_alias_fails_with_already_assigned() {
    let source = people();

    let err = GroupBy::new([
        GroupCondition::variable("s").with_alias("k"),
        GroupCondition::variable("p").with_alias("k"),
    ])
    .apply(all_ids(&source), &source)
    .expect_err("duplicate alias must fail");

    assert_eq!(
        err,
        GroupingError::Assignment(AssignmentError::AlreadyAssigned {
            variable: "k".to_string()
        })
    );
}

#[test]
fn group_limit_is_enforced() {
    let source = people();
    let config = GroupingConfig::default().with_max_groups(3);

    let err = GroupBy::new([GroupCondition::variable("s")])
        .with_config(config)
        .apply(all_ids(&source), &source)
        .expect_err("four groups exceed a limit of three");

    assert_eq!(err, GroupingError::GroupLimitExceeded { limit: 3 });
}

#[test]
fn group_limit_counts_groups_across_parents() {
    let source = people();
    let config = GroupingConfig::default().with_max_groups(4);

    let result = GroupBy::new([
        GroupCondition::variable("s"),
        GroupCondition::variable("p"),
    ])
    .with_config(config)
    .apply(all_ids(&source), &source);

    assert_eq!(result, Err(GroupingError::GroupLimitExceeded { limit: 4 }));
}

#[test]
fn config_defaults_and_decodes_partial_documents() {
    assert_eq!(GroupingConfig::default().max_groups(), 10_000);

    let decoded: GroupingConfig = serde_json::from_str("{}").expect("empty config");
    assert_eq!(decoded, GroupingConfig::default());

    let decoded: GroupingConfig =
        serde_json::from_str(r#"{ "max_groups": 12 }"#).expect("explicit config");
    assert_eq!(decoded.max_groups(), 12);
}

#[test]
fn condition_names_are_normalized() {
    let condition = GroupCondition::variable("$s").with_alias("?x");

    assert_eq!(condition.name(), "s");
    assert_eq!(condition.alias(), Some("x"));
}

#[test]
fn grouping_emits_start_and_finish_events() {
    let source = people();
    let sink = CapturingSink::default();

    with_metrics_sink(&sink, || {
        GroupBy::new([GroupCondition::variable("s")])
            .apply(all_ids(&source), &source)
            .expect("grouping");
    });

    assert_eq!(
        sink.events.into_inner(),
        vec![
            MetricsEvent::GroupingStart { conditions: 1 },
            MetricsEvent::GroupingFinish {
                solutions: 6,
                groups: 4
            },
        ]
    );
}

#[test]
fn rejected_alias_is_counted_in_global_metrics() {
    metrics_reset_all();
    let source = people();

    let _ = GroupBy::new([
        GroupCondition::variable("s").with_alias("k"),
        GroupCondition::variable("p").with_alias("k"),
    ])
    .apply(all_ids(&source), &source);

    let counters = metrics_report(None).counters.expect("counters");
    assert_eq!(counters.grouping_calls, 1);
    assert_eq!(counters.grouping_conditions, 2);
    assert_eq!(counters.assignments_rejected, 1);
    assert_eq!(counters.groups_emitted, 0);
}

#[test]
fn custom_sources_are_supported() {
    struct Parity;

    impl SolutionSource for Parity {
        fn binding(&self, id: SolutionId, _variable: &str) -> Option<&Term> {
            static EVEN: LazyLock<Term> = LazyLock::new(|| Term::literal("even"));
            static ODD: LazyLock<Term> = LazyLock::new(|| Term::literal("odd"));

            let parity: &Term = if id.get() % 2 == 0 { &EVEN } else { &ODD };
            Some(parity)
        }
    }

    let groups = GroupBy::new([GroupCondition::variable("parity")])
        .apply((0..5).map(SolutionId::new), &Parity)
        .expect("grouping");

    assert_eq!(
        groups.iter().map(members).collect::<Vec<_>>(),
        vec![vec![0, 2, 4], vec![1, 3]]
    );
}

proptest! {
    #[test]
    fn grouping_partitions_every_solution_exactly_once(
        keys in prop::collection::vec(prop::option::of(0u8..4), 0..40),
    ) {
        let source: Table = keys
            .iter()
            .enumerate()
            .map(|(n, key)| {
                let mut row = BTreeMap::new();
                if let Some(key) = key {
                    row.insert("k".to_string(), Term::literal(key.to_string()));
                }
                (id(n as u64), row)
            })
            .collect();

        let groups = GroupBy::new([GroupCondition::variable("k")])
            .apply(all_ids(&source), &source)
            .expect("grouping");

        let mut seen = groups.iter().flat_map(members).collect::<Vec<_>>();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..keys.len() as u64).collect::<Vec<_>>());

        for group in &groups {
            let first = source.binding(group.members().next().expect("non-empty group"), "k");
            prop_assert!(group.members().all(|member| source.binding(member, "k") == first));
            let ids = members(group);
            prop_assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
