//! Tests for the commission aggregation semantics

use kicktree::domain::{Edge, ForestBuilder, Member, MemberTree};
use kicktree::util::testing;
use rstest::rstest;

#[ctor::ctor]
fn init() {
    testing::init_test_setup();
}

fn member(id: &str, name: &str, direct: f64, rate: f64) -> Member {
    Member::new(id, name, direct, rate)
}

/// A(100) -> B(25) -> C(10) -> D(5), all rates 0.2
fn reference_chain() -> Vec<MemberTree> {
    let members = vec![
        member("a", "Alice", 100.0, 0.2),
        member("b", "Bob", 25.0, 0.2),
        member("c", "Carol", 10.0, 0.2),
        member("d", "Dave", 5.0, 0.2),
    ];
    let edges = vec![
        Edge::new("a", "b"),
        Edge::new("b", "c"),
        Edge::new("c", "d"),
    ];
    ForestBuilder::new().build(members, &edges).unwrap()
}

fn total_of(forest: &[MemberTree], id: &str) -> f64 {
    kicktree::total_commission(forest, id).unwrap()
}

#[test]
fn given_reference_chain_when_totals_then_kickback_compounds_upward() {
    let forest = reference_chain();

    assert!((total_of(&forest, "d") - 5.0).abs() < 1e-9);
    assert!((total_of(&forest, "c") - 11.0).abs() < 1e-9);
    assert!((total_of(&forest, "b") - 27.2).abs() < 1e-9);
    assert!((total_of(&forest, "a") - 105.44).abs() < 1e-9);
}

#[test]
fn given_member_without_children_then_total_equals_direct() {
    let forest = ForestBuilder::new()
        .build(vec![member("x", "X", 42.5, 0.2)], &[])
        .unwrap();
    assert_eq!(total_of(&forest, "x"), 42.5);
}

#[rstest]
#[case::no_kickback(0.0, 100.0)]
#[case::full_kickback(1.0, 135.0)]
#[case::default_kickback(0.2, 107.0)]
fn given_parent_with_two_children_when_total_then_rate_applies_to_sum(
    #[case] rate: f64,
    #[case] expected: f64,
) {
    // children contribute 25 + 10 = 35 in total
    let members = vec![
        member("p", "Parent", 100.0, rate),
        member("c1", "First", 25.0, 0.2),
        member("c2", "Second", 10.0, 0.2),
    ];
    let edges = vec![Edge::new("p", "c1"), Edge::new("p", "c2")];

    let forest = ForestBuilder::new().build(members, &edges).unwrap();

    assert!((total_of(&forest, "p") - expected).abs() < 1e-9);
}

#[test]
fn given_merged_branches_when_total_then_branches_summed_not_maxed() {
    // root -> {long chain, single leaf}; each branch computed
    // independently, the shared ancestor sums them
    let members = vec![
        member("r", "Root", 0.0, 0.5),
        member("x", "X", 10.0, 0.5),
        member("y", "Y", 20.0, 0.5),
        member("z", "Z", 8.0, 0.5),
    ];
    let edges = vec![
        Edge::new("r", "x"),
        Edge::new("x", "y"),
        Edge::new("r", "z"),
    ];

    let forest = ForestBuilder::new().build(members, &edges).unwrap();

    // x = 10 + 0.5*20 = 20, r = 0 + 0.5*(20 + 8) = 14
    assert!((total_of(&forest, "x") - 20.0).abs() < 1e-9);
    assert!((total_of(&forest, "r") - 14.0).abs() < 1e-9);
}

#[test]
fn given_increased_child_direct_when_total_then_parent_never_decreases() {
    for bump in [0.0, 1.0, 10.0, 250.0] {
        let members = vec![
            member("p", "Parent", 50.0, 0.3),
            member("c", "Child", 10.0 + bump, 0.2),
        ];
        let edges = vec![Edge::new("p", "c")];
        let forest = ForestBuilder::new().build(members, &edges).unwrap();

        let baseline = 50.0 + 0.3 * 10.0;
        assert!(total_of(&forest, "p") >= baseline);
    }
}

#[test]
fn given_negative_direct_commission_then_it_propagates_arithmetically() {
    // Caller-trusted ranges: negatives are not rejected
    let members = vec![
        member("p", "Parent", 100.0, 0.5),
        member("c", "Child", -40.0, 0.2),
    ];
    let edges = vec![Edge::new("p", "c")];

    let forest = ForestBuilder::new().build(members, &edges).unwrap();

    assert!((total_of(&forest, "p") - 80.0).abs() < 1e-9);
}

#[test]
fn given_out_of_range_kickback_rate_then_it_propagates_arithmetically() {
    let members = vec![
        member("p", "Parent", 0.0, 2.0),
        member("c", "Child", 10.0, 0.2),
    ];
    let edges = vec![Edge::new("p", "c")];

    let forest = ForestBuilder::new().build(members, &edges).unwrap();

    assert!((total_of(&forest, "p") - 20.0).abs() < 1e-9);
}

#[test]
fn given_reference_chain_when_commission_lines_then_preorder_and_indented() {
    let forest = reference_chain();
    let lines: Vec<String> = forest[0].commission_lines().collect();

    assert_eq!(
        lines,
        vec![
            "Alice (105.44 = 100.00 + 5.44)",
            "    Bob (27.20 = 25.00 + 2.20)",
            "        Carol (11.00 = 10.00 + 1.00)",
            "            Dave (5.00 = 5.00 + 0.00)",
        ]
    );
}

#[test]
fn given_branching_tree_when_commission_lines_then_parent_precedes_descendants() {
    let members = vec![
        member("r", "Root", 1.0, 0.2),
        member("l", "Left", 2.0, 0.2),
        member("ll", "LeftLeaf", 3.0, 0.2),
        member("rr", "Right", 4.0, 0.2),
    ];
    let edges = vec![
        Edge::new("r", "l"),
        Edge::new("l", "ll"),
        Edge::new("r", "rr"),
    ];
    let forest = ForestBuilder::new().build(members, &edges).unwrap();

    let lines: Vec<String> = forest[0].commission_lines().collect();
    let names: Vec<&str> = lines
        .iter()
        .map(|l| l.trim_start().split(' ').next().unwrap())
        .collect();
    assert_eq!(names, vec!["Root", "Left", "LeftLeaf", "Right"]);

    let depths: Vec<usize> = lines
        .iter()
        .map(|l| (l.len() - l.trim_start().len()) / 4)
        .collect();
    assert_eq!(depths, vec![0, 1, 2, 1]);
}

#[test]
fn given_forest_when_commission_table_then_agrees_with_recursive_totals() {
    let forest = reference_chain();
    for tree in &forest {
        let table = tree.commission_table();
        for (idx, _) in tree.iter() {
            assert_eq!(table[&idx], tree.total_commission(idx));
        }
    }
}
