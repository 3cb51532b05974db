// tests/output_tests.rs

use olap_mdx::{
    AxisId, HierarchizeMode, MemberOptions, Node, OrderDirection, OrderKey, QueryBuilder,
    node_to_mdx,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

const COLUMNS: [&str; 2] = ["[Measures].[Unit Sales]", "[Measures].[Store Sales]"];
const COLUMNS_CLAUSE: &str = "SELECT {[Measures].[Unit Sales], [Measures].[Store Sales]} ON COLUMNS,";

fn sales() -> QueryBuilder {
    let mut query = QueryBuilder::new("Sales");
    query.columns(COLUMNS);
    query
}

fn lines(parts: &[&str]) -> String {
    parts.join("\n")
}

// ============================================================================
// Set Rendering
// ============================================================================

#[test]
fn test_single_member_list_is_unbraced() {
    assert_eq!(node_to_mdx(&Node::list(["[Product].children"])), "[Product].children");
}

#[test]
fn test_multi_member_list_is_braced() {
    assert_eq!(node_to_mdx(&Node::list(["A", "B"])), "{A, B}");
}

#[test]
fn test_nested_lists_follow_the_same_rule() {
    let node = Node::List(vec![Node::list(["A"]), Node::list(["B", "C"])]);
    assert_eq!(node_to_mdx(&node), "{A, {B, C}}");
}

#[test]
fn test_nested_nonempty_renders_as_function() {
    let node = Node::crossjoin(Node::non_empty(Node::list(["A"])), Node::list(["B"]));
    assert_eq!(node_to_mdx(&node), "CROSSJOIN(NONEMPTY(A), B)");
}

#[test]
fn test_order_key_tuple() {
    let node = Node::order(
        Node::list(["S"]),
        OrderKey::Tuple(vec!["k1".into(), "k2".into()]),
        OrderDirection::Asc,
    );
    assert_eq!(node_to_mdx(&node), "ORDER(S, (k1, k2), ASC)");
}

// ============================================================================
// Full Statements
// ============================================================================

#[test]
fn test_query_with_slicer() {
    let mut query = sales();
    query
        .rows("[Product].children")
        .slicer(["[Time].[1997].[Q1]", "[Customers].[USA].[CA]"]);
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "[Product].children ON ROWS",
            "FROM [Sales]",
            "WHERE ([Time].[1997].[Q1], [Customers].[USA].[CA])",
        ])
    );
}

#[test]
fn test_query_with_crossjoin() {
    let mut query = sales();
    query
        .rows("[Product].children")
        .crossjoin(["[Customers].[Canada]", "[Customers].[USA]"])
        .unwrap();
    query.slicer("[Time].[1997].[Q1]");
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "CROSSJOIN([Product].children, {[Customers].[Canada], [Customers].[USA]}) ON ROWS",
            "FROM [Sales]",
            "WHERE ([Time].[1997].[Q1])",
        ])
    );
}

#[test]
fn test_query_with_several_crossjoins() {
    let mut query = sales();
    query
        .rows("[Product].children")
        .crossjoin(["[Customers].[Canada]", "[Customers].[USA]"])
        .unwrap()
        .crossjoin(["[Time].[1997].[Q1]", "[Time].[1997].[Q2]"])
        .unwrap();
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "CROSSJOIN(CROSSJOIN([Product].children, {[Customers].[Canada], [Customers].[USA]}), \
             {[Time].[1997].[Q1], [Time].[1997].[Q2]}) ON ROWS",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_query_with_crossjoin_and_nonempty() {
    let mut query = sales();
    query
        .rows("[Product].children")
        .crossjoin(["[Customers].[Canada]", "[Customers].[USA]"])
        .unwrap()
        .nonempty()
        .unwrap()
        .slicer("[Time].[1997].[Q1]");
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "NON EMPTY CROSSJOIN([Product].children, {[Customers].[Canada], [Customers].[USA]}) ON ROWS",
            "FROM [Sales]",
            "WHERE ([Time].[1997].[Q1])",
        ])
    );
}

#[test]
fn test_query_with_order_by_one_measure() {
    let mut query = sales();
    query
        .rows("[Product].children")
        .order("[Measures].[Unit Sales]", "bdesc")
        .unwrap();
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "ORDER([Product].children, [Measures].[Unit Sales], BDESC) ON ROWS",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_query_with_order_by_measure_and_other_member() {
    let mut query = sales();
    query
        .rows("[Product].children")
        .order(["[Measures].[Unit Sales]", "[Customers].[USA]"], "asc")
        .unwrap();
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "ORDER([Product].children, ([Measures].[Unit Sales], [Customers].[USA]), ASC) ON ROWS",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_query_with_hierarchize() {
    let mut query = sales();
    query
        .rows(["[Customers].[Country].Members", "[Customers].[City].Members"])
        .hierarchize(HierarchizeMode::Default)
        .unwrap();
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "HIERARCHIZE({[Customers].[Country].Members, [Customers].[City].Members}) ON ROWS",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_query_with_hierarchize_post() {
    let mut query = sales();
    query
        .rows(["[Customers].[Country].Members", "[Customers].[City].Members"])
        .hierarchize(HierarchizeMode::Post)
        .unwrap();
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "HIERARCHIZE({[Customers].[Country].Members, [Customers].[City].Members}, POST) ON ROWS",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_query_with_hierarchize_all_after_crossjoin() {
    let mut query = sales();
    query
        .rows("[Product].children")
        .crossjoin(["[Customers].[Country].Members", "[Customers].[City].Members"])
        .unwrap()
        .hierarchize_all(HierarchizeMode::Default)
        .unwrap();
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "HIERARCHIZE(CROSSJOIN([Product].children, \
             {[Customers].[Country].Members, [Customers].[City].Members})) ON ROWS",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_query_with_hierarchize_last_factor_after_crossjoin() {
    let mut query = sales();
    query
        .rows("[Product].children")
        .crossjoin(["[Customers].[Country].Members", "[Customers].[City].Members"])
        .unwrap()
        .hierarchize(HierarchizeMode::Default)
        .unwrap();
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "CROSSJOIN([Product].children, \
             HIERARCHIZE({[Customers].[Country].Members, [Customers].[City].Members})) ON ROWS",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_query_with_except() {
    let mut query = sales();
    query
        .rows("[Customers].[Country].Members")
        .except("[Customers].[USA]")
        .unwrap();
    assert_eq!(
        query.to_mdx(),
        lines(&[
            COLUMNS_CLAUSE,
            "EXCEPT([Customers].[Country].Members, [Customers].[USA]) ON ROWS",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_query_including_with_member_clause() {
    let mut query = QueryBuilder::new("Sales");
    query
        .with_member(
            "[Measures].[ProfitPct]",
            MemberOptions::with_formula(
                "Val((Measures.[Store Sales] - Measures.[Store Cost]) / Measures.[Store Sales])",
            )
            .solve_order(1)
            .format_string("Percent"),
        )
        .unwrap()
        .with_member(
            "[Measures].[ProfitValue]",
            MemberOptions::with_formula("[Measures].[Store Sales] * [Measures].[ProfitPct]")
                .solve_order(2)
                .format_string("Currency"),
        )
        .unwrap()
        .columns(COLUMNS)
        .rows("[Product].children")
        .slicer(["[Time].[1997].[Q1]", "[Customers].[USA].[CA]"]);

    assert_eq!(
        query.to_mdx(),
        lines(&[
            "WITH",
            "MEMBER [Measures].[ProfitPct] AS \
             'Val((Measures.[Store Sales] - Measures.[Store Cost]) / Measures.[Store Sales])', \
             SOLVE_ORDER = 1, FORMAT_STRING = 'Percent'",
            "MEMBER [Measures].[ProfitValue] AS \
             '[Measures].[Store Sales] * [Measures].[ProfitPct]', \
             SOLVE_ORDER = 2, FORMAT_STRING = 'Currency'",
            COLUMNS_CLAUSE,
            "[Product].children ON ROWS",
            "FROM [Sales]",
            "WHERE ([Time].[1997].[Q1], [Customers].[USA].[CA])",
        ])
    );
}

#[test]
fn test_member_options_forwarded_verbatim() {
    let mut query = QueryBuilder::new("Sales");
    query
        .with_member(
            "[Measures].[Flag]",
            MemberOptions::with_formula("IIf([Measures].[Unit Sales] > 0, 'yes', 'no')")
                .set("visible", false)
                .set("fore_color", 255),
        )
        .unwrap()
        .columns("[Measures].[Flag]");
    assert_eq!(
        query.to_mdx(),
        lines(&[
            "WITH",
            "MEMBER [Measures].[Flag] AS 'IIf([Measures].[Unit Sales] > 0, ''yes'', ''no'')', \
             VISIBLE = FALSE, FORE_COLOR = 255",
            "SELECT [Measures].[Flag] ON COLUMNS",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_positional_axes_render_by_index() {
    let mut query = QueryBuilder::new("Sales");
    query
        .axis(AxisId::Positional(0), "[Measures].[Unit Sales]")
        .axis(AxisId::Positional(1), "[Product].children")
        .axis(AxisId::Positional(2), "[Store].children")
        .axis(AxisId::Positional(3), "[Time].children");
    assert_eq!(
        query.to_mdx(),
        lines(&[
            "SELECT [Measures].[Unit Sales] ON COLUMNS,",
            "[Product].children ON ROWS,",
            "[Store].children ON PAGES,",
            "[Time].children ON 3",
            "FROM [Sales]",
        ])
    );
}

#[test]
fn test_empty_slicer_is_omitted() {
    let mut query = sales();
    query.slicer(Vec::<String>::new());
    assert_eq!(
        query.to_mdx(),
        "SELECT {[Measures].[Unit Sales], [Measures].[Store Sales]} ON COLUMNS\nFROM [Sales]"
    );
}

// ============================================================================
// Idempotence
// ============================================================================

#[test]
fn test_to_mdx_does_not_mutate() {
    let mut query = sales();
    query.rows("[Product].children").nonempty().unwrap();
    let before = query.clone();
    let first = query.to_mdx();
    let second = query.to_mdx();
    assert_eq!(first, second);
    assert_eq!(query, before);
}

proptest! {
    #[test]
    fn prop_to_mdx_is_idempotent(
        columns in prop::collection::vec("\\[[A-Za-z ]{1,8}\\]", 0..4),
        rows in prop::collection::vec("\\[[A-Za-z ]{1,8}\\]", 1..4),
        crossjoined in prop::collection::vec("\\[[A-Za-z ]{1,8}\\]", 1..3),
        slicer in prop::collection::vec("\\[[A-Za-z]{1,8}\\]", 0..3),
    ) {
        let mut query = QueryBuilder::new("Cube");
        query.columns(columns).rows(rows);
        query.crossjoin(crossjoined).unwrap();
        query.slicer(slicer);
        let snapshot = query.clone();
        prop_assert_eq!(query.to_mdx(), query.to_mdx());
        prop_assert_eq!(query, snapshot);
    }
}
