//! End-to-end tests: configuration, query parsing, compilation and the
//! pagination sink together.

#![allow(clippy::indexing_slicing)]

use serde_json::json;
use yummy_search::prelude::*;
use yummy_search::yummy_sql::{DropReason, FieldKey};

const SHOP_CONFIG: &str = r#"
model = "Orders"

[rules.allow]
Orders = ["status", "total"]

[rules.deny]
Customers = ["password"]
Invoices = "*"
"#;

fn shop_schema() -> StaticSchema {
    StaticSchema::new()
        .table("Orders", &["id", "status", "total", "secret"])
        .table("Customers", &["name", "password"])
        .table("Invoices", &["number"])
        .table("OrderItems", &["sku"])
        .relation("Orders", RelationKind::BelongsTo, "Customers")
        .relation("Orders", RelationKind::HasOne, "Invoices")
        .relation("Orders", RelationKind::HasMany, "OrderItems")
}

fn shop_search() -> YummySearch<ConditionSet> {
    YummySearch::builder()
        .config(SearchConfig::from_toml_str(SHOP_CONFIG).unwrap())
        .paginator(ConditionSet::new())
        .build()
        .unwrap()
}

const SAMPLE_QUERY: &str = "YummySearch[field][]=Orders.status\
    &YummySearch[field][]=Orders.total\
    &YummySearch[field][]=Orders.secret\
    &YummySearch[operator][]=matching\
    &YummySearch[operator][]=greater_than\
    &YummySearch[operator][]=matching\
    &YummySearch[search][]=paid\
    &YummySearch[search][]=100\
    &YummySearch[search][]=x";

#[test]
fn test_sample_rows_compile_in_order() {
    let mut search = shop_search();
    let outcome = search.search(SAMPLE_QUERY).unwrap();

    let SearchOutcome::Applied { appended, dropped } = outcome else {
        panic!("search should be applied");
    };
    assert_eq!(appended, 2);
    assert_eq!(dropped.len(), 1);
    assert_eq!(dropped[0].index, 2);
    assert_eq!(dropped[0].reason, DropReason::Denied);

    let predicates = search.paginator().predicates();
    assert_eq!(
        predicates,
        &[
            CompiledPredicate::new(
                FieldKey::parse("Orders.status").unwrap(),
                Comparison::Eq,
                "paid"
            ),
            CompiledPredicate::new(
                FieldKey::parse("Orders.total").unwrap(),
                Comparison::Gt,
                "100"
            ),
        ]
    );

    let fragment = search.paginator().to_postgres(1);
    insta::assert_snapshot!(fragment.sql, @"Orders.status = $1 AND Orders.total > $2");
    assert_eq!(fragment.params, ["paid", "100"]);
}

#[test]
fn test_clear_signal_skips_search() {
    let mut search = shop_search();
    let outcome = search
        .search(&format!("{SAMPLE_QUERY}&YummySearch_clear=1"))
        .unwrap();

    assert_eq!(outcome, SearchOutcome::NotPerformed);
    assert!(search.paginator().is_empty());
}

#[test]
fn test_existing_conditions_are_kept() {
    let mut search = shop_search();
    search.paginator_mut().append_conditions(vec![CompiledPredicate::new(
        FieldKey::parse("Orders.id").unwrap(),
        Comparison::Ne,
        "0",
    )]);

    search.search(SAMPLE_QUERY).unwrap();
    let sink = search.into_paginator();
    assert_eq!(sink.len(), 3);
    insta::assert_snapshot!(
        sink.to_sqlite(1).sql,
        @"Orders.id != ?1 AND Orders.status = ?2 AND Orders.total > ?3"
    );
}

#[test]
fn test_repeated_searches_accumulate() {
    let mut search = shop_search();
    search.search(SAMPLE_QUERY).unwrap();
    search.search(SAMPLE_QUERY).unwrap();
    assert_eq!(search.paginator().len(), 4);
}

#[test]
fn test_mismatched_lists_are_malformed() {
    let mut search = shop_search();
    let err = search
        .search("YummySearch[field][]=Orders.status&YummySearch[search][]=paid")
        .unwrap_err();

    assert_eq!(
        err,
        SearchError::MalformedRequest(RequestError::LengthMismatch {
            fields: 1,
            operators: 0,
            searches: 1,
        })
    );
    assert!(search.paginator().is_empty());
}

#[test]
fn test_missing_paginator_is_configuration_error() {
    let err = YummySearch::<ConditionSet>::builder()
        .config(SearchConfig::from_toml_str(SHOP_CONFIG).unwrap())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Configuration(ConfigurationError::MissingPaginator)
    ));
}

#[test]
fn test_invalid_model_is_configuration_error() {
    let err = YummySearch::builder()
        .config(SearchConfig::new("orders where 1=1"))
        .paginator(ConditionSet::new())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::Configuration(ConfigurationError::InvalidModel { .. })
    ));
}

#[test]
fn test_denied_entity_absent_from_catalog() {
    let catalog = shop_search().catalog(&shop_schema()).unwrap();

    assert!(catalog.contains_entity("Orders"));
    assert!(catalog.contains_entity("Customers"));
    assert!(!catalog.contains_entity("Invoices"));
    assert!(!catalog.contains_entity("Order Items"));
}

#[test]
fn test_wholly_denied_primary_absent_from_catalog() {
    let config = SearchConfig::new("Orders")
        .with_rules(AllowDenyConfig::new().deny_all("Orders"));
    let search = YummySearch::builder()
        .config(config)
        .paginator(ConditionSet::new())
        .build()
        .unwrap();

    let catalog = search.catalog(&shop_schema()).unwrap();
    assert!(!catalog.contains_entity("Orders"));
    assert!(catalog.contains_entity("Customers"));
}

#[test]
fn test_unknown_primary_is_schema_error() {
    let search = YummySearch::builder()
        .config(SearchConfig::new("Ghosts"))
        .paginator(ConditionSet::new())
        .build()
        .unwrap();

    let err = search.catalog(&shop_schema()).unwrap_err();
    assert!(matches!(err, SearchError::SchemaLookup(_)));
}

#[test]
fn test_helper_data_json() {
    let search = shop_search();
    let data = search
        .helper_data(
            &shop_schema(),
            "/orders",
            "YummySearch[field][]=Orders.status&YummySearch[operator][]=matching&YummySearch[search][]=paid",
        )
        .unwrap();

    assert_eq!(
        serde_json::to_value(&data).unwrap(),
        json!({
            "base_url": "/orders",
            "rows": [
                {"field": "Orders.status", "operator": "matching", "value": "paid"}
            ],
            "operators": {
                "containing": "Containing",
                "not_containing": "Not Containing",
                "greater_than": "Greater than",
                "less_than": "Less than",
                "matching": "Exact Match",
                "not_matching": "Not Exact Match"
            },
            "models": {
                "Orders": {"Orders.status": "Status", "Orders.total": "Total"},
                "Customers": {"Customers.name": "Name"}
            }
        })
    );

    // Group order survives serialization
    let text = serde_json::to_string(&data.models).unwrap();
    assert!(text.find("\"Orders\"").unwrap() < text.find("\"Customers\"").unwrap());
}
