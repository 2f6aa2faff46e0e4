//! Query string parsing tests

use super::super::*;

fn names() -> ParamNames {
    ParamNames::default()
}

fn row(field: &str, operator: &str, value: &str) -> SearchCriterion {
    SearchCriterion::new(field, operator, value)
}

#[test]
fn test_absent_without_search_param() {
    assert_eq!(
        SearchRequest::from_query("page=2&sort=id", &names()).unwrap(),
        SearchRequest::Absent
    );
    assert_eq!(
        SearchRequest::from_query("", &names()).unwrap(),
        SearchRequest::Absent
    );
}

#[test]
fn test_appended_rows_in_order() {
    let query = "?YummySearch[field][]=Orders.status&YummySearch[field][]=Orders.total\
        &YummySearch[operator][]=matching&YummySearch[operator][]=greater_than\
        &YummySearch[search][]=paid&YummySearch[search][]=100&page=2";

    let request = SearchRequest::from_query(query, &names()).unwrap();
    assert_eq!(
        request.criteria(),
        &[
            row("Orders.status", "matching", "paid"),
            row("Orders.total", "greater_than", "100"),
        ]
    );
    assert!(request.is_submitted());
}

#[test]
fn test_percent_encoded_keys_and_values() {
    let query = "YummySearch%5Bfield%5D%5B%5D=Customers.name\
        &YummySearch%5Boperator%5D%5B%5D=containing\
        &YummySearch%5Bsearch%5D%5B%5D=Jane+Doe%21";

    let request = SearchRequest::from_query(query, &names()).unwrap();
    assert_eq!(
        request.criteria(),
        &[row("Customers.name", "containing", "Jane Doe!")]
    );
}

#[test]
fn test_indexed_rows_out_of_order() {
    let query = "YummySearch[field][1]=Orders.total&YummySearch[field][0]=Orders.status\
        &YummySearch[operator][0]=matching&YummySearch[operator][1]=less_than\
        &YummySearch[search][1]=5&YummySearch[search][0]=paid";

    let request = SearchRequest::from_query(query, &names()).unwrap();
    assert_eq!(
        request.criteria(),
        &[
            row("Orders.status", "matching", "paid"),
            row("Orders.total", "less_than", "5"),
        ]
    );
}

#[test]
fn test_bare_param_is_empty_submission() {
    assert_eq!(
        SearchRequest::from_query("YummySearch=", &names()).unwrap(),
        SearchRequest::Submitted(vec![])
    );
}

#[test]
fn test_clear_wins_with_any_value() {
    for clear in ["YummySearch_clear=1", "YummySearch_clear=", "YummySearch_clear"] {
        let query = format!(
            "{clear}&YummySearch[field][]=Orders.status&YummySearch[operator][]=matching\
             &YummySearch[search][]=paid"
        );
        assert_eq!(
            SearchRequest::from_query(&query, &names()).unwrap(),
            SearchRequest::Cleared,
            "{clear}"
        );
    }
}

#[test]
fn test_clear_wins_over_malformed_rows() {
    let query = "YummySearch[field][]=Orders.status&YummySearch_clear=x";
    assert_eq!(
        SearchRequest::from_query(query, &names()).unwrap(),
        SearchRequest::Cleared
    );
}

#[test]
fn test_length_mismatch() {
    let query = "YummySearch[field][]=Orders.status&YummySearch[field][]=Orders.total\
        &YummySearch[operator][]=matching&YummySearch[search][]=paid";
    assert_eq!(
        SearchRequest::from_query(query, &names()),
        Err(RequestError::LengthMismatch {
            fields: 2,
            operators: 1,
            searches: 1,
        })
    );
}

#[test]
fn test_mixed_index_styles() {
    let query = "YummySearch[field][]=a.b&YummySearch[field][1]=c.d\
        &YummySearch[operator][]=matching&YummySearch[operator][]=matching\
        &YummySearch[search][]=x&YummySearch[search][]=y";
    assert_eq!(
        SearchRequest::from_query(query, &names()),
        Err(RequestError::InvalidIndex { list: "field" })
    );
}

#[test]
fn test_custom_param_names() {
    let names = ParamNames::new("q", "reset");
    let query = "q[field][]=Orders.id&q[operator][]=matching&q[search][]=1";
    assert_eq!(
        SearchRequest::from_query(query, &names).unwrap().criteria().len(),
        1
    );
    assert_eq!(
        SearchRequest::from_query(&format!("{query}&reset=1"), &names).unwrap(),
        SearchRequest::Cleared
    );
    // Default names are not ours any more
    assert_eq!(
        SearchRequest::from_query("YummySearch=", &names).unwrap(),
        SearchRequest::Absent
    );
}

#[test]
fn test_prefix_lookalike_is_foreign() {
    assert_eq!(
        SearchRequest::from_query("YummySearchExtra=1", &names()).unwrap(),
        SearchRequest::Absent
    );
}

#[test]
fn test_unknown_sub_key_marks_present() {
    assert_eq!(
        SearchRequest::from_query("YummySearch[page]=2", &names()).unwrap(),
        SearchRequest::Submitted(vec![])
    );
}
