use super::*;
use crate::model::{company, job};
use crate::value::Value;

#[test]
fn flag_only_yields_static_predicate() {
    let filters = FieldValues::new().with("hasEquity", true);
    let frag = job::FILTERS.compose(&filters).unwrap();
    assert_eq!(frag.clause(), "equity > 0");
    assert!(frag.values().is_empty());
}

#[test]
fn flag_consumes_no_placeholder() {
    let filters = FieldValues::new()
        .with("hasEquity", true)
        .with("minSalary", 200000);
    let frag = job::FILTERS.compose(&filters).unwrap();
    assert_eq!(frag.clause(), "salary >= $1 AND equity > 0");
    assert_eq!(frag.values(), &[Value::Int(200000)]);
}

#[test]
fn false_flag_contributes_nothing() {
    let filters = FieldValues::new()
        .with("minSalary", 50)
        .with("hasEquity", false);
    let frag = job::FILTERS.compose(&filters).unwrap();
    assert_eq!(frag.clause(), "salary >= $1");

    let frag = job::FILTERS
        .compose(&FieldValues::new().with("hasEquity", false))
        .unwrap();
    assert!(frag.is_empty());
}

#[test]
fn text_flag_is_truthy() {
    let filters = FieldValues::new().with("hasEquity", "TRUE");
    let frag = job::FILTERS.compose(&filters).unwrap();
    assert_eq!(frag.clause(), "equity > 0");
}

#[test]
fn substring_is_wrapped() {
    let filters = FieldValues::new().with("title", "eng");
    let frag = job::FILTERS.compose(&filters).unwrap();
    assert_eq!(frag.clause(), "title ILIKE $1");
    assert_eq!(frag.values(), &[Value::from("%eng%")]);
}

#[test]
fn composing_twice_does_not_double_wrap() {
    let filters = FieldValues::new().with("name", "net");
    let first = company::FILTERS.compose(&filters).unwrap();
    let second = company::FILTERS.compose(&filters).unwrap();
    assert_eq!(first, second);
    assert_eq!(second.values(), &[Value::from("%net%")]);
    assert_eq!(filters.get("name"), Some(&Value::from("net")));
}

#[test]
fn substring_metacharacters_match_literally() {
    let filters = FieldValues::new().with("title", r"50%_off\");
    let frag = job::FILTERS.compose(&filters).unwrap();
    assert_eq!(frag.values(), &[Value::from(r"%50\%\_off\\%")]);

    let frag = job::FILTERS
        .compose(&FieldValues::new().with("title", "_"))
        .unwrap();
    assert_eq!(frag.values(), &[Value::from(r"%\_%")]);
}

#[test]
fn range_filters_pass_through_unchecked() {
    let filters = FieldValues::new()
        .with("minEmployees", 10)
        .with("maxEmployees", 1);
    let frag = company::FILTERS.compose(&filters).unwrap();
    assert_eq!(frag.clause(), "num_employees >= $1 AND num_employees <= $2");
    assert_eq!(frag.values(), &[Value::Int(10), Value::Int(1)]);
}

#[test]
fn substring_requires_text() {
    let filters = FieldValues::new().with("name", 7);
    let err = company::FILTERS.compose(&filters).unwrap_err();
    assert!(matches!(err, JoblyError::Validation(_)));
}

#[test]
fn company_name_and_range() {
    let filters = FieldValues::new()
        .with("name", "c")
        .with("minEmployees", 2)
        .with("maxEmployees", 3);
    let frag = company::FILTERS.compose(&filters).unwrap();
    assert_eq!(
        frag.clause(),
        "name ILIKE $1 AND num_employees >= $2 AND num_employees <= $3"
    );
    assert_eq!(
        frag.values(),
        &[Value::from("%c%"), Value::Int(2), Value::Int(3)]
    );
}

#[test]
fn empty_filters_compose_to_nothing() {
    let frag = company::FILTERS.compose(&FieldValues::new()).unwrap();
    assert!(frag.is_empty());
    assert_eq!(frag.param_count(), 0);
}

#[test]
fn check_fields_rejects_unknown_keys() {
    let filters = FieldValues::new().with("name", "x").with("hasEquity", true);
    let err = company::FILTERS.check_fields(&filters).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Validation error: Filter hasEquity is not supported for companies"
    );
    assert!(job::FILTERS.check_fields(&FieldValues::new().with("hasEquity", true)).is_ok());
}

#[test]
fn unchecked_unknown_key_is_untranslated() {
    let filters = FieldValues::new().with("colour", "red");
    let err = company::FILTERS.compose(&filters).unwrap_err();
    assert!(matches!(err, JoblyError::UntranslatedField(f) if f == "colour"));
}
