// Field resolution tests: first value wins, later probes never run

use std::cell::Cell;
use std::time::Duration;

use rigscan::resolver::{Field, ProbeError, ProbeResult};

#[test]
fn test_field_starts_unset() {
    let field: Field<u32> = Field::new("cores");
    assert!(!field.is_set());
    assert_eq!(field.into_option(), None);
}

#[test]
fn test_fill_keeps_first_value() {
    let mut field = Field::new("cores");
    field.fill(Some(8));
    field.fill(Some(16));
    assert_eq!(field.into_option(), Some(8));
}

#[test]
fn test_fill_with_none_leaves_field_open() {
    let mut field = Field::new("cores");
    field.fill(None);
    assert!(!field.is_set());
    field.fill(Some(4));
    assert_eq!(field.into_option(), Some(4));
}

#[test]
fn test_fill_with_error_leaves_field_open() {
    let mut field: Field<f64> = Field::new("baseClock");
    field.fill_with("cim", || Err(ProbeError::Unavailable("no powershell".into())));
    assert!(!field.is_set());
    field.fill_with("brand-string", || Ok(3.6));
    assert_eq!(field.into_option(), Some(3.6));
}

#[test]
fn test_fill_with_skips_probe_once_set() {
    let mut field = Field::new("model");
    let calls = Cell::new(0u32);
    field.fill_with("first", || {
        calls.set(calls.get() + 1);
        Ok("primary".to_string())
    });
    field.fill_with("second", || {
        calls.set(calls.get() + 1);
        Ok("fallback".to_string())
    });
    assert_eq!(calls.get(), 1);
    assert_eq!(field.into_option(), Some("primary".to_string()));
}

#[test]
fn test_all_probe_errors_collapse_to_absence() {
    let errors: Vec<ProbeError> = vec![
        ProbeError::Unavailable("gone".into()),
        ProbeError::Timeout(Duration::from_secs(5)),
        ProbeError::Parse("garbage".into()),
        ProbeError::Ambiguous("two answers".into()),
    ];
    for err in errors {
        let mut field: Field<u32> = Field::new("field");
        field.fill_with("probe", || Err(err));
        assert!(!field.is_set());
    }
}

#[tokio::test]
async fn test_fill_with_async_first_value_wins() {
    let mut field = Field::new("temp");
    field
        .fill_with_async("sensors", async { Ok(62.5) })
        .await;
    field
        .fill_with_async("thermal-zone", async { Ok(99.0) })
        .await;
    assert_eq!(field.into_option(), Some(62.5));
}

#[tokio::test]
async fn test_fill_with_async_never_polls_once_set() {
    let mut field = Field::new("temp");
    field.fill(Some(70.0));
    // would deadlock if polled
    field
        .fill_with_async("pending", std::future::pending::<ProbeResult<f64>>())
        .await;
    assert_eq!(field.into_option(), Some(70.0));
}

#[tokio::test]
async fn test_fill_with_async_error_then_success() {
    let mut field: Field<String> = Field::new("plan");
    field
        .fill_with_async("powercfg", async {
            Err(ProbeError::Timeout(Duration::from_secs(10)))
        })
        .await;
    field
        .fill_with_async("registry", async { Ok("Balanced".to_string()) })
        .await;
    assert_eq!(field.into_option(), Some("Balanced".to_string()));
}

#[test]
fn test_get_and_cloned_do_not_consume() {
    let mut field = Field::new("model");
    field.fill(Some("GeForce RTX 3070".to_string()));
    assert_eq!(field.get().map(String::as_str), Some("GeForce RTX 3070"));
    assert_eq!(field.cloned(), Some("GeForce RTX 3070".to_string()));
    assert!(field.is_set());
}
