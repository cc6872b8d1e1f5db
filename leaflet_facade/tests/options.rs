use leaflet_facade::{Error, HandleId, LatLng, Options, Value};

#[test]
fn set_then_get_returns_written_value() {
    let mut opts = Options::new();
    opts.set("attribution", "© OpenStreetMap");
    opts.set("maxZoom", 19);
    assert_eq!(opts.get("attribution"), Some(&Value::from("© OpenStreetMap")));
    assert_eq!(opts.get("maxZoom").and_then(Value::as_f64), Some(19.0));
    assert_eq!(opts.get("minZoom"), None);
}

#[test]
fn overwrite_leaves_one_entry() {
    let mut opts = Options::new();
    opts.set("opacity", 0.5);
    opts.set("opacity", 0.8);
    assert_eq!(opts.len(), 1);
    assert_eq!(opts.get("opacity"), Some(&Value::Number(0.8)));
}

#[test]
fn remove_keeps_order_of_remaining_keys() {
    let mut opts: Options = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
    assert_eq!(opts.remove("b"), Some(Value::Number(2.0)));
    assert_eq!(opts.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    assert!(!opts.contains_key("b"));
}

#[test]
fn merge_overrides_shared_keys() {
    let mut style = Options::new().with("color", "blue").with("weight", 3);
    style.merge(&Options::new().with("color", "red"));
    assert_eq!(style.get_str_or("color", ""), "red");
    assert_eq!(style.get_f64_or("weight", 0.0), 3.0);
}

#[test]
fn strict_getters_report_the_key() {
    let opts = Options::new().with("zoom", "thirteen");
    match opts.f64("zoom") {
        Err(Error::Configuration { key, .. }) => assert_eq!(key, "zoom"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn shallow_clone_shares_handles() {
    let opts = Options::new()
        .with("layer", HandleId::new(3))
        .with("center", LatLng::new(1.0, 2.0));
    let copy = opts.clone_options(false).unwrap();
    assert_eq!(copy, opts);
}

#[test]
fn deep_clone_of_plain_data_succeeds() {
    let nested = Options::new().with("format", "image/png");
    let opts = Options::new().with("params", nested);
    assert_eq!(opts.clone_options(true).unwrap(), opts);
}

#[test]
fn deep_clone_with_nested_handle_is_unsupported() {
    let inner = Options::new().with("layer", HandleId::new(3));
    let opts = Options::new().with("search", inner);
    assert!(matches!(
        opts.clone_options(true),
        Err(Error::Unsupported(_))
    ));
}
