use routeforge::{
    manifest::{Manifest, ManifestFormat},
    router::{RouteMatch, Router},
};

fn example_manifest() -> &'static str {
    r#"
[[routes]]
url = "/"
to = "Home::index"
name = "home"

[[routes]]
url = "/zoo/animals"
to = "Animals::index"
name = "animals"

[[routes]]
url = "/zoo/animals/(id:digit)"
to = "Animals::show/{id}"
name = "animal"

[[routes]]
url = "/zoo/animals/(name:alpha)"
to = "Animals::byName/{name}"

[[routes]]
url = "/zoo/animals/(id:digit)/toys/(toy:alnum:1,16)"
to = "Toys::show/{id}/{toy}"
name = "toy"

[[routes]]
url = "/zoo/(:lower)/(:digit:3)"
to = "Zoo::pen/{1}/{2}"
name = "pen"

[[groups]]
prefix = "/zoo/admin"

[[groups.routes]]
url = "/keepers/(id:uuid)"
to = "zoo/admin/Keepers::edit/{id}"
name = "keeper"
"#
}

fn router() -> Router {
    Manifest::parse(example_manifest(), ManifestFormat::Toml)
        .unwrap()
        .build_router()
        .unwrap()
}

fn assert_route_match(router: &Router, path: &str, expected_handler: &str) {
    match router.find_route_by_url(path) {
        Some(RouteMatch { route, .. }) => {
            let destination = route.destination();
            let handler = format!("{}::{}", destination.class(), destination.action());
            println!("✅ {} → {}", path, handler);
            assert_eq!(
                handler, expected_handler,
                "Handler mismatch for {}: expected '{}', got '{}'",
                path, expected_handler, handler
            );
        }
        None => {
            println!("❌ {} → no match", path);
            assert_eq!(expected_handler, "<none>", "Expected route to match for {}", path);
        }
    }
}

#[test]
fn test_router_root_path() {
    assert_route_match(&router(), "/", "Home::index");
}

#[test]
fn test_router_literal_route() {
    assert_route_match(&router(), "/zoo/animals", "Animals::index");
}

#[test]
fn test_router_typed_placeholders_select_route() {
    let router = router();
    assert_route_match(&router, "/zoo/animals/123", "Animals::show");
    assert_route_match(&router, "/zoo/animals/leo", "Animals::byName");
    assert_route_match(&router, "/zoo/animals/leo7", "<none>");
}

#[test]
fn test_router_nested_params() {
    let router = router();
    let m = router.find_route_by_url("/zoo/animals/123/toys/ball9").unwrap();
    assert_eq!(m.get_path_param("id"), Some("123"));
    assert_eq!(m.get_path_param("toy"), Some("ball9"));
    assert_route_match(
        &router,
        "/zoo/animals/123/toys/abcdefghijklmnopq",
        "<none>",
    );
}

#[test]
fn test_router_positional_params() {
    let router = router();
    let m = router.find_route_by_url("/zoo/cats/042").unwrap();
    assert_eq!(m.get_path_param("1"), Some("cats"));
    assert_eq!(m.get_path_param("2"), Some("042"));
    assert_eq!(
        m.arguments(),
        vec![
            ("1".to_string(), "cats".to_string()),
            ("2".to_string(), "042".to_string())
        ]
    );
    assert_route_match(&router, "/zoo/cats/42", "<none>");
}

#[test]
fn test_router_group_prefix() {
    let router = router();
    assert_route_match(
        &router,
        "/zoo/admin/keepers/123e4567-e89b-12d3-a456-426614174000",
        "zoo\\admin\\Keepers::edit",
    );
}

#[test]
fn test_router_unknown_path() {
    let router = router();
    assert_route_match(&router, "/unknown", "<none>");
    assert_route_match(&router, "/zoo/animals/", "<none>");
}

#[test]
fn test_reverse_named_routes() {
    let router = router();
    let no_params: [(&str, &str); 0] = [];
    assert_eq!(router.reverse_url("home", no_params).as_deref(), Some("/"));
    assert_eq!(
        router.reverse_url("toy", [("id", "5"), ("toy", "rope")]).as_deref(),
        Some("/zoo/animals/5/toys/rope")
    );
    assert_eq!(
        router.reverse_url("pen", [("1", "birds"), ("2", "001")]).as_deref(),
        Some("/zoo/birds/001")
    );
    assert_eq!(router.reverse_url("pen", [("1", "birds"), ("2", "1")]), None);
    assert_eq!(router.reverse_url("animal", [("id", "5"), ("x", "1")]), None);
}

#[test]
fn test_reverse_then_match_lands_on_same_route() {
    let router = router();
    for (name, params) in [
        ("animal", vec![("id", "77")]),
        ("toy", vec![("id", "1"), ("toy", "x")]),
        ("pen", vec![("1", "owls"), ("2", "123")]),
        (
            "keeper",
            vec![("id", "00000000-0000-0000-0000-000000000000")],
        ),
    ] {
        let url = router.reverse_url(name, params.clone()).unwrap();
        let m = router.find_route_by_url(&url).unwrap();
        assert_eq!(m.route.name(), Some(name), "url {url}");
        for (key, value) in params {
            assert_eq!(m.get_path_param(key), Some(value));
        }
    }
}
