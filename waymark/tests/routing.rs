use waymark::{
    ConfigError, LoadingMode, PatternError, RouteTable, SequentialIndexBuilder, params,
};

fn docs_table() -> RouteTable<&'static str> {
    RouteTable::builder()
        .eager("/", "Home", "home")
        .eager("/docs/new", "NewDoc", "new")
        .eager("/docs/:id", "Doc", "doc")
        .eager("/docs/:id/rev/:rev", "Revision", "revision")
        .build()
        .unwrap()
}

#[test]
fn test_first_registered_route_wins() {
    let table = docs_table();
    assert_eq!(table.find("/docs/new").unwrap().name(), "NewDoc");
    assert_eq!(table.find("/docs/old").unwrap().name(), "Doc");
}

#[test]
fn test_multiple_parameters() {
    let table = docs_table();
    let matched = table.find("/docs/42/rev/7").unwrap();
    assert_eq!(matched.name(), "Revision");
    assert_eq!(matched.params, params! { "id" => "42", "rev" => "7" });
    assert_eq!(
        table.href("Revision", &matched.params).unwrap(),
        "/docs/42/rev/7"
    );
}

#[test]
fn test_parameter_values_are_raw() {
    let table = docs_table();
    let matched = table.find("/docs/a%20b").unwrap();
    assert_eq!(matched.params.get("id"), Some("a%20b"));
}

#[test]
fn test_href_rejects_values_with_slashes() {
    let table = docs_table();
    assert!(table.href("Doc", &params! { "id" => "a/b" }).is_err());
    assert!(table.href("Doc", &params! { "id" => "" }).is_err());
}

#[test]
fn test_iteration_keeps_registration_order() {
    let table = docs_table();
    let names: Vec<_> = table.iter().map(|r| r.name()).collect();
    assert_eq!(names, ["Home", "NewDoc", "Doc", "Revision"]);
    assert_eq!(table.len(), 4);
    assert!(table.iter().all(|r| r.mode() == LoadingMode::Eager));
}

#[test]
fn test_invalid_configuration() {
    let err = RouteTable::builder()
        .eager("/docs/:id", "Doc", ())
        .eager("/docs/:id/edit", "Doc", ())
        .build()
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateName(ref name) if name == "Doc"));

    let err = RouteTable::builder()
        .eager("docs", "Docs", ())
        .build()
        .unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidPattern {
            source: PatternError::MissingLeadingSlash(_),
            ..
        }
    ));
}

#[test]
fn test_explicit_sequential_index() {
    let table = RouteTable::builder()
        .with_index::<SequentialIndexBuilder>()
        .eager("/view/:id", "ViewDocument", ())
        .build()
        .unwrap();
    assert!(table.match_path("/view/xyz").is_matched());
}

#[cfg(feature = "matchit")]
mod matchit_backend {
    use waymark::{MatchitIndexBuilder, RouteTable, app::names};

    #[tokio::test]
    async fn test_app_table_on_matchit() {
        let table = RouteTable::builder()
            .with_index::<MatchitIndexBuilder>()
            .eager("/", names::HOME, "home")
            .lazy("/about", names::ABOUT, || async {
                Ok::<_, waymark::BoxError>("about")
            })
            .eager("/editor/:id", names::MARKDOWN_EDITOR, "editor")
            .eager("/view/:id", names::VIEW_DOCUMENT, "view")
            .build()
            .unwrap();

        let matched = table.find("/editor/abc123").unwrap();
        assert_eq!(matched.name(), names::MARKDOWN_EDITOR);
        assert_eq!(matched.params.get("id"), Some("abc123"));

        assert!(table.find("/nonexistent").is_err());
        assert!(table.find("/editor").is_err());
        assert!(table.find("/editor/").is_err());

        assert_eq!(table.resolve("/about").await.unwrap().view, "about");
    }
}
