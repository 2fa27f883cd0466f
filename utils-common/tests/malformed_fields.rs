use utils_common::{load_collection, BlogPost, Certificate, DataOrigin, MemorySource, Project, Record};

#[test]
fn bad_optional_field_keeps_the_rest_of_the_collection() {
    let source = MemorySource::new().with_file(
        BlogPost::DATA_FILE,
        r#"[
            {"id":"good","title":"Good","date":"2024-01-15","category":"Automation","tags":["x"],"published":true},
            {"id":"bad","title":null,"tags":null,"category":7,"featured":"yes","published":true}
        ]"#,
    );

    let loaded = load_collection::<BlogPost>(&source);
    assert_eq!(loaded.origin, DataOrigin::Fetched);

    let ids: Vec<&str> = loaded.data.iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["good", "bad"]);
    assert_eq!(loaded.data[0].tags, vec!["x"]);

    let bad = &loaded.data[1];
    assert_eq!(bad.title, "");
    assert!(bad.tags.is_empty());
    assert_eq!(bad.category, None);
    assert!(!bad.featured);
}

#[test]
fn non_string_list_entries_are_dropped() {
    let source = MemorySource::new().with_file(
        Project::DATA_FILE,
        r#"[{"id":"p1","category":7,"technologies":["Rust",3,null,"Wasm"],"metrics":[1,2],"achievements":"lots"}]"#,
    );

    let loaded = load_collection::<Project>(&source);
    assert_eq!(loaded.origin, DataOrigin::Fetched);

    let project = &loaded.data[0];
    assert_eq!(project.technologies, vec!["Rust", "Wasm"]);
    assert_eq!(project.category, None);
    assert!(project.metrics.is_empty());
    assert!(project.achievements.is_empty());
}

#[test]
fn certificate_with_numeric_issuer_still_loads() {
    let source = MemorySource::new().with_file(
        Certificate::DATA_FILE,
        r#"[{"id":"c1","issuer":42,"skills":"testing","featured":1},{"id":"c2","issuer":"Edureka"}]"#,
    );

    let loaded = load_collection::<Certificate>(&source);
    assert_eq!(loaded.origin, DataOrigin::Fetched);
    assert_eq!(loaded.data[0].issuer, None);
    assert!(loaded.data[0].skills.is_empty());
    assert!(!loaded.data[0].featured);
    assert_eq!(loaded.data[1].issuer.as_deref(), Some("Edureka"));
}

#[test]
fn missing_id_still_fails_the_load() {
    let source = MemorySource::new().with_file(BlogPost::DATA_FILE, r#"[{"id":"a"},{"title":"no id"}]"#);
    let loaded = load_collection::<BlogPost>(&source);
    assert_eq!(loaded.origin, DataOrigin::BuiltIn);
}
