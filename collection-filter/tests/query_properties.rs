use collection_filter::{Collection, CollectionFilter, CollectionKind, QueryState, SortKey, BLOG_PAGE_SIZE};
use utils_common::loader::{DataOrigin, DataSource, LoadError, MemorySource};
use utils_common::models::{parse_date, BlogPost, Record};

fn post(id: &str, day: u32, read_time: u32, category: &str, tags: &[&str]) -> BlogPost {
    BlogPost {
        id: id.to_string(),
        title: format!("Post {}", id),
        excerpt: format!("Excerpt for {}", id),
        content: None,
        author: "Manu Kakkar".to_string(),
        date: parse_date(&format!("2024-01-{:02}", day)),
        read_time: Some(read_time),
        category: Some(category.to_string()),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        featured: day % 2 == 0,
        published: true,
    }
}

fn eight_posts() -> Vec<BlogPost> {
    (1..=8)
        .map(|day| {
            let category = if day % 3 == 0 { "Culture" } else { "Automation" };
            post(&format!("p{}", day), day, day % 4, category, &["testing"])
        })
        .collect()
}

fn ids(records: &[BlogPost]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

#[test]
fn query_output_is_an_order_preserving_subsequence_for_ties() {
    let records = eight_posts();
    let state = QueryState::default()
        .with_filter("category", "Automation")
        .with_sort(Some(SortKey::Popular));
    let result = CollectionFilter::query(&records, &state);

    // 阅读时长相同的记录必须保持输入顺序
    for pair in result.windows(2) {
        if pair[0].read_time == pair[1].read_time {
            let a = records.iter().position(|r| r.id == pair[0].id).unwrap();
            let b = records.iter().position(|r| r.id == pair[1].id).unwrap();
            assert!(a < b, "{} should precede {}", pair[0].id, pair[1].id);
        }
    }
    assert!(result.iter().all(|r| records.contains(r)));
}

#[test]
fn filtering_is_idempotent() {
    let records = eight_posts();
    let state = QueryState::default()
        .with_search("post")
        .with_filter("category", "Automation")
        .with_sort(Some(SortKey::Latest));

    let once = CollectionFilter::query(&records, &state);
    let twice = CollectionFilter::query(&once, &state);
    assert_eq!(once, twice);
}

#[test]
fn latest_and_oldest_are_reverses_without_ties() {
    let records = eight_posts();
    let latest = CollectionFilter::query(&records, &QueryState::default().with_sort(Some(SortKey::Latest)));
    let mut oldest = CollectionFilter::query(&records, &QueryState::default().with_sort(Some(SortKey::Oldest)));
    oldest.reverse();
    assert_eq!(ids(&latest), ids(&oldest));
}

#[test]
fn pagination_of_eight_records_by_six() {
    let records = eight_posts();

    let first = CollectionFilter::paginate(&records, 1, BLOG_PAGE_SIZE);
    assert_eq!(first.items, records[0..6].to_vec());
    assert_eq!(first.total_pages, 2);

    let second = CollectionFilter::paginate(&records, 2, BLOG_PAGE_SIZE);
    assert_eq!(second.items, records[6..8].to_vec());

    let third = CollectionFilter::paginate(&records, 3, BLOG_PAGE_SIZE);
    assert!(third.items.is_empty());
    assert_eq!(third.page, 3);
    assert_eq!(third.total, 8);
}

#[test]
fn run_pages_beyond_the_data_are_empty_not_clamped() {
    let records = eight_posts();
    let state = QueryState::for_kind(CollectionKind::Blog).with_page(5);
    let result = CollectionFilter::run(&records, &state);
    assert!(result.page.items.is_empty());
    assert_eq!(result.page.page, 5);
    assert_eq!(result.page.total_pages, 2);
}

#[test]
fn search_matches_tags_regardless_of_case() {
    let mut records = eight_posts();
    records.push(post("shouty", 20, 1, "Testing", &["MOBILE"]));

    let state = QueryState::default().with_search("mobile");
    assert_eq!(ids(&CollectionFilter::query(&records, &state)), vec!["shouty"]);
}

#[test]
fn empty_collection_yields_empty_result() {
    let state = QueryState::for_kind(CollectionKind::Blog).with_search("anything");
    let result = CollectionFilter::run::<BlogPost>(&[], &state);
    assert_eq!(result.page.total, 0);
    assert!(result.page.items.is_empty());
}

struct AlwaysFails;

impl DataSource for AlwaysFails {
    fn fetch(&self, path: &str) -> Result<String, LoadError> {
        Err(LoadError::NotFound(path.to_string()))
    }
}

#[test]
fn failed_load_behaves_like_the_built_in_collection() {
    let loaded = Collection::load(CollectionKind::Blog, &AlwaysFails);
    assert_eq!(loaded.origin, DataOrigin::BuiltIn);

    let state = QueryState::for_kind(CollectionKind::Blog).with_search("mobile");
    let from_fallback = loaded.data.run_json(&state).unwrap();

    let explicit = CollectionFilter::run(&BlogPost::built_in(), &state);
    assert_eq!(from_fallback, serde_json::to_value(explicit).unwrap());
}

#[test]
fn loaded_certificates_filter_by_issuer_substring() {
    let source = MemorySource::new().with_file(
        "certificates.json",
        r#"[
            {"id":"a","title":"Cloud","issuer":"Amazon Web Services","category":"Cloud","issueDate":"2022-05-01"},
            {"id":"b","title":"Agile","issuer":"Scrum Alliance","category":"Process","issueDate":"2021-02-01"},
            {"id":"c","title":"No issuer","category":"Cloud"}
        ]"#,
    );
    let loaded = Collection::load(CollectionKind::Certificates, &source);
    assert_eq!(loaded.origin, DataOrigin::Fetched);

    let state = QueryState::for_kind(CollectionKind::Certificates).with_filter("issuer", "Amazon");
    let value = loaded.data.run_json(&state).unwrap();
    assert_eq!(value["total"], 1);
    assert_eq!(value["items"][0]["id"], "a");

    let stats = loaded.data.facets().stats();
    assert_eq!(stats.latest_year, Some(2022));
    assert_eq!(stats.distinct["issuer"], 2);
}
