use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 不限制分类字段的取值
pub const ALL: &str = "all";

/// 博客列表每页条数
pub const BLOG_PAGE_SIZE: usize = 6;

/// 精选区块展示的条数
pub const FEATURED_LIMIT: usize = 3;

/// 排序方式
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// 按日期降序
    Latest,
    /// 按日期升序
    Oldest,
    /// 按阅读时长降序（作为热度的替代指标）
    Popular,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("未知的排序方式: {0}")]
pub struct ParseSortKeyError(pub String);

impl FromStr for SortKey {
    type Err = ParseSortKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortKey::Latest),
            "oldest" => Ok(SortKey::Oldest),
            "popular" => Ok(SortKey::Popular),
            other => Err(ParseSortKeyError(other.to_string())),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Latest => "latest",
            SortKey::Oldest => "oldest",
            SortKey::Popular => "popular",
        };
        f.write_str(name)
    }
}

/// 集合类型
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    Blog,
    Certificates,
    Projects,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("未知的集合类型: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for CollectionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(CollectionKind::Blog),
            "certificates" => Ok(CollectionKind::Certificates),
            "projects" => Ok(CollectionKind::Projects),
            other => Err(ParseKindError(other.to_string())),
        }
    }
}

/// 查询状态 - 由页面控制器持有，每次筛选变化时传入引擎
///
/// 反序列化格式与页面保存的筛选对象一致：
/// `{"search": "", "category": "all", "sort": "latest", "page": 1}`，
/// 其余字符串字段均视为分类筛选条件。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct QueryState {
    /// 搜索文本（不区分大小写的子串匹配）
    pub search: String,
    /// 排序方式，None 时保持原始顺序
    pub sort: Option<SortKey>,
    /// 当前页码（从1开始）
    pub page: usize,
    /// 每页条数，None 时不分页
    #[serde(rename = "pageSize")]
    pub page_size: Option<usize>,
    /// 分类字段 -> 选中值或 "all"
    #[serde(flatten)]
    pub filters: BTreeMap<String, String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
            page_size: None,
            filters: BTreeMap::new(),
        }
    }
}

impl QueryState {
    /// 各集合页面加载时的初始状态
    pub fn for_kind(kind: CollectionKind) -> Self {
        match kind {
            CollectionKind::Blog => Self::default()
                .with_filter("category", ALL)
                .with_sort(Some(SortKey::Latest))
                .with_page_size(Some(BLOG_PAGE_SIZE)),
            CollectionKind::Certificates => Self::default()
                .with_filter("category", ALL)
                .with_filter("issuer", ALL),
            CollectionKind::Projects => Self::default()
                .with_filter("category", ALL)
                .with_filter("status", ALL),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(field.into(), value.into());
        self
    }

    pub fn with_sort(mut self, sort: Option<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: Option<usize>) -> Self {
        self.page_size = page_size;
        self
    }

    /// 值不为 "all" 的筛选条件
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .filter(|(_, value)| value.as_str() != ALL)
            .map(|(field, value)| (field.as_str(), value.as_str()))
    }
}

/// 分页结果
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Page<R> {
    /// 当前页的记录
    pub items: Vec<R>,
    /// 筛选结果总数
    pub total: usize,
    /// 当前页码
    pub page: usize,
    /// 每页条数
    pub page_size: usize,
    /// 总页数
    pub total_pages: usize,
}

/// 分页导航中的一项
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageLink {
    Page { number: usize, current: bool },
    Ellipsis,
}

/// 分页导航
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationView {
    /// "上一页" 指向的页码
    pub previous: Option<usize>,
    pub links: Vec<PageLink>,
    /// "下一页" 指向的页码
    pub next: Option<usize>,
}

/// 查询结果 - 返回给页面的完整结果
#[derive(Serialize, Debug, Clone)]
pub struct QueryResult<R> {
    #[serde(flatten)]
    pub page: Page<R>,
    pub pagination: PaginationView,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_state_reads_page_controller_filters() {
        let state: QueryState = serde_json::from_str(
            r#"{"search":"mobile","category":"all","issuer":"Edureka","sort":"oldest","page":2}"#,
        )
        .unwrap();
        assert_eq!(state.search, "mobile");
        assert_eq!(state.sort, Some(SortKey::Oldest));
        assert_eq!(state.page, 2);
        assert_eq!(state.page_size, None);
        assert_eq!(state.filters.len(), 2);
        assert_eq!(state.active_filters().collect::<Vec<_>>(), vec![("issuer", "Edureka")]);
    }

    #[test]
    fn empty_object_is_default_state() {
        let state: QueryState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, QueryState::default());
    }

    #[test]
    fn unknown_sort_key_is_rejected() {
        assert_eq!("trending".parse::<SortKey>(), Err(ParseSortKeyError("trending".to_string())));
        assert!(serde_json::from_str::<QueryState>(r#"{"sort":"trending"}"#).is_err());
        assert_eq!("popular".parse::<SortKey>(), Ok(SortKey::Popular));
    }

    #[test]
    fn blog_page_starts_latest_first_with_six_per_page() {
        let state = QueryState::for_kind(CollectionKind::Blog);
        assert_eq!(state.sort, Some(SortKey::Latest));
        assert_eq!(state.page_size, Some(BLOG_PAGE_SIZE));
        assert_eq!(state.active_filters().count(), 0);
    }
}
