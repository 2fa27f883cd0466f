use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;
use utils_common::loader::{collection_from_text, load_collection, DataOrigin, DataSource, Loaded};
use utils_common::models::{BlogPost, Certificate, FacetMatch, Project, Record};
use wasm_bindgen::prelude::*;
use web_sys::console;

// 导出模块
pub mod builder;
pub mod models;

pub use builder::{CollectionStats, FacetBuilder, FacetIndex, FacetValue};
pub use models::{
    CollectionKind, Page, PageLink, PaginationView, QueryResult, QueryState, SortKey, ALL, BLOG_PAGE_SIZE,
    FEATURED_LIMIT,
};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// 集合查询引擎 - 筛选、排序、分页
///
/// 所有操作都是输入的纯函数，对任何输入都有定义。
pub struct CollectionFilter;

impl CollectionFilter {
    /// 筛选并排序，返回完整结果列表
    pub fn query<R: Record + Clone>(records: &[R], state: &QueryState) -> Vec<R> {
        let needle = state.search.to_lowercase();

        let mut filtered: Vec<R> = records
            .iter()
            .filter(|record| Self::matches(*record, &needle, state))
            .cloned()
            .collect();

        Self::apply_sorting(&mut filtered, state.sort);
        filtered
    }

    /// 查询并按状态中的页码分页，附带分页导航
    pub fn run<R: Record + Clone>(records: &[R], state: &QueryState) -> QueryResult<R> {
        let filtered = Self::query(records, state);

        let page = match state.page_size {
            Some(size) => Self::paginate(&filtered, state.page, size),
            None => {
                let total = filtered.len();
                Page {
                    items: filtered,
                    total,
                    page: 1,
                    page_size: total,
                    total_pages: usize::from(total > 0),
                }
            }
        };

        let pagination = Self::page_window(page.page, page.total_pages);
        debug!("查询完成，结果 {} 条，第 {}/{} 页", page.total, page.page, page.total_pages);
        QueryResult { page, pagination }
    }

    /// 取第 `page` 页（从1开始），超出范围返回空页
    pub fn paginate<R: Clone>(items: &[R], page: usize, page_size: usize) -> Page<R> {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total = items.len();
        let total_pages = total.div_ceil(page_size);

        let start = (page - 1).saturating_mul(page_size);
        let end = start.saturating_add(page_size).min(total);

        let items = if start < total {
            items[start..end].to_vec()
        } else {
            Vec::new()
        };

        Page {
            items,
            total,
            page,
            page_size,
            total_pages,
        }
    }

    /// 分页导航：首页、末页、当前页前后两页，再往外一页显示省略号
    pub fn page_window(current: usize, total_pages: usize) -> PaginationView {
        if total_pages <= 1 {
            return PaginationView::default();
        }

        let mut links = Vec::new();
        for number in 1..=total_pages {
            let distance = number.abs_diff(current);
            if number == 1 || number == total_pages || distance <= 2 {
                links.push(PageLink::Page {
                    number,
                    current: number == current,
                });
            } else if distance == 3 {
                links.push(PageLink::Ellipsis);
            }
        }

        PaginationView {
            previous: (current > 1).then(|| current - 1),
            links,
            next: (current < total_pages).then(|| current + 1),
        }
    }

    /// 精选记录：可见且标记为精选，保持原始顺序
    pub fn featured<R: Record + Clone>(records: &[R], limit: usize) -> Vec<R> {
        records
            .iter()
            .filter(|record| record.is_featured() && record.is_visible())
            .take(limit)
            .cloned()
            .collect()
    }

    /// 按ID查找（详情弹窗使用，不考虑当前筛选条件）
    pub fn find_by_id<'a, R: Record>(records: &'a [R], id: &str) -> Option<&'a R> {
        records.iter().find(|record| record.id() == id)
    }

    // 判断单条记录是否满足全部条件，needle 已转为小写
    fn matches<R: Record>(record: &R, needle: &str, state: &QueryState) -> bool {
        if !record.is_visible() {
            return false;
        }

        let matches_search = needle.is_empty()
            || record
                .search_fields()
                .iter()
                .any(|field| field.to_lowercase().contains(needle));
        if !matches_search {
            return false;
        }

        state.active_filters().all(|(field, selected)| match record.facet(field) {
            Some(value) => match R::facet_match(field) {
                FacetMatch::Exact => value == selected,
                FacetMatch::Contains => value.contains(selected),
            },
            None => false,
        })
    }

    // 稳定排序，相等时保持原始顺序
    fn apply_sorting<R: Record>(records: &mut [R], sort: Option<SortKey>) {
        match sort {
            Some(SortKey::Latest) => records.sort_by(|a, b| b.date().cmp(&a.date())),
            Some(SortKey::Oldest) => records.sort_by(|a, b| a.date().cmp(&b.date())),
            Some(SortKey::Popular) => records.sort_by(|a, b| b.popularity().cmp(&a.popularity())),
            None => {}
        }
    }
}

/// 已加载的集合
#[derive(Debug, Clone)]
pub enum Collection {
    Blog(Vec<BlogPost>),
    Certificates(Vec<Certificate>),
    Projects(Vec<Project>),
}

// 对集合中的记录切片执行同一段泛型代码
macro_rules! with_records {
    ($collection:expr, $records:ident => $body:expr) => {
        match $collection {
            Collection::Blog($records) => $body,
            Collection::Certificates($records) => $body,
            Collection::Projects($records) => $body,
        }
    };
}

impl Collection {
    /// 从数据源加载，失败时使用内置默认集合
    pub fn load(kind: CollectionKind, source: &dyn DataSource) -> Loaded<Collection> {
        match kind {
            CollectionKind::Blog => wrap(load_collection(source), Collection::Blog),
            CollectionKind::Certificates => wrap(load_collection(source), Collection::Certificates),
            CollectionKind::Projects => wrap(load_collection(source), Collection::Projects),
        }
    }

    /// 从浏览器取得的文本加载，None 表示 fetch 失败
    pub fn from_text(kind: CollectionKind, text: Option<&str>) -> Loaded<Collection> {
        match kind {
            CollectionKind::Blog => wrap(collection_from_text(text), Collection::Blog),
            CollectionKind::Certificates => wrap(collection_from_text(text), Collection::Certificates),
            CollectionKind::Projects => wrap(collection_from_text(text), Collection::Projects),
        }
    }

    pub fn kind(&self) -> CollectionKind {
        match self {
            Collection::Blog(_) => CollectionKind::Blog,
            Collection::Certificates(_) => CollectionKind::Certificates,
            Collection::Projects(_) => CollectionKind::Projects,
        }
    }

    pub fn len(&self) -> usize {
        with_records!(self, records => records.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 执行查询并序列化结果
    pub fn run_json(&self, state: &QueryState) -> serde_json::Result<serde_json::Value> {
        with_records!(self, records => serde_json::to_value(CollectionFilter::run(records, state)))
    }

    pub fn featured_json(&self, limit: usize) -> serde_json::Result<serde_json::Value> {
        with_records!(self, records => serde_json::to_value(CollectionFilter::featured(records, limit)))
    }

    pub fn find_json(&self, id: &str) -> serde_json::Result<serde_json::Value> {
        with_records!(self, records => serde_json::to_value(CollectionFilter::find_by_id(records, id)))
    }

    pub fn facets(&self) -> FacetIndex {
        with_records!(self, records => FacetBuilder::from_records(records).build())
    }
}

fn wrap<R>(loaded: Loaded<Vec<R>>, variant: fn(Vec<R>) -> Collection) -> Loaded<Collection> {
    Loaded {
        data: variant(loaded.data),
        origin: loaded.origin,
    }
}

/// 序列化为普通JS对象（而非 Map）
fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| JsValue::from_str(&format!("序列化结果失败: {}", e)))
}

/// 集合过滤器JS接口 - 每个页面持有一个实例
#[wasm_bindgen]
pub struct CollectionFilterJS {
    collection: Collection,
    origin: DataOrigin,
}

#[wasm_bindgen]
impl CollectionFilterJS {
    /// 创建过滤器。`data_json` 为页面 fetch 到的数据文件文本，fetch 失败时传 undefined
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str, data_json: Option<String>) -> Result<CollectionFilterJS, JsValue> {
        console_error_panic_hook::set_once();

        let kind: CollectionKind = kind.parse().map_err(|e: models::ParseKindError| {
            console::log_1(&JsValue::from_str(&format!("初始化过滤器失败: {}", e)));
            JsValue::from_str(&e.to_string())
        })?;

        let loaded = Collection::from_text(kind, data_json.as_deref());
        Ok(CollectionFilterJS {
            collection: loaded.data,
            origin: loaded.origin,
        })
    }

    /// 是否使用了内置默认数据
    #[wasm_bindgen(getter)]
    pub fn built_in(&self) -> bool {
        self.origin == DataOrigin::BuiltIn
    }

    /// 筛选记录，参数为页面的筛选状态JSON
    #[wasm_bindgen]
    pub fn query(&self, params_json: &str) -> Result<JsValue, JsValue> {
        let mut state: QueryState = serde_json::from_str(params_json)
            .map_err(|e| JsValue::from_str(&format!("解析参数失败: {}", e)))?;

        if self.collection.kind() == CollectionKind::Blog && state.page_size.is_none() {
            state.page_size = Some(BLOG_PAGE_SIZE);
        }

        let result = with_records!(&self.collection, records => to_js(&CollectionFilter::run(records, &state)));
        result.map_err(|e| {
            console::log_1(&e);
            e
        })
    }

    /// 精选记录
    #[wasm_bindgen]
    pub fn featured(&self, limit: Option<usize>) -> Result<JsValue, JsValue> {
        let limit = limit.unwrap_or(FEATURED_LIMIT);
        with_records!(&self.collection, records => to_js(&CollectionFilter::featured(records, limit)))
    }

    /// 按ID查找记录，找不到时返回 null
    #[wasm_bindgen]
    pub fn find(&self, id: &str) -> Result<JsValue, JsValue> {
        with_records!(&self.collection, records => to_js(&CollectionFilter::find_by_id(records, id)))
    }

    /// 各分类字段的可选值
    #[wasm_bindgen]
    pub fn facets(&self) -> Result<JsValue, JsValue> {
        to_js(&self.collection.facets())
    }

    /// 统计信息
    #[wasm_bindgen]
    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.collection.facets().stats())
    }

    /// 证书有效状态（按浏览器当前日期），非证书集合或找不到时返回 null
    #[wasm_bindgen]
    pub fn validity(&self, id: &str) -> Result<JsValue, JsValue> {
        let Collection::Certificates(records) = &self.collection else {
            return Ok(JsValue::NULL);
        };
        let Some(today) = browser_today() else {
            console::log_1(&JsValue::from_str("无法读取浏览器日期，不判断证书有效状态"));
            return Ok(JsValue::NULL);
        };
        to_js(&CollectionFilter::find_by_id(records, id).map(|cert| cert.validity(today)))
    }
}

// 无效的浏览器日期（Invalid Date）返回 None
fn browser_today() -> Option<NaiveDate> {
    let now = js_sys::Date::new_0();
    calendar_date(now.get_full_year(), now.get_month(), now.get_date())
}

// JS 月份从0开始
fn calendar_date(year: u32, month0: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, month0.checked_add(1)?, day)
}

/// 单独计算分页导航（页面自行渲染按钮）
#[wasm_bindgen]
pub fn pagination_window(current: usize, total_pages: usize) -> Result<JsValue, JsValue> {
    to_js(&CollectionFilter::page_window(current, total_pages))
}

/// 按筛选字段分组的可选值，供下拉菜单使用
pub fn facet_options(index: &FacetIndex) -> BTreeMap<String, Vec<String>> {
    index
        .fields
        .iter()
        .map(|(field, values)| (field.clone(), values.iter().map(|v| v.value.clone()).collect()))
        .collect()
}
