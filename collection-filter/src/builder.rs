use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;
use utils_common::models::Record;

/// 分类取值及出现次数
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FacetValue {
    pub value: String,
    pub count: usize,
}

/// 年份及该年的记录数
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct YearCount {
    pub year: i32,
    pub count: usize,
}

/// 分类索引 - 页面下拉菜单与统计区块的数据来源
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct FacetIndex {
    /// 参与统计的记录数
    pub total: usize,
    /// 精选记录数
    pub featured: usize,
    /// 分类字段 -> 取值列表（按首次出现顺序）
    pub fields: BTreeMap<String, Vec<FacetValue>>,
    /// 标签 -> 出现次数（按首次出现顺序）
    pub tags: Vec<FacetValue>,
    /// 按年份降序
    pub years: Vec<YearCount>,
}

/// 集合统计
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CollectionStats {
    pub total: usize,
    pub featured: usize,
    /// 分类字段 -> 不同取值的数量（如证书页的 "技能领域"、"颁发机构"）
    pub distinct: BTreeMap<String, usize>,
    pub distinct_tags: usize,
    /// 最近一条记录的年份
    pub latest_year: Option<i32>,
}

impl FacetIndex {
    pub fn stats(&self) -> CollectionStats {
        CollectionStats {
            total: self.total,
            featured: self.featured,
            distinct: self
                .fields
                .iter()
                .map(|(field, values)| (field.clone(), values.len()))
                .collect(),
            distinct_tags: self.tags.len(),
            latest_year: self.years.first().map(|y| y.year),
        }
    }
}

// 保持首次出现顺序的计数器
#[derive(Default)]
struct OrderedCounter {
    values: Vec<FacetValue>,
    positions: HashMap<String, usize>,
}

impl OrderedCounter {
    fn add(&mut self, value: &str) {
        match self.positions.get(value) {
            Some(&i) => self.values[i].count += 1,
            None => {
                self.positions.insert(value.to_string(), self.values.len());
                self.values.push(FacetValue {
                    value: value.to_string(),
                    count: 1,
                });
            }
        }
    }
}

/// 分类索引构建器，只统计可见记录
pub struct FacetBuilder<'a, R> {
    records: Vec<&'a R>,
}

impl<'a, R: Record> FacetBuilder<'a, R> {
    /// 创建新的分类索引构建器
    pub fn new() -> Self {
        Self { records: Vec::new() }
    }

    pub fn from_records(records: &'a [R]) -> Self {
        let mut builder = Self::new();
        for record in records {
            builder.add_record(record);
        }
        builder
    }

    /// 添加记录，不可见的记录直接忽略
    pub fn add_record(&mut self, record: &'a R) {
        if record.is_visible() {
            self.records.push(record);
        }
    }

    /// 构建分类索引
    pub fn build(&self) -> FacetIndex {
        let mut fields: BTreeMap<&str, OrderedCounter> =
            R::FACET_FIELDS.iter().map(|field| (*field, OrderedCounter::default())).collect();
        let mut tags = OrderedCounter::default();
        let mut years: BTreeMap<i32, usize> = BTreeMap::new();
        let mut featured = 0;

        for record in &self.records {
            for (field, counter) in fields.iter_mut() {
                if let Some(value) = record.facet(field) {
                    counter.add(value);
                }
            }

            for tag in record.tags() {
                tags.add(tag);
            }

            if let Some(date) = record.date() {
                *years.entry(date.year()).or_insert(0) += 1;
            }

            if record.is_featured() {
                featured += 1;
            }
        }

        debug!(
            "分类索引构建完成，记录数量: {}, 标签数量: {}, 年份数量: {}",
            self.records.len(),
            tags.values.len(),
            years.len()
        );

        FacetIndex {
            total: self.records.len(),
            featured,
            fields: fields
                .into_iter()
                .map(|(field, counter)| (field.to_string(), counter.values))
                .collect(),
            tags: tags.values,
            years: years
                .into_iter()
                .rev()
                .map(|(year, count)| YearCount { year, count })
                .collect(),
        }
    }
}

impl<'a, R: Record> Default for FacetBuilder<'a, R> {
    fn default() -> Self {
        Self::new()
    }
}
