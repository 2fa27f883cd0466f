use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::defaults;

/// 分类字段的匹配方式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FacetMatch {
    /// 完全相等
    Exact,
    /// 记录值包含筛选值（子串）
    Contains,
}

/// 集合记录 - 博客文章、证书、项目的统一视图
pub trait Record {
    /// 数据文件名（相对于数据目录）
    const DATA_FILE: &'static str;
    /// 可筛选的分类字段
    const FACET_FIELDS: &'static [&'static str];

    /// 记录唯一标识符
    fn id(&self) -> &str;

    /// 标签 / 技能 / 技术栈
    fn tags(&self) -> &[String];

    /// 参与全文搜索的文本
    fn search_fields(&self) -> Vec<&str>;

    /// 分类字段的值，字段缺失时返回 None
    fn facet(&self, field: &str) -> Option<&str>;

    /// 分类字段的匹配方式
    fn facet_match(_field: &str) -> FacetMatch {
        FacetMatch::Exact
    }

    /// 排序用日期
    fn date(&self) -> Option<NaiveDate> {
        None
    }

    /// "popular" 排序使用的数值（博客为阅读时长）
    fn popularity(&self) -> Option<u32> {
        None
    }

    /// 是否对访客可见
    fn is_visible(&self) -> bool {
        true
    }

    fn is_featured(&self) -> bool;

    /// 内置默认集合，数据文件加载失败时使用
    fn built_in() -> Vec<Self>
    where
        Self: Sized;
}

/// 博客文章
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    /// 文章唯一标识符
    pub id: String,
    /// 文章标题
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// 文章摘要
    #[serde(default, deserialize_with = "lenient_string")]
    pub excerpt: String,
    /// 正文（可选，缺省时展示摘要）
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub author: String,
    /// 发布日期
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// 阅读时长（分钟）
    #[serde(default, deserialize_with = "lenient_u32", skip_serializing_if = "Option::is_none")]
    pub read_time: Option<u32>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: bool,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub published: bool,
}

impl Record for BlogPost {
    const DATA_FILE: &'static str = "blog-posts.json";
    const FACET_FIELDS: &'static [&'static str] = &["category"];

    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.excerpt.as_str()];
        fields.extend(self.tags.iter().map(String::as_str));
        fields
    }

    fn facet(&self, field: &str) -> Option<&str> {
        match field {
            "category" => self.category.as_deref(),
            _ => None,
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn popularity(&self) -> Option<u32> {
        self.read_time
    }

    fn is_visible(&self) -> bool {
        self.published
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn built_in() -> Vec<Self> {
        defaults::blog_posts()
    }
}

/// 证书有效状态
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    Valid,
    Expired,
    /// 没有过期日期
    NoExpiry,
}

/// 证书
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    /// 颁发机构
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub issuer: Option<String>,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub credential_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub verification_url: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_strings")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: bool,
}

impl Certificate {
    /// 以给定日期判断证书是否仍然有效
    pub fn validity(&self, today: NaiveDate) -> Validity {
        match self.expiry_date {
            None => Validity::NoExpiry,
            Some(expiry) if expiry < today => Validity::Expired,
            Some(_) => Validity::Valid,
        }
    }
}

impl Record for Certificate {
    const DATA_FILE: &'static str = "certificates.json";
    const FACET_FIELDS: &'static [&'static str] = &["category", "issuer"];

    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &self.skills
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        if let Some(issuer) = &self.issuer {
            fields.push(issuer.as_str());
        }
        fields.extend(self.skills.iter().map(String::as_str));
        fields
    }

    fn facet(&self, field: &str) -> Option<&str> {
        match field {
            "category" => self.category.as_deref(),
            "issuer" => self.issuer.as_deref(),
            _ => None,
        }
    }

    // 机构名称常带后缀（如 "QSpiders - Software Testing Training Institute"）
    fn facet_match(field: &str) -> FacetMatch {
        if field == "issuer" {
            FacetMatch::Contains
        } else {
            FacetMatch::Exact
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        self.issue_date
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn built_in() -> Vec<Self> {
        defaults::certificates()
    }
}

/// 项目
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    /// 使用的技术栈
    #[serde(default, deserialize_with = "lenient_strings")]
    pub technologies: Vec<String>,
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// 项目状态: Active / Completed 等
    #[serde(default, deserialize_with = "lenient_opt_string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_date", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub featured: bool,
    #[serde(default, deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub achievements: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub challenges: Vec<String>,
    #[serde(default, deserialize_with = "lenient_strings", skip_serializing_if = "Vec::is_empty")]
    pub learnings: Vec<String>,
    /// 项目指标，键为指标名
    #[serde(default, deserialize_with = "lenient_map", skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, Value>,
}

impl Record for Project {
    const DATA_FILE: &'static str = "projects.json";
    const FACET_FIELDS: &'static [&'static str] = &["category", "status"];

    fn id(&self) -> &str {
        &self.id
    }

    fn tags(&self) -> &[String] {
        &self.technologies
    }

    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.title.as_str(), self.description.as_str()];
        fields.extend(self.technologies.iter().map(String::as_str));
        fields
    }

    fn facet(&self, field: &str) -> Option<&str> {
        match field {
            "category" => self.category.as_deref(),
            "status" => self.status.as_deref(),
            _ => None,
        }
    }

    fn date(&self) -> Option<NaiveDate> {
        self.start_date
    }

    fn is_featured(&self) -> bool {
        self.featured
    }

    fn built_in() -> Vec<Self> {
        defaults::projects()
    }
}

/// 解析日期字符串，支持 `YYYY-MM-DD` 与 RFC 3339
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
}

/// 宽松日期反序列化：格式错误或类型不符时视为无日期
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Value::as_str).and_then(parse_date))
}

/// 宽松整数反序列化：接受数字或数字字符串
fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// 宽松字符串：非字符串值视为空
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_string(deserializer)?.unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        _ => None,
    })
}

/// 宽松字符串列表：不是数组时为空，丢弃非字符串元素
fn lenient_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// 只有 `true` 视为真
fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Option::<Value>::deserialize(deserializer)?, Some(Value::Bool(true))))
}

fn lenient_map<'de, D>(deserializer: D) -> Result<BTreeMap<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(map)) => map.into_iter().collect(),
        _ => BTreeMap::new(),
    })
}
