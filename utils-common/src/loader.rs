use serde::de::DeserializeOwned;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::Record;

/// 数据加载错误 - 任何一种都会触发内置默认数据
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("数据文件不存在: {0}")]
    NotFound(String),
    #[error("读取 {path} 失败: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("解析 {path} 失败: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{path} 中存在重复的记录ID: {id}")]
    DuplicateId { path: String, id: String },
}

/// 只读数据源 - 返回数据文件的原始文本
pub trait DataSource {
    fn fetch(&self, path: &str) -> Result<String, LoadError>;
}

/// 文件系统数据源，路径相对于根目录
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl DataSource for FsSource {
    fn fetch(&self, path: &str) -> Result<String, LoadError> {
        let full_path = self.root.join(path);
        fs::read_to_string(&full_path).map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                LoadError::NotFound(full_path.display().to_string())
            } else {
                LoadError::Io {
                    path: full_path.display().to_string(),
                    source: e,
                }
            }
        })
    }
}

/// 内存数据源 - 浏览器已取得的文本，或测试数据
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, text: impl Into<String>) -> Self {
        self.files.insert(path.into(), text.into());
        self
    }
}

impl DataSource for MemorySource {
    fn fetch(&self, path: &str) -> Result<String, LoadError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| LoadError::NotFound(path.to_string()))
    }
}

/// 数据来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataOrigin {
    /// 从数据源成功加载
    Fetched,
    /// 加载失败，使用了内置默认数据
    BuiltIn,
}

/// 加载结果
#[derive(Debug, Clone)]
pub struct Loaded<T> {
    pub data: T,
    pub origin: DataOrigin,
}

/// 获取并解析数据文件，失败时记录警告并使用默认值
pub fn load_or_default<T, P, F>(source: &dyn DataSource, path: &str, parse: P, fallback: F) -> Loaded<T>
where
    P: FnOnce(&str, &str) -> Result<T, LoadError>,
    F: FnOnce() -> T,
{
    match source.fetch(path).and_then(|text| parse(path, &text)) {
        Ok(data) => Loaded {
            data,
            origin: DataOrigin::Fetched,
        },
        Err(e) => {
            warn!("加载 {} 失败，使用内置默认数据: {}", path, e);
            Loaded {
                data: fallback(),
                origin: DataOrigin::BuiltIn,
            }
        }
    }
}

/// 解析JSON文本
pub fn parse_json<T: DeserializeOwned>(path: &str, text: &str) -> Result<T, LoadError> {
    serde_json::from_str(text).map_err(|e| LoadError::Parse {
        path: path.to_string(),
        source: e,
    })
}

/// 解析记录集合并检查ID唯一性
pub fn parse_collection<R>(path: &str, text: &str) -> Result<Vec<R>, LoadError>
where
    R: Record + DeserializeOwned,
{
    let records: Vec<R> = parse_json(path, text)?;

    let mut seen = HashSet::with_capacity(records.len());
    for record in &records {
        if !seen.insert(record.id()) {
            return Err(LoadError::DuplicateId {
                path: path.to_string(),
                id: record.id().to_string(),
            });
        }
    }

    debug!("已加载 {}，记录数量: {}", path, records.len());
    Ok(records)
}

/// 加载记录集合，失败时使用该类型的内置默认集合
pub fn load_collection<R>(source: &dyn DataSource) -> Loaded<Vec<R>>
where
    R: Record + DeserializeOwned,
{
    load_or_default(source, R::DATA_FILE, parse_collection::<R>, R::built_in)
}

/// 从可能缺失的文本加载集合（浏览器侧 fetch 失败时为 None）
pub fn collection_from_text<R>(text: Option<&str>) -> Loaded<Vec<R>>
where
    R: Record + DeserializeOwned,
{
    let mut source = MemorySource::new();
    if let Some(text) = text {
        source = source.with_file(R::DATA_FILE, text);
    }
    load_collection(&source)
}
