pub mod defaults;
pub mod loader;
pub mod models;

// 重新导出常用类型，方便直接使用
pub use loader::{
    collection_from_text, load_collection, load_or_default, parse_collection, parse_json, DataOrigin, DataSource,
    FsSource, LoadError, Loaded, MemorySource,
};
pub use models::{BlogPost, Certificate, FacetMatch, Project, Record, Validity};
