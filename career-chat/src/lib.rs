use rand::seq::SliceRandom;
use rand::Rng;
use utils_common::loader::{load_or_default, DataOrigin, DataSource, Loaded, MemorySource};
use wasm_bindgen::prelude::*;
use web_sys::console;

pub mod defaults;
pub mod models;

pub use models::{Topic, TopicEntry, TopicTable};

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 话题表文件名（相对于数据目录）
pub const TABLE_FILE: &str = "chat-responses.json";

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 关键词应答器 - 按固定优先级匹配话题并随机选择一条回复
#[derive(Debug, Clone)]
pub struct KeywordResponder {
    table: TopicTable,
}

impl KeywordResponder {
    pub fn new(table: TopicTable) -> Self {
        Self { table }
    }

    /// 使用内置话题表
    pub fn built_in() -> Self {
        Self::new(defaults::BUILT_IN.clone())
    }

    /// 从数据源加载话题表，失败时使用内置话题表
    pub fn load(source: &dyn DataSource) -> Loaded<KeywordResponder> {
        let loaded = load_or_default(source, TABLE_FILE, TopicTable::parse, || defaults::BUILT_IN.clone());
        Loaded {
            data: Self::new(loaded.data),
            origin: loaded.origin,
        }
    }

    /// 从浏览器取得的文本加载，None 表示 fetch 失败
    pub fn from_text(text: Option<&str>) -> Loaded<KeywordResponder> {
        let mut source = MemorySource::new();
        if let Some(text) = text {
            source = source.with_file(TABLE_FILE, text);
        }
        Self::load(&source)
    }

    /// 聊天窗口中的快捷问题
    pub fn suggestions() -> &'static [&'static str] {
        &defaults::SUGGESTIONS
    }

    pub fn table(&self) -> &TopicTable {
        &self.table
    }

    /// 选择话题：第一个有关键词出现在消息中的话题，都不匹配时为 default
    pub fn select_topic(&self, message: &str) -> Topic {
        let message = message.to_lowercase();

        Topic::PRIORITY
            .into_iter()
            .filter(|topic| *topic != Topic::Default)
            .find(|topic| self.keywords(*topic).any(|keyword| message.contains(keyword)))
            .unwrap_or(Topic::Default)
    }

    /// 话题的候选回复；话题表缺少该话题或列表为空时使用内置回复
    pub fn candidates(&self, topic: Topic) -> Vec<&str> {
        match self.table.get(topic) {
            Some(entry) if !entry.responses.is_empty() => entry.responses.iter().map(String::as_str).collect(),
            _ => defaults::responses(topic).to_vec(),
        }
    }

    /// 使用给定随机源生成回复
    pub fn respond_with<R: Rng + ?Sized>(&self, message: &str, rng: &mut R) -> String {
        let topic = self.select_topic(message);
        self.candidates(topic)
            .choose(rng)
            .map(|reply| reply.to_string())
            .unwrap_or_default()
    }

    /// 生成回复
    pub fn respond(&self, message: &str) -> String {
        self.respond_with(message, &mut rand::thread_rng())
    }

    // 话题表提供的关键词优先，否则使用内置关键词
    fn keywords(&self, topic: Topic) -> Box<dyn Iterator<Item = &str> + '_> {
        match self.table.get(topic) {
            Some(entry) if !entry.keywords.is_empty() => Box::new(entry.keywords.iter().map(String::as_str)),
            _ => Box::new(defaults::keywords(topic).iter().copied()),
        }
    }
}

impl Default for KeywordResponder {
    fn default() -> Self {
        Self::built_in()
    }
}

/// 职业聊天JS接口
#[wasm_bindgen]
pub struct CareerChatJS {
    responder: KeywordResponder,
    origin: DataOrigin,
}

#[wasm_bindgen]
impl CareerChatJS {
    /// `table_json` 为页面 fetch 到的话题表文本，fetch 失败时传 undefined
    #[wasm_bindgen(constructor)]
    pub fn new(table_json: Option<String>) -> CareerChatJS {
        console_error_panic_hook::set_once();

        let loaded = KeywordResponder::from_text(table_json.as_deref());
        if loaded.origin == DataOrigin::BuiltIn {
            console::log_1(&JsValue::from_str("话题表加载失败，使用内置话题表"));
        }

        CareerChatJS {
            responder: loaded.data,
            origin: loaded.origin,
        }
    }

    /// 是否使用了内置话题表
    #[wasm_bindgen(getter)]
    pub fn built_in(&self) -> bool {
        self.origin == DataOrigin::BuiltIn
    }

    /// 回复一条消息
    #[wasm_bindgen]
    pub fn respond(&self, message: &str) -> String {
        self.responder.respond(message)
    }

    /// 消息匹配到的话题键
    #[wasm_bindgen]
    pub fn topic(&self, message: &str) -> String {
        self.responder.select_topic(message).key().to_string()
    }
}

/// 快捷问题列表
#[wasm_bindgen]
pub fn chat_suggestions() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(KeywordResponder::suggestions())
        .map_err(|e| JsValue::from_str(&format!("序列化快捷问题失败: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn greeting_has_highest_priority() {
        let responder = KeywordResponder::built_in();
        // 同时包含 greeting 与 career 的关键词
        assert_eq!(responder.select_topic("Hello, tell me about QA careers"), Topic::Greeting);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let responder = KeywordResponder::built_in();
        assert_eq!(responder.select_topic("SELENIUM or cypress?"), Topic::Tools);
        assert_eq!(responder.select_topic("Is FIRE TV hard to test"), Topic::Mobile);
        assert_eq!(responder.select_topic("zzz"), Topic::Default);
        assert_eq!(responder.select_topic(""), Topic::Default);
    }

    #[test]
    fn order_follows_priority_not_table_order() {
        // 同时命中 performance 与 automation，automation 优先级更高
        let responder = KeywordResponder::built_in();
        assert_eq!(responder.select_topic("performance automation"), Topic::Automation);
    }

    #[test]
    fn reply_is_one_of_the_candidates() {
        let responder = KeywordResponder::built_in();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let reply = responder.respond_with("any api endpoint tips?", &mut rng);
            assert!(defaults::responses(Topic::Api).contains(&reply.as_str()));
        }
    }

    #[test]
    fn missing_topic_in_loaded_table_uses_built_in_replies() {
        let table = TopicTable::new().with_entry(Topic::Default, &[], &["Only default"]);
        let responder = KeywordResponder::new(table);

        assert_eq!(responder.select_topic("my phone number"), Topic::Contact);
        let reply = responder.respond("my phone number");
        assert!(defaults::responses(Topic::Contact).contains(&reply.as_str()));
        assert_eq!(responder.respond("qwerty"), "Only default");
    }

    #[test]
    fn table_keywords_override_built_in_triggers() {
        let table = TopicTable::new().with_entry(Topic::Learning, &["Rustlings"], &["Try rustlings!"]);
        let responder = KeywordResponder::new(table);

        assert_eq!(responder.select_topic("what about rustlings"), Topic::Learning);
        // 内置关键词 "course" 不再触发 learning
        assert_eq!(responder.select_topic("a course"), Topic::Default);
    }
}
