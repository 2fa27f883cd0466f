use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, warn};
use utils_common::loader::{parse_json, LoadError};

use crate::defaults;

/// 话题 - 按匹配优先级排列
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    #[serde(rename = "greetings")]
    Greeting,
    #[serde(rename = "contact")]
    Contact,
    #[serde(rename = "help")]
    Help,
    #[serde(rename = "qa_career")]
    Career,
    #[serde(rename = "amazon_culture")]
    Culture,
    #[serde(rename = "testing_tools")]
    Tools,
    #[serde(rename = "automation")]
    Automation,
    #[serde(rename = "performance_testing")]
    Performance,
    #[serde(rename = "mobile_testing")]
    Mobile,
    #[serde(rename = "api_testing")]
    Api,
    #[serde(rename = "career_advice")]
    Advice,
    #[serde(rename = "amazon_interview")]
    Interview,
    #[serde(rename = "learning_resources")]
    Learning,
    #[serde(rename = "work_life_balance")]
    Balance,
    #[serde(rename = "default")]
    Default,
}

impl Topic {
    /// 固定的匹配优先级，与话题表中的键顺序无关
    pub const PRIORITY: [Topic; 15] = [
        Topic::Greeting,
        Topic::Contact,
        Topic::Help,
        Topic::Career,
        Topic::Culture,
        Topic::Tools,
        Topic::Automation,
        Topic::Performance,
        Topic::Mobile,
        Topic::Api,
        Topic::Advice,
        Topic::Interview,
        Topic::Learning,
        Topic::Balance,
        Topic::Default,
    ];

    /// 话题表JSON中的键
    pub fn key(self) -> &'static str {
        match self {
            Topic::Greeting => "greetings",
            Topic::Contact => "contact",
            Topic::Help => "help",
            Topic::Career => "qa_career",
            Topic::Culture => "amazon_culture",
            Topic::Tools => "testing_tools",
            Topic::Automation => "automation",
            Topic::Performance => "performance_testing",
            Topic::Mobile => "mobile_testing",
            Topic::Api => "api_testing",
            Topic::Advice => "career_advice",
            Topic::Interview => "amazon_interview",
            Topic::Learning => "learning_resources",
            Topic::Balance => "work_life_balance",
            Topic::Default => "default",
        }
    }

    pub fn from_key(key: &str) -> Option<Topic> {
        Topic::PRIORITY.into_iter().find(|topic| topic.key() == key)
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 单个话题：触发关键词与候选回复
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TopicEntry {
    /// 小写关键词，作为子串匹配
    pub keywords: Vec<String>,
    pub responses: Vec<String>,
}

/// 话题表中的一项：可以只给回复列表，也可以同时给出关键词
#[derive(Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Responses(Vec<String>),
    Full {
        #[serde(default)]
        keywords: Option<Vec<String>>,
        #[serde(default)]
        responses: Vec<String>,
    },
}

/// 话题表 - 加载后不再修改
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTable {
    entries: HashMap<Topic, TopicEntry>,
}

impl TopicTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, topic: Topic, keywords: &[&str], responses: &[&str]) -> Self {
        self.insert(
            topic,
            TopicEntry {
                keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
                responses: responses.iter().map(|r| r.to_string()).collect(),
            },
        );
        self
    }

    pub fn insert(&mut self, topic: Topic, entry: TopicEntry) {
        self.entries.insert(topic, entry);
    }

    pub fn get(&self, topic: Topic) -> Option<&TopicEntry> {
        self.entries.get(&topic)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 解析话题表JSON，未提供关键词的话题使用内置关键词
    pub fn parse(path: &str, text: &str) -> Result<TopicTable, LoadError> {
        let raw: BTreeMap<String, RawEntry> = parse_json(path, text)?;
        let mut table = TopicTable::new();

        for (key, entry) in raw {
            let Some(topic) = Topic::from_key(&key) else {
                warn!("忽略未知话题: {}", key);
                continue;
            };

            let (keywords, responses) = match entry {
                RawEntry::Responses(responses) => (None, responses),
                RawEntry::Full { keywords, responses } => (keywords, responses),
            };

            // 空关键词会匹配任何消息，丢弃
            let keywords: Vec<String> = keywords
                .unwrap_or_default()
                .iter()
                .filter(|k| !k.trim().is_empty())
                .map(|k| k.to_lowercase())
                .collect();
            let keywords = if keywords.is_empty() {
                defaults::keywords(topic).iter().map(|k| k.to_string()).collect()
            } else {
                keywords
            };

            table.insert(topic, TopicEntry { keywords, responses });
        }

        debug!("话题表已加载，话题数量: {}", table.len());
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_priority_list() {
        for topic in Topic::PRIORITY {
            assert_eq!(Topic::from_key(topic.key()), Some(topic));
        }
        assert_eq!(Topic::from_key("weather"), None);
    }

    #[test]
    fn parses_site_format_with_built_in_keywords() {
        let table = TopicTable::parse(
            "chat-responses.json",
            r#"{"greetings":["Hi!"],"default":["Hmm."]}"#,
        )
        .unwrap();

        let greeting = table.get(Topic::Greeting).unwrap();
        assert_eq!(greeting.responses, vec!["Hi!"]);
        assert!(greeting.keywords.contains(&"hello".to_string()));
        assert!(table.get(Topic::Contact).is_none());
    }

    #[test]
    fn parses_explicit_keywords_and_lowercases_them() {
        let table = TopicTable::parse(
            "chat-responses.json",
            r#"{"mobile_testing":{"keywords":["Flutter","iPad"],"responses":["Mobile!"]}}"#,
        )
        .unwrap();
        assert_eq!(table.get(Topic::Mobile).unwrap().keywords, vec!["flutter", "ipad"]);
    }

    #[test]
    fn blank_keywords_are_dropped() {
        let table = TopicTable::parse(
            "chat-responses.json",
            r#"{"greetings":{"keywords":["", "  ", "Howdy"],"responses":["Hi!"]},
                "contact":{"keywords":[""],"responses":["Mail me"]}}"#,
        )
        .unwrap();

        assert_eq!(table.get(Topic::Greeting).unwrap().keywords, vec!["howdy"]);
        let contact: Vec<&str> = table.get(Topic::Contact).unwrap().keywords.iter().map(String::as_str).collect();
        assert_eq!(contact, defaults::keywords(Topic::Contact));
    }

    #[test]
    fn unknown_topics_are_ignored() {
        let table = TopicTable::parse("chat-responses.json", r#"{"weather":["Sunny"]}"#).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn non_object_is_a_load_error() {
        assert!(matches!(
            TopicTable::parse("chat-responses.json", "[1, 2]"),
            Err(LoadError::Parse { .. })
        ));
    }
}
