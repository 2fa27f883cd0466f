use std::path::Path;
use std::process;

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use career_chat_wasm::{KeywordResponder, TopicTable, TABLE_FILE};
use collection_filter::{facet_options, Collection, CollectionKind, QueryState, SortKey, FEATURED_LIMIT};
use utils_common::{parse_collection, BlogPost, Certificate, DataOrigin, FsSource, LoadError, Project, Record};

const KINDS: [&str; 3] = ["blog", "certificates", "projects"];

fn main() {
    let matches = build_cli().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = run(&matches) {
        eprintln!("错误: {:#}", e);
        process::exit(1);
    }
}

// 日志输出到 stderr，stdout 只输出结果
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// 命令行定义
fn build_cli() -> Command {
    Command::new("portfolio-cli")
        .version(env!("CARGO_PKG_VERSION"))
        .about("查询作品集数据：博客、证书、项目与职业聊天")
        .subcommand_required(true)
        .arg(
            Arg::new("data")
                .short('d')
                .long("data")
                .value_name("DATA_DIR")
                .help("数据文件目录")
                .default_value("assets/data")
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("显示详细日志")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(query_command("blog", "筛选博客文章", BlogPost::FACET_FIELDS))
        .subcommand(query_command("certificates", "筛选证书", Certificate::FACET_FIELDS))
        .subcommand(query_command("projects", "筛选项目", Project::FACET_FIELDS))
        .subcommand(
            Command::new("featured")
                .about("列出精选记录")
                .arg(kind_arg())
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize))
                        .default_value("3")
                        .help("最多显示的条数"),
                ),
        )
        .subcommand(
            Command::new("show")
                .about("按ID显示单条记录")
                .arg(kind_arg())
                .arg(Arg::new("id").value_name("ID").required(true)),
        )
        .subcommand(Command::new("stats").about("集合统计与筛选选项").arg(kind_arg()))
        .subcommand(
            Command::new("chat")
                .about("向职业聊天提问")
                .arg(Arg::new("message").value_name("MESSAGE").required(true).num_args(1..)),
        )
        .subcommand(Command::new("check").about("检查数据目录中的数据文件能否加载"))
}

fn kind_arg() -> Arg {
    Arg::new("kind")
        .value_name("COLLECTION")
        .required(true)
        .value_parser(KINDS)
}

// 集合查询子命令，每个分类字段对应一个同名参数
fn query_command(name: &'static str, about: &'static str, facets: &'static [&'static str]) -> Command {
    let mut cmd = Command::new(name)
        .about(about)
        .arg(Arg::new("search").short('s').long("search").help("搜索文本（不区分大小写）"))
        .arg(
            Arg::new("sort")
                .long("sort")
                .value_parser(["latest", "oldest", "popular"])
                .help("排序方式"),
        )
        .arg(
            Arg::new("page")
                .long("page")
                .value_parser(value_parser!(usize))
                .help("页码（从1开始）"),
        )
        .arg(
            Arg::new("page-size")
                .long("page-size")
                .value_parser(value_parser!(usize))
                .help("每页条数"),
        );

    for field in facets {
        cmd = cmd.arg(Arg::new(*field).long(*field).help("分类筛选，all 表示不限"));
    }
    cmd
}

fn run(matches: &ArgMatches) -> Result<()> {
    let data_dir = matches
        .get_one::<String>("data")
        .context("缺少数据目录参数")?;
    let source = FsSource::new(data_dir);

    match matches.subcommand() {
        Some((name @ ("blog" | "certificates" | "projects"), sub)) => {
            let kind: CollectionKind = name.parse()?;
            let state = query_state(kind, sub)?;
            debug!("查询状态: {:?}", state);

            let collection = load(kind, &source);
            print_json(&collection.run_json(&state)?)
        }
        Some(("featured", sub)) => {
            let kind = parse_kind(sub)?;
            let limit = sub.get_one::<usize>("limit").copied().unwrap_or(FEATURED_LIMIT);
            print_json(&load(kind, &source).featured_json(limit)?)
        }
        Some(("show", sub)) => {
            let kind = parse_kind(sub)?;
            let id = sub.get_one::<String>("id").context("缺少记录ID")?;
            let record = load(kind, &source).find_json(id)?;
            if record.is_null() {
                bail!("找不到记录: {}", id);
            }
            print_json(&record)
        }
        Some(("stats", sub)) => {
            let kind = parse_kind(sub)?;
            let index = load(kind, &source).facets();
            print_json(&json!({
                "stats": index.stats(),
                "options": facet_options(&index),
                "tags": index.tags,
                "years": index.years,
            }))
        }
        Some(("chat", sub)) => {
            let message = sub
                .get_many::<String>("message")
                .map(|words| words.cloned().collect::<Vec<_>>().join(" "))
                .unwrap_or_default();

            let loaded = KeywordResponder::load(&source);
            if loaded.origin == DataOrigin::BuiltIn {
                info!("使用内置话题表");
            }
            debug!("匹配话题: {}", loaded.data.select_topic(&message));
            println!("{}", loaded.data.respond(&message));
            Ok(())
        }
        Some(("check", _)) => {
            let reports = check_data_dir(Path::new(data_dir))?;
            let mut failed = 0;
            for report in &reports {
                match &report.result {
                    Ok(count) => println!("✓ {} ({} 项)", report.file, count),
                    Err(e) => {
                        failed += 1;
                        println!("✗ {}: {}", report.file, e);
                    }
                }
            }
            if failed > 0 {
                bail!("{} 个数据文件无法加载，页面将使用内置默认数据", failed);
            }
            Ok(())
        }
        _ => unreachable!("clap 已要求子命令"),
    }
}

fn parse_kind(matches: &ArgMatches) -> Result<CollectionKind> {
    let kind = matches.get_one::<String>("kind").context("缺少集合类型")?;
    Ok(kind.parse()?)
}

fn load(kind: CollectionKind, source: &FsSource) -> Collection {
    let loaded = Collection::load(kind, source);
    if loaded.origin == DataOrigin::BuiltIn {
        info!("{:?} 使用内置默认数据", kind);
    }
    loaded.data
}

fn facet_fields(kind: CollectionKind) -> &'static [&'static str] {
    match kind {
        CollectionKind::Blog => BlogPost::FACET_FIELDS,
        CollectionKind::Certificates => Certificate::FACET_FIELDS,
        CollectionKind::Projects => Project::FACET_FIELDS,
    }
}

/// 由命令行参数构建查询状态，未给出的参数保留页面初始值
fn query_state(kind: CollectionKind, matches: &ArgMatches) -> Result<QueryState> {
    let mut state = QueryState::for_kind(kind);

    if let Some(search) = matches.get_one::<String>("search") {
        state = state.with_search(search.as_str());
    }
    for field in facet_fields(kind) {
        if let Some(value) = matches.get_one::<String>(field) {
            state = state.with_filter(*field, value.as_str());
        }
    }
    if let Some(sort) = matches.get_one::<String>("sort") {
        state = state.with_sort(Some(sort.parse::<SortKey>()?));
    }
    if let Some(page) = matches.get_one::<usize>("page") {
        state = state.with_page(*page);
    }
    if let Some(page_size) = matches.get_one::<usize>("page-size") {
        state = state.with_page_size(Some(*page_size));
    }

    Ok(state)
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// 单个数据文件的检查结果
#[derive(Debug)]
struct FileReport {
    file: String,
    /// 成功时为记录（或话题）数量
    result: Result<usize, LoadError>,
}

/// 检查数据目录中所有已知的数据文件，缺失的文件同样报告
fn check_data_dir(dir: &Path) -> Result<Vec<FileReport>> {
    if !dir.is_dir() {
        bail!("数据目录不存在或不是有效目录 '{}'", dir.display());
    }

    let known = [
        BlogPost::DATA_FILE,
        Certificate::DATA_FILE,
        Project::DATA_FILE,
        TABLE_FILE,
    ];
    let mut reports = Vec::new();
    let mut found = Vec::new();

    for entry in WalkDir::new(dir).max_depth(1) {
        let entry = entry.with_context(|| format!("遍历目录时出错: {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let file = entry.file_name().to_string_lossy().to_string();
        if !known.contains(&file.as_str()) {
            debug!("跳过未知文件: {}", entry.path().display());
            continue;
        }

        let text = std::fs::read_to_string(entry.path()).map_err(|e| LoadError::Io {
            path: entry.path().display().to_string(),
            source: e,
        });
        let result = text.and_then(|text| parse_data_file(&file, &text));

        found.push(file.clone());
        reports.push(FileReport { file, result });
    }

    for file in known {
        if !found.iter().any(|f| f == file) {
            reports.push(FileReport {
                file: file.to_string(),
                result: Err(LoadError::NotFound(dir.join(file).display().to_string())),
            });
        }
    }

    reports.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(reports)
}

fn parse_data_file(file: &str, text: &str) -> Result<usize, LoadError> {
    if file == BlogPost::DATA_FILE {
        parse_collection::<BlogPost>(file, text).map(|r| r.len())
    } else if file == Certificate::DATA_FILE {
        parse_collection::<Certificate>(file, text).map(|r| r.len())
    } else if file == Project::DATA_FILE {
        parse_collection::<Project>(file, text).map(|r| r.len())
    } else {
        TopicTable::parse(file, text).map(|t| t.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn sub_matches(args: &[&str]) -> (String, ArgMatches) {
        let matches = build_cli().try_get_matches_from(args).unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        (name.to_string(), sub.clone())
    }

    #[test]
    fn cli_definition_is_valid() {
        build_cli().debug_assert();
    }

    #[test]
    fn blog_args_build_query_state() {
        let (_, sub) = sub_matches(&[
            "portfolio-cli", "blog", "--search", "Mobile", "--category", "Performance Testing", "--sort", "popular",
            "--page", "2",
        ]);
        let state = query_state(CollectionKind::Blog, &sub).unwrap();

        assert_eq!(state.search, "Mobile");
        assert_eq!(state.sort, Some(SortKey::Popular));
        assert_eq!(state.page, 2);
        assert_eq!(state.page_size, Some(collection_filter::BLOG_PAGE_SIZE));
        assert_eq!(state.filters["category"], "Performance Testing");
    }

    #[test]
    fn certificates_accept_issuer_but_not_status() {
        let (_, sub) = sub_matches(&["portfolio-cli", "certificates", "--issuer", "Edureka"]);
        let state = query_state(CollectionKind::Certificates, &sub).unwrap();
        assert_eq!(state.filters["issuer"], "Edureka");
        assert_eq!(state.filters["category"], "all");

        assert!(build_cli()
            .try_get_matches_from(["portfolio-cli", "certificates", "--status", "Active"])
            .is_err());
    }

    #[test]
    fn unknown_sort_is_rejected_by_the_parser() {
        assert!(build_cli()
            .try_get_matches_from(["portfolio-cli", "blog", "--sort", "trending"])
            .is_err());
    }

    #[test]
    fn show_finds_built_in_record_and_rejects_unknown_id() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().to_string_lossy().to_string();
        let id = utils_common::defaults::projects()[0].id.clone();

        let matches = build_cli()
            .try_get_matches_from(["portfolio-cli", "--data", data.as_str(), "show", "projects", id.as_str()])
            .unwrap();
        assert!(run(&matches).is_ok());

        let matches = build_cli()
            .try_get_matches_from(["portfolio-cli", "--data", data.as_str(), "show", "projects", "missing"])
            .unwrap();
        assert!(run(&matches).is_err());
    }

    #[test]
    fn check_reports_broken_and_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("blog-posts.json"), r#"[{"id":"a"},{"id":"b"}]"#).unwrap();
        fs::write(dir.path().join("projects.json"), r#"[{"id":"x"},{"id":"x"}]"#).unwrap();
        fs::write(dir.path().join("chat-responses.json"), r#"{"greetings":["Hi"]}"#).unwrap();
        fs::write(dir.path().join("notes.json"), "not json").unwrap();

        let reports = check_data_dir(dir.path()).unwrap();
        let summary: Vec<(&str, bool)> = reports
            .iter()
            .map(|r| (r.file.as_str(), r.result.is_ok()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("blog-posts.json", true),
                ("certificates.json", false),
                ("chat-responses.json", true),
                ("projects.json", false),
            ]
        );
        assert!(matches!(reports[0].result, Ok(2)));
        assert!(matches!(reports[3].result, Err(LoadError::DuplicateId { .. })));
    }

    #[test]
    fn check_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(check_data_dir(&dir.path().join("nope")).is_err());
    }
}
