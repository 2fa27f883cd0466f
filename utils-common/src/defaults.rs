//! 内置默认集合 - 数据文件无法加载时展示的内容

use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::{BlogPost, Certificate, Project};

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 默认博客文章
pub fn blog_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: "qa-automation-best-practices".to_string(),
            title: "QA Automation Best Practices at Scale".to_string(),
            excerpt: "Learn the key principles for building maintainable and scalable automation frameworks in enterprise environments.".to_string(),
            content: None,
            author: "Manu Kakkar".to_string(),
            date: ymd(2024, 1, 15),
            read_time: Some(8),
            category: Some("Automation".to_string()),
            tags: strings(&["automation", "best-practices", "framework"]),
            featured: true,
            published: true,
        },
        BlogPost {
            id: "performance-testing-mobile-apps".to_string(),
            title: "Performance Testing for Mobile Applications".to_string(),
            excerpt: "Deep dive into mobile app performance testing techniques, tools, and metrics that matter.".to_string(),
            content: None,
            author: "Manu Kakkar".to_string(),
            date: ymd(2024, 1, 10),
            read_time: Some(12),
            category: Some("Performance Testing".to_string()),
            tags: strings(&["performance", "mobile", "testing"]),
            featured: true,
            published: true,
        },
        BlogPost {
            id: "amazon-qa-culture".to_string(),
            title: "Quality Culture at Amazon: Lessons Learned".to_string(),
            excerpt: "Insights into how Amazon maintains high quality standards and what QA engineers can learn from it.".to_string(),
            content: None,
            author: "Manu Kakkar".to_string(),
            date: ymd(2024, 1, 5),
            read_time: Some(6),
            category: Some("Culture".to_string()),
            tags: strings(&["amazon", "culture", "quality"]),
            featured: true,
            published: true,
        },
    ]
}

/// 默认证书
pub fn certificates() -> Vec<Certificate> {
    vec![
        Certificate {
            id: "cybersecurity-ethical-hacking".to_string(),
            title: "Cyber Security and Ethical Hacking Internship Program".to_string(),
            issuer: Some("Edureka".to_string()),
            issue_date: ymd(2023, 1, 1),
            expiry_date: None,
            credential_id: Some("PS86DDHA3".to_string()),
            verification_url: None,
            category: Some("Cybersecurity".to_string()),
            skills: strings(&["Kali Linux", "Ethical Hacking", "Network Security"]),
            description: "Comprehensive cybersecurity program covering ethical hacking and penetration testing.".to_string(),
            featured: true,
        },
        Certificate {
            id: "mentoring-certificate".to_string(),
            title: "Mentoring Certificate".to_string(),
            issuer: Some("Chronus".to_string()),
            issue_date: ymd(2023, 12, 1),
            expiry_date: None,
            credential_id: Some("cf-79baab02-765c-4fb3-8f43-b043a8c499b0-1250404".to_string()),
            verification_url: None,
            category: Some("Leadership".to_string()),
            skills: strings(&["Mentoring", "Leadership", "Communication"]),
            description: "Professional mentoring certification for guiding junior team members.".to_string(),
            featured: true,
        },
        Certificate {
            id: "qspiders-software-testing".to_string(),
            title: "Software Testing Training Certificate".to_string(),
            issuer: Some("QSpiders - Software Testing Training Institute".to_string()),
            issue_date: ymd(2020, 1, 1),
            expiry_date: None,
            credential_id: None,
            verification_url: None,
            category: Some("Software Testing".to_string()),
            skills: strings(&["Manual Testing", "Selenium", "Core Java"]),
            description: "Comprehensive software testing training covering manual and automation testing.".to_string(),
            featured: true,
        },
    ]
}

/// 默认项目
pub fn projects() -> Vec<Project> {
    let project = |id: &str, title: &str, description: &str, technologies: &[&str], category: &str, status: &str| Project {
        id: id.to_string(),
        title: title.to_string(),
        description: description.to_string(),
        long_description: None,
        technologies: strings(technologies),
        category: Some(category.to_string()),
        status: Some(status.to_string()),
        start_date: None,
        featured: true,
        achievements: Vec::new(),
        challenges: Vec::new(),
        learnings: Vec::new(),
        metrics: BTreeMap::new(),
    };

    vec![
        project(
            "amazon-appstore-automation",
            "Amazon Appstore Automation Framework",
            "Comprehensive end-to-end automation framework for testing Amazon Appstore applications across multiple platforms.",
            &["Python", "Selenium", "Pytest", "Jenkins", "Docker"],
            "Web Testing",
            "Active",
        ),
        project(
            "fire-tv-performance-testing",
            "Fire TV Performance Testing Suite",
            "Advanced performance testing framework for Fire TV applications focusing on TTFF and memory optimization.",
            &["Java", "Appium", "Maestro", "Performance Testing"],
            "Performance Testing",
            "Completed",
        ),
        project(
            "sdk-automation-framework",
            "SDK Automation & Validation Framework",
            "Automated testing framework for SDK validation and compatibility testing across devices.",
            &["Kotlin", "Android Studio", "API Testing", "CI/CD"],
            "SDK Testing",
            "Active",
        ),
    ]
}
