//! 内置话题表 - 话题表加载失败或缺少某个话题时使用

use once_cell::sync::Lazy;

use crate::models::{Topic, TopicTable};

/// 聊天窗口中的快捷问题
pub const SUGGESTIONS: [&str; 6] = [
    "Tell me about QA career paths",
    "How is Amazon culture?",
    "What testing tools do you use?",
    "Performance testing tips",
    "Mobile testing strategies",
    "How to contact you?",
];

/// 话题的内置触发关键词
pub fn keywords(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Greeting => &["hello", "hi", "hey", "greetings"],
        Topic::Contact => &["contact", "reach", "email", "phone"],
        Topic::Help => &["help", "assist", "support"],
        Topic::Career => &["qa", "career", "job", "quality assurance"],
        Topic::Culture => &["amazon", "culture", "work", "leadership"],
        Topic::Tools => &["tool", "selenium", "postman", "appium"],
        Topic::Automation => &["automation", "framework", "script"],
        Topic::Performance => &["performance", "ttff", "memory", "speed"],
        Topic::Mobile => &["mobile", "android", "ios", "fire tv"],
        Topic::Api => &["api", "rest", "endpoint", "service"],
        Topic::Advice => &["advice", "tip", "guidance", "recommend"],
        Topic::Interview => &["interview", "hiring", "application", "join amazon"],
        Topic::Learning => &["learn", "study", "course", "book"],
        Topic::Balance => &["balance", "life", "stress", "time"],
        Topic::Default => &[],
    }
}

/// 话题的内置候选回复
pub fn responses(topic: Topic) -> &'static [&'static str] {
    match topic {
        Topic::Greeting => &[
            "Hello! Great to connect with you. What would you like to know about QA careers?",
            "Hi there! I'm excited to chat about quality assurance and testing. What's on your mind?",
            "Hey! Thanks for reaching out. How can I help you with your QA journey?",
        ],
        Topic::Contact => &[
            "The easiest way to reach me is through the contact form on this site or via LinkedIn. I usually reply within a couple of days.",
            "Feel free to send me an email from the contact page. I'm always happy to talk about testing and quality engineering.",
            "You can connect with me on LinkedIn or use the contact section below. Mention what you'd like to discuss so I can prepare.",
        ],
        Topic::Help => &[
            "Happy to help! You can ask me about QA careers, testing tools, automation frameworks, or what it's like to work at Amazon.",
            "Sure, I can assist. Try asking about performance testing, mobile testing, API testing, or interview preparation.",
            "I'm here to support your QA journey. Pick a topic from the quick questions below or ask me anything about testing.",
        ],
        Topic::Career => &[
            "QA is an amazing field! At Amazon, I work on automation, SDK testing, and performance optimization. The key is to start with manual testing fundamentals, then move into automation tools like Selenium and Appium.",
            "Getting into QA requires curiosity and attention to detail. I'd recommend starting with basic testing concepts, learning SQL, and getting hands-on with tools like Postman for API testing.",
            "The QA field is evolving rapidly with AI and automation. Focus on learning programming (Python/Java), understanding CI/CD pipelines, and developing both technical and analytical skills.",
        ],
        Topic::Culture => &[
            "Amazon's culture is unique - we're customer-obsessed and data-driven. The leadership principles guide everything we do. It's fast-paced but incredibly rewarding.",
            "Working at Amazon has taught me to think big and dive deep. The learning opportunities are endless, and you're constantly challenged to innovate and improve processes.",
            "Amazon values ownership and results. As a QAE, I own the quality of our products end-to-end, which means collaborating across teams and thinking like a customer.",
        ],
        Topic::Tools => &[
            "I work with a variety of tools: Selenium for web automation, Maestro for mobile testing, Postman for API testing, and Jenkins for CI/CD. The key is choosing the right tool for each scenario.",
            "My tech stack includes Python, Java, Selenium, Appium, Cypress, and AWS services. I also use performance testing tools for TTFF and memory profiling.",
            "Tool selection depends on your project needs. For beginners, I'd recommend starting with Selenium WebDriver, Postman, and learning a programming language like Python or Java.",
        ],
        Topic::Automation => &[
            "A good automation framework is maintainable first: page objects, clear test data management, and reliable reporting matter more than the number of scripts.",
            "Start automating the stable, high-value regression flows. Flaky tests cost more than they save, so invest in waits, retries, and clean test environments.",
            "I build frameworks with Python and Pytest or Java and TestNG, wired into CI so every change gets fast feedback.",
        ],
        Topic::Performance => &[
            "For performance testing I track metrics like TTFF, memory usage, and CPU over repeated runs. Baselines and trends matter more than single numbers.",
            "Measure on real devices, control the environment, and automate the runs. Memory leaks often only show up after long sessions.",
            "Define clear performance budgets with your team first, then add automated checks so regressions are caught before release.",
        ],
        Topic::Mobile => &[
            "Mobile testing means covering device fragmentation, OS versions, and network conditions. I use Appium and Maestro for automation on Android and Fire TV.",
            "For mobile apps, combine emulators for fast feedback with real devices for accuracy. Don't forget app lifecycle cases like backgrounding and low memory.",
            "On Fire TV and Android I focus on launch time, navigation responsiveness, and stability across long viewing sessions.",
        ],
        Topic::Api => &[
            "API testing is a great place to start automation: tests are fast and stable. Postman is good for exploration, and code-based suites scale better.",
            "Validate status codes, schemas, error handling, and edge cases for every endpoint. Contract tests help keep services in sync.",
            "I test REST services with Python requests or REST Assured and run them in CI against every deployment.",
        ],
        Topic::Advice => &[
            "My top tip: learn to think like a customer. The best bugs are found by people who understand how the product is really used.",
            "Invest in programming skills early, write clear bug reports, and never stop asking why something behaves the way it does.",
            "Find a mentor, build a small portfolio of automation projects on GitHub, and share what you learn. It opens a lot of doors.",
        ],
        Topic::Interview => &[
            "Amazon interviews focus heavily on the leadership principles. Prepare STAR stories that show ownership, customer obsession, and diving deep.",
            "For QA roles expect test design questions, some coding, and behavioral rounds. Practice explaining how you'd test a familiar product.",
            "Tailor your application to the role, highlight measurable impact from past projects, and be ready to discuss trade-offs in your testing decisions.",
        ],
        Topic::Learning => &[
            "I recommend the ISTQB foundation syllabus for concepts, plus hands-on courses for Selenium and API testing. Practice matters more than certificates.",
            "Books like 'Lessons Learned in Software Testing' and 'Agile Testing' shaped how I think about quality. Pair them with real projects.",
            "Study one programming language deeply, then learn a test framework in it. Building something end-to-end teaches more than any course.",
        ],
        Topic::Balance => &[
            "Work-life balance takes intention. I block focus time, automate repetitive work, and make sure to disconnect after hours.",
            "Release weeks can be stressful, so I plan ahead and communicate early. Sustainable pace beats heroics every time.",
            "I keep time for learning and for life outside work. It keeps me motivated and makes me a better engineer.",
        ],
        Topic::Default => &[
            "That's a great question! Could you be more specific about what aspect of QA or testing you'd like to discuss?",
            "I'd love to help you with that. Can you tell me more about your specific situation or what you're trying to achieve?",
            "Interesting topic! Feel free to ask me about QA careers, testing methodologies, automation, or working at Amazon.",
        ],
    }
}

/// 内置话题表，覆盖全部话题
pub static BUILT_IN: Lazy<TopicTable> = Lazy::new(|| {
    Topic::PRIORITY
        .into_iter()
        .fold(TopicTable::new(), |table, topic| {
            table.with_entry(topic, keywords(topic), responses(topic))
        })
});

