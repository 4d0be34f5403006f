//! Browser, OS and device-class flags derived from identity strings.

use regex::Regex;

use crate::shared::Quirks;

/// How a rule decides its flag.
#[derive(Debug, Clone)]
pub enum QuirkMatcher {
    /// Flag is set when the user agent matches.
    UserAgent(Regex),
    /// Flag is set when the platform string contains the needle.
    Platform(String),
    /// Flag is computed from `(user_agent, platform)`.
    Predicate(fn(&str, &str) -> bool),
}

impl QuirkMatcher {
    fn matches(&self, user_agent: &str, platform: &str) -> bool {
        match self {
            QuirkMatcher::UserAgent(re) => re.is_match(user_agent),
            QuirkMatcher::Platform(needle) => platform.contains(needle.as_str()),
            QuirkMatcher::Predicate(f) => f(user_agent, platform),
        }
    }
}

/// A named quirk rule.
#[derive(Debug, Clone)]
pub struct QuirkRule {
    name: String,
    matcher: QuirkMatcher,
}

impl QuirkRule {
    /// Creates a rule.
    pub fn new(name: impl Into<String>, matcher: QuirkMatcher) -> Self {
        Self {
            name: name.into(),
            matcher,
        }
    }

    /// Flag name the rule sets.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// An ordered, extensible set of quirk rules.
///
/// [`QuirkRules::default`] is the standard browser/OS/device-class set.
/// Rules can be added or replaced by name; the set is not closed.
#[derive(Debug, Clone)]
pub struct QuirkRules {
    rules: Vec<QuirkRule>,
}

impl QuirkRules {
    /// A rule set with no rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds `rule`, replacing any rule with the same name.
    pub fn with_rule(mut self, rule: QuirkRule) -> Self {
        match self.rules.iter_mut().find(|r| r.name == rule.name) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
        self
    }

    /// Drops the rule named `name`, if present.
    pub fn without(mut self, name: &str) -> Self {
        self.rules.retain(|r| r.name != name);
        self
    }

    /// Rule names in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.name())
    }

    /// Evaluates every rule.
    pub fn evaluate(&self, user_agent: &str, platform: &str) -> Quirks {
        self.rules
            .iter()
            .map(|r| (r.name.clone(), r.matcher.matches(user_agent, platform)))
            .collect()
    }
}

fn ua(pattern: &str) -> QuirkMatcher {
    QuirkMatcher::UserAgent(Regex::new(pattern).expect("invalid regex"))
}

fn mentions_any(user_agent: &str, needles: &[&str]) -> bool {
    let lower = user_agent.to_ascii_lowercase();
    needles.iter().any(|n| lower.contains(n))
}

fn is_desktop(user_agent: &str, _platform: &str) -> bool {
    !mentions_any(user_agent, &["mobi", "android", "tablet", "ipad"])
}

/// `safari` appearing before any `chrome` or `android`, case-insensitively.
fn is_safari(user_agent: &str, _platform: &str) -> bool {
    let lower = user_agent.to_ascii_lowercase();
    match lower.find("safari") {
        Some(at) => {
            let head = &lower[..at];
            !head.contains("chrome") && !head.contains("android")
        }
        None => false,
    }
}

impl Default for QuirkRules {
    fn default() -> Self {
        let rules = vec![
            QuirkRule::new("edge", ua(r"Edg/")),
            QuirkRule::new("brave", ua(r"Brave")),
            QuirkRule::new("vivaldi", ua(r"Vivaldi")),
            QuirkRule::new("opera", ua(r"OPR/|Opera")),
            QuirkRule::new("mobile", ua(r"(?i)Mobi|Android")),
            QuirkRule::new("tablet", ua(r"(?i)Tablet|iPad")),
            QuirkRule::new("desktop", QuirkMatcher::Predicate(is_desktop)),
            QuirkRule::new("mac", QuirkMatcher::Platform("Mac".to_string())),
            QuirkRule::new("windows", QuirkMatcher::Platform("Win".to_string())),
            QuirkRule::new("linux", QuirkMatcher::Platform("Linux".to_string())),
            QuirkRule::new("android", ua(r"(?i)Android")),
            QuirkRule::new("ios", ua(r"(?i)iPhone|iPad|iPod")),
            QuirkRule::new("safari", QuirkMatcher::Predicate(is_safari)),
        ];
        Self { rules }
    }
}
