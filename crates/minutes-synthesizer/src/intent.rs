//! Intent parsing
//!
//! Small, stateless detectors over a single requirement sentence. Each one
//! recognizes a narrow phrasing ("after 5 failed attempts", "within 2
//! seconds", "customers cannot see", ...) and returns `None`/`false` when
//! the phrasing is absent. The synthesizers combine them as ordered
//! priority lists.

use regex::Regex;
use std::sync::LazyLock;

static AGENT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bagents?\b").expect("Invalid agent pattern"));

static CUSTOMER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bcustomers?\b\s+(want|wants|need|needs|must|should|can|cannot|can't)\b")
        .expect("Invalid customer pattern")
});

static INLINE_CONSTRAINT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.*)\bthat\b\s+(.+\b(cannot|can't|must not)\b.+)$")
        .expect("Invalid inline constraint pattern")
});

static INLINE_CONSTRAINT_TAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bthat\b\s+.+\b(cannot|can't|must not)\b.+$")
        .expect("Invalid inline constraint tail pattern")
});

static BUT_NOT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.*?),?\s*\bbut\s+not\b\s+(.+)$").expect("Invalid but-not pattern")
});

static ONLY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bonly\b\s+(.+)$").expect("Invalid only pattern"));

static INVALID_THING_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\binvalid\s+([a-z][a-z0-9_-]*)\b").expect("Invalid invalid-thing pattern")
});

static ATTEMPTS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\bafter\s+(\d+)\s+.*?(failed|invalid).*?(attempts?)\b|\b(\d+)\s+(failed|invalid)\s+(attempts?)\b",
    )
    .expect("Invalid attempts pattern")
});

static ATTEMPT_NOUN_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:failed|invalid)\s+([a-z][a-z0-9_-]*)\s+attempts?\b")
        .expect("Invalid attempt noun pattern")
});

static LOCK_DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bfor\s+(\d+)\s+(minutes?|mins?)\b").expect("Invalid lock duration pattern")
});

static WITHIN_SECONDS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bwithin\s+(\d+)\s*(seconds?|secs?|s)\b").expect("Invalid within pattern")
});

static VISIBILITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(customers?|users?)\b\s+(cannot|can't|must not)\s+see\b")
        .expect("Invalid visibility pattern")
});

static RESULTS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(search results|results)\b").expect("Invalid results pattern")
});

static CAPABILITY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(need to|needs to|need|needs|must|should|have to|has to|can|would like to|i'd like to|we'd like to|we would like to)\b\s+(.+?)(?:\bso that\b|$)",
    )
    .expect("Invalid capability pattern")
});

static CAPABILITY_BASIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(need to|needs to|must|should|have to|has to|can)\b\s+(.+?)(?:\bso that\b|$)")
        .expect("Invalid basic capability pattern")
});

static BENEFIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bso that\b\s+(.+)$").expect("Invalid benefit pattern"));

static LEADING_TO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^to\s+").expect("Invalid leading-to pattern"));

static BE_ABLE_TO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^be\s+able\s+to\s+").expect("Invalid be-able-to pattern"));

static ABLE_TO_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^able\s+to\s+").expect("Invalid able-to pattern"));

static SHOW_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(show|display)\b").expect("Invalid show pattern"));

static SHOW_PREFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(show|display)\s+").expect("Invalid show prefix pattern"));

/// Repeated failures lock the user out for a while
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockoutConstraint {
    /// Failed attempts before the lock
    pub attempts: u32,
    /// What was invalid ("login", "password"), when named
    pub thing: Option<String>,
    /// Lock duration
    pub duration_minutes: u32,
}

impl LockoutConstraint {
    /// Named thing, or "input"
    pub fn thing_or_input(&self) -> &str {
        self.thing.as_deref().unwrap_or("input")
    }
}

/// A latency bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceConstraint {
    /// Upper bound in seconds
    pub within_seconds: u32,
}

/// Something a group of people must not see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilityConstraint {
    /// Who is restricted ("customers", "user")
    pub subject: String,
    /// What they cannot see
    pub object: String,
}

/// A capability with an optional constraint split off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilitySplit {
    /// Remaining capability phrase
    pub capability: String,
    /// Constraint clause, when one was found
    pub constraint: Option<String>,
}

impl CapabilitySplit {
    fn unchanged(capability: &str) -> Self {
        Self {
            capability: capability.to_string(),
            constraint: None,
        }
    }
}

/// Trim and drop trailing periods
pub(crate) fn strip_trailing_periods(s: &str) -> &str {
    s.trim().trim_end_matches('.').trim_end()
}

fn positive_number(raw: Option<regex::Match<'_>>) -> Option<u32> {
    raw?.as_str().parse::<u32>().ok().filter(|n| *n > 0)
}

fn mentions_support_agent(lower: &str) -> bool {
    lower.contains("support agent") || AGENT_REGEX.is_match(lower)
}

/// Guess the persona behind a requirement
///
/// Operational roles win over nouns that may just be objects
/// ("customer email").
pub fn infer_persona(text: &str) -> &'static str {
    let t = text.to_lowercase();
    if mentions_support_agent(&t) {
        "support agent"
    } else if t.contains("admin") {
        "admin"
    } else if t.contains("manager") {
        "manager"
    } else if t.contains("product owner") {
        "product owner"
    } else if t.contains("audit") || t.contains("compliance") {
        "compliance auditor"
    } else if CUSTOMER_REGEX.is_match(&t) {
        "customer"
    } else {
        "user"
    }
}

/// Reduced persona guess: support agent, admin, customer or user
pub fn infer_persona_basic(text: &str) -> &'static str {
    let t = text.to_lowercase();
    if mentions_support_agent(&t) {
        "support agent"
    } else if t.contains("admin") {
        "admin"
    } else if CUSTOMER_REGEX.is_match(&t) {
        "customer"
    } else {
        "user"
    }
}

/// Capitalize, drop trailing periods and end with a single `.`
///
/// Returns an empty string for blank input.
pub fn to_sentence(s: &str) -> String {
    let trimmed = strip_trailing_periods(s);
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => format!("{}{}.", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

/// Strip "to", "be able to" and "able to" from an "I want" phrase
pub fn normalize_capability(i_want: &str) -> String {
    let c = LEADING_TO_REGEX.replace(i_want.trim(), "");
    let c = BE_ABLE_TO_REGEX.replace(&c, "");
    let c = ABLE_TO_REGEX.replace(&c, "");
    minutes_domain::collapse_whitespace(&c)
}

/// Split "X, but not Y" into X and "cannot Y"
pub fn split_but_not_constraint(capability: &str) -> CapabilitySplit {
    let Some(caps) = BUT_NOT_REGEX.captures(capability) else {
        return CapabilitySplit::unchanged(capability);
    };

    let base = strip_trailing_periods(caps.get(1).map_or(capability, |m| m.as_str())).to_string();
    let rest = strip_trailing_periods(caps.get(2).map_or("", |m| m.as_str()));

    CapabilitySplit {
        capability: base,
        constraint: (!rest.is_empty()).then(|| format!("cannot {}", rest)),
    }
}

/// Split "X that customers cannot see" into X and the `that` clause
pub fn split_inline_constraint(capability: &str) -> CapabilitySplit {
    let Some(caps) = INLINE_CONSTRAINT_REGEX.captures(capability) else {
        return CapabilitySplit::unchanged(capability);
    };

    CapabilitySplit {
        capability: strip_trailing_periods(caps.get(1).map_or(capability, |m| m.as_str()))
            .to_string(),
        constraint: caps.get(2).map(|m| m.as_str().trim().to_string()),
    }
}

/// Text after "only", e.g. "see the tasks they're assigned to"
pub fn extract_only_constraint(text: &str) -> Option<String> {
    let caps = ONLY_REGEX.captures(text)?;
    let remainder = strip_trailing_periods(caps.get(1)?.as_str());
    (!remainder.is_empty()).then(|| remainder.to_string())
}

/// Noun after "invalid", lowercased
pub fn extract_invalid_thing(text: &str) -> Option<String> {
    INVALID_THING_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
}

/// "lock ... after N failed attempts ... for M minutes"
///
/// Both numbers must be present and positive.
pub fn extract_lockout(text: &str) -> Option<LockoutConstraint> {
    let t = text.to_lowercase();
    if !t.contains("lock") {
        return None;
    }

    let attempts = ATTEMPTS_REGEX
        .captures(&t)
        .and_then(|caps| positive_number(caps.get(1).or_else(|| caps.get(4))))?;

    let duration_minutes = LOCK_DURATION_REGEX
        .captures(&t)
        .and_then(|caps| positive_number(caps.get(1)))?;

    let thing = extract_invalid_thing(text).or_else(|| {
        ATTEMPT_NOUN_REGEX
            .captures(&t)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    });

    Some(LockoutConstraint {
        attempts,
        thing,
        duration_minutes,
    })
}

/// "within N seconds", N positive
pub fn extract_performance(text: &str) -> Option<PerformanceConstraint> {
    let t = text.to_lowercase();
    let within_seconds = WITHIN_SECONDS_REGEX
        .captures(&t)
        .and_then(|caps| positive_number(caps.get(1)))?;
    Some(PerformanceConstraint { within_seconds })
}

/// "customers cannot see ..." style restriction
pub fn extract_visibility_constraint(text: &str) -> Option<VisibilityConstraint> {
    let t = text.to_lowercase();
    let subject = VISIBILITY_REGEX.captures(&t)?.get(1)?.as_str().to_string();
    let object = if t.contains("note") {
        "the internal note"
    } else {
        "the restricted content"
    };
    Some(VisibilityConstraint {
        subject,
        object: object.to_string(),
    })
}

/// "should only see what they're assigned"
pub fn is_only_assigned_visibility(text: &str) -> bool {
    let t = text.to_lowercase();
    t.contains("only") && t.contains("assigned") && t.contains("see")
}

/// "view ..., but not edit"
pub fn is_view_but_not_edit(text: &str) -> bool {
    let t = text.to_lowercase();
    t.contains("view") && t.contains("but not") && t.contains("edit")
}

/// Mentions an audit log or recording to one
pub fn is_audit_requirement(text: &str) -> bool {
    let t = text.to_lowercase();
    t.contains("audit log") || (t.contains("audit") && (t.contains("record") || t.contains("log")))
}

/// Mentions "results" or "search results"
pub fn mentions_results(text: &str) -> bool {
    RESULTS_REGEX.is_match(text)
}

/// Whether a capability starts with "show" or "display"
pub fn is_display_capability(capability: &str) -> bool {
    SHOW_REGEX.is_match(capability)
}

/// What a display capability shows ("show X" becomes "X")
pub fn shown_object(capability: &str) -> String {
    SHOW_PREFIX_REGEX.replace(capability, "").trim().to_string()
}

/// "so that" clause, trailing periods removed
pub fn extract_benefit(text: &str) -> Option<String> {
    let caps = BENEFIT_REGEX.captures(text)?;
    let benefit = strip_trailing_periods(caps.get(1)?.as_str());
    (!benefit.is_empty()).then(|| benefit.to_string())
}

fn capability_with(regex: &Regex, text: &str) -> String {
    let phrase = regex
        .captures(text)
        .and_then(|caps| caps.get(2))
        .map_or(text, |m| m.as_str());
    let phrase = strip_trailing_periods(phrase);
    let phrase = BE_ABLE_TO_REGEX.replace(phrase, "");
    INLINE_CONSTRAINT_TAIL_REGEX
        .replace(phrase.trim(), "")
        .trim()
        .to_string()
}

/// Action phrase following the modal verb, up to "so that"
pub fn capability_from_requirement(text: &str) -> String {
    capability_with(&CAPABILITY_REGEX, text)
}

/// Like [`capability_from_requirement`] with a smaller modal vocabulary
pub fn capability_from_requirement_basic(text: &str) -> String {
    capability_with(&CAPABILITY_BASIC_REGEX, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persona_priority() {
        assert_eq!(infer_persona("Agents need to add notes"), "support agent");
        assert_eq!(infer_persona("Admins must reset passwords"), "admin");
        assert_eq!(infer_persona("Managers should see totals"), "manager");
        assert_eq!(infer_persona("The product owner needs a roadmap"), "product owner");
        assert_eq!(infer_persona("Changes must be recorded for compliance"), "compliance auditor");
        assert_eq!(infer_persona("Customers want faster replies"), "customer");
        assert_eq!(infer_persona("Send the customer email faster"), "user");
        assert_eq!(infer_persona("We need exports"), "user");
    }

    #[test]
    fn test_persona_basic_skips_extra_roles() {
        assert_eq!(infer_persona_basic("Managers should see totals"), "user");
        assert_eq!(infer_persona_basic("Edits must be written to an audit log"), "user");
        assert_eq!(infer_persona_basic("Support agents can merge tickets"), "support agent");
        assert_eq!(infer_persona_basic("Customers can't see drafts"), "customer");
    }

    #[test]
    fn test_to_sentence() {
        assert_eq!(to_sentence("  the system shows totals..  "), "The system shows totals.");
        assert_eq!(to_sentence("écran prêt"), "Écran prêt.");
        assert_eq!(to_sentence(" . "), "");
    }

    #[test]
    fn test_normalize_capability() {
        assert_eq!(normalize_capability("to be able to   export data"), "export data");
        assert_eq!(normalize_capability("able to export"), "export");
        assert_eq!(normalize_capability("To merge tickets"), "merge tickets");
    }

    #[test]
    fn test_split_but_not() {
        let split = split_but_not_constraint("view progress, but not edit anything.");
        assert_eq!(split.capability, "view progress");
        assert_eq!(split.constraint.as_deref(), Some("cannot edit anything"));

        let split = split_but_not_constraint("view progress");
        assert_eq!(split, CapabilitySplit::unchanged("view progress"));
    }

    #[test]
    fn test_split_inline() {
        let split = split_inline_constraint("add internal notes that customers cannot see");
        assert_eq!(split.capability, "add internal notes");
        assert_eq!(split.constraint.as_deref(), Some("customers cannot see"));

        assert!(split_inline_constraint("add notes that are long").constraint.is_none());
    }

    #[test]
    fn test_only_and_invalid() {
        assert_eq!(
            extract_only_constraint("Contributors should only see tasks they're assigned to."),
            Some("see tasks they're assigned to".to_string())
        );
        assert_eq!(extract_only_constraint("only ..."), None);
        assert_eq!(extract_invalid_thing("Reject an Invalid Email quickly"), Some("email".to_string()));
        assert_eq!(extract_invalid_thing("nothing here"), None);
    }

    #[test]
    fn test_lockout() {
        let lockout = extract_lockout("Searches lock for 15 minutes after 5 failed login attempts.").unwrap();
        assert_eq!(lockout.attempts, 5);
        assert_eq!(lockout.duration_minutes, 15);
        assert_eq!(lockout.thing.as_deref(), Some("login"));

        let lockout = extract_lockout("Lock the account after 3 invalid password attempts for 10 mins").unwrap();
        assert_eq!(lockout.attempts, 3);
        assert_eq!(lockout.thing_or_input(), "password");

        let lockout = extract_lockout("Lock out after 5 failed attempts for 2 minutes").unwrap();
        assert_eq!(lockout.thing_or_input(), "input");

        assert!(extract_lockout("Lock after 0 failed attempts for 5 minutes").is_none());
        assert!(extract_lockout("Lock after 5 failed attempts").is_none());
        assert!(extract_lockout("After 5 failed attempts for 5 minutes").is_none());
    }

    #[test]
    fn test_performance() {
        assert_eq!(
            extract_performance("Results must load within 2 seconds"),
            Some(PerformanceConstraint { within_seconds: 2 })
        );
        assert_eq!(
            extract_performance("respond within 3s"),
            Some(PerformanceConstraint { within_seconds: 3 })
        );
        assert!(extract_performance("within 0 seconds").is_none());
        assert!(extract_performance("within two seconds").is_none());
    }

    #[test]
    fn test_visibility() {
        let visibility = extract_visibility_constraint("Agents add notes that customers cannot see").unwrap();
        assert_eq!(visibility.subject, "customers");
        assert_eq!(visibility.object, "the internal note");

        let visibility = extract_visibility_constraint("Users must not see drafts").unwrap();
        assert_eq!(visibility.subject, "users");
        assert_eq!(visibility.object, "the restricted content");

        assert!(extract_visibility_constraint("Customers can see drafts").is_none());
    }

    #[test]
    fn test_predicates() {
        assert!(is_only_assigned_visibility("ICs should only see tasks assigned to them"));
        assert!(is_view_but_not_edit("Executives can view progress but not edit"));
        assert!(is_audit_requirement("Note edits must be recorded for audit"));
        assert!(is_audit_requirement("Write an audit log entry"));
        assert!(!is_audit_requirement("Auditorium booking"));
        assert!(mentions_results("Show search results"));
        assert!(!mentions_results("Show resultset"));
    }

    #[test]
    fn test_capability_from_requirement() {
        assert_eq!(
            capability_from_requirement("Agents need to be able to add internal notes that customers cannot see."),
            "add internal notes"
        );
        assert_eq!(
            capability_from_requirement("We would like to export data so that finance can reconcile"),
            "export data"
        );
        assert_eq!(
            capability_from_requirement_basic("We would like to export data."),
            "We would like to export data"
        );
        assert_eq!(
            capability_from_requirement_basic("The system should show search results."),
            "show search results"
        );
    }

    #[test]
    fn test_display_helpers() {
        assert!(is_display_capability("Display totals"));
        assert!(!is_display_capability("showcase totals"));
        assert_eq!(shown_object("show   the totals"), "the totals");
    }

    #[test]
    fn test_extract_benefit() {
        assert_eq!(
            extract_benefit("Agents need notes so that they share context."),
            Some("they share context".to_string())
        );
        assert_eq!(extract_benefit("Agents need notes"), None);
    }
}
