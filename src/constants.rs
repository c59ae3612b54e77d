/// contexts that would turn a quote into an anonymous one.
pub static FORBIDDEN_CONTEXTS: [&str; 3] = ["Anonyme", "anonyme", "Anonymous"];

/// how many of the most recent active quotes a new quote is compared against.
pub const DEDUP_WINDOW: i64 = 5;
pub const DEDUP_THRESHOLD: f64 = 0.45;
pub const FUZZY_THRESHOLD: f64 = 0.1;

/// ids up to this value are reserved; the first quote gets the next one.
pub const RESERVED_QUOTE_IDS: i64 = 100;

pub fn is_forbidden_context(context: &str) -> bool {
    FORBIDDEN_CONTEXTS.contains(&context)
}
