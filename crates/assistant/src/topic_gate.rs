//! Topic gate — lexical in-domain/off-topic classification.
//!
//! The assistant's domain restriction is enforced twice: once in the
//! system prompt (for the model) and once here, deterministically,
//! independent of the model's own compliance. The gate is a pure function
//! of the message text and two fixed lexicons.
//!
//! Matching is case-folded substring matching. That makes false positives
//! possible (a product title containing a blocked stem as a substring) —
//! an accepted limitation of the heuristic, kept cheap on purpose.

/// Off-topic keyword stems, grouped by subject for auditability.
/// Any substring hit classifies the message off-topic immediately.
const OFF_TOPIC_LEXICON: &[(&str, &[&str])] = &[
    (
        "geography",
        &["geography", "capital", "country", "continent", "ocean", "river", "mountain"],
    ),
    (
        "history",
        &["history", "world war", "century", "president", "empire", "ancient"],
    ),
    (
        "math",
        &["math", "calculate", "equation", "formula", "algebra", "geometry"],
    ),
    (
        "science",
        &["physics", "chemistry", "biology", "medicine", "disease", "symptom"],
    ),
    ("cooking", &["cooking", "recipe", "ingredient", "how to cook"]),
    (
        "weather",
        &["weather", "forecast", "temperature", "raining", "sunny", "windy"],
    ),
    (
        "sports",
        &["football", "soccer", "basketball", "tennis", "olympics", "championship"],
    ),
    (
        "entertainment",
        &["movie", "film", "series", "actor", "concert", "song"],
    ),
    (
        "technology",
        &["programming", "coding", "algorithm", "database"],
    ),
    (
        "news",
        &["news", "politics", "election", "government", "politician"],
    ),
    ("religion", &["religion", "church", "bible", "prayer"]),
    (
        "relationships",
        &["girlfriend", "boyfriend", "marriage", "divorce", "dating"],
    ),
];

/// Generic interrogative markers. A message that reads like a question and
/// carries no domain term is classified off-topic.
const QUESTION_WORDS: &[&str] = &["what", "which", "how", "where", "when", "who", "why"];

/// Domain whitelist: any of these rescues a generic question as in-domain.
const DOMAIN_TERMS: &[&str] = &[
    "swapcircle",
    "exchange",
    "swap",
    "change",
    "trade",
    "product",
    "looking for",
    "i need",
    "i have",
];

/// Classify a user message as off-topic for the exchange domain.
///
/// Keyword match takes precedence: a single off-topic stem classifies the
/// message regardless of any surrounding domain words. Otherwise a generic
/// question with no whitelisted domain term is off-topic; everything else
/// is in-domain.
pub fn is_off_topic(message: &str) -> bool {
    let folded = message.to_lowercase();

    if OFF_TOPIC_LEXICON
        .iter()
        .flat_map(|(_, stems)| stems.iter())
        .any(|stem| folded.contains(stem))
    {
        return true;
    }

    let generic_question = QUESTION_WORDS.iter().any(|w| folded.contains(w));
    generic_question && !DOMAIN_TERMS.iter().any(|t| folded.contains(t))
}

/// The subject group of the first matching off-topic stem, for log lines.
pub fn matched_subject(message: &str) -> Option<&'static str> {
    let folded = message.to_lowercase();
    OFF_TOPIC_LEXICON
        .iter()
        .find(|(_, stems)| stems.iter().any(|stem| folded.contains(stem)))
        .map(|(subject, _)| *subject)
}
