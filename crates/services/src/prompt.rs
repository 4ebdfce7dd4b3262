use rand::Rng;

/// Fixed topic pool the coach draws from, one topic per passage.
pub const TOPICS: [&str; 10] = [
    "renewable energy",
    "space exploration",
    "artificial intelligence",
    "climate change",
    "urban planning",
    "digital education",
    "genetic engineering",
    "global trade",
    "public transportation",
    "sustainable farming",
];

/// Pick a topic uniformly at random.
#[must_use]
pub fn pick_topic<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    TOPICS[rng.random_range(0..TOPICS.len())]
}

/// Fixed prompt template for one passage request.
///
/// The response format it asks for is what `parse_passage_response` expects;
/// anything the model returns outside that shape is handled by the parser's
/// tolerance, not retried.
#[must_use]
pub fn build_prompt(topic: &str) -> String {
    format!(
        "You are an IELTS reading tutor. Generate a Band 6-7 IELTS-style academic \
reading passage (~150 words) about: {topic}.
Then create 3 True/False/Not Given questions with answers.
Return the result in this format:

Passage:
<text>

Questions:
1. <text> Answer: <True/False/Not Given>
2. <text> Answer: <True/False/Not Given>
3. <text> Answer: <True/False/Not Given>"
    )
}
