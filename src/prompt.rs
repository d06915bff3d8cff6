use rand::Rng;
use rand::seq::IndexedRandom;

pub const FOCUS_AREAS: &[&str] = &[
    "Input validation and unsafe assumptions",
    "Edge-case handling and failure modes",
    "Readability and naming clarity",
    "Runtime and algorithmic efficiency",
    "Security and trust boundaries",
    "Error handling and user impact",
    "Testability and observability",
    "Maintainability and long-term evolution",
];

pub const MOODS: &[&str] = &[
    "You are having a particularly good day and coaching tone is welcome.",
    "You just came out of a frustrating incident review and are extra direct.",
    "You are mentoring a junior developer you genuinely want to help succeed.",
    "You are preparing this feedback for a high-stakes production release review.",
];

pub const FORMATS: &[&str] = &[
    "Use concise bullet points with severity labels.",
    "Use a short narrative summary followed by concrete action items.",
    "Use a scored rubric across correctness, safety, maintainability, and performance.",
    "Use a collaborative dialogue tone with recommendations and tradeoffs.",
];

pub const DIRECTIVES_HEADER: &str = "Dynamic review directives (vary each run):";

// Append randomly chosen review directives to a persona prompt.
// Picks 2 or 3 distinct focus areas, one mood and one output format. The
// caller owns the rng so tests can seed it; production passes `rand::rng()`.
pub fn build_dynamic_system_prompt<R: Rng + ?Sized>(base_prompt: &str, rng: &mut R) -> String {
    let focus_count = if rng.random_bool(0.5) { 2 } else { 3 };
    let focus: Vec<&str> = FOCUS_AREAS
        .choose_multiple(&mut *rng, focus_count)
        .copied()
        .collect();
    // constant tables are never empty
    let mood = MOODS.choose(&mut *rng).copied().unwrap_or(MOODS[0]);
    let format = FORMATS.choose(&mut *rng).copied().unwrap_or(FORMATS[0]);

    format!(
        "{base_prompt}\n\n{DIRECTIVES_HEADER}\n- Focus areas: {}\n- Mood: {mood}\n- Format: {format}",
        focus.join("; ")
    )
}

// User turn sent upstream: instruction plus the fenced code
pub fn review_instruction(code: &str) -> String {
    format!(
        "Please review the following code and provide detailed feedback. For each issue or suggestion, reference the specific line number or code section.\n\nCode to review:\n```\n{code}\n```"
    )
}
