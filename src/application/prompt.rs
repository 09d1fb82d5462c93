//! Prompt composition for strategy generation.

use crate::domain::preferences::Preferences;

pub const DEFAULT_INDUSTRY: &str = "Open to best opportunity";
pub const DEFAULT_TARGET_AUDIENCE: &str = "Undefined (Find the most painful gap)";
pub const DEFAULT_SKILLS: &str = "Generalist";
pub const DEFAULT_INITIAL_IDEA: &str = "Totally open";

const ROLE: &str = "\
You are a world-class Product Strategist and Venture Capital analyst.
Your goal is to discover a \"Blue Ocean\" digital product opportunity: a product with high demand but low current competition.";

const TASK: &str = "\
Task:
1. **Identify a Unique Digital Product Idea:** It must be innovative, scalable, and address a specific, urgent pain point.
2. **Develop a Detailed Business Plan:** Include Value Proposition, Revenue Model, Go-to-Market Strategy, and Competitor Analysis (why it's low competition).
3. **Create a Detailed \"Cahier des Charges\" (Requirements Specification):**
   * Functional Requirements (Core features for MVP).
   * Non-Functional Requirements (Security, Performance, Scalability).
   * User Roles & Journeys.
   * Tech Stack Recommendation (No code generation, just architecture).";

const CONSTRAINTS: &str = "\
Constraints:
* DO NOT write code. Focus entirely on the Strategy, Business Plan, and Specifications.
* The idea MUST be unique and not a generic clone of existing popular apps.
* Use deep reasoning to validate the \"Low Competition\" claim.";

/// Build the strategy prompt for the supplied preferences.
///
/// Present fields are interpolated verbatim; absent or empty ones fall back to
/// the default phrasing so the model knows it has a free hand.
pub fn build_strategy_prompt(preferences: &Preferences) -> String {
    let context = [
        context_line(
            "Preferred Industry",
            "Industry",
            preferences.industry(),
            DEFAULT_INDUSTRY,
        ),
        context_line(
            "Target Audience",
            "Target Audience",
            preferences.target_audience(),
            DEFAULT_TARGET_AUDIENCE,
        ),
        context_line(
            "Founder Skills/Assets",
            "Skills",
            preferences.skills(),
            DEFAULT_SKILLS,
        ),
        context_line(
            "Initial Concept Seed",
            "Concept",
            preferences.initial_idea(),
            DEFAULT_INITIAL_IDEA,
        ),
    ]
    .join("\n");

    format!("{ROLE}\n\nUser Context:\n{context}\n\n{TASK}\n\n{CONSTRAINTS}\n")
}

fn context_line(
    label: &str,
    default_label: &str,
    value: Option<&str>,
    default_value: &str,
) -> String {
    match value {
        Some(value) => format!("- {label}: {value}"),
        None => format!("- {default_label}: {default_value}"),
    }
}
