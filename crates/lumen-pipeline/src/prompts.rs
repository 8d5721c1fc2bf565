//! Prompt templates for the LLM-backed analyzers.
//!
//! Each helper formats the user's text into a fixed template that asks
//! the model for structured JSON matching the report types in
//! `lumen-core`.

/// Formats the ambiguity-detection prompt.
pub fn ambiguity_prompt(text: &str) -> String {
    format!(
        r#"Analyze if the following user prompt is ambiguous or too vague.

A prompt is ambiguous if:
- It lacks specific domain context (e.g., "explain models" without specifying what kind)
- It uses vague terms without clarification
- It could have multiple very different interpretations
- It's too short to understand the user's actual intent

User Prompt: "{text}"

Respond in JSON format:
{{
    "is_ambiguous": true/false,
    "reason": "brief explanation of why it is or isn't ambiguous",
    "clarification_needed": "what clarification would help (empty string if not ambiguous)"
}}"#
    )
}

/// Formats the context-need detection prompt.
pub fn context_prompt(text: &str) -> String {
    format!(
        r#"Analyze if the following user prompt requires previous conversation context to be understood.

A prompt needs context if:
- It uses pronouns referring to something not mentioned (it, this, that, them)
- It references "previous", "above", "earlier", "the last one"
- It's a continuation command (continue, add more, modify, update, fix it)
- It would be incomplete without knowing what came before

User Prompt: "{text}"

Respond in JSON format:
{{
    "needs_context": true/false,
    "reason": "brief explanation"
}}"#
    )
}

/// Formats the intent-detection prompt.
pub fn intent_prompt(text: &str) -> String {
    format!(
        r#"Analyze the following user prompt to detect intents and generate instructions.

Possible intent categories:
- explanation: User wants something explained or described
- comparison: User wants items compared or contrasted
- coding: User wants code written or programming help
- analysis: User wants analytical evaluation with pros/cons
- creative: User wants creative content (stories, poems, etc.)
- tutorial: User wants step-by-step guidance
- summarization: User wants content summarized
- research: User wants information gathered
- problem_solving: User wants help solving a problem
- question: User is asking a question
- instruction: User wants something created or modified
- general: No specific intent applies

User Prompt: "{text}"

Respond in JSON format:
{{
    "intents": ["intent1", "intent2", ...],
    "primary_intent": "the most important intent",
    "instructions": ["specific instruction 1 for optimal response", "instruction 2", ...]
}}

The instructions should tell an AI how to best respond to this prompt."#
    )
}

/// Formats the quality-scoring prompt.
pub fn score_prompt(text: &str) -> String {
    format!(
        r#"Score the following user prompt on three criteria, each as an integer from 0 to 5:
- clarity: how clear and actionable the prompt is
- specificity: how specific and detailed the prompt is
- structure: how well-formatted and organized the prompt is

User Prompt: "{text}"

Respond in JSON format:
{{
    "clarity": 0-5,
    "specificity": 0-5,
    "structure": 0-5,
    "total_score": "sum of the three scores"
}}"#
    )
}

/// Formats the decomposition prompt.
pub fn decompose_prompt(text: &str) -> String {
    format!(
        r#"Split the following user prompt into self-contained, logically ordered sub-tasks.

Rules:
- Keep comparison phrasing together as ONE sub-task (do not split "compare X and Y")
- Do not over-split simple requests; a single-task prompt yields a single sub-task
- Each sub-task must be understandable on its own

User Prompt: "{text}"

Respond in JSON format:
{{
    "subtasks": ["sub-task 1", "sub-task 2", ...]
}}"#
    )
}

/// Formats the single-sentence rewrite instruction.
pub fn rewrite_instruction(text: &str) -> String {
    format!(
        "Rewrite the following user request into ONE clear, concise sentence \
         that preserves the original tasks and does NOT add extra explanation, examples, or structure. \
         Do NOT expand the request. Do NOT split into multiple parts. \
         Output only the improved single-sentence request:\n\n{text}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_embed_the_text() {
        let text = "Explain CNN and compare with RNN";
        for rendered in [
            ambiguity_prompt(text),
            context_prompt(text),
            intent_prompt(text),
            score_prompt(text),
            decompose_prompt(text),
            rewrite_instruction(text),
        ] {
            assert!(rendered.contains(text));
        }
    }

    #[test]
    fn test_json_templates_request_json() {
        for rendered in [
            ambiguity_prompt("x"),
            context_prompt("x"),
            intent_prompt("x"),
            score_prompt("x"),
            decompose_prompt("x"),
        ] {
            assert!(rendered.contains("Respond in JSON format"));
        }
    }
}
