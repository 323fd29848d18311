//! Prompt templates for the screen-aware assistant

use super::context::ScreenContext;

/// Placeholder used when no screen text was supplied
pub const NO_SCREEN_CONTENT: &str = "No screen content available";

/// Templates for generating assistant prompts
pub struct PromptTemplate;

impl PromptTemplate {
    /// System prompt for context-aware questions
    pub fn screen_assistant_system() -> &'static str {
        "You are a helpful, UI-aware AI assistant that guides users through software demos. \
You can see what's on their screen and provide contextual help."
    }

    /// User prompt embedding the (already budgeted) screen text and question
    pub fn screen_question(context: &ScreenContext, user_input: &str) -> String {
        let screen = if context.is_empty() {
            NO_SCREEN_CONTENT
        } else {
            context.text()
        };

        format!(
            r#"You are an intelligent AI demo agent helping users interact with a SaaS product UI. You can see what's currently displayed on their screen and should provide helpful, contextual guidance.

CURRENT SCREEN CONTENT:
---
{screen}
---

USER QUESTION/COMMAND: "{user_input}"

INSTRUCTIONS:
1. Analyze the visible screen content to understand the current context
2. Provide a helpful, specific response that guides the user
3. If the user asks about features not visible, suggest how to navigate to them
4. Be conversational but professional
5. If you can identify specific UI elements, mention them by name
6. Keep responses concise but informative

RESPONSE FORMAT:
Provide a natural, helpful response that addresses the user's question based on what's visible on screen."#
        )
    }
}
