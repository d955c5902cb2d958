//! Prompt templates for generated posts.

use botfield_agents::agent::Agent;
use botfield_core::types::{Post, Voice};

/// A prompt template for generator requests.
pub trait PromptTemplate {
    /// Generate the prompt text.
    fn generate(&self) -> String;
}

/// Formatting rules appended to every post prompt.
const RULES: &str = "\
Rules:
- Keep it to one or two sentences.
- Do not use emojis.
- Do not use hashtags.
- Do not add meta-commentary, explanations, or introductions.
- Do not wrap the text in quotation marks.
- Output only the post text.";

/// Prompt asking a persona for a fresh post or a reply.
#[derive(Debug, Clone)]
pub struct PostPrompt {
    /// Persona name.
    pub name: String,
    /// Persona voice.
    pub voice: Voice,
    /// Content being replied to, if any.
    pub reply_to: Option<String>,
}

impl PostPrompt {
    /// Create a prompt for writing a fresh post.
    pub fn new(name: impl Into<String>, voice: Voice) -> Self {
        Self {
            name: name.into(),
            voice,
            reply_to: None,
        }
    }

    /// Build the prompt for `agent`, replying to the newest post in
    /// `context` when there is one.
    pub fn for_agent(agent: &Agent, context: &[Post]) -> Self {
        let prompt = Self::new(agent.name(), agent.voice());
        match context.first() {
            Some(post) => prompt.replying_to(post.content.clone()),
            None => prompt,
        }
    }

    /// Frame the prompt as a reply.
    pub fn replying_to(mut self, content: impl Into<String>) -> Self {
        self.reply_to = Some(content.into());
        self
    }

    pub fn is_reply(&self) -> bool {
        self.reply_to.is_some()
    }
}

impl PromptTemplate for PostPrompt {
    fn generate(&self) -> String {
        let persona = format!(
            "You are {}.\nYour personality type is: {}.",
            self.name, self.voice
        );

        match &self.reply_to {
            Some(content) => format!(
                "{persona}\n\nReply to this post:\n---\n{content}\n---\n\n\
                 Write a short, natural reply in your own voice.\n{RULES}"
            ),
            None => format!(
                "{persona}\n\nWrite one short, calm, natural social post.\n{RULES}"
            ),
        }
    }
}
