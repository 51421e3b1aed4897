//! In-memory `TextGenerator` that plays back a fixed script of replies.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{LlmError, TextGenerator};

pub enum ScriptedReply {
    Text(String),
    RateLimited,
    ServerError,
}

impl ScriptedReply {
    pub fn text(text: impl Into<String>) -> Self {
        ScriptedReply::Text(text.into())
    }
}

pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<ScriptedReply>>,
    prompts: Mutex<Vec<String>>,
    calls: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<ScriptedReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        }
    }

    /// No replies queued; every call fails with a 500.
    pub fn silent() -> Self {
        Self::new(Vec::new())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        match self.replies.lock().unwrap().pop_front() {
            Some(ScriptedReply::Text(text)) => Ok(text),
            Some(ScriptedReply::RateLimited) => Err(LlmError::RateLimited {
                message: "Resource has been exhausted".to_string(),
            }),
            Some(ScriptedReply::ServerError) => Err(LlmError::Api {
                status: 503,
                message: "Service Unavailable".to_string(),
            }),
            None => Err(LlmError::Api {
                status: 500,
                message: "scripted generator has no replies left".to_string(),
            }),
        }
    }
}
