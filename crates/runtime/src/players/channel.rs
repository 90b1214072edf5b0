use async_trait::async_trait;
use tokio::sync::mpsc;

use hexalchemy_core::{Choice, Input, InputError, Output, Prompt, Shown, input::check_range};

use crate::api::{PendingPrompt, PromptRequest};
use crate::events::{EventBus, PromptEvent};

/// Hands every question to the client as a [`PendingPrompt`] and waits for
/// the reply. Notifications go to the event bus.
#[derive(Clone)]
pub struct ChannelPlayer {
    prompts: mpsc::Sender<PendingPrompt>,
    events: EventBus,
}

impl ChannelPlayer {
    pub fn new(prompts: mpsc::Sender<PendingPrompt>, events: EventBus) -> Self {
        Self { prompts, events }
    }

    /// Asks until the client gives an answer inside the request's bounds.
    async fn ask(&self, prompt: &Prompt, request: PromptRequest) -> Result<u32, InputError> {
        let cancelled = || InputError::Cancelled {
            key: prompt.key.clone(),
        };
        let (lo, hi) = request.bounds();

        loop {
            let (pending, reply) = PendingPrompt::new(prompt.clone(), request.clone());
            self.events.publish(PromptEvent::Asked {
                prompt: prompt.clone(),
                request: request.clone(),
            });
            self.prompts.send(pending).await.map_err(|_| cancelled())?;

            let answer = reply.await.map_err(|_| cancelled())?;
            match check_range(answer, lo, hi) {
                Ok(answer) => return Ok(answer),
                Err(error) => tracing::warn!(
                    target: "runtime::player",
                    key = %prompt.key,
                    error = %error,
                    "answer rejected, asking again"
                ),
            }
        }
    }
}

#[async_trait]
impl Input for ChannelPlayer {
    async fn choose_from_range(
        &self,
        prompt: &Prompt,
        lo: u32,
        hi: u32,
    ) -> Result<u32, InputError> {
        if hi < lo {
            return Err(InputError::EmptyRange { lo, hi });
        }
        self.ask(prompt, PromptRequest::Range { lo, hi }).await
    }

    async fn choose_from_list(
        &self,
        prompt: &Prompt,
        options: &[Choice],
    ) -> Result<usize, InputError> {
        if options.is_empty() {
            return Err(InputError::EmptyChoice);
        }
        let idx = self
            .ask(prompt, PromptRequest::Options(options.to_vec()))
            .await?;
        Ok(idx as usize)
    }
}

impl Output for ChannelPlayer {
    fn show(&self, prompt: &Prompt, value: &Shown) {
        self.events.publish(PromptEvent::Shown {
            prompt: prompt.clone(),
            value: value.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexalchemy_core::{PromptKey, QuestionContext};

    fn prompt() -> Prompt {
        Prompt::question(QuestionContext::ChooseAction, PromptKey::root(5))
    }

    #[tokio::test]
    async fn out_of_range_answers_are_asked_again() {
        let (tx, mut rx) = mpsc::channel(4);
        let player = ChannelPlayer::new(tx, EventBus::default());

        let client = tokio::spawn(async move {
            let first = rx.recv().await.unwrap();
            assert_eq!(first.request, PromptRequest::Range { lo: 2, hi: 4 });
            first.answer(9).unwrap();
            let second = rx.recv().await.unwrap();
            second.answer(3).unwrap();
        });

        assert_eq!(player.choose_from_range(&prompt(), 2, 4).await, Ok(3));
        client.await.unwrap();
    }

    #[tokio::test]
    async fn dropped_question_cancels_the_prompt() {
        let (tx, mut rx) = mpsc::channel(4);
        let player = ChannelPlayer::new(tx, EventBus::default());

        let client = tokio::spawn(async move {
            drop(rx.recv().await.unwrap());
        });

        assert_eq!(
            player
                .choose_from_list(&prompt(), &[Choice::Recipe(0), Choice::Recipe(1)])
                .await,
            Err(InputError::Cancelled {
                key: PromptKey::root(5)
            })
        );
        client.await.unwrap();
    }

    #[tokio::test]
    async fn closed_channel_cancels_the_prompt() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        let player = ChannelPlayer::new(tx, EventBus::default());
        assert!(matches!(
            player.choose_from_range(&prompt(), 0, 1).await,
            Err(InputError::Cancelled { .. })
        ));
    }
}
