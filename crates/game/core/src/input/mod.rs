//! Capability interface through which the rules obtain every decision.
//!
//! Random draws and player choices share one shape: the rules hand over a
//! keyed [`Prompt`] and await an answer. The RNG ([`Prng`]), the
//! keep-or-reroll decorator ([`RerollInput`]), replay from a recording
//! ([`RecordedInput`]) and a human controller are all interchangeable behind
//! [`Input`].
mod prng;
mod prompt;
mod recorded;
mod reroll;

pub use prng::{PcgStream, Prng, PrngState};
pub use prompt::{
    Choice, Prompt, PromptContext, PromptKey, QuestionContext, RerollDecision, RngContext,
    ShowContext, Shown,
};
pub use recorded::RecordedInput;
pub use reroll::RerollInput;

use async_trait::async_trait;

use crate::error::{ErrorSeverity, GameError};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputError {
    #[error("cannot draw from empty range [{lo}, {hi}]")]
    EmptyRange { lo: u32, hi: u32 },

    #[error("cannot choose from an empty list")]
    EmptyChoice,

    #[error("answer {answer} is outside [{lo}, {hi}]")]
    OutOfRange { answer: u32, lo: u32, hi: u32 },

    #[error("prompt {key} was abandoned before it was answered")]
    Cancelled { key: PromptKey },
}

impl GameError for InputError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EmptyChoice => ErrorSeverity::Recoverable,
            Self::OutOfRange { .. } => ErrorSeverity::Validation,
            Self::EmptyRange { .. } | Self::Cancelled { .. } => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyRange { .. } => "input_empty_range",
            Self::EmptyChoice => "input_empty_choice",
            Self::OutOfRange { .. } => "input_out_of_range",
            Self::Cancelled { .. } => "input_cancelled",
        }
    }
}

/// Source of answers for keyed prompts.
#[async_trait]
pub trait Input: Send + Sync {
    /// Picks a value in `[lo, hi]`.
    async fn choose_from_range(&self, prompt: &Prompt, lo: u32, hi: u32)
    -> Result<u32, InputError>;

    /// Picks an index into `options`.
    ///
    /// The default draws an index through [`Input::choose_from_range`], so
    /// implementations that do not care about the options share one flow.
    async fn choose_from_list(
        &self,
        prompt: &Prompt,
        options: &[Choice],
    ) -> Result<usize, InputError> {
        let last = last_index(options)?;
        let idx = self.choose_from_range(prompt, 0, last).await?;
        Ok(idx as usize)
    }
}

/// Sink for notifications. Never suspends.
pub trait Output: Send + Sync {
    fn show(&self, prompt: &Prompt, value: &Shown);
}

/// A controller: answers questions and receives notifications.
pub trait Player: Input + Output {}

impl<T: Input + Output + ?Sized> Player for T {}

/// Highest valid index of `options`.
pub fn last_index(options: &[Choice]) -> Result<u32, InputError> {
    match options.len() {
        0 => Err(InputError::EmptyChoice),
        len => u32::try_from(len - 1).map_err(|_| InputError::OutOfRange {
            answer: u32::MAX,
            lo: 0,
            hi: u32::MAX,
        }),
    }
}

/// Fails unless `answer` lies in `[lo, hi]`.
pub fn check_range(answer: u32, lo: u32, hi: u32) -> Result<u32, InputError> {
    if (lo..=hi).contains(&answer) {
        Ok(answer)
    } else {
        Err(InputError::OutOfRange { answer, lo, hi })
    }
}

/// Asks `input` to pick one of `items` and returns the picked item.
pub async fn choose<I, T>(input: &I, prompt: &Prompt, items: &[T]) -> Result<T, InputError>
where
    I: Input + ?Sized,
    T: Clone + Into<Choice> + Send + Sync,
{
    let options: Vec<Choice> = items.iter().cloned().map(Into::into).collect();
    let hi = last_index(&options)?;
    let idx = input.choose_from_list(prompt, &options).await?;
    items
        .get(idx)
        .cloned()
        .ok_or(InputError::OutOfRange {
            answer: u32::try_from(idx).unwrap_or(u32::MAX),
            lo: 0,
            hi,
        })
}

/// Draws one element and returns it with the remaining elements.
///
/// `rest` keeps the relative order of the elements that were not drawn, so
/// repeated draws from the same pool within one step are reproducible.
pub async fn choose_without_replacement<I, T>(
    input: &I,
    prompt: &Prompt,
    items: &[T],
) -> Result<(T, Vec<T>), InputError>
where
    I: Input + ?Sized,
    T: Clone + Send + Sync,
{
    if items.is_empty() {
        return Err(InputError::EmptyChoice);
    }
    let hi = u32::try_from(items.len() - 1).unwrap_or(u32::MAX);
    let idx = input.choose_from_range(prompt, 0, hi).await? as usize;
    let mut rest = items.to_vec();
    if idx >= rest.len() {
        return Err(InputError::OutOfRange {
            answer: idx as u32,
            lo: 0,
            hi,
        });
    }
    let chosen = rest.remove(idx);
    Ok((chosen, rest))
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedInput;
    use super::*;
    use crate::state::Dialect;

    fn prompt() -> Prompt {
        Prompt::question(QuestionContext::MerchantTradeFor, PromptKey::root(1))
    }

    #[tokio::test]
    async fn choose_maps_index_back_to_item() {
        let input = ScriptedInput::new([2]);
        let picked = choose(
            &input,
            &prompt(),
            &[Dialect::Bird, Dialect::Fish, Dialect::Mouse],
        )
        .await
        .unwrap();
        assert_eq!(picked, Dialect::Mouse);
    }

    #[tokio::test]
    async fn choose_rejects_empty_lists() {
        let input = ScriptedInput::new([]);
        let items: [Dialect; 0] = [];
        assert_eq!(
            choose(&input, &prompt(), &items).await,
            Err(InputError::EmptyChoice)
        );
        assert!(input.asked.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn without_replacement_preserves_order_of_rest() {
        let input = ScriptedInput::new([1]);
        let (chosen, rest) = choose_without_replacement(&input, &prompt(), &[1, 2, 3, 4])
            .await
            .unwrap();
        assert_eq!(chosen, 2);
        assert_eq!(rest, vec![1, 3, 4]);
    }

    #[tokio::test]
    async fn out_of_range_answers_are_rejected() {
        let input = ScriptedInput::new([9]);
        assert_eq!(
            input.choose_from_range(&prompt(), 0, 3).await,
            Err(InputError::OutOfRange {
                answer: 9,
                lo: 0,
                hi: 3
            })
        );
    }
}
