use async_trait::async_trait;

use super::{
    Input, InputError, Player, Prompt, PromptContext, QuestionContext, RerollDecision,
    ShowContext, Shown, choose,
};

/// Lets the controller veto each random draw once.
///
/// For a prompt keyed `k` the source draws a candidate under `[k,0]`, the
/// controller is asked to keep or reroll it under `k`, and a reroll draws
/// again under `[k,1]` and shows the replacement to the controller. List
/// draws go through the same flow over indices.
pub struct RerollInput<'a> {
    source: &'a dyn Input,
    controller: &'a dyn Player,
}

impl<'a> RerollInput<'a> {
    pub fn new(source: &'a dyn Input, controller: &'a dyn Player) -> Self {
        Self { source, controller }
    }
}

#[async_trait]
impl Input for RerollInput<'_> {
    async fn choose_from_range(
        &self,
        prompt: &Prompt,
        lo: u32,
        hi: u32,
    ) -> Result<u32, InputError> {
        let PromptContext::Rng(draw) = prompt.context else {
            return self.source.choose_from_range(prompt, lo, hi).await;
        };

        let candidate = self.source.choose_from_range(&prompt.sub(0), lo, hi).await?;
        let question = Prompt::question(
            QuestionContext::KeepOrReroll { draw, candidate },
            prompt.key.clone(),
        );
        match choose(self.controller, &question, &RerollDecision::ALL).await? {
            RerollDecision::Keep => Ok(candidate),
            RerollDecision::Reroll => {
                let rerolled = prompt.sub(1);
                let value = self.source.choose_from_range(&rerolled, lo, hi).await?;
                self.controller.show(
                    &Prompt::show(ShowContext::Rerolled(draw), rerolled.key),
                    &Shown::Number(value),
                );
                Ok(value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::testing::ScriptedInput;
    use crate::input::{Choice, PromptKey, RngContext};

    fn barrel_prompt() -> Prompt {
        Prompt::rng(RngContext::CaveBarrel1, PromptKey::pair(5, 0))
    }

    #[tokio::test]
    async fn keep_returns_first_candidate() {
        let source = ScriptedInput::new([2, 0]);
        let controller = ScriptedInput::new([0]);
        let reroll = RerollInput::new(&source, &controller);

        let value = reroll.choose_from_range(&barrel_prompt(), 0, 2).await.unwrap();
        assert_eq!(value, 2);
        assert_eq!(source.asked_keys(), vec!["[[5,0],0]"]);
        assert_eq!(controller.asked_keys(), vec!["[5,0]"]);
        assert!(controller.shown.lock().unwrap().is_empty());

        let asked = controller.asked.lock().unwrap();
        assert_eq!(
            asked[0].context,
            PromptContext::Question(QuestionContext::KeepOrReroll {
                draw: RngContext::CaveBarrel1,
                candidate: 2,
            })
        );
    }

    #[tokio::test]
    async fn reroll_draws_again_and_shows_replacement() {
        let source = ScriptedInput::new([2, 1]);
        let controller = ScriptedInput::new([1]);
        let reroll = RerollInput::new(&source, &controller);

        let value = reroll.choose_from_range(&barrel_prompt(), 0, 2).await.unwrap();
        assert_eq!(value, 1);
        assert_eq!(source.asked_keys(), vec!["[[5,0],0]", "[[5,0],1]"]);

        let shown = controller.shown.lock().unwrap();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].0.key.as_str(), "[[5,0],1]");
        assert_eq!(
            shown[0].0.context,
            PromptContext::Show(ShowContext::Rerolled(RngContext::CaveBarrel1))
        );
        assert_eq!(shown[0].1, Shown::Number(1));
    }

    #[tokio::test]
    async fn list_draws_use_the_same_protocol() {
        let source = ScriptedInput::new([1]);
        let controller = ScriptedInput::new([0]);
        let reroll = RerollInput::new(&source, &controller);
        let options = vec![Choice::Recipe(0), Choice::Recipe(1)];

        let idx = reroll
            .choose_from_list(&barrel_prompt(), &options)
            .await
            .unwrap();
        assert_eq!(idx, 1);
        assert_eq!(controller.asked_keys(), vec!["[5,0]"]);
    }

    #[tokio::test]
    async fn questions_pass_through_untouched() {
        let source = ScriptedInput::new([3]);
        let controller = ScriptedInput::new([]);
        let reroll = RerollInput::new(&source, &controller);
        let prompt = Prompt::question(QuestionContext::CaveExit, PromptKey::pair(2, 1));

        assert_eq!(reroll.choose_from_range(&prompt, 0, 5).await.unwrap(), 3);
        assert_eq!(source.asked_keys(), vec!["[2,1]"]);
        assert!(controller.asked.lock().unwrap().is_empty());
    }
}
