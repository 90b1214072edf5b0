use async_trait::async_trait;
use strum::{Display, EnumIter, IntoEnumIterator};

use crate::engine::BootstrappedGame;
use crate::input::{Prompt, QuestionContext, choose};
use crate::state::{AlchemicalResource, Character, GameState, Inventory};

use super::{ActionError, ActionTransition};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MarketTradeType {
    GoodForGood,
    RubyForGoods,
    GoodsForRuby,
}

/// One fixed-price exchange.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketTrade {
    pub cost: Inventory,
    pub gain: Inventory,
}

impl MarketTrade {
    fn new(cost: Inventory, gain: Inventory) -> Self {
        Self { cost, gain }
    }

    fn is_affordable_by(&self, character: &Character) -> bool {
        self.cost.is_affordable_from(&character.inventory)
    }
}

/// Two units of goods: one pair per resource, then one per mixed pair.
fn goods_bundles() -> Vec<Inventory> {
    use AlchemicalResource::{Honey, Mushroom, Waterlily};
    let doubles = [Honey, Mushroom, Waterlily].map(|r| Inventory::empty().with_alchemy(r, 2));
    let mixed = [(Honey, Mushroom), (Honey, Waterlily), (Mushroom, Waterlily)]
        .map(|(a, b)| Inventory::empty().with_alchemy(a, 1).with_alchemy(b, 1));
    doubles.into_iter().chain(mixed).collect()
}

impl MarketTradeType {
    /// Every trade of this type, in a fixed order.
    pub fn trades(self) -> Vec<MarketTrade> {
        let ruby = || Inventory::empty().with_rubies(1);
        match self {
            MarketTradeType::GoodForGood => {
                let mut trades = Vec::new();
                for give in AlchemicalResource::iter() {
                    for take in AlchemicalResource::iter().filter(|r| *r != give) {
                        trades.push(MarketTrade::new(
                            Inventory::empty().with_alchemy(give, 1),
                            Inventory::empty().with_alchemy(take, 1),
                        ));
                    }
                }
                trades
            }
            MarketTradeType::RubyForGoods => goods_bundles()
                .into_iter()
                .map(|goods| MarketTrade::new(ruby(), goods))
                .collect(),
            MarketTradeType::GoodsForRuby => goods_bundles()
                .into_iter()
                .map(|goods| MarketTrade::new(goods, ruby()))
                .collect(),
        }
    }

    pub fn affordable_trades(self, character: &Character) -> Vec<MarketTrade> {
        self.trades()
            .into_iter()
            .filter(|trade| trade.is_affordable_by(character))
            .collect()
    }
}

fn open_trade_types(character: &Character) -> Vec<MarketTradeType> {
    MarketTradeType::iter()
        .filter(|kind| !kind.affordable_trades(character).is_empty())
        .collect()
}

/// Trades at the market until the controller leaves or nothing is affordable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MarketAction;

#[async_trait]
impl ActionTransition for MarketAction {
    fn pre_validate(&self, game: &BootstrappedGame) -> Result<(), ActionError> {
        if open_trade_types(&game.state.character).is_empty() {
            return Err(ActionError::NoCandidates);
        }
        Ok(())
    }

    async fn apply(&self, game: &BootstrappedGame) -> Result<GameState, ActionError> {
        let player = game.player();
        let mut keys = game.sub_keys();
        let mut character = game.state.character.clone();
        let mut completed = 0usize;

        loop {
            let open = open_trade_types(&character);
            if open.is_empty() {
                break;
            }
            // Leaving is always the first option.
            let options: Vec<Option<MarketTradeType>> =
                std::iter::once(None).chain(open.into_iter().map(Some)).collect();
            let prompt = Prompt::question(QuestionContext::MarketTradeType, keys.next_key());
            let Some(kind) = choose(player, &prompt, &options).await? else {
                break;
            };

            let trades = kind.affordable_trades(&character);
            let prompt = Prompt::question(QuestionContext::MarketTrade, keys.next_key());
            let trade = choose(player, &prompt, &trades).await?;
            character = character.trade_items(&trade.cost, &trade.gain)?;
            completed += 1;
        }

        if completed == 0 {
            return Err(ActionError::NothingToDo);
        }
        Ok(game.state.with_character(character))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_trades_per_type() {
        for kind in MarketTradeType::iter() {
            assert_eq!(kind.trades().len(), 6, "{kind}");
        }
    }

    #[test]
    fn goods_for_ruby_mirrors_ruby_for_goods() {
        let buy = MarketTradeType::RubyForGoods.trades();
        let sell = MarketTradeType::GoodsForRuby.trades();
        for (b, s) in buy.iter().zip(&sell) {
            assert_eq!(b.cost, s.gain);
            assert_eq!(b.gain, s.cost);
        }
    }

    #[test]
    fn only_affordable_types_are_open() {
        let broke = Character::new().with_inventory(Inventory::empty());
        assert!(open_trade_types(&broke).is_empty());

        let rubies_only = Character::new();
        assert_eq!(
            open_trade_types(&rubies_only),
            vec![MarketTradeType::RubyForGoods]
        );

        let honey = Character::new()
            .with_inventory(Inventory::empty().with_alchemy(AlchemicalResource::Honey, 1));
        assert_eq!(
            open_trade_types(&honey),
            vec![MarketTradeType::GoodForGood]
        );
        assert_eq!(
            MarketTradeType::GoodForGood
                .affordable_trades(&honey)
                .len(),
            2
        );
    }
}
