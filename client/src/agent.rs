use anyhow::Result;
use async_trait::async_trait;
use psbot_battle::Choice;

/// The decision-making side of a battle.
///
/// The driver calls [`decide`](BattleAgent::decide) once per request that needs an
/// answer, with the encoded belief state and every legal choice. No protocol input is
/// processed until it returns, so an agent may take as long as it needs (a model
/// server, a search) unless the driver is configured with a decision timeout.
///
/// # Example
///
/// ```ignore
/// struct Cautious;
///
/// #[async_trait]
/// impl BattleAgent for Cautious {
///     async fn decide(&mut self, _features: &[f64], choices: &[Choice]) -> Result<Choice> {
///         Ok(*choices.last().unwrap())
///     }
/// }
/// ```
#[async_trait]
pub trait BattleAgent: Send {
    /// Pick one of `choices`. Returning anything else is an error.
    async fn decide(&mut self, features: &[f64], choices: &[Choice]) -> Result<Choice>;
}

/// Always takes the first legal choice
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstLegal;

#[async_trait]
impl BattleAgent for FirstLegal {
    async fn decide(&mut self, _features: &[f64], choices: &[Choice]) -> Result<Choice> {
        choices
            .first()
            .copied()
            .ok_or_else(|| anyhow::anyhow!("No legal choices"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_first_legal() {
        let mut agent = FirstLegal;
        let choices = [Choice::Switch(3), Choice::Move(1)];
        assert_eq!(agent.decide(&[], &choices).await.unwrap(), Choice::Switch(3));
        assert!(agent.decide(&[], &[]).await.is_err());
    }
}
