//! Event dispatch registry
//!
//! Subscribers register per [`EventKind`] (or for every kind) and are called with the
//! event, the whole run it belongs to and its index in that run. The run is walked
//! strictly in order and each event is fully dispatched before the next one starts.

use crate::server::{BattleEvent, EventKind};

type Callback<C, E> = Box<dyn FnMut(&mut C, &BattleEvent, &[BattleEvent], usize) -> Result<(), E> + Send>;

/// Maps event kinds to ordered subscriber lists
pub struct EventRegistry<C, E> {
    /// (None = every kind, callback) in registration order
    subscribers: Vec<(Option<EventKind>, Callback<C, E>)>,
}

impl<C, E> Default for EventRegistry<C, E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }
}

impl<C, E> EventRegistry<C, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to a single event kind
    pub fn on<F>(&mut self, kind: EventKind, callback: F) -> &mut Self
    where
        F: FnMut(&mut C, &BattleEvent, &[BattleEvent], usize) -> Result<(), E> + Send + 'static,
    {
        self.subscribers.push((Some(kind), Box::new(callback)));
        self
    }

    /// Subscribe to every event kind
    pub fn on_any<F>(&mut self, callback: F) -> &mut Self
    where
        F: FnMut(&mut C, &BattleEvent, &[BattleEvent], usize) -> Result<(), E> + Send + 'static,
    {
        self.subscribers.push((None, Box::new(callback)));
        self
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }

    /// Dispatch a single event of `run`
    pub fn dispatch(&mut self, ctx: &mut C, run: &[BattleEvent], index: usize) -> Result<(), E> {
        let Some(event) = run.get(index) else {
            return Ok(());
        };
        let kind = event.kind();

        for (filter, callback) in &mut self.subscribers {
            if filter.is_none_or(|k| k == kind) {
                callback(ctx, event, run, index)?;
            }
        }
        Ok(())
    }

    /// Dispatch every event of `run` in arrival order, stopping at the first error
    pub fn dispatch_run(&mut self, ctx: &mut C, run: &[BattleEvent]) -> Result<(), E> {
        for index in 0..run.len() {
            self.dispatch(ctx, run, index)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_event_line;

    fn run() -> Vec<BattleEvent> {
        [
            "|move|p1a: Sparky|Thunderbolt|p2a: Gyarados",
            "|-damage|p2a: Gyarados|10/100",
            "|faint|p2a: Gyarados",
            "|upkeep",
        ]
        .iter()
        .filter_map(|line| parse_event_line(line))
        .collect()
    }

    #[test]
    fn test_dispatch_order() {
        let mut registry: EventRegistry<Vec<String>, ()> = EventRegistry::new();
        registry
            .on(EventKind::Damage, |log, _, _, index| {
                log.push(format!("damage-a {}", index));
                Ok(())
            })
            .on_any(|log, event, _, index| {
                log.push(format!("any {:?} {}", event.kind(), index));
                Ok(())
            })
            .on(EventKind::Damage, |log, _, _, index| {
                log.push(format!("damage-b {}", index));
                Ok(())
            });

        let mut log = Vec::new();
        registry.dispatch_run(&mut log, &run()).unwrap();

        assert_eq!(
            log,
            vec![
                "any Move 0",
                "damage-a 1",
                "any Damage 1",
                "damage-b 1",
                "any Faint 2",
                "any Upkeep 3",
            ]
        );
    }

    #[test]
    fn test_callback_sees_previous_event() {
        let mut registry: EventRegistry<Vec<EventKind>, ()> = EventRegistry::new();
        registry.on(EventKind::Faint, |seen, _, run, index| {
            seen.push(run[index - 1].kind());
            Ok(())
        });

        let mut seen = Vec::new();
        registry.dispatch_run(&mut seen, &run()).unwrap();
        assert_eq!(seen, vec![EventKind::Damage]);
    }

    #[test]
    fn test_dispatch_stops_on_error() {
        let mut registry: EventRegistry<usize, String> = EventRegistry::new();
        registry.on_any(|count, event, _, _| {
            *count += 1;
            match event.kind() {
                EventKind::Damage => Err("desync".to_string()),
                _ => Ok(()),
            }
        });

        let mut count = 0;
        let result = registry.dispatch_run(&mut count, &run());
        assert_eq!(result, Err("desync".to_string()));
        assert_eq!(count, 2);
    }
}
