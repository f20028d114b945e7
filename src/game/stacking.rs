//! Battlefield stacking: placing cards under a host and taking them back out
//!
//! Stack children are plain [`CardInstance`](crate::core::CardInstance)s, so
//! a child cannot carry a stack of its own; depth is capped at one level by
//! construction. The checks here cover the remaining rules: no self-stacking,
//! no stacking a host that already has children, and no stacking onto a card
//! that is itself a child.

use crate::core::{InstanceId, Position};
use crate::zones::{Battlefield, BattlefieldEntry, Zone};
use crate::{PlaymatError, Result};

/// Result of a successful `stack` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackOutcome {
    /// The child now sits on top of `host`'s stack
    Stacked { host: InstanceId, stack_len: usize },
    /// Child and target were the same card; nothing moved
    SelfStack,
}

impl Battlefield {
    /// Place `child`'s entry on top of `target`'s stack
    pub fn stack(&mut self, child: InstanceId, target: InstanceId) -> Result<StackOutcome> {
        self.require_top_level(target, "stack onto")?;
        if child == target {
            return Ok(StackOutcome::SelfStack);
        }
        self.require_top_level(child, "stack")?;

        let host_tapped = match self.entry(target) {
            Some(entry) => entry.card.tapped,
            None => return Err(PlaymatError::not_found(target, Zone::Battlefield)),
        };
        if self.entry(child).map(BattlefieldEntry::has_stack).unwrap_or(false) {
            return Err(PlaymatError::invariant(format!(
                "card {child} has its own stack and cannot be stacked onto {target}"
            )));
        }

        // Validation done; nothing below can fail
        let Some(mut moved) = self.take_entry(child) else {
            return Err(PlaymatError::not_found(child, Zone::Battlefield));
        };
        moved.card.tapped = host_tapped;
        let Some(host) = self.entry_mut(target) else {
            return Err(PlaymatError::not_found(target, Zone::Battlefield));
        };
        host.stack.push(moved.card);
        Ok(StackOutcome::Stacked {
            host: target,
            stack_len: host.stack.len(),
        })
    }

    /// Promote the top-most child of `host` back to its own entry
    ///
    /// The promoted card lands at `host.position + offset`, right after the
    /// host in battlefield order. Returns `None` if the stack was empty.
    pub fn unstack_top(&mut self, host: InstanceId, offset: Position) -> Result<Option<InstanceId>> {
        self.require_top_level(host, "unstack")?;
        let Some(idx) = self.entry_index(host) else {
            return Err(PlaymatError::not_found(host, Zone::Battlefield));
        };

        let entry = &mut self.entries_mut()[idx];
        let Some(card) = entry.stack.pop() else {
            return Ok(None);
        };
        let id = card.id;
        let promoted = BattlefieldEntry::new(card, entry.position + offset);
        self.insert(idx + 1, promoted);
        Ok(Some(id))
    }

    /// Tap or untap a host together with every card stacked under it
    pub fn set_tapped(&mut self, host: InstanceId, tapped: bool) -> Result<()> {
        self.require_top_level(host, "tap")?;
        let Some(entry) = self.entry_mut(host) else {
            return Err(PlaymatError::not_found(host, Zone::Battlefield));
        };
        for card in entry.cards_mut() {
            card.tapped = tapped;
        }
        Ok(())
    }

    /// Flip the host's tapped state; returns the new value
    pub fn toggle_tapped(&mut self, host: InstanceId) -> Result<bool> {
        let tapped = match self.entry(host) {
            Some(entry) => !entry.card.tapped,
            None => {
                self.require_top_level(host, "tap")?;
                return Err(PlaymatError::not_found(host, Zone::Battlefield));
            }
        };
        self.set_tapped(host, tapped)?;
        Ok(tapped)
    }

    /// Untap every entry and every stacked child
    pub fn untap_all(&mut self) {
        for entry in self.entries_mut() {
            for card in entry.cards_mut() {
                card.tapped = false;
            }
        }
    }

    /// Reject ids that are stack children, report missing ids as not found
    pub(crate) fn require_top_level(&self, id: InstanceId, verb: &str) -> Result<()> {
        if self.entry(id).is_some() {
            return Ok(());
        }
        match self.host_of(id) {
            Some(host) => Err(PlaymatError::invariant(format!(
                "cannot {verb} card {id}: it is stacked under {host}"
            ))),
            None => Err(PlaymatError::not_found(id, Zone::Battlefield)),
        }
    }
}
