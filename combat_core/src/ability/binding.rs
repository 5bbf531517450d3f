//! AbilityBinding - One ability attached to an item

use super::{AbilityError, AbilityKey, AbilityParams};
use crate::types::Tick;
use serde::{Deserialize, Serialize};

/// Cooldown state of a binding
///
/// `READY -> ON_COOLDOWN -> READY`. Only the passive trigger moves a binding
/// between the two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CooldownState {
    #[default]
    Ready,
    OnCooldown { release_at: Tick },
}

/// An ability on an item: its key, its encoded parameters and its cooldown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AbilityBinding {
    pub key: AbilityKey,
    /// TOML parameter table, decoded on every evaluation
    #[serde(default)]
    payload: Option<String>,
    /// Transient; never persisted with the item
    #[serde(skip)]
    cooldown: CooldownState,
}

impl AbilityBinding {
    pub fn new(key: AbilityKey, payload: String) -> Self {
        AbilityBinding {
            key,
            payload: Some(payload),
            cooldown: CooldownState::Ready,
        }
    }

    /// A binding whose parameters were never written
    pub fn undecoded(key: AbilityKey) -> Self {
        AbilityBinding {
            key,
            payload: None,
            cooldown: CooldownState::Ready,
        }
    }

    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    pub fn cooldown(&self) -> CooldownState {
        self.cooldown
    }

    /// Whether the binding may fire at `now`
    ///
    /// A cooldown whose release tick has passed counts as ready even if the
    /// scheduled clear never reached this binding.
    pub fn is_ready(&self, now: Tick) -> bool {
        match self.cooldown {
            CooldownState::Ready => true,
            CooldownState::OnCooldown { release_at } => release_at <= now,
        }
    }

    /// Decode the parameters for this binding's kind
    pub fn decode(&self) -> Result<AbilityParams, AbilityError> {
        let payload = self
            .payload
            .as_deref()
            .ok_or(AbilityError::MissingPayload(self.key))?;
        AbilityParams::decode(self.key.kind, payload)
    }

    pub(crate) fn start_cooldown(&mut self, release_at: Tick) {
        self.cooldown = CooldownState::OnCooldown { release_at };
    }

    /// Return to READY if the cooldown has run out; returns true if it did
    pub(crate) fn release(&mut self, now: Tick) -> bool {
        match self.cooldown {
            CooldownState::OnCooldown { release_at } if release_at <= now => {
                self.cooldown = CooldownState::Ready;
                true
            }
            _ => false,
        }
    }
}
