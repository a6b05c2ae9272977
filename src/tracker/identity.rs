use rand::Rng;

use crate::config::TrackerSettings;
use crate::store::SubscriptionId;
use crate::utils::TrackerError;

/// Random draws tried before falling back to a full scan of the range.
const RANDOM_PROBES: usize = 32;

/// Hands out subscription identities from an inclusive range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentityAllocator {
    low: SubscriptionId,
    high: SubscriptionId,
}

impl Default for IdentityAllocator {
    fn default() -> Self {
        Self::from(&TrackerSettings::default())
    }
}

impl From<&TrackerSettings> for IdentityAllocator {
    fn from(settings: &TrackerSettings) -> Self {
        Self::new(settings.id_min, settings.id_max)
    }
}

impl IdentityAllocator {
    pub fn new(low: SubscriptionId, high: SubscriptionId) -> Self {
        Self {
            low: low.min(high),
            high: low.max(high),
        }
    }

    pub fn range(&self) -> (SubscriptionId, SubscriptionId) {
        (self.low, self.high)
    }

    /// Uniform draw from the range, with no collision check.
    pub fn draw(&self) -> SubscriptionId {
        rand::rng().random_range(self.low..=self.high)
    }

    /// Draw an identity for which `taken` is false.
    ///
    /// Tries a handful of random draws, then walks the whole range from a
    /// random starting point so a nearly-full range still terminates.
    pub fn allocate(
        &self,
        taken: impl Fn(SubscriptionId) -> bool,
    ) -> Result<SubscriptionId, TrackerError> {
        for _ in 0..RANDOM_PROBES {
            let id = self.draw();
            if !taken(id) {
                return Ok(id);
            }
        }

        let span = u64::from(self.high - self.low) + 1;
        let start = u64::from(self.draw() - self.low);
        (0..span)
            .map(|offset| self.low + ((start + offset) % span) as SubscriptionId)
            .find(|id| !taken(*id))
            .ok_or(TrackerError::IdentitiesExhausted {
                low: self.low,
                high: self.high,
            })
    }
}
