use std::time::Duration;

use rand::Rng;

/// Effect granted by collecting a power-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUp {
    /// Obstacles become passable for the configured duration
    WallPhase,
    /// Adds food points scaled by the configured strength
    BonusScore,
    /// Appends `strength` segments at the tail
    Lengthen,
    /// Removes up to `strength` tail segments, keeping at least the head
    Shorten,
    /// Halves the tick interval for the configured duration
    SpeedUp,
    /// Stretches the tick interval by half for the configured duration
    SlowDown,
}

impl PowerUp {
    pub const ALL: [PowerUp; 6] = [
        PowerUp::WallPhase,
        PowerUp::BonusScore,
        PowerUp::Lengthen,
        PowerUp::Shorten,
        PowerUp::SpeedUp,
        PowerUp::SlowDown,
    ];

    /// Pick one of the six effects uniformly
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn name(&self) -> &'static str {
        match self {
            PowerUp::WallPhase => "wall phase",
            PowerUp::BonusScore => "bonus score",
            PowerUp::Lengthen => "lengthen",
            PowerUp::Shorten => "shorten",
            PowerUp::SpeedUp => "speed up",
            PowerUp::SlowDown => "slow down",
        }
    }
}

/// Timed change to the tick interval
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedEffect {
    Fast,
    Slow,
}

impl SpeedEffect {
    /// Factor applied to the configured tick interval
    pub fn multiplier(&self) -> f64 {
        match self {
            SpeedEffect::Fast => 0.5,
            SpeedEffect::Slow => 1.5,
        }
    }

    /// Apply the multiplier to an interval without going through floats
    pub fn scale(&self, interval: Duration) -> Duration {
        match self {
            SpeedEffect::Fast => interval / 2,
            SpeedEffect::Slow => interval * 3 / 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    #[test]
    fn test_random_covers_every_effect() {
        let mut rng = StdRng::seed_from_u64(42);
        let seen: HashSet<PowerUp> = (0..500).map(|_| PowerUp::random(&mut rng)).collect();
        assert_eq!(seen.len(), PowerUp::ALL.len());
    }

    #[test]
    fn test_speed_multipliers() {
        assert_eq!(SpeedEffect::Fast.multiplier(), 0.5);
        assert_eq!(SpeedEffect::Slow.multiplier(), 1.5);
        assert_eq!(
            SpeedEffect::Fast.scale(Duration::from_millis(120)),
            Duration::from_millis(60)
        );
        assert_eq!(
            SpeedEffect::Slow.scale(Duration::from_millis(120)),
            Duration::from_millis(180)
        );
    }
}
