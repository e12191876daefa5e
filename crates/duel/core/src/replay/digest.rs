use sha2::{Digest, Sha256};

use super::ReplayStep;

/// Domain separator so a replay digest never collides with other hashes.
const DOMAIN: &[u8] = b"duel-replay-v1";

/// Canonical encoding: every integer little-endian, every string length-prefixed.
pub(super) fn digest_steps(steps: &[ReplayStep]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(DOMAIN);
    hasher.update((steps.len() as u64).to_le_bytes());

    for step in steps {
        hasher.update([step.phase as u8, step.actor.number()]);
        hasher.update((step.logs.len() as u64).to_le_bytes());
        for line in &step.logs {
            hasher.update((line.len() as u64).to_le_bytes());
            hasher.update(line.as_bytes());
        }
        hasher.update(step.p1_hp.to_le_bytes());
        hasher.update(step.p2_hp.to_le_bytes());
        for shield in [step.p1_shield, step.p2_shield] {
            match shield {
                Some(value) => {
                    hasher.update([1]);
                    hasher.update(value.to_le_bytes());
                }
                None => hasher.update([0]),
            }
        }
    }

    hasher.finalize().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::{Phase, Side, Snapshot};

    fn step(line: &str) -> ReplayStep {
        ReplayStep::new(
            Phase::Action,
            Side::P1,
            vec![line.to_string()],
            [Snapshot { hp: 10, shield: 0 }, Snapshot { hp: 8, shield: 2 }],
        )
    }

    #[test]
    fn empty_log_has_stable_digest() {
        assert_eq!(digest_steps(&[]), digest_steps(&[]));
    }

    #[test]
    fn line_boundaries_matter() {
        let split = ReplayStep {
            logs: vec!["ab".into(), "c".into()],
            ..step("")
        };
        let joined = ReplayStep {
            logs: vec!["a".into(), "bc".into()],
            ..step("")
        };
        assert_ne!(digest_steps(&[split]), digest_steps(&[joined]));
    }

    #[test]
    fn any_change_moves_the_digest() {
        let base = digest_steps(&[step("[P1] x")]);
        assert_ne!(base, digest_steps(&[step("[P2] x")]));
        let mut shifted = step("[P1] x");
        shifted.p2_hp = 7;
        assert_ne!(base, digest_steps(&[shifted]));
        assert_eq!(hex::encode(base).len(), 64);
    }
}
