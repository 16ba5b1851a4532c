//! Cascading forced revocation: once a reservation's full party has
//! checked out, every remaining open guest (spares included) is revoked
//! in the same atomic unit as the final check-out.

/// Does this revoked count close the party? `>=` rather than `==` so a
/// count that skipped past the threshold still closes it.
pub fn threshold_crossed(revoked: i64, member_all: i64) -> bool {
    revoked >= member_all
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_at_and_past_the_threshold() {
        assert!(!threshold_crossed(0, 2));
        assert!(!threshold_crossed(1, 2));
        assert!(threshold_crossed(2, 2));
        assert!(threshold_crossed(3, 2));
    }
}
