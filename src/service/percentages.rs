/// Split two vote counts into whole percentages that sum to exactly 100.
///
/// Option A is rounded half-up (12.5 becomes 13) and option B takes the remainder,
/// so two halves that would both round up can never produce 101. With no votes at
/// all both sides are 0.
pub fn percentages(votes_a: u64, votes_b: u64) -> (u8, u8) {
    let total = u128::from(votes_a) + u128::from(votes_b);
    if total == 0 {
        return (0, 0);
    }
    // round(a / total * 100) == floor((200a + total) / 2total)
    let pct_a = (u128::from(votes_a) * 200 + total) / (total * 2);
    let pct_a = pct_a as u8;
    (pct_a, 100 - pct_a)
}
