//! Adaptive wait between polling rounds.

/// Shortest pause between rounds, in seconds.
pub const MIN_WAIT_SECS: u64 = 10;

/// Seconds to sleep before the next round.
///
/// `previous` and `current` are the readings taken at the end of the last two
/// rounds. The quota consumed between them estimates how many more rounds
/// the remaining quota sustains; the time left in the window is split evenly
/// across those rounds. No measurable consumption yields [`MIN_WAIT_SECS`].
///
/// # Example
///
/// ```
/// use chorus_core::RateLimitStatus;
/// use chorus_rate_limit::wait_seconds;
///
/// let now = 1_700_000_000;
/// let previous = RateLimitStatus::new(15, 15, now + 60);
/// let current = RateLimitStatus::new(15, 10, now + 60);
/// // 5 consumed, 10 left: two more rounds over 60 seconds
/// assert_eq!(wait_seconds(&previous, &current, now), 30);
/// ```
pub fn wait_seconds(
    previous: &chorus_core::RateLimitStatus,
    current: &chorus_core::RateLimitStatus,
    now_epoch: i64,
) -> u64 {
    let consumed = i64::from(*previous.remaining()) - i64::from(*current.remaining());
    if consumed <= 0 {
        return MIN_WAIT_SECS;
    }

    let rounds_left = (i64::from(*current.remaining()) / consumed).max(1);
    let wait = (*current.reset() - now_epoch) / rounds_left;

    u64::try_from(wait).unwrap_or(0).max(MIN_WAIT_SECS)
}
