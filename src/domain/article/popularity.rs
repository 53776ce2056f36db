//! Decides which articles are worth keeping in the cache after a store read.

/// Articles above this view count are always cached.
pub const HOT_VIEW_THRESHOLD: u64 = 50;
/// Articles above this view count are cached during business hours.
pub const WARM_VIEW_THRESHOLD: u64 = 10;
pub const BUSINESS_HOURS: std::ops::RangeInclusive<u32> = 8..=22;

pub fn should_cache(look_count: u64, local_hour: u32) -> bool {
    look_count > HOT_VIEW_THRESHOLD
        || (look_count > WARM_VIEW_THRESHOLD && BUSINESS_HOURS.contains(&local_hour))
}
