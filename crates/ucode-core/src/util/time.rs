use chrono::{DateTime, TimeZone};

/// `t1 <= t2`, comparing instants regardless of offset.
pub fn time_before_or_equal<A: TimeZone, B: TimeZone>(t1: &DateTime<A>, t2: &DateTime<B>) -> bool {
    t1 <= t2
}

/// `t1 >= t2`, comparing instants regardless of offset.
pub fn time_after_or_equal<A: TimeZone, B: TimeZone>(t1: &DateTime<A>, t2: &DateTime<B>) -> bool {
    t1 >= t2
}
