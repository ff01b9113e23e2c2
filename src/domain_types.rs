pub mod checkin;

pub use checkin::{
    AggregatedCheckInRecord, AggregationKey, NormalizedCheckInRecord, RawCheckInRecord,
};
