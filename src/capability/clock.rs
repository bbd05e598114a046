use chrono::NaiveDate;

pub trait ClockCapability {
    /// The current calendar date, time of day discarded.
    fn today(&self) -> NaiveDate;
}
