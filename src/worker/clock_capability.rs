use crate::capability::clock::ClockCapability;
use crate::worker::Worker;
use chrono::NaiveDate;

impl ClockCapability for Worker {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}
