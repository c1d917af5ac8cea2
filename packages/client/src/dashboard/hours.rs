use common::hours::{BusinessHours, WeekHours, Weekday, parse_time};
use tracing::{info, instrument};

use super::{ActionError, Dashboard};
use crate::backend::table;

impl Dashboard {
    pub fn hours(&self) -> &WeekHours {
        &self.hours
    }

    pub async fn set_day_closed(&mut self, day: Weekday, closed: bool) -> Result<(), ActionError> {
        let mut next = self.hours.day(day).clone();
        next.set_closed(closed);
        self.save_day(next).await
    }

    pub async fn set_day_24_hours(&mut self, day: Weekday, all_day: bool) -> Result<(), ActionError> {
        let mut next = self.hours.day(day).clone();
        next.set_24_hours(all_day);
        self.save_day(next).await
    }

    /// Set regular opening hours from `HH:MM` text.
    pub async fn set_day_times(
        &mut self,
        day: Weekday,
        open: &str,
        close: &str,
    ) -> Result<(), ActionError> {
        let times = parse_time(open).and_then(|open| Ok((open, parse_time(close)?)));
        let (open, close) = times.map_err(|e| self.report("save the hours", e.into()))?;
        let mut next = self.hours.day(day).clone();
        next.set_times(open, close);
        self.save_day(next).await
    }

    /// Update the day's row, or insert it the first time the day is saved.
    #[instrument(skip(self, next), fields(day = next.day_of_week.name()))]
    async fn save_day(&mut self, next: BusinessHours) -> Result<(), ActionError> {
        let tables = self.backend.tables.as_ref();
        let fields = next.fields();
        let result = match next.id.clone() {
            Some(id) => table::update::<BusinessHours>(tables, &id, &fields)
                .await
                .map(|()| next),
            None => table::insert::<BusinessHours>(tables, &fields).await,
        };
        let saved = result.map_err(|e| self.report("save the hours", e.into()))?;
        info!(summary = %saved.describe(), "Hours saved");
        self.hours.replace(saved);
        Ok(())
    }
}
