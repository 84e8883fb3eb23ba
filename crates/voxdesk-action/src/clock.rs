use crate::provider_trait::ActionProvider;
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use voxdesk_core::ActionError;

pub struct TimeProvider;

#[async_trait]
impl ActionProvider for TimeProvider {
    fn name(&self) -> &str {
        "time"
    }

    async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
        Ok(format_clock(Local::now().naive_local()))
    }
}

pub struct DateProvider;

#[async_trait]
impl ActionProvider for DateProvider {
    fn name(&self) -> &str {
        "date"
    }

    async fn perform(&self, _param: Option<&str>) -> Result<String, ActionError> {
        Ok(format_date(Local::now().naive_local()))
    }
}

/// 12-hour clock with a day/month/year date, e.g.
/// "It is 3:05 PM on 4/7/2024."
fn format_clock(dt: NaiveDateTime) -> String {
    let hour = dt.hour();
    let (h12, ampm) = match hour {
        0 => (12, "AM"),
        1..=11 => (hour, "AM"),
        12 => (12, "PM"),
        _ => (hour - 12, "PM"),
    };
    format!(
        "It is {}:{:02} {} on {}/{}/{}.",
        h12,
        dt.minute(),
        ampm,
        dt.day(),
        dt.month(),
        dt.year()
    )
}

fn format_date(dt: NaiveDateTime) -> String {
    format!(
        "Today is {}, {} {} {}.",
        dt.format("%A"),
        dt.day(),
        dt.format("%B"),
        dt.year()
    )
}
