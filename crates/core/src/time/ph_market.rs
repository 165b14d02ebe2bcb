use anyhow::Context;
use chrono::{DateTime, Duration, NaiveDate, Timelike, Utc};

const PHT_OFFSET_SECS: i32 = 8 * 3600;

// The daily price index is published mid-morning Manila time. A run before
// this cutoff ingests the previous day's index instead of finding nothing.
const PUBLICATION_CUTOFF_HOUR_PHT: u32 = 8;
const PUBLICATION_CUTOFF_MINUTE_PHT: u32 = 30;

pub fn resolve_as_of_date(
    as_of_date_arg: Option<&str>,
    now_utc: DateTime<Utc>,
) -> anyhow::Result<NaiveDate> {
    if let Some(s) = as_of_date_arg {
        return Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?);
    }

    let pht = chrono::FixedOffset::east_opt(PHT_OFFSET_SECS).context("invalid PHT offset")?;
    let now_pht = now_utc.with_timezone(&pht);

    let cutoff_reached = (now_pht.hour(), now_pht.minute())
        >= (PUBLICATION_CUTOFF_HOUR_PHT, PUBLICATION_CUTOFF_MINUTE_PHT);
    let date = now_pht.date_naive();
    Ok(if cutoff_reached {
        date
    } else {
        date - Duration::days(1)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn explicit_date_wins() {
        let now = Utc.with_ymd_and_hms(2025, 12, 6, 0, 0, 0).unwrap();
        let d = resolve_as_of_date(Some("2025-12-01"), now).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 12, 1).unwrap());
    }

    #[test]
    fn uses_previous_day_before_cutoff() {
        // 2025-12-06 00:00 UTC = 08:00 PHT (< 08:30 cutoff)
        let now = Utc.with_ymd_and_hms(2025, 12, 6, 0, 0, 0).unwrap();
        let d = resolve_as_of_date(None, now).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 12, 5).unwrap());
    }

    #[test]
    fn uses_same_day_after_cutoff() {
        // 2025-12-06 01:00 UTC = 09:00 PHT (>= 08:30 cutoff)
        let now = Utc.with_ymd_and_hms(2025, 12, 6, 1, 0, 0).unwrap();
        let d = resolve_as_of_date(None, now).unwrap();
        assert_eq!(d, NaiveDate::from_ymd_opt(2025, 12, 6).unwrap());
    }
}
