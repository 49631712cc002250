use chrono::{
  DateTime,
  Local,
  LocalResult,
  NaiveDate,
  SecondsFormat,
  TimeZone,
  Utc
};

use crate::task::TaskStatus;

/// Parse either an RFC-3339 timestamp or a plain `YYYY-MM-DD`
/// calendar date and render it as a strict ISO-8601 UTC string with
/// millisecond precision (the shape the service itself emits). A
/// bare calendar date resolves to UTC midnight, matching how the
/// service interprets dates without a time component.
pub fn to_iso_utc(
  input: &str
) -> Option<String> {
  if let Ok(parsed) =
    DateTime::parse_from_rfc3339(
      input
    )
  {
    return Some(iso_utc(
      parsed.with_timezone(&Utc)
    ));
  }

  let date = parse_plain_date(input)?;
  let midnight =
    date.and_hms_opt(0, 0, 0)?;
  Some(iso_utc(
    Utc.from_utc_datetime(&midnight)
  ))
}

/// A date picked from a date input carries no time component; the
/// service expects a full timestamp, so a plain calendar date is
/// expanded to local midnight of that day. Values already carrying a
/// time component pass through unchanged.
pub fn expand_plain_date(
  input: &str
) -> String {
  let Some(date) =
    parse_plain_date(input)
  else {
    return input.to_string();
  };
  let Some(midnight) =
    date.and_hms_opt(0, 0, 0)
  else {
    return input.to_string();
  };

  match Local
    .from_local_datetime(&midnight)
  {
    | LocalResult::Single(local)
    | LocalResult::Ambiguous(
      local,
      _
    ) => iso_utc(
      local.with_timezone(&Utc)
    ),
    | LocalResult::None => iso_utc(
      Utc.from_utc_datetime(&midnight)
    )
  }
}

/// Value for a `<input type="date">` control: the local calendar day
/// of the stored timestamp, or empty when absent or unparseable.
/// Local, not UTC: stored due dates are local midnight, so the UTC
/// day would show the previous day east of Greenwich.
pub fn date_input_value(
  input: &str
) -> String {
  if parse_plain_date(input).is_some()
  {
    return input.to_string();
  }

  match DateTime::parse_from_rfc3339(
    input
  ) {
    | Ok(parsed) => parsed
      .with_timezone(&Local)
      .format("%Y-%m-%d")
      .to_string(),
    | Err(_) => String::new()
  }
}

/// Human-readable due date. Unparseable input degrades to a
/// placeholder instead of failing.
pub fn display_date(
  due_date: Option<&str>
) -> String {
  let Some(raw) = due_date else {
    return "No date".to_string();
  };

  if let Ok(parsed) =
    DateTime::parse_from_rfc3339(raw)
  {
    return parsed
      .with_timezone(&Local)
      .format("%b %-d, %Y")
      .to_string();
  }

  match parse_plain_date(raw) {
    | Some(date) => date
      .format("%b %-d, %Y")
      .to_string(),
    | None => {
      "Invalid date".to_string()
    }
  }
}

/// A task is overdue iff its due date falls on a calendar day
/// strictly before `today` and the task is not done. Comparison is
/// at day granularity; time of day is ignored.
pub fn is_overdue(
  due_date: Option<&str>,
  status: TaskStatus,
  today: NaiveDate
) -> bool {
  if status == TaskStatus::Done {
    return false;
  }
  let Some(raw) = due_date else {
    return false;
  };
  let Some(due_day) =
    due_calendar_day(raw)
  else {
    return false;
  };

  due_day < today
}

pub fn today_local() -> NaiveDate {
  Local::now().date_naive()
}

/// Today formatted for the `min` attribute of a date input.
pub fn today_input_value() -> String {
  today_local()
    .format("%Y-%m-%d")
    .to_string()
}

fn iso_utc(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(
    SecondsFormat::Millis,
    true
  )
}

fn parse_plain_date(
  input: &str
) -> Option<NaiveDate> {
  NaiveDate::parse_from_str(
    input, "%Y-%m-%d"
  )
  .ok()
}

fn due_calendar_day(
  raw: &str
) -> Option<NaiveDate> {
  if let Ok(parsed) =
    DateTime::parse_from_rfc3339(raw)
  {
    return Some(
      parsed
        .with_timezone(&Local)
        .date_naive()
    );
  }
  parse_plain_date(raw)
}

#[cfg(test)]
mod tests {
  use chrono::Timelike;

  use super::*;

  fn day(
    y: i32,
    m: u32,
    d: u32
  ) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d)
      .expect("valid date")
  }

  #[test]
  fn iso_passthrough_normalizes_offset()
  {
    assert_eq!(
      to_iso_utc(
        "2025-03-01T10:30:00+02:00"
      )
      .expect("parse"),
      "2025-03-01T08:30:00.000Z"
    );
  }

  #[test]
  fn plain_date_becomes_utc_midnight()
  {
    assert_eq!(
      to_iso_utc("2025-03-01")
        .expect("parse"),
      "2025-03-01T00:00:00.000Z"
    );
  }

  #[test]
  fn garbage_does_not_parse() {
    assert_eq!(
      to_iso_utc("soon"),
      None
    );
    assert_eq!(
      to_iso_utc(
        "2025-03-01T99:00:00Z"
      ),
      None
    );
  }

  #[test]
  fn expansion_lands_on_local_midnight()
  {
    let expanded =
      expand_plain_date("2025-03-01");
    let parsed =
      DateTime::parse_from_rfc3339(
        &expanded
      )
      .expect("expanded iso")
      .with_timezone(&Local);
    assert_eq!(
      parsed.date_naive(),
      day(2025, 3, 1)
    );
    assert_eq!(
      parsed.num_seconds_from_midnight(
      ),
      0
    );
  }

  #[test]
  fn expansion_passes_timestamps_through()
  {
    assert_eq!(
      expand_plain_date(
        "2025-03-01T12:00:00.000Z"
      ),
      "2025-03-01T12:00:00.000Z"
    );
  }

  #[test]
  fn date_input_value_handles_plain_and_bad_input()
  {
    assert_eq!(
      date_input_value("2025-03-01"),
      "2025-03-01"
    );
    assert_eq!(
      date_input_value("nope"),
      ""
    );
  }

  // Holds in every timezone: expansion stores local midnight, so
  // the input value must come back as the same local calendar day.
  #[test]
  fn date_input_round_trips_expanded_day()
  {
    let stored =
      expand_plain_date("2025-03-01");
    assert_eq!(
      date_input_value(&stored),
      "2025-03-01"
    );
  }

  #[test]
  fn display_date_degrades_gracefully()
  {
    assert_eq!(
      display_date(None),
      "No date"
    );
    assert_eq!(
      display_date(Some("garbage")),
      "Invalid date"
    );
    assert_eq!(
      display_date(
        Some("2025-03-01")
      ),
      "Mar 1, 2025"
    );
  }

  #[test]
  fn yesterday_open_is_overdue() {
    assert!(is_overdue(
      Some("2025-06-09"),
      TaskStatus::Open,
      day(2025, 6, 10)
    ));
  }

  #[test]
  fn yesterday_done_is_not_overdue()
  {
    assert!(!is_overdue(
      Some("2025-06-09"),
      TaskStatus::Done,
      day(2025, 6, 10)
    ));
  }

  #[test]
  fn today_is_not_overdue() {
    assert!(!is_overdue(
      Some("2025-06-10"),
      TaskStatus::Open,
      day(2025, 6, 10)
    ));
  }

  #[test]
  fn missing_or_bad_due_is_not_overdue()
  {
    assert!(!is_overdue(
      None,
      TaskStatus::Open,
      day(2025, 6, 10)
    ));
    assert!(!is_overdue(
      Some("whenever"),
      TaskStatus::Open,
      day(2025, 6, 10)
    ));
  }

  #[test]
  fn far_past_timestamp_is_overdue()
  {
    assert!(is_overdue(
      Some(
        "2020-01-01T12:00:00.000Z"
      ),
      TaskStatus::InProgress,
      day(2025, 6, 10)
    ));
  }
}
