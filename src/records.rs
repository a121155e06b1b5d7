//! レコードファイルの読み込みと時系列チェック

use crate::error::{GeoTimelineError, Result};
use chrono::NaiveDate;
use geo_timeline_common::Timeline;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// 日付が前のレコードより古くなっている箇所
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderIssue {
    pub index: usize,
    pub previous: NaiveDate,
    pub current: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChronologyReport {
    pub issues: Vec<OrderIssue>,
    /// 日付として読めなかったレコードの番号
    pub unparsed: Vec<usize>,
}

impl ChronologyReport {
    pub fn is_ordered(&self) -> bool {
        self.issues.is_empty()
    }
}

pub fn load_timeline(path: &Path) -> Result<Timeline> {
    if !path.exists() {
        return Err(GeoTimelineError::FileNotFound(path.display().to_string()));
    }
    Ok(Timeline::from_file(path)?)
}

/// dateOpened が昇順になっているか調べる
///
/// 読めない日付は飛ばし、直前の読めた日付と比較する。
pub fn check_chronology(timeline: &Timeline) -> ChronologyReport {
    let mut report = ChronologyReport::default();
    let mut last: Option<NaiveDate> = None;

    for record in timeline {
        let Ok(date) = NaiveDate::parse_from_str(record.date_opened.trim(), DATE_FORMAT) else {
            report.unparsed.push(record.index);
            continue;
        };

        if let Some(previous) = last {
            if date < previous {
                report.issues.push(OrderIssue {
                    index: record.index,
                    previous,
                    current: date,
                });
            }
        }
        last = Some(date);
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timeline(dates: &[&str]) -> Timeline {
        let records: Vec<serde_json::Value> = dates
            .iter()
            .map(|d| {
                serde_json::json!({
                    "name": "x",
                    "dateOpened": d,
                    "gps": { "latitude": 0.0, "longitude": 0.0 }
                })
            })
            .collect();
        Timeline::from_json(&serde_json::to_string(&records).unwrap()).unwrap()
    }

    #[test]
    fn test_ordered_dates() {
        let report = check_chronology(&timeline(&["2019-01-01", "2019-01-01", "2020-03-04"]));
        assert!(report.is_ordered());
        assert!(report.unparsed.is_empty());
    }

    #[test]
    fn test_backwards_date_reported() {
        let report = check_chronology(&timeline(&["2019-01-01", "2018-06-30", "2020-01-01"]));
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].index, 1);
    }

    #[test]
    fn test_unparsed_dates_skipped() {
        let report = check_chronology(&timeline(&["2020-01-01", "Spring 2020", "2019-01-01"]));
        assert_eq!(report.unparsed, vec![1]);
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].index, 2);
    }
}
