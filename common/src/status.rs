//! 使用期限ステータス判定
//!
//! ステータスは表示のたびに期限日から求め、品目には保存しない。

use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// 期限間近とみなす日数（当日から、境界含む）
pub const EXPIRES_SOON_WINDOW_DAYS: u64 = 30;

/// 品目の期限ステータス
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpiryStatus {
    Expired,
    ExpiresSoon,
    Ok,
}

impl ExpiryStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "Expired",
            ExpiryStatus::ExpiresSoon => "Expires Soon",
            ExpiryStatus::Ok => "OK",
        }
    }

    /// ステータス表示用のCSSクラス
    pub fn css_class(&self) -> &'static str {
        match self {
            ExpiryStatus::Expired => "status-expired",
            ExpiryStatus::ExpiresSoon => "status-soon",
            ExpiryStatus::Ok => "status-ok",
        }
    }
}

/// 期限日と今日の日付から判定
///
/// 期限日なしは期限管理の対象外なので常にOK
pub fn classify(expiry: Option<NaiveDate>, today: NaiveDate) -> ExpiryStatus {
    let Some(expiry) = expiry else {
        return ExpiryStatus::Ok;
    };

    if expiry < today {
        return ExpiryStatus::Expired;
    }

    let soon_limit = today
        .checked_add_days(Days::new(EXPIRES_SOON_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MAX);

    if expiry <= soon_limit {
        ExpiryStatus::ExpiresSoon
    } else {
        ExpiryStatus::Ok
    }
}

/// 日時で判定（時刻は無視）
pub fn classify_at(expiry: Option<NaiveDateTime>, now: NaiveDateTime) -> ExpiryStatus {
    classify(expiry.map(|e| e.date()), now.date())
}

/// 文字列のまま判定（解釈できない日付は期限なし扱い）
pub fn classify_str(expiry: Option<&str>, today: NaiveDate) -> ExpiryStatus {
    classify(expiry.and_then(parse_date), today)
}

/// ISO 8601の日付を解釈（時刻部分は無視）
///
/// `2025-01-01`, `2025-01-01T13:45:00`, `2025-01-01 13:45` を受け付ける
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date_part = raw.get(..10)?;
    let rest = &raw[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn days_from(today: NaiveDate, days: i64) -> NaiveDate {
        today + chrono::Duration::days(days)
    }

    #[test]
    fn test_absent_date_is_ok() {
        assert_eq!(classify(None, date("2025-06-01")), ExpiryStatus::Ok);
        assert_eq!(classify_str(None, date("2025-06-01")), ExpiryStatus::Ok);
    }

    #[test]
    fn test_window_boundaries() {
        let today = date("2025-06-01");

        assert_eq!(classify(Some(days_from(today, -1)), today), ExpiryStatus::Expired);
        assert_eq!(classify(Some(today), today), ExpiryStatus::ExpiresSoon);
        assert_eq!(classify(Some(days_from(today, 30)), today), ExpiryStatus::ExpiresSoon);
        assert_eq!(classify(Some(days_from(today, 31)), today), ExpiryStatus::Ok);
    }

    #[test]
    fn test_window_across_month_and_year() {
        let today = date("2025-12-15");
        assert_eq!(classify(Some(date("2026-01-14")), today), ExpiryStatus::ExpiresSoon);
        assert_eq!(classify(Some(date("2026-01-15")), today), ExpiryStatus::Ok);
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        let expiry = date("2025-06-01");
        let today = date("2025-06-01");

        for (h, m) in [(0, 0), (8, 30), (23, 59)] {
            let now = today.and_hms_opt(h, m, 0).unwrap();
            let expiry_at = expiry.and_hms_opt(23 - h, 59 - m, 0).unwrap();
            assert_eq!(classify_at(Some(expiry_at), now), ExpiryStatus::ExpiresSoon);
        }

        let late_yesterday = date("2025-05-31").and_hms_opt(23, 59, 59).unwrap();
        let early_today = today.and_hms_opt(0, 0, 1).unwrap();
        assert_eq!(classify_at(Some(late_yesterday), early_today), ExpiryStatus::Expired);
    }

    #[test]
    fn test_classify_str_parses_wire_values() {
        let today = date("2025-06-01");
        assert_eq!(classify_str(Some("2025-01-01"), today), ExpiryStatus::Expired);
        assert_eq!(classify_str(Some("2099-01-01"), today), ExpiryStatus::Ok);
        assert_eq!(classify_str(Some("2025-06-10T18:00:00"), today), ExpiryStatus::ExpiresSoon);
        assert_eq!(classify_str(Some("not a date"), today), ExpiryStatus::Ok);
        assert_eq!(classify_str(Some(""), today), ExpiryStatus::Ok);
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2025-01-01"), Some(date("2025-01-01")));
        assert_eq!(parse_date(" 2025-01-01 "), Some(date("2025-01-01")));
        assert_eq!(parse_date("2025-01-01T10:00:00Z"), Some(date("2025-01-01")));
        assert_eq!(parse_date("2025-02-30"), None);
        assert_eq!(parse_date("2025-01-0199"), None);
        assert_eq!(parse_date("2025"), None);
    }

    #[test]
    fn test_labels_and_classes() {
        assert_eq!(ExpiryStatus::Expired.label(), "Expired");
        assert_eq!(ExpiryStatus::ExpiresSoon.label(), "Expires Soon");
        assert_eq!(ExpiryStatus::Ok.label(), "OK");
        assert_eq!(ExpiryStatus::ExpiresSoon.css_class(), "status-soon");
    }
}
