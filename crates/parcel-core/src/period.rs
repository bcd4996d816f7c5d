//! 有效期間（月/日區間，可跨年）

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{CostError, Result};

/// 月/日
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthDay {
    pub month: u32,
    pub day: u32,
}

impl MonthDay {
    /// 創建月/日，以閏年驗證（允許 2/29）
    pub fn new(month: u32, day: u32) -> Result<Self> {
        let candidate = Self { month, day };
        candidate.validate()?;
        Ok(candidate)
    }

    fn validate(&self) -> Result<()> {
        NaiveDate::from_ymd_opt(2024, self.month, self.day)
            .map(|_| ())
            .ok_or_else(|| CostError::InvalidDate(format!("{:02}-{:02}", self.month, self.day)))
    }

    /// 取日期的月/日
    pub fn of(date: NaiveDate) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }
}

/// 有效期間
///
/// 起日大於迄日時視為跨年區間（例：9/27 ~ 1/16），日期在起日之後「或」迄日之前即成立。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl Period {
    /// 創建有效期間
    pub fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    /// 以月/日數字創建有效期間
    pub fn from_month_days(
        start_month: u32,
        start_day: u32,
        end_month: u32,
        end_day: u32,
    ) -> Result<Self> {
        Ok(Self {
            start: MonthDay::new(start_month, start_day)?,
            end: MonthDay::new(end_month, end_day)?,
        })
    }

    /// 驗證起迄日（反序列化後呼叫）
    pub fn validate(&self) -> Result<()> {
        self.start.validate()?;
        self.end.validate()
    }

    /// 是否跨年
    pub fn wraps_year(&self) -> bool {
        self.start > self.end
    }

    /// 日期是否落在期間內（起迄日皆包含）
    pub fn contains(&self, date: NaiveDate) -> bool {
        let day = MonthDay::of(date);
        if self.wraps_year() {
            day >= self.start || day <= self.end
        } else {
            day >= self.start && day <= self.end
        }
    }
}
