//! 貨件模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 原始貨件記錄（一件包裹一筆）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shipment {
    /// 追蹤號碼（與發票比對的共用鍵）
    pub tracking_number: String,

    /// 出貨日期
    pub ship_date: NaiveDate,

    /// 出貨站點
    pub origin: Option<String>,

    /// 目的地郵遞區號
    pub destination_postal_code: String,

    /// 目的地區域（州/地區）
    pub destination_region: Option<String>,

    /// 原始尺寸（未捨入）
    pub length: Option<Decimal>,
    pub width: Option<Decimal>,
    pub height: Option<Decimal>,

    /// 實際重量
    pub weight: Option<Decimal>,

    /// 服務類型（空值使用承運商預設服務）
    pub service: Option<String>,

    /// 住宅地址
    #[serde(default)]
    pub residential: bool,

    /// 同一訂單的包裹數
    #[serde(default = "default_package_count")]
    pub package_count: u32,
}

fn default_package_count() -> u32 {
    1
}

impl Shipment {
    /// 創建新的貨件
    pub fn new(tracking_number: String, ship_date: NaiveDate, destination_postal_code: String) -> Self {
        Self {
            tracking_number,
            ship_date,
            origin: None,
            destination_postal_code,
            destination_region: None,
            length: None,
            width: None,
            height: None,
            weight: None,
            service: None,
            residential: false,
            package_count: 1,
        }
    }

    /// 建構器模式：設置三邊尺寸
    pub fn with_dimensions(mut self, length: Decimal, width: Decimal, height: Decimal) -> Self {
        self.length = Some(length);
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// 建構器模式：設置實際重量
    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    /// 建構器模式：設置出貨站點
    pub fn with_origin(mut self, origin: String) -> Self {
        self.origin = Some(origin);
        self
    }

    /// 建構器模式：設置目的地區域
    pub fn with_region(mut self, region: String) -> Self {
        self.destination_region = Some(region);
        self
    }

    /// 建構器模式：設置服務類型
    pub fn with_service(mut self, service: String) -> Self {
        self.service = Some(service);
        self
    }

    /// 建構器模式：標記為住宅地址
    pub fn as_residential(mut self) -> Self {
        self.residential = true;
        self
    }

    /// 建構器模式：設置包裹數
    pub fn with_package_count(mut self, count: u32) -> Self {
        self.package_count = count.max(1);
        self
    }

    /// 標準化郵遞區號：去除空白並轉大寫
    pub fn normalized_postal_code(&self) -> String {
        self.destination_postal_code
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_uppercase()
    }
}
