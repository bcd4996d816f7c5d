//! 費率表模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// 基本運費組成
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateComponents {
    /// 單一淨費率
    Net { rate: Decimal },

    /// 四段式費率：牌價、績效折扣、議定折扣、優惠折扣（折扣以負數表示）
    FourPart {
        list: Decimal,
        performance_discount: Decimal,
        earned_discount: Decimal,
        grace_discount: Decimal,
    },
}

impl RateComponents {
    /// 淨基本運費
    pub fn net(&self) -> Decimal {
        match self {
            RateComponents::Net { rate } => *rate,
            RateComponents::FourPart {
                list,
                performance_discount,
                earned_discount,
                grace_discount,
            } => *list + *performance_discount + *earned_discount + *grace_discount,
        }
    }

    /// 零運費（尚未查表）
    pub fn zero() -> Self {
        RateComponents::Net {
            rate: Decimal::ZERO,
        }
    }
}

/// 費率列
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateRow {
    /// 重量級距（整數單位）
    pub bracket: u32,
    /// 區域
    pub zone: u8,
    /// 費率組成
    pub components: RateComponents,
}

/// 服務費率的序列化格式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceRatesData {
    pub service: String,
    pub max_weight: u32,
    pub rows: Vec<RateRow>,
}

/// 單一服務類型的費率
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "ServiceRatesData", into = "ServiceRatesData")]
pub struct ServiceRates {
    service: String,
    max_weight: u32,
    rows: Vec<RateRow>,
    index: HashMap<(u32, u8), usize>,
    zones: BTreeSet<u8>,
}

impl ServiceRates {
    /// 創建服務費率
    pub fn new(service: String, max_weight: u32) -> Self {
        Self {
            service,
            max_weight,
            rows: Vec::new(),
            index: HashMap::new(),
            zones: BTreeSet::new(),
        }
    }

    /// 建構器模式：加入淨費率列
    pub fn with_net_rate(mut self, bracket: u32, zone: u8, rate: Decimal) -> Self {
        self.insert(RateRow {
            bracket,
            zone,
            components: RateComponents::Net { rate },
        });
        self
    }

    /// 加入費率列；重複的 (級距, 區域) 以最後一筆為準
    pub fn insert(&mut self, row: RateRow) {
        let key = (row.bracket, row.zone);
        self.zones.insert(row.zone);
        match self.index.get(&key) {
            Some(&position) => self.rows[position] = row,
            None => {
                self.index.insert(key, self.rows.len());
                self.rows.push(row);
            }
        }
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// 服務最大計費重量
    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    /// 服務是否有此區域的費率
    pub fn prices_zone(&self, zone: u8) -> bool {
        self.zones.contains(&zone)
    }

    /// 已定價的區域
    pub fn zones(&self) -> impl Iterator<Item = u8> + '_ {
        self.zones.iter().copied()
    }

    /// 查找費率列
    pub fn get(&self, bracket: u32, zone: u8) -> Option<&RateRow> {
        self.index
            .get(&(bracket, zone))
            .and_then(|&position| self.rows.get(position))
    }

    pub fn rows(&self) -> &[RateRow] {
        &self.rows
    }
}

impl From<ServiceRatesData> for ServiceRates {
    fn from(data: ServiceRatesData) -> Self {
        let mut rates = ServiceRates::new(data.service, data.max_weight);
        for row in data.rows {
            rates.insert(row);
        }
        rates
    }
}

impl From<ServiceRates> for ServiceRatesData {
    fn from(rates: ServiceRates) -> Self {
        Self {
            service: rates.service,
            max_weight: rates.max_weight,
            rows: rates.rows,
        }
    }
}

/// 費率表（依服務類型分）
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RateTable {
    services: HashMap<String, ServiceRates>,
}

impl RateTable {
    /// 創建空費率表
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入服務費率
    pub fn with_service(mut self, rates: ServiceRates) -> Self {
        self.add_service(rates);
        self
    }

    /// 加入服務費率
    pub fn add_service(&mut self, rates: ServiceRates) {
        self.services.insert(rates.service.clone(), rates);
    }

    /// 取得服務費率
    pub fn service(&self, service: &str) -> Option<&ServiceRates> {
        self.services.get(service)
    }
}
