//! 測試用參考資料

#![allow(dead_code)]

use chrono::NaiveDate;
use parcel_cost::{
    RateComponents, RateRow, RateTable, ServiceRates, Shipment, ZoneCode, ZoneEntry, ZoneTable,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn parcel(
    tracking_number: &str,
    ship_date: NaiveDate,
    postal_code: &str,
    dims: (Decimal, Decimal, Decimal),
    weight: Decimal,
) -> Shipment {
    Shipment::new(tracking_number.to_string(), ship_date, postal_code.to_string())
        .with_dimensions(dims.0, dims.1, dims.2)
        .with_weight(weight)
}

fn entry(key: &str, region: &str, zone: Option<ZoneCode>) -> ZoneEntry {
    ZoneEntry::new(key.to_string(), zone).with_region(region.to_string())
}

/// 美國區域表
pub fn us_zones() -> ZoneTable {
    ZoneTable::new(vec![
        entry("90210", "CA", Some(ZoneCode::Numeric(2))),
        entry("90211", "CA", Some(ZoneCode::Numeric(2))),
        entry("94105", "CA", Some(ZoneCode::Numeric(3))),
        entry("10001", "NY", Some(ZoneCode::Numeric(8))),
        entry("10002", "NY", Some(ZoneCode::Numeric(8))),
        entry("10003", "NY", Some(ZoneCode::Numeric(7))),
        entry("606", "IL", Some(ZoneCode::Numeric(6))),
        entry("96799", "AS", None),
        entry("96910", "GU", Some(ZoneCode::Letter("GU".to_string()))),
    ])
}

/// 英國區域表（郵遞區號前綴）
pub fn uk_zones() -> ZoneTable {
    ZoneTable::new(vec![
        entry("SW1A", "LONDON", Some(ZoneCode::Numeric(1))),
        entry("M1", "NORTH WEST", Some(ZoneCode::Numeric(2))),
        entry("IV", "HIGHLANDS", Some(ZoneCode::Numeric(3))),
        entry("HS", "ISLANDS", Some(ZoneCode::Letter("HS".to_string()))),
    ])
}

/// OnTrac 測試費率：6.25 + 0.25 × 級距 + 0.75 ×（區域 − 2）
pub fn ontrac_rates() -> RateTable {
    let mut ground = ServiceRates::new("GROUND".to_string(), 150);
    for bracket in 1..=150u32 {
        for zone in 2..=8u8 {
            let rate =
                dec!(6.25) + dec!(0.25) * Decimal::from(bracket) + dec!(0.75) * Decimal::from(zone - 2);
            ground = ground.with_net_rate(bracket, zone, rate);
        }
    }
    RateTable::new().with_service(ground)
}

/// Maersk 測試費率：3.18 + 0.60 × 級距 + 0.28 × 區域
pub fn maersk_rates() -> RateTable {
    let mut ground = ServiceRates::new("GROUND".to_string(), 70);
    for bracket in 1..=70u32 {
        for zone in 1..=8u8 {
            let rate = dec!(3.18) + dec!(0.60) * Decimal::from(bracket) + dec!(0.28) * Decimal::from(zone);
            ground = ground.with_net_rate(bracket, zone, rate);
        }
    }
    RateTable::new().with_service(ground)
}

/// FedEx 測試費率：牌價 20 + 級距 + 區域，績效折扣 10%、議定折扣 5%、優惠折扣 1.00
pub fn fedex_rates() -> RateTable {
    let mut ground = ServiceRates::new("GROUND".to_string(), 150);
    for bracket in 1..=150u32 {
        for zone in 2..=9u8 {
            let list = dec!(20) + Decimal::from(bracket) + Decimal::from(zone);
            ground.insert(RateRow {
                bracket,
                zone,
                components: RateComponents::FourPart {
                    list,
                    performance_discount: -(list * dec!(0.10)),
                    earned_discount: -(list * dec!(0.05)),
                    grace_discount: dec!(-1.00),
                },
            });
        }
    }
    RateTable::new().with_service(ground)
}

/// DPD UK 測試費率：4.50 + 0.20 × 級距 + 1.50 ×（區域 − 1）
pub fn dpd_uk_rates() -> RateTable {
    let mut next_day = ServiceRates::new("NEXT_DAY".to_string(), 30);
    for bracket in 1..=30u32 {
        for zone in 1..=4u8 {
            let rate =
                dec!(4.50) + dec!(0.20) * Decimal::from(bracket) + dec!(1.50) * Decimal::from(zone - 1);
            next_day = next_day.with_net_rate(bracket, zone, rate);
        }
    }
    RateTable::new().with_service(next_day)
}

/// USPS 測試費率：2.95 + 0.50 × 級距 + 0.25 × 區域
pub fn usps_rates() -> RateTable {
    let mut ground = ServiceRates::new("GROUND_ADVANTAGE".to_string(), 70);
    for bracket in 1..=70u32 {
        for zone in 1..=8u8 {
            let rate = dec!(2.95) + dec!(0.50) * Decimal::from(bracket) + dec!(0.25) * Decimal::from(zone);
            ground = ground.with_net_rate(bracket, zone, rate);
        }
    }
    RateTable::new().with_service(ground)
}
