//! OnTrac 單筆運費估算示例

use anyhow::Context;
use chrono::NaiveDate;
use parcel_cost::{
    logging, Carrier, CarrierCatalog, CostCalculator, RateTable, ServiceRates, Shipment, ZoneCode,
    ZoneEntry, ZoneTable,
};
use rust_decimal::Decimal;

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("=== OnTrac 運費估算示例 ===\n");

    let zones = ZoneTable::new(vec![
        ZoneEntry::new("90210".to_string(), Some(ZoneCode::Numeric(2))).with_region("CA".to_string()),
        ZoneEntry::new("10001".to_string(), Some(ZoneCode::Numeric(8))).with_region("NY".to_string()),
    ]);

    // 示範費率：6.25 + 0.25 × 級距 + 0.75 ×（區域 − 2）
    let mut ground = ServiceRates::new("GROUND".to_string(), 150);
    for bracket in 1..=150u32 {
        for zone in 2..=8u8 {
            let rate = Decimal::new(625, 2)
                + Decimal::new(25, 2) * Decimal::from(bracket)
                + Decimal::new(75, 2) * Decimal::from(zone - 2);
            ground = ground.with_net_rate(bracket, zone, rate);
        }
    }

    let config = CarrierCatalog::default_config(Carrier::OnTrac);
    let calculator = CostCalculator::new(config, zones, RateTable::new().with_service(ground))
        .context("載入 OnTrac 配置失敗")?;

    let ship_date = NaiveDate::from_ymd_opt(2025, 11, 3).context("無效的出貨日期")?;
    let shipment = Shipment::new("OT-DEMO-1".to_string(), ship_date, "90210".to_string())
        .with_dimensions(Decimal::from(50), Decimal::from(32), Decimal::from(10))
        .with_weight(Decimal::from(25));

    let record = calculator.calculate(&shipment)?;

    println!("貨件: {}", record.shipment.tracking_number);
    println!(
        "  尺寸: {} x {} x {}，材積 {}",
        record.geometry.longest,
        record.geometry.second_longest,
        record.geometry.shortest,
        record.geometry.cubic_volume
    );
    println!(
        "  實際重量 {}，材積重 {}，計費級距 {}",
        record.weight.actual,
        record.weight.dim_weight.round_dp(2),
        record.weight.bracket
    );
    println!("  區域 {:?}，基本運費 {}", record.zone.rate_zone, record.base_rate.net());

    println!("\n附加費:");
    for line in record.surcharges.iter().filter(|line| line.fired) {
        println!("  - {:<10} {:>8}", line.name, line.cost);
    }

    println!("\n小計: {}", record.subtotal);
    println!("燃油: {}", record.fuel);
    println!("總計: {}", record.total);

    println!("\n完整記錄（JSON）:");
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}
