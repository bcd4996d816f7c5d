//! 多承運商批次估算示例

use chrono::NaiveDate;
use parcel_cost::{
    logging, Carrier, CarrierCatalog, CostCalculator, RateTable, ServiceRates, Shipment, ZoneCode,
    ZoneEntry, ZoneTable,
};
use rust_decimal::Decimal;

/// 示範費率：固定費 + 每級距單價 + 每區域單價
fn flat_rates(service: &str, max_weight: u32, zones: std::ops::RangeInclusive<u8>) -> RateTable {
    let mut rates = ServiceRates::new(service.to_string(), max_weight);
    for bracket in 1..=max_weight {
        for zone in zones.clone() {
            let rate = Decimal::new(400, 2)
                + Decimal::new(55, 2) * Decimal::from(bracket)
                + Decimal::new(30, 2) * Decimal::from(zone);
            rates = rates.with_net_rate(bracket, zone, rate);
        }
    }
    RateTable::new().with_service(rates)
}

fn us_zones() -> ZoneTable {
    ZoneTable::new(vec![
        ZoneEntry::new("90210".to_string(), Some(ZoneCode::Numeric(2))).with_region("CA".to_string()),
        ZoneEntry::new("94105".to_string(), Some(ZoneCode::Numeric(3))).with_region("CA".to_string()),
        ZoneEntry::new("10001".to_string(), Some(ZoneCode::Numeric(8))).with_region("NY".to_string()),
        ZoneEntry::new("606".to_string(), Some(ZoneCode::Numeric(6))).with_region("IL".to_string()),
    ])
}

fn shipments() -> anyhow::Result<Vec<Shipment>> {
    let ship_date = NaiveDate::from_ymd_opt(2025, 12, 8)
        .ok_or_else(|| anyhow::anyhow!("無效的出貨日期"))?;

    let parcel = |id: &str, postal: &str, dims: (i64, i64, i64), weight: i64| {
        Shipment::new(id.to_string(), ship_date, postal.to_string())
            .with_dimensions(Decimal::from(dims.0), Decimal::from(dims.1), Decimal::from(dims.2))
            .with_weight(Decimal::from(weight))
    };

    let mut missing_weight = parcel("PKG-5", "94105", (12, 12, 12), 1);
    missing_weight.weight = None;

    Ok(vec![
        parcel("PKG-1", "90210", (12, 10, 6), 4),
        parcel("PKG-2", "10001", (35, 11, 10), 19),
        parcel("PKG-3", "60601", (50, 32, 10), 25),
        parcel("PKG-4", "33101", (24, 18, 12), 12).with_region("FL".to_string()),
        missing_weight,
    ])
}

fn main() -> anyhow::Result<()> {
    logging::init();

    println!("=== 多承運商批次估算示例 ===\n");

    let shipments = shipments()?;
    let carriers = [
        (Carrier::OnTrac, "GROUND", 150, 2..=8u8),
        (Carrier::Usps, "GROUND_ADVANTAGE", 70, 1..=9u8),
        (Carrier::P2p, "PARCEL", 70, 1..=8u8),
        (Carrier::Maersk, "GROUND", 70, 1..=8u8),
    ];

    for (carrier, service, max_weight, zones) in carriers {
        let config = CarrierCatalog::default_config(carrier);
        tracing::info!("載入 {} 配置 {}", carrier, config.version);
        let calculator = CostCalculator::new(config, us_zones(), flat_rates(service, max_weight, zones))?;
        let report = calculator.calculate_batch(&shipments)?;

        println!("{} ({})", carrier, report.config_version);
        for record in &report.records {
            let fired: Vec<_> = record.fired_surcharges().collect();
            println!(
                "  {:<6} 區域 {:?} 級距 {:>3} 總計 {:>8} {:?}",
                record.shipment.tracking_number,
                record.zone.rate_zone,
                record.weight.bracket,
                record.total,
                fired
            );
        }
        for failure in report.failures.iter().chain(&report.non_serviceable) {
            println!("  {:<6} 跳過: {}", failure.tracking_number, failure.error);
        }
        println!(
            "  合計 {}（{} 筆完成，區域回退 {} 筆）\n",
            report.summary.total_cost, report.summary.calculated, report.summary.zone_fallbacks
        );
    }

    Ok(())
}
