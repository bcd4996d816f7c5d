//! 運費流程的性質測試

use chrono::{Days, NaiveDate};
use parcel_calc::CostCalculator;
use parcel_core::{
    Carrier, CarrierConfig, DimWeightRule, Field, FuelSurcharge, Period, Pricing, RateTable,
    ServiceRates, Shipment, SurchargeRule, Trigger, ZoneCode, ZoneEntry, ZoneRules, ZoneTable,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const HANDLING: [&str; 3] = ["LPS", "AHS", "AHS_WEIGHT"];

fn calculator() -> CostCalculator {
    let demand = Period::from_month_days(9, 27, 1, 16).unwrap();
    let config = CarrierConfig::new(
        Carrier::OnTrac,
        "prop-test".to_string(),
        "GROUND".to_string(),
        DimWeightRule::always(dec!(250)),
        ZoneRules::new(5),
    )
    .with_fuel(FuelSurcharge::new(dec!(0.25), dec!(0.20)))
    .with_rules(vec![
        SurchargeRule::new("LPS".to_string(), Pricing::flat(dec!(240), dec!(0.6)))
            .when(Trigger::any(vec![
                Trigger::gt(Field::LongestSide, dec!(72)),
                Trigger::gt(Field::CubicVolume, dec!(17280)),
            ]))
            .in_group("handling", 1)
            .with_min_billable_weight(dec!(90)),
        SurchargeRule::new("AHS".to_string(), Pricing::flat(dec!(33), dec!(0.7)))
            .when(Trigger::any(vec![
                Trigger::gt(Field::LongestSide, dec!(48)),
                Trigger::gt(Field::SecondLongestSide, dec!(30)),
                Trigger::gt(Field::CubicVolume, dec!(8640)),
            ]))
            .in_group("handling", 2),
        SurchargeRule::new("AHS_WEIGHT".to_string(), Pricing::flat(dec!(33), dec!(0.7)))
            .when(Trigger::gt(Field::ActualWeight, dec!(50)))
            .in_group("handling", 3),
        SurchargeRule::new(
            "RES".to_string(),
            Pricing::allocated(dec!(4), dec!(0.5), dec!(0.8)),
        ),
        SurchargeRule::new("DEM_AHS".to_string(), Pricing::flat(dec!(4.66), dec!(0.5)))
            .depends_on("AHS")
            .during(demand),
        SurchargeRule::new("DEM_LPS".to_string(), Pricing::flat(dec!(50), dec!(0.5)))
            .depends_on("LPS")
            .during(demand),
    ]);

    let zones = ZoneTable::new(
        (2..=8u8)
            .map(|zone| ZoneEntry::new(format!("9000{}", zone), Some(ZoneCode::Numeric(zone))))
            .collect(),
    );

    let mut ground = ServiceRates::new("GROUND".to_string(), 150);
    for bracket in 1..=150u32 {
        for zone in 2..=8u8 {
            let rate = dec!(6.25)
                + dec!(0.25) * Decimal::from(bracket)
                + dec!(0.75) * Decimal::from(zone - 2);
            ground = ground.with_net_rate(bracket, zone, rate);
        }
    }

    CostCalculator::new(config, zones, RateTable::new().with_service(ground)).unwrap()
}

fn tenths(range: std::ops::RangeInclusive<i64>) -> impl Strategy<Value = Decimal> {
    range.prop_map(|value| Decimal::new(value, 1))
}

fn arb_shipment() -> impl Strategy<Value = Shipment> {
    (
        tenths(1..=1200),
        tenths(1..=1200),
        tenths(1..=1200),
        tenths(1..=1500),
        2..=8u8,
        0..365u64,
    )
        .prop_map(|(length, width, height, weight, zone, offset)| {
            let date = NaiveDate::from_ymd_opt(2025, 1, 1)
                .and_then(|start| start.checked_add_days(Days::new(offset)))
                .unwrap();
            Shipment::new("PROP".to_string(), date, format!("9000{}", zone))
                .with_dimensions(length, width, height)
                .with_weight(weight)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_billable_never_below_actual(shipment in arb_shipment()) {
        let record = calculator().calculate(&shipment).unwrap();
        prop_assert!(record.weight.billable >= record.weight.actual);
        prop_assert!(record.weight.adjusted_billable >= record.weight.billable);
    }

    #[test]
    fn prop_at_most_one_charge_per_group(shipment in arb_shipment()) {
        let record = calculator().calculate(&shipment).unwrap();
        let fired = HANDLING.iter().filter(|name| record.fired(name)).count();
        prop_assert!(fired <= 1);

        let charged = record
            .surcharges
            .iter()
            .filter(|line| HANDLING.contains(&line.name.as_str()) && !line.cost.is_zero())
            .count();
        prop_assert!(charged <= 1);
        prop_assert!(record.surcharges.iter().all(|line| line.fired || line.cost.is_zero()));
    }

    #[test]
    fn prop_dependent_requires_dependency(shipment in arb_shipment()) {
        let record = calculator().calculate(&shipment).unwrap();
        prop_assert!(!record.fired("DEM_AHS") || record.fired("AHS"));
        prop_assert!(!record.fired("DEM_LPS") || record.fired("LPS"));
    }

    #[test]
    fn prop_base_rate_monotonic_in_weight(
        shipment in arb_shipment(),
        extra in tenths(0..=500),
    ) {
        let calculator = calculator();
        let lighter = calculator.calculate(&shipment).unwrap();
        let heavier_shipment = shipment.clone().with_weight(lighter.weight.actual + extra);
        let heavier = calculator.calculate(&heavier_shipment).unwrap();
        prop_assert!(heavier.base_rate.net() >= lighter.base_rate.net());
    }

    #[test]
    fn prop_rerun_is_identical(shipment in arb_shipment()) {
        let calculator = calculator();
        let first = serde_json::to_string(&calculator.calculate(&shipment).unwrap()).unwrap();
        let second = serde_json::to_string(&calculator.calculate(&shipment).unwrap()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_total_is_subtotal_plus_fuel(shipment in arb_shipment()) {
        let record = calculator().calculate(&shipment).unwrap();
        prop_assert_eq!(record.total, record.subtotal + record.fuel);
        prop_assert_eq!(record.subtotal.round_dp(2), record.subtotal);
    }
}
