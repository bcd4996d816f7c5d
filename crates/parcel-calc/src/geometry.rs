//! 尺寸解析

use parcel_core::units::{round_dimension, round_volume};
use parcel_core::{CostError, Geometry, Shipment};
use rust_decimal::Decimal;

/// 尺寸解析器
pub struct GeometryResolver;

impl GeometryResolver {
    /// 捨入三邊並計算衍生尺寸
    ///
    /// 原始尺寸只在此捨入一次；缺值、非正值或超過上限為單筆輸入錯誤。
    pub fn resolve(shipment: &Shipment) -> parcel_core::Result<Geometry> {
        let length = round_dimension(required(shipment, shipment.length, "length")?);
        let width = round_dimension(required(shipment, shipment.width, "width")?);
        let height = round_dimension(required(shipment, shipment.height, "height")?);

        let mut sides = [length, width, height];
        sides.sort_unstable_by(|a, b| b.cmp(a));
        let [longest, second_longest, shortest] = sides;

        let cubic_volume = length
            .checked_mul(width)
            .and_then(|area| area.checked_mul(height))
            .map(round_volume)
            .ok_or_else(|| invalid_value(shipment, "dimensions", &geometry_text(&sides)))?;
        let length_plus_girth = second_longest
            .checked_add(shortest)
            .and_then(|sum| sum.checked_mul(Decimal::TWO))
            .and_then(|girth| girth.checked_add(longest))
            .map(round_dimension)
            .ok_or_else(|| invalid_value(shipment, "dimensions", &geometry_text(&sides)))?;

        Ok(Geometry {
            length,
            width,
            height,
            longest,
            second_longest,
            shortest,
            length_plus_girth,
            cubic_volume,
        })
    }

    /// 驗證實際重量
    pub fn actual_weight(shipment: &Shipment) -> parcel_core::Result<Decimal> {
        required(shipment, shipment.weight, "weight")
    }
}

/// 單一尺寸或重量的合理上限（任何單位制）
fn max_measure() -> Decimal {
    Decimal::new(1_000_000, 0)
}

fn invalid_value(shipment: &Shipment, field: &'static str, value: &str) -> CostError {
    CostError::InvalidValue {
        shipment_id: shipment.tracking_number.clone(),
        field,
        value: value.to_string(),
    }
}

fn geometry_text(sides: &[Decimal; 3]) -> String {
    format!("{}x{}x{}", sides[0], sides[1], sides[2])
}

fn required(
    shipment: &Shipment,
    value: Option<Decimal>,
    field: &'static str,
) -> parcel_core::Result<Decimal> {
    let value = value.ok_or_else(|| CostError::MissingField {
        shipment_id: shipment.tracking_number.clone(),
        field,
    })?;

    if value <= Decimal::ZERO || value > max_measure() {
        return Err(invalid_value(shipment, field, &value.to_string()));
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    fn shipment(length: Decimal, width: Decimal, height: Decimal) -> Shipment {
        Shipment::new(
            "G-1".to_string(),
            NaiveDate::from_ymd_opt(2025, 4, 1).unwrap(),
            "10001".to_string(),
        )
        .with_dimensions(length, width, height)
        .with_weight(dec!(5))
    }

    #[test]
    fn test_sorted_sides_and_girth() {
        let geometry = GeometryResolver::resolve(&shipment(dec!(10), dec!(50), dec!(32))).unwrap();

        assert_eq!(geometry.longest, dec!(50));
        assert_eq!(geometry.second_longest, dec!(32));
        assert_eq!(geometry.shortest, dec!(10));
        assert_eq!(geometry.length_plus_girth, dec!(134));
        assert_eq!(geometry.cubic_volume, dec!(16000));
        assert_eq!(geometry.length, dec!(10));
    }

    #[rstest]
    #[case(dec!(30.04), dec!(30.0))]
    #[case(dec!(30.05), dec!(30.0))]
    #[case(dec!(30.15), dec!(30.2))]
    #[case(dec!(30.06), dec!(30.1))]
    fn test_dimension_rounded_before_comparison(#[case] raw: Decimal, #[case] expected: Decimal) {
        let geometry = GeometryResolver::resolve(&shipment(raw, dec!(5), dec!(5))).unwrap();
        assert_eq!(geometry.longest, expected);
    }

    #[test]
    fn test_volume_rounded_to_integer() {
        let geometry =
            GeometryResolver::resolve(&shipment(dec!(10.5), dec!(10.5), dec!(10.1))).unwrap();
        // 10.5 × 10.5 × 10.1 = 1113.525
        assert_eq!(geometry.cubic_volume, dec!(1114));
    }

    #[test]
    fn test_missing_dimension() {
        let mut record = shipment(dec!(10), dec!(10), dec!(10));
        record.height = None;
        let err = GeometryResolver::resolve(&record).unwrap_err();
        assert_eq!(
            err,
            CostError::MissingField {
                shipment_id: "G-1".to_string(),
                field: "height"
            }
        );
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-1))]
    fn test_non_positive_dimension(#[case] value: Decimal) {
        let err = GeometryResolver::resolve(&shipment(value, dec!(10), dec!(10))).unwrap_err();
        assert!(matches!(err, CostError::InvalidValue { field: "length", .. }));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_absurd_dimension_rejected() {
        let err = GeometryResolver::resolve(&shipment(dec!(10000000000), dec!(10), dec!(10)))
            .unwrap_err();
        assert!(matches!(err, CostError::InvalidValue { field: "length", .. }));
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_large_but_plausible_dimensions() {
        let geometry =
            GeometryResolver::resolve(&shipment(dec!(1000000), dec!(1000000), dec!(1000000)))
                .unwrap();
        assert_eq!(geometry.cubic_volume, dec!(1000000000000000000));
        assert_eq!(geometry.length_plus_girth, dec!(5000000));
    }

    #[test]
    fn test_actual_weight() {
        let record = shipment(dec!(10), dec!(10), dec!(10));
        assert_eq!(GeometryResolver::actual_weight(&record).unwrap(), dec!(5));

        let record = record.with_weight(dec!(0));
        assert!(GeometryResolver::actual_weight(&record).is_err());

        let record = record.with_weight(dec!(5000000));
        assert!(GeometryResolver::actual_weight(&record).is_err());
    }
}
