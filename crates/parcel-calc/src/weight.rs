//! 計費重量

use parcel_core::units::weight_bracket;
use parcel_core::{DimWeightRule, Geometry, WeightAssessment};
use rust_decimal::Decimal;

/// 計費重量解析器
pub struct BillableWeightResolver;

impl BillableWeightResolver {
    /// 材積重與初始計費重量
    ///
    /// 材積重保留完整精度，只在換算級距時進位。
    pub fn resolve(geometry: &Geometry, actual: Decimal, rule: &DimWeightRule) -> WeightAssessment {
        // 除數極小時以上限代替溢位
        let dim_weight = geometry
            .cubic_volume
            .checked_div(rule.divisor)
            .unwrap_or(Decimal::MAX);

        let dim_weight_considered = match rule.volume_floor {
            Some(floor) => geometry.cubic_volume > floor,
            None => true,
        };

        let dim_weight_applied = dim_weight_considered && dim_weight > actual;
        let billable = if dim_weight_applied { dim_weight } else { actual };

        WeightAssessment {
            actual,
            dim_weight,
            dim_weight_considered,
            dim_weight_applied,
            billable,
            minimum_required: None,
            adjusted_billable: billable,
            bracket: weight_bracket(billable),
        }
    }
}
