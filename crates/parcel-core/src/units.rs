//! 數值捨入與重量級距

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 尺寸捨入到小數一位（銀行家捨入，與發票一致）
///
/// 單位換算誤差（如 76.2cm → 30.0000001in）在此一次性消除，之後所有門檻比較都使用捨入後的值。
pub fn round_dimension(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointNearestEven)
}

/// 材積捨入到整數
pub fn round_volume(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// 金額捨入到分（四捨五入）
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// 計費重量對應的整數級距：無條件進位，最小為 1
pub fn weight_bracket(weight: Decimal) -> u32 {
    let ceiled = weight.ceil();
    if ceiled < Decimal::ONE {
        return 1;
    }
    ceiled.to_u32().unwrap_or(u32::MAX)
}
