use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::TaxBracket;

/// Box 1 rates including national insurance premiums, below AOW age.
pub const BOX1_BRACKETS: [TaxBracket; 3] = [
    TaxBracket::new(dec!(0), dec!(38_441), dec!(0.3582)),
    TaxBracket::new(dec!(38_441), dec!(76_817), dec!(0.3748)),
    TaxBracket::open(dec!(76_817), dec!(0.4950)),
];

/// Box 1 rates once the AOW (state pension) age is reached.
pub const BOX1_BRACKETS_AOW: [TaxBracket; 3] = [
    TaxBracket::new(dec!(0), dec!(38_441), dec!(0.1792)),
    TaxBracket::new(dec!(38_441), dec!(76_817), dec!(0.3748)),
    TaxBracket::open(dec!(76_817), dec!(0.4950)),
];

pub const GENERAL_CREDIT_MAX: Decimal = dec!(3_068);
pub const GENERAL_CREDIT_MAX_AOW: Decimal = dec!(1_536);
pub const GENERAL_CREDIT_PHASE_OUT_START: Decimal = dec!(28_406);
pub const GENERAL_CREDIT_PHASE_OUT_RATE: Decimal = dec!(0.06337);
pub const GENERAL_CREDIT_PHASE_OUT_RATE_AOW: Decimal = dec!(0.03170);

/// `(from, credit at from, rate on the excess)` for the labour tax credit.
pub const LABOUR_CREDIT: [(Decimal, Decimal, Decimal); 5] = [
    (dec!(0), dec!(0), dec!(0.08053)),
    (dec!(12_169), dec!(980), dec!(0.30030)),
    (dec!(26_288), dec!(5_220), dec!(0.02258)),
    (dec!(43_071), dec!(5_599), dec!(-0.06510)),
    (dec!(129_078), dec!(0), dec!(0)),
];
/// Share of the labour credit granted above AOW age.
pub const LABOUR_CREDIT_AOW_FACTOR: Decimal = dec!(0.5);

pub const THIRTY_PERCENT_RATE: Decimal = dec!(0.30);
/// Taxable salary may not drop below this norm under the 30% ruling.
pub const THIRTY_PERCENT_SALARY_NORM: Decimal = dec!(46_660);
/// Public-sector remuneration cap (WNT) limiting the ruling.
pub const THIRTY_PERCENT_SALARY_CAP: Decimal = dec!(246_000);

/// Annual room for pre-tax pension saving.
pub const PENSION_ROOM_RATE: Decimal = dec!(0.30);
pub const PENSION_ROOM_FRANCHISE: Decimal = dec!(17_545);
pub const PENSION_ROOM_MAX: Decimal = dec!(35_589);
