use super::error::{non_negative, ratio, CalcError};
use super::expenses::ExpenseLedger;
use super::rent_roll::{self, RentColumn, RentUnit};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Income and fee assumptions shared by both scenarios
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OperatingAssumptions {
    /// Vacancy and credit loss as a fraction of gross scheduled rent
    #[schemars(with = "f64")]
    pub vacancy_rate: Decimal,
    /// Annual other income (laundry, parking, fees)
    #[schemars(with = "f64")]
    pub other_income: Decimal,
    /// Management fee as a fraction of effective gross income
    #[schemars(with = "f64")]
    pub management_fee_pct: Decimal,
}

/// Annual operating statement for one rent scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OperatingStatement {
    pub column: RentColumn,
    pub gross_scheduled_rent: Decimal,
    pub vacancy_loss: Decimal,
    pub effective_rental_income: Decimal,
    pub other_income: Decimal,
    pub effective_gross_income: Decimal,
    pub fixed_expenses: Decimal,
    pub management_fee: Decimal,
    pub total_expenses: Decimal,
    pub net_operating_income: Decimal,
}

impl OperatingStatement {
    pub fn build(
        units: &[RentUnit],
        column: RentColumn,
        assumptions: &OperatingAssumptions,
        expenses: &ExpenseLedger,
    ) -> Result<Self, CalcError> {
        if units.is_empty() {
            return Err(CalcError::EmptyRentRoll);
        }
        non_negative(assumptions.vacancy_rate, "vacancy rate")?;
        non_negative(assumptions.management_fee_pct, "management fee")?;

        let gross_scheduled_rent = rent_roll::total_monthly(units, column) * dec!(12);
        let vacancy_loss = gross_scheduled_rent * assumptions.vacancy_rate;
        let effective_rental_income = gross_scheduled_rent - vacancy_loss;
        let effective_gross_income = effective_rental_income + assumptions.other_income;

        // Fee is charged on collected income, so it differs between scenarios.
        let management_fee = effective_gross_income * assumptions.management_fee_pct;
        let fixed_expenses = expenses.total();
        let total_expenses = fixed_expenses + management_fee;
        let net_operating_income = effective_gross_income - total_expenses;

        log::debug!(
            "{:?} statement: GSR {}, EGI {}, expenses {}, NOI {}",
            column,
            gross_scheduled_rent,
            effective_gross_income,
            total_expenses,
            net_operating_income
        );

        Ok(Self {
            column,
            gross_scheduled_rent,
            vacancy_loss,
            effective_rental_income,
            other_income: assumptions.other_income,
            effective_gross_income,
            fixed_expenses,
            management_fee,
            total_expenses,
            net_operating_income,
        })
    }

    /// Total expenses as a fraction of effective gross income
    pub fn expense_ratio(&self) -> Result<Decimal, CalcError> {
        ratio(
            self.total_expenses,
            self.effective_gross_income,
            "effective gross income",
        )
    }
}

/// A value computed once per rent scenario
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scenarios<T> {
    pub current: T,
    pub market: T,
}

impl<T> Scenarios<T> {
    /// Evaluate `f` for each rent column.
    pub fn try_new<E>(mut f: impl FnMut(RentColumn) -> Result<T, E>) -> Result<Self, E> {
        Ok(Self {
            current: f(RentColumn::Current)?,
            market: f(RentColumn::Market)?,
        })
    }

    pub fn get(&self, column: RentColumn) -> &T {
        match column {
            RentColumn::Current => &self.current,
            RentColumn::Market => &self.market,
        }
    }
}

/// Build the current and market statements with the same assumptions.
pub fn build_scenarios(
    units: &[RentUnit],
    assumptions: &OperatingAssumptions,
    expenses: &ExpenseLedger,
) -> Result<Scenarios<OperatingStatement>, CalcError> {
    Scenarios::try_new(|column| OperatingStatement::build(units, column, assumptions, expenses))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::expenses::ExpenseItem;

    fn unit(current: Decimal, market: Decimal) -> RentUnit {
        RentUnit {
            unit: "#1".to_string(),
            unit_type: "4 Bed / 2 Bath".to_string(),
            sf: 1350,
            current_rent: current,
            market_rent: market,
        }
    }

    fn assumptions() -> OperatingAssumptions {
        OperatingAssumptions {
            vacancy_rate: dec!(0.03),
            other_income: dec!(7200),
            management_fee_pct: dec!(0.04),
        }
    }

    fn ledger(total: Decimal) -> ExpenseLedger {
        ExpenseLedger::from(vec![ExpenseItem {
            name: "Fixed".to_string(),
            amount: total,
        }])
    }

    #[test]
    fn statement_lines() {
        let units = vec![unit(dec!(2000), dec!(3000)), unit(dec!(1000), dec!(3000))];
        let s = OperatingStatement::build(
            &units,
            RentColumn::Current,
            &assumptions(),
            &ledger(dec!(10000)),
        )
        .unwrap();

        assert_eq!(s.gross_scheduled_rent, dec!(36000));
        assert_eq!(s.vacancy_loss, dec!(1080));
        assert_eq!(s.effective_rental_income, dec!(34920));
        assert_eq!(s.effective_gross_income, dec!(42120));
        assert_eq!(s.management_fee, dec!(1684.80));
        assert_eq!(s.total_expenses, dec!(11684.80));
        assert_eq!(s.net_operating_income, dec!(30435.20));
    }

    #[test]
    fn noi_identity_holds_exactly_for_both_scenarios() {
        let units = vec![
            unit(dec!(1830), dec!(2950)),
            unit(dec!(1859.33), dec!(3200)),
            unit(dec!(1762), dec!(2950.01)),
        ];
        let scenarios = build_scenarios(&units, &assumptions(), &ledger(dec!(218555))).unwrap();
        for column in RentColumn::BOTH {
            let s = scenarios.get(column);
            assert_eq!(s.column, column);
            assert_eq!(
                s.effective_gross_income - s.total_expenses,
                s.net_operating_income
            );
        }
    }

    #[test]
    fn scenarios_do_not_share_rent_columns() {
        let units = vec![unit(dec!(1000), dec!(2000))];
        let scenarios = build_scenarios(&units, &assumptions(), &ledger(dec!(0))).unwrap();
        assert_eq!(scenarios.current.gross_scheduled_rent, dec!(12000));
        assert_eq!(scenarios.market.gross_scheduled_rent, dec!(24000));
        assert!(scenarios.market.management_fee > scenarios.current.management_fee);
        assert_eq!(scenarios.current.fixed_expenses, scenarios.market.fixed_expenses);
    }

    #[test]
    fn empty_rent_roll_is_rejected() {
        let result =
            OperatingStatement::build(&[], RentColumn::Market, &assumptions(), &ledger(dec!(1)));
        assert_eq!(result, Err(CalcError::EmptyRentRoll));
    }

    #[test]
    fn expense_ratio_of_egi() {
        let units = vec![unit(dec!(1000), dec!(1000))];
        let mut a = assumptions();
        a.vacancy_rate = Decimal::ZERO;
        a.other_income = Decimal::ZERO;
        a.management_fee_pct = Decimal::ZERO;
        let s = OperatingStatement::build(&units, RentColumn::Current, &a, &ledger(dec!(3000)))
            .unwrap();
        assert_eq!(s.expense_ratio(), Ok(dec!(0.25)));
    }
}
