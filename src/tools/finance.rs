//! Investment calculators: averaging down, profit, percentage.
//!
//! Money and percentage outputs are rounded to two decimals. A zero or
//! negative divisor yields `0` rather than an error.

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::params::{self, finite};
use crate::tools::round2;
use crate::Request;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StockParams {
    #[serde(deserialize_with = "params::float")]
    pub current_quantity: f64,
    #[serde(deserialize_with = "params::float")]
    pub current_avg_price: f64,
    #[serde(deserialize_with = "params::float")]
    pub additional_quantity: f64,
    #[serde(deserialize_with = "params::float")]
    pub additional_price: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProfitParams {
    #[serde(deserialize_with = "params::float")]
    pub buy_price: f64,
    #[serde(deserialize_with = "params::float")]
    pub sell_price: f64,
    #[serde(deserialize_with = "params::float")]
    pub quantity: f64,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PercentParams {
    #[serde(deserialize_with = "params::float")]
    pub total_value: f64,
    #[serde(deserialize_with = "params::float")]
    pub part_value: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StockAverage {
    /// Not rounded: quantities may be fractional shares.
    pub total_quantity: f64,
    pub total_investment: f64,
    pub new_avg_price: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Profit {
    pub profit_amount: f64,
    pub profit_rate: f64,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct Percentage {
    pub percentage: f64,
}

pub async fn calculate_stock(req: Request) -> Result<StockAverage, ToolError> {
    let p: StockParams = req.json()?;
    checked(stock_average(
        finite("current_quantity", p.current_quantity)?,
        finite("current_avg_price", p.current_avg_price)?,
        finite("additional_quantity", p.additional_quantity)?,
        finite("additional_price", p.additional_price)?,
    ))
}

pub async fn calculate_profit(req: Request) -> Result<Profit, ToolError> {
    let p: ProfitParams = req.json()?;
    checked(profit(
        finite("buy_price", p.buy_price)?,
        finite("sell_price", p.sell_price)?,
        finite("quantity", p.quantity)?,
    ))
}

pub async fn calculate_percent(req: Request) -> Result<Percentage, ToolError> {
    let p: PercentParams = req.json()?;
    checked(percentage(
        finite("total_value", p.total_value)?,
        finite("part_value", p.part_value)?,
    ))
}

pub fn stock_average(qty: f64, avg: f64, add_qty: f64, add_price: f64) -> StockAverage {
    let total_quantity = qty + add_qty;
    let total_investment = qty * avg + add_qty * add_price;
    let new_avg_price = if total_quantity > 0.0 { total_investment / total_quantity } else { 0.0 };

    StockAverage {
        total_quantity,
        total_investment: round2(total_investment),
        new_avg_price: round2(new_avg_price),
    }
}

pub fn profit(buy: f64, sell: f64, quantity: f64) -> Profit {
    let diff = sell - buy;
    let rate = if buy > 0.0 { diff / buy * 100.0 } else { 0.0 };
    Profit { profit_amount: round2(diff * quantity), profit_rate: round2(rate) }
}

pub fn percentage(total: f64, part: f64) -> Percentage {
    let pct = if total > 0.0 { part / total * 100.0 } else { 0.0 };
    Percentage { percentage: round2(pct) }
}

/// Finite inputs can still overflow; JSON has no representation for that.
fn checked<T: AllFinite>(value: T) -> Result<T, ToolError> {
    if value.all_finite() {
        Ok(value)
    } else {
        Err(ToolError::validation("result is out of range"))
    }
}

trait AllFinite {
    fn all_finite(&self) -> bool;
}

impl AllFinite for StockAverage {
    fn all_finite(&self) -> bool {
        [self.total_quantity, self.total_investment, self.new_avg_price].iter().all(|v| v.is_finite())
    }
}

impl AllFinite for Profit {
    fn all_finite(&self) -> bool {
        self.profit_amount.is_finite() && self.profit_rate.is_finite()
    }
}

impl AllFinite for Percentage {
    fn all_finite(&self) -> bool {
        self.percentage.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averaging_down() {
        assert_eq!(
            stock_average(10.0, 100.0, 10.0, 200.0),
            StockAverage { total_quantity: 20.0, total_investment: 3000.0, new_avg_price: 150.0 }
        );
    }

    #[test]
    fn averaging_with_no_shares_is_zero() {
        let r = stock_average(0.0, 100.0, 0.0, 200.0);
        assert_eq!(r.total_quantity, 0.0);
        assert_eq!(r.new_avg_price, 0.0);
    }

    #[test]
    fn average_is_rounded_but_quantity_is_not() {
        let r = stock_average(0.125, 8.0, 0.0, 0.0);
        assert_eq!(r.total_quantity, 0.125);
        assert_eq!(r.total_investment, 1.0);
        assert_eq!(r.new_avg_price, 8.0);

        let r = stock_average(1.0, 1.0, 2.0, 0.0);
        assert_eq!(r.new_avg_price, 0.33);
    }

    #[test]
    fn profit_and_rate() {
        assert_eq!(profit(100.0, 150.0, 10.0), Profit { profit_amount: 500.0, profit_rate: 50.0 });
        assert_eq!(profit(200.0, 150.0, 2.0), Profit { profit_amount: -100.0, profit_rate: -25.0 });
        assert_eq!(profit(0.0, 150.0, 1.0).profit_rate, 0.0);
    }

    #[test]
    fn percent_of_total() {
        assert_eq!(percentage(200.0, 50.0).percentage, 25.0);
        assert_eq!(percentage(3.0, 1.0).percentage, 33.33);
        assert_eq!(percentage(0.0, 50.0).percentage, 0.0);
        assert_eq!(percentage(-10.0, 5.0).percentage, 0.0);
    }

    #[test]
    fn overflow_is_rejected() {
        let r = checked(profit(0.0, f64::MAX, f64::MAX));
        assert_eq!(r, Err(ToolError::validation("result is out of range")));
    }
}
