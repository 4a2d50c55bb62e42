//! # Vending Machine
//!
//! One customer session: credit in, products out, change back.
//!
//! ## Purchase Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Session State Transitions                           │
//! │                                                                         │
//! │  Shell Action             Machine Call             State Change         │
//! │  ────────────             ────────────             ────────────         │
//! │                                                                         │
//! │  Coin dropped ───────────► insert_coin(d) ───────► till[d] += 1        │
//! │                                                     credit += d         │
//! │                                                                         │
//! │  Slot chosen ────────────► purchase(slot) ───────► credit -= price     │
//! │                             │                       stock[slot] -= 1    │
//! │                             └─ credit < price? InsufficientCredit       │
//! │                                                                         │
//! │  "Take my money" ────────► return_change() ──────► solve(till, credit) │
//! │                             │                       commit(allocation)  │
//! │                             │                       credit = 0          │
//! │                             └─ Infeasible? nothing committed,           │
//! │                                credit kept, remainder reported          │
//! │                                                                         │
//! │  NOTE: Every call either fully applies or leaves the state untouched.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::allocation::Allocation;
use crate::catalog::Catalog;
use crate::denomination::Denomination;
use crate::error::{CoreError, CoreResult, SolveError};
use crate::money::Money;
use crate::solver::{ChangePolicy, ChangeRequest, ChangeStrategy};
use crate::till::Till;
use crate::DEFAULT_MAX_CHANGE_AMOUNT;

/// Record of one completed purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub slot: usize,
    pub product: String,
    pub price: Money,
    /// Credit left after paying.
    pub credit_after: Money,
    pub issued_at: DateTime<Utc>,
}

/// Catalog, till and customer credit for one session.
#[derive(Debug)]
pub struct VendingMachine {
    catalog: Catalog,
    till: Till,
    credit: Money,
    strategy: Box<dyn ChangeStrategy>,
    max_change_amount: Money,
}

impl VendingMachine {
    /// Creates a machine with zero credit and the optimal change policy.
    pub fn new(catalog: Catalog, till: Till) -> Self {
        VendingMachine {
            catalog,
            till,
            credit: Money::zero(),
            strategy: ChangePolicy::default().strategy(),
            max_change_amount: Money::from_units(DEFAULT_MAX_CHANGE_AMOUNT),
        }
    }

    /// Selects the change strategy by policy.
    pub fn with_policy(self, policy: ChangePolicy) -> Self {
        self.with_strategy(policy.strategy())
    }

    /// Injects a change strategy directly.
    pub fn with_strategy(mut self, strategy: Box<dyn ChangeStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Sets the ceiling for a single change computation.
    pub fn with_max_change_amount(mut self, max: Money) -> Self {
        self.max_change_amount = max;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn till(&self) -> &Till {
        &self.till
    }

    /// Credit the customer has not spent yet.
    pub fn credit(&self) -> Money {
        self.credit
    }

    /// Hands back catalog and till, e.g. for saving at the end of a session.
    pub fn into_parts(self) -> (Catalog, Till) {
        (self.catalog, self.till)
    }

    /// Accepts one coin or note. Returns the new credit.
    ///
    /// ## Errors
    /// - `UnknownDenomination` (credit and till unchanged)
    pub fn insert_coin(&mut self, denomination: Denomination) -> CoreResult<Money> {
        self.till.deposit(denomination, 1)?;
        self.credit += denomination.as_money();

        debug!(%denomination, credit = %self.credit, "Coin accepted");
        Ok(self.credit)
    }

    /// How much more must be inserted before `slot` can be bought.
    pub fn amount_needed(&self, slot: usize) -> CoreResult<Money> {
        let product = self.catalog.ensure_available(slot)?;
        Ok(product.price.saturating_sub(self.credit))
    }

    /// Buys one piece from `slot` with the current credit.
    ///
    /// ## Errors
    /// - `ProductNotFound` / `OutOfStock`
    /// - `InsufficientCredit` when the credit does not cover the price
    pub fn purchase(&mut self, slot: usize) -> CoreResult<Receipt> {
        let product = self.catalog.ensure_available(slot)?;
        let price = product.price;

        if self.credit < price {
            return Err(CoreError::InsufficientCredit {
                price,
                credit: self.credit,
                needed: price - self.credit,
            });
        }

        let name = product.name.clone();
        self.catalog.dispense(slot)?;
        self.credit -= price;

        info!(slot, product = %name, %price, credit = %self.credit, "Product dispensed");

        Ok(Receipt {
            slot,
            product: name,
            price,
            credit_after: self.credit,
            issued_at: Utc::now(),
        })
    }

    /// Computes the change for the current credit without paying it out.
    pub fn quote_change(&self) -> Result<Allocation, SolveError> {
        let request =
            ChangeRequest::new(&self.till, self.credit).with_max_amount(self.max_change_amount);
        self.strategy.make_change(&request)
    }

    /// Pays out the remaining credit.
    ///
    /// On success the allocation is committed to the till and the credit
    /// drops to zero. When exact change is impossible nothing is paid, the
    /// credit is kept, and the error carries the remainder.
    pub fn return_change(&mut self) -> CoreResult<Allocation> {
        if self.credit.is_zero() {
            return Ok(Allocation::new());
        }

        let allocation = match self.quote_change() {
            Ok(allocation) => allocation,
            Err(err) => {
                warn!(credit = %self.credit, strategy = self.strategy.name(), error = %err, "Change not paid out");
                return Err(err.into());
            }
        };

        self.till.commit(&allocation)?;
        info!(
            paid = %allocation.total_value(),
            coins = allocation.coin_count(),
            strategy = self.strategy.name(),
            "Change returned"
        );
        self.credit = Money::zero();

        Ok(allocation)
    }

    /// Gives back everything inserted since the last payout, without buying.
    pub fn cancel(&mut self) -> CoreResult<Allocation> {
        debug!(credit = %self.credit, "Session cancelled");
        self.return_change()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    fn d(value: u32) -> Denomination {
        Denomination::new(value).unwrap()
    }

    fn machine(till: Till) -> VendingMachine {
        let catalog = Catalog::new(vec![
            Product::new("Pepsi", Money::from_units(15), 3).unwrap(),
            Product::new("Chipsy", Money::from_units(7), 0).unwrap(),
            Product::new("Water", Money::from_units(13), 1).unwrap(),
        ]);
        VendingMachine::new(catalog, till)
    }

    #[test]
    fn test_insert_coin_credits_and_deposits() {
        let mut vm = machine(Till::with_denominations([d(5), d(10)]));
        vm.insert_coin(d(10)).unwrap();
        assert_eq!(vm.insert_coin(d(5)).unwrap(), Money::from_units(15));
        assert_eq!(vm.till().count(d(10)), 1);
        assert_eq!(vm.till().count(d(5)), 1);
    }

    #[test]
    fn test_unknown_coin_rejected() {
        let mut vm = machine(Till::with_denominations([d(5)]));
        assert!(matches!(vm.insert_coin(d(3)), Err(CoreError::Till(_))));
        assert!(vm.credit().is_zero());
    }

    #[test]
    fn test_purchase_requires_credit() {
        let mut vm = machine(Till::with_denominations([d(10)]));
        vm.insert_coin(d(10)).unwrap();

        assert_eq!(vm.amount_needed(1).unwrap(), Money::from_units(5));
        assert_eq!(
            vm.purchase(1).unwrap_err(),
            CoreError::InsufficientCredit {
                price: Money::from_units(15),
                credit: Money::from_units(10),
                needed: Money::from_units(5),
            }
        );
        assert_eq!(vm.catalog().product(1).unwrap().stock, 3);
    }

    #[test]
    fn test_purchase_and_change() {
        let till = Till::from_counts([(d(1), 5), (d(5), 2), (d(10), 0), (d(20), 0)]);
        let mut vm = machine(till);

        vm.insert_coin(d(20)).unwrap();
        vm.insert_coin(d(10)).unwrap();
        let receipt = vm.purchase(1).unwrap();

        assert_eq!(receipt.product, "Pepsi");
        assert_eq!(receipt.credit_after, Money::from_units(15));
        assert_eq!(vm.catalog().product(1).unwrap().stock, 2);

        // 15 back: the customer's own 10 plus a 5
        let change = vm.return_change().unwrap();
        assert_eq!(change, Allocation::from_counts([(d(10), 1), (d(5), 1)]));
        assert!(vm.credit().is_zero());
        assert_eq!(vm.till().count(d(20)), 1);
        assert_eq!(vm.till().count(d(10)), 0);
        assert_eq!(vm.till().count(d(5)), 1);
    }

    #[test]
    fn test_infeasible_change_keeps_credit_and_till() {
        let till = Till::from_counts([(d(1), 0), (d(5), 3), (d(20), 0)]);
        let mut vm = machine(till);

        vm.insert_coin(d(20)).unwrap();
        vm.purchase(3).unwrap();
        assert_eq!(vm.credit(), Money::from_units(7));

        let before = vm.till().clone();
        match vm.return_change().unwrap_err() {
            CoreError::Solve(SolveError::Infeasible(shortfall)) => {
                assert_eq!(shortfall.remainder(), Money::from_units(2));
            }
            other => panic!("expected Infeasible, got {:?}", other),
        }
        assert_eq!(vm.till(), &before);
        assert_eq!(vm.credit(), Money::from_units(7));

        // Three more 1s bring the credit to 10, which two 5s cover.
        for _ in 0..3 {
            vm.insert_coin(d(1)).unwrap();
        }
        let change = vm.return_change().unwrap();
        assert_eq!(change, Allocation::from_counts([(d(5), 2)]));
        assert!(vm.credit().is_zero());
        assert_eq!(vm.till().count(d(1)), 3);
    }

    #[test]
    fn test_cancel_refunds_inserted_coins() {
        let mut vm = machine(Till::with_denominations([d(5), d(10)]));
        vm.insert_coin(d(10)).unwrap();
        vm.insert_coin(d(5)).unwrap();

        let refund = vm.cancel().unwrap();
        assert_eq!(refund.total_value(), Money::from_units(15));
        assert!(vm.till().is_empty());
        assert_eq!(vm.catalog().product(1).unwrap().stock, 3);
    }

    #[test]
    fn test_zero_credit_returns_nothing() {
        let mut vm = machine(Till::new());
        assert!(vm.return_change().unwrap().is_empty());
    }

    #[derive(Debug)]
    struct NeverPays;

    impl ChangeStrategy for NeverPays {
        fn name(&self) -> &'static str {
            "never-pays"
        }

        fn make_change(&self, request: &ChangeRequest<'_>) -> Result<Allocation, SolveError> {
            Err(request.infeasible(request.target()?))
        }
    }

    #[test]
    fn test_injected_strategy_is_used() {
        let mut vm = machine(Till::with_denominations([d(5)])).with_strategy(Box::new(NeverPays));
        vm.insert_coin(d(5)).unwrap();

        assert!(matches!(vm.return_change(), Err(CoreError::Solve(_))));
        assert_eq!(vm.credit(), Money::from_units(5));
        assert_eq!(vm.till().count(d(5)), 1);
    }

    #[test]
    fn test_greedy_first_policy_pays_change() {
        let till = Till::from_counts([(d(2), 3), (d(5), 1), (d(20), 0)]);
        let mut vm = machine(till).with_policy(ChangePolicy::GreedyFirst);

        vm.insert_coin(d(20)).unwrap();
        vm.purchase(3).unwrap();
        // 7 = 5 + 2
        let change = vm.return_change().unwrap();
        assert_eq!(change, Allocation::from_counts([(d(5), 1), (d(2), 1)]));
    }

    #[test]
    fn test_change_ceiling() {
        let mut vm = machine(Till::with_denominations([d(20)]))
            .with_max_change_amount(Money::from_units(10));
        vm.insert_coin(d(20)).unwrap();
        assert!(matches!(
            vm.return_change(),
            Err(CoreError::Solve(SolveError::AmountTooLarge { .. }))
        ));
    }
}
