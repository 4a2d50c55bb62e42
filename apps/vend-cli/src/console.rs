//! # Console Session
//!
//! The line-oriented purchase loop. Reads from any `BufRead` and writes to
//! any `Write`, so tests drive it with in-memory buffers.
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Console Session                                  │
//! │                                                                         │
//! │  ┌──► list products ──► select slot ──(0 / EOF)──────────┐              │
//! │  │                          │                             │              │
//! │  │                          ▼                             │              │
//! │  │            insert coins until credit ≥ price           │              │
//! │  │              (0 cancels, bad coin re-prompts)          │              │
//! │  │                          │                             │              │
//! │  │                          ▼                             │              │
//! │  │               purchase, show stock + till              │              │
//! │  │                          │                             │              │
//! │  │               1. buy another / 2. exit ────────────────┤              │
//! │  │                                                        ▼              │
//! │  │                                             return change            │
//! │  │                                                        │              │
//! │  └────── 1. buy another ◄── no exact change ◄─────────────┤              │
//! │                              2. leave balance ──► end     │              │
//! │                                                           ▼              │
//! │                                                          end             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Invalid input never ends the session; the prompt is simply repeated.

use std::io::{self, BufRead, Write};

use tracing::{info, warn};
use vend_core::{
    Allocation, CoreError, Denomination, Money, Receipt, SolveError, VendingMachine,
};

use crate::report::{change_line, product_line, stock_lines, till_lines};

/// What happened during one session.
#[derive(Debug, Default)]
pub struct SessionSummary {
    pub receipts: Vec<Receipt>,
    /// Change paid out at the end, if any was due and payable.
    pub change: Option<Allocation>,
    /// Credit the customer chose to leave because exact change was impossible.
    pub left_in_machine: Money,
}

enum Payment {
    Covered,
    Cancelled,
    Closed,
}

enum NextStep {
    BuyAnother,
    Finish,
}

/// Console front end for a [`VendingMachine`].
pub struct Console<R, W> {
    input: R,
    output: W,
    currency: String,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, currency: impl Into<String>) -> Self {
        Console {
            input,
            output,
            currency: currency.into(),
        }
    }

    /// Runs purchases until the customer leaves or input ends.
    pub fn run(&mut self, vm: &mut VendingMachine) -> io::Result<SessionSummary> {
        let mut summary = SessionSummary::default();

        'session: loop {
            while let Some(slot) = self.select_product(vm)? {
                match self.collect_payment(vm, slot)? {
                    Payment::Covered => {}
                    Payment::Cancelled => {
                        writeln!(self.output, "Transaction canceled.")?;
                        continue;
                    }
                    Payment::Closed => break,
                }

                match vm.purchase(slot) {
                    Ok(receipt) => {
                        writeln!(
                            self.output,
                            "Dispensed {}. Remaining balance: {} {}.",
                            receipt.product, receipt.credit_after, self.currency
                        )?;
                        summary.receipts.push(receipt);
                    }
                    Err(e) => writeln!(self.output, "{}", e)?,
                }

                self.show_state(vm)?;
                if let NextStep::Finish = self.next_step()? {
                    break;
                }
            }

            if vm.credit().is_zero() {
                break;
            }

            writeln!(
                self.output,
                "Returning remaining money: {} {}.",
                vm.credit(),
                self.currency
            )?;
            match vm.return_change() {
                Ok(change) => {
                    writeln!(
                        self.output,
                        "Change given: {}",
                        change_line(&change, &self.currency)
                    )?;
                    summary.change = Some(change);
                    break;
                }
                Err(CoreError::Solve(SolveError::Infeasible(shortfall))) => {
                    writeln!(
                        self.output,
                        "Sorry, exact change is not possible. Remaining: {} {}.",
                        shortfall.remainder(),
                        self.currency
                    )?;
                }
                Err(e) => writeln!(self.output, "Could not return change: {}", e)?,
            }

            let choice = self.menu(&[
                "Buy another item with the balance",
                "Leave the balance in the machine",
            ])?;
            if choice != Some(1) {
                summary.left_in_machine = vm.credit();
                warn!(credit = %vm.credit(), "Customer left without change");
                break 'session;
            }
        }

        writeln!(self.output, "Thank you for using the vending machine!")?;
        self.output.flush()?;

        info!(
            sold = summary.receipts.len(),
            left_in_machine = %summary.left_in_machine,
            "Console session finished"
        );
        Ok(summary)
    }

    // =========================================================================
    // Steps
    // =========================================================================

    /// Lists products and reads a slot. `None` means the customer is done.
    fn select_product(&mut self, vm: &VendingMachine) -> io::Result<Option<usize>> {
        let available: Vec<String> = vm
            .catalog()
            .in_stock()
            .map(|(slot, product)| product_line(slot, product, &self.currency))
            .collect();
        if available.is_empty() {
            writeln!(self.output, "Sorry, everything is sold out.")?;
            return Ok(None);
        }

        writeln!(self.output, "Available products:")?;
        for line in &available {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output, "Enter 0 to exit.")?;

        loop {
            let Some(choice) = self.prompt_number("Select a product by number: ")? else {
                return Ok(None);
            };
            if choice == 0 {
                return Ok(None);
            }

            let slot = usize::try_from(choice).unwrap_or(0);
            match vm.catalog().ensure_available(slot) {
                Ok(product) => {
                    writeln!(
                        self.output,
                        "Selected product: {} - Price: {} {}",
                        product.name, product.price, self.currency
                    )?;
                    return Ok(Some(slot));
                }
                Err(_) => {
                    writeln!(self.output, "Invalid choice or out of stock. Try again.")?;
                }
            }
        }
    }

    /// Takes coins one at a time until the credit covers `slot`.
    fn collect_payment(&mut self, vm: &mut VendingMachine, slot: usize) -> io::Result<Payment> {
        loop {
            let needed = match vm.amount_needed(slot) {
                Ok(needed) => needed,
                Err(e) => {
                    writeln!(self.output, "{}", e)?;
                    return Ok(Payment::Cancelled);
                }
            };
            if needed.is_zero() {
                return Ok(Payment::Covered);
            }

            let prompt = format!(
                "Insert {} {} (enter a denomination, 0 to cancel): ",
                needed, self.currency
            );
            let Some(value) = self.prompt_number(&prompt)? else {
                return Ok(Payment::Closed);
            };
            if value == 0 {
                return Ok(Payment::Cancelled);
            }

            let inserted = u32::try_from(value)
                .ok()
                .and_then(|v| Denomination::new(v).ok())
                .map(|denomination| vm.insert_coin(denomination));
            match inserted {
                Some(Ok(credit)) => {
                    writeln!(self.output, "Balance: {} {}.", credit, self.currency)?;
                }
                _ => writeln!(self.output, "Invalid denomination. Try again.")?,
            }
        }
    }

    fn show_state(&mut self, vm: &VendingMachine) -> io::Result<()> {
        writeln!(self.output, "Remaining stock of products:")?;
        for line in stock_lines(vm.catalog()) {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output)?;

        writeln!(self.output, "Remaining currency in the vending machine:")?;
        for line in till_lines(vm.till(), &self.currency) {
            writeln!(self.output, "{}", line)?;
        }
        writeln!(self.output)
    }

    fn next_step(&mut self) -> io::Result<NextStep> {
        let choice = self.menu(&["Buy another item", "Exit and take remaining money"])?;
        Ok(match choice {
            Some(1) => NextStep::BuyAnother,
            _ => NextStep::Finish,
        })
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Shows a numbered menu and reads a valid choice. `None` at end of input.
    fn menu(&mut self, options: &[&str]) -> io::Result<Option<usize>> {
        writeln!(self.output, "Do you want to:")?;
        for (index, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", index + 1, option)?;
        }

        loop {
            let Some(choice) = self.prompt_number("Choice: ")? else {
                return Ok(None);
            };
            match usize::try_from(choice) {
                Ok(choice) if (1..=options.len()).contains(&choice) => return Ok(Some(choice)),
                _ => writeln!(self.output, "Please choose 1-{}.", options.len())?,
            }
        }
    }

    /// Prompts until a whole number is entered. `None` at end of input.
    fn prompt_number(&mut self, prompt: &str) -> io::Result<Option<i64>> {
        loop {
            write!(self.output, "{}", prompt)?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            match line.trim().parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use vend_core::{Catalog, Product, Till};

    fn d(value: u32) -> Denomination {
        Denomination::new(value).unwrap()
    }

    fn machine(till: Till) -> VendingMachine {
        let catalog = Catalog::new(vec![
            Product::new("Pepsi", Money::from_units(15), 2).unwrap(),
            Product::new("Chipsy", Money::from_units(7), 0).unwrap(),
            Product::new("Water", Money::from_units(13), 1).unwrap(),
        ]);
        VendingMachine::new(catalog, till)
    }

    fn run(vm: &mut VendingMachine, input: &str) -> (SessionSummary, String) {
        let mut output = Vec::new();
        let summary = Console::new(Cursor::new(input.to_string()), &mut output, "EGP")
            .run(vm)
            .unwrap();
        (summary, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_buy_and_take_change() {
        let mut vm = machine(Till::from_counts([(d(1), 5), (d(5), 2), (d(20), 0)]));

        // Pepsi, pay with a 20, exit
        let (summary, out) = run(&mut vm, "1\n20\n2\n");

        assert_eq!(summary.receipts.len(), 1);
        assert_eq!(
            summary.change,
            Some(Allocation::from_counts([(d(5), 1)]))
        );
        assert!(out.contains("Dispensed Pepsi. Remaining balance: 5 EGP."));
        assert!(out.contains("Change given: 1 x 5 EGP"));
        assert!(out.ends_with("Thank you for using the vending machine!\n"));
        assert!(vm.credit().is_zero());
    }

    #[test]
    fn test_invalid_input_is_reprompted() {
        let mut vm = machine(Till::from_counts([(d(5), 0), (d(10), 0)]));

        // garbage, sold-out slot, bad coin, then a clean purchase
        let (summary, out) = run(&mut vm, "abc\n2\n9\n1\n3\n10\n5\n2\n");

        assert!(out.contains("Please enter a number."));
        assert!(out.contains("Invalid choice or out of stock. Try again."));
        assert!(out.contains("Invalid denomination. Try again."));
        assert_eq!(summary.receipts.len(), 1);
        assert_eq!(vm.till().count(d(10)), 1);
        assert_eq!(vm.till().count(d(5)), 1);
    }

    #[test]
    fn test_balance_pays_for_next_item() {
        let mut vm = machine(Till::from_counts([(d(1), 0), (d(20), 0), (d(10), 0)]));

        // 10 + 20 for a Pepsi leaves 15, which buys the next Pepsi
        let (summary, out) = run(&mut vm, "1\n10\n20\n1\n1\n2\n");

        assert_eq!(summary.receipts.len(), 2);
        assert!(out.contains("Remaining balance: 0 EGP."));
        assert!(summary.change.is_none());
        assert_eq!(vm.catalog().product(1).unwrap().stock, 0);
    }

    #[test]
    fn test_shortfall_offers_another_purchase() {
        let mut vm = machine(Till::from_counts([(d(1), 0), (d(5), 3), (d(20), 0)]));

        // Water (13) paid with 20 leaves 7; the 5s reach 5 at most.
        let (summary, out) = run(&mut vm, "3\n20\n2\n2\n");

        assert!(out.contains("Sorry, exact change is not possible. Remaining: 2 EGP."));
        assert_eq!(summary.left_in_machine, Money::from_units(7));
        assert!(summary.change.is_none());
        assert_eq!(vm.till().count(d(5)), 3);
    }

    #[test]
    fn test_shortfall_then_buy_another() {
        let mut vm = machine(Till::from_counts([(d(1), 0), (d(5), 3), (d(20), 0)]));

        // Water leaves 7 with no exact change. A 10 on top buys a Pepsi,
        // and the remaining 2 is still unpayable.
        let (summary, out) = run(&mut vm, "3\n20\n2\n1\n1\n10\n2\n2\n");

        assert_eq!(summary.receipts.len(), 2);
        assert!(out.contains("Remaining: 2 EGP."));
        assert_eq!(summary.left_in_machine, Money::from_units(2));
    }

    #[test]
    fn test_cancel_keeps_coins_as_credit() {
        let mut vm = machine(Till::from_counts([(d(5), 0), (d(10), 0)]));

        // Start paying for Pepsi, cancel, then exit: the 10 comes back.
        let (summary, out) = run(&mut vm, "1\n10\n0\n0\n");

        assert!(out.contains("Transaction canceled."));
        assert!(summary.receipts.is_empty());
        assert_eq!(summary.change, Some(Allocation::from_counts([(d(10), 1)])));
    }

    #[test]
    fn test_end_of_input_finishes_session() {
        let mut vm = machine(Till::from_counts([(d(5), 0), (d(10), 0)]));

        let (summary, out) = run(&mut vm, "1\n5\n");

        assert!(summary.receipts.is_empty());
        assert_eq!(summary.change, Some(Allocation::from_counts([(d(5), 1)])));
        assert!(out.contains("Thank you"));
    }
}
