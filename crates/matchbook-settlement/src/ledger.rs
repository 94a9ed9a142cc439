//! In-memory balance ledger tracking per-(user, asset) holdings.
//!
//! The ledger is deliberately plain: deposits mint, withdrawals burn, and
//! settlement moves value between users via [`BalanceLedger::transfer`].
//! There is no escrow or freeze step; funds are checked at the moment a
//! debit happens.

use std::collections::HashMap;

use rust_decimal::Decimal;

use matchbook_types::{Asset, MatchbookError, Result, UserId};

/// Decimal balances for all users and assets served by one settler.
#[derive(Debug, Default)]
pub struct BalanceLedger {
    /// `(UserId, Asset) → balance`
    balances: HashMap<(UserId, Asset), Decimal>,
}

impl BalanceLedger {
    /// Create a new empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, user: &UserId, asset: &str) -> &mut Decimal {
        self.balances
            .entry((user.clone(), asset.to_string()))
            .or_insert(Decimal::ZERO)
    }

    // =================================================================
    // Core operations
    // =================================================================

    /// Deposit (credit) an amount to the user's balance.
    ///
    /// # Errors
    /// Returns [`MatchbookError::AmountNotPositive`] if `amount` is not
    /// positive.
    pub fn deposit(&mut self, user: &UserId, asset: &str, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(MatchbookError::AmountNotPositive(amount));
        }
        *self.entry(user, asset) += amount;
        Ok(())
    }

    /// Withdraw (debit) an amount from the user's balance.
    ///
    /// # Errors
    /// Returns [`MatchbookError::AmountNotPositive`] if `amount` is not
    /// positive, [`MatchbookError::InsufficientBalance`] if the user holds
    /// less than `amount`.
    pub fn withdraw(&mut self, user: &UserId, asset: &str, amount: Decimal) -> Result<()> {
        if amount <= Decimal::ZERO {
            return Err(MatchbookError::AmountNotPositive(amount));
        }
        let balance = self.entry(user, asset);
        if *balance < amount {
            return Err(MatchbookError::InsufficientBalance {
                needed: amount,
                available: *balance,
            });
        }
        *balance -= amount;
        Ok(())
    }

    /// Move an amount from one user to another.
    ///
    /// Fails without touching either balance when `from` cannot cover it.
    pub fn transfer(
        &mut self,
        from: &UserId,
        to: &UserId,
        asset: &str,
        amount: Decimal,
    ) -> Result<()> {
        self.withdraw(from, asset, amount)?;
        *self.entry(to, asset) += amount;
        Ok(())
    }

    // =================================================================
    // Queries
    // =================================================================

    /// The user's balance of `asset`. Zero if the user never held any.
    #[must_use]
    pub fn balance(&self, user: &UserId, asset: &str) -> Decimal {
        self.balances
            .get(&(user.clone(), asset.to_string()))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// All balances held by one user, keyed by asset.
    #[must_use]
    pub fn user_balances(&self, user: &UserId) -> HashMap<Asset, Decimal> {
        self.balances
            .iter()
            .filter(|((holder, _), _)| holder == user)
            .map(|((_, asset), balance)| (asset.clone(), *balance))
            .collect()
    }

    /// Sum of every user's balance of `asset`.
    ///
    /// Settlement only moves value between users, so this stays constant
    /// across any number of settled trades.
    #[must_use]
    pub fn total_supply(&self, asset: &str) -> Decimal {
        self.balances
            .iter()
            .filter(|((_, held), _)| held == asset)
            .map(|(_, balance)| *balance)
            .sum()
    }
}
