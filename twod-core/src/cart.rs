use crate::error::{Result, TwoDError};
use serde::{Deserialize, Serialize};

/// A stake on one two-digit number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BetEntry {
    #[serde(rename = "num")]
    pub number: String,
    pub amount: u64,
}

/// Pending bets, unique by number, in first-insertion order.
///
/// `total()` always equals the sum of the entry amounts; it is recomputed on
/// every mutation and cannot be set directly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BetCart {
    entries: Vec<BetEntry>,
    total_amount: u64,
}

impl BetCart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[BetEntry] {
        &self.entries
    }

    pub fn total(&self) -> u64 {
        self.total_amount
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, number: &str) -> Option<&BetEntry> {
        self.entries.iter().find(|e| e.number == number)
    }

    pub fn contains(&self, number: &str) -> bool {
        self.get(number).is_some()
    }

    /// Inserts `number` or overwrites its stake if already present.
    ///
    /// Fails without changing the cart if the total would overflow.
    pub fn add_or_update(&mut self, number: &str, amount: u64) -> Result<()> {
        validate_number(number)?;

        let index = self.position(number);
        let total = self.total_with(index, amount)?;

        match index {
            Some(i) => self.entries[i].amount = amount,
            None => self.entries.push(BetEntry {
                number: number.to_string(),
                amount,
            }),
        }

        self.total_amount = total;
        Ok(())
    }

    /// Changes the stake of an existing entry without moving it.
    pub fn edit(&mut self, number: &str, new_amount: u64) -> Result<()> {
        let index = self
            .position(number)
            .ok_or_else(|| TwoDError::not_found(number))?;
        let total = self.total_with(Some(index), new_amount)?;

        self.entries[index].amount = new_amount;
        self.total_amount = total;
        Ok(())
    }

    pub fn remove(&mut self, number: &str) -> Result<BetEntry> {
        let index = self
            .position(number)
            .ok_or_else(|| TwoDError::not_found(number))?;

        let removed = self.entries.remove(index);
        self.total_amount -= removed.amount;
        Ok(removed)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.total_amount = 0;
    }

    fn position(&self, number: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.number == number)
    }

    // Total after setting the entry at `index` (or a new one) to `amount`.
    fn total_with(&self, index: Option<usize>, amount: u64) -> Result<u64> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != index)
            .try_fold(amount, |acc, (_, e)| acc.checked_add(e.amount))
            .ok_or_else(|| {
                TwoDError::validation(format!(
                    "Stake {} would push the cart total past {}",
                    amount,
                    u64::MAX
                ))
            })
    }
}

/// Minimum-stake floor applied where entries are created, edited or submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StakePolicy {
    pub min_stake: u64,
}

impl Default for StakePolicy {
    fn default() -> Self {
        Self {
            min_stake: crate::config::DEFAULT_MIN_STAKE,
        }
    }
}

impl StakePolicy {
    pub fn new(min_stake: u64) -> Self {
        Self { min_stake }
    }

    pub fn check(&self, amount: u64) -> Result<()> {
        if amount < self.min_stake {
            return Err(TwoDError::validation(format!(
                "ထိုးကြေး အနည်းဆုံး {} ထည့်ပါ။ (minimum stake is {}, got {})",
                self.min_stake, self.min_stake, amount
            )));
        }
        Ok(())
    }

    /// Every entry of `cart` that is below the floor.
    pub fn violations<'a>(&self, cart: &'a BetCart) -> Vec<&'a BetEntry> {
        cart.entries()
            .iter()
            .filter(|e| e.amount < self.min_stake)
            .collect()
    }
}

pub fn validate_number(number: &str) -> Result<()> {
    if number.len() == 2 && number.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(TwoDError::validation(format!(
            "'{}' is not a two-digit number (00-99)",
            number
        )))
    }
}

/// Parses a stake typed by the user.
pub fn parse_amount(input: &str) -> Result<u64> {
    input
        .trim()
        .parse::<u64>()
        .map_err(|_| TwoDError::validation(format!("'{}' is not a valid stake amount", input)))
}
