use crate::cart::BetCart;
use crate::error::Result;

/// Upserts every number of `digits` into `cart` at `stake_per_digit`.
///
/// A number already in the cart takes the new stake; stakes are never summed.
/// Returns how many numbers were applied.
pub fn add_digits<S: AsRef<str>>(
    cart: &mut BetCart,
    digits: &[S],
    stake_per_digit: u64,
) -> Result<usize> {
    for digit in digits {
        cart.add_or_update(digit.as_ref(), stake_per_digit)?;
    }

    tracing::debug!(
        "Applied {} numbers at {} each, cart total {}",
        digits.len(),
        stake_per_digit,
        cart.total()
    );
    Ok(digits.len())
}

/// Adds the reverse of every number already in the cart ("27" also bets "72").
pub fn reverse_digits(cart: &mut BetCart, stake_per_digit: u64) -> Result<usize> {
    let reversed: Vec<String> = cart
        .entries()
        .iter()
        .map(|e| e.number.chars().rev().collect::<String>())
        .filter(|n| !cart.contains(n))
        .collect();

    add_digits(cart, &reversed, stake_per_digit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::QuickPick;

    #[test]
    fn test_last_rule_wins_on_overlap() {
        let mut cart = BetCart::new();
        add_digits(&mut cart, &QuickPick::Break(1).expand(), 100).unwrap();
        add_digits(&mut cart, &QuickPick::Size(7).expand(), 200).unwrap();

        let breaks = QuickPick::Break(1).expand();
        let doubles = QuickPick::Size(7).expand();
        for number in breaks.iter().filter(|n| doubles.contains(n)) {
            assert_eq!(cart.get(number).unwrap().amount, 200);
        }
        assert_eq!(cart.len(), 16);
        assert_eq!(cart.total(), 6 * 100 + 10 * 200);
    }

    #[test]
    fn test_overlapping_rules_overwrite_not_sum() {
        let mut cart = BetCart::new();
        add_digits(&mut cart, &QuickPick::Break(1).expand(), 100).unwrap();
        add_digits(&mut cart, &QuickPick::Size(1).expand(), 200).unwrap();

        // "01" and "56" are in both sets
        assert_eq!(cart.get("01").unwrap().amount, 200);
        assert_eq!(cart.get("56").unwrap().amount, 200);
        assert_eq!(cart.get("29").unwrap().amount, 100);
        assert_eq!(cart.len(), 6 + 10 - 2);
        let expected: u64 = cart.entries().iter().map(|e| e.amount).sum();
        assert_eq!(cart.total(), expected);
    }

    #[test]
    fn test_twenty_range_fills_cart() {
        let mut cart = BetCart::new();
        let applied = add_digits(&mut cart, &QuickPick::Twenty("20-39".to_string()).expand(), 150)
            .unwrap();

        assert_eq!(applied, 20);
        assert_eq!(cart.len(), 20);
        assert_eq!(cart.total(), 20 * 150);
        for n in 20..=39 {
            assert_eq!(cart.get(&format!("{:02}", n)).unwrap().amount, 150);
        }
    }

    #[test]
    fn test_unknown_rule_leaves_cart_alone() {
        let mut cart = BetCart::new();
        cart.add_or_update("10", 100).unwrap();
        let applied = add_digits(&mut cart, &QuickPick::Break(42).expand(), 500).unwrap();
        assert_eq!(applied, 0);
        assert_eq!(cart.total(), 100);
    }

    #[test]
    fn test_reverse_adds_mirrored_numbers() {
        let mut cart = BetCart::new();
        add_digits(&mut cart, &["27", "33", "45"], 100).unwrap();
        let applied = reverse_digits(&mut cart, 300).unwrap();

        assert_eq!(applied, 2);
        assert_eq!(cart.get("72").unwrap().amount, 300);
        assert_eq!(cart.get("54").unwrap().amount, 300);
        // doubles mirror onto themselves and keep their stake
        assert_eq!(cart.get("33").unwrap().amount, 100);
        assert_eq!(cart.get("27").unwrap().amount, 100);
        assert_eq!(cart.total(), 3 * 100 + 2 * 300);
    }
}
