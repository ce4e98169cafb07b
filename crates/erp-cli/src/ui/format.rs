//! String formatting for amounts and table cells.

use erp_core::Money;

/// Brazilian currency notation: `R$ 1.520,50`, `-R$ 3,00`.
pub fn brl(amount: Money) -> String {
    let cents = amount.cents().unsigned_abs();
    let units = (cents / 100).to_string();

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, digit) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let sign = if amount.is_negative() { "-" } else { "" };
    format!("{}R$ {},{:02}", sign, grouped, cents % 100)
}

/// Like [`brl`] with an explicit `+` on positive amounts.
pub fn signed_brl(amount: Money) -> String {
    if amount > Money::ZERO {
        format!("+{}", brl(amount))
    } else {
        brl(amount)
    }
}

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let head: String = s.chars().take(max_len - 3).collect();
    format!("{}...", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brl_grouping() {
        assert_eq!(brl(Money::ZERO), "R$ 0,00");
        assert_eq!(brl(Money::from_cents(5)), "R$ 0,05");
        assert_eq!(brl(Money::from_cents(152_050)), "R$ 1.520,50");
        assert_eq!(brl(Money::from_cents(123_456_789)), "R$ 1.234.567,89");
        assert_eq!(brl(Money::from_cents(-300)), "-R$ 3,00");
    }

    #[test]
    fn test_signed_brl() {
        assert_eq!(signed_brl(Money::from_cents(100)), "+R$ 1,00");
        assert_eq!(signed_brl(Money::ZERO), "R$ 0,00");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("Distribuidora São João", 10), "Distrib...");
        assert_eq!(truncate("ok", 10), "ok");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
