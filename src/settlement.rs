use serde::{Deserialize, Serialize};

use crate::balance::{compute_balances, round_to_2_decimals, Balance};
use crate::schemas::{Expense, Group, MemberName};

/// Residuals up to this amount are treated as settled.
pub const DUST_THRESHOLD: f64 = 0.009;

#[derive(Clone, Debug)]
struct PersonalBalance {
    id: MemberName,
    remaining: f64,
}

/// `from` has to pay `amount` to `to`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Settlement {
    pub from: MemberName,
    pub to: MemberName,
    pub amount: f64,
}

/// Computes the payments that settle every balance of `group`.
pub fn compute_settlements(group: &Group, expenses: &[Expense]) -> Vec<Settlement> {
    let balance = compute_balances(group, expenses);
    settle_balance(&group.members, &balance)
}

/// Greedy debt netting: the largest debtor pays the largest creditor until
/// one of the two is settled, then the next one steps in.
///
/// Members with equal amounts keep the order they have in `members`.
/// Settlements are returned in the order they are generated.
pub fn settle_balance(members: &[MemberName], balance: &Balance) -> Vec<Settlement> {
    // Divide people into debtors and creditors
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();
    for member in members {
        let Some(&amount) = balance.get(member) else {
            continue;
        };
        if !amount.is_finite() {
            tracing::warn!(member = %member, amount, "skipping non finite balance");
            continue;
        }
        if amount > 0.0 {
            creditors.push(PersonalBalance {
                id: member.clone(),
                remaining: amount,
            });
        } else if amount < 0.0 {
            debtors.push(PersonalBalance {
                id: member.clone(),
                remaining: -amount,
            });
        }
    }

    // sort_by is stable, so ties stay in member order
    creditors.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));
    debtors.sort_by(|a, b| b.remaining.total_cmp(&a.remaining));

    let mut settlements = Vec::new();
    let (mut i, mut j) = (0, 0);
    while let (Some(debtor), Some(creditor)) = (debtors.get_mut(i), creditors.get_mut(j)) {
        let pay = debtor.remaining.min(creditor.remaining);
        if pay > DUST_THRESHOLD {
            settlements.push(Settlement {
                from: debtor.id.clone(),
                to: creditor.id.clone(),
                amount: round_to_2_decimals(pay),
            });
        }
        debtor.remaining -= pay;
        creditor.remaining -= pay;
        if debtor.remaining <= DUST_THRESHOLD {
            i += 1;
        }
        if creditor.remaining <= DUST_THRESHOLD {
            j += 1;
        }
    }

    tracing::debug!(
        debtors = debtors.len(),
        creditors = creditors.len(),
        settlements = settlements.len(),
        "settlements computed"
    );
    settlements
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{expense, group, settlement};

    #[test]
    fn two_debtors_pay_the_only_creditor() {
        let settlements = compute_settlements(
            &group(&["Alice", "Bob", "Charlie"]),
            &[expense(300.0, "Alice")],
        );
        assert_eq!(
            settlements,
            vec![
                settlement("Bob", "Alice", 100.0),
                settlement("Charlie", "Alice", 100.0)
            ]
        );
    }

    #[test]
    fn settled_group_needs_no_payment() {
        let settlements = compute_settlements(
            &group(&["Alice", "Bob"]),
            &[expense(100.0, "Alice"), expense(100.0, "Bob")],
        );
        assert!(settlements.is_empty());
    }

    #[test]
    fn empty_group_needs_no_payment() {
        assert!(compute_settlements(&group(&[]), &[]).is_empty());
    }

    #[test]
    fn single_member_never_pays() {
        let settlements = compute_settlements(
            &group(&["Alice"]),
            &[expense(42.0, "Alice"), expense(8.5, "Alice")],
        );
        assert!(settlements.is_empty());
    }

    #[test]
    fn quarter_shares() {
        let settlements = compute_settlements(&group(&["A", "B", "C", "D"]), &[expense(10.0, "A")]);
        assert_eq!(
            settlements,
            vec![
                settlement("B", "A", 2.5),
                settlement("C", "A", 2.5),
                settlement("D", "A", 2.5)
            ]
        );
    }

    #[test]
    fn largest_debtor_pays_first() {
        let settlements = compute_settlements(
            &group(&["Alice", "Bob", "Carol"]),
            &[expense(90.0, "Alice"), expense(30.0, "Bob")],
        );
        assert_eq!(
            settlements,
            vec![
                settlement("Carol", "Alice", 40.0),
                settlement("Bob", "Alice", 10.0)
            ]
        );
    }

    #[test]
    fn debtor_spills_over_to_next_creditor() {
        let settlements = compute_settlements(
            &group(&["A", "B", "C", "D"]),
            &[expense(60.0, "A"), expense(40.0, "B")],
        );
        assert_eq!(
            settlements,
            vec![
                settlement("C", "A", 25.0),
                settlement("D", "A", 10.0),
                settlement("D", "B", 15.0)
            ]
        );
    }

    #[test]
    fn equal_debts_keep_member_order() {
        let members: Vec<MemberName> = ["Zoe", "Adam", "Mia"].iter().map(|m| m.to_string()).collect();
        let balance = Balance::from([
            ("Zoe".to_string(), -5.0),
            ("Adam".to_string(), -5.0),
            ("Mia".to_string(), 10.0),
        ]);
        assert_eq!(
            settle_balance(&members, &balance),
            vec![settlement("Zoe", "Mia", 5.0), settlement("Adam", "Mia", 5.0)]
        );
    }

    #[test]
    fn dust_is_dropped() {
        let members: Vec<MemberName> = vec!["A".to_string(), "B".to_string()];
        let balance = Balance::from([("A".to_string(), 0.009), ("B".to_string(), -0.009)]);
        assert!(settle_balance(&members, &balance).is_empty());
    }

    #[test]
    fn zero_balances_are_not_paired() {
        let members: Vec<MemberName> = ["A", "B", "C"].iter().map(|m| m.to_string()).collect();
        let balance = Balance::from([
            ("A".to_string(), 0.0),
            ("B".to_string(), 3.0),
            ("C".to_string(), -3.0),
        ]);
        assert_eq!(settle_balance(&members, &balance), vec![settlement("C", "B", 3.0)]);
    }

    #[test]
    fn debts_are_fully_covered() {
        let members = group(&["Alice", "Bob", "Carol", "Dan", "Eve", "Frank"]);
        let expenses = [
            expense(100.0, "Alice"),
            expense(33.33, "Bob"),
            expense(7.01, "Carol"),
            expense(250.4, "Alice"),
        ];
        let balance = compute_balances(&members, &expenses);
        let settlements = compute_settlements(&members, &expenses);

        assert!(settlements.iter().all(|s| s.amount > 0.0));
        for (member, amount) in &balance {
            if *amount >= 0.0 {
                continue;
            }
            let paid: f64 = settlements
                .iter()
                .filter(|s| s.from == *member)
                .map(|s| s.amount)
                .sum();
            let short = ((paid + amount) * 100.0).round();
            assert!(short.abs() <= 1.0, "{member} paid {paid} of {amount}");
        }
    }

    #[test]
    fn huge_balances_still_settle() {
        let settlements = compute_settlements(&group(&["A", "B", "C"]), &[expense(1e20, "A")]);
        assert_eq!(settlements.len(), 2);
        assert!(settlements.iter().all(|s| s.to == "A" && s.amount > 3.3e19));
    }

    #[test]
    fn non_finite_balances_are_skipped() {
        let members: Vec<MemberName> = ["A", "B", "C", "D"].iter().map(|m| m.to_string()).collect();
        let balance = Balance::from([
            ("A".to_string(), f64::INFINITY),
            ("B".to_string(), 4.0),
            ("C".to_string(), -4.0),
            ("D".to_string(), f64::NAN),
        ]);
        assert_eq!(settle_balance(&members, &balance), vec![settlement("C", "B", 4.0)]);
    }
}
