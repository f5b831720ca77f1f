use std::collections::HashMap;

use crate::schemas::{Expense, Group, MemberName};

/// Net position of every member of a group: positive means the group owes
/// the member, negative means the member owes the group.
pub type Balance = HashMap<MemberName, f64>;

/// Computes the balance of every member of `group`.
///
/// Each expense is split equally among all the members of the group: the
/// share is taken from everybody and the whole amount is credited to the
/// payer. Expenses of other groups and expenses paid by somebody outside the
/// member list are skipped, so the balances always sum to zero within one
/// cent.
///
/// Every balance is rounded to the cent (see [`quantize_to_cents`]).
pub fn compute_balances(group: &Group, expenses: &[Expense]) -> Balance {
    if group.members.is_empty() {
        return Balance::new();
    }

    let member_count = group.members.len() as f64;
    let mut exact = vec![0.0_f64; group.members.len()];

    for expense in expenses {
        if expense.group_id != group.id {
            tracing::debug!(
                expense = %expense.id,
                group = %group.id,
                "skipping expense of another group"
            );
            continue;
        }
        let Some(payer) = group.members.iter().position(|m| *m == expense.payer) else {
            tracing::warn!(
                expense = %expense.id,
                payer = %expense.payer,
                group = %group.id,
                "skipping expense paid by a non member"
            );
            continue;
        };

        let amount = sanitize_amount(expense.amount);
        let share = amount / member_count;
        for balance in exact.iter_mut() {
            *balance -= share;
        }
        if let Some(balance) = exact.get_mut(payer) {
            *balance += amount;
        }
    }

    let balance: Balance = group
        .members
        .iter()
        .cloned()
        .zip(quantize_to_cents(&exact).into_iter().map(cents_to_amount))
        .collect();
    tracing::debug!(group = %group.id, expenses = expenses.len(), "balances computed");
    balance
}

/// Clamps non-finite and negative amounts to 0.
pub fn sanitize_amount(amount: f64) -> f64 {
    if amount.is_finite() && amount >= 0.0 {
        amount
    } else {
        tracing::warn!(amount, "clamping malformed amount to 0");
        0.0
    }
}

/// Rounds to two decimals, half away from zero.
pub fn round_to_2_decimals(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

/// Rounds every balance to the cent (half away from zero), in cents.
///
/// Each member is rounded on its own, which can leave the total a few cents
/// away from zero. A residual of one cent is tolerated. Anything beyond that
/// is taken back one cent at a time from the members that gained the most
/// from rounding (or given to the ones that lost the most) until the total
/// is within one cent again. Ties keep member order.
pub fn quantize_to_cents(exact: &[f64]) -> Vec<f64> {
    let mut cents: Vec<f64> = exact.iter().map(|b| (b * 100.0).round()).collect();
    let residual: f64 = cents.iter().sum();
    if residual.is_nan() || residual.abs() <= 1.0 {
        return cents;
    }

    let diffs: Vec<f64> = cents
        .iter()
        .zip(exact)
        .map(|(rounded, exact)| rounded - exact * 100.0)
        .collect();
    let mut order: Vec<usize> = (0..cents.len()).collect();
    if residual > 0.0 {
        order.sort_by(|&a, &b| diffs[b].total_cmp(&diffs[a]));
    } else {
        order.sort_by(|&a, &b| diffs[a].total_cmp(&diffs[b]));
    }

    tracing::debug!(residual, members = cents.len(), "repairing rounding residual");
    // the cast saturates; at most one cent per member is moved
    let excess = (residual.abs() - 1.0) as usize;
    let step = -residual.signum();
    for &idx in order.iter().take(excess) {
        cents[idx] += step;
    }
    cents
}

fn cents_to_amount(cents: f64) -> f64 {
    let amount = cents / 100.0;
    // no negative zero
    if amount == 0.0 {
        0.0
    } else {
        amount
    }
}
