//! Aggregation engine
//!
//! A single pure function turns the calculator inputs into totals. Every term
//! is normalized to SYP with its own currency tag, the toggle rules decide
//! what is included, and only the final figures are converted into the
//! requested target currency. The screen and the export report both call
//! `aggregate`, each with its own target currency.

use tracing::debug;

use crate::models::currency::{convert, finite_or_zero, Currency};
use crate::models::{BudgetInputs, ExchangeContext, TermKind, Toggles};

use super::furnishing::FurnishingTotals;

/// What the engine reads: the calculator inputs plus the furnishing totals
#[derive(Debug, Clone, Copy)]
pub struct AggregateInput<'a> {
    pub inputs: &'a BudgetInputs,
    pub furnishing: FurnishingTotals,
}

impl<'a> AggregateInput<'a> {
    pub fn new(inputs: &'a BudgetInputs, furnishing: FurnishingTotals) -> Self {
        Self { inputs, furnishing }
    }
}

/// One line of the breakdown
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreakdownLine {
    pub kind: TermKind,
    pub value_syp: f64,
    /// Value in the target currency; whole dollars when the target is USD
    pub value_display: f64,
}

/// Result of one aggregation
#[derive(Debug, Clone, PartialEq)]
pub struct Totals {
    pub target_currency: Currency,
    pub dollar_rate: f64,
    /// Breakdown lines in display order, zero lines included
    pub lines: Vec<BreakdownLine>,
    /// Sum of every included term in SYP
    pub total_syp: f64,
    /// `total_syp` in the target currency, unrounded
    pub total_display: f64,
    /// Installment balances, never part of the total
    pub installment_remaining_syp: f64,
    pub advance_grams: f64,
    /// Value of the advance when it was left out of the total
    pub advance_excluded_syp: Option<f64>,
    pub deferred_grams: f64,
    /// Value of the deferred mahr, never part of the total
    pub deferred_syp: f64,
}

impl Totals {
    /// Lines with a positive display value, as listed in the breakdown and chart
    pub fn listed_lines(&self) -> Vec<BreakdownLine> {
        self.lines
            .iter()
            .copied()
            .filter(|l| l.value_display > 0.0)
            .collect()
    }

    /// Sum of the listed display values
    pub fn listed_total(&self) -> f64 {
        self.listed_lines().iter().map(|l| l.value_display).sum()
    }

    /// Convert an SYP amount into this result's target currency
    pub fn to_display(&self, amount_syp: f64) -> f64 {
        self.to_display_in(amount_syp, self.target_currency)
    }

    /// Convert an SYP amount into any currency at this result's rate
    pub fn to_display_in(&self, amount_syp: f64, currency: Currency) -> f64 {
        finite_or_zero(convert(amount_syp, Currency::Syp, currency, self.dollar_rate))
    }

    pub fn line(&self, kind: TermKind) -> Option<&BreakdownLine> {
        self.lines.iter().find(|l| l.kind == kind)
    }
}

/// Compute totals for `target` without touching any input
pub fn aggregate(
    input: AggregateInput<'_>,
    ctx: &ExchangeContext,
    toggles: Toggles,
    target: Currency,
) -> Totals {
    let inputs = input.inputs;
    let rate = ctx.dollar_rate;

    // Step 1: every term in SYP
    let advance_syp = inputs.mahr_advance.gold.value_syp(ctx);
    let deferred_syp = inputs.mahr_deferred.gold.value_syp(ctx);
    let section = inputs.goldsmithing.totals(ctx);
    let fallback_furnishing_syp = inputs.home_furnishing.amount.to_syp(rate);
    let items_syp = finite_or_zero(input.furnishing.immediate_syp);
    let furnishing_syp = if items_syp > 0.0 {
        items_syp
    } else {
        fallback_furnishing_syp
    };
    let wedding_syp = inputs.wedding_cost.amount.to_syp(rate);
    let honeymoon_syp = inputs.honeymoon.amount.to_syp(rate);
    let additional_syp = inputs.additional_expenses.amount.to_syp(rate);

    // Step 2: advance and goldsmithing are mutually exclusive
    let (included_advance, goldsmithing_syp) = if toggles.advance_paid {
        (advance_syp, 0.0)
    } else {
        (0.0, finite_or_zero(section.total_syp()))
    };

    // Step 3: rent gate
    let rent_syp = if toggles.rent_enabled {
        finite_or_zero(inputs.rent.amount.to_syp(rate) * f64::from(inputs.rent_months))
    } else {
        0.0
    };

    // Step 4: sum
    let total_syp = included_advance
        + goldsmithing_syp
        + furnishing_syp
        + wedding_syp
        + honeymoon_syp
        + additional_syp
        + rent_syp;

    // Step 5: target currency
    let total_display = finite_or_zero(convert(total_syp, Currency::Syp, target, rate));

    let line = |kind: TermKind, value_syp: f64| {
        let converted = finite_or_zero(convert(value_syp, Currency::Syp, target, rate));
        BreakdownLine {
            kind,
            value_syp,
            value_display: match target {
                Currency::Usd => converted.round(),
                Currency::Syp => converted,
            },
        }
    };

    let mut lines = Vec::with_capacity(7);
    lines.push(line(TermKind::MahrAdvance, included_advance));
    if !toggles.advance_paid && goldsmithing_syp > 0.0 {
        lines.push(line(TermKind::Goldsmithing, goldsmithing_syp));
    }
    lines.push(line(TermKind::HomeFurnishing, furnishing_syp));
    lines.push(line(TermKind::WeddingCost, wedding_syp));
    lines.push(line(TermKind::Honeymoon, honeymoon_syp));
    lines.push(line(TermKind::AdditionalExpenses, additional_syp));
    if toggles.rent_enabled {
        lines.push(line(TermKind::Rent, rent_syp));
    }

    let advance_grams = finite_or_zero(inputs.mahr_advance.grams());
    let advance_excluded_syp = if !toggles.advance_paid && advance_grams > 0.0 {
        Some(advance_syp)
    } else {
        None
    };

    debug!(
        total_syp,
        total_display,
        target = %target,
        advance_paid = toggles.advance_paid,
        rent_enabled = toggles.rent_enabled,
        "Aggregated budget"
    );

    Totals {
        target_currency: target,
        dollar_rate: rate,
        lines,
        total_syp,
        total_display,
        installment_remaining_syp: finite_or_zero(input.furnishing.remaining_syp),
        advance_grams,
        advance_excluded_syp,
        deferred_grams: finite_or_zero(inputs.mahr_deferred.grams()),
        deferred_syp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Amount, BudgetMode};

    fn ctx() -> ExchangeContext {
        ExchangeContext::default()
    }

    fn zeroed() -> BudgetInputs {
        let mut inputs = BudgetInputs::default();
        inputs.mahr_advance.gold.grams = 0.0;
        inputs.mahr_deferred.gold.grams = 0.0;
        for kind in TermKind::MONEY_TERMS {
            inputs.term_mut(kind).unwrap().set_value(0.0);
        }
        inputs
    }

    fn run(inputs: &BudgetInputs, toggles: Toggles, target: Currency) -> Totals {
        aggregate(
            AggregateInput::new(inputs, FurnishingTotals::default()),
            &ctx(),
            toggles,
            target,
        )
    }

    #[test]
    fn test_advance_mahr_scenario() {
        let mut inputs = zeroed();
        inputs.mahr_advance.gold.grams = 100.0;

        let totals = run(&inputs, Toggles::default(), Currency::Syp);
        assert_eq!(totals.total_syp, 100_000_000.0);
        assert_eq!(totals.line(TermKind::MahrAdvance).unwrap().value_syp, 100_000_000.0);
        assert!(totals.advance_excluded_syp.is_none());
    }

    #[test]
    fn test_rent_disabled_contributes_nothing() {
        let mut inputs = zeroed();
        inputs.rent.set_value(600_000.0);
        inputs.rent_months = 6;

        let on = run(&inputs, Toggles::default(), Currency::Syp);
        assert_eq!(on.total_syp, 3_600_000.0);

        let off = run(
            &inputs,
            Toggles {
                rent_enabled: false,
                ..Toggles::default()
            },
            Currency::Syp,
        );
        assert_eq!(off.total_syp, 0.0);
        assert!(off.line(TermKind::Rent).is_none());
    }

    #[test]
    fn test_rent_in_usd_is_converted_after_multiplying() {
        let mut inputs = zeroed();
        inputs.rent.amount = Amount::usd(40.0);
        inputs.rent_months = 6;
        let totals = run(&inputs, Toggles::default(), Currency::Syp);
        assert_eq!(totals.total_syp, 3_600_000.0);
    }

    #[test]
    fn test_usd_display_of_total() {
        let mut inputs = zeroed();
        inputs.wedding_cost.set_value(150_000_000.0);

        let totals = run(&inputs, Toggles::default(), Currency::Usd);
        assert_eq!(totals.total_syp, 150_000_000.0);
        assert_eq!(totals.total_display, 10_000.0);
        assert_eq!(totals.line(TermKind::WeddingCost).unwrap().value_display, 10_000.0);
    }

    #[test]
    fn test_advance_off_swaps_in_goldsmithing() {
        let mut inputs = zeroed();
        inputs.mahr_advance.gold.grams = 100.0;
        inputs.goldsmithing.set_gold_grams(20.0);
        inputs.goldsmithing.clothing.amount = Amount::usd(200.0);

        let toggles = Toggles {
            advance_paid: false,
            ..Toggles::default()
        };
        let totals = run(&inputs, toggles, Currency::Syp);

        assert_eq!(totals.total_syp, 23_000_000.0);
        assert_eq!(totals.line(TermKind::MahrAdvance).unwrap().value_syp, 0.0);
        assert_eq!(totals.lines[1].kind, TermKind::Goldsmithing);
        assert_eq!(totals.advance_excluded_syp, Some(100_000_000.0));
        assert_eq!(totals.advance_grams, 100.0);

        // advance paid: goldsmithing ignored entirely
        let paid = run(&inputs, Toggles::default(), Currency::Syp);
        assert_eq!(paid.total_syp, 100_000_000.0);
        assert!(paid.line(TermKind::Goldsmithing).is_none());
    }

    #[test]
    fn test_deferred_mahr_is_never_summed() {
        let mut inputs = zeroed();
        inputs.mahr_deferred.gold.grams = 50.0;
        let totals = run(&inputs, Toggles::default(), Currency::Syp);
        assert_eq!(totals.total_syp, 0.0);
        assert_eq!(totals.deferred_syp, 50_000_000.0);
    }

    #[test]
    fn test_furnishing_items_replace_fallback() {
        let mut inputs = zeroed();
        inputs.home_furnishing.set_value(61_000_000.0);

        let fallback = run(&inputs, Toggles::default(), Currency::Syp);
        assert_eq!(fallback.total_syp, 61_000_000.0);

        let furnishing = FurnishingTotals {
            item_count: 1,
            immediate_syp: 5_000_000.0,
            remaining_syp: 5_000_000.0,
        };
        let totals = aggregate(
            AggregateInput::new(&inputs, furnishing),
            &ctx(),
            Toggles::default(),
            Currency::Syp,
        );
        assert_eq!(totals.total_syp, 5_000_000.0);
        assert_eq!(totals.installment_remaining_syp, 5_000_000.0);
    }

    #[test]
    fn test_total_equals_sum_of_included_terms() {
        let inputs = BudgetInputs::from_preset(BudgetMode::Medium);
        let totals = run(&inputs, Toggles::default(), Currency::Syp);
        let expected = 100.0 * 1_000_000.0
            + 61_000_000.0
            + 25_500_000.0
            + 4_000_000.0
            + 7_500_000.0
            + 600_000.0 * 6.0;
        assert_eq!(totals.total_syp, expected);
        let line_sum: f64 = totals.lines.iter().map(|l| l.value_syp).sum();
        assert_eq!(line_sum, totals.total_syp);
    }

    #[test]
    fn test_non_finite_terms_become_zero() {
        let mut inputs = zeroed();
        inputs.wedding_cost.amount = Amount::syp(f64::NAN);
        inputs.honeymoon.amount = Amount::syp(f64::INFINITY);
        inputs.additional_expenses.set_value(10.0);

        let totals = run(&inputs, Toggles::default(), Currency::Syp);
        assert_eq!(totals.total_syp, 10.0);
    }

    #[test]
    fn test_line_order_and_listing() {
        let inputs = BudgetInputs::default();
        let totals = run(&inputs, Toggles::default(), Currency::Syp);
        let kinds: Vec<_> = totals.lines.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TermKind::MahrAdvance,
                TermKind::HomeFurnishing,
                TermKind::WeddingCost,
                TermKind::Honeymoon,
                TermKind::AdditionalExpenses,
                TermKind::Rent,
            ]
        );

        let toggles = Toggles {
            advance_paid: false,
            rent_enabled: true,
        };
        let totals = run(&inputs, toggles, Currency::Syp);
        // advance line stays in the list at zero but is not listed
        assert_eq!(totals.lines[0].value_syp, 0.0);
        assert!(totals
            .listed_lines()
            .iter()
            .all(|l| l.kind != TermKind::MahrAdvance));
    }

    #[test]
    fn test_aggregate_does_not_mutate_inputs() {
        let inputs = BudgetInputs::default();
        let before = inputs.clone();
        let _ = run(&inputs, Toggles::default(), Currency::Usd);
        assert_eq!(inputs, before);
    }
}
