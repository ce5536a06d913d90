//! Proportional text chart of the listed breakdown lines

use crate::models::Language;
use crate::services::Totals;

use super::report::{display_width, format_bar, left_align, percentage_of};

const BAR_WIDTH: usize = 30;

/// Render one bar per listed line with its whole-number percentage
pub fn format_chart(totals: &Totals, language: Language) -> String {
    let lines = totals.listed_lines();
    if lines.is_empty() {
        return format!(
            "{}\n",
            language.pick("لا توجد بيانات لعرضها", "No data to display")
        );
    }

    let total = totals.listed_total();
    let labels: Vec<&str> = lines.iter().map(|l| l.kind.label(language)).collect();
    let label_width = labels.iter().map(|l| display_width(l)).max().unwrap_or(0);

    let mut output = String::new();
    for (line, label) in lines.iter().zip(labels) {
        let pct = percentage_of(line.value_display, total);
        output.push_str(&format!(
            "{}  {} {:>3.0}%\n",
            left_align(label, label_width),
            format_bar(line.value_display, total, BAR_WIDTH),
            pct
        ));
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Currency, TermKind};
    use crate::services::BreakdownLine;

    fn totals(values: &[(TermKind, f64)]) -> Totals {
        let lines: Vec<BreakdownLine> = values
            .iter()
            .map(|&(kind, v)| BreakdownLine {
                kind,
                value_syp: v,
                value_display: v,
            })
            .collect();
        let total_syp = values.iter().map(|(_, v)| v).sum();
        Totals {
            target_currency: Currency::Syp,
            dollar_rate: 15_000.0,
            lines,
            total_syp,
            total_display: total_syp,
            installment_remaining_syp: 0.0,
            advance_grams: 0.0,
            advance_excluded_syp: None,
            deferred_grams: 0.0,
            deferred_syp: 0.0,
        }
    }

    #[test]
    fn test_empty_chart_message() {
        let t = totals(&[(TermKind::MahrAdvance, 0.0), (TermKind::WeddingCost, 0.0)]);
        assert_eq!(format_chart(&t, Language::En), "No data to display\n");
        assert_eq!(format_chart(&t, Language::Ar), "لا توجد بيانات لعرضها\n");
    }

    #[test]
    fn test_whole_percentages() {
        let t = totals(&[
            (TermKind::MahrAdvance, 1.0),
            (TermKind::WeddingCost, 2.0),
            (TermKind::Rent, 0.0),
        ]);
        let out = format_chart(&t, Language::En);
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with("Mahr (Advance)"));
        assert!(rows[0].ends_with(" 33%"));
        assert!(rows[1].ends_with(" 67%"));
    }
}
