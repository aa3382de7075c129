use super::ui;
use crate::core::{ChartPoint, FinanceBackend, MAX_CHART_POINTS, Period, format_chart_data};
use anyhow::Result;
use comfy_table::Cell;

const BAR_WIDTH: usize = 24;

/// Renders the comparison series as a table with one bar per entry type.
pub fn render_chart(points: &[ChartPoint], period: Period, symbol: &str) -> String {
    let mut output = format!(
        "{}\n{}\n\n",
        ui::style_text("Financial Comparison", ui::StyleType::Title),
        ui::style_text(
            &format!("Last {MAX_CHART_POINTS} {period} periods"),
            ui::StyleType::Subtle
        )
    );

    if points.is_empty() {
        output.push_str("No data to display");
        return output;
    }

    let max = points
        .iter()
        .flat_map(|p| [p.income, p.expense, p.saving])
        .fold(0.0_f64, f64::max);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Period"),
        ui::header_cell("Income"),
        ui::header_cell("Expenses"),
        ui::header_cell("Savings"),
        ui::header_cell("Comparison"),
    ]);

    for point in points {
        let bars = [
            ui::style_text(&ui::bar(point.income, max, BAR_WIDTH), ui::StyleType::Income),
            ui::style_text(&ui::bar(point.expense, max, BAR_WIDTH), ui::StyleType::Expense),
            ui::style_text(&ui::bar(point.saving, max, BAR_WIDTH), ui::StyleType::Saving),
        ]
        .join("\n");

        table.add_row(vec![
            Cell::new(&point.period),
            ui::amount_cell(symbol, point.income),
            ui::amount_cell(symbol, point.expense),
            ui::amount_cell(symbol, point.saving),
            Cell::new(bars),
        ]);
    }

    output.push_str(&table.to_string());
    output
}

pub async fn run(
    backend: &(dyn FinanceBackend + Send + Sync),
    period: Period,
    symbol: &str,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching entries...");
    let records = backend.all_entries().await;
    pb.finish_and_clear();

    let points = format_chart_data(&records?, period);
    println!("{}", render_chart(&points, period, symbol));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(period: &str, income: f64, expense: f64, saving: f64) -> ChartPoint {
        ChartPoint {
            period: period.to_string(),
            income,
            expense,
            saving,
        }
    }

    #[test]
    fn test_render_chart_rows_in_order() {
        let points = vec![
            point("Jan 2024", 100.0, 40.0, 0.0),
            point("Feb 2024", 50.0, 0.0, 12.5),
        ];

        let output = render_chart(&points, Period::Monthly, "₹");

        assert!(output.contains("monthly periods"));
        assert!(output.contains("₹100.00"));
        assert!(output.contains("₹12.50"));
        let jan = output.find("Jan 2024").unwrap();
        let feb = output.find("Feb 2024").unwrap();
        assert!(jan < feb);
    }

    #[test]
    fn test_render_chart_empty() {
        let output = render_chart(&[], Period::Yearly, "₹");
        assert!(output.contains("No data to display"));
    }
}
