use super::ui;
use crate::core::{
    AggregatedPeriod, FinanceBackend, FinanceRecord, Period, TypeTotals, aggregate_by_period,
    partition_by_type,
};
use anyhow::Result;
use comfy_table::Cell;

struct Section<'a> {
    title: &'a str,
    style: ui::StyleType,
    periods: Vec<AggregatedPeriod>,
}

fn render_section(section: &Section, period: Period, symbol: &str) -> String {
    let mut output = format!("{}\n\n", ui::style_text(section.title, section.style));

    if section.periods.is_empty() {
        output.push_str(&ui::style_text(
            &format!("No {} recorded", section.title.to_lowercase()),
            ui::StyleType::Subtle,
        ));
        return output;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Period"),
        ui::header_cell("Total"),
        ui::header_cell("Entries"),
    ]);

    for aggregated in &section.periods {
        let entries = aggregated
            .entries
            .iter()
            .map(|e| {
                format!(
                    "{}: {} ({})",
                    e.category,
                    ui::format_amount(symbol, e.amount),
                    e.id
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        table.add_row(vec![
            Cell::new(period.section_label(&aggregated.date)),
            ui::amount_cell(symbol, aggregated.total),
            Cell::new(entries),
        ]);
    }

    output.push_str(&table.to_string());
    output
}

/// Renders overall totals followed by one section per entry type.
pub fn render_dashboard(records: &[FinanceRecord], period: Period, symbol: &str) -> String {
    let totals = TypeTotals::from_records(records);
    let partition = partition_by_type(records);

    let mut output = format!(
        "{} ({})\n\n",
        ui::style_text("Finance Dashboard", ui::StyleType::Title),
        period
    );
    for (label, value) in [
        ("Total Income", totals.income),
        ("Total Expenses", totals.expense),
        ("Total Savings", totals.saving),
        ("Net Balance", totals.net_balance()),
    ] {
        output.push_str(&format!(
            "{}: {}\n",
            ui::style_text(label, ui::StyleType::TotalLabel),
            ui::format_amount(symbol, value)
        ));
    }

    let sections = [
        Section {
            title: "Income",
            style: ui::StyleType::Income,
            periods: aggregate_by_period(&partition.income, period),
        },
        Section {
            title: "Expenses",
            style: ui::StyleType::Expense,
            periods: aggregate_by_period(&partition.expense, period),
        },
        Section {
            title: "Savings",
            style: ui::StyleType::Saving,
            periods: aggregate_by_period(&partition.saving, period),
        },
    ];

    for section in &sections {
        output.push('\n');
        output.push_str(&render_section(section, period, symbol));
        output.push('\n');
    }
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

    println!("{}", render_dashboard(&records?, period, symbol));
    Ok(())
}
