use super::router::Route;
use super::{LOAD_FAILED, LOADING, Phase, ui};
use crate::core::table::{CellValue, Column, RowModel, Table};
use crate::core::{Investor, InvestorApi, format_number};
use anyhow::{Result, bail};
use comfy_table::Cell;
use std::io::Write;
use tracing::{debug, error};

fn columns() -> Vec<Column<Investor>> {
    vec![
        Column::new("id", "Id", |i: &Investor| i.id.into()),
        Column::new("name", "Name", |i: &Investor| i.name.as_str().into()),
        Column::new("type", "Type", |i: &Investor| {
            i.investor_type.as_str().into()
        }),
        Column::new("date_added", "Date Added", |i: &Investor| {
            CellValue::Text(i.date_added.to_string())
        }),
        Column::new("country", "Country", |i: &Investor| {
            i.country.as_str().into()
        }),
        Column::new("total_commitment", "Total Commitment", |i: &Investor| {
            CellValue::Text(format_number(i.total_commitment))
        }),
    ]
}

/// The investors list. Rows are shown as loaded, without sorting or paging.
pub struct InvestorsView {
    phase: Phase,
    table: Table<Investor>,
}

impl Default for InvestorsView {
    fn default() -> Self {
        Self::new()
    }
}

impl InvestorsView {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            table: Table::new(columns(), RowModel::Core),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn investors(&self) -> &[Investor] {
        self.table.data()
    }

    pub fn begin_load(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Stores a fetch result and leaves the loading phase, whatever the outcome.
    pub fn finish_load(&mut self, result: Result<Vec<Investor>>) {
        match result {
            Ok(investors) => {
                debug!("Loaded {} investors", investors.len());
                self.phase = Phase::loaded(&investors);
                self.table.set_data(investors);
            }
            Err(e) => {
                error!(error = ?e, "Failed to fetch investors");
                self.phase = Phase::Failed;
                self.table.set_data(Vec::new());
            }
        }
    }

    pub async fn load(&mut self, api: &dyn InvestorApi) {
        self.begin_load();
        let result = api.fetch_investors().await;
        self.finish_load(result);
    }

    /// Route to the commitments of the investor on the given 1-based row.
    pub fn open_row(&self, row_number: usize) -> Result<Route> {
        let rows = self.table.rows();
        let Some(row) = row_number.checked_sub(1).and_then(|i| rows.get(i)) else {
            bail!(
                "No row {row_number}; choose a row between 1 and {}",
                rows.len()
            );
        };
        Ok(Route::commitments(row.original.id.to_string()))
    }

    pub fn render(&self) -> String {
        if self.phase == Phase::Loading {
            return LOADING.to_string();
        }

        let mut table = ui::new_styled_table();
        let mut header = vec![ui::header_cell("#")];
        header.extend(
            self.table
                .columns()
                .iter()
                .map(|c| ui::header_cell(c.header)),
        );
        table.set_header(header);

        for (n, row) in self.table.rows().iter().enumerate() {
            let mut cells = vec![ui::row_number_cell(n + 1)];
            cells.extend(row.cells.iter().map(|cell| Cell::new(cell.to_string())));
            table.add_row(cells);
        }

        let mut output = format!("{}\n\n", ui::style_text("Investors", ui::StyleType::Title));
        output.push_str(&table.to_string());
        if self.phase == Phase::Failed {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(LOAD_FAILED, ui::StyleType::Error)
            ));
        }
        output
    }
}

/// Prints the investors list once.
pub async fn run<W: Write>(api: &dyn InvestorApi, output: &mut W) -> Result<()> {
    let mut view = InvestorsView::new();
    let spinner = ui::new_spinner(LOADING);
    view.load(api).await;
    spinner.finish_and_clear();

    writeln!(output, "{}", view.render())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::{FakeApi, investor};
    use anyhow::anyhow;

    fn plain(text: String) -> String {
        console::strip_ansi_codes(&text).to_string()
    }

    #[test]
    fn test_new_view_is_idle() {
        let view = InvestorsView::new();
        assert_eq!(view.phase(), Phase::Idle);
        assert!(view.investors().is_empty());
    }

    #[test]
    fn test_renders_placeholder_while_loading() {
        let mut view = InvestorsView::new();
        view.begin_load();
        assert_eq!(view.phase(), Phase::Loading);
        assert_eq!(view.render(), "Loading...");
    }

    #[tokio::test]
    async fn test_load_renders_rows() {
        let api = FakeApi::new().with_investors(vec![
            investor(1, "Ioo Gryffindor fund", 2_500_000.0),
            investor(2, "Ibx Skywalker ltd", 1000.0),
        ]);
        let mut view = InvestorsView::new();

        view.load(&api).await;

        assert_eq!(view.phase(), Phase::Ready);
        let rendered = plain(view.render());
        assert!(rendered.contains("Investors"));
        assert!(rendered.contains("Total Commitment"));
        assert!(rendered.contains("Ioo Gryffindor fund"));
        assert!(rendered.contains("2.5M"));
        assert!(rendered.contains("1,000"));
        assert!(rendered.contains("2000-07-06"));
        assert!(!rendered.contains(LOAD_FAILED));
    }

    #[tokio::test]
    async fn test_empty_result() {
        let api = FakeApi::new();
        let mut view = InvestorsView::new();

        view.load(&api).await;

        assert_eq!(view.phase(), Phase::Empty);
        assert!(plain(view.render()).contains("Country"));
    }

    #[test]
    fn test_failure_clears_loading_and_shows_notice() {
        let mut view = InvestorsView::new();
        view.begin_load();
        view.finish_load(Err(anyhow!("connection refused")));

        assert_eq!(view.phase(), Phase::Failed);
        assert!(view.investors().is_empty());
        assert!(plain(view.render()).contains(LOAD_FAILED));
    }

    #[test]
    fn test_open_row_routes_to_investor() {
        let mut view = InvestorsView::new();
        view.finish_load(Ok(vec![
            investor(7, "First", 1.0),
            investor(3, "Second", 2.0),
        ]));

        assert_eq!(view.open_row(1).unwrap(), Route::commitments("7"));
        assert_eq!(
            view.open_row(2).unwrap().to_string(),
            "/investors/3".to_string()
        );
        assert!(view.open_row(0).is_err());
        assert!(view.open_row(3).is_err());
    }

    #[tokio::test]
    async fn test_run_prints_view() {
        let api = FakeApi::new().with_investors(vec![investor(1, "Ioo Gryffindor fund", 5e9)]);
        let mut output = Vec::new();

        run(&api, &mut output).await.unwrap();

        let output = plain(String::from_utf8(output).unwrap());
        assert!(output.contains("Ioo Gryffindor fund"));
        assert!(output.contains("5B"));
    }
}
