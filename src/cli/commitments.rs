use super::{LOAD_FAILED, LOADING, Phase, ui};
use crate::core::table::{CellValue, Column, PAGE_SIZES, RowModel, SortDirection, Table};
use crate::core::{AssetClassTotals, Commitment, InvestorApi, format_number};
use anyhow::{Result, bail};
use comfy_table::Cell;
use std::io::Write;
use tracing::{debug, error};

fn columns() -> Vec<Column<Commitment>> {
    vec![
        Column::new("id", "Id", |c: &Commitment| c.id.into()),
        Column::new("asset_class", "Asset Class", |c: &Commitment| {
            c.asset_class.as_str().into()
        }),
        Column::new("currency", "Currency", |c: &Commitment| {
            c.currency.as_str().into()
        }),
        Column::new("amount", "Amount", |c: &Commitment| {
            CellValue::Text(format_number(c.amount))
        }),
    ]
}

/// Identifies one commitments request. Only the latest ticket may store its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    investor_id: String,
    sequence: u64,
}

impl LoadTicket {
    pub fn investor_id(&self) -> &str {
        &self.investor_id
    }
}

/// One investor's commitments with per-asset-class cards and a
/// filterable, sortable, paginated table.
pub struct CommitmentsView {
    investor_id: String,
    phase: Phase,
    totals: AssetClassTotals,
    table: Table<Commitment>,
    sequence: u64,
}

impl CommitmentsView {
    pub fn new(investor_id: impl Into<String>) -> Self {
        Self {
            investor_id: investor_id.into(),
            phase: Phase::Idle,
            totals: AssetClassTotals::default(),
            table: Table::new(columns(), RowModel::Full),
            sequence: 0,
        }
    }

    pub fn investor_id(&self) -> &str {
        &self.investor_id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn commitments(&self) -> &[Commitment] {
        self.table.data()
    }

    pub fn totals(&self) -> &AssetClassTotals {
        &self.totals
    }

    pub fn table(&self) -> &Table<Commitment> {
        &self.table
    }

    /// Points the view at another investor. Returns true if a reload is needed.
    pub fn set_investor_id(&mut self, investor_id: &str) -> bool {
        if self.investor_id == investor_id {
            return false;
        }
        self.investor_id = investor_id.to_string();
        true
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.sequence += 1;
        self.phase = Phase::Loading;
        LoadTicket {
            investor_id: self.investor_id.clone(),
            sequence: self.sequence,
        }
    }

    /// Stores a fetch result unless a newer request has been issued since.
    ///
    /// Returns whether the result was applied.
    pub fn finish_load(&mut self, ticket: LoadTicket, result: Result<Vec<Commitment>>) -> bool {
        if ticket.sequence != self.sequence || ticket.investor_id != self.investor_id {
            debug!(
                investor_id = %ticket.investor_id,
                current = %self.investor_id,
                "Discarding stale commitments response"
            );
            return false;
        }

        let commitments = match result {
            Ok(commitments) => {
                debug!(
                    "Loaded {} commitments for investor {}",
                    commitments.len(),
                    self.investor_id
                );
                self.phase = Phase::loaded(&commitments);
                commitments
            }
            Err(e) => {
                error!(
                    error = ?e,
                    investor_id = %self.investor_id,
                    "Failed to fetch commitments"
                );
                self.phase = Phase::Failed;
                Vec::new()
            }
        };
        self.totals = AssetClassTotals::from_commitments(&commitments);
        self.table.set_data(commitments);
        true
    }

    pub async fn load(&mut self, api: &dyn InvestorApi) {
        let ticket = self.begin_load();
        let result = api.fetch_commitments(ticket.investor_id()).await;
        self.finish_load(ticket, result);
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.table.set_global_filter(filter);
    }

    pub fn toggle_sort(&mut self, column: &str) -> Result<()> {
        self.table.toggle_sorting(column)
    }

    pub fn sort_by(&mut self, column: &str, direction: SortDirection) -> Result<()> {
        self.table.set_sorting(column, direction)
    }

    /// Accepts only the page sizes offered by the page-size selector.
    pub fn set_page_size(&mut self, page_size: usize) -> Result<()> {
        if !PAGE_SIZES.contains(&page_size) {
            bail!("Page size must be one of {PAGE_SIZES:?}, got {page_size}");
        }
        self.table.set_page_size(page_size)
    }

    /// Jumps to a 1-based page.
    pub fn go_to_page(&mut self, page: usize) -> Result<()> {
        if page == 0 {
            bail!("Pages are numbered from 1");
        }
        self.table.set_page_index(page - 1);
        Ok(())
    }

    pub fn next_page(&mut self) -> bool {
        self.table.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.table.previous_page()
    }

    fn render_cards(&self) -> String {
        let all = format_number(self.totals.all());
        let cards = std::iter::once(("All", all)).chain(
            self.totals
                .iter()
                .map(|(label, total)| (label, format_number(total))),
        );
        ui::cards(cards)
    }

    fn render_toolbar(&self) -> String {
        let state = self.table.state();
        let filter = if state.global_filter.is_empty() {
            ui::style_text("Filter all columns...", ui::StyleType::Subtle)
        } else {
            format!("Filter: {}", state.global_filter)
        };
        format!("{filter}    Show {}", state.pagination.page_size)
    }

    fn render_table(&self) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(
            self.table
                .columns()
                .iter()
                .map(|c| ui::header_cell(&self.table.header_label(c)))
                .collect::<Vec<_>>(),
        );

        for row in self.table.rows() {
            let cells = row.cells.iter().enumerate().map(|(i, cell)| {
                if self.table.columns()[i].id == "amount" {
                    ui::amount_cell(&cell.to_string())
                } else {
                    Cell::new(cell.to_string())
                }
            });
            table.add_row(cells.collect::<Vec<_>>());
        }
        table.to_string()
    }

    fn render_pager(&self) -> String {
        format!(
            "{}    Page {} of {}    {}",
            ui::control("‹ Previous", self.table.can_previous_page()),
            self.table.state().pagination.page_index + 1,
            self.table.page_count(),
            ui::control("Next ›", self.table.can_next_page()),
        )
    }

    pub fn render(&self) -> String {
        if self.phase == Phase::Loading {
            return LOADING.to_string();
        }

        let mut output = format!(
            "{}\n{}\n\n",
            ui::style_text("← back (/)", ui::StyleType::Link),
            ui::style_text("Commitments", ui::StyleType::Title)
        );
        output.push_str(&self.render_cards());
        output.push_str("\n\n");
        output.push_str(&self.render_toolbar());
        output.push('\n');
        output.push_str(&self.render_table());
        output.push('\n');
        output.push_str(&self.render_pager());
        if self.phase == Phase::Failed {
            output.push_str(&format!(
                "\n{}",
                ui::style_text(LOAD_FAILED, ui::StyleType::Error)
            ));
        }
        output
    }
}

/// Options for printing one investor's commitments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitmentsArgs {
    pub investor_id: String,
    pub filter: Option<String>,
    /// `column`, `column:asc` or `column:desc`.
    pub sort: Option<String>,
    pub page_size: Option<usize>,
    /// 1-based page number.
    pub page: Option<usize>,
}

fn parse_sort(sort: &str) -> Result<(&str, Option<SortDirection>)> {
    match sort.split_once(':') {
        None => Ok((sort, None)),
        Some((column, direction)) => {
            let direction = match direction.to_lowercase().as_str() {
                "asc" => SortDirection::Ascending,
                "desc" => SortDirection::Descending,
                other => bail!("Invalid sort direction '{other}'; use asc or desc"),
            };
            Ok((column, Some(direction)))
        }
    }
}

/// Prints one investor's commitments once, after applying `args` to the table.
pub async fn run<W: Write>(
    api: &dyn InvestorApi,
    args: &CommitmentsArgs,
    output: &mut W,
) -> Result<()> {
    let mut view = CommitmentsView::new(args.investor_id.as_str());
    let spinner = ui::new_spinner(LOADING);
    view.load(api).await;
    spinner.finish_and_clear();

    if let Some(filter) = &args.filter {
        view.set_filter(filter);
    }
    if let Some(sort) = &args.sort {
        match parse_sort(sort)? {
            (column, Some(direction)) => view.sort_by(column, direction)?,
            (column, None) => view.toggle_sort(column)?,
        }
    }
    if let Some(page_size) = args.page_size {
        view.set_page_size(page_size)?;
    }
    if let Some(page) = args.page {
        view.go_to_page(page)?;
    }

    writeln!(output, "{}", view.render())?;
    Ok(())
}
