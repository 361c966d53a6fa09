use super::router::Route;
use super::{CommitmentsView, InvestorsView, LOADING, Phase, ui};
use crate::core::InvestorApi;
use anyhow::{Context, Result, bail};
use std::io::{BufRead, Write};
use std::sync::Arc;
use tracing::debug;

const HELP: &str = "\
Commands:
  open <n>          open the investor on row <n> (investors list)
  back              return to the investors list
  go <path>         navigate to / or /investors/<id>
  sort <column>     toggle sorting on a column (commitments)
  filter [text]     filter rows containing text; no text clears the filter
  size <n>          rows per page: 10, 20, 30, 40 or 50
  next | prev       move between pages
  page <n>          jump to page <n>
  reload            fetch the current view again
  help              show this message
  quit              exit";

/// What the shell should do after a command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Render,
    Print(String),
    Quit,
}

enum View {
    Investors(InvestorsView),
    Commitments(CommitmentsView),
}

/// Maps routes to views and drives them from text commands.
pub struct Shell {
    api: Arc<dyn InvestorApi>,
    route: Route,
    view: View,
}

impl Shell {
    pub fn new(api: Arc<dyn InvestorApi>) -> Self {
        Self {
            api,
            route: Route::Investors,
            view: View::Investors(InvestorsView::new()),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn investors_view(&self) -> Option<&InvestorsView> {
        match &self.view {
            View::Investors(view) => Some(view),
            View::Commitments(_) => None,
        }
    }

    pub fn commitments_view(&self) -> Option<&CommitmentsView> {
        match &self.view {
            View::Commitments(view) => Some(view),
            View::Investors(_) => None,
        }
    }

    fn commitments_view_mut(&mut self) -> Result<&mut CommitmentsView> {
        match &mut self.view {
            View::Commitments(view) => Ok(view),
            View::Investors(_) => bail!("Only available on the commitments view"),
        }
    }

    /// Mounts the view for `route` and fetches its data.
    ///
    /// Staying on the commitments view only refetches when the investor id changes.
    pub async fn navigate(&mut self, route: Route) {
        debug!(from = %self.route, to = %route, "Navigating");
        let needs_load = if let (View::Commitments(view), Route::Commitments { investor_id }) =
            (&mut self.view, &route)
        {
            view.set_investor_id(investor_id) || view.phase() == Phase::Idle
        } else {
            self.view = match &route {
                Route::Investors => View::Investors(InvestorsView::new()),
                Route::Commitments { investor_id } => {
                    View::Commitments(CommitmentsView::new(investor_id.as_str()))
                }
            };
            true
        };
        self.route = route;
        if needs_load {
            self.reload().await;
        }
    }

    /// Fetches the current view's data again.
    pub async fn reload(&mut self) {
        let spinner = ui::new_spinner(LOADING);
        match &mut self.view {
            View::Investors(view) => view.load(self.api.as_ref()).await,
            View::Commitments(view) => view.load(self.api.as_ref()).await,
        }
        spinner.finish_and_clear();
    }

    pub fn render(&self) -> String {
        match &self.view {
            View::Investors(view) => view.render(),
            View::Commitments(view) => view.render(),
        }
    }

    pub async fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        let (command, args) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(command, args)| (command, args.trim()));

        match command {
            "" => {}
            "help" | "?" => return Ok(Flow::Print(HELP.to_string())),
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            "open" => {
                let row: usize = args
                    .parse()
                    .with_context(|| format!("Expected a row number, got '{args}'"))?;
                let route = match &self.view {
                    View::Investors(view) => view.open_row(row)?,
                    View::Commitments(_) => bail!("Only available on the investors list"),
                };
                self.navigate(route).await;
            }
            "back" => {
                if self.route == Route::Investors {
                    bail!("Already on the investors list");
                }
                self.navigate(Route::Investors).await;
            }
            "go" => {
                let route = Route::parse(args)?;
                self.navigate(route).await;
            }
            "reload" => self.reload().await,
            "sort" => {
                if args.is_empty() {
                    bail!("Expected a column name");
                }
                self.commitments_view_mut()?.toggle_sort(args)?;
            }
            "filter" => self.commitments_view_mut()?.set_filter(args),
            "size" => {
                let size: usize = args
                    .parse()
                    .with_context(|| format!("Expected a page size, got '{args}'"))?;
                self.commitments_view_mut()?.set_page_size(size)?;
            }
            "next" => {
                self.commitments_view_mut()?.next_page();
            }
            "prev" | "previous" => {
                self.commitments_view_mut()?.previous_page();
            }
            "page" => {
                let page: usize = args
                    .parse()
                    .with_context(|| format!("Expected a page number, got '{args}'"))?;
                self.commitments_view_mut()?.go_to_page(page)?;
            }
            other => bail!("Unknown command '{other}'; type 'help' for a list of commands"),
        }
        Ok(Flow::Render)
    }

    /// Runs the read-eval-render loop until `quit` or end of input.
    pub async fn run<R: BufRead, W: Write>(
        &mut self,
        start: Route,
        mut input: R,
        output: &mut W,
    ) -> Result<()> {
        self.navigate(start).await;
        writeln!(output, "{}", self.render())?;

        loop {
            write!(output, "{}> ", self.route)?;
            output.flush()?;

            let mut line = String::new();
            if input
                .read_line(&mut line)
                .context("Failed to read command")?
                == 0
            {
                writeln!(output)?;
                break;
            }

            match self.execute(&line).await {
                Ok(Flow::Render) => writeln!(output, "{}", self.render())?,
                Ok(Flow::Print(text)) => writeln!(output, "{text}")?,
                Ok(Flow::Quit) => break,
                Err(e) => writeln!(
                    output,
                    "{}",
                    ui::style_text(&format!("error: {e:#}"), ui::StyleType::Error)
                )?,
            }
        }
        Ok(())
    }
}
