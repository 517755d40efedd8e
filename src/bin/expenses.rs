use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::Confirm;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use expense_tracker::{
    ExpenseDraft, ExpenseRecord, ExpenseRepository, Identified, Mode,
    chart::PieChart,
    config::ClientConfig,
    constants::{ALL_CATEGORIES, CURRENCY_SYMBOL},
    ledger::{self, CategoryFilter},
};

#[derive(Parser, Debug)]
#[command(version, about = "Track expenses in local storage or through the expense API", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
    /// Backend to use, overrides EXPENSES_MODE
    #[arg(short, long, global = true)]
    mode: Option<Mode>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List expenses with their total
    List {
        #[arg(short, long, default_value = ALL_CATEGORIES)]
        category: String,
    },
    Add {
        #[arg(short, long)]
        amount: f64,
        #[arg(short, long)]
        category: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// YYYY-MM-DD, today when omitted
        #[arg(long, default_value = "")]
        date: String,
    },
    /// Change fields of an existing expense, the rest are kept
    Edit {
        id: String,
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long)]
        date: Option<String>,
    },
    Remove {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    Categories,
    /// Write the category distribution as an SVG pie chart
    Chart {
        #[arg(short, long, default_value = "expenses.svg")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let mut config = ClientConfig::from_env()?;
    if let Some(mode) = args.mode {
        config.mode = mode;
    }

    let mut repository = ExpenseRepository::from_config(&config)?;
    let mode = repository.mode();
    repository
        .load()
        .await
        .with_context(|| format!("Failed to load expenses ({})", mode.label()))?;

    match args.command {
        Command::List { category } => {
            print_expenses(repository.expenses(), &CategoryFilter::from(category.as_str()));
        }
        Command::Add {
            amount,
            category,
            description,
            date,
        } => {
            let draft = ExpenseDraft::new(amount, category)
                .with_description(description)
                .with_date(date);
            repository.save(draft, None).await?;
            reload_and_print(&mut repository).await?;
        }
        Command::Edit {
            id,
            amount,
            category,
            description,
            date,
        } => {
            let Some(record) = repository.find(&id) else {
                warn!(id = %id, "no expense with this identifier, nothing to edit");
                return Ok(());
            };
            let mut draft = ExpenseDraft::from(record.expense());
            if let Some(amount) = amount {
                draft.amount = amount;
            }
            if let Some(category) = category {
                draft.category = category;
            }
            if let Some(description) = description {
                draft.description = description;
            }
            if let Some(date) = date {
                draft.date = date;
            }
            repository.save(draft, Some(&id)).await?;
            reload_and_print(&mut repository).await?;
        }
        Command::Remove { id, yes } => {
            if !yes
                && !Confirm::new("Delete this expense?")
                    .with_default(false)
                    .prompt()?
            {
                return Ok(());
            }
            repository.remove(&id).await?;
            reload_and_print(&mut repository).await?;
        }
        Command::Categories => {
            for category in ledger::categories(repository.expenses()) {
                println!("{}", category);
            }
        }
        Command::Chart { output } => {
            let totals = ledger::category_totals(repository.expenses());
            PieChart::new(&totals)
                .save(&output)
                .with_context(|| format!("Failed to write chart to {}", output.display()))?;
            println!("Chart written to {}", output.display());
        }
    }

    Ok(())
}

async fn reload_and_print(repository: &mut ExpenseRepository) -> anyhow::Result<()> {
    let expenses = repository.load().await?;
    print_expenses(expenses, &CategoryFilter::All);
    Ok(())
}

fn print_expenses(expenses: &[ExpenseRecord], filter: &CategoryFilter) {
    let filtered = filter.apply(expenses);
    if filtered.is_empty() {
        println!("No expenses to display.");
    }
    for record in &filtered {
        let expense = record.expense();
        println!(
            "{}{} - {}  [{}]",
            CURRENCY_SYMBOL,
            ledger::format_amount(expense.amount),
            expense.category,
            record.identifier()
        );
        println!("    {} • {}", expense.description, expense.date);
    }
    println!(
        "Total ({}): {}{}",
        filter,
        CURRENCY_SYMBOL,
        ledger::format_amount(ledger::total(filtered))
    );
}
